use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use story::{AnnotationId, Story};
use tracing::debug;

pub const STORY_FILE_EXTENSION: &str = "story";

#[derive(Debug)]
pub enum StoryDocumentError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// Strict loading found node references to annotations the story lacks.
    DanglingAnnotations(BTreeSet<AnnotationId>),
}

impl fmt::Display for StoryDocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoryDocumentError::Io(err) => write!(f, "I/O error: {err}"),
            StoryDocumentError::Parse(err) => write!(f, "Story parse error: {err}"),
            StoryDocumentError::DanglingAnnotations(ids) => {
                write!(f, "{} dangling annotation reference(s):", ids.len())?;
                for id in ids {
                    write!(f, " {id}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for StoryDocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoryDocumentError::Io(err) => Some(err),
            StoryDocumentError::Parse(err) => Some(err),
            StoryDocumentError::DanglingAnnotations(_) => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Validation {
    /// Accept dangling annotation ids; lookups skip them.
    #[default]
    Lenient,
    Strict,
}

/// A story together with where it lives on disk and what was last saved.
#[derive(Debug, Clone)]
pub struct StoryDocument {
    story: Story,
    path: Option<PathBuf>,
    saved_hash: Option<String>,
}

impl StoryDocument {
    pub fn new(story: Story) -> Self {
        Self {
            story,
            path: None,
            saved_hash: None,
        }
    }

    pub fn from_json_str(payload: &str, validation: Validation) -> Result<Self, StoryDocumentError> {
        let story: Story = serde_json::from_str(payload).map_err(StoryDocumentError::Parse)?;
        validate(&story, validation)?;
        let mut document = Self::new(story);
        document.saved_hash = Some(content_hash(document.to_json_string()?.as_bytes()));
        Ok(document)
    }

    pub fn load(path: impl AsRef<Path>, validation: Validation) -> Result<Self, StoryDocumentError> {
        let path = path.as_ref();
        let payload = fs::read_to_string(path).map_err(StoryDocumentError::Io)?;
        let mut document = Self::from_json_str(&payload, validation)?;
        debug!(
            path = %path.display(),
            nodes = document.story.number_of_story_nodes(),
            "story loaded"
        );
        document.path = Some(path.to_path_buf());
        Ok(document)
    }

    /// Pretty-printed JSON for the current story.
    pub fn to_json_string(&self) -> Result<String, StoryDocumentError> {
        serde_json::to_string_pretty(&self.story).map_err(StoryDocumentError::Parse)
    }

    /// Writes to the path the document was loaded from or last saved to.
    pub fn save(&mut self) -> Result<(), StoryDocumentError> {
        let path = self.path.clone().ok_or_else(|| {
            StoryDocumentError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "document has no path",
            ))
        })?;
        self.save_as(path)
    }

    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<(), StoryDocumentError> {
        let path = path.as_ref();
        let payload = self.to_json_string()?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(StoryDocumentError::Io)?;
        }
        fs::write(path, &payload).map_err(StoryDocumentError::Io)?;
        debug!(path = %path.display(), bytes = payload.len(), "story saved");
        self.saved_hash = Some(content_hash(payload.as_bytes()));
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    pub fn story(&self) -> &Story {
        &self.story
    }

    pub fn story_mut(&mut self) -> &mut Story {
        &mut self.story
    }

    pub fn into_story(self) -> Story {
        self.story
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// True when the story differs from what was last loaded or saved.
    ///
    /// Compares canonical serializations, so formatting of the file on disk
    /// does not matter.
    pub fn is_modified(&self) -> bool {
        let Some(saved) = &self.saved_hash else {
            return true;
        };
        match self.to_json_string() {
            Ok(payload) => content_hash(payload.as_bytes()) != *saved,
            Err(_) => true,
        }
    }
}

fn validate(story: &Story, validation: Validation) -> Result<(), StoryDocumentError> {
    let dangling = story.dangling_annotation_ids();
    if dangling.is_empty() {
        return Ok(());
    }
    match validation {
        Validation::Strict => Err(StoryDocumentError::DanglingAnnotations(dangling)),
        Validation::Lenient => {
            debug!(count = dangling.len(), "story has dangling annotation references");
            Ok(())
        }
    }
}

fn content_hash(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}
