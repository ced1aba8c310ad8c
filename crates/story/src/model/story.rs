use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ids::{AnnotationId, StoryId, StoryNodeId};
use crate::model::{Annotation, StoryNode};

/// An ordered narrative plus the pool of annotations its nodes refer to.
///
/// Nodes reference annotations by id only. Removing an annotation scrubs
/// its id from every node, so a story built through these methods never
/// holds dangling references; documents loaded from disk may, and lookups
/// treat those as "not found".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    #[serde(default)]
    pub id: StoryId,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub story_nodes: Vec<StoryNode>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

fn default_name() -> String {
    "Unnamed Story".to_string()
}

impl Default for Story {
    fn default() -> Self {
        Self {
            id: StoryId::new(),
            name: default_name(),
            story_nodes: Vec::new(),
            annotations: Vec::new(),
        }
    }
}

impl Story {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn has_story_nodes(&self) -> bool {
        !self.story_nodes.is_empty()
    }

    pub fn number_of_story_nodes(&self) -> usize {
        self.story_nodes.len()
    }

    pub fn story_node(&self, id: StoryNodeId) -> Option<&StoryNode> {
        self.story_nodes.iter().find(|n| n.id == id)
    }

    pub fn story_node_mut(&mut self, id: StoryNodeId) -> Option<&mut StoryNode> {
        self.story_nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn story_node_index(&self, id: StoryNodeId) -> Option<usize> {
        self.story_nodes.iter().position(|n| n.id == id)
    }

    pub fn add_story_node(&mut self, node: StoryNode) -> StoryNodeId {
        let id = node.id;
        self.story_nodes.push(node);
        id
    }

    /// Inserts at `index`, clamped to the end of the list.
    pub fn insert_story_node(&mut self, index: usize, node: StoryNode) -> StoryNodeId {
        let id = node.id;
        let index = index.min(self.story_nodes.len());
        self.story_nodes.insert(index, node);
        id
    }

    pub fn remove_story_node(&mut self, id: StoryNodeId) -> Option<StoryNode> {
        let index = self.story_node_index(id)?;
        Some(self.story_nodes.remove(index))
    }

    /// Moves the node at `from` so it ends up at index `to` (clamped).
    ///
    /// Returns `false` if `from` is out of range.
    pub fn move_story_node(&mut self, from: usize, to: usize) -> bool {
        if from >= self.story_nodes.len() {
            return false;
        }
        let node = self.story_nodes.remove(from);
        let to = to.min(self.story_nodes.len());
        self.story_nodes.insert(to, node);
        true
    }

    pub fn annotation(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    pub fn annotation_mut(&mut self, id: AnnotationId) -> Option<&mut Annotation> {
        self.annotations.iter_mut().find(|a| a.id == id)
    }

    pub fn add_annotation(&mut self, annotation: Annotation) -> AnnotationId {
        let id = annotation.id;
        self.annotations.push(annotation);
        id
    }

    /// Removes an annotation and every node's reference to it.
    pub fn remove_annotation(&mut self, id: AnnotationId) -> Option<Annotation> {
        let index = self.annotations.iter().position(|a| a.id == id)?;
        let removed = self.annotations.remove(index);
        let mut scrubbed = 0usize;
        for node in &mut self.story_nodes {
            if node.hide_annotation(id) {
                scrubbed += 1;
            }
        }
        debug!(annotation = %id, scrubbed, "annotation removed");
        Some(removed)
    }

    /// Shows `annotation` on `node`. Fails if either does not exist.
    pub fn attach_annotation(&mut self, node: StoryNodeId, annotation: AnnotationId) -> bool {
        if self.annotation(annotation).is_none() {
            return false;
        }
        match self.story_node_mut(node) {
            Some(node) => {
                node.show_annotation(annotation);
                true
            }
            None => false,
        }
    }

    pub fn detach_annotation(&mut self, node: StoryNodeId, annotation: AnnotationId) -> bool {
        self.story_node_mut(node)
            .is_some_and(|n| n.hide_annotation(annotation))
    }

    /// Nodes that show `annotation`, in story order.
    pub fn annotation_references(&self, annotation: AnnotationId) -> Vec<StoryNodeId> {
        self.story_nodes
            .iter()
            .filter(|n| n.shows(annotation))
            .map(|n| n.id)
            .collect()
    }

    /// Back-reference table from every annotation to the nodes showing it.
    ///
    /// Annotations no node shows map to an empty list. Dangling ids in
    /// nodes are not included.
    pub fn annotation_index(&self) -> BTreeMap<AnnotationId, Vec<StoryNodeId>> {
        let mut index: BTreeMap<AnnotationId, Vec<StoryNodeId>> = self
            .annotations
            .iter()
            .map(|a| (a.id, Vec::new()))
            .collect();
        for node in &self.story_nodes {
            for id in &node.annotation_ids {
                if let Some(nodes) = index.get_mut(id) {
                    nodes.push(node.id);
                }
            }
        }
        index
    }

    /// Annotation ids referenced by some node but missing from the pool.
    pub fn dangling_annotation_ids(&self) -> BTreeSet<AnnotationId> {
        let known: BTreeSet<AnnotationId> = self.annotations.iter().map(|a| a.id).collect();
        self.story_nodes
            .iter()
            .flat_map(|n| n.annotation_ids.iter().copied())
            .filter(|id| !known.contains(id))
            .collect()
    }

    /// Annotations shown at `node`, in the node's display order.
    ///
    /// Unknown nodes and dangling ids yield nothing.
    pub fn visible_annotations(&self, node: StoryNodeId) -> Vec<&Annotation> {
        let Some(node) = self.story_node(node) else {
            return Vec::new();
        };
        node.annotation_ids
            .iter()
            .filter_map(|id| self.annotation(*id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Story;
    use crate::ids::{AnnotationId, StoryNodeId};
    use crate::model::{Annotation, StoryNode};
    use foundation::math::Angle;
    use pretty_assertions::assert_eq;

    fn annotation(text: &str) -> Annotation {
        Annotation::new(Angle::from_degrees(10.0), Angle::from_degrees(20.0), text)
    }

    fn names(story: &Story) -> Vec<&str> {
        story.story_nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn node_lookup_insert_move_remove() {
        let mut story = Story::new("Alps");
        let a = story.add_story_node(StoryNode::new("a"));
        let c = story.add_story_node(StoryNode::new("c"));
        story.insert_story_node(1, StoryNode::new("b"));
        assert_eq!(names(&story), vec!["a", "b", "c"]);
        assert_eq!(story.story_node_index(c), Some(2));

        assert!(story.move_story_node(0, 2));
        assert_eq!(names(&story), vec!["b", "c", "a"]);
        assert!(!story.move_story_node(7, 0));

        assert_eq!(story.remove_story_node(a).map(|n| n.name), Some("a".to_string()));
        assert!(story.remove_story_node(a).is_none());
        assert_eq!(story.number_of_story_nodes(), 2);
        assert!(story.story_node(StoryNodeId::new()).is_none());
    }

    #[test]
    fn removing_an_annotation_cascades_into_nodes() {
        let mut story = Story::new("Alps");
        let pin = story.add_annotation(annotation("pin"));
        let other = story.add_annotation(annotation("other"));
        let n1 = story.add_story_node(StoryNode::new("one"));
        let n2 = story.add_story_node(StoryNode::new("two"));
        assert!(story.attach_annotation(n1, pin));
        assert!(story.attach_annotation(n2, pin));
        assert!(story.attach_annotation(n2, other));
        assert_eq!(story.annotation_references(pin), vec![n1, n2]);

        let removed = story.remove_annotation(pin).expect("exists");
        assert_eq!(removed.text, "pin");
        assert!(story.annotation_references(pin).is_empty());
        assert_eq!(
            story.story_node(n2).map(|n| n.annotation_ids.clone()),
            Some(vec![other])
        );
        assert!(story.dangling_annotation_ids().is_empty());
    }

    #[test]
    fn attach_requires_existing_annotation_and_node() {
        let mut story = Story::new("Alps");
        let node = story.add_story_node(StoryNode::new("one"));
        let pin = story.add_annotation(annotation("pin"));
        assert!(!story.attach_annotation(node, AnnotationId::new()));
        assert!(!story.attach_annotation(StoryNodeId::new(), pin));
        assert!(story.attach_annotation(node, pin));
        assert!(story.detach_annotation(node, pin));
        assert!(!story.detach_annotation(node, pin));
    }

    #[test]
    fn dangling_ids_are_tolerated_at_lookup() {
        let mut story = Story::new("Alps");
        let pin = story.add_annotation(annotation("pin"));
        let ghost = AnnotationId::new();
        let mut node = StoryNode::new("one");
        node.annotation_ids = vec![ghost, pin];
        let node = story.add_story_node(node);

        let visible: Vec<_> = story
            .visible_annotations(node)
            .iter()
            .map(|a| a.text.as_str())
            .collect();
        assert_eq!(visible, vec!["pin"]);
        assert_eq!(story.dangling_annotation_ids().into_iter().collect::<Vec<_>>(), vec![ghost]);

        let index = story.annotation_index();
        assert_eq!(index.get(&pin), Some(&vec![node]));
        assert!(!index.contains_key(&ghost));
    }
}
