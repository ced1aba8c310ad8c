use serde::{Deserialize, Serialize};

use crate::codec;

/// Still image shown on a slide, kept encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlideImage {
    #[serde(with = "codec::base64_bytes")]
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    #[serde(default = "default_text")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<SlideImage>,
}

fn default_text() -> String {
    "Text".to_string()
}

impl Default for Slide {
    fn default() -> Self {
        Self {
            text: default_text(),
            image: None,
        }
    }
}

impl Slide {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Slide, SlideImage};

    #[test]
    fn image_is_base64_on_the_wire() {
        let slide = Slide {
            text: "Start".to_string(),
            image: Some(SlideImage {
                bytes: vec![0x89, b'P', b'N', b'G'],
            }),
        };
        let json = serde_json::to_value(&slide).expect("serialize");
        assert_eq!(json["image"], "iVBORw==");

        let back: Slide = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, slide);
    }

    #[test]
    fn rejects_invalid_base64() {
        let err = serde_json::from_str::<Slide>(r#"{"text": "x", "image": "***"}"#);
        assert!(err.is_err());
    }
}
