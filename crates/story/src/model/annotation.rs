use foundation::math::{Angle, GeoPoint};
use scene::ModelSource;
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::ids::AnnotationId;

/// Default distance of the label above the globe surface.
pub const DEFAULT_LABEL_OFFSET: f64 = 0.03;
/// Default distance of the marker model above the globe surface.
pub const DEFAULT_MODEL_OFFSET: f64 = 0.03;
/// Bundled marker model used when an annotation names none.
pub const DEFAULT_ENTITY_NAME: &str = "Pin_V2";

/// A geo-tagged marker owned by a [`Story`](crate::Story).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    #[serde(default)]
    pub id: AnnotationId,
    #[serde(with = "codec::angle_degrees")]
    pub latitude: Angle,
    #[serde(with = "codec::angle_degrees")]
    pub longitude: Angle,
    /// Label distance from the globe surface.
    #[serde(default = "default_label_offset")]
    pub offset: f64,
    /// Marker model distance from the globe surface, along the surface normal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_offset: Option<f64>,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub image_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usdz_file_name: Option<String>,
    #[serde(
        default,
        rename = "usdzFileURL",
        skip_serializing_if = "Option::is_none"
    )]
    pub usdz_file_url: Option<String>,
}

fn default_label_offset() -> f64 {
    DEFAULT_LABEL_OFFSET
}

impl Annotation {
    pub fn new(latitude: Angle, longitude: Angle, text: impl Into<String>) -> Self {
        Self {
            id: AnnotationId::new(),
            latitude,
            longitude,
            offset: DEFAULT_LABEL_OFFSET,
            model_offset: None,
            text: text.into(),
            description: None,
            image_names: Vec::new(),
            entity_name: Some(DEFAULT_ENTITY_NAME.to_string()),
            usdz_file_name: None,
            usdz_file_url: None,
        }
    }

    pub fn geo_point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// The model to place for this annotation, if any.
    ///
    /// An imported file takes precedence over a bundled entity.
    pub fn model_source(&self) -> Option<ModelSource> {
        if let Some(url) = &self.usdz_file_url {
            return Some(ModelSource::File(url.clone()));
        }
        self.entity_name
            .as_ref()
            .filter(|name| !name.is_empty())
            .map(|name| ModelSource::Bundled(name.clone()))
    }
}
