use foundation::math::{Angle, GeoPoint, Vec3};
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::model::Annotation;

/// What a story node changes about the globe. Every field is optional;
/// `None` means "keep whatever the previous nodes established".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "GlobeStateWire", into = "GlobeStateWire")]
pub struct GlobeState {
    pub position: Option<Vec3>,
    /// The surface point that should face the viewer.
    pub focus: Option<GeoPoint>,
    pub scale: Option<f64>,
    pub annotations: Vec<Annotation>,
}

impl GlobeState {
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_focus(mut self, focus: GeoPoint) -> Self {
        self.focus = Some(focus);
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// True when this patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.position.is_none()
            && self.focus.is_none()
            && self.scale.is_none()
            && self.annotations.is_empty()
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GlobeStateWire {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "codec::vec3_opt")]
    position: Option<Vec3>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "codec::angle_degrees_opt"
    )]
    focus_latitude: Option<Angle>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "codec::angle_degrees_opt"
    )]
    focus_longitude: Option<Angle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    annotations: Vec<Annotation>,
}

#[derive(Debug)]
pub struct UnpairedFocus;

impl std::fmt::Display for UnpairedFocus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "focusLatitude and focusLongitude must be given together"
        )
    }
}

impl TryFrom<GlobeStateWire> for GlobeState {
    type Error = UnpairedFocus;

    fn try_from(wire: GlobeStateWire) -> Result<Self, Self::Error> {
        let focus = match (wire.focus_latitude, wire.focus_longitude) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            (None, None) => None,
            _ => return Err(UnpairedFocus),
        };
        Ok(Self {
            position: wire.position,
            focus,
            scale: wire.scale,
            annotations: wire.annotations,
        })
    }
}

impl From<GlobeState> for GlobeStateWire {
    fn from(state: GlobeState) -> Self {
        Self {
            position: state.position,
            focus_latitude: state.focus.map(|f| f.latitude),
            focus_longitude: state.focus.map(|f| f.longitude),
            scale: state.scale,
            annotations: state.annotations,
        }
    }
}
