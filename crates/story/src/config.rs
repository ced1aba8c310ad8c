use std::env;

use serde::Deserialize;

use crate::model::DEFAULT_MODEL_OFFSET;

pub const DEFAULT_GLOBE_RADIUS: f64 = 0.2;
pub const DEFAULT_TRANSFORM_ANIMATION_DURATION_S: f64 = 2.0;

/// Presentation settings.
///
/// Hosts either embed this in their own settings file or read it from the
/// environment with [`PresenterConfig::from_env`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PresenterConfig {
    /// Unscaled globe radius in meters.
    pub globe_radius: f64,
    /// Duration of story-driven position/orientation/scale changes.
    pub transform_animation_duration_s: f64,
    /// Model offset for annotations that do not set one.
    pub default_model_offset: f64,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            globe_radius: DEFAULT_GLOBE_RADIUS,
            transform_animation_duration_s: DEFAULT_TRANSFORM_ANIMATION_DURATION_S,
            default_model_offset: DEFAULT_MODEL_OFFSET,
        }
    }
}

impl PresenterConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`; missing or malformed values keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            globe_radius: positive_f64(&lookup, "STORY_GLOBE_RADIUS", defaults.globe_radius),
            transform_animation_duration_s: non_negative_f64(
                &lookup,
                "STORY_TRANSFORM_ANIMATION_DURATION",
                defaults.transform_animation_duration_s,
            ),
            default_model_offset: non_negative_f64(
                &lookup,
                "STORY_MODEL_OFFSET",
                defaults.default_model_offset,
            ),
        }
    }
}

fn parse_f64(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<f64> {
    lookup(key)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn positive_f64(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: f64) -> f64 {
    parse_f64(lookup, key).filter(|v| *v > 0.0).unwrap_or(default)
}

fn non_negative_f64(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: f64) -> f64 {
    parse_f64(lookup, key).filter(|v| *v >= 0.0).unwrap_or(default)
}
