//! Wire forms shared by the story model.
//!
//! Angles are written as `{"degrees": <f64>}`. Older documents stored a bare
//! number of degrees, so readers accept both.

use foundation::math::{Angle, Vec3};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum AngleWire {
    Degrees { degrees: f64 },
    Legacy(f64),
}

impl From<AngleWire> for Angle {
    fn from(wire: AngleWire) -> Self {
        match wire {
            AngleWire::Degrees { degrees } | AngleWire::Legacy(degrees) => {
                Angle::from_degrees(degrees)
            }
        }
    }
}

#[derive(Serialize)]
struct DegreesOut {
    degrees: f64,
}

pub mod angle_degrees {
    use super::*;

    pub fn serialize<S: Serializer>(angle: &Angle, s: S) -> Result<S::Ok, S::Error> {
        DegreesOut {
            degrees: angle.degrees(),
        }
        .serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Angle, D::Error> {
        AngleWire::deserialize(d).map(Angle::from)
    }
}

pub mod angle_degrees_opt {
    use super::*;

    pub fn serialize<S: Serializer>(angle: &Option<Angle>, s: S) -> Result<S::Ok, S::Error> {
        angle
            .map(|a| DegreesOut {
                degrees: a.degrees(),
            })
            .serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Angle>, D::Error> {
        Ok(Option::<AngleWire>::deserialize(d)?.map(Angle::from))
    }
}

/// `Vec3` as a `[x, y, z]` array.
pub mod vec3_opt {
    use super::*;

    pub fn serialize<S: Serializer>(v: &Option<Vec3>, s: S) -> Result<S::Ok, S::Error> {
        v.map(Vec3::as_array).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec3>, D::Error> {
        Ok(Option::<[f64; 3]>::deserialize(d)?.map(Vec3::from))
    }
}

/// Bytes as a standard base64 string.
pub mod base64_bytes {
    use base64::Engine as _;
    use serde::de::Error as _;

    use super::*;

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        base64::engine::general_purpose::STANDARD
            .encode(bytes)
            .serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(d)?;
        base64::engine::general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .map_err(D::Error::custom)
    }
}
