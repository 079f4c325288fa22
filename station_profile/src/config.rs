//! Run configuration with documented defaults.
//!
//! Every field has a default, so a JSON file only needs to name the values it
//! changes:
//!
//! ```json
//! { "marks": { "tick_height": 250.0, "placement": "above" } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::drawing::DrawingStyle;
use crate::error::{ProfileError, Result};
use crate::io::{read_to_string, Delimiter};
use crate::marks::MarkStyle;
use crate::profile::ProfileScale;
use crate::resolver::ResolverKind;
use crate::stations::{LengthPolicy, SegmentColumns};

/// How the profile file is read and scaled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileInput {
    pub delimiter: Delimiter,
    pub scale: ProfileScale,
}

impl Default for ProfileInput {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Tab,
            scale: ProfileScale::default(),
        }
    }
}

/// How the segment file is read.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentInput {
    pub delimiter: Delimiter,
    pub columns: SegmentColumns,
    pub length_policy: LengthPolicy,
}

/// Mark geometry settings and the altitude lookup backend.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkConfig {
    #[serde(flatten)]
    pub style: MarkStyle,
    pub resolver: ResolverKind,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub profile: ProfileInput,
    pub segments: SegmentInput,
    pub marks: MarkConfig,
    pub drawing: DrawingStyle,
}

impl Config {
    /// Loads and validates a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = read_to_string(path).map_err(|e| ProfileError::read(path, e))?;
        let config = Self::from_json_str(&contents)
            .map_err(|e| ProfileError::Config(format!("{}: {e}", path.display())))?;
        Ok(config)
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(json).map_err(|e| ProfileError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ProfileError::Config(e.to_string()))
    }

    /// Rejects values no drawing can be built from.
    pub fn validate(&self) -> Result<()> {
        let scale = &self.profile.scale;
        for (name, v) in [
            ("profile.scale.distance_factor", scale.distance_factor),
            ("profile.scale.elevation_factor", scale.elevation_factor),
        ] {
            if !v.is_finite() || v == 0.0 {
                return Err(ProfileError::Config(format!("{name} must be finite and non-zero")));
            }
        }
        for (name, v) in [
            ("marks.tick_height", self.marks.style.tick_height),
            ("drawing.text.height", self.drawing.text.height),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ProfileError::Config(format!("{name} must be positive")));
            }
        }
        let layers = [
            &self.drawing.profile_layer.name,
            &self.drawing.marks_layer.name,
            &self.drawing.labels_layer.name,
        ];
        if layers.iter().any(|n| n.trim().is_empty()) {
            return Err(ProfileError::Config("layer names must not be empty".to_string()));
        }
        Ok(())
    }
}
