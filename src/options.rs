//! Display options attached to meshes and resources.
//!
//! Options ride along in the `meta` object of resource documents. They do
//! not affect the binary payloads, only how the store presents a resource.

use serde::{Deserialize, Serialize};

use crate::util::{Error, Result};

/// How a line mesh is displayed: thin 1D lines, or extruded tubes
/// (boreholes).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewType {
    /// Thin 1D lines
    #[default]
    #[serde(rename = "line")]
    Line,
    /// Tubes / extruded lines / boreholes
    #[serde(rename = "tube")]
    Tube,
}

impl ViewType {
    /// Parse from a user-facing string, accepting the usual aliases.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "line" | "lines" | "thin" | "1d" => Some(Self::Line),
            "tube" | "tubes" | "extruded line" | "extruded lines" | "borehole" | "boreholes" => {
                Some(Self::Tube)
            }
            _ => None,
        }
    }

    /// Canonical wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Tube => "tube",
        }
    }
}

/// Options on a line mesh.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshOptions {
    /// Display style for the line set.
    #[serde(default)]
    pub view_type: ViewType,
}

/// Color and opacity options on a composite resource.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorOptions {
    /// Solid display color as (r, g, b). The store picks one when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<[u8; 3]>,
    /// Opacity in [0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
}

impl ColorOptions {
    /// Check option values against their allowed ranges.
    pub fn validate(&self) -> Result<()> {
        if let Some(opacity) = self.opacity {
            if !(0.0..=1.0).contains(&opacity) {
                return Err(Error::OptionOutOfRange {
                    field: "opacity",
                    value: opacity,
                });
            }
        }
        Ok(())
    }
}
