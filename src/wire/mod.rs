//! Typed documents for the resource wire format.
//!
//! A downloaded resource is a JSON document whose array fields are opaque
//! references (URLs or store keys) resolved through a
//! [`PayloadSource`](crate::sync::PayloadSource); the bytes behind each
//! reference are the canonical codec encoding. The structs here give those
//! documents a typed shape; the `from_doc` builders on the entities do the
//! actual materialization and re-validation.
//!
//! Mesh document:
//!
//! ```json
//! {
//!   "vertices": "https://.../files/abc",
//!   "verticesType": "Float32Arr",
//!   "segments": "https://.../files/def",
//!   "segmentsType": "Int32Arr",
//!   "meta": {"view_type": "line"}
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::options::{ColorOptions, MeshOptions};
use crate::util::Result;

/// Wire form of a line mesh.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LineMeshDoc {
    /// Reference to the vertex payload.
    pub vertices: String,
    /// Dtype tag of the vertex payload, when the store echoes one.
    #[serde(
        rename = "verticesType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub vertices_type: Option<String>,
    /// Reference to the segment payload.
    pub segments: String,
    /// Dtype tag of the segment payload.
    #[serde(
        rename = "segmentsType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub segments_type: Option<String>,
    /// Mesh display options.
    #[serde(default)]
    pub meta: MeshOptions,
}

/// Wire form of a point mesh.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PointMeshDoc {
    /// Reference to the vertex payload.
    pub vertices: String,
    /// Dtype tag of the vertex payload.
    #[serde(
        rename = "verticesType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub vertices_type: Option<String>,
}

/// Wire form of a bound data array.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataArrayDoc {
    /// Reference to the array payload.
    pub array: String,
    /// Dtype tag of the array payload.
    #[serde(rename = "arrayType", default, skip_serializing_if = "Option::is_none")]
    pub array_type: Option<String>,
    /// Array title.
    #[serde(default)]
    pub title: String,
    /// Array description.
    #[serde(default)]
    pub description: String,
}

/// Wire form of a data binding entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataBindingDoc {
    /// Location tag; aliases are accepted, the canonical forms are
    /// `"N"` and `"CC"`.
    pub location: String,
    /// The bound array.
    pub data: DataArrayDoc,
}

/// Wire form of a line set resource.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LineSetDoc {
    /// Resource title.
    #[serde(default)]
    pub title: String,
    /// Resource description.
    #[serde(default)]
    pub description: String,
    /// The line mesh.
    pub mesh: LineMeshDoc,
    /// Bound data entries.
    #[serde(default)]
    pub data: Vec<DataBindingDoc>,
    /// Resource display options.
    #[serde(default)]
    pub meta: ColorOptions,
}

/// Wire form of a point set resource.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PointSetDoc {
    /// Resource title.
    #[serde(default)]
    pub title: String,
    /// Resource description.
    #[serde(default)]
    pub description: String,
    /// The point mesh.
    pub mesh: PointMeshDoc,
    /// Bound data entries.
    #[serde(default)]
    pub data: Vec<DataBindingDoc>,
    /// Resource display options.
    #[serde(default)]
    pub meta: ColorOptions,
}

impl LineSetDoc {
    /// Parse from a downloaded JSON value.
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }
}

impl PointSetDoc {
    /// Parse from a downloaded JSON value.
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }
}
