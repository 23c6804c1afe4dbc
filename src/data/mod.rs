//! Data arrays bound to mesh locations.
//!
//! A [`DataArray`] is a named scalar array; a [`DataBinding`] attaches it
//! to a mesh at node or cell granularity. Whether the array length agrees
//! with the mesh is checked by the owning resource, which knows both sides.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::codec::{self, EncodedArray, FILE_SIZE_LIMIT};
use crate::props::TrackedField;
use crate::sync::PayloadSource;
use crate::util::Result;
use crate::wire::DataArrayDoc;

/// Where bound data lives on a mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataLocation {
    /// One value per vertex
    #[serde(rename = "N")]
    Node,
    /// One value per cell (segment, for a line mesh)
    #[serde(rename = "CC")]
    Cell,
}

impl DataLocation {
    /// Parse from a user-facing string, accepting the usual aliases.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "N" | "VERTEX" | "NODE" | "ENDPOINT" => Some(Self::Node),
            "CC" | "LINE" | "FACE" | "CELLCENTER" | "EDGE" | "SEGMENT" => Some(Self::Cell),
            _ => None,
        }
    }

    /// Canonical wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Node => "N",
            Self::Cell => "CC",
        }
    }
}

impl fmt::Display for DataLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named scalar array uploaded as one file.
#[derive(Clone, Debug)]
pub struct DataArray {
    /// Short human-readable name.
    pub title: String,
    /// Longer description.
    pub description: String,
    array: TrackedField<Vec<f32>>,
}

impl DataArray {
    /// Create a data array with empty title and description.
    pub fn new(array: Vec<f32>) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            array: TrackedField::new("array", array),
        }
    }

    /// Builder-style title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// The array values.
    pub fn array(&self) -> &[f32] {
        self.array.get()
    }

    /// Overwrite the array values.
    pub fn set_array(&mut self, values: Vec<f32>) {
        self.array.set(values);
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.array.get().len()
    }

    /// Check if the array is empty.
    pub fn is_empty(&self) -> bool {
        self.array.get().is_empty()
    }

    /// Encoded byte size, computed without encoding.
    pub fn nbytes(&self) -> usize {
        codec::byte_size::<f32>(self.len())
    }

    /// Check the array against the per-file upload limit.
    pub fn validate(&self) -> Result<()> {
        codec::check_file_size("array", self.nbytes(), FILE_SIZE_LIMIT)
    }

    /// True when the array is not confirmed remote.
    pub fn is_dirty(&self) -> bool {
        self.array.is_dirty()
    }

    /// Canonical encoding of the current values.
    pub fn encoded(&self) -> EncodedArray {
        codec::encode_array(self.array.get())
    }

    /// Record the current values as confirmed remote.
    pub fn mark_synced(&mut self) {
        self.array.mark_synced();
    }

    /// Rebuild from a downloaded document, fetching the payload through
    /// the given source. The payload must be the canonical encoding.
    pub fn from_doc(doc: &DataArrayDoc, payloads: &dyn PayloadSource) -> Result<Self> {
        use crate::util::PodType;

        if let Some(tag) = &doc.array_type {
            codec::check_kind("array", PodType::Float32, tag)?;
        }
        let bytes = payloads.fetch(&doc.array)?;
        let values = codec::decode::<f32>(&bytes)?;

        let mut data = Self::new(values);
        data.title = doc.title.clone();
        data.description = doc.description.clone();
        data.validate()?;
        Ok(data)
    }
}

/// A data array attached to a mesh location.
#[derive(Clone, Debug)]
pub struct DataBinding {
    /// Where on the mesh the values live.
    pub location: DataLocation,
    /// The bound values.
    pub data: DataArray,
}

impl DataBinding {
    /// Bind a data array at a location.
    pub fn new(location: DataLocation, data: DataArray) -> Self {
        Self { location, data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_aliases() {
        assert_eq!(DataLocation::from_str("N"), Some(DataLocation::Node));
        assert_eq!(DataLocation::from_str("vertex"), Some(DataLocation::Node));
        assert_eq!(DataLocation::from_str("ENDPOINT"), Some(DataLocation::Node));
        assert_eq!(DataLocation::from_str("CC"), Some(DataLocation::Cell));
        assert_eq!(DataLocation::from_str("segment"), Some(DataLocation::Cell));
        assert_eq!(DataLocation::from_str("edge"), Some(DataLocation::Cell));
        assert_eq!(DataLocation::from_str("everywhere"), None);
    }

    #[test]
    fn test_data_array_dirty_cycle() {
        let mut data = DataArray::new(vec![1.0, 2.0, 3.0]).with_title("temperature");
        assert!(data.is_dirty());
        assert_eq!(data.nbytes(), 12);

        data.mark_synced();
        assert!(!data.is_dirty());

        data.set_array(vec![1.0, 2.0, 4.0]);
        assert!(data.is_dirty());
    }

    #[test]
    fn test_data_array_encoded_matches_codec() {
        let data = DataArray::new(vec![0.5, -0.5]);
        let encoded = data.encoded();
        assert_eq!(encoded.tag(), "Float32Arr");
        assert_eq!(encoded.bytes, codec::encode(&[0.5f32, -0.5]));
    }

    #[test]
    fn test_file_size_limit_boundary() {
        use crate::util::Error;

        // FILE_SIZE_LIMIT / 4 values encode to exactly the limit.
        let at_limit = DataArray::new(vec![0.0; FILE_SIZE_LIMIT / 4]);
        assert!(at_limit.validate().is_ok());

        let over = DataArray::new(vec![0.0; FILE_SIZE_LIMIT / 4 + 1]);
        assert!(matches!(
            over.validate().unwrap_err(),
            Error::PayloadTooLarge {
                array: "array",
                nbytes: 5_000_004,
                limit: FILE_SIZE_LIMIT,
            }
        ));
    }
}
