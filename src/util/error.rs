//! Error types for the Skein client library.

use thiserror::Error;

use super::DataType;

/// Main error type for resource model operations.
///
/// Validation errors are raised synchronously at the point of violation:
/// shape and kind errors when foreign or remote data enters the model,
/// cross-field errors when an entity is validated before a sync. The
/// transport layer treats any of these as "do not attempt network I/O".
#[derive(Error, Debug)]
pub enum Error {
    /// Flat input cannot be grouped into the declared element shape
    #[error("'{field}' expects rows of {extent}, got flat length {len}")]
    ShapeMismatch {
        field: &'static str,
        extent: usize,
        len: usize,
    },

    /// Declared dtype tag disagrees with the expected element kind
    #[error("'{field}' expects {expected} data, got '{actual}'")]
    KindMismatch {
        field: &'static str,
        expected: &'static str,
        actual: String,
    },

    /// Segment endpoint index is negative
    #[error("segment index {index} is negative; indices must be non-negative")]
    NegativeSegmentIndex { index: i64 },

    /// Segment endpoint index references a vertex that does not exist
    #[error("segment index {index} out of range for mesh with {nodes} vertices")]
    SegmentIndexOutOfRange { index: i64, nodes: usize },

    /// Encoded array exceeds the per-file upload limit
    #[error("'{array}' encodes to {nbytes} bytes, over the {limit} byte file limit")]
    PayloadTooLarge {
        array: &'static str,
        nbytes: usize,
        limit: usize,
    },

    /// Bound data length disagrees with the mesh
    #[error("data[{index}] length {actual} does not match {location} length {expected}")]
    DataLengthMismatch {
        index: usize,
        actual: usize,
        expected: usize,
        location: &'static str,
    },

    /// Unrecognized data location tag in a resource document
    #[error("data[{index}] has unrecognized location '{location}'")]
    InvalidLocation { index: usize, location: String },

    /// Binary payload length is inconsistent with its declared dtype
    #[error("cannot decode {dtype} array from {len} bytes")]
    Decode { dtype: DataType, len: usize },

    /// Display option value out of its allowed range
    #[error("option '{field}' value {value} out of range")]
    OptionOutOfRange { field: &'static str, value: f32 },

    /// Resource document is not valid JSON for its declared shape
    #[error("invalid resource document: {0}")]
    Json(#[from] serde_json::Error),

    /// A remote payload could not be fetched
    #[error("payload '{key}' unavailable: {reason}")]
    PayloadUnavailable { key: String, reason: String },

    /// The remote store rejected an upload
    #[error("upload rejected: {0}")]
    UploadRejected(String),

    /// Endpoint URL is malformed or insecure
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Result type alias for resource model operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::SegmentIndexOutOfRange { index: 5, nodes: 3 };
        assert!(e.to_string().contains("5"));
        assert!(e.to_string().contains("3"));

        let e = Error::DataLengthMismatch {
            index: 0,
            actual: 3,
            expected: 2,
            location: "CC",
        };
        assert!(e.to_string().contains("data[0]"));
        assert!(e.to_string().contains("CC"));
    }

    #[test]
    fn test_decode_error_names_dtype() {
        let e = Error::Decode {
            dtype: DataType::VEC3F,
            len: 13,
        };
        assert!(e.to_string().contains("float32[3]"));
        assert!(e.to_string().contains("13"));
    }
}
