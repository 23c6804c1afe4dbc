//! Composite resources - the unit synced with the remote store.
//!
//! A composite resource owns one mesh, any number of data bindings, and
//! display options. [`CompositeResource`] is the seam the transport layer
//! works against: validate, collect dirty files, upload, then - and only
//! then - mark synced.

use serde_json::Value;

use crate::props::FileSet;
use crate::util::Result;

pub mod line;
pub mod point;

pub use line::LineSet;
pub use point::PointSet;

/// A mesh plus bound data and options, synced as one unit.
pub trait CompositeResource {
    /// Resource kind as known to the store (`"line"`, `"point"`).
    fn kind(&self) -> &'static str;

    /// Resource title.
    fn title(&self) -> &str;

    /// Resource description.
    fn description(&self) -> &str;

    /// Run every cross-field validator. Must pass before any
    /// serialization is attempted; a failure leaves dirty state untouched.
    fn validate(&self) -> Result<()>;

    /// Total encoded byte size of all owned arrays.
    fn nbytes(&self) -> usize;

    /// Validate, then collect the encoded arrays that still differ from
    /// the remote copy (all arrays with `force`), keyed by stable
    /// per-array identifiers.
    fn dirty_file_set(&self, force: bool) -> Result<FileSet>;

    /// Record every owned tracked field as confirmed remote. Called by
    /// the transport layer only after the store confirms the write.
    fn mark_synced(&mut self);

    /// Document metadata sent alongside the files on upload.
    fn metadata(&self) -> Value;
}
