//! # Skein
//!
//! Client-side resource model for the Skein 3D visualization service.
//!
//! Skein describes point clouds and line sets as strongly-typed, validated
//! entities and keeps track of which binary arrays still differ from the
//! remote copy, so a transport layer can upload exactly the files that
//! changed. The model performs no network I/O itself; the transport works
//! against the contracts in [`sync`].
//!
//! ## Modules
//!
//! - [`util`] - basic types (dtypes, errors)
//! - [`props`] - tracked values and dirty-file bookkeeping
//! - [`codec`] - canonical little-endian array encoding
//! - [`geom`] - mesh entities (line sets, point clouds)
//! - [`data`] - data arrays bound to mesh locations
//! - [`options`] - display options
//! - [`resource`] - composite resources synced as one unit
//! - [`wire`] - typed documents for the resource wire format
//! - [`sync`] - session and transport contracts
//! - [`import`] - foreign interchange importers (OMF)
//!
//! ## Example
//!
//! ```
//! use glam::{IVec2, Vec3};
//! use skein::prelude::*;
//!
//! let mesh = LineMesh::new(
//!     vec![Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)],
//!     vec![IVec2::new(0, 1), IVec2::new(1, 2)],
//! );
//! let mut resource = LineSet::new(mesh).with_title("survey lines");
//! resource.add_data(DataLocation::Cell, DataArray::new(vec![0.4, 0.7]));
//!
//! // Everything is dirty until a confirmed sync.
//! let files = resource.dirty_file_set(false)?;
//! assert_eq!(files.len(), 3);
//! # Ok::<(), skein::Error>(())
//! ```

pub mod codec;
pub mod data;
pub mod geom;
pub mod import;
pub mod options;
pub mod props;
pub mod resource;
pub mod sync;
pub mod util;
pub mod wire;

// Re-export commonly used types
pub use util::{DataType, Error, PodType, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::codec::{EncodedArray, FILE_SIZE_LIMIT};
    pub use crate::data::{DataArray, DataBinding, DataLocation};
    pub use crate::geom::{LineMesh, PointMesh};
    pub use crate::options::{ColorOptions, MeshOptions, ViewType};
    pub use crate::props::{FileSet, TrackedField};
    pub use crate::resource::{CompositeResource, LineSet, PointSet};
    pub use crate::sync::{upload_resource, PayloadSource, RemoteStore, Session, UploadReceipt};
    pub use crate::util::{DataType, Error, PodType, Result};
}
