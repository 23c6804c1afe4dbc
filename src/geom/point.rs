//! Point mesh - spatial information of a point cloud.

use glam::Vec3;

use crate::codec::{self, FILE_SIZE_LIMIT};
use crate::props::{FileSet, TrackedField};
use crate::sync::PayloadSource;
use crate::util::{PodType, Result};
use crate::wire::PointMeshDoc;

/// A point cloud: vertices with no connectivity.
///
/// Every vertex is its own cell, so node count and cell count coincide
/// and bound data always has vertex length.
#[derive(Clone, Debug)]
pub struct PointMesh {
    vertices: TrackedField<Vec<Vec3>>,
}

impl PointMesh {
    /// Create a point mesh from vertices.
    pub fn new(vertices: Vec<Vec3>) -> Self {
        Self {
            vertices: TrackedField::new("vertices", vertices),
        }
    }

    /// Mesh vertices.
    pub fn vertices(&self) -> &[Vec3] {
        self.vertices.get()
    }

    /// Overwrite the vertex list.
    pub fn set_vertices(&mut self, vertices: Vec<Vec3>) {
        self.vertices.set(vertices);
    }

    /// Number of nodes (vertices).
    pub fn num_nodes(&self) -> usize {
        self.vertices.get().len()
    }

    /// Number of cells; for a point cloud this equals the node count.
    pub fn num_cells(&self) -> usize {
        self.num_nodes()
    }

    /// Encoded byte size of the vertex array.
    pub fn nbytes(&self) -> usize {
        codec::byte_size::<Vec3>(self.num_nodes())
    }

    /// True when the vertex array is not confirmed remote.
    pub fn is_dirty(&self) -> bool {
        self.vertices.is_dirty()
    }

    /// Run the mesh validators: the vertex array must fit the per-file
    /// upload limit.
    pub fn validate(&self) -> Result<()> {
        codec::check_file_size(
            "vertices",
            codec::byte_size::<Vec3>(self.num_nodes()),
            FILE_SIZE_LIMIT,
        )
    }

    /// Encode the vertex array when it differs from the remote copy, or
    /// unconditionally with `force`. Validators run first.
    pub fn dirty_files(&self, force: bool) -> Result<FileSet> {
        self.validate()?;
        let mut files = FileSet::new();
        if force || self.vertices.is_dirty() {
            files.insert(self.vertices.name(), codec::encode_array(self.vertices.get()));
        }
        Ok(files)
    }

    /// Record the vertex array as confirmed remote.
    pub fn mark_synced(&mut self) {
        self.vertices.mark_synced();
    }

    /// Rebuild from a downloaded document, fetching the payload through
    /// the given source.
    pub fn from_doc(doc: &PointMeshDoc, payloads: &dyn PayloadSource) -> Result<Self> {
        if let Some(tag) = &doc.vertices_type {
            codec::check_kind("vertices", PodType::Float32, tag)?;
        }
        let vertices = codec::decode::<Vec3>(&payloads.fetch(&doc.vertices)?)?;
        let mesh = Self::new(vertices);
        mesh.validate()?;
        Ok(mesh)
    }
}
