//! Line mesh - spatial information of a 1D line set.

use glam::{IVec2, Vec3};

use crate::codec::{self, FILE_SIZE_LIMIT};
use crate::options::MeshOptions;
use crate::props::{FileSet, TrackedField};
use crate::sync::PayloadSource;
use crate::util::{Error, PodType, Result};
use crate::wire::LineMeshDoc;

/// A 1D line set: vertices and the segments connecting them.
///
/// Each segment is a pair of indices into the vertex list. Indices are
/// kept signed so that out-of-contract foreign input can be reported
/// precisely instead of wrapping.
#[derive(Clone, Debug)]
pub struct LineMesh {
    vertices: TrackedField<Vec<Vec3>>,
    segments: TrackedField<Vec<IVec2>>,
    /// Display options.
    pub opts: MeshOptions,
}

impl LineMesh {
    /// Create a line mesh from vertices and segment index pairs.
    pub fn new(vertices: Vec<Vec3>, segments: Vec<IVec2>) -> Self {
        Self {
            vertices: TrackedField::new("vertices", vertices),
            segments: TrackedField::new("segments", segments),
            opts: MeshOptions::default(),
        }
    }

    /// Mesh vertices.
    pub fn vertices(&self) -> &[Vec3] {
        self.vertices.get()
    }

    /// Segment endpoint indices.
    pub fn segments(&self) -> &[IVec2] {
        self.segments.get()
    }

    /// Overwrite the vertex list.
    pub fn set_vertices(&mut self, vertices: Vec<Vec3>) {
        self.vertices.set(vertices);
    }

    /// Overwrite the segment list.
    pub fn set_segments(&mut self, segments: Vec<IVec2>) {
        self.segments.set(segments);
    }

    /// Number of nodes (vertices).
    pub fn num_nodes(&self) -> usize {
        self.vertices.get().len()
    }

    /// Number of cells (segments).
    pub fn num_cells(&self) -> usize {
        self.segments.get().len()
    }

    /// Encoded byte size of both arrays, computed without encoding.
    pub fn nbytes(&self) -> usize {
        codec::byte_size::<Vec3>(self.num_nodes()) + codec::byte_size::<IVec2>(self.num_cells())
    }

    /// True when any array is not confirmed remote.
    pub fn is_dirty(&self) -> bool {
        self.vertices.is_dirty() || self.segments.is_dirty()
    }

    /// Run the mesh validators.
    ///
    /// Every segment index must be non-negative and reference an existing
    /// vertex, and each array must fit the per-file upload limit. The mesh
    /// stays mutable and re-checkable after a failure.
    pub fn validate(&self) -> Result<()> {
        let nodes = self.num_nodes();
        for seg in self.segments.get() {
            for index in [seg.x, seg.y] {
                if index < 0 {
                    return Err(Error::NegativeSegmentIndex {
                        index: index as i64,
                    });
                }
                if index as usize >= nodes {
                    return Err(Error::SegmentIndexOutOfRange {
                        index: index as i64,
                        nodes,
                    });
                }
            }
        }
        codec::check_file_size(
            "vertices",
            codec::byte_size::<Vec3>(self.num_nodes()),
            FILE_SIZE_LIMIT,
        )?;
        codec::check_file_size(
            "segments",
            codec::byte_size::<IVec2>(self.num_cells()),
            FILE_SIZE_LIMIT,
        )?;
        Ok(())
    }

    /// Encode the arrays that still differ from the remote copy.
    ///
    /// Validators run first; files are only produced for a mesh that
    /// passes. With `force`, both arrays are included for a full
    /// re-upload.
    pub fn dirty_files(&self, force: bool) -> Result<FileSet> {
        self.validate()?;
        let mut files = FileSet::new();
        if force || self.vertices.is_dirty() {
            files.insert(self.vertices.name(), codec::encode_array(self.vertices.get()));
        }
        if force || self.segments.is_dirty() {
            files.insert(self.segments.name(), codec::encode_array(self.segments.get()));
        }
        Ok(files)
    }

    /// Record both arrays as confirmed remote.
    pub fn mark_synced(&mut self) {
        self.vertices.mark_synced();
        self.segments.mark_synced();
    }

    /// Rebuild from a downloaded document, fetching payloads through the
    /// given source.
    ///
    /// The result satisfies the same invariants as a directly-constructed
    /// mesh; remote data that violates them fails with the same errors.
    pub fn from_doc(doc: &LineMeshDoc, payloads: &dyn PayloadSource) -> Result<Self> {
        if let Some(tag) = &doc.vertices_type {
            codec::check_kind("vertices", PodType::Float32, tag)?;
        }
        if let Some(tag) = &doc.segments_type {
            codec::check_kind("segments", PodType::Int32, tag)?;
        }

        let vertices = codec::decode::<Vec3>(&payloads.fetch(&doc.vertices)?)?;
        let segments = codec::decode::<IVec2>(&payloads.fetch(&doc.segments)?)?;

        let mut mesh = Self::new(vertices, segments);
        mesh.opts = doc.meta.clone();
        mesh.validate()?;
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_point_polyline() -> LineMesh {
        LineMesh::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0),
            ],
            vec![IVec2::new(0, 1), IVec2::new(1, 2)],
        )
    }

    #[test]
    fn test_counts() {
        let mesh = three_point_polyline();
        assert_eq!(mesh.num_nodes(), 3);
        assert_eq!(mesh.num_cells(), 2);
        assert_eq!(mesh.nbytes(), 3 * 12 + 2 * 8);
    }

    #[test]
    fn test_validate_accepts_max_index() {
        // node_count - 1 is the largest legal index.
        let mesh = LineMesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![IVec2::new(0, 2)],
        );
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_index_at_node_count() {
        let mesh = LineMesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![IVec2::new(0, 3)],
        );
        assert!(matches!(
            mesh.validate().unwrap_err(),
            Error::SegmentIndexOutOfRange { index: 3, nodes: 3 }
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_range_index() {
        let mesh = LineMesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![IVec2::new(0, 5)],
        );
        assert!(matches!(
            mesh.validate().unwrap_err(),
            Error::SegmentIndexOutOfRange { index: 5, nodes: 3 }
        ));
    }

    #[test]
    fn test_validate_rejects_negative_index() {
        let mesh = LineMesh::new(vec![Vec3::ZERO, Vec3::X], vec![IVec2::new(-1, 1)]);
        assert!(matches!(
            mesh.validate().unwrap_err(),
            Error::NegativeSegmentIndex { index: -1 }
        ));
    }

    #[test]
    fn test_dirty_files_progression() {
        let mut mesh = three_point_polyline();

        // Never synced: everything is dirty.
        let files = mesh.dirty_files(false).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.contains("vertices") && files.contains("segments"));

        mesh.mark_synced();
        assert!(mesh.dirty_files(false).unwrap().is_empty());

        // Mutating one array dirties exactly that array.
        mesh.set_segments(vec![IVec2::new(0, 2)]);
        let files = mesh.dirty_files(false).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files.contains("segments"));
    }

    #[test]
    fn test_dirty_files_refuses_invalid_mesh() {
        let mut mesh = three_point_polyline();
        mesh.set_segments(vec![IVec2::new(0, 9)]);
        assert!(mesh.dirty_files(false).is_err());
        assert!(mesh.dirty_files(true).is_err());
    }

    #[test]
    fn test_force_is_deterministic() {
        let mesh = three_point_polyline();
        let a = mesh.dirty_files(true).unwrap();
        let b = mesh.dirty_files(true).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_from_doc_roundtrip() {
        use std::collections::BTreeMap;

        let source = three_point_polyline();
        let mut payloads = BTreeMap::new();
        payloads.insert("files/v".to_string(), codec::encode(source.vertices()));
        payloads.insert("files/s".to_string(), codec::encode(source.segments()));

        let doc = LineMeshDoc {
            vertices: "files/v".to_string(),
            vertices_type: Some("Float32Arr".to_string()),
            segments: "files/s".to_string(),
            segments_type: Some("Int32Arr".to_string()),
            meta: MeshOptions::default(),
        };

        let mesh = LineMesh::from_doc(&doc, &payloads).unwrap();
        assert_eq!(mesh.vertices(), source.vertices());
        assert_eq!(mesh.segments(), source.segments());
        // A rebuilt mesh has not been synced by this client.
        assert!(mesh.is_dirty());
    }

    #[test]
    fn test_from_doc_rejects_wrong_dtype() {
        use std::collections::BTreeMap;

        let doc = LineMeshDoc {
            vertices: "files/v".to_string(),
            vertices_type: Some("Int32Arr".to_string()),
            segments: "files/s".to_string(),
            segments_type: None,
            meta: MeshOptions::default(),
        };
        let err = LineMesh::from_doc(&doc, &BTreeMap::<String, Vec<u8>>::new()).unwrap_err();
        assert!(matches!(err, Error::KindMismatch { field: "vertices", .. }));
    }

    #[test]
    fn test_from_doc_rejects_bad_remote_indices() {
        use std::collections::BTreeMap;

        let mut payloads = BTreeMap::new();
        payloads.insert(
            "files/v".to_string(),
            codec::encode(&[Vec3::ZERO, Vec3::X]),
        );
        payloads.insert(
            "files/s".to_string(),
            codec::encode(&[IVec2::new(0, 7)]),
        );

        let doc = LineMeshDoc {
            vertices: "files/v".to_string(),
            vertices_type: None,
            segments: "files/s".to_string(),
            segments_type: None,
            meta: MeshOptions::default(),
        };
        assert!(matches!(
            LineMesh::from_doc(&doc, &payloads).unwrap_err(),
            Error::SegmentIndexOutOfRange { index: 7, nodes: 2 }
        ));
    }
}
