//! Line set resource - a line mesh with bound data and options.

use serde_json::{json, Value};
use tracing::warn;

use crate::data::{DataArray, DataBinding, DataLocation};
use crate::geom::LineMesh;
use crate::options::ColorOptions;
use crate::props::FileSet;
use crate::sync::PayloadSource;
use crate::util::{Error, Result};
use crate::wire::LineSetDoc;

use super::CompositeResource;

/// All the information about a 1D line set.
#[derive(Clone, Debug)]
pub struct LineSet {
    /// Resource title.
    pub title: String,
    /// Resource description.
    pub description: String,
    /// The line mesh.
    pub mesh: LineMesh,
    /// Data bound to the mesh, in binding order.
    pub data: Vec<DataBinding>,
    /// Display options.
    pub opts: ColorOptions,
}

impl LineSet {
    /// Create a line set around a mesh, with no bound data.
    pub fn new(mesh: LineMesh) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            mesh,
            data: Vec::new(),
            opts: ColorOptions::default(),
        }
    }

    /// Builder-style title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Bind a data array to the mesh.
    pub fn add_data(&mut self, location: DataLocation, data: DataArray) {
        self.data.push(DataBinding::new(location, data));
    }

    /// Check every binding's length against the mesh.
    ///
    /// All entries are examined even after a failure; each mismatch is
    /// logged and the first is returned.
    fn validate_data(&self) -> Result<()> {
        let mut first_err = None;
        for (index, binding) in self.data.iter().enumerate() {
            let expected = match binding.location {
                DataLocation::Node => self.mesh.num_nodes(),
                DataLocation::Cell => self.mesh.num_cells(),
            };
            let actual = binding.data.len();
            if actual != expected {
                let err = Error::DataLengthMismatch {
                    index,
                    actual,
                    expected,
                    location: binding.location.as_str(),
                };
                warn!("line set binding rejected: {err}");
                first_err.get_or_insert(err);
            }
            if let Err(err) = binding.data.validate() {
                warn!("line set binding rejected: {err}");
                first_err.get_or_insert(err);
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Rebuild from a downloaded document, fetching payloads through the
    /// given source. The result passes the same validators as a
    /// directly-constructed resource.
    pub fn from_doc(doc: &LineSetDoc, payloads: &dyn PayloadSource) -> Result<Self> {
        let mesh = LineMesh::from_doc(&doc.mesh, payloads)?;
        let mut resource = Self::new(mesh);
        resource.title = doc.title.clone();
        resource.description = doc.description.clone();
        resource.opts = doc.meta.clone();

        for (index, entry) in doc.data.iter().enumerate() {
            let location =
                DataLocation::from_str(&entry.location).ok_or_else(|| Error::InvalidLocation {
                    index,
                    location: entry.location.clone(),
                })?;
            let data = DataArray::from_doc(&entry.data, payloads)?;
            resource.data.push(DataBinding::new(location, data));
        }

        resource.validate()?;
        Ok(resource)
    }
}

impl CompositeResource for LineSet {
    fn kind(&self) -> &'static str {
        "line"
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn validate(&self) -> Result<()> {
        self.mesh.validate()?;
        self.opts.validate()?;
        self.validate_data()
    }

    fn nbytes(&self) -> usize {
        self.mesh.nbytes() + self.data.iter().map(|d| d.data.nbytes()).sum::<usize>()
    }

    fn dirty_file_set(&self, force: bool) -> Result<FileSet> {
        self.validate()?;
        let mut files = self.mesh.dirty_files(force)?;
        for (index, binding) in self.data.iter().enumerate() {
            if force || binding.data.is_dirty() {
                files.insert(format!("data[{index}]"), binding.data.encoded());
            }
        }
        Ok(files)
    }

    fn mark_synced(&mut self) {
        self.mesh.mark_synced();
        for binding in &mut self.data {
            binding.data.mark_synced();
        }
    }

    fn metadata(&self) -> Value {
        json!({
            "title": self.title,
            "description": self.description,
            "meta": self.opts,
            "mesh": {"meta": self.mesh.opts},
            "data": self.data.iter().map(|binding| {
                json!({
                    "location": binding.location.as_str(),
                    "title": binding.data.title,
                    "description": binding.data.description,
                })
            }).collect::<Vec<_>>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{IVec2, Vec3};

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
    fn test_per_cell_binding_length() {
        // 3 nodes, 2 cells.
        let mut resource = LineSet::new(three_point_polyline());

        resource.add_data(DataLocation::Cell, DataArray::new(vec![10.0, 20.0]));
        assert!(resource.validate().is_ok());

        resource.add_data(DataLocation::Cell, DataArray::new(vec![1.0, 2.0, 3.0]));
        let err = resource.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::DataLengthMismatch {
                index: 1,
                actual: 3,
                expected: 2,
                location: "CC",
            }
        ));
    }

    #[test]
    fn test_per_node_binding_length() {
        let mut resource = LineSet::new(three_point_polyline());

        resource.add_data(DataLocation::Node, DataArray::new(vec![1.0, 2.0]));
        assert!(matches!(
            resource.validate().unwrap_err(),
            Error::DataLengthMismatch {
                index: 0,
                actual: 2,
                expected: 3,
                location: "N",
            }
        ));

        resource.data[0].data.set_array(vec![1.0, 2.0, 3.0]);
        assert!(resource.validate().is_ok());
    }

    #[test]
    fn test_all_bindings_checked_first_reported() {
        let mut resource = LineSet::new(three_point_polyline());
        resource.add_data(DataLocation::Node, DataArray::new(vec![1.0])); // bad
        resource.add_data(DataLocation::Cell, DataArray::new(vec![1.0])); // bad too

        // The first failing entry is the one reported.
        assert!(matches!(
            resource.validate().unwrap_err(),
            Error::DataLengthMismatch { index: 0, .. }
        ));
    }

    #[test]
    fn test_nbytes_sums_mesh_and_data() {
        let mut resource = LineSet::new(three_point_polyline());
        resource.add_data(DataLocation::Cell, DataArray::new(vec![10.0, 20.0]));
        // mesh: 3*12 + 2*8 = 52; data: 2*4 = 8
        assert_eq!(resource.nbytes(), 60);
    }

    #[test]
    fn test_dirty_file_set_aggregates() {
        let mut resource = LineSet::new(three_point_polyline());
        resource.add_data(DataLocation::Cell, DataArray::new(vec![10.0, 20.0]));

        let files = resource.dirty_file_set(false).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.contains("vertices"));
        assert!(files.contains("segments"));
        assert!(files.contains("data[0]"));

        resource.mark_synced();
        assert!(resource.dirty_file_set(false).unwrap().is_empty());

        resource.data[0].data.set_array(vec![11.0, 20.0]);
        let files = resource.dirty_file_set(false).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files.contains("data[0]"));
    }

    #[test]
    fn test_dirty_file_set_force_idempotent() {
        let mut resource = LineSet::new(three_point_polyline());
        resource.add_data(DataLocation::Node, DataArray::new(vec![1.0, 2.0, 3.0]));
        resource.mark_synced();

        let a = resource.dirty_file_set(true).unwrap();
        let b = resource.dirty_file_set(true).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_validation_failure_blocks_file_set() {
        let mut resource = LineSet::new(three_point_polyline());
        resource.add_data(DataLocation::Cell, DataArray::new(vec![1.0, 2.0, 3.0]));
        assert!(resource.dirty_file_set(false).is_err());
    }

    #[test]
    fn test_metadata_shape() {
        let mut resource = LineSet::new(three_point_polyline()).with_title("survey lines");
        resource.add_data(
            DataLocation::Cell,
            DataArray::new(vec![1.0, 2.0]).with_title("grade"),
        );

        let meta = resource.metadata();
        assert_eq!(meta["title"], "survey lines");
        assert_eq!(meta["data"][0]["location"], "CC");
        assert_eq!(meta["data"][0]["title"], "grade");
        assert_eq!(meta["mesh"]["meta"]["view_type"], "line");
    }
}
