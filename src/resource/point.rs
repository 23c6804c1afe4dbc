//! Point set resource - a point cloud with bound data and options.

use serde_json::{json, Value};
use tracing::warn;

use crate::data::{DataArray, DataBinding, DataLocation};
use crate::geom::PointMesh;
use crate::options::ColorOptions;
use crate::props::FileSet;
use crate::sync::PayloadSource;
use crate::util::{Error, Result};
use crate::wire::PointSetDoc;

use super::CompositeResource;

/// All the information about a point cloud.
#[derive(Clone, Debug)]
pub struct PointSet {
    /// Resource title.
    pub title: String,
    /// Resource description.
    pub description: String,
    /// The point mesh.
    pub mesh: PointMesh,
    /// Data bound to the mesh, in binding order.
    pub data: Vec<DataBinding>,
    /// Display options.
    pub opts: ColorOptions,
}

impl PointSet {
    /// Create a point set around a mesh, with no bound data.
    pub fn new(mesh: PointMesh) -> Self {
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

    /// Check every binding's length against the mesh. For a point cloud
    /// node and cell counts coincide, so both locations expect vertex
    /// length. All entries are examined; the first failure is returned.
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
                warn!("point set binding rejected: {err}");
                first_err.get_or_insert(err);
            }
            if let Err(err) = binding.data.validate() {
                warn!("point set binding rejected: {err}");
                first_err.get_or_insert(err);
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Rebuild from a downloaded document, fetching payloads through the
    /// given source.
    pub fn from_doc(doc: &PointSetDoc, payloads: &dyn PayloadSource) -> Result<Self> {
        let mesh = PointMesh::from_doc(&doc.mesh, payloads)?;
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

impl CompositeResource for PointSet {
    fn kind(&self) -> &'static str {
        "point"
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
