//! OMF interchange import.
//!
//! OMF-style projects carry flat float64 coordinate arrays, flat index
//! arrays, and a two-level coordinate origin (project plus element).
//! Import sums the origins into the vertices, narrows to the native
//! float32 width, and regroups the flat arrays into the native shapes,
//! rejecting anything that cannot be grouped.

use glam::{DVec3, IVec2, Vec3};

use crate::data::{DataArray, DataBinding, DataLocation};
use crate::geom::{LineMesh, PointMesh};
use crate::resource::{LineSet, PointSet};
use crate::util::{Error, Result};

/// Project-level context for imported elements.
#[derive(Clone, Debug, Default)]
pub struct OmfProject {
    /// Coordinate origin applied to every element's vertices.
    pub origin: DVec3,
}

/// A flat foreign array.
#[derive(Clone, Debug, Default)]
pub struct OmfArray<T> {
    /// Values in flat row-major order.
    pub array: Vec<T>,
}

impl<T> OmfArray<T> {
    /// Wrap a flat value list.
    pub fn new(array: Vec<T>) -> Self {
        Self { array }
    }
}

/// Foreign line set geometry: flat xyz vertices and flat index pairs.
#[derive(Clone, Debug, Default)]
pub struct OmfLineSetGeometry {
    /// Element-level coordinate origin.
    pub origin: DVec3,
    /// Flat vertex coordinates, three per vertex.
    pub vertices: OmfArray<f64>,
    /// Flat segment endpoint indices, two per segment.
    pub segments: OmfArray<i64>,
}

/// Foreign point set geometry: flat xyz vertices.
#[derive(Clone, Debug, Default)]
pub struct OmfPointSetGeometry {
    /// Element-level coordinate origin.
    pub origin: DVec3,
    /// Flat vertex coordinates, three per vertex.
    pub vertices: OmfArray<f64>,
}

/// Foreign scalar data attached to an element.
#[derive(Clone, Debug)]
pub struct OmfScalarData {
    /// Data name.
    pub name: String,
    /// Foreign location tag: `"vertices"` or `"segments"`.
    pub location: String,
    /// Values, one per vertex or per segment.
    pub array: OmfArray<f64>,
}

/// A foreign line set element: geometry plus attached data.
#[derive(Clone, Debug, Default)]
pub struct OmfLineSetElement {
    /// Element name.
    pub name: String,
    /// Element description.
    pub description: String,
    /// The geometry.
    pub geometry: OmfLineSetGeometry,
    /// Attached scalar data.
    pub data: Vec<OmfScalarData>,
}

/// A foreign point set element: geometry plus attached data.
#[derive(Clone, Debug, Default)]
pub struct OmfPointSetElement {
    /// Element name.
    pub name: String,
    /// Element description.
    pub description: String,
    /// The geometry.
    pub geometry: OmfPointSetGeometry,
    /// Attached scalar data.
    pub data: Vec<OmfScalarData>,
}

/// Group flat xyz coordinates into vertices, applying an origin offset.
fn vertices_from_flat(flat: &[f64], offset: DVec3) -> Result<Vec<Vec3>> {
    if flat.len() % 3 != 0 {
        return Err(Error::ShapeMismatch {
            field: "vertices",
            extent: 3,
            len: flat.len(),
        });
    }
    Ok(flat
        .chunks_exact(3)
        .map(|c| (DVec3::new(c[0], c[1], c[2]) + offset).as_vec3())
        .collect())
}

/// Group flat endpoint indices into segment pairs.
fn segments_from_flat(flat: &[i64], nodes: usize) -> Result<Vec<IVec2>> {
    if flat.len() % 2 != 0 {
        return Err(Error::ShapeMismatch {
            field: "segments",
            extent: 2,
            len: flat.len(),
        });
    }
    let mut segments = Vec::with_capacity(flat.len() / 2);
    for pair in flat.chunks_exact(2) {
        let (a, b) = (pair[0], pair[1]);
        for index in [a, b] {
            if index < 0 {
                return Err(Error::NegativeSegmentIndex { index });
            }
        }
        // Indices wider than i32 cannot reference any storable vertex.
        let a = i32::try_from(a).map_err(|_| Error::SegmentIndexOutOfRange { index: a, nodes })?;
        let b = i32::try_from(b).map_err(|_| Error::SegmentIndexOutOfRange { index: b, nodes })?;
        segments.push(IVec2::new(a, b));
    }
    Ok(segments)
}

/// Narrow foreign float64 values to the native width.
fn narrow(values: &[f64]) -> Vec<f32> {
    values.iter().map(|&v| v as f32).collect()
}

fn binding_from_omf(index: usize, data: &OmfScalarData) -> Result<DataBinding> {
    let location = match data.location.as_str() {
        "vertices" => DataLocation::Node,
        "segments" => DataLocation::Cell,
        other => {
            return Err(Error::InvalidLocation {
                index,
                location: other.to_string(),
            })
        }
    };
    let array = DataArray::new(narrow(&data.array.array)).with_title(data.name.clone());
    Ok(DataBinding::new(location, array))
}

impl LineMesh {
    /// Build a line mesh from foreign geometry, applying the element and
    /// project origins. The result passes the native validators.
    pub fn from_omf(geometry: &OmfLineSetGeometry, project: &OmfProject) -> Result<Self> {
        let vertices =
            vertices_from_flat(&geometry.vertices.array, geometry.origin + project.origin)?;
        let segments = segments_from_flat(&geometry.segments.array, vertices.len())?;
        let mesh = Self::new(vertices, segments);
        mesh.validate()?;
        Ok(mesh)
    }
}

impl PointMesh {
    /// Build a point mesh from foreign geometry, applying the element and
    /// project origins.
    pub fn from_omf(geometry: &OmfPointSetGeometry, project: &OmfProject) -> Result<Self> {
        let vertices =
            vertices_from_flat(&geometry.vertices.array, geometry.origin + project.origin)?;
        let mesh = Self::new(vertices);
        mesh.validate()?;
        Ok(mesh)
    }
}

impl LineSet {
    /// Build a full line set resource from a foreign element.
    pub fn from_omf(element: &OmfLineSetElement, project: &OmfProject) -> Result<Self> {
        let mesh = LineMesh::from_omf(&element.geometry, project)?;
        let mut resource = Self::new(mesh).with_title(element.name.clone());
        resource.description = element.description.clone();
        for (index, data) in element.data.iter().enumerate() {
            resource.data.push(binding_from_omf(index, data)?);
        }
        crate::resource::CompositeResource::validate(&resource)?;
        Ok(resource)
    }
}

impl PointSet {
    /// Build a full point set resource from a foreign element.
    pub fn from_omf(element: &OmfPointSetElement, project: &OmfProject) -> Result<Self> {
        let mesh = PointMesh::from_omf(&element.geometry, project)?;
        let mut resource = Self::new(mesh).with_title(element.name.clone());
        resource.description = element.description.clone();
        for (index, data) in element.data.iter().enumerate() {
            resource.data.push(binding_from_omf(index, data)?);
        }
        crate::resource::CompositeResource::validate(&resource)?;
        Ok(resource)
    }
}
