//! Importers for foreign interchange formats.
//!
//! One submodule per supported format. Importers translate foreign
//! geometry into the native entities and re-run the native validators, so
//! an imported mesh satisfies exactly the invariants a directly
//! constructed one does.

pub mod omf;

pub use omf::{
    OmfArray, OmfLineSetElement, OmfLineSetGeometry, OmfPointSetElement, OmfPointSetGeometry,
    OmfProject, OmfScalarData,
};
