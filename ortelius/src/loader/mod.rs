//! Import of externally produced GeoJSON documents.
//!
//! Loaders take the text the host has already read (from an upload widget,
//! a file, wherever) and turn it into typed GeoJSON ready for
//! [`GeometryStore::set_geometries`](crate::store::GeometryStore::set_geometries).
//! Reading files or talking to services is the host's job.

use geojson::GeoJson;
use ortelius_geometry::validation::ValidationIssue;
use ortelius_geometry::GeometryError;
use thiserror::Error;

mod geojson_loader;

pub use geojson_loader::GeoJsonLoader;

/// Import failure, reported to the caller for UI-level recovery.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The input is not parseable JSON.
    #[error("unable to parse the input as JSON: {0}")]
    Parse(String),

    /// The input is JSON but not structurally valid GeoJSON.
    #[error("the input is not valid GeoJSON")]
    Invalid(Vec<ValidationIssue>),

    /// The loaded data could not be normalized.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// A named import format.
pub trait Loader {
    /// Name presented to users when choosing an import format.
    fn name(&self) -> &'static str;

    /// Parses and validates the input.
    fn load(&self, input: &str) -> Result<GeoJson, LoaderError>;
}
