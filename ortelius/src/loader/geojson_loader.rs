use geojson::{GeoJson, JsonValue};
use ortelius_geometry::validation;

use super::{Loader, LoaderError};
use crate::form::FormState;
use crate::store::GeometryStore;

/// Imports GeoJSON documents.
#[derive(Debug, Default)]
pub struct GeoJsonLoader;

impl Loader for GeoJsonLoader {
    fn name(&self) -> &'static str {
        "GeoJSON"
    }

    fn load(&self, input: &str) -> Result<GeoJson, LoaderError> {
        let value: JsonValue = serde_json::from_str(input).map_err(|err| {
            log::warn!("rejected GeoJSON import: {err}");
            LoaderError::Parse(err.to_string())
        })?;

        let issues = validation::validate(&value);
        if !issues.is_empty() {
            log::warn!("rejected GeoJSON import with {} issues", issues.len());
            return Err(LoaderError::Invalid(issues));
        }

        GeoJson::from_json_value(value).map_err(|err| LoaderError::Parse(err.to_string()))
    }
}

impl GeoJsonLoader {
    /// Loads the input and persists it into the store in one step.
    pub fn load_into<S: FormState>(
        &self,
        input: &str,
        store: &mut GeometryStore<S>,
    ) -> Result<(), LoaderError> {
        let data = self.load(input)?;
        store.set_geometries(&data)?;
        Ok(())
    }
}
