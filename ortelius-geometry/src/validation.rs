//! Structural validation of GeoJSON values.
//!
//! A facade over the `geojson` parser so the backing implementation can be
//! swapped without touching callers. An empty issue list means the value is
//! valid.

use geojson::{GeoJson, JsonValue};
use serde::Serialize;

/// A single problem found in a GeoJSON value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Human readable description of the problem.
    pub message: String,
}

impl ValidationIssue {
    /// Creates an issue from any displayable source.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Validates the structure of a GeoJSON value.
///
/// Returns all problems found; an empty vector means the value is valid.
pub fn validate(value: &JsonValue) -> Vec<ValidationIssue> {
    match GeoJson::from_json_value(value.clone()) {
        Ok(_) => Vec::new(),
        Err(err) => vec![ValidationIssue::new(err.to_string())],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_geometry_has_no_issues() {
        let issues = validate(&json!({"type": "Point", "coordinates": [1.0, 2.0]}));
        assert!(issues.is_empty());
    }

    #[test]
    fn valid_feature_collection_has_no_issues() {
        let issues = validate(&json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}
                }
            ]
        }));
        assert!(issues.is_empty());
    }

    #[test]
    fn missing_members_are_reported() {
        assert!(!validate(&json!({"type": "Point"})).is_empty());
        assert!(!validate(&json!({"coordinates": [1.0, 2.0]})).is_empty());
        assert!(!validate(&json!("not geojson")).is_empty());
    }

    #[test]
    fn unknown_type_is_reported() {
        let issues = validate(&json!({"type": "Circle", "coordinates": [0.0, 0.0]}));
        assert_eq!(issues.len(), 1);
    }
}
