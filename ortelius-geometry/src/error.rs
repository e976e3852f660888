//! Error types used by the crate.

use thiserror::Error;

/// Ortelius geometry error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The `type` member of a value is not one of the nine type names defined
    /// by the GeoJSON specification.
    #[error("unrecognized geometry type: {0}")]
    InvalidGeometryType(String),

    /// The value does not have the shape its `type` requires, for example a
    /// geometry without a `coordinates` member. This indicates a caller bug
    /// rather than a user-facing condition.
    #[error("malformed geometry input: {0}")]
    MalformedInput(String),
}
