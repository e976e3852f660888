//! Classification of GeoJSON type names.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use geojson::Value;
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// The nine type names recognized by the GeoJSON specification: the seven
/// geometry types plus `Feature` and `FeatureCollection`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    /// A single position.
    Point,
    /// A list of positions.
    MultiPoint,
    /// A line made of consecutive positions.
    LineString,
    /// A set of independent lines.
    MultiLineString,
    /// An area enclosed by linear rings.
    Polygon,
    /// A set of independent polygons.
    MultiPolygon,
    /// A heterogeneous list of geometries.
    GeometryCollection,
    /// A geometry with a properties mapping.
    Feature,
    /// A list of features.
    FeatureCollection,
}

impl GeometryKind {
    /// Parses a GeoJSON `type` member.
    ///
    /// The match is case sensitive, as required by the specification.
    pub fn from_type_name(name: &str) -> Result<Self, GeometryError> {
        match name {
            "Point" => Ok(Self::Point),
            "MultiPoint" => Ok(Self::MultiPoint),
            "LineString" => Ok(Self::LineString),
            "MultiLineString" => Ok(Self::MultiLineString),
            "Polygon" => Ok(Self::Polygon),
            "MultiPolygon" => Ok(Self::MultiPolygon),
            "GeometryCollection" => Ok(Self::GeometryCollection),
            "Feature" => Ok(Self::Feature),
            "FeatureCollection" => Ok(Self::FeatureCollection),
            other => Err(GeometryError::InvalidGeometryType(other.to_string())),
        }
    }

    /// The exact name used in the `type` member.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::MultiPoint => "MultiPoint",
            Self::LineString => "LineString",
            Self::MultiLineString => "MultiLineString",
            Self::Polygon => "Polygon",
            Self::MultiPolygon => "MultiPolygon",
            Self::GeometryCollection => "GeometryCollection",
            Self::Feature => "Feature",
            Self::FeatureCollection => "FeatureCollection",
        }
    }

    /// Kind of a typed geometry value.
    pub fn of_value(value: &Value) -> Self {
        match value {
            Value::Point(_) => Self::Point,
            Value::MultiPoint(_) => Self::MultiPoint,
            Value::LineString(_) => Self::LineString,
            Value::MultiLineString(_) => Self::MultiLineString,
            Value::Polygon(_) => Self::Polygon,
            Value::MultiPolygon(_) => Self::MultiPolygon,
            Value::GeometryCollection(_) => Self::GeometryCollection,
        }
    }

    /// True for the seven geometry types, false for `Feature` and
    /// `FeatureCollection`.
    pub fn is_geometry(&self) -> bool {
        !matches!(self, Self::Feature | Self::FeatureCollection)
    }

    /// True for `MultiPoint`, `MultiLineString` and `MultiPolygon`.
    pub fn is_multi(&self) -> bool {
        matches!(
            self,
            Self::MultiPoint | Self::MultiLineString | Self::MultiPolygon
        )
    }

    /// The multi-part counterpart of this kind. Multi kinds map to
    /// themselves; collection and feature kinds have none.
    pub fn multi(&self) -> Option<Self> {
        match self {
            Self::Point | Self::MultiPoint => Some(Self::MultiPoint),
            Self::LineString | Self::MultiLineString => Some(Self::MultiLineString),
            Self::Polygon | Self::MultiPolygon => Some(Self::MultiPolygon),
            _ => None,
        }
    }

    /// The singular counterpart of a multi kind.
    pub fn singular(&self) -> Option<Self> {
        match self {
            Self::MultiPoint => Some(Self::Point),
            Self::MultiLineString => Some(Self::LineString),
            Self::MultiPolygon => Some(Self::Polygon),
            _ => None,
        }
    }
}

impl Display for GeometryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

impl FromStr for GeometryKind {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_type_name(s)
    }
}
