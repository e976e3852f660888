//! Facade over the `geo` crate for the analysis operations the editor
//! offers.
//!
//! The facade keeps callers independent of the backing library: if the
//! algorithms move elsewhere, only this module changes. All operations are
//! pure; errors from the underlying conversions propagate unchanged.

use geo::{BoundingRect, Centroid, ConvexHull, CoordsIter};
use geo_types::{MultiPoint, Point};
use geojson::{Feature, GeoJson, Geometry, Value};

use crate::error::GeometryError;
use crate::mutator::to_feature;

/// Calculates the centroid of the input as the mean of all vertices.
///
/// Returns a `Feature` wrapping a `Point`.
pub fn centroid(geo_json: &GeoJson) -> Result<Feature, GeometryError> {
    let geometry = to_geo(geo_json)?;
    let point = geometry
        .centroid()
        .ok_or_else(|| GeometryError::MalformedInput("input geometry has no vertices".to_string()))?;

    Ok(to_feature(Geometry::new(Value::from(&point))))
}

/// Calculates the convex hull over all vertices of the input.
///
/// Returns a `Feature` wrapping a `Polygon`.
pub fn convex_hull(geo_json: &GeoJson) -> Result<Feature, GeometryError> {
    let geometry = to_geo(geo_json)?;
    let points: MultiPoint<f64> = geometry.coords_iter().map(Point::from).collect();
    if points.0.is_empty() {
        return Err(GeometryError::MalformedInput(
            "input geometry has no vertices".to_string(),
        ));
    }

    let hull = points.convex_hull();
    Ok(to_feature(Geometry::new(Value::from(&hull))))
}

/// Calculates the axis-aligned bounding box of the input.
///
/// Returns a `Feature` wrapping a `Polygon` envelope.
pub fn bounding_box(geo_json: &GeoJson) -> Result<Feature, GeometryError> {
    let geometry = to_geo(geo_json)?;
    let rect = geometry
        .bounding_rect()
        .ok_or_else(|| GeometryError::MalformedInput("input geometry has no extent".to_string()))?;

    Ok(to_feature(Geometry::new(Value::from(&rect.to_polygon()))))
}

fn to_geo(geo_json: &GeoJson) -> Result<geo_types::Geometry<f64>, GeometryError> {
    match geo_json {
        GeoJson::Geometry(geometry) => convert_geometry(geometry),
        GeoJson::Feature(feature) => match &feature.geometry {
            Some(geometry) => convert_geometry(geometry),
            None => Err(GeometryError::MalformedInput(
                "feature has no geometry".to_string(),
            )),
        },
        GeoJson::FeatureCollection(collection) => {
            let members = collection
                .features
                .iter()
                .filter_map(|feature| feature.geometry.as_ref())
                .map(convert_geometry)
                .collect::<Result<Vec<_>, _>>()?;

            Ok(geo_types::Geometry::GeometryCollection(
                geo_types::GeometryCollection(members),
            ))
        }
    }
}

fn convert_geometry(geometry: &Geometry) -> Result<geo_types::Geometry<f64>, GeometryError> {
    geo_types::Geometry::<f64>::try_from(geometry.clone())
        .map_err(|err| GeometryError::MalformedInput(err.to_string()))
}
