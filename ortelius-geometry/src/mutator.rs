//! Conversions between feature lists and one normalized geometry value.
//!
//! [`merge`] folds the features a user has drawn into the single geometry
//! object that is persisted in form storage; [`explode`] is its inverse and
//! splits a stored composite back into independently editable parts. Both
//! operate on the typed [`geojson`] model. The raw boundary to form storage,
//! where values are plain JSON, is covered by [`geometry_from_value`] and
//! [`geometry_to_value`].

use geojson::{Feature, GeoJson, Geometry, JsonObject, JsonValue, Value};

use crate::error::GeometryError;
use crate::kind::GeometryKind;

/// Merges a list of features into one normalized geometry.
///
/// * An empty list yields `None` (the empty-value passthrough; callers must
///   treat it as "no geometry").
/// * A single feature yields its geometry verbatim, without `Multi` wrapping.
/// * Several features of one common type `T` yield a `Multi{T}` built from
///   the collected coordinates. Parts that are already multi-typed are
///   flattened one level, so merging two `MultiPolygon`s produces a single
///   valid `MultiPolygon` and never a `MultiMultiPolygon` label.
/// * Several features of mixed types yield a `GeometryCollection` with the
///   member geometries verbatim.
///
/// Features without a geometry are skipped.
pub fn merge<'a, I>(features: I) -> Option<Geometry>
where
    I: IntoIterator<Item = &'a Feature>,
{
    let geometries: Vec<&Geometry> = features
        .into_iter()
        .filter_map(|feature| feature.geometry.as_ref())
        .collect();

    match geometries.as_slice() {
        [] => None,
        [single] => Some((*single).clone()),
        parts => Some(merge_parts(parts)),
    }
}

/// Normalizes a feature, a feature collection or a bare geometry into one
/// merged geometry via [`merge`].
pub fn merge_geo_json(input: &GeoJson) -> Option<Geometry> {
    match input {
        GeoJson::Feature(feature) => merge(std::iter::once(feature)),
        GeoJson::FeatureCollection(collection) => merge(&collection.features),
        GeoJson::Geometry(geometry) => Some(geometry.clone()),
    }
}

/// Splits a composite geometry into its unit parts, each wrapped as a
/// feature with empty properties.
///
/// Simple geometries yield themselves; multi geometries yield one feature
/// per coordinate element, typed with the singular form; geometry
/// collections are exploded recursively and flattened.
pub fn explode(geometry: &Geometry) -> Vec<Feature> {
    match &geometry.value {
        Value::Point(_) | Value::LineString(_) | Value::Polygon(_) => {
            vec![to_feature(geometry.clone())]
        }
        Value::MultiPoint(points) => points
            .iter()
            .map(|point| to_feature(Geometry::new(Value::Point(point.clone()))))
            .collect(),
        Value::MultiLineString(lines) => lines
            .iter()
            .map(|line| to_feature(Geometry::new(Value::LineString(line.clone()))))
            .collect(),
        Value::MultiPolygon(polygons) => polygons
            .iter()
            .map(|polygon| to_feature(Geometry::new(Value::Polygon(polygon.clone()))))
            .collect(),
        Value::GeometryCollection(members) => members.iter().flat_map(explode).collect(),
    }
}

/// Parses a raw JSON value and explodes it in one step.
///
/// Fails with [`GeometryError::InvalidGeometryType`] when the `type` member
/// is not one of the nine recognized names, and with
/// [`GeometryError::MalformedInput`] when the value does not have the shape
/// its type requires. An empty value explodes into an empty list.
pub fn explode_value(value: &JsonValue) -> Result<Vec<Feature>, GeometryError> {
    Ok(geometry_from_value(value)?
        .map(|geometry| explode(&geometry))
        .unwrap_or_default())
}

/// Wraps a bare geometry as a feature with an empty properties mapping.
pub fn to_feature(geometry: Geometry) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(JsonObject::new()),
        foreign_members: None,
    }
}

/// True iff the value is a `Feature` or a `FeatureCollection`.
pub fn is_feature_like(value: &GeoJson) -> bool {
    matches!(value, GeoJson::Feature(_) | GeoJson::FeatureCollection(_))
}

/// Reads a geometry from the raw JSON stored in a form cell.
///
/// `null` and `{}` are the empty value and map to `None`. Anything else must
/// be a plain geometry object: a `Feature` or `FeatureCollection` stored at
/// the cell is a caller bug and fails with
/// [`GeometryError::MalformedInput`], an unknown `type` member fails with
/// [`GeometryError::InvalidGeometryType`].
pub fn geometry_from_value(value: &JsonValue) -> Result<Option<Geometry>, GeometryError> {
    let object = match value {
        JsonValue::Null => return Ok(None),
        JsonValue::Object(object) if object.is_empty() => return Ok(None),
        JsonValue::Object(object) => object,
        other => {
            return Err(GeometryError::MalformedInput(format!(
                "expected a geometry object, got {other}"
            )))
        }
    };

    let type_name = object
        .get("type")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| GeometryError::MalformedInput("missing `type` member".to_string()))?;

    let kind = GeometryKind::from_type_name(type_name)?;
    if !kind.is_geometry() {
        return Err(GeometryError::MalformedInput(format!(
            "expected a plain geometry, got a {type_name}"
        )));
    }

    match GeoJson::from_json_value(value.clone())
        .map_err(|err| GeometryError::MalformedInput(err.to_string()))?
    {
        GeoJson::Geometry(geometry) => Ok(Some(geometry)),
        _ => Err(GeometryError::MalformedInput(format!(
            "expected a plain geometry, got a {type_name}"
        ))),
    }
}

/// Serializes a merged geometry into the JSON persisted at a form cell.
///
/// The empty value is written as `{}` so that the cell always holds a JSON
/// object.
pub fn geometry_to_value(geometry: Option<&Geometry>) -> Result<JsonValue, GeometryError> {
    match geometry {
        Some(geometry) => serde_json::to_value(geometry)
            .map_err(|err| GeometryError::MalformedInput(err.to_string())),
        None => Ok(JsonValue::Object(JsonObject::new())),
    }
}

fn merge_parts(parts: &[&Geometry]) -> Geometry {
    let first_kind = GeometryKind::of_value(&parts[0].value);
    let single_kind = parts
        .iter()
        .all(|geometry| GeometryKind::of_value(&geometry.value) == first_kind);

    if !single_kind {
        return Geometry::new(Value::GeometryCollection(
            parts.iter().map(|geometry| (*geometry).clone()).collect(),
        ));
    }

    let value = match first_kind {
        GeometryKind::Point => Value::MultiPoint(
            parts
                .iter()
                .filter_map(|g| match &g.value {
                    Value::Point(position) => Some(position.clone()),
                    _ => None,
                })
                .collect(),
        ),
        GeometryKind::LineString => Value::MultiLineString(
            parts
                .iter()
                .filter_map(|g| match &g.value {
                    Value::LineString(line) => Some(line.clone()),
                    _ => None,
                })
                .collect(),
        ),
        GeometryKind::Polygon => Value::MultiPolygon(
            parts
                .iter()
                .filter_map(|g| match &g.value {
                    Value::Polygon(rings) => Some(rings.clone()),
                    _ => None,
                })
                .collect(),
        ),
        // Already-multi parts are flattened one level so the merged value
        // keeps a valid GeoJSON type name.
        GeometryKind::MultiPoint => Value::MultiPoint(
            parts
                .iter()
                .flat_map(|g| match &g.value {
                    Value::MultiPoint(positions) => positions.clone(),
                    _ => vec![],
                })
                .collect(),
        ),
        GeometryKind::MultiLineString => Value::MultiLineString(
            parts
                .iter()
                .flat_map(|g| match &g.value {
                    Value::MultiLineString(lines) => lines.clone(),
                    _ => vec![],
                })
                .collect(),
        ),
        GeometryKind::MultiPolygon => Value::MultiPolygon(
            parts
                .iter()
                .flat_map(|g| match &g.value {
                    Value::MultiPolygon(polygons) => polygons.clone(),
                    _ => vec![],
                })
                .collect(),
        ),
        GeometryKind::GeometryCollection => Value::GeometryCollection(
            parts
                .iter()
                .flat_map(|g| match &g.value {
                    Value::GeometryCollection(members) => members.clone(),
                    _ => vec![],
                })
                .collect(),
        ),
        // `of_value` never produces feature kinds.
        GeometryKind::Feature | GeometryKind::FeatureCollection => {
            Value::GeometryCollection(parts.iter().map(|g| (*g).clone()).collect())
        }
    };

    Geometry::new(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn point(x: f64, y: f64) -> Geometry {
        Geometry::new(Value::Point(vec![x, y]))
    }

    fn polygon(origin: f64) -> Geometry {
        Geometry::new(Value::Polygon(vec![vec![
            vec![origin, origin],
            vec![origin + 1.0, origin],
            vec![origin + 1.0, origin + 1.0],
            vec![origin, origin],
        ]]))
    }

    fn features(geometries: Vec<Geometry>) -> Vec<Feature> {
        geometries.into_iter().map(to_feature).collect()
    }

    #[test]
    fn merge_of_nothing_is_empty() {
        let empty: Vec<Feature> = vec![];
        assert_eq!(merge(&empty), None);

        let no_geometry = Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: Some(JsonObject::new()),
            foreign_members: None,
        };
        assert_eq!(merge(std::iter::once(&no_geometry)), None);
    }

    #[test]
    fn merge_of_one_returns_geometry_verbatim() {
        let fixture = features(vec![polygon(0.0)]);
        assert_eq!(merge(&fixture), Some(polygon(0.0)));
    }

    #[test]
    fn merge_of_same_type_builds_multi() {
        let fixture = features(vec![polygon(0.0), polygon(10.0)]);
        let merged = merge(&fixture).expect("non-empty merge");

        let Value::MultiPolygon(polygons) = &merged.value else {
            panic!("expected a MultiPolygon, got {:?}", merged.value);
        };
        assert_eq!(polygons.len(), 2);
        assert_eq!(Value::Polygon(polygons[0].clone()), polygon(0.0).value);
        assert_eq!(Value::Polygon(polygons[1].clone()), polygon(10.0).value);
    }

    #[test]
    fn merge_of_mixed_types_builds_collection() {
        let fixture = features(vec![point(1.0, 2.0), polygon(0.0)]);
        let merged = merge(&fixture).expect("non-empty merge");

        assert_eq!(
            merged.value,
            Value::GeometryCollection(vec![point(1.0, 2.0), polygon(0.0)])
        );
    }

    #[test]
    fn merge_of_multi_parts_flattens_one_level() {
        let first = Geometry::new(Value::MultiPolygon(vec![
            match polygon(0.0).value {
                Value::Polygon(rings) => rings,
                _ => unreachable!(),
            },
            match polygon(5.0).value {
                Value::Polygon(rings) => rings,
                _ => unreachable!(),
            },
        ]));
        let second = Geometry::new(Value::MultiPolygon(vec![match polygon(10.0).value {
            Value::Polygon(rings) => rings,
            _ => unreachable!(),
        }]));

        let merged = merge(&features(vec![first, second])).expect("non-empty merge");
        assert_matches!(&merged.value, Value::MultiPolygon(polygons) if polygons.len() == 3);
    }

    #[test]
    fn merge_of_collections_concatenates_members() {
        let first = Geometry::new(Value::GeometryCollection(vec![point(0.0, 0.0)]));
        let second = Geometry::new(Value::GeometryCollection(vec![
            point(1.0, 1.0),
            polygon(0.0),
        ]));

        let merged = merge(&features(vec![first, second])).expect("non-empty merge");
        assert_matches!(&merged.value, Value::GeometryCollection(members) if members.len() == 3);
    }

    #[test]
    fn merge_geo_json_accepts_all_input_shapes() {
        let geometry = point(3.0, 4.0);

        let as_geometry = GeoJson::Geometry(geometry.clone());
        assert_eq!(merge_geo_json(&as_geometry), Some(geometry.clone()));

        let as_feature = GeoJson::Feature(to_feature(geometry.clone()));
        assert_eq!(merge_geo_json(&as_feature), Some(geometry.clone()));

        let as_collection = GeoJson::FeatureCollection(geojson::FeatureCollection {
            bbox: None,
            features: features(vec![geometry.clone(), point(5.0, 6.0)]),
            foreign_members: None,
        });
        let merged = merge_geo_json(&as_collection).expect("non-empty merge");
        assert_eq!(
            merged.value,
            Value::MultiPoint(vec![vec![3.0, 4.0], vec![5.0, 6.0]])
        );
    }

    #[test]
    fn explode_of_simple_geometry_is_single_feature() {
        let exploded = explode(&polygon(0.0));
        assert_eq!(exploded.len(), 1);
        assert_eq!(exploded[0].geometry, Some(polygon(0.0)));
        assert_eq!(exploded[0].properties, Some(JsonObject::new()));
    }

    #[test]
    fn explode_splits_multi_into_singular_parts() {
        let multi = Geometry::new(Value::MultiPoint(vec![vec![0.0, 0.0], vec![1.0, 1.0]]));
        let exploded = explode(&multi);

        assert_eq!(exploded.len(), 2);
        assert_eq!(exploded[0].geometry, Some(point(0.0, 0.0)));
        assert_eq!(exploded[1].geometry, Some(point(1.0, 1.0)));
    }

    #[test]
    fn explode_flattens_collections_recursively() {
        let nested = Geometry::new(Value::GeometryCollection(vec![
            Geometry::new(Value::MultiPoint(vec![vec![0.0, 0.0], vec![1.0, 1.0]])),
            polygon(0.0),
            Geometry::new(Value::GeometryCollection(vec![point(9.0, 9.0)])),
        ]));

        let exploded = explode(&nested);
        assert_eq!(exploded.len(), 4);
        assert_eq!(exploded[0].geometry, Some(point(0.0, 0.0)));
        assert_eq!(exploded[1].geometry, Some(point(1.0, 1.0)));
        assert_eq!(exploded[2].geometry, Some(polygon(0.0)));
        assert_eq!(exploded[3].geometry, Some(point(9.0, 9.0)));
    }

    #[test]
    fn explode_inverts_merge_on_unit_geometries() {
        let originals = vec![polygon(0.0), polygon(7.0), polygon(21.0)];
        let merged = merge(&features(originals.clone())).expect("non-empty merge");

        let exploded: Vec<Geometry> = explode(&merged)
            .into_iter()
            .filter_map(|feature| feature.geometry)
            .collect();

        assert_eq!(exploded, originals);
    }

    #[test]
    fn explode_value_handles_the_raw_boundary() {
        let empty = explode_value(&json!({})).expect("empty value explodes");
        assert!(empty.is_empty());

        let features =
            explode_value(&json!({"type": "MultiPoint", "coordinates": [[0.0, 0.0], [1.0, 2.0]]}))
                .expect("valid multipoint");
        assert_eq!(features.len(), 2);

        assert_matches!(
            explode_value(&json!({"type": "Blob", "coordinates": []})),
            Err(GeometryError::InvalidGeometryType(name)) if name == "Blob"
        );
    }

    #[test]
    fn geometry_from_value_maps_empty_values_to_none() {
        assert_eq!(geometry_from_value(&JsonValue::Null), Ok(None));
        assert_eq!(geometry_from_value(&json!({})), Ok(None));
    }

    #[test]
    fn geometry_from_value_rejects_non_geometries() {
        assert_matches!(
            geometry_from_value(&json!({"type": "Feature", "properties": {}, "geometry": null})),
            Err(GeometryError::MalformedInput(_))
        );
        assert_matches!(
            geometry_from_value(&json!({"type": "Point"})),
            Err(GeometryError::MalformedInput(_))
        );
        assert_matches!(
            geometry_from_value(&json!([1, 2])),
            Err(GeometryError::MalformedInput(_))
        );
        assert_matches!(
            geometry_from_value(&json!({"coordinates": [0.0, 0.0]})),
            Err(GeometryError::MalformedInput(_))
        );
    }

    #[test]
    fn geometry_round_trips_through_the_raw_boundary() {
        let geometry = polygon(2.0);
        let value = geometry_to_value(Some(&geometry)).expect("serializable");
        assert_eq!(geometry_from_value(&value), Ok(Some(geometry)));

        assert_eq!(geometry_to_value(None), Ok(json!({})));
    }

    #[test]
    fn feature_like_values_are_detected() {
        let geometry = GeoJson::Geometry(point(0.0, 0.0));
        assert!(!is_feature_like(&geometry));

        let feature = GeoJson::Feature(to_feature(point(0.0, 0.0)));
        assert!(is_feature_like(&feature));

        let collection = GeoJson::FeatureCollection(geojson::FeatureCollection {
            bbox: None,
            features: vec![],
            foreign_members: None,
        });
        assert!(is_feature_like(&collection));
    }
}
