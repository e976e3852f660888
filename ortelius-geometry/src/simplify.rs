//! Simplification strategies applied to imported geometries.
//!
//! Large uploaded geometries are often too detailed for metadata records.
//! Each strategy reduces the input to a cheaper stand-in; the disabled
//! strategy keeps the input as is so the caller can offer a "no
//! simplification" choice through the same interface.

use geojson::{Feature, GeoJson};

use crate::analysis;
use crate::error::GeometryError;
use crate::mutator;

/// A geometry simplification strategy.
pub trait Simplifier {
    /// Identifier used to mark the active strategy in menus.
    fn id(&self) -> &'static str;

    /// Produces the simplified stand-in for the input.
    fn simplify(&self, geo_json: &GeoJson) -> Result<Feature, GeometryError>;
}

/// Keeps the input unchanged, normalized to a single feature.
#[derive(Debug, Default)]
pub struct DisabledSimplifier;

impl Simplifier for DisabledSimplifier {
    fn id(&self) -> &'static str {
        "disabled"
    }

    fn simplify(&self, geo_json: &GeoJson) -> Result<Feature, GeometryError> {
        mutator::merge_geo_json(geo_json)
            .map(mutator::to_feature)
            .ok_or_else(|| GeometryError::MalformedInput("nothing to simplify".to_string()))
    }
}

/// Replaces the input with its axis-aligned bounding box.
#[derive(Debug, Default)]
pub struct BoundingBoxSimplifier;

impl Simplifier for BoundingBoxSimplifier {
    fn id(&self) -> &'static str {
        "bbox"
    }

    fn simplify(&self, geo_json: &GeoJson) -> Result<Feature, GeometryError> {
        analysis::bounding_box(geo_json)
    }
}

/// Replaces the input with the convex hull of its vertices.
#[derive(Debug, Default)]
pub struct ConvexHullSimplifier;

impl Simplifier for ConvexHullSimplifier {
    fn id(&self) -> &'static str {
        "convex-hull"
    }

    fn simplify(&self, geo_json: &GeoJson) -> Result<Feature, GeometryError> {
        analysis::convex_hull(geo_json)
    }
}
