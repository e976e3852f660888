//! Pure GeoJSON geometry algorithms used by the `ortelius` metadata editor.
//!
//! Everything in this crate is stateless and referentially transparent. The
//! central piece is the [`mutator`] module, which converts between the three
//! representations a geometry editor juggles:
//!
//! * a list of individually editable [`geojson::Feature`]s,
//! * one normalized [`geojson::Geometry`] (plain, `Multi`- or
//!   `GeometryCollection`-typed) as it is persisted in form storage,
//! * the list of unit geometries obtained by exploding a composite value
//!   back into its parts.
//!
//! [`mutator::merge`] and [`mutator::explode`] are exact inverses on the
//! multiset of unit geometries, so round-tripping a drawing through storage
//! never loses or duplicates shapes.
//!
//! The remaining modules are thin facades: [`analysis`] delegates centroid,
//! convex hull and bounding box computation to the `geo` crate, [`validation`]
//! delegates structural checks to the `geojson` parser, and [`simplify`]
//! builds the simplification strategies offered to users on top of
//! [`analysis`].

pub mod analysis;
pub mod error;
pub mod kind;
pub mod mutator;
pub mod simplify;
pub mod validation;

pub use error::GeometryError;
pub use kind::GeometryKind;
