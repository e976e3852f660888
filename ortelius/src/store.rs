//! The geometry store: an arena of editable layers kept in sync with one
//! form field.
//!
//! Every mutation funnels through one persist step: the indexed layers are
//! merged into a single normalized geometry and written to the bound field.
//! No other code path may write the field, which is what guarantees that the
//! field always reflects the most recent completed mutation. Reads go the
//! other way: when the index is stale relative to the field (after a fresh
//! binding, a [`GeometryStore::clean`] or a bulk
//! [`GeometryStore::set_geometries`]), the field value is exploded back into
//! one editable layer per unit geometry and re-indexed under fresh keys.

use std::collections::BTreeMap;

use geojson::{Feature, GeoJson, Geometry, JsonObject, JsonValue};
use ortelius_geometry::{mutator, GeometryError};
use serde::{Deserialize, Serialize};

use crate::form::{FieldBinding, FormState};

/// Identifier of a layer within one store instance.
///
/// Keys are assigned by the store, increase monotonically and are never
/// reused after a layer is removed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LayerKey(u64);

/// An editable layer: one unit geometry wrapped as a feature, plus the key
/// the store assigned to it.
///
/// Handles constructed by the caller start out unidentified (no key). The
/// store hands out identified handles from [`GeometryStore::layers`] and
/// [`GeometryStore::add_layer`]; only those can be updated or removed.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerHandle {
    key: Option<LayerKey>,
    feature: Feature,
}

impl LayerHandle {
    /// Creates an unidentified handle for a bare geometry.
    pub fn new(geometry: Geometry) -> Self {
        Self::from_feature(mutator::to_feature(geometry))
    }

    /// Creates an unidentified handle for an existing feature.
    pub fn from_feature(feature: Feature) -> Self {
        Self { key: None, feature }
    }

    /// The key assigned by the store, if any.
    pub fn key(&self) -> Option<LayerKey> {
        self.key
    }

    /// Returns this handle identified by `key`.
    ///
    /// Used by event adapters to carry the identity of an edited source
    /// layer over to its replacement.
    pub fn with_key(mut self, key: LayerKey) -> Self {
        self.key = Some(key);
        self
    }

    /// The wrapped feature.
    pub fn feature(&self) -> &Feature {
        &self.feature
    }

    /// The wrapped geometry, if the feature has one.
    pub fn geometry(&self) -> Option<&Geometry> {
        self.feature.geometry.as_ref()
    }

    /// The layer serialized as a GeoJSON feature.
    pub fn to_geo_json(&self) -> Feature {
        self.feature.clone()
    }
}

/// Standard access to the geometry data of one form field.
///
/// The store owns the index of editable layers; the bound field owns the
/// value. All operations on an unattached store are safe no-ops, since the
/// editing UI may render before the form context is ready.
#[derive(Debug)]
pub struct GeometryStore<S> {
    binding: Option<FieldBinding<S>>,
    unique_layer: bool,
    index: BTreeMap<LayerKey, LayerHandle>,
    next_key: u64,
    last_synced_key: Option<u64>,
}

impl<S> Default for GeometryStore<S> {
    fn default() -> Self {
        Self {
            binding: None,
            unique_layer: false,
            index: BTreeMap::new(),
            next_key: 0,
            last_synced_key: None,
        }
    }
}

impl<S: FormState> GeometryStore<S> {
    /// Creates an unattached store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the store to at most one layer for its whole lifetime.
    ///
    /// Adding a layer then evicts all existing ones first.
    pub fn with_unique_layer(mut self) -> Self {
        self.unique_layer = true;
        self
    }

    /// Attaches the store to a field on construction.
    pub fn with_binding(mut self, binding: FieldBinding<S>) -> Self {
        self.attach(binding);
        self
    }

    /// Binds or rebinds the store to a field.
    ///
    /// The index is marked stale so the next read re-explodes the field
    /// value.
    pub fn attach(&mut self, binding: FieldBinding<S>) {
        log::debug!("geometry store attached to `{}`", binding.path());
        self.binding = Some(binding);
        self.last_synced_key = None;
    }

    /// Detaches the store from its field. Subsequent operations are no-ops.
    pub fn detach(&mut self) {
        self.binding = None;
        self.index.clear();
        self.last_synced_key = None;
    }

    /// True when the store is bound to a field.
    pub fn is_attached(&self) -> bool {
        self.binding.is_some()
    }

    /// True when the store restricts the index to a single layer.
    pub fn unique_layer(&self) -> bool {
        self.unique_layer
    }

    /// True when the store is unattached or the bound field holds no
    /// geometry.
    pub fn is_empty(&self) -> bool {
        match &self.binding {
            Some(binding) => match binding.read() {
                JsonValue::Null => true,
                JsonValue::Object(object) => object.is_empty(),
                _ => false,
            },
            None => true,
        }
    }

    /// The editable layers, in insertion order.
    ///
    /// When the index is stale relative to the field, the field value is
    /// exploded and re-indexed first, assigning each unit geometry a fresh
    /// key.
    pub fn layers(&mut self) -> Result<Vec<LayerHandle>, GeometryError> {
        if self.binding.is_none() {
            return Ok(Vec::new());
        }

        self.sync_index()?;
        Ok(self.index.values().cloned().collect())
    }

    /// Adds a layer, assigning it a fresh key, and persists.
    ///
    /// In unique-layer mode all existing layers are evicted first. Returns
    /// the assigned key, or `None` when the store is unattached.
    pub fn add_layer(&mut self, layer: LayerHandle) -> Result<Option<LayerKey>, GeometryError> {
        if self.binding.is_none() {
            return Ok(None);
        }

        self.sync_index()?;

        if self.unique_layer {
            self.index.clear();
        }

        let key = self.generate_key();
        self.index.insert(key, layer.with_key(key));
        self.persist()?;

        Ok(Some(key))
    }

    /// Replaces the layer at the handle's key and persists.
    ///
    /// A handle that was never identified by this store, or whose key is no
    /// longer present, is a no-op, not an error. Returns whether an entry
    /// was replaced.
    pub fn update_layer(&mut self, layer: LayerHandle) -> Result<bool, GeometryError> {
        if self.binding.is_none() {
            return Ok(false);
        }

        self.sync_index()?;

        let Some(key) = layer.key() else {
            log::debug!("ignoring update of an unidentified layer");
            return Ok(false);
        };

        if !self.index.contains_key(&key) {
            return Ok(false);
        }

        self.index.insert(key, layer);
        self.persist()?;

        Ok(true)
    }

    /// Removes the layer at the handle's key and persists.
    ///
    /// A handle with no matching key is a no-op. Returns whether an entry
    /// was removed.
    pub fn remove_layer(&mut self, layer: &LayerHandle) -> Result<bool, GeometryError> {
        if self.binding.is_none() {
            return Ok(false);
        }

        self.sync_index()?;

        let Some(key) = layer.key() else {
            return Ok(false);
        };

        if self.index.remove(&key).is_none() {
            return Ok(false);
        }

        self.persist()?;
        Ok(true)
    }

    /// Clears the bound field to the empty value.
    ///
    /// The index is not touched directly; the next read detects the
    /// staleness and repopulates it empty.
    pub fn clean(&mut self) {
        let Some(binding) = &self.binding else {
            return;
        };

        binding.write(JsonValue::Object(JsonObject::new()));
        self.last_synced_key = None;
    }

    /// Normalizes externally sourced data and persists it directly,
    /// bypassing the index.
    ///
    /// Accepts a bare geometry, a feature or a feature collection.
    pub fn set_geometries(&mut self, data: &GeoJson) -> Result<(), GeometryError> {
        let Some(binding) = &self.binding else {
            return Ok(());
        };

        let merged = mutator::merge_geo_json(data);
        binding.write(mutator::geometry_to_value(merged.as_ref())?);
        self.last_synced_key = None;

        Ok(())
    }

    /// The current merged value of the bound field, wrapped as a feature for
    /// read access. `None` when the store is unattached or the field is
    /// empty.
    pub fn geometries(&self) -> Result<Option<Feature>, GeometryError> {
        let Some(binding) = &self.binding else {
            return Ok(None);
        };

        Ok(mutator::geometry_from_value(&binding.read())?.map(mutator::to_feature))
    }

    fn generate_key(&mut self) -> LayerKey {
        self.next_key += 1;
        LayerKey(self.next_key)
    }

    /// Rebuilds the index from the field value when the index does not
    /// reflect the latest external write.
    fn sync_index(&mut self) -> Result<(), GeometryError> {
        if self.last_synced_key == Some(self.next_key) {
            return Ok(());
        }

        let (value, path) = {
            let Some(binding) = &self.binding else {
                return Ok(());
            };
            (binding.read(), binding.path().clone())
        };
        self.index.clear();

        if let Some(geometry) = mutator::geometry_from_value(&value)? {
            for feature in mutator::explode(&geometry) {
                let key = self.generate_key();
                self.index
                    .insert(key, LayerHandle::from_feature(feature).with_key(key));
            }
            log::debug!("reloaded {} layers from `{}`", self.index.len(), path);
        }

        self.last_synced_key = Some(self.next_key);
        Ok(())
    }

    /// The single funnel through which index mutations become visible to
    /// the rest of the application.
    fn persist(&mut self) -> Result<(), GeometryError> {
        let Some(binding) = &self.binding else {
            return Ok(());
        };

        let features: Vec<Feature> = self.index.values().map(LayerHandle::to_geo_json).collect();
        let merged = mutator::merge(&features);
        binding.write(mutator::geometry_to_value(merged.as_ref())?);
        self.last_synced_key = Some(self.next_key);

        Ok(())
    }
}
