//! Ortelius keeps the geometry drawn on an interactive map synchronized with
//! an application-owned form state.
//!
//! The editing UI, map rendering and drawing toolbar all live outside this
//! crate. What lives here is the state management they need:
//!
//! * [`form`] — the [`FormState`](form::FormState) abstraction over the
//!   external storage cell, addressed by dot-delimited
//!   [`FieldPath`](form::FieldPath)s, plus an in-memory implementation.
//! * [`store`] — the [`GeometryStore`](store::GeometryStore), an arena of
//!   editable layers that funnels every mutation into one merged geometry
//!   value written to the bound form field.
//! * [`event`] — the closed set of draw gestures
//!   ([`DrawEventKind`](event::DrawEventKind)) and the dispatch table that
//!   routes them into store mutations.
//! * [`editor`] — the [`GeometryEditor`](editor::GeometryEditor) tying a
//!   store and a dispatch table together.
//! * [`loader`] — import of externally produced GeoJSON documents into the
//!   store.
//!
//! A typical flow: the host binds a store to a form field, the user draws a
//! shape, the toolbar emits a [`DrawEvent`](event::DrawEvent), the editor
//! routes it into the store, and the store persists the merged geometry to
//! the field. On the next render the host asks the store for its layers and
//! gets back one editable handle per unit geometry, re-exploded from
//! whatever the field holds now.
//!
//! ```
//! use geojson::{Geometry, Value};
//! use ortelius::editor::GeometryEditor;
//! use ortelius::event::DrawEvent;
//! use ortelius::form::{FieldBinding, FieldPath, InMemoryFormState};
//! use ortelius::store::{GeometryStore, LayerHandle};
//! use parking_lot::RwLock;
//! use std::sync::Arc;
//!
//! let form = Arc::new(RwLock::new(InMemoryFormState::default()));
//! let path: FieldPath = "metadata.geometry".parse()?;
//! let store = GeometryStore::new().with_binding(FieldBinding::new(form.clone(), path));
//!
//! let mut editor = GeometryEditor::new(store);
//! let layer = LayerHandle::new(Geometry::new(Value::Point(vec![11.5, 48.1])));
//! editor.handle_event(&DrawEvent::create(layer))?;
//!
//! assert!(!editor.store().is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use ortelius_geometry as geometry;

pub mod editor;
pub mod event;
pub mod form;
pub mod loader;
pub mod store;

pub use editor::GeometryEditor;
pub use event::{DrawEvent, DrawEventDispatcher, DrawEventKind};
pub use form::{FieldBinding, FieldPath, FormState, InMemoryFormState};
pub use store::{GeometryStore, LayerHandle, LayerKey};
