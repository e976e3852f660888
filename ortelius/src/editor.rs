//! The geometry editor: a store plus the dispatch table that feeds it.

use ortelius_geometry::GeometryError;

use crate::event::{DrawEvent, DrawEventDispatcher};
use crate::form::FormState;
use crate::store::{GeometryStore, LayerHandle};

/// Ties a [`GeometryStore`] to a draw-event dispatch table.
///
/// The host wires its drawing toolbar to [`GeometryEditor::handle_event`]
/// and renders from [`GeometryEditor::layers`]; everything else — merging,
/// persistence, re-explosion — happens inside the store.
#[derive(Debug)]
pub struct GeometryEditor<S> {
    store: GeometryStore<S>,
    dispatcher: DrawEventDispatcher<S>,
}

impl<S: FormState> GeometryEditor<S> {
    /// Creates an editor with the canonical store handlers registered for
    /// every event kind.
    pub fn new(store: GeometryStore<S>) -> Self {
        Self {
            store,
            dispatcher: DrawEventDispatcher::with_store_handlers(),
        }
    }

    /// Creates an editor with a custom dispatch table.
    pub fn with_dispatcher(store: GeometryStore<S>, dispatcher: DrawEventDispatcher<S>) -> Self {
        Self { store, dispatcher }
    }

    /// Routes one draw event into the store.
    pub fn handle_event(&mut self, event: &DrawEvent) -> Result<(), GeometryError> {
        self.dispatcher.dispatch(event, &mut self.store)
    }

    /// The editable layers, reloading from the form field when stale.
    pub fn layers(&mut self) -> Result<Vec<LayerHandle>, GeometryError> {
        self.store.layers()
    }

    /// The underlying store.
    pub fn store(&self) -> &GeometryStore<S> {
        &self.store
    }

    /// Mutable access to the underlying store.
    pub fn store_mut(&mut self) -> &mut GeometryStore<S> {
        &mut self.store
    }

    /// Consumes the editor, returning the store.
    pub fn into_store(self) -> GeometryStore<S> {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::DrawEventKind;
    use crate::form::{FieldBinding, FieldPath, InMemoryFormState};
    use geojson::{Geometry, Value};
    use parking_lot::RwLock;
    use serde_json::json;
    use std::sync::Arc;

    type SharedForm = Arc<RwLock<InMemoryFormState>>;

    fn editor() -> (GeometryEditor<InMemoryFormState>, SharedForm) {
        let form = Arc::new(RwLock::new(InMemoryFormState::default()));
        let binding = FieldBinding::new(form.clone(), FieldPath::new("metadata.geometry"));
        let store = GeometryStore::new().with_binding(binding);
        (GeometryEditor::new(store), form)
    }

    fn point(x: f64, y: f64) -> LayerHandle {
        LayerHandle::new(Geometry::new(Value::Point(vec![x, y])))
    }

    #[test]
    fn draw_and_reshape_round_trip() {
        let (mut editor, form) = editor();

        editor
            .handle_event(&DrawEvent::create(point(0.0, 0.0)))
            .expect("create succeeds");
        editor
            .handle_event(&DrawEvent::create(point(1.0, 1.0)))
            .expect("create succeeds");

        let layers = editor.layers().expect("index is fresh");
        assert_eq!(layers.len(), 2);

        let source = layers[1].key().expect("store-issued handles are identified");
        editor
            .handle_event(&DrawEvent::edit(point(2.0, 2.0), source))
            .expect("edit succeeds");

        assert_eq!(
            form.read().read(&FieldPath::new("metadata.geometry")),
            json!({"type": "MultiPoint", "coordinates": [[0.0, 0.0], [2.0, 2.0]]})
        );
    }

    #[test]
    fn edit_with_unknown_source_leaves_the_store_unchanged() {
        let (mut editor, form) = editor();

        editor
            .handle_event(&DrawEvent::create(point(0.0, 0.0)))
            .expect("create succeeds");
        let key = editor.layers().expect("index is fresh")[0]
            .key()
            .expect("identified");

        // Delete the layer, then try to edit it through its dead key.
        editor
            .handle_event(&DrawEvent::remove(point(0.0, 0.0).with_key(key)))
            .expect("remove succeeds");
        editor
            .handle_event(&DrawEvent::edit(point(9.0, 9.0), key))
            .expect("stale edit is a no-op");

        assert_eq!(
            form.read().read(&FieldPath::new("metadata.geometry")),
            json!({})
        );
    }

    #[test]
    fn custom_dispatch_table_intercepts_gestures() {
        let form = Arc::new(RwLock::new(InMemoryFormState::default()));
        let binding = FieldBinding::new(form.clone(), FieldPath::new("metadata.geometry"));
        let store = GeometryStore::new().with_binding(binding);

        let mut dispatcher = DrawEventDispatcher::with_store_handlers();
        dispatcher.set_handler(
            DrawEventKind::Remove,
            |_: &DrawEvent,
             _: &mut GeometryStore<InMemoryFormState>|
             -> Result<(), ortelius_geometry::GeometryError> { Ok(()) },
        );

        let mut editor = GeometryEditor::with_dispatcher(store, dispatcher);
        editor
            .handle_event(&DrawEvent::create(point(3.0, 3.0)))
            .expect("create succeeds");

        let layer = editor.layers().expect("index is fresh")[0].clone();
        editor
            .handle_event(&DrawEvent::remove(layer))
            .expect("intercepted remove succeeds");

        assert_eq!(editor.layers().expect("index is fresh").len(), 1);
    }
}
