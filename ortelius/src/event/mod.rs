//! Draw gestures and their routing into store mutations.
//!
//! The drawing toolbar lives outside this crate; whatever it is, it reports
//! user gestures as [`DrawEvent`]s. The set of gestures is a closed enum,
//! and routing is an explicit dispatch table from [`DrawEventKind`] to a
//! handler, so no string-keyed event bus of a host runtime is involved.
//! [`StoreEditHandler`] provides the canonical handlers; hosts can replace
//! any entry of the table to intercept a gesture.

use ahash::HashMap;

use ortelius_geometry::GeometryError;
use serde::{Deserialize, Serialize};

use crate::form::FormState;
use crate::store::{GeometryStore, LayerHandle, LayerKey};

mod store_handler;

pub use store_handler::StoreEditHandler;

/// The gestures a drawing toolbar can report.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawEventKind {
    /// A new shape was drawn.
    Create,
    /// An existing shape was moved or reshaped.
    Edit,
    /// An existing shape was deleted.
    Remove,
    /// A shape was cut; the payload replaces the source shape.
    Cut,
}

/// One user gesture, dispatched synchronously by the event source.
#[derive(Debug, Clone)]
pub struct DrawEvent {
    /// The gesture that happened.
    pub kind: DrawEventKind,
    /// The resulting layer. For [`DrawEventKind::Create`] this is the new
    /// shape; for edits and cuts it is the replacement.
    pub layer: LayerHandle,
    /// Identity of the layer the gesture started from, for gestures that
    /// replace or delete an existing one.
    pub source: Option<LayerKey>,
}

impl DrawEvent {
    /// A new shape was drawn.
    pub fn create(layer: LayerHandle) -> Self {
        Self {
            kind: DrawEventKind::Create,
            layer,
            source: None,
        }
    }

    /// The shape identified by `source` was reshaped into `layer`.
    pub fn edit(layer: LayerHandle, source: LayerKey) -> Self {
        Self {
            kind: DrawEventKind::Edit,
            layer,
            source: Some(source),
        }
    }

    /// The given shape was deleted.
    pub fn remove(layer: LayerHandle) -> Self {
        Self {
            kind: DrawEventKind::Remove,
            layer,
            source: None,
        }
    }

    /// The shape identified by `source` was cut into `layer`.
    pub fn cut(layer: LayerHandle, source: LayerKey) -> Self {
        Self {
            kind: DrawEventKind::Cut,
            layer,
            source: Some(source),
        }
    }

    /// The key identifying the affected store entry: the explicit source
    /// identity when present, otherwise the key carried by the layer itself.
    pub fn target_key(&self) -> Option<LayerKey> {
        self.source.or_else(|| self.layer.key())
    }
}

/// Handles one kind of draw event by mutating the store.
pub trait DrawEventHandler<S: FormState> {
    /// Handles the event.
    fn handle(
        &mut self,
        event: &DrawEvent,
        store: &mut GeometryStore<S>,
    ) -> Result<(), GeometryError>;
}

impl<S: FormState, T> DrawEventHandler<S> for T
where
    T: FnMut(&DrawEvent, &mut GeometryStore<S>) -> Result<(), GeometryError>,
{
    fn handle(
        &mut self,
        event: &DrawEvent,
        store: &mut GeometryStore<S>,
    ) -> Result<(), GeometryError> {
        self(event, store)
    }
}

/// Dispatch table from event kind to handler.
///
/// Events whose kind has no registered handler are ignored.
pub struct DrawEventDispatcher<S> {
    table: HashMap<DrawEventKind, Box<dyn DrawEventHandler<S>>>,
}

impl<S: FormState> Default for DrawEventDispatcher<S> {
    fn default() -> Self {
        Self {
            table: HashMap::default(),
        }
    }
}

impl<S: FormState> DrawEventDispatcher<S> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with [`StoreEditHandler`] registered for every kind.
    pub fn with_store_handlers() -> Self {
        let mut dispatcher = Self::new();
        for kind in [
            DrawEventKind::Create,
            DrawEventKind::Edit,
            DrawEventKind::Remove,
            DrawEventKind::Cut,
        ] {
            dispatcher.set_handler(kind, StoreEditHandler);
        }
        dispatcher
    }

    /// Registers or replaces the handler for one kind of event.
    pub fn set_handler(&mut self, kind: DrawEventKind, handler: impl DrawEventHandler<S> + 'static) {
        self.table.insert(kind, Box::new(handler));
    }

    /// Routes the event to the handler registered for its kind.
    pub fn dispatch(
        &mut self,
        event: &DrawEvent,
        store: &mut GeometryStore<S>,
    ) -> Result<(), GeometryError> {
        match self.table.get_mut(&event.kind) {
            Some(handler) => handler.handle(event, store),
            None => {
                log::debug!("no handler registered for {:?} events", event.kind);
                Ok(())
            }
        }
    }
}

impl<S> std::fmt::Debug for DrawEventDispatcher<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawEventDispatcher")
            .field("kinds", &self.table.keys().collect::<Vec<_>>())
            .finish()
    }
}
