use ortelius_geometry::GeometryError;

use super::{DrawEvent, DrawEventHandler, DrawEventKind};
use crate::form::FormState;
use crate::store::GeometryStore;

/// The canonical routing of draw gestures into store mutations.
///
/// * `Create` adds the new layer; in unique-layer mode the store itself
///   evicts all prior entries.
/// * `Edit` and `Cut` carry the source identity onto the replacement layer
///   and update the entry in place. Gestures on a layer the store never
///   identified are ignored.
/// * `Remove` deletes the entry at the event's target key.
pub struct StoreEditHandler;

impl<S: FormState> DrawEventHandler<S> for StoreEditHandler {
    fn handle(
        &mut self,
        event: &DrawEvent,
        store: &mut GeometryStore<S>,
    ) -> Result<(), GeometryError> {
        match event.kind {
            DrawEventKind::Create => {
                store.add_layer(event.layer.clone())?;
            }
            DrawEventKind::Edit | DrawEventKind::Cut => {
                let Some(key) = event.target_key() else {
                    log::debug!("ignoring {:?} of an unidentified layer", event.kind);
                    return Ok(());
                };
                store.update_layer(event.layer.clone().with_key(key))?;
            }
            DrawEventKind::Remove => {
                let Some(key) = event.target_key() else {
                    return Ok(());
                };
                store.remove_layer(&event.layer.clone().with_key(key))?;
            }
        }

        Ok(())
    }
}
