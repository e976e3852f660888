//! Abstraction over the application-owned form state.
//!
//! The form values are owned by the host application. The store never keeps
//! a copy of the field value that could diverge; it holds a
//! [`FieldBinding`] — a shared handle to the state plus the [`FieldPath`] of
//! the one field it manages — and reads through it on every access.

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value as JsonValue;

mod memory;
mod path;

pub use memory::InMemoryFormState;
pub use path::FieldPath;

/// External storage of form values, addressed by field paths.
///
/// Writes are last-write-wins; no transactional guarantees are assumed
/// beyond that.
pub trait FormState {
    /// Current value at the path. Absent paths read as `Null`.
    fn read(&self, path: &FieldPath) -> JsonValue;

    /// Replaces the value at the path, creating intermediate containers as
    /// needed.
    fn write(&mut self, path: &FieldPath, value: JsonValue);
}

/// A store's binding to one field of a shared form state.
///
/// Clones share the underlying state.
pub struct FieldBinding<S> {
    state: Arc<RwLock<S>>,
    path: FieldPath,
}

impl<S: FormState> FieldBinding<S> {
    /// Binds the given field of the shared state.
    pub fn new(state: Arc<RwLock<S>>, path: FieldPath) -> Self {
        Self { state, path }
    }

    /// Path of the bound field.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Reads the current value of the bound field.
    pub fn read(&self) -> JsonValue {
        self.state.read().read(&self.path)
    }

    /// Writes a new value to the bound field.
    pub fn write(&self, value: JsonValue) {
        self.state.write().write(&self.path, value);
    }

    /// Shared handle to the underlying form state.
    pub fn state(&self) -> Arc<RwLock<S>> {
        self.state.clone()
    }
}

impl<S> Clone for FieldBinding<S> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            path: self.path.clone(),
        }
    }
}

impl<S> std::fmt::Debug for FieldBinding<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldBinding")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn binding_clones_share_state() {
        let state = Arc::new(RwLock::new(InMemoryFormState::default()));
        let binding = FieldBinding::new(state, "metadata.geometry".parse().expect("valid path"));
        let other = binding.clone();

        binding.write(json!({"type": "Point", "coordinates": [1.0, 2.0]}));

        assert_eq!(
            other.read(),
            json!({"type": "Point", "coordinates": [1.0, 2.0]})
        );
    }
}
