use serde_json::{Map, Value as JsonValue};

use super::{FieldPath, FormState};

/// Form state backed by a plain JSON document.
///
/// Useful for tests and for hosts that do not bring their own form library.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFormState {
    document: JsonValue,
}

impl InMemoryFormState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self {
            document: JsonValue::Object(Map::new()),
        }
    }

    /// Creates a state over an existing document.
    pub fn with_document(document: JsonValue) -> Self {
        Self { document }
    }

    /// The whole backing document.
    pub fn document(&self) -> &JsonValue {
        &self.document
    }
}

impl FormState for InMemoryFormState {
    fn read(&self, path: &FieldPath) -> JsonValue {
        let mut current = &self.document;
        for segment in path.segments() {
            current = match current {
                JsonValue::Object(map) => match map.get(segment) {
                    Some(value) => value,
                    None => return JsonValue::Null,
                },
                JsonValue::Array(items) => match segment.parse::<usize>().ok() {
                    Some(index) => match items.get(index) {
                        Some(value) => value,
                        None => return JsonValue::Null,
                    },
                    None => return JsonValue::Null,
                },
                _ => return JsonValue::Null,
            };
        }

        current.clone()
    }

    fn write(&mut self, path: &FieldPath, value: JsonValue) {
        if path.is_root() {
            self.document = value;
            return;
        }

        let segments: Vec<&str> = path.segments().collect();
        let (last, intermediate) = segments.split_last().expect("path is not root");

        let mut current = &mut self.document;
        for segment in intermediate {
            current = descend(current, segment);
        }

        set_member(current, last, value);
    }
}

fn array_index(node: &JsonValue, segment: &str) -> Option<usize> {
    match node {
        JsonValue::Array(_) => segment.parse::<usize>().ok(),
        _ => None,
    }
}

/// Steps into `segment`, replacing whatever is in the way with an object so
/// the walk can continue. Arrays are kept when the segment is a valid index.
fn descend<'a>(node: &'a mut JsonValue, segment: &str) -> &'a mut JsonValue {
    let index = array_index(node, segment);

    let child = match (node, index) {
        (JsonValue::Array(items), Some(index)) => {
            while items.len() <= index {
                items.push(JsonValue::Null);
            }
            &mut items[index]
        }
        (node, _) => {
            if !node.is_object() {
                *node = JsonValue::Object(Map::new());
            }
            node.as_object_mut()
                .expect("replaced with an object above")
                .entry(segment.to_string())
                .or_insert(JsonValue::Null)
        }
    };

    if !child.is_object() && !child.is_array() {
        *child = JsonValue::Object(Map::new());
    }

    child
}

fn set_member(node: &mut JsonValue, segment: &str, value: JsonValue) {
    let index = array_index(node, segment);

    match (node, index) {
        (JsonValue::Array(items), Some(index)) => {
            while items.len() <= index {
                items.push(JsonValue::Null);
            }
            items[index] = value;
        }
        (node, _) => {
            if !node.is_object() {
                *node = JsonValue::Object(Map::new());
            }
            if let Some(map) = node.as_object_mut() {
                map.insert(segment.to_string(), value);
            }
        }
    }
}
