//! This example walks through an editing session without any UI: shapes are
//! "drawn" by feeding draw events to the editor, and the persisted form
//! value is printed after each step.

use std::sync::Arc;

use geojson::{Geometry, Value};
use ortelius::editor::GeometryEditor;
use ortelius::event::DrawEvent;
use ortelius::form::{FieldBinding, FieldPath, FormState, InMemoryFormState};
use ortelius::loader::GeoJsonLoader;
use ortelius::store::{GeometryStore, LayerHandle};
use parking_lot::RwLock;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let form = Arc::new(RwLock::new(InMemoryFormState::default()));
    let path = FieldPath::new("metadata.geometry");
    let binding = FieldBinding::new(form.clone(), path.clone());
    let mut editor = GeometryEditor::new(GeometryStore::new().with_binding(binding));

    let print_field = |step: &str| {
        println!("{step}: {}", form.read().read(&path));
    };

    // Draw two points; the persisted value becomes a MultiPoint.
    editor.handle_event(&DrawEvent::create(LayerHandle::new(Geometry::new(
        Value::Point(vec![11.5761, 48.1371]),
    ))))?;
    print_field("after first point");

    editor.handle_event(&DrawEvent::create(LayerHandle::new(Geometry::new(
        Value::Point(vec![13.4050, 52.5200]),
    ))))?;
    print_field("after second point");

    // Reshape the second point through its store-issued key.
    let source = editor.layers()?[1].key().expect("store-issued handle");
    editor.handle_event(&DrawEvent::edit(
        LayerHandle::new(Geometry::new(Value::Point(vec![8.6821, 50.1109]))),
        source,
    ))?;
    print_field("after edit");

    // Remove the first point; a single point is persisted unwrapped.
    let first = editor.layers()?[0].clone();
    editor.handle_event(&DrawEvent::remove(first))?;
    print_field("after remove");

    // Bulk import replaces the drawing entirely.
    GeoJsonLoader.load_into(
        r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 0.0]]]
                    }
                }
            ]
        }"#,
        editor.store_mut(),
    )?;
    print_field("after import");

    println!(
        "editable layers after import: {}",
        editor.layers()?.len()
    );

    Ok(())
}
