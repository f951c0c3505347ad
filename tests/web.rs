#![cfg(target_arch = "wasm32")]

use julia_viz::{ColorParameters, KeyValueStore, LocalStore, PresetError, PresetLibrary};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn canvas_has_layout() {
    let window = web_sys::window().unwrap();
    let document = window.document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    canvas.set_id("c");
    document.body().unwrap().append_child(&canvas).unwrap();

    let rect = document
        .get_element_by_id("c")
        .expect("canvas element not found")
        .get_bounding_client_rect();

    assert!(rect.width() > 0.0 && rect.height() > 0.0);
}

#[wasm_bindgen_test]
fn local_store_keeps_presets() {
    let window = web_sys::window().unwrap();
    let mut presets = PresetLibrary::new(LocalStore::open(&window).unwrap());

    presets
        .save("web-test", ColorParameters::new(1.25, 50.0, 99.5))
        .unwrap();
    assert!(presets.names().unwrap().contains(&"web-test".to_string()));
    assert_eq!(
        presets.load("web-test").unwrap().colors,
        ColorParameters::new(1.25, 50.0, 99.5)
    );

    presets.delete("web-test").unwrap();
    assert!(matches!(
        presets.load("web-test"),
        Err(PresetError::NotFound(_))
    ));
    assert!(presets
        .store()
        .get("julia_viz.preset.web-test")
        .unwrap()
        .is_none());
}
