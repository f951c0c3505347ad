//! Pointer-driven Julia set and shader-art visuals for a browser canvas.
//!
//! Everything outside [`wasm`] is plain Rust and runs on the host, which is
//! where the unit tests live.

pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod julia;
pub mod path;
pub mod presets;
pub mod session;
pub mod shaders;
pub mod signal;

pub use color::{Channel, ColorParameters};
pub use config::{PaletteKind, Scene, SceneConfig};
pub use error::{Error, Result};
pub use frame::{FrameUniforms, Renderer, Uniform};
pub use path::{PathRecorder, RecordedPath, ReleaseOutcome};
pub use presets::{KeyValueStore, MemoryStore, Preset, PresetError, PresetLibrary};
pub use session::{MoveOutcome, Session};
pub use signal::{CanvasSize, PointerSample, SignalMode};

#[cfg(target_arch = "wasm32")]
pub use wasm::storage::LocalStore;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    use crate::config::SceneConfig;
    use crate::error::{Error, Result};

    mod controls;
    mod input;
    mod render;
    mod schedule;
    pub mod storage;

    pub(crate) fn js_err(value: JsValue) -> Error {
        Error::Js(format!("{value:?}"))
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        if let Err(err) = setup() {
            log::error!("setup failed: {err}");
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(&err.to_string());
            }
            return Err(js_sys::Error::new(&err.to_string()).into());
        }
        Ok(())
    }

    fn setup() -> Result<()> {
        let window = web_sys::window().ok_or_else(|| Error::MissingElement("window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| Error::MissingElement("document".into()))?;
        let canvas = document
            .get_element_by_id("c")
            .ok_or_else(|| Error::MissingElement("canvas #c".into()))?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| Error::MissingElement("#c is not a canvas".into()))?;

        let config = SceneConfig::from_json(&canvas.get_attribute("data-config").unwrap_or_default());
        let level = config
            .as_ref()
            .ok()
            .and_then(|c| c.level().ok())
            .unwrap_or(log::Level::Info);
        console_log::init_with_level(level).ok();
        let config = config?;
        log::info!(
            "starting {:?} scene with {:?} palette",
            config.scene,
            config.palette
        );

        render::start(&window, &document, canvas, config)
    }
}
