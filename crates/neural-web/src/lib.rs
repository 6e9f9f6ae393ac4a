//! WASM bridge for `neural-field`.
//!
//! ```js
//! import init, { mount_neural_canvas } from "./pkg/neural_web.js";
//! await init();
//! const hero = mount_neural_canvas("neural-canvas", "hero");
//! // later, when the hero leaves the page:
//! hero?.stop();
//! ```

pub mod canvas;
pub mod dom;
pub mod error;
pub mod frame;
pub mod runner;

pub use error::MountError;
pub use runner::FieldRunner;

use neural_field::FieldConfig;
use wasm_bindgen::prelude::*;

/// Parse an optional JSON config, falling back to defaults on any error.
pub fn load_config(json: Option<&str>) -> FieldConfig {
    match json {
        None => FieldConfig::default(),
        Some(json) => FieldConfig::from_json(json).unwrap_or_else(|e| {
            log::warn!("ignoring neural canvas config: {}", e);
            FieldConfig::default()
        }),
    }
}

/// Handle to a running hero canvas.
#[wasm_bindgen]
pub struct NeuralCanvas {
    mounted: Option<dom::Mounted>,
}

#[wasm_bindgen]
impl NeuralCanvas {
    /// Cancel the frame loop and remove every listener. Idempotent.
    pub fn stop(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            mounted.stop();
        }
    }

    pub fn is_running(&self) -> bool {
        self.mounted.as_ref().is_some_and(|m| m.is_running())
    }

    pub fn particle_count(&self) -> u32 {
        self.mounted.as_ref().map_or(0, |m| m.particle_count())
    }

    pub fn connection_count(&self) -> u32 {
        self.mounted.as_ref().map_or(0, |m| m.connection_count())
    }
}

/// Start the animation on `<canvas id=canvas_id>` sized to `#container_id`.
///
/// Returns `None` (and logs why) when the page lacks either element or a 2D
/// context; the page itself is unaffected.
#[wasm_bindgen]
pub fn mount_neural_canvas(
    canvas_id: &str,
    container_id: &str,
    config_json: Option<String>,
) -> Option<NeuralCanvas> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = load_config(config_json.as_deref());
    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64 | 1;

    match dom::mount(canvas_id, container_id, config, seed) {
        Ok(mounted) => {
            log::info!("neural canvas: mounted on #{}", canvas_id);
            Some(NeuralCanvas {
                mounted: Some(mounted),
            })
        }
        Err(e) => {
            log::warn!("neural canvas disabled: {}", e);
            None
        }
    }
}
