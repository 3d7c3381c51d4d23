#![cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
use web_sys as web;

mod audio;
mod constants;
mod core;
mod dom;
mod envmap;
mod frame;
mod render;
mod visualizer;

pub use audio::AudioTaps;
pub use visualizer::Visualizer3D;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("audio-orb loaded");
    Ok(())
}

/// What `mount` hands back to the page: the audio graphs to feed and the
/// running visualizer.
#[wasm_bindgen]
pub struct MountedVisualizer {
    taps: AudioTaps,
    visualizer: Visualizer3D,
}

#[wasm_bindgen]
impl MountedVisualizer {
    #[wasm_bindgen(getter, js_name = inputNode)]
    pub fn input_node(&self) -> web::AudioNode {
        self.taps.input_node()
    }

    #[wasm_bindgen(getter, js_name = outputNode)]
    pub fn output_node(&self) -> web::AudioNode {
        self.taps.output_node()
    }

    /// Unlock audio after a user gesture.
    pub fn resume(&self) {
        self.taps.resume();
    }

    pub fn start(&self) {
        self.visualizer.start();
    }

    pub fn stop(&self) {
        self.visualizer.stop();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.visualizer.is_running()
    }
}

async fn mount_inner(canvas_id: &str) -> anyhow::Result<MountedVisualizer> {
    let canvas = dom::canvas_by_id(canvas_id)?;
    let taps = AudioTaps::build()?;
    let visualizer =
        Visualizer3D::build(canvas, &taps.input_node(), &taps.output_node()).await?;
    visualizer.start();
    Ok(MountedVisualizer { taps, visualizer })
}

/// Look up `#canvas_id`, build both audio graphs and start a visualizer on
/// them.
#[wasm_bindgen]
pub async fn mount(canvas_id: String) -> Result<MountedVisualizer, JsValue> {
    mount_inner(&canvas_id).await.map_err(|e| {
        log::error!("mount error: {:?}", e);
        JsValue::from_str(&format!("{:#}", e))
    })
}
