use crate::core::{EnvMapError, EnvironmentImage};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Single-slot handoff from the async loader to the frame loop. The loader
/// writes `Some` once; the next frame takes it and uploads it.
pub type EnvMapSlot = Rc<RefCell<Option<EnvironmentImage>>>;

pub async fn fetch_environment(url: &str) -> Result<EnvironmentImage, EnvMapError> {
    let window = web::window().ok_or_else(|| EnvMapError::Fetch("no window".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| EnvMapError::Fetch(format!("{:?}", e)))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|e| EnvMapError::Fetch(format!("{:?}", e)))?;
    if !resp.ok() {
        return Err(EnvMapError::Status(resp.status()));
    }
    let buf_promise = resp
        .array_buffer()
        .map_err(|e| EnvMapError::Fetch(format!("{:?}", e)))?;
    let buf = JsFuture::from(buf_promise)
        .await
        .map_err(|e| EnvMapError::Fetch(format!("{:?}", e)))?;
    let bytes = js_sys::Uint8Array::new(&buf).to_vec();
    EnvironmentImage::from_exr_bytes(&bytes)
}

/// Start loading `url` in the background. Failures leave the slot empty and
/// the scene keeps its neutral environment.
pub fn spawn_loader(url: &'static str, slot: EnvMapSlot) {
    spawn_local(async move {
        match fetch_environment(url).await {
            Ok(img) => {
                log::info!("[envmap] loaded {}x{}", img.width, img.height);
                *slot.borrow_mut() = Some(img);
            }
            Err(e) => log::warn!("[envmap] {}", e),
        }
    });
}
