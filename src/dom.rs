use crate::core::Viewport;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let document = window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let el = document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

/// Window inner size in CSS pixels and the device pixel ratio, or `None`
/// while the window has no extent (minimized, detached frame).
pub fn measure_viewport() -> Option<Viewport> {
    let w = web::window()?;
    let width = w.inner_width().ok()?.as_f64()?;
    let height = w.inner_height().ok()?.as_f64()?;
    Viewport::new(width as f32, height as f32, w.device_pixel_ratio() as f32)
}

/// Pin the canvas CSS box to the viewport and match its backing store to
/// CSS size * devicePixelRatio, capped at `max_dim` texels per side.
/// Returns the backing size written.
pub fn fit_canvas(
    canvas: &web::HtmlCanvasElement,
    viewport: &Viewport,
    max_dim: u32,
) -> (u32, u32) {
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", viewport.css_width));
    _ = style.set_property("height", &format!("{}px", viewport.css_height));

    let (w, h) = viewport.backing_size(max_dim);
    if canvas.width() != w {
        canvas.set_width(w);
    }
    if canvas.height() != h {
        canvas.set_height(h);
    }
    (w, h)
}

/// A window `resize` listener that unregisters itself when dropped.
pub struct ResizeListener {
    closure: Closure<dyn FnMut()>,
}

impl ResizeListener {
    pub fn new(handler: impl FnMut() + 'static) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
        window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        Ok(Self { closure })
    }
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        if let Some(window) = web::window() {
            _ = window.remove_event_listener_with_callback(
                "resize",
                self.closure.as_ref().unchecked_ref(),
            );
        }
    }
}
