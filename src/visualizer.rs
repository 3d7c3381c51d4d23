use crate::audio;
use crate::constants::*;
use crate::core::{
    sphere_program, FrameLoop, OrbitMotion, PerspectiveCamera, StageSources, Viewport,
    SPHERE_VS_WGSL, STANDARD_FS_WGSL, STANDARD_VS_WGSL,
};
use crate::dom::{self, ResizeListener};
use crate::envmap::{self, EnvMapSlot};
use crate::frame::{self, FrameContext, Tick};
use crate::render::GpuState;
use instant::Instant;
use rand::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

/// Audio-reactive scene bound to one canvas and two audio nodes.
///
/// Created stopped; `start()` begins the animation loop, `stop()` cancels
/// it. Dropping (or `free()` from JS) stops the loop and detaches the
/// resize listener.
#[wasm_bindgen]
pub struct Visualizer3D {
    ctx: Rc<RefCell<FrameContext>>,
    tick: Tick,
    _resize: ResizeListener,
}

impl Visualizer3D {
    pub async fn build(
        canvas: web::HtmlCanvasElement,
        input_node: &web::AudioNode,
        output_node: &web::AudioNode,
    ) -> anyhow::Result<Self> {
        let input = audio::tap(input_node)?;
        let output = audio::tap(output_node)?;

        let viewport = dom::measure_viewport().unwrap_or(Viewport {
            css_width: canvas.width().max(1) as f32,
            css_height: canvas.height().max(1) as f32,
            pixel_ratio: 1.0,
        });
        dom::fit_canvas(&canvas, &viewport, MAX_SURFACE_DIMENSION);

        let program = sphere_program(
            StageSources {
                vertex: STANDARD_VS_WGSL,
                fragment: STANDARD_FS_WGSL,
            },
            SPHERE_VS_WGSL,
        )?;
        let gpu = GpuState::new(&canvas, &program).await?;

        let env_slot: EnvMapSlot = Rc::new(RefCell::new(None));
        envmap::spawn_loader(ENV_MAP_URL, env_slot.clone());

        let clock = Instant::now();
        let ctx = Rc::new(RefCell::new(FrameContext {
            gpu,
            canvas,
            input,
            output,
            program,
            motion: OrbitMotion::new(0.0),
            camera: PerspectiveCamera::new(viewport.aspect()),
            viewport,
            rng: StdRng::from_entropy(),
            env_slot,
            clock,
            frame_loop: FrameLoop::new(),
        }));
        ctx.borrow_mut().handle_resize();

        let ctx_resize = ctx.clone();
        let resize = ResizeListener::new(move || {
            if let Ok(mut c) = ctx_resize.try_borrow_mut() {
                c.handle_resize();
            }
        })?;

        let tick = frame::build_tick(ctx.clone());
        log::info!("[visualizer] created");
        Ok(Self {
            ctx,
            tick,
            _resize: resize,
        })
    }
}

#[wasm_bindgen]
impl Visualizer3D {
    /// Resolves once the GPU device is ready. Rejects if the canvas cannot
    /// host a WebGPU surface or the audio nodes cannot be tapped.
    pub async fn create(
        canvas: web::HtmlCanvasElement,
        input_node: web::AudioNode,
        output_node: web::AudioNode,
    ) -> Result<Visualizer3D, JsValue> {
        Self::build(canvas, &input_node, &output_node)
            .await
            .map_err(|e| {
                log::error!("[visualizer] create failed: {:?}", e);
                JsValue::from_str(&format!("{:#}", e))
            })
    }

    pub fn start(&self) {
        if frame::start_loop(&self.ctx, &self.tick) {
            log::info!("[visualizer] started");
        }
    }

    pub fn stop(&self) {
        if frame::stop_loop(&self.ctx) {
            log::info!("[visualizer] stopped");
        }
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.ctx.borrow().frame_loop.is_running()
    }
}

impl Drop for Visualizer3D {
    fn drop(&mut self) {
        frame::stop_loop(&self.ctx);
        self.tick.borrow_mut().take();
    }
}
