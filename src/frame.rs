use crate::constants::*;
use crate::core::{
    apply_frame_uniforms, FrameLoop, OrbitMotion, PerspectiveCamera, ShaderProgram, SignalSampler,
    Viewport,
};
use crate::dom;
use crate::envmap::EnvMapSlot;
use crate::render;
use glam::Vec3;
use instant::Instant;
use rand::prelude::*;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Self-referencing `requestAnimationFrame` callback slot.
pub type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct FrameContext {
    pub gpu: render::GpuState,
    pub canvas: web::HtmlCanvasElement,
    pub input: SignalSampler<web::AnalyserNode>,
    pub output: SignalSampler<web::AnalyserNode>,
    pub program: ShaderProgram,
    pub motion: OrbitMotion,
    pub camera: PerspectiveCamera,
    pub viewport: Viewport,
    pub rng: StdRng,
    pub env_slot: EnvMapSlot,
    pub clock: Instant,
    pub frame_loop: FrameLoop,
}

impl FrameContext {
    /// Milliseconds since the context was created.
    pub fn now_ms(&self) -> f64 {
        self.clock.elapsed().as_secs_f64() * 1000.0
    }

    pub fn frame(&mut self) {
        self.input.update();
        self.output.update();

        let now = self.now_ms();
        let dt = self.motion.frame_delta(now);

        let rand = self.rng.gen_range(0.0..BACKDROP_RAND_MAX);
        self.gpu.set_backdrop(self.viewport.resolution(), rand);

        let pending_env = self.env_slot.borrow_mut().take();
        if let Some(img) = pending_env {
            self.gpu.install_environment(&img);
            log::info!("[envmap] installed");
        }

        let u = self
            .motion
            .advance(dt, self.input.data(), self.output.data());
        self.gpu.set_sphere_scale(u.sphere_scale);
        self.camera.look_at(u.camera_eye, Vec3::ZERO);
        self.gpu.set_camera(&self.camera);
        if let Err(e) = apply_frame_uniforms(&mut self.program.extra, &u) {
            log::error!("[visualizer] uniform update failed: {}", e);
        }
        self.gpu.write_program_uniforms(&self.program.extra);

        match self.gpu.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => self.gpu.reconfigure(),
            Err(e) => log::error!("[gpu] render error: {:?}", e),
        }
    }

    /// Follow the window size: camera aspect, backdrop resolution, canvas
    /// box and backing store, surface and post targets. A collapsed window
    /// is ignored.
    pub fn handle_resize(&mut self) {
        let Some(viewport) = dom::measure_viewport() else {
            return;
        };
        self.viewport = viewport;
        self.camera.aspect = viewport.aspect();
        let max_dim = self.gpu.max_surface_dimension();
        let (w, h) = dom::fit_canvas(&self.canvas, &viewport, max_dim);
        self.gpu.resize_if_needed(w, h);
        log::debug!(
            "[visualizer] resize {}x{} css @{} -> {}x{}",
            viewport.css_width,
            viewport.css_height,
            viewport.pixel_ratio,
            w,
            h
        );
    }
}

fn schedule(tick: &Tick, frame_loop: &mut FrameLoop) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => frame_loop.arm(id),
            Err(e) => log::error!("[visualizer] requestAnimationFrame error: {:?}", e),
        }
    }
}

/// Build the animation callback. It holds the tick slot weakly so dropping
/// the owner's `Tick` releases the closure.
pub fn build_tick(frame_ctx: Rc<RefCell<FrameContext>>) -> Tick {
    let tick: Tick = Rc::new(RefCell::new(None));
    let tick_weak: Weak<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::downgrade(&tick);
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let mut ctx = frame_ctx.borrow_mut();
        if !ctx.frame_loop.begin_frame() {
            return;
        }
        if let Some(tick) = tick_weak.upgrade() {
            schedule(&tick, &mut ctx.frame_loop);
        }
        ctx.frame();
    }) as Box<dyn FnMut()>));
    tick
}

/// Returns `false` if the loop was already running.
pub fn start_loop(frame_ctx: &Rc<RefCell<FrameContext>>, tick: &Tick) -> bool {
    let mut ctx = frame_ctx.borrow_mut();
    if !ctx.frame_loop.start() {
        return false;
    }
    let now = ctx.now_ms();
    ctx.motion.reset_clock(now);
    schedule(tick, &mut ctx.frame_loop);
    true
}

/// Returns whether the loop was running.
pub fn stop_loop(frame_ctx: &Rc<RefCell<FrameContext>>) -> bool {
    let mut ctx = frame_ctx.borrow_mut();
    let was_running = ctx.frame_loop.is_running();
    if let Some(id) = ctx.frame_loop.stop() {
        if let Some(w) = web::window() {
            _ = w.cancel_animation_frame(id);
        }
    }
    was_running
}
