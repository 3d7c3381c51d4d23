use crate::constants::*;
use crate::core::{linear_rgb, EnvironmentImage, PerspectiveCamera, ShaderProgram, UniformBlock};
use glam::{Mat4, Vec2, Vec3};
use web_sys as web;

mod helpers;
mod post;
mod scene;
mod targets;
use post::{PostBindGroups, PostResources};
use scene::SceneResources;
use targets::{RenderTargets, HDR_FORMAT};

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    // srgb view of the surface texture the composite pass writes through
    view_format: wgpu::TextureFormat,

    targets: RenderTargets,
    post: PostResources,
    post_groups: PostBindGroups,
    scene: SceneResources,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    view_proj: Mat4,
    eye: Vec3,
    sphere_model: Mat4,
}

impl GpuState {
    /// The surface owns its own handle to the canvas.
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        program: &ShaderProgram,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let view_format = format.add_srgb_suffix();
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: if view_format != format {
                vec![view_format]
            } else {
                vec![]
            },
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let sample_count = if adapter
            .get_texture_format_features(HDR_FORMAT)
            .flags
            .sample_count_supported(MSAA_SAMPLES)
        {
            MSAA_SAMPLES
        } else {
            log::warn!("[gpu] {}x MSAA unsupported, rendering single-sampled", MSAA_SAMPLES);
            1
        };

        let targets = RenderTargets::new(&device, width, height, sample_count);
        let post = post::create_post_resources(&device, view_format);
        post.write_uniforms(&queue, width, height);
        let post_groups = post.bind_groups(&device, &targets);
        let scene = SceneResources::new(&device, &queue, program, sample_count);

        let [r, g, b] = linear_rgb(BACKGROUND_HEX);
        log::info!(
            "[gpu] surface {:?} {}x{} alpha={:?} samples={}",
            format,
            width,
            height,
            alpha_mode,
            sample_count
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            view_format,
            targets,
            post,
            post_groups,
            scene,
            width,
            height,
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
            view_proj: Mat4::IDENTITY,
            eye: Vec3::ZERO,
            sphere_model: Mat4::IDENTITY,
        })
    }

    pub fn set_camera(&mut self, camera: &PerspectiveCamera) {
        self.view_proj = camera.view_proj();
        self.eye = camera.eye;
    }

    pub fn set_sphere_scale(&mut self, scale: f32) {
        self.sphere_model = Mat4::from_scale(Vec3::splat(scale));
    }

    pub fn set_backdrop(&self, resolution: Vec2, rand: f32) {
        self.scene.write_backdrop(&self.queue, resolution, rand);
    }

    pub fn write_program_uniforms(&self, block: &UniformBlock) {
        self.scene.write_program_uniforms(&self.queue, block);
    }

    pub fn install_environment(&mut self, img: &EnvironmentImage) {
        self.scene.install_environment(&self.device, &self.queue, img);
    }

    pub fn max_surface_dimension(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);

            // Recreate offscreen render targets and dependent bind groups
            self.targets.recreate(&self.device, width, height);
            self.post.write_uniforms(&self.queue, width, height);
            self.post_groups = self.post.bind_groups(&self.device, &self.targets);
        }
    }

    /// Re-apply the current configuration after the surface was lost or
    /// went out of date.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.view_format),
            ..Default::default()
        });
        self.scene
            .write_mesh_uniforms(&self.queue, self.view_proj, self.eye, self.sphere_model);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let (color_view, resolve_target) = self.targets.scene_attachment();
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: if resolve_target.is_some() {
                            wgpu::StoreOp::Discard
                        } else {
                            wgpu::StoreOp::Store
                        },
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.scene.draw(&mut rpass);
        }

        self.post
            .record(&mut encoder, &self.post_groups, &self.targets, &view);

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
