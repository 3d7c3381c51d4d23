use super::helpers::{self, MeshPipelineDesc};
use super::targets::{DEPTH_FORMAT, HDR_FORMAT};
use crate::constants::*;
use crate::core::{icosphere, EnvironmentImage, MeshVertex, ShaderProgram, UniformBlock};
use glam::{Mat4, Vec2, Vec3};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MeshUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    eye: [f32; 4],
}

impl MeshUniforms {
    pub(crate) fn new(view_proj: Mat4, model: Mat4, eye: Vec3) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            eye: eye.extend(1.0).to_array(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct BackdropUniforms {
    resolution: [f32; 2],
    rand: f32,
    _pad: f32,
}

struct MeshDraw {
    pipeline: wgpu::RenderPipeline,
    vertices: wgpu::Buffer,
    vertex_count: u32,
    mesh_uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl MeshDraw {
    fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, env: Option<&wgpu::BindGroup>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        if let Some(env) = env {
            rpass.set_bind_group(1, env, &[]);
        }
        rpass.set_vertex_buffer(0, self.vertices.slice(..));
        rpass.draw(0..self.vertex_count, 0..1);
    }
}

/// The two scene meshes and everything bound to them.
pub(crate) struct SceneResources {
    backdrop: MeshDraw,
    backdrop_uniforms: wgpu::Buffer,
    sphere: MeshDraw,
    extra_uniforms: Option<wgpu::Buffer>,
    env_bgl: wgpu::BindGroupLayout,
    env_sampler: wgpu::Sampler,
    env_bind_group: wgpu::BindGroup,
}

fn uniform_buffer(device: &wgpu::Device, label: &str, contents: &[u8]) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

fn vertex_buffer(device: &wgpu::Device, label: &str, vertices: &[MeshVertex]) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(vertices),
        usage: wgpu::BufferUsages::VERTEX,
    })
}

fn create_backdrop(device: &wgpu::Device, sample_count: u32) -> (MeshDraw, wgpu::Buffer) {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("backdrop_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::BACKDROP_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("backdrop_bgl"),
        entries: &[
            helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX),
            helpers::uniform_entry(1, wgpu::ShaderStages::FRAGMENT),
        ],
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("backdrop_layout"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = helpers::make_mesh_pipeline(
        device,
        &MeshPipelineDesc {
            label: "backdrop_pipeline",
            layout: &layout,
            shader: &shader,
            color_format: HDR_FORMAT,
            depth_format: DEPTH_FORMAT,
            sample_count,
            // inside the shell: draw back faces only
            cull_mode: wgpu::Face::Front,
        },
    );
    let verts = icosphere(BACKDROP_RADIUS, BACKDROP_DETAIL);
    let vertices = vertex_buffer(device, "backdrop_vertices", &verts);
    let mesh_uniforms = uniform_buffer(
        device,
        "backdrop_mesh",
        bytemuck::bytes_of(&MeshUniforms::new(Mat4::IDENTITY, Mat4::IDENTITY, Vec3::ZERO)),
    );
    let backdrop_uniforms = uniform_buffer(
        device,
        "backdrop_uniforms",
        bytemuck::bytes_of(&BackdropUniforms {
            resolution: [1.0, 1.0],
            rand: 0.0,
            _pad: 0.0,
        }),
    );
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("backdrop_bg"),
        layout: &bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: mesh_uniforms.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: backdrop_uniforms.as_entire_binding(),
            },
        ],
    });
    (
        MeshDraw {
            pipeline,
            vertices,
            vertex_count: verts.len() as u32,
            mesh_uniforms,
            bind_group,
        },
        backdrop_uniforms,
    )
}

fn create_env_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    img: &EnvironmentImage,
) -> wgpu::TextureView {
    let size = wgpu::Extent3d {
        width: img.width,
        height: img.height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("env_map"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba32Float,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        img.as_bytes(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(img.bytes_per_row()),
            rows_per_image: Some(img.height),
        },
        size,
    );
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn env_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("env_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

impl SceneResources {
    pub(crate) fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        program: &ShaderProgram,
        sample_count: u32,
    ) -> Self {
        let (backdrop, backdrop_uniforms) = create_backdrop(device, sample_count);

        // Rgba32Float is not filterable without an optional feature.
        let env_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("env_bgl"),
            entries: &[
                helpers::texture_entry(0, false),
                helpers::sampler_entry(1, wgpu::SamplerBindingType::NonFiltering),
            ],
        });
        let env_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("env_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            ..Default::default()
        });
        let placeholder = create_env_texture(device, queue, &EnvironmentImage::placeholder());
        let env_bind_group = env_bind_group(device, &env_bgl, &placeholder, &env_sampler);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sphere_shader"),
            source: wgpu::ShaderSource::Wgsl(program.source.as_str().into()),
        });
        let stages = wgpu::ShaderStages::VERTEX_FRAGMENT;
        let mut entries = vec![
            helpers::uniform_entry(0, stages),
            helpers::uniform_entry(1, stages),
        ];
        if program.has_extra() {
            entries.push(helpers::uniform_entry(2, stages));
        }
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sphere_bgl"),
            entries: &entries,
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sphere_layout"),
            bind_group_layouts: &[&bgl, &env_bgl],
            push_constant_ranges: &[],
        });
        let pipeline = helpers::make_mesh_pipeline(
            device,
            &MeshPipelineDesc {
                label: "sphere_pipeline",
                layout: &layout,
                shader: &shader,
                color_format: HDR_FORMAT,
                depth_format: DEPTH_FORMAT,
                sample_count,
                cull_mode: wgpu::Face::Back,
            },
        );
        let verts = icosphere(SPHERE_RADIUS, SPHERE_DETAIL);
        let vertices = vertex_buffer(device, "sphere_vertices", &verts);
        let mesh_uniforms = uniform_buffer(
            device,
            "sphere_mesh",
            bytemuck::bytes_of(&MeshUniforms::new(Mat4::IDENTITY, Mat4::IDENTITY, Vec3::ZERO)),
        );
        let material_uniforms = uniform_buffer(
            device,
            "sphere_material",
            bytemuck::bytes_of(&program.material.uniforms()),
        );
        let extra_uniforms = program
            .has_extra()
            .then(|| uniform_buffer(device, "sphere_extra", program.extra.bytes()));

        let mut bg_entries = vec![
            wgpu::BindGroupEntry {
                binding: 0,
                resource: mesh_uniforms.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: material_uniforms.as_entire_binding(),
            },
        ];
        if let Some(extra) = &extra_uniforms {
            bg_entries.push(wgpu::BindGroupEntry {
                binding: 2,
                resource: extra.as_entire_binding(),
            });
        }
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sphere_bg"),
            layout: &bgl,
            entries: &bg_entries,
        });

        Self {
            backdrop,
            backdrop_uniforms,
            sphere: MeshDraw {
                pipeline,
                vertices,
                vertex_count: verts.len() as u32,
                mesh_uniforms,
                bind_group,
            },
            extra_uniforms,
            env_bgl,
            env_sampler,
            env_bind_group,
        }
    }

    pub(crate) fn write_mesh_uniforms(
        &self,
        queue: &wgpu::Queue,
        view_proj: Mat4,
        eye: Vec3,
        sphere_model: Mat4,
    ) {
        let backdrop = MeshUniforms::new(view_proj, Mat4::IDENTITY, eye);
        let sphere = MeshUniforms::new(view_proj, sphere_model, eye);
        queue.write_buffer(&self.backdrop.mesh_uniforms, 0, bytemuck::bytes_of(&backdrop));
        queue.write_buffer(&self.sphere.mesh_uniforms, 0, bytemuck::bytes_of(&sphere));
    }

    pub(crate) fn write_backdrop(&self, queue: &wgpu::Queue, resolution: Vec2, rand: f32) {
        let u = BackdropUniforms {
            resolution: resolution.to_array(),
            rand,
            _pad: 0.0,
        };
        queue.write_buffer(&self.backdrop_uniforms, 0, bytemuck::bytes_of(&u));
    }

    pub(crate) fn write_program_uniforms(&self, queue: &wgpu::Queue, block: &UniformBlock) {
        if let Some(buf) = &self.extra_uniforms {
            queue.write_buffer(buf, 0, block.bytes());
        }
    }

    pub(crate) fn install_environment(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &EnvironmentImage,
    ) {
        let view = create_env_texture(device, queue, img);
        self.env_bind_group = env_bind_group(device, &self.env_bgl, &view, &self.env_sampler);
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        self.backdrop.draw(rpass, None);
        self.sphere.draw(rpass, Some(&self.env_bind_group));
    }
}
