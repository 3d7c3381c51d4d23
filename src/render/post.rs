use super::helpers;
use super::targets::{bloom_size, RenderTargets, HDR_FORMAT};
use crate::constants::*;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    resolution: [f32; 2],
    blur_dir: [f32; 2],
    strength: f32,
    radius: f32,
    threshold: f32,
    _pad: f32,
}

impl PostUniforms {
    fn new(resolution: [f32; 2], blur_dir: [f32; 2]) -> Self {
        Self {
            resolution,
            blur_dir,
            strength: BLOOM_STRENGTH,
            radius: BLOOM_RADIUS,
            threshold: BLOOM_THRESHOLD,
            _pad: 0.0,
        }
    }
}

/// One uniform buffer per pass: passes recorded into the same encoder all
/// observe the last `write_buffer`, so they cannot share one.
pub(crate) struct PostBuffers {
    bright: wgpu::Buffer,
    blur_h: wgpu::Buffer,
    blur_v: wgpu::Buffer,
    composite: wgpu::Buffer,
}

pub(crate) struct PostResources {
    pub(crate) bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    pub(crate) bgl1: wgpu::BindGroupLayout, // tex+sampler
    pub(crate) buffers: PostBuffers,
    pub(crate) sampler: wgpu::Sampler,
    pub(crate) bright_pipeline: wgpu::RenderPipeline,
    pub(crate) blur_pipeline: wgpu::RenderPipeline,
    pub(crate) composite_pipeline: wgpu::RenderPipeline,
}

/// Bind groups referencing the size-dependent targets; rebuilt on resize.
pub(crate) struct PostBindGroups {
    pub(crate) bright_from_hdr: wgpu::BindGroup,
    pub(crate) blur_from_a: wgpu::BindGroup,
    pub(crate) blur_from_b: wgpu::BindGroup,
    pub(crate) composite_from_hdr: wgpu::BindGroup,
    pub(crate) bloom_a_only: wgpu::BindGroup,
}

fn post_buffer(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<PostUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

pub(crate) fn create_post_resources(
    device: &wgpu::Device,
    swap_format: wgpu::TextureFormat,
) -> PostResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("post_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::POST_WGSL.into()),
    });
    let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl0"),
        entries: &[
            helpers::texture_entry(0, true),
            helpers::sampler_entry(1, wgpu::SamplerBindingType::Filtering),
            helpers::uniform_entry(2, wgpu::ShaderStages::FRAGMENT),
        ],
    });
    let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl1"),
        entries: &[
            helpers::texture_entry(0, true),
            helpers::sampler_entry(1, wgpu::SamplerBindingType::Filtering),
        ],
    });
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("linear_sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    });
    let buffers = PostBuffers {
        bright: post_buffer(device, "post_bright"),
        blur_h: post_buffer(device, "post_blur_h"),
        blur_v: post_buffer(device, "post_blur_v"),
        composite: post_buffer(device, "post_composite"),
    };
    let pl_bright_blur = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_0"),
        bind_group_layouts: &[&bgl0],
        push_constant_ranges: &[],
    });
    let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_comp"),
        bind_group_layouts: &[&bgl0, &bgl1],
        push_constant_ranges: &[],
    });
    let bright_pipeline =
        helpers::make_post_pipeline(device, &pl_bright_blur, &shader, "fs_bright", HDR_FORMAT, None);
    let blur_pipeline =
        helpers::make_post_pipeline(device, &pl_bright_blur, &shader, "fs_blur", HDR_FORMAT, None);
    let composite_pipeline = helpers::make_post_pipeline(
        device,
        &pl_composite,
        &shader,
        "fs_composite",
        swap_format,
        Some(wgpu::BlendState::REPLACE),
    );

    PostResources {
        bgl0,
        bgl1,
        buffers,
        sampler,
        bright_pipeline,
        blur_pipeline,
        composite_pipeline,
    }
}

impl PostResources {
    /// Upload per-pass parameters for a surface of `width` x `height`.
    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, width: u32, height: u32) {
        let (bw, bh) = bloom_size(width, height);
        let half = [bw as f32, bh as f32];
        let full = [width as f32, height as f32];
        let b = &self.buffers;
        let write = |buf: &wgpu::Buffer, u: PostUniforms| {
            queue.write_buffer(buf, 0, bytemuck::bytes_of(&u));
        };
        write(&b.bright, PostUniforms::new(full, [0.0, 0.0]));
        write(&b.blur_h, PostUniforms::new(half, [1.0, 0.0]));
        write(&b.blur_v, PostUniforms::new(half, [0.0, 1.0]));
        write(&b.composite, PostUniforms::new(full, [0.0, 0.0]));
    }

    fn source_group(
        &self,
        device: &wgpu::Device,
        label: &str,
        view: &wgpu::TextureView,
        uniforms: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.bgl0,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniforms.as_entire_binding(),
                },
            ],
        })
    }

    pub(crate) fn bind_groups(
        &self,
        device: &wgpu::Device,
        targets: &RenderTargets,
    ) -> PostBindGroups {
        let b = &self.buffers;
        let bloom_a_only = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg_bloom_a_only"),
            layout: &self.bgl1,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&targets.bloom_a_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });
        PostBindGroups {
            bright_from_hdr: self.source_group(device, "bg_bright", &targets.hdr_view, &b.bright),
            blur_from_a: self.source_group(device, "bg_blur_h", &targets.bloom_a_view, &b.blur_h),
            blur_from_b: self.source_group(device, "bg_blur_v", &targets.bloom_b_view, &b.blur_v),
            composite_from_hdr: self.source_group(
                device,
                "bg_composite",
                &targets.hdr_view,
                &b.composite,
            ),
            bloom_a_only,
        }
    }

    /// Record bright -> blur_h -> blur_v -> composite into `encoder`.
    pub(crate) fn record(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        groups: &PostBindGroups,
        targets: &RenderTargets,
        output: &wgpu::TextureView,
    ) {
        blit(
            encoder,
            "bright_pass",
            &targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.bright_pipeline,
            &groups.bright_from_hdr,
            None,
        );
        blit(
            encoder,
            "blur_h",
            &targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.blur_pipeline,
            &groups.blur_from_a,
            None,
        );
        blit(
            encoder,
            "blur_v",
            &targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.blur_pipeline,
            &groups.blur_from_b,
            None,
        );
        blit(
            encoder,
            "composite",
            output,
            wgpu::Color::TRANSPARENT,
            &self.composite_pipeline,
            &groups.composite_from_hdr,
            Some(&groups.bloom_a_only),
        );
    }
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    clear: wgpu::Color,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
}
