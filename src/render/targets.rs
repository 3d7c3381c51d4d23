use super::helpers;

pub(crate) const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

/// Size-dependent offscreen targets.
///
/// - `msaa_*` is the multisampled scene color, resolved into `hdr_*`
///   (absent when running single-sampled, then the scene draws into `hdr_*`).
/// - `depth_*` matches the scene sample count.
/// - `bloom_*` are half-res ping-pong buffers for bright-pass and blur.
pub(crate) struct RenderTargets {
    pub(crate) sample_count: u32,
    pub(crate) msaa: Option<(wgpu::Texture, wgpu::TextureView)>,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
    pub(crate) hdr_tex: wgpu::Texture,
    pub(crate) hdr_view: wgpu::TextureView,
    pub(crate) bloom_a: wgpu::Texture,
    pub(crate) bloom_a_view: wgpu::TextureView,
    pub(crate) bloom_b: wgpu::Texture,
    pub(crate) bloom_b_view: wgpu::TextureView,
}

#[inline]
pub(crate) fn bloom_size(width: u32, height: u32) -> (u32, u32) {
    ((width.max(1) / 2).max(1), (height.max(1) / 2).max(1))
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32, sample_count: u32) -> Self {
        let sampled = wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING;
        let msaa = (sample_count > 1).then(|| {
            helpers::create_color_texture(
                device,
                "msaa_tex",
                width,
                height,
                HDR_FORMAT,
                sample_count,
                wgpu::TextureUsages::RENDER_ATTACHMENT,
            )
        });
        let (depth_tex, depth_view) = helpers::create_color_texture(
            device,
            "depth_tex",
            width,
            height,
            DEPTH_FORMAT,
            sample_count,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        let (hdr_tex, hdr_view) =
            helpers::create_color_texture(device, "hdr_tex", width, height, HDR_FORMAT, 1, sampled);
        let (bw, bh) = bloom_size(width, height);
        let (bloom_a, bloom_a_view) =
            helpers::create_color_texture(device, "bloom_a", bw, bh, HDR_FORMAT, 1, sampled);
        let (bloom_b, bloom_b_view) =
            helpers::create_color_texture(device, "bloom_b", bw, bh, HDR_FORMAT, 1, sampled);
        Self {
            sample_count,
            msaa,
            depth_tex,
            depth_view,
            hdr_tex,
            hdr_view,
            bloom_a,
            bloom_a_view,
            bloom_b,
            bloom_b_view,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::new(device, width, height, self.sample_count);
    }

    /// Scene color attachment view and its resolve target.
    pub(crate) fn scene_attachment(&self) -> (&wgpu::TextureView, Option<&wgpu::TextureView>) {
        match &self.msaa {
            Some((_, view)) => (view, Some(&self.hdr_view)),
            None => (&self.hdr_view, None),
        }
    }
}
