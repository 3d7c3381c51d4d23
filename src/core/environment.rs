/// Equirectangular HDR environment in linear RGBA f32, row 0 at the top.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvironmentImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<f32>,
}

#[derive(Debug, thiserror::Error)]
pub enum EnvMapError {
    #[error("environment fetch failed: {0}")]
    Fetch(String),
    #[error("environment fetch returned HTTP {0}")]
    Status(u16),
    #[error("environment decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("environment image is empty")]
    Empty,
}

impl EnvironmentImage {
    /// Neutral stand-in bound until the real map arrives: a single black texel.
    pub fn placeholder() -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![0.0, 0.0, 0.0, 1.0],
        }
    }

    /// Decode an OpenEXR file into linear RGBA f32.
    pub fn from_exr_bytes(bytes: &[u8]) -> Result<Self, EnvMapError> {
        let img = image::load_from_memory_with_format(bytes, image::ImageFormat::OpenExr)?
            .into_rgba32f();
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(EnvMapError::Empty);
        }
        Ok(Self {
            width,
            height,
            pixels: img.into_raw(),
        })
    }

    /// Bytes per texel row of an Rgba32Float upload.
    #[inline]
    pub fn bytes_per_row(&self) -> u32 {
        self.width * 16
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}
