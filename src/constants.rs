/// Visualizer tuning constants.
///
/// Everything the scene needs to look and move the way it does lives here,
/// so the frame loop and the renderer stay free of magic numbers.
// Spectrum sampling
pub const ANALYSER_FFT_SIZE: u32 = 32; // transform window, yields 16 byte bins
pub const ANALYSER_BIN_COUNT: usize = (ANALYSER_FFT_SIZE / 2) as usize;

// Host audio graphs (input microphone rate, output playback rate)
pub const INPUT_SAMPLE_RATE: f32 = 16_000.0;
pub const OUTPUT_SAMPLE_RATE: f32 = 24_000.0;

// Frame timing: dt is expressed in 60 Hz frames
pub const FRAME_BASELINE_MS: f64 = 1000.0 / 60.0;

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_DISTANCE: f32 = 5.0; // orbit offset along +Z

// Background shell
pub const BACKDROP_RADIUS: f32 = 10.0;
pub const BACKDROP_DETAIL: u32 = 5;
pub const BACKGROUND_HEX: u32 = 0x020617;
pub const BACKDROP_RAND_MAX: f32 = 10_000.0; // per-frame dissolve seed range

// Reactive sphere
pub const SPHERE_RADIUS: f32 = 1.0;
pub const SPHERE_DETAIL: u32 = 10;
pub const SPHERE_BASE_HEX: u32 = 0x000010;
pub const SPHERE_METALNESS: f32 = 0.5;
pub const SPHERE_ROUGHNESS: f32 = 0.1;
pub const SPHERE_EMISSIVE_HEX: u32 = 0x1e40af; // blue-800
pub const SPHERE_EMISSIVE_INTENSITY: f32 = 1.5;

// Audio -> motion mapping
pub const SCALE_GAIN: f32 = 0.2; // full output level grows the sphere by 20%
pub const ROTATION_RATE: f32 = 0.001;
pub const ROTATION_X_WEIGHT: f32 = 0.5; // output level, bin 1
pub const ROTATION_Z_WEIGHT: f32 = 0.5; // input level, bin 1
pub const ROTATION_Y_WEIGHT: f32 = 0.25; // input + output, bin 2
pub const TIME_GAIN: f32 = 0.1; // shader clock driven by output bin 0

// Shader signal vectors: per-bin weights for bins 0, 1, 2
pub const INPUT_SIGNAL_WEIGHTS: [f32; 3] = [1.0, 0.1, 10.0];
pub const OUTPUT_SIGNAL_WEIGHTS: [f32; 3] = [2.0, 0.1, 10.0];

// Post-processing
pub const BLOOM_STRENGTH: f32 = 1.0;
pub const BLOOM_RADIUS: f32 = 0.5;
pub const BLOOM_THRESHOLD: f32 = 0.0;

// Renderer
pub const MSAA_SAMPLES: u32 = 4;
pub const MAX_SURFACE_DIMENSION: u32 = 8192; // wgpu default max_texture_dimension_2d

// Environment reflection map (equirectangular OpenEXR)
pub const ENV_MAP_URL: &str =
    "https://raw.githubusercontent.com/mrdoob/three.js/dev/examples/textures/piz_compressed.exr";
