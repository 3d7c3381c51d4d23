use crate::constants::*;
use glam::{Quat, Vec3, Vec4};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameUniforms {
    pub sphere_scale: f32,
    pub camera_eye: Vec3,
    pub time: f32,
    pub input_data: Vec4,
    pub output_data: Vec4,
}

/// Audio-driven orbit state: accumulated rotation angles, the shader clock
/// and the timestamp of the previous frame.
#[derive(Clone, Debug)]
pub struct OrbitMotion {
    rotation: Vec3,
    time: f32,
    prev_ms: f64,
}

impl OrbitMotion {
    pub fn new(start_ms: f64) -> Self {
        Self {
            rotation: Vec3::ZERO,
            time: 0.0,
            prev_ms: start_ms,
        }
    }

    pub fn reset_clock(&mut self, now_ms: f64) {
        self.prev_ms = now_ms;
    }

    /// Elapsed time since the previous frame in 60 Hz frame units.
    pub fn frame_delta(&mut self, now_ms: f64) -> f32 {
        let dt = (now_ms - self.prev_ms) / FRAME_BASELINE_MS;
        self.prev_ms = now_ms;
        dt as f32
    }

    /// Advance rotation and shader clock by `dt` frames using the current
    /// input/output spectra. Missing bins read as silence.
    pub fn advance(&mut self, dt: f32, input: &[u8], output: &[u8]) -> FrameUniforms {
        let in1 = level(input, 1);
        let in2 = level(input, 2);
        let out0 = level(output, 0);
        let out1 = level(output, 1);
        let out2 = level(output, 2);

        let f = ROTATION_RATE;
        self.rotation.x += dt * f * ROTATION_X_WEIGHT * out1;
        self.rotation.z += dt * f * ROTATION_Z_WEIGHT * in1;
        self.rotation.y += dt * f * ROTATION_Y_WEIGHT * (in2 + out2);

        self.time += dt * TIME_GAIN * out0;

        FrameUniforms {
            sphere_scale: sphere_scale(byte(output, 1)),
            camera_eye: orbit_eye(self.rotation),
            time: self.time,
            input_data: signal_vector(input, INPUT_SIGNAL_WEIGHTS),
            output_data: signal_vector(output, OUTPUT_SIGNAL_WEIGHTS),
        }
    }

    #[inline]
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }
}

/// Uniform sphere scale for an output level byte; always in [1.0, 1.0 + SCALE_GAIN].
#[inline]
pub fn sphere_scale(output_level: u8) -> f32 {
    1.0 + SCALE_GAIN * (output_level as f32 / 255.0)
}

/// Camera position for the given orbit angles: rotate the base offset
/// (0, 0, CAMERA_DISTANCE) by Euler angles applied in XYZ order.
pub fn orbit_eye(rotation: Vec3) -> Vec3 {
    let q = Quat::from_rotation_x(rotation.x)
        * Quat::from_rotation_y(rotation.y)
        * Quat::from_rotation_z(rotation.z);
    q * Vec3::new(0.0, 0.0, CAMERA_DISTANCE)
}

/// Weighted, normalized bins 0..3 packed as a vec4 with w = 0.
pub fn signal_vector(bins: &[u8], weights: [f32; 3]) -> Vec4 {
    Vec4::new(
        weights[0] * level(bins, 0),
        weights[1] * level(bins, 1),
        weights[2] * level(bins, 2),
        0.0,
    )
}

#[inline]
fn byte(bins: &[u8], index: usize) -> u8 {
    bins.get(index).copied().unwrap_or(0)
}

#[inline]
fn level(bins: &[u8], index: usize) -> f32 {
    byte(bins, index) as f32 / 255.0
}
