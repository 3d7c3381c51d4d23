// Host-side tests for constants and their mathematical relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn analyser_yields_sixteen_bins() {
    assert!(ANALYSER_FFT_SIZE.is_power_of_two());
    assert_eq!(ANALYSER_BIN_COUNT, 16);
    // motion reads bins 0..=2
    assert!(ANALYSER_BIN_COUNT >= 3);
}

#[test]
fn frame_baseline_is_sixty_hz() {
    assert!((FRAME_BASELINE_MS * 60.0 - 1000.0).abs() < 1e-9);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_sits_inside_backdrop_and_frustum() {
    assert!(CAMERA_NEAR > 0.0 && CAMERA_NEAR < CAMERA_FAR);
    assert!(CAMERA_DISTANCE + SPHERE_RADIUS * (1.0 + SCALE_GAIN) < BACKDROP_RADIUS);
    // the far wall of the shell must not be clipped from any orbit position
    assert!(CAMERA_DISTANCE + BACKDROP_RADIUS < CAMERA_FAR);
    assert!(CAMERA_FOV_DEG > 0.0 && CAMERA_FOV_DEG < 180.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn rotation_weights_keep_their_asymmetry() {
    assert_eq!(ROTATION_X_WEIGHT, ROTATION_Z_WEIGHT);
    assert_eq!(ROTATION_Y_WEIGHT * 2.0, ROTATION_X_WEIGHT);
    assert!((ROTATION_RATE * ROTATION_X_WEIGHT - 0.0005).abs() < 1e-9);
}

#[test]
fn signal_weights_match_shader_expectations() {
    assert_eq!(INPUT_SIGNAL_WEIGHTS, [1.0, 0.1, 10.0]);
    assert_eq!(OUTPUT_SIGNAL_WEIGHTS, [2.0, 0.1, 10.0]);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn material_parameters_are_normalized() {
    assert!((0.0..=1.0).contains(&SPHERE_METALNESS));
    assert!((0.0..=1.0).contains(&SPHERE_ROUGHNESS));
    assert!(SPHERE_EMISSIVE_INTENSITY > 0.0);
    assert!(SPHERE_BASE_HEX <= 0xffffff && SPHERE_EMISSIVE_HEX <= 0xffffff);
    assert!(BACKGROUND_HEX <= 0xffffff);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn bloom_and_renderer_settings() {
    assert!(BLOOM_STRENGTH > 0.0);
    assert!(BLOOM_RADIUS >= 0.0 && BLOOM_RADIUS <= 1.0);
    assert!(BLOOM_THRESHOLD >= 0.0);
    assert!(MSAA_SAMPLES == 1 || MSAA_SAMPLES == 4);
    assert!(BACKDROP_RAND_MAX > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn host_audio_rates() {
    assert!(INPUT_SAMPLE_RATE < OUTPUT_SAMPLE_RATE);
    assert!(ENV_MAP_URL.ends_with(".exr"));
}
