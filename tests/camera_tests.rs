// Host-side tests for camera and viewport math.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod camera {
    include!("../src/core/camera.rs");
}

use camera::*;
use constants::*;
use glam::{Vec3, Vec4};

#[test]
fn aspect_is_exact_width_over_height() {
    let v = Viewport::new(1280.0, 720.0, 2.0).unwrap();
    assert_eq!(v.aspect(), 1280.0 / 720.0);
}

#[test]
fn resolution_is_css_size_times_pixel_ratio() {
    let v = Viewport::new(800.0, 600.0, 1.5).unwrap();
    let r = v.resolution();
    assert_eq!(r.x, 1200.0);
    assert_eq!(r.y, 900.0);
    assert_eq!(v.backing_size(MAX_SURFACE_DIMENSION), (1200, 900));
}

#[test]
fn collapsed_viewport_is_rejected() {
    assert!(Viewport::new(0.0, 600.0, 1.0).is_none());
    assert!(Viewport::new(800.0, 0.0, 1.0).is_none());
    assert!(Viewport::new(-5.0, 10.0, 1.0).is_none());
}

#[test]
fn bogus_pixel_ratio_falls_back_to_one() {
    let v = Viewport::new(100.0, 50.0, 0.0).unwrap();
    assert_eq!(v.pixel_ratio, 1.0);
    let v = Viewport::new(100.0, 50.0, -2.0).unwrap();
    assert_eq!(v.pixel_ratio, 1.0);
}

#[test]
fn tiny_viewport_never_yields_zero_backing_size() {
    let v = Viewport::new(0.2, 0.2, 1.0).unwrap();
    assert_eq!(v.backing_size(MAX_SURFACE_DIMENSION), (1, 1));
}

#[test]
fn oversized_backing_store_is_capped_keeping_aspect() {
    let v = Viewport::new(9600.0, 4800.0, 2.0).unwrap();
    assert_eq!(v.backing_size(8192), (8192, 4096));
    let v = Viewport::new(1000.0, 5000.0, 3.0).unwrap();
    assert_eq!(v.backing_size(8192), (1638, 8192));
}

#[test]
fn repeated_resizes_never_exceed_texture_limit() {
    // Feeding each backing size back in as the next CSS size stays bounded.
    let mut v = Viewport::new(300.0, 150.0, 2.0).unwrap();
    for _ in 0..10 {
        let (w, h) = v.backing_size(MAX_SURFACE_DIMENSION);
        assert!(w <= MAX_SURFACE_DIMENSION && h <= MAX_SURFACE_DIMENSION);
        v = Viewport::new(w as f32, h as f32, 2.0).unwrap();
    }
    assert_eq!(v.backing_size(MAX_SURFACE_DIMENSION), (8192, 4096));
}

#[test]
fn zero_limit_still_yields_a_pixel() {
    let v = Viewport::new(800.0, 600.0, 1.0).unwrap();
    assert_eq!(v.backing_size(0), (1, 1));
}

#[test]
fn camera_defaults_match_scene_setup() {
    let c = PerspectiveCamera::new(16.0 / 9.0);
    assert_eq!(c.eye, Vec3::new(0.0, 0.0, 5.0));
    assert_eq!(c.target, Vec3::ZERO);
    assert!((c.fovy_radians - 75f32.to_radians()).abs() < 1e-6);
    assert_eq!(c.znear, CAMERA_NEAR);
    assert_eq!(c.zfar, CAMERA_FAR);
}

#[test]
fn origin_projects_to_screen_center_from_any_orbit_position() {
    let mut c = PerspectiveCamera::new(1.5);
    for eye in [
        Vec3::new(0.0, 0.0, 5.0),
        Vec3::new(3.0, 4.0, 0.0),
        Vec3::new(-2.0, 1.0, -4.5),
    ] {
        c.look_at(eye, Vec3::ZERO);
        let clip = c.view_proj() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5, "eye {eye:?}");
        assert!((0.0..=1.0).contains(&ndc.z));
    }
}

#[test]
fn changing_aspect_changes_horizontal_scale_only() {
    let mut c = PerspectiveCamera::new(1.0);
    let p1 = c.projection_matrix();
    c.aspect = 2.0;
    let p2 = c.projection_matrix();
    assert!((p1.x_axis.x / p2.x_axis.x - 2.0).abs() < 1e-5);
    assert_eq!(p1.y_axis.y, p2.y_axis.y);
}
