use crate::constants::*;
use glam::{Mat4, Vec2, Vec3};

/// Right-handed perspective camera looking at a target.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl PerspectiveCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_DISTANCE),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    pub fn look_at(&mut self, eye: Vec3, target: Vec3) {
        self.eye = eye;
        self.target = target;
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Drawing surface size in CSS pixels plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub css_width: f32,
    pub css_height: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    /// `None` for a collapsed surface (zero or negative extent), which
    /// resize handling ignores.
    pub fn new(css_width: f32, css_height: f32, pixel_ratio: f32) -> Option<Self> {
        if css_width <= 0.0 || css_height <= 0.0 {
            return None;
        }
        let pixel_ratio = if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
        Some(Self {
            css_width,
            css_height,
            pixel_ratio,
        })
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.css_width / self.css_height
    }

    /// Physical pixel resolution fed to full-screen shaders.
    #[inline]
    pub fn resolution(&self) -> Vec2 {
        Vec2::new(
            self.css_width * self.pixel_ratio,
            self.css_height * self.pixel_ratio,
        )
    }

    /// Canvas backing store size in whole pixels, never zero. When either side
    /// would exceed `max_dim` both sides shrink by the same factor.
    pub fn backing_size(&self, max_dim: u32) -> (u32, u32) {
        let r = self.resolution();
        let max_dim = max_dim.max(1);
        let limit = max_dim as f32;
        let longest = r.x.max(r.y);
        let (w, h) = if longest <= limit {
            (r.x, r.y)
        } else if r.x >= r.y {
            (limit, r.y / longest * limit)
        } else {
            (r.x / longest * limit, limit)
        };
        let clamp = |v: f32| (v as u32).clamp(1, max_dim);
        (clamp(w), clamp(h))
    }
}
