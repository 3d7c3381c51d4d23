// Host-side tests for icosphere generation.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod geometry {
    include!("../src/core/geometry.rs");
}

use geometry::*;
use glam::Vec3;

fn tri(verts: &[MeshVertex], i: usize) -> [Vec3; 3] {
    [
        Vec3::from_array(verts[i * 3].position),
        Vec3::from_array(verts[i * 3 + 1].position),
        Vec3::from_array(verts[i * 3 + 2].position),
    ]
}

#[test]
fn vertex_counts_follow_subdivision() {
    assert_eq!(icosphere_vertex_count(0), 60);
    assert_eq!(icosphere(1.0, 0).len(), 60);
    assert_eq!(icosphere(1.0, 1).len(), 240);
    assert_eq!(icosphere(1.0, 10).len(), 20 * 121 * 3);
    assert_eq!(icosphere(10.0, 5).len(), icosphere_vertex_count(5));
}

#[test]
fn every_vertex_lies_on_the_sphere() {
    for (radius, detail) in [(1.0f32, 10u32), (10.0, 5)] {
        for v in icosphere(radius, detail) {
            let p = Vec3::from_array(v.position);
            assert!((p.length() - radius).abs() < 1e-4 * radius);
        }
    }
}

#[test]
fn normals_are_unit_and_radial() {
    for v in icosphere(2.5, 3) {
        let p = Vec3::from_array(v.position);
        let n = Vec3::from_array(v.normal);
        assert!((n.length() - 1.0).abs() < 1e-5);
        assert!(n.dot(p.normalize()) > 0.9999);
    }
}

#[test]
fn triangles_wind_counter_clockwise_from_outside() {
    let verts = icosphere(1.0, 4);
    for i in 0..verts.len() / 3 {
        let [a, b, c] = tri(&verts, i);
        let face_normal = (b - a).cross(c - a);
        let centroid = (a + b + c) / 3.0;
        assert!(face_normal.dot(centroid) > 0.0, "triangle {i} faces inward");
    }
}

#[test]
fn no_degenerate_triangles() {
    let verts = icosphere(1.0, 10);
    for i in 0..verts.len() / 3 {
        let [a, b, c] = tri(&verts, i);
        assert!((b - a).cross(c - a).length() > 1e-6, "triangle {i} is degenerate");
    }
}
