// Parse and validate every WGSL program the renderer builds, and check that
// uniform struct layouts agree with the CPU-side packing.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core {
    pub mod motion {
        include!("../src/core/motion.rs");
    }
    pub mod program {
        include!("../src/core/program.rs");
    }
    pub mod sphere {
        include!("../src/core/sphere.rs");
    }
}

use crate::core::program::*;
use crate::core::sphere::*;

const BACKDROP_WGSL: &str = include_str!("../shaders/backdrop.wgsl");
const POST_WGSL: &str = include_str!("../shaders/post.wgsl");
const STANDARD_VS_WGSL: &str = include_str!("../shaders/standard_vs.wgsl");
const STANDARD_FS_WGSL: &str = include_str!("../shaders/standard_fs.wgsl");
const SPHERE_VS_WGSL: &str = include_str!("../shaders/sphere_vs.wgsl");

const STANDARD: StageSources<'static> = StageSources {
    vertex: STANDARD_VS_WGSL,
    fragment: STANDARD_FS_WGSL,
};

fn validate(name: &str, source: &str) -> naga::Module {
    let module = naga::front::wgsl::parse_str(source)
        .unwrap_or_else(|err| panic!("{name} failed to parse: {}", err.emit_to_string(source)));
    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::default(),
    )
    .validate(&module)
    .unwrap_or_else(|err| panic!("{name} failed validation: {err:?}"));
    module
}

fn entry_points(module: &naga::Module) -> Vec<&str> {
    module.entry_points.iter().map(|ep| ep.name.as_str()).collect()
}

/// (member name, offset) pairs and total span of a named struct.
fn struct_layout(module: &naga::Module, name: &str) -> (Vec<(String, u32)>, u32) {
    module
        .types
        .iter()
        .find_map(|(_, ty)| match &ty.inner {
            naga::TypeInner::Struct { members, span } if ty.name.as_deref() == Some(name) => {
                Some((
                    members
                        .iter()
                        .map(|m| (m.name.clone().unwrap_or_default(), m.offset))
                        .collect(),
                    *span,
                ))
            }
            _ => None,
        })
        .unwrap_or_else(|| panic!("struct {name} not found"))
}

#[test]
fn backdrop_shader_is_valid() {
    let m = validate("backdrop", BACKDROP_WGSL);
    assert_eq!(entry_points(&m), vec!["vs_main", "fs_main"]);
    // view_proj + model + eye
    assert_eq!(struct_layout(&m, "MeshUniforms").1, 144);
    // resolution, rand, pad
    assert_eq!(struct_layout(&m, "BackdropUniforms").1, 16);
}

#[test]
fn post_shader_is_valid() {
    let m = validate("post", POST_WGSL);
    let eps = entry_points(&m);
    for ep in ["vs_fullscreen", "fs_bright", "fs_blur", "fs_composite"] {
        assert!(eps.contains(&ep), "missing {ep}");
    }
    assert_eq!(struct_layout(&m, "PostUniforms").1, 32);
}

#[test]
fn sphere_program_is_valid() {
    let p = sphere_program(STANDARD, SPHERE_VS_WGSL).unwrap();
    let m = validate("sphere", &p.source);
    assert_eq!(entry_points(&m), vec!["vs_main", "fs_main"]);
}

#[test]
fn standard_program_without_extras_is_valid() {
    let p = ShaderProgramBuilder::new(sphere_material(), STANDARD)
        .build()
        .unwrap();
    validate("standard", &p.source);
}

#[test]
fn displacement_stage_needs_its_uniforms() {
    let p = ShaderProgramBuilder::new(sphere_material(), STANDARD)
        .vertex_stage(SPHERE_VS_WGSL)
        .build()
        .unwrap();
    assert!(naga::front::wgsl::parse_str(&p.source).is_err());
}

#[test]
fn extra_uniform_layout_matches_wgsl() {
    let p = sphere_program(STANDARD, SPHERE_VS_WGSL).unwrap();
    let m = validate("sphere", &p.source);
    let (members, span) = struct_layout(&m, "ExtraUniforms");
    let cpu: Vec<(String, u32)> = p
        .extra
        .layout()
        .fields()
        .iter()
        .map(|f| (f.name.clone(), f.offset as u32))
        .collect();
    assert_eq!(members, cpu);
    assert_eq!(span as usize, p.extra.layout().size());
}

#[test]
fn mixed_extra_uniform_layout_matches_wgsl() {
    let p = ShaderProgramBuilder::new(sphere_material(), STANDARD)
        .uniform("a", UniformValue::F32(0.0))
        .uniform("b", UniformValue::Vec2(glam::Vec2::ZERO))
        .uniform("c", UniformValue::Vec3(glam::Vec3::ZERO))
        .uniform("d", UniformValue::F32(0.0))
        .uniform("e", UniformValue::Vec4(glam::Vec4::ZERO))
        .build()
        .unwrap();
    let m = validate("mixed", &p.source);
    let (members, span) = struct_layout(&m, "ExtraUniforms");
    let cpu: Vec<(String, u32)> = p
        .extra
        .layout()
        .fields()
        .iter()
        .map(|f| (f.name.clone(), f.offset as u32))
        .collect();
    assert_eq!(members, cpu);
    assert_eq!(span as usize, p.extra.layout().size());
}

#[test]
fn material_uniforms_match_wgsl_span() {
    let p = sphere_program(STANDARD, SPHERE_VS_WGSL).unwrap();
    let m = validate("sphere", &p.source);
    let (_, span) = struct_layout(&m, "MaterialUniforms");
    assert_eq!(span as usize, std::mem::size_of::<MaterialUniforms>());
}
