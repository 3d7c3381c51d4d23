use fnv::{FnvHashMap, FnvHashSet};
use glam::{Vec2, Vec3, Vec4};
use smallvec::SmallVec;
use std::fmt::Write as _;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ProgramError {
    #[error("uniform `{0}` declared twice")]
    DuplicateUniform(String),
    #[error("`{0}` is not a valid WGSL identifier")]
    InvalidUniformName(String),
    #[error("no uniform named `{0}`")]
    UnknownUniform(String),
    #[error("uniform `{name}` is {expected:?}, got {found:?}")]
    TypeMismatch {
        name: String,
        expected: UniformKind,
        found: UniformKind,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UniformKind {
    F32,
    Vec2,
    Vec3,
    Vec4,
}

impl UniformKind {
    pub fn size(self) -> usize {
        match self {
            UniformKind::F32 => 4,
            UniformKind::Vec2 => 8,
            UniformKind::Vec3 => 12,
            UniformKind::Vec4 => 16,
        }
    }

    pub fn align(self) -> usize {
        match self {
            UniformKind::F32 => 4,
            UniformKind::Vec2 => 8,
            UniformKind::Vec3 | UniformKind::Vec4 => 16,
        }
    }

    pub fn wgsl(self) -> &'static str {
        match self {
            UniformKind::F32 => "f32",
            UniformKind::Vec2 => "vec2<f32>",
            UniformKind::Vec3 => "vec3<f32>",
            UniformKind::Vec4 => "vec4<f32>",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    F32(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
}

impl UniformValue {
    pub fn kind(&self) -> UniformKind {
        match self {
            UniformValue::F32(_) => UniformKind::F32,
            UniformValue::Vec2(_) => UniformKind::Vec2,
            UniformValue::Vec3(_) => UniformKind::Vec3,
            UniformValue::Vec4(_) => UniformKind::Vec4,
        }
    }

    fn write_to(&self, dst: &mut [u8]) {
        match self {
            UniformValue::F32(v) => dst.copy_from_slice(bytemuck::bytes_of(v)),
            UniformValue::Vec2(v) => dst.copy_from_slice(bytemuck::bytes_of(&v.to_array())),
            UniformValue::Vec3(v) => dst.copy_from_slice(bytemuck::bytes_of(&v.to_array())),
            UniformValue::Vec4(v) => dst.copy_from_slice(bytemuck::bytes_of(&v.to_array())),
        }
    }

    fn read_from(kind: UniformKind, src: &[u8]) -> Self {
        let f = |i: usize| bytemuck::pod_read_unaligned::<f32>(&src[i * 4..i * 4 + 4]);
        match kind {
            UniformKind::F32 => UniformValue::F32(f(0)),
            UniformKind::Vec2 => UniformValue::Vec2(Vec2::new(f(0), f(1))),
            UniformKind::Vec3 => UniformValue::Vec3(Vec3::new(f(0), f(1), f(2))),
            UniformKind::Vec4 => UniformValue::Vec4(Vec4::new(f(0), f(1), f(2), f(3))),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UniformDecl {
    pub name: String,
    pub init: UniformValue,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UniformField {
    pub name: String,
    pub kind: UniformKind,
    pub offset: usize,
}

/// Byte layout of a WGSL uniform struct, in declaration order.
#[derive(Clone, Debug)]
pub struct UniformLayout {
    fields: SmallVec<[UniformField; 4]>,
    index: FnvHashMap<String, usize>,
    size: usize,
}

impl UniformLayout {
    fn from_decls(decls: &[UniformDecl]) -> Self {
        let mut fields = SmallVec::new();
        let mut index = FnvHashMap::default();
        let mut offset = 0usize;
        let mut struct_align = 16usize;
        for d in decls {
            let kind = d.init.kind();
            offset = round_up(offset, kind.align());
            index.insert(d.name.clone(), fields.len());
            fields.push(UniformField {
                name: d.name.clone(),
                kind,
                offset,
            });
            offset += kind.size();
            struct_align = struct_align.max(kind.align());
        }
        Self {
            fields,
            index,
            size: round_up(offset, struct_align),
        }
    }

    pub fn fields(&self) -> &[UniformField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&UniformField> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct UniformBlock {
    layout: UniformLayout,
    bytes: Vec<u8>,
}

impl UniformBlock {
    fn new(layout: UniformLayout) -> Self {
        let bytes = vec![0u8; layout.size()];
        Self { layout, bytes }
    }

    pub fn set(&mut self, name: &str, value: UniformValue) -> Result<(), ProgramError> {
        let field = self
            .layout
            .field(name)
            .ok_or_else(|| ProgramError::UnknownUniform(name.to_string()))?;
        if field.kind != value.kind() {
            return Err(ProgramError::TypeMismatch {
                name: name.to_string(),
                expected: field.kind,
                found: value.kind(),
            });
        }
        let range = field.offset..field.offset + field.kind.size();
        value.write_to(&mut self.bytes[range]);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<UniformValue> {
        let field = self.layout.field(name)?;
        let range = field.offset..field.offset + field.kind.size();
        Some(UniformValue::read_from(field.kind, &self.bytes[range]))
    }

    pub fn layout(&self) -> &UniformLayout {
        &self.layout
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Base description of a physically based material. Colors are linear RGB.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StandardMaterial {
    pub color: [f32; 3],
    pub metalness: f32,
    pub roughness: f32,
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    pub env_intensity: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniforms {
    pub base_color: [f32; 4],
    pub emissive: [f32; 4],
    pub params: [f32; 4],
}

impl StandardMaterial {
    pub fn uniforms(&self) -> MaterialUniforms {
        MaterialUniforms {
            base_color: [self.color[0], self.color[1], self.color[2], 1.0],
            emissive: [
                self.emissive[0],
                self.emissive[1],
                self.emissive[2],
                self.emissive_intensity,
            ],
            params: [self.metalness, self.roughness, self.env_intensity, 0.0],
        }
    }
}

/// Vertex and fragment WGSL for a material. Both stages are written against
/// the prelude emitted by `ShaderProgramBuilder` (bindings, `VertexIn`,
/// `VertexOut`) and must provide `vs_main` / `fs_main`.
#[derive(Clone, Copy, Debug)]
pub struct StageSources<'a> {
    pub vertex: &'a str,
    pub fragment: &'a str,
}

/// A material program assembled up front: base material, extra uniforms
/// and an optional vertex-stage override, all known before the pipeline is
/// created.
pub struct ShaderProgramBuilder<'a> {
    material: StandardMaterial,
    stages: StageSources<'a>,
    uniforms: SmallVec<[UniformDecl; 4]>,
}

pub struct ShaderProgram {
    pub material: StandardMaterial,
    pub source: String,
    pub extra: UniformBlock,
}

impl ShaderProgram {
    pub fn has_extra(&self) -> bool {
        !self.extra.layout().is_empty()
    }
}

impl<'a> ShaderProgramBuilder<'a> {
    pub fn new(material: StandardMaterial, stages: StageSources<'a>) -> Self {
        Self {
            material,
            stages,
            uniforms: SmallVec::new(),
        }
    }

    pub fn uniform(mut self, name: impl Into<String>, init: UniformValue) -> Self {
        self.uniforms.push(UniformDecl {
            name: name.into(),
            init,
        });
        self
    }

    pub fn vertex_stage(mut self, source: &'a str) -> Self {
        self.stages.vertex = source;
        self
    }

    pub fn build(self) -> Result<ShaderProgram, ProgramError> {
        let mut seen = FnvHashSet::default();
        for d in &self.uniforms {
            if !is_wgsl_identifier(&d.name) {
                return Err(ProgramError::InvalidUniformName(d.name.clone()));
            }
            if !seen.insert(d.name.as_str()) {
                return Err(ProgramError::DuplicateUniform(d.name.clone()));
            }
        }

        let layout = UniformLayout::from_decls(&self.uniforms);
        let mut extra = UniformBlock::new(layout);
        for d in &self.uniforms {
            extra.set(&d.name, d.init)?;
        }

        let mut source = prelude(&self.uniforms);
        source.push_str(self.stages.vertex);
        source.push('\n');
        source.push_str(self.stages.fragment);
        source.push('\n');

        Ok(ShaderProgram {
            material: self.material,
            source,
            extra,
        })
    }
}

fn prelude(decls: &[UniformDecl]) -> String {
    let mut s = String::new();
    s.push_str(
        "struct MeshUniforms {\n    view_proj: mat4x4<f32>,\n    model: mat4x4<f32>,\n    eye: vec4<f32>,\n};\n\n",
    );
    s.push_str(
        "struct MaterialUniforms {\n    base_color: vec4<f32>,\n    emissive: vec4<f32>,\n    params: vec4<f32>,\n};\n\n",
    );
    if !decls.is_empty() {
        s.push_str("struct ExtraUniforms {\n");
        for d in decls {
            _ = writeln!(s, "    {}: {},", d.name, d.init.kind().wgsl());
        }
        s.push_str("};\n\n");
    }
    s.push_str("@group(0) @binding(0) var<uniform> mesh: MeshUniforms;\n");
    s.push_str("@group(0) @binding(1) var<uniform> material: MaterialUniforms;\n");
    if !decls.is_empty() {
        s.push_str("@group(0) @binding(2) var<uniform> extra: ExtraUniforms;\n");
    }
    s.push_str("@group(1) @binding(0) var env_map: texture_2d<f32>;\n");
    s.push_str("@group(1) @binding(1) var env_sampler: sampler;\n\n");
    s.push_str(
        "struct VertexIn {\n    @location(0) position: vec3<f32>,\n    @location(1) normal: vec3<f32>,\n};\n\n",
    );
    s.push_str(
        "struct VertexOut {\n    @builtin(position) clip: vec4<f32>,\n    @location(0) world_pos: vec3<f32>,\n    @location(1) normal: vec3<f32>,\n};\n\n",
    );
    s
}

fn is_wgsl_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let first_ok = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    first_ok
        && name != "_"
        && !name.starts_with("__")
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[inline]
fn round_up(value: usize, align: usize) -> usize {
    value.div_ceil(align) * align
}

/// Convert a 0xRRGGBB sRGB hex color to linear RGB.
pub fn linear_rgb(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(16), channel(8), channel(0)]
}
