use super::motion::FrameUniforms;
use super::program::{
    linear_rgb, ProgramError, ShaderProgram, ShaderProgramBuilder, StageSources,
    StandardMaterial, UniformBlock, UniformValue,
};
use crate::constants::*;
use glam::Vec4;

pub const UNIFORM_TIME: &str = "time";
pub const UNIFORM_INPUT_DATA: &str = "input_data";
pub const UNIFORM_OUTPUT_DATA: &str = "output_data";

pub fn sphere_material() -> StandardMaterial {
    StandardMaterial {
        color: linear_rgb(SPHERE_BASE_HEX),
        metalness: SPHERE_METALNESS,
        roughness: SPHERE_ROUGHNESS,
        emissive: linear_rgb(SPHERE_EMISSIVE_HEX),
        emissive_intensity: SPHERE_EMISSIVE_INTENSITY,
        env_intensity: 1.0,
    }
}

/// The reactive sphere's program: the standard material stages with the
/// vertex stage swapped for the audio displacement, plus the three
/// animated uniforms, all zeroed.
pub fn sphere_program(
    standard: StageSources<'_>,
    displacement_vs: &str,
) -> Result<ShaderProgram, ProgramError> {
    ShaderProgramBuilder::new(sphere_material(), standard)
        .uniform(UNIFORM_TIME, UniformValue::F32(0.0))
        .uniform(UNIFORM_INPUT_DATA, UniformValue::Vec4(Vec4::ZERO))
        .uniform(UNIFORM_OUTPUT_DATA, UniformValue::Vec4(Vec4::ZERO))
        .vertex_stage(displacement_vs)
        .build()
}

/// Copy one frame's animated values into the sphere's uniform block.
pub fn apply_frame_uniforms(
    block: &mut UniformBlock,
    frame: &FrameUniforms,
) -> Result<(), ProgramError> {
    block.set(UNIFORM_TIME, UniformValue::F32(frame.time))?;
    block.set(UNIFORM_INPUT_DATA, UniformValue::Vec4(frame.input_data))?;
    block.set(UNIFORM_OUTPUT_DATA, UniformValue::Vec4(frame.output_data))
}
