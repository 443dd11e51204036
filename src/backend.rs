//! The slice of the GL API that shader programs are built from.
//!
//! [`GlBackend`] mirrors the [`glow::HasContext`] methods this crate calls,
//! with the same names and the same safety contract. It is implemented for
//! [`glow::Context`]; the indirection exists so the compile/link pipeline
//! can run against a scripted context in tests. [`GlBackend::uniform`] is
//! the one provided method: it picks the `glUniform*` entry point for a
//! [`UniformData`] value, so every backend shares the same dispatch.

use std::fmt::Debug;

use glow::HasContext;

use crate::uniform::UniformData;

/// GL entry points used by [`ShaderProgram`](crate::ShaderProgram) and
/// [`CompiledStage`](crate::CompiledStage).
///
/// # Safety
///
/// Every method requires a valid context that is current on the calling
/// thread.
#[allow(missing_docs, clippy::missing_safety_doc)]
pub trait GlBackend {
    /// Shader object name.
    type Shader: Copy + Debug;
    /// Program object name.
    type Program: Copy + Debug + PartialEq;
    /// Resolved uniform location.
    type UniformLocation: Clone + Debug;

    unsafe fn create_shader(&self, shader_type: u32) -> Result<Self::Shader, String>;
    unsafe fn shader_source(&self, shader: Self::Shader, source: &str);
    unsafe fn compile_shader(&self, shader: Self::Shader);
    unsafe fn get_shader_compile_status(&self, shader: Self::Shader) -> bool;
    unsafe fn get_shader_info_log(&self, shader: Self::Shader) -> String;
    unsafe fn delete_shader(&self, shader: Self::Shader);

    unsafe fn create_program(&self) -> Result<Self::Program, String>;
    unsafe fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    unsafe fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    unsafe fn link_program(&self, program: Self::Program);
    unsafe fn get_program_link_status(&self, program: Self::Program) -> bool;
    unsafe fn get_program_info_log(&self, program: Self::Program) -> String;
    unsafe fn delete_program(&self, program: Self::Program);
    unsafe fn use_program(&self, program: Option<Self::Program>);

    unsafe fn get_uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation>;

    unsafe fn uniform_1_i32(&self, location: &Self::UniformLocation, x: i32);
    unsafe fn uniform_2_i32(&self, location: &Self::UniformLocation, x: i32, y: i32);
    unsafe fn uniform_3_i32(&self, location: &Self::UniformLocation, x: i32, y: i32, z: i32);
    unsafe fn uniform_4_i32(
        &self,
        location: &Self::UniformLocation,
        x: i32,
        y: i32,
        z: i32,
        w: i32,
    );
    unsafe fn uniform_1_u32(&self, location: &Self::UniformLocation, x: u32);
    unsafe fn uniform_1_f32(&self, location: &Self::UniformLocation, x: f32);
    unsafe fn uniform_2_f32(&self, location: &Self::UniformLocation, x: f32, y: f32);
    unsafe fn uniform_3_f32(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32);
    unsafe fn uniform_4_f32(
        &self,
        location: &Self::UniformLocation,
        x: f32,
        y: f32,
        z: f32,
        w: f32,
    );
    /// Column-major, never transposed.
    unsafe fn uniform_matrix_3_f32_slice(&self, location: &Self::UniformLocation, v: &[f32]);
    /// Column-major, never transposed.
    unsafe fn uniform_matrix_4_f32_slice(&self, location: &Self::UniformLocation, v: &[f32]);

    /// Write `data` to `location` in the currently bound program.
    unsafe fn uniform(&self, location: &Self::UniformLocation, data: UniformData) {
        let loc = location;
        unsafe {
            match data {
                UniformData::Int(x) => self.uniform_1_i32(loc, x),
                UniformData::UInt(x) => self.uniform_1_u32(loc, x),
                UniformData::Float(x) => self.uniform_1_f32(loc, x),
                UniformData::Vec2([x, y]) => self.uniform_2_f32(loc, x, y),
                UniformData::Vec3([x, y, z]) => self.uniform_3_f32(loc, x, y, z),
                UniformData::Vec4([x, y, z, w]) => self.uniform_4_f32(loc, x, y, z, w),
                UniformData::IVec2([x, y]) => self.uniform_2_i32(loc, x, y),
                UniformData::IVec3([x, y, z]) => self.uniform_3_i32(loc, x, y, z),
                UniformData::IVec4([x, y, z, w]) => self.uniform_4_i32(loc, x, y, z, w),
                UniformData::Mat3(m) => self.uniform_matrix_3_f32_slice(loc, &m),
                UniformData::Mat4(m) => self.uniform_matrix_4_f32_slice(loc, &m),
            }
        }
    }

    unsafe fn polygon_mode(&self, face: u32, mode: u32);
}

impl GlBackend for glow::Context {
    type Shader = glow::Shader;
    type Program = glow::Program;
    type UniformLocation = glow::UniformLocation;

    unsafe fn create_shader(&self, shader_type: u32) -> Result<Self::Shader, String> {
        unsafe { HasContext::create_shader(self, shader_type) }
    }

    unsafe fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { HasContext::shader_source(self, shader, source) }
    }

    unsafe fn compile_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::compile_shader(self, shader) }
    }

    unsafe fn get_shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { HasContext::get_shader_compile_status(self, shader) }
    }

    unsafe fn get_shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { HasContext::get_shader_info_log(self, shader) }
    }

    unsafe fn delete_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::delete_shader(self, shader) }
    }

    unsafe fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { HasContext::create_program(self) }
    }

    unsafe fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::attach_shader(self, program, shader) }
    }

    unsafe fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::detach_shader(self, program, shader) }
    }

    unsafe fn link_program(&self, program: Self::Program) {
        unsafe { HasContext::link_program(self, program) }
    }

    unsafe fn get_program_link_status(&self, program: Self::Program) -> bool {
        unsafe { HasContext::get_program_link_status(self, program) }
    }

    unsafe fn get_program_info_log(&self, program: Self::Program) -> String {
        unsafe { HasContext::get_program_info_log(self, program) }
    }

    unsafe fn delete_program(&self, program: Self::Program) {
        unsafe { HasContext::delete_program(self, program) }
    }

    unsafe fn use_program(&self, program: Option<Self::Program>) {
        unsafe { HasContext::use_program(self, program) }
    }

    unsafe fn get_uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { HasContext::get_uniform_location(self, program, name) }
    }

    unsafe fn uniform_1_i32(&self, location: &Self::UniformLocation, x: i32) {
        unsafe { HasContext::uniform_1_i32(self, Some(location), x) }
    }

    unsafe fn uniform_2_i32(&self, location: &Self::UniformLocation, x: i32, y: i32) {
        unsafe { HasContext::uniform_2_i32(self, Some(location), x, y) }
    }

    unsafe fn uniform_3_i32(&self, location: &Self::UniformLocation, x: i32, y: i32, z: i32) {
        unsafe { HasContext::uniform_3_i32(self, Some(location), x, y, z) }
    }

    unsafe fn uniform_4_i32(
        &self,
        location: &Self::UniformLocation,
        x: i32,
        y: i32,
        z: i32,
        w: i32,
    ) {
        unsafe { HasContext::uniform_4_i32(self, Some(location), x, y, z, w) }
    }

    unsafe fn uniform_1_u32(&self, location: &Self::UniformLocation, x: u32) {
        unsafe { HasContext::uniform_1_u32(self, Some(location), x) }
    }

    unsafe fn uniform_1_f32(&self, location: &Self::UniformLocation, x: f32) {
        unsafe { HasContext::uniform_1_f32(self, Some(location), x) }
    }

    unsafe fn uniform_2_f32(&self, location: &Self::UniformLocation, x: f32, y: f32) {
        unsafe { HasContext::uniform_2_f32(self, Some(location), x, y) }
    }

    unsafe fn uniform_3_f32(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32) {
        unsafe { HasContext::uniform_3_f32(self, Some(location), x, y, z) }
    }

    unsafe fn uniform_4_f32(
        &self,
        location: &Self::UniformLocation,
        x: f32,
        y: f32,
        z: f32,
        w: f32,
    ) {
        unsafe { HasContext::uniform_4_f32(self, Some(location), x, y, z, w) }
    }

    unsafe fn uniform_matrix_3_f32_slice(&self, location: &Self::UniformLocation, v: &[f32]) {
        unsafe { HasContext::uniform_matrix_3_f32_slice(self, Some(location), false, v) }
    }

    unsafe fn uniform_matrix_4_f32_slice(&self, location: &Self::UniformLocation, v: &[f32]) {
        unsafe { HasContext::uniform_matrix_4_f32_slice(self, Some(location), false, v) }
    }

    unsafe fn polygon_mode(&self, face: u32, mode: u32) {
        unsafe { HasContext::polygon_mode(self, face, mode) }
    }
}
