//! A scripted [`GlBackend`] for unit tests.
//!
//! Compilation and linking follow a few textual rules instead of a real
//! GLSL front end:
//!
//! - a stage compiles if it has a `main` and balanced `()` / `{}`;
//! - a program links if it has one vertex and one fragment stage, both
//!   compiled, and every fragment `in` has a matching vertex `out`;
//! - active uniforms are the `uniform` declarations of the attached stages.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::backend::GlBackend;
use crate::uniform::UniformData;

/// A recorded call that tests assert on.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    GetUniformLocation(u32, String),
    /// Program, uniform name, `glUniform*` entry point, value.
    Uniform(u32, String, &'static str, UniformData),
    PolygonMode(u32, u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeLocation {
    program: u32,
    name: String,
}

struct FakeShader {
    shader_type: u32,
    source: String,
    compiled: bool,
}

#[derive(Default)]
struct FakeProgram {
    attached: Vec<u32>,
    linked: bool,
    log: String,
    uniforms: Vec<String>,
    values: HashMap<String, UniformData>,
}

#[derive(Default)]
struct Inner {
    next_id: u32,
    shaders: HashMap<u32, FakeShader>,
    programs: HashMap<u32, FakeProgram>,
    current: Option<u32>,
    shaders_created: usize,
    calls: Vec<Call>,
}

impl Inner {
    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct FakeGl {
    inner: Mutex<Inner>,
}

impl FakeGl {
    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("fake GL state poisoned")
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner().calls.clone()
    }

    pub fn shaders_created(&self) -> usize {
        self.inner().shaders_created
    }

    pub fn live_shaders(&self) -> usize {
        self.inner().shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.inner().programs.len()
    }

    pub fn current_program(&self) -> Option<u32> {
        self.inner().current
    }

    pub fn program_deletes(&self, program: u32) -> usize {
        self.inner()
            .calls
            .iter()
            .filter(|call| **call == Call::DeleteProgram(program))
            .count()
    }

    pub fn location_queries(&self) -> usize {
        self.inner()
            .calls
            .iter()
            .filter(|call| matches!(call, Call::GetUniformLocation(..)))
            .count()
    }

    pub fn uniform_writes(&self) -> usize {
        self.inner()
            .calls
            .iter()
            .filter(|call| matches!(call, Call::Uniform(..)))
            .count()
    }

    pub fn uniform_value(&self, program: u32, name: &str) -> Option<UniformData> {
        self.inner().programs.get(&program)?.values.get(name).copied()
    }

    fn record(&self, location: &FakeLocation, entry_point: &'static str, data: UniformData) {
        let mut inner = self.inner();
        // GL writes to the bound program; a location from another program is
        // an INVALID_OPERATION and changes nothing.
        if inner.current != Some(location.program) {
            return;
        }
        if let Some(p) = inner.programs.get_mut(&location.program) {
            p.values.insert(location.name.clone(), data);
        }
        inner.calls.push(Call::Uniform(
            location.program,
            location.name.clone(),
            entry_point,
            data,
        ));
    }
}

fn balanced(source: &str, open: char, close: char) -> bool {
    let mut depth = 0_i32;
    for c in source.chars() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth < 0 {
                return false;
            }
        }
    }
    depth == 0
}

/// Names declared with `qualifier` (`in`, `out`, `uniform`), ignoring any
/// leading `layout(...)`.
fn declarations<'a>(source: &'a str, qualifier: &'a str) -> impl Iterator<Item = String> + 'a {
    source.lines().filter_map(move |line| {
        let mut line = line.trim();
        if line.starts_with("layout") {
            line = line[line.find(')')? + 1..].trim_start();
        }
        let mut words = line.split_whitespace();
        if words.next()? != qualifier {
            return None;
        }
        let _ty = words.next()?;
        let name = words.next()?.trim_end_matches(';');
        let name = name.split('[').next().unwrap_or(name);
        Some(name.to_owned())
    })
}

impl GlBackend for FakeGl {
    type Shader = u32;
    type Program = u32;
    type UniformLocation = FakeLocation;

    unsafe fn create_shader(&self, shader_type: u32) -> Result<u32, String> {
        let mut inner = self.inner();
        let id = inner.next_id();
        inner.shaders_created += 1;
        inner.shaders.insert(
            id,
            FakeShader {
                shader_type,
                source: String::new(),
                compiled: false,
            },
        );
        Ok(id)
    }

    unsafe fn shader_source(&self, shader: u32, source: &str) {
        if let Some(s) = self.inner().shaders.get_mut(&shader) {
            source.clone_into(&mut s.source);
        }
    }

    unsafe fn compile_shader(&self, shader: u32) {
        if let Some(s) = self.inner().shaders.get_mut(&shader) {
            s.compiled = s.source.contains("main")
                && balanced(&s.source, '(', ')')
                && balanced(&s.source, '{', '}');
        }
    }

    unsafe fn get_shader_compile_status(&self, shader: u32) -> bool {
        self.inner().shaders.get(&shader).is_some_and(|s| s.compiled)
    }

    unsafe fn get_shader_info_log(&self, shader: u32) -> String {
        match self.inner().shaders.get(&shader) {
            Some(s) if !s.compiled => {
                "0:1(1): error: syntax error, unexpected end of file\n".to_owned()
            }
            _ => String::new(),
        }
    }

    unsafe fn delete_shader(&self, shader: u32) {
        self.inner().shaders.remove(&shader);
    }

    unsafe fn create_program(&self) -> Result<u32, String> {
        let mut inner = self.inner();
        let id = inner.next_id();
        inner.programs.insert(id, FakeProgram::default());
        Ok(id)
    }

    unsafe fn attach_shader(&self, program: u32, shader: u32) {
        if let Some(p) = self.inner().programs.get_mut(&program) {
            p.attached.push(shader);
        }
    }

    unsafe fn detach_shader(&self, program: u32, shader: u32) {
        if let Some(p) = self.inner().programs.get_mut(&program) {
            p.attached.retain(|s| *s != shader);
        }
    }

    unsafe fn link_program(&self, program: u32) {
        let mut inner = self.inner();
        let Inner {
            shaders, programs, ..
        } = &mut *inner;
        let Some(p) = programs.get_mut(&program) else {
            return;
        };

        let stages: Vec<&FakeShader> = p.attached.iter().filter_map(|id| shaders.get(id)).collect();
        let of_type = |ty| stages.iter().filter(|s| s.shader_type == ty).collect::<Vec<_>>();
        let vertex = of_type(glow::VERTEX_SHADER);
        let fragment = of_type(glow::FRAGMENT_SHADER);

        p.log = if stages.iter().any(|s| !s.compiled) {
            "error: linking with uncompiled shader".to_owned()
        } else if vertex.len() != 1 || fragment.len() != 1 {
            "error: program needs one vertex and one fragment shader".to_owned()
        } else {
            let outs: Vec<String> = declarations(&vertex[0].source, "out").collect();
            declarations(&fragment[0].source, "in")
                .find(|name| !outs.contains(name))
                .map(|name| {
                    format!("error: fragment shader input `{name}` has no matching vertex output")
                })
                .unwrap_or_default()
        };
        p.linked = p.log.is_empty();
        p.uniforms = stages
            .iter()
            .flat_map(|s| declarations(&s.source, "uniform"))
            .collect();
    }

    unsafe fn get_program_link_status(&self, program: u32) -> bool {
        self.inner().programs.get(&program).is_some_and(|p| p.linked)
    }

    unsafe fn get_program_info_log(&self, program: u32) -> String {
        self.inner()
            .programs
            .get(&program)
            .map(|p| p.log.clone())
            .unwrap_or_default()
    }

    unsafe fn delete_program(&self, program: u32) {
        let mut inner = self.inner();
        inner.programs.remove(&program);
        inner.calls.push(Call::DeleteProgram(program));
    }

    unsafe fn use_program(&self, program: Option<u32>) {
        let mut inner = self.inner();
        inner.current = program;
        inner.calls.push(Call::UseProgram(program));
    }

    unsafe fn get_uniform_location(&self, program: u32, name: &str) -> Option<FakeLocation> {
        let mut inner = self.inner();
        inner
            .calls
            .push(Call::GetUniformLocation(program, name.to_owned()));
        let p = inner.programs.get(&program)?;
        (p.linked && p.uniforms.iter().any(|u| u == name)).then(|| FakeLocation {
            program,
            name: name.to_owned(),
        })
    }

    unsafe fn uniform_1_i32(&self, location: &FakeLocation, x: i32) {
        self.record(location, "uniform_1_i32", UniformData::Int(x));
    }

    unsafe fn uniform_2_i32(&self, location: &FakeLocation, x: i32, y: i32) {
        self.record(location, "uniform_2_i32", UniformData::IVec2([x, y]));
    }

    unsafe fn uniform_3_i32(&self, location: &FakeLocation, x: i32, y: i32, z: i32) {
        self.record(location, "uniform_3_i32", UniformData::IVec3([x, y, z]));
    }

    unsafe fn uniform_4_i32(&self, location: &FakeLocation, x: i32, y: i32, z: i32, w: i32) {
        self.record(location, "uniform_4_i32", UniformData::IVec4([x, y, z, w]));
    }

    unsafe fn uniform_1_u32(&self, location: &FakeLocation, x: u32) {
        self.record(location, "uniform_1_u32", UniformData::UInt(x));
    }

    unsafe fn uniform_1_f32(&self, location: &FakeLocation, x: f32) {
        self.record(location, "uniform_1_f32", UniformData::Float(x));
    }

    unsafe fn uniform_2_f32(&self, location: &FakeLocation, x: f32, y: f32) {
        self.record(location, "uniform_2_f32", UniformData::Vec2([x, y]));
    }

    unsafe fn uniform_3_f32(&self, location: &FakeLocation, x: f32, y: f32, z: f32) {
        self.record(location, "uniform_3_f32", UniformData::Vec3([x, y, z]));
    }

    unsafe fn uniform_4_f32(&self, location: &FakeLocation, x: f32, y: f32, z: f32, w: f32) {
        self.record(location, "uniform_4_f32", UniformData::Vec4([x, y, z, w]));
    }

    unsafe fn uniform_matrix_3_f32_slice(&self, location: &FakeLocation, v: &[f32]) {
        if let Ok(m) = v.try_into() {
            self.record(location, "uniform_matrix_3_f32_slice", UniformData::Mat3(m));
        }
    }

    unsafe fn uniform_matrix_4_f32_slice(&self, location: &FakeLocation, v: &[f32]) {
        if let Ok(m) = v.try_into() {
            self.record(location, "uniform_matrix_4_f32_slice", UniformData::Mat4(m));
        }
    }

    unsafe fn polygon_mode(&self, face: u32, mode: u32) {
        self.inner().calls.push(Call::PolygonMode(face, mode));
    }
}
