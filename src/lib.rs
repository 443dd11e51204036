//! Owning OpenGL shader programs on top of [glow].
//!
//! This crate turns a vertex and a fragment source into a single bindable
//! program and gives it a typed, name-based uniform interface:
//!
//! - [`ShaderSource`] holds the two source texts, inline or read from disk
//!   (`<dir>/<name>.verts` and `<dir>/<name>.frags`).
//! - [`CompiledStage`] compiles one stage and owns the shader object.
//! - [`ShaderProgram`] links stages, reports [`ShaderError`] diagnostics,
//!   binds with [`use_program`](ShaderProgram::use_program), writes
//!   uniforms with [`set_uniform`](ShaderProgram::set_uniform), and deletes
//!   the program exactly once.
//! - [`PolygonMode`] is the wireframe toggle a render loop owns.
//!
//! # Features
//!
//! - **`glam`**: [`UniformValue`] impls for `glam` vectors and matrices.
//!
//! # Safety
//!
//! Creating a [`CompiledStage`] or [`ShaderProgram`] requires a valid,
//! current OpenGL context that stays current until the object is dropped.
//! The constructors are `unsafe` for that reason; the methods on a live
//! object are safe.
//!
//! # Binding state
//!
//! [`ShaderProgram::set_uniform`] binds its own program before writing and
//! leaves it bound, replacing whatever program the host had current.
//! Re-bind with [`use_program`](ShaderProgram::use_program) before drawing
//! with another program. Writes to a name the program does not have bind
//! nothing.
//!
//! # Logging
//!
//! Diagnostics go through the [log] facade. No logger is installed by this
//! crate.
//!
//! [glow]: https://docs.rs/glow
//! [log]: https://docs.rs/log

mod backend;
mod error;
#[cfg(test)]
mod fake;
mod program;
pub mod shaders;
mod source;
mod stage;
mod state;
mod uniform;

pub use backend::GlBackend;
pub use error::ShaderError;
pub use program::{ProgramStatus, ShaderProgram};
pub use source::{glsl_version, stage_path, ShaderSource};
pub use stage::{CompiledStage, ShaderStage};
pub use state::PolygonMode;
pub use uniform::{UniformData, UniformValue};
