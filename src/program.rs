//! The owning, linked shader program.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::mem;
use std::sync::Arc;

use crate::backend::GlBackend;
use crate::error::ShaderError;
use crate::source::ShaderSource;
use crate::stage::{CompiledStage, ShaderStage};
use crate::uniform::UniformValue;

/// Lifecycle of a [`ShaderProgram`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramStatus {
    /// Linked and usable for drawing.
    Linked,
    /// Compilation or linking failed; see
    /// [`diagnostic`](ShaderProgram::diagnostic).
    Failed,
    /// Released with [`destroy`](ShaderProgram::destroy).
    Destroyed,
}

enum ProgramState<P> {
    Linked(P),
    Failed(ShaderError),
    Destroyed,
}

/// A linked GPU program built from a vertex and a fragment stage.
///
/// A program is either linked and usable, or carries the [`ShaderError`]
/// that explains why it is not. The program object is released exactly once,
/// by [`destroy`](Self::destroy) or on drop.
///
/// # Example
///
/// ```no_run
/// # use std::sync::Arc;
/// # use gl_shader_program::{shaders, ShaderProgram, ShaderSource};
/// # fn example(gl: Arc<glow::Context>) -> Result<(), gl_shader_program::ShaderError> {
/// let source = ShaderSource::new(shaders::COLOR_VERTEX_SRC, shaders::COLOR_FRAGMENT_SRC);
/// let program = unsafe { ShaderProgram::new(gl, &source)? };
///
/// program.set_uniform("uOffset", [0.25_f32, 0.0, 0.0]);
/// program.set_uniform("uAlpha", 1.0_f32);
/// program.use_program();
/// // ... bind a vertex array and draw ...
/// # Ok(())
/// # }
/// ```
pub struct ShaderProgram<B: GlBackend = glow::Context> {
    gl: Arc<B>,
    state: ProgramState<B::Program>,
    /// Resolved locations by name. `None` records a name the program does
    /// not have, so the driver is asked only once.
    uniforms: RefCell<HashMap<String, Option<B::UniformLocation>>>,
}

impl<B: GlBackend> ShaderProgram<B> {
    /// Compile both stages of `source` and link them.
    ///
    /// # Safety
    ///
    /// The context behind `gl` must be current on this thread, and must stay
    /// current for as long as the returned program (or any clone of `gl` it
    /// holds) is alive, including when it is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError::Compile`] for the first stage that fails,
    /// [`ShaderError::Link`] if the stages do not link, or
    /// [`ShaderError::Create`] if the driver cannot allocate an object.
    pub unsafe fn new(gl: Arc<B>, source: &ShaderSource) -> Result<Self, ShaderError> {
        let vs = unsafe { CompiledStage::compile(&gl, ShaderStage::Vertex, source.vertex()) }?;
        let fs = unsafe { CompiledStage::compile(&gl, ShaderStage::Fragment, source.fragment()) }?;
        unsafe { Self::link(gl, &[&vs, &fs]) }
    }

    /// Like [`new`](Self::new), but never fails: on error the diagnostic is
    /// logged and kept, and the returned program reports
    /// [`ProgramStatus::Failed`].
    ///
    /// # Safety
    ///
    /// Same as [`new`](Self::new).
    pub unsafe fn build(gl: Arc<B>, source: &ShaderSource) -> Self {
        match unsafe { Self::new(Arc::clone(&gl), source) } {
            Ok(program) => program,
            Err(err) => {
                log::error!("{err}");
                Self::from_state(gl, ProgramState::Failed(err))
            }
        }
    }

    /// Link already compiled stages into a program.
    ///
    /// The stages are detached after a successful link; the caller may drop
    /// them at any point afterwards.
    ///
    /// # Safety
    ///
    /// Same as [`new`](Self::new). The stages must belong to the same
    /// context.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError::Link`] if `stages` is empty or the driver
    /// rejects the combination.
    pub unsafe fn link(gl: Arc<B>, stages: &[&CompiledStage<B>]) -> Result<Self, ShaderError> {
        if stages.is_empty() {
            return Err(ShaderError::link("no shader stages to link"));
        }

        unsafe {
            let program = gl.create_program().map_err(ShaderError::Create)?;
            for stage in stages {
                gl.attach_shader(program, stage.raw());
            }
            gl.link_program(program);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(ShaderError::link(log));
            }

            for stage in stages {
                gl.detach_shader(program, stage.raw());
            }

            log::debug!("linked program {program:?} from {} stages", stages.len());
            Ok(Self::from_state(gl, ProgramState::Linked(program)))
        }
    }

    fn from_state(gl: Arc<B>, state: ProgramState<B::Program>) -> Self {
        Self {
            gl,
            state,
            uniforms: RefCell::new(HashMap::new()),
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn status(&self) -> ProgramStatus {
        match self.state {
            ProgramState::Linked(_) => ProgramStatus::Linked,
            ProgramState::Failed(_) => ProgramStatus::Failed,
            ProgramState::Destroyed => ProgramStatus::Destroyed,
        }
    }

    /// Whether the program can be used for drawing.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        matches!(self.state, ProgramState::Linked(_))
    }

    /// Why the program is unusable, if it failed to build.
    #[must_use]
    pub fn diagnostic(&self) -> Option<&ShaderError> {
        match &self.state {
            ProgramState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// The raw program object while linked.
    #[must_use]
    pub fn handle(&self) -> Option<B::Program> {
        match self.state {
            ProgramState::Linked(program) => Some(program),
            _ => None,
        }
    }

    /// Bind this program for subsequent draw calls.
    ///
    /// On a failed or destroyed program nothing is bound and a warning is
    /// logged; draws issued afterwards produce no output.
    pub fn use_program(&self) {
        let program = self.handle();
        if program.is_none() {
            log::warn!("use_program called on a {:?} shader program", self.status());
        }
        // SAFETY: the constructors require the context to stay current for
        // the lifetime of `self`.
        unsafe { self.gl.use_program(program) };
    }

    /// Set the uniform `name` to `value`.
    ///
    /// Binds this program first, so it stays bound afterwards: a program the
    /// host had bound before is no longer current. A name the program does
    /// not declare (or that the linker optimized away, or that contains a
    /// NUL byte) is ignored, mirroring `glUniform*` with location `-1`.
    /// Calls on an unusable program are ignored too.
    pub fn set_uniform<V: UniformValue>(&self, name: &str, value: V) {
        let ProgramState::Linked(program) = self.state else {
            return;
        };
        let Some(location) = self.location(program, name) else {
            return;
        };
        // SAFETY: see `use_program`.
        unsafe {
            self.gl.use_program(Some(program));
            self.gl.uniform(&location, value.to_uniform());
        }
    }

    /// Whether the linked program has an active uniform called `name`.
    #[must_use]
    pub fn has_uniform(&self, name: &str) -> bool {
        self.handle()
            .and_then(|program| self.location(program, name))
            .is_some()
    }

    fn location(&self, program: B::Program, name: &str) -> Option<B::UniformLocation> {
        let mut uniforms = self.uniforms.borrow_mut();
        if let Some(cached) = uniforms.get(name) {
            return cached.clone();
        }

        // GLSL identifiers never contain NUL, and the driver call needs a C
        // string.
        let location = if name.contains('\0') {
            None
        } else {
            // SAFETY: see `use_program`.
            unsafe { self.gl.get_uniform_location(program, name) }
        };
        if location.is_none() {
            log::trace!("uniform `{name}` is not active in program {program:?}");
        }
        uniforms.insert(name.to_owned(), location.clone());
        location
    }

    /// Release the program object. Calling this again, or dropping the
    /// program afterwards, does nothing. A failed program keeps its
    /// diagnostic.
    pub fn destroy(&mut self) {
        if !self.is_usable() {
            return;
        }
        let state = mem::replace(&mut self.state, ProgramState::Destroyed);
        if let ProgramState::Linked(program) = state {
            // SAFETY: see `use_program`.
            unsafe { self.gl.delete_program(program) };
            self.uniforms.get_mut().clear();
            log::debug!("deleted program {program:?}");
        }
    }
}

impl<B: GlBackend> Drop for ShaderProgram<B> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<B: GlBackend> fmt::Debug for ShaderProgram<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("status", &self.status())
            .field("handle", &self.handle())
            .field("diagnostic", &self.diagnostic())
            .finish_non_exhaustive()
    }
}
