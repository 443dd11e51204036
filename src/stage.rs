//! Shader stages and the owning handle for a compiled stage.

use std::fmt;
use std::sync::Arc;

use crate::backend::GlBackend;
use crate::error::ShaderError;
use crate::source;

/// One programmable stage of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Per-vertex stage.
    Vertex,
    /// Per-fragment stage.
    Fragment,
}

impl ShaderStage {
    /// The GL enum passed to `glCreateShader`.
    #[must_use]
    pub const fn gl_type(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    /// File extension used for this stage's source on disk.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Vertex => "verts",
            Self::Fragment => "frags",
        }
    }

    /// Lowercase name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A successfully compiled stage.
///
/// The shader object is deleted when this handle is dropped. Linking only
/// borrows stages, so a stage can be dropped as soon as the program that
/// uses it has linked.
pub struct CompiledStage<B: GlBackend = glow::Context> {
    gl: Arc<B>,
    stage: ShaderStage,
    shader: B::Shader,
}

impl<B: GlBackend> CompiledStage<B> {
    /// Compile `source` as `stage`.
    ///
    /// Empty sources and sources without a leading `#version` directive are
    /// rejected before the driver is involved, so the diagnostic does not
    /// depend on the driver's defaults.
    ///
    /// # Safety
    ///
    /// The context behind `gl` must be current on this thread, and must stay
    /// current until the returned handle is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError::Compile`] carrying a non-empty log if the
    /// source is rejected, or [`ShaderError::Create`] if the driver cannot
    /// allocate a shader object.
    pub unsafe fn compile(
        gl: &Arc<B>,
        stage: ShaderStage,
        source: &str,
    ) -> Result<Self, ShaderError> {
        source::check_version(source).map_err(|log| ShaderError::compile(stage, log))?;

        unsafe {
            let shader = gl.create_shader(stage.gl_type()).map_err(ShaderError::Create)?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(ShaderError::compile(stage, log));
            }

            log::debug!("compiled {stage} shader");
            Ok(Self {
                gl: Arc::clone(gl),
                stage,
                shader,
            })
        }
    }

    /// Which stage this is.
    #[must_use]
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// The raw shader object.
    #[must_use]
    pub fn raw(&self) -> B::Shader {
        self.shader
    }
}

impl<B: GlBackend> Drop for CompiledStage<B> {
    fn drop(&mut self) {
        // SAFETY: `compile` requires the context to stay current for the
        // lifetime of this handle.
        unsafe { self.gl.delete_shader(self.shader) };
    }
}

impl<B: GlBackend> fmt::Debug for CompiledStage<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledStage")
            .field("stage", &self.stage)
            .finish_non_exhaustive()
    }
}
