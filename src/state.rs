//! Render-loop state that the tutorial programs kept in globals.

use crate::backend::GlBackend;

/// Rasterization mode for both faces, toggled from the input handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PolygonMode {
    /// Filled triangles.
    #[default]
    Fill,
    /// Wireframe.
    Line,
}

impl PolygonMode {
    /// The GL enum passed to `glPolygonMode`.
    #[must_use]
    pub const fn gl_mode(self) -> u32 {
        match self {
            Self::Fill => glow::FILL,
            Self::Line => glow::LINE,
        }
    }

    /// Flip between fill and wireframe, returning the new mode.
    pub fn toggle(&mut self) -> Self {
        *self = match self {
            Self::Fill => Self::Line,
            Self::Line => Self::Fill,
        };
        *self
    }

    /// Apply to both faces.
    ///
    /// # Safety
    ///
    /// Requires a valid, current OpenGL context.
    pub unsafe fn apply<B: GlBackend>(self, gl: &B) {
        unsafe { gl.polygon_mode(glow::FRONT_AND_BACK, self.gl_mode()) };
    }
}
