//! Error type for shader compilation, linking and source loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::stage::ShaderStage;

/// Everything that can go wrong while turning source text into a program.
///
/// All variants are recoverable at the call site. None of them is worth
/// retrying without changing the input: compilation is deterministic.
#[derive(Debug, Error)]
pub enum ShaderError {
    /// A single stage was rejected by the compiler.
    #[error("{stage} shader failed to compile: {log}")]
    Compile {
        /// The stage that failed.
        stage: ShaderStage,
        /// Compiler info log. Never empty.
        log: String,
    },

    /// The compiled stages could not be linked into one program.
    #[error("program failed to link: {log}")]
    Link {
        /// Linker info log. Never empty.
        log: String,
    },

    /// A source file could not be read.
    #[error("failed to read shader source {}: {source}", .path.display())]
    FileRead {
        /// The path that was requested.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The driver refused to allocate a shader or program object.
    #[error("failed to create GL object: {0}")]
    Create(String),
}

impl ShaderError {
    /// The driver diagnostic carried by compile and link failures.
    #[must_use]
    pub fn log(&self) -> Option<&str> {
        match self {
            Self::Compile { log, .. } | Self::Link { log } => Some(log),
            Self::FileRead { .. } | Self::Create(_) => None,
        }
    }

    /// The stage a compile failure belongs to.
    #[must_use]
    pub fn stage(&self) -> Option<ShaderStage> {
        match self {
            Self::Compile { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Build a compile error, substituting a placeholder when the driver
    /// reported failure with an empty log.
    pub(crate) fn compile(stage: ShaderStage, log: impl Into<String>) -> Self {
        Self::Compile {
            stage,
            log: non_empty(log.into(), "compiler reported failure without a log"),
        }
    }

    /// Build a link error, with the same empty-log substitution.
    pub(crate) fn link(log: impl Into<String>) -> Self {
        Self::Link {
            log: non_empty(log.into(), "linker reported failure without a log"),
        }
    }
}

fn non_empty(log: String, fallback: &str) -> String {
    let trimmed = log.trim_end();
    if trimmed.is_empty() {
        fallback.to_owned()
    } else {
        trimmed.to_owned()
    }
}
