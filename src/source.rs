//! Vertex/fragment source pairs, inline or loaded from disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ShaderError;
use crate::stage::ShaderStage;

/// The source text for both stages of a program. Immutable once read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    vertex: String,
    fragment: String,
}

impl ShaderSource {
    /// Wrap two inline sources.
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Read both sources from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError::FileRead`] naming the first path that could not
    /// be read.
    pub fn from_files(
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        Ok(Self {
            vertex: read_source(vertex_path.as_ref())?,
            fragment: read_source(fragment_path.as_ref())?,
        })
    }

    /// Read `<dir>/<name>.verts` and `<dir>/<name>.frags`.
    ///
    /// # Errors
    ///
    /// Same as [`from_files`](Self::from_files).
    pub fn from_dir(dir: impl AsRef<Path>, name: &str) -> Result<Self, ShaderError> {
        let dir = dir.as_ref();
        Self::from_files(
            stage_path(dir, name, ShaderStage::Vertex),
            stage_path(dir, name, ShaderStage::Fragment),
        )
    }

    /// Vertex stage source.
    #[must_use]
    pub fn vertex(&self) -> &str {
        &self.vertex
    }

    /// Fragment stage source.
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Source for `stage`.
    #[must_use]
    pub fn get(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }
}

/// Path of `stage`'s source file for program `name` under `dir`.
#[must_use]
pub fn stage_path(dir: &Path, name: &str, stage: ShaderStage) -> PathBuf {
    dir.join(format!("{name}.{}", stage.extension()))
}

fn read_source(path: &Path) -> Result<String, ShaderError> {
    let text = fs::read_to_string(path).map_err(|source| ShaderError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded shader source {}", path.display());
    Ok(text)
}

/// The `#version` directive of `source`, e.g. `(460, Some("core"))`.
///
/// Whitespace, `//` and `/* */` comments, and a leading byte-order mark may
/// precede the directive; nothing else may.
#[must_use]
pub fn glsl_version(source: &str) -> Option<(u32, Option<&str>)> {
    let rest = skip_preamble(source.strip_prefix('\u{feff}').unwrap_or(source))?;
    let line = rest.lines().next()?;
    let line = line.split("//").next().unwrap_or(line);
    let line = line.split("/*").next().unwrap_or(line);

    let rest = line.strip_prefix('#')?.trim_start().strip_prefix("version")?;
    let mut words = rest.split_whitespace();
    let number = words.next()?.parse().ok()?;
    Some((number, words.next()))
}

/// Skip whitespace and comments. `None` for an unterminated block comment.
fn skip_preamble(mut source: &str) -> Option<&str> {
    loop {
        source = source.trim_start();
        if let Some(comment) = source.strip_prefix("//") {
            source = comment.split_once('\n').map_or("", |(_, rest)| rest);
        } else if let Some(comment) = source.strip_prefix("/*") {
            source = comment.split_once("*/")?.1;
        } else {
            return Some(source);
        }
    }
}

/// Reject sources the driver would only accept by falling back to GLSL 1.10.
pub(crate) fn check_version(source: &str) -> Result<(), String> {
    if source.trim().is_empty() {
        return Err("shader source is empty".to_owned());
    }
    if glsl_version(source).is_none() {
        return Err("missing #version directive before the first statement".to_owned());
    }
    Ok(())
}
