//! Built-in GLSL sources for the tutorial scenes.
//!
//! All shaders target GLSL 4.60 core (OpenGL 4.6).

/// Vertex shader for the solid-color triangle.
///
/// Passes a 3D position straight through to clip space.
///
/// # Attributes
///
/// | Location | Name   | Type   |
/// |----------|--------|--------|
/// | `0`      | `aPos` | `vec3` |
pub const TRIANGLE_VERTEX_SRC: &str = r"#version 460 core
layout (location = 0) in vec3 aPos;

void main()
{
    gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
}
";

/// Fragment shader for the solid-color triangle: a fixed orange.
pub const TRIANGLE_FRAGMENT_SRC: &str = r"#version 460 core
out vec4 FragColor;

void main()
{
    FragColor = vec4(1.0f, 0.5f, 0.2f, 1.0f);
}
";

/// Vertex shader with a per-vertex color attribute.
///
/// # Attributes
///
/// | Location | Name     | Type   |
/// |----------|----------|--------|
/// | `0`      | `aPos`   | `vec3` |
/// | `1`      | `aColor` | `vec3` |
///
/// # Uniforms
///
/// | Name      | Type   | Description                          |
/// |-----------|--------|--------------------------------------|
/// | `uOffset` | `vec3` | Added to every vertex position       |
pub const COLOR_VERTEX_SRC: &str = r"#version 460 core
layout (location = 0) in vec3 aPos;
layout (location = 1) in vec3 aColor;

uniform vec3 uOffset;

out vec3 ourColor;

void main()
{
    gl_Position = vec4(aPos + uOffset, 1.0);
    ourColor = aColor;
}
";

/// Fragment shader that outputs the interpolated vertex color.
///
/// # Uniforms
///
/// | Name     | Type    | Description                          |
/// |----------|---------|--------------------------------------|
/// | `uAlpha` | `float` | Output alpha (1.0 = opaque)          |
pub const COLOR_FRAGMENT_SRC: &str = r"#version 460 core
in vec3 ourColor;

uniform float uAlpha;

out vec4 FragColor;

void main()
{
    FragColor = vec4(ourColor, uAlpha);
}
";
