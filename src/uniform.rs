//! Typed uniform values.
//!
//! [`UniformValue`] is the overload set behind
//! [`ShaderProgram::set_uniform`](crate::ShaderProgram::set_uniform): every
//! implementor lowers itself to a [`UniformData`], and the backend turns
//! that into the matching `glUniform*` call.

/// A uniform value in the shape the GL API consumes it.
///
/// Matrices are column-major, as GLSL expects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformData {
    /// `int`, `bool` or `sampler*`.
    Int(i32),
    /// `uint`.
    UInt(u32),
    /// `float`.
    Float(f32),
    /// `vec2`.
    Vec2([f32; 2]),
    /// `vec3`.
    Vec3([f32; 3]),
    /// `vec4`.
    Vec4([f32; 4]),
    /// `ivec2`.
    IVec2([i32; 2]),
    /// `ivec3`.
    IVec3([i32; 3]),
    /// `ivec4`.
    IVec4([i32; 4]),
    /// `mat3`, column-major.
    Mat3([f32; 9]),
    /// `mat4`, column-major.
    Mat4([f32; 16]),
}

/// A host value that can be written to a uniform.
pub trait UniformValue {
    /// Lower to the GL representation.
    fn to_uniform(&self) -> UniformData;
}

impl UniformValue for UniformData {
    fn to_uniform(&self) -> UniformData {
        *self
    }
}

impl UniformValue for bool {
    fn to_uniform(&self) -> UniformData {
        UniformData::Int(i32::from(*self))
    }
}

impl UniformValue for i32 {
    fn to_uniform(&self) -> UniformData {
        UniformData::Int(*self)
    }
}

impl UniformValue for u32 {
    fn to_uniform(&self) -> UniformData {
        UniformData::UInt(*self)
    }
}

impl UniformValue for f32 {
    fn to_uniform(&self) -> UniformData {
        UniformData::Float(*self)
    }
}

impl UniformValue for [f32; 2] {
    fn to_uniform(&self) -> UniformData {
        UniformData::Vec2(*self)
    }
}

impl UniformValue for [f32; 3] {
    fn to_uniform(&self) -> UniformData {
        UniformData::Vec3(*self)
    }
}

impl UniformValue for [f32; 4] {
    fn to_uniform(&self) -> UniformData {
        UniformData::Vec4(*self)
    }
}

impl UniformValue for [i32; 2] {
    fn to_uniform(&self) -> UniformData {
        UniformData::IVec2(*self)
    }
}

impl UniformValue for [i32; 3] {
    fn to_uniform(&self) -> UniformData {
        UniformData::IVec3(*self)
    }
}

impl UniformValue for [i32; 4] {
    fn to_uniform(&self) -> UniformData {
        UniformData::IVec4(*self)
    }
}

/// Column-major `mat3`: `self[column][row]`.
impl UniformValue for [[f32; 3]; 3] {
    fn to_uniform(&self) -> UniformData {
        UniformData::Mat3(bytemuck::cast(*self))
    }
}

/// Column-major `mat4`: `self[column][row]`.
impl UniformValue for [[f32; 4]; 4] {
    fn to_uniform(&self) -> UniformData {
        UniformData::Mat4(bytemuck::cast(*self))
    }
}

/// Always a column-major `mat4`. A `float[16]` array uniform cannot be
/// written through this impl; its elements are separate uniforms
/// (`name[0]`, `name[1]`, ...) and take one `f32` each.
impl UniformValue for [f32; 16] {
    fn to_uniform(&self) -> UniformData {
        UniformData::Mat4(*self)
    }
}

impl<T: UniformValue + ?Sized> UniformValue for &T {
    fn to_uniform(&self) -> UniformData {
        (**self).to_uniform()
    }
}

#[cfg(feature = "glam")]
mod glam_impls {
    use super::{UniformData, UniformValue};

    impl UniformValue for glam::Vec2 {
        fn to_uniform(&self) -> UniformData {
            UniformData::Vec2(self.to_array())
        }
    }

    impl UniformValue for glam::Vec3 {
        fn to_uniform(&self) -> UniformData {
            UniformData::Vec3(self.to_array())
        }
    }

    impl UniformValue for glam::Vec4 {
        fn to_uniform(&self) -> UniformData {
            UniformData::Vec4(self.to_array())
        }
    }

    impl UniformValue for glam::Mat3 {
        fn to_uniform(&self) -> UniformData {
            UniformData::Mat3(self.to_cols_array())
        }
    }

    impl UniformValue for glam::Mat4 {
        fn to_uniform(&self) -> UniformData {
            UniformData::Mat4(self.to_cols_array())
        }
    }
}
