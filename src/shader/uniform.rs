//! Uniform values and the sink they are pushed into

use glam::{Vec3, Vec4};

/// A value that can be assigned to a named shader uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    /// Stored as a 32-bit integer, 0 or 1.
    Bool(bool),
    Vec3(Vec3),
    Vec4(Vec4),
}

impl UniformValue {
    /// Size of the value in bytes when written into a uniform block.
    pub fn size(&self) -> usize {
        match self {
            UniformValue::Float(_) | UniformValue::Int(_) | UniformValue::Bool(_) => 4,
            UniformValue::Vec3(_) => 12,
            UniformValue::Vec4(_) => 16,
        }
    }

    /// Copy the value's raw bytes to the front of `dst`.
    ///
    /// Returns `false` without writing anything if `dst` is too short.
    pub fn write_to(&self, dst: &mut [u8]) -> bool {
        let Some(dst) = dst.get_mut(..self.size()) else {
            return false;
        };
        match self {
            UniformValue::Float(v) => dst.copy_from_slice(bytemuck::bytes_of(v)),
            UniformValue::Int(v) => dst.copy_from_slice(bytemuck::bytes_of(v)),
            UniformValue::Bool(v) => dst.copy_from_slice(bytemuck::bytes_of(&u32::from(*v))),
            UniformValue::Vec3(v) => dst.copy_from_slice(bytemuck::cast_slice(&v.to_array())),
            UniformValue::Vec4(v) => dst.copy_from_slice(bytemuck::cast_slice(&v.to_array())),
        }
        true
    }
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        UniformValue::Float(value)
    }
}

impl From<i32> for UniformValue {
    fn from(value: i32) -> Self {
        UniformValue::Int(value)
    }
}

impl From<bool> for UniformValue {
    fn from(value: bool) -> Self {
        UniformValue::Bool(value)
    }
}

impl From<Vec3> for UniformValue {
    fn from(value: Vec3) -> Self {
        UniformValue::Vec3(value)
    }
}

impl From<Vec4> for UniformValue {
    fn from(value: Vec4) -> Self {
        UniformValue::Vec4(value)
    }
}

/// Anything that accepts uniforms by name.
///
/// Unknown names must be ignored silently. Lights receive a `&mut dyn
/// UniformSink` to push fields only they know about.
pub trait UniformSink {
    /// Assign a uniform by name.
    fn set_uniform(&mut self, name: &str, value: UniformValue);
}
