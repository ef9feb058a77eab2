use bytemuck::{Pod, Zeroable};

/// Two-component vector matching the host's `Vector2D`.
///
/// Mostly reached through [`Vector::as_vector2d`](super::Vector::as_vector2d),
/// which views the leading `x, y` of a 3D vector in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length_sqr(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(&self) -> f32 {
        self.length_sqr().sqrt()
    }

    pub fn dot(&self, other: &Vector2D) -> f32 {
        self.x * other.x + self.y * other.y
    }
}
