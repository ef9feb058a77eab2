use bytemuck::{Pod, Zeroable};

use super::layout;
use super::vector::Vector;

/// 16-byte aligned vector matching the host's `VectorAligned`.
///
/// The host loads these straight into SIMD registers, so the size is padded
/// to 16 by the trailing `w` and the alignment is 16. `w` carries no meaning
/// and is zero whenever this type constructs the value.
#[derive(Debug, Clone, Copy, Default)]
#[repr(C, align(16))]
pub struct VectorAligned {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

const _: () = {
    assert!(std::mem::size_of::<VectorAligned>() == 16);
    assert!(std::mem::align_of::<VectorAligned>() == 16);
};

// SAFETY: four `f32` fields fill the 16 bytes exactly, so there is no
// padding, and the all-zero bit pattern is a valid value.
unsafe impl Zeroable for VectorAligned {}
unsafe impl Pod for VectorAligned {}

impl VectorAligned {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, w: 0.0 }
    }

    /// Overwrites `x, y, z` from a plain vector, leaving `w` alone.
    pub fn set(&mut self, v: &Vector) {
        *self.as_vector_mut() = *v;
    }

    /// The leading three fields viewed in place as a [`Vector`].
    pub fn as_vector(&self) -> &Vector {
        layout::leading(self)
    }

    pub fn as_vector_mut(&mut self) -> &mut Vector {
        layout::leading_mut(self)
    }
}

impl From<Vector> for VectorAligned {
    fn from(v: Vector) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<VectorAligned> for Vector {
    fn from(v: VectorAligned) -> Self {
        *v.as_vector()
    }
}

/// Compares `x, y, z` only; `w` is padding.
impl PartialEq for VectorAligned {
    fn eq(&self, other: &Self) -> bool {
        self.as_vector() == other.as_vector()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vector_zeroes_padding() {
        let aligned = VectorAligned::from(Vector::new(1.0, 2.0, 3.0));
        assert_eq!(aligned.w, 0.0);
        assert_eq!(*aligned.as_vector(), Vector::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn set_keeps_padding() {
        let mut aligned = VectorAligned::new(0.0, 0.0, 0.0);
        aligned.w = 5.0;
        aligned.set(&Vector::new(7.0, 8.0, 9.0));
        assert_eq!((aligned.x, aligned.y, aligned.z, aligned.w), (7.0, 8.0, 9.0, 5.0));
    }

    #[test]
    fn equality_ignores_padding() {
        let mut a = VectorAligned::new(1.0, 1.0, 1.0);
        let b = VectorAligned::new(1.0, 1.0, 1.0);
        a.w = 42.0;
        assert_eq!(a, b);
    }

    #[test]
    fn array_of_aligned_is_sixteen_byte_strided() {
        let values = [VectorAligned::default(); 4];
        let base = values.as_ptr() as usize;
        assert_eq!(base % 16, 0);
        assert_eq!(&values[1] as *const _ as usize - base, 16);
    }
}
