use bytemuck::{Pod, TransparentWrapper, Zeroable};
use rand::Rng;
use rand::distributions::{Distribution, Uniform};
use std::ops::{
    Add, AddAssign, Deref, DerefMut, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub,
    SubAssign,
};

use super::layout;
use super::vector2d::Vector2D;

/// Uniform sampler over the closed interval between two bounds, in either order.
pub(super) fn inclusive_range(a: f32, b: f32) -> Uniform<f32> {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    Uniform::new_inclusive(low, high)
}

/// Tolerance used by [`Vector::is_zero`] when the caller has no better value.
pub const DEFAULT_ZERO_TOLERANCE: f32 = 0.01;

/// Lengths below this normalize to the zero vector.
pub const NORMALIZE_EPSILON: f32 = f32::EPSILON;

/// Three-component position or direction, laid out exactly like the host's
/// `Vector`: three consecutive `f32` in x, y, z order.
///
/// Equality is exact per component; use [`Vector::is_zero`] or a distance
/// check when a tolerance is wanted.
///
/// ```
/// use hostbind_core::Vector;
///
/// let v = Vector::new(3.0, 4.0, 0.0);
/// assert_eq!(v.length(), 5.0);
/// assert_eq!(Vector::default(), Vector::ZERO);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// All three components set to `xyz`.
    #[inline]
    pub const fn splat(xyz: f32) -> Self {
        Self::new(xyz, xyz, xyz)
    }

    #[inline]
    pub fn init(&mut self, x: f32, y: f32, z: f32) {
        *self = Self::new(x, y, z);
    }

    #[inline]
    pub fn zero(&mut self) {
        *self = Self::ZERO;
    }

    /// True when every component is finite.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Poisons the vector so [`Vector::is_valid`] fails.
    pub fn invalidate(&mut self) {
        *self = Self::splat(f32::NAN);
    }

    /// Fills each component with a uniform sample from `[min, max]`.
    ///
    /// The bounds may come in either order.
    ///
    /// # Panics
    ///
    /// If either bound is not finite.
    pub fn random(&mut self, min: f32, max: f32) {
        self.random_with(&mut rand::thread_rng(), min, max);
    }

    /// [`Vector::random`] drawing from a caller-supplied generator.
    pub fn random_with<R: Rng + ?Sized>(&mut self, rng: &mut R, min: f32, max: f32) {
        let range = inclusive_range(min, max);
        self.x = range.sample(rng);
        self.y = range.sample(rng);
        self.z = range.sample(rng);
    }

    /// The components as a contiguous array, the host's `Base()` view.
    #[inline]
    pub fn as_array(&self) -> &[f32; 3] {
        bytemuck::cast_ref(self)
    }

    #[inline]
    pub fn as_mut_array(&mut self) -> &mut [f32; 3] {
        bytemuck::cast_mut(self)
    }

    pub fn copy_to_array(&self, out: &mut [f32; 3]) {
        *out = *self.as_array();
    }

    /// The leading `x, y` fields viewed in place as a [`Vector2D`].
    pub fn as_vector2d(&self) -> &Vector2D {
        layout::leading(self)
    }

    pub fn as_vector2d_mut(&mut self) -> &mut Vector2D {
        layout::leading_mut(self)
    }

    /// This vector viewed as the host's by-value nominal type.
    pub fn as_by_value(&self) -> &VectorByValue {
        layout::nominal(self)
    }

    pub fn as_by_value_mut(&mut self) -> &mut VectorByValue {
        layout::nominal_mut(self)
    }

    pub fn negate(&mut self) {
        *self = -*self;
    }

    /// Adds `value` to every component.
    pub fn add_scalar(&mut self, value: f32) {
        self.x += value;
        self.y += value;
        self.z += value;
    }

    /// Subtracts `value` from every component.
    pub fn sub_scalar(&mut self, value: f32) {
        self.add_scalar(-value);
    }

    #[inline]
    pub fn length_sqr(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.length_sqr().sqrt()
    }

    #[inline]
    pub fn length_2d_sqr(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn length_2d(&self) -> f32 {
        self.length_2d_sqr().sqrt()
    }

    /// True iff every component lies strictly inside `(-tolerance, tolerance)`.
    pub fn is_zero(&self, tolerance: f32) -> bool {
        let inside = |c: f32| c > -tolerance && c < tolerance;
        inside(self.x) && inside(self.y) && inside(self.z)
    }

    /// Scales the vector to unit length and returns the length it had.
    ///
    /// A vector shorter than [`NORMALIZE_EPSILON`] becomes the zero vector
    /// instead of being divided by (nearly) zero. A valid vector whose
    /// squared length overflows still normalizes; the returned length is
    /// then infinite.
    pub fn normalize_in_place(&mut self) -> f32 {
        let length = self.length();
        if length < NORMALIZE_EPSILON {
            self.zero();
        } else if length.is_infinite() && self.is_valid() {
            let largest = self.x.abs().max(self.y.abs()).max(self.z.abs());
            *self /= largest;
            let scaled = self.length();
            *self /= scaled;
        } else {
            *self /= length;
        }
        length
    }

    pub fn normalized(&self) -> Self {
        let mut out = *self;
        out.normalize_in_place();
        out
    }

    pub fn is_length_greater_than(&self, value: f32) -> bool {
        self.length_sqr() > value * value
    }

    pub fn is_length_less_than(&self, value: f32) -> bool {
        self.length_sqr() < value * value
    }

    /// Inclusive containment in the axis-aligned box `[min, max]`.
    pub fn within_aa_box(&self, min: &Vector, max: &Vector) -> bool {
        self.x >= min.x
            && self.x <= max.x
            && self.y >= min.y
            && self.y <= max.y
            && self.z >= min.z
            && self.z <= max.z
    }

    pub fn dist_to(&self, other: &Vector) -> f32 {
        (*self - *other).length()
    }

    pub fn dist_to_sqr(&self, other: &Vector) -> f32 {
        (*self - *other).length_sqr()
    }

    /// `self = a + b * scalar`.
    pub fn mul_add(&mut self, a: &Vector, b: &Vector, scalar: f32) {
        *self = *a + *b * scalar;
    }

    #[inline]
    pub fn dot(&self, other: &Vector) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Vector) -> Vector {
        Vector::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Component-wise minimum.
    pub fn min(&self, other: &Vector) -> Vector {
        Vector::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    /// Component-wise maximum.
    pub fn max(&self, other: &Vector) -> Vector {
        Vector::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }
}

impl From<[f32; 3]> for Vector {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vector> for [f32; 3] {
    fn from(v: Vector) -> Self {
        [v.x, v.y, v.z]
    }
}

impl Index<usize> for Vector {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.as_array()[index]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.as_mut_array()[index]
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y, -self.z)
    }
}

macro_rules! componentwise {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl $trait for Vector {
            type Output = Vector;

            fn $method(self, rhs: Vector) -> Vector {
                Vector::new(self.x $op rhs.x, self.y $op rhs.y, self.z $op rhs.z)
            }
        }

        impl $assign_trait for Vector {
            fn $assign_method(&mut self, rhs: Vector) {
                *self = *self $op rhs;
            }
        }
    };
}

componentwise!(Add, add, AddAssign, add_assign, +);
componentwise!(Sub, sub, SubAssign, sub_assign, -);
componentwise!(Mul, mul, MulAssign, mul_assign, *);
componentwise!(Div, div, DivAssign, div_assign, /);

impl Mul<f32> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f32) -> Vector {
        Vector::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vector> for f32 {
    type Output = Vector;

    fn mul(self, rhs: Vector) -> Vector {
        rhs * self
    }
}

impl MulAssign<f32> for Vector {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl Div<f32> for Vector {
    type Output = Vector;

    fn div(self, rhs: f32) -> Vector {
        Vector::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl DivAssign<f32> for Vector {
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

/// The host's `VectorByValue`: a distinct nominal type with the exact
/// layout of [`Vector`], used where the host signature names it.
///
/// Obtain one in place with [`Vector::as_by_value`]; it derefs back to the
/// plain vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, TransparentWrapper)]
#[repr(transparent)]
#[transparent(Vector)]
pub struct VectorByValue(Vector);

impl VectorByValue {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vector::new(x, y, z))
    }

    pub fn into_inner(self) -> Vector {
        self.0
    }
}

impl From<Vector> for VectorByValue {
    fn from(v: Vector) -> Self {
        Self(v)
    }
}

impl Deref for VectorByValue {
    type Target = Vector;

    fn deref(&self) -> &Vector {
        &self.0
    }
}

impl DerefMut for VectorByValue {
    fn deref_mut(&mut self) -> &mut Vector {
        &mut self.0
    }
}
