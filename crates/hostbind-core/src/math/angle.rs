use bytemuck::{Pod, TransparentWrapper, Zeroable};
use rand::Rng;
use rand::distributions::Distribution;
use std::ops::{
    Add, AddAssign, Deref, DerefMut, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub,
    SubAssign,
};

use super::layout;
use super::vector::inclusive_range;

/// Euler orientation in degrees (pitch, yaw, roll) with the host's `QAngle`
/// layout.
///
/// Field names stay `x, y, z` because the host addresses them that way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct QAngle {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl QAngle {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn init(&mut self, x: f32, y: f32, z: f32) {
        *self = Self::new(x, y, z);
    }

    /// Each component uniform in `[min, max]`; see [`Vector::random`](super::Vector::random).
    pub fn random(&mut self, min: f32, max: f32) {
        self.random_with(&mut rand::thread_rng(), min, max);
    }

    pub fn random_with<R: Rng + ?Sized>(&mut self, rng: &mut R, min: f32, max: f32) {
        let range = inclusive_range(min, max);
        self.x = range.sample(rng);
        self.y = range.sample(rng);
        self.z = range.sample(rng);
    }

    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn invalidate(&mut self) {
        *self = Self::new(f32::NAN, f32::NAN, f32::NAN);
    }

    pub fn as_array(&self) -> &[f32; 3] {
        bytemuck::cast_ref(self)
    }

    pub fn as_mut_array(&mut self) -> &mut [f32; 3] {
        bytemuck::cast_mut(self)
    }

    /// This angle viewed as the host's by-value nominal type.
    pub fn as_by_value(&self) -> &QAngleByValue {
        layout::nominal(self)
    }

    pub fn as_by_value_mut(&mut self) -> &mut QAngleByValue {
        layout::nominal_mut(self)
    }

    pub fn length_sqr(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn length(&self) -> f32 {
        self.length_sqr().sqrt()
    }
}

impl Index<usize> for QAngle {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.as_array()[index]
    }
}

impl IndexMut<usize> for QAngle {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.as_mut_array()[index]
    }
}

impl Neg for QAngle {
    type Output = QAngle;

    fn neg(self) -> QAngle {
        QAngle::new(-self.x, -self.y, -self.z)
    }
}

impl Add for QAngle {
    type Output = QAngle;

    fn add(self, rhs: QAngle) -> QAngle {
        QAngle::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for QAngle {
    fn add_assign(&mut self, rhs: QAngle) {
        *self = *self + rhs;
    }
}

impl Sub for QAngle {
    type Output = QAngle;

    fn sub(self, rhs: QAngle) -> QAngle {
        QAngle::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for QAngle {
    fn sub_assign(&mut self, rhs: QAngle) {
        *self = *self - rhs;
    }
}

impl Mul<f32> for QAngle {
    type Output = QAngle;

    fn mul(self, rhs: f32) -> QAngle {
        QAngle::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl MulAssign<f32> for QAngle {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl Div<f32> for QAngle {
    type Output = QAngle;

    fn div(self, rhs: f32) -> QAngle {
        QAngle::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl DivAssign<f32> for QAngle {
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

/// The host's `QAngleByValue`, same layout as [`QAngle`].
#[derive(Debug, Clone, Copy, Default, PartialEq, TransparentWrapper)]
#[repr(transparent)]
#[transparent(QAngle)]
pub struct QAngleByValue(QAngle);

impl QAngleByValue {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self(QAngle::new(x, y, z))
    }

    pub fn into_inner(self) -> QAngle {
        self.0
    }
}

impl From<QAngle> for QAngleByValue {
    fn from(angle: QAngle) -> Self {
        Self(angle)
    }
}

impl Deref for QAngleByValue {
    type Target = QAngle;

    fn deref(&self) -> &QAngle {
        &self.0
    }
}

impl DerefMut for QAngleByValue {
    fn deref_mut(&mut self) -> &mut QAngle {
        &mut self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn random_covers_the_closed_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut a = QAngle::ZERO;
        for _ in 0..100 {
            a.random_with(&mut rng, 90.0, -90.0);
            for c in [a.x, a.y, a.z] {
                assert!((-90.0..=90.0).contains(&c));
            }
        }
        a.random_with(&mut rng, 45.0, 45.0);
        assert_eq!(a, QAngle::new(45.0, 45.0, 45.0));
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(QAngle::default(), QAngle::ZERO);
    }

    #[test]
    fn arithmetic() {
        let mut a = QAngle::new(10.0, 20.0, 30.0);
        let b = QAngle::new(1.0, 2.0, 3.0);
        assert_eq!(a + b, QAngle::new(11.0, 22.0, 33.0));
        assert_eq!(a - b, QAngle::new(9.0, 18.0, 27.0));
        assert_eq!(a * 2.0, QAngle::new(20.0, 40.0, 60.0));
        assert_eq!(a / 10.0, QAngle::new(1.0, 2.0, 3.0));
        assert_eq!(-b, QAngle::new(-1.0, -2.0, -3.0));
        a += b;
        a -= QAngle::new(1.0, 1.0, 1.0);
        a *= 0.5;
        assert_eq!(a, QAngle::new(5.0, 10.5, 16.0));
        a /= 0.5;
        assert_eq!(a, QAngle::new(10.0, 21.0, 32.0));
    }

    #[test]
    fn length_and_index() {
        let mut a = QAngle::new(2.0, 3.0, 6.0);
        assert_eq!(a.length(), 7.0);
        a[2] = 0.0;
        assert_eq!(a.length_sqr(), 13.0);
    }

    #[test]
    fn validity() {
        let mut a = QAngle::new(0.0, 90.0, 0.0);
        assert!(a.is_valid());
        a.invalidate();
        assert!(!a.is_valid());
    }

    #[test]
    fn by_value_view() {
        let mut a = QAngle::new(1.0, 2.0, 3.0);
        a.as_by_value_mut().y = 45.0;
        assert_eq!(a.y, 45.0);
        assert_eq!(**a.as_by_value(), a);
        assert_eq!(QAngleByValue::from(a).into_inner(), a);
    }
}
