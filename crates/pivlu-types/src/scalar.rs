use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Trait for the real field types the factorization runs over.
///
/// Only `f32` and `f64` implement it. Everything in the blocked algorithms
/// is expressed through these operations so the microkernels, the packer
/// and the elimination step share one scalar vocabulary.
pub trait LuScalar:
    Copy
    + Clone
    + Send
    + Sync
    + Debug
    + Display
    + Default
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + 'static
    + Sized
{
    /// The additive identity.
    fn scalar_zero() -> Self;

    /// The multiplicative identity.
    fn scalar_one() -> Self;

    /// Absolute value, used as the pivot score.
    fn scalar_abs(self) -> Self;

    /// Convert from `f64`, rounding for narrower types.
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_lu_scalar_float {
    ($($t:ty),*) => {
        $(
            impl LuScalar for $t {
                #[inline(always)]
                fn scalar_zero() -> Self {
                    0.0
                }

                #[inline(always)]
                fn scalar_one() -> Self {
                    1.0
                }

                #[inline(always)]
                fn scalar_abs(self) -> Self {
                    self.abs()
                }

                #[inline(always)]
                fn from_f64(value: f64) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_lu_scalar_float!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identities() {
        assert_eq!(f64::scalar_zero(), 0.0);
        assert_eq!(f64::scalar_one(), 1.0);
        assert_eq!(f32::scalar_zero(), 0.0);
        assert_eq!(f32::scalar_one(), 1.0);
    }

    #[test]
    fn test_abs() {
        assert_eq!((-2.5f64).scalar_abs(), 2.5);
        assert_eq!(3.0f32.scalar_abs(), 3.0);
        assert_eq!((-0.0f64).scalar_abs(), 0.0);
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(<f32 as LuScalar>::from_f64(0.5), 0.5f32);
        assert_eq!(<f64 as LuScalar>::from_f64(-1.25), -1.25f64);
    }
}
