//! Scalar types for the pivlu dense LU solver.
//!
//! The factorization, the triangular solver and the SIMD microkernels are
//! all generic over [`LuScalar`], which is implemented for `f32` and `f64`.
//!
//! # Example
//!
//! ```
//! use pivlu_types::LuScalar;
//!
//! fn pivot_score<T: LuScalar>(x: T) -> T {
//!     x.scalar_abs()
//! }
//!
//! assert_eq!(pivot_score(-4.0f64), 4.0);
//! assert_eq!(f32::scalar_one() + f32::scalar_one(), 2.0);
//! ```

mod scalar;

pub use scalar::LuScalar;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use super::LuScalar;
}
