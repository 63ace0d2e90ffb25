//! Dense LU factorization with partial pivoting.
//!
//! This library factors square `f32`/`f64` matrices as `P * A = L * U`
//! and applies the factors through blocked triangular solves. The bulk of
//! the work runs through a BLIS-style rank-k update with SIMD microkernels
//! selected at runtime.
//!
//! # Quick Start
//!
//! ## Function-based API
//!
//! ```
//! use pivlu::{determinant, solve, MatRef};
//!
//! let a = [2.0f64, 1.0, 4.0, 3.0];
//! let b = [1.0f64, 1.0];
//!
//! let a = MatRef::from_slice(&a, 2, 2);
//! let x = solve(a, MatRef::from_slice(&b, 2, 1)).unwrap();
//!
//! assert_eq!(x.as_slice(), &[1.0, -1.0]);
//! assert_eq!(determinant(a).unwrap(), 2.0);
//! ```
//!
//! ## Decomposition API
//!
//! ```
//! use pivlu::{Layout, LuParams, Mat, PartialPivLu};
//!
//! let a = Mat::from_fn_with_layout(64, 64, Layout::ColMajor, |i, j| {
//!     if i == j { 1000.0f64 } else { ((i * 7 + j * 3) % 11) as f64 }
//! });
//!
//! let lu = PartialPivLu::compute_with(a.as_ref(), LuParams::DEFAULT).unwrap();
//! assert!(lu.is_invertible());
//!
//! // The factorization can be reused for many right-hand sides
//! let b = Mat::<f64>::identity(64);
//! let x = lu.solve(b.as_ref()).unwrap();
//! assert!(a.matmul(&x).max_abs_diff(&b) < 1e-10);
//! ```
//!
//! # Singular Matrices
//!
//! An exact zero pivot is not an error. The factorization stops there and
//! reports the column:
//!
//! ```
//! use pivlu::{LuStatus, MatRef, PartialPivLu};
//!
//! let a = [1.0f64, 2.0, 2.0, 4.0];
//! let lu = PartialPivLu::compute(MatRef::from_slice(&a, 2, 2)).unwrap();
//!
//! assert_eq!(lu.status(), LuStatus::ZeroPivot { column: 1 });
//! assert_eq!(lu.determinant(), 0.0);
//! ```
//!
//! # Performance
//!
//! The library uses:
//! - Recursive blocked elimination so most flops land in the rank-k update
//! - BLIS-style cache blocking for that update
//! - Runtime CPU feature detection: AVX2 on x86-64, NEON on ARM
//!
//! ```
//! use pivlu::Backend;
//!
//! println!("Using: {}", Backend::description());
//! ```

mod api;
mod backend;
pub mod error;
mod lu;
pub mod mat;

pub use api::{
    determinant, inverse, lu_factor, lu_factor_with, matmul, solve, triangular_solve,
};
pub use backend::{version_info, Backend};
pub use error::{LuError, Result};
pub use lu::PartialPivLu;
pub use mat::{Mat, MatMut, MatRef};

pub use pivlu_core::{Diag, Layout, LuParams, LuStatus, Permutation, Side, TilingParams, UpLo};
pub use pivlu_simd::{simd_level, KernelDispatch, SimdLevel};
pub use pivlu_types::LuScalar;

/// Re-export core internals for advanced use.
pub mod core {
    pub use pivlu_core::*;
}

/// Re-export SIMD dispatch for advanced use.
pub mod simd {
    pub use pivlu_simd::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::api::{determinant, inverse, lu_factor, solve, triangular_solve};
    pub use crate::error::{LuError, Result};
    pub use crate::lu::PartialPivLu;
    pub use crate::mat::{Mat, MatMut, MatRef};
    pub use pivlu_core::{Diag, Layout, LuParams, LuStatus, Side, UpLo};
    pub use pivlu_types::LuScalar;
}
