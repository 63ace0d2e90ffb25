//! SIMD-optimized microkernels for the LU rank-k update.
//!
//! This crate provides architecture-specific SIMD implementations
//! of the microkernel behind factorization and triangular solves.
//!
//! # Supported Architectures
//!
//! - **x86-64**: AVX2 (also used when AVX-512 is present)
//! - **AArch64**: NEON
//! - **Other**: Portable fallback
//!
//! # Runtime Dispatch
//!
//! The `dispatch` module provides automatic selection of the best
//! kernel based on CPU features detected at runtime.
//!
//! # Example
//!
//! ```
//! use pivlu_core::{Layout, RawMat};
//! use pivlu_simd::{gemm_dispatch, simd_level};
//!
//! println!("Detected SIMD level: {:?}", simd_level());
//!
//! let m = 64;
//! let n = 64;
//! let k = 64;
//!
//! let mut a = vec![1.0f32; m * k];
//! let mut b = vec![1.0f32; k * n];
//! let mut c = vec![0.0f32; m * n];
//!
//! unsafe {
//!     let av = RawMat::new(a.as_mut_ptr(), m, k, k, Layout::RowMajor);
//!     let bv = RawMat::new(b.as_mut_ptr(), k, n, n, Layout::RowMajor);
//!     let cv = RawMat::new(c.as_mut_ptr(), m, n, n, Layout::RowMajor);
//!     gemm_dispatch(cv, av, bv, -1.0);
//! }
//!
//! assert_eq!(c[0], -64.0);
//! ```

mod detect;
pub mod dispatch;
pub mod kernels;

pub use detect::{simd_level, SimdLevel};
pub use dispatch::{gemm_dispatch, lu_dispatch, triangular_solve_dispatch, KernelDispatch};
pub use kernels::*;
