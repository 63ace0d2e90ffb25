//! Core dense LU algorithms.
//!
//! This crate provides portable implementations of LU factorization with
//! partial pivoting and the blocked triangular solver that applies it,
//! built on a BLIS-style rank-k update.
//!
//! # Features
//!
//! - Strided views over row-major or column-major buffers, no copies
//! - BLIS-style 5-loop blocking for the rank-k update
//! - Recursive, cache-blocked factorization with an unblocked base case
//! - Blocked triangular solves on either side
//! - Pluggable microkernel architecture
//!
//! # Example
//!
//! ```
//! use pivlu_core::{
//!     lu_in_place, Layout, LuParams, LuStatus, Permutation, PortableMicrokernel, RawMat,
//!     TilingParams,
//! };
//!
//! // [[2, 1], [4, 3]]
//! let mut a = vec![2.0f64, 1.0, 4.0, 3.0];
//! let mut transpositions = vec![0usize; 2];
//!
//! let info = unsafe {
//!     let view = RawMat::new(a.as_mut_ptr(), 2, 2, 2, Layout::RowMajor);
//!     lu_in_place(
//!         view,
//!         &mut transpositions,
//!         &LuParams::DEFAULT,
//!         &TilingParams::PORTABLE,
//!         &PortableMicrokernel,
//!     )
//! };
//!
//! assert_eq!(info.status, LuStatus::Complete);
//! assert_eq!(a, vec![4.0, 3.0, 0.5, -0.5]);
//! assert_eq!(Permutation::from_transpositions(&transpositions).inverse(), &[1, 0]);
//! ```

mod blocked;
mod kernel;
mod packing;
mod permutation;
mod rank_k;
mod tiling;
mod triangular;
mod unblocked;
mod view;

pub use blocked::lu_in_place;
pub use kernel::{Microkernel, PortableMicrokernel};
pub use packing::{pack_a, pack_b, packed_a_size, packed_b_size};
pub use permutation::Permutation;
pub use rank_k::{gemm_update, gemm_update_portable, rank_k_update};
pub use tiling::{BlockIterator, LuParams, RevBlockIterator, TilingParams};
pub use triangular::{triangular_solve, Diag, Side, UpLo};
pub use unblocked::{lu_unblocked, LuInfo, LuStatus};
pub use view::{Layout, RawMat};
