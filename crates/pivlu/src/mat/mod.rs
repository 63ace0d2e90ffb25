//! Dense matrix types.
//!
//! This module provides faer-inspired matrix types:
//! - [`Mat<T>`]: Owned matrix with a fixed storage [`Layout`]
//! - [`MatRef<'a, T>`]: Immutable strided view, cheap to copy
//! - [`MatMut<'a, T>`]: Mutable strided view
//!
//! Views carry a leading dimension, so sub-blocks, single rows or columns
//! and transposes are new views over the same buffer.
//!
//! # Example
//!
//! ```
//! use pivlu::{Layout, Mat, MatRef};
//!
//! // Create a view from raw data
//! let data = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let a = MatRef::from_slice(&data, 2, 3);
//! let b = MatRef::from_slice(&data, 3, 2);
//!
//! // Matrix multiplication using method
//! let c = a.matmul(&b);
//! assert_eq!(c[(0, 0)], 22.0);
//!
//! // Or using operator syntax
//! let c = &a * &b;
//! assert_eq!(c[(1, 1)], 64.0);
//!
//! // Views do not copy
//! assert_eq!(a.transpose().get(2, 1), 6.0);
//! assert_eq!(a.submatrix(1, 1, 1, 2).get(0, 1), 6.0);
//!
//! // Factory methods
//! let zeros = Mat::<f64>::zeros(3, 3);
//! let identity = Mat::<f64>::identity_with_layout(3, Layout::ColMajor);
//! ```

mod mut_;
mod ops;
mod owned;
mod ref_;

pub use mut_::MatMut;
pub use owned::Mat;
pub use ref_::MatRef;

use pivlu_core::Layout;

/// Smallest buffer length that holds a strided `nrows x ncols` matrix.
pub(crate) fn required_len(nrows: usize, ncols: usize, ld: usize, layout: Layout) -> usize {
    if nrows == 0 || ncols == 0 {
        0
    } else {
        layout.offset(nrows - 1, ncols - 1, ld) + 1
    }
}

/// Panic unless `(ld, layout)` can address an `nrows x ncols` matrix in `len` elements.
pub(crate) fn check_strided(len: usize, nrows: usize, ncols: usize, ld: usize, layout: Layout) {
    if nrows > 0 && ncols > 0 {
        assert!(
            ld >= layout.contiguous_ld(nrows, ncols),
            "leading dimension {} too small for {:?} {}x{}",
            ld,
            layout,
            nrows,
            ncols
        );
    }
    let needed = required_len(nrows, ncols, ld, layout);
    assert!(
        len >= needed,
        "data length {} too short for {}x{} with ld {} (need {})",
        len,
        nrows,
        ncols,
        ld,
        needed
    );
}
