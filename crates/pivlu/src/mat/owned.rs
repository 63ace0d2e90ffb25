//! Owned matrix type.

use std::ops::{Index, IndexMut};

use pivlu_core::{Layout, RawMat};
use pivlu_simd::KernelDispatch;
use pivlu_types::LuScalar;

use super::{MatMut, MatRef};

/// Owned dense matrix.
///
/// Values are stored contiguously in the matrix's [`Layout`], row-major
/// unless a `_with_layout` constructor is used. Use factory methods to
/// create matrices:
///
/// ```
/// use pivlu::{Layout, Mat};
///
/// let zeros = Mat::<f64>::zeros(3, 4);
/// let identity = Mat::<f64>::identity(3);
/// let custom = Mat::from_fn(2, 2, |i, j| (i + j) as f64);
/// let col_major = custom.to_layout(Layout::ColMajor);
///
/// assert_eq!(custom[(1, 0)], col_major[(1, 0)]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Mat<T: LuScalar> {
    pub(crate) data: Vec<T>,
    pub(crate) nrows: usize,
    pub(crate) ncols: usize,
    pub(crate) layout: Layout,
}

impl<T: LuScalar> Mat<T> {
    /// Create a row-major matrix filled with zeros.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self::zeros_with_layout(nrows, ncols, Layout::RowMajor)
    }

    /// Create a matrix filled with zeros in the given layout.
    pub fn zeros_with_layout(nrows: usize, ncols: usize, layout: Layout) -> Self {
        Self {
            data: vec![T::scalar_zero(); nrows * ncols],
            nrows,
            ncols,
            layout,
        }
    }

    /// Create a row-major identity matrix.
    pub fn identity(n: usize) -> Self {
        Self::identity_with_layout(n, Layout::RowMajor)
    }

    /// Create an identity matrix in the given layout.
    pub fn identity_with_layout(n: usize, layout: Layout) -> Self {
        let mut mat = Self::zeros_with_layout(n, n, layout);
        for i in 0..n {
            mat[(i, i)] = T::scalar_one();
        }
        mat
    }

    /// Create a row-major matrix from a function.
    ///
    /// The function is called with (row, col) indices.
    pub fn from_fn<F>(nrows: usize, ncols: usize, f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        Self::from_fn_with_layout(nrows, ncols, Layout::RowMajor, f)
    }

    /// Create a matrix from a function, stored in the given layout.
    pub fn from_fn_with_layout<F>(nrows: usize, ncols: usize, layout: Layout, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let data = match layout {
            Layout::RowMajor => (0..nrows * ncols)
                .map(|idx| f(idx / ncols, idx % ncols))
                .collect(),
            Layout::ColMajor => (0..nrows * ncols)
                .map(|idx| f(idx % nrows, idx / nrows))
                .collect(),
        };
        Self {
            data,
            nrows,
            ncols,
            layout,
        }
    }

    /// Create a matrix from row-major data.
    pub fn from_row_major(data: &[T], nrows: usize, ncols: usize) -> Self {
        Self::from_vec(data.to_vec(), nrows, ncols, Layout::RowMajor)
    }

    /// Create a matrix from column-major data.
    pub fn from_col_major(data: &[T], nrows: usize, ncols: usize) -> Self {
        Self::from_vec(data.to_vec(), nrows, ncols, Layout::ColMajor)
    }

    /// Create a matrix that takes ownership of contiguous data in `layout`.
    pub fn from_vec(data: Vec<T>, nrows: usize, ncols: usize, layout: Layout) -> Self {
        assert_eq!(
            data.len(),
            nrows * ncols,
            "data length {} != nrows {} * ncols {}",
            data.len(),
            nrows,
            ncols
        );
        Self {
            data,
            nrows,
            ncols,
            layout,
        }
    }

    /// Copy into a matrix stored in `layout`.
    pub fn to_layout(&self, layout: Layout) -> Self {
        if layout == self.layout {
            return self.clone();
        }
        Self::from_fn_with_layout(self.nrows, self.ncols, layout, |i, j| self[(i, j)])
    }

    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Storage order.
    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Get the underlying data as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the underlying data as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the matrix and return its buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get the value at position (i, j).
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        self[(i, j)]
    }

    /// Convert to an immutable matrix reference.
    pub fn as_ref(&self) -> MatRef<'_, T> {
        MatRef::from_slice_with_layout(&self.data, self.nrows, self.ncols, self.layout)
    }

    /// Convert to a mutable matrix reference.
    pub fn as_mut(&mut self) -> MatMut<'_, T> {
        MatMut::from_slice_with_layout(&mut self.data, self.nrows, self.ncols, self.layout)
    }

    /// Transposed view.
    pub fn transpose(&self) -> MatRef<'_, T> {
        self.as_ref().transpose()
    }

    /// Largest absolute element-wise difference to `other`.
    ///
    /// Panics if the shapes differ. Layouts may differ.
    pub fn max_abs_diff(&self, other: &Mat<T>) -> T {
        assert_eq!(
            (self.nrows, self.ncols),
            (other.nrows, other.ncols),
            "shape mismatch"
        );
        let mut max = T::scalar_zero();
        for i in 0..self.nrows {
            for j in 0..self.ncols {
                let diff = (self[(i, j)] - other[(i, j)]).scalar_abs();
                if diff > max {
                    max = diff;
                }
            }
        }
        max
    }

    /// Raw view over the whole buffer for the core routines.
    #[inline]
    pub(crate) fn as_raw_mut(&mut self) -> RawMat<T> {
        let ld = self.layout.contiguous_ld(self.nrows, self.ncols);
        // SAFETY: the buffer is exactly nrows * ncols contiguous elements
        unsafe { RawMat::new(self.data.as_mut_ptr(), self.nrows, self.ncols, ld, self.layout) }
    }
}

impl<T: KernelDispatch> Mat<T> {
    /// Standard matrix product `self * rhs`.
    pub fn matmul(&self, rhs: &Mat<T>) -> Mat<T> {
        self.as_ref().matmul(&rhs.as_ref())
    }
}

impl<T: LuScalar> Index<(usize, usize)> for Mat<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        assert!(i < self.nrows, "row index {} out of bounds {}", i, self.nrows);
        assert!(j < self.ncols, "col index {} out of bounds {}", j, self.ncols);
        let ld = self.layout.contiguous_ld(self.nrows, self.ncols);
        &self.data[self.layout.offset(i, j, ld)]
    }
}

impl<T: LuScalar> IndexMut<(usize, usize)> for Mat<T> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        assert!(i < self.nrows, "row index {} out of bounds {}", i, self.nrows);
        assert!(j < self.ncols, "col index {} out of bounds {}", j, self.ncols);
        let ld = self.layout.contiguous_ld(self.nrows, self.ncols);
        &mut self.data[self.layout.offset(i, j, ld)]
    }
}
