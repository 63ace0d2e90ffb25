//! Immutable matrix reference type.

use pivlu_core::{Layout, RawMat};
use pivlu_simd::{gemm_dispatch, KernelDispatch};
use pivlu_types::LuScalar;

use super::{check_strided, Mat};

/// Immutable strided view over scalar data.
///
/// This is a lightweight view type that can be copied freely.
///
/// ```
/// use pivlu::{Layout, MatRef};
///
/// let data = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let a = MatRef::from_slice(&data, 2, 3);
///
/// assert_eq!(a.nrows(), 2);
/// assert_eq!(a.ncols(), 3);
/// assert_eq!(a.get(0, 0), 1.0);
///
/// // The same buffer read column by column
/// let b = MatRef::from_slice_with_layout(&data, 2, 3, Layout::ColMajor);
/// assert_eq!(b.get(0, 1), 3.0);
/// ```
#[derive(Debug)]
pub struct MatRef<'a, T: LuScalar> {
    data: &'a [T],
    offset: usize,
    nrows: usize,
    ncols: usize,
    ld: usize,
    layout: Layout,
}

impl<'a, T: LuScalar> Copy for MatRef<'a, T> {}

impl<'a, T: LuScalar> Clone for MatRef<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T: LuScalar> MatRef<'a, T> {
    /// Create a matrix reference from a slice of scalars.
    ///
    /// The data must be in row-major order with length `nrows * ncols`.
    pub fn from_slice(data: &'a [T], nrows: usize, ncols: usize) -> Self {
        Self::from_slice_with_layout(data, nrows, ncols, Layout::RowMajor)
    }

    /// Create a matrix reference over contiguous data in the given layout.
    pub fn from_slice_with_layout(data: &'a [T], nrows: usize, ncols: usize, layout: Layout) -> Self {
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
            offset: 0,
            nrows,
            ncols,
            ld: layout.contiguous_ld(nrows, ncols),
            layout,
        }
    }

    /// Create a matrix reference with an explicit leading dimension.
    pub fn from_strided(
        data: &'a [T],
        nrows: usize,
        ncols: usize,
        ld: usize,
        layout: Layout,
    ) -> Self {
        check_strided(data.len(), nrows, ncols, ld, layout);
        Self {
            data,
            offset: 0,
            nrows,
            ncols,
            ld,
            layout,
        }
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

    /// Storage order of the underlying buffer.
    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Leading dimension of the underlying buffer.
    #[inline]
    pub fn ld(&self) -> usize {
        self.ld
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Get the scalar value at position (i, j).
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        assert!(i < self.nrows, "row index {} out of bounds {}", i, self.nrows);
        assert!(j < self.ncols, "col index {} out of bounds {}", j, self.ncols);
        self.data[self.offset + self.layout.offset(i, j, self.ld)]
    }

    /// View of the `nrows x ncols` block starting at `(i, j)`.
    pub fn submatrix(self, i: usize, j: usize, nrows: usize, ncols: usize) -> Self {
        assert!(
            i + nrows <= self.nrows && j + ncols <= self.ncols,
            "block ({}, {}) of size {}x{} exceeds {}x{}",
            i,
            j,
            nrows,
            ncols,
            self.nrows,
            self.ncols
        );
        let offset = if nrows == 0 || ncols == 0 {
            self.offset
        } else {
            self.offset + self.layout.offset(i, j, self.ld)
        };
        Self {
            data: self.data,
            offset,
            nrows,
            ncols,
            ld: self.ld,
            layout: self.layout,
        }
    }

    /// Row `i` as a `1 x ncols` view.
    pub fn row(self, i: usize) -> Self {
        self.submatrix(i, 0, 1, self.ncols)
    }

    /// Column `j` as an `nrows x 1` view.
    pub fn col(self, j: usize) -> Self {
        self.submatrix(0, j, self.nrows, 1)
    }

    /// The transposed view over the same buffer.
    pub fn transpose(self) -> Self {
        Self {
            data: self.data,
            offset: self.offset,
            nrows: self.ncols,
            ncols: self.nrows,
            ld: self.ld,
            layout: self.layout.transpose(),
        }
    }

    /// Copy into an owned, contiguous matrix with this view's layout.
    pub fn to_owned(&self) -> Mat<T> {
        Mat::from_fn_with_layout(self.nrows, self.ncols, self.layout, |i, j| self.get(i, j))
    }

    /// Raw view for the core routines. Must never be written through.
    #[inline]
    pub(crate) fn as_raw(&self) -> RawMat<T> {
        let ptr = self.data.as_ptr().wrapping_add(self.offset) as *mut T;
        // SAFETY: bounds were checked when this view was built
        unsafe { RawMat::new(ptr, self.nrows, self.ncols, self.ld, self.layout) }
    }
}

// Matrix multiplication methods
impl<'a, T: KernelDispatch> MatRef<'a, T> {
    /// Standard matrix product `C = A * B`, stored in `A`'s layout.
    ///
    /// # Example
    ///
    /// ```
    /// use pivlu::MatRef;
    ///
    /// let a_data = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
    /// let b_data = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
    ///
    /// let a = MatRef::from_slice(&a_data, 2, 3);
    /// let b = MatRef::from_slice(&b_data, 3, 2);
    ///
    /// let c = a.matmul(&b);
    /// assert_eq!(c[(0, 0)], 22.0);
    /// ```
    pub fn matmul(&self, rhs: &MatRef<'_, T>) -> Mat<T> {
        assert_eq!(
            self.ncols, rhs.nrows,
            "dimension mismatch: A is {}x{}, B is {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols
        );

        let mut c = Mat::zeros_with_layout(self.nrows, rhs.ncols, self.layout);
        unsafe {
            gemm_dispatch(c.as_raw_mut(), self.as_raw(), rhs.as_raw(), T::scalar_one());
        }
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice() {
        let data = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
        let m = MatRef::from_slice(&data, 2, 3);
        assert_eq!(m.nrows(), 2);
        assert_eq!(m.ncols(), 3);
        assert_eq!(m.layout(), Layout::RowMajor);
        assert_eq!(m.get(1, 2), 6.0);
    }

    #[test]
    #[should_panic(expected = "data length")]
    fn test_from_slice_wrong_len() {
        let data = [1.0f64; 5];
        let _ = MatRef::from_slice(&data, 2, 3);
    }

    #[test]
    fn test_col_major_view() {
        let data = [1.0f64, 4.0, 2.0, 5.0, 3.0, 6.0];
        let m = MatRef::from_slice_with_layout(&data, 2, 3, Layout::ColMajor);
        assert_eq!(m.get(0, 2), 3.0);
        assert_eq!(m.get(1, 0), 4.0);
    }

    #[test]
    fn test_strided_view() {
        // 2x2 view with padding after every row
        let data = [1.0f64, 2.0, -1.0, 3.0, 4.0];
        let m = MatRef::from_strided(&data, 2, 2, 3, Layout::RowMajor);
        assert_eq!(m.get(1, 0), 3.0);
        assert_eq!(m.get(1, 1), 4.0);
    }

    #[test]
    fn test_submatrix_row_col() {
        let data: Vec<f64> = (0..12).map(|x| x as f64).collect();
        let m = MatRef::from_slice(&data, 3, 4);

        let s = m.submatrix(1, 1, 2, 2);
        assert_eq!(s.get(0, 0), 5.0);
        assert_eq!(s.get(1, 1), 10.0);

        assert_eq!(m.row(2).get(0, 3), 11.0);
        assert_eq!(m.col(1).get(2, 0), 9.0);
        assert_eq!(m.submatrix(3, 0, 0, 4).nrows(), 0);
    }

    #[test]
    fn test_transpose() {
        let data = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
        let m = MatRef::from_slice(&data, 2, 3).transpose();
        assert_eq!(m.nrows(), 3);
        assert_eq!(m.ncols(), 2);
        assert_eq!(m.layout(), Layout::ColMajor);
        assert_eq!(m.get(2, 0), 3.0);
        assert_eq!(m.transpose().get(0, 2), 3.0);
    }

    #[test]
    fn test_to_owned_keeps_layout() {
        let data = [1.0f64, 4.0, 2.0, 5.0];
        let m = MatRef::from_slice_with_layout(&data, 2, 2, Layout::ColMajor);
        let owned = m.to_owned();
        assert_eq!(owned.layout(), Layout::ColMajor);
        assert_eq!(owned.as_slice(), &data);
    }

    #[test]
    fn test_matmul() {
        let a_data = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b_data = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];

        let a = MatRef::from_slice(&a_data, 2, 3);
        let b = MatRef::from_slice(&b_data, 3, 2);

        let c = a.matmul(&b);
        assert_eq!(c[(0, 0)], 22.0);
        assert_eq!(c[(0, 1)], 28.0);
        assert_eq!(c[(1, 0)], 49.0);
        assert_eq!(c[(1, 1)], 64.0);
    }

    #[test]
    fn test_matmul_transposed_operand() {
        // A^T * A for A = [[1, 2], [3, 4]]
        let data = [1.0f64, 2.0, 3.0, 4.0];
        let a = MatRef::from_slice(&data, 2, 2);
        let c = a.transpose().matmul(&a);
        assert_eq!(c.layout(), Layout::ColMajor);
        assert_eq!(c[(0, 0)], 10.0);
        assert_eq!(c[(0, 1)], 14.0);
        assert_eq!(c[(1, 1)], 20.0);
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn test_matmul_mismatch() {
        let data = [1.0f64; 6];
        let a = MatRef::from_slice(&data, 2, 3);
        let _ = a.matmul(&a);
    }
}
