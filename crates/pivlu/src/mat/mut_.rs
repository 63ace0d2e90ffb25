//! Mutable matrix reference type.

use pivlu_core::{Layout, RawMat};
use pivlu_types::LuScalar;

use super::{check_strided, Mat, MatRef};

/// Mutable strided view over scalar data.
///
/// Used for in-place solves. Sub-blocks and transposes reborrow the same
/// buffer.
#[derive(Debug)]
pub struct MatMut<'a, T: LuScalar> {
    data: &'a mut [T],
    nrows: usize,
    ncols: usize,
    ld: usize,
    layout: Layout,
}

impl<'a, T: LuScalar> MatMut<'a, T> {
    /// Create a mutable matrix reference from a row-major slice.
    pub fn from_slice(data: &'a mut [T], nrows: usize, ncols: usize) -> Self {
        Self::from_slice_with_layout(data, nrows, ncols, Layout::RowMajor)
    }

    /// Create a mutable matrix reference over contiguous data in `layout`.
    pub fn from_slice_with_layout(
        data: &'a mut [T],
        nrows: usize,
        ncols: usize,
        layout: Layout,
    ) -> Self {
        assert_eq!(
            data.len(),
            nrows * ncols,
            "data length {} != nrows {} * ncols {}",
            data.len(),
            nrows,
            ncols
        );
        let ld = layout.contiguous_ld(nrows, ncols);
        Self {
            data,
            nrows,
            ncols,
            ld,
            layout,
        }
    }

    /// Create a mutable matrix reference with an explicit leading dimension.
    pub fn from_strided(
        data: &'a mut [T],
        nrows: usize,
        ncols: usize,
        ld: usize,
        layout: Layout,
    ) -> Self {
        check_strided(data.len(), nrows, ncols, ld, layout);
        Self {
            data,
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

    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    #[inline]
    pub fn ld(&self) -> usize {
        self.ld
    }

    /// Get the value at position (i, j).
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[self.index(i, j)]
    }

    /// Get a mutable reference to the value at position (i, j).
    #[inline]
    pub fn get_mut(&mut self, i: usize, j: usize) -> &mut T {
        let idx = self.index(i, j);
        &mut self.data[idx]
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        assert!(i < self.nrows, "row index {} out of bounds {}", i, self.nrows);
        assert!(j < self.ncols, "col index {} out of bounds {}", j, self.ncols);
        self.layout.offset(i, j, self.ld)
    }

    /// Immutable view over the same data.
    pub fn rb(&self) -> MatRef<'_, T> {
        MatRef::from_strided(&*self.data, self.nrows, self.ncols, self.ld, self.layout)
    }

    /// Shorter-lived mutable view over the same data.
    pub fn rb_mut(&mut self) -> MatMut<'_, T> {
        MatMut {
            data: &mut *self.data,
            nrows: self.nrows,
            ncols: self.ncols,
            ld: self.ld,
            layout: self.layout,
        }
    }

    /// Mutable view of the `nrows x ncols` block starting at `(i, j)`.
    pub fn submatrix_mut(self, i: usize, j: usize, nrows: usize, ncols: usize) -> Self {
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
        let start = if nrows == 0 || ncols == 0 {
            0
        } else {
            self.layout.offset(i, j, self.ld)
        };
        let data = self.data;
        Self {
            data: &mut data[start..],
            nrows,
            ncols,
            ld: self.ld,
            layout: self.layout,
        }
    }

    /// The transposed view over the same buffer.
    pub fn transpose_mut(self) -> Self {
        Self {
            data: self.data,
            nrows: self.ncols,
            ncols: self.nrows,
            ld: self.ld,
            layout: self.layout.transpose(),
        }
    }

    /// Overwrite every element with the matching element of `src`.
    pub fn copy_from(&mut self, src: MatRef<'_, T>) {
        assert_eq!(
            (self.nrows, self.ncols),
            (src.nrows(), src.ncols()),
            "shape mismatch"
        );
        for i in 0..self.nrows {
            for j in 0..self.ncols {
                *self.get_mut(i, j) = src.get(i, j);
            }
        }
    }

    /// Set every element to `value`.
    pub fn fill(&mut self, value: T) {
        for i in 0..self.nrows {
            for j in 0..self.ncols {
                *self.get_mut(i, j) = value;
            }
        }
    }

    /// Copy into an owned matrix with this view's layout.
    pub fn to_owned(&self) -> Mat<T> {
        self.rb().to_owned()
    }

    /// Raw view for the core routines.
    #[inline]
    pub(crate) fn as_raw(&mut self) -> RawMat<T> {
        // SAFETY: the slice covers every element addressed by the view
        unsafe {
            RawMat::new(
                self.data.as_mut_ptr(),
                self.nrows,
                self.ncols,
                self.ld,
                self.layout,
            )
        }
    }
}
