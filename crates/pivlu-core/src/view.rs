/// Matrix storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    /// Row-major layout (C-style).
    #[default]
    RowMajor,
    /// Column-major layout (Fortran-style).
    ColMajor,
}

impl Layout {
    /// Linear offset of element `(row, col)` given the leading dimension.
    #[inline(always)]
    pub fn offset(self, row: usize, col: usize, ld: usize) -> usize {
        match self {
            Layout::RowMajor => row * ld + col,
            Layout::ColMajor => col * ld + row,
        }
    }

    /// The layout that reads the same buffer as the transposed matrix.
    #[inline]
    pub fn transpose(self) -> Self {
        match self {
            Layout::RowMajor => Layout::ColMajor,
            Layout::ColMajor => Layout::RowMajor,
        }
    }

    /// Smallest valid leading dimension for a contiguous `nrows x ncols` buffer.
    #[inline]
    pub fn contiguous_ld(self, nrows: usize, ncols: usize) -> usize {
        match self {
            Layout::RowMajor => ncols,
            Layout::ColMajor => nrows,
        }
    }
}

/// Strided, non-owning view over a matrix buffer.
///
/// A `RawMat` is the `(pointer, rows, cols, leading dimension, layout)`
/// tuple every algorithm in this crate works on. Sub-blocks and transposes
/// are new `RawMat` values over the same memory; nothing is copied and no
/// lifetime is tracked, so every accessor that touches memory is `unsafe`.
///
/// # Layout
/// ```text
/// RowMajor, ld = 5, 3x4 view at (1, 1) of a 4x5 buffer:
/// [ .  .  .  .  . ]
/// [ . v00 v01 v02 v03 ]
/// [ . v10 v11 v12 v13 ]
/// [ . v20 v21 v22 v23 ]
/// element (i, j) lives at ptr + i * ld + j
/// ```
#[derive(Debug)]
pub struct RawMat<T> {
    ptr: *mut T,
    nrows: usize,
    ncols: usize,
    ld: usize,
    layout: Layout,
}

impl<T> Copy for RawMat<T> {}

impl<T> Clone for RawMat<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> RawMat<T> {
    /// Create a view from its parts.
    ///
    /// # Safety
    /// - `ptr` must be valid for reads (and writes, if the view is written
    ///   through) at every offset `layout.offset(i, j, ld)` with
    ///   `i < nrows`, `j < ncols`
    /// - `ld` must be at least the extent of the contiguous dimension
    #[inline]
    pub unsafe fn new(ptr: *mut T, nrows: usize, ncols: usize, ld: usize, layout: Layout) -> Self {
        debug_assert!(
            nrows == 0 || ncols == 0 || ld >= layout.contiguous_ld(nrows, ncols),
            "leading dimension {} too small for {:?} {}x{}",
            ld,
            layout,
            nrows,
            ncols
        );
        Self {
            ptr,
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

    /// Leading dimension (stride between rows or columns).
    #[inline]
    pub fn ld(&self) -> usize {
        self.ld
    }

    /// Storage order of the underlying buffer.
    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Pointer to element `(0, 0)`.
    #[inline]
    pub fn as_ptr(&self) -> *mut T {
        self.ptr
    }

    /// Pointer to element `(i, j)`.
    ///
    /// # Safety
    /// `i < nrows` and `j < ncols`.
    #[inline(always)]
    pub unsafe fn ptr_at(self, i: usize, j: usize) -> *mut T {
        debug_assert!(i < self.nrows, "row index {} out of bounds {}", i, self.nrows);
        debug_assert!(j < self.ncols, "col index {} out of bounds {}", j, self.ncols);
        self.ptr.add(self.layout.offset(i, j, self.ld))
    }

    /// View of the `nrows x ncols` block starting at `(i, j)`.
    ///
    /// Empty blocks at the far edge are allowed.
    ///
    /// # Safety
    /// The block must lie within this view.
    #[inline]
    pub unsafe fn submatrix(self, i: usize, j: usize, nrows: usize, ncols: usize) -> Self {
        debug_assert!(
            i + nrows <= self.nrows,
            "rows {}..{} out of bounds {}",
            i,
            i + nrows,
            self.nrows
        );
        debug_assert!(
            j + ncols <= self.ncols,
            "cols {}..{} out of bounds {}",
            j,
            j + ncols,
            self.ncols
        );
        Self {
            ptr: self.ptr.wrapping_add(self.layout.offset(i, j, self.ld)),
            nrows,
            ncols,
            ld: self.ld,
            layout: self.layout,
        }
    }

    /// The transposed view over the same buffer.
    #[inline]
    pub fn transpose(self) -> Self {
        Self {
            ptr: self.ptr,
            nrows: self.ncols,
            ncols: self.nrows,
            ld: self.ld,
            layout: self.layout.transpose(),
        }
    }
}

impl<T: Copy> RawMat<T> {
    /// Read element `(i, j)`.
    ///
    /// # Safety
    /// Same requirements as [`RawMat::ptr_at`].
    #[inline(always)]
    pub unsafe fn read(self, i: usize, j: usize) -> T {
        *self.ptr_at(i, j)
    }

    /// Write element `(i, j)`.
    ///
    /// # Safety
    /// Same requirements as [`RawMat::ptr_at`], and the buffer must be writable.
    #[inline(always)]
    pub unsafe fn write(self, i: usize, j: usize, value: T) {
        *self.ptr_at(i, j) = value;
    }

    /// Swap rows `a` and `b` across every column of the view.
    ///
    /// # Safety
    /// Both rows must be in bounds and the buffer must be writable.
    #[inline]
    pub unsafe fn swap_rows(self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for j in 0..self.ncols {
            std::ptr::swap(self.ptr_at(a, j), self.ptr_at(b, j));
        }
    }
}
