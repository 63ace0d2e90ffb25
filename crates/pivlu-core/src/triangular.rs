use crate::kernel::Microkernel;
use crate::rank_k::rank_k_update;
use crate::tiling::{BlockIterator, RevBlockIterator, TilingParams};
use crate::view::RawMat;
use pivlu_types::LuScalar;

/// Which side of the unknown the triangular factor sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Solve `T * X = B`.
    Left,
    /// Solve `X * T = B`.
    Right,
}

/// Which triangle of the factor is referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpLo {
    Lower,
    Upper,
}

impl UpLo {
    /// The triangle a transposed factor occupies.
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            UpLo::Lower => UpLo::Upper,
            UpLo::Upper => UpLo::Lower,
        }
    }
}

/// Whether the diagonal is read or taken to be all ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Diag {
    Unit,
    NonUnit,
}

/// Blocked triangular solve, overwriting `rhs` with the solution.
///
/// Only the triangle named by `uplo` is read from `tri`; with
/// [`Diag::Unit`] the diagonal is not read either. The factor is walked in
/// `tiling.kc`-wide blocks in substitution order. Inside a block, panels
/// of width `max(MR, NR)` are solved directly and pushed into the rest of
/// the block through the rank-k kernel; each finished block is then pushed
/// into every remaining row of `rhs` with a single rank-`kc` update.
///
/// Right-side solves run the left-side algorithm on the transposed views.
///
/// # Safety
/// - `tri` must be square and readable over the referenced triangle
/// - `rhs` must be writable, with `rhs.nrows() == tri.nrows()` for
///   [`Side::Left`] or `rhs.ncols() == tri.nrows()` for [`Side::Right`]
/// - `tri` and `rhs` must not overlap
/// - with [`Diag::NonUnit`], the diagonal must be non-zero
pub unsafe fn triangular_solve<T: LuScalar, K: Microkernel<T>>(
    tri: RawMat<T>,
    rhs: RawMat<T>,
    side: Side,
    uplo: UpLo,
    diag: Diag,
    tiling: &TilingParams,
    kernel: &K,
) {
    debug_assert_eq!(tri.nrows(), tri.ncols(), "triangular factor must be square");

    match side {
        Side::Left => solve_left(tri, rhs, uplo, diag, tiling, kernel),
        // X T = B  <=>  T^T X^T = B^T
        Side::Right => solve_left(
            tri.transpose(),
            rhs.transpose(),
            uplo.flip(),
            diag,
            tiling,
            kernel,
        ),
    }
}

unsafe fn solve_left<T: LuScalar, K: Microkernel<T>>(
    tri: RawMat<T>,
    rhs: RawMat<T>,
    uplo: UpLo,
    diag: Diag,
    tiling: &TilingParams,
    kernel: &K,
) {
    let size = tri.nrows();
    let cols = rhs.ncols();
    debug_assert_eq!(rhs.nrows(), size, "rhs rows mismatch");

    if size == 0 || cols == 0 {
        return;
    }

    let kc = tiling.kc.max(1);
    let panel = K::MR.max(K::NR);

    match uplo {
        UpLo::Lower => {
            for (k2, block) in BlockIterator::new(size, kc) {
                for (k1, width) in BlockIterator::new(block, panel) {
                    let start = k2 + k1;
                    let solved = rhs.submatrix(start, 0, width, cols);
                    solve_small_lower(tri.submatrix(start, start, width, width), solved, diag);

                    let rest = block - k1 - width;
                    if rest > 0 {
                        rank_k_update(
                            rhs.submatrix(start + width, 0, rest, cols),
                            tri.submatrix(start + width, start, rest, width),
                            solved,
                            tiling,
                            kernel,
                        );
                    }
                }

                let end = k2 + block;
                if end < size {
                    rank_k_update(
                        rhs.submatrix(end, 0, size - end, cols),
                        tri.submatrix(end, k2, size - end, block),
                        rhs.submatrix(k2, 0, block, cols),
                        tiling,
                        kernel,
                    );
                }
            }
        }
        UpLo::Upper => {
            for (k2, block) in RevBlockIterator::new(size, kc) {
                for (k1, width) in RevBlockIterator::new(block, panel) {
                    let start = k2 + k1;
                    let solved = rhs.submatrix(start, 0, width, cols);
                    solve_small_upper(tri.submatrix(start, start, width, width), solved, diag);

                    if k1 > 0 {
                        rank_k_update(
                            rhs.submatrix(k2, 0, k1, cols),
                            tri.submatrix(k2, start, k1, width),
                            solved,
                            tiling,
                            kernel,
                        );
                    }
                }

                if k2 > 0 {
                    rank_k_update(
                        rhs.submatrix(0, 0, k2, cols),
                        tri.submatrix(0, k2, k2, block),
                        rhs.submatrix(k2, 0, block, cols),
                        tiling,
                        kernel,
                    );
                }
            }
        }
    }
}

/// Forward substitution on a small diagonal block.
unsafe fn solve_small_lower<T: LuScalar>(tri: RawMat<T>, rhs: RawMat<T>, diag: Diag) {
    let size = tri.nrows();
    for j in 0..rhs.ncols() {
        for i in 0..size {
            let mut x = rhs.read(i, j);
            if diag == Diag::NonUnit {
                x /= tri.read(i, i);
                rhs.write(i, j, x);
            }
            if x == T::scalar_zero() {
                continue;
            }
            for r in i + 1..size {
                let value = rhs.read(r, j) - tri.read(r, i) * x;
                rhs.write(r, j, value);
            }
        }
    }
}

/// Backward substitution on a small diagonal block.
unsafe fn solve_small_upper<T: LuScalar>(tri: RawMat<T>, rhs: RawMat<T>, diag: Diag) {
    let size = tri.nrows();
    for j in 0..rhs.ncols() {
        for i in (0..size).rev() {
            let mut x = rhs.read(i, j);
            if diag == Diag::NonUnit {
                x /= tri.read(i, i);
                rhs.write(i, j, x);
            }
            if x == T::scalar_zero() {
                continue;
            }
            for r in 0..i {
                let value = rhs.read(r, j) - tri.read(r, i) * x;
                rhs.write(r, j, value);
            }
        }
    }
}
