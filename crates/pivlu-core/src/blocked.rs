use crate::kernel::Microkernel;
use crate::rank_k::rank_k_update;
use crate::tiling::{BlockIterator, LuParams, TilingParams};
use crate::triangular::{triangular_solve, Diag, Side, UpLo};
use crate::unblocked::{fill_identity, lu_unblocked, LuInfo, LuStatus};
use crate::view::RawMat;
use pivlu_types::LuScalar;

/// Recursive, cache-blocked LU factorization with partial pivoting.
///
/// Factors the `m x n` view (`m >= n`) in place. Narrow inputs go straight
/// to [`lu_unblocked`]; wider ones are processed in column blocks:
///
/// ```text
///        A00 | A01 | A02
/// lu  =  A10 | A11 | A12
///        A20 | A21 | A22
/// ```
///
/// 1. factor the panel `[A11; A21]` recursively with the panel block cap
/// 2. replay the panel's row swaps on the columns left and right of it
/// 3. `A12 <- L11^-1 * A12` (unit lower triangular solve)
/// 4. `A22 <- A22 - A21 * A12` (rank-k update)
///
/// On return `transpositions[j]` is the global row swapped into row `j`.
/// If a panel hits an exact zero pivot in column `c`, the swaps it made
/// before `c` are still replayed and counted, entries from `c` onward are
/// set to identity and the factorization stops. Columns before `c` then
/// match what [`lu_unblocked`] produces.
///
/// # Safety
/// - `mat` must be readable and writable over its whole view
/// - `transpositions.len() == mat.ncols()` and `mat.nrows() >= mat.ncols()`
/// - `params` must pass [`LuParams::validate`]
pub unsafe fn lu_in_place<T: LuScalar, K: Microkernel<T>>(
    mat: RawMat<T>,
    transpositions: &mut [usize],
    params: &LuParams,
    tiling: &TilingParams,
    kernel: &K,
) -> LuInfo {
    let m = mat.nrows();
    let n = mat.ncols();
    debug_assert!(m >= n, "matrix must be at least as tall as it is wide");
    debug_assert_eq!(transpositions.len(), n);

    if n <= params.recursion_threshold {
        return lu_unblocked(mat, transpositions);
    }

    let block_size = LuParams::block_size(n, params.max_block_size);
    if block_size >= n {
        return lu_unblocked(mat, transpositions);
    }

    log::trace!("blocked LU: {}x{} in blocks of {}", m, n, block_size);

    let panel_params = params.for_panel();
    let mut transposition_count = 0;

    for (k, bs) in BlockIterator::new(n, block_size) {
        let trailing_rows = m - k - bs;
        let trailing_cols = n - k - bs;

        let panel = mat.submatrix(k, k, m - k, bs);
        let info = lu_in_place(
            panel,
            &mut transpositions[k..k + bs],
            &panel_params,
            tiling,
            kernel,
        );
        transposition_count += info.transposition_count;

        if let LuStatus::ZeroPivot { column } = info.status {
            replay_panel_swaps(mat, transpositions, k, column, bs);
            fill_identity(transpositions, k + column);
            return LuInfo {
                transposition_count,
                status: info.status.offset(k),
            };
        }

        replay_panel_swaps(mat, transpositions, k, bs, bs);

        if trailing_cols > 0 {
            let a11 = mat.submatrix(k, k, bs, bs);
            let a12 = mat.submatrix(k, k + bs, bs, trailing_cols);
            triangular_solve(a11, a12, Side::Left, UpLo::Lower, Diag::Unit, tiling, kernel);

            if trailing_rows > 0 {
                let a21 = mat.submatrix(k + bs, k, trailing_rows, bs);
                let a22 = mat.submatrix(k + bs, k + bs, trailing_rows, trailing_cols);
                rank_k_update(a22, a21, a12, tiling, kernel);
            }
        }
    }

    LuInfo {
        transposition_count,
        status: LuStatus::Complete,
    }
}

/// Lift the first `len` panel-local pivots of the `bs`-wide panel at column
/// `k` to global rows and apply them to the columns outside the panel.
unsafe fn replay_panel_swaps<T: Copy>(
    mat: RawMat<T>,
    transpositions: &mut [usize],
    k: usize,
    len: usize,
    bs: usize,
) {
    let m = mat.nrows();
    let left = mat.submatrix(0, 0, m, k);
    let right = mat.submatrix(0, k + bs, m, mat.ncols() - k - bs);
    for (i, piv) in transpositions.iter_mut().enumerate().skip(k).take(len) {
        *piv += k;
        left.swap_rows(i, *piv);
        right.swap_rows(i, *piv);
    }
}
