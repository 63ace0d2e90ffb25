use crate::view::RawMat;
use pivlu_types::LuScalar;

/// Outcome of a factorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LuStatus {
    /// Every pivot was non-zero.
    Complete,
    /// The largest remaining magnitude in `column` was exactly zero.
    ///
    /// Columns before `column` hold valid factors; later coefficients are
    /// finite but unspecified.
    ZeroPivot { column: usize },
}

impl LuStatus {
    /// Whether every pivot was non-zero.
    #[inline]
    pub fn is_complete(self) -> bool {
        matches!(self, LuStatus::Complete)
    }

    /// Shift a zero-pivot column from a panel's local index to the caller's.
    #[inline]
    pub fn offset(self, by: usize) -> Self {
        match self {
            LuStatus::Complete => LuStatus::Complete,
            LuStatus::ZeroPivot { column } => LuStatus::ZeroPivot {
                column: column + by,
            },
        }
    }
}

/// Summary returned by the elimination routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LuInfo {
    /// Number of row swaps that exchanged two distinct rows.
    pub transposition_count: usize,
    pub status: LuStatus,
}

/// Fill `transpositions[from..]` with identity entries.
#[inline]
pub(crate) fn fill_identity(transpositions: &mut [usize], from: usize) {
    for (i, t) in transpositions.iter_mut().enumerate().skip(from) {
        *t = i;
    }
}

/// Column-by-column elimination with partial pivoting.
///
/// Factors the `m x k` view (`m >= k`) in place: on return the strict
/// lower part of the leading `k` columns holds L (unit diagonal implied)
/// and the upper part holds U. `transpositions[j]` is the local row swapped
/// into row `j` at step `j`.
///
/// Pivot search picks the first row holding the largest magnitude. If that
/// magnitude is exactly zero at step `j`, entries `j..k` are set to
/// identity and elimination stops without dividing.
///
/// # Safety
/// - `mat` must be readable and writable over its whole view
/// - `transpositions.len() == mat.ncols()` and `mat.nrows() >= mat.ncols()`
pub unsafe fn lu_unblocked<T: LuScalar>(mat: RawMat<T>, transpositions: &mut [usize]) -> LuInfo {
    let m = mat.nrows();
    let k = mat.ncols();
    debug_assert!(m >= k, "panel must be at least as tall as it is wide");
    debug_assert_eq!(transpositions.len(), k);

    let zero = T::scalar_zero();
    let mut transposition_count = 0;

    for j in 0..k {
        let mut pivot_row = j;
        let mut pivot_abs = mat.read(j, j).scalar_abs();
        for i in j + 1..m {
            let candidate = mat.read(i, j).scalar_abs();
            if candidate > pivot_abs {
                pivot_abs = candidate;
                pivot_row = i;
            }
        }

        if pivot_abs == zero {
            fill_identity(transpositions, j);
            return LuInfo {
                transposition_count,
                status: LuStatus::ZeroPivot { column: j },
            };
        }

        transpositions[j] = pivot_row;
        if pivot_row != j {
            mat.swap_rows(j, pivot_row);
            transposition_count += 1;
        }

        let inv = T::scalar_one() / mat.read(j, j);
        for i in j + 1..m {
            let l = mat.read(i, j) * inv;
            mat.write(i, j, l);
        }

        // Rank-1 update of the trailing block
        for c in j + 1..k {
            let u = mat.read(j, c);
            if u == zero {
                continue;
            }
            for i in j + 1..m {
                let value = mat.read(i, c) - mat.read(i, j) * u;
                mat.write(i, c, value);
            }
        }
    }

    LuInfo {
        transposition_count,
        status: LuStatus::Complete,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Layout;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_two_by_two() {
        // [[2, 1], [4, 3]]
        let mut a = vec![2.0f64, 1.0, 4.0, 3.0];
        let mut t = vec![0usize; 2];

        let info = unsafe {
            let view = RawMat::new(a.as_mut_ptr(), 2, 2, 2, Layout::RowMajor);
            lu_unblocked(view, &mut t)
        };

        assert_eq!(t, vec![1, 1]);
        assert_eq!(info.transposition_count, 1);
        assert_eq!(info.status, LuStatus::Complete);
        assert_eq!(a, vec![4.0, 3.0, 0.5, -0.5]);
    }

    #[test]
    fn test_no_swap_needed() {
        let mut a = vec![4.0f64, 3.0, 2.0, 1.0];
        let mut t = vec![0usize; 2];

        let info = unsafe {
            let view = RawMat::new(a.as_mut_ptr(), 2, 2, 2, Layout::RowMajor);
            lu_unblocked(view, &mut t)
        };

        assert_eq!(t, vec![0, 1]);
        assert_eq!(info.transposition_count, 0);
        assert_approx_eq!(a[2], 0.5);
        assert_approx_eq!(a[3], -0.5);
    }

    #[test]
    fn test_first_max_wins() {
        // Column 0 has |-3| twice; the first one must be chosen.
        let mut a = vec![1.0f64, 0.0, -3.0, 1.0, 3.0, 2.0];
        let mut t = vec![0usize; 2];

        unsafe {
            let view = RawMat::new(a.as_mut_ptr(), 3, 2, 2, Layout::RowMajor);
            lu_unblocked(view, &mut t);
        }

        assert_eq!(t[0], 1);
        assert_eq!(a[0], -3.0);
    }

    #[test]
    fn test_tall_panel() {
        // 3x2 panel [[1, 2], [3, 4], [5, 6]]
        let mut a = vec![1.0f64, 3.0, 5.0, 2.0, 4.0, 6.0];
        let mut t = vec![0usize; 2];

        let info = unsafe {
            let view = RawMat::new(a.as_mut_ptr(), 3, 2, 3, Layout::ColMajor);
            lu_unblocked(view, &mut t)
        };

        assert_eq!(info.status, LuStatus::Complete);
        assert_eq!(t[0], 2);
        // U row 0 = [5, 6]
        assert_approx_eq!(a[1], 0.6);
        assert_approx_eq!(a[2], 0.2);
        assert_eq!(a[0], 5.0);
        assert_eq!(a[3], 6.0);
    }

    #[test]
    fn test_zero_pivot_stops() {
        // [[0, 1, 2], [0, 3, 4], [0, 5, 6]]
        let mut a = vec![0.0f64, 1.0, 2.0, 0.0, 3.0, 4.0, 0.0, 5.0, 6.0];
        let mut t = vec![99usize; 3];

        let info = unsafe {
            let view = RawMat::new(a.as_mut_ptr(), 3, 3, 3, Layout::RowMajor);
            lu_unblocked(view, &mut t)
        };

        assert_eq!(info.status, LuStatus::ZeroPivot { column: 0 });
        assert_eq!(info.transposition_count, 0);
        assert_eq!(t, vec![0, 1, 2]);
        assert!(a.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_zero_pivot_later_column() {
        // Second column becomes exactly zero after the first step.
        let mut a = vec![4.0f64, 2.0, 1.0, 2.0, 1.0, 3.0, 1.0, 0.5, 5.0];
        let mut t = vec![0usize; 3];

        let info = unsafe {
            let view = RawMat::new(a.as_mut_ptr(), 3, 3, 3, Layout::RowMajor);
            lu_unblocked(view, &mut t)
        };

        assert_eq!(info.status, LuStatus::ZeroPivot { column: 1 });
        assert_eq!(t, vec![0, 1, 2]);
        assert!(a.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_status_helpers() {
        assert!(LuStatus::Complete.is_complete());
        assert!(!LuStatus::ZeroPivot { column: 0 }.is_complete());
        assert_eq!(
            LuStatus::ZeroPivot { column: 2 }.offset(5),
            LuStatus::ZeroPivot { column: 7 }
        );
        assert_eq!(LuStatus::Complete.offset(5), LuStatus::Complete);
    }
}
