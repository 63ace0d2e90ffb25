use pivlu_core::{Diag, LuParams, Side, UpLo};
use pivlu_simd::{triangular_solve_dispatch, KernelDispatch};

use crate::error::{LuError, Result};
use crate::lu::PartialPivLu;
use crate::mat::{Mat, MatMut, MatRef};

/// Factor a square matrix with partial pivoting.
///
/// # Example
///
/// ```
/// use pivlu::{lu_factor, MatRef};
///
/// let a = [2.0f64, 1.0, 4.0, 3.0];
/// let lu = lu_factor(MatRef::from_slice(&a, 2, 2)).unwrap();
///
/// assert_eq!(lu.transpositions(), &[1, 1]);
/// assert_eq!(lu.determinant(), 2.0);
/// ```
pub fn lu_factor<T: KernelDispatch>(a: MatRef<'_, T>) -> Result<PartialPivLu<T>> {
    PartialPivLu::compute(a)
}

/// Factor with an explicit blocking policy.
pub fn lu_factor_with<T: KernelDispatch>(
    a: MatRef<'_, T>,
    params: LuParams,
) -> Result<PartialPivLu<T>> {
    PartialPivLu::compute_with(a, params)
}

/// Solve `A * X = B` in one call.
///
/// # Example
///
/// ```
/// use pivlu::{solve, MatRef};
///
/// let a = [3.0f64, 1.0, 1.0, 2.0];
/// let b = [9.0f64, 8.0];
///
/// let x = solve(MatRef::from_slice(&a, 2, 2), MatRef::from_slice(&b, 2, 1)).unwrap();
/// assert!((x[(0, 0)] - 2.0).abs() < 1e-12);
/// assert!((x[(1, 0)] - 3.0).abs() < 1e-12);
/// ```
pub fn solve<T: KernelDispatch>(a: MatRef<'_, T>, b: MatRef<'_, T>) -> Result<Mat<T>> {
    lu_factor(a)?.solve(b)
}

/// Determinant of a square matrix.
pub fn determinant<T: KernelDispatch>(a: MatRef<'_, T>) -> Result<T> {
    Ok(lu_factor(a)?.determinant())
}

/// Inverse of a square matrix.
///
/// A singular input is not an error; its inverse has non-finite entries.
pub fn inverse<T: KernelDispatch>(a: MatRef<'_, T>) -> Result<Mat<T>> {
    Ok(lu_factor(a)?.inverse())
}

/// Solve `T * X = B` (`Side::Left`) or `X * T = B` (`Side::Right`) in place.
///
/// Only the `uplo` triangle of `tri` is read; with `Diag::Unit` its
/// diagonal is not read either.
///
/// # Example
///
/// ```
/// use pivlu::{triangular_solve, Diag, MatMut, MatRef, Side, UpLo};
///
/// // [[2, 0], [1, 4]] * x = [2, 9]
/// let t = [2.0f64, 0.0, 1.0, 4.0];
/// let mut b = [2.0f64, 9.0];
///
/// triangular_solve(
///     MatRef::from_slice(&t, 2, 2),
///     Side::Left,
///     UpLo::Lower,
///     Diag::NonUnit,
///     MatMut::from_slice(&mut b, 2, 1),
/// )
/// .unwrap();
///
/// assert_eq!(b, [1.0, 2.0]);
/// ```
pub fn triangular_solve<T: KernelDispatch>(
    tri: MatRef<'_, T>,
    side: Side,
    uplo: UpLo,
    diag: Diag,
    mut rhs: MatMut<'_, T>,
) -> Result<()> {
    if !tri.is_square() {
        return Err(LuError::NotSquare {
            nrows: tri.nrows(),
            ncols: tri.ncols(),
        });
    }
    let (dim, name) = match side {
        Side::Left => (rhs.nrows(), "rows"),
        Side::Right => (rhs.ncols(), "columns"),
    };
    if dim != tri.nrows() {
        return Err(LuError::DimensionMismatch(format!(
            "rhs has {} {}, triangular factor is {}x{}",
            dim,
            name,
            tri.nrows(),
            tri.ncols()
        )));
    }

    unsafe {
        triangular_solve_dispatch(tri.as_raw(), rhs.as_raw(), side, uplo, diag);
    }
    Ok(())
}

/// Standard matrix product `A * B`.
pub fn matmul<T: KernelDispatch>(a: MatRef<'_, T>, b: MatRef<'_, T>) -> Result<Mat<T>> {
    if a.ncols() != b.nrows() {
        return Err(LuError::DimensionMismatch(format!(
            "A is {}x{}, B is {}x{}",
            a.nrows(),
            a.ncols(),
            b.nrows(),
            b.ncols()
        )));
    }
    Ok(a.matmul(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use pivlu_core::Layout;

    #[test]
    fn test_solve_wrapper() {
        let a = [4.0f64, -2.0, 1.0, -2.0, 4.0, -2.0, 1.0, -2.0, 4.0];
        let b = [11.0f64, -16.0, 17.0];
        let x = solve(MatRef::from_slice(&a, 3, 3), MatRef::from_slice(&b, 3, 1)).unwrap();
        assert_approx_eq!(x[(0, 0)], 1.0, 1e-12);
        assert_approx_eq!(x[(1, 0)], -2.0, 1e-12);
        assert_approx_eq!(x[(2, 0)], 3.0, 1e-12);
    }

    #[test]
    fn test_determinant_wrapper() {
        let a = [2.0f32, 1.0, 4.0, 3.0];
        assert_eq!(determinant(MatRef::from_slice(&a, 2, 2)).unwrap(), 2.0);

        let rect = [1.0f32; 6];
        assert!(determinant(MatRef::from_slice(&rect, 3, 2)).is_err());
    }

    #[test]
    fn test_inverse_wrapper() {
        let a = [4.0f64, 7.0, 2.0, 6.0];
        let inv = inverse(MatRef::from_slice(&a, 2, 2)).unwrap();
        assert_approx_eq!(inv[(0, 0)], 0.6, 1e-12);
        assert_approx_eq!(inv[(0, 1)], -0.7, 1e-12);
        assert_approx_eq!(inv[(1, 0)], -0.2, 1e-12);
        assert_approx_eq!(inv[(1, 1)], 0.4, 1e-12);
    }

    #[test]
    fn test_triangular_solve_right_upper() {
        // x * [[2, 1], [0, 4]] = [4, 10]
        let t = [2.0f64, 1.0, 0.0, 4.0];
        let mut b = [4.0f64, 10.0];
        triangular_solve(
            MatRef::from_slice(&t, 2, 2),
            Side::Right,
            UpLo::Upper,
            Diag::NonUnit,
            MatMut::from_slice(&mut b, 1, 2),
        )
        .unwrap();
        assert_eq!(b, [2.0, 2.0]);
    }

    #[test]
    fn test_triangular_solve_col_major_unit() {
        // unit lower [[1, 0], [3, 1]], stored column-major
        let t = [99.0f64, 3.0, 0.0, 99.0];
        let mut b = [1.0f64, 5.0];
        triangular_solve(
            MatRef::from_slice_with_layout(&t, 2, 2, Layout::ColMajor),
            Side::Left,
            UpLo::Lower,
            Diag::Unit,
            MatMut::from_slice(&mut b, 2, 1),
        )
        .unwrap();
        assert_eq!(b, [1.0, 2.0]);
    }

    #[test]
    fn test_triangular_solve_errors() {
        let t = [1.0f64; 6];
        let mut b = [1.0f64; 2];
        let err = triangular_solve(
            MatRef::from_slice(&t, 2, 3),
            Side::Left,
            UpLo::Lower,
            Diag::Unit,
            MatMut::from_slice(&mut b, 2, 1),
        )
        .unwrap_err();
        assert_eq!(err, LuError::NotSquare { nrows: 2, ncols: 3 });

        let t = [1.0f64; 4];
        let err = triangular_solve(
            MatRef::from_slice(&t, 2, 2),
            Side::Right,
            UpLo::Lower,
            Diag::Unit,
            MatMut::from_slice(&mut b, 2, 1),
        )
        .unwrap_err();
        assert!(matches!(err, LuError::DimensionMismatch(_)));
    }

    #[test]
    fn test_matmul_wrapper() {
        let a = [1.0f64, 2.0];
        let c = matmul(MatRef::from_slice(&a, 1, 2), MatRef::from_slice(&a, 2, 1)).unwrap();
        assert_eq!(c[(0, 0)], 5.0);
        assert!(matmul(MatRef::from_slice(&a, 1, 2), MatRef::from_slice(&a, 1, 2)).is_err());
    }

    #[test]
    fn test_lu_factor_with() {
        let a = Mat::from_fn(20, 20, |i, j| {
            if i == j {
                20.0f64
            } else {
                1.0 / (1.0 + i as f64 + j as f64)
            }
        });
        let lu = lu_factor_with(a.as_ref(), LuParams::new(2, 4, 2)).unwrap();
        assert!(lu.reconstructed_matrix().max_abs_diff(&a) < 1e-12);
    }
}
