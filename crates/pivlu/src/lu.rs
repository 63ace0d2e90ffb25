//! LU decomposition with partial pivoting.

use pivlu_core::{Diag, Layout, LuParams, LuStatus, Permutation, RawMat, Side, UpLo};
use pivlu_simd::{lu_dispatch, triangular_solve_dispatch, KernelDispatch};
use pivlu_types::LuScalar;

use crate::error::{LuError, Result};
use crate::mat::{Mat, MatMut, MatRef};

/// LU decomposition `P * A = L * U` of a square matrix.
///
/// `L` is unit lower triangular, `U` is upper triangular and `P` is the row
/// permutation chosen by partial pivoting. Both factors share one packed
/// buffer stored in the input's layout.
///
/// An exactly singular matrix still factors: [`PartialPivLu::status`]
/// reports the first column whose pivot was zero and
/// [`PartialPivLu::is_invertible`] returns `false`.
///
/// # Example
///
/// ```
/// use pivlu::{MatRef, PartialPivLu};
///
/// let a = [2.0f64, 1.0, 4.0, 3.0];
/// let lu = PartialPivLu::compute(MatRef::from_slice(&a, 2, 2)).unwrap();
///
/// assert_eq!(lu.determinant(), 2.0);
///
/// let b = [1.0f64, 1.0];
/// let x = lu.solve(MatRef::from_slice(&b, 2, 1)).unwrap();
/// assert_eq!(x[(0, 0)], 1.0);
/// assert_eq!(x[(1, 0)], -1.0);
/// ```
#[derive(Debug, Clone)]
pub struct PartialPivLu<T: LuScalar> {
    lu: Mat<T>,
    permutation: Permutation,
    transpositions: Vec<usize>,
    transposition_count: usize,
    status: LuStatus,
    params: LuParams,
}

impl<T: KernelDispatch> PartialPivLu<T> {
    /// Factor `a` with the default blocking policy.
    pub fn compute(a: MatRef<'_, T>) -> Result<Self> {
        Self::compute_with(a, LuParams::default())
    }

    /// Factor `a` with a custom blocking policy.
    pub fn compute_with(a: MatRef<'_, T>, params: LuParams) -> Result<Self> {
        params.validate().map_err(LuError::InvalidParams)?;
        if !a.is_square() {
            return Err(LuError::NotSquare {
                nrows: a.nrows(),
                ncols: a.ncols(),
            });
        }

        let n = a.nrows();
        let mut lu = a.to_owned();
        let mut transpositions = vec![0usize; n];
        let info = unsafe { lu_dispatch(lu.as_raw_mut(), &mut transpositions, &params) };

        if let LuStatus::ZeroPivot { column } = info.status {
            log::warn!(
                "LU factorization of a {}x{} matrix found an exact zero pivot in column {}",
                n,
                n,
                column
            );
        }

        let permutation = Permutation::from_transpositions(&transpositions);
        Ok(Self {
            lu,
            permutation,
            transpositions,
            transposition_count: info.transposition_count,
            status: info.status,
            params,
        })
    }

    /// Refactor with `a`, keeping the current blocking policy.
    ///
    /// On error the previous factorization is left untouched.
    pub fn factor(&mut self, a: MatRef<'_, T>) -> Result<()> {
        *self = Self::compute_with(a, self.params)?;
        Ok(())
    }

    /// Solve `A * X = B`.
    ///
    /// The result has `rhs`'s shape and layout. For a singular matrix the
    /// result may contain non-finite values; check
    /// [`PartialPivLu::is_invertible`] first when that matters.
    pub fn solve(&self, rhs: MatRef<'_, T>) -> Result<Mat<T>> {
        self.check_rhs(rhs.nrows())?;
        let mut x = Mat::zeros_with_layout(rhs.nrows(), rhs.ncols(), rhs.layout());
        unsafe {
            self.permutation.apply_rows(rhs.as_raw(), x.as_raw_mut());
        }
        self.solve_factors(x.as_raw_mut());
        Ok(x)
    }

    /// Solve `A * X = B`, overwriting `rhs` with `X`.
    pub fn solve_in_place(&self, mut rhs: MatMut<'_, T>) -> Result<()> {
        self.check_rhs(rhs.nrows())?;
        let b = rhs.to_owned();
        unsafe {
            self.permutation.apply_rows(b.as_ref().as_raw(), rhs.as_raw());
        }
        self.solve_factors(rhs.as_raw());
        Ok(())
    }

    /// Determinant of the factored matrix.
    ///
    /// Zero when a zero pivot was found.
    pub fn determinant(&self) -> T {
        if !self.status.is_complete() {
            return T::scalar_zero();
        }
        let mut det = if self.transposition_count % 2 == 0 {
            T::scalar_one()
        } else {
            -T::scalar_one()
        };
        for i in 0..self.nrows() {
            det *= self.lu[(i, i)];
        }
        det
    }

    /// Inverse of the factored matrix, in the factor's layout.
    pub fn inverse(&self) -> Mat<T> {
        let n = self.nrows();
        let inv = self.permutation.inverse();
        // P * I: row i holds a one in column inverse[i]
        let mut x = Mat::from_fn_with_layout(n, n, self.lu.layout(), |i, j| {
            if inv[i] == j {
                T::scalar_one()
            } else {
                T::scalar_zero()
            }
        });
        self.solve_factors(x.as_raw_mut());
        x
    }

    /// `P^-1 * L * U`, which reproduces the input up to rounding.
    pub fn reconstructed_matrix(&self) -> Mat<T> {
        let n = self.nrows();
        let mut lu = self.l().matmul(&self.u());
        let mut out = Mat::zeros_with_layout(n, n, self.lu.layout());
        unsafe {
            self.permutation
                .apply_rows_inverse(lu.as_raw_mut(), out.as_raw_mut());
        }
        out
    }

    fn check_rhs(&self, rows: usize) -> Result<()> {
        if rows != self.nrows() {
            return Err(LuError::DimensionMismatch(format!(
                "rhs has {} rows, expected {}",
                rows,
                self.nrows()
            )));
        }
        Ok(())
    }

    /// Forward then back substitution on an already permuted right-hand side.
    fn solve_factors(&self, x: RawMat<T>) {
        let lu = self.lu.as_ref().as_raw();
        unsafe {
            triangular_solve_dispatch(lu, x, Side::Left, UpLo::Lower, Diag::Unit);
            triangular_solve_dispatch(lu, x, Side::Left, UpLo::Upper, Diag::NonUnit);
        }
    }
}

impl<T: LuScalar> PartialPivLu<T> {
    /// The packed factors: strict lower part is L, upper part is U.
    pub fn matrix_lu(&self) -> MatRef<'_, T> {
        self.lu.as_ref()
    }

    /// Unit lower triangular factor.
    pub fn l(&self) -> Mat<T> {
        let n = self.nrows();
        Mat::from_fn_with_layout(n, n, self.lu.layout(), |i, j| {
            if i > j {
                self.lu[(i, j)]
            } else if i == j {
                T::scalar_one()
            } else {
                T::scalar_zero()
            }
        })
    }

    /// Upper triangular factor.
    pub fn u(&self) -> Mat<T> {
        let n = self.nrows();
        Mat::from_fn_with_layout(n, n, self.lu.layout(), |i, j| {
            if i <= j {
                self.lu[(i, j)]
            } else {
                T::scalar_zero()
            }
        })
    }

    /// Row permutation `P`.
    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Row `i` was swapped with row `transpositions()[i]` at step `i`.
    pub fn transpositions(&self) -> &[usize] {
        &self.transpositions
    }

    /// Number of steps that swapped two distinct rows.
    pub fn transposition_count(&self) -> usize {
        self.transposition_count
    }

    pub fn status(&self) -> LuStatus {
        self.status
    }

    /// `false` if any pivot was exactly zero.
    pub fn is_invertible(&self) -> bool {
        self.status.is_complete()
    }

    /// Order of the factored matrix.
    pub fn nrows(&self) -> usize {
        self.lu.nrows()
    }

    pub fn layout(&self) -> Layout {
        self.lu.layout()
    }

    /// Blocking policy used for the factorization.
    pub fn params(&self) -> LuParams {
        self.params
    }
}
