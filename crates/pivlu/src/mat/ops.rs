//! Operator implementations for matrix types.

use std::ops::Mul;

use pivlu_simd::KernelDispatch;

use super::{Mat, MatRef};

// MatRef * MatRef
impl<'a, 'b, T: KernelDispatch> Mul<&'b MatRef<'b, T>> for &'a MatRef<'a, T> {
    type Output = Mat<T>;

    fn mul(self, rhs: &'b MatRef<'b, T>) -> Mat<T> {
        self.matmul(rhs)
    }
}

// MatRef * MatRef (by value, since MatRef is Copy)
impl<'a, 'b, T: KernelDispatch> Mul<MatRef<'b, T>> for MatRef<'a, T> {
    type Output = Mat<T>;

    fn mul(self, rhs: MatRef<'b, T>) -> Mat<T> {
        self.matmul(&rhs)
    }
}

// &Mat * &MatRef
impl<'a, T: KernelDispatch> Mul<&'a MatRef<'a, T>> for &Mat<T> {
    type Output = Mat<T>;

    fn mul(self, rhs: &'a MatRef<'a, T>) -> Mat<T> {
        self.as_ref().matmul(rhs)
    }
}

// &Mat * &Mat
impl<T: KernelDispatch> Mul<&Mat<T>> for &Mat<T> {
    type Output = Mat<T>;

    fn mul(self, rhs: &Mat<T>) -> Mat<T> {
        self.as_ref().matmul(&rhs.as_ref())
    }
}

// Mat * Mat (consuming)
impl<T: KernelDispatch> Mul<Mat<T>> for Mat<T> {
    type Output = Mat<T>;

    fn mul(self, rhs: Mat<T>) -> Mat<T> {
        self.as_ref().matmul(&rhs.as_ref())
    }
}
