use pivlu_core::{Microkernel, RawMat};
use wide::{f32x4, f64x2};

/// ARM NEON microkernel for f32.
///
/// Uses 4x4 register blocking with f32x4 vectors.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeonF32Kernel;

impl Microkernel<f32> for NeonF32Kernel {
    const MR: usize = 4;
    const NR: usize = 4;

    unsafe fn execute(
        &self,
        mr: usize,
        nr: usize,
        k: usize,
        alpha: f32,
        a: *const f32,
        b: *const f32,
        c: RawMat<f32>,
    ) {
        let mut acc = [f32x4::splat(0.0); 4];

        // Packed panels are zero padded, so full vectors are always readable
        for p in 0..k {
            let b_vec = f32x4::from(*(b.add(p * Self::NR) as *const [f32; 4]));
            let a_col = a.add(p * Self::MR);
            for (i, row) in acc.iter_mut().enumerate() {
                *row = *row + f32x4::splat(*a_col.add(i)) * b_vec;
            }
        }

        // Write back
        let alpha_vec = f32x4::splat(alpha);
        for (i, row) in acc.iter().enumerate().take(mr) {
            let scaled: [f32; 4] = (*row * alpha_vec).into();
            for (j, &value) in scaled.iter().enumerate().take(nr) {
                *c.ptr_at(i, j) += value;
            }
        }
    }
}

/// ARM NEON microkernel for f64.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeonF64Kernel;

impl Microkernel<f64> for NeonF64Kernel {
    const MR: usize = 2;
    const NR: usize = 2;

    unsafe fn execute(
        &self,
        mr: usize,
        nr: usize,
        k: usize,
        alpha: f64,
        a: *const f64,
        b: *const f64,
        c: RawMat<f64>,
    ) {
        let mut acc = [f64x2::splat(0.0); 2];

        for p in 0..k {
            let b_vec = f64x2::from(*(b.add(p * Self::NR) as *const [f64; 2]));
            let a_col = a.add(p * Self::MR);
            for (i, row) in acc.iter_mut().enumerate() {
                *row = *row + f64x2::splat(*a_col.add(i)) * b_vec;
            }
        }

        let alpha_vec = f64x2::splat(alpha);
        for (i, row) in acc.iter().enumerate().take(mr) {
            let scaled: [f64; 2] = (*row * alpha_vec).into();
            for (j, &value) in scaled.iter().enumerate().take(nr) {
                *c.ptr_at(i, j) += value;
            }
        }
    }
}
