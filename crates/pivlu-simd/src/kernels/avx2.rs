use pivlu_core::{Microkernel, RawMat};
use wide::{f32x8, f64x4};

/// AVX2 microkernel for f32.
///
/// Uses 8x8 register blocking with f32x8 vectors.
/// Total: 8 accumulators x 8 lanes = 64 elements in registers.
#[derive(Debug, Default, Clone, Copy)]
pub struct Avx2F32Kernel;

impl Microkernel<f32> for Avx2F32Kernel {
    const MR: usize = 8;
    const NR: usize = 8;

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
        avx2_f32_tile(mr, nr, k, alpha, a, b, c);
    }
}

#[target_feature(enable = "avx2")]
unsafe fn avx2_f32_tile(
    mr: usize,
    nr: usize,
    k: usize,
    alpha: f32,
    a: *const f32,
    b: *const f32,
    c: RawMat<f32>,
) {
    const MR: usize = 8;
    const NR: usize = 8;

    let mut acc = [f32x8::splat(0.0); MR];

    // Main computation loop
    for p in 0..k {
        // B row: NR elements, zero padded by the packer
        let b_vec = f32x8::from(*(b.add(p * NR) as *const [f32; NR]));
        let a_col = a.add(p * MR);

        for (i, row) in acc.iter_mut().enumerate() {
            *row = *row + f32x8::splat(*a_col.add(i)) * b_vec;
        }
    }

    // Write back results
    let alpha_vec = f32x8::splat(alpha);
    for (i, row) in acc.iter().enumerate().take(mr) {
        let scaled: [f32; NR] = (*row * alpha_vec).into();
        for (j, &value) in scaled.iter().enumerate().take(nr) {
            *c.ptr_at(i, j) += value;
        }
    }
}

/// AVX2 microkernel for f64.
#[derive(Debug, Default, Clone, Copy)]
pub struct Avx2F64Kernel;

impl Microkernel<f64> for Avx2F64Kernel {
    const MR: usize = 4;
    const NR: usize = 4;

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
        avx2_f64_tile(mr, nr, k, alpha, a, b, c);
    }
}

#[target_feature(enable = "avx2")]
unsafe fn avx2_f64_tile(
    mr: usize,
    nr: usize,
    k: usize,
    alpha: f64,
    a: *const f64,
    b: *const f64,
    c: RawMat<f64>,
) {
    const MR: usize = 4;
    const NR: usize = 4;

    let mut acc = [f64x4::splat(0.0); MR];

    for p in 0..k {
        let b_vec = f64x4::from(*(b.add(p * NR) as *const [f64; NR]));
        let a_col = a.add(p * MR);

        for (i, row) in acc.iter_mut().enumerate() {
            *row = *row + f64x4::splat(*a_col.add(i)) * b_vec;
        }
    }

    let alpha_vec = f64x4::splat(alpha);
    for (i, row) in acc.iter().enumerate().take(mr) {
        let scaled: [f64; NR] = (*row * alpha_vec).into();
        for (j, &value) in scaled.iter().enumerate().take(nr) {
            *c.ptr_at(i, j) += value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pivlu_core::{gemm_update, Layout, TilingParams};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn has_avx2() -> bool {
        is_x86_feature_detected!("avx2")
    }

    #[test]
    fn test_avx2_f64_kernel() {
        if !has_avx2() {
            return;
        }
        let kernel = Avx2F64Kernel;

        // A = [[1, 2], [3, 4]] packed in 4-row panels, B = [[1, 1], [1, 1]]
        let a: [f64; 8] = [1.0, 3.0, 0.0, 0.0, 2.0, 4.0, 0.0, 0.0];
        let b: [f64; 8] = [1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0];
        let mut c = [0.0f64; 4];

        unsafe {
            let view = RawMat::new(c.as_mut_ptr(), 2, 2, 2, Layout::ColMajor);
            kernel.execute(2, 2, 2, 1.0, a.as_ptr(), b.as_ptr(), view);
        }

        // [[3, 3], [7, 7]] stored column by column
        assert_eq!(c, [3.0, 7.0, 3.0, 7.0]);
    }

    #[test]
    fn test_avx2_f32_kernel_subtracts() {
        if !has_avx2() {
            return;
        }
        let kernel = Avx2F32Kernel;

        let mut a = [0.0f32; 8];
        let mut b = [0.0f32; 8];
        a[0] = 2.0;
        b[0] = 3.0;
        let mut c = [10.0f32];

        unsafe {
            let view = RawMat::new(c.as_mut_ptr(), 1, 1, 1, Layout::RowMajor);
            kernel.execute(1, 1, 1, -1.0, a.as_ptr(), b.as_ptr(), view);
        }

        assert_eq!(c[0], 4.0);
    }

    #[test]
    fn test_avx2_f32_through_driver() {
        if !has_avx2() {
            return;
        }
        let mut rng = StdRng::seed_from_u64(23);
        let (m, k, n) = (21, 10, 19);
        let mut a: Vec<f32> = (0..m * k).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let mut b: Vec<f32> = (0..k * n).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let mut expected = vec![0.0f32; m * n];
        for i in 0..m {
            for j in 0..n {
                for p in 0..k {
                    expected[i * n + j] += a[i * k + p] * b[p * n + j];
                }
            }
        }

        let mut c = vec![0.0f32; m * n];
        unsafe {
            let av = RawMat::new(a.as_mut_ptr(), m, k, k, Layout::RowMajor);
            let bv = RawMat::new(b.as_mut_ptr(), k, n, n, Layout::RowMajor);
            let cv = RawMat::new(c.as_mut_ptr(), m, n, n, Layout::RowMajor);
            gemm_update(cv, av, bv, 1.0, &TilingParams::F32_AVX2, &Avx2F32Kernel);
        }

        for (x, y) in c.iter().zip(expected.iter()) {
            assert!((x - y).abs() < 1e-4);
        }
    }
}
