use crate::detect::{simd_level, SimdLevel};
use crate::kernels::*;
use pivlu_core::{
    gemm_update, lu_in_place, triangular_solve, Diag, LuInfo, LuParams, RawMat, Side,
    TilingParams, UpLo,
};
use pivlu_types::LuScalar;

/// Runtime-dispatched `C += alpha * A * B`.
///
/// # Safety
/// Same requirements as [`pivlu_core::gemm_update`].
pub unsafe fn gemm_dispatch<T: KernelDispatch>(c: RawMat<T>, a: RawMat<T>, b: RawMat<T>, alpha: T) {
    T::dispatch_gemm(c, a, b, alpha);
}

/// Runtime-dispatched blocked LU factorization.
///
/// # Safety
/// Same requirements as [`pivlu_core::lu_in_place`].
pub unsafe fn lu_dispatch<T: KernelDispatch>(
    mat: RawMat<T>,
    transpositions: &mut [usize],
    params: &LuParams,
) -> LuInfo {
    T::dispatch_lu(mat, transpositions, params)
}

/// Runtime-dispatched blocked triangular solve.
///
/// # Safety
/// Same requirements as [`pivlu_core::triangular_solve`].
pub unsafe fn triangular_solve_dispatch<T: KernelDispatch>(
    tri: RawMat<T>,
    rhs: RawMat<T>,
    side: Side,
    uplo: UpLo,
    diag: Diag,
) {
    T::dispatch_triangular_solve(tri, rhs, side, uplo, diag);
}

/// Trait for types that support kernel dispatch.
///
/// Every entry point picks the microkernel and tiling for the detected
/// SIMD level, then runs the matching core routine.
pub trait KernelDispatch: LuScalar {
    /// `C += alpha * A * B` with the best available kernel.
    unsafe fn dispatch_gemm(c: RawMat<Self>, a: RawMat<Self>, b: RawMat<Self>, alpha: Self);

    /// Factor `mat` in place with the best available kernel.
    unsafe fn dispatch_lu(
        mat: RawMat<Self>,
        transpositions: &mut [usize],
        params: &LuParams,
    ) -> LuInfo;

    /// Triangular solve with the best available kernel.
    unsafe fn dispatch_triangular_solve(
        tri: RawMat<Self>,
        rhs: RawMat<Self>,
        side: Side,
        uplo: UpLo,
        diag: Diag,
    );

    /// Tiling used for the current CPU.
    fn tiling() -> TilingParams;
}

// Binds `$kernel` and `$tiling` for the detected level, then evaluates `$body`.
macro_rules! with_kernel {
    (
        $avx2:expr, $avx2_tiling:expr,
        $neon:expr, $neon_tiling:expr,
        |$kernel:ident, $tiling:ident| $body:expr
    ) => {
        match simd_level() {
            #[cfg(target_arch = "x86_64")]
            SimdLevel::Avx2 | SimdLevel::Avx512 => {
                let $kernel = $avx2;
                let $tiling = $avx2_tiling;
                $body
            }
            #[cfg(target_arch = "aarch64")]
            SimdLevel::Neon => {
                let $kernel = $neon;
                let $tiling = $neon_tiling;
                $body
            }
            _ => {
                let $kernel = PortableKernel;
                let $tiling = TilingParams::PORTABLE;
                $body
            }
        }
    };
}

macro_rules! impl_kernel_dispatch {
    ($t:ty, $avx2:ident, $avx2_tiling:expr, $neon:ident, $neon_tiling:expr) => {
        impl KernelDispatch for $t {
            unsafe fn dispatch_gemm(c: RawMat<Self>, a: RawMat<Self>, b: RawMat<Self>, alpha: Self) {
                with_kernel!($avx2, $avx2_tiling, $neon, $neon_tiling, |kernel, tiling| {
                    gemm_update(c, a, b, alpha, &tiling, &kernel)
                })
            }

            unsafe fn dispatch_lu(
                mat: RawMat<Self>,
                transpositions: &mut [usize],
                params: &LuParams,
            ) -> LuInfo {
                with_kernel!($avx2, $avx2_tiling, $neon, $neon_tiling, |kernel, tiling| {
                    lu_in_place(mat, transpositions, params, &tiling, &kernel)
                })
            }

            unsafe fn dispatch_triangular_solve(
                tri: RawMat<Self>,
                rhs: RawMat<Self>,
                side: Side,
                uplo: UpLo,
                diag: Diag,
            ) {
                with_kernel!($avx2, $avx2_tiling, $neon, $neon_tiling, |kernel, tiling| {
                    triangular_solve(tri, rhs, side, uplo, diag, &tiling, &kernel)
                })
            }

            fn tiling() -> TilingParams {
                with_kernel!($avx2, $avx2_tiling, $neon, $neon_tiling, |_kernel, tiling| {
                    tiling
                })
            }
        }
    };
}

impl_kernel_dispatch!(
    f32,
    Avx2F32Kernel,
    TilingParams::F32_AVX2,
    NeonF32Kernel,
    TilingParams::F32_NEON
);
impl_kernel_dispatch!(
    f64,
    Avx2F64Kernel,
    TilingParams::F64_AVX2,
    NeonF64Kernel,
    TilingParams::F64_NEON
);
