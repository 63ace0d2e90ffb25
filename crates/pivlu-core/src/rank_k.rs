use crate::kernel::{Microkernel, PortableMicrokernel};
use crate::packing::{pack_a, pack_b, packed_a_size, packed_b_size};
use crate::tiling::{BlockIterator, TilingParams};
use crate::view::RawMat;
use pivlu_types::LuScalar;

/// Blocked update `C += alpha * A * B`.
///
/// This is the single hot loop shared by the factorization and the
/// triangular solver. Operands may use any layout and leading dimension;
/// both are normalized away by the packer before the microkernel runs.
///
/// # Parameters
/// - `c`: `m x n` output view, updated in place
/// - `a`: `m x k` left operand
/// - `b`: `k x n` right operand
/// - `alpha`: scale applied to the product
///
/// # Safety
/// - `c` must be writable and `a`, `b` readable over their whole views
/// - `c` must not overlap `a` or `b`
pub unsafe fn gemm_update<T: LuScalar, K: Microkernel<T>>(
    c: RawMat<T>,
    a: RawMat<T>,
    b: RawMat<T>,
    alpha: T,
    params: &TilingParams,
    kernel: &K,
) {
    let m = c.nrows();
    let n = c.ncols();
    let k = a.ncols();
    debug_assert_eq!(a.nrows(), m, "A rows mismatch");
    debug_assert_eq!(b.nrows(), k, "B rows mismatch");
    debug_assert_eq!(b.ncols(), n, "B cols mismatch");

    if m == 0 || n == 0 || k == 0 {
        return;
    }

    // Scratch is scoped to this call
    let mut packed_a =
        vec![T::scalar_zero(); packed_a_size(params.mc.min(m), params.kc.min(k), K::MR)];
    let mut packed_b =
        vec![T::scalar_zero(); packed_b_size(params.kc.min(k), params.nc.min(n), K::NR)];

    // BLIS-style 5-loop blocking
    // Loop 5: blocks of n
    for (jc, nc) in BlockIterator::new(n, params.nc) {
        // Loop 4: blocks of k
        for (pc, kc) in BlockIterator::new(k, params.kc) {
            pack_b(b.submatrix(pc, jc, kc, nc), &mut packed_b, K::NR);

            // Loop 3: blocks of m
            for (ic, mc) in BlockIterator::new(m, params.mc) {
                pack_a(a.submatrix(ic, pc, mc, kc), &mut packed_a, K::MR);

                // Loop 2: micro-blocks of n
                for (j_start, nr) in BlockIterator::new(nc, K::NR) {
                    let b_ptr = packed_b.as_ptr().add((j_start / K::NR) * K::NR * kc);

                    // Loop 1: micro-blocks of m
                    for (i_start, mr) in BlockIterator::new(mc, K::MR) {
                        let a_ptr = packed_a.as_ptr().add((i_start / K::MR) * K::MR * kc);
                        let c_tile = c.submatrix(ic + i_start, jc + j_start, mr, nr);

                        kernel.execute(mr, nr, kc, alpha, a_ptr, b_ptr, c_tile);
                    }
                }
            }
        }
    }
}

/// Rank-k update `C -= A * B`.
///
/// # Safety
/// Same requirements as [`gemm_update`].
#[inline]
pub unsafe fn rank_k_update<T: LuScalar, K: Microkernel<T>>(
    c: RawMat<T>,
    a: RawMat<T>,
    b: RawMat<T>,
    params: &TilingParams,
    kernel: &K,
) {
    gemm_update(c, a, b, -T::scalar_one(), params, kernel);
}

/// [`gemm_update`] with the portable kernel and tiling.
///
/// # Safety
/// Same requirements as [`gemm_update`].
pub unsafe fn gemm_update_portable<T: LuScalar>(
    c: RawMat<T>,
    a: RawMat<T>,
    b: RawMat<T>,
    alpha: T,
) {
    gemm_update(
        c,
        a,
        b,
        alpha,
        &TilingParams::PORTABLE,
        &PortableMicrokernel,
    );
}
