use crate::view::RawMat;
use pivlu_types::LuScalar;

/// Trait for rank-k update microkernels.
///
/// A microkernel computes a small block of `C += alpha * A * B` using
/// register blocking. The dimensions `MR x NR` define the register tile.
pub trait Microkernel<T: LuScalar> {
    /// Rows of the register tile.
    const MR: usize;

    /// Columns of the register tile.
    const NR: usize;

    /// Execute the microkernel.
    ///
    /// Computes `C[0..mr, 0..nr] += alpha * A[0..mr, 0..k] * B[0..k, 0..nr]`.
    ///
    /// # Safety
    /// - `a` must point to at least `Self::MR * k` elements (packed by [`crate::pack_a`])
    /// - `b` must point to at least `k * Self::NR` elements (packed by [`crate::pack_b`])
    /// - `c` must be a writable view of at least `mr x nr`
    /// - `mr <= Self::MR` and `nr <= Self::NR`
    unsafe fn execute(
        &self,
        mr: usize,
        nr: usize,
        k: usize,
        alpha: T,
        a: *const T,
        b: *const T,
        c: RawMat<T>,
    );
}

/// Portable (non-SIMD) microkernel implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct PortableMicrokernel;

/// Constants for PortableMicrokernel
impl PortableMicrokernel {
    /// Microkernel row dimension.
    pub const MR: usize = 4;
    /// Microkernel column dimension.
    pub const NR: usize = 4;
}

impl<T: LuScalar> Microkernel<T> for PortableMicrokernel {
    const MR: usize = 4;
    const NR: usize = 4;

    unsafe fn execute(
        &self,
        mr: usize,
        nr: usize,
        k: usize,
        alpha: T,
        a: *const T,
        b: *const T,
        c: RawMat<T>,
    ) {
        const MR: usize = 4;
        const NR: usize = 4;

        let mut acc = [[T::scalar_zero(); NR]; MR];

        for p in 0..k {
            for (i, row) in acc.iter_mut().enumerate() {
                let a_val = *a.add(p * MR + i);
                for (j, slot) in row.iter_mut().enumerate() {
                    *slot += a_val * *b.add(p * NR + j);
                }
            }
        }

        for (i, row) in acc.iter().enumerate().take(mr) {
            for (j, &value) in row.iter().enumerate().take(nr) {
                let dst = c.ptr_at(i, j);
                *dst += alpha * value;
            }
        }
    }
}
