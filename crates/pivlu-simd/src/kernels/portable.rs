use pivlu_core::{Microkernel, RawMat};
use pivlu_types::LuScalar;

/// Portable (non-SIMD) microkernel.
///
/// This provides a fallback when no SIMD instructions are available.
#[derive(Debug, Default, Clone, Copy)]
pub struct PortableKernel;

impl<T: LuScalar> Microkernel<T> for PortableKernel {
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
        // Delegate to the core portable implementation
        let core_kernel = pivlu_core::PortableMicrokernel;
        core_kernel.execute(mr, nr, k, alpha, a, b, c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pivlu_core::Layout;

    #[test]
    fn test_portable_kernel_execute() {
        let kernel = PortableKernel;

        // A = [[1, 3], [2, 4]], B = [[1, 2], [3, 4]]
        let a: [f64; 8] = [1.0, 2.0, 0.0, 0.0, 3.0, 4.0, 0.0, 0.0];
        let b: [f64; 8] = [1.0, 2.0, 0.0, 0.0, 3.0, 4.0, 0.0, 0.0];
        let mut c = [1.0f64; 4];

        unsafe {
            let view = RawMat::new(c.as_mut_ptr(), 2, 2, 2, Layout::RowMajor);
            kernel.execute(2, 2, 2, -1.0, a.as_ptr(), b.as_ptr(), view);
        }

        // C = 1 - A * B = 1 - [[10, 14], [14, 20]]
        assert_eq!(c, [-9.0, -13.0, -13.0, -19.0]);
    }

    #[test]
    fn test_portable_kernel_default() {
        let kernel = PortableKernel::default();
        assert_eq!(<PortableKernel as Microkernel<f64>>::MR, 4);
        assert_eq!(<PortableKernel as Microkernel<f32>>::NR, 4);
        let _ = kernel;
    }
}
