//! SIMD microkernel implementations.

#[cfg(target_arch = "x86_64")]
pub mod avx2;
pub mod neon;
pub mod portable;

#[cfg(target_arch = "x86_64")]
pub use avx2::{Avx2F32Kernel, Avx2F64Kernel};
pub use neon::{NeonF32Kernel, NeonF64Kernel};
pub use portable::PortableKernel;
