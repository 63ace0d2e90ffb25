/// CPU feature detection for runtime SIMD dispatch.

/// Available SIMD instruction sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SimdLevel {
    /// No SIMD, use scalar code.
    Scalar,
    /// SSE2 (128-bit, available on all x86-64).
    Sse2,
    /// AVX (256-bit float).
    Avx,
    /// AVX2 (256-bit integer + FMA).
    Avx2,
    /// AVX-512 (512-bit).
    Avx512,
    /// ARM NEON (128-bit).
    Neon,
}

impl SimdLevel {
    /// Detect the best available SIMD level at runtime.
    pub fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            if is_x86_feature_detected!("avx512f") {
                return SimdLevel::Avx512;
            }
            if is_x86_feature_detected!("avx2") {
                return SimdLevel::Avx2;
            }
            if is_x86_feature_detected!("avx") {
                return SimdLevel::Avx;
            }
            // SSE2 is always available on x86-64
            return SimdLevel::Sse2;
        }

        #[cfg(target_arch = "aarch64")]
        {
            // NEON is always available on AArch64
            return SimdLevel::Neon;
        }

        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        {
            SimdLevel::Scalar
        }
    }

    /// Whether a dedicated rank-k microkernel exists for this level.
    pub fn has_simd_kernel(&self) -> bool {
        match self {
            SimdLevel::Avx2 | SimdLevel::Avx512 => cfg!(target_arch = "x86_64"),
            SimdLevel::Neon => cfg!(target_arch = "aarch64"),
            _ => false,
        }
    }
}

/// Global cached SIMD level.
static SIMD_LEVEL: std::sync::OnceLock<SimdLevel> = std::sync::OnceLock::new();

/// Get the detected SIMD level (cached).
pub fn simd_level() -> SimdLevel {
    *SIMD_LEVEL.get_or_init(|| {
        let level = SimdLevel::detect();
        log::debug!("detected SIMD level: {:?}", level);
        level
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        let level = SimdLevel::detect();
        println!("Detected SIMD level: {:?}", level);

        // Should detect at least Scalar
        assert!(level >= SimdLevel::Scalar);

        // On x86-64, should detect at least SSE2
        #[cfg(target_arch = "x86_64")]
        assert!(level >= SimdLevel::Sse2);

        // On AArch64, should detect NEON
        #[cfg(target_arch = "aarch64")]
        assert_eq!(level, SimdLevel::Neon);
    }

    #[test]
    fn test_cached_matches_detect() {
        assert_eq!(simd_level(), SimdLevel::detect());
        assert_eq!(simd_level(), simd_level());
    }

    #[test]
    fn test_has_simd_kernel() {
        assert!(!SimdLevel::Scalar.has_simd_kernel());
        assert!(!SimdLevel::Sse2.has_simd_kernel());
        #[cfg(target_arch = "x86_64")]
        assert!(SimdLevel::Avx2.has_simd_kernel());
        #[cfg(target_arch = "aarch64")]
        assert!(SimdLevel::Neon.has_simd_kernel());
    }
}
