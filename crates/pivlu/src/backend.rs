use pivlu_simd::{simd_level, SimdLevel};

/// Kernel families the rank-k update can run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Pure Rust portable microkernel.
    Portable,
    /// SIMD microkernel (AVX2 or NEON).
    Simd,
}

impl Backend {
    /// Get the backend the dispatcher selects on this CPU.
    ///
    /// SSE2 and AVX without AVX2 have no dedicated kernel and report
    /// `Portable`.
    pub fn current() -> Self {
        if simd_level().has_simd_kernel() {
            Backend::Simd
        } else {
            Backend::Portable
        }
    }

    /// Get a description of the current SIMD capabilities.
    pub fn description() -> String {
        match simd_level() {
            SimdLevel::Scalar => "Portable (no SIMD)".to_string(),
            SimdLevel::Sse2 => "x86-64 SSE2 (portable kernel)".to_string(),
            SimdLevel::Avx => "x86-64 AVX (portable kernel)".to_string(),
            SimdLevel::Avx2 => "x86-64 AVX2 (256-bit)".to_string(),
            SimdLevel::Avx512 => "x86-64 AVX-512 (AVX2 kernel)".to_string(),
            SimdLevel::Neon => "ARM NEON (128-bit)".to_string(),
        }
    }
}

/// Get information about the library configuration.
pub fn version_info() -> String {
    format!(
        "pivlu v{}\nBackend: {}\nSIMD Level: {:?}",
        env!("CARGO_PKG_VERSION"),
        Backend::description(),
        simd_level()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_detection() {
        let backend = Backend::current();
        println!("Current backend: {:?}", backend);
        println!("Version info:\n{}", version_info());

        assert_eq!(backend == Backend::Simd, simd_level().has_simd_kernel());
    }

    #[test]
    fn test_backend_description_not_empty() {
        let desc = Backend::description();
        assert!(
            desc.contains("Portable")
                || desc.contains("SSE2")
                || desc.contains("AVX")
                || desc.contains("NEON")
        );
    }

    #[test]
    fn test_version_info_format() {
        let info = version_info();
        assert!(info.contains("pivlu v"));
        assert!(info.contains("Backend:"));
        assert!(info.contains("SIMD Level:"));
    }
}
