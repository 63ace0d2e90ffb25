/// Tiling parameters for the BLIS-style rank-k update.
///
/// These parameters control how operands are partitioned to fit in
/// the levels of the cache hierarchy. `kc` also sets the width of the
/// triangular blocks walked by the triangular solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilingParams {
    /// Block size for M dimension (L2 cache).
    pub mc: usize,
    /// Block size for N dimension (L3 cache).
    pub nc: usize,
    /// Block size for K dimension (L1 cache).
    pub kc: usize,
    /// Microkernel M dimension (registers).
    pub mr: usize,
    /// Microkernel N dimension (registers).
    pub nr: usize,
}

impl TilingParams {
    /// Default parameters for f32 with AVX2.
    pub const F32_AVX2: Self = Self {
        mc: 128,
        nc: 512,
        kc: 256,
        mr: 8,
        nr: 8,
    };

    /// Default parameters for f64 with AVX2.
    pub const F64_AVX2: Self = Self {
        mc: 96,
        nc: 512,
        kc: 256,
        mr: 4,
        nr: 4,
    };

    /// Default parameters for f32 with NEON.
    pub const F32_NEON: Self = Self {
        mc: 128,
        nc: 256,
        kc: 256,
        mr: 4,
        nr: 4,
    };

    /// Default parameters for f64 with NEON.
    pub const F64_NEON: Self = Self {
        mc: 64,
        nc: 256,
        kc: 128,
        mr: 2,
        nr: 2,
    };

    /// Default parameters for portable (non-SIMD) execution.
    pub const PORTABLE: Self = Self {
        mc: 64,
        nc: 64,
        kc: 256,
        mr: 4,
        nr: 4,
    };

    /// Create custom tiling parameters.
    pub const fn new(mc: usize, nc: usize, kc: usize, mr: usize, nr: usize) -> Self {
        Self { mc, nc, kc, mr, nr }
    }

    /// Validate that tiling parameters are consistent.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.mr == 0 || self.nr == 0 {
            return Err("mr and nr must be non-zero");
        }
        if self.mc == 0 || self.nc == 0 || self.kc == 0 {
            return Err("mc, nc, and kc must be non-zero");
        }
        if self.mc % self.mr != 0 {
            return Err("mc must be divisible by mr");
        }
        if self.nc % self.nr != 0 {
            return Err("nc must be divisible by nr");
        }
        Ok(())
    }
}

impl Default for TilingParams {
    fn default() -> Self {
        Self::PORTABLE
    }
}

/// Blocking policy for the recursive LU factorization.
///
/// None of these values affect the factored result, only how the work is
/// partitioned. Setting `max_block_size` to a value at least as large as
/// the matrix makes the factorization fully unblocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LuParams {
    /// Column count at or below which a panel is eliminated unblocked.
    pub recursion_threshold: usize,
    /// Upper bound on the width of the outer blocks.
    pub max_block_size: usize,
    /// Upper bound on the block width used inside a panel.
    pub panel_block_size: usize,
}

impl LuParams {
    /// Default policy: unblocked below 16 columns, outer blocks up to 256,
    /// panel blocks of 16.
    pub const DEFAULT: Self = Self {
        recursion_threshold: 16,
        max_block_size: 256,
        panel_block_size: 16,
    };

    /// Never block.
    pub const UNBLOCKED: Self = Self {
        recursion_threshold: usize::MAX,
        max_block_size: usize::MAX,
        panel_block_size: usize::MAX,
    };

    /// Create a custom blocking policy.
    pub const fn new(
        recursion_threshold: usize,
        max_block_size: usize,
        panel_block_size: usize,
    ) -> Self {
        Self {
            recursion_threshold,
            max_block_size,
            panel_block_size,
        }
    }

    /// Validate the policy.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.recursion_threshold == 0 {
            return Err("recursion_threshold must be non-zero");
        }
        if self.max_block_size == 0 || self.panel_block_size == 0 {
            return Err("max_block_size and panel_block_size must be non-zero");
        }
        Ok(())
    }

    /// Outer block width for an `size`-column factorization.
    ///
    /// An eighth of the size rounded down to a multiple of 16, clamped to
    /// `[8, max_block_size]`.
    #[inline]
    pub fn block_size(size: usize, max_block_size: usize) -> usize {
        let bs = (size / 8) / 16 * 16;
        bs.max(8).min(max_block_size)
    }

    /// The same policy with the outer cap replaced by the panel cap.
    #[inline]
    pub fn for_panel(self) -> Self {
        Self {
            max_block_size: self.panel_block_size,
            ..self
        }
    }
}

impl Default for LuParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Iterator over blocks for the outer loops.
pub struct BlockIterator {
    total: usize,
    block_size: usize,
    current: usize,
}

impl BlockIterator {
    pub fn new(total: usize, block_size: usize) -> Self {
        debug_assert!(block_size > 0 || total == 0, "block size must be non-zero");
        Self {
            total,
            block_size,
            current: 0,
        }
    }
}

impl Iterator for BlockIterator {
    /// (start, length) of each block
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.total {
            return None;
        }

        let start = self.current;
        let len = (self.total - start).min(self.block_size);
        self.current += len;

        Some((start, len))
    }
}

/// Iterator over blocks from the far end back to zero.
///
/// Full blocks come first; a ragged remainder, if any, is the block
/// starting at zero.
pub struct RevBlockIterator {
    end: usize,
    block_size: usize,
}

impl RevBlockIterator {
    pub fn new(total: usize, block_size: usize) -> Self {
        debug_assert!(block_size > 0 || total == 0, "block size must be non-zero");
        Self {
            end: total,
            block_size,
        }
    }
}

impl Iterator for RevBlockIterator {
    /// (start, length) of each block
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.end == 0 {
            return None;
        }

        let len = self.end.min(self.block_size);
        self.end -= len;

        Some((self.end, len))
    }
}
