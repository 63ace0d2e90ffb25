use crate::view::RawMat;

/// Row permutation built from a transposition list.
///
/// Both directions are kept:
/// - `forward[i]` is the row that original row `i` is moved to
/// - `inverse[i]` is the original row that ends up in row `i`
///
/// so `P * B` gathers `result[i] = B[inverse[i]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    forward: Vec<usize>,
    inverse: Vec<usize>,
}

impl Permutation {
    /// The identity permutation on `n` rows.
    pub fn identity(n: usize) -> Self {
        Self {
            forward: (0..n).collect(),
            inverse: (0..n).collect(),
        }
    }

    /// Replay `transpositions` from the last entry back to the first.
    ///
    /// Entry `k` must be in `k..n`; entries equal to their index are no-ops.
    pub fn from_transpositions(transpositions: &[usize]) -> Self {
        let n = transpositions.len();
        let mut forward: Vec<usize> = (0..n).collect();
        for k in (0..n).rev() {
            debug_assert!(transpositions[k] < n, "transposition out of range");
            forward.swap(k, transpositions[k]);
        }

        let mut inverse = vec![0; n];
        for (i, &dst) in forward.iter().enumerate() {
            inverse[dst] = i;
        }

        Self { forward, inverse }
    }

    /// Number of rows permuted.
    #[inline]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Destination row of each original row.
    #[inline]
    pub fn forward(&self) -> &[usize] {
        &self.forward
    }

    /// Original row of each destination row.
    #[inline]
    pub fn inverse(&self) -> &[usize] {
        &self.inverse
    }

    /// Whether no row moves.
    pub fn is_identity(&self) -> bool {
        self.forward.iter().enumerate().all(|(i, &p)| i == p)
    }

    /// `+1` for an even permutation, `-1` for an odd one.
    pub fn sign(&self) -> i32 {
        let mut visited = vec![false; self.len()];
        let mut odd = false;
        for start in 0..self.len() {
            if visited[start] {
                continue;
            }
            let mut cycle_len = 0;
            let mut i = start;
            while !visited[i] {
                visited[i] = true;
                i = self.forward[i];
                cycle_len += 1;
            }
            if cycle_len % 2 == 0 {
                odd = !odd;
            }
        }
        if odd {
            -1
        } else {
            1
        }
    }

    /// `dst = P * src`: row `i` of `dst` is row `inverse[i]` of `src`.
    ///
    /// # Safety
    /// - `src` readable and `dst` writable over their whole views
    /// - both have `self.len()` rows and equal column counts
    /// - `src` and `dst` must not overlap
    pub unsafe fn apply_rows<T: Copy>(&self, src: RawMat<T>, dst: RawMat<T>) {
        gather_rows(&self.inverse, src, dst);
    }

    /// `dst = P^-1 * src`: row `i` of `dst` is row `forward[i]` of `src`.
    ///
    /// # Safety
    /// Same requirements as [`Permutation::apply_rows`].
    pub unsafe fn apply_rows_inverse<T: Copy>(&self, src: RawMat<T>, dst: RawMat<T>) {
        gather_rows(&self.forward, src, dst);
    }
}

unsafe fn gather_rows<T: Copy>(from: &[usize], src: RawMat<T>, dst: RawMat<T>) {
    debug_assert_eq!(src.nrows(), from.len());
    debug_assert_eq!(dst.nrows(), from.len());
    debug_assert_eq!(src.ncols(), dst.ncols());

    for (i, &s) in from.iter().enumerate() {
        for j in 0..dst.ncols() {
            dst.write(i, j, src.read(s, j));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Layout;

    #[test]
    fn test_two_by_two() {
        let p = Permutation::from_transpositions(&[1, 1]);
        assert_eq!(p.forward(), &[1, 0]);
        assert_eq!(p.inverse(), &[1, 0]);
        assert_eq!(p.sign(), -1);
        assert!(!p.is_identity());
    }

    #[test]
    fn test_identity() {
        let p = Permutation::from_transpositions(&[0, 1, 2, 3]);
        assert!(p.is_identity());
        assert_eq!(p, Permutation::identity(4));
        assert_eq!(p.sign(), 1);
        assert!(Permutation::identity(0).is_empty());
    }

    #[test]
    fn test_reverse_replay_order() {
        // Swaps (0,2) then (1,2); replayed backwards from identity.
        let p = Permutation::from_transpositions(&[2, 2, 2]);
        // k=2: no-op, k=1: swap 1,2 -> [0,2,1], k=0: swap 0,2 -> [1,2,0]
        assert_eq!(p.forward(), &[1, 2, 0]);
        assert_eq!(p.inverse(), &[2, 0, 1]);
        assert_eq!(p.sign(), 1);
    }

    #[test]
    fn test_apply_matches_forward_swaps() {
        // Applying the swaps in forward order to a vector equals P * v.
        let t = [3usize, 2, 2, 3];
        let v = vec![10, 11, 12, 13];
        let mut swapped = v.clone();
        for (k, &tk) in t.iter().enumerate() {
            swapped.swap(k, tk);
        }

        let p = Permutation::from_transpositions(&t);
        let mut src = v.clone();
        let mut dst = vec![0; 4];
        unsafe {
            let s = RawMat::new(src.as_mut_ptr(), 4, 1, 1, Layout::RowMajor);
            let d = RawMat::new(dst.as_mut_ptr(), 4, 1, 4, Layout::ColMajor);
            p.apply_rows(s, d);
        }
        assert_eq!(dst, swapped);
    }

    #[test]
    fn test_apply_rows_roundtrip() {
        let p = Permutation::from_transpositions(&[2, 2, 2]);
        let mut src = vec![0.0f64, 1.0, 10.0, 11.0, 20.0, 21.0]; // 3x2
        let mut mid = vec![0.0f64; 6];
        let mut back = vec![0.0f64; 6];

        unsafe {
            let s = RawMat::new(src.as_mut_ptr(), 3, 2, 2, Layout::RowMajor);
            let m = RawMat::new(mid.as_mut_ptr(), 3, 2, 3, Layout::ColMajor);
            let b = RawMat::new(back.as_mut_ptr(), 3, 2, 2, Layout::RowMajor);
            p.apply_rows(s, m);
            p.apply_rows_inverse(m, b);
        }

        // inverse = [2, 0, 1]: rows come from 20, 0, 10 (col-major storage)
        assert_eq!(mid, vec![20.0, 0.0, 10.0, 21.0, 1.0, 11.0]);
        assert_eq!(back, src);
    }
}
