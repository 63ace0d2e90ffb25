use crate::view::RawMat;
use pivlu_types::LuScalar;

/// Pack a block of the left operand into `mr`-row micro-panels.
///
/// The packed format stores the block's rows in groups of `mr`, each group
/// laid out column by column. The ragged last group is zero padded so the
/// microkernel always reads full `mr`-wide columns.
///
/// # Layout
/// For A with dimensions m×k:
/// ```text
/// Original A (m=6, k=4, mr=4):
/// [ a00 a01 a02 a03 ]
/// [ a10 a11 a12 a13 ]
/// [ a20 a21 a22 a23 ]
/// [ a30 a31 a32 a33 ]
/// [ a40 a41 a42 a43 ]
/// [ a50 a51 a52 a53 ]
///
/// Packed (column-major within mr×k blocks):
/// Block 0 (rows 0-3): a00 a10 a20 a30 | a01 a11 a21 a31 | a02 a12 a22 a32 | a03 a13 a23 a33
/// Block 1 (rows 4-5): a40 a50 0   0   | a41 a51 0   0   | a42 a52 0   0   | a43 a53 0   0
/// ```
///
/// # Safety
/// - `a` must be readable at every element of its view
/// - `packed` must hold at least `packed_a_size(a.nrows(), a.ncols(), mr)` elements
pub unsafe fn pack_a<T: LuScalar>(a: RawMat<T>, packed: &mut [T], mr: usize) {
    let m = a.nrows();
    let k = a.ncols();
    debug_assert!(packed.len() >= packed_a_size(m, k, mr));

    let zero = T::scalar_zero();
    let mut packed_idx = 0;

    for row_start in (0..m).step_by(mr) {
        let rows = (m - row_start).min(mr);
        for col in 0..k {
            for row_offset in 0..rows {
                packed[packed_idx + row_offset] = a.read(row_start + row_offset, col);
            }
            for slot in &mut packed[packed_idx + rows..packed_idx + mr] {
                *slot = zero;
            }
            packed_idx += mr;
        }
    }
}

/// Pack a block of the right operand into `nr`-column micro-panels.
///
/// The packed format stores the block's columns in groups of `nr`, each
/// group laid out row by row, zero padded like [`pack_a`].
///
/// # Layout
/// For B with dimensions k×n:
/// ```text
/// Original B (k=3, n=6, nr=4):
/// [ b00 b01 b02 b03 b04 b05 ]
/// [ b10 b11 b12 b13 b14 b15 ]
/// [ b20 b21 b22 b23 b24 b25 ]
///
/// Packed (row-major within k×nr blocks):
/// Block 0 (cols 0-3): b00 b01 b02 b03 | b10 b11 b12 b13 | b20 b21 b22 b23
/// Block 1 (cols 4-5): b04 b05 0   0   | b14 b15 0   0   | b24 b25 0   0
/// ```
///
/// # Safety
/// - `b` must be readable at every element of its view
/// - `packed` must hold at least `packed_b_size(b.nrows(), b.ncols(), nr)` elements
pub unsafe fn pack_b<T: LuScalar>(b: RawMat<T>, packed: &mut [T], nr: usize) {
    let k = b.nrows();
    let n = b.ncols();
    debug_assert!(packed.len() >= packed_b_size(k, n, nr));

    let zero = T::scalar_zero();
    let mut packed_idx = 0;

    for col_start in (0..n).step_by(nr) {
        let cols = (n - col_start).min(nr);
        for row in 0..k {
            for col_offset in 0..cols {
                packed[packed_idx + col_offset] = b.read(row, col_start + col_offset);
            }
            for slot in &mut packed[packed_idx + cols..packed_idx + nr] {
                *slot = zero;
            }
            packed_idx += nr;
        }
    }
}

/// Calculate packed buffer size for A.
#[inline]
pub fn packed_a_size(m: usize, k: usize, mr: usize) -> usize {
    m.div_ceil(mr) * mr * k
}

/// Calculate packed buffer size for B.
#[inline]
pub fn packed_b_size(k: usize, n: usize, nr: usize) -> usize {
    k * n.div_ceil(nr) * nr
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Layout;

    #[test]
    fn test_pack_a_row_major() {
        let mut a: [f64; 6] = [
            1.0, 2.0, 3.0, // row 0
            4.0, 5.0, 6.0, // row 1
        ];
        let mr = 4;
        let mut packed = vec![-1.0f64; packed_a_size(2, 3, mr)];

        unsafe {
            let view = RawMat::new(a.as_mut_ptr(), 2, 3, 3, Layout::RowMajor);
            pack_a(view, &mut packed, mr);
        }

        // column 0: [1,4,0,0], column 1: [2,5,0,0], column 2: [3,6,0,0]
        assert_eq!(
            packed,
            vec![1.0, 4.0, 0.0, 0.0, 2.0, 5.0, 0.0, 0.0, 3.0, 6.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_pack_a_col_major() {
        // [[1, 2, 3], [4, 5, 6]] stored column by column
        let mut a: [f64; 6] = [1.0, 4.0, 2.0, 5.0, 3.0, 6.0];
        let mr = 4;
        let mut packed = vec![0.0f64; packed_a_size(2, 3, mr)];

        unsafe {
            let view = RawMat::new(a.as_mut_ptr(), 2, 3, 2, Layout::ColMajor);
            pack_a(view, &mut packed, mr);
        }

        // same logical matrix, same packing
        assert_eq!(packed[0], 1.0);
        assert_eq!(packed[1], 4.0);
        assert_eq!(packed[4], 2.0);
        assert_eq!(packed[5], 5.0);
    }

    #[test]
    fn test_pack_a_multiple_blocks() {
        // 3x2 matrix with mr=2: rows {0,1} then {2, pad}
        let mut a: [f64; 6] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut packed = vec![-1.0f64; packed_a_size(3, 2, 2)];

        unsafe {
            let view = RawMat::new(a.as_mut_ptr(), 3, 2, 2, Layout::RowMajor);
            pack_a(view, &mut packed, 2);
        }

        assert_eq!(packed, vec![1.0, 3.0, 2.0, 4.0, 5.0, 0.0, 6.0, 0.0]);
    }

    #[test]
    fn test_pack_a_submatrix() {
        // 3x3 [[0,1,2],[3,4,5],[6,7,8]], pack the 2x2 block at (1, 1)
        let mut a: Vec<f64> = (0..9).map(|x| x as f64).collect();
        let mut packed = vec![0.0f64; packed_a_size(2, 2, 2)];

        unsafe {
            let view = RawMat::new(a.as_mut_ptr(), 3, 3, 3, Layout::RowMajor);
            pack_a(view.submatrix(1, 1, 2, 2), &mut packed, 2);
        }

        assert_eq!(packed, vec![4.0, 7.0, 5.0, 8.0]);
    }

    #[test]
    fn test_pack_b_row_major() {
        let mut b: [f64; 6] = [
            1.0, 2.0, // row 0
            3.0, 4.0, // row 1
            5.0, 6.0, // row 2
        ];
        let nr = 4;
        let mut packed = vec![-1.0f64; packed_b_size(3, 2, nr)];

        unsafe {
            let view = RawMat::new(b.as_mut_ptr(), 3, 2, 2, Layout::RowMajor);
            pack_b(view, &mut packed, nr);
        }

        // row 0: [1,2,0,0], row 1: [3,4,0,0], row 2: [5,6,0,0]
        assert_eq!(
            packed,
            vec![1.0, 2.0, 0.0, 0.0, 3.0, 4.0, 0.0, 0.0, 5.0, 6.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_pack_b_col_major() {
        // B (k=3, n=2): [[1, 2], [3, 4], [5, 6]] stored column by column
        let mut b: [f64; 6] = [1.0, 3.0, 5.0, 2.0, 4.0, 6.0];
        let nr = 4;
        let mut packed = vec![0.0f64; packed_b_size(3, 2, nr)];

        unsafe {
            let view = RawMat::new(b.as_mut_ptr(), 3, 2, 3, Layout::ColMajor);
            pack_b(view, &mut packed, nr);
        }

        assert_eq!(packed[0], 1.0);
        assert_eq!(packed[1], 2.0);
        assert_eq!(packed[4], 3.0);
        assert_eq!(packed[5], 4.0);
        assert_eq!(packed[8], 5.0);
        assert_eq!(packed[9], 6.0);
    }

    #[test]
    fn test_pack_b_transposed_view() {
        // Packing the transpose of a row-major 2x3 reads it as 3x2.
        let mut a: [f64; 6] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut packed = vec![0.0f64; packed_b_size(3, 2, 2)];

        unsafe {
            let view = RawMat::new(a.as_mut_ptr(), 2, 3, 3, Layout::RowMajor);
            pack_b(view.transpose(), &mut packed, 2);
        }

        assert_eq!(packed, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_packed_sizes() {
        assert_eq!(packed_a_size(6, 4, 4), 32);
        assert_eq!(packed_a_size(8, 4, 4), 32);
        assert_eq!(packed_b_size(3, 6, 4), 24);
        assert_eq!(packed_b_size(3, 0, 4), 0);
    }
}
