// src/matrix.rs

use nalgebra::{Cholesky, DMatrix};
use ndarray::{Array1, Array2, ArrayView2, Axis};

use crate::error::{Result, SamplerError};

/// Number of packed entries for a d x d symmetric matrix
pub fn packed_len(d: usize) -> usize {
    d * (d + 1) / 2
}

/// Recover d from a packed length, rejecting non-triangular lengths
pub fn dim_from_packed(len: usize) -> Result<usize> {
    let mut d = 0;
    while packed_len(d) < len {
        d += 1;
    }
    if packed_len(d) != len {
        return Err(SamplerError::invalid(format!(
            "packed length {len} is not d(d+1)/2 for any d"
        )));
    }
    Ok(d)
}

/// Half-vectorize a symmetric matrix.
///
/// Ordering is the row-major lower triangle: for each row `i`, entries
/// `a[i][0..=i]`. For d = 3 that is (0,0), (1,0), (1,1), (2,0), (2,1), (2,2).
/// Only the lower triangle is read.
pub fn pack_symmetric(a: &ArrayView2<f64>) -> Result<Array1<f64>> {
    let (nrow, ncol) = a.dim();
    if nrow != ncol {
        return Err(SamplerError::invalid(format!(
            "cannot pack a non-square {nrow}x{ncol} matrix"
        )));
    }

    let mut packed = Vec::with_capacity(packed_len(nrow));
    for i in 0..nrow {
        for j in 0..=i {
            packed.push(a[[i, j]]);
        }
    }
    Ok(Array1::from_vec(packed))
}

/// Inverse of [`pack_symmetric`]; mirrors the lower triangle into the upper.
pub fn unpack_symmetric(packed: &[f64]) -> Result<Array2<f64>> {
    let d = dim_from_packed(packed.len())?;
    let mut a = Array2::<f64>::zeros((d, d));

    let mut k = 0;
    for i in 0..d {
        for j in 0..=i {
            a[[i, j]] = packed[k];
            a[[j, i]] = packed[k];
            k += 1;
        }
    }
    Ok(a)
}

pub(crate) fn to_dmatrix(a: &ArrayView2<f64>) -> DMatrix<f64> {
    let (nrow, ncol) = a.dim();
    DMatrix::from_fn(nrow, ncol, |i, j| a[[i, j]])
}

pub(crate) fn from_dmatrix(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}

/// Lower Cholesky factor L with L Lᵗ = A, or None when A is not positive
/// definite. The upper factor (Lᵗ, so that (Lᵗ)ᵗ Lᵗ = A) is its transpose.
pub fn cholesky_lower(a: &ArrayView2<f64>) -> Option<Array2<f64>> {
    if a.nrows() != a.ncols() {
        return None;
    }
    Cholesky::new(to_dmatrix(a)).map(|chol| from_dmatrix(&chol.l()))
}

/// Inverse of a symmetric positive-definite matrix via its Cholesky factor
pub fn invert_spd(a: &ArrayView2<f64>) -> Option<Array2<f64>> {
    if a.nrows() != a.ncols() {
        return None;
    }
    let chol = Cholesky::new(to_dmatrix(a))?;
    Some(symmetrize(from_dmatrix(&chol.inverse())))
}

/// Average a matrix with its transpose to remove round-off asymmetry
pub fn symmetrize(mut a: Array2<f64>) -> Array2<f64> {
    let d = a.nrows();
    for i in 0..d {
        for j in 0..i {
            let avg = 0.5 * (a[[i, j]] + a[[j, i]]);
            a[[i, j]] = avg;
            a[[j, i]] = avg;
        }
    }
    a
}

/// Column means of an n x d data matrix
pub fn column_means(data: &ArrayView2<f64>) -> Array1<f64> {
    let n = data.nrows() as f64;
    data.sum_axis(Axis(0)) / n
}

/// Scatter matrix S = Σ_i (y_i - ȳ)(y_i - ȳ)ᵗ
pub fn scatter_matrix(data: &ArrayView2<f64>, means: &Array1<f64>) -> Array2<f64> {
    let centered = data - &means.view().insert_axis(Axis(0));
    symmetrize(centered.t().dot(&centered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use proptest::prelude::*;

    #[test]
    fn pack_order_is_row_major_lower() {
        let a = array![[1.0, 2.0, 4.0], [2.0, 3.0, 5.0], [4.0, 5.0, 6.0]];
        let packed = pack_symmetric(&a.view()).unwrap();
        assert_eq!(packed.to_vec(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn pack_rejects_non_square() {
        let a = Array2::<f64>::zeros((2, 3));
        assert!(matches!(
            pack_symmetric(&a.view()),
            Err(SamplerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn unpack_rejects_non_triangular_length() {
        assert!(unpack_symmetric(&[1.0, 2.0]).is_err());
        assert!(unpack_symmetric(&[1.0, 2.0, 3.0]).is_ok());
    }

    #[test]
    fn dim_from_packed_inverts_packed_len() {
        for d in 0..12 {
            assert_eq!(dim_from_packed(packed_len(d)).unwrap(), d);
        }
    }

    #[test]
    fn cholesky_reconstructs_input() {
        let a = array![[4.0, 2.0, 0.6], [2.0, 2.0, 0.5], [0.6, 0.5, 3.0]];
        let l = cholesky_lower(&a.view()).unwrap();
        let back = l.dot(&l.t());
        for (x, y) in back.iter().zip(a.iter()) {
            assert!((x - y).abs() < 1e-12);
        }
        assert_eq!(l[[0, 1]], 0.0);
    }

    #[test]
    fn cholesky_rejects_indefinite() {
        let a = array![[1.0, 2.0], [2.0, 1.0]];
        assert!(cholesky_lower(&a.view()).is_none());
        assert!(invert_spd(&a.view()).is_none());
    }

    #[test]
    fn invert_spd_gives_identity() {
        let a = array![[2.0, 0.5], [0.5, 1.0]];
        let inv = invert_spd(&a.view()).unwrap();
        let eye = a.dot(&inv);
        assert!((eye[[0, 0]] - 1.0).abs() < 1e-12);
        assert!(eye[[0, 1]].abs() < 1e-12);
        assert!((eye[[1, 1]] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn scatter_matches_hand_computation() {
        let data = array![[1.0, 2.0], [3.0, 6.0], [5.0, 4.0]];
        let means = column_means(&data.view());
        assert_eq!(means.to_vec(), vec![3.0, 4.0]);
        let s = scatter_matrix(&data.view(), &means);
        // centered: (-2,-2), (0,2), (2,0)
        assert_eq!(s, array![[8.0, 4.0], [4.0, 8.0]]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn unpack_after_pack_is_identity(
            d in 1usize..7,
            seed in proptest::collection::vec(-1e6f64..1e6, 49),
        ) {
            let mut a = Array2::<f64>::zeros((d, d));
            for i in 0..d {
                for j in 0..=i {
                    a[[i, j]] = seed[i * 7 + j];
                    a[[j, i]] = seed[i * 7 + j];
                }
            }
            let packed = pack_symmetric(&a.view()).unwrap();
            prop_assert_eq!(packed.len(), packed_len(d));
            let back = unpack_symmetric(packed.as_slice().unwrap()).unwrap();
            prop_assert_eq!(back, a);
        }
    }
}
