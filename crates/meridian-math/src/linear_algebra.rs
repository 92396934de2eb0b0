//! Linear algebra utilities.
//!
//! Thin, dimension-checked wrappers over `nalgebra` for the products that
//! portfolio risk needs.

use nalgebra::{DMatrix, DVector};

use crate::error::{MathError, MathResult};

/// Computes the matrix-vector product `M · v`.
pub fn mat_vec(matrix: &DMatrix<f64>, v: &[f64]) -> MathResult<DVector<f64>> {
    if matrix.ncols() != v.len() {
        return Err(MathError::DimensionMismatch {
            rows1: matrix.nrows(),
            cols1: matrix.ncols(),
            rows2: v.len(),
            cols2: 1,
        });
    }
    Ok(matrix * DVector::from_column_slice(v))
}

/// Computes the quadratic form `wᵀ · M · w`.
///
/// For a covariance matrix this is the portfolio variance.
pub fn quadratic_form(matrix: &DMatrix<f64>, w: &[f64]) -> MathResult<f64> {
    if matrix.nrows() != matrix.ncols() {
        return Err(MathError::invalid_input("quadratic form needs a square matrix"));
    }
    let mw = mat_vec(matrix, w)?;
    Ok(DVector::from_column_slice(w).dot(&mw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mat_vec() {
        let m = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        let out = mat_vec(&m, &[1.0, 2.0]).unwrap();
        assert_relative_eq!(out[0], 4.0);
        assert_relative_eq!(out[1], 7.0);
    }

    #[test]
    fn test_quadratic_form() {
        let m = DMatrix::from_row_slice(2, 2, &[0.04, 0.01, 0.01, 0.09]);
        // 0.25*0.04 + 2*0.25*0.01 + 0.25*0.09 = 0.0375
        assert_relative_eq!(quadratic_form(&m, &[0.5, 0.5]).unwrap(), 0.0375, epsilon = 1e-15);
    }

    #[test]
    fn test_dimension_errors() {
        let m = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        assert!(mat_vec(&m, &[1.0, 2.0, 3.0]).is_err());

        let rect = DMatrix::from_row_slice(1, 2, &[1.0, 2.0]);
        assert!(quadratic_form(&rect, &[1.0, 2.0]).is_err());
    }
}
