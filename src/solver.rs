//! Direct LU solve of the square equilibrium system.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::determinacy::REACTION_COUNT;
use crate::errors::AnalysisError;

/// Numerical settings for the linear solve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// The system is treated as singular when the smallest LU pivot divided by
    /// the largest, in absolute value, is not above this threshold.
    pub pivot_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            pivot_tolerance: 1.0e-12,
        }
    }
}

/// Solved member forces followed by `[fixed Rx, fixed Ry, roller Ry]`.
#[derive(Clone, Debug, PartialEq)]
pub struct UnknownVector(DVector<f64>);

impl UnknownVector {
    /// Wrap a raw solution vector.
    #[must_use]
    pub fn new(values: DVector<f64>) -> Self {
        Self(values)
    }

    /// Total number of unknowns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return `true` when the vector holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Axial member forces, tension positive.
    #[must_use]
    pub fn member_forces(&self) -> &[f64] {
        let members = self.len().saturating_sub(REACTION_COUNT);
        &self.0.as_slice()[..members]
    }

    /// Reaction components in column order.
    ///
    /// Returns `None` when fewer than three values are present.
    #[must_use]
    pub fn reaction_components(&self) -> Option<[f64; REACTION_COUNT]> {
        let start = self.len().checked_sub(REACTION_COUNT)?;
        Some([self.0[start], self.0[start + 1], self.0[start + 2]])
    }

    /// Borrow the underlying vector.
    #[must_use]
    pub fn as_vector(&self) -> &DVector<f64> {
        &self.0
    }
}

/// Ratio of the smallest to the largest absolute diagonal entry of `u`.
fn pivot_ratio(u: &DMatrix<f64>) -> f64 {
    let diagonal = u.diagonal();
    let largest = diagonal.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if largest == 0.0 {
        return 0.0;
    }
    let smallest = diagonal
        .iter()
        .fold(f64::INFINITY, |acc, v| acc.min(v.abs()));
    smallest / largest
}

/// Solve `matrix * x = rhs` with partial-pivot LU factorisation.
///
/// # Errors
///
/// Returns [`AnalysisError::DimensionMismatch`] when `matrix` is not square or
/// `rhs` has the wrong length, and [`AnalysisError::SingularSystem`] when the
/// pivot ratio is at or below `config.pivot_tolerance`.
///
/// # Examples
/// ```
/// use nalgebra::{DMatrix, DVector};
/// use trussx_joints::{solve, SolverConfig};
///
/// let matrix = DMatrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 4.0]);
/// let rhs = DVector::from_vec(vec![2.0, 2.0]);
/// let x = solve(&matrix, &rhs, &SolverConfig::default()).expect("regular system");
/// assert_eq!(x.as_vector(), &DVector::from_vec(vec![1.0, 0.5]));
/// ```
pub fn solve(
    matrix: &DMatrix<f64>,
    rhs: &DVector<f64>,
    config: &SolverConfig,
) -> Result<UnknownVector, AnalysisError> {
    let (rows, cols) = matrix.shape();
    if rows != cols || rhs.len() != rows {
        return Err(AnalysisError::DimensionMismatch {
            rows,
            cols,
            rhs: rhs.len(),
        });
    }

    let lu = matrix.clone().lu();
    let pivot_ratio = pivot_ratio(&lu.u());
    if pivot_ratio.is_nan() || pivot_ratio <= config.pivot_tolerance {
        return Err(AnalysisError::SingularSystem { pivot_ratio });
    }
    let solution = lu
        .solve(rhs)
        .ok_or(AnalysisError::SingularSystem { pivot_ratio })?;
    Ok(UnknownVector(solution))
}
