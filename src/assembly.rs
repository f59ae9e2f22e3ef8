//! Assembly of the joint equilibrium equations.
//!
//! Every node contributes two rows: row `2i` balances forces along x and row
//! `2i + 1` along y. Columns `0..members` hold member axial forces (tension
//! positive) and the last three columns hold the support reactions.

use nalgebra::{DMatrix, DVector};

use crate::adjacency::JointAdjacency;
use crate::conditions::BoundaryConditions;
use crate::determinacy::REACTION_COUNT;
use crate::errors::AnalysisError;
use crate::truss::TrussGeometry;

/// Offset of the fixed support's horizontal reaction after the member columns.
pub const FIXED_X_COLUMN: usize = 0;
/// Offset of the fixed support's vertical reaction after the member columns.
pub const FIXED_Y_COLUMN: usize = 1;
/// Offset of the roller's vertical reaction after the member columns.
pub const ROLLER_Y_COLUMN: usize = 2;

/// Linear system `A x = b` expressing equilibrium at every joint.
#[derive(Clone, Debug, PartialEq)]
pub struct EquilibriumSystem {
    /// Coefficients, `2 * nodes` rows by `members + 3` columns.
    pub matrix: DMatrix<f64>,
    /// Negated external loads, `2 * nodes` entries.
    pub rhs: DVector<f64>,
}

impl EquilibriumSystem {
    /// Number of member columns in the system.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.matrix.ncols().saturating_sub(REACTION_COUNT)
    }

    /// Out-of-balance vector `A x - b` for a candidate solution.
    ///
    /// Returns `None` when `unknowns` does not have one entry per column.
    #[must_use]
    pub fn residual(&self, unknowns: &DVector<f64>) -> Option<DVector<f64>> {
        if unknowns.len() != self.matrix.ncols() {
            return None;
        }
        Some(&self.matrix * unknowns - &self.rhs)
    }

    /// Largest absolute entry of [`residual`](Self::residual).
    #[must_use]
    pub fn max_residual(&self, unknowns: &DVector<f64>) -> Option<f64> {
        self.residual(unknowns).map(|residual| residual.amax())
    }
}

/// Build the equilibrium system for a supported, loaded truss.
///
/// At node `i`, each incident member adds the unit vector pointing from `i`
/// toward its far end, so a positive member force pulls the joint along the
/// member. The fixed support adds unit reactions in x and y, the roller in y
/// only. The right-hand side holds the negated resultant load at each node.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidBoundary`] when supports or loads reference
/// missing nodes, [`AnalysisError::DegenerateMember`] when a member has zero
/// length and [`AnalysisError::DimensionMismatch`] when `adjacency` was built
/// for a different node count.
pub fn assemble(
    geometry: &TrussGeometry,
    adjacency: &JointAdjacency,
    conditions: &BoundaryConditions,
) -> Result<EquilibriumSystem, AnalysisError> {
    conditions.validate(geometry)?;

    let members = geometry.member_count();
    let rows = 2 * geometry.node_count();
    let mut matrix = DMatrix::zeros(rows, members + REACTION_COUNT);
    let mut rhs = DVector::zeros(rows);
    if adjacency.len() != geometry.node_count() {
        return Err(AnalysisError::DimensionMismatch {
            rows,
            cols: matrix.ncols(),
            rhs: 2 * adjacency.len(),
        });
    }

    for (node, incident) in adjacency.iter() {
        let (x_row, y_row) = (2 * node, 2 * node + 1);
        for &member in incident {
            let direction = geometry.member_direction(member, node)?;
            matrix[(x_row, member)] += direction.x;
            matrix[(y_row, member)] += direction.y;
        }

        let load = conditions.net_load(node);
        rhs[x_row] = -load.x;
        rhs[y_row] = -load.y;
    }

    let supports = conditions.supports;
    matrix[(2 * supports.fixed, members + FIXED_X_COLUMN)] = 1.0;
    matrix[(2 * supports.fixed + 1, members + FIXED_Y_COLUMN)] = 1.0;
    matrix[(2 * supports.roller + 1, members + ROLLER_Y_COLUMN)] = 1.0;

    Ok(EquilibriumSystem { matrix, rhs })
}
