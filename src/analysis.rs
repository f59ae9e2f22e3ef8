//! The method-of-joints pipeline from geometry to classified member forces.

use serde::Serialize;

use crate::adjacency::build_adjacency;
use crate::assembly::assemble;
use crate::classify::{classify, reactions, ForceKind, MemberResult, Reactions};
use crate::conditions::BoundaryConditions;
use crate::config::AnalysisConfig;
use crate::determinacy::{check_determinacy, Determinacy, REACTION_COUNT};
use crate::errors::AnalysisError;
use crate::geometry::Force;
use crate::solver::solve;
use crate::truss::TrussGeometry;

/// Member forces and reactions of a solved truss.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrussSolution {
    /// One entry per member, in member order.
    pub members: Vec<MemberResult>,
    /// Support reactions.
    pub reactions: Reactions,
    /// Largest absolute entry of `A x - b` for the solved system.
    pub max_residual: f64,
}

impl TrussSolution {
    /// Axial force in `member`.
    #[must_use]
    pub fn member_force(&self, member: usize) -> Option<f64> {
        self.members.get(member).map(|result| result.force)
    }

    /// Members of the given kind, in member order.
    pub fn members_of(&self, kind: ForceKind) -> impl Iterator<Item = &MemberResult> + '_ {
        self.members
            .iter()
            .filter(move |result| result.kind == kind)
    }

    /// Members in tension.
    pub fn tension_members(&self) -> impl Iterator<Item = &MemberResult> + '_ {
        self.members_of(ForceKind::Tension)
    }

    /// Members in compression.
    pub fn compression_members(&self) -> impl Iterator<Item = &MemberResult> + '_ {
        self.members_of(ForceKind::Compression)
    }

    /// Members carrying no force.
    pub fn zero_members(&self) -> impl Iterator<Item = &MemberResult> + '_ {
        self.members_of(ForceKind::Zero)
    }

    /// Member with the largest absolute force.
    #[must_use]
    pub fn max_abs_force(&self) -> Option<&MemberResult> {
        self.members
            .iter()
            .max_by(|a, b| a.force.abs().total_cmp(&b.force.abs()))
    }

    /// Resultant of the external loads plus the support reactions.
    ///
    /// Zero, up to round-off, for any solved truss.
    #[must_use]
    pub fn global_imbalance(&self, conditions: &BoundaryConditions) -> Force {
        let total = conditions.total_load();
        Force::new(
            total.x + self.reactions.fixed_x,
            total.y + self.reactions.fixed_y + self.reactions.roller_y,
        )
    }
}

/// Solve a truss by the method of joints.
///
/// The stages run in order and the first failure ends the run: boundary
/// validation, the determinacy count, adjacency, assembly, the LU solve and
/// finally classification.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidBoundary`] for inconsistent supports or loads,
/// [`AnalysisError::StructuralDeterminacy`] when `2 * nodes != members + 3`,
/// [`AnalysisError::DegenerateMember`] for zero-length members and
/// [`AnalysisError::SingularSystem`] when the geometry makes the equations
/// dependent.
///
/// # Examples
/// ```
/// use trussx_joints::{analyze, force, point, AnalysisConfig, BoundaryConditions, Load, Supports, TrussGeometry};
///
/// let truss = TrussGeometry::new(
///     vec![point(0.0, 0.0), point(4.0, 0.0), point(2.0, 2.0)],
///     vec![(0, 1), (1, 2), (0, 2)],
/// )
/// .expect("valid triangle");
/// let conditions = BoundaryConditions::new(
///     Supports::new(0, 1),
///     vec![Load::new(2, force(0.0, -10.0))],
/// );
/// let solution = analyze(&truss, &conditions, &AnalysisConfig::default()).expect("solvable");
/// assert!((solution.reactions.fixed_y - 5.0).abs() < 1.0e-9);
/// assert!(solution.member_force(0).expect("member 0") > 0.0);
/// ```
pub fn analyze(
    geometry: &TrussGeometry,
    conditions: &BoundaryConditions,
    config: &AnalysisConfig,
) -> Result<TrussSolution, AnalysisError> {
    conditions.validate(geometry)?;

    let nodes = geometry.node_count();
    let members = geometry.member_count();
    let class = check_determinacy(nodes, members);
    if class != Determinacy::Determinate {
        return Err(AnalysisError::StructuralDeterminacy {
            class,
            equations: 2 * nodes,
            unknowns: members + REACTION_COUNT,
        });
    }

    let adjacency = build_adjacency(geometry);
    let system = assemble(geometry, &adjacency, conditions)?;
    let unknowns = solve(&system.matrix, &system.rhs, &config.solver)?;
    let max_residual = system
        .max_residual(unknowns.as_vector())
        .unwrap_or(f64::INFINITY);

    Ok(TrussSolution {
        members: classify(&unknowns, members, config.zero_force_tolerance),
        reactions: reactions(&unknowns),
        max_residual,
    })
}
