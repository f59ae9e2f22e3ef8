//! Tension/compression classification of solved member forces.

use serde::Serialize;

use crate::solver::UnknownVector;

/// Sign category of a member's axial force.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ForceKind {
    /// Positive force: the member pulls its joints toward each other.
    Tension,
    /// Negative force: the member pushes its joints apart.
    Compression,
    /// Force within the zero tolerance.
    Zero,
}

impl ForceKind {
    /// Classify a single force value.
    ///
    /// # Examples
    /// ```
    /// use trussx_joints::ForceKind;
    ///
    /// assert_eq!(ForceKind::of(4.0, 1.0e-9), ForceKind::Tension);
    /// assert_eq!(ForceKind::of(-4.0, 1.0e-9), ForceKind::Compression);
    /// assert_eq!(ForceKind::of(1.0e-12, 1.0e-9), ForceKind::Zero);
    /// ```
    #[must_use]
    pub fn of(force: f64, zero_tolerance: f64) -> Self {
        if force.abs() <= zero_tolerance {
            ForceKind::Zero
        } else if force > 0.0 {
            ForceKind::Tension
        } else {
            ForceKind::Compression
        }
    }

    /// Lower-case label used in reports.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ForceKind::Tension => "tension",
            ForceKind::Compression => "compression",
            ForceKind::Zero => "zero",
        }
    }
}

/// Solved axial force of one member.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MemberResult {
    /// Member index.
    pub member: usize,
    /// Axial force, tension positive.
    pub force: f64,
    /// Sign category of `force`.
    pub kind: ForceKind,
}

/// Support reactions in global axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Reactions {
    /// Horizontal reaction at the pinned support.
    pub fixed_x: f64,
    /// Vertical reaction at the pinned support.
    pub fixed_y: f64,
    /// Vertical reaction at the roller.
    pub roller_y: f64,
}

impl Reactions {
    /// Sum of the vertical reactions.
    #[must_use]
    pub fn total_vertical(&self) -> f64 {
        self.fixed_y + self.roller_y
    }
}

/// Classify the first `member_count` unknowns as member forces.
///
/// Members beyond the length of the solution are omitted.
#[must_use]
pub fn classify(
    unknowns: &UnknownVector,
    member_count: usize,
    zero_tolerance: f64,
) -> Vec<MemberResult> {
    unknowns
        .member_forces()
        .iter()
        .take(member_count)
        .enumerate()
        .map(|(member, &force)| MemberResult {
            member,
            force,
            kind: ForceKind::of(force, zero_tolerance),
        })
        .collect()
}

/// Read the three reaction components from the tail of the solution.
#[must_use]
pub fn reactions(unknowns: &UnknownVector) -> Reactions {
    unknowns
        .reaction_components()
        .map(|[fixed_x, fixed_y, roller_y]| Reactions {
            fixed_x,
            fixed_y,
            roller_y,
        })
        .unwrap_or_default()
}
