//! Counting check for static determinacy of a planar truss.

use std::fmt;

use serde::Serialize;

/// Outcome of comparing equilibrium equations against unknown forces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Determinacy {
    /// `2 * nodes == members + 3`. Necessary for a solvable system, not sufficient.
    Determinate,
    /// More unknowns than equations: redundant members.
    OverConstrained,
    /// Fewer unknowns than equations: the truss is a mechanism.
    UnderConstrained,
}

impl fmt::Display for Determinacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Determinacy::Determinate => "statically determinate",
            Determinacy::OverConstrained => "over-constrained",
            Determinacy::UnderConstrained => "under-constrained",
        };
        f.write_str(label)
    }
}

/// Number of reaction unknowns supplied by one pin and one roller.
pub const REACTION_COUNT: usize = 3;

/// Classify a truss by comparing `2 * node_count` with `member_count + 3`.
///
/// # Examples
/// ```
/// use trussx_joints::{check_determinacy, Determinacy};
///
/// assert_eq!(check_determinacy(3, 3), Determinacy::Determinate);
/// assert_eq!(check_determinacy(3, 4), Determinacy::OverConstrained);
/// assert_eq!(check_determinacy(4, 4), Determinacy::UnderConstrained);
/// ```
#[must_use]
pub fn check_determinacy(node_count: usize, member_count: usize) -> Determinacy {
    let equations = 2 * node_count;
    let unknowns = member_count + REACTION_COUNT;
    match equations.cmp(&unknowns) {
        std::cmp::Ordering::Equal => Determinacy::Determinate,
        std::cmp::Ordering::Greater => Determinacy::UnderConstrained,
        std::cmp::Ordering::Less => Determinacy::OverConstrained,
    }
}
