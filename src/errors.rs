//! Error types produced while building or analysing trusses.

use thiserror::Error;

use crate::determinacy::Determinacy;

/// Error returned when the truss geometry is malformed.
///
/// Node and member identifiers are the 0-based indices used throughout the crate.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeometryError {
    /// Returned when fewer than two nodes are supplied.
    #[error("a truss needs at least 2 nodes (received {0})")]
    TooFewNodes(usize),
    /// Returned when no members are supplied.
    #[error("a truss needs at least 1 member (received {0})")]
    TooFewMembers(usize),
    /// Returned when a member references a node that does not exist.
    #[error("member {member} references node {node}, but the truss has {node_count} nodes")]
    UnknownNode {
        /// Index of the offending member.
        member: usize,
        /// Node index that was referenced.
        node: usize,
        /// Number of nodes in the truss.
        node_count: usize,
    },
    /// Returned when both ends of a member are the same node.
    #[error("member {member} connects node {node} to itself")]
    SelfConnectedMember {
        /// Index of the offending member.
        member: usize,
        /// Node used for both endpoints.
        node: usize,
    },
    /// Returned when a member index does not exist.
    #[error("member {0} does not exist in this truss")]
    UnknownMember(usize),
    /// Returned when a node is asked about a member it is not part of.
    #[error("node {node} is not an endpoint of member {member}")]
    NodeNotOnMember {
        /// Index of the member.
        member: usize,
        /// Index of the node.
        node: usize,
    },
    /// Returned when a node coordinate is NaN or infinite.
    #[error("node {node} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Index of the offending node.
        node: usize,
    },
}

/// Error returned when supports or loads do not fit the geometry.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BoundaryError {
    /// Returned when a support references a node that does not exist.
    #[error("{kind} support references node {node}, but the truss has {node_count} nodes")]
    UnknownSupportNode {
        /// Either `"fixed"` or `"roller"`.
        kind: &'static str,
        /// Node index that was referenced.
        node: usize,
        /// Number of nodes in the truss.
        node_count: usize,
    },
    /// Returned when the fixed and roller supports share a node.
    #[error("fixed and roller supports must be on different nodes (both on node {0})")]
    SupportsCoincide(usize),
    /// Returned when a load references a node that does not exist.
    #[error("load {load} references node {node}, but the truss has {node_count} nodes")]
    UnknownLoadNode {
        /// Position of the load in the load list.
        load: usize,
        /// Node index that was referenced.
        node: usize,
        /// Number of nodes in the truss.
        node_count: usize,
    },
    /// Returned when a load component is NaN or infinite.
    #[error("load {load} has a non-finite component")]
    NonFiniteLoad {
        /// Position of the load in the load list.
        load: usize,
    },
}

/// Error returned when a truss analysis fails.
///
/// Every variant is terminal for the current input; no partial results are produced.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// Returned when the geometry is malformed.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(#[from] GeometryError),
    /// Returned when supports or loads are inconsistent with the geometry.
    #[error("invalid boundary conditions: {0}")]
    InvalidBoundary(#[from] BoundaryError),
    /// Returned when a member spans zero distance.
    #[error("member {member} has zero length; its direction is undefined")]
    DegenerateMember {
        /// Index of the offending member.
        member: usize,
    },
    /// Returned when the count check `2 * nodes == members + 3` fails.
    #[error("truss is {class}: {equations} equilibrium equations for {unknowns} unknowns")]
    StructuralDeterminacy {
        /// Whether the truss has too many or too few members.
        class: Determinacy,
        /// Number of equilibrium equations (`2 * nodes`).
        equations: usize,
        /// Number of unknown forces (`members + 3`).
        unknowns: usize,
    },
    /// Returned when the equilibrium matrix cannot be inverted.
    #[error("equilibrium system is singular (pivot ratio {pivot_ratio:e}); check for collinear or redundant members")]
    SingularSystem {
        /// Smallest LU pivot divided by the largest, in absolute value.
        pivot_ratio: f64,
    },
    /// Returned when the system handed to the solver is not square.
    #[error("equilibrium system is {rows}x{cols} with a right-hand side of length {rhs}")]
    DimensionMismatch {
        /// Number of matrix rows.
        rows: usize,
        /// Number of matrix columns.
        cols: usize,
        /// Length of the right-hand side.
        rhs: usize,
    },
}

/// Error returned when reading the plain-text truss format.
#[derive(Debug, Error)]
pub enum InputError {
    /// Returned when the input ends before a required line.
    #[error("line {line}: unexpected end of input, expected {expected}")]
    UnexpectedEof {
        /// 1-based line number where the line was expected.
        line: usize,
        /// Description of the missing content.
        expected: &'static str,
    },
    /// Returned when a token cannot be parsed as a number.
    #[error("line {line}: cannot read {token:?} as {expected}")]
    InvalidNumber {
        /// 1-based line number.
        line: usize,
        /// Token that failed to parse.
        token: String,
        /// Description of the expected value.
        expected: &'static str,
    },
    /// Returned when a line holds the wrong number of fields.
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        /// 1-based line number.
        line: usize,
        /// Number of fields required.
        expected: usize,
        /// Number of fields present.
        found: usize,
    },
    /// Returned when a node index is smaller than the configured index base.
    #[error("line {line}: node index {index} is below the index base {base}")]
    IndexBelowBase {
        /// 1-based line number.
        line: usize,
        /// Index as written in the file.
        index: usize,
        /// Smallest valid index.
        base: usize,
    },
    /// Returned when the parsed geometry is malformed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    /// Returned when the parsed supports or loads are inconsistent.
    #[error(transparent)]
    Boundary(#[from] BoundaryError),
    /// Returned when the file cannot be read.
    #[error("cannot read truss file: {0}")]
    Io(#[from] std::io::Error),
}

/// Error returned when configuring the force colour mapping.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum PaletteError {
    /// Returned when a palette with no colours is requested.
    #[error("palette must contain at least one colour")]
    EmptyPalette,
    /// Returned when the force range is empty, inverted or not finite.
    #[error("force range must satisfy max_compression < max_tension (received [{max_compression}, {max_tension}])")]
    InvalidRange {
        /// Requested lower bound.
        max_compression: f64,
        /// Requested upper bound.
        max_tension: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_errors_convert_into_analysis_errors() {
        let error: AnalysisError = GeometryError::TooFewNodes(1).into();
        assert_eq!(
            error,
            AnalysisError::InvalidGeometry(GeometryError::TooFewNodes(1))
        );
        assert!(error.to_string().contains("at least 2 nodes"));
    }

    #[test]
    fn determinacy_error_names_the_class() {
        let error = AnalysisError::StructuralDeterminacy {
            class: Determinacy::OverConstrained,
            equations: 6,
            unknowns: 7,
        };
        assert_eq!(
            error.to_string(),
            "truss is over-constrained: 6 equilibrium equations for 7 unknowns"
        );
    }
}
