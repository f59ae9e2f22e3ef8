//! Reader for the plain-text truss description.
//!
//! The format is line oriented:
//!
//! ```text
//! <title, ignored>
//! <node count>
//! <x> <y>                      one line per node
//! <member count>
//! <node a> <node b>            one line per member
//! <fixed support node>
//! <ignored>
//! <roller support node>
//! <ignored>
//! <load count>
//! <node> <fx> <fy>             one line per load
//! ```
//!
//! Node indices are 0-based unless [`IndexBase::One`] is selected. Anything
//! after the last load line is ignored.

use std::path::Path;
use std::str::FromStr;

use crate::conditions::{BoundaryConditions, Load, Supports};
use crate::config::IndexBase;
use crate::errors::InputError;
use crate::geometry::{Force, Point};
use crate::truss::TrussGeometry;

/// Geometry and boundary conditions read from one file.
#[derive(Clone, Debug)]
pub struct TrussInput {
    /// Text of the first line.
    pub title: String,
    /// Nodes and members.
    pub geometry: TrussGeometry,
    /// Supports and loads, validated against `geometry`.
    pub conditions: BoundaryConditions,
}

/// Line cursor that remembers 1-based line numbers for error messages.
struct Lines<'a> {
    /// Remaining lines paired with their index.
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
    /// Line number of the most recent line, or of the next one at end of input.
    line: usize,
}

impl<'a> Lines<'a> {
    /// Start reading `text` from its first line.
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines().enumerate(),
            line: 0,
        }
    }

    /// Next line, or [`InputError::UnexpectedEof`] naming what was expected.
    fn next_line(&mut self, expected: &'static str) -> Result<&'a str, InputError> {
        match self.inner.next() {
            Some((index, text)) => {
                self.line = index + 1;
                Ok(text)
            }
            None => {
                self.line += 1;
                Err(InputError::UnexpectedEof {
                    line: self.line,
                    expected,
                })
            }
        }
    }

    /// Next line split into exactly `N` whitespace-separated fields.
    fn fields<const N: usize>(
        &mut self,
        expected: &'static str,
    ) -> Result<[&'a str; N], InputError> {
        let text = self.next_line(expected)?;
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let found = tokens.len();
        tokens.try_into().map_err(|_| InputError::FieldCount {
            line: self.line,
            expected: N,
            found,
        })
    }

    /// Parse `token` from the current line.
    fn parse<T: FromStr>(&self, token: &str, expected: &'static str) -> Result<T, InputError> {
        token.parse().map_err(|_| InputError::InvalidNumber {
            line: self.line,
            token: token.to_owned(),
            expected,
        })
    }

    /// Next line holding a single count.
    fn count(&mut self, expected: &'static str) -> Result<usize, InputError> {
        let [token] = self.fields::<1>(expected)?;
        self.parse(token, expected)
    }

    /// Convert a node index as written into a 0-based index.
    fn node(&self, token: &str, base: IndexBase) -> Result<usize, InputError> {
        let index: usize = self.parse(token, "a node index")?;
        index
            .checked_sub(base.offset())
            .ok_or(InputError::IndexBelowBase {
                line: self.line,
                index,
                base: base.offset(),
            })
    }
}

/// Parse a truss description.
///
/// # Errors
///
/// Returns an [`InputError`] carrying the offending line number for syntax
/// problems, or the wrapped geometry/boundary error when the description is
/// well formed but inconsistent.
///
/// # Examples
/// ```
/// use trussx_joints::{parse_truss, IndexBase};
///
/// let text = "triangle\n3\n0 0\n4 0\n2 2\n3\n0 1\n1 2\n0 2\n0\n\n1\n\n1\n2 0 -10\n";
/// let input = parse_truss(text, IndexBase::Zero).expect("valid description");
/// assert_eq!(input.geometry.member_count(), 3);
/// assert_eq!(input.conditions.loads.len(), 1);
/// ```
pub fn parse_truss(text: &str, base: IndexBase) -> Result<TrussInput, InputError> {
    let mut lines = Lines::new(text);
    let title = lines.next_line("a title line")?.trim().to_owned();

    let node_count = lines.count("the node count")?;
    let mut nodes = Vec::new();
    for _ in 0..node_count {
        let [x, y] = lines.fields::<2>("node coordinates")?;
        nodes.push(Point::new(
            lines.parse(x, "an x coordinate")?,
            lines.parse(y, "a y coordinate")?,
        ));
    }

    let member_count = lines.count("the member count")?;
    let mut members = Vec::new();
    for _ in 0..member_count {
        let [start, end] = lines.fields::<2>("member endpoints")?;
        members.push((lines.node(start, base)?, lines.node(end, base)?));
    }

    let [fixed] = lines.fields::<1>("the fixed support node")?;
    let fixed = lines.node(fixed, base)?;
    lines.next_line("the line after the fixed support")?;
    let [roller] = lines.fields::<1>("the roller support node")?;
    let roller = lines.node(roller, base)?;
    lines.next_line("the line after the roller support")?;

    let load_count = lines.count("the load count")?;
    let mut loads = Vec::new();
    for _ in 0..load_count {
        let [node, fx, fy] = lines.fields::<3>("a load")?;
        loads.push(Load::new(
            lines.node(node, base)?,
            Force::new(
                lines.parse(fx, "a force component")?,
                lines.parse(fy, "a force component")?,
            ),
        ));
    }

    let geometry = TrussGeometry::new(nodes, members)?;
    let conditions = BoundaryConditions::new(Supports::new(fixed, roller), loads);
    conditions.validate(&geometry)?;
    Ok(TrussInput {
        title,
        geometry,
        conditions,
    })
}

/// Read and parse a truss description from disk.
///
/// # Errors
///
/// Returns [`InputError::Io`] when the file cannot be read, otherwise the same
/// errors as [`parse_truss`].
pub fn read_truss_file(
    path: impl AsRef<Path>,
    base: IndexBase,
) -> Result<TrussInput, InputError> {
    let text = std::fs::read_to_string(path)?;
    parse_truss(&text, base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{BoundaryError, GeometryError};
    use crate::geometry::force;

    const TRIANGLE: &str = "\
roof triangle
3
0 0
4 0
2 2
3
0 1
1 2
0 2
0

1

2
2 0 -10
2 1.5 -2.5
";

    #[test]
    fn reads_triangle() {
        let input = parse_truss(TRIANGLE, IndexBase::Zero).expect("valid description");
        assert_eq!(input.title, "roof triangle");
        assert_eq!(input.geometry.node_count(), 3);
        assert_eq!(input.geometry.node_coord(2), Some(Point::new(2.0, 2.0)));
        assert_eq!(input.geometry.member_endpoints(2), Some((0, 2)));
        assert_eq!(input.conditions.supports, Supports::new(0, 1));
        assert_eq!(input.conditions.net_load(2), force(1.5, -12.5));
    }

    #[test]
    fn one_based_indices_are_shifted() {
        let text = TRIANGLE
            .replace("0 1\n1 2\n0 2\n0\n\n1\n", "1 2\n2 3\n1 3\n1\n\n2\n")
            .replace("2 0 -10\n2 1.5", "3 0 -10\n3 1.5");
        let input = parse_truss(&text, IndexBase::One).expect("valid description");
        assert_eq!(
            input.geometry.members().collect::<Vec<_>>(),
            vec![(0, 1), (1, 2), (0, 2)]
        );
        assert_eq!(input.conditions.supports, Supports::new(0, 1));
        assert_eq!(input.conditions.loaded_nodes(), vec![2]);
    }

    #[test]
    fn zero_index_under_one_based_convention_is_rejected() {
        let error = parse_truss(TRIANGLE, IndexBase::One).expect_err("index 0 rejected");
        assert!(matches!(
            error,
            InputError::IndexBelowBase {
                line: 7,
                index: 0,
                base: 1
            }
        ));
    }

    #[test]
    fn truncated_input_reports_the_missing_line() {
        let truncated: String = TRIANGLE.lines().take(14).collect::<Vec<_>>().join("\n");
        let error = parse_truss(&truncated, IndexBase::Zero).expect_err("missing load rejected");
        assert!(matches!(
            error,
            InputError::UnexpectedEof {
                line: 15,
                expected: "a load"
            }
        ));
    }

    #[test]
    fn malformed_numbers_and_field_counts_are_reported() {
        let bad_number = TRIANGLE.replace("4 0\n", "4 zero\n");
        let error = parse_truss(&bad_number, IndexBase::Zero).expect_err("bad number rejected");
        assert!(matches!(
            error,
            InputError::InvalidNumber { line: 4, ref token, .. } if token == "zero"
        ));

        let short_line = TRIANGLE.replace("2 2\n", "2\n");
        let error = parse_truss(&short_line, IndexBase::Zero).expect_err("short line rejected");
        assert!(matches!(
            error,
            InputError::FieldCount {
                line: 5,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn inconsistent_descriptions_surface_model_errors() {
        let bad_member = TRIANGLE.replace("1 2\n0 2\n", "1 5\n0 2\n");
        let error = parse_truss(&bad_member, IndexBase::Zero).expect_err("unknown node rejected");
        assert!(matches!(
            error,
            InputError::Geometry(GeometryError::UnknownNode { member: 1, node: 5, .. })
        ));

        let same_supports = TRIANGLE.replace("0\n\n1\n\n", "1\n\n1\n\n");
        let error =
            parse_truss(&same_supports, IndexBase::Zero).expect_err("coincident supports rejected");
        assert!(matches!(
            error,
            InputError::Boundary(BoundaryError::SupportsCoincide(1))
        ));
    }

    #[test]
    fn oversized_counts_run_out_of_lines() {
        let error = parse_truss("t\n18446744073709551615\n0 0\n", IndexBase::Zero)
            .expect_err("huge node count rejected");
        assert!(matches!(
            error,
            InputError::UnexpectedEof {
                line: 4,
                expected: "node coordinates",
            }
        ));

        let huge_loads = TRIANGLE.replace("\n2\n2 0 -10", "\n1000000000000\n2 0 -10");
        assert!(matches!(
            parse_truss(&huge_loads, IndexBase::Zero).expect_err("huge load count rejected"),
            InputError::UnexpectedEof { expected: "a load", .. }
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let error = read_truss_file("/nonexistent/truss.txt", IndexBase::Zero)
            .expect_err("missing file rejected");
        assert!(matches!(error, InputError::Io(_)));
    }
}
