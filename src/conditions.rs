//! Supports and external loads applied to a truss.

use serde::{Deserialize, Serialize};

use crate::errors::BoundaryError;
use crate::geometry::Force;
use crate::truss::TrussGeometry;

/// The pin and roller that hold the truss.
///
/// The fixed support reacts in x and y. The roller reacts vertically only; a
/// horizontal or inclined roller is not modelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supports {
    /// Node carrying the pinned support.
    pub fixed: usize,
    /// Node carrying the vertical roller.
    pub roller: usize,
}

impl Supports {
    /// Create a support pair.
    #[must_use]
    pub const fn new(fixed: usize, roller: usize) -> Self {
        Self { fixed, roller }
    }
}

/// A point load acting on a joint.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Load {
    /// Loaded node.
    pub node: usize,
    /// Applied force.
    pub force: Force,
}

impl Load {
    /// Create a load at `node`.
    #[must_use]
    pub const fn new(node: usize, force: Force) -> Self {
        Self { node, force }
    }
}

/// Supports plus every external load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundaryConditions {
    /// Pin and roller locations.
    pub supports: Supports,
    /// Loads in the order they were supplied. Several may share a node.
    pub loads: Vec<Load>,
}

impl BoundaryConditions {
    /// Bundle supports with a load list.
    #[must_use]
    pub fn new(supports: Supports, loads: Vec<Load>) -> Self {
        Self { supports, loads }
    }

    /// Check that every referenced node exists and the supports are distinct.
    ///
    /// # Errors
    ///
    /// Returns the first [`BoundaryError`] found.
    pub fn validate(&self, geometry: &TrussGeometry) -> Result<(), BoundaryError> {
        let node_count = geometry.node_count();
        for (kind, node) in [("fixed", self.supports.fixed), ("roller", self.supports.roller)] {
            if node >= node_count {
                return Err(BoundaryError::UnknownSupportNode {
                    kind,
                    node,
                    node_count,
                });
            }
        }
        if self.supports.fixed == self.supports.roller {
            return Err(BoundaryError::SupportsCoincide(self.supports.fixed));
        }
        for (load, entry) in self.loads.iter().enumerate() {
            if entry.node >= node_count {
                return Err(BoundaryError::UnknownLoadNode {
                    load,
                    node: entry.node,
                    node_count,
                });
            }
            if !entry.force.is_finite() {
                return Err(BoundaryError::NonFiniteLoad { load });
            }
        }
        Ok(())
    }

    /// Resultant of every load applied at `node`.
    #[must_use]
    pub fn net_load(&self, node: usize) -> Force {
        self.loads
            .iter()
            .filter(|load| load.node == node)
            .map(|load| load.force)
            .sum()
    }

    /// Resultant of every load on the truss.
    #[must_use]
    pub fn total_load(&self) -> Force {
        self.loads.iter().map(|load| load.force).sum()
    }

    /// Nodes that carry at least one load, in ascending order without repeats.
    #[must_use]
    pub fn loaded_nodes(&self) -> Vec<usize> {
        let mut nodes: Vec<usize> = self.loads.iter().map(|load| load.node).collect();
        nodes.sort_unstable();
        nodes.dedup();
        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{force, point};

    fn square() -> TrussGeometry {
        TrussGeometry::new(
            vec![
                point(0.0, 0.0),
                point(1.0, 0.0),
                point(1.0, 1.0),
                point(0.0, 1.0),
            ],
            vec![(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)],
        )
        .expect("valid square")
    }

    #[test]
    fn loads_on_the_same_node_are_summed() {
        let conditions = BoundaryConditions::new(
            Supports::new(0, 1),
            vec![
                Load::new(2, force(1.0, -2.0)),
                Load::new(3, force(0.0, -1.0)),
                Load::new(2, force(0.5, -3.0)),
            ],
        );
        assert_eq!(conditions.net_load(2), force(1.5, -5.0));
        assert_eq!(conditions.net_load(0), force(0.0, 0.0));
        assert_eq!(conditions.total_load(), force(1.5, -6.0));
        assert_eq!(conditions.loaded_nodes(), vec![2, 3]);
    }

    #[test]
    fn supports_must_differ() {
        let conditions = BoundaryConditions::new(Supports::new(1, 1), vec![]);
        let error = conditions
            .validate(&square())
            .expect_err("coincident supports rejected");
        assert_eq!(error, BoundaryError::SupportsCoincide(1));
    }

    #[test]
    fn out_of_range_nodes_are_rejected() {
        let geometry = square();

        let error = BoundaryConditions::new(Supports::new(0, 9), vec![])
            .validate(&geometry)
            .expect_err("unknown roller rejected");
        assert_eq!(
            error,
            BoundaryError::UnknownSupportNode {
                kind: "roller",
                node: 9,
                node_count: 4
            }
        );

        let error = BoundaryConditions::new(
            Supports::new(0, 1),
            vec![Load::new(3, force(0.0, -1.0)), Load::new(4, force(0.0, -1.0))],
        )
        .validate(&geometry)
        .expect_err("unknown load node rejected");
        assert_eq!(
            error,
            BoundaryError::UnknownLoadNode {
                load: 1,
                node: 4,
                node_count: 4
            }
        );
    }

    #[test]
    fn non_finite_loads_are_rejected() {
        let error = BoundaryConditions::new(
            Supports::new(0, 1),
            vec![Load::new(2, force(f64::NAN, 0.0))],
        )
        .validate(&square())
        .expect_err("NaN load rejected");
        assert_eq!(error, BoundaryError::NonFiniteLoad { load: 0 });
    }
}
