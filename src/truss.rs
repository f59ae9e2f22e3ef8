//! Immutable geometry of a pin-jointed planar truss.

use nalgebra::Vector2;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};

use crate::errors::{AnalysisError, GeometryError};
use crate::geometry::Point;

/// Axis-aligned rectangle enclosing every node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Lower-left corner.
    pub min: Point,
    /// Upper-right corner.
    pub max: Point,
}

impl BoundingBox {
    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Nodes and members of a truss.
///
/// Nodes and members are addressed by 0-based indices that stay valid for the
/// lifetime of the value. Each member keeps its endpoints in the order they were
/// supplied, which fixes the orientation used for direction vectors.
#[derive(Clone, Debug)]
pub struct TrussGeometry {
    /// Joints as graph nodes, members as undirected edges.
    graph: UnGraph<Point, ()>,
}

impl TrussGeometry {
    /// Build a truss from node coordinates and member connectivity.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] when fewer than two nodes or no members are
    /// supplied, when a member references a missing node or joins a node to
    /// itself, or when a coordinate is not finite.
    ///
    /// # Examples
    /// ```
    /// use trussx_joints::{point, TrussGeometry};
    ///
    /// let truss = TrussGeometry::new(
    ///     vec![point(0.0, 0.0), point(4.0, 0.0), point(2.0, 2.0)],
    ///     vec![(0, 1), (1, 2), (0, 2)],
    /// )
    /// .expect("valid triangle");
    /// assert_eq!(truss.node_count(), 3);
    /// assert_eq!(truss.member_endpoints(1), Some((1, 2)));
    /// ```
    pub fn new(nodes: Vec<Point>, members: Vec<(usize, usize)>) -> Result<Self, GeometryError> {
        if nodes.len() < 2 {
            return Err(GeometryError::TooFewNodes(nodes.len()));
        }
        if members.is_empty() {
            return Err(GeometryError::TooFewMembers(0));
        }
        let node_count = nodes.len();
        let mut graph = UnGraph::with_capacity(node_count, members.len());
        for (node, position) in nodes.into_iter().enumerate() {
            if !position.is_finite() {
                return Err(GeometryError::NonFiniteCoordinate { node });
            }
            graph.add_node(position);
        }
        for (member, (start, end)) in members.into_iter().enumerate() {
            for node in [start, end] {
                if node >= node_count {
                    return Err(GeometryError::UnknownNode {
                        member,
                        node,
                        node_count,
                    });
                }
            }
            if start == end {
                return Err(GeometryError::SelfConnectedMember {
                    member,
                    node: start,
                });
            }
            graph.add_edge(NodeIndex::new(start), NodeIndex::new(end), ());
        }
        Ok(Self { graph })
    }

    /// Return the number of nodes in the truss.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of members in the truss.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Position of a node, or `None` when the index is out of range.
    #[must_use]
    pub fn node_coord(&self, node: usize) -> Option<Point> {
        self.graph.node_weight(NodeIndex::new(node)).copied()
    }

    /// Endpoints of a member in their canonical order.
    #[must_use]
    pub fn member_endpoints(&self, member: usize) -> Option<(usize, usize)> {
        self.graph
            .edge_endpoints(EdgeIndex::new(member))
            .map(|(start, end)| (start.index(), end.index()))
    }

    /// Iterate over node positions in index order.
    pub fn nodes(&self) -> impl Iterator<Item = Point> + '_ {
        self.graph.node_weights().copied()
    }

    /// Iterate over member endpoints in index order.
    pub fn members(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.graph
            .edge_indices()
            .filter_map(|edge| self.graph.edge_endpoints(edge))
            .map(|(start, end)| (start.index(), end.index()))
    }

    /// Distance between the endpoints of a member.
    #[must_use]
    pub fn member_length(&self, member: usize) -> Option<f64> {
        let (start, end) = self.member_endpoints(member)?;
        let delta = self.node_coord(end)?.to_vector() - self.node_coord(start)?.to_vector();
        Some(delta.norm())
    }

    /// Unit vector pointing from `from_node` toward the opposite end of `member`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::DegenerateMember`] when the endpoints coincide and
    /// [`AnalysisError::InvalidGeometry`] when `member` does not exist or
    /// `from_node` is not one of its endpoints.
    pub fn member_direction(
        &self,
        member: usize,
        from_node: usize,
    ) -> Result<Vector2<f64>, AnalysisError> {
        let (start, end) = self
            .member_endpoints(member)
            .ok_or(GeometryError::UnknownMember(member))?;
        let (near, far) = if from_node == start {
            (start, end)
        } else if from_node == end {
            (end, start)
        } else {
            return Err(GeometryError::NodeNotOnMember {
                member,
                node: from_node,
            }
            .into());
        };
        let delta = self.graph[NodeIndex::new(far)].to_vector()
            - self.graph[NodeIndex::new(near)].to_vector();
        let length = delta.norm();
        if length == 0.0 {
            return Err(AnalysisError::DegenerateMember { member });
        }
        Ok(delta / length)
    }

    /// Smallest rectangle containing every node.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        let mut min = Point::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for position in self.nodes() {
            min.x = min.x.min(position.x);
            min.y = min.y.min(position.y);
            max.x = max.x.max(position.x);
            max.y = max.y.max(position.y);
        }
        BoundingBox { min, max }
    }
}
