//! Per-joint lists of incident members.

use crate::truss::TrussGeometry;

/// Members meeting at each joint, keyed by node index.
///
/// Built once from a [`TrussGeometry`]; the order within a joint follows member
/// index order, so results are reproducible between runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JointAdjacency {
    /// `joints[node]` lists the members touching `node`.
    joints: Vec<Vec<usize>>,
}

impl JointAdjacency {
    /// Members incident to `node`; empty when the node is out of range or unconnected.
    #[must_use]
    pub fn members_at(&self, node: usize) -> &[usize] {
        self.joints.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of members meeting at `node`.
    #[must_use]
    pub fn valence(&self, node: usize) -> usize {
        self.members_at(node).len()
    }

    /// Number of joints covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    /// Return `true` when there are no joints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Iterate over `(node, members)` pairs in node order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> + '_ {
        self.joints
            .iter()
            .enumerate()
            .map(|(node, members)| (node, members.as_slice()))
    }
}

/// Collect, for every node, the members that touch it.
///
/// Members are scanned in increasing index order and appended to the list of
/// their first endpoint, then their second. There is no cap on how many members
/// may meet at a joint.
///
/// # Examples
/// ```
/// use trussx_joints::{build_adjacency, point, TrussGeometry};
///
/// let truss = TrussGeometry::new(
///     vec![point(0.0, 0.0), point(4.0, 0.0), point(2.0, 2.0)],
///     vec![(0, 1), (1, 2), (0, 2)],
/// )
/// .expect("valid triangle");
/// let adjacency = build_adjacency(&truss);
/// assert_eq!(adjacency.members_at(0), &[0, 2]);
/// assert_eq!(adjacency.members_at(2), &[1, 2]);
/// ```
#[must_use]
pub fn build_adjacency(geometry: &TrussGeometry) -> JointAdjacency {
    let mut joints = vec![Vec::new(); geometry.node_count()];
    for (member, (start, end)) in geometry.members().enumerate() {
        joints[start].push(member);
        joints[end].push(member);
    }
    JointAdjacency { joints }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point;

    #[test]
    fn bridge_adjacency_follows_member_order() {
        let truss = TrussGeometry::new(
            vec![
                point(0.0, 0.0),
                point(0.0, 1.0),
                point(1.0, 2.0),
                point(2.0, 2.0),
                point(3.0, 1.0),
                point(3.0, 0.0),
            ],
            vec![
                (0, 1),
                (0, 2),
                (1, 2),
                (1, 3),
                (2, 3),
                (2, 4),
                (3, 4),
                (3, 5),
                (4, 5),
            ],
        )
        .expect("valid bridge");
        let adjacency = build_adjacency(&truss);

        assert_eq!(adjacency.len(), 6);
        assert_eq!(adjacency.members_at(0), &[0, 1]);
        assert_eq!(adjacency.members_at(1), &[0, 2, 3]);
        assert_eq!(adjacency.members_at(2), &[1, 2, 4, 5]);
        assert_eq!(adjacency.members_at(3), &[3, 4, 6, 7]);
        assert_eq!(adjacency.members_at(4), &[5, 6, 8]);
        assert_eq!(adjacency.members_at(5), &[7, 8]);
        assert!(adjacency.members_at(6).is_empty());
    }

    #[test]
    fn hub_joint_keeps_every_member() {
        let mut nodes = vec![point(0.0, 0.0)];
        let mut members = Vec::new();
        for spoke in 0..10_u32 {
            let angle = f64::from(spoke) * std::f64::consts::TAU / 10.0;
            nodes.push(point(angle.cos(), angle.sin()));
            members.push((0, nodes.len() - 1));
        }
        let truss = TrussGeometry::new(nodes, members).expect("valid hub");
        let adjacency = build_adjacency(&truss);

        assert_eq!(adjacency.valence(0), 10);
        assert_eq!(adjacency.members_at(0), &(0..10).collect::<Vec<_>>()[..]);
        assert!(adjacency.iter().skip(1).all(|(_, members)| members.len() == 1));
    }
}
