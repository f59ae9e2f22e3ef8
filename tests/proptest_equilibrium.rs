//! Property-based checks of the equilibrium solve.
//!
//! Run with: cargo test --test proptest_equilibrium

use nalgebra::Vector2;
use proptest::prelude::*;
use trussx_joints::{
    analyze, build_adjacency, check_determinacy, force, point, AnalysisConfig, BoundaryConditions,
    Determinacy, Load, Supports, TrussGeometry,
};

// =============================================================================
// Strategies
// =============================================================================

/// A Pratt truss with `panels` bays, pinned at the left and on a roller at the right.
fn pratt(panels: usize) -> TrussGeometry {
    let mut nodes = Vec::new();
    for bay in 0..=panels {
        nodes.push(point(bay as f64, 0.0));
    }
    for bay in 0..=panels {
        nodes.push(point(bay as f64, 1.0));
    }
    let top = |bay: usize| panels + 1 + bay;
    let mut members = Vec::new();
    for bay in 0..panels {
        members.push((bay, bay + 1));
        members.push((top(bay), top(bay + 1)));
        if bay < panels / 2 {
            members.push((bay, top(bay + 1)));
        } else {
            members.push((bay + 1, top(bay)));
        }
    }
    for bay in 0..=panels {
        members.push((bay, top(bay)));
    }
    TrussGeometry::new(nodes, members).expect("pratt truss is valid")
}

/// Up to eight loads on arbitrary nodes of a truss with `node_count` nodes.
fn arb_loads(node_count: usize) -> impl Strategy<Value = Vec<Load>> {
    prop::collection::vec(
        (0..node_count, -100.0..100.0f64, -100.0..100.0f64)
            .prop_map(|(node, fx, fy)| Load::new(node, force(fx, fy))),
        0..8,
    )
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn determinate_iff_counts_match(nodes in 0usize..200, members in 0usize..400) {
        let class = check_determinacy(nodes, members);
        prop_assert_eq!(class == Determinacy::Determinate, 2 * nodes == members + 3);
        if 2 * nodes > members + 3 {
            prop_assert_eq!(class, Determinacy::UnderConstrained);
        }
        if 2 * nodes < members + 3 {
            prop_assert_eq!(class, Determinacy::OverConstrained);
        }
    }

    #[test]
    fn reactions_balance_any_load_set(panels in 2usize..7, seed_loads in arb_loads(16)) {
        let geometry = pratt(panels);
        let node_count = geometry.node_count();
        let loads: Vec<Load> = seed_loads
            .into_iter()
            .map(|load| Load::new(load.node % node_count, load.force))
            .collect();
        let conditions = BoundaryConditions::new(Supports::new(0, panels), loads);

        let solution = analyze(&geometry, &conditions, &AnalysisConfig::default())
            .expect("pratt truss is stable");
        let imbalance = solution.global_imbalance(&conditions);
        prop_assert!(imbalance.x.abs() < 1.0e-8, "x imbalance {}", imbalance.x);
        prop_assert!(imbalance.y.abs() < 1.0e-8, "y imbalance {}", imbalance.y);
    }

    #[test]
    fn every_joint_balances(panels in 2usize..7, seed_loads in arb_loads(16)) {
        let geometry = pratt(panels);
        let node_count = geometry.node_count();
        let loads: Vec<Load> = seed_loads
            .into_iter()
            .map(|load| Load::new(load.node % node_count, load.force))
            .collect();
        let conditions = BoundaryConditions::new(Supports::new(0, panels), loads);
        let solution = analyze(&geometry, &conditions, &AnalysisConfig::default())
            .expect("pratt truss is stable");
        let adjacency = build_adjacency(&geometry);

        for node in 0..node_count {
            let mut sum: Vector2<f64> = conditions.net_load(node).to_vector();
            for &member in adjacency.members_at(node) {
                let direction = geometry
                    .member_direction(member, node)
                    .expect("non-degenerate member");
                sum += direction * solution.members[member].force;
            }
            if node == conditions.supports.fixed {
                sum += Vector2::new(solution.reactions.fixed_x, solution.reactions.fixed_y);
            }
            if node == conditions.supports.roller {
                sum.y += solution.reactions.roller_y;
            }
            prop_assert!(sum.norm() < 1.0e-8, "joint {} out of balance by {}", node, sum.norm());
        }
    }
}

#[test]
fn pratt_truss_is_determinate() {
    for panels in 2..7 {
        let geometry = pratt(panels);
        assert_eq!(
            check_determinacy(geometry.node_count(), geometry.member_count()),
            Determinacy::Determinate,
            "{panels} panels"
        );
    }
}
