//! Property-based tests for the octree
//!
//! These use proptest to check containment, partitioning and mass
//! conservation over many random boxes and body sets.

use gravsim::{Body, Boundary, NVec3, Octree};
use proptest::prelude::*;

fn arb_vec3(lo: f64, hi: f64) -> impl Strategy<Value = NVec3> {
    (lo..hi, lo..hi, lo..hi).prop_map(|(x, y, z)| NVec3::new(x, y, z))
}

fn arb_boundary() -> impl Strategy<Value = Boundary> {
    (arb_vec3(-100.0, 100.0), arb_vec3(0.0, 50.0)).prop_map(|(origin, extents)| Boundary::new(origin, extents))
}

/// Point inside `b`, parameterized by fractions of its extents
fn point_in(b: &Boundary, frac: &NVec3) -> NVec3 {
    b.origin + b.extents.component_mul(frac)
}

proptest! {
    /// Property: contains(p) iff every coordinate is within the closed interval
    #[test]
    fn contains_matches_closed_intervals(b in arb_boundary(), p in arb_vec3(-160.0, 160.0)) {
        let max = b.origin + b.extents;
        let inside = (0..3).all(|axis| b.origin[axis] <= p[axis] && p[axis] <= max[axis]);
        prop_assert_eq!(b.contains(&p), inside);
    }

    /// Property: the routed octant (closed, up to rounding) holds the point
    #[test]
    fn octant_of_point_covers_it(b in arb_boundary(), frac in arb_vec3(0.0, 1.0)) {
        let p = point_in(&b, &frac);
        let child = b.octant(b.octant_index(&p));
        let eps = 1e-9 * (1.0 + b.origin.abs().max() + b.extents.max());

        let lo = child.origin;
        let hi = child.origin + child.extents;
        for axis in 0..3 {
            prop_assert!(lo[axis] - eps <= p[axis] && p[axis] <= hi[axis] + eps);
        }
    }

    /// Property: octants have half extents and sit at the low or high half of each axis
    #[test]
    fn octants_halve_the_parent(b in arb_boundary(), k in 0usize..8) {
        let child = b.octant(k);
        prop_assert_eq!(child.extents, b.extents * 0.5);

        for axis in 0..3 {
            let high = (k >> axis) & 1 == 1;
            let expected = if high { b.origin[axis] + b.extents[axis] * 0.5 } else { b.origin[axis] };
            prop_assert_eq!(child.origin[axis], expected);
        }
    }

    /// Property: every accepted body is listed once and the root mass is their sum
    #[test]
    fn build_keeps_every_accepted_body(
        raw in prop::collection::vec((arb_vec3(-20.0, 120.0), 0.1f64..10.0), 0..200),
        capacity in 1usize..6,
    ) {
        let boundary = Boundary::new(NVec3::zeros(), NVec3::repeat(100.0));
        let bodies: Vec<Body> = raw.into_iter().map(|(x, m)| Body::at_rest(x, m)).collect();

        let (tree, rejected) = Octree::build(boundary, capacity, &bodies);

        let mut listed = tree.collect_bodies();
        listed.extend_from_slice(&rejected);
        listed.sort_unstable();
        prop_assert_eq!(listed, (0..bodies.len()).collect::<Vec<_>>());

        for &i in &rejected {
            prop_assert!(!boundary.contains(&bodies[i].x));
        }

        let accepted: f64 = tree.collect_bodies().iter().map(|&i| bodies[i].m).sum();
        let total = tree.root_node().total_mass;
        prop_assert!((total - accepted).abs() <= 1e-9 * accepted.max(1.0));
    }

    /// Property: leaves never hold more than their capacity below the depth cap
    #[test]
    fn leaves_respect_capacity(
        raw in prop::collection::vec(arb_vec3(0.0, 100.0), 0..300),
        capacity in 1usize..6,
    ) {
        let boundary = Boundary::new(NVec3::zeros(), NVec3::repeat(100.0));
        let bodies: Vec<Body> = raw.into_iter().map(|x| Body::at_rest(x, 1.0)).collect();
        let (tree, _) = Octree::build(boundary, capacity, &bodies);

        for node in &tree.nodes {
            prop_assert!(node.bucket.len() <= capacity);
            if node.is_subdivided() {
                prop_assert_eq!(node.bucket.len(), capacity);
            }
        }
    }
}
