//! # Barnes–Hut Octree (3D)
//!
//! Bucketed octree used to approximate gravitational forces between many
//! point masses. Groups of bodies far enough from a query body are replaced
//! by one pseudo-body at their center of mass.
//!
//! - Nodes live in one `Vec` owned by [`Octree`]; children are referenced by
//!   index through a fixed `[usize; 8]` slot array addressed by the 3-bit
//!   octant code of [`Boundary::octant_index`].
//! - Every node holds a bucket of up to `capacity` body indices. A full leaf
//!   subdivides once and routes every later body to one of its children.
//! - Bodies already in a bucket stay there when the node subdivides. An
//!   internal node therefore keeps the `capacity` bodies it held at split
//!   time.
//! - Total mass and center of mass are a snapshot taken by
//!   [`Octree::aggregate_mass`]. Bodies move after that without being
//!   re-inserted and the aggregates are not refreshed unless asked to.
//!
//! ## Node lifecycle
//!
//! ```text
//! Leaf (room) --insert--> Leaf (full) --insert--> Internal (terminal)
//! ```

use crate::configuration::config::LeafForces;
use crate::simulation::boundary::Boundary;
use crate::simulation::forces::{point_mass_force, BarnesHutGravity, MIN_DISTANCE};
use crate::simulation::states::{Body, NVec3};

/// Depth at which nodes stop subdividing. Leaves at this depth take bodies
/// beyond their capacity, so a pile of coincident bodies cannot deepen the
/// tree (and the recursion) without bound.
pub const MAX_DEPTH: usize = 64;

/// A single octree node.
///
/// `children` is `None` for a leaf and `Some` with exactly 8 node indices
/// once the node has subdivided.
#[derive(Debug, Clone)]
pub struct OctreeNode {
    pub boundary: Boundary,
    pub capacity: usize,
    pub bucket: Vec<usize>, // indices into the body list
    pub children: Option<[usize; 8]>, // indices into Octree::nodes
    pub total_mass: f64,
    pub center_of_mass: NVec3,
}

impl OctreeNode {
    fn leaf(boundary: Boundary, capacity: usize) -> Self {
        Self {
            boundary,
            capacity,
            bucket: Vec::new(),
            children: None,
            total_mass: 0.0,
            center_of_mass: NVec3::zeros(),
        }
    }

    pub fn is_subdivided(&self) -> bool {
        self.children.is_some()
    }
}

/// Shape summary of a built tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OctreeStats {
    pub nodes: usize,
    pub leaves: usize,
    pub internal: usize,
    pub max_depth: usize, // root is depth 0
    pub resident: usize, // bodies held in buckets
}

/// A bucketed octree over a fixed root boundary.
#[derive(Debug, Clone)]
pub struct Octree {
    pub nodes: Vec<OctreeNode>,
    pub root: usize,
}

impl Octree {
    /// Empty tree whose root covers `boundary`.
    ///
    /// A capacity of 0 is raised to 1; a zero-sized bucket would subdivide
    /// without end.
    pub fn new(boundary: Boundary, capacity: usize) -> Self {
        Self {
            nodes: vec![OctreeNode::leaf(boundary, capacity.max(1))],
            root: 0,
        }
    }

    /// Build a tree over `bodies` and aggregate its masses.
    ///
    /// Returns the tree and the indices of bodies outside `boundary`, which
    /// are not inserted.
    pub fn build(boundary: Boundary, capacity: usize, bodies: &[Body]) -> (Self, Vec<usize>) {
        let mut tree = Octree::new(boundary, capacity);
        let mut rejected = Vec::new();

        for (i, b) in bodies.iter().enumerate() {
            if !tree.insert(i, &b.x) {
                rejected.push(i);
            }
        }

        tree.aggregate_mass(bodies);
        (tree, rejected)
    }

    pub fn root_node(&self) -> &OctreeNode {
        &self.nodes[self.root]
    }

    /// Insert body `body_idx` located at `pos`.
    ///
    /// Returns `false`, leaving the tree untouched, when the root boundary
    /// does not contain `pos`.
    pub fn insert(&mut self, body_idx: usize, pos: &NVec3) -> bool {
        if !self.nodes[self.root].boundary.contains(pos) {
            return false;
        }
        self.insert_body(self.root, 0, body_idx, pos);
        true
    }

    /// Split a leaf into 8 octant children with the same capacity.
    ///
    /// Returns `false` when the node was already subdivided. Resident bodies
    /// are not moved into the new children.
    pub fn subdivide(&mut self, node_idx: usize) -> bool {
        if self.nodes[node_idx].is_subdivided() {
            return false;
        }

        let boundary = self.nodes[node_idx].boundary;
        let capacity = self.nodes[node_idx].capacity;

        let first = self.nodes.len();
        for k in 0..8 {
            self.nodes.push(OctreeNode::leaf(boundary.octant(k), capacity));
        }
        self.nodes[node_idx].children = Some(std::array::from_fn(|k| first + k));
        true
    }

    /// Recompute total mass and center of mass for every node.
    ///
    /// Returns the root's `(total_mass, sum of m * x)`. Nodes whose subtree
    /// has no mass keep their previous aggregates.
    pub fn aggregate_mass(&mut self, bodies: &[Body]) -> (f64, NVec3) {
        self.aggregate_node(self.root, bodies)
    }

    /// Net force on body `body_idx` from the tree.
    ///
    /// Traversal starts at the root:
    /// - a leaf contributes nothing, or its bucket exactly with
    ///   [`LeafForces::Direct`];
    /// - an internal node with `width / d < theta` contributes its total mass
    ///   at its center of mass, `d` being the floored distance to it;
    /// - otherwise the node is opened and its 8 children are summed, plus its
    ///   own bucket with [`LeafForces::Direct`].
    ///
    /// The query body is never excluded from an approximated node's mass;
    /// it is only skipped in exact bucket sums.
    pub fn compute_force(&self, body_idx: usize, bodies: &[Body], gravity: &BarnesHutGravity) -> NVec3 {
        let mut force = NVec3::zeros();
        self.traverse_node(self.root, body_idx, bodies, gravity, &mut force);
        force
    }

    /// Depth-first list of every resident body: a node's bucket in insertion
    /// order, then its children in slot order.
    pub fn collect_bodies(&self) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect_node(self.root, &mut out);
        out
    }

    pub fn stats(&self) -> OctreeStats {
        let mut stats = OctreeStats::default();
        self.stats_node(self.root, 0, &mut stats);
        stats
    }

    // helpers ==============================================================================

    fn insert_body(&mut self, node_idx: usize, depth: usize, body_idx: usize, pos: &NVec3) {
        let node = &mut self.nodes[node_idx];

        if !node.is_subdivided() {
            if node.bucket.len() < node.capacity || depth >= MAX_DEPTH {
                node.bucket.push(body_idx);
                return;
            }
            self.subdivide(node_idx);
        }

        let node = &self.nodes[node_idx];
        let child = match node.children {
            Some(children) => children[node.boundary.octant_index(pos)],
            None => return,
        };
        self.insert_body(child, depth + 1, body_idx, pos);
    }

    fn aggregate_node(&mut self, node_idx: usize, bodies: &[Body]) -> (f64, NVec3) {
        let mut mass = 0.0;
        let mut weighted = NVec3::zeros();

        for &bidx in &self.nodes[node_idx].bucket {
            let b = &bodies[bidx];
            mass += b.m;
            weighted += b.x * b.m;
        }

        // Option<[usize; 8]> is Copy, snapshot it before recursing with &mut self
        let children = self.nodes[node_idx].children;
        if let Some(children) = children {
            for child in children {
                let (child_mass, child_weighted) = self.aggregate_node(child, bodies);
                mass += child_mass;
                weighted += child_weighted;
            }
        }

        if mass > 0.0 {
            let node = &mut self.nodes[node_idx];
            node.total_mass = mass;
            node.center_of_mass = weighted / mass;
        }

        (mass, weighted)
    }

    fn traverse_node(&self, node_idx: usize, body_idx: usize, bodies: &[Body], gravity: &BarnesHutGravity, force: &mut NVec3) {
        let node = &self.nodes[node_idx];

        let Some(children) = node.children else {
            if gravity.leaf_forces == LeafForces::Direct {
                *force += self.bucket_force(node, body_idx, bodies, gravity.g);
            }
            return;
        };

        let body = &bodies[body_idx];
        let d = (node.center_of_mass - body.x).norm().max(MIN_DISTANCE);

        if node.boundary.width() / d < gravity.theta {
            // Far enough away: the whole subtree acts as one mass at its COM
            *force += point_mass_force(gravity.g, body.m, &body.x, &node.center_of_mass, node.total_mass);
            return;
        }

        if gravity.leaf_forces == LeafForces::Direct {
            *force += self.bucket_force(node, body_idx, bodies, gravity.g);
        }
        for child in children {
            self.traverse_node(child, body_idx, bodies, gravity, force);
        }
    }

    /// Exact force from a node's own bucket, skipping the query body
    fn bucket_force(&self, node: &OctreeNode, body_idx: usize, bodies: &[Body], g: f64) -> NVec3 {
        let body = &bodies[body_idx];
        node.bucket
            .iter()
            .filter(|&&bidx| bidx != body_idx)
            .map(|&bidx| point_mass_force(g, body.m, &body.x, &bodies[bidx].x, bodies[bidx].m))
            .sum()
    }

    fn collect_node(&self, node_idx: usize, out: &mut Vec<usize>) {
        let node = &self.nodes[node_idx];
        out.extend_from_slice(&node.bucket);
        if let Some(children) = node.children {
            for child in children {
                self.collect_node(child, out);
            }
        }
    }

    fn stats_node(&self, node_idx: usize, depth: usize, stats: &mut OctreeStats) {
        let node = &self.nodes[node_idx];
        stats.nodes += 1;
        stats.resident += node.bucket.len();
        stats.max_depth = stats.max_depth.max(depth);

        match node.children {
            Some(children) => {
                stats.internal += 1;
                for child in children {
                    self.stats_node(child, depth + 1, stats);
                }
            }
            None => stats.leaves += 1,
        }
    }
}
