//! Axis-aligned boxes used as octree cells.
//!
//! A `Boundary` is stored as a low corner (`origin`) and non-negative
//! `extents` (width, height, depth). Containment is closed on every face.
//!
//! Octants are addressed with a 3-bit code, matching the layout of the
//! octree's child slots:
//!
//! - Bit 0 (value 1): X axis, 0 for the low half, 1 for the high half
//! - Bit 1 (value 2): Y axis, 0 for the low half, 1 for the high half
//! - Bit 2 (value 4): Z axis, 0 for the low half, 1 for the high half

use crate::simulation::states::NVec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub origin: NVec3, // low corner (x, y, z)
    pub extents: NVec3, // (width, height, depth)
}

impl Boundary {
    /// Build a box from its low corner and extents.
    ///
    /// Negative extents are clamped to zero so the box is never inverted.
    pub fn new(origin: NVec3, extents: NVec3) -> Self {
        Self {
            origin,
            extents: extents.map(|e| e.max(0.0)),
        }
    }

    pub fn width(&self) -> f64 {
        self.extents.x
    }

    pub fn height(&self) -> f64 {
        self.extents.y
    }

    pub fn depth(&self) -> f64 {
        self.extents.z
    }

    /// High corner `origin + extents`
    pub fn max(&self) -> NVec3 {
        self.origin + self.extents
    }

    pub fn center(&self) -> NVec3 {
        self.origin + self.extents * 0.5
    }

    /// True iff `p` lies in the closed box `[origin, origin + extents]` on all three axes.
    pub fn contains(&self, p: &NVec3) -> bool {
        let max = self.max();
        (0..3).all(|axis| self.origin[axis] <= p[axis] && p[axis] <= max[axis])
    }

    /// Index of the octant a point routes to.
    ///
    /// A coordinate equal to the midpoint goes to the high half, so the
    /// lower shared faces of children behave as half-open and every point in
    /// the closed parent box maps to exactly one child.
    pub fn octant_index(&self, p: &NVec3) -> usize {
        let center = self.center();
        let mut idx = 0;

        if p.x >= center.x { idx |= 1; } // bit 0
        if p.y >= center.y { idx |= 2; } // bit 1
        if p.z >= center.z { idx |= 4; } // bit 2

        idx
    }

    /// Box of octant `idx` (0..8): half extents on each axis, offset by half
    /// an extent on every axis whose bit is set.
    pub fn octant(&self, idx: usize) -> Boundary {
        let half = self.extents * 0.5;
        let mut origin = self.origin;

        if (idx & 1) != 0 { origin.x += half.x; }
        if (idx & 2) != 0 { origin.y += half.y; }
        if (idx & 4) != 0 { origin.z += half.z; }

        Boundary { origin, extents: half }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube() -> Boundary {
        Boundary::new(NVec3::zeros(), NVec3::new(2.0, 2.0, 2.0))
    }

    #[test]
    fn contains_is_closed_on_every_face() {
        let b = unit_cube();
        assert!(b.contains(&NVec3::new(0.0, 0.0, 0.0)));
        assert!(b.contains(&NVec3::new(2.0, 2.0, 2.0)));
        assert!(b.contains(&NVec3::new(1.0, 2.0, 0.0)));
        assert!(!b.contains(&NVec3::new(2.0 + 1e-9, 1.0, 1.0)));
        assert!(!b.contains(&NVec3::new(1.0, -1e-9, 1.0)));
    }

    #[test]
    fn midpoint_routes_to_high_octant() {
        let b = unit_cube();
        assert_eq!(b.octant_index(&NVec3::new(1.0, 1.0, 1.0)), 7);
        assert_eq!(b.octant_index(&NVec3::new(0.0, 0.0, 0.0)), 0);
        assert_eq!(b.octant_index(&NVec3::new(1.5, 0.2, 1.2)), 5);
    }

    #[test]
    fn octant_has_half_extents() {
        let b = Boundary::new(NVec3::new(-4.0, 0.0, 2.0), NVec3::new(8.0, 4.0, 2.0));
        let o = b.octant(6);
        assert_eq!(o.origin, NVec3::new(-4.0, 2.0, 3.0));
        assert_eq!(o.extents, NVec3::new(4.0, 2.0, 1.0));
    }

    #[test]
    fn negative_extents_are_clamped() {
        let b = Boundary::new(NVec3::zeros(), NVec3::new(-1.0, 2.0, 3.0));
        assert_eq!(b.width(), 0.0);
        assert_eq!(b.height(), 2.0);
    }
}
