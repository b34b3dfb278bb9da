//! Fixed-step explicit Euler integrator
//!
//! One force evaluation per step, driven by any [`ForceField`]. Forces for
//! every body are evaluated before any body moves, so the order in which
//! bodies are updated does not change the result.

use super::forces::ForceField;
use super::states::{NVec3, System};

/// Advance the system by one step of size `dt`.
///
/// For every body: `a = F / m`, `v += a dt`, then `x += v dt` with the
/// updated velocity. Updates `sys.t` in place.
pub fn euler_step(sys: &mut System, forces: &impl ForceField, dt: f64) {
    let n = sys.bodies.len();
    if n == 0 { // no bodies, return
        return;
    }

    // F_n from x_n
    let mut f = vec![NVec3::zeros(); n];
    forces.forces(&*sys, &mut f);

    for (b, f) in sys.bodies.iter_mut().zip(f.iter()) {
        let a = f / b.m;
        b.v += a * dt;
        b.x += b.v * dt;
    }

    sys.t += dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::Body;

    /// Constant force along +x on every body
    struct Push(f64);

    impl ForceField for Push {
        fn forces(&self, _sys: &System, out: &mut [NVec3]) {
            for f in out.iter_mut() {
                *f = NVec3::new(self.0, 0.0, 0.0);
            }
        }
    }

    #[test]
    fn euler_uses_updated_velocity_for_position() {
        let mut sys = System::new(vec![Body::at_rest(NVec3::zeros(), 2.0)]);
        euler_step(&mut sys, &Push(4.0), 0.5);

        // a = 2, v = 1, x = 0.5
        assert!((sys.bodies[0].v.x - 1.0).abs() < 1e-12);
        assert!((sys.bodies[0].x.x - 0.5).abs() < 1e-12);
        assert!((sys.t - 0.5).abs() < 1e-12);
    }

    #[test]
    fn empty_system_does_not_advance() {
        let mut sys = System::default();
        euler_step(&mut sys, &Push(1.0), 1.0);
        assert_eq!(sys.t, 0.0);
    }
}
