//! Rotating orthographic projection of body positions onto the window.
//!
//! The camera state is a plain [`ViewState`] value passed into the
//! projection each frame. A point is rotated about X, then Y, then Z, its z
//! is dropped, and the remaining (x, y) is scaled by the zoom and centered in
//! the window with y pointing down.

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::simulation::states::NVec3;

/// Angle change per frame while a rotation key is held
pub const ROTATION_STEP: f64 = 0.05;

/// Zoom factor per mouse wheel notch
pub const ZOOM_STEP: f64 = 1.1;

pub const DEFAULT_ANGLE_X: f64 = 1.5;
pub const DEFAULT_ANGLE_Y: f64 = -0.75;
pub const DEFAULT_ANGLE_Z: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub angle_x: f64,
    pub angle_y: f64,
    pub angle_z: f64,
    pub zoom: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::with_zoom(1.0)
    }
}

impl ViewState {
    pub fn with_zoom(zoom: f64) -> Self {
        Self {
            angle_x: DEFAULT_ANGLE_X,
            angle_y: DEFAULT_ANGLE_Y,
            angle_z: DEFAULT_ANGLE_Z,
            zoom,
        }
    }

    pub fn rotate_x(&mut self, delta: f64) {
        self.angle_x += delta;
    }

    pub fn rotate_y(&mut self, delta: f64) {
        self.angle_y += delta;
    }

    pub fn rotate_z(&mut self, delta: f64) {
        self.angle_z += delta;
    }

    /// Restore the default angles; zoom is kept
    pub fn reset(&mut self) {
        self.angle_x = DEFAULT_ANGLE_X;
        self.angle_y = DEFAULT_ANGLE_Y;
        self.angle_z = DEFAULT_ANGLE_Z;
    }

    pub fn zoom_in(&mut self) {
        self.zoom *= ZOOM_STEP;
    }

    pub fn zoom_out(&mut self) {
        self.zoom /= ZOOM_STEP;
    }

    /// Combined rotation `Rz * Ry * Rx`
    pub fn rotation(&self) -> Matrix3<f64> {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), self.angle_x);
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), self.angle_y);
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), self.angle_z);
        (rz * ry * rx).into_inner()
    }
}

/// Per-frame projection: the rotation is computed once and reused for every point
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    rotation: Matrix3<f64>,
    zoom: f64,
    half_width: f64,
    half_height: f64,
}

impl Projection {
    pub fn new(view: &ViewState, width: f64, height: f64) -> Self {
        Self {
            rotation: view.rotation(),
            zoom: view.zoom,
            half_width: width / 2.0,
            half_height: height / 2.0,
        }
    }

    /// Window pixel of a world point, origin at the top-left corner
    pub fn project(&self, point: &NVec3) -> (i32, i32) {
        let rotated = self.rotation * point;
        let x = rotated.x * self.zoom + self.half_width;
        let y = -(rotated.y * self.zoom) + self.half_height;
        (x as i32, y as i32)
    }
}

/// Project a single point with an explicit view and window size
pub fn project(point: &NVec3, view: &ViewState, width: f64, height: f64) -> (i32, i32) {
    Projection::new(view, width, height).project(point)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_view() -> ViewState {
        ViewState {
            angle_x: 0.0,
            angle_y: 0.0,
            angle_z: 0.0,
            zoom: 1.0,
        }
    }

    #[test]
    fn origin_lands_at_window_center() {
        let view = ViewState::default();
        assert_eq!(project(&NVec3::zeros(), &view, 1000.0, 800.0), (500, 400));
    }

    #[test]
    fn identity_view_drops_z_and_flips_y() {
        let view = flat_view();
        assert_eq!(project(&NVec3::new(10.0, 20.0, 99.0), &view, 1000.0, 800.0), (510, 380));
    }

    #[test]
    fn zoom_scales_around_center() {
        let mut view = flat_view();
        view.zoom_in();
        let (x, _) = project(&NVec3::new(100.0, 0.0, 0.0), &view, 1000.0, 800.0);
        assert_eq!(x, 610);
        view.zoom_out();
        assert!((view.zoom - 1.0).abs() < 1e-12);
    }

    #[test]
    fn quarter_turn_about_z_maps_x_to_y() {
        let mut view = flat_view();
        view.rotate_z(std::f64::consts::FRAC_PI_2);
        // (10, 0, 0) -> (0, 10, 0) -> pixel y above center
        assert_eq!(project(&NVec3::new(10.0, 0.0, 0.0), &view, 100.0, 100.0), (50, 40));
    }

    #[test]
    fn reset_restores_default_angles_only() {
        let mut view = ViewState::with_zoom(3.0);
        view.rotate_x(0.4);
        view.rotate_y(-0.2);
        view.rotate_z(1.0);
        view.reset();
        assert_eq!(view, ViewState::with_zoom(3.0));
    }
}
