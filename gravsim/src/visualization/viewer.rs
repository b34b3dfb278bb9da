use bevy::input::mouse::MouseWheel;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::simulation::scenario::Scenario;
use crate::visualization::projection::{Projection, ViewState, ROTATION_STEP};

/// Camera angles and zoom, owned by the app and handed to the projection each frame
#[derive(Resource)]
struct View(ViewState);

/// Radius of the circle drawn for each body, in pixels
const BODY_RADIUS: f32 = 1.0;

pub fn run_viewer(scenario: Scenario) {
    log::info!(
        "run_viewer: starting Bevy viewer with {} bodies",
        scenario.simulation.system.bodies.len()
    );

    let width = scenario.view.width as f32;
    let height = scenario.view.height as f32;
    let view = View(ViewState::with_zoom(scenario.view.zoom));

    App::new()
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(view)
        .insert_resource(scenario)
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Octree 3D Simulation".into(),
                        resolution: WindowResolution::new(width, height),
                        resizable: false,
                        ..Default::default()
                    }),
                    ..Default::default()
                })
                // logging goes through env_logger, set up in main
                .disable::<LogPlugin>(),
        )
        .add_systems(Startup, setup_camera)
        .add_systems(Update, (handle_input, physics_step, draw_bodies).chain())
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());
}

/// Arrow keys rotate about X/Y, D/Q about Z, F resets, the wheel zooms
fn handle_input(keys: Res<ButtonInput<KeyCode>>, mut wheel: EventReader<MouseWheel>, mut view: ResMut<View>) {
    for event in wheel.read() {
        if event.y > 0.0 {
            view.0.zoom_in();
        } else if event.y < 0.0 {
            view.0.zoom_out();
        }
    }

    if keys.pressed(KeyCode::ArrowLeft) {
        view.0.rotate_y(-ROTATION_STEP);
    }
    if keys.pressed(KeyCode::ArrowUp) {
        view.0.rotate_x(-ROTATION_STEP);
    }
    if keys.pressed(KeyCode::ArrowRight) {
        view.0.rotate_y(ROTATION_STEP);
    }
    if keys.pressed(KeyCode::ArrowDown) {
        view.0.rotate_x(ROTATION_STEP);
    }
    if keys.pressed(KeyCode::KeyD) {
        view.0.rotate_z(-ROTATION_STEP);
    }
    if keys.pressed(KeyCode::KeyQ) {
        view.0.rotate_z(ROTATION_STEP);
    }
    if keys.pressed(KeyCode::KeyF) {
        view.0.reset();
    }
}

fn physics_step(mut scenario: ResMut<Scenario>) {
    scenario.simulation.step();
}

fn draw_bodies(scenario: Res<Scenario>, view: Res<View>, mut gizmos: Gizmos) {
    let width = scenario.view.width as f64;
    let height = scenario.view.height as f64;
    let projection = Projection::new(&view.0, width, height);

    // Pixel coordinates (top-left origin, y down) -> 2D world (center origin, y up)
    let half = Vec2::new(width as f32 * 0.5, height as f32 * 0.5);
    for body in scenario.simulation.collect_bodies() {
        let (px, py) = projection.project(&body.x);
        let pos = Vec2::new(px as f32 - half.x, half.y - py as f32);
        gizmos.circle_2d(pos, BODY_RADIUS, Color::WHITE);
    }
}
