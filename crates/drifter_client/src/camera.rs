use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

use crate::input::ControlledBodies;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (follow_controlled_body, orbit_camera_controls, update_camera_transform).chain(),
        );
    }
}

/// Orbit camera that keeps its focus on the controlled body.
#[derive(Component)]
pub struct FollowOrbitCamera {
    pub focus: Vec3,
    pub distance: f32,
    pub yaw: f32,   // Horizontal rotation (radians)
    pub pitch: f32, // Vertical rotation (radians)
    pub sensitivity: f32,
    pub zoom_speed: f32,
}

impl Default for FollowOrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            distance: 10.0,
            yaw: std::f32::consts::FRAC_PI_4,   // 45°
            pitch: std::f32::consts::FRAC_PI_6, // 30°
            sensitivity: 0.005,
            zoom_speed: 1.0,
        }
    }
}

/// Keep the focus glued to whichever body is controlled.
fn follow_controlled_body(
    bodies: Option<Res<ControlledBodies>>,
    transforms: Query<&Transform, Without<FollowOrbitCamera>>,
    mut query: Query<&mut FollowOrbitCamera>,
) {
    let Some(bodies) = bodies else {
        return;
    };
    let target = if bodies.drone_active {
        bodies.drone
    } else {
        bodies.player
    };
    let Ok(target_transform) = transforms.get(target) else {
        return;
    };

    for mut camera in query.iter_mut() {
        camera.focus = target_transform.translation + Vec3::Y * 1.2;
    }
}

/// Handle mouse input: middle button orbits, wheel zooms.
fn orbit_camera_controls(
    mut query: Query<&mut FollowOrbitCamera>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut mouse_wheel: EventReader<MouseWheel>,
) {
    let mut camera = match query.single_mut() {
        Ok(cam) => cam,
        Err(_) => return,
    };

    if mouse_buttons.pressed(MouseButton::Middle) {
        for motion in mouse_motion.read() {
            camera.yaw -= motion.delta.x * camera.sensitivity;
            camera.pitch -= motion.delta.y * camera.sensitivity;

            // Clamp pitch to avoid gimbal lock
            camera.pitch = camera.pitch.clamp(
                -std::f32::consts::FRAC_PI_2 + 0.1,
                std::f32::consts::FRAC_PI_2 - 0.1,
            );
        }
    } else {
        // Consume motion events even when not orbiting
        mouse_motion.clear();
    }

    for wheel in mouse_wheel.read() {
        camera.distance -= wheel.y * camera.zoom_speed;
        camera.distance = camera.distance.clamp(3.0, 40.0);
    }
}

/// Place the camera on its orbit sphere, looking at the focus.
fn update_camera_transform(mut query: Query<(&FollowOrbitCamera, &mut Transform)>) {
    for (camera, mut transform) in query.iter_mut() {
        let x = camera.distance * camera.pitch.cos() * camera.yaw.sin();
        let y = camera.distance * camera.pitch.sin();
        let z = camera.distance * camera.pitch.cos() * camera.yaw.cos();

        let position = camera.focus + Vec3::new(x, y, z);

        *transform = Transform::from_translation(position).looking_at(camera.focus, Vec3::Y);
    }
}
