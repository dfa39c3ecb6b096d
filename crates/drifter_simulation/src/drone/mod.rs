//! Drone flight model.
//!
//! # Architecture
//!
//! Same pattern class as the walking body — independent per-tick velocity,
//! one displacement — but with acceleration-limited thrust (move-towards,
//! not exponential smoothing) and no jump/slide/crouch machinery.
//!
//! - Thrust: forward axis along the body's forward, lift axis along its up.
//!   Signs follow the shipped inverted convention (`DroneConfig`).
//! - Ceiling hit (contact flagged "above") forces a fall sub-state: only
//!   gravity integrates until ground contact or the fall timeout.
//! - Hitting a dynamic prop sets the prop's velocity to the horizontal
//!   opposite of the drone's — a simplified impulse response.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{Collider, RigidBody, Velocity};

use crate::components::{GroundProbe, InputEdges, MoveInput, PhysicsBody};
use crate::config::DroneConfig;
use crate::host::CollisionContact;

/// Маркер дрона
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Drone;

/// Flight state of one drone.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct DroneState {
    /// Current velocity (m/s, world space)
    pub velocity: Vec3,
    /// Forced fall after a ceiling hit
    pub falling: bool,
    /// Time spent falling (seconds)
    pub fall_timer: f32,
}

/// System: thrust, lift, yaw — or gravity-only while falling.
pub fn update_drone_flight(
    mut query: Query<
        (
            Entity,
            &MoveInput,
            &DroneConfig,
            &GroundProbe,
            &mut Transform,
            &mut DroneState,
            &mut PhysicsBody,
        ),
        With<Drone>,
    >,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, input, config, probe, mut transform, mut state, mut body) in query.iter_mut() {
        if state.falling {
            state.fall_timer += delta;
            state.velocity.y -= config.gravity * delta;

            if state.fall_timer >= config.fall_duration || probe.grounded {
                state.falling = false;
                state.fall_timer = 0.0;
                crate::log(&format!("Drone control recovered (body: {:?})", entity));
            }
        } else {
            let sign = config.control_sign();

            let desired = Vec3::from(transform.forward()) * (sign * input.axes.y * config.max_speed)
                + Vec3::from(transform.up()) * (sign * input.lift * config.lift_speed);
            state.velocity = state.velocity.move_towards(desired, config.acceleration * delta);

            transform.rotate_y((sign * input.axes.x * config.rotation_speed).to_radians() * delta);
        }

        body.velocity = state.velocity;
    }
}

/// System: contact response — ceiling fall + dynamic-prop push.
pub fn process_drone_contacts(
    mut contacts: EventReader<CollisionContact>,
    mut drones: Query<&mut DroneState, With<Drone>>,
    mut pushed: Query<&mut Velocity, Without<Drone>>,
) {
    for contact in contacts.read() {
        let Ok(mut state) = drones.get_mut(contact.body) else {
            continue;
        };

        if contact.flags.above && !state.falling {
            state.falling = true;
            state.fall_timer = 0.0;
            crate::log(&format!("Drone ceiling hit, falling (body: {:?})", contact.body));
        }

        if contact.other_dynamic {
            if let Ok(mut velocity) = pushed.get_mut(contact.other) {
                velocity.linvel = Vec3::new(-state.velocity.x, 0.0, -state.velocity.z);
            }
        }
    }
}

/// Spawn helper: drone with the full component set.
pub fn spawn_drone(commands: &mut Commands, position: Vec3, config: DroneConfig) -> Entity {
    let radius = config.body_radius;

    commands
        .spawn((
            (
                Transform::from_translation(position),
                Drone,
                DroneState::default(),
                PhysicsBody::default(),
                GroundProbe::default(),
                MoveInput::default(),
                InputEdges::default(),
                config,
            ),
            (
                RigidBody::KinematicPositionBased,
                Collider::ball(radius),
                Velocity::default(),
                crate::collision::body_groups(),
            ),
        ))
        .id()
}
