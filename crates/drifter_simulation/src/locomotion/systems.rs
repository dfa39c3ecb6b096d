//! Locomotion systems, chained in FixedUpdate.

use bevy::math::FloatExt;
use bevy::prelude::*;
use bevy_rapier3d::prelude::{Collider, Velocity};

use super::LocomotionState;
use crate::animation::{AnimParam, AnimationCommand};
use crate::components::{GroundProbe, MoveInput, PhysicsBody};
use crate::config::LocomotionConfig;
use crate::dash::DashState;
use crate::jump::JumpPhase;
use crate::slide::SlideState;

/// System: input axes → planar velocity.
///
/// Combined axis magnitude is clamped to 1 so diagonal input is not faster,
/// the scalar speed is smoothed toward the modifier target, and the local
/// vector is rotated into the body's facing. Local speeds go out as
/// animation parameters.
pub fn update_planar_velocity(
    mut query: Query<(
        Entity,
        &MoveInput,
        &LocomotionConfig,
        &Transform,
        &DashState,
        &mut LocomotionState,
    )>,
    mut anim: EventWriter<AnimationCommand>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, input, config, transform, dash, mut state) in query.iter_mut() {
        if dash.active {
            continue;
        }

        let axes = input.clamped_axes();

        let target = config
            .speed_model
            .target_speed(input.run_pressed(), state.crouched);
        state.current_speed = state
            .current_speed
            .lerp(target, config.speed_smoothing * delta);

        let (forward_speed, side_speed) = match config.speed_model.side_speed() {
            // Side constant fixed, forward smoothed
            Some(side) => (axes.y * state.current_speed, axes.x * side),
            // One scalar over the whole input vector
            None => (axes.y * state.current_speed, axes.x * state.current_speed),
        };
        // Bevy convention: local forward = -Z
        let local = Vec3::new(side_speed, 0.0, -forward_speed);
        state.planar_velocity = transform.rotation * local;

        anim.write(AnimationCommand::SetFloat {
            body: entity,
            param: AnimParam::ForwardSpeed,
            value: forward_speed,
        });
        anim.write(AnimationCommand::SetFloat {
            body: entity,
            param: AnimParam::SideSpeed,
            value: side_speed,
        });
    }
}

/// System: integrate gravity, hold the body against the ground.
///
/// Grounded and descending outside a jump, vertical velocity is clamped to
/// the stick-to-ground constant instead of zero — keeps the contact probe
/// reliably true through the resolver's ground epsilon.
pub fn apply_gravity(
    mut query: Query<(
        &LocomotionConfig,
        &GroundProbe,
        &JumpPhase,
        &DashState,
        &mut LocomotionState,
    )>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (config, probe, phase, dash, mut state) in query.iter_mut() {
        if dash.active {
            continue;
        }

        state.vertical_velocity += config.gravity * delta;

        if probe.grounded && state.vertical_velocity < 0.0 && *phase == JumpPhase::Grounded {
            state.vertical_velocity = config.stick_to_ground_speed;
        }
    }
}

/// System: yaw from the turn axis.
pub fn apply_yaw(
    mut query: Query<(&MoveInput, &LocomotionConfig, &DashState, &mut Transform)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (input, config, dash, mut transform) in query.iter_mut() {
        if dash.active {
            continue;
        }
        transform.rotate_y((input.turn * config.rotation_speed).to_radians() * delta);
    }
}

/// System: crouch stance and capsule height.
///
/// Standing back up needs overhead clearance; while the input is released
/// and the head is blocked the body stays crouched and re-tests every tick.
pub fn update_crouch(
    mut commands: Commands,
    mut query: Query<(
        Entity,
        &MoveInput,
        &LocomotionConfig,
        &GroundProbe,
        &DashState,
        &mut LocomotionState,
    )>,
    mut anim: EventWriter<AnimationCommand>,
) {
    for (entity, input, config, probe, dash, mut state) in query.iter_mut() {
        if dash.active {
            continue;
        }

        if input.crouch_pressed() {
            if !state.crouched {
                state.crouched = true;
                let half = config.capsule_half_height(config.crouch_height);
                commands
                    .entity(entity)
                    .insert(Collider::capsule_y(half, config.capsule_radius));
                anim.write(AnimationCommand::SetBool {
                    body: entity,
                    param: AnimParam::Crouched,
                    value: true,
                });
                crate::log(&format!("Crouch down (body: {:?})", entity));
            }
        } else if state.crouched && probe.overhead_clear {
            state.crouched = false;
            let half = config.capsule_half_height(config.standing_height);
            commands
                .entity(entity)
                .insert(Collider::capsule_y(half, config.capsule_radius));
            anim.write(AnimationCommand::SetBool {
                body: entity,
                param: AnimParam::Crouched,
                value: false,
            });
            crate::log(&format!("Crouch up (body: {:?})", entity));
        }
    }
}

/// System: sum the per-axis contributions into one displacement velocity.
///
/// planar · control_factor + slide + up · vertical; an active dash overrides
/// the whole sum with its fixed direction at dash speed.
pub fn compose_total_velocity(
    mut query: Query<(
        &LocomotionConfig,
        &LocomotionState,
        &SlideState,
        &DashState,
        &mut PhysicsBody,
    )>,
) {
    for (config, state, slide, dash, mut body) in query.iter_mut() {
        body.velocity = if dash.active {
            dash.direction * config.dash_speed
        } else {
            state.planar_velocity * slide.control_factor
                + slide.slide_velocity
                + Vec3::Y * state.vertical_velocity
        };
    }
}

/// System: mirror our velocity into the Rapier component.
///
/// Rapier резолвит коллизии, интеграцию скорости делаем сами.
pub fn sync_velocity_to_rapier(mut query: Query<(&PhysicsBody, &mut Velocity)>) {
    for (body, mut rapier_velocity) in query.iter_mut() {
        rapier_velocity.linvel = body.velocity;
    }
}

/// System: velocity → Transform, one displacement per tick.
pub fn integrate_velocity(
    mut query: Query<(&PhysicsBody, &mut Transform)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (body, mut transform) in query.iter_mut() {
        transform.translation += body.velocity * delta;
    }
}
