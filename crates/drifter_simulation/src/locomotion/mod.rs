//! Third-person locomotion: planar movement, gravity, yaw, crouch.
//!
//! # Architecture
//!
//! One parameterized module for every walking body — per-character tuning
//! lives in `LocomotionConfig`, not in forked copies of the movement code.
//! Each tick the systems compute independent velocity contributions (planar,
//! vertical, slide, dash) and sum them once in `compose_total_velocity`, so
//! the host's collision resolver sees a single displacement and handles
//! ground/ceiling/wall deflection consistently.
//!
//! Rapier carries the capsule collider and the `Velocity` mirror; position
//! integration is our own (`integrate_velocity`), Rapier is collisions only.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::components::{GroundProbe, InputEdges, MoveInput, PhysicsBody, Player};
use crate::combat::WeaponTrigger;
use crate::config::LocomotionConfig;
use crate::dash::DashState;
use crate::jump::JumpPhase;
use crate::slide::SlideState;

pub mod systems;

#[cfg(test)]
mod systems_tests;

pub use systems::*;

/// Per-tick locomotion state of one walking body.
///
/// Мутируется ровно один раз за тик; `current_speed` всегда интерполирует к
/// цели, мгновенных скачков нет.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct LocomotionState {
    /// Planar velocity, world space (m/s)
    pub planar_velocity: Vec3,
    /// Vertical velocity (m/s, negative = down)
    pub vertical_velocity: f32,
    /// Smoothed scalar speed toward the modifier target (m/s)
    pub current_speed: f32,
    /// Crouched stance
    pub crouched: bool,
}

impl Default for LocomotionState {
    fn default() -> Self {
        Self {
            planar_velocity: Vec3::ZERO,
            vertical_velocity: 0.0,
            current_speed: 0.0,
            crouched: false,
        }
    }
}

/// Spawn helper: walking character with the full component set.
///
/// - Transform + our per-tick state components
/// - Rapier: kinematic body + capsule collider + velocity mirror
pub fn spawn_player_character(
    commands: &mut Commands,
    position: Vec3,
    config: LocomotionConfig,
) -> Entity {
    let half_height = config.capsule_half_height(config.standing_height);
    let radius = config.capsule_radius;

    commands
        .spawn((
            (
                Transform::from_translation(position),
                Player,
                PhysicsBody::default(),
                LocomotionState::default(),
                SlideState::default(),
                JumpPhase::default(),
                DashState::default(),
                GroundProbe::default(),
                MoveInput::default(),
                InputEdges::default(),
                WeaponTrigger::default(),
                config,
            ),
            (
                RigidBody::KinematicPositionBased,
                Collider::capsule_y(half_height, radius),
                Velocity::default(),
                crate::collision::body_groups(),
            ),
        ))
        .id()
}
