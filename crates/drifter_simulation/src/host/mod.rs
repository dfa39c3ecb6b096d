//! Host bridge: inbound collision contacts + synthetic world for headless.
//!
//! # Architecture
//!
//! The collision resolver lives on the host side. Two things cross back:
//! - `CollisionContact` events, queued by the host whenever a kinematic body
//!   touched something during its move.
//! - `GroundProbe` refreshes (see `components::probe`).
//!
//! `SyntheticWorldPlugin` stands in for the resolver when there is no host:
//! an infinite flat floor at y = 0. Probes are filled from the plane model
//! and bodies are clamped at the floor after integration. Used by the
//! headless binary and the integration tests.

use bevy::prelude::*;

use crate::components::{GroundProbe, PhysicsBody};

/// Where the contact sits relative to the body, controller-style flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub struct ContactFlags {
    pub above: bool,
    pub below: bool,
    pub sides: bool,
}

/// A collision reported by the host's resolver for one moved body.
#[derive(Event, Debug, Clone, Copy)]
pub struct CollisionContact {
    /// The kinematic body that was moving
    pub body: Entity,
    /// What it touched
    pub other: Entity,
    pub flags: ContactFlags,
    /// `other` is dynamically simulated (can be pushed)
    pub other_dynamic: bool,
    /// Movement direction of `body` at the moment of contact (normalized)
    pub move_direction: Vec3,
}

/// Floor contact tolerance of the synthetic world (meters).
pub const GROUND_EPSILON: f32 = 0.05;

/// Flat-world stand-in for the host resolver.
pub struct SyntheticWorldPlugin;

impl Plugin for SyntheticWorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                synthetic_ground_probe.before(crate::components::latch_input_edges),
                clamp_to_floor.after(crate::locomotion::integrate_velocity),
            ),
        );
    }
}

/// System: fill probes from the flat-floor model.
///
/// Grounded when the body origin sits within `GROUND_EPSILON` of the plane;
/// the downward ray distance is just the height above the plane; nothing
/// ever blocks standing up.
pub fn synthetic_ground_probe(mut query: Query<(&Transform, &mut GroundProbe)>) {
    for (transform, mut probe) in query.iter_mut() {
        let height = transform.translation.y;
        probe.grounded = height <= GROUND_EPSILON;
        probe.surface_normal = Vec3::Y;
        probe.below_hit_distance = Some(height.max(0.0));
        probe.overhead_clear = true;
    }
}

/// System: keep bodies above the floor plane (collision resolution stand-in).
pub fn clamp_to_floor(mut query: Query<&mut Transform, With<PhysicsBody>>) {
    for mut transform in query.iter_mut() {
        if transform.translation.y < 0.0 {
            transform.translation.y = 0.0;
        }
    }
}
