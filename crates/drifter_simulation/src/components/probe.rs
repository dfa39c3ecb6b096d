//! Collision-probe snapshot supplied by the tactical layer.
//!
//! # Architecture
//!
//! The simulation never raycasts on its own. The host refreshes one
//! `GroundProbe` per body before the fixed tick (sphere-cast below for the
//! supporting surface, downward ray for the landing check, upward ray for
//! crouch clearance). Headless runs use `SyntheticWorldPlugin`, which fills
//! the probe from a flat-world model instead.

use bevy::prelude::*;

/// Probe results for one body, valid for the current tick.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct GroundProbe {
    /// Body is in contact with the ground (controller-level check)
    pub grounded: bool,
    /// Normal of the supporting surface (sphere-cast below the capsule).
    /// `Vec3::Y` when nothing was hit.
    pub surface_normal: Vec3,
    /// Distance to the nearest surface straight below, `None` when the ray
    /// found nothing within its range. Drives the landing-animation check.
    pub below_hit_distance: Option<f32>,
    /// No obstruction above the head (stand-up check)
    pub overhead_clear: bool,
}

impl Default for GroundProbe {
    fn default() -> Self {
        Self {
            grounded: false,
            surface_normal: Vec3::Y,
            below_hit_distance: None,
            overhead_clear: true,
        }
    }
}

impl GroundProbe {
    /// Slope angle of the supporting surface, degrees from horizontal.
    pub fn surface_angle_deg(&self) -> f32 {
        self.surface_normal.angle_between(Vec3::Y).to_degrees()
    }
}
