//! Drone flight tuning.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for the drone flight model.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct DroneConfig {
    /// Maximum thrust speed (m/s)
    pub max_speed: f32,
    /// Velocity approach rate toward the target (m/s²), move-towards not
    /// exponential
    pub acceleration: f32,
    /// Yaw rate (degrees/s)
    pub rotation_speed: f32,
    /// Vertical lift speed (m/s)
    pub lift_speed: f32,
    /// Gravity while in the forced-fall state (m/s², positive magnitude)
    pub gravity: f32,
    /// Maximum fall time before control returns (seconds)
    pub fall_duration: f32,
    /// Thrust/yaw/lift signs flipped, matching the shipped tuning
    pub inverted_controls: bool,
    /// Collider radius (meters)
    pub body_radius: f32,
}

impl Default for DroneConfig {
    fn default() -> Self {
        Self {
            max_speed: 5.0,
            acceleration: 10.0,
            rotation_speed: 100.0,
            lift_speed: 3.0,
            gravity: 9.8,
            fall_duration: 1.0,
            inverted_controls: true,
            body_radius: 0.3,
        }
    }
}

impl DroneConfig {
    /// -1 when the inverted convention is active, +1 otherwise.
    pub fn control_sign(&self) -> f32 {
        if self.inverted_controls {
            -1.0
        } else {
            1.0
        }
    }
}
