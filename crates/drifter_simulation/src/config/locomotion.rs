//! Character locomotion tuning.
//!
//! One config per body. The two historical movement models (asymmetric
//! forward/side speeds vs uniform walk/run/crouch) survive as `SpeedModel`
//! variants so divergent per-character tuning stays in data, not in forked
//! code.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for character movement physics.
///
/// All values metric (meters, seconds, degrees where noted).
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct LocomotionConfig {
    // ========================================================================
    // Body dimensions
    // ========================================================================
    /// Capsule radius (meters)
    pub capsule_radius: f32,
    /// Standing capsule height (meters)
    pub standing_height: f32,
    /// Crouched capsule height (meters)
    pub crouch_height: f32,
    /// Upward clearance required to stand back up (meters)
    pub overhead_probe_distance: f32,

    // ========================================================================
    // Movement
    // ========================================================================
    /// Speed targets per modifier state
    pub speed_model: SpeedModel,
    /// Exponential smoothing rate for the scalar speed (1/s)
    pub speed_smoothing: f32,
    /// Yaw rate from the turn axis (degrees/s)
    pub rotation_speed: f32,

    // ========================================================================
    // Gravity
    // ========================================================================
    /// Gravitational acceleration (m/s², negative = down)
    pub gravity: f32,
    /// Small negative velocity held while grounded, keeps the ground probe
    /// reliably true through the resolver's contact epsilon
    pub stick_to_ground_speed: f32,

    // ========================================================================
    // Jump
    // ========================================================================
    /// Vertical velocity applied at jump start (m/s)
    pub jump_force: f32,
    /// Wait for the animation cue before applying jump force
    pub use_jump_anim_cue: bool,
    /// Downward ray length for the landing-animation check (meters)
    pub landing_probe_distance: f32,

    // ========================================================================
    // Sliding
    // ========================================================================
    /// Surface angle above which the body slides (degrees)
    pub slide_slope_deg: f32,
    /// Downhill slide speed target (m/s)
    pub slide_speed: f32,
    /// Time for the control factor to traverse its curve (seconds)
    pub slide_slowdown_time: f32,
    /// Control-factor curve over elapsed/slowdown time
    pub slide_curve: SlowdownCurve,
    /// Slide velocity approach rate while on the slope (1/s)
    pub slide_gain_rate: f32,
    /// Slide velocity decay rate once off the slope (1/s)
    pub slide_decay_rate: f32,
    /// Control factor recovery rate once off the slope (1/s)
    pub control_recovery_rate: f32,

    // ========================================================================
    // Dash
    // ========================================================================
    /// Dash displacement speed (m/s)
    pub dash_speed: f32,
    /// Dash duration (seconds)
    pub dash_duration: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            // Dimensions
            capsule_radius: 0.4,
            standing_height: 1.8,
            crouch_height: 1.0,
            overhead_probe_distance: 2.0,

            // Movement
            speed_model: SpeedModel::default(),
            speed_smoothing: 5.0,
            rotation_speed: 180.0,

            // Gravity
            gravity: -9.8,
            stick_to_ground_speed: -3.0,

            // Jump
            jump_force: 5.0,
            use_jump_anim_cue: true,
            landing_probe_distance: 3.0,

            // Sliding
            slide_slope_deg: 45.0,
            slide_speed: 6.0,
            slide_slowdown_time: 2.0,
            slide_curve: SlowdownCurve::default(),
            slide_gain_rate: 3.0,
            slide_decay_rate: 5.0,
            control_recovery_rate: 10.0,

            // Dash
            dash_speed: 7.0,
            dash_duration: 0.2,
        }
    }
}

impl LocomotionConfig {
    /// Half-height of the capsule's cylindrical section for a given total
    /// height (Rapier's `capsule_y` convention).
    pub fn capsule_half_height(&self, total_height: f32) -> f32 {
        (total_height * 0.5 - self.capsule_radius).max(0.0)
    }

    /// Current body height for the stance.
    pub fn height(&self, crouched: bool) -> f32 {
        if crouched {
            self.crouch_height
        } else {
            self.standing_height
        }
    }
}

/// Speed targets per modifier combination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SpeedModel {
    /// Independent forward/side constants; run and crouch override the
    /// forward constant, the side constant stays fixed.
    Directional {
        forward: f32,
        side: f32,
        run_forward: f32,
        crouch_forward: f32,
    },
    /// One smoothed scalar applied to the whole input vector.
    Uniform { walk: f32, run: f32, crouch: f32 },
}

impl Default for SpeedModel {
    fn default() -> Self {
        SpeedModel::Uniform {
            walk: 1.5,
            run: 3.5,
            crouch: 1.0,
        }
    }
}

impl SpeedModel {
    /// Target for the smoothed scalar speed. Crouch wins over run.
    pub fn target_speed(&self, running: bool, crouched: bool) -> f32 {
        match *self {
            SpeedModel::Directional {
                forward,
                run_forward,
                crouch_forward,
                ..
            } => {
                if crouched {
                    crouch_forward
                } else if running {
                    run_forward
                } else {
                    forward
                }
            }
            SpeedModel::Uniform { walk, run, crouch } => {
                if crouched {
                    crouch
                } else if running {
                    run
                } else {
                    walk
                }
            }
        }
    }

    /// Fixed side-speed constant, where the model has one.
    pub fn side_speed(&self) -> Option<f32> {
        match *self {
            SpeedModel::Directional { side, .. } => Some(side),
            SpeedModel::Uniform { .. } => None,
        }
    }

    /// Largest reachable planar speed for this model (test envelope).
    pub fn max_speed(&self) -> f32 {
        match *self {
            SpeedModel::Directional {
                forward,
                side,
                run_forward,
                crouch_forward,
            } => forward.max(side).max(run_forward).max(crouch_forward),
            SpeedModel::Uniform { walk, run, crouch } => walk.max(run).max(crouch),
        }
    }
}

/// Easing kind for `SlowdownCurve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    /// Smoothstep: zero slope at both endpoints
    EaseInOut,
}

/// Control-factor curve: eases from `start` to `end` over normalized time.
///
/// Default reproduces the original ease-in-out 1 → 0 asset: full planar
/// control at slide start, none at the end of the slowdown window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SlowdownCurve {
    pub start: f32,
    pub end: f32,
    pub easing: Easing,
}

impl Default for SlowdownCurve {
    fn default() -> Self {
        Self {
            start: 1.0,
            end: 0.0,
            easing: Easing::EaseInOut,
        }
    }
}

impl SlowdownCurve {
    /// Evaluate at normalized time `t`; input is clamped to [0, 1].
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let k = match self.easing {
            Easing::Linear => t,
            Easing::EaseInOut => t * t * (3.0 - 2.0 * t),
        };
        self.start + (self.end - self.start) * k
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_sane() {
        let config = LocomotionConfig::default();
        assert!(config.capsule_radius > 0.0);
        assert!(config.standing_height > config.crouch_height);
        assert!(config.gravity < 0.0);
        assert!(config.stick_to_ground_speed < 0.0);
    }

    #[test]
    fn test_uniform_target_speed_modifiers() {
        let model = SpeedModel::Uniform {
            walk: 1.5,
            run: 3.5,
            crouch: 1.0,
        };
        assert_eq!(model.target_speed(false, false), 1.5);
        assert_eq!(model.target_speed(true, false), 3.5);
        assert_eq!(model.target_speed(false, true), 1.0);
        // Crouch wins over run
        assert_eq!(model.target_speed(true, true), 1.0);
    }

    #[test]
    fn test_directional_side_speed_fixed() {
        let model = SpeedModel::Directional {
            forward: 5.0,
            side: 2.0,
            run_forward: 8.0,
            crouch_forward: 2.5,
        };
        assert_eq!(model.side_speed(), Some(2.0));
        assert_eq!(model.target_speed(true, false), 8.0);
    }

    #[test]
    fn test_curve_endpoints() {
        let curve = SlowdownCurve::default();
        assert_eq!(curve.evaluate(0.0), 1.0);
        assert_eq!(curve.evaluate(1.0), 0.0);
        // За пределами окна значение зажато
        assert_eq!(curve.evaluate(2.0), 0.0);
        assert_eq!(curve.evaluate(-1.0), 1.0);
    }

    #[test]
    fn test_curve_monotonic() {
        let curve = SlowdownCurve::default();
        let mut prev = curve.evaluate(0.0);
        for i in 1..=20 {
            let v = curve.evaluate(i as f32 / 20.0);
            assert!(v <= prev, "curve must not increase: {} > {}", v, prev);
            prev = v;
        }
    }

    #[test]
    fn test_capsule_half_height() {
        let config = LocomotionConfig::default();
        // total = 2*half + 2*radius
        let half = config.capsule_half_height(config.standing_height);
        assert!((2.0 * half + 2.0 * config.capsule_radius - config.standing_height).abs() < 1e-6);
    }
}
