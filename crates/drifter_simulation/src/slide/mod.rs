//! Slope sliding: steep-surface detection + control-factor curve.
//!
//! Each tick the grounded probe is re-judged from scratch: surface angle
//! above the threshold means sliding, below means not. Losing ground contact
//! leaves the judgement (and the running timer) as last computed until the
//! next grounded probe — dropping off a slope mid-slide does not snap
//! control back.

use bevy::math::FloatExt;
use bevy::prelude::*;

use crate::components::GroundProbe;
use crate::config::LocomotionConfig;
use crate::dash::DashState;

/// Slide state of one walking body.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct SlideState {
    pub sliding: bool,
    /// Downhill velocity contribution (m/s, world space)
    pub slide_velocity: Vec3,
    /// Time spent sliding (seconds); resets on gentle ground
    pub slide_timer: f32,
    /// Planar-control multiplier in [0, 1]; 1 = full player control
    pub control_factor: f32,
}

impl Default for SlideState {
    fn default() -> Self {
        Self {
            sliding: false,
            slide_velocity: Vec3::ZERO,
            slide_timer: 0.0,
            control_factor: 1.0,
        }
    }
}

/// Downhill direction on a surface: projection of "down" onto its plane.
pub fn downhill_direction(surface_normal: Vec3) -> Vec3 {
    (Vec3::NEG_Y - surface_normal * Vec3::NEG_Y.dot(surface_normal)).normalize_or_zero()
}

/// System: slope judgement, slide velocity, control factor.
pub fn update_slide(
    mut query: Query<(
        Entity,
        &GroundProbe,
        &LocomotionConfig,
        &DashState,
        &mut SlideState,
    )>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, probe, config, dash, mut slide) in query.iter_mut() {
        if dash.active {
            continue;
        }

        let mut target = Vec3::ZERO;
        if probe.grounded {
            let angle = probe.surface_angle_deg();
            if angle > config.slide_slope_deg {
                if !slide.sliding {
                    crate::log(&format!(
                        "Slide start (body: {:?}, surface angle: {:.1} deg)",
                        entity, angle
                    ));
                }
                slide.sliding = true;
                target = downhill_direction(probe.surface_normal) * config.slide_speed;
            } else {
                if slide.sliding {
                    crate::log(&format!("Slide end (body: {:?})", entity));
                }
                slide.sliding = false;
                slide.slide_timer = 0.0;
            }
        }

        if slide.sliding {
            slide.slide_timer += delta;
        }

        // Подход к цели на склоне медленнее, чем затухание вне склона
        let (toward, rate) = if slide.sliding {
            (target, config.slide_gain_rate)
        } else {
            (Vec3::ZERO, config.slide_decay_rate)
        };
        slide.slide_velocity = slide.slide_velocity.lerp(toward, rate * delta);

        slide.control_factor = if slide.sliding {
            config
                .slide_curve
                .evaluate((slide.slide_timer / config.slide_slowdown_time).clamp(0.0, 1.0))
        } else {
            slide
                .control_factor
                .lerp(1.0, config.control_recovery_rate * delta)
        };
    }
}
