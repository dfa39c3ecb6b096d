//! Jump state machine.
//!
//! # Phases
//!
//! ```text
//! Grounded → AwaitingAnimCue → Ascending → Descending → Landed → Grounded
//!     └──────────────────────────↑ (immediate mode skips the cue wait)
//! ```
//!
//! Jump force is applied at exactly one transition per cycle: at input time
//! in immediate mode, at the clip's lift-off cue otherwise — decoupling the
//! physical impulse from input timing so it matches the animation. The
//! landing flare fires once from the downward probe while still descending;
//! the cycle closes on ground contact.

use bevy::prelude::*;

use crate::animation::{AnimParam, AnimationCommand, AnimationCue, AnimationCueKind};
use crate::components::{GroundProbe, MoveInput};
use crate::config::LocomotionConfig;
use crate::dash::DashState;
use crate::locomotion::LocomotionState;
use crate::slide::SlideState;

/// Jump cycle phase of one walking body.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub enum JumpPhase {
    /// Not jumping; the only phase that accepts jump input
    #[default]
    Grounded,
    /// Jump triggered, waiting for the clip's lift-off cue
    AwaitingAnimCue,
    Ascending,
    Descending,
    /// Landing flare fired, waiting for ground contact
    Landed,
}

/// The single place jump force is applied.
///
/// Сброс slide-таймера на полное окно — намеренно: приземление с прыжка на
/// крутой склон начинается с конечной точки кривой (без planar контроля).
fn apply_jump_force(config: &LocomotionConfig, state: &mut LocomotionState, slide: &mut SlideState) {
    state.vertical_velocity = config.jump_force;
    slide.slide_timer = config.slide_slowdown_time;
}

/// System: jump initiation.
///
/// Gated on ground contact, not sliding, and the Grounded phase — while a
/// previous jump's cue is pending, input is ignored (re-entrancy guard).
pub fn process_jump_input(
    mut query: Query<(
        Entity,
        &MoveInput,
        &GroundProbe,
        &LocomotionConfig,
        &DashState,
        &mut JumpPhase,
        &mut LocomotionState,
        &mut SlideState,
    )>,
    mut anim: EventWriter<AnimationCommand>,
) {
    for (entity, input, probe, config, dash, mut phase, mut state, mut slide) in query.iter_mut() {
        if dash.active {
            continue;
        }
        if *phase != JumpPhase::Grounded {
            continue;
        }
        if !input.jump_pressed() || !probe.grounded || slide.sliding {
            continue;
        }

        anim.write(AnimationCommand::Trigger {
            body: entity,
            param: AnimParam::Jump,
        });

        if config.use_jump_anim_cue {
            *phase = JumpPhase::AwaitingAnimCue;
            crate::log(&format!("Jump triggered, awaiting cue (body: {:?})", entity));
        } else {
            apply_jump_force(config, &mut state, &mut slide);
            *phase = JumpPhase::Ascending;
            crate::log(&format!("Jump started (body: {:?})", entity));
        }
    }
}

/// System: lift-off cues from the animation player.
///
/// Only a body in AwaitingAnimCue consumes the cue; stray cues are no-ops.
pub fn process_jump_cues(
    mut cues: EventReader<AnimationCue>,
    mut query: Query<(
        &LocomotionConfig,
        &mut JumpPhase,
        &mut LocomotionState,
        &mut SlideState,
    )>,
) {
    for cue in cues.read() {
        if cue.kind != AnimationCueKind::Jump {
            continue;
        }
        let Ok((config, mut phase, mut state, mut slide)) = query.get_mut(cue.body) else {
            continue;
        };
        if *phase != JumpPhase::AwaitingAnimCue {
            continue;
        }

        apply_jump_force(config, &mut state, &mut slide);
        *phase = JumpPhase::Ascending;
        crate::log(&format!("Jump cue fired, ascending (body: {:?})", cue.body));
    }
}

/// System: descent tracking, landing flare, cycle close.
pub fn update_jump_phase(
    mut query: Query<(
        Entity,
        &GroundProbe,
        &LocomotionConfig,
        &mut JumpPhase,
        &mut LocomotionState,
    )>,
    mut anim: EventWriter<AnimationCommand>,
) {
    for (entity, probe, config, mut phase, mut state) in query.iter_mut() {
        match *phase {
            JumpPhase::Ascending => {
                if state.vertical_velocity < 0.0 {
                    *phase = JumpPhase::Descending;
                }
            }
            JumpPhase::Descending => {
                let near_ground = probe
                    .below_hit_distance
                    .is_some_and(|d| d <= config.landing_probe_distance);
                if near_ground {
                    *phase = JumpPhase::Landed;
                    anim.write(AnimationCommand::Trigger {
                        body: entity,
                        param: AnimParam::EndJump,
                    });
                    crate::log(&format!("Landing flare (body: {:?})", entity));
                }
            }
            JumpPhase::Landed => {
                if probe.grounded && state.vertical_velocity < 0.0 {
                    *phase = JumpPhase::Grounded;
                    state.vertical_velocity = config.stick_to_ground_speed;
                    crate::log(&format!("Landed (body: {:?})", entity));
                }
            }
            JumpPhase::Grounded | JumpPhase::AwaitingAnimCue => {}
        }
    }
}
