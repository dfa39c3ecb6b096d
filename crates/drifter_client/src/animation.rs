//! Animation-player stand-in.
//!
//! A real host fires `AnimationCue`s from authored frames inside its clips.
//! The sandbox has no clips, so this plugin echoes cues back on fixed delays
//! after the simulation raises a trigger:
//!
//! - Trigger(Jump)   → Cue(Jump) after 0.15 s (lift-off frame)
//! - Trigger(Attack) → Cue(AttackWindowOpen) after 0.2 s,
//!                     Cue(AttackWindowClose) after 0.4 s

use bevy::prelude::*;

use drifter_simulation::{AnimParam, AnimationCommand, AnimationCue, AnimationCueKind};

const JUMP_CUE_DELAY: f32 = 0.15;
const ATTACK_WINDOW_OPEN: f32 = 0.2;
const ATTACK_WINDOW_CLOSE: f32 = 0.4;

/// A cue scheduled to fire after a delay.
struct PendingCue {
    body: Entity,
    kind: AnimationCueKind,
    remaining: f32,
}

#[derive(Resource, Default)]
struct CueQueue(Vec<PendingCue>);

pub struct AnimationStubPlugin;

impl Plugin for AnimationStubPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CueQueue>()
            .add_systems(Update, (schedule_cues, fire_due_cues).chain());
    }
}

/// Watch simulation triggers, schedule the matching cues.
fn schedule_cues(mut commands_reader: EventReader<AnimationCommand>, mut queue: ResMut<CueQueue>) {
    for command in commands_reader.read() {
        let &AnimationCommand::Trigger { body, param } = command else {
            continue;
        };
        match param {
            AnimParam::Jump => queue.0.push(PendingCue {
                body,
                kind: AnimationCueKind::Jump,
                remaining: JUMP_CUE_DELAY,
            }),
            AnimParam::Attack | AnimParam::StrongAttack => {
                queue.0.push(PendingCue {
                    body,
                    kind: AnimationCueKind::AttackWindowOpen,
                    remaining: ATTACK_WINDOW_OPEN,
                });
                queue.0.push(PendingCue {
                    body,
                    kind: AnimationCueKind::AttackWindowClose,
                    remaining: ATTACK_WINDOW_CLOSE,
                });
            }
            _ => {}
        }
    }
}

/// Tick delays, emit due cues into the simulation.
fn fire_due_cues(
    mut queue: ResMut<CueQueue>,
    mut cues: EventWriter<AnimationCue>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    queue.0.retain_mut(|pending| {
        pending.remaining -= delta;
        if pending.remaining <= 0.0 {
            cues.write(AnimationCue {
                body: pending.body,
                kind: pending.kind,
            });
            false
        } else {
            true
        }
    });
}
