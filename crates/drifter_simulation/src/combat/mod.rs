//! Melee trigger controller.
//!
//! # Architecture
//!
//! The simulation does not own swing timing — the animation clip does.
//! Attack input raises an animation trigger; the clip's authored cues open
//! and close the weapon hit volume:
//!
//! ```text
//! attack press → AnimationCommand::Trigger(Attack)
//!   ↓ (host plays the clip)
//! AnimationCue::AttackWindowOpen  → WeaponTrigger.enabled = true
//! AnimationCue::AttackWindowClose → WeaponTrigger.enabled = false
//! ```
//!
//! Contacts with dynamic props get a small randomized shove through the
//! deterministic RNG, applied via the Rapier impulse accumulator.

use bevy::prelude::*;
use bevy_rapier3d::prelude::ExternalImpulse;
use rand::Rng;

use crate::animation::{AnimParam, AnimationCommand, AnimationCue, AnimationCueKind};
use crate::components::{InputEdges, PhysicsBody, Player};
use crate::host::CollisionContact;
use crate::DeterministicRng;

/// Melee hit volume window; toggled only by animation cues, starts disabled.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct WeaponTrigger {
    pub enabled: bool,
}

/// System: edge-triggered attack inputs → animation triggers.
pub fn process_attack_input(
    query: Query<(Entity, &InputEdges), With<WeaponTrigger>>,
    mut anim: EventWriter<AnimationCommand>,
) {
    for (entity, edges) in query.iter() {
        if edges.attack_just_pressed {
            anim.write(AnimationCommand::Trigger {
                body: entity,
                param: AnimParam::Attack,
            });
            crate::log(&format!("Attack triggered (body: {:?})", entity));
        }
        if edges.strong_attack_just_pressed {
            anim.write(AnimationCommand::Trigger {
                body: entity,
                param: AnimParam::StrongAttack,
            });
            crate::log(&format!("Strong attack triggered (body: {:?})", entity));
        }
    }
}

/// System: swing cues open/close the weapon window.
pub fn process_combat_cues(
    mut cues: EventReader<AnimationCue>,
    mut query: Query<&mut WeaponTrigger>,
) {
    for cue in cues.read() {
        let Ok(mut trigger) = query.get_mut(cue.body) else {
            continue;
        };
        match cue.kind {
            AnimationCueKind::AttackWindowOpen => {
                trigger.enabled = true;
                crate::log(&format!("Weapon window open (body: {:?})", cue.body));
            }
            AnimationCueKind::AttackWindowClose => {
                trigger.enabled = false;
                crate::log(&format!("Weapon window closed (body: {:?})", cue.body));
            }
            AnimationCueKind::Jump => {}
        }
    }
}

/// System: "moving" animation flag from the composed body speed.
pub fn update_moving_flag(
    query: Query<(Entity, &PhysicsBody), With<Player>>,
    mut anim: EventWriter<AnimationCommand>,
) {
    for (entity, body) in query.iter() {
        anim.write(AnimationCommand::SetBool {
            body: entity,
            param: AnimParam::Moving,
            value: body.velocity.length_squared() > 1.0,
        });
    }
}

/// System: shove dynamic props the character walks into.
///
/// Impulse magnitude drawn from [1, 4) on the seeded RNG, along the
/// character's movement direction at contact.
pub fn push_dynamic_bodies(
    mut contacts: EventReader<CollisionContact>,
    players: Query<(), With<Player>>,
    mut rng: ResMut<DeterministicRng>,
    mut pushed: Query<&mut ExternalImpulse>,
) {
    for contact in contacts.read() {
        if players.get(contact.body).is_err() || !contact.other_dynamic {
            continue;
        }
        let Ok(mut impulse) = pushed.get_mut(contact.other) else {
            continue;
        };

        let force = rng.rng.gen_range(1.0..4.0);
        impulse.impulse += contact.move_direction * force;
    }
}
