//! Animation interface between simulation and the host's animation player.
//!
//! # Architecture
//!
//! **Outbound (ECS → host):**
//! - `AnimationCommand`: parameter writes and one-shot triggers. Parameters
//!   are an explicit enum with a stable string mapping — the host decides
//!   how to hash or bind them, the simulation never deals in raw strings.
//!
//! **Inbound (host → ECS):**
//! - `AnimationCue`: callbacks fired at authored points inside a clip
//!   (jump lift-off frame, weapon swing window). The only async-looking
//!   signal in the simulation, modeled as an event, not a poll.

use bevy::prelude::*;

/// Animator parameters the simulation writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AnimParam {
    /// Local forward speed (float)
    ForwardSpeed,
    /// Local side speed (float)
    SideSpeed,
    /// Crouched stance (bool)
    Crouched,
    /// Body is moving (bool)
    Moving,
    /// Jump start (trigger)
    Jump,
    /// Landing flare (trigger)
    EndJump,
    /// Light attack (trigger)
    Attack,
    /// Strong attack (trigger)
    StrongAttack,
}

impl AnimParam {
    /// Stable name for the host-side binding.
    pub fn name(&self) -> &'static str {
        match self {
            AnimParam::ForwardSpeed => "zSpeed",
            AnimParam::SideSpeed => "xSpeed",
            AnimParam::Crouched => "crouched",
            AnimParam::Moving => "moving",
            AnimParam::Jump => "jump",
            AnimParam::EndJump => "endJump",
            AnimParam::Attack => "attack",
            AnimParam::StrongAttack => "strongAttack",
        }
    }
}

/// Outbound animation write for one body.
#[derive(Event, Debug, Clone, Copy)]
pub enum AnimationCommand {
    SetFloat {
        body: Entity,
        param: AnimParam,
        value: f32,
    },
    SetBool {
        body: Entity,
        param: AnimParam,
        value: bool,
    },
    /// Edge-triggered, fires the parameter once
    Trigger { body: Entity, param: AnimParam },
}

impl AnimationCommand {
    pub fn body(&self) -> Entity {
        match *self {
            AnimationCommand::SetFloat { body, .. }
            | AnimationCommand::SetBool { body, .. }
            | AnimationCommand::Trigger { body, .. } => body,
        }
    }
}

/// Inbound animation-event callback from the host's animation player.
#[derive(Event, Debug, Clone, Copy)]
pub struct AnimationCue {
    pub body: Entity,
    pub kind: AnimationCueKind,
}

/// Which authored clip event fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum AnimationCueKind {
    /// Lift-off frame of the jump clip — the physical impulse applies here
    Jump,
    /// Weapon swing reaches the damaging arc
    AttackWindowOpen,
    /// Weapon swing leaves the damaging arc
    AttackWindowClose,
}
