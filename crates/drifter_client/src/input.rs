//! Keyboard/mouse → per-tick MoveInput snapshots.
//!
//! Flow:
//! 1. Update system samples Bevy input every render frame
//! 2. The snapshot lands on the controlled body's `MoveInput`
//! 3. FixedUpdate simulation systems read it as an immutable sample
//!
//! Tab switches control between the character and the drone; the idle body
//! gets a zeroed snapshot so it coasts to a stop.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;

use drifter_simulation::MoveInput;

/// Which simulation bodies the client steers.
#[derive(Resource)]
pub struct ControlledBodies {
    pub player: Entity,
    pub drone: Entity,
    pub drone_active: bool,
}

pub struct PlayerInputPlugin;

impl Plugin for PlayerInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (switch_controlled_body, sample_input).chain());
    }
}

/// Tab toggles character ↔ drone control.
fn switch_controlled_body(
    keyboard: Res<ButtonInput<KeyCode>>,
    bodies: Option<ResMut<ControlledBodies>>,
) {
    let Some(mut bodies) = bodies else {
        return;
    };
    if keyboard.just_pressed(KeyCode::Tab) {
        bodies.drone_active = !bodies.drone_active;
        drifter_simulation::log_info(if bodies.drone_active {
            "Control: drone"
        } else {
            "Control: character"
        });
    }
}

/// Sample keyboard/mouse into the controlled body's MoveInput.
fn sample_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    bodies: Option<Res<ControlledBodies>>,
    mut inputs: Query<&mut MoveInput>,
) {
    let Some(bodies) = bodies else {
        return;
    };

    let mut axes = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        axes.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        axes.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        axes.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        axes.x -= 1.0;
    }

    // Mouse X → turn axis, примерно [-1, 1]
    let mut turn = 0.0;
    for motion in mouse_motion.read() {
        turn += motion.delta.x * 0.1;
    }
    let turn = turn.clamp(-1.0, 1.0);

    let pressed = |key: KeyCode| if keyboard.pressed(key) { 1.0 } else { 0.0 };

    let snapshot = if bodies.drone_active {
        // Drone: yaw на стике, lift на клавишах. Клавиша подъёма подаёт -1 —
        // сырое значение для инвертированной схемы знаков дрона.
        let mut lift = 0.0;
        if keyboard.pressed(KeyCode::Space) {
            lift = -1.0;
        }
        if keyboard.pressed(KeyCode::ControlLeft) {
            lift = 1.0;
        }
        MoveInput {
            axes,
            lift,
            ..default()
        }
    } else {
        MoveInput {
            axes,
            turn,
            run: pressed(KeyCode::ShiftLeft),
            crouch: pressed(KeyCode::ControlLeft),
            jump: pressed(KeyCode::Space),
            dash: pressed(KeyCode::KeyF),
            attack: if mouse_buttons.pressed(MouseButton::Left) {
                1.0
            } else {
                0.0
            },
            strong_attack: if mouse_buttons.pressed(MouseButton::Right) {
                1.0
            } else {
                0.0
            },
            ..default()
        }
    };

    let (active, idle) = if bodies.drone_active {
        (bodies.drone, bodies.player)
    } else {
        (bodies.player, bodies.drone)
    };

    if let Ok(mut input) = inputs.get_mut(active) {
        *input = snapshot;
    }
    if let Ok(mut input) = inputs.get_mut(idle) {
        *input = MoveInput::default();
    }
}
