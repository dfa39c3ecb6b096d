//! Per-tick input snapshot.
//!
//! The host (client input system, headless script, tests) writes one
//! `MoveInput` per body before the fixed tick runs; simulation systems treat
//! it as immutable for the duration of the tick. Buttons arrive as raw axis
//! values — anything ≥ 0.5 reads as pressed, so both digital keys and analog
//! triggers work without remapping.

use bevy::prelude::*;

/// Axis value above which a button-like input counts as pressed.
pub const PRESS_THRESHOLD: f32 = 0.5;

/// Input snapshot for one simulated body.
///
/// For the character: `axes` = side/forward movement, `turn` = yaw,
/// `lift` unused. For the drone: `axes.y` = thrust, `axes.x` = yaw,
/// `lift` = vertical thrust keys.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MoveInput {
    /// Planar axes, each in [-1, 1] (x = side, y = forward)
    pub axes: Vec2,
    /// Yaw axis in [-1, 1]
    pub turn: f32,
    /// Drone lift axis in [-1, 1]
    pub lift: f32,
    pub run: f32,
    pub crouch: f32,
    pub jump: f32,
    pub dash: f32,
    pub attack: f32,
    pub strong_attack: f32,
}

impl MoveInput {
    /// Planar axes with combined magnitude clamped to 1, so diagonal input
    /// is not faster than a single axis.
    pub fn clamped_axes(&self) -> Vec2 {
        if self.axes.length_squared() > 1.0 {
            self.axes.normalize()
        } else {
            self.axes
        }
    }

    pub fn run_pressed(&self) -> bool {
        self.run >= PRESS_THRESHOLD
    }

    pub fn crouch_pressed(&self) -> bool {
        self.crouch >= PRESS_THRESHOLD
    }

    pub fn jump_pressed(&self) -> bool {
        self.jump >= PRESS_THRESHOLD
    }

    pub fn dash_pressed(&self) -> bool {
        self.dash >= PRESS_THRESHOLD
    }

    pub fn attack_pressed(&self) -> bool {
        self.attack >= PRESS_THRESHOLD
    }

    pub fn strong_attack_pressed(&self) -> bool {
        self.strong_attack >= PRESS_THRESHOLD
    }
}

/// Edge detection over `MoveInput` buttons.
///
/// Dash and the attack triggers are edge-triggered: they must fire once per
/// press, not every tick the button is held. `latch_input_edges` runs first
/// in the fixed-tick chain and compares against the previous tick's sample.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct InputEdges {
    pub jump_just_pressed: bool,
    pub dash_just_pressed: bool,
    pub attack_just_pressed: bool,
    pub strong_attack_just_pressed: bool,

    prev_jump: bool,
    prev_dash: bool,
    prev_attack: bool,
    prev_strong_attack: bool,
}

/// System: latch button edges for this tick.
///
/// Runs before every consumer of `InputEdges` in the FixedUpdate chain.
pub fn latch_input_edges(mut query: Query<(&MoveInput, &mut InputEdges)>) {
    for (input, mut edges) in query.iter_mut() {
        let jump = input.jump_pressed();
        let dash = input.dash_pressed();
        let attack = input.attack_pressed();
        let strong = input.strong_attack_pressed();

        edges.jump_just_pressed = jump && !edges.prev_jump;
        edges.dash_just_pressed = dash && !edges.prev_dash;
        edges.attack_just_pressed = attack && !edges.prev_attack;
        edges.strong_attack_just_pressed = strong && !edges.prev_strong_attack;

        edges.prev_jump = jump;
        edges.prev_dash = dash;
        edges.prev_attack = attack;
        edges.prev_strong_attack = strong;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_input_clamped() {
        let input = MoveInput {
            axes: Vec2::new(1.0, 1.0),
            ..default()
        };
        let clamped = input.clamped_axes();
        assert!((clamped.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_deflection_preserved() {
        // Стик наполовину — магнитуду не трогаем
        let input = MoveInput {
            axes: Vec2::new(0.3, 0.4),
            ..default()
        };
        assert_eq!(input.clamped_axes(), Vec2::new(0.3, 0.4));
    }

    #[test]
    fn test_press_threshold() {
        let input = MoveInput {
            jump: 0.49,
            run: 0.5,
            ..default()
        };
        assert!(!input.jump_pressed());
        assert!(input.run_pressed());
    }

    #[test]
    fn test_edge_latch_fires_once_per_press() {
        let mut edges = InputEdges::default();
        let pressed = MoveInput {
            dash: 1.0,
            ..default()
        };
        let released = MoveInput::default();

        // Прямой вызов логики без App schedule
        let latch = |input: &MoveInput, edges: &mut InputEdges| {
            let dash = input.dash_pressed();
            edges.dash_just_pressed = dash && !edges.prev_dash;
            edges.prev_dash = dash;
        };

        latch(&pressed, &mut edges);
        assert!(edges.dash_just_pressed);

        latch(&pressed, &mut edges);
        assert!(!edges.dash_just_pressed, "held button must not re-trigger");

        latch(&released, &mut edges);
        latch(&pressed, &mut edges);
        assert!(edges.dash_just_pressed, "re-press after release triggers again");
    }
}
