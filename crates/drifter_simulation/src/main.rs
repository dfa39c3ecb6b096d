//! Headless симуляция DRIFTER
//!
//! Запускает Bevy App без рендера: синтетический плоский мир, скриптованный
//! ввод (ходьба → спринт → прыжок), позиции в консоль.

use bevy::prelude::*;
use drifter_simulation::{
    create_headless_app, spawn_player_character, LocomotionConfig, LocomotionState, MoveInput,
    SimulationPlugin, SyntheticWorldPlugin,
};

fn main() {
    println!("Starting DRIFTER headless simulation");

    let mut app = create_headless_app(42);
    app.add_plugins((SimulationPlugin, SyntheticWorldPlugin));

    // Immediate jump mode: в headless нет анимационного слоя, cue некому слать
    let config = LocomotionConfig {
        use_jump_anim_cue: false,
        ..Default::default()
    };
    let player = {
        let mut commands = app.world_mut().commands();
        spawn_player_character(&mut commands, Vec3::ZERO, config)
    };
    // Первый update применяет отложенный spawn
    app.update();

    for tick in 0..600u32 {
        {
            let mut input = app
                .world_mut()
                .get_mut::<MoveInput>(player)
                .expect("player has MoveInput");
            input.axes = Vec2::new(0.0, 1.0);
            input.run = if tick >= 300 { 1.0 } else { 0.0 };
            input.jump = if tick == 450 { 1.0 } else { 0.0 };
        }

        app.update();

        if tick % 100 == 0 {
            let transform = app
                .world()
                .get::<Transform>(player)
                .expect("player has Transform");
            let state = app
                .world()
                .get::<LocomotionState>(player)
                .expect("player has LocomotionState");
            println!(
                "Tick {}: position {:?}, speed {:.2} m/s",
                tick, transform.translation, state.current_speed
            );
        }
    }

    println!("Simulation complete!");
}
