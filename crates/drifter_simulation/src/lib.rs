//! DRIFTER Simulation Core
//!
//! Frame-synchronous character simulation на Bevy ECS: third-person
//! locomotion (walk/run/crouch/dash/jump/slide), drone flight, melee
//! trigger controller.
//!
//! HYBRID ARCHITECTURE:
//! - ECS = simulation layer (velocities, state machines, animation params)
//! - Host = tactical layer (collision resolution, animation playback,
//!   rendering); общается событиями и probe-снапшотами
//!
//! Rapier несёт capsule коллайдеры и зеркало Velocity; интеграция позиции —
//! наша, один displacement за тик.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod animation;
pub mod collision;
pub mod combat;
pub mod components;
pub mod config;
pub mod dash;
pub mod drone;
pub mod host;
pub mod jump;
pub mod locomotion;
pub mod logger;
pub mod slide;

// Re-export базовых типов для удобства
pub use animation::{AnimParam, AnimationCommand, AnimationCue, AnimationCueKind};
pub use combat::WeaponTrigger;
pub use components::*;
pub use config::{
    ConfigLoadError, DroneConfig, Easing, LocomotionConfig, SlowdownCurve, SpeedModel,
};
pub use dash::DashState;
pub use drone::{spawn_drone, Drone, DroneState};
pub use host::{CollisionContact, ContactFlags, SyntheticWorldPlugin};
pub use jump::JumpPhase;
pub use locomotion::{spawn_player_character, LocomotionState};
pub use logger::*;
pub use slide::SlideState;

/// Частота симуляции (FixedUpdate)
pub const SIMULATION_HZ: f64 = 60.0;

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Системы выполняются одной цепочкой в FixedUpdate — порядок тотальный,
/// ввод сэмплируется один раз в начале, displacement применяется один раз
/// в конце.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            // Детерминистичный RNG: не затираем seed, если хост уже вставил свой
            .init_resource::<DeterministicRng>()
            .add_event::<AnimationCommand>()
            .add_event::<AnimationCue>()
            .add_event::<CollisionContact>()
            .add_systems(
                FixedUpdate,
                (
                    // Фаза 1: ввод + velocity вклады персонажа
                    (
                        components::latch_input_edges,
                        locomotion::update_planar_velocity,
                        jump::process_jump_input,
                        jump::process_jump_cues,
                        jump::update_jump_phase,
                        locomotion::apply_gravity,
                        slide::update_slide,
                        locomotion::apply_yaw,
                        locomotion::update_crouch,
                    )
                        .chain(),
                    // Фаза 2: дрон + combat
                    (
                        drone::update_drone_flight,
                        drone::process_drone_contacts,
                        combat::process_attack_input,
                        combat::process_combat_cues,
                        combat::push_dynamic_bodies,
                    )
                        .chain(),
                    // Фаза 3: композиция и интеграция displacement
                    (
                        locomotion::compose_total_velocity,
                        combat::update_moving_flag,
                        locomotion::sync_velocity_to_rapier,
                        locomotion::integrate_velocity,
                        dash::process_dash_input,
                        dash::tick_dash,
                    )
                        .chain(),
                )
                    .chain(),
            );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Шаг времени ручной: ровно один FixedUpdate на app.update(), иначе тесты
/// зависят от wall-clock машины.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / SIMULATION_HZ,
        )));

    app
}

/// Снимок компонентов мира для сравнения детерминизма
///
/// Сортировка по Entity ID, сериализация через Debug — достаточно для
/// побайтового сравнения прогонов.
pub fn world_snapshot<T: Component + std::fmt::Debug>(world: &mut World) -> String {
    use std::fmt::Write;

    let mut query = world.query::<(Entity, &T)>();
    let mut entries: Vec<_> = query.iter(world).collect();
    entries.sort_by_key(|(entity, _)| entity.index());

    let mut snapshot = String::new();
    for (entity, component) in entries {
        let _ = writeln!(snapshot, "{} {:?}", entity.index(), component);
    }
    snapshot
}
