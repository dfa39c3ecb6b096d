//! Player locomotion integration tests
//!
//! Headless app + синтетический плоский мир; ввод скриптуется по тикам.
//! Где нужен наклонный/заблокированный probe — мир без synthetic plugin,
//! probe задаётся руками.

use bevy::prelude::*;
use drifter_simulation::*;

const WALK: f32 = 1.5;
const RUN: f32 = 3.5;
const CROUCH: f32 = 1.0;

/// Headless app + плоский мир + игрок
fn create_flat_world(config: LocomotionConfig) -> (App, Entity) {
    let mut app = create_headless_app(42);
    app.add_plugins((SimulationPlugin, SyntheticWorldPlugin));

    let player = {
        let mut commands = app.world_mut().commands();
        spawn_player_character(&mut commands, Vec3::ZERO, config)
    };
    // Применяем отложенный spawn + пара тиков на осадку
    for _ in 0..3 {
        app.update();
    }
    (app, player)
}

/// Headless app без synthetic мира: probe полностью под контролем теста
fn create_probe_world(config: LocomotionConfig) -> (App, Entity) {
    let mut app = create_headless_app(42);
    app.add_plugins(SimulationPlugin);

    let player = {
        let mut commands = app.world_mut().commands();
        spawn_player_character(&mut commands, Vec3::ZERO, config)
    };
    app.update();

    // По умолчанию: стоим на плоской земле
    set_probe(&mut app, player, |p| {
        p.grounded = true;
        p.surface_normal = Vec3::Y;
        p.below_hit_distance = Some(0.0);
        p.overhead_clear = true;
    });
    for _ in 0..2 {
        app.update();
    }
    (app, player)
}

fn set_input(app: &mut App, entity: Entity, f: impl FnOnce(&mut MoveInput)) {
    let mut input = app
        .world_mut()
        .get_mut::<MoveInput>(entity)
        .expect("body has MoveInput");
    f(&mut input);
}

fn set_probe(app: &mut App, entity: Entity, f: impl FnOnce(&mut GroundProbe)) {
    let mut probe = app
        .world_mut()
        .get_mut::<GroundProbe>(entity)
        .expect("body has GroundProbe");
    f(&mut probe);
}

fn locomotion(app: &App, entity: Entity) -> LocomotionState {
    *app.world()
        .get::<LocomotionState>(entity)
        .expect("body has LocomotionState")
}

fn translation(app: &App, entity: Entity) -> Vec3 {
    app.world()
        .get::<Transform>(entity)
        .expect("body has Transform")
        .translation
}

#[test]
fn test_walk_speed_envelope_diagonal() {
    let (mut app, player) = create_flat_world(LocomotionConfig::default());

    set_input(&mut app, player, |i| i.axes = Vec2::new(1.0, 1.0));

    for tick in 0..600 {
        app.update();
        let planar = locomotion(&app, player).planar_velocity.length();
        assert!(
            planar <= WALK + 1e-3,
            "tick {}: planar speed {} exceeded walk envelope {}",
            tick,
            planar,
            WALK
        );
    }

    // После сходимости диагональ даёт ровно walk speed, не sqrt(2)×
    let planar = locomotion(&app, player).planar_velocity.length();
    assert!(
        (planar - WALK).abs() < 0.05,
        "converged diagonal speed {} != walk speed {}",
        planar,
        WALK
    );
}

#[test]
fn test_run_speed_envelope() {
    let (mut app, player) = create_flat_world(LocomotionConfig::default());

    set_input(&mut app, player, |i| {
        i.axes = Vec2::new(0.0, 1.0);
        i.run = 1.0;
    });

    for tick in 0..600 {
        app.update();
        let planar = locomotion(&app, player).planar_velocity.length();
        assert!(
            planar <= RUN + 1e-3,
            "tick {}: planar speed {} exceeded run envelope",
            tick,
            planar
        );
    }
    let planar = locomotion(&app, player).planar_velocity.length();
    assert!((planar - RUN).abs() < 0.05);

    // Отпустили run — скорость спадает обратно к walk
    set_input(&mut app, player, |i| i.run = 0.0);
    for _ in 0..600 {
        app.update();
    }
    let planar = locomotion(&app, player).planar_velocity.length();
    assert!((planar - WALK).abs() < 0.05);
}

#[test]
fn test_immediate_jump_full_arc() {
    let config = LocomotionConfig {
        use_jump_anim_cue: false,
        ..Default::default()
    };
    let stick = config.stick_to_ground_speed;
    let (mut app, player) = create_flat_world(config);

    set_input(&mut app, player, |i| i.jump = 1.0);
    app.update();
    set_input(&mut app, player, |i| i.jump = 0.0);

    // Полная дуга: подъём, спуск, посадка
    let mut max_height = 0.0f32;
    for _ in 0..300 {
        app.update();
        max_height = max_height.max(translation(&app, player).y);
    }

    // Теоретический апекс v²/2g ≈ 1.27 m
    assert!(
        max_height > 1.0 && max_height < 1.6,
        "jump apex {} out of expected range",
        max_height
    );

    let phase = *app
        .world()
        .get::<JumpPhase>(player)
        .expect("body has JumpPhase");
    assert_eq!(phase, JumpPhase::Grounded, "jump cycle must close");
    assert_eq!(locomotion(&app, player).vertical_velocity, stick);
    assert!(translation(&app, player).y.abs() < 1e-3);
}

#[test]
fn test_dash_overrides_locomotion() {
    let config = LocomotionConfig::default();
    let dash_step = config.dash_speed / 60.0;
    let walk_step = WALK / 60.0;
    let (mut app, player) = create_flat_world(config);

    // Разгоняемся до walk
    set_input(&mut app, player, |i| i.axes = Vec2::new(0.0, 1.0));
    for _ in 0..300 {
        app.update();
    }

    // Edge: одно нажатие dash
    set_input(&mut app, player, |i| i.dash = 1.0);
    app.update();
    set_input(&mut app, player, |i| i.dash = 0.0);

    let mut dash_ticks = 0;
    let mut dash_dir: Option<Vec3> = None;
    let mut prev = translation(&app, player);

    for _ in 0..60 {
        app.update();
        let now = translation(&app, player);
        let step = now - prev;
        prev = now;

        if step.length() > (walk_step + dash_step) * 0.5 {
            dash_ticks += 1;
            // Направление неизменно на всём протяжении dash
            let dir = step.normalize();
            match dash_dir {
                None => dash_dir = Some(dir),
                Some(first) => assert!(
                    first.dot(dir) > 0.999,
                    "dash direction drifted: {:?} vs {:?}",
                    first,
                    dir
                ),
            }
            assert!(
                (step.length() - dash_step).abs() < dash_step * 0.1,
                "dash step {} != expected {}",
                step.length(),
                dash_step
            );
        }
    }

    // 0.2 s при 60 Hz — ровно окно дача, ни тиком раньше
    assert!(
        (11..=13).contains(&dash_ticks),
        "dash lasted {} ticks, expected ~12",
        dash_ticks
    );

    // Контроль вернулся интегратору
    let planar = locomotion(&app, player).planar_velocity.length();
    assert!(planar <= WALK + 1e-3);
}

#[test]
fn test_crouch_blocked_overhead() {
    let (mut app, player) = create_probe_world(LocomotionConfig::default());

    set_input(&mut app, player, |i| {
        i.axes = Vec2::new(0.0, 1.0);
        i.crouch = 1.0;
    });
    for _ in 0..300 {
        app.update();
    }

    let state = locomotion(&app, player);
    assert!(state.crouched);
    assert!(
        (state.current_speed - CROUCH).abs() < 0.05,
        "crouched speed {} != crouch target",
        state.current_speed
    );

    // Отпускаем crouch под низким потолком — встать нельзя
    set_probe(&mut app, player, |p| p.overhead_clear = false);
    set_input(&mut app, player, |i| i.crouch = 0.0);
    for _ in 0..120 {
        app.update();
        assert!(
            locomotion(&app, player).crouched,
            "body stood up under a blocked ceiling"
        );
    }

    // Потолок освободился — встаём на следующем же тике
    set_probe(&mut app, player, |p| p.overhead_clear = true);
    app.update();
    assert!(!locomotion(&app, player).crouched);
}

#[test]
fn test_slide_on_steep_slope() {
    let config = LocomotionConfig::default();
    let slowdown_ticks = (config.slide_slowdown_time * 60.0) as usize;
    let (mut app, player) = create_probe_world(config);

    let steep = Vec3::new(60f32.to_radians().sin(), 60f32.to_radians().cos(), 0.0);
    set_probe(&mut app, player, |p| p.surface_normal = steep);

    let slide_state = |app: &App| -> SlideState {
        *app.world()
            .get::<SlideState>(player)
            .expect("body has SlideState")
    };

    // Фактор монотонно следует кривой и достигает конца окна
    let mut prev_factor = slide_state(&app).control_factor;
    for _ in 0..slowdown_ticks {
        app.update();
        let slide = slide_state(&app);
        assert!(slide.sliding);
        assert!(
            slide.control_factor <= prev_factor + 1e-4,
            "control factor increased mid-slide"
        );
        prev_factor = slide.control_factor;
    }
    let slide = slide_state(&app);
    assert!(
        slide.control_factor < 0.01,
        "factor {} must reach the curve endpoint",
        slide.control_factor
    );

    // Slide velocity направлена вниз по склону (+x, -y) и близка к цели
    assert!(slide.slide_velocity.x > 0.0);
    assert!(slide.slide_velocity.y < 0.0);
    assert!(slide.slide_velocity.length() > 5.0);

    // Пологая земля: судим заново — скольжение кончилось, контроль вернулся
    set_probe(&mut app, player, |p| p.surface_normal = Vec3::Y);
    for _ in 0..120 {
        app.update();
    }
    let slide = slide_state(&app);
    assert!(!slide.sliding);
    assert_eq!(slide.slide_timer, 0.0);
    assert!(slide.control_factor > 0.95);
    assert!(slide.slide_velocity.length() < 0.1);
}

#[test]
fn test_jump_blocked_while_sliding() {
    let config = LocomotionConfig {
        use_jump_anim_cue: false,
        ..Default::default()
    };
    let (mut app, player) = create_probe_world(config);

    let steep = Vec3::new(60f32.to_radians().sin(), 60f32.to_radians().cos(), 0.0);
    set_probe(&mut app, player, |p| p.surface_normal = steep);
    for _ in 0..10 {
        app.update();
    }

    set_input(&mut app, player, |i| i.jump = 1.0);
    app.update();

    let phase = *app
        .world()
        .get::<JumpPhase>(player)
        .expect("body has JumpPhase");
    assert_eq!(phase, JumpPhase::Grounded, "sliding must gate jump input");
}

#[test]
fn test_attack_trigger_and_weapon_window() {
    let (mut app, player) = create_flat_world(LocomotionConfig::default());

    // Edge нажатия атаки → один Trigger(Attack)
    set_input(&mut app, player, |i| i.attack = 1.0);
    app.update();

    let events = app.world().resource::<Events<AnimationCommand>>();
    let mut cursor = events.get_cursor();
    let attack_triggers = cursor
        .read(events)
        .filter(|command| {
            matches!(
                command,
                AnimationCommand::Trigger {
                    param: AnimParam::Attack,
                    ..
                }
            )
        })
        .count();
    assert_eq!(attack_triggers, 1);

    // Удержание кнопки не перезапускает триггер
    app.update();
    let events = app.world().resource::<Events<AnimationCommand>>();
    let mut cursor = events.get_cursor();
    let total: usize = cursor
        .read(events)
        .filter(|command| {
            matches!(
                command,
                AnimationCommand::Trigger {
                    param: AnimParam::Attack,
                    ..
                }
            )
        })
        .count();
    assert!(total <= 1, "held attack re-triggered");

    // Окно оружия открывается и закрывается только по cue
    let trigger = |app: &App| {
        app.world()
            .get::<WeaponTrigger>(player)
            .expect("body has WeaponTrigger")
            .enabled
    };
    assert!(!trigger(&app));

    app.world_mut().send_event(AnimationCue {
        body: player,
        kind: AnimationCueKind::AttackWindowOpen,
    });
    app.update();
    assert!(trigger(&app));

    app.world_mut().send_event(AnimationCue {
        body: player,
        kind: AnimationCueKind::AttackWindowClose,
    });
    app.update();
    assert!(!trigger(&app));
}
