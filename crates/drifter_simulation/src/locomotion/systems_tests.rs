//! Tests for locomotion system logic (direct, no App schedule).

#[cfg(test)]
mod tests {
    use bevy::math::FloatExt;
    use bevy::prelude::*;

    use crate::components::MoveInput;
    use crate::config::{LocomotionConfig, SpeedModel};

    const DELTA: f32 = 1.0 / 60.0;

    #[test]
    fn test_speed_smoothing_converges_within_envelope() {
        let config = LocomotionConfig::default();
        let target = config.speed_model.target_speed(false, false);

        let mut current = 0.0f32;
        for _ in 0..600 {
            current = current.lerp(target, config.speed_smoothing * DELTA);
            assert!(
                current <= target + 1e-4,
                "smoothed speed {} overshot target {}",
                current,
                target
            );
        }
        // 10 секунд — сходимость практически полная
        assert!((current - target).abs() < 1e-2);
    }

    #[test]
    fn test_diagonal_input_not_faster() {
        let config = LocomotionConfig::default();
        let input = MoveInput {
            axes: Vec2::new(1.0, 1.0),
            ..default()
        };
        let axes = input.clamped_axes();

        // Uniform модель: обе компоненты масштабируются current_speed
        let current_speed = config.speed_model.target_speed(false, false);
        let local = Vec3::new(axes.x * current_speed, 0.0, -(axes.y * current_speed));

        assert!(
            (local.length() - current_speed).abs() < 1e-5,
            "diagonal speed {} must equal the speed constant {}, not sqrt(2)x it",
            local.length(),
            current_speed
        );
    }

    #[test]
    fn test_directional_model_side_speed_fixed() {
        let model = SpeedModel::Directional {
            forward: 5.0,
            side: 2.0,
            run_forward: 8.0,
            crouch_forward: 2.5,
        };
        let axes = Vec2::new(1.0, 0.0);
        let local = Vec3::new(axes.x * model.side_speed().unwrap(), 0.0, 0.0);
        assert_eq!(local.x, 2.0);
        // Run не влияет на side константу
        assert_eq!(model.side_speed().unwrap(), 2.0);
    }

    #[test]
    fn test_gravity_accumulates_airborne() {
        let config = LocomotionConfig::default();
        let mut vertical = 0.0f32;

        for _ in 0..60 {
            vertical += config.gravity * DELTA;
        }
        // После секунды падения: ≈ -9.8 m/s
        assert!((vertical - config.gravity).abs() < 1e-3);
    }

    #[test]
    fn test_grounded_clamps_to_stick_speed() {
        let config = LocomotionConfig::default();
        let mut vertical = -20.0f32;

        // Логика clamp из apply_gravity
        vertical += config.gravity * DELTA;
        let grounded = true;
        if grounded && vertical < 0.0 {
            vertical = config.stick_to_ground_speed;
        }

        assert_eq!(vertical, config.stick_to_ground_speed);
    }

    #[test]
    fn test_stick_speed_not_applied_while_ascending() {
        let config = LocomotionConfig::default();
        let mut vertical = config.jump_force;

        vertical += config.gravity * DELTA;
        // vertical > 0 — clamp не срабатывает даже на земле
        let grounded = true;
        if grounded && vertical < 0.0 {
            vertical = config.stick_to_ground_speed;
        }

        assert!(vertical > config.jump_force - 1.0);
    }

    #[test]
    fn test_crouch_restore_requires_clearance() {
        // Ветка из update_crouch: released + blocked → остаёмся в присяде
        let mut crouched = true;
        let crouch_released = true;
        let mut overhead_clear = false;

        for _ in 0..10 {
            if crouch_released && crouched && overhead_clear {
                crouched = false;
            }
        }
        assert!(crouched, "blocked head must keep the body crouched");

        overhead_clear = true;
        if crouch_released && crouched && overhead_clear {
            crouched = false;
        }
        assert!(!crouched);
    }

    #[test]
    fn test_total_velocity_composition() {
        // compose_total_velocity: planar * factor + slide + up * vertical
        let planar = Vec3::new(2.0, 0.0, 0.0);
        let slide = Vec3::new(0.0, -1.0, 1.0);
        let factor = 0.5;
        let vertical = -3.0;

        let total = planar * factor + slide + Vec3::Y * vertical;
        assert_eq!(total, Vec3::new(1.0, -4.0, 1.0));
    }
}
