//! Кинематическое тело: итоговая скорость за тик + маркер игрока

use bevy::prelude::*;

/// Кинематическое тело (игрок или дрон)
///
/// `velocity` — итоговая скорость текущего тика, собранная из независимых
/// вкладов (planar, slide, vertical, dash). Интегрируется в Transform одним
/// вызовом, чтобы внешний collision resolver видел полное смещение.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    /// Итоговая скорость (m/s, world space)
    pub velocity: Vec3,
}

/// Маркер управляемого персонажа (третье лицо)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;
