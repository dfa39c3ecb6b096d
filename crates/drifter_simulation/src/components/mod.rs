//! ECS components, общие для всех симулируемых тел
//!
//! Организация по доменам:
//! - body: кинематическое тело (PhysicsBody, Player marker)
//! - input: снапшот ввода за тик (MoveInput, InputEdges)
//! - probe: результаты коллизионных проб от тактического слоя (GroundProbe)
//!
//! Доменные компоненты (LocomotionState, SlideState, JumpPhase, DashState,
//! DroneState, WeaponTrigger) живут в своих модулях рядом с системами.

pub mod body;
pub mod input;
pub mod probe;

// Re-exports для удобного импорта
pub use body::*;
pub use input::*;
pub use probe::*;
