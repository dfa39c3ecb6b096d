//! Per-body tuning configs.
//!
//! Every simulated body carries its own config component; nothing is global.
//! Values can be loaded from RON files (`assets/config/*.ron`) or built in
//! code from the defaults.

pub mod drone;
pub mod loader;
pub mod locomotion;

pub use drone::DroneConfig;
pub use loader::{load_config_file, ConfigLoadError};
pub use locomotion::{Easing, LocomotionConfig, SlowdownCurve, SpeedModel};
