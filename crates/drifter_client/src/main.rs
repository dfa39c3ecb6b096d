use bevy::prelude::*;
use std::path::Path;

use drifter_simulation::config::load_config_file;
use drifter_simulation::{
    log_warning, spawn_drone, spawn_player_character, DroneConfig, LocomotionConfig,
    SimulationPlugin, SyntheticWorldPlugin,
};

mod animation;
mod camera;
mod input;
mod rendering;

use animation::AnimationStubPlugin;
use camera::CameraPlugin;
use input::PlayerInputPlugin;
use rendering::RenderingSyncPlugin;

fn main() {
    App::new()
        // Bevy defaults (rendering, input, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "DRIFTER - Sandbox".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Simulation (headless ECS logic)
        .add_plugins(SimulationPlugin)
        // Flat demo world stands in for a real collision resolver
        .add_plugins(SyntheticWorldPlugin)
        // Keyboard/mouse → MoveInput snapshots
        .add_plugins(PlayerInputPlugin)
        // Animation-player stand-in: echoes cues back for triggers
        .add_plugins(AnimationStubPlugin)
        // Rendering sync (simulation → visuals)
        .add_plugins(RenderingSyncPlugin)
        // Camera controls
        .add_plugins(CameraPlugin)
        // Setup scene
        .add_systems(Startup, setup_scene)
        .run();
}

/// Spawn ground plane, lights, camera, player and drone
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Ground plane (20x20m)
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(20.0)))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));

    // Directional light (sun)
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_4)),
    ));

    // Ambient light
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.3,
        affects_lightmapped_meshes: false,
    });

    // Camera (follows the controlled body)
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(8.0, 6.0, 8.0).looking_at(Vec3::ZERO, Vec3::Y),
        camera::FollowOrbitCamera::default(),
    ));

    // Tuning из RON, defaults как fallback
    let locomotion_config =
        match load_config_file::<LocomotionConfig>(Path::new("assets/config/locomotion.ron")) {
            Ok(config) => config,
            Err(error) => {
                log_warning(&format!("{}; falling back to defaults", error));
                LocomotionConfig::default()
            }
        };
    let drone_config = match load_config_file::<DroneConfig>(Path::new("assets/config/drone.ron")) {
        Ok(config) => config,
        Err(error) => {
            log_warning(&format!("{}; falling back to defaults", error));
            DroneConfig::default()
        }
    };

    // Simulation entities; RenderingSyncPlugin даст им меши
    let player = spawn_player_character(&mut commands, Vec3::new(0.0, 0.0, 0.0), locomotion_config);
    let drone = spawn_drone(&mut commands, Vec3::new(4.0, 3.0, 0.0), drone_config);
    commands.entity(player).insert(rendering::NeedsVisual);
    commands.entity(drone).insert(rendering::NeedsVisual);

    commands.insert_resource(input::ControlledBodies {
        player,
        drone,
        drone_active: false,
    });
}
