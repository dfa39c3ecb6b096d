use bevy::prelude::*;

use drifter_simulation::{Drone, DroneConfig, LocomotionConfig, LocomotionState, WeaponTrigger};

pub struct RenderingSyncPlugin;

impl Plugin for RenderingSyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                spawn_visuals_for_new_entities,
                sync_transforms,
                sync_crouch_scale,
                update_weapon_glow,
            )
                .chain(),
        );
    }
}

/// Marker: simulation entity needs visual representation
#[derive(Component)]
pub struct NeedsVisual;

/// Link: visual entity → simulation entity
#[derive(Component)]
pub struct VisualOf(pub Entity);

/// Link: simulation entity → visual entity
#[derive(Component)]
pub struct HasVisual(pub Entity);

/// Body origin sits at the feet; mesh is centered — shift it up.
#[derive(Component, Default)]
pub struct VisualOffset(pub Vec3);

/// Spawn meshes for new simulation entities: capsule for the character,
/// sphere for the drone.
fn spawn_visuals_for_new_entities(
    mut commands: Commands,
    characters: Query<(Entity, &LocomotionConfig, &Transform), With<NeedsVisual>>,
    drones: Query<(Entity, &DroneConfig, &Transform), (With<NeedsVisual>, With<Drone>)>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (sim_entity, config, sim_transform) in characters.iter() {
        let visual_entity = commands
            .spawn((
                Mesh3d(meshes.add(Capsule3d::new(
                    config.capsule_radius,
                    config.standing_height - 2.0 * config.capsule_radius,
                ))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb(0.2, 0.4, 0.8),
                    ..default()
                })),
                *sim_transform,
                VisualOf(sim_entity),
                VisualOffset(Vec3::Y * config.standing_height * 0.5),
            ))
            .id();

        commands
            .entity(sim_entity)
            .remove::<NeedsVisual>()
            .insert(HasVisual(visual_entity));
    }

    for (sim_entity, config, sim_transform) in drones.iter() {
        let visual_entity = commands
            .spawn((
                Mesh3d(meshes.add(Sphere::new(config.body_radius))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb(0.8, 0.6, 0.2),
                    ..default()
                })),
                *sim_transform,
                VisualOf(sim_entity),
                VisualOffset::default(),
            ))
            .id();

        commands
            .entity(sim_entity)
            .remove::<NeedsVisual>()
            .insert(HasVisual(visual_entity));
    }
}

/// Sync simulation transforms → visual transforms
fn sync_transforms(
    sim_query: Query<(&Transform, &HasVisual), Changed<Transform>>,
    mut visual_query: Query<(&mut Transform, &VisualOffset), (With<VisualOf>, Without<HasVisual>)>,
) {
    for (sim_transform, has_visual) in sim_query.iter() {
        if let Ok((mut visual_transform, offset)) = visual_query.get_mut(has_visual.0) {
            visual_transform.translation = sim_transform.translation + offset.0;
            visual_transform.rotation = sim_transform.rotation;
        }
    }
}

/// Squash the capsule while crouched.
fn sync_crouch_scale(
    sim_query: Query<(&LocomotionState, &LocomotionConfig, &HasVisual), Changed<LocomotionState>>,
    mut visual_query: Query<&mut Transform, With<VisualOf>>,
) {
    for (state, config, has_visual) in sim_query.iter() {
        if let Ok(mut visual_transform) = visual_query.get_mut(has_visual.0) {
            let scale_y = if state.crouched {
                config.crouch_height / config.standing_height
            } else {
                1.0
            };
            visual_transform.scale = Vec3::new(1.0, scale_y, 1.0);
        }
    }
}

/// Tint the character red while the weapon window is open.
fn update_weapon_glow(
    sim_query: Query<(&WeaponTrigger, &HasVisual), Changed<WeaponTrigger>>,
    visual_query: Query<&MeshMaterial3d<StandardMaterial>, With<VisualOf>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (trigger, has_visual) in sim_query.iter() {
        let Ok(material_handle) = visual_query.get(has_visual.0) else {
            continue;
        };
        let Some(material) = materials.get_mut(&material_handle.0) else {
            continue;
        };
        material.base_color = if trigger.enabled {
            Color::srgb(0.8, 0.2, 0.2)
        } else {
            Color::srgb(0.2, 0.4, 0.8)
        };
    }
}
