//! Rapier collision-group layout.

use bevy_rapier3d::prelude::*;

/// Kinematic bodies (player, drone)
pub const GROUP_BODY: Group = Group::GROUP_1;
/// Static level geometry
pub const GROUP_WORLD: Group = Group::GROUP_2;
/// Dynamic props the bodies can push around
pub const GROUP_DYNAMIC: Group = Group::GROUP_3;

/// Groups for kinematic bodies: collide with everything relevant.
pub fn body_groups() -> CollisionGroups {
    CollisionGroups::new(GROUP_BODY, GROUP_WORLD | GROUP_DYNAMIC | GROUP_BODY)
}

/// Groups for dynamic props.
pub fn prop_groups() -> CollisionGroups {
    CollisionGroups::new(GROUP_DYNAMIC, GROUP_WORLD | GROUP_DYNAMIC | GROUP_BODY)
}
