//! Ground shadow sync
//!
//! Each die has a flat disc on the floor that follows it. The disc shrinks
//! and fades as the die rises.

use bevy::prelude::*;

use crate::dice3d::types::*;

/// Height of the shadow disc above the floor
pub const SHADOW_Y: f32 = 0.01;

/// Scale and opacity of a shadow under a die at height `y`
pub fn shadow_footprint(y: f32) -> (f32, f32) {
    let h = (y - 1.0).max(0.0);
    let scale = (1.0 - 0.04 * h).max(0.5);
    let opacity = (0.2 - 0.01 * h).max(0.0);
    (scale, opacity)
}

pub fn sync_die_shadows(
    dice_query: Query<(&Transform, &DieMaterials), (With<Die>, Without<DieShadow>)>,
    mut shadow_query: Query<(&DieShadow, &mut Transform), Without<Die>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (shadow, mut shadow_transform) in shadow_query.iter_mut() {
        let Ok((die_transform, die_materials)) = dice_query.get(shadow.die) else {
            continue;
        };

        let position = die_transform.translation;
        let (scale, opacity) = shadow_footprint(position.y);

        shadow_transform.translation = Vec3::new(position.x, SHADOW_Y, position.z);
        shadow_transform.scale = Vec3::splat(scale);

        // Only touch the asset when the alpha moved; every mutable access
        // queues a modified event and a re-upload.
        let stale = materials
            .get(&die_materials.shadow)
            .is_some_and(|material| material.base_color.alpha() != opacity);
        if stale {
            if let Some(material) = materials.get_mut(&die_materials.shadow) {
                material.base_color = material.base_color.with_alpha(opacity);
            }
        }
    }
}
