//! Scene setup system
//!
//! This module contains the main setup function that initializes the 3D scene,
//! including camera, lights, the tray arena, dice, and UI elements. It also
//! owns the die-set rebuild that runs when the dice count changes.

use std::f32::consts::{FRAC_PI_2, TAU};

use bevy::camera::ScalingMode;
use bevy::prelude::*;
use bevy::render::render_resource::Face;
use bevy_rapier3d::prelude::*;
use rand::Rng;

use crate::dice3d::meshes::{d6_collider, d6_mesh, pip_positions};
use crate::dice3d::types::*;

/// Die body colors; one is picked at random per die
pub const DIE_PALETTE: [&str; 8] = [
    "#EAA14D", "#E05A47", "#4D9BEA", "#5FB376", "#D869A8", "#F2C94C", "#9B51E0", "#FFFFFF",
];
/// The palette entry that gets traditional red and black pips
pub const TRADITIONAL_DIE: &str = "#FFFFFF";
pub const OUTLINE_COLOR: &str = "#725349";
pub const SHADOW_COLOR: &str = "#F3BD2E";
pub const BACKGROUND_COLOR: &str = "#F6F3EB";
const DARK_PIP_COLOR: &str = "#222222";
const RED_PIP_COLOR: &str = "#D0312D";

/// Uniform scale of the outline shell around a die
pub const OUTLINE_SCALE: f32 = 1.06;
/// Shadow opacity for a die resting on the floor
const SHADOW_BASE_OPACITY: f32 = 0.2;
const WALL_HEIGHT: f32 = 40.0;
const WALL_THICKNESS: f32 = 1.0;

/// Parse a CSS hex color, falling back to white on malformed input.
pub fn hex_color(hex: &str) -> Color {
    match csscolorparser::parse(hex) {
        Ok(color) => {
            let [r, g, b, a] = color.to_rgba8();
            Color::srgba_u8(r, g, b, a)
        }
        Err(err) => {
            warn!("Invalid color {:?}: {}", hex, err);
            Color::WHITE
        }
    }
}

/// Main setup system - initializes the entire 3D scene
pub fn setup_dice_tray(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    tuning: Res<TrayTuning>,
    dice_config: Res<DiceConfig>,
    zoom: Res<TrayZoom>,
) {
    let size = tuning.die_size;
    let assets = DiceAssets {
        die_mesh: meshes.add(d6_mesh(size)),
        pip_mesh: meshes.add(Sphere::new(1.0)),
        shadow_mesh: meshes.add(Circle::new(size * 0.6)),
        outline_material: materials.add(StandardMaterial {
            base_color: hex_color(OUTLINE_COLOR),
            unlit: true,
            cull_mode: Some(Face::Front),
            ..default()
        }),
        light_pip_material: materials.add(StandardMaterial {
            base_color: Color::WHITE,
            perceptual_roughness: 0.6,
            ..default()
        }),
        dark_pip_material: materials.add(StandardMaterial {
            base_color: hex_color(DARK_PIP_COLOR),
            perceptual_roughness: 0.6,
            ..default()
        }),
        red_pip_material: materials.add(StandardMaterial {
            base_color: hex_color(RED_PIP_COLOR),
            perceptual_roughness: 0.6,
            ..default()
        }),
    };

    // Orthographic camera looking down the diagonal
    commands.spawn((
        Camera3d::default(),
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: tuning.frustum_height,
            },
            scale: zoom.projection_scale(),
            ..OrthographicProjection::default_3d()
        }),
        Transform::from_translation(CAMERA_EYE).looking_at(Vec3::ZERO, Vec3::Y),
        AmbientLight {
            color: Color::WHITE,
            brightness: 600.0,
            ..default()
        },
        MainCamera,
    ));

    // Light
    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(10.0, 30.0, 20.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    spawn_arena(&mut commands, &tuning);
    spawn_result_board(&mut commands);

    let mut rng = rand::thread_rng();
    spawn_dice_set(
        &mut commands,
        &assets,
        &mut materials,
        &tuning,
        dice_config.count,
        &mut rng,
    );

    commands.insert_resource(assets);
    info!("Dice tray ready with {} dice", dice_config.count);
}

/// Floor and four walls. The arena has no visible geometry; the background
/// color stands in for the tray surface.
fn spawn_arena(commands: &mut Commands, tuning: &TrayTuning) {
    let extent = tuning.wall_distance + WALL_THICKNESS;

    commands.spawn((
        Collider::cuboid(extent, 0.5, extent),
        Transform::from_xyz(0.0, -0.5, 0.0),
        RigidBody::Fixed,
        Friction::coefficient(tuning.friction),
        Restitution::coefficient(tuning.restitution),
        DiceArena,
    ));

    let offset = tuning.wall_distance + WALL_THICKNESS / 2.0;
    let half_height = WALL_HEIGHT / 2.0;
    for (pos, half_size) in [
        (
            Vec3::new(0.0, half_height, -offset),
            Vec3::new(extent, half_height, WALL_THICKNESS / 2.0),
        ),
        (
            Vec3::new(0.0, half_height, offset),
            Vec3::new(extent, half_height, WALL_THICKNESS / 2.0),
        ),
        (
            Vec3::new(-offset, half_height, 0.0),
            Vec3::new(WALL_THICKNESS / 2.0, half_height, extent),
        ),
        (
            Vec3::new(offset, half_height, 0.0),
            Vec3::new(WALL_THICKNESS / 2.0, half_height, extent),
        ),
    ] {
        commands.spawn((
            Collider::cuboid(half_size.x, half_size.y, half_size.z),
            Transform::from_translation(pos),
            RigidBody::Fixed,
            Friction::coefficient(tuning.friction),
            Restitution::coefficient(tuning.restitution),
            DiceArena,
        ));
    }
}

fn spawn_result_board(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(32.0),
                width: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                ..default()
            },
            Visibility::Hidden,
            ResultBoard,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 72.0,
                    ..default()
                },
                TextColor(hex_color(OUTLINE_COLOR)),
                ResultTotalText,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(hex_color(OUTLINE_COLOR)),
                ResultDetailText,
            ));
        });

    commands.spawn((
        Text::new("Drag to pick up the dice, let go to throw. Keys 1-9 change the dice count."),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(hex_color(OUTLINE_COLOR).with_alpha(0.7)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(16.0),
            left: Val::Px(16.0),
            ..default()
        },
        HintText,
    ));
}

/// Calculate the spawn position for a die based on its index
///
/// Dice line up along X, centered on the origin, one die size apart.
pub fn calculate_dice_position(index: usize, total: usize, size: f32) -> Vec3 {
    let center = (total.max(1) - 1) as f32 / 2.0;
    Vec3::new((index as f32 - center) * size, size, 0.0)
}

/// Spawn `count` dice with their shadows
pub fn spawn_dice_set(
    commands: &mut Commands,
    assets: &DiceAssets,
    materials: &mut Assets<StandardMaterial>,
    tuning: &TrayTuning,
    count: usize,
    rng: &mut impl Rng,
) {
    for index in 0..count {
        let position = calculate_dice_position(index, count, tuning.die_size);
        spawn_die(commands, assets, materials, tuning, index, position, rng);
    }
}

/// Spawn a single die entity with physics, outline, pips and ground shadow
pub fn spawn_die(
    commands: &mut Commands,
    assets: &DiceAssets,
    materials: &mut Assets<StandardMaterial>,
    tuning: &TrayTuning,
    index: usize,
    position: Vec3,
    rng: &mut impl Rng,
) -> Entity {
    let color = DIE_PALETTE[rng.gen_range(0..DIE_PALETTE.len())];
    let traditional = color == TRADITIONAL_DIE;

    let body_material = materials.add(StandardMaterial {
        base_color: hex_color(color),
        perceptual_roughness: 0.5,
        ..default()
    });
    let shadow_material = materials.add(StandardMaterial {
        base_color: hex_color(SHADOW_COLOR).with_alpha(SHADOW_BASE_OPACITY),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    let rotation = Quat::from_euler(
        EulerRot::XYZ,
        rng.gen::<f32>() * TAU,
        rng.gen::<f32>() * TAU,
        rng.gen::<f32>() * TAU,
    );

    let pip_radius = tuning.die_size * 0.09;
    let die = commands
        .spawn((
            Mesh3d(assets.die_mesh.clone()),
            MeshMaterial3d(body_material.clone()),
            Transform::from_translation(position).with_rotation(rotation),
            RigidBody::Dynamic,
            d6_collider(tuning.die_size),
            Velocity::zero(),
            Sleeping::default(),
            Ccd::enabled(),
            Friction::coefficient(tuning.friction),
            Restitution::coefficient(tuning.restitution),
            ColliderMassProperties::Mass(tuning.die_mass),
            Die::new(index),
            DieMaterials {
                body: body_material,
                shadow: shadow_material.clone(),
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(assets.die_mesh.clone()),
                MeshMaterial3d(assets.outline_material.clone()),
                Transform::from_scale(Vec3::splat(OUTLINE_SCALE)),
                DieOutline,
            ));

            for pip in pip_positions(tuning.die_size) {
                let (material, radius) = match (traditional, pip.value) {
                    (true, 1) => (assets.red_pip_material.clone(), pip_radius * 1.5),
                    (true, 4) => (assets.red_pip_material.clone(), pip_radius),
                    (true, _) => (assets.dark_pip_material.clone(), pip_radius),
                    (false, _) => (assets.light_pip_material.clone(), pip_radius),
                };
                // Flattened sphere half sunk into the face
                parent.spawn((
                    Mesh3d(assets.pip_mesh.clone()),
                    MeshMaterial3d(material),
                    Transform::from_translation(pip.position)
                        .with_rotation(Quat::from_rotation_arc(Vec3::Y, pip.normal))
                        .with_scale(Vec3::new(radius, radius * 0.35, radius)),
                    DiePip,
                ));
            }
        })
        .id();

    commands.spawn((
        Mesh3d(assets.shadow_mesh.clone()),
        MeshMaterial3d(shadow_material),
        Transform::from_xyz(position.x, super::shadows::SHADOW_Y, position.z)
            .with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
        DieShadow { die },
    ));

    die
}

/// Rebuild the die set when a new dice count is requested
///
/// Per-die materials are released before the new set spawns; the shared
/// meshes and materials in `DiceAssets` are reused.
pub fn rebuild_dice_on_count_change(
    mut commands: Commands,
    mut count_events: MessageReader<DiceCountChanged>,
    mut dice_config: ResMut<DiceConfig>,
    mut session: ResMut<DiceSession>,
    mut dice_results: ResMut<DiceResults>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    tuning: Res<TrayTuning>,
    assets: Res<DiceAssets>,
    dice_query: Query<(Entity, &DieMaterials), With<Die>>,
    shadow_query: Query<Entity, With<DieShadow>>,
) {
    let Some(request) = count_events.read().last().copied() else {
        return;
    };

    let requested = DiceConfig::new(request.count);
    if requested == *dice_config && dice_query.iter().count() == requested.count {
        return;
    }

    for (entity, die_materials) in dice_query.iter() {
        materials.remove(&die_materials.body);
        materials.remove(&die_materials.shadow);
        commands.entity(entity).despawn();
    }
    for entity in shadow_query.iter() {
        commands.entity(entity).despawn();
    }

    *dice_config = requested;
    session.reset();
    dice_results.hide();

    let mut rng = rand::thread_rng();
    spawn_dice_set(
        &mut commands,
        &assets,
        &mut materials,
        &tuning,
        requested.count,
        &mut rng,
    );
    info!("Rebuilt dice set with {} dice", requested.count);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_are_centered() {
        let xs: Vec<f32> = (0..5)
            .map(|i| calculate_dice_position(i, 5, 2.5).x)
            .collect();
        assert_eq!(xs, vec![-5.0, -2.5, 0.0, 2.5, 5.0]);

        let single = calculate_dice_position(0, 1, 2.5);
        assert_eq!(single, Vec3::new(0.0, 2.5, 0.0));
    }

    #[test]
    fn test_positions_for_even_count() {
        let a = calculate_dice_position(0, 2, 2.0);
        let b = calculate_dice_position(1, 2, 2.0);
        assert_eq!(a.x, -1.0);
        assert_eq!(b.x, 1.0);
        assert_eq!(a.y, 2.0);
    }

    #[test]
    fn test_palette_parses() {
        for hex in DIE_PALETTE {
            let color = hex_color(hex).to_srgba();
            assert_eq!(color.alpha, 1.0);
        }
        let white = hex_color(TRADITIONAL_DIE).to_srgba();
        assert_eq!((white.red, white.green, white.blue), (1.0, 1.0, 1.0));
    }

    #[test]
    fn test_bad_color_falls_back_to_white() {
        assert_eq!(hex_color("not a color"), Color::WHITE);
    }
}
