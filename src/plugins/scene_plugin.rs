use bevy::prelude::*;

use crate::config::tuning::Tuning;
use crate::game::components::*;
use crate::game::player::{player_state, standing_translation};

/// Camera height above the body's centre.
const EYE_OFFSET: f32 = 0.7;

const BARREL_SPOTS: [(f32, f32); 5] = [(0.0, -6.0), (3.5, -9.0), (-4.0, -8.0), (7.0, -3.0), (-7.5, -2.0)];

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_world, spawn_player, spawn_barrels));
    }
}

fn setup_world(
    mut commands: Commands,
    tuning: Res<Tuning>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(200.0, 200.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.35, 0.3))),
        Transform::from_xyz(0.0, tuning.floor_height, 0.0),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(6.0, 12.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // A crate that sits in the way but is not a target.
    commands.spawn((
        EntityTag::Prop,
        CollisionRadius(0.6),
        Mesh3d(meshes.add(Cuboid::new(1.0, 1.0, 1.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.45, 0.3, 0.15))),
        Transform::from_xyz(2.0, tuning.floor_height + 0.5, -3.0),
    ));
}

fn spawn_player(
    mut commands: Commands,
    tuning: Res<Tuning>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let player = commands
        .spawn((
            player_state(&tuning),
            Transform::from_translation(standing_translation(&tuning, 0.0, 0.0)),
            Visibility::default(),
        ))
        .id();

    let camera = commands
        .spawn((
            PlayerCamera,
            Camera3d::default(),
            Transform::from_xyz(0.0, EYE_OFFSET, 0.0),
            ChildOf(player),
        ))
        .id();

    let sword = commands
        .spawn((
            Sword,
            Mesh3d(meshes.add(Cuboid::new(0.06, 0.06, 0.9))),
            MeshMaterial3d(materials.add(Color::srgb(0.8, 0.8, 0.85))),
            Transform::from_xyz(0.35, -0.3, -0.6),
            ChildOf(camera),
        ))
        .id();

    // Effect rides on the sword so it follows every swing.
    let vfx = commands
        .spawn((
            VisualEffect::default(),
            Mesh3d(meshes.add(Cuboid::new(0.2, 0.2, 1.0))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgba(0.4, 0.8, 1.0, 0.5),
                emissive: LinearRgba::rgb(2.0, 6.0, 10.0),
                alpha_mode: AlphaMode::Blend,
                ..default()
            })),
            Transform::from_xyz(0.0, 0.0, -0.1),
            Visibility::Hidden,
            ChildOf(sword),
        ))
        .id();

    commands
        .entity(player)
        .insert((ViewCamera(camera), SwordVfx(Some(vfx))));
}

fn spawn_barrels(
    mut commands: Commands,
    tuning: Res<Tuning>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let barrel_mesh = meshes.add(Cylinder::new(0.5, 1.2));
    let barrel_material = materials.add(Color::srgb(0.55, 0.35, 0.2));
    // Modelled small; the wreck is spawned at `wreck_scale`.
    let wreck = WreckVisual {
        mesh: meshes.add(Cuboid::new(0.08, 0.02, 0.08)),
        material: materials.add(Color::srgb(0.35, 0.22, 0.12)),
    };

    for (x, z) in BARREL_SPOTS {
        commands.spawn((
            EntityTag::Target,
            CollisionRadius(0.5),
            Destructible::new(Some(wreck.clone())),
            Mesh3d(barrel_mesh.clone()),
            MeshMaterial3d(barrel_material.clone()),
            Transform::from_xyz(x, tuning.floor_height + 0.6, z),
        ));
    }
}
