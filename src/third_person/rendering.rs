//! Drawing for the third-person variant.
//!
//! | Layer          | Technique                | Notes                                   |
//! |----------------|--------------------------|-----------------------------------------|
//! | Ground, grid   | `Mesh3d` plane + Gizmos  | 200×200 plane at y = −0.5               |
//! | Terrain        | `Mesh3d`, spawned once   | brown boxes, trunk + crown trees        |
//! | Tanks          | `Mesh3d` models          | synced from the battle every frame      |
//! | Shells         | Gizmos                   | r = 0.2 sphere + short trail            |
//! | Health bars    | Gizmos                   | enemies only, 3 units above the hull    |
//! | Aiming circle  | Gizmos                   | on the ground ahead of the turret       |
//! | Extra HUD      | UI text                  | aim mode, accuracy, "AIMING..."         |
//!
//! The battle's x axis is mirrored on the way into Bevy ([`to_render_space`])
//! so that turning left and the cursor land on the expected side of a camera
//! looking down +z.

use super::battle::ThirdPersonBattle;
use super::state::{TerrainFeature, TurretTank};
use crate::hud::{accuracy_color, HealthTier, HUD_FONT_SIZE};
use crate::vehicle::Allegiance;
use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

/// Clear colour above the horizon.
pub const SKY_COLOR: Color = Color::srgb_u8(102, 191, 255);

const GROUND_COLOR: Color = Color::srgb_u8(0, 158, 47);
const GRID_COLOR: Color = Color::srgba(0.2, 0.2, 0.2, 0.5);
const BUILDING_COLOR: Color = Color::srgb_u8(127, 106, 79);
const TRUNK_COLOR: Color = Color::srgb_u8(127, 106, 79);
const CROWN_COLOR: Color = Color::srgb_u8(0, 117, 44);
const PLAYER_BODY_COLOR: Color = Color::srgb_u8(0, 121, 241);
const PLAYER_TURRET_COLOR: Color = Color::srgb_u8(0, 82, 172);
const ENEMY_BODY_COLOR: Color = Color::srgb_u8(230, 41, 55);
const ENEMY_TURRET_COLOR: Color = Color::srgb_u8(190, 33, 55);
const CANNON_COLOR: Color = Color::BLACK;
const PLAYER_SHELL_COLOR: Color = Color::srgb_u8(253, 249, 0);
const ENEMY_SHELL_COLOR: Color = Color::srgb_u8(255, 161, 0);

const GROUND_LEVEL: f32 = -0.5;
const GROUND_SIZE: f32 = 200.0;
const CROWN_RADIUS: f32 = 1.5;
const BODY_SIZE: Vec3 = Vec3::new(3.0, 1.0, 4.0);
const TURRET_SIZE: Vec3 = Vec3::new(2.0, 0.8, 2.5);
const TURRET_LIFT: f32 = 0.7;
const BARREL_SIZE: Vec3 = Vec3::new(0.3, 0.3, 2.0);
const BARREL_OFFSET: f32 = 2.0;
const SHELL_RADIUS: f32 = 0.2;
/// Trail length in ticks of shell velocity.
const SHELL_TRAIL_TICKS: f32 = 2.0;
const HEALTH_BAR_WIDTH: f32 = 3.0;
const HEALTH_BAR_LIFT: f32 = 3.0;
/// Distance ahead of the turret at which the aiming circle is drawn.
const AIM_MARKER_DISTANCE: f32 = 20.0;
/// World units of aiming-circle radius per unit of spread radius.
const AIM_MARKER_SCALE: f32 = 0.05;

/// Mirror the battle's x axis into Bevy space.
#[inline]
pub fn to_render_space(p: Vec3) -> Vec3 {
    Vec3::new(-p.x, p.y, p.z)
}

/// Rotation for a battle heading, matching [`to_render_space`].
#[inline]
pub fn heading_rotation(angle: f32) -> Quat {
    Quat::from_rotation_y(-angle)
}

/// Which battle tank a model mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TankSlot {
    Player,
    Enemy(usize),
}

impl TankSlot {
    fn resolve(self, battle: &ThirdPersonBattle) -> Option<&TurretTank> {
        match self {
            TankSlot::Player => Some(&battle.player),
            TankSlot::Enemy(i) => battle.enemies.get(i),
        }
    }
}

/// Root of a tank's mesh hierarchy.
#[derive(Component, Debug)]
pub struct VehicleModel(pub TankSlot);

/// Turret child of a [`VehicleModel`].
#[derive(Component, Debug)]
pub struct TurretModel(pub TankSlot);

#[derive(Component)]
pub struct AimModeText;

#[derive(Component)]
pub struct AccuracyText;

#[derive(Component)]
pub struct SteadyingText;

// ── Startup ───────────────────────────────────────────────────────────────────

pub fn setup_third_person_scene_system(
    mut commands: Commands,
    battle: Res<ThirdPersonBattle>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(to_render_space(battle.camera.eye))
            .looking_at(to_render_space(battle.camera.target), Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            ..default()
        },
        Transform::from_xyz(30.0, 60.0, -20.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
        MeshMaterial3d(materials.add(GROUND_COLOR)),
        Transform::from_xyz(0.0, GROUND_LEVEL, 0.0),
    ));

    // Terrain
    let building = materials.add(BUILDING_COLOR);
    let trunk = materials.add(TRUNK_COLOR);
    let crown = materials.add(CROWN_COLOR);
    let crown_mesh = meshes.add(Sphere::new(CROWN_RADIUS));
    for obstacle in &battle.terrain.obstacles {
        let base = to_render_space(obstacle.position);
        let centre = base + Vec3::Y * (obstacle.size.y / 2.0);
        let body = meshes.add(Cuboid::from_size(obstacle.size));
        match obstacle.feature {
            TerrainFeature::Building => {
                commands.spawn((
                    Mesh3d(body),
                    MeshMaterial3d(building.clone()),
                    Transform::from_translation(centre),
                ));
            }
            TerrainFeature::Tree => {
                commands.spawn((
                    Mesh3d(body),
                    MeshMaterial3d(trunk.clone()),
                    Transform::from_translation(centre),
                ));
                commands.spawn((
                    Mesh3d(crown_mesh.clone()),
                    MeshMaterial3d(crown.clone()),
                    Transform::from_translation(base + Vec3::Y * (obstacle.size.y + 1.0)),
                ));
            }
        }
    }

    // Tank models
    let body_mesh = meshes.add(Cuboid::from_size(BODY_SIZE));
    let turret_mesh = meshes.add(Cuboid::from_size(TURRET_SIZE));
    let barrel_mesh = meshes.add(Cuboid::from_size(BARREL_SIZE));
    let barrel_material = materials.add(CANNON_COLOR);
    let slots = std::iter::once(TankSlot::Player)
        .chain((0..battle.enemies.len()).map(TankSlot::Enemy));
    for slot in slots {
        let (body_color, turret_color) = match slot {
            TankSlot::Player => (PLAYER_BODY_COLOR, PLAYER_TURRET_COLOR),
            TankSlot::Enemy(_) => (ENEMY_BODY_COLOR, ENEMY_TURRET_COLOR),
        };
        let body_material = materials.add(body_color);
        let turret_material = materials.add(turret_color);

        commands
            .spawn((
                VehicleModel(slot),
                Transform::default(),
                Visibility::Visible,
            ))
            .with_children(|hull| {
                hull.spawn((
                    Mesh3d(body_mesh.clone()),
                    MeshMaterial3d(body_material),
                    Transform::default(),
                ));
                hull.spawn((
                    TurretModel(slot),
                    Transform::from_xyz(0.0, TURRET_LIFT, 0.0),
                    Visibility::Inherited,
                ))
                .with_children(|turret| {
                    turret.spawn((
                        Mesh3d(turret_mesh.clone()),
                        MeshMaterial3d(turret_material),
                        Transform::default(),
                    ));
                    turret.spawn((
                        Mesh3d(barrel_mesh.clone()),
                        MeshMaterial3d(barrel_material.clone()),
                        Transform::from_xyz(0.0, 0.0, BARREL_OFFSET),
                    ));
                });
            });
    }
}

/// Third-person HUD lines below the shared HUD column.
pub fn setup_third_person_hud_system(mut commands: Commands) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(100.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(4.0),
            ..default()
        })
        .with_children(|parent| {
            let font = TextFont {
                font_size: HUD_FONT_SIZE,
                ..default()
            };
            parent.spawn((
                Text::new("Mouse Aiming: ON"),
                font.clone(),
                TextColor(HealthTier::Healthy.color()),
                AimModeText,
            ));
            parent.spawn((
                Text::new("Accuracy: 0%"),
                font.clone(),
                TextColor(Color::WHITE),
                AccuracyText,
            ));
            parent.spawn((
                Text::new("AIMING..."),
                font,
                TextColor(Color::WHITE),
                SteadyingText,
                Visibility::Hidden,
            ));
        });
}

// ── Per-frame ─────────────────────────────────────────────────────────────────

/// Copy hull and turret poses onto the mesh models; hide wrecks.
pub fn sync_tank_models_system(
    battle: Res<ThirdPersonBattle>,
    mut q_hulls: Query<(&VehicleModel, &mut Transform, &mut Visibility), Without<TurretModel>>,
    mut q_turrets: Query<(&TurretModel, &mut Transform), Without<VehicleModel>>,
) {
    for (model, mut transform, mut visibility) in q_hulls.iter_mut() {
        let Some(tank) = model.0.resolve(&battle) else {
            continue;
        };
        transform.translation = to_render_space(tank.position);
        transform.rotation = heading_rotation(tank.heading);
        *visibility = if tank.hull.is_operational() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
    for (model, mut transform) in q_turrets.iter_mut() {
        if let Some(tank) = model.0.resolve(&battle) {
            transform.rotation = heading_rotation(tank.turret());
        }
    }
}

pub fn chase_camera_system(
    battle: Res<ThirdPersonBattle>,
    mut q_camera: Query<&mut Transform, With<Camera3d>>,
) {
    let Ok(mut cam) = q_camera.single_mut() else {
        return;
    };
    *cam = Transform::from_translation(to_render_space(battle.camera.eye))
        .looking_at(to_render_space(battle.camera.target), Vec3::Y);
}

/// Grid, shells, enemy health bars and the aiming circle.
pub fn third_person_gizmo_system(mut gizmos: Gizmos, battle: Res<ThirdPersonBattle>) {
    gizmos.grid(
        Isometry3d::new(
            Vec3::new(0.0, GROUND_LEVEL + 0.01, 0.0),
            Quat::from_rotation_x(FRAC_PI_2),
        ),
        UVec2::splat(100),
        Vec2::splat(1.0),
        GRID_COLOR,
    );

    for shell in &battle.shells {
        let color = match shell.allegiance {
            Allegiance::Player => PLAYER_SHELL_COLOR,
            Allegiance::Enemy => ENEMY_SHELL_COLOR,
        };
        let head = to_render_space(shell.position);
        let tail = to_render_space(shell.position - shell.velocity * SHELL_TRAIL_TICKS);
        gizmos.sphere(Isometry3d::from_translation(head), SHELL_RADIUS, color);
        gizmos.line(head, tail, color);
    }

    for enemy in battle.enemies.iter().filter(|e| e.hull.is_operational()) {
        let fraction = enemy.hull.fraction().clamp(0.0, 1.0);
        let centre = to_render_space(enemy.position) + Vec3::Y * HEALTH_BAR_LIFT;
        let left = centre - Vec3::X * (HEALTH_BAR_WIDTH / 2.0);
        gizmos.line(left, left + Vec3::X * HEALTH_BAR_WIDTH, Color::srgb(0.5, 0.5, 0.5));
        if fraction > 0.0 {
            gizmos.line(
                left + Vec3::Y * 0.05,
                left + Vec3::new(HEALTH_BAR_WIDTH * fraction, 0.05, 0.0),
                HealthTier::from_fraction(fraction).color(),
            );
        }
    }

    if battle.mouse_aiming && battle.player.hull.is_operational() {
        let ahead = TurretTank::direction(battle.player.aim_angle()) * AIM_MARKER_DISTANCE;
        let mut marker = to_render_space(battle.player.position + ahead);
        marker.y = GROUND_LEVEL + 0.05;
        let color = accuracy_color(battle.aiming.accuracy());
        gizmos.circle(
            Isometry3d::new(marker, Quat::from_rotation_x(FRAC_PI_2)),
            battle.aiming.radius() * AIM_MARKER_SCALE,
            color,
        );
        gizmos.line(marker - Vec3::X * 0.5, marker + Vec3::X * 0.5, Color::WHITE);
        gizmos.line(marker - Vec3::Z * 0.5, marker + Vec3::Z * 0.5, Color::WHITE);
    }
}

pub fn third_person_hud_system(
    battle: Res<ThirdPersonBattle>,
    mut q_mode: Query<(&mut Text, &mut TextColor), (With<AimModeText>, Without<AccuracyText>)>,
    mut q_accuracy: Query<(&mut Text, &mut TextColor), (With<AccuracyText>, Without<AimModeText>)>,
    mut q_steady: Query<&mut Visibility, With<SteadyingText>>,
) {
    if let Ok((mut text, mut color)) = q_mode.single_mut() {
        let (label, tint) = if battle.mouse_aiming {
            ("Mouse Aiming: ON", HealthTier::Healthy.color())
        } else {
            ("Mouse Aiming: OFF", HealthTier::Critical.color())
        };
        text.0 = label.to_string();
        color.0 = tint;
    }

    let accuracy = battle.aiming.accuracy();
    if let Ok((mut text, mut color)) = q_accuracy.single_mut() {
        text.0 = accuracy_label(accuracy);
        color.0 = accuracy_color(accuracy);
    }

    if let Ok(mut visibility) = q_steady.single_mut() {
        *visibility = if battle.aiming.steadying() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

/// `Accuracy: N%`, truncated toward zero.
pub fn accuracy_label(accuracy: f32) -> String {
    format!("Accuracy: {}%", (accuracy * 100.0) as i32)
}
