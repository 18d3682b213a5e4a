//! Drawing for the top-down variant.
//!
//! | Layer        | Technique                | Notes                              |
//! |--------------|--------------------------|------------------------------------|
//! | Obstacles    | one `Mesh2d`, vertex colours | built once at startup          |
//! | Tanks        | Gizmos                   | 30×20 hull + 35 px cannon          |
//! | Health bars  | Gizmos                   | enemies only, 30×4 above the hull  |
//! | Shells       | Gizmos                   | r = 3                              |
//! | Camera       | `Camera2d`, fixed view   | centred on the follow camera view  |
//!
//! The battle keeps y pointing down; every position goes through
//! [`to_screen_space`] on its way to Bevy.

use super::battle::TopDownBattle;
use super::state::{Obstacle, ObstacleKind, TopDownTank};
use crate::hud::HealthTier;
use crate::vehicle::Allegiance;
use bevy::camera::ScalingMode;
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};

/// Background colour of the battlefield.
pub const GRASS_COLOR: Color = Color::srgb_u8(34, 139, 34);

const TREE_COLOR: Color = Color::srgb_u8(34, 100, 34);
const BUILDING_COLOR: Color = Color::srgb_u8(100, 100, 100);
const PLAYER_HULL_COLOR: Color = Color::srgb_u8(0, 100, 200);
const ENEMY_HULL_COLOR: Color = Color::srgb_u8(200, 100, 0);
const CANNON_COLOR: Color = Color::srgb_u8(50, 50, 50);
const PLAYER_SHELL_COLOR: Color = Color::srgb_u8(255, 255, 0);
const ENEMY_SHELL_COLOR: Color = Color::srgb_u8(255, 100, 100);

const HULL_SIZE: Vec2 = Vec2::new(30.0, 20.0);
const CANNON_LENGTH: f32 = 35.0;
const SHELL_RADIUS: f32 = 3.0;
const HEALTH_BAR_SIZE: Vec2 = Vec2::new(30.0, 4.0);
/// Bar centre sits this far above the hull centre.
const HEALTH_BAR_LIFT: f32 = 23.0;

/// Map a y-down world point into Bevy's y-up 2D space.
#[inline]
pub fn to_screen_space(p: Vec2) -> Vec2 {
    Vec2::new(p.x, -p.y)
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// The camera always shows exactly `battle.screen()` world units, whatever the
/// window size, so the follow camera's clamp keeps the view on the map.
pub fn setup_top_down_camera_system(mut commands: Commands, battle: Res<TopDownBattle>) {
    commands.spawn((Camera2d, fixed_view_projection(battle.screen())));
}

/// Orthographic projection pinned to a `screen`-sized view.
pub fn fixed_view_projection(screen: Vec2) -> Projection {
    Projection::Orthographic(OrthographicProjection {
        scaling_mode: ScalingMode::Fixed {
            width: screen.x,
            height: screen.y,
        },
        ..OrthographicProjection::default_2d()
    })
}

/// Upload the whole obstacle field as a single batched mesh.
pub fn spawn_obstacle_mesh_system(
    mut commands: Commands,
    battle: Res<TopDownBattle>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    if battle.map.obstacles.is_empty() {
        return;
    }
    commands.spawn((
        Mesh2d(meshes.add(obstacle_field_mesh(&battle.map.obstacles))),
        MeshMaterial2d(materials.add(ColorMaterial::from_color(Color::WHITE))),
        Transform::from_xyz(0.0, 0.0, -1.0),
    ));
    info!(
        "[top-down] obstacle mesh built from {} obstacles",
        battle.map.obstacles.len()
    );
}

/// Two triangles per obstacle, coloured by kind.
pub fn obstacle_field_mesh(obstacles: &[Obstacle]) -> Mesh {
    let n = obstacles.len();
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(n * 4);
    let mut colors: Vec<[f32; 4]> = Vec::with_capacity(n * 4);
    let mut indices: Vec<u32> = Vec::with_capacity(n * 6);

    for obstacle in obstacles {
        let top_left = obstacle.position;
        let bottom_right = obstacle.position + obstacle.size;
        // Counter-clockwise once y is flipped.
        let corners = [
            top_left,
            Vec2::new(top_left.x, bottom_right.y),
            bottom_right,
            Vec2::new(bottom_right.x, top_left.y),
        ];
        let base = positions.len() as u32;
        let c = obstacle_color(obstacle.kind).to_linear();
        let color = [c.red, c.green, c.blue, c.alpha];
        for corner in corners {
            let p = to_screen_space(corner);
            positions.push([p.x, p.y, 0.0]);
            colors.push(color);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    let normals: Vec<[f32; 3]> = vec![[0.0, 0.0, 1.0]; positions.len()];
    let uvs: Vec<[f32; 2]> = vec![[0.0, 0.0]; positions.len()];

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

pub fn obstacle_color(kind: ObstacleKind) -> Color {
    match kind {
        ObstacleKind::Tree => TREE_COLOR,
        ObstacleKind::Building => BUILDING_COLOR,
    }
}

// ── Per-frame ─────────────────────────────────────────────────────────────────

/// Point the camera at the centre of the follow camera's view.
pub fn top_down_camera_system(
    battle: Res<TopDownBattle>,
    mut q_camera: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(mut cam) = q_camera.single_mut() else {
        return;
    };
    let centre = to_screen_space(battle.camera.view_centre(battle.screen()));
    cam.translation.x = centre.x;
    cam.translation.y = centre.y;
}

/// Draw operational tanks, enemy health bars and shells.
pub fn top_down_gizmo_system(mut gizmos: Gizmos, battle: Res<TopDownBattle>) {
    let tanks = std::iter::once(&battle.player).chain(battle.enemies.iter());
    for tank in tanks.filter(|t| t.hull.is_operational()) {
        draw_tank(&mut gizmos, tank);
    }

    for shell in &battle.shells {
        let color = match shell.allegiance {
            Allegiance::Player => PLAYER_SHELL_COLOR,
            Allegiance::Enemy => ENEMY_SHELL_COLOR,
        };
        gizmos.circle_2d(to_screen_space(shell.position), SHELL_RADIUS, color);
    }
}

fn draw_tank(gizmos: &mut Gizmos, tank: &TopDownTank) {
    let pos = to_screen_space(tank.position);
    // y flip mirrors the rotation sense.
    let rotation = Rot2::radians(-tank.heading);
    let (hull_color, is_enemy) = match tank.hull.allegiance() {
        Allegiance::Player => (PLAYER_HULL_COLOR, false),
        Allegiance::Enemy => (ENEMY_HULL_COLOR, true),
    };

    gizmos.rect_2d(Isometry2d::new(pos, rotation), HULL_SIZE, hull_color);
    let muzzle = pos + to_screen_space(tank.forward()) * CANNON_LENGTH;
    gizmos.line_2d(pos, muzzle, CANNON_COLOR);

    if is_enemy {
        let fraction = tank.hull.fraction().clamp(0.0, 1.0);
        let centre = pos + Vec2::new(0.0, HEALTH_BAR_LIFT);
        gizmos.rect_2d(
            Isometry2d::from_translation(centre),
            HEALTH_BAR_SIZE,
            Color::srgb(0.8, 0.0, 0.0),
        );
        let left = centre - Vec2::new(HEALTH_BAR_SIZE.x / 2.0, 0.0);
        if let Some((length, color)) = health_bar_fill(fraction) {
            gizmos.line_2d(left, left + Vec2::new(length, 0.0), color);
        }
    }
}

/// Fill length and tier colour of an enemy health bar; `None` when empty.
pub fn health_bar_fill(fraction: f32) -> Option<(f32, Color)> {
    let fraction = fraction.clamp(0.0, 1.0);
    (fraction > 0.0).then(|| {
        (
            HEALTH_BAR_SIZE.x * fraction,
            HealthTier::from_fraction(fraction).color(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle(x: f32, y: f32, kind: ObstacleKind) -> Obstacle {
        Obstacle {
            position: Vec2::new(x, y),
            size: Vec2::new(10.0, 20.0),
            kind,
        }
    }

    #[test]
    fn y_axis_is_flipped() {
        assert_eq!(to_screen_space(Vec2::new(3.0, 4.0)), Vec2::new(3.0, -4.0));
    }

    #[test]
    fn mesh_has_four_vertices_and_six_indices_per_obstacle() {
        let mesh = obstacle_field_mesh(&[
            obstacle(0.0, 0.0, ObstacleKind::Tree),
            obstacle(50.0, 60.0, ObstacleKind::Building),
        ]);
        assert_eq!(mesh.count_vertices(), 8);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(12));
        assert!(mesh.attribute(Mesh::ATTRIBUTE_COLOR).is_some());
    }

    #[test]
    fn mesh_corners_are_flipped_into_screen_space() {
        let mesh = obstacle_field_mesh(&[obstacle(50.0, 60.0, ObstacleKind::Tree)]);
        let Some(bevy_mesh::VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("positions missing");
        };
        assert_eq!(positions[0], [50.0, -60.0, 0.0]);
        assert_eq!(positions[2], [60.0, -80.0, 0.0]);
    }

    #[test]
    fn health_bar_fill_is_tiered() {
        assert_eq!(
            health_bar_fill(1.0),
            Some((30.0, HealthTier::Healthy.color()))
        );
        assert_eq!(
            health_bar_fill(0.5),
            Some((15.0, HealthTier::Worn.color()))
        );
        assert_eq!(
            health_bar_fill(0.25),
            Some((7.5, HealthTier::Critical.color()))
        );
        assert_eq!(health_bar_fill(0.0), None);
    }

    #[test]
    fn projection_is_pinned_to_the_screen_size() {
        let Projection::Orthographic(ortho) = fixed_view_projection(Vec2::new(1024.0, 768.0))
        else {
            panic!("expected an orthographic projection");
        };
        match ortho.scaling_mode {
            ScalingMode::Fixed { width, height } => {
                assert_eq!((width, height), (1024.0, 768.0));
            }
            other => panic!("unexpected scaling mode {other:?}"),
        }
    }

    #[test]
    fn obstacle_kinds_have_distinct_colours() {
        assert_ne!(
            obstacle_color(ObstacleKind::Tree),
            obstacle_color(ObstacleKind::Building)
        );
    }
}
