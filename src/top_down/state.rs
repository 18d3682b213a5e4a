//! Plain-data state for the top-down battle: tanks, shells, obstacles, camera.
//!
//! World coordinates put the origin at the map's top-left corner with y
//! pointing down; heading 0 faces +x and positive turns are clockwise on
//! screen.  Conversion to Bevy's y-up space happens only in
//! [`super::rendering`].

use crate::combat::{Arena, Shell, Target};
use crate::config::TanksConfig;
use crate::pursuit::normalize_angle;
use crate::vehicle::{Allegiance, Drivetrain, FireControl, Gun, Hull};
use bevy::prelude::*;
use rand::Rng;
use std::time::Duration;

// ── Tank ──────────────────────────────────────────────────────────────────────

/// A hull-only tank: the cannon always points along the heading.
#[derive(Debug, Clone, PartialEq)]
pub struct TopDownTank {
    pub position: Vec2,
    /// Radians; 0 faces +x.
    pub heading: f32,
    pub hull: Hull,
    pub fire_control: FireControl,
    drivetrain: Drivetrain,
    gun: Gun,
    arena: Arena,
}

impl TopDownTank {
    pub fn new(position: Vec2, allegiance: Allegiance, config: &TanksConfig) -> Self {
        Self {
            position,
            heading: 0.0,
            hull: Hull::new(config.max_health, allegiance),
            fire_control: FireControl::new(config.top_down_fire_cooldown()),
            drivetrain: Drivetrain {
                speed: config.top_down_tank_speed,
                turn_rate: config.top_down_turn_rate,
                reverse_factor: config.reverse_speed_factor,
            },
            gun: Gun {
                muzzle_offset: config.top_down_muzzle_offset,
                muzzle_height: 0.0,
                shell_speed: config.top_down_shell_speed,
                shell_lifetime: config.top_down_shell_lifetime,
            },
            arena: top_down_arena(config),
        }
    }

    #[inline]
    pub fn drivetrain(&self) -> &Drivetrain {
        &self.drivetrain
    }

    /// Unit vector along the heading: `(cos h, sin h)`.
    #[inline]
    pub fn forward(&self) -> Vec2 {
        Vec2::from_angle(self.heading)
    }

    pub fn move_forward(&mut self) {
        let step = self.forward() * self.drivetrain.speed;
        self.position = self.arena.clamp(self.position + step);
    }

    pub fn move_backward(&mut self) {
        let step = self.forward() * self.drivetrain.reverse_speed();
        self.position = self.arena.clamp(self.position - step);
    }

    pub fn turn_left(&mut self) {
        self.heading = normalize_angle(self.heading - self.drivetrain.turn_rate);
    }

    pub fn turn_right(&mut self) {
        self.heading = normalize_angle(self.heading + self.drivetrain.turn_rate);
    }

    /// Fire along the heading if the cooldown allows it.
    ///
    /// Wrecked tanks never fire.
    pub fn fire(&mut self, now: Duration) -> Option<TopDownShell> {
        if !self.hull.is_operational() || !self.fire_control.try_trigger(now) {
            return None;
        }
        let dir = self.forward();
        Some(TopDownShell {
            position: self.position + dir * self.gun.muzzle_offset,
            velocity: dir * self.gun.shell_speed,
            lifetime: self.gun.shell_lifetime,
            allegiance: self.hull.allegiance(),
        })
    }
}

impl Target for TopDownTank {
    fn hull(&self) -> &Hull {
        &self.hull
    }

    fn hull_mut(&mut self) -> &mut Hull {
        &mut self.hull
    }

    fn ground_point(&self) -> Vec2 {
        self.position
    }
}

/// Map rectangle `[0, width] × [0, height]`.
pub fn top_down_arena(config: &TanksConfig) -> Arena {
    Arena::new(
        Vec2::ZERO,
        Vec2::new(config.top_down_map_width, config.top_down_map_height),
    )
}

// ── Shell ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct TopDownShell {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Ticks left before the shell expires.
    pub lifetime: u32,
    pub allegiance: Allegiance,
}

impl Shell for TopDownShell {
    fn advance(&mut self) {
        self.position += self.velocity;
        self.lifetime = self.lifetime.saturating_sub(1);
    }

    fn lifetime(&self) -> u32 {
        self.lifetime
    }

    fn allegiance(&self) -> Allegiance {
        self.allegiance
    }

    fn ground_point(&self) -> Vec2 {
        self.position
    }
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Tree,
    Building,
}

/// Decorative rectangle anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub position: Vec2,
    pub size: Vec2,
    pub kind: ObstacleKind,
}

/// Static obstacle field, generated once per battle.
#[derive(Debug, Clone, PartialEq)]
pub struct GameMap {
    pub obstacles: Vec<Obstacle>,
}

impl GameMap {
    /// Scatter trees (20–50 px) then buildings (50–100 px) across the map.
    pub fn generate<R: Rng>(config: &TanksConfig, rng: &mut R) -> Self {
        let map = Vec2::new(config.top_down_map_width, config.top_down_map_height);
        let mut obstacles =
            Vec::with_capacity(config.top_down_tree_count + config.top_down_building_count);

        let mut scatter = |kind: ObstacleKind, count: usize, base: f32, extra: f32| {
            for _ in 0..count {
                let position = Vec2::new(rng.gen::<f32>() * map.x, rng.gen::<f32>() * map.y);
                let size = Vec2::new(
                    base + rng.gen::<f32>() * extra,
                    base + rng.gen::<f32>() * extra,
                );
                obstacles.push(Obstacle {
                    position,
                    size,
                    kind,
                });
            }
        };
        scatter(ObstacleKind::Tree, config.top_down_tree_count, 20.0, 30.0);
        scatter(ObstacleKind::Building, config.top_down_building_count, 50.0, 50.0);

        Self { obstacles }
    }
}

// ── Camera ────────────────────────────────────────────────────────────────────

/// Top-left corner of the visible screen in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FollowCamera {
    pub offset: Vec2,
}

impl FollowCamera {
    /// Centre on `target`, then clamp so the view never leaves the map.
    pub fn follow(&mut self, target: Vec2, screen: Vec2, map: Vec2) {
        let max = (map - screen).max(Vec2::ZERO);
        self.offset = (target - screen / 2.0).clamp(Vec2::ZERO, max);
    }

    /// Centre of the visible area.
    pub fn view_centre(&self, screen: Vec2) -> Vec2 {
        self.offset + screen / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f32::consts::TAU;

    fn player_at(x: f32, y: f32) -> TopDownTank {
        TopDownTank::new(
            Vec2::new(x, y),
            Allegiance::Player,
            &TanksConfig::default(),
        )
    }

    #[test]
    fn forward_moves_two_pixels_along_heading() {
        let mut tank = player_at(100.0, 100.0);
        tank.move_forward();
        assert!(tank.position.abs_diff_eq(Vec2::new(102.0, 100.0), 1e-5));
    }

    #[test]
    fn backward_is_half_of_forward() {
        let mut a = player_at(500.0, 500.0);
        let mut b = player_at(500.0, 500.0);
        a.heading = 0.7;
        b.heading = 0.7;
        a.move_forward();
        b.move_backward();
        let fwd = (a.position - Vec2::splat(500.0)).length();
        let back = (b.position - Vec2::splat(500.0)).length();
        assert!((back * 2.0 - fwd).abs() < 1e-4);
    }

    #[test]
    fn left_then_right_restores_heading() {
        let mut tank = player_at(0.0, 0.0);
        tank.heading = 1.234;
        tank.turn_left();
        tank.turn_right();
        assert!(((tank.heading - 1.234) % TAU).abs() < 1e-6);
    }

    #[test]
    fn heading_wraps_past_half_turn() {
        let mut tank = player_at(0.0, 0.0);
        tank.heading = 3.12;
        tank.turn_right();
        assert!((tank.heading - (3.17 - TAU)).abs() < 1e-5);

        for _ in 0..1000 {
            tank.turn_left();
        }
        assert!(tank.heading > -std::f32::consts::PI && tank.heading <= std::f32::consts::PI);
    }

    #[test]
    fn moves_are_clamped_even_from_outside() {
        let mut tank = player_at(-40.0, 3000.0);
        tank.move_backward();
        assert_eq!(tank.position, Vec2::new(0.0, 1536.0));

        let mut edge = player_at(2047.0, 10.0);
        edge.move_forward();
        assert_eq!(edge.position.x, 2048.0);
    }

    #[test]
    fn fire_spawns_at_muzzle_then_respects_cooldown() {
        let mut tank = player_at(100.0, 100.0);
        let shell = tank.fire(Duration::from_millis(10)).unwrap();
        assert!(shell.position.abs_diff_eq(Vec2::new(125.0, 100.0), 1e-5));
        assert!(shell.velocity.abs_diff_eq(Vec2::new(8.0, 0.0), 1e-5));
        assert_eq!(shell.lifetime, 180);
        assert_eq!(shell.allegiance, Allegiance::Player);

        assert!(tank.fire(Duration::from_millis(509)).is_none());
        assert!(tank.fire(Duration::from_millis(510)).is_some());
    }

    #[test]
    fn wrecked_tank_cannot_fire() {
        let mut tank = player_at(100.0, 100.0);
        tank.hull.take_damage(100);
        assert!(tank.fire(Duration::from_secs(5)).is_none());
    }

    #[test]
    fn shell_lifetime_drops_by_one_per_advance() {
        let mut tank = player_at(100.0, 100.0);
        let mut shell = tank.fire(Duration::ZERO).unwrap();
        shell.advance();
        assert_eq!(shell.lifetime, 179);
        assert!(shell.position.abs_diff_eq(Vec2::new(133.0, 100.0), 1e-5));
    }

    #[test]
    fn map_generation_is_seeded_and_in_range() {
        let config = TanksConfig::default();
        let a = GameMap::generate(&config, &mut StdRng::seed_from_u64(3));
        let b = GameMap::generate(&config, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
        assert_eq!(a.obstacles.len(), 60);

        for (i, obstacle) in a.obstacles.iter().enumerate() {
            assert!(obstacle.position.x >= 0.0 && obstacle.position.x < 2048.0);
            assert!(obstacle.position.y >= 0.0 && obstacle.position.y < 1536.0);
            let (lo, hi, kind) = if i < 50 {
                (20.0, 50.0, ObstacleKind::Tree)
            } else {
                (50.0, 100.0, ObstacleKind::Building)
            };
            assert_eq!(obstacle.kind, kind);
            assert!(obstacle.size.x >= lo && obstacle.size.x < hi);
            assert!(obstacle.size.y >= lo && obstacle.size.y < hi);
        }
    }

    #[test]
    fn camera_centres_and_clamps() {
        let screen = Vec2::new(1024.0, 768.0);
        let map = Vec2::new(2048.0, 1536.0);
        let mut camera = FollowCamera::default();

        camera.follow(Vec2::new(100.0, 100.0), screen, map);
        assert_eq!(camera.offset, Vec2::ZERO);

        camera.follow(Vec2::new(1000.0, 700.0), screen, map);
        assert_eq!(camera.offset, Vec2::new(488.0, 316.0));

        camera.follow(Vec2::new(2048.0, 1536.0), screen, map);
        assert_eq!(camera.offset, Vec2::new(1024.0, 768.0));
    }
}
