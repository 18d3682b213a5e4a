//! Plain-data state for the third-person battle: turret tanks, shells,
//! terrain and the chase camera.
//!
//! The ground is the x,z plane with y up.  Heading 0 faces +z and the forward
//! vector is `(sin h, 0, cos h)`.  The turret angle is relative to the hull.

use super::aiming::spread_angle;
use crate::combat::{Arena, Shell, Target};
use crate::config::TanksConfig;
use crate::pursuit::normalize_angle;
use crate::vehicle::{Allegiance, Drivetrain, FireControl, Gun, Hull};
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::PI;
use std::time::Duration;

// ── Tank ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct TurretTank {
    pub position: Vec3,
    /// Hull heading in radians.
    pub heading: f32,
    /// Turret angle relative to the hull, always within `[-π, π]`.
    turret: f32,
    pub hull: Hull,
    pub fire_control: FireControl,
    drivetrain: Drivetrain,
    turret_rate: f32,
    gun: Gun,
    arena: Arena,
}

impl TurretTank {
    pub fn new(position: Vec3, allegiance: Allegiance, config: &TanksConfig) -> Self {
        Self {
            position,
            heading: 0.0,
            turret: 0.0,
            hull: Hull::new(config.max_health, allegiance),
            fire_control: FireControl::new(config.third_person_fire_cooldown()),
            drivetrain: Drivetrain {
                speed: config.third_person_tank_speed,
                turn_rate: config.third_person_turn_rate,
                reverse_factor: config.reverse_speed_factor,
            },
            turret_rate: config.third_person_turn_rate * config.third_person_turret_rate_factor,
            gun: Gun {
                muzzle_offset: config.third_person_cannon_length,
                muzzle_height: config.third_person_muzzle_height,
                shell_speed: config.third_person_shell_speed,
                shell_lifetime: config.third_person_shell_lifetime,
            },
            arena: third_person_arena(config),
        }
    }

    #[inline]
    pub fn turret(&self) -> f32 {
        self.turret
    }

    /// Absolute direction the cannon points in.
    #[inline]
    pub fn aim_angle(&self) -> f32 {
        self.heading + self.turret
    }

    /// Unit ground vector for an absolute angle: `(sin a, 0, cos a)`.
    #[inline]
    pub fn direction(angle: f32) -> Vec3 {
        Vec3::new(angle.sin(), 0.0, angle.cos())
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        Self::direction(self.heading)
    }

    pub fn move_forward(&mut self) {
        self.translate(self.forward() * self.drivetrain.speed);
    }

    pub fn move_backward(&mut self) {
        self.translate(-self.forward() * self.drivetrain.reverse_speed());
    }

    fn translate(&mut self, step: Vec3) {
        let moved = self.position + step;
        let ground = self.arena.clamp(Vec2::new(moved.x, moved.z));
        self.position = Vec3::new(ground.x, moved.y, ground.y);
    }

    pub fn turn_left(&mut self) {
        self.heading = normalize_angle(self.heading - self.drivetrain.turn_rate);
    }

    pub fn turn_right(&mut self) {
        self.heading = normalize_angle(self.heading + self.drivetrain.turn_rate);
    }

    pub fn turret_left(&mut self) {
        self.set_turret(self.turret - self.turret_rate);
    }

    pub fn turret_right(&mut self) {
        self.set_turret(self.turret + self.turret_rate);
    }

    /// Set the hull-relative turret angle, clamped to `[-π, π]`.
    pub fn set_turret(&mut self, angle: f32) {
        self.turret = angle.clamp(-PI, PI);
    }

    /// Fire straight along the turret.
    pub fn fire(&mut self, now: Duration) -> Option<ThirdPersonShell> {
        if !self.hull.is_operational() || !self.fire_control.try_trigger(now) {
            return None;
        }
        Some(self.shell_along(self.aim_angle()))
    }

    /// Fire along the turret with a random spread derived from `radius`.
    ///
    /// The RNG is only drawn from when the shot actually happens.
    pub fn fire_with_accuracy<R: Rng>(
        &mut self,
        now: Duration,
        radius: f32,
        rng: &mut R,
    ) -> Option<ThirdPersonShell> {
        if !self.hull.is_operational() || !self.fire_control.try_trigger(now) {
            return None;
        }
        let angle = self.aim_angle() + spread_angle(radius, rng);
        Some(self.shell_along(angle))
    }

    fn shell_along(&self, angle: f32) -> ThirdPersonShell {
        let dir = Self::direction(angle);
        ThirdPersonShell {
            position: self.position
                + dir * self.gun.muzzle_offset
                + Vec3::Y * self.gun.muzzle_height,
            velocity: dir * self.gun.shell_speed,
            lifetime: self.gun.shell_lifetime,
            allegiance: self.hull.allegiance(),
        }
    }
}

impl Target for TurretTank {
    fn hull(&self) -> &Hull {
        &self.hull
    }

    fn hull_mut(&mut self) -> &mut Hull {
        &mut self.hull
    }

    fn ground_point(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.z)
    }
}

/// Square `[-size, size]²` on the x,z plane.
pub fn third_person_arena(config: &TanksConfig) -> Arena {
    Arena::centered(config.third_person_map_size)
}

// ── Shell ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ThirdPersonShell {
    pub position: Vec3,
    pub velocity: Vec3,
    pub lifetime: u32,
    pub allegiance: Allegiance,
}

impl Shell for ThirdPersonShell {
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
        Vec2::new(self.position.x, self.position.z)
    }
}

// ── Terrain ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainFeature {
    Building,
    Tree,
}

/// A box standing on the ground at `position` (its footprint centre).
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainObstacle {
    pub position: Vec3,
    pub size: Vec3,
    pub feature: TerrainFeature,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Terrain {
    pub obstacles: Vec<TerrainObstacle>,
}

impl Terrain {
    /// Buildings across `±0.75·map`, then trees across `±0.9·map`.
    pub fn generate<R: Rng>(config: &TanksConfig, rng: &mut R) -> Self {
        let map = config.third_person_map_size;
        let mut obstacles = Vec::with_capacity(
            config.third_person_building_count + config.third_person_tree_count,
        );

        for _ in 0..config.third_person_building_count {
            let position = scatter(rng, map * 1.5);
            let size = Vec3::new(
                2.0 + rng.gen::<f32>() * 4.0,
                1.0 + rng.gen::<f32>() * 3.0,
                2.0 + rng.gen::<f32>() * 4.0,
            );
            obstacles.push(TerrainObstacle {
                position,
                size,
                feature: TerrainFeature::Building,
            });
        }
        for _ in 0..config.third_person_tree_count {
            let position = scatter(rng, map * 1.8);
            let size = Vec3::new(
                0.5 + rng.gen::<f32>(),
                3.0 + rng.gen::<f32>() * 2.0,
                0.5 + rng.gen::<f32>(),
            );
            obstacles.push(TerrainObstacle {
                position,
                size,
                feature: TerrainFeature::Tree,
            });
        }

        Self { obstacles }
    }
}

/// Uniform point on the ground in `[-span/2, span/2)²`.
fn scatter<R: Rng>(rng: &mut R, span: f32) -> Vec3 {
    let x = (rng.gen::<f32>() - 0.5) * span;
    let z = (rng.gen::<f32>() - 0.5) * span;
    Vec3::new(x, 0.0, z)
}

// ── Camera ────────────────────────────────────────────────────────────────────

/// Eye and look-at point of the camera trailing the player.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChaseCamera {
    pub eye: Vec3,
    pub target: Vec3,
}

impl ChaseCamera {
    /// Sit `distance` behind the hull at height `height`, looking at the
    /// player raised by `lift`.
    pub fn follow(&mut self, position: Vec3, heading: f32, distance: f32, height: f32, lift: f32) {
        let back = TurretTank::direction(heading) * distance;
        self.eye = Vec3::new(position.x - back.x, height, position.z - back.z);
        self.target = position + Vec3::Y * lift;
    }
}
