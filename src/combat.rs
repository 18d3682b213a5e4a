//! Shell lifecycle and hit resolution shared by both variants.
//!
//! Each tick, every live shell goes through one pass, in collection order:
//!
//! 1. **advance**: position += velocity, lifetime −= 1
//! 2. **expire**: drop the shell if its lifetime hit zero or it left the arena
//! 3. **hit test**: an enemy shell tests the player, a player shell tests each
//!    operational enemy in list order.  The first hit applies damage and
//!    removes the shell, so a shell scores at most once.
//!
//! Distances are measured on the ground plane ([`Shell::ground_point`] /
//! [`Target::ground_point`]): `(x, y)` top-down, `(x, z)` third-person.

use crate::vehicle::{Allegiance, Hull};
use bevy::prelude::*;

/// Axis-aligned rectangle on the ground plane (bounds inclusive).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub min: Vec2,
    pub max: Vec2,
}

impl Arena {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Square arena centred on the origin with half-extent `half`.
    pub fn centered(half: f32) -> Self {
        Self::new(Vec2::splat(-half), Vec2::splat(half))
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// Strict circle test: a hit needs `distance < radius`.
#[inline]
pub fn within_radius(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance(b) < radius
}

/// A projectile that can take part in a shell pass.
pub trait Shell {
    /// Move one tick and burn one tick of lifetime.
    fn advance(&mut self);
    fn lifetime(&self) -> u32;
    fn allegiance(&self) -> Allegiance;
    fn ground_point(&self) -> Vec2;

    /// Spent shells are removed before they can hit anything.
    fn is_spent(&self, arena: &Arena) -> bool {
        self.lifetime() == 0 || !arena.contains(self.ground_point())
    }
}

/// A tank that shells can hit.
pub trait Target {
    fn hull(&self) -> &Hull;
    fn hull_mut(&mut self) -> &mut Hull;
    fn ground_point(&self) -> Vec2;
}

/// Fixed rules for one variant's shell pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRules {
    pub arena: Arena,
    pub radius: f32,
    pub damage: i32,
}

/// Who a shell struck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Player,
    /// Index into the battle's enemy list.
    Enemy(usize),
}

/// One confirmed hit, reported back to the engine layer for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitEvent {
    pub target: HitTarget,
    pub remaining_health: i32,
    /// This hit took the target's health to zero.
    pub wrecked: bool,
}

/// Run one tick of shell movement, expiry and collision.
///
/// Returns the hits scored this tick, in shell order.
pub fn run_shell_pass<S, T>(
    shells: &mut Vec<S>,
    player: &mut T,
    enemies: &mut [T],
    rules: &HitRules,
) -> Vec<HitEvent>
where
    S: Shell,
    T: Target,
{
    let mut hits = Vec::new();
    shells.retain_mut(|shell| {
        shell.advance();
        if shell.is_spent(&rules.arena) {
            return false;
        }
        match strike(shell, player, enemies, rules) {
            Some(hit) => {
                hits.push(hit);
                false
            }
            None => true,
        }
    });
    hits
}

fn strike<S, T>(shell: &S, player: &mut T, enemies: &mut [T], rules: &HitRules) -> Option<HitEvent>
where
    S: Shell,
    T: Target,
{
    let point = shell.ground_point();
    match shell.allegiance() {
        Allegiance::Enemy => {
            if player.hull().is_operational()
                && within_radius(point, player.ground_point(), rules.radius)
            {
                let wrecked = player.hull_mut().take_damage(rules.damage);
                return Some(HitEvent {
                    target: HitTarget::Player,
                    remaining_health: player.hull().health(),
                    wrecked,
                });
            }
            None
        }
        Allegiance::Player => {
            let (index, enemy) = enemies.iter_mut().enumerate().find(|(_, enemy)| {
                enemy.hull().is_operational()
                    && within_radius(point, enemy.ground_point(), rules.radius)
            })?;
            let wrecked = enemy.hull_mut().take_damage(rules.damage);
            Some(HitEvent {
                target: HitTarget::Enemy(index),
                remaining_health: enemy.hull().health(),
                wrecked,
            })
        }
    }
}

/// Log a tick's hits: every hit at `debug`, wrecks at `info`.
pub fn log_hits(variant: &str, hits: &[HitEvent]) {
    for hit in hits {
        let who = match hit.target {
            HitTarget::Player => "player".to_string(),
            HitTarget::Enemy(i) => format!("enemy {i}"),
        };
        debug!(
            "[{variant}] shell hit {who}; {} health left",
            hit.remaining_health
        );
        if hit.wrecked {
            info!("[{variant}] {who} wrecked");
        }
    }
}
