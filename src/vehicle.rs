//! Variant-independent tank state: allegiance, hull integrity and fire control.
//!
//! Both [`crate::top_down::TopDownTank`] and [`crate::third_person::TurretTank`]
//! embed a [`Hull`] and a [`FireControl`]; everything that decides whether a
//! tank may act lives here so the two games cannot drift apart.

use std::time::Duration;

/// Which side fired a shell or drives a tank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allegiance {
    Player,
    Enemy,
}

/// Explicit participation flag.
///
/// A tank is never removed from its battle.  Once its health reaches zero it
/// becomes `Wrecked` and every system (input, AI, collision, drawing) skips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HullStatus {
    Operational,
    Wrecked,
}

/// Health bookkeeping for one tank.
#[derive(Debug, Clone, PartialEq)]
pub struct Hull {
    health: i32,
    max_health: i32,
    status: HullStatus,
    allegiance: Allegiance,
}

impl Hull {
    pub fn new(max_health: i32, allegiance: Allegiance) -> Self {
        let max_health = max_health.max(1);
        Self {
            health: max_health,
            max_health,
            status: HullStatus::Operational,
            allegiance,
        }
    }

    #[inline]
    pub fn health(&self) -> i32 {
        self.health
    }

    #[inline]
    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    #[inline]
    pub fn status(&self) -> HullStatus {
        self.status
    }

    #[inline]
    pub fn allegiance(&self) -> Allegiance {
        self.allegiance
    }

    #[inline]
    pub fn is_operational(&self) -> bool {
        self.status == HullStatus::Operational
    }

    /// Remaining health as a fraction of the maximum, in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        self.health as f32 / self.max_health as f32
    }

    /// Subtract `amount` and clamp at zero.
    ///
    /// Returns `true` when this call wrecked the hull.  Damage to a hull that
    /// is already wrecked changes nothing.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.is_operational() {
            return false;
        }
        self.health = (self.health - amount.max(0)).clamp(0, self.max_health);
        if self.health == 0 {
            self.status = HullStatus::Wrecked;
            return true;
        }
        false
    }
}

/// Per-tick movement rates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drivetrain {
    pub speed: f32,
    pub turn_rate: f32,
    /// Backward speed as a fraction of `speed`.
    pub reverse_factor: f32,
}

impl Drivetrain {
    #[inline]
    pub fn reverse_speed(&self) -> f32 {
        self.speed * self.reverse_factor
    }
}

/// Where shells leave the barrel and how they fly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gun {
    /// Distance from the hull origin along the firing direction.
    pub muzzle_offset: f32,
    /// Height above the hull origin (unused top-down).
    pub muzzle_height: f32,
    pub shell_speed: f32,
    pub shell_lifetime: u32,
}

/// Wall-clock cooldown between successive shots.
///
/// Time is injected as a [`Duration`] since startup so the rule can be tested
/// without a real clock.
#[derive(Debug, Clone, PartialEq)]
pub struct FireControl {
    cooldown: Duration,
    last_shot: Option<Duration>,
}

impl FireControl {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_shot: None,
        }
    }

    #[inline]
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    #[inline]
    pub fn last_shot(&self) -> Option<Duration> {
        self.last_shot
    }

    /// Whether a shot at `now` would be allowed.  The first shot always is.
    pub fn ready(&self, now: Duration) -> bool {
        match self.last_shot {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.cooldown,
        }
    }

    /// Record a shot at `now` if allowed; returns whether it was.
    pub fn try_trigger(&mut self, now: Duration) -> bool {
        if !self.ready(now) {
            return false;
        }
        self.last_shot = Some(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_clamps_at_zero_and_wrecks() {
        let mut hull = Hull::new(100, Allegiance::Player);
        assert!(!hull.take_damage(25));
        assert_eq!(hull.health(), 75);
        assert!(hull.take_damage(500));
        assert_eq!(hull.health(), 0);
        assert_eq!(hull.status(), HullStatus::Wrecked);
    }

    #[test]
    fn wrecked_hull_ignores_further_damage() {
        let mut hull = Hull::new(50, Allegiance::Enemy);
        hull.take_damage(50);
        assert!(!hull.take_damage(25));
        assert_eq!(hull.health(), 0);
        assert!(!hull.is_operational());
    }

    #[test]
    fn four_hits_of_25_wreck_a_full_hull() {
        let mut hull = Hull::new(100, Allegiance::Player);
        let wrecked: Vec<bool> = (0..4).map(|_| hull.take_damage(25)).collect();
        assert_eq!(wrecked, vec![false, false, false, true]);
    }

    #[test]
    fn fraction_tracks_health() {
        let mut hull = Hull::new(100, Allegiance::Enemy);
        hull.take_damage(25);
        assert!((hull.fraction() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn first_shot_is_always_ready() {
        let mut fire = FireControl::new(Duration::from_millis(500));
        assert!(fire.try_trigger(Duration::ZERO));
        assert_eq!(fire.last_shot(), Some(Duration::ZERO));
    }

    #[test]
    fn shot_inside_cooldown_is_refused_without_side_effect() {
        let mut fire = FireControl::new(Duration::from_millis(500));
        assert!(fire.try_trigger(Duration::from_millis(1_000)));
        assert!(!fire.try_trigger(Duration::from_millis(1_499)));
        assert_eq!(fire.last_shot(), Some(Duration::from_millis(1_000)));
    }

    #[test]
    fn shot_exactly_on_cooldown_boundary_is_allowed() {
        let mut fire = FireControl::new(Duration::from_millis(500));
        assert!(fire.try_trigger(Duration::from_millis(1_000)));
        assert!(fire.try_trigger(Duration::from_millis(1_500)));
    }
}
