//! Aiming-accuracy model.
//!
//! Holding the steady-aim input shrinks the spread radius toward its minimum;
//! anything else lets it grow back toward the maximum.  When a shot is fired
//! the current radius becomes a random angular offset, see [`spread_angle`].

use crate::config::TanksConfig;
use crate::constants::{AIM_SPREAD_NORMALISER, AIM_SPREAD_SCALE};
use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct AimingCircle {
    radius: f32,
    min: f32,
    max: f32,
    shrink_rate: f32,
    expand_rate: f32,
    steadying: bool,
}

impl AimingCircle {
    pub fn new(config: &TanksConfig) -> Self {
        let min = config.aim_radius_min;
        let max = config.aim_radius_max.max(min);
        Self {
            radius: config.aim_radius_start.clamp(min, max),
            min,
            max,
            shrink_rate: config.aim_shrink_rate,
            expand_rate: config.aim_expand_rate,
            steadying: false,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn steadying(&self) -> bool {
        self.steadying
    }

    /// One tick: shrink while steadying, expand otherwise.
    pub fn update(&mut self, steadying: bool) {
        self.steadying = steadying;
        self.radius = if steadying {
            (self.radius - self.shrink_rate).max(self.min)
        } else {
            (self.radius + self.expand_rate).min(self.max)
        };
    }

    /// 1.0 at the minimum radius, 0.0 at the maximum.
    pub fn accuracy(&self) -> f32 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 1.0;
        }
        ((self.max - self.radius) / span).clamp(0.0, 1.0)
    }
}

/// Random angular offset for a shot fired with spread `radius`.
///
/// Uniform in `±0.5 · AIM_SPREAD_SCALE · radius / AIM_SPREAD_NORMALISER`.
pub fn spread_angle<R: Rng>(radius: f32, rng: &mut R) -> f32 {
    (rng.gen::<f32>() - 0.5) * (radius / AIM_SPREAD_NORMALISER) * AIM_SPREAD_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn circle() -> AimingCircle {
        AimingCircle::new(&TanksConfig::default())
    }

    #[test]
    fn starts_at_fifty() {
        let c = circle();
        assert_eq!(c.radius(), 50.0);
        assert!((c.accuracy() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn steadying_settles_at_minimum() {
        let mut c = circle();
        c.update(true);
        assert_eq!(c.radius(), 48.5);
        for _ in 0..100 {
            c.update(true);
        }
        assert_eq!(c.radius(), 20.0);
        assert_eq!(c.accuracy(), 1.0);
    }

    #[test]
    fn releasing_settles_at_maximum() {
        let mut c = circle();
        for _ in 0..100 {
            c.update(false);
        }
        assert_eq!(c.radius(), 80.0);
        assert_eq!(c.accuracy(), 0.0);
        assert!(!c.steadying());
    }

    #[test]
    fn spread_is_bounded_by_radius() {
        let mut rng = StdRng::seed_from_u64(11);
        for radius in [20.0_f32, 50.0, 80.0] {
            let bound = 0.1 * radius / 100.0;
            for _ in 0..200 {
                let a = spread_angle(radius, &mut rng);
                assert!(a.abs() <= bound + 1e-7, "{a} exceeds {bound}");
            }
        }
    }
}
