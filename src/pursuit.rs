//! Enemy pursuit policy shared by both variants.
//!
//! The policy is purely reactive: each tick it looks at the distance and
//! bearing to the player and picks one manoeuvre.  The variants differ only
//! in how they measure the bearing (`atan2(dy, dx)` top-down, `atan2(dx, dz)`
//! third-person), so they feed the same [`pursue`] function.

use std::f32::consts::{PI, TAU};

/// Tuning for one variant's enemies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PursuitParams {
    /// Inside this distance the enemy holds position.
    pub near_field: f32,
    /// Heading error tolerated before the enemy drives instead of turning.
    pub deadband: f32,
    /// The enemy only fires when the player is closer than this.
    pub fire_range: f32,
    /// The enemy fires on ticks that are a multiple of this.
    pub fire_interval: u64,
}

/// What an enemy does with its hull this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Manoeuvre {
    TurnLeft,
    TurnRight,
    Advance,
    Hold,
}

/// Wrap any angle into `(-π, π]`.
pub fn normalize_angle(angle: f32) -> f32 {
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    a
}

/// Choose a manoeuvre from the distance to the player and the bearing to it.
///
/// A positive heading error turns right (heading increases), a negative one
/// turns left.
pub fn pursue(heading: f32, bearing: f32, distance: f32, params: &PursuitParams) -> Manoeuvre {
    if distance <= params.near_field {
        return Manoeuvre::Hold;
    }
    let error = normalize_angle(bearing - heading);
    if error.abs() > params.deadband {
        if error > 0.0 {
            Manoeuvre::TurnRight
        } else {
            Manoeuvre::TurnLeft
        }
    } else {
        Manoeuvre::Advance
    }
}

/// Whether an enemy should try to fire on tick `frame`.
///
/// The tank's own cooldown still applies on top of this schedule.
pub fn wants_to_fire(frame: u64, distance: f32, params: &PursuitParams) -> bool {
    params.fire_interval > 0 && frame % params.fire_interval == 0 && distance < params.fire_range
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> PursuitParams {
        PursuitParams {
            near_field: 50.0,
            deadband: 0.1,
            fire_range: 300.0,
            fire_interval: 120,
        }
    }

    #[test]
    fn normalize_lands_in_half_open_interval() {
        for raw in [-20.0_f32, -PI, -3.0, 0.0, 3.0, PI, 7.0, 50.0] {
            let a = normalize_angle(raw);
            assert!(a > -PI - 1e-5 && a <= PI + 1e-5, "{raw} -> {a}");
            // Same direction as the input.
            assert!((a.sin() - raw.sin()).abs() < 1e-3);
            assert!((a.cos() - raw.cos()).abs() < 1e-3);
        }
    }

    #[test]
    fn minus_pi_maps_to_plus_pi() {
        assert!((normalize_angle(-PI) - PI).abs() < 1e-6);
    }

    #[test]
    fn far_target_off_heading_turns() {
        // Target straight "down" (π/2), tank facing 0.
        assert_eq!(pursue(0.0, PI / 2.0, 500.0, &params()), Manoeuvre::TurnRight);
        assert_eq!(pursue(0.0, -PI / 2.0, 500.0, &params()), Manoeuvre::TurnLeft);
    }

    #[test]
    fn error_is_taken_the_short_way_round() {
        // Heading 3.0, bearing -3.0: the short way is +0.28 rad, i.e. right.
        assert_eq!(pursue(3.0, -3.0, 500.0, &params()), Manoeuvre::TurnRight);
    }

    #[test]
    fn aligned_target_advances() {
        assert_eq!(pursue(1.0, 1.05, 500.0, &params()), Manoeuvre::Advance);
    }

    #[test]
    fn near_field_holds() {
        assert_eq!(pursue(0.0, PI, 50.0, &params()), Manoeuvre::Hold);
    }

    #[test]
    fn fire_schedule_needs_interval_and_range() {
        let p = params();
        assert!(wants_to_fire(240, 299.0, &p));
        assert!(!wants_to_fire(241, 299.0, &p));
        assert!(!wants_to_fire(240, 300.0, &p));
    }
}
