//! Seeded randomness for obstacle placement and aim spread.
//!
//! Every random draw in a battle goes through the single [`BattleRng`]
//! resource so a run can be replayed by pinning `seed` in `assets/tanks.toml`.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{SystemTime, UNIX_EPOCH};

/// The battle's only random source.
#[derive(Resource)]
pub struct BattleRng(pub StdRng);

impl BattleRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

/// Use the configured seed, or derive one from the wall clock.
pub fn resolve_seed(configured: Option<u64>) -> u64 {
    configured.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    })
}
