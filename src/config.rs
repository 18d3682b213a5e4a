//! Runtime configuration loaded from `assets/tanks.toml`.
//!
//! [`TanksConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup the binary calls [`load_or_default`],
//! which reads the TOML file and overwrites the defaults with any values
//! present.  Missing keys fall back to the compile-time defaults, so a minimal
//! file can override just the values you care about:
//!
//! ```toml
//! variant = "third_person"
//! seed = 1234
//! aim_shrink_rate = 3.0
//! ```
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `TanksConfig::default()`.

use crate::constants::*;
use crate::error::{require_nonzero, require_positive, TankError, TankResult};
use bevy::prelude::*;
use serde::Deserialize;
use std::time::Duration;

/// Which of the two games the binary runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// 2D top-down shooter with a following camera.
    #[default]
    TopDown,
    /// 3D shooter with a turret, chase camera and aiming circle.
    ThirdPerson,
}

impl Variant {
    /// Parse the value of the `TANKS_VARIANT` environment variable.
    ///
    /// Accepts the TOML spellings plus the short `2d` / `3d` aliases.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "top_down" | "topdown" | "2d" => Some(Variant::TopDown),
            "third_person" | "thirdperson" | "3d" => Some(Variant::ThirdPerson),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Variant::TopDown => "top-down",
            Variant::ThirdPerson => "third-person",
        }
    }
}

/// Runtime-tunable gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Override any subset in `assets/tanks.toml`.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TanksConfig {
    // ── Session ──────────────────────────────────────────────────────────────
    pub variant: Variant,
    /// Seed for obstacle placement and aim spread; `None` seeds from the clock.
    pub seed: Option<u64>,
    pub tick_rate_hz: f64,
    pub screen_width: f32,
    pub screen_height: f32,

    // ── Shared combat ─────────────────────────────────────────────────────────
    pub max_health: i32,
    pub shell_damage: i32,
    pub reverse_speed_factor: f32,
    pub ai_heading_deadband: f32,

    // ── Top-down map ──────────────────────────────────────────────────────────
    pub top_down_map_width: f32,
    pub top_down_map_height: f32,
    pub top_down_tree_count: usize,
    pub top_down_building_count: usize,

    // ── Top-down tanks ────────────────────────────────────────────────────────
    pub top_down_player_start: [f32; 2],
    pub top_down_enemy_starts: Vec<[f32; 2]>,
    pub top_down_tank_speed: f32,
    pub top_down_turn_rate: f32,
    pub top_down_fire_cooldown_ms: u64,
    pub top_down_muzzle_offset: f32,
    pub top_down_shell_speed: f32,
    pub top_down_shell_lifetime: u32,
    pub top_down_hit_radius: f32,
    pub top_down_ai_near_field: f32,
    pub top_down_ai_fire_interval: u64,
    pub top_down_ai_fire_range: f32,

    // ── Third-person map ──────────────────────────────────────────────────────
    pub third_person_map_size: f32,
    pub third_person_building_count: usize,
    pub third_person_tree_count: usize,

    // ── Third-person tanks ────────────────────────────────────────────────────
    pub third_person_player_start: [f32; 3],
    pub third_person_enemy_starts: Vec<[f32; 3]>,
    pub third_person_tank_speed: f32,
    pub third_person_turn_rate: f32,
    pub third_person_turret_rate_factor: f32,
    pub third_person_fire_cooldown_ms: u64,
    pub third_person_cannon_length: f32,
    pub third_person_muzzle_height: f32,
    pub third_person_shell_speed: f32,
    pub third_person_shell_lifetime: u32,
    pub third_person_hit_radius: f32,
    pub third_person_ai_near_field: f32,
    pub third_person_ai_fire_interval: u64,
    pub third_person_ai_fire_range: f32,
    pub third_person_ai_spread_radius: f32,

    // ── Aiming circle ─────────────────────────────────────────────────────────
    pub aim_radius_start: f32,
    pub aim_radius_min: f32,
    pub aim_radius_max: f32,
    pub aim_shrink_rate: f32,
    pub aim_expand_rate: f32,

    // ── Chase camera ──────────────────────────────────────────────────────────
    pub chase_camera_distance: f32,
    pub chase_camera_height: f32,
}

impl Default for TanksConfig {
    fn default() -> Self {
        Self {
            // Session
            variant: Variant::default(),
            seed: None,
            tick_rate_hz: TICK_RATE_HZ,
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            // Shared combat
            max_health: TANK_MAX_HEALTH,
            shell_damage: SHELL_DAMAGE,
            reverse_speed_factor: REVERSE_SPEED_FACTOR,
            ai_heading_deadband: AI_HEADING_DEADBAND,
            // Top-down map
            top_down_map_width: TOP_DOWN_MAP_WIDTH,
            top_down_map_height: TOP_DOWN_MAP_HEIGHT,
            top_down_tree_count: TOP_DOWN_TREE_COUNT,
            top_down_building_count: TOP_DOWN_BUILDING_COUNT,
            // Top-down tanks
            top_down_player_start: TOP_DOWN_PLAYER_START,
            top_down_enemy_starts: TOP_DOWN_ENEMY_STARTS.to_vec(),
            top_down_tank_speed: TOP_DOWN_TANK_SPEED,
            top_down_turn_rate: TOP_DOWN_TURN_RATE,
            top_down_fire_cooldown_ms: TOP_DOWN_FIRE_COOLDOWN_MS,
            top_down_muzzle_offset: TOP_DOWN_MUZZLE_OFFSET,
            top_down_shell_speed: TOP_DOWN_SHELL_SPEED,
            top_down_shell_lifetime: TOP_DOWN_SHELL_LIFETIME,
            top_down_hit_radius: TOP_DOWN_HIT_RADIUS,
            top_down_ai_near_field: TOP_DOWN_AI_NEAR_FIELD,
            top_down_ai_fire_interval: TOP_DOWN_AI_FIRE_INTERVAL,
            top_down_ai_fire_range: TOP_DOWN_AI_FIRE_RANGE,
            // Third-person map
            third_person_map_size: THIRD_PERSON_MAP_SIZE,
            third_person_building_count: THIRD_PERSON_BUILDING_COUNT,
            third_person_tree_count: THIRD_PERSON_TREE_COUNT,
            // Third-person tanks
            third_person_player_start: THIRD_PERSON_PLAYER_START,
            third_person_enemy_starts: THIRD_PERSON_ENEMY_STARTS.to_vec(),
            third_person_tank_speed: THIRD_PERSON_TANK_SPEED,
            third_person_turn_rate: THIRD_PERSON_TURN_RATE,
            third_person_turret_rate_factor: THIRD_PERSON_TURRET_RATE_FACTOR,
            third_person_fire_cooldown_ms: THIRD_PERSON_FIRE_COOLDOWN_MS,
            third_person_cannon_length: THIRD_PERSON_CANNON_LENGTH,
            third_person_muzzle_height: THIRD_PERSON_MUZZLE_HEIGHT,
            third_person_shell_speed: THIRD_PERSON_SHELL_SPEED,
            third_person_shell_lifetime: THIRD_PERSON_SHELL_LIFETIME,
            third_person_hit_radius: THIRD_PERSON_HIT_RADIUS,
            third_person_ai_near_field: THIRD_PERSON_AI_NEAR_FIELD,
            third_person_ai_fire_interval: THIRD_PERSON_AI_FIRE_INTERVAL,
            third_person_ai_fire_range: THIRD_PERSON_AI_FIRE_RANGE,
            third_person_ai_spread_radius: THIRD_PERSON_AI_SPREAD_RADIUS,
            // Aiming circle
            aim_radius_start: AIM_RADIUS_START,
            aim_radius_min: AIM_RADIUS_MIN,
            aim_radius_max: AIM_RADIUS_MAX,
            aim_shrink_rate: AIM_SHRINK_RATE,
            aim_expand_rate: AIM_EXPAND_RATE,
            // Chase camera
            chase_camera_distance: CHASE_CAMERA_DISTANCE,
            chase_camera_height: CHASE_CAMERA_HEIGHT,
        }
    }
}

impl TanksConfig {
    pub fn top_down_fire_cooldown(&self) -> Duration {
        Duration::from_millis(self.top_down_fire_cooldown_ms)
    }

    pub fn third_person_fire_cooldown(&self) -> Duration {
        Duration::from_millis(self.third_person_fire_cooldown_ms)
    }

    /// Check every value the simulation relies on being in range.
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> TankResult<()> {
        if !(self.tick_rate_hz.is_finite() && self.tick_rate_hz > 0.0) {
            return Err(TankError::InvalidSetting {
                name: "tick_rate_hz",
                value: self.tick_rate_hz.to_string(),
                expected: "a finite value > 0",
            });
        }
        require_positive("screen_width", self.screen_width)?;
        require_positive("screen_height", self.screen_height)?;

        if self.max_health <= 0 {
            return Err(TankError::InvalidSetting {
                name: "max_health",
                value: self.max_health.to_string(),
                expected: "> 0",
            });
        }
        if self.shell_damage < 0 {
            return Err(TankError::InvalidSetting {
                name: "shell_damage",
                value: self.shell_damage.to_string(),
                expected: ">= 0",
            });
        }
        require_positive("reverse_speed_factor", self.reverse_speed_factor)?;
        require_positive("ai_heading_deadband", self.ai_heading_deadband)?;

        if self.top_down_map_width < self.screen_width {
            return Err(TankError::InvalidSetting {
                name: "top_down_map_width",
                value: self.top_down_map_width.to_string(),
                expected: ">= screen_width",
            });
        }
        if self.top_down_map_height < self.screen_height {
            return Err(TankError::InvalidSetting {
                name: "top_down_map_height",
                value: self.top_down_map_height.to_string(),
                expected: ">= screen_height",
            });
        }
        require_positive("top_down_tank_speed", self.top_down_tank_speed)?;
        require_positive("top_down_turn_rate", self.top_down_turn_rate)?;
        require_positive("top_down_shell_speed", self.top_down_shell_speed)?;
        require_nonzero("top_down_shell_lifetime", self.top_down_shell_lifetime as u64)?;
        require_positive("top_down_hit_radius", self.top_down_hit_radius)?;
        require_nonzero("top_down_ai_fire_interval", self.top_down_ai_fire_interval)?;
        require_positive("top_down_muzzle_offset", self.top_down_muzzle_offset)?;
        require_positive("top_down_ai_near_field", self.top_down_ai_near_field)?;
        require_positive("top_down_ai_fire_range", self.top_down_ai_fire_range)?;

        require_positive("third_person_map_size", self.third_person_map_size)?;
        require_positive("third_person_tank_speed", self.third_person_tank_speed)?;
        require_positive("third_person_turn_rate", self.third_person_turn_rate)?;
        require_positive("third_person_shell_speed", self.third_person_shell_speed)?;
        require_nonzero(
            "third_person_shell_lifetime",
            self.third_person_shell_lifetime as u64,
        )?;
        require_positive("third_person_hit_radius", self.third_person_hit_radius)?;
        require_nonzero(
            "third_person_ai_fire_interval",
            self.third_person_ai_fire_interval,
        )?;
        require_positive(
            "third_person_turret_rate_factor",
            self.third_person_turret_rate_factor,
        )?;
        require_positive("third_person_cannon_length", self.third_person_cannon_length)?;
        require_positive("third_person_muzzle_height", self.third_person_muzzle_height)?;
        require_positive("third_person_ai_near_field", self.third_person_ai_near_field)?;
        require_positive("third_person_ai_fire_range", self.third_person_ai_fire_range)?;
        require_positive(
            "third_person_ai_spread_radius",
            self.third_person_ai_spread_radius,
        )?;

        require_positive("chase_camera_distance", self.chase_camera_distance)?;
        require_positive("chase_camera_height", self.chase_camera_height)?;

        require_positive("aim_shrink_rate", self.aim_shrink_rate)?;
        require_positive("aim_expand_rate", self.aim_expand_rate)?;
        if !(self.aim_radius_min <= self.aim_radius_start
            && self.aim_radius_start <= self.aim_radius_max)
        {
            return Err(TankError::InvalidSetting {
                name: "aim_radius_start",
                value: self.aim_radius_start.to_string(),
                expected: "aim_radius_min <= aim_radius_start <= aim_radius_max",
            });
        }
        if self.aim_radius_min >= self.aim_radius_max {
            return Err(TankError::InvalidSetting {
                name: "aim_radius_min",
                value: self.aim_radius_min.to_string(),
                expected: "< aim_radius_max",
            });
        }
        Ok(())
    }
}

/// Parse and validate configuration text; `path` is only used in diagnostics.
pub fn parse_tanks_config(path: &str, contents: &str) -> TankResult<TanksConfig> {
    let config =
        toml::from_str::<TanksConfig>(contents).map_err(|e| TankError::ConfigParse {
            path: path.to_string(),
            message: e.to_string(),
        })?;
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate the configuration file at `path`.
pub fn load_tanks_config(path: &str) -> TankResult<TanksConfig> {
    let contents = std::fs::read_to_string(path).map_err(|source| TankError::ConfigRead {
        path: path.to_string(),
        source,
    })?;
    parse_tanks_config(path, &contents)
}

/// Where the running configuration came from.
#[derive(Debug)]
pub enum ConfigOrigin {
    File,
    Missing,
    /// The file exists but could not be used; defaults were substituted.
    Rejected(TankError),
}

impl ConfigOrigin {
    /// Report the origin.  Called once logging is up, which is after the
    /// config is needed to size the window.
    pub fn log(&self, path: &str) {
        match self {
            ConfigOrigin::File => info!("Loaded tank config from {path}"),
            ConfigOrigin::Missing => info!("No {path} found; using compiled defaults"),
            ConfigOrigin::Rejected(e) => warn!("{e}; using compiled defaults"),
        }
    }
}

/// Load `path`, falling back to compiled defaults.
///
/// A missing file is not an error.  Read, parse and validation failures are
/// carried in the returned [`ConfigOrigin`] but never abort the game.
pub fn load_or_default(path: &str) -> (TanksConfig, ConfigOrigin) {
    match load_tanks_config(path) {
        Ok(config) => (config, ConfigOrigin::File),
        Err(TankError::ConfigRead { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            (TanksConfig::default(), ConfigOrigin::Missing)
        }
        Err(e) => (TanksConfig::default(), ConfigOrigin::Rejected(e)),
    }
}
