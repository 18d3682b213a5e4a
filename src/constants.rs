//! Centralised gameplay constants for both battle variants.
//!
//! Every tuneable value lives here so it can be found and reasoned about in one
//! place.  [`crate::config::TanksConfig::default`] mirrors these values; a
//! `assets/tanks.toml` file can override any subset of them at startup.
//!
//! Units are "per simulation tick" unless stated otherwise: speeds are world
//! units per tick, turn rates are radians per tick, lifetimes count ticks.

// ── Window & schedule ─────────────────────────────────────────────────────────

/// Logical window width in pixels.  Also the 2D camera's view width.
pub const SCREEN_WIDTH: f32 = 1024.0;

/// Logical window height in pixels.  Also the 2D camera's view height.
pub const SCREEN_HEIGHT: f32 = 768.0;

/// Window title shared by both variants.
pub const WINDOW_TITLE: &str = "Tanks - World of Tanks Style Game";

/// Rate of the `FixedUpdate` schedule that drives the simulation.
///
/// All per-tick constants below were tuned against 60 Hz.
pub const TICK_RATE_HZ: f64 = 60.0;

/// Configuration file read at startup (relative to the working directory).
pub const CONFIG_PATH: &str = "assets/tanks.toml";

/// Environment variable that overrides the configured variant.
pub const VARIANT_ENV: &str = "TANKS_VARIANT";

// ── Shared combat rules ───────────────────────────────────────────────────────

/// Health every tank starts with.
pub const TANK_MAX_HEALTH: i32 = 100;

/// Health removed by one confirmed shell hit.
pub const SHELL_DAMAGE: i32 = 25;

/// Backward movement runs at this fraction of forward speed.
pub const REVERSE_SPEED_FACTOR: f32 = 0.5;

/// Enemy heading error (radians) tolerated before the AI stops turning and drives.
pub const AI_HEADING_DEADBAND: f32 = 0.1;

// ── Top-down (2D) map ─────────────────────────────────────────────────────────

/// Width of the top-down map in world pixels.
pub const TOP_DOWN_MAP_WIDTH: f32 = 2048.0;

/// Height of the top-down map in world pixels.
pub const TOP_DOWN_MAP_HEIGHT: f32 = 1536.0;

/// Small decorative trees scattered across the map.
pub const TOP_DOWN_TREE_COUNT: usize = 50;

/// Larger buildings scattered across the map.
pub const TOP_DOWN_BUILDING_COUNT: usize = 10;

// ── Top-down (2D) tanks ───────────────────────────────────────────────────────

/// Player spawn point (y grows downward).
pub const TOP_DOWN_PLAYER_START: [f32; 2] = [100.0, 100.0];

/// Enemy spawn points, in enemy-list order.
pub const TOP_DOWN_ENEMY_STARTS: [[f32; 2]; 3] = [[500.0, 300.0], [800.0, 200.0], [300.0, 600.0]];

/// Forward speed in pixels per tick.
pub const TOP_DOWN_TANK_SPEED: f32 = 2.0;

/// Body turn rate in radians per tick.
pub const TOP_DOWN_TURN_RATE: f32 = 0.05;

/// Minimum wall-clock interval between shots (milliseconds).
pub const TOP_DOWN_FIRE_COOLDOWN_MS: u64 = 500;

/// Distance from the hull centre at which shells appear.
pub const TOP_DOWN_MUZZLE_OFFSET: f32 = 25.0;

/// Shell speed in pixels per tick.
pub const TOP_DOWN_SHELL_SPEED: f32 = 8.0;

/// Shell lifetime in ticks (3 s at 60 Hz).
pub const TOP_DOWN_SHELL_LIFETIME: u32 = 180;

/// Shell-to-hull distance that registers a hit.
pub const TOP_DOWN_HIT_RADIUS: f32 = 20.0;

/// Enemies closer than this to the player stop manoeuvring.
pub const TOP_DOWN_AI_NEAR_FIELD: f32 = 50.0;

/// Enemies try to fire once every this many ticks.
pub const TOP_DOWN_AI_FIRE_INTERVAL: u64 = 120;

/// Enemies only fire when the player is closer than this.
pub const TOP_DOWN_AI_FIRE_RANGE: f32 = 300.0;

// ── Third-person (3D) map ─────────────────────────────────────────────────────

/// Half-extent of the square ground plane: x and z lie in `[-MAP_SIZE, MAP_SIZE]`.
pub const THIRD_PERSON_MAP_SIZE: f32 = 100.0;

/// Buildings scattered across `±0.75 · MAP_SIZE`.
pub const THIRD_PERSON_BUILDING_COUNT: usize = 30;

/// Trees scattered across `±0.9 · MAP_SIZE`.
pub const THIRD_PERSON_TREE_COUNT: usize = 50;

// ── Third-person (3D) tanks ───────────────────────────────────────────────────

/// Player spawn point.
pub const THIRD_PERSON_PLAYER_START: [f32; 3] = [0.0, 0.0, 0.0];

/// Enemy spawn points, in enemy-list order.
pub const THIRD_PERSON_ENEMY_STARTS: [[f32; 3]; 3] =
    [[20.0, 0.0, 20.0], [-20.0, 0.0, 20.0], [30.0, 0.0, -10.0]];

/// Forward speed in world units per tick.
pub const THIRD_PERSON_TANK_SPEED: f32 = 0.2;

/// Body turn rate in radians per tick.
pub const THIRD_PERSON_TURN_RATE: f32 = 0.03;

/// Turret turn rate as a fraction of the body turn rate.
pub const THIRD_PERSON_TURRET_RATE_FACTOR: f32 = 0.8;

/// Minimum wall-clock interval between shots (milliseconds).
pub const THIRD_PERSON_FIRE_COOLDOWN_MS: u64 = 800;

/// Cannon length: shells spawn this far along the turret's aim.
pub const THIRD_PERSON_CANNON_LENGTH: f32 = 3.0;

/// Shells spawn this far above the hull origin.
pub const THIRD_PERSON_MUZZLE_HEIGHT: f32 = 1.0;

/// Shell speed in world units per tick.
pub const THIRD_PERSON_SHELL_SPEED: f32 = 0.8;

/// Shell lifetime in ticks (5 s at 60 Hz).
pub const THIRD_PERSON_SHELL_LIFETIME: u32 = 300;

/// Shell-to-hull distance on the ground plane that registers a hit.
pub const THIRD_PERSON_HIT_RADIUS: f32 = 2.0;

/// Enemies closer than this to the player stop manoeuvring.
pub const THIRD_PERSON_AI_NEAR_FIELD: f32 = 5.0;

/// Enemies try to fire once every this many ticks.
pub const THIRD_PERSON_AI_FIRE_INTERVAL: u64 = 180;

/// Enemies only fire when the player is closer than this.
pub const THIRD_PERSON_AI_FIRE_RANGE: f32 = 30.0;

/// Fixed spread radius used for every enemy shot.
pub const THIRD_PERSON_AI_SPREAD_RADIUS: f32 = 30.0;

// ── Third-person (3D) aiming circle ───────────────────────────────────────────

/// Spread radius at the start of a session.
pub const AIM_RADIUS_START: f32 = 50.0;

/// Tightest spread reachable by holding steady.
pub const AIM_RADIUS_MIN: f32 = 20.0;

/// Widest spread; reached whenever the player stops steadying.
pub const AIM_RADIUS_MAX: f32 = 80.0;

/// Radius lost per tick while steadying.
pub const AIM_SHRINK_RATE: f32 = 1.5;

/// Radius gained per tick while not steadying.
pub const AIM_EXPAND_RATE: f32 = 2.0;

/// Radius that maps to a spread factor of 1.0.
pub const AIM_SPREAD_NORMALISER: f32 = 100.0;

/// Scale applied to the normalised spread; the final angular offset lies in
/// `±0.5 · AIM_SPREAD_SCALE · radius / AIM_SPREAD_NORMALISER`.
pub const AIM_SPREAD_SCALE: f32 = 0.2;

// ── Third-person (3D) chase camera ────────────────────────────────────────────

/// Horizontal distance of the camera behind the player.
pub const CHASE_CAMERA_DISTANCE: f32 = 15.0;

/// Camera eye height above the ground.
pub const CHASE_CAMERA_HEIGHT: f32 = 8.0;

/// The camera looks at this height above the player's hull origin.
pub const CHASE_CAMERA_TARGET_LIFT: f32 = 1.0;
