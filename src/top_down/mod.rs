//! Top-down (2D) variant: one player tank against three enemies on a
//! 2048×1536 map with a clamped follow camera.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | `TopDownTank`, `TopDownShell`, obstacles, `FollowCamera` |
//! | [`battle`] | `TopDownBattle` resource and its per-tick step |
//! | [`control`] | `TopDownIntent` and the keyboard system that fills it |
//! | [`rendering`] | Camera, batched obstacle mesh, gizmo tanks and shells |
//!
//! [`TopDownSimulationPlugin`] is all a headless test needs;
//! [`TopDownPresentationPlugin`] adds input and drawing on top.

pub mod battle;
pub mod control;
pub mod rendering;
pub mod state;

pub use battle::TopDownBattle;
pub use control::{keyboard_to_top_down_intent_system, TopDownIntent};
pub use state::{FollowCamera, GameMap, Obstacle, ObstacleKind, TopDownShell, TopDownTank};

use crate::combat::log_hits;
use crate::config::TanksConfig;
use crate::hud::{hud_update_system, setup_hud_system};
use crate::random::BattleRng;
use bevy::prelude::*;

// ── Systems ───────────────────────────────────────────────────────────────────

/// Build the battle from the config and the seeded RNG.
pub fn spawn_top_down_battle_system(
    mut commands: Commands,
    config: Res<TanksConfig>,
    mut rng: ResMut<BattleRng>,
) {
    let battle = TopDownBattle::new(&config, &mut rng.0);
    info!(
        "[top-down] battle ready: {} enemies, {} obstacles",
        battle.enemies.len(),
        battle.map.obstacles.len()
    );
    commands.insert_resource(battle);
}

/// One fixed tick of the top-down battle.
pub fn top_down_step_system(
    battle: Option<ResMut<TopDownBattle>>,
    mut intent: ResMut<TopDownIntent>,
    time: Res<Time<Real>>,
) {
    let Some(mut battle) = battle else {
        return;
    };
    let hits = battle.step(&mut intent, time.elapsed());
    log_hits("top-down", &hits);
}

// ── Plugins ───────────────────────────────────────────────────────────────────

/// Battle state and the fixed-tick simulation.  Requires [`TanksConfig`] and
/// [`BattleRng`] resources.
pub struct TopDownSimulationPlugin;

impl Plugin for TopDownSimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TopDownIntent>()
            .add_systems(Startup, spawn_top_down_battle_system)
            .add_systems(FixedUpdate, top_down_step_system);
    }
}

/// Keyboard input, drawing and HUD for the top-down battle.
pub struct TopDownPresentationPlugin;

impl Plugin for TopDownPresentationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(rendering::GRASS_COLOR))
            .add_systems(
                Startup,
                (
                    rendering::setup_top_down_camera_system.after(spawn_top_down_battle_system),
                    rendering::spawn_obstacle_mesh_system.after(spawn_top_down_battle_system),
                    setup_hud_system::<TopDownBattle>,
                ),
            )
            .add_systems(
                Update,
                (
                    keyboard_to_top_down_intent_system,
                    (
                        rendering::top_down_camera_system,
                        rendering::top_down_gizmo_system,
                        hud_update_system::<TopDownBattle>,
                    )
                        .run_if(resource_exists::<TopDownBattle>),
                ),
            );
    }
}
