//! Third-person (3D) variant: a tank with an independently rotating turret,
//! a chase camera and an aiming circle that tightens while steadying.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | `TurretTank`, `ThirdPersonShell`, terrain, `ChaseCamera` |
//! | [`aiming`] | `AimingCircle` and shot spread |
//! | [`battle`] | `ThirdPersonBattle` resource and its per-tick step |
//! | [`control`] | `ThirdPersonIntent`, keyboard and mouse systems |
//! | [`rendering`] | Scene meshes, model sync, gizmos, extra HUD lines |
//!
//! As with the top-down variant, [`ThirdPersonSimulationPlugin`] runs headless
//! and [`ThirdPersonPresentationPlugin`] layers input and drawing on top.

pub mod aiming;
pub mod battle;
pub mod control;
pub mod rendering;
pub mod state;

pub use aiming::{spread_angle, AimingCircle};
pub use battle::ThirdPersonBattle;
pub use control::{
    keyboard_to_third_person_intent_system, mouse_to_third_person_intent_system,
    turret_angle_from_cursor, ThirdPersonIntent,
};
pub use state::{
    ChaseCamera, Terrain, TerrainFeature, TerrainObstacle, ThirdPersonShell, TurretTank,
};

use crate::combat::log_hits;
use crate::config::TanksConfig;
use crate::hud::{hud_update_system, setup_hud_system};
use crate::random::BattleRng;
use bevy::prelude::*;

// ── Systems ───────────────────────────────────────────────────────────────────

pub fn spawn_third_person_battle_system(
    mut commands: Commands,
    config: Res<TanksConfig>,
    mut rng: ResMut<BattleRng>,
) {
    let battle = ThirdPersonBattle::new(&config, &mut rng.0);
    info!(
        "[third-person] battle ready: {} enemies, {} terrain features",
        battle.enemies.len(),
        battle.terrain.obstacles.len()
    );
    commands.insert_resource(battle);
}

/// One fixed tick of the third-person battle.  Shot spread draws from the
/// shared [`BattleRng`].
pub fn third_person_step_system(
    battle: Option<ResMut<ThirdPersonBattle>>,
    mut intent: ResMut<ThirdPersonIntent>,
    time: Res<Time<Real>>,
    mut rng: ResMut<BattleRng>,
) {
    let Some(mut battle) = battle else {
        return;
    };
    let hits = battle.step(&mut intent, time.elapsed(), &mut rng.0);
    log_hits("third-person", &hits);
}

// ── Plugins ───────────────────────────────────────────────────────────────────

/// Battle state and the fixed-tick simulation.  Requires [`TanksConfig`] and
/// [`BattleRng`] resources.
pub struct ThirdPersonSimulationPlugin;

impl Plugin for ThirdPersonSimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ThirdPersonIntent>()
            .add_systems(Startup, spawn_third_person_battle_system)
            .add_systems(FixedUpdate, third_person_step_system);
    }
}

/// Keyboard and mouse input, 3D scene, gizmos and HUD.
pub struct ThirdPersonPresentationPlugin;

impl Plugin for ThirdPersonPresentationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(rendering::SKY_COLOR))
            .add_systems(
                Startup,
                (
                    rendering::setup_third_person_scene_system
                        .after(spawn_third_person_battle_system),
                    setup_hud_system::<ThirdPersonBattle>,
                    rendering::setup_third_person_hud_system,
                ),
            )
            .add_systems(
                Update,
                (
                    keyboard_to_third_person_intent_system,
                    mouse_to_third_person_intent_system,
                    (
                        rendering::sync_tank_models_system,
                        rendering::chase_camera_system,
                        rendering::third_person_gizmo_system,
                        rendering::third_person_hud_system,
                        hud_update_system::<ThirdPersonBattle>,
                    )
                        .run_if(resource_exists::<ThirdPersonBattle>),
                ),
            );
    }
}
