//! Headless tests for the third-person simulation plugin.
//!
//! Same harness as the top-down tests: [`MinimalPlugins`], the simulation
//! plugin alone, and `FixedUpdate` run by hand once per tick.
//!
//! Covered scenarios:
//! 1. Startup builds terrain, enemies and a camera behind the player.
//! 2. Holding steady settles the aim radius at 20; releasing settles at 80.
//! 3. The mouse-aim toggle flips exactly once per request.
//! 4. A fired shell consumes the cooldown and the shared RNG stream.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;
use tanks::config::TanksConfig;
use tanks::hud::BattleSummary;
use tanks::random::BattleRng;
use tanks::third_person::{ThirdPersonBattle, ThirdPersonIntent, ThirdPersonSimulationPlugin};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn app_with(config: TanksConfig, seed: u64) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO))
        .insert_resource(config)
        .insert_resource(BattleRng::from_seed(seed))
        .add_plugins(ThirdPersonSimulationPlugin);
    app.update();
    app
}

fn tick(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
}

fn lone_player() -> TanksConfig {
    TanksConfig {
        third_person_enemy_starts: Vec::new(),
        ..Default::default()
    }
}

fn battle(app: &App) -> &ThirdPersonBattle {
    app.world().resource::<ThirdPersonBattle>()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn startup_spawns_the_battle() {
    let app = app_with(TanksConfig::default(), 5);
    let b = battle(&app);
    assert_eq!(b.enemies_remaining(), 3);
    assert_eq!(b.terrain.obstacles.len(), 80);
    assert!(b.mouse_aiming);
    assert!(b.camera.eye.abs_diff_eq(Vec3::new(0.0, 8.0, -15.0), 1e-5));
}

#[test]
fn steady_aim_settles_between_bounds() {
    let mut app = app_with(lone_player(), 5);
    app.world_mut().resource_mut::<ThirdPersonIntent>().steady = true;
    for _ in 0..30 {
        tick(&mut app);
    }
    assert_eq!(battle(&app).aiming.radius(), 20.0);
    assert_eq!(battle(&app).aiming.accuracy(), 1.0);

    app.world_mut().resource_mut::<ThirdPersonIntent>().steady = false;
    for _ in 0..40 {
        tick(&mut app);
    }
    assert_eq!(battle(&app).aiming.radius(), 80.0);
    assert_eq!(battle(&app).aiming.accuracy(), 0.0);
}

#[test]
fn toggle_flips_mouse_aiming_once() {
    let mut app = app_with(lone_player(), 5);
    app.world_mut()
        .resource_mut::<ThirdPersonIntent>()
        .toggle_mouse_aim = true;
    tick(&mut app);
    tick(&mut app);
    assert!(!battle(&app).mouse_aiming);
    assert!(!app.world().resource::<ThirdPersonIntent>().toggle_mouse_aim);
}

#[test]
fn fire_request_spawns_one_shell() {
    let mut app = app_with(lone_player(), 5);
    {
        let mut intent = app.world_mut().resource_mut::<ThirdPersonIntent>();
        intent.fire = true;
        intent.turret_target = Some(0.0);
    }
    tick(&mut app);
    assert_eq!(battle(&app).shells.len(), 1);

    // Real time is frozen at zero, so the cooldown blocks a second shot.
    app.world_mut().resource_mut::<ThirdPersonIntent>().fire = true;
    tick(&mut app);
    assert_eq!(battle(&app).shells.len(), 1);
}
