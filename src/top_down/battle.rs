//! The top-down battle resource and its per-tick step.

use super::control::TopDownIntent;
use super::state::{top_down_arena, FollowCamera, GameMap, TopDownShell, TopDownTank};
use crate::combat::{run_shell_pass, HitEvent, HitRules};
use crate::config::TanksConfig;
use crate::hud::BattleSummary;
use crate::pursuit::{pursue, wants_to_fire, Manoeuvre, PursuitParams};
use crate::vehicle::Allegiance;
use bevy::prelude::*;
use rand::Rng;
use std::time::Duration;

/// Everything one top-down session owns.
#[derive(Resource, Debug, Clone)]
pub struct TopDownBattle {
    pub player: TopDownTank,
    pub enemies: Vec<TopDownTank>,
    pub shells: Vec<TopDownShell>,
    pub map: GameMap,
    pub camera: FollowCamera,
    frame: u64,
    rules: HitRules,
    pursuit: PursuitParams,
    screen: Vec2,
}

impl TopDownBattle {
    /// Place the tanks at their configured starts and scatter the obstacles.
    pub fn new<R: Rng>(config: &TanksConfig, rng: &mut R) -> Self {
        let [px, py] = config.top_down_player_start;
        let player = TopDownTank::new(Vec2::new(px, py), Allegiance::Player, config);
        let enemies = config
            .top_down_enemy_starts
            .iter()
            .map(|&[x, y]| TopDownTank::new(Vec2::new(x, y), Allegiance::Enemy, config))
            .collect();
        let screen = Vec2::new(config.screen_width, config.screen_height);
        let arena = top_down_arena(config);

        let mut camera = FollowCamera::default();
        camera.follow(player.position, screen, arena.size());

        Self {
            player,
            enemies,
            shells: Vec::new(),
            map: GameMap::generate(config, rng),
            camera,
            frame: 0,
            rules: HitRules {
                arena,
                radius: config.top_down_hit_radius,
                damage: config.shell_damage,
            },
            pursuit: PursuitParams {
                near_field: config.top_down_ai_near_field,
                deadband: config.ai_heading_deadband,
                fire_range: config.top_down_ai_fire_range,
                fire_interval: config.top_down_ai_fire_interval,
            },
            screen,
        }
    }

    /// Ticks simulated so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[inline]
    pub fn screen(&self) -> Vec2 {
        self.screen
    }

    /// Advance the battle by one tick.
    ///
    /// Order: player commands, enemy AI, shell pass, camera.  The latched fire
    /// request in `intent` is consumed even when the player cannot act.
    pub fn step(&mut self, intent: &mut TopDownIntent, now: Duration) -> Vec<HitEvent> {
        self.frame += 1;

        self.apply_player_intent(intent, now);
        self.run_enemy_ai(now);
        let hits = run_shell_pass(
            &mut self.shells,
            &mut self.player,
            &mut self.enemies,
            &self.rules,
        );
        self.camera
            .follow(self.player.position, self.screen, self.rules.arena.size());
        hits
    }

    fn apply_player_intent(&mut self, intent: &mut TopDownIntent, now: Duration) {
        let fire = intent.take_fire();
        if !self.player.hull.is_operational() {
            return;
        }
        if intent.forward {
            self.player.move_forward();
        }
        if intent.backward {
            self.player.move_backward();
        }
        if intent.turn_left {
            self.player.turn_left();
        }
        if intent.turn_right {
            self.player.turn_right();
        }
        if fire {
            self.shells.extend(self.player.fire(now));
        }
    }

    fn run_enemy_ai(&mut self, now: Duration) {
        let target = self.player.position;
        for enemy in self.enemies.iter_mut().filter(|e| e.hull.is_operational()) {
            let to_player = target - enemy.position;
            let distance = to_player.length();
            let bearing = to_player.y.atan2(to_player.x);

            match pursue(enemy.heading, bearing, distance, &self.pursuit) {
                Manoeuvre::TurnLeft => enemy.turn_left(),
                Manoeuvre::TurnRight => enemy.turn_right(),
                Manoeuvre::Advance => enemy.move_forward(),
                Manoeuvre::Hold => {}
            }

            if wants_to_fire(self.frame, distance, &self.pursuit) {
                self.shells.extend(enemy.fire(now));
            }
        }
    }
}

impl BattleSummary for TopDownBattle {
    const CONTROLS_HINT: &'static str = "WASD / arrows: drive   Space: fire   Esc: quit";

    fn player_health_fraction(&self) -> f32 {
        self.player.hull.fraction()
    }

    fn enemies_remaining(&self) -> usize {
        self.enemies
            .iter()
            .filter(|e| e.hull.is_operational())
            .count()
    }

    fn player_wrecked(&self) -> bool {
        !self.player.hull.is_operational()
    }
}
