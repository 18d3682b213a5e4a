//! The third-person battle resource and its per-tick step.

use super::aiming::AimingCircle;
use super::control::ThirdPersonIntent;
use super::state::{third_person_arena, ChaseCamera, Terrain, ThirdPersonShell, TurretTank};
use crate::combat::{run_shell_pass, HitEvent, HitRules};
use crate::config::TanksConfig;
use crate::constants::CHASE_CAMERA_TARGET_LIFT;
use crate::hud::BattleSummary;
use crate::pursuit::{normalize_angle, pursue, wants_to_fire, Manoeuvre, PursuitParams};
use crate::vehicle::Allegiance;
use bevy::prelude::*;
use rand::Rng;
use std::time::Duration;

#[derive(Resource, Debug, Clone)]
pub struct ThirdPersonBattle {
    pub player: TurretTank,
    pub enemies: Vec<TurretTank>,
    pub shells: Vec<ThirdPersonShell>,
    pub terrain: Terrain,
    pub aiming: AimingCircle,
    pub camera: ChaseCamera,
    /// Cursor steers the turret when on, ←/→ when off.
    pub mouse_aiming: bool,
    frame: u64,
    rules: HitRules,
    pursuit: PursuitParams,
    enemy_spread_radius: f32,
    camera_distance: f32,
    camera_height: f32,
}

impl ThirdPersonBattle {
    pub fn new<R: Rng>(config: &TanksConfig, rng: &mut R) -> Self {
        let player = TurretTank::new(
            Vec3::from_array(config.third_person_player_start),
            Allegiance::Player,
            config,
        );
        let enemies = config
            .third_person_enemy_starts
            .iter()
            .map(|&start| TurretTank::new(Vec3::from_array(start), Allegiance::Enemy, config))
            .collect();

        let mut battle = Self {
            player,
            enemies,
            shells: Vec::new(),
            terrain: Terrain::generate(config, rng),
            aiming: AimingCircle::new(config),
            camera: ChaseCamera::default(),
            mouse_aiming: true,
            frame: 0,
            rules: HitRules {
                arena: third_person_arena(config),
                radius: config.third_person_hit_radius,
                damage: config.shell_damage,
            },
            pursuit: PursuitParams {
                near_field: config.third_person_ai_near_field,
                deadband: config.ai_heading_deadband,
                fire_range: config.third_person_ai_fire_range,
                fire_interval: config.third_person_ai_fire_interval,
            },
            enemy_spread_radius: config.third_person_ai_spread_radius,
            camera_distance: config.chase_camera_distance,
            camera_height: config.chase_camera_height,
        };
        battle.update_camera();
        battle
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance the battle by one tick.
    ///
    /// Order: player commands, aiming circle, enemy AI, shell pass, camera.
    pub fn step<R: Rng>(
        &mut self,
        intent: &mut ThirdPersonIntent,
        now: Duration,
        rng: &mut R,
    ) -> Vec<HitEvent> {
        self.frame += 1;

        let steadying = self.apply_player_intent(intent, now, rng);
        self.aiming.update(steadying);
        self.run_enemy_ai(now, rng);
        let hits = run_shell_pass(
            &mut self.shells,
            &mut self.player,
            &mut self.enemies,
            &self.rules,
        );
        self.update_camera();
        hits
    }

    /// Returns whether the player is steadying this tick.
    fn apply_player_intent<R: Rng>(
        &mut self,
        intent: &mut ThirdPersonIntent,
        now: Duration,
        rng: &mut R,
    ) -> bool {
        let (fire, toggle) = intent.take_edges();
        if !self.player.hull.is_operational() {
            return false;
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

        if self.mouse_aiming {
            if let Some(angle) = intent.turret_target {
                self.player.set_turret(angle);
            }
        } else {
            if intent.turret_left {
                self.player.turret_left();
            }
            if intent.turret_right {
                self.player.turret_right();
            }
        }

        if toggle {
            self.mouse_aiming = !self.mouse_aiming;
            info!(
                "[third-person] mouse aiming {}",
                if self.mouse_aiming { "on" } else { "off" }
            );
        }

        if fire {
            let radius = self.aiming.radius();
            self.shells
                .extend(self.player.fire_with_accuracy(now, radius, rng));
        }

        intent.steady
    }

    fn run_enemy_ai<R: Rng>(&mut self, now: Duration, rng: &mut R) {
        let target = self.player.position;
        for enemy in self.enemies.iter_mut().filter(|e| e.hull.is_operational()) {
            let dx = target.x - enemy.position.x;
            let dz = target.z - enemy.position.z;
            let distance = dx.hypot(dz);
            let bearing = dx.atan2(dz);

            match pursue(enemy.heading, bearing, distance, &self.pursuit) {
                Manoeuvre::TurnLeft => enemy.turn_left(),
                Manoeuvre::TurnRight => enemy.turn_right(),
                Manoeuvre::Advance => enemy.move_forward(),
                Manoeuvre::Hold => {}
            }
            enemy.set_turret(normalize_angle(bearing - enemy.heading));

            if wants_to_fire(self.frame, distance, &self.pursuit) {
                self.shells
                    .extend(enemy.fire_with_accuracy(now, self.enemy_spread_radius, rng));
            }
        }
    }

    fn update_camera(&mut self) {
        self.camera.follow(
            self.player.position,
            self.player.heading,
            self.camera_distance,
            self.camera_height,
            CHASE_CAMERA_TARGET_LIFT,
        );
    }
}

impl BattleSummary for ThirdPersonBattle {
    const CONTROLS_HINT: &'static str =
        "WASD: drive   Mouse: aim   LMB/Space: fire   RMB: steady aim   Tab: toggle mouse aim   Esc: quit";

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::HitTarget;
    use rand::rngs::StdRng;
    use crate::third_person::aiming::spread_angle;
    use rand::SeedableRng;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn battle_with(enemy_starts: Vec<[f32; 3]>) -> (ThirdPersonBattle, StdRng) {
        let config = TanksConfig {
            third_person_enemy_starts: enemy_starts,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(4);
        (ThirdPersonBattle::new(&config, &mut rng), rng)
    }

    #[test]
    fn starts_with_mouse_aiming_and_camera_behind() {
        let (b, _) = battle_with(TanksConfig::default().third_person_enemy_starts);
        assert!(b.mouse_aiming);
        assert_eq!(b.enemies.len(), 3);
        assert!(b.camera.eye.abs_diff_eq(Vec3::new(0.0, 8.0, -15.0), 1e-5));
        assert_eq!(b.aiming.radius(), 50.0);
    }

    #[test]
    fn cursor_steers_turret_only_in_mouse_mode() {
        let (mut b, mut rng) = battle_with(Vec::new());
        let mut intent = ThirdPersonIntent {
            turret_target: Some(FRAC_PI_2),
            turret_left: true,
            ..Default::default()
        };
        b.step(&mut intent, Duration::ZERO, &mut rng);
        assert_eq!(b.player.turret(), FRAC_PI_2);

        intent.toggle_mouse_aim = true;
        b.step(&mut intent, Duration::ZERO, &mut rng);
        assert!(!b.mouse_aiming);

        // Keyboard mode: the arrow key wins, the cursor is ignored.
        b.step(&mut intent, Duration::ZERO, &mut rng);
        assert!((b.player.turret() - (FRAC_PI_2 - 0.024)).abs() < 1e-6);
    }

    #[test]
    fn steady_input_shrinks_aim_and_release_expands() {
        let (mut b, mut rng) = battle_with(Vec::new());
        let mut intent = ThirdPersonIntent {
            steady: true,
            ..Default::default()
        };
        for _ in 0..40 {
            b.step(&mut intent, Duration::ZERO, &mut rng);
        }
        assert_eq!(b.aiming.radius(), 20.0);
        assert!(b.aiming.steadying());

        intent.steady = false;
        for _ in 0..40 {
            b.step(&mut intent, Duration::ZERO, &mut rng);
        }
        assert_eq!(b.aiming.radius(), 80.0);
    }

    #[test]
    fn enemy_turret_tracks_player() {
        let (mut b, mut rng) = battle_with(vec![[20.0, 0.0, 0.0]]);
        b.step(&mut ThirdPersonIntent::default(), Duration::ZERO, &mut rng);

        let enemy = &b.enemies[0];
        // Player is due -x: bearing atan2(-20, 0) = -π/2; hull turned left once.
        assert!((enemy.heading + 0.03).abs() < 1e-6);
        assert!((enemy.aim_angle() + FRAC_PI_2).abs() < 1e-5);
        assert_eq!(enemy.position, Vec3::new(20.0, 0.0, 0.0));
    }

    #[test]
    fn enemy_in_range_fires_on_interval_tick() {
        let (mut b, mut rng) = battle_with(vec![[0.0, 0.0, 10.0]]);
        b.enemies[0].heading = PI;
        let mut intent = ThirdPersonIntent::default();
        for tick in 1..=180u64 {
            b.step(&mut intent, Duration::from_secs(tick), &mut rng);
            if tick < 180 {
                assert!(b.shells.is_empty(), "fired early on tick {tick}");
                assert_eq!(b.player.hull.health(), 100);
            }
        }
        // Closed to the near field (5), fired from ~2 away; the same tick's
        // pass moves the shell inside the hit radius.
        let z = b.enemies[0].position.z;
        assert!(z > 4.7 && z < 5.01, "enemy stopped at z = {z}");
        assert_eq!(b.player.hull.health(), 75);
        assert!(b.shells.is_empty());
    }

    #[test]
    fn enemy_shot_carries_spread_for_radius_thirty() {
        let config = TanksConfig {
            third_person_enemy_starts: vec![[0.0, 0.0, 25.0]],
            third_person_ai_near_field: 20.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(9);
        let mut b = ThirdPersonBattle::new(&config, &mut rng);
        b.enemies[0].heading = PI;
        // Nothing else draws from the stream before the enemy's first shot.
        let mut expected_rng = rng.clone();
        let spread = spread_angle(30.0, &mut expected_rng);

        let mut intent = ThirdPersonIntent::default();
        for tick in 1..=180u64 {
            b.step(&mut intent, Duration::from_secs(tick), &mut rng);
        }
        assert_eq!(b.shells.len(), 1);
        let shell = &b.shells[0];
        assert_eq!(shell.allegiance, Allegiance::Enemy);
        let expected = TurretTank::direction(PI + spread) * config.third_person_shell_speed;
        assert!(
            shell.velocity.abs_diff_eq(expected, 1e-5),
            "{:?} vs {:?}",
            shell.velocity,
            expected
        );
    }

    #[test]
    fn enemy_beyond_fire_range_holds_fire() {
        let (mut b, mut rng) = battle_with(vec![[0.0, 0.0, 80.0]]);
        b.enemies[0].heading = PI;
        let mut intent = ThirdPersonIntent::default();
        for tick in 1..=180u64 {
            b.step(&mut intent, Duration::from_secs(tick), &mut rng);
            assert!(b.shells.is_empty(), "fired on tick {tick}");
        }
        // Still 44 units out on the scheduled tick.
        assert!(b.enemies[0].position.z > 30.0);
        assert_eq!(b.player.hull.health(), 100);
    }

    #[test]
    fn player_shell_hits_enemy_on_the_ground_plane() {
        let (mut b, mut rng) = battle_with(vec![[0.0, 0.0, 4.5]]);
        let mut intent = ThirdPersonIntent {
            fire: true,
            turret_target: Some(0.0),
            ..Default::default()
        };
        // Spawned at z = 3 (y = 1), advanced to z = 3.8: 0.7 from the enemy.
        let hits = b.step(&mut intent, Duration::from_secs(1), &mut rng);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target, HitTarget::Enemy(0));
        assert_eq!(b.enemies[0].hull.health(), 75);
        assert!(b.shells.is_empty());
    }

    #[test]
    fn wrecked_player_ignores_input() {
        let (mut b, mut rng) = battle_with(Vec::new());
        b.player.hull.take_damage(100);
        let mut intent = ThirdPersonIntent {
            forward: true,
            fire: true,
            toggle_mouse_aim: true,
            steady: true,
            ..Default::default()
        };
        b.step(&mut intent, Duration::from_secs(3), &mut rng);
        assert_eq!(b.player.position, Vec3::ZERO);
        assert!(b.shells.is_empty());
        assert!(b.mouse_aiming);
        assert!(!intent.fire && !intent.toggle_mouse_aim);
        assert_eq!(b.aiming.radius(), 52.0);
    }
}
