//! Screen-space HUD shared by both variants.
//!
//! | Element            | Content                                   |
//! |--------------------|-------------------------------------------|
//! | Health bar         | 200×20, colour tiered by remaining health |
//! | "Health" label     | static                                    |
//! | Enemy counter      | `Enemies: N`, operational enemies only    |
//! | Game-over banner   | hidden until the player is wrecked        |
//! | Controls hint      | bottom-left, variant specific             |
//!
//! The systems are generic over a [`BattleSummary`] resource so the two
//! battle types share one implementation.  Third-person extras (aim mode,
//! accuracy) are spawned by that variant's own presentation plugin.

use bevy::prelude::*;

/// Width of the player health bar in pixels.
pub const HEALTH_BAR_WIDTH: f32 = 200.0;
/// Height of the player health bar in pixels.
pub const HEALTH_BAR_HEIGHT: f32 = 20.0;
/// HUD text size.
pub const HUD_FONT_SIZE: f32 = 18.0;

/// What the HUD needs to know about a battle.
pub trait BattleSummary: Resource {
    /// Shown in the bottom-left corner.
    const CONTROLS_HINT: &'static str;

    fn player_health_fraction(&self) -> f32;
    fn enemies_remaining(&self) -> usize;
    fn player_wrecked(&self) -> bool;
}

// ── Colour tiers ──────────────────────────────────────────────────────────────

/// Health bar colour band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthTier {
    Healthy,
    Worn,
    Critical,
}

impl HealthTier {
    pub fn from_fraction(fraction: f32) -> Self {
        if fraction > 0.5 {
            HealthTier::Healthy
        } else if fraction > 0.25 {
            HealthTier::Worn
        } else {
            HealthTier::Critical
        }
    }

    pub fn color(self) -> Color {
        match self {
            HealthTier::Healthy => Color::srgb(0.0, 0.9, 0.0),
            HealthTier::Worn => Color::srgb(1.0, 0.9, 0.0),
            HealthTier::Critical => Color::srgb(0.9, 0.1, 0.1),
        }
    }
}

/// Accuracy readout colour: > 0.8 green, > 0.5 yellow, otherwise red.
pub fn accuracy_color(accuracy: f32) -> Color {
    if accuracy > 0.8 {
        HealthTier::Healthy.color()
    } else if accuracy > 0.5 {
        HealthTier::Worn.color()
    } else {
        HealthTier::Critical.color()
    }
}

// ── Markers ───────────────────────────────────────────────────────────────────

/// The coloured fill inside the health bar frame.
#[derive(Component)]
pub struct HudHealthFill;

/// `Enemies: N` text.
#[derive(Component)]
pub struct HudEnemyCount;

/// Centred game-over banner.
#[derive(Component)]
pub struct HudGameOverBanner;

// ── Systems ───────────────────────────────────────────────────────────────────

fn hud_text(value: impl Into<String>, color: Color) -> (Text, TextFont, TextColor) {
    (
        Text::new(value),
        TextFont {
            font_size: HUD_FONT_SIZE,
            ..default()
        },
        TextColor(color),
    )
}

/// Spawn the HUD nodes.
pub fn setup_hud_system<B: BattleSummary>(mut commands: Commands) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(10.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(4.0),
            ..default()
        })
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        width: Val::Px(HEALTH_BAR_WIDTH),
                        height: Val::Px(HEALTH_BAR_HEIGHT),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.2, 0.0, 0.0, 0.8)),
                ))
                .with_children(|bar| {
                    bar.spawn((
                        Node {
                            width: Val::Px(HEALTH_BAR_WIDTH),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(HealthTier::Healthy.color()),
                        HudHealthFill,
                    ));
                });
            parent.spawn(hud_text("Health", Color::WHITE));
            parent.spawn((hud_text("Enemies: 0", Color::WHITE), HudEnemyCount));
        });

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            bottom: Val::Px(10.0),
            ..default()
        },
        hud_text(B::CONTROLS_HINT, Color::srgba(1.0, 1.0, 1.0, 0.8)),
    ));

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                top: Val::Percent(40.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
            Visibility::Hidden,
            HudGameOverBanner,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("GAME OVER"),
                TextFont {
                    font_size: 64.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.1, 0.1)),
            ));
        });
}

/// Refresh the HUD from the battle each frame.
pub fn hud_update_system<B: BattleSummary>(
    battle: Res<B>,
    mut fill: Query<(&mut Node, &mut BackgroundColor), With<HudHealthFill>>,
    mut counter: Query<&mut Text, With<HudEnemyCount>>,
    mut banner: Query<&mut Visibility, With<HudGameOverBanner>>,
) {
    let fraction = battle.player_health_fraction().clamp(0.0, 1.0);
    if let Ok((mut node, mut color)) = fill.single_mut() {
        node.width = Val::Px(HEALTH_BAR_WIDTH * fraction);
        color.0 = HealthTier::from_fraction(fraction).color();
    }
    if let Ok(mut text) = counter.single_mut() {
        text.0 = format!("Enemies: {}", battle.enemies_remaining());
    }
    if let Ok(mut visibility) = banner.single_mut() {
        *visibility = if battle.player_wrecked() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Resource)]
    struct Fake {
        fraction: f32,
        enemies: usize,
    }

    impl BattleSummary for Fake {
        const CONTROLS_HINT: &'static str = "hint";

        fn player_health_fraction(&self) -> f32 {
            self.fraction
        }
        fn enemies_remaining(&self) -> usize {
            self.enemies
        }
        fn player_wrecked(&self) -> bool {
            self.fraction <= 0.0
        }
    }

    #[test]
    fn health_tiers_use_strict_thresholds() {
        assert_eq!(HealthTier::from_fraction(1.0), HealthTier::Healthy);
        assert_eq!(HealthTier::from_fraction(0.51), HealthTier::Healthy);
        assert_eq!(HealthTier::from_fraction(0.5), HealthTier::Worn);
        assert_eq!(HealthTier::from_fraction(0.26), HealthTier::Worn);
        assert_eq!(HealthTier::from_fraction(0.25), HealthTier::Critical);
        assert_eq!(HealthTier::from_fraction(0.0), HealthTier::Critical);
    }

    #[test]
    fn accuracy_colours_follow_tiers() {
        assert_eq!(accuracy_color(0.9), HealthTier::Healthy.color());
        assert_eq!(accuracy_color(0.8), HealthTier::Worn.color());
        assert_eq!(accuracy_color(0.5), HealthTier::Critical.color());
    }

    #[test]
    fn hud_reflects_battle_summary() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(Fake {
            fraction: 0.0,
            enemies: 2,
        });
        app.add_systems(Startup, setup_hud_system::<Fake>);
        app.add_systems(Update, hud_update_system::<Fake>);
        app.update();

        let world = app.world_mut();
        let text = world
            .query_filtered::<&Text, With<HudEnemyCount>>()
            .single(world)
            .unwrap();
        assert_eq!(text.0, "Enemies: 2");

        let visibility = world
            .query_filtered::<&Visibility, With<HudGameOverBanner>>()
            .single(world)
            .unwrap();
        assert_eq!(*visibility, Visibility::Visible);

        let node = world
            .query_filtered::<&Node, With<HudHealthFill>>()
            .single(world)
            .unwrap();
        assert_eq!(node.width, Val::Px(0.0));
    }
}
