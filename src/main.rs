use bevy::prelude::*;
use bevy::window::WindowResolution;
use std::env;

use tanks::config::{load_or_default, Variant};
use tanks::constants::{CONFIG_PATH, VARIANT_ENV, WINDOW_TITLE};
use tanks::random::{resolve_seed, BattleRng};
use tanks::third_person::{ThirdPersonPresentationPlugin, ThirdPersonSimulationPlugin};
use tanks::top_down::{TopDownPresentationPlugin, TopDownSimulationPlugin};

/// Escape closes the game from either variant.
fn exit_on_escape_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut exit: MessageWriter<bevy::app::AppExit>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(bevy::app::AppExit::Success);
    }
}

fn main() {
    let (mut config, origin) = load_or_default(CONFIG_PATH);

    // The environment overrides the config file's variant.
    let variant_override = env::var(VARIANT_ENV).ok();
    if let Some(variant) = variant_override.as_deref().and_then(Variant::parse) {
        config.variant = variant;
    }

    let seed = resolve_seed(config.seed);
    let variant = config.variant;

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: WINDOW_TITLE.into(),
            resolution: WindowResolution::new(
                config.screen_width as u32,
                config.screen_height as u32,
            ),
            ..Default::default()
        }),
        ..Default::default()
    }));

    // Logging is only live once DefaultPlugins has been added.
    origin.log(CONFIG_PATH);
    if let Some(raw) = variant_override.as_deref() {
        if Variant::parse(raw).is_none() {
            warn!("Ignoring unknown {VARIANT_ENV}={raw:?}; expected top_down or third_person");
        }
    }
    info!("Starting {} battle with seed {seed}", variant.label());

    app.insert_resource(Time::<Fixed>::from_hz(config.tick_rate_hz))
        .insert_resource(BattleRng::from_seed(seed))
        .insert_resource(config)
        .add_systems(Update, exit_on_escape_system);

    match variant {
        Variant::TopDown => {
            app.add_plugins((TopDownSimulationPlugin, TopDownPresentationPlugin));
        }
        Variant::ThirdPerson => {
            app.add_plugins((ThirdPersonSimulationPlugin, ThirdPersonPresentationPlugin));
        }
    }

    match app.run() {
        AppExit::Success => info!("Battle closed"),
        AppExit::Error(code) => {
            error!("Exited with error code {code}");
            std::process::exit(i32::from(code.get()));
        }
    }
}
