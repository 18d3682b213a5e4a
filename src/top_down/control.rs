//! Keyboard input for the top-down variant.
//!
//! Input is polled in `Update` and written to [`TopDownIntent`]; the fixed
//! tick reads it.  Held keys are overwritten every frame, while the fire edge
//! is latched (`|=`) so a press between two ticks is never lost.  The tick
//! clears the latch once it has consumed it.
//!
//! Tests populate `TopDownIntent` directly and never touch the keyboard.

use bevy::prelude::*;

/// What the player asked for since the last tick.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopDownIntent {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// Latched fire request; cleared by the tick that consumes it.
    pub fire: bool,
}

impl TopDownIntent {
    /// Take the latched fire request, leaving it cleared.
    pub fn take_fire(&mut self) -> bool {
        std::mem::take(&mut self.fire)
    }
}

/// Translate WASD / arrow keys and Space into [`TopDownIntent`].
///
/// - **W / ↑** → forward
/// - **S / ↓** → backward
/// - **A / ←** → turn left
/// - **D / →** → turn right
/// - **Space** (press edge) → fire
pub fn keyboard_to_top_down_intent_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut intent: ResMut<TopDownIntent>,
) {
    intent.forward = keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]);
    intent.backward = keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]);
    intent.turn_left = keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]);
    intent.turn_right = keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]);
    intent.fire |= keys.just_pressed(KeyCode::Space);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<ButtonInput<KeyCode>>();
        app.init_resource::<TopDownIntent>();
        app.add_systems(Update, keyboard_to_top_down_intent_system);
        app
    }

    #[test]
    fn held_keys_map_to_movement() {
        let mut app = app();
        {
            let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keys.press(KeyCode::ArrowUp);
            keys.press(KeyCode::KeyD);
        }
        app.update();

        let intent = *app.world().resource::<TopDownIntent>();
        assert!(intent.forward && intent.turn_right);
        assert!(!intent.backward && !intent.turn_left);
    }

    #[test]
    fn fire_edge_stays_latched_until_taken() {
        let mut app = app();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Space);
        app.update();

        // Next frame the key is still held but no longer "just pressed".
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .clear();
        app.update();

        let mut intent = app.world_mut().resource_mut::<TopDownIntent>();
        assert!(intent.take_fire());
        assert!(!intent.take_fire());
    }

    #[test]
    fn releasing_keys_clears_movement() {
        let mut app = app();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyW);
        app.update();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .release(KeyCode::KeyW);
        app.update();

        assert!(!app.world().resource::<TopDownIntent>().forward);
    }
}
