//! Keyboard and mouse input for the third-person variant.
//!
//! ## Pipeline (every `Update` frame)
//!
//! 1. [`keyboard_to_third_person_intent_system`]: WASD hull, ←/→ turret,
//!    Space fire edge, Tab toggle edge.
//! 2. [`mouse_to_third_person_intent_system`]: LMB fire edge, RMB steady,
//!    cursor offset → turret target.
//!
//! Both systems only write [`ThirdPersonIntent`].  Whether the cursor or the
//! arrow keys steer the turret is decided by the battle, which owns the
//! mouse-aim toggle.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct ThirdPersonIntent {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub turret_left: bool,
    pub turret_right: bool,
    /// Hull-relative turret angle requested by the cursor; `None` while the
    /// cursor is outside the window.
    pub turret_target: Option<f32>,
    /// Steady-aim held this frame.
    pub steady: bool,
    /// Latched fire request.
    pub fire: bool,
    /// Latched mouse-aim toggle.
    pub toggle_mouse_aim: bool,
}

impl ThirdPersonIntent {
    /// Take both latched edges, leaving them cleared.
    pub fn take_edges(&mut self) -> (bool, bool) {
        (
            std::mem::take(&mut self.fire),
            std::mem::take(&mut self.toggle_mouse_aim),
        )
    }
}

/// Turret angle for a cursor offset from the window centre (y down).
///
/// Straight up is 0, right is +π/2, straight down is ±π.
pub fn turret_angle_from_cursor(offset: Vec2) -> f32 {
    offset.x.atan2(-offset.y)
}

pub fn keyboard_to_third_person_intent_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut intent: ResMut<ThirdPersonIntent>,
) {
    intent.forward = keys.pressed(KeyCode::KeyW);
    intent.backward = keys.pressed(KeyCode::KeyS);
    intent.turn_left = keys.pressed(KeyCode::KeyA);
    intent.turn_right = keys.pressed(KeyCode::KeyD);
    intent.turret_left = keys.pressed(KeyCode::ArrowLeft);
    intent.turret_right = keys.pressed(KeyCode::ArrowRight);
    intent.fire |= keys.just_pressed(KeyCode::Space);
    intent.toggle_mouse_aim |= keys.just_pressed(KeyCode::Tab);
}

pub fn mouse_to_third_person_intent_system(
    buttons: Res<ButtonInput<MouseButton>>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    mut intent: ResMut<ThirdPersonIntent>,
) {
    intent.steady = buttons.pressed(MouseButton::Right);
    intent.fire |= buttons.just_pressed(MouseButton::Left);

    intent.turret_target = q_window.single().ok().and_then(|window| {
        let cursor = window.cursor_position()?;
        Some(turret_angle_from_cursor(cursor - window.size() / 2.0))
    });
}
