//! Tank battle games library
//!
//! Two small tank shooters sharing one combat core: a 2D top-down game with a
//! following camera, and a 3D third-person game with a rotating turret and an
//! aiming circle.  Each variant is split into a headless simulation plugin and
//! a presentation plugin, so the battle logic can be driven from tests
//! without a window.

pub mod combat;
pub mod config;
pub mod constants;
pub mod error;
pub mod hud;
pub mod pursuit;
pub mod random;
pub mod third_person;
pub mod top_down;
pub mod vehicle;
