//! wasd_point - a single point on a 2D plane, steered with WASD.
//!
//! The movement core lives in [`movement`]; everything else is the thin
//! shell that feeds it window input and shows where the point is.

pub mod config;
pub mod engine;
pub mod hud;
pub mod input;
pub mod math;
pub mod movement;
pub mod render;

pub use crate::config::{ConfigError, DemoConfig};
pub use crate::engine::{Engine, EngineConfig, EngineContext};
pub use crate::hud::CoordinateReadout;
pub use crate::input::{InputEvent, KeyRouter};
pub use crate::math::Vec2;
pub use crate::movement::{Bounds, MovementKey, MovementState};
pub use crate::render::{Frame, LogRenderer, PositionRenderer, TitleRenderer};
