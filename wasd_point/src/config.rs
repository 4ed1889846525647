//! Demo configuration.
//!
//! Loaded from JSON; every field is optional and falls back to
//! [`DemoConfig::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    input::{KeyRouter, DEFAULT_QUIT_KEY},
    math::Vec2,
    movement::{Bounds, MovementKey, MovementState, DEFAULT_EXTENT, DEFAULT_SPEED},
};

/// Errors produced while loading or validating a [`DemoConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("movement speed must be a positive finite number, got {0}")]
    InvalidSpeed(f32),
    #[error("bound must be a positive finite number, got {0}")]
    InvalidBound(f32),
    #[error("start position ({x}, {y}) lies outside +/-{bound}")]
    StartOutOfBounds { x: f32, y: f32, bound: f32 },
    #[error("quit key {0:?} is already a movement key")]
    QuitKeyConflict(char),
    #[error("quit key {0:?} has no key on the keyboard; use a letter or digit")]
    UnmappableQuitKey(char),
    #[error("window size {width}x{height} is not usable")]
    InvalidWindowSize { width: u32, height: u32 },
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings for the WASD point demo.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Units per second.
    pub speed: f32,
    /// The point is clamped to `[-bound, bound]` on both axes.
    pub bound: f32,
    pub start: Vec2,
    pub quit_key: char,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "WASD Point".into(),
            width: 800,
            height: 600,
            speed: DEFAULT_SPEED,
            bound: DEFAULT_EXTENT,
            start: Vec2::ZERO,
            quit_key: DEFAULT_QUIT_KEY,
        }
    }
}

impl DemoConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize this config to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read, parse and validate a config file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        if !(self.bound.is_finite() && self.bound > 0.0) {
            return Err(ConfigError::InvalidBound(self.bound));
        }
        if !self.bounds().contains(self.start) {
            return Err(ConfigError::StartOutOfBounds {
                x: self.start.x,
                y: self.start.y,
                bound: self.bound,
            });
        }
        if MovementKey::from_char(self.quit_key).is_some() {
            return Err(ConfigError::QuitKeyConflict(self.quit_key));
        }
        if !self.quit_key.is_ascii_alphanumeric() {
            return Err(ConfigError::UnmappableQuitKey(self.quit_key));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidWindowSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::symmetric(self.bound)
    }

    /// Build the movement state described by this config.
    pub fn to_state(&self) -> MovementState {
        MovementState::new()
            .with_speed(self.speed)
            .with_bounds(self.bounds())
            .with_position(self.start)
    }

    pub fn key_router(&self) -> KeyRouter {
        KeyRouter::new(self.quit_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = DemoConfig::default();
        config.validate().unwrap();
        let state = config.to_state();
        assert_eq!(state.movement_speed(), 2.0);
        assert_eq!(state.bounds(), Bounds::symmetric(10.0));
        assert_eq!(state.position(), Vec2::ZERO);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = DemoConfig::from_json(r#"{ "speed": 4.5, "start": { "x": 1.0, "y": -2.0 } }"#)
            .unwrap();
        assert_eq!(config.speed, 4.5);
        assert_eq!(config.start, Vec2::new(1.0, -2.0));
        assert_eq!(config.title, "WASD Point");
        assert_eq!(config.quit_key, 'q');
        assert_eq!(config.to_state().position(), Vec2::new(1.0, -2.0));
    }

    #[test]
    fn json_round_trip() {
        let config = DemoConfig {
            title: "Custom".into(),
            quit_key: 'x',
            ..DemoConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(DemoConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn rejects_bad_speed() {
        let err = DemoConfig::from_json(r#"{ "speed": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSpeed(s) if s == 0.0));

        let err = DemoConfig::from_json(r#"{ "speed": -3.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSpeed(_)));
    }

    #[test]
    fn rejects_bad_bound_and_start() {
        let err = DemoConfig::from_json(r#"{ "bound": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBound(_)));

        let err = DemoConfig::from_json(r#"{ "start": { "x": 11.0, "y": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::StartOutOfBounds { .. }));
    }

    #[test]
    fn rejects_movement_key_as_quit_key() {
        let err = DemoConfig::from_json(r#"{ "quit_key": "W" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::QuitKeyConflict('W')));
    }

    #[test]
    fn rejects_quit_key_without_a_key_code() {
        for json in [r#"{ "quit_key": "/" }"#, r#"{ "quit_key": " " }"#, r#"{ "quit_key": "é" }"#] {
            let err = DemoConfig::from_json(json).unwrap_err();
            assert!(matches!(err, ConfigError::UnmappableQuitKey(_)), "{json}");
        }
        assert_eq!(DemoConfig::from_json(r#"{ "quit_key": "7" }"#).unwrap().quit_key, '7');
        assert_eq!(DemoConfig::from_json(r#"{ "quit_key": "E" }"#).unwrap().quit_key, 'E');
    }

    #[test]
    fn rejects_zero_window() {
        let err = DemoConfig::from_json(r#"{ "width": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWindowSize { width: 0, .. }));
    }

    #[test]
    fn parse_errors_are_reported() {
        let err = DemoConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = DemoConfig::load_from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn key_router_uses_quit_key() {
        let config = DemoConfig {
            quit_key: 'X',
            ..DemoConfig::default()
        };
        assert_eq!(config.key_router().quit_key(), 'x');
    }
}
