//! Input boundary between winit and [`MovementState`].
//!
//! Window events are first reduced to a small [`InputEvent`] vocabulary,
//! then a [`KeyRouter`] validates the characters and forwards them to the
//! movement state. Characters that are neither movement keys nor the quit
//! key never reach the state.

use winit::{
    event::{ElementState, KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::movement::{MovementKey, MovementState};

/// Quit key used when none is configured.
pub const DEFAULT_QUIT_KEY: char = 'q';

/// Input after translation from raw window events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(char),
    Released(char),
    FocusLost,
    /// Escape or an equivalent "leave now" request.
    QuitRequested,
}

/// Translate a winit window event into an [`InputEvent`], if it is one we
/// care about.
pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::KeyboardInput { event, .. } => translate_key_event(event),
        WindowEvent::Focused(false) => Some(InputEvent::FocusLost),
        _ => None,
    }
}

/// Translate a winit keyboard event.
pub fn translate_key_event(event: &KeyEvent) -> Option<InputEvent> {
    translate_key(event.physical_key, event.state, event.repeat)
}

/// Translate the parts of a keyboard event that matter for movement.
///
/// Physical key codes are used so the mapping does not depend on layout or
/// modifiers. Auto-repeat presses are dropped; the key is already held.
pub fn translate_key(key: PhysicalKey, state: ElementState, repeat: bool) -> Option<InputEvent> {
    let PhysicalKey::Code(code) = key else {
        return None;
    };

    if code == KeyCode::Escape {
        return (state == ElementState::Pressed).then_some(InputEvent::QuitRequested);
    }

    let c = key_code_to_char(code)?;
    match state {
        ElementState::Pressed if repeat => None,
        ElementState::Pressed => Some(InputEvent::Pressed(c)),
        ElementState::Released => Some(InputEvent::Released(c)),
    }
}

/// Lower-case character for a letter or digit key code.
pub fn key_code_to_char(code: KeyCode) -> Option<char> {
    let c = match code {
        KeyCode::KeyA => 'a',
        KeyCode::KeyB => 'b',
        KeyCode::KeyC => 'c',
        KeyCode::KeyD => 'd',
        KeyCode::KeyE => 'e',
        KeyCode::KeyF => 'f',
        KeyCode::KeyG => 'g',
        KeyCode::KeyH => 'h',
        KeyCode::KeyI => 'i',
        KeyCode::KeyJ => 'j',
        KeyCode::KeyK => 'k',
        KeyCode::KeyL => 'l',
        KeyCode::KeyM => 'm',
        KeyCode::KeyN => 'n',
        KeyCode::KeyO => 'o',
        KeyCode::KeyP => 'p',
        KeyCode::KeyQ => 'q',
        KeyCode::KeyR => 'r',
        KeyCode::KeyS => 's',
        KeyCode::KeyT => 't',
        KeyCode::KeyU => 'u',
        KeyCode::KeyV => 'v',
        KeyCode::KeyW => 'w',
        KeyCode::KeyX => 'x',
        KeyCode::KeyY => 'y',
        KeyCode::KeyZ => 'z',
        KeyCode::Digit0 => '0',
        KeyCode::Digit1 => '1',
        KeyCode::Digit2 => '2',
        KeyCode::Digit3 => '3',
        KeyCode::Digit4 => '4',
        KeyCode::Digit5 => '5',
        KeyCode::Digit6 => '6',
        KeyCode::Digit7 => '7',
        KeyCode::Digit8 => '8',
        KeyCode::Digit9 => '9',
        _ => return None,
    };
    Some(c)
}

/// Validates input characters and applies them to a [`MovementState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyRouter {
    quit_key: char,
}

impl KeyRouter {
    /// Create a router with the given quit key (case-insensitive).
    pub fn new(quit_key: char) -> Self {
        Self {
            quit_key: quit_key.to_ascii_lowercase(),
        }
    }

    pub fn quit_key(&self) -> char {
        self.quit_key
    }

    /// Returns true if the character is a movement key or the quit key.
    pub fn accepts(&self, c: char) -> bool {
        MovementKey::from_char(c).is_some() || c.to_ascii_lowercase() == self.quit_key
    }

    /// Apply an event to the state.
    ///
    /// Returns `false` when the event was rejected or had nothing to act on.
    pub fn route(&self, state: &mut MovementState, event: InputEvent) -> bool {
        match event {
            InputEvent::Pressed(c) => {
                if let Some(key) = MovementKey::from_char(c) {
                    state.add_key(key.as_char());
                    true
                } else if c.to_ascii_lowercase() == self.quit_key {
                    state.request_quit();
                    true
                } else {
                    log::debug!("Ignoring unmapped key press {:?}", c);
                    false
                }
            }
            InputEvent::Released(c) => match MovementKey::from_char(c) {
                Some(key) => {
                    state.remove_key(key.as_char());
                    true
                }
                None => false,
            },
            InputEvent::FocusLost => {
                log::debug!("Focus lost; releasing held keys");
                state.clear_keys();
                true
            }
            InputEvent::QuitRequested => {
                state.request_quit();
                true
            }
        }
    }
}

impl Default for KeyRouter {
    fn default() -> Self {
        Self::new(DEFAULT_QUIT_KEY)
    }
}
