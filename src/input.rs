//! Keyboard input mapping
//!
//! Translates crossterm key events into game [`Action`]s using the bindings
//! from [`Settings`]. Terminal key repeat provides held-key movement.

use crate::game::{Action, GameState};
use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};

/// Key bindings configuration - supports multiple keys per action
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    pub start: Vec<KeyCode>,
    pub pause: Vec<KeyCode>,
    pub restart: Vec<KeyCode>,
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
    pub soft_drop: Vec<KeyCode>,
    pub hard_drop: Vec<KeyCode>,
    pub rotate_cw: Vec<KeyCode>,
    pub rotate_ccw: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        let lower = s.to_lowercase();
        let code = match lower.as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "esc" | "escape" => KeyCode::Esc,
            "shift" => KeyCode::Modifier(ModifierKeyCode::LeftShift),
            "ctrl" | "control" => KeyCode::Modifier(ModifierKeyCode::LeftControl),
            "alt" => KeyCode::Modifier(ModifierKeyCode::LeftAlt),
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };
        Some(code)
    }

    /// Parse a list of key strings into KeyCodes, skipping unknown names
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter()
            .filter_map(|s| {
                let code = Self::parse_key(s);
                if code.is_none() {
                    tracing::warn!("Ignoring unknown key binding {:?}", s);
                }
                code
            })
            .collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            start: Self::parse_keys(&settings.keys.start),
            pause: Self::parse_keys(&settings.keys.pause),
            restart: Self::parse_keys(&settings.keys.restart),
            move_left: Self::parse_keys(&settings.keys.move_left),
            move_right: Self::parse_keys(&settings.keys.move_right),
            soft_drop: Self::parse_keys(&settings.keys.soft_drop),
            hard_drop: Self::parse_keys(&settings.keys.hard_drop),
            rotate_cw: Self::parse_keys(&settings.keys.rotate_cw),
            rotate_ccw: Self::parse_keys(&settings.keys.rotate_ccw),
            quit: Self::parse_keys(&settings.keys.quit),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Maps key presses to actions
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    bindings: KeyBindings,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create input handler from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            bindings: KeyBindings::from_settings(settings),
        }
    }

    /// Handle a key press event
    ///
    /// The pause key doubles as start before the first game, so a single key
    /// can drive the whole session.
    pub fn key_down(&self, key: KeyEvent, state: GameState) -> Option<Action> {
        // Handle Ctrl+C for quit
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        let code = normalize_key(key.code);
        let bindings = &self.bindings;

        let action = if bindings.pause.contains(&code) {
            if state == GameState::NotStarted {
                Action::Start
            } else {
                Action::TogglePause
            }
        } else if bindings.start.contains(&code) {
            Action::Start
        } else if bindings.restart.contains(&code) {
            Action::Restart
        } else if bindings.move_left.contains(&code) {
            Action::MoveLeft
        } else if bindings.move_right.contains(&code) {
            Action::MoveRight
        } else if bindings.soft_drop.contains(&code) {
            Action::SoftDrop
        } else if bindings.hard_drop.contains(&code) {
            Action::HardDrop
        } else if bindings.rotate_cw.contains(&code) {
            Action::RotateCW
        } else if bindings.rotate_ccw.contains(&code) {
            Action::RotateCCW
        } else if bindings.quit.contains(&code) {
            Action::Quit
        } else {
            return None;
        };

        Some(action)
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_bindings() {
        let input = InputHandler::new();
        let running = GameState::Running;
        assert_eq!(input.key_down(press(KeyCode::Left), running), Some(Action::MoveLeft));
        assert_eq!(input.key_down(press(KeyCode::Right), running), Some(Action::MoveRight));
        assert_eq!(input.key_down(press(KeyCode::Down), running), Some(Action::SoftDrop));
        assert_eq!(input.key_down(press(KeyCode::Char(' ')), running), Some(Action::RotateCW));
        assert_eq!(input.key_down(press(KeyCode::Char('z')), running), Some(Action::RotateCCW));
        assert_eq!(input.key_down(press(KeyCode::Tab), running), Some(Action::HardDrop));
        assert_eq!(input.key_down(press(KeyCode::Char('r')), running), Some(Action::Restart));
        assert_eq!(input.key_down(press(KeyCode::Char('q')), running), Some(Action::Quit));
        assert_eq!(input.key_down(press(KeyCode::F(5)), running), None);
    }

    #[test]
    fn test_escape_starts_then_pauses() {
        let input = InputHandler::new();
        assert_eq!(
            input.key_down(press(KeyCode::Esc), GameState::NotStarted),
            Some(Action::Start)
        );
        assert_eq!(
            input.key_down(press(KeyCode::Esc), GameState::Running),
            Some(Action::TogglePause)
        );
        assert_eq!(
            input.key_down(press(KeyCode::Enter), GameState::NotStarted),
            Some(Action::Start)
        );
    }

    #[test]
    fn test_uppercase_chars_match() {
        let input = InputHandler::new();
        assert_eq!(
            input.key_down(press(KeyCode::Char('Z')), GameState::Running),
            Some(Action::RotateCCW)
        );
    }

    #[test]
    fn test_ctrl_c_quits() {
        let input = InputHandler::new();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(input.key_down(key, GameState::Running), Some(Action::Quit));
    }

    #[test]
    fn test_custom_bindings_from_settings() {
        let mut settings = Settings::default();
        settings.keys.rotate_cw = vec!["x".to_string(), "nonsense".to_string()];
        let bindings = KeyBindings::from_settings(&settings);
        assert_eq!(bindings.rotate_cw, vec![KeyCode::Char('x')]);

        let input = InputHandler::from_settings(&settings);
        assert_eq!(input.key_down(press(KeyCode::Up), GameState::Running), None);
        assert_eq!(
            input.key_down(press(KeyCode::Char('x')), GameState::Running),
            Some(Action::RotateCW)
        );
    }
}
