use std::fmt;

use anyhow::{anyhow, bail, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeybindingAction {
    ClearHistory,
    PreviousEntry,
    NextEntry,
    ToggleMenu,
}

impl KeybindingAction {
    pub const ALL: [KeybindingAction; 4] = [
        KeybindingAction::ClearHistory,
        KeybindingAction::PreviousEntry,
        KeybindingAction::NextEntry,
        KeybindingAction::ToggleMenu,
    ];

    pub fn setting_key(&self) -> &'static str {
        match self {
            KeybindingAction::ClearHistory => "clear-history",
            KeybindingAction::PreviousEntry => "previous-entry",
            KeybindingAction::NextEntry => "next-entry",
            KeybindingAction::ToggleMenu => "toggle-menu",
        }
    }
}

impl fmt::Display for KeybindingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.setting_key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Uppercase ASCII letter or digit.
    Char(char),
    Function(u8),
    Space,
    Tab,
    Escape,
    Return,
    Backspace,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
}

impl KeyCode {
    fn parse(name: &str) -> Result<Self> {
        let upper = name.to_ascii_uppercase();

        let mut chars = upper.chars();
        if let (Some(single), None) = (chars.next(), chars.next()) {
            if single.is_ascii_alphanumeric() {
                return Ok(KeyCode::Char(single));
            }
        }

        if let Some(number) = upper.strip_prefix('F') {
            if let Ok(index) = number.parse::<u8>() {
                if (1..=12).contains(&index) {
                    return Ok(KeyCode::Function(index));
                }
            }
        }

        let named = match upper.as_str() {
            "SPACE" => KeyCode::Space,
            "TAB" => KeyCode::Tab,
            "ESC" | "ESCAPE" => KeyCode::Escape,
            "ENTER" | "RETURN" => KeyCode::Return,
            "BACKSPACE" => KeyCode::Backspace,
            "INSERT" => KeyCode::Insert,
            "DELETE" | "DEL" => KeyCode::Delete,
            "HOME" => KeyCode::Home,
            "END" => KeyCode::End,
            "PAGEUP" => KeyCode::PageUp,
            "PAGEDOWN" => KeyCode::PageDown,
            "UP" => KeyCode::Up,
            "DOWN" => KeyCode::Down,
            "LEFT" => KeyCode::Left,
            "RIGHT" => KeyCode::Right,
            _ => bail!("unknown key '{}'", name),
        };

        Ok(named)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub super_key: bool,
}

/// A key pressed together with a set of held modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub modifiers: Modifiers,
    pub key: KeyCode,
}

impl KeyChord {
    /// Parses strings such as `Ctrl+Alt+H` or `Super+F12`.
    pub fn parse(hotkey: &str) -> Result<Self> {
        let mut modifiers = Modifiers::default();
        let mut key = None;

        for part in hotkey.split('+').map(str::trim) {
            if part.is_empty() {
                bail!("empty segment in hotkey '{}'", hotkey);
            }

            if key.is_some() {
                bail!("key must be the last segment in hotkey '{}'", hotkey);
            }

            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" | "option" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                "super" | "meta" | "cmd" | "win" => modifiers.super_key = true,
                _ => key = Some(KeyCode::parse(part)?),
            }
        }

        let key = key.ok_or_else(|| anyhow!("hotkey '{}' has no key", hotkey))?;

        Ok(Self { modifiers, key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ctrl_function_key() {
        let chord = KeyChord::parse("Ctrl+F10").unwrap();

        assert!(chord.modifiers.ctrl);
        assert!(!chord.modifiers.alt);
        assert_eq!(chord.key, KeyCode::Function(10));
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims_segments() {
        let chord = KeyChord::parse(" alt + SHIFT + v ").unwrap();

        assert!(chord.modifiers.alt);
        assert!(chord.modifiers.shift);
        assert_eq!(chord.key, KeyCode::Char('V'));
    }

    #[test]
    fn test_parse_named_key_with_super() {
        let chord = KeyChord::parse("Super+PageDown").unwrap();

        assert!(chord.modifiers.super_key);
        assert_eq!(chord.key, KeyCode::PageDown);
    }

    #[test]
    fn test_parse_rejects_missing_key() {
        assert!(KeyChord::parse("Ctrl+Shift").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        assert!(KeyChord::parse("Ctrl+Banana").is_err());
    }

    #[test]
    fn test_parse_rejects_modifier_after_key() {
        assert!(KeyChord::parse("A+Ctrl").is_err());
    }

    #[test]
    fn test_parse_rejects_out_of_range_function_key() {
        assert!(KeyChord::parse("F13").is_err());
    }

    #[test]
    fn test_action_setting_keys() {
        let keys: Vec<&str> = KeybindingAction::ALL
            .iter()
            .map(|action| action.setting_key())
            .collect();

        assert_eq!(
            keys,
            vec!["clear-history", "previous-entry", "next-entry", "toggle-menu"]
        );
    }
}
