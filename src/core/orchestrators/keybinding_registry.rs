use std::collections::HashMap;

use crate::core::models::{KeyChord, KeybindingAction, KeybindingSettings};
use crate::global_constants::LOG_TAG_KEYBOARD;

/// Maps pressed chords to actions. The global listener stays alive for the
/// whole process; "unbinding" means emptying this table.
#[derive(Debug, Default)]
pub struct KeybindingRegistry {
    bindings: HashMap<KeyChord, KeybindingAction>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every binding with the hotkeys from `keybindings`. A hotkey
    /// that fails to parse, or collides with one bound earlier, leaves its
    /// action unbound.
    pub fn bind_all(&mut self, keybindings: &KeybindingSettings) {
        self.bindings.clear();

        for action in KeybindingAction::ALL {
            let hotkey = keybindings.hotkey_for(action);
            let chord = match KeyChord::parse(hotkey) {
                Ok(chord) => chord,
                Err(error) => {
                    log::warn!(
                        "{} invalid hotkey {:?} for {}: {}",
                        LOG_TAG_KEYBOARD,
                        hotkey,
                        action,
                        error
                    );
                    continue;
                }
            };

            if let Some(existing) = self.bindings.get(&chord) {
                log::warn!(
                    "{} hotkey {:?} already bound to {}, leaving {} unbound",
                    LOG_TAG_KEYBOARD,
                    hotkey,
                    existing,
                    action
                );
                continue;
            }

            log::info!("{} bound {} to {}", LOG_TAG_KEYBOARD, hotkey, action);
            self.bindings.insert(chord, action);
        }
    }

    pub fn unbind_all(&mut self) {
        if !self.bindings.is_empty() {
            log::info!("{} unbinding {} hotkeys", LOG_TAG_KEYBOARD, self.bindings.len());
        }
        self.bindings.clear();
    }

    pub fn action_for(&self, chord: &KeyChord) -> Option<KeybindingAction> {
        self.bindings.get(chord).copied()
    }

    pub fn is_bound(&self, action: KeybindingAction) -> bool {
        self.bindings.values().any(|bound| *bound == action)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chord(hotkey: &str) -> KeyChord {
        KeyChord::parse(hotkey).unwrap()
    }

    #[test]
    fn test_default_hotkeys_bind_all_four_actions() {
        let mut registry = KeybindingRegistry::new();

        registry.bind_all(&KeybindingSettings::default());

        assert_eq!(registry.len(), 4);
        assert_eq!(
            registry.action_for(&chord("Ctrl+F10")),
            Some(KeybindingAction::ClearHistory)
        );
        assert_eq!(
            registry.action_for(&chord("Ctrl+F11")),
            Some(KeybindingAction::PreviousEntry)
        );
        assert_eq!(
            registry.action_for(&chord("Ctrl+F12")),
            Some(KeybindingAction::NextEntry)
        );
        assert_eq!(
            registry.action_for(&chord("Ctrl+F9")),
            Some(KeybindingAction::ToggleMenu)
        );
    }

    #[test]
    fn test_unbound_chord_maps_to_nothing() {
        let mut registry = KeybindingRegistry::new();
        registry.bind_all(&KeybindingSettings::default());

        assert_eq!(registry.action_for(&chord("Alt+F10")), None);
    }

    #[test]
    fn test_invalid_hotkey_leaves_only_that_action_unbound() {
        let mut keybindings = KeybindingSettings::default();
        keybindings.set_hotkey(KeybindingAction::NextEntry, "Ctrl+Banana".to_string());
        let mut registry = KeybindingRegistry::new();

        registry.bind_all(&keybindings);

        assert_eq!(registry.len(), 3);
        assert!(!registry.is_bound(KeybindingAction::NextEntry));
        assert!(registry.is_bound(KeybindingAction::PreviousEntry));
    }

    #[test]
    fn test_colliding_hotkey_keeps_first_binding() {
        let mut keybindings = KeybindingSettings::default();
        keybindings.set_hotkey(KeybindingAction::ToggleMenu, "Ctrl+F10".to_string());
        let mut registry = KeybindingRegistry::new();

        registry.bind_all(&keybindings);

        assert_eq!(
            registry.action_for(&chord("Ctrl+F10")),
            Some(KeybindingAction::ClearHistory)
        );
        assert!(!registry.is_bound(KeybindingAction::ToggleMenu));
    }

    #[test]
    fn test_rebinding_replaces_previous_hotkeys() {
        let mut registry = KeybindingRegistry::new();
        registry.bind_all(&KeybindingSettings::default());

        let mut keybindings = KeybindingSettings::default();
        keybindings.set_hotkey(KeybindingAction::ClearHistory, "Super+Delete".to_string());
        registry.bind_all(&keybindings);

        assert_eq!(registry.action_for(&chord("Ctrl+F10")), None);
        assert_eq!(
            registry.action_for(&chord("Super+Delete")),
            Some(KeybindingAction::ClearHistory)
        );
    }

    #[test]
    fn test_unbind_all_clears_every_binding() {
        let mut registry = KeybindingRegistry::new();
        registry.bind_all(&KeybindingSettings::default());

        registry.unbind_all();

        assert!(registry.is_empty());
        assert_eq!(registry.action_for(&chord("Ctrl+F12")), None);
    }
}
