//! Console keybindings.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;

use crate::core::input::matches_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleAction {
    Submit,
    DeleteCharBackward,
    DeleteCharForward,
    DeleteWordBackward,
    DeleteToLineStart,
    DeleteToLineEnd,
    CursorLeft,
    CursorRight,
    CursorWordLeft,
    CursorWordRight,
    CursorLineStart,
    CursorLineEnd,
    HistoryPrev,
    HistoryNext,
}

pub type KeyId = String;

#[derive(Debug, Clone)]
pub enum KeyBinding {
    Single(KeyId),
    Multiple(Vec<KeyId>),
}

impl From<&str> for KeyBinding {
    fn from(value: &str) -> Self {
        KeyBinding::Single(value.to_string())
    }
}

impl From<String> for KeyBinding {
    fn from(value: String) -> Self {
        KeyBinding::Single(value)
    }
}

impl From<Vec<&str>> for KeyBinding {
    fn from(value: Vec<&str>) -> Self {
        KeyBinding::Multiple(value.into_iter().map(|item| item.to_string()).collect())
    }
}

impl From<Vec<String>> for KeyBinding {
    fn from(value: Vec<String>) -> Self {
        KeyBinding::Multiple(value)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConsoleKeybindingsConfig {
    entries: HashMap<ConsoleAction, KeyBinding>,
}

impl ConsoleKeybindingsConfig {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn set<K: Into<KeyBinding>>(&mut self, action: ConsoleAction, keys: K) {
        self.entries.insert(action, keys.into());
    }
}

/// History recall sits on ctrl+arrow so plain arrows stay available to the
/// host (scrolling, focus movement).
pub static DEFAULT_CONSOLE_KEYBINDINGS: Lazy<HashMap<ConsoleAction, Vec<KeyId>>> =
    Lazy::new(|| {
        use ConsoleAction::*;

        let mut map = HashMap::new();
        map.insert(Submit, vec!["enter".to_string()]);
        map.insert(DeleteCharBackward, vec!["backspace".to_string()]);
        map.insert(DeleteCharForward, vec!["delete".to_string()]);
        map.insert(
            DeleteWordBackward,
            vec!["ctrl+w".to_string(), "alt+backspace".to_string()],
        );
        map.insert(DeleteToLineStart, vec!["ctrl+u".to_string()]);
        map.insert(DeleteToLineEnd, vec!["ctrl+k".to_string()]);
        map.insert(CursorLeft, vec!["left".to_string(), "ctrl+b".to_string()]);
        map.insert(CursorRight, vec!["right".to_string(), "ctrl+f".to_string()]);
        map.insert(
            CursorWordLeft,
            vec!["alt+left".to_string(), "ctrl+left".to_string(), "alt+b".to_string()],
        );
        map.insert(
            CursorWordRight,
            vec!["alt+right".to_string(), "ctrl+right".to_string(), "alt+f".to_string()],
        );
        map.insert(
            CursorLineStart,
            vec!["home".to_string(), "ctrl+a".to_string()],
        );
        map.insert(CursorLineEnd, vec!["end".to_string(), "ctrl+e".to_string()]);
        map.insert(HistoryPrev, vec!["ctrl+up".to_string()]);
        map.insert(HistoryNext, vec!["ctrl+down".to_string()]);

        map
    });

pub struct ConsoleKeybindingsManager {
    action_to_keys: HashMap<ConsoleAction, Vec<KeyId>>,
}

impl ConsoleKeybindingsManager {
    pub fn new(config: ConsoleKeybindingsConfig) -> Self {
        let mut manager = Self {
            action_to_keys: HashMap::new(),
        };
        manager.build_maps(&config);
        manager
    }

    fn build_maps(&mut self, config: &ConsoleKeybindingsConfig) {
        self.action_to_keys.clear();

        for (action, keys) in DEFAULT_CONSOLE_KEYBINDINGS.iter() {
            self.action_to_keys.insert(*action, keys.clone());
        }

        for (action, binding) in config.entries.iter() {
            let key_list = match binding {
                KeyBinding::Single(key) => vec![key.clone()],
                KeyBinding::Multiple(keys) => keys.clone(),
            };
            self.action_to_keys.insert(*action, key_list);
        }
    }

    pub fn matches(&self, data: &str, action: ConsoleAction) -> bool {
        let Some(keys) = self.action_to_keys.get(&action) else {
            return false;
        };
        keys.iter().any(|key| matches_key(data, key.as_str()))
    }

    pub fn get_keys(&self, action: ConsoleAction) -> Vec<KeyId> {
        self.action_to_keys.get(&action).cloned().unwrap_or_default()
    }

    pub fn set_config(&mut self, config: ConsoleKeybindingsConfig) {
        self.build_maps(&config);
    }
}

/// Shared handle so a host and several consoles can agree on one binding set.
pub type ConsoleKeybindingsHandle = Arc<Mutex<ConsoleKeybindingsManager>>;

pub fn default_console_keybindings_handle() -> ConsoleKeybindingsHandle {
    Arc::new(Mutex::new(ConsoleKeybindingsManager::new(
        ConsoleKeybindingsConfig::default(),
    )))
}
