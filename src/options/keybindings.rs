use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
/// Configurable keyboard bindings mapping actions to key codes.
pub struct KeybindingOptions {
    /// Maps action → key string (e.g. `NextAnnotation` → `"ArrowRight"`).
    pub bindings: HashMap<KeyAction, String>,
    /// Reverse lookup cache (key string → action). Rebuilt on load.
    #[serde(skip)]
    key_to_action: HashMap<String, KeyAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (KeyAction::PreviousAnnotation, "ArrowLeft".into()),
            (KeyAction::NextAnnotation, "ArrowRight".into()),
            (KeyAction::ClearSelection, "Escape".into()),
            (KeyAction::ToggleAnnotations, "KeyH".into()),
        ]);

        let mut opts = Self {
            bindings,
            key_to_action: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }
}

impl PartialEq for KeybindingOptions {
    fn eq(&self, other: &Self) -> bool {
        self.bindings == other.bindings
    }
}

impl Eq for KeybindingOptions {}

impl KeybindingOptions {
    /// Rebuild the reverse lookup map (key string → action).
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_action.clear();
        for (action, key) in &self.bindings {
            let _ = self.key_to_action.insert(key.clone(), *action);
        }
    }

    /// Look up the action for a key string.
    ///
    /// Falls back to scanning `bindings` when the reverse map has not been
    /// rebuilt (e.g. right after deserialization).
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.key_to_action.get(key).copied().or_else(|| {
            self.bindings
                .iter()
                .find_map(|(action, k)| (k == key).then_some(*action))
        })
    }

    /// Bind `action` to `key`, replacing its previous key.
    pub fn bind(&mut self, action: KeyAction, key: impl Into<String>) {
        let _ = self.bindings.insert(action, key.into());
        self.rebuild_reverse_map();
    }
}
