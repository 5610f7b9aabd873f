//! Keyboard tracker: which keys are held, and edge-triggered bindings.
//!
//! Every key seen is recorded as up or down. Keys registered with
//! [`KeyTracker::watch`] additionally report a [`KeyEdge`] when their state
//! actually flips, so auto-repeated keydown events for a held key do not
//! dispatch twice.

#[cfg(test)]
#[path = "keyboard_test.rs"]
mod keyboard_test;

use std::collections::HashMap;

/// Board behaviors that can be bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBinding {
    /// Switch to pan mode while held.
    PanMode,
}

/// Direction of a key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEdge {
    Down,
    Up,
}

/// A watched key changed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTransition {
    pub binding: KeyBinding,
    pub edge: KeyEdge,
}

/// Held-key set plus the bindings watched for transitions.
#[derive(Debug, Default)]
pub struct KeyTracker {
    held: HashMap<String, bool>,
    watched: HashMap<String, KeyBinding>,
}

impl KeyTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch transitions of `key` as `binding`. Replaces any earlier binding for the key.
    pub fn watch(&mut self, key: &str, binding: KeyBinding) {
        self.watched.insert(key.to_owned(), binding);
    }

    /// Whether `key` is currently held.
    #[must_use]
    pub fn is_down(&self, key: &str) -> bool {
        self.held.get(key).copied().unwrap_or(false)
    }

    /// Record a keydown. Returns a transition only if `key` is watched and was up.
    pub fn press(&mut self, key: &str) -> Option<KeyTransition> {
        self.set(key, true)
    }

    /// Record a keyup. Returns a transition only if `key` is watched and was down.
    pub fn release(&mut self, key: &str) -> Option<KeyTransition> {
        self.set(key, false)
    }

    /// Forget all held keys, e.g. when the host window loses focus.
    ///
    /// Returns an `Up` transition for every watched key that was down.
    pub fn release_all(&mut self) -> Vec<KeyTransition> {
        let held: Vec<String> = self
            .held
            .iter()
            .filter(|&(_, &down)| down)
            .map(|(key, _)| key.clone())
            .collect();
        held.iter().filter_map(|key| self.release(key)).collect()
    }

    fn set(&mut self, key: &str, down: bool) -> Option<KeyTransition> {
        let was_down = self.held.insert(key.to_owned(), down).unwrap_or(false);
        if was_down == down {
            return None;
        }
        let binding = *self.watched.get(key)?;
        let edge = if down { KeyEdge::Down } else { KeyEdge::Up };
        Some(KeyTransition { binding, edge })
    }
}
