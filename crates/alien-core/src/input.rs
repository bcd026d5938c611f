//! Keyboard state sampled once per tick.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Keys the simulation reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    /// Jump.
    Space,
    /// Push / use.
    P,
}

impl Key {
    /// Parse a key name as sent by the shell. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Key> {
        match name.to_ascii_lowercase().as_str() {
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            "up" => Some(Key::Up),
            "down" => Some(Key::Down),
            "space" | "jump" => Some(Key::Space),
            "p" | "push" => Some(Key::P),
            _ => None,
        }
    }
}

/// Set of keys held during the current tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    held: BTreeSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the shell's `name -> pressed` map.
    pub fn from_key_map(map: &HashMap<String, bool>) -> Self {
        let held = map
            .iter()
            .filter(|(_, pressed)| **pressed)
            .filter_map(|(name, _)| Key::from_name(name))
            .collect();
        Self { held }
    }

    pub fn with(mut self, key: Key) -> Self {
        self.held.insert(key);
        self
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

impl FromIterator<Key> for InputState {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            held: iter.into_iter().collect(),
        }
    }
}
