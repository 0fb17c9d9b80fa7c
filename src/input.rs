//! Keyboard decoding
//!
//! The host forwards DOM `KeyboardEvent.key` strings; everything an engine
//! does not understand decodes to [`Key::Other`] and is ignored.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Enter,
    Backspace,
    /// A single ASCII letter, always uppercase
    Letter(char),
    Other,
}

impl Key {
    /// Decode a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            " " | "Spacebar" => Key::Space,
            "Enter" => Key::Enter,
            "Backspace" => Key::Backspace,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphabetic() => {
                        Key::Letter(c.to_ascii_uppercase())
                    }
                    _ => Key::Other,
                }
            }
        }
    }
}

/// Keys currently held down, sampled at frame boundaries
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    keys: HashSet<Key>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        if key != Key::Other {
            self.keys.insert(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        self.keys.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// True if any of `keys` is held
    pub fn any(&self, keys: &[Key]) -> bool {
        keys.iter().any(|k| self.keys.contains(k))
    }

    /// Forget everything (window blur drops key-up events)
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dom() {
        assert_eq!(Key::from_dom("ArrowUp"), Key::ArrowUp);
        assert_eq!(Key::from_dom(" "), Key::Space);
        assert_eq!(Key::from_dom("Enter"), Key::Enter);
        assert_eq!(Key::from_dom("a"), Key::Letter('A'));
        assert_eq!(Key::from_dom("Z"), Key::Letter('Z'));
        assert_eq!(Key::from_dom("Shift"), Key::Other);
        assert_eq!(Key::from_dom("1"), Key::Other);
        assert_eq!(Key::from_dom("é"), Key::Other);
        assert_eq!(Key::from_dom(""), Key::Other);
    }

    #[test]
    fn test_held_keys() {
        let mut held = HeldKeys::new();
        held.press(Key::Letter('A'));
        held.press(Key::Other);
        assert!(held.is_held(Key::Letter('A')));
        assert!(!held.is_held(Key::Other));
        assert!(held.any(&[Key::ArrowLeft, Key::Letter('A')]));

        held.release(Key::Letter('A'));
        assert!(!held.any(&[Key::ArrowLeft, Key::Letter('A')]));
    }
}
