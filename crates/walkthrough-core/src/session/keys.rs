//! Keyboard shortcut layer.

use std::str::FromStr;

/// A key press the host forwards to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Space,
    Escape,
    /// Number row key, `1` to `9`
    Digit(u8),
    Char(char),
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" | "arrowleft" => Ok(Key::Left),
            "right" | "arrowright" => Ok(Key::Right),
            "space" | " " => Ok(Key::Space),
            "esc" | "escape" => Ok(Key::Escape),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Ok(Key::Digit(c as u8 - b'0')),
                    (Some(c), None) => Ok(Key::Char(c)),
                    _ => Err(format!("Unknown key: {s}")),
                }
            }
        }
    }
}
