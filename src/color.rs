//! RGBA colors with CSS-style parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// An 8-bit RGBA color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    fn named(name: &str) -> Option<Color> {
        let c = match name {
            "black" => Color::BLACK,
            "white" => Color::WHITE,
            "red" => Color::rgb(255, 0, 0),
            "green" => Color::rgb(0, 128, 0),
            "lime" => Color::rgb(0, 255, 0),
            "blue" => Color::rgb(0, 0, 255),
            "yellow" => Color::rgb(255, 255, 0),
            "cyan" | "aqua" => Color::rgb(0, 255, 255),
            "magenta" | "fuchsia" => Color::rgb(255, 0, 255),
            "gray" | "grey" => Color::rgb(128, 128, 128),
            "silver" => Color::rgb(192, 192, 192),
            "maroon" => Color::rgb(128, 0, 0),
            "olive" => Color::rgb(128, 128, 0),
            "teal" => Color::rgb(0, 128, 128),
            "navy" => Color::rgb(0, 0, 128),
            "purple" => Color::rgb(128, 0, 128),
            "orange" => Color::rgb(255, 165, 0),
            "transparent" => Color::TRANSPARENT,
            _ => return None,
        };
        Some(c)
    }

    fn hex(digits: &str) -> Option<Color> {
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok().map(|v| v * 17);
        match digits.len() {
            3 => Some(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parses `black`, `orange`, `#f80`, `#ff8800` or `#ff880080`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = match s.strip_prefix('#') {
            Some(digits) => Color::hex(digits),
            None => Color::named(&s.to_ascii_lowercase()),
        };
        parsed.ok_or_else(|| Error::InvalidConfiguration(format!("unrecognised color {:?}", s)))
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("black".parse::<Color>().unwrap(), Color::BLACK);
        assert_eq!(" White ".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("grey".parse::<Color>().unwrap(), "gray".parse::<Color>().unwrap());
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!("#f80".parse::<Color>().unwrap(), Color::rgb(255, 136, 0));
        assert_eq!("#FF8800".parse::<Color>().unwrap(), Color::rgb(255, 136, 0));
        assert_eq!("#ff880080".parse::<Color>().unwrap(), Color::rgba(255, 136, 0, 128));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for s in ["", "#", "#12", "#ggg", "#12345", "rgb(1,2,3)", "blurple"] {
            assert!(s.parse::<Color>().is_err(), "{:?} should not parse", s);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::rgb(255, 165, 0).to_string(), "#ffa500");
        assert_eq!(Color::rgba(0, 0, 0, 0).to_string(), "#00000000");
    }
}
