//! Color: True-color values and the color names accepted in settings.
//!
//! Settings accept `#rrggbb`, `#rgb` or a color name (case-insensitive,
//! spaces ignored, so `"lime green"` and `"LimeGreen"` are the same).

use crate::error::ColorParseError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// True-color RGB representation.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Red
    pub const RED: Self = Self::new(255, 0, 0);
    /// Blue
    pub const BLUE: Self = Self::new(0, 0, 255);
    /// Green (X11 `green`)
    pub const GREEN: Self = Self::new(0, 255, 0);
    /// Lime green (X11 `lime green`)
    pub const LIME_GREEN: Self = Self::new(50, 205, 50);

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Format as `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn parse_hex(digits: &str) -> Option<Self> {
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            6 => u32::from_str_radix(digits, 16).ok().map(Self::from_u32),
            3 => {
                let v = u32::from_str_radix(digits, 16).ok()?;
                let expand = |n: u32| ((n & 0xF) * 0x11) as u8;
                Some(Self::new(expand(v >> 8), expand(v >> 4), expand(v)))
            }
            _ => None,
        }
    }
}

/// Named colors, keyed by lowercase name with spaces removed.
const NAMED: &[(&str, Rgb)] = &[
    ("black", Rgb::BLACK),
    ("white", Rgb::WHITE),
    ("red", Rgb::RED),
    ("green", Rgb::GREEN),
    ("blue", Rgb::BLUE),
    ("limegreen", Rgb::LIME_GREEN),
    ("lime", Rgb::GREEN),
    ("yellow", Rgb::new(255, 255, 0)),
    ("cyan", Rgb::new(0, 255, 255)),
    ("magenta", Rgb::new(255, 0, 255)),
    ("orange", Rgb::new(255, 165, 0)),
    ("purple", Rgb::new(160, 32, 240)),
    ("pink", Rgb::new(255, 192, 203)),
    ("gray", Rgb::new(190, 190, 190)),
    ("grey", Rgb::new(190, 190, 190)),
    ("darkgray", Rgb::new(169, 169, 169)),
    ("darkgrey", Rgb::new(169, 169, 169)),
    ("lightgray", Rgb::new(211, 211, 211)),
    ("lightgrey", Rgb::new(211, 211, 211)),
    ("darkgreen", Rgb::new(0, 100, 0)),
    ("navy", Rgb::new(0, 0, 128)),
    ("skyblue", Rgb::new(135, 206, 235)),
    ("gold", Rgb::new(255, 215, 0)),
];

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(digits) = trimmed.strip_prefix('#') {
            return Self::parse_hex(digits).ok_or_else(|| ColorParseError(s.to_string()));
        }

        let key: String = trimmed
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        NAMED
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, rgb)| *rgb)
            .ok_or_else(|| ColorParseError(s.to_string()))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_hex()
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<u32> for Rgb {
    /// Convert from a 24-bit hex color (e.g., 0xFF5500)
    #[inline]
    fn from(hex: u32) -> Self {
        Self::from_u32(hex)
    }
}
