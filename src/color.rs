// src/color.rs

//! Defines the 16 standard ANSI colors (`NamedColor`), the `Rgb` value they
//! resolve to, and the SGR code ranges that select them.

use log::warn;
use serde::{Deserialize, Serialize};

/// An sRGB color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

/// Standard ANSI named colors (indices 0-15).
/// These are the 8 normal and 8 bright colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NamedColor {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,       // Also known as Grey
    BrightBlack = 8, // Also known as Dark Grey
    BrightRed = 9,
    BrightGreen = 10,
    BrightYellow = 11,
    BrightBlue = 12,
    BrightMagenta = 13,
    BrightCyan = 14,
    BrightWhite = 15,
}

const NAMED_COLORS: [NamedColor; 16] = [
    NamedColor::Black,
    NamedColor::Red,
    NamedColor::Green,
    NamedColor::Yellow,
    NamedColor::Blue,
    NamedColor::Magenta,
    NamedColor::Cyan,
    NamedColor::White,
    NamedColor::BrightBlack,
    NamedColor::BrightRed,
    NamedColor::BrightGreen,
    NamedColor::BrightYellow,
    NamedColor::BrightBlue,
    NamedColor::BrightMagenta,
    NamedColor::BrightCyan,
    NamedColor::BrightWhite,
];

// SGR code ranges selecting named colors.
const SGR_FG_NORMAL: std::ops::RangeInclusive<u16> = 30..=37;
const SGR_FG_BRIGHT: std::ops::RangeInclusive<u16> = 90..=97;
const SGR_BG_NORMAL: std::ops::RangeInclusive<u16> = 40..=47;
const SGR_BG_BRIGHT: std::ops::RangeInclusive<u16> = 100..=107;

impl NamedColor {
    /// Converts a u8 index (0-15) to a `NamedColor`.
    /// Returns `None` (with a warning) for indices outside the palette.
    pub fn from_index(idx: u8) -> Option<Self> {
        let color = NAMED_COLORS.get(idx as usize).copied();
        if color.is_none() {
            warn!("Invalid NamedColor index: {}. Must be 0-15.", idx);
        }
        color
    }

    /// Maps an SGR foreground code (30-37, 90-97) to its named color.
    pub fn from_sgr_foreground(code: u16) -> Option<Self> {
        Self::from_sgr_ranges(code, &SGR_FG_NORMAL, &SGR_FG_BRIGHT)
    }

    /// Maps an SGR background code (40-47, 100-107) to its named color.
    pub fn from_sgr_background(code: u16) -> Option<Self> {
        Self::from_sgr_ranges(code, &SGR_BG_NORMAL, &SGR_BG_BRIGHT)
    }

    fn from_sgr_ranges(
        code: u16,
        normal: &std::ops::RangeInclusive<u16>,
        bright: &std::ops::RangeInclusive<u16>,
    ) -> Option<Self> {
        let idx = if normal.contains(&code) {
            code - normal.start()
        } else if bright.contains(&code) {
            code - bright.start() + 8
        } else {
            return None;
        };
        Self::from_index(idx as u8)
    }

    /// Returns the RGB value of this named color.
    /// These are common sRGB values used by many terminals.
    pub fn to_rgb(self) -> Rgb {
        match self {
            NamedColor::Black => Rgb::new(0, 0, 0),
            NamedColor::Red => Rgb::new(205, 0, 0),
            NamedColor::Green => Rgb::new(0, 205, 0),
            NamedColor::Yellow => Rgb::new(205, 205, 0),
            NamedColor::Blue => Rgb::new(0, 0, 238),
            NamedColor::Magenta => Rgb::new(205, 0, 205),
            NamedColor::Cyan => Rgb::new(0, 205, 205),
            NamedColor::White => Rgb::new(229, 229, 229),
            NamedColor::BrightBlack => Rgb::new(127, 127, 127),
            NamedColor::BrightRed => Rgb::new(255, 0, 0),
            NamedColor::BrightGreen => Rgb::new(0, 255, 0),
            NamedColor::BrightYellow => Rgb::new(255, 255, 0),
            NamedColor::BrightBlue => Rgb::new(92, 92, 255),
            NamedColor::BrightMagenta => Rgb::new(255, 0, 255),
            NamedColor::BrightCyan => Rgb::new(0, 255, 255),
            NamedColor::BrightWhite => Rgb::new(255, 255, 255),
        }
    }
}
