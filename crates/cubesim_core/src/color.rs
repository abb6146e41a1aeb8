use std::fmt;

use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Color of one face of a cubelet.
#[derive(Serialize, Deserialize, EnumIter, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    /// Right face.
    Red,
    /// Left face.
    Orange,
    /// Up face.
    White,
    /// Down face.
    Yellow,
    /// Front face.
    Green,
    /// Back face.
    Blue,
    /// Internal plastic; never visible on a correctly assembled cube.
    Core,
}
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
impl Color {
    /// Returns whether this is a sticker color (anything except
    /// [`Color::Core`]).
    pub fn is_sticker(self) -> bool {
        self != Color::Core
    }

    /// Returns the one-letter symbol for the color.
    pub fn symbol(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Orange => 'O',
            Color::White => 'W',
            Color::Yellow => 'Y',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Core => '.',
        }
    }

    /// Returns the sRGB value as `0xRRGGBB`.
    pub fn hex(self) -> u32 {
        match self {
            Color::Red => 0xB90000,
            Color::Orange => 0xFF5900,
            Color::White => 0xFFFFFF,
            Color::Yellow => 0xFFD500,
            Color::Green => 0x009E60,
            Color::Blue => 0x0045AD,
            Color::Core => 0x282828,
        }
    }
    /// Returns the sRGB value as `[r, g, b]`.
    pub fn rgb(self) -> [u8; 3] {
        let [_, r, g, b] = self.hex().to_be_bytes();
        [r, g, b]
    }
}
