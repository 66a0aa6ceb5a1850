//! Brightness palettes: ordered runs of characters from brightest to darkest.

use crate::error::LightingError;

/// Default palette, brightest first. The trailing space is "no light".
pub const LIGHT_DARK: &str = "@&9#$AHhwai;:. ";

/// Long classic ASCII ramp, brightest first.
pub const LIGHT_DARK_EXTENDED: &str =
    r#"$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\|()1{}[]?-_+~<>i!lI;:,"^`'. "#;

/// Short ramp for small terminals, brightest first.
pub const LIGHT_DARK_SHORT: &str = "@%#*+=-:. ";

/// An immutable, non-empty sequence of display characters.
///
/// Lookups through [`Palette::get_clamped`] never fail: indices past the end
/// resolve to the last entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    chars: Vec<char>,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            chars: LIGHT_DARK.chars().collect(),
        }
    }
}

impl Palette {
    pub fn new(chars: Vec<char>) -> Result<Self, LightingError> {
        if chars.is_empty() {
            return Err(LightingError::invalid_parameter(
                "palette",
                "must contain at least one character",
            ));
        }
        Ok(Palette { chars })
    }

    pub fn parse(s: &str) -> Result<Self, LightingError> {
        Self::new(s.chars().collect())
    }

    pub fn light_dark() -> Self {
        Self::default()
    }

    pub fn light_dark_extended() -> Self {
        Palette {
            chars: LIGHT_DARK_EXTENDED.chars().collect(),
        }
    }

    pub fn light_dark_short() -> Self {
        Palette {
            chars: LIGHT_DARK_SHORT.chars().collect(),
        }
    }

    /// Same characters in the opposite order (darkest first).
    pub fn reversed(&self) -> Self {
        Palette {
            chars: self.chars.iter().rev().copied().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.chars.len() - 1
    }

    /// Position of the first occurrence of `c`.
    pub fn index_of(&self, c: char) -> Option<usize> {
        self.chars.iter().position(|&p| p == c)
    }

    #[inline]
    pub fn get_clamped(&self, index: usize) -> char {
        self.chars[index.min(self.last_index())]
    }

    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }
}
