//! Palette-based shaders.

use crate::config::IntenseLightConfig;
use crate::error::LightingError;
use crate::shading::{Palette, Shader};

/// How a terrain symbol is lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolClass {
    Background,
    Wall,
    Marker,
    Other,
}

/// Intense point light: walls glow near the observer, open floor starts dim.
///
/// - Wall: `palette[min(distance / falloff, near)]`
/// - Background: `palette[min(distance / falloff + mid, last)]`
/// - Marker: itself
/// - Anything else: `UnrecognizedSymbol`
#[derive(Debug, Clone)]
pub struct IntenseLight {
    palette: Palette,
    wall: char,
    background: char,
    marker: char,
    near: usize,
    mid: usize,
    falloff: u32,
}

impl Default for IntenseLight {
    fn default() -> Self {
        // The default config names entries that exist in the default palette
        IntenseLight {
            palette: Palette::light_dark(),
            wall: '#',
            background: ' ',
            marker: '@',
            near: 5,
            mid: 11,
            falloff: 3,
        }
    }
}

impl IntenseLight {
    /// Resolve the distinguished palette entries of `config`.
    pub fn new(config: IntenseLightConfig) -> Result<Self, LightingError> {
        if config.brightness_falloff == 0 {
            return Err(LightingError::invalid_parameter(
                "brightness_falloff",
                "must be at least 1",
            ));
        }
        let near = config.palette.index_of(config.near).ok_or_else(|| {
            LightingError::invalid_parameter(
                "near",
                format!("{:?} is not in the palette", config.near),
            )
        })?;
        let mid = config.palette.index_of(config.mid).ok_or_else(|| {
            LightingError::invalid_parameter(
                "mid",
                format!("{:?} is not in the palette", config.mid),
            )
        })?;

        Ok(IntenseLight {
            palette: config.palette,
            wall: config.wall,
            background: config.background,
            marker: config.marker,
            near,
            mid,
            falloff: config.brightness_falloff,
        })
    }

    pub fn classify(&self, symbol: char) -> SymbolClass {
        // Marker first so a marker that is also a palette char stays itself
        if symbol == self.marker {
            SymbolClass::Marker
        } else if symbol == self.wall {
            SymbolClass::Wall
        } else if symbol == self.background {
            SymbolClass::Background
        } else {
            SymbolClass::Other
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

impl Shader for IntenseLight {
    fn shade(&self, symbol: char, distance: u32) -> Result<char, LightingError> {
        let step = (distance / self.falloff) as usize;
        match self.classify(symbol) {
            SymbolClass::Wall => Ok(self.palette.get_clamped(step.min(self.near))),
            SymbolClass::Background => Ok(self.palette.get_clamped(step.saturating_add(self.mid))),
            SymbolClass::Marker => Ok(symbol),
            SymbolClass::Other => Err(LightingError::UnrecognizedSymbol { symbol, distance }),
        }
    }
}

/// Ignores the terrain and maps distance straight onto the palette.
#[derive(Debug, Clone, Default)]
pub struct DistanceRamp {
    palette: Palette,
}

impl DistanceRamp {
    pub fn new(palette: Palette) -> Self {
        DistanceRamp { palette }
    }
}

impl Shader for DistanceRamp {
    fn shade(&self, _symbol: char, distance: u32) -> Result<char, LightingError> {
        Ok(self.palette.get_clamped(distance as usize))
    }
}
