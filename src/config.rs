//! Configuration for the visibility engine and the palette shader.

use crate::error::LightingError;
use crate::shading::Palette;
use crate::visibility::OpaqueSet;

/// Options for one visibility computation.
#[derive(Debug, Clone, PartialEq)]
pub struct LightingConfig {
    /// Symbols that stop a ray (the struck cell is still visible)
    pub opaque_symbols: OpaqueSet,
    /// Symbol written to every cell no ray reached
    pub invisible_symbol: char,
    /// Number of rays cast across the field of view
    pub ray_count: u32,
    /// Angular span of the rays, in degrees, starting at heading 0 (east)
    pub field_of_view_degrees: f64,
    /// Vertical step scale; terminal cells are about twice as tall as wide
    pub aspect_ratio_correction: f64,
    /// Cast rays on the rayon thread pool
    pub parallel: bool,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            opaque_symbols: OpaqueSet::from("o"),
            invisible_symbol: '?',
            ray_count: 360,
            field_of_view_degrees: 360.0,
            aspect_ratio_correction: 0.5,
            parallel: false,
        }
    }
}

impl LightingConfig {
    pub fn with_opaque(mut self, opaque: impl Into<OpaqueSet>) -> Self {
        self.opaque_symbols = opaque.into();
        self
    }

    pub fn with_invisible_symbol(mut self, symbol: char) -> Self {
        self.invisible_symbol = symbol;
        self
    }

    pub fn with_ray_count(mut self, ray_count: u32) -> Self {
        self.ray_count = ray_count;
        self
    }

    pub fn with_field_of_view(mut self, degrees: f64) -> Self {
        self.field_of_view_degrees = degrees;
        self
    }

    pub fn with_aspect_ratio_correction(mut self, factor: f64) -> Self {
        self.aspect_ratio_correction = factor;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check every precondition of the engine.
    pub fn validate(&self) -> Result<(), LightingError> {
        if self.ray_count == 0 {
            return Err(LightingError::invalid_parameter(
                "ray_count",
                "must be at least 1",
            ));
        }
        let fov = self.field_of_view_degrees;
        if !(fov > 0.0 && fov <= 360.0) {
            return Err(LightingError::invalid_parameter(
                "field_of_view_degrees",
                format!("{fov} is outside (0, 360]"),
            ));
        }
        let aspect = self.aspect_ratio_correction;
        if !(aspect.is_finite() && aspect > 0.0) {
            return Err(LightingError::invalid_parameter(
                "aspect_ratio_correction",
                format!("{aspect} must be finite and positive"),
            ));
        }
        Ok(())
    }
}

/// Palette and symbol rules for [`crate::shading::IntenseLight`].
#[derive(Debug, Clone, PartialEq)]
pub struct IntenseLightConfig {
    /// Brightest-first palette
    pub palette: Palette,
    /// Terrain symbol lit as a wall
    pub wall: char,
    /// Terrain symbol lit as open floor
    pub background: char,
    /// Symbol that always renders as itself (the observer)
    pub marker: char,
    /// Palette entry walls never fade past
    pub near: char,
    /// Palette entry open floor starts from
    pub mid: char,
    /// Distance steps per palette step
    pub brightness_falloff: u32,
}

impl Default for IntenseLightConfig {
    fn default() -> Self {
        Self {
            palette: Palette::light_dark(),
            wall: '#',
            background: ' ',
            marker: '@',
            near: 'A',
            mid: ';',
            brightness_falloff: 3,
        }
    }
}
