//! Layer 2: Shading (symbol + distance -> display symbol)
//!
//! A shader turns the terrain symbol of a visible cell and the ray distance at
//! which it was reached into the character that is finally displayed. All
//! shaders implement the `Shader` trait.

pub mod palette;
pub mod intense;

pub use palette::{Palette, LIGHT_DARK, LIGHT_DARK_EXTENDED, LIGHT_DARK_SHORT};
pub use intense::{DistanceRamp, IntenseLight, SymbolClass};

use crate::error::LightingError;

/// Trait for shading functions.
///
/// Implementations must be referentially transparent: the same `(symbol,
/// distance)` pair always yields the same result.
pub trait Shader {
    /// Shade one visible cell.
    ///
    /// # Arguments
    /// * `symbol` - Terrain symbol of the cell in the input grid
    /// * `distance` - Ray steps from the observer (0 for the observer's cell)
    ///
    /// # Returns
    /// The display symbol, or `UnrecognizedSymbol` if there is no rule for `symbol`
    fn shade(&self, symbol: char, distance: u32) -> Result<char, LightingError>;
}

impl<F> Shader for F
where
    F: Fn(char, u32) -> Result<char, LightingError>,
{
    fn shade(&self, symbol: char, distance: u32) -> Result<char, LightingError> {
        self(symbol, distance)
    }
}
