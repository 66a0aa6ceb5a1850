//! Layer 1: Visibility (pure geometry)
//!
//! This module decides which cells an observer can see. Algorithms implement
//! the `VisibilityAlgorithm` trait and report a `VisibleTiles` accumulator;
//! turning that into a displayable grid is shared by all of them.

pub mod raycast;

pub use raycast::{Ray, RayCaster};

use std::collections::BTreeSet;

use crate::config::LightingConfig;
use crate::error::LightingError;
use crate::grid::{Grid, Position};
use crate::shading::Shader;

/// Symbols that stop a ray on the cell where they are struck.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpaqueSet(BTreeSet<char>);

impl OpaqueSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn contains(&self, symbol: char) -> bool {
        self.0.contains(&symbol)
    }

    pub fn insert(&mut self, symbol: char) -> bool {
        self.0.insert(symbol)
    }

    pub fn remove(&mut self, symbol: char) -> bool {
        self.0.remove(&symbol)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }
}

impl From<&str> for OpaqueSet {
    fn from(symbols: &str) -> Self {
        symbols.chars().collect()
    }
}

impl FromIterator<char> for OpaqueSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        OpaqueSet(iter.into_iter().collect())
    }
}

/// Cells reached by at least one ray, each with the smallest distance any
/// ray recorded for it.
///
/// Keeping the minimum makes the result independent of the order in which
/// rays are processed, so sequential and parallel casting agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleTiles {
    width: usize,
    height: usize,
    // Row-major, u32::MAX = not seen
    distances: Vec<u32>,
}

const UNSEEN: u32 = u32::MAX;

impl VisibleTiles {
    pub fn new(width: usize, height: usize) -> Self {
        VisibleTiles {
            width,
            height,
            distances: vec![UNSEEN; width * height],
        }
    }

    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.width(), grid.height())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Record `pos` as seen at `distance`, keeping the smaller distance if it
    /// was already seen. Positions outside the accumulator are ignored.
    #[inline]
    pub fn record(&mut self, pos: Position, distance: u32) {
        if pos.col >= self.width || pos.row >= self.height {
            return;
        }
        let slot = &mut self.distances[pos.row * self.width + pos.col];
        *slot = (*slot).min(distance);
    }

    /// Cell-wise minimum of two accumulators of the same size.
    pub fn merge(mut self, other: &VisibleTiles) -> Self {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        for (mine, theirs) in self.distances.iter_mut().zip(&other.distances) {
            *mine = (*mine).min(*theirs);
        }
        self
    }

    pub fn distance_at(&self, pos: Position) -> Option<u32> {
        if pos.col >= self.width || pos.row >= self.height {
            return None;
        }
        match self.distances[pos.row * self.width + pos.col] {
            UNSEEN => None,
            d => Some(d),
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.distance_at(pos).is_some()
    }

    /// Number of visible cells.
    pub fn len(&self) -> usize {
        self.distances.iter().filter(|&&d| d != UNSEEN).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visible cells with their distances, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Position, u32)> + '_ {
        let width = self.width;
        self.distances
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d != UNSEEN)
            .map(move |(i, &d)| (Position::new(i % width, i / width), d))
    }
}

/// Trait for visibility algorithms.
///
/// Implementations compute which cells of `grid` are visible from `origin`
/// when the symbols in `opaque` block sight.
pub trait VisibilityAlgorithm {
    /// Calculate the visible cells.
    ///
    /// # Arguments
    /// * `grid` - Terrain, read only
    /// * `origin` - Observer position; callers guarantee it is inside `grid`
    /// * `opaque` - Symbols that terminate sight on the cell they occupy
    ///
    /// # Returns
    /// Every visible cell with its distance; `origin` is always included at 0
    fn visible_tiles(&self, grid: &Grid, origin: Position, opaque: &OpaqueSet) -> VisibleTiles;
}

/// Shade every visible cell and fill the rest with `unknown`.
///
/// Fails on the first cell the shader rejects; no partial grid is returned.
pub fn shade_tiles<S>(
    grid: &Grid,
    tiles: &VisibleTiles,
    shader: &S,
    unknown: char,
) -> Result<Grid, LightingError>
where
    S: Shader + ?Sized,
{
    let mut output = Grid::filled(grid.width(), grid.height(), unknown)?;
    for (pos, distance) in tiles.iter() {
        // Accumulators built for this grid never hold foreign positions
        let Some(symbol) = grid.get(pos) else {
            continue;
        };
        output.set(pos, shader.shade(symbol, distance)?);
    }
    Ok(output)
}

/// Run any visibility algorithm and shade its result.
pub fn render_visible<A, S>(
    algorithm: &A,
    grid: &Grid,
    origin: Position,
    opaque: &OpaqueSet,
    shader: &S,
    unknown: char,
) -> Result<Grid, LightingError>
where
    A: VisibilityAlgorithm + ?Sized,
    S: Shader + ?Sized,
{
    if grid.get(origin).is_none() {
        return Err(LightingError::OutOfBounds {
            col: origin.col as i64,
            row: origin.row as i64,
            width: grid.width(),
            height: grid.height(),
        });
    }
    let tiles = algorithm.visible_tiles(grid, origin, opaque);
    log::debug!(
        "{} of {} cells visible from ({}, {})",
        tiles.len(),
        grid.width() * grid.height(),
        origin.col,
        origin.row
    );
    shade_tiles(grid, &tiles, shader, unknown)
}

/// Compute the lit view of `grid` from `origin` with ray casting.
///
/// Every cell a ray reaches is replaced by `shader(symbol, distance)`; every
/// other cell becomes `config.invisible_symbol`. The input grid is not touched.
pub fn compute_visible<S>(
    grid: &Grid,
    origin: Position,
    config: &LightingConfig,
    shader: &S,
) -> Result<Grid, LightingError>
where
    S: Shader + ?Sized,
{
    config.validate()?;
    let caster = RayCaster::from_config(config);
    render_visible(
        &caster,
        grid,
        origin,
        &config.opaque_symbols,
        shader,
        config.invisible_symbol,
    )
}

/// [`compute_visible`] with every option spelled out and signed origin
/// coordinates, rejected with `OutOfBounds` before any ray is cast.
#[allow(clippy::too_many_arguments)]
pub fn compute_visible_with<S>(
    grid: &Grid,
    origin_col: i64,
    origin_row: i64,
    opaque: &OpaqueSet,
    shader: &S,
    unknown: char,
    ray_count: u32,
    field_of_view_degrees: f64,
) -> Result<Grid, LightingError>
where
    S: Shader + ?Sized,
{
    let origin = grid.position(origin_col, origin_row)?;
    let config = LightingConfig::default()
        .with_opaque(opaque.clone())
        .with_invisible_symbol(unknown)
        .with_ray_count(ray_count)
        .with_field_of_view(field_of_view_degrees);
    compute_visible(grid, origin, &config, shader)
}
