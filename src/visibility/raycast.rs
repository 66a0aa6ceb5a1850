//! Ray marching visibility.
//!
//! Rays leave the observer at evenly spaced headings and advance one unit per
//! step (vertical movement scaled by the aspect correction), snapping to the
//! nearest cell after every step. Each cell a ray lands on is visible; a ray
//! stops on the first opaque cell or when it leaves the grid.
//!
//! Key optimizations:
//! - No bounds test until the ray could possibly have left the grid
//! - Flat per-worker accumulators merged with `min` when casting in parallel

use rayon::prelude::*;

use crate::config::LightingConfig;
use crate::grid::{Grid, Position};
use crate::visibility::{OpaqueSet, VisibilityAlgorithm, VisibleTiles};

/// Fractional ray state. Iterating yields the rounded cell coordinates and
/// the step count of every step; it never ends on its own.
#[derive(Debug, Clone)]
pub struct Ray {
    x: f64,
    y: f64,
    dx: f64,
    dy: f64,
    steps: u32,
}

impl Ray {
    /// A ray from `origin` at `heading` radians (0 = east, clockwise on screen
    /// since rows grow downwards), with vertical motion scaled by `aspect`.
    pub fn new(origin: Position, heading: f64, aspect: f64) -> Self {
        Ray {
            x: origin.col as f64,
            y: origin.row as f64,
            dx: heading.cos(),
            dy: heading.sin() * aspect,
            steps: 0,
        }
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }
}

impl Iterator for Ray {
    type Item = (i64, i64, u32);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.x += self.dx;
        self.y += self.dy;
        self.steps += 1;
        Some((
            self.x.round_ties_even() as i64,
            self.y.round_ties_even() as i64,
            self.steps,
        ))
    }
}

/// Angular ray sampling visibility algorithm.
///
/// `ray_count` rays span `field_of_view_degrees` starting at heading 0, one
/// every `field_of_view_degrees / ray_count` degrees.
#[derive(Debug, Clone)]
pub struct RayCaster {
    pub ray_count: u32,
    pub field_of_view_degrees: f64,
    pub aspect_ratio_correction: f64,
    pub parallel: bool,
}

impl Default for RayCaster {
    fn default() -> Self {
        Self::from_config(&LightingConfig::default())
    }
}

impl RayCaster {
    pub fn new(ray_count: u32, field_of_view_degrees: f64) -> Self {
        RayCaster {
            ray_count,
            field_of_view_degrees,
            ..Self::default()
        }
    }

    pub fn from_config(config: &LightingConfig) -> Self {
        if f64::from(config.ray_count) < config.field_of_view_degrees {
            log::warn!(
                "{} rays over {} degrees leave gaps between adjacent rays",
                config.ray_count,
                config.field_of_view_degrees
            );
        }
        RayCaster {
            ray_count: config.ray_count,
            field_of_view_degrees: config.field_of_view_degrees,
            aspect_ratio_correction: config.aspect_ratio_correction,
            parallel: config.parallel,
        }
    }

    /// Cast rays on the rayon thread pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Heading of ray `index`, in radians.
    #[inline]
    pub fn heading(&self, index: u32) -> f64 {
        let step = self.field_of_view_degrees / f64::from(self.ray_count);
        (f64::from(index) * step).to_radians()
    }

    /// Walk one ray, calling `visit` for every cell it makes visible.
    fn trace<F>(&self, grid: &Grid, origin: Position, opaque: &OpaqueSet, index: u32, mut visit: F)
    where
        F: FnMut(Position, u32),
    {
        let width = grid.width();
        let height = grid.height();
        // Until this many steps the ray cannot have left the grid, so the
        // bounds test is skipped. Holds for unit-or-smaller steps only.
        let min_dist = if self.aspect_ratio_correction <= 1.0 {
            origin
                .col
                .min(origin.row)
                .min(width.saturating_sub(origin.col))
                .min(height.saturating_sub(origin.row)) as u32
        } else {
            0
        };
        let max_steps = width.max(height) as u32;

        let ray = Ray::new(origin, self.heading(index), self.aspect_ratio_correction);
        for (rx, ry, dist) in ray.take_while(|&(_, _, dist)| dist < max_steps) {
            let pos = if dist < min_dist {
                Position::new(rx as usize, ry as usize)
            } else {
                match grid.checked_position(rx, ry) {
                    Some(pos) => pos,
                    None => {
                        log::trace!("ray {index} left the grid after {dist} steps");
                        break;
                    }
                }
            };
            let Some(symbol) = grid.get(pos) else {
                break;
            };

            visit(pos, dist);

            if opaque.contains(symbol) {
                log::trace!("ray {index} stopped by {symbol:?} at ({}, {})", pos.col, pos.row);
                break;
            }
        }
    }

    /// Cells visited by ray `index`, in order, with their step counts.
    /// The origin is not included.
    pub fn cast_ray(
        &self,
        grid: &Grid,
        origin: Position,
        opaque: &OpaqueSet,
        index: u32,
    ) -> Vec<(Position, u32)> {
        let mut path = Vec::new();
        self.trace(grid, origin, opaque, index, |pos, dist| path.push((pos, dist)));
        path
    }

    fn cast_sequential(&self, grid: &Grid, origin: Position, opaque: &OpaqueSet) -> VisibleTiles {
        let mut tiles = VisibleTiles::for_grid(grid);
        tiles.record(origin, 0);
        for index in 0..self.ray_count {
            self.trace(grid, origin, opaque, index, |pos, dist| tiles.record(pos, dist));
        }
        tiles
    }

    fn cast_parallel(&self, grid: &Grid, origin: Position, opaque: &OpaqueSet) -> VisibleTiles {
        let mut tiles = (0..self.ray_count)
            .into_par_iter()
            .fold(
                || VisibleTiles::for_grid(grid),
                |mut tiles, index| {
                    self.trace(grid, origin, opaque, index, |pos, dist| tiles.record(pos, dist));
                    tiles
                },
            )
            .reduce(|| VisibleTiles::for_grid(grid), |a, b| a.merge(&b));
        tiles.record(origin, 0);
        tiles
    }
}

impl VisibilityAlgorithm for RayCaster {
    fn visible_tiles(&self, grid: &Grid, origin: Position, opaque: &OpaqueSet) -> VisibleTiles {
        log::debug!(
            "casting {} rays over {} degrees from ({}, {}){}",
            self.ray_count,
            self.field_of_view_degrees,
            origin.col,
            origin.row,
            if self.parallel { " in parallel" } else { "" }
        );
        if self.parallel {
            self.cast_parallel(grid, origin, opaque)
        } else {
            self.cast_sequential(grid, origin, opaque)
        }
    }
}
