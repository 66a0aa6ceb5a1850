mod config;
mod error;
mod grid;
mod maps;
mod render;
mod shading;
mod visibility;

#[cfg(test)]
mod tests;

// Re-export public API
pub use config::{IntenseLightConfig, LightingConfig};
pub use error::LightingError;
pub use grid::{Grid, Position};
pub use render::{distances_to_string, grid_to_string, save_frame};
pub use shading::{DistanceRamp, IntenseLight, Palette, Shader, SymbolClass};
pub use visibility::{
    OpaqueSet, RayCaster, VisibilityAlgorithm, VisibleTiles, compute_visible, compute_visible_with,
    render_visible,
};

fn main() {
    // Repeated calls (tests) keep the first logger
    let _ = env_logger::try_init();

    // Check for command line arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--demo" {
        if let Err(e) = run_demo(args.get(2).map(String::as_str)) {
            eprintln!("Error: {}", e);
        }
    } else if args.len() > 1 && args[1] == "--benchmark" {
        if let Err(e) = run_benchmark() {
            eprintln!("Error: {}", e);
        }
    } else {
        println!("ASCII Lighting");
        println!("Run with --demo [frame.txt] to light the sample dungeon");
        println!("Run with --benchmark to test performance");
    }
}

fn run_demo(save_to: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let grid = maps::dungeon()?;
    let origin = maps::find_marker(&grid, '@').ok_or("sample map has no '@'")?;

    let shader = IntenseLight::new(IntenseLightConfig::default())?;
    let config = LightingConfig::default().with_opaque("#");

    let frame = compute_visible(&grid, origin, &config, &shader)?;
    println!("{}", grid_to_string(&frame));

    if let Some(filename) = save_to {
        save_frame(&frame, filename)?;
        log::info!("frame written to {}", filename);
    }
    Ok(())
}

fn run_benchmark() -> Result<(), LightingError> {
    use std::time::Instant;

    println!("=== Ray Casting Benchmark ===\n");

    // Fill the terminal, like a full-screen frame would
    let (width, height) = match crossterm::terminal::size() {
        Ok((cols, rows)) if cols > 0 && rows > 0 => (cols as usize, rows as usize),
        Ok(_) | Err(_) => {
            log::warn!("terminal size unavailable, using 80x24");
            (80, 24)
        }
    };
    let iterations = 20;

    // Nothing in the grid is opaque, so every ray runs to the edge
    let grid = Grid::filled(width, height, '#')?;
    let origin = Position::new(width / 2, height / 2);
    let shader = DistanceRamp::new(Palette::light_dark_extended());
    let config = LightingConfig::default().with_ray_count(360 * 4);

    println!("Grid size: {}x{}", width, height);
    println!("Rays: {}", config.ray_count);
    println!("-----------------------");

    let mut timings = Vec::new();
    for parallel in [false, true] {
        let config = config.clone().with_parallel(parallel);
        let start = Instant::now();
        for _ in 0..iterations {
            let _ = compute_visible(&grid, origin, &config, &shader)?;
        }
        let elapsed = start.elapsed();
        let avg_ms = elapsed.as_secs_f64() * 1000.0 / iterations as f64;
        timings.push(avg_ms);

        let label = if parallel { "Parallel (rayon):" } else { "Sequential:      " };
        println!("  {} {:.3} ms/frame ({:.1} FPS)", label, avg_ms, 1000.0 / avg_ms);
    }

    println!("  Speedup: {:.2}x", timings[0] / timings[1]);
    Ok(())
}
