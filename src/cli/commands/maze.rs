//! Maze command - generate, print and export maze levels

use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    app::MazeConfig,
    cli::{
        config::CommonArgs,
        output::{print_kv, print_section},
    },
    maze::{Coordinate, DEFAULT_GRID_SIZE, GenerationReport, GeneratorMode, Grid, shortest_path},
};

#[derive(Parser, Debug)]
#[command(about = "Generate a maze level")]
pub struct MazeArgs {
    /// Level index (0 is the plain perfect maze)
    #[arg(long, short = 'l', default_value_t = 0)]
    pub level: usize,

    /// Grid side length (odd, at least 5)
    #[arg(long, short = 's', default_value_t = DEFAULT_GRID_SIZE)]
    pub size: usize,

    /// How levels map onto carving styles
    #[arg(long, short = 'm', value_enum, default_value_t = GeneratorMode::Canonical)]
    pub mode: GeneratorMode,

    /// Overlay the shortest start-to-exit route
    #[arg(long)]
    pub solve: bool,

    /// Export the maze as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// JSON export layout
#[derive(Debug, Serialize)]
pub struct MazeExport<'a> {
    pub report: &'a GenerationReport,
    pub grid: &'a Grid,
    /// Text rendering, one string per row
    pub rows: Vec<String>,
    pub route: Option<&'a [Coordinate]>,
}

pub fn execute(args: MazeArgs) -> Result<()> {
    let app = args.common.app();
    let mut generator = app.create_generator(MazeConfig::new(args.mode));
    let (grid, report) = generator
        .generate_with_report(args.level, args.size)
        .with_context(|| format!("failed to generate level {}", args.level))?;

    let route = if args.solve {
        shortest_path(&grid, grid.start(), grid.exit())
    } else {
        None
    };

    print_section(&format!("Level {} ({})", report.level, report.style));
    println!("{}", grid.render_with(route.as_deref().unwrap_or_default()));
    println!();
    print_kv("Size", &format!("{0}x{0}", grid.size()));
    print_kv("Path cells", &grid.path_count().to_string());
    print_kv("Attempts", &report.attempts.to_string());
    print_kv("Extra paths", &report.extra_paths.to_string());
    if let Some(steps) = report.carving_steps {
        print_kv("Carving steps", &steps.to_string());
    }
    if let Some(route) = &route {
        print_kv("Route length", &route.len().to_string());
    }
    if report.repaired() && args.common.verbose {
        eprintln!(
            "Warning: level {} needed {} wall(s) carved to join start and exit",
            report.level, report.repaired_cells
        );
    }

    if let Some(path) = &args.json {
        let export = MazeExport {
            report: &report,
            grid: &grid,
            rows: grid.render_with(&[]).lines().map(str::to_string).collect(),
            route: route.as_deref(),
        };
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &export)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("\nMaze exported to: {}", path.display());
    }

    Ok(())
}
