//! Command-line surface for generating and solving mazes.

pub mod seed;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use env_logger::Env;
use log::info;
use maze_core::{
    GenerationStats, MazeConfig, MazeFileSink, MazeGenerator, MazeRng, Pos, ProjectionSummary,
    SolveSession, SolverGrid, project, solve,
};

use crate::seed::{SeedChoice, resolve_seed_from_env};

pub const DEFAULT_MAZE_PATH: &str = "maze.json";
pub const DEFAULT_SOLUTION_LABEL: &str = "cell";

/// Generate a maze, optionally erasing a share of its walls to create loops
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, allow_negative_numbers = true)]
pub struct GenerateArgs {
    /// Maze width in cells (odd, greater than 0)
    pub width: i64,

    /// Maze height in cells (odd, greater than 0)
    pub height: i64,

    /// Percentage of walls to erase after the maze is built, from 0 (perfect maze) to 100
    pub imperfection: i64,

    /// Random seed; falls back to MAZE_SEED, then to a generated seed
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Path of the maze file to write
    #[arg(short, long, default_value = DEFAULT_MAZE_PATH)]
    pub output: PathBuf,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,
}

/// Find a route through a generated maze and write the annotated copy
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct SolveArgs {
    /// Maze file produced by the generator
    #[arg(default_value = DEFAULT_MAZE_PATH)]
    pub maze: PathBuf,

    /// Suffix of the solution file written next to the maze
    #[arg(short, long, default_value = DEFAULT_SOLUTION_LABEL)]
    pub label: String,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,
}

#[derive(Clone, Debug)]
pub struct GenerateReport {
    pub seed: SeedChoice,
    pub stats: GenerationStats,
    pub projection: ProjectionSummary,
    pub fingerprint: u64,
    pub output: PathBuf,
}

#[derive(Clone, Debug)]
pub struct SolveReport {
    pub start: Pos,
    pub end: Pos,
    pub path_len: usize,
    pub solution: PathBuf,
}

/// `RUST_LOG` wins when set; otherwise warnings only, or debug output with `--debug`.
pub fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .try_init();
}

pub fn run_generate(args: &GenerateArgs) -> Result<GenerateReport> {
    let config = MazeConfig::new(args.width, args.height, args.imperfection)
        .context("invalid maze parameters")?;
    let seed = resolve_seed_from_env(args.seed).map_err(|e| anyhow!(e))?;
    generate_to_file(&config, seed, &args.output)
}

pub fn generate_to_file(
    config: &MazeConfig,
    seed: SeedChoice,
    output: &Path,
) -> Result<GenerateReport> {
    info!(
        "generating {}x{} maze with seed {} ({})",
        config.width(),
        config.height(),
        seed.value(),
        seed.source()
    );

    let generated = MazeGenerator::new(*config)
        .generate(&mut MazeRng::from_seed(seed.value()))
        .context("maze generation failed")?;

    let mut sink = MazeFileSink::new(output, &generated.maze, Some(seed.value()));
    let projection = project(&generated.maze, &mut sink)
        .with_context(|| format!("failed to write maze file: {}", output.display()))?;

    Ok(GenerateReport {
        seed,
        stats: generated.stats,
        projection,
        fingerprint: generated.maze.fingerprint(),
        output: output.to_path_buf(),
    })
}

pub fn run_solve(args: &SolveArgs) -> Result<SolveReport> {
    let mut session = SolveSession::open(&args.maze)
        .with_context(|| format!("failed to load maze file: {}", args.maze.display()))?;
    let (start, end) = session
        .start()
        .zip(session.end())
        .ok_or_else(|| anyhow!("maze {} has no open cells", args.maze.display()))?;

    let path = solve(&mut session)
        .ok_or_else(|| anyhow!("no route from {start:?} to {end:?} in {}", args.maze.display()))?;

    session
        .persist_solution(&args.label)
        .with_context(|| format!("failed to write solution '{}'", args.label))?;

    let solution = session.solution_path(&args.label);
    Ok(SolveReport { start, end, path_len: path.len(), solution })
}

/// Format a maze fingerprint as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_fingerprint(hash: u64) -> String {
    format!("0x{hash:016x}")
}
