use anyhow::Result;
use clap::Parser;
use tools::{GenerateArgs, format_fingerprint, init_logging, run_generate};

fn main() -> Result<()> {
    let args = GenerateArgs::parse();
    init_logging(args.debug);

    let report = run_generate(&args)?;

    println!("Maze written to {}", report.output.display());
    println!("Seed: {} ({})", report.seed.value(), report.seed.source());
    println!(
        "Rooms: {}  Tree links: {}  Eroded walls: {}",
        report.stats.rooms, report.stats.tree_links, report.stats.eroded_walls
    );
    println!(
        "Open interior cells: {} of {}",
        report.projection.open_cells, report.projection.interior_cells
    );
    println!("Fingerprint: {}", format_fingerprint(report.fingerprint));

    Ok(())
}
