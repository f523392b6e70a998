use anyhow::Result;
use clap::Parser;
use tools::{SolveArgs, init_logging, run_solve};

fn main() -> Result<()> {
    let args = SolveArgs::parse();
    init_logging(args.debug);

    let report = run_solve(&args)?;

    println!("Solved {:?} -> {:?}", report.start, report.end);
    println!("Path length: {}", report.path_len);
    println!("Solution written to {}", report.solution.display());

    Ok(())
}
