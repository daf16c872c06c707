//! CLI entry point for the micromouse maze simulator

use clap::Parser;
use micromouse::io::cli::{Cli, SimulationRunner};

fn main() -> micromouse::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut runner = SimulationRunner::new(cli);
    runner.process()?;
    Ok(())
}
