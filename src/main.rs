use clap::Parser;
use climate_aggregator::cli::{run, Cli};
use climate_aggregator::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
