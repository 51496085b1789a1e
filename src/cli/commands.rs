use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::cli::args::{Cli, Commands};
use crate::error::{PipelineError, Result};
use crate::stages::{GroupedAggregator, Mapper, Reducer};
use crate::utils::constants::DEFAULT_BUFFER_SIZE;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    match cli.command {
        Commands::Map { input, output } => {
            let (reader, mut writer) = open_streams(input.as_deref(), output.as_deref())?;

            let stats = Mapper::new().run(reader, &mut writer)?;
            info!(
                records = stats.records_emitted,
                filtered = stats.lines_filtered,
                malformed = stats.lines_malformed,
                "map stage complete"
            );
            report_stats(cli.stats, &stats)?;
        }

        Commands::Reduce {
            input,
            output,
            unsorted,
        } => {
            let (reader, mut writer) = open_streams(input.as_deref(), output.as_deref())?;

            let stats = if unsorted {
                GroupedAggregator::new().reduce_unsorted(reader, &mut writer)?
            } else {
                Reducer::new().run(reader, &mut writer)?
            };
            info!(
                groups = stats.groups_flushed,
                skipped = stats.lines_skipped,
                "reduce stage complete"
            );
            report_stats(cli.stats, &stats)?;
        }

        Commands::Aggregate { input, output } => {
            let (reader, mut writer) = open_streams(input.as_deref(), output.as_deref())?;

            let stats = GroupedAggregator::new().run(reader, &mut writer)?;
            info!(
                records = stats.map.records_emitted,
                groups = stats.reduce.groups_flushed,
                "aggregation complete"
            );
            report_stats(cli.stats, &stats)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };

    // stderr only; stdout carries the data stream
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn open_streams(
    input: Option<&Path>,
    output: Option<&Path>,
) -> Result<(Box<dyn BufRead>, Box<dyn Write>)> {
    if let (Some(input), Some(output)) = (input, output) {
        if input == output {
            return Err(PipelineError::InvalidArgument(format!(
                "input and output refer to the same file: {}",
                input.display()
            )));
        }
    }
    Ok((open_input(input)?, open_output(output)?))
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    Ok(match path {
        Some(path) => Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            File::open(path)?,
        )),
        None => Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, io::stdin())),
    })
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::with_capacity(
            DEFAULT_BUFFER_SIZE,
            File::create(path)?,
        )),
        None => Box::new(BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, io::stdout())),
    })
}

fn report_stats<S: Serialize>(enabled: bool, stats: &S) -> Result<()> {
    if enabled {
        eprintln!("{}", serde_json::to_string(stats)?);
    }
    Ok(())
}
