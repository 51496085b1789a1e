use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "climate-aggregator")]
#[command(about = "Streaming map/reduce aggregation of monthly climate averages")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Print run statistics as JSON on stderr")]
    pub stats: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Map raw climate CSV lines to tagged key/value pairs
    Map {
        #[arg(short, long, help = "Input file [default: stdin]")]
        input: Option<PathBuf>,

        #[arg(short, long, help = "Output file [default: stdout]")]
        output: Option<PathBuf>,
    },

    /// Reduce a key-sorted pair stream to one average per key
    Reduce {
        #[arg(short, long, help = "Input file [default: stdin]")]
        input: Option<PathBuf>,

        #[arg(short, long, help = "Output file [default: stdout]")]
        output: Option<PathBuf>,

        #[arg(
            long,
            default_value = "false",
            help = "Accumulate every key in memory; input need not be sorted"
        )]
        unsorted: bool,
    },

    /// Map and reduce in one process, no external sort required
    Aggregate {
        #[arg(short, long, help = "Input file [default: stdin]")]
        input: Option<PathBuf>,

        #[arg(short, long, help = "Output file [default: stdout]")]
        output: Option<PathBuf>,
    },
}
