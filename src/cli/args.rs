use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "station-day-aggregator")]
#[command(about = "Daily min/max/first/last temperatures per weather station, computed in bounded chunks")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate a readings CSV into one row per station and day
    Process {
        #[arg(short, long, help = "Input CSV file of station readings")]
        input: PathBuf,

        #[arg(short, long, help = "Output CSV file path [default: stdout]")]
        output: Option<PathBuf>,

        #[arg(long, help = "Records per chunk [default: 1000]")]
        chunk_size: Option<usize>,

        #[arg(short, long, help = "Configuration file (TOML, JSON or YAML)")]
        config: Option<PathBuf>,

        #[arg(short, long, help = "Hide the progress spinner")]
        quiet: bool,
    },

    /// Read and aggregate the input without writing output
    Validate {
        #[arg(short, long, help = "Input CSV file of station readings")]
        input: PathBuf,

        #[arg(long, help = "Records per chunk [default: 1000]")]
        chunk_size: Option<usize>,

        #[arg(short, long, help = "Configuration file (TOML, JSON or YAML)")]
        config: Option<PathBuf>,
    },
}
