use crate::cli::args::{Cli, Commands};
use crate::config::AggregationConfig;
use crate::error::{ProcessingError, Result};
use crate::processors::ChunkedProcessor;
use crate::utils::progress::ProgressReporter;
use crate::writers::CsvOutputWriter;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

pub fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Process {
            input,
            output,
            chunk_size,
            config,
            quiet,
        } => {
            let config = load_config(config.as_deref(), chunk_size)?;
            let processor = ChunkedProcessor::new(config);

            eprintln!("Input file: {}", input.display());
            eprintln!("Chunk size: {}", processor.config().chunk_size);

            let progress = ProgressReporter::new_spinner("Aggregating readings...", quiet);
            let (rows, stats) = processor.process_file(&input, Some(&progress))?;

            let writer = CsvOutputWriter::new();
            match output {
                Some(path) => {
                    writer.write_to_path(&rows, &path)?;
                    eprintln!("Output file: {}", path.display());
                }
                None => writer.write_rows(&rows, io::stdout().lock())?,
            }

            eprintln!("\n{}", stats.summary());
        }

        Commands::Validate {
            input,
            chunk_size,
            config,
        } => {
            let config = load_config(config.as_deref(), chunk_size)?;
            let processor = ChunkedProcessor::new(config);

            println!("Validating {}...", input.display());

            let progress = ProgressReporter::new_spinner("Validating readings...", false);
            let (_rows, stats) = processor.process_file(&input, Some(&progress))?;

            println!("\n{}", stats.summary());

            if stats.out_of_order_records == 0 {
                println!("✅ Input is time-ordered and fully parseable");
            } else {
                println!(
                    "⚠️  Found {} out-of-order records",
                    stats.out_of_order_records
                );
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>, chunk_size: Option<usize>) -> Result<AggregationConfig> {
    let config = AggregationConfig::load(path)?;
    match chunk_size {
        Some(size) => config.with_chunk_size(size),
        None => Ok(config),
    }
}

/// Install the global tracing subscriber, writing to stderr or `log_file`
pub fn setup_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let log_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("station_day_aggregator={}", log_level)));

    let result = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
        None => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(fmt::time::uptime())
                    .with_writer(io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| ProcessingError::Config(format!("Failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    if let Some(path) = log_file {
        info!("Logging to {}", path.display());
    }

    Ok(())
}
