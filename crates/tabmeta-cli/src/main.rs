//! tabmeta CLI - load CSV metadata and export catalogue JSON.

mod cli;
mod output;

use clap::Parser;
use flexi_logger::{DeferredNow, Logger};
use log::{info, Record};
use tabmeta::{dataset_metadata, service_metadata, Loader, Mode};

use cli::Cli;

fn log_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> std::io::Result<()> {
    write!(
        w,
        "t={} lvl={} msg={}",
        now.format("%Y-%m-%dT%H:%M:%S%.3f"),
        record.level(),
        record.args()
    )
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let _logger = Logger::try_with_str(&cli.log_level)?
        .format(log_format)
        .start()?;

    let mode = if cli.best_effort {
        Mode::BestEffort
    } else {
        Mode::Strict
    };

    let meta = Loader::new(&cli.input_dir, mode).load()?;

    // In strict mode a run with any dropped or repaired record produces no
    // output; best-effort runs export whatever survived validation.
    if mode == Mode::Strict && meta.report.error_count() > 0 {
        return Err(format!(
            "{} errors were encountered during processing",
            meta.report.error_count()
        )
        .into());
    }

    let date = chrono::Utc::now().date_naive();

    let document = dataset_metadata(&meta);
    let filename =
        output::output_filename(&cli.metadata_version, output::DATASET_DOC, date, cli.build_number);
    let path = output::write_document(&cli.output_dir, &filename, &document)?;
    info!("Written dataset metadata file to: {}", path.display());

    let document = service_metadata(&meta);
    let filename =
        output::output_filename(&cli.metadata_version, output::SERVICE_DOC, date, cli.build_number);
    let path = output::write_document(&cli.output_dir, &filename, &document)?;
    info!("Written service metadata file to: {}", path.display());

    Ok(())
}
