//! CLI argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

/// Convert classification metadata CSV files to catalogue JSON
#[derive(Parser)]
#[command(name = "tabmeta")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Input directory containing the CSV files to convert
    #[arg(short, long)]
    pub input_dir: PathBuf,

    /// Output directory to write the JSON documents
    #[arg(short, long)]
    pub output_dir: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Downgrade recoverable defects to warnings and keep the run alive
    #[arg(long)]
    pub best_effort: bool,

    /// Metadata master version recorded in the output filenames
    #[arg(short, long, default_value = "unknown-metadata-version")]
    pub metadata_version: String,

    /// Run sequence number recorded in the output filenames
    #[arg(short, long, default_value = "1")]
    pub build_number: u32,
}
