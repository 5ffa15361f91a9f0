//! Command-line interface for hla-align.
//!
//! Running with no arguments downloads (or reuses cached copies of) the
//! alignments for all fixed HLA loci and writes two CSV files per locus into
//! `hla-alignments/`.
//!
//! ## Usage
//!
//! ```text
//! # Process all loci into ./hla-alignments
//! hla-align
//!
//! # Sort rows by allele name and write elsewhere
//! hla-align --row-order sorted --output-dir /data/hla
//!
//! # Machine-readable run summary
//! hla-align --format json
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::core::config::{RowOrder, DEFAULT_OUTPUT_DIRECTORY};

pub mod run;

pub use run::run;

#[derive(Parser)]
#[command(name = "hla-align")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Download IMGT/HLA allele alignments and convert them to CSV")]
#[command(
    long_about = "hla-align retrieves the allele alignment of each HLA locus from the IPD-IMGT/HLA alignment service, caches the raw page, and converts it into:\n- <LOCUS>_split.csv: one field per alignment column, header rows included\n- <LOCUS>.csv: one concatenated sequence per allele\n\nCached pages are never downloaded again; delete them to force a refresh."
)]
pub struct Cli {
    /// Directory for cached pages and CSV output
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIRECTORY)]
    pub output_dir: PathBuf,

    /// Request timeout in seconds
    #[arg(long, default_value = "300", value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub timeout: u64,

    /// Order of rows in the CSV files
    #[arg(long, value_enum, default_value = "first-seen")]
    pub row_order: RowOrder,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run summary format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
