//! Per-locus fetch, reconstruct, and write.
//!
//! Each locus is independent: a failure is reported for that locus and the
//! remaining loci are still processed. Output files are written to temporary
//! files and renamed into place, so a failed locus never leaves a truncated CSV.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{error, info};

use crate::core::config::AlignmentConfig;
use crate::core::locus::Locus;
use crate::fetch::{FetchError, Fetcher, Transport};
use crate::output::{write_combined, write_split};
use crate::parsing::reconstruct::reconstruct_document;
use crate::parsing::ParseError;

#[derive(Error, Debug)]
pub enum LocusError {
    #[error("Failed to fetch {locus}: {source}")]
    Fetch { locus: String, source: FetchError },

    #[error("Malformed alignment document for {locus}: {source}")]
    Malformed { locus: String, source: ParseError },

    #[error("IO error for {locus} ({}): {source}", path.display())]
    Io {
        locus: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write CSV for {locus}: {source}")]
    Csv { locus: String, source: csv::Error },
}

/// What was produced for one successfully processed locus
#[derive(Debug, Clone, Serialize)]
pub struct LocusReport {
    pub locus: String,
    /// Whether the raw document was already cached
    pub cached: bool,
    pub alleles: usize,
    pub columns: usize,
    pub blocks: usize,
    pub unexpected_tags: usize,
    pub split_path: PathBuf,
    pub combined_path: PathBuf,
}

/// Outcome of one locus within a run
#[derive(Debug)]
pub struct LocusOutcome {
    pub locus: Locus,
    pub result: Result<LocusReport, LocusError>,
}

/// Fetch (if needed), reconstruct, and write both CSV files for `locus`.
///
/// # Errors
///
/// Returns a `LocusError` naming the locus for any fetch, parse, or write failure.
pub fn process_locus(
    config: &AlignmentConfig,
    transport: &dyn Transport,
    locus: &Locus,
) -> Result<LocusReport, LocusError> {
    let io_error = |path: &Path| {
        let locus = locus.to_string();
        let path = path.to_path_buf();
        move |source| LocusError::Io {
            locus,
            path,
            source,
        }
    };

    std::fs::create_dir_all(&config.output_dir).map_err(io_error(config.output_dir.as_path()))?;

    let outcome = Fetcher::new(config, transport)
        .fetch(locus)
        .map_err(|source| LocusError::Fetch {
            locus: locus.to_string(),
            source,
        })?;

    info!("Processing {locus}");
    let raw = std::fs::read(outcome.path()).map_err(io_error(outcome.path().as_path()))?;
    let document = String::from_utf8_lossy(&raw);

    let reconstructed = reconstruct_document(&document).map_err(|source| LocusError::Malformed {
        locus: locus.to_string(),
        source,
    })?;
    let table = &reconstructed.table;

    let split_path = config.split_path(locus);
    let combined_path = config.combined_path(locus);
    let csv_error = |source| LocusError::Csv {
        locus: locus.to_string(),
        source,
    };

    let split = stage(config, |file| write_split(table, config.row_order, file))
        .map_err(csv_error)?;
    let combined = stage(config, |file| write_combined(table, config.row_order, file))
        .map_err(csv_error)?;
    split
        .persist(&split_path)
        .map_err(|e| io_error(split_path.as_path())(e.error))?;
    if let Err(e) = combined.persist(&combined_path) {
        // Never leave a split file without its combined counterpart
        let _ = std::fs::remove_file(&split_path);
        return Err(io_error(combined_path.as_path())(e.error));
    }

    info!(
        "Wrote {} alleles x {} columns for {locus}",
        table.allele_count(),
        table.column_count()
    );

    Ok(LocusReport {
        locus: locus.name.clone(),
        cached: outcome.was_cached(),
        alleles: table.allele_count(),
        columns: table.column_count(),
        blocks: reconstructed.blocks,
        unexpected_tags: reconstructed.unexpected_tags,
        split_path,
        combined_path,
    })
}

/// Write into a temporary file in the output directory
fn stage<F>(config: &AlignmentConfig, write: F) -> Result<NamedTempFile, csv::Error>
where
    F: FnOnce(BufWriter<&File>) -> Result<(), csv::Error>,
{
    let temp = NamedTempFile::new_in(&config.output_dir)?;
    write(BufWriter::new(temp.as_file()))?;
    Ok(temp)
}

/// Process every configured locus in order, continuing past failures
pub fn process_all(config: &AlignmentConfig, transport: &dyn Transport) -> Vec<LocusOutcome> {
    config
        .loci
        .iter()
        .map(|locus| {
            let result = process_locus(config, transport, locus);
            if let Err(e) = &result {
                error!("{e}");
            }
            LocusOutcome {
                locus: locus.clone(),
                result,
            }
        })
        .collect()
}
