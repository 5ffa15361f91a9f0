use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use crate::core::locus::{hla_loci, Locus};

/// Alignment service endpoint
pub const ALIGNMENT_SERVICE_URL: &str = "http://www.ebi.ac.uk/cgi-bin/ipd/imgt/hla/align.cgi";

/// Directory used when none is given on the command line
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "hla-alignments";

/// Request timeout used when none is given on the command line
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Order in which rows are written to the CSV files
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RowOrder {
    /// Order in which each row key first appears in the document
    #[default]
    FirstSeen,
    /// Lexicographic by row key
    Sorted,
}

/// Immutable configuration for a run, shared by the fetcher and the pipeline
#[derive(Debug, Clone)]
pub struct AlignmentConfig {
    pub loci: Vec<Locus>,
    pub service_url: String,
    pub output_dir: PathBuf,
    pub timeout: Duration,
    pub row_order: RowOrder,
}

impl AlignmentConfig {
    /// Configuration for the fixed HLA locus set writing into `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            loci: hla_loci(),
            service_url: ALIGNMENT_SERVICE_URL.to_string(),
            output_dir: output_dir.into(),
            timeout: DEFAULT_TIMEOUT,
            row_order: RowOrder::default(),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_row_order(mut self, row_order: RowOrder) -> Self {
        self.row_order = row_order;
        self
    }

    #[must_use]
    pub fn with_loci(mut self, loci: Vec<Locus>) -> Self {
        self.loci = loci;
        self
    }

    #[must_use]
    pub fn cache_path(&self, locus: &Locus) -> PathBuf {
        self.output_dir.join(locus.cache_file_name())
    }

    #[must_use]
    pub fn combined_path(&self, locus: &Locus) -> PathBuf {
        self.output_dir.join(locus.combined_file_name())
    }

    #[must_use]
    pub fn split_path(&self, locus: &Locus) -> PathBuf {
        self.output_dir.join(locus.split_file_name())
    }
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIRECTORY)
    }
}
