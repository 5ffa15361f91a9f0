//! # hla-align
//!
//! A library and command-line tool for turning IPD-IMGT/HLA allele alignments
//! into flat CSV files.
//!
//! The alignment service renders each locus as fixed-width text inside an HTML
//! `<pre>` block. The text is split into blocks, each with an unlabelled header
//! line and one line per allele. `hla-align` rebuilds that table:
//!
//! - **Line extraction**: `<br>`-separated lines are recovered with their exact spacing
//! - **Block detection**: single-space lines separate blocks; the next line is a header
//! - **Header alignment**: column labels are matched to body columns by character offset,
//!   allowing labels to spill over columns narrower than themselves
//! - **Row accumulation**: each allele's tokens are appended block by block, in order
//!
//! Each locus produces a *split* CSV (one field per column, header rows included)
//! and a *combined* CSV (one concatenated sequence per allele).
//!
//! ## Example
//!
//! ```rust
//! use hla_align::parsing::reconstruct::reconstruct_document;
//! use hla_align::output::write_combined;
//! use hla_align::RowOrder;
//!
//! let html = "<pre><br> <br> Prot    1<br>A*01:01  AC<br>A*02:01  -T\
//!             <br> <br> Prot    2<br>A*01:01  GG<br>A*02:01  --</pre>";
//! let result = reconstruct_document(html).unwrap();
//!
//! let mut csv = Vec::new();
//! write_combined(&result.table, RowOrder::FirstSeen, &mut csv).unwrap();
//! assert_eq!(String::from_utf8(csv).unwrap(), "A*01:01,ACGG\nA*02:01,-T--\n");
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Locus table, run configuration, and the ordered row table
//! - [`fetch`]: Alignment service requests and the on-disk cache
//! - [`parsing`]: Markup flattening, line extraction, block detection, header alignment
//! - [`output`]: Split and combined CSV writers
//! - [`pipeline`]: Per-locus fetch, reconstruct, and write
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod fetch;
pub mod output;
pub mod parsing;
pub mod pipeline;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::config::{AlignmentConfig, RowOrder};
pub use crate::core::locus::{hla_loci, Locus, SequenceType};
pub use crate::core::table::{Row, RowKind, RowTable};
pub use fetch::{FetchError, FetchOutcome, Fetcher, HttpTransport, Transport};
pub use parsing::ParseError;
pub use pipeline::{process_all, process_locus, LocusError, LocusOutcome, LocusReport};
