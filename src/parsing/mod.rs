//! Reconstruction of allele alignment tables from the service's HTML output.
//!
//! The alignment is rendered as fixed-width text inside a single `<pre>` block,
//! with line breaks encoded as `<br>` tags. Reconstruction runs in stages:
//!
//! - [`markup`]: flatten the `<pre>` block into text / break / unexpected-tag events
//! - [`lines`]: join events into logical lines, preserving every space
//! - [`blocks`]: classify lines into block separators, headers, and body lines
//! - [`header`]: infer column labels by aligning a header line against a body line
//! - [`reconstruct`]: accumulate header and allele rows across all blocks
//!
//! ## Example
//!
//! ```rust
//! use hla_align::parsing::reconstruct::reconstruct_document;
//!
//! let html = "<pre>intro<br> <br> Prot    1<br>A*01:01  AC<br>A*02:01  -T</pre>";
//! let result = reconstruct_document(html).unwrap();
//! assert_eq!(result.table.get("A*02:01").unwrap().concatenated(), "-T");
//! ```

use thiserror::Error;

use crate::utils::validation::MAX_ROWS;

pub mod blocks;
pub mod header;
pub mod lines;
pub mod markup;
pub mod reconstruct;

/// A raw alignment document could not be turned into a consistent table
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("No <pre> block found in document")]
    MissingPreformattedBlock,

    #[error("Token '{token}' not found in first body line at or after offset {from}")]
    TokenNotFound { token: String, from: usize },

    #[error("Block {block}: {source}")]
    InBlock {
        block: usize,
        source: Box<ParseError>,
    },

    #[error("Block {block}: row '{row}' has {found} columns, expected {expected}")]
    TokenCountMismatch {
        block: usize,
        row: String,
        expected: usize,
        found: usize,
    },

    #[error("Block {block}: row '{row}' is missing")]
    MissingRow { block: usize, row: String },

    #[error("Block {block}: row '{row}' does not appear in earlier blocks")]
    UnexpectedRow { block: usize, row: String },

    #[error("Block {block}: row '{row}' appears more than once")]
    DuplicateRow { block: usize, row: String },

    #[error("Row '{row}' is used both as a header label and an allele name")]
    RowKindConflict { row: String },

    #[error("Too many rows: {0} exceeds maximum allowed ({max})", max = MAX_ROWS)]
    TooManyRows(usize),

    #[error("No allele rows found in document")]
    NoRows,
}

impl ParseError {
    /// Attach the 1-based block number the error occurred in
    #[must_use]
    pub fn in_block(self, block: usize) -> Self {
        Self::InBlock {
            block,
            source: Box::new(self),
        }
    }
}
