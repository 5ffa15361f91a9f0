//! Row table reconstruction across all blocks of an alignment document.
//!
//! Every block contributes a slice of columns to every allele. The first body
//! line of a block fixes the block's column count and is used to derive the
//! header labels; all other body lines must match that count. The set of
//! alleles must be the same in every block, otherwise concatenating the
//! blocks would silently misalign sequences.

use indexmap::IndexSet;
use tracing::{debug, warn};

use crate::core::table::{RowKind, RowTable};
use crate::parsing::blocks::{BlockDetector, BlockEvent};
use crate::parsing::header::align_header;
use crate::parsing::lines::extract_lines;
use crate::parsing::ParseError;

/// Result of reconstructing one document
#[derive(Debug, Clone)]
pub struct ReconstructedTable {
    pub table: RowTable,
    /// Number of blocks seen
    pub blocks: usize,
    /// Number of unexpected tags skipped during line extraction
    pub unexpected_tags: usize,
}

/// Bookkeeping for the block currently being read
#[derive(Debug, Default)]
struct OpenBlock {
    index: usize,
    header: Option<String>,
    /// Columns per body row, fixed by the first body line
    width: Option<usize>,
    alleles: IndexSet<String>,
}

impl OpenBlock {
    fn new(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }
}

/// Accumulates logical lines into a [`RowTable`]
#[derive(Debug, Default)]
pub struct TableReconstructor {
    detector: BlockDetector,
    table: RowTable,
    block: OpenBlock,
    /// Allele set of the first block with body lines
    expected_alleles: Option<IndexSet<String>>,
}

impl TableReconstructor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process the next logical line.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` as soon as the line makes the table inconsistent.
    pub fn push_line(&mut self, line: String) -> Result<(), ParseError> {
        let Some(event) = self.detector.feed(line) else {
            return Ok(());
        };

        match event {
            BlockEvent::BlockStart { block } => {
                self.close_block()?;
                self.block = OpenBlock::new(block);
            }
            BlockEvent::Header { line, .. } => self.block.header = Some(line),
            BlockEvent::FirstBody { block, line } => {
                let tokens: Vec<&str> = line.split_whitespace().collect();
                let header = self.block.header.as_deref().unwrap_or_default();
                let labels =
                    align_header(header, &line, &tokens).map_err(|e| e.in_block(block))?;

                let mut labels = labels.into_iter();
                let header_key = labels.next().unwrap_or_default();
                debug!("Block {block}: header row '{header_key}'");
                self.table
                    .accumulate(&header_key, RowKind::Header, labels)
                    .map_err(|e| e.in_block(block))?;

                self.block.width = Some(tokens.len() - 1);
                self.push_body(&tokens)?;
            }
            BlockEvent::Body { line, .. } => {
                let tokens: Vec<&str> = line.split_whitespace().collect();
                self.push_body(&tokens)?;
            }
        }
        Ok(())
    }

    fn push_body(&mut self, tokens: &[&str]) -> Result<(), ParseError> {
        let Some((&allele, columns)) = tokens.split_first() else {
            return Ok(());
        };
        let block = self.block.index;

        let expected = self.block.width.unwrap_or(columns.len());
        if columns.len() != expected {
            return Err(ParseError::TokenCountMismatch {
                block,
                row: allele.to_string(),
                expected,
                found: columns.len(),
            });
        }

        if !self.block.alleles.insert(allele.to_string()) {
            return Err(ParseError::DuplicateRow {
                block,
                row: allele.to_string(),
            });
        }

        self.table
            .accumulate(
                allele,
                RowKind::Allele,
                columns.iter().map(ToString::to_string),
            )
            .map_err(|e| e.in_block(block))
    }

    /// Check the finished block's allele set against the first block's
    fn close_block(&mut self) -> Result<(), ParseError> {
        let block = std::mem::take(&mut self.block);

        if block.header.is_some() && block.width.is_none() {
            warn!("Block {} has a header but no body lines", block.index);
            return Ok(());
        }
        if block.alleles.is_empty() {
            return Ok(());
        }

        let Some(expected) = &self.expected_alleles else {
            self.expected_alleles = Some(block.alleles);
            return Ok(());
        };

        if let Some(missing) = expected.iter().find(|a| !block.alleles.contains(*a)) {
            return Err(ParseError::MissingRow {
                block: block.index,
                row: missing.clone(),
            });
        }
        if let Some(extra) = block.alleles.iter().find(|a| !expected.contains(*a)) {
            return Err(ParseError::UnexpectedRow {
                block: block.index,
                row: extra.clone(),
            });
        }
        Ok(())
    }

    /// Validate the last block and return the table.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the last block is inconsistent with earlier ones,
    /// or `ParseError::NoRows` if no allele rows were found at all.
    pub fn finish(mut self) -> Result<(RowTable, usize), ParseError> {
        self.close_block()?;
        if self.table.allele_count() == 0 {
            return Err(ParseError::NoRows);
        }
        Ok((self.table, self.detector.blocks()))
    }
}

/// Reconstruct the row table of a raw alignment document.
///
/// # Errors
///
/// Returns a `ParseError` if the document has no `<pre>` block or its blocks
/// do not form a consistent table.
pub fn reconstruct_document(document: &str) -> Result<ReconstructedTable, ParseError> {
    let mut lines = extract_lines(document)?;
    let mut reconstructor = TableReconstructor::new();

    for line in lines.by_ref() {
        reconstructor.push_line(line)?;
    }

    let (table, blocks) = reconstructor.finish()?;
    Ok(ReconstructedTable {
        table,
        blocks,
        unexpected_tags: lines.unexpected_tags(),
    })
}
