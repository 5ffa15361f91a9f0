//! Block structure detection over logical lines.
//!
//! The alignment is printed as a series of blocks. Each block opens with a
//! separator line holding a single whitespace character, followed by one
//! header line and then one body line per allele:
//!
//! ```text
//! (separator: one space)
//!  Prot    codon1 7  8
//! A*01:01  AC GT TTA
//! A*02:01  -- -T ..C
//! ```

use tracing::debug;

/// Classification of a single logical line, independent of context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Exactly one whitespace character: starts a new block
    Separator,
    /// Empty or whitespace-only line that is not a separator
    Blank,
    /// Any line with visible content
    Content,
}

impl LineKind {
    #[must_use]
    pub fn classify(line: &str) -> Self {
        if !line.trim().is_empty() {
            Self::Content
        } else if line.chars().count() == 1 {
            Self::Separator
        } else {
            Self::Blank
        }
    }
}

/// Position of the detector within the block structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    /// Before the first separator
    AwaitingBlock,
    /// After a separator, expecting the header line
    AwaitingHeader,
    /// After the header, expecting the line used for column inference
    AwaitingFirstBody,
    /// Remaining body lines of the current block
    InBlock,
}

/// A line placed in its block context. Block numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockEvent {
    BlockStart { block: usize },
    Header { block: usize, line: String },
    FirstBody { block: usize, line: String },
    Body { block: usize, line: String },
}

/// State machine that turns logical lines into [`BlockEvent`]s
#[derive(Debug)]
pub struct BlockDetector {
    state: BlockState,
    block: usize,
}

impl Default for BlockDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockDetector {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: BlockState::AwaitingBlock,
            block: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> BlockState {
        self.state
    }

    /// Number of blocks started so far
    #[must_use]
    pub fn blocks(&self) -> usize {
        self.block
    }

    /// Feed the next line. Returns `None` for lines that carry no table content.
    pub fn feed(&mut self, line: String) -> Option<BlockEvent> {
        match LineKind::classify(&line) {
            LineKind::Separator => {
                self.block += 1;
                self.state = BlockState::AwaitingHeader;
                debug!("Block {} starts", self.block);
                Some(BlockEvent::BlockStart { block: self.block })
            }
            LineKind::Blank => None,
            LineKind::Content => {
                let block = self.block;
                match self.state {
                    BlockState::AwaitingBlock => {
                        debug!("Ignoring line before first block: {}", line.trim());
                        None
                    }
                    BlockState::AwaitingHeader => {
                        self.state = BlockState::AwaitingFirstBody;
                        Some(BlockEvent::Header { block, line })
                    }
                    BlockState::AwaitingFirstBody => {
                        self.state = BlockState::InBlock;
                        Some(BlockEvent::FirstBody { block, line })
                    }
                    BlockState::InBlock => Some(BlockEvent::Body { block, line }),
                }
            }
        }
    }
}
