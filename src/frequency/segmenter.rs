//! Block segmentation of unit streams.
//!
//! A stream of N units is cut into blocks according to a [`BlockPlan`]:
//!
//! - **count-driven** (`num_blocks > 0`): `block_size = N / num_blocks` and
//!   the `N % num_blocks` leftover units are spread one each over the first
//!   blocks;
//! - **size-driven** (`block_size > 0`): the number of blocks follows from
//!   the [`LastBlock`] policy.
//!
//! [`Segmenter`] is the streaming state machine: feed it units with
//! [`append`](Segmenter::append), collect closed blocks as they come out,
//! then [`finish`](Segmenter::finish) to flush the open block.
//!
//! # Examples
//!
//! ```
//! use freqscope::config::AnalysisConfig;
//! use freqscope::frequency::segmenter::{BlockPlan, segment};
//!
//! let config = AnalysisConfig::builder().num_blocks(3).build().unwrap();
//! let units: Vec<String> = (0..10).map(|i| format!("w{i}")).collect();
//!
//! let blocks = segment(&units, BlockPlan::derive(units.len(), &config), |_| true);
//! let sizes: Vec<u64> = blocks.iter().map(|b| b.token_count).collect();
//! assert_eq!(sizes, vec![4, 3, 3]);
//! ```

use ahash::AHashSet;
use log::trace;

use crate::config::{AnalysisConfig, LastBlock};
use crate::frequency::result::{Block, BlockStats, Counts};

/// Sizing of the blocks cut from one stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockPlan {
    /// Nominal units per block.
    pub block_size: usize,
    /// Nominal number of blocks.
    pub num_blocks: usize,
    /// Number of leading blocks that take one extra unit.
    pub remainder: usize,
    pub last_block: LastBlock,
}

impl BlockPlan {
    /// Derive the plan for a stream of `stream_len` units.
    pub fn derive(stream_len: usize, config: &AnalysisConfig) -> Self {
        let last_block = config.last_block();

        if config.num_blocks() > 0 {
            let num_blocks = config.num_blocks();
            let block_size = stream_len / num_blocks;
            return BlockPlan {
                block_size,
                num_blocks,
                remainder: stream_len - block_size * num_blocks,
                last_block,
            };
        }

        let block_size = config.block_size();
        if block_size == 0 {
            // Unreachable through a validated config: one block of everything.
            return BlockPlan {
                block_size: stream_len,
                num_blocks: 1,
                remainder: 0,
                last_block,
            };
        }

        let num_blocks = match last_block {
            LastBlock::BigLast | LastBlock::TruncateLast => stream_len / block_size,
            LastBlock::SmallLast => stream_len.div_ceil(block_size),
            LastBlock::TruncateAll => 1,
        };

        BlockPlan {
            block_size,
            num_blocks,
            remainder: 0,
            last_block,
        }
    }
}

/// A block as it leaves the segmenter, before it is named.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClosedBlock {
    /// 1-based position of the block in its stream.
    pub index: usize,
    /// Counts of retained units.
    pub counts: Counts,
    /// Distinct units seen, retained or not.
    pub type_count: usize,
    /// Units seen, retained or not.
    pub token_count: u64,
}

/// Streaming segmentation state for one stream.
#[derive(Clone, Debug)]
pub struct Segmenter {
    plan: BlockPlan,
    counts: Counts,
    current_tokens: usize,
    current_types: AHashSet<String>,
    remainder_budget: usize,
    block_index: usize,
}

impl Segmenter {
    /// Start segmenting a stream under `plan`.
    pub fn new(plan: BlockPlan) -> Self {
        Segmenter {
            plan,
            counts: Counts::new(),
            current_tokens: 0,
            current_types: AHashSet::new(),
            remainder_budget: plan.remainder,
            block_index: 1,
        }
    }

    /// Whether further units are discarded by a truncating policy.
    pub fn is_exhausted(&self) -> bool {
        self.plan.last_block.truncates() && self.block_index > self.plan.num_blocks
    }

    /// Index (1-based) of the block currently being filled.
    pub fn block_index(&self) -> usize {
        self.block_index
    }

    /// Add a unit to the open block. `retained` decides whether it is
    /// counted; it always contributes to the block's type and token tallies.
    ///
    /// Returns the block closed by this unit, if any.
    pub fn append(&mut self, unit: &str, retained: bool) -> Option<ClosedBlock> {
        if self.is_exhausted() {
            return None;
        }

        self.current_tokens += 1;
        if !self.current_types.contains(unit) {
            self.current_types.insert(unit.to_string());
        }
        if retained {
            *self.counts.entry(unit.to_string()).or_insert(0) += 1;
        }

        if self.plan.last_block == LastBlock::BigLast && self.block_index == self.plan.num_blocks {
            return None;
        }

        if self.remainder_budget > 0 {
            if self.current_tokens >= self.plan.block_size + 1 {
                self.remainder_budget -= 1;
                return Some(self.close());
            }
        } else if self.current_tokens >= self.plan.block_size {
            return Some(self.close());
        }

        None
    }

    /// Close and return the open block, if it holds any units.
    pub fn finish(mut self) -> Option<ClosedBlock> {
        if self.current_tokens == 0 {
            return None;
        }
        Some(self.close())
    }

    fn close(&mut self) -> ClosedBlock {
        let block = ClosedBlock {
            index: self.block_index,
            counts: std::mem::take(&mut self.counts),
            type_count: self.current_types.len(),
            token_count: self.current_tokens as u64,
        };
        trace!(
            "closed block {} ({} tokens, {} types)",
            block.index, block.token_count, block.type_count
        );

        self.current_types.clear();
        self.current_tokens = 0;
        self.block_index += 1;
        block
    }
}

/// Segment a whole stream, counting the units for which `retain` is true.
pub fn segment<I, S, F>(units: I, plan: BlockPlan, retain: F) -> Vec<ClosedBlock>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: Fn(&str) -> bool,
{
    let mut segmenter = Segmenter::new(plan);
    let mut blocks = Vec::new();

    for unit in units {
        if segmenter.is_exhausted() {
            break;
        }
        let unit = unit.as_ref();
        if let Some(block) = segmenter.append(unit, retain(unit)) {
            blocks.push(block);
        }
    }
    blocks.extend(segmenter.finish());

    blocks
}

/// Name of block `index` out of `total`, optionally within a document.
pub fn block_name(index: usize, total: usize, within: Option<&str>) -> String {
    match within {
        Some(title) => format!("Block #{index}/{total} (within '{title}')"),
        None => format!("Block #{index}/{total}"),
    }
}

/// Name closed blocks, numbering them out of the number actually produced.
pub fn name_blocks(closed: Vec<ClosedBlock>, within: Option<&str>) -> Vec<(Block, BlockStats)> {
    let total = closed.len();
    closed
        .into_iter()
        .map(|block| {
            let name = block_name(block.index, total, within);
            let stats = BlockStats {
                name: name.clone(),
                type_count: block.type_count,
                token_count: block.token_count,
            };
            (
                Block {
                    name,
                    counts: block.counts,
                },
                stats,
            )
        })
        .collect()
}
