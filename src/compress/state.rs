//! Compression state management
//!
//! This module owns the sliding working buffer, the anchor hash table,
//! the rolling hash, the scan cursors, and the per-block staging arrays
//! that accumulate match and literal-run records between emits.

use super::hash::RollingHash;
use super::table::MatchTable;
use crate::common::{try_zeroed, RepConfig, RepParams, RepStats, Result, MAX_CHUNK};

/// Mutable state of a running compressor
///
/// The working buffer holds the last `block_size` bytes of the input.
/// Until it first fills, logical positions equal physical offsets;
/// afterwards each cycle overwrites the oldest slice of the buffer and
/// all addressing becomes modular.
#[derive(Debug)]
pub struct CompressState {
    /// Derived tuning parameters
    pub params: RepParams,
    /// Working buffer of `block_size` bytes
    pub window: Vec<u8>,
    /// Anchor table
    pub table: MatchTable,
    /// Rolling hash over the L bytes at the scan position
    pub hash: RollingHash,
    /// Bytes of the buffer filled before the current read
    pub base: usize,
    /// Scan position to resume from on the next cycle
    pub last_i: usize,
    /// First position not yet committed to output
    pub last_match: usize,
    /// Whether the buffer has wrapped at least once
    pub filled_once: bool,

    // Per-block staging, emptied at the start of each cycle
    /// Match lengths
    pub lens: Vec<u32>,
    /// Match distances
    pub offsets: Vec<u32>,
    /// Literal-run lengths; always one longer than `lens` after a cycle
    pub datalens: Vec<u32>,
    /// Window offsets the literal runs are copied from
    pub data_offsets: Vec<u32>,

    /// Running counters
    pub stats: RepStats,
}

impl CompressState {
    /// Allocate state for the given configuration
    pub fn new(config: &RepConfig) -> Result<Self> {
        let params = config.params()?;
        let window = try_zeroed(params.block_size)?;
        let table = MatchTable::new(params.hash_size, params.k)?;
        let hash = RollingHash::new(params.l);
        Ok(Self {
            params,
            window,
            table,
            hash,
            base: 0,
            last_i: 0,
            last_match: 0,
            filled_once: false,
            lens: Vec::new(),
            offsets: Vec::new(),
            datalens: Vec::new(),
            data_offsets: Vec::new(),
            stats: RepStats::default(),
        })
    }

    /// Reset for a fresh stream, keeping the allocations
    pub fn reset(&mut self) {
        self.base = 0;
        self.last_i = 0;
        self.last_match = 0;
        self.filled_once = false;
        self.table.clear();
        self.clear_staging();
        self.stats = RepStats::default();
    }

    /// Drop the records staged for the previous block
    pub fn clear_staging(&mut self) {
        self.lens.clear();
        self.offsets.clear();
        self.datalens.clear();
        self.data_offsets.clear();
    }

    /// Bytes to request from the reader this cycle
    ///
    /// The first pass fills the whole buffer; once it has wrapped, each
    /// cycle overwrites at most an eighth of it (capped at 8 MiB).
    pub fn next_chunk_len(&self) -> usize {
        let remaining = self.params.block_size - self.base;
        if !self.filled_once {
            remaining
        } else {
            let slide = (self.params.block_size / 8).max(1).min(MAX_CHUNK);
            slide.min(remaining)
        }
    }

    /// Account for `size` freshly scanned bytes and wrap the cursors
    /// when the buffer fills
    pub fn advance(&mut self, size: usize) {
        self.base += size;
        debug_assert!(self.base <= self.params.block_size);
        if self.base == self.params.block_size {
            self.base = 0;
            self.last_i = 0;
            self.last_match = 0;
            self.filled_once = true;
        }
    }
}
