//! Common types and constants for the REP codec
//!
//! This module defines the configuration, derived tuning parameters,
//! error type, and statistics shared by the compression and
//! decompression halves of the crate.

use thiserror::Error;

/// Error type for REP operations
#[derive(Debug, Error)]
pub enum RepError {
    /// Block size outside the supported range
    #[error("Invalid block size: {0} (must be >= 2*L and <= {MAX_BLOCK_SIZE})")]
    InvalidBlockSize(usize),

    /// Match length constraints violated
    #[error("Invalid match lengths: smallest_len {smallest_len} must be in 1..=min_len ({min_len})")]
    InvalidMatchLen {
        /// Configured minimum match length inside the barrier
        min_len: usize,
        /// Configured minimum match length beyond the barrier
        smallest_len: usize,
    },

    /// Hash table exponent too large to represent
    #[error("Invalid hash bits: {0} (expected 0 for auto, or 1..={MAX_HASH_BITS})")]
    InvalidHashBits(u32),

    /// Probe amplifier must be at least one
    #[error("Invalid amplifier: {0} (must be >= 1)")]
    InvalidAmplifier(usize),

    /// Allocation of the working buffer, hash table, or output segments failed
    #[error("Out of memory")]
    OutOfMemory,

    /// The compressed stream violates the block format
    #[error("Corrupt input: {0}")]
    CorruptInput(String),

    /// I/O error forwarded from the read or write side
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for REP operations
pub type Result<T> = std::result::Result<T, RepError>;

/// Largest accepted block size (and therefore match distance)
pub const MAX_BLOCK_SIZE: usize = 1 << 31;

/// Largest accepted hash table exponent
pub const MAX_HASH_BITS: u32 = 28;

/// Upper bound on the bytes read per slide cycle once the window is full
pub const MAX_CHUNK: usize = 8 << 20;

/// Default block size (64 MiB)
pub const DEFAULT_BLOCK_SIZE: usize = 64 << 20;

/// Default minimum match length within the barrier
pub const DEFAULT_MIN_LEN: usize = 512;

/// Default distance barrier (8 MiB)
pub const DEFAULT_BARRIER: usize = 8 << 20;

/// Tuning parameters for compression
///
/// The decoder needs none of these: it rediscovers the block size from
/// the stream prologue and ignores everything else.
#[derive(Debug, Clone)]
pub struct RepConfig {
    /// Size of the sliding window and maximum match distance, in bytes
    pub block_size: usize,
    /// Advisory minimum compression ratio in percent; carried but not acted on
    pub min_compression: u32,
    /// Minimum match length for distances below `barrier`
    pub min_len: usize,
    /// Distance threshold switching between `min_len` and `smallest_len`
    pub barrier: usize,
    /// Minimum match length for distances at or beyond `barrier`
    pub smallest_len: usize,
    /// Hash table size exponent; 0 selects automatic sizing
    pub hash_bits: u32,
    /// Probe density multiplier
    pub amplifier: usize,
}

impl Default for RepConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            min_compression: 100,
            min_len: DEFAULT_MIN_LEN,
            barrier: DEFAULT_BARRIER,
            smallest_len: DEFAULT_MIN_LEN,
            hash_bits: 0,
            amplifier: 1,
        }
    }
}

impl RepConfig {
    /// Validate the configuration and compute the derived parameters
    pub fn params(&self) -> Result<RepParams> {
        if self.smallest_len == 0 || self.smallest_len > self.min_len {
            return Err(RepError::InvalidMatchLen {
                min_len: self.min_len,
                smallest_len: self.smallest_len,
            });
        }
        if self.amplifier == 0 {
            return Err(RepError::InvalidAmplifier(self.amplifier));
        }
        if self.hash_bits > MAX_HASH_BITS {
            return Err(RepError::InvalidHashBits(self.hash_bits));
        }

        // L is the rolling-hash window; k the anchor/probe sub-sampling
        // stride, the largest power of two not above sqrt(2L).
        let l = (self.smallest_len / 2).max(1).next_power_of_two();
        let k = 1usize << ((2 * l).trailing_zeros() / 2);

        if self.block_size < 2 * l || self.block_size > MAX_BLOCK_SIZE {
            return Err(RepError::InvalidBlockSize(self.block_size));
        }

        let test = (k * self.amplifier).min(l);
        let hash_size = if self.hash_bits > 0 {
            1usize << self.hash_bits
        } else {
            let slots = (self.block_size as u64 * 2 / 3) / k.max(16) as u64;
            slots.next_power_of_two() as usize
        };

        Ok(RepParams {
            block_size: self.block_size,
            min_len: self.min_len,
            smallest_len: self.smallest_len,
            barrier: self.barrier,
            l,
            k,
            k_mask: k - 1,
            test,
            hash_size,
        })
    }
}

/// Parameters derived from a [`RepConfig`]
///
/// All values are fixed for the duration of a stream.
#[derive(Debug, Clone)]
pub struct RepParams {
    /// Window size B
    pub block_size: usize,
    /// Minimum match length within the barrier
    pub min_len: usize,
    /// Minimum match length beyond the barrier
    pub smallest_len: usize,
    /// Distance threshold between the two minimums
    pub barrier: usize,
    /// Rolling-hash window width, a power of two near `smallest_len / 2`
    pub l: usize,
    /// Anchor stride, a power of two near `sqrt(2 * l)`
    pub k: usize,
    /// `k - 1`; also the checksum mask packed into hash table entries
    pub k_mask: usize,
    /// Positions probed per L-sized step of the scan
    pub test: usize,
    /// Number of hash table slots, a power of two
    pub hash_size: usize,
}

/// Statistics for compression and decompression operations
#[derive(Debug, Default, Clone)]
pub struct RepStats {
    /// Bytes consumed from the input
    pub in_bytes: u64,
    /// Bytes produced on the output
    pub out_bytes: u64,
    /// Match records emitted or expanded
    pub match_count: u64,
    /// Bytes covered by match records
    pub match_bytes: u64,
    /// Bytes carried as literal runs
    pub literal_bytes: u64,
    /// Output bytes per input byte
    pub ratio: f64,
}

impl RepStats {
    /// Recompute the output/input ratio from the byte counters
    pub fn finish(&mut self) {
        self.ratio = if self.in_bytes > 0 {
            self.out_bytes as f64 / self.in_bytes as f64
        } else {
            0.0
        };
    }
}

/// Fallible zero-filled allocation, surfaced as [`RepError::OutOfMemory`]
pub(crate) fn try_zeroed<T: Clone + Default>(len: usize) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|_| RepError::OutOfMemory)?;
    v.resize(len, T::default());
    Ok(v)
}
