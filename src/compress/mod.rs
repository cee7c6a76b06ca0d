//! REP compression (long-range match preprocessing)
//!
//! The compressor slides a large window over the input, indexes one
//! position in k with a rolling hash, and replaces duplicated regions
//! of at least `smallest_len` bytes with (length, distance) references
//! at distances of up to a full window. Output is a sequence of framed
//! blocks, one per read cycle.

mod hash;
mod matcher;
mod state;
mod table;
mod writer;

pub use hash::{RollingHash, HASH_PRIME};
pub use state::CompressState;
pub use table::MatchTable;
pub use writer::Compressor;

use crate::common::{RepConfig, RepStats, Result};
use std::io::{Read, Write};

/// Compress `reader` into `writer` with the given configuration
///
/// Returns the stream counters once the reader reports end of input.
pub fn compress_stream<R: Read, W: Write>(
    reader: R,
    writer: W,
    config: &RepConfig,
) -> Result<RepStats> {
    Compressor::new(reader, writer, config)?.run()
}

/// Convenience function to compress a byte slice in memory
pub fn compress_bytes(data: &[u8], config: &RepConfig) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    compress_stream(std::io::Cursor::new(data), &mut output, config)?;
    Ok(output)
}
