//! REP decompression
//!
//! The decoder is self-configuring: it reads the window size from the
//! stream prologue and ignores whatever parameters the encoder was
//! tuned with. Reconstruction is strictly sequential and every write
//! emits a prefix of the decompressed stream.

mod reader;
mod state;

pub use reader::Decompressor;
pub use state::DecompressState;

use crate::common::{RepStats, Result};
use std::io::{Read, Write};

/// Decompress `reader` into `writer`
///
/// Returns the stream counters once the end-of-stream sentinel is seen.
pub fn decompress_stream<R: Read, W: Write>(reader: R, writer: W) -> Result<RepStats> {
    Decompressor::new(reader, writer).run()
}

/// Convenience function to decompress a byte slice in memory
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    decompress_stream(std::io::Cursor::new(data), &mut output)?;
    Ok(output)
}
