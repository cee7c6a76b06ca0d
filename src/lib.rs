//! replib - Rust implementation of the REP long-range match preprocessor
//!
//! REP is an LZ77-family preprocessor meant to run in front of a heavier
//! general-purpose compressor. It finds matches of very long minimum
//! length at distances of up to a full window (tens of megabytes and
//! beyond) while indexing only a small fraction of the positions it
//! scans, so near-duplicate regions collapse into compact
//! (length, distance) references that a downstream coder can digest.
//!
//! # Features
//!
//! - Window sizes up to 2 GiB with wrap-around addressing
//! - Sub-sampled rolling-hash index: one anchor and one probe per k
//!   positions, with checksum bits packed into the table entries
//! - Streaming API over [`std::io::Read`] / [`std::io::Write`]
//! - Self-configuring decoder (the window size travels in the stream)
//! - Optional async convenience layer behind the `async` feature
//!
//! # Example
//!
//! ```
//! use replib::{compress_bytes, decompress_bytes, RepConfig};
//!
//! let config = RepConfig {
//!     block_size: 1 << 20,
//!     min_len: 64,
//!     smallest_len: 64,
//!     ..RepConfig::default()
//! };
//!
//! let data: Vec<u8> = b"a long and repetitive stretch of bytes. ".repeat(1000);
//! let packed = compress_bytes(&data, &config)?;
//! assert!(packed.len() < data.len());
//!
//! let unpacked = decompress_bytes(&packed)?;
//! assert_eq!(data, unpacked);
//! # Ok::<(), replib::RepError>(())
//! ```
//!
//! # Streaming
//!
//! ```no_run
//! use replib::{compress_stream, RepConfig};
//! use std::fs::File;
//!
//! let input = File::open("input.bin")?;
//! let output = File::create("input.rep")?;
//! let stats = compress_stream(input, output, &RepConfig::default())?;
//! println!("{} -> {} bytes", stats.in_bytes, stats.out_bytes);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod common;
pub mod compress;
pub mod decompress;
pub mod error;

// Async module (only available with the async feature)
#[cfg(feature = "async")]
pub mod async_stream;

// Re-export commonly used types
pub use common::{
    RepConfig, RepError, RepParams, RepStats, Result, DEFAULT_BARRIER, DEFAULT_BLOCK_SIZE,
    DEFAULT_MIN_LEN, MAX_BLOCK_SIZE, MAX_CHUNK, MAX_HASH_BITS,
};
pub use compress::{compress_bytes, compress_stream, Compressor};
pub use decompress::{decompress_bytes, decompress_stream, Decompressor};

#[cfg(feature = "async")]
pub use async_stream::{
    compress_async, compress_file, compress_to_writer, decompress_async, decompress_file,
};
