//! Async convenience functions
//!
//! This module provides easy-to-use async wrappers around the
//! synchronous codec. The REP window state is inherently sequential, so
//! these helpers buffer the stream through the in-memory entry points
//! rather than re-implementing the codec on async I/O.

use crate::common::{RepConfig, RepStats, Result};
use crate::{compress_bytes, compress_stream, decompress_bytes, decompress_stream};
use std::path::Path;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Compress everything from an async reader
pub async fn compress_async<R: AsyncRead + Unpin>(
    mut reader: R,
    config: &RepConfig,
) -> Result<Vec<u8>> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input).await?;
    compress_bytes(&input, config)
}

/// Decompress everything from an async reader
pub async fn decompress_async<R: AsyncRead + Unpin>(mut reader: R) -> Result<Vec<u8>> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input).await?;
    decompress_bytes(&input)
}

/// Compress the data from an async reader into an async writer
pub async fn compress_to_writer<R, W>(
    mut reader: R,
    mut writer: W,
    config: &RepConfig,
) -> Result<RepStats>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut input = Vec::new();
    reader.read_to_end(&mut input).await?;
    let mut packed = Vec::new();
    let stats = compress_stream(std::io::Cursor::new(&input), &mut packed, config)?;
    writer.write_all(&packed).await?;
    writer.flush().await?;
    Ok(stats)
}

/// Compress a file on disk
pub async fn compress_file<P1: AsRef<Path>, P2: AsRef<Path>>(
    input_path: P1,
    output_path: P2,
    config: &RepConfig,
) -> Result<RepStats> {
    let input = tokio::fs::read(input_path).await?;
    let stats = {
        let mut output = Vec::new();
        let stats = compress_stream(std::io::Cursor::new(&input), &mut output, config)?;
        tokio::fs::write(output_path, &output).await?;
        stats
    };
    log::debug!(
        "compressed {} -> {} bytes ({} matches)",
        stats.in_bytes,
        stats.out_bytes,
        stats.match_count
    );
    Ok(stats)
}

/// Decompress a file on disk
pub async fn decompress_file<P1: AsRef<Path>, P2: AsRef<Path>>(
    input_path: P1,
    output_path: P2,
) -> Result<RepStats> {
    let input = tokio::fs::read(input_path).await?;
    let mut output = Vec::new();
    let stats = decompress_stream(std::io::Cursor::new(&input), &mut output)?;
    tokio::fs::write(output_path, &output).await?;
    Ok(stats)
}
