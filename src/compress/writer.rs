//! Streaming compression driver
//!
//! The driver pulls from the reader into the sliding window, runs one
//! match-finding pass per read cycle, frames the staged records into a
//! block, and pushes it through the writer. Apart from the 32-bit
//! block-size prologue, every write hands over exactly one framed block.

use super::state::CompressState;
use crate::common::{RepConfig, RepStats, Result};
use std::io::{ErrorKind, Read, Write};

/// One-shot compressor pumping a reader into a writer
#[derive(Debug)]
pub struct Compressor<R: Read, W: Write> {
    reader: R,
    writer: W,
    state: CompressState,
    /// Staged frame bytes for the current block
    block: Vec<u8>,
}

impl<R: Read, W: Write> Compressor<R, W> {
    /// Create a compressor for the given configuration
    pub fn new(reader: R, writer: W, config: &RepConfig) -> Result<Self> {
        Ok(Self {
            reader,
            writer,
            state: CompressState::new(config)?,
            block: Vec::new(),
        })
    }

    /// Run the stream to completion and return the counters
    pub fn run(mut self) -> Result<RepStats> {
        let header = (self.state.params.block_size as u32).to_le_bytes();
        self.writer.write_all(&header)?;
        self.state.stats.out_bytes += 4;

        loop {
            let size = self.fill()?;
            if size == 0 {
                return self.finalize();
            }
            let data_end = self.state.base + size;
            self.state.clear_staging();
            self.state.find_matches(size);
            self.state.finish_cycle(data_end);
            self.emit_block()?;
            self.state.advance(size);
        }
    }

    /// Read up to one cycle's worth of bytes into the window
    fn fill(&mut self) -> Result<usize> {
        let chunk = self.state.next_chunk_len();
        let base = self.state.base;
        let buf = &mut self.state.window[base..base + chunk];
        let mut total = 0;
        while total < buf.len() {
            match self.reader.read(&mut buf[total..]) {
                Ok(0) => break,
                Ok(n) => total += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        self.state.stats.in_bytes += total as u64;
        Ok(total)
    }

    /// Frame the staged records and write them as one block
    ///
    /// Layout: comp_size, num, lens[num], offsets[num], datalens[num+1],
    /// then the literal runs copied straight out of the window. All
    /// words are little-endian.
    fn emit_block(&mut self) -> Result<()> {
        let state = &self.state;
        let num = state.lens.len();
        debug_assert_eq!(state.datalens.len(), num + 1);

        let literal_total: u64 = state.datalens.iter().map(|&d| d as u64).sum();
        let comp_size = 8 + 12 * num as u64 + literal_total;

        self.block.clear();
        self.block.extend_from_slice(&(comp_size as u32).to_le_bytes());
        self.block.extend_from_slice(&(num as u32).to_le_bytes());
        for &len in &state.lens {
            self.block.extend_from_slice(&len.to_le_bytes());
        }
        for &offset in &state.offsets {
            self.block.extend_from_slice(&offset.to_le_bytes());
        }
        for &datalen in &state.datalens {
            self.block.extend_from_slice(&datalen.to_le_bytes());
        }
        for (&data_offset, &datalen) in state.data_offsets.iter().zip(&state.datalens) {
            let from = data_offset as usize;
            self.block
                .extend_from_slice(&state.window[from..from + datalen as usize]);
        }

        self.writer.write_all(&self.block)?;
        self.state.stats.out_bytes += self.block.len() as u64;
        self.state.stats.literal_bytes += literal_total;
        log::debug!(
            "block: {} matches, {} literal bytes, {} framed bytes",
            num,
            literal_total,
            self.block.len()
        );
        Ok(())
    }

    /// Emit the terminal block holding the unscanned tail, then the
    /// 32-bit zero end-of-stream sentinel
    fn finalize(mut self) -> Result<RepStats> {
        self.state.clear_staging();
        let tail = self.state.base - self.state.last_match;
        self.state.data_offsets.push(self.state.last_match as u32);
        self.state.datalens.push(tail as u32);
        self.emit_block()?;

        self.writer.write_all(&0u32.to_le_bytes())?;
        self.state.stats.out_bytes += 4;
        self.writer.flush()?;

        let mut stats = self.state.stats;
        stats.finish();
        Ok(stats)
    }
}
