//! Streaming decompression driver
//!
//! The driver reads the block-size prologue, then one framed block at a
//! time: compressed size, match count, the three length/offset arrays,
//! and the literal runs. Literals and matches are replayed in order
//! into the output window, so every write hands the writer a strict
//! prefix of the reconstructed stream. A zero compressed size is the
//! end-of-stream sentinel.

use super::state::DecompressState;
use crate::common::{RepError, RepStats, Result, MAX_BLOCK_SIZE};
use std::io::{Read, Write};

/// One-shot decompressor pumping a reader into a writer
#[derive(Debug)]
pub struct Decompressor<R: Read, W: Write> {
    reader: R,
    writer: W,
    /// Scratch holding one framed block at a time
    scratch: Vec<u8>,
    stats: RepStats,
}

impl<R: Read, W: Write> Decompressor<R, W> {
    /// Create a decompressor; all tuning is recovered from the stream
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            scratch: Vec::new(),
            stats: RepStats::default(),
        }
    }

    /// Run the stream to completion and return the counters
    pub fn run(mut self) -> Result<RepStats> {
        let block_size = self.read_word()? as usize;
        if block_size == 0 || block_size > MAX_BLOCK_SIZE {
            return Err(RepError::CorruptInput(format!(
                "bad window size {block_size} in stream header"
            )));
        }
        self.stats.in_bytes += 4;
        let mut state = DecompressState::new(block_size)?;

        loop {
            let comp_size = self.read_word()? as u64;
            self.stats.in_bytes += 4;
            if comp_size == 0 {
                break;
            }
            // a well-formed block never exceeds its window plus framing
            if comp_size < 8 || comp_size > 13 * block_size as u64 + 64 {
                return Err(RepError::CorruptInput(format!(
                    "implausible block size {comp_size}"
                )));
            }
            self.read_block(comp_size as usize)?;
            self.process_block(&mut state)?;
        }

        state.flush_pending(&mut self.writer)?;
        self.writer.flush()?;

        let mut stats = self.stats;
        stats.out_bytes = state.total_out;
        stats.finish();
        Ok(stats)
    }

    fn read_word(&mut self) -> Result<u32> {
        let mut word = [0u8; 4];
        self.reader.read_exact(&mut word)?;
        Ok(u32::from_le_bytes(word))
    }

    /// Pull one block body into the scratch buffer
    fn read_block(&mut self, comp_size: usize) -> Result<()> {
        self.scratch.clear();
        self.scratch
            .try_reserve(comp_size)
            .map_err(|_| RepError::OutOfMemory)?;
        self.scratch.resize(comp_size, 0);
        self.reader.read_exact(&mut self.scratch)?;
        self.stats.in_bytes += comp_size as u64;
        Ok(())
    }

    /// Validate the block framing and replay its records
    fn process_block(&mut self, state: &mut DecompressState) -> Result<()> {
        let word_at = |buf: &[u8], at: usize| -> u32 {
            u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
        };

        let num = word_at(&self.scratch, 0) as usize;
        let arrays_end = 8u64 + 12 * num as u64;
        if arrays_end > self.scratch.len() as u64 {
            return Err(RepError::CorruptInput(format!(
                "match count {num} inconsistent with block size"
            )));
        }
        let lens_at = 4;
        let offsets_at = 4 + 4 * num;
        let datalens_at = 4 + 8 * num;
        let literals_at = 8 + 12 * num;

        let literal_total: u64 = (0..=num)
            .map(|j| word_at(&self.scratch, datalens_at + 4 * j) as u64)
            .sum();
        if literal_total != (self.scratch.len() - literals_at) as u64 {
            return Err(RepError::CorruptInput(
                "literal runs disagree with block size".into(),
            ));
        }

        let mut lit_cursor = literals_at;
        for j in 0..num {
            let datalen = word_at(&self.scratch, datalens_at + 4 * j) as usize;
            state.copy_literals(
                &mut self.writer,
                &self.scratch[lit_cursor..lit_cursor + datalen],
            )?;
            lit_cursor += datalen;

            let offset = word_at(&self.scratch, offsets_at + 4 * j) as usize;
            let len = word_at(&self.scratch, lens_at + 4 * j) as usize;
            state.expand_match(&mut self.writer, offset, len)?;
            self.stats.match_count += 1;
            self.stats.match_bytes += len as u64;
        }
        let tail = word_at(&self.scratch, datalens_at + 4 * num) as usize;
        state.copy_literals(&mut self.writer, &self.scratch[lit_cursor..lit_cursor + tail])?;
        self.stats.literal_bytes += literal_total;

        log::debug!(
            "block: {} matches, {} literal bytes, {} written so far",
            num,
            literal_total,
            state.total_out
        );
        Ok(())
    }
}
