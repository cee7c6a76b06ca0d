//! Decompression output window
//!
//! The decoder reconstructs the stream into a logical ring of
//! `block_size` bytes so that every match source up to a full window
//! back stays addressable. The ring is backed by one segment when a
//! single allocation of the full window succeeds, or by two smaller
//! segments otherwise; both layouts behave identically. A segment is
//! flushed through the writer only when it fills (or at end of stream),
//! and its contents keep serving as copy sources afterwards.

use crate::common::{try_zeroed, RepError, Result};
use std::io::Write;

/// Two-segment output ring of the decoder
#[derive(Debug)]
pub struct DecompressState {
    /// Logical window size B, read from the stream prologue
    pub block_size: usize,
    /// Segment backing logical positions `[0, seg0.len())`
    seg0: Vec<u8>,
    /// Segment backing logical positions `[seg0.len(), block_size)`
    seg1: Vec<u8>,
    /// Whether the write head is inside segment 0
    in_seg0: bool,
    /// Write index within the current segment
    pos: usize,
    /// Total bytes reconstructed so far
    pub total_out: u64,
}

impl DecompressState {
    /// Allocate the output window
    ///
    /// A single full-window segment is preferred; if that allocation
    /// fails an even two-segment split is attempted before giving up.
    pub fn new(block_size: usize) -> Result<Self> {
        let (seg0, seg1) = match try_zeroed::<u8>(block_size) {
            Ok(seg0) => (seg0, Vec::new()),
            Err(_) => {
                let half = block_size / 2;
                (try_zeroed(half)?, try_zeroed(block_size - half)?)
            }
        };
        Ok(Self {
            block_size,
            seg0,
            seg1,
            in_seg0: true,
            pos: 0,
            total_out: 0,
        })
    }

    #[cfg(test)]
    pub(crate) fn with_segments(seg0_len: usize, seg1_len: usize) -> Self {
        Self {
            block_size: seg0_len + seg1_len,
            seg0: vec![0; seg0_len],
            seg1: vec![0; seg1_len],
            in_seg0: true,
            pos: 0,
            total_out: 0,
        }
    }

    fn cur_len(&self) -> usize {
        if self.in_seg0 {
            self.seg0.len()
        } else {
            self.seg1.len()
        }
    }

    /// Absolute write position within the logical window
    fn data_pos(&self) -> usize {
        if self.in_seg0 {
            self.pos
        } else {
            self.seg0.len() + self.pos
        }
    }

    /// Write out the filled current segment and move the head onward
    ///
    /// With a lone full-window segment the head re-enters it from the
    /// top, preserving the last `block_size` bytes as copy sources.
    fn flush_segment<W: Write>(&mut self, writer: &mut W) -> Result<()> {
        debug_assert_eq!(self.pos, self.cur_len());
        if self.in_seg0 {
            writer.write_all(&self.seg0)?;
            if !self.seg1.is_empty() {
                self.in_seg0 = false;
            }
        } else {
            writer.write_all(&self.seg1)?;
            self.in_seg0 = true;
        }
        self.pos = 0;
        Ok(())
    }

    /// Write out whatever the current segment holds past its last flush
    pub fn flush_pending<W: Write>(&mut self, writer: &mut W) -> Result<()> {
        let seg = if self.in_seg0 { &self.seg0 } else { &self.seg1 };
        writer.write_all(&seg[..self.pos])?;
        Ok(())
    }

    /// Append a run of literal bytes to the window
    pub fn copy_literals<W: Write>(&mut self, writer: &mut W, mut src: &[u8]) -> Result<()> {
        while !src.is_empty() {
            if self.pos == self.cur_len() {
                self.flush_segment(writer)?;
                continue;
            }
            let n = src.len().min(self.cur_len() - self.pos);
            let pos = self.pos;
            let seg = if self.in_seg0 {
                &mut self.seg0
            } else {
                &mut self.seg1
            };
            seg[pos..pos + n].copy_from_slice(&src[..n]);
            self.pos += n;
            self.total_out += n as u64;
            src = &src[n..];
        }
        Ok(())
    }

    /// Replay `len` bytes from `offset` positions back in the window
    ///
    /// Each sub-copy is bounded by the room left in the destination
    /// segment, the room left in the source segment, and the remaining
    /// length. A same-segment copy whose source overlaps the
    /// destination runs byte-by-byte so that freshly written bytes feed
    /// the rest of the run.
    pub fn expand_match<W: Write>(
        &mut self,
        writer: &mut W,
        offset: usize,
        len: usize,
    ) -> Result<()> {
        if offset == 0 || offset > self.block_size {
            return Err(RepError::CorruptInput(format!(
                "match offset {offset} outside the window"
            )));
        }
        if offset as u64 > self.total_out {
            return Err(RepError::CorruptInput(format!(
                "match offset {offset} reaches before the start of the stream"
            )));
        }

        let mut remaining = len;
        while remaining > 0 {
            if self.pos == self.cur_len() {
                self.flush_segment(writer)?;
                continue;
            }
            let d0 = self.seg0.len();
            let from_pos = (self.data_pos() + self.block_size - offset) % self.block_size;
            let (src_in_seg0, src_idx) = if from_pos < d0 {
                (true, from_pos)
            } else {
                (false, from_pos - d0)
            };
            let src_room = if src_in_seg0 {
                d0 - src_idx
            } else {
                self.seg1.len() - src_idx
            };
            let n = remaining.min(self.cur_len() - self.pos).min(src_room);
            let pos = self.pos;

            if src_in_seg0 == self.in_seg0 {
                let seg = if self.in_seg0 {
                    &mut self.seg0
                } else {
                    &mut self.seg1
                };
                if offset < n {
                    for t in 0..n {
                        seg[pos + t] = seg[src_idx + t];
                    }
                } else {
                    seg.copy_within(src_idx..src_idx + n, pos);
                }
            } else if src_in_seg0 {
                self.seg1[pos..pos + n].copy_from_slice(&self.seg0[src_idx..src_idx + n]);
            } else {
                self.seg0[pos..pos + n].copy_from_slice(&self.seg1[src_idx..src_idx + n]);
            }

            self.pos += n;
            self.total_out += n as u64;
            remaining -= n;
        }
        Ok(())
    }
}
