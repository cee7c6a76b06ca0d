//! Long-range match finding over the sliding window
//!
//! The scan visits one position per byte inside a probe burst of `test`
//! positions, then skips in k-sized steps to the next L-aligned
//! position. Anchors are inserted at every k-aligned position along the
//! way, so any duplicated region of at least L bytes is covered by one
//! probe/anchor phase alignment. Candidates returned by the table are
//! verified by extending the match byte-by-byte in both directions
//! under the wrap bounds of the ring.

use super::state::CompressState;

impl CompressState {
    /// Scan the `size` bytes just read at `base`, appending match and
    /// literal-run records to the staging arrays
    pub fn find_matches(&mut self, size: usize) {
        let l = self.params.l;
        let k = self.params.k;
        let k_mask = self.params.k_mask;
        let test = self.params.test;
        let data_end = self.base + size;

        let mut i = self.last_i;
        if i + 2 * l >= data_end {
            self.last_i = i;
            return;
        }
        self.hash.reset(&self.window[i..]);

        while i + 2 * l < data_end {
            // probe burst: one table lookup per byte
            for _ in 0..test {
                if i >= self.last_match {
                    if let Some(m) = self.table.probe(self.hash.value()) {
                        let m = m as usize;
                        // entries inside the just-read region point at
                        // data that this cycle overwrote
                        if !(m >= i && m < data_end) {
                            self.try_match(i, m, data_end);
                        }
                    }
                }
                if i & k_mask == 0 {
                    self.table.insert(i as u32, self.hash.value());
                }
                self.hash.roll(self.window[i], self.window[i + l]);
                i += 1;
            }
            // skip in k-steps to the next L boundary, still indexing
            while i & (l - 1) != 0 {
                if i & k_mask == 0 {
                    self.table.insert(i as u32, self.hash.value());
                }
                for j in 0..k {
                    self.hash.roll(self.window[i + j], self.window[i + j + l]);
                }
                i += k;
            }
        }
        self.last_i = i;
    }

    /// Verify a candidate and record the match if it is long enough
    ///
    /// `m` is the anchor position; callers guarantee `m < i` or
    /// `m >= data_end`, so the source bytes for destination position p
    /// sit at `p + m - i` without further wrap correction.
    fn try_match(&mut self, i: usize, m: usize, data_end: usize) {
        let b = self.params.block_size;

        // extension range within the ring: the source run must not drop
        // below the in-flight read region, nor wrap past the buffer end
        let low_bound = if m < i {
            i - m
        } else if m - data_end > i {
            0
        } else {
            i - (m - data_end)
        };
        let high_bound = b - m + i;

        let floor = self.last_match.max(low_bound);
        let mut start = i;
        while start > floor && self.window[start - 1] == self.window[start - 1 + m - i] {
            start -= 1;
        }

        let ceil = data_end.min(high_bound);
        let mut end = i;
        while end < ceil && self.window[end] == self.window[end + m - i] {
            end += 1;
        }

        let offset = (i + b - m) % b;
        let required = if offset < self.params.barrier {
            self.params.min_len
        } else {
            self.params.smallest_len
        };

        if end - start >= required {
            self.data_offsets.push(self.last_match as u32);
            self.datalens.push((start - self.last_match) as u32);
            self.offsets.push(offset as u32);
            self.lens.push((end - start) as u32);
            self.stats.match_count += 1;
            self.stats.match_bytes += (end - start) as u64;
            self.last_match = end;
        }
    }

    /// Append the trailing literal record that closes the cycle's block
    ///
    /// `datalens` must end up one entry longer than `lens`. At a buffer
    /// boundary everything up to the end of the window is flushed so
    /// the cursor reset cannot orphan bytes; otherwise the run covers
    /// the span between the last committed position and the scan stop.
    pub fn finish_cycle(&mut self, data_end: usize) {
        if data_end == self.params.block_size {
            self.data_offsets.push(self.last_match as u32);
            self.datalens
                .push((self.params.block_size - self.last_match) as u32);
            self.last_match = self.params.block_size;
        } else if self.last_match > self.last_i {
            // a match ran past the scan stop; keep the arrays aligned
            self.data_offsets.push(self.last_match as u32);
            self.datalens.push(0);
        } else {
            self.data_offsets.push(self.last_match as u32);
            self.datalens.push((self.last_i - self.last_match) as u32);
            self.last_match = self.last_i;
        }
    }
}
