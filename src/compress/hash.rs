//! Rolling polynomial hash over an L-byte window
//!
//! The hash is advanced one byte at a time with an add-one-drop-one
//! update, so scanning a buffer costs one multiply per byte regardless
//! of the window width. Collisions are acceptable: every candidate the
//! hash produces is verified byte-by-byte before a match is emitted.

/// Multiplier of the polynomial hash
pub const HASH_PRIME: u32 = 153_191;

/// Incremental hash state covering the last L bytes seen
#[derive(Debug, Clone)]
pub struct RollingHash {
    value: u32,
    /// `HASH_PRIME` raised to the window width, mod 2^32
    pow_l: u32,
    window: usize,
}

impl RollingHash {
    /// Create a hash for windows of `window` bytes
    pub fn new(window: usize) -> Self {
        let mut pow_l = 1u32;
        for _ in 0..window {
            pow_l = pow_l.wrapping_mul(HASH_PRIME);
        }
        Self {
            value: 0,
            pow_l,
            window,
        }
    }

    /// Recompute the hash over the first `window` bytes of `bytes`
    pub fn reset(&mut self, bytes: &[u8]) {
        debug_assert!(bytes.len() >= self.window);
        self.value = 0;
        for &b in &bytes[..self.window] {
            self.roll(0, b);
        }
    }

    /// Slide the window one byte: drop `out`, absorb `inn`
    ///
    /// After the call the hash covers the `window` bytes ending at `inn`.
    #[inline(always)]
    pub fn roll(&mut self, out: u8, inn: u8) {
        self.value = self
            .value
            .wrapping_mul(HASH_PRIME)
            .wrapping_add(inn as u32)
            .wrapping_sub((out as u32).wrapping_mul(self.pow_l));
    }

    /// Current hash value
    #[inline(always)]
    pub fn value(&self) -> u32 {
        self.value
    }
}
