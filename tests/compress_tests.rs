//! End-to-end tests for REP compression
//!
//! These tests drive the compressor over characteristic inputs (long
//! runs, far-apart duplicates, incompressible noise, ring-wrapping
//! streams) and verify both the reconstruction and the shape of the
//! emitted match records.

use replib::{
    compress_bytes, compress_stream, decompress_bytes, decompress_stream, RepConfig, RepStats,
};
use std::io::{Cursor, Read};

/// Deterministic incompressible filler
fn pseudo_random(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 24) as u8
        })
        .collect()
}

fn compress_with_stats(data: &[u8], config: &RepConfig) -> (Vec<u8>, RepStats) {
    let mut packed = Vec::new();
    let stats = compress_stream(Cursor::new(data), &mut packed, config).unwrap();
    (packed, stats)
}

fn assert_round_trip(data: &[u8], config: &RepConfig) -> RepStats {
    let (packed, stats) = compress_with_stats(data, config);
    let unpacked = decompress_bytes(&packed).unwrap();
    assert_eq!(data, &unpacked[..], "round trip failed");
    assert_eq!(stats.in_bytes, data.len() as u64);
    assert_eq!(stats.out_bytes, packed.len() as u64);
    stats
}

#[test]
fn test_long_single_byte_run() {
    let config = RepConfig {
        block_size: 1 << 20,
        min_len: 32,
        smallest_len: 32,
        ..RepConfig::default()
    };
    let data = vec![b'A'; 100_000];
    let stats = assert_round_trip(&data, &config);

    // one short literal prefix, matches for everything else
    assert!(stats.match_count >= 1);
    assert!(stats.literal_bytes <= 64);
    assert!(stats.match_bytes >= 99_000);
}

#[test]
fn test_incompressible_noise_passes_through() {
    let config = RepConfig {
        block_size: 1 << 20,
        min_len: 32,
        smallest_len: 32,
        ..RepConfig::default()
    };
    let data = pseudo_random(256 * 1024, 0xDEAD_BEEF);
    let (packed, stats) = compress_with_stats(&data, &config);

    assert_eq!(stats.match_count, 0);
    // stream is the data plus framing
    assert!(packed.len() >= data.len());
    assert!(packed.len() < data.len() + 2048);
    assert_eq!(decompress_bytes(&packed).unwrap(), data);
}

#[test]
fn test_megabyte_duplicate_two_megabytes_apart() {
    let config = RepConfig {
        block_size: 4 << 20,
        min_len: 512,
        smallest_len: 512,
        ..RepConfig::default()
    };
    let first = pseudo_random(1 << 20, 11);
    let second = pseudo_random(1 << 20, 22);
    let mut data = first.clone();
    data.extend_from_slice(&second);
    data.extend_from_slice(&first);

    let (packed, stats) = compress_with_stats(&data, &config);
    assert_eq!(stats.match_count, 1);
    assert!(stats.match_bytes >= 1 << 20);
    assert_eq!(decompress_bytes(&packed).unwrap(), data);

    // the single record points exactly two megabytes back
    let (lens, offsets) = first_block_records(&packed);
    assert_eq!(offsets, vec![2 << 20]);
    assert!(lens[0] >= 1 << 20);
    assert!(lens[0] < (1 << 20) + 64);
}

#[test]
fn test_repeated_block_across_ring_wraps() {
    let config = RepConfig {
        block_size: 1 << 20,
        min_len: 32,
        smallest_len: 32,
        barrier: 64 * 1024,
        ..RepConfig::default()
    };
    let unit = pseudo_random(64 * 1024, 7);
    let mut data = Vec::new();
    for _ in 0..64 {
        data.extend_from_slice(&unit);
    }

    let stats = assert_round_trip(&data, &config);
    assert!(stats.match_count >= 20);
    assert!(stats.match_bytes >= data.len() as u64 - 200_000);
    assert!(stats.literal_bytes < 200_000);
}

#[test]
fn test_short_period_text() {
    let config = RepConfig {
        block_size: 4 << 20,
        min_len: 32,
        smallest_len: 32,
        ..RepConfig::default()
    };
    let data = b"ABCDEFGH".repeat(200_000);
    let stats = assert_round_trip(&data, &config);
    assert!(stats.match_bytes >= data.len() as u64 - 1000);
}

#[test]
fn test_match_across_window_wrap() {
    // the duplicate shows up one slide cycle after the window wrapped,
    // referencing data still parked at the top of the ring
    let config = RepConfig {
        block_size: 65_536,
        min_len: 512,
        smallest_len: 512,
        hash_bits: 16,
        ..RepConfig::default()
    };
    let mut data = pseudo_random(65_536, 31);
    let copy = data[40_000..44_096].to_vec();
    data.extend_from_slice(&copy);
    data.extend_from_slice(&pseudo_random(4_096, 99));

    let stats = assert_round_trip(&data, &config);
    assert_eq!(stats.match_count, 1);
    assert!(stats.match_bytes >= 4_096);
    assert!(stats.match_bytes < 4_200);
}

#[test]
fn test_barrier_distance_switches_required_length() {
    let base_config = RepConfig {
        block_size: 65_536,
        min_len: 512,
        smallest_len: 64,
        barrier: 1024,
        hash_bits: 16,
        ..RepConfig::default()
    };

    // 128-byte duplicate just inside the barrier: needs 512, dropped
    let mut near = pseudo_random(5000, 41);
    let src = near[1977..2105].to_vec();
    near[3000..3128].copy_from_slice(&src);
    let stats = assert_round_trip(&near, &base_config);
    assert_eq!(stats.match_count, 0);

    // the same duplicate at the barrier: needs only 64, emitted
    let mut far = pseudo_random(5000, 42);
    let src = far[1976..2104].to_vec();
    far[3000..3128].copy_from_slice(&src);
    let stats = assert_round_trip(&far, &base_config);
    assert_eq!(stats.match_count, 1);
    assert!(stats.match_bytes >= 128);
    assert!(stats.match_bytes < 192);
}

#[test]
fn test_streaming_matches_in_memory_output() {
    /// Reader that trickles bytes out a few at a time
    struct Trickle<'a> {
        data: &'a [u8],
        pos: usize,
    }
    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = buf.len().min(7).min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    let config = RepConfig {
        block_size: 8192,
        min_len: 32,
        smallest_len: 32,
        ..RepConfig::default()
    };
    let data = b"stream me, stream me again, ".repeat(400);

    let expected = compress_bytes(&data, &config).unwrap();
    let mut trickled = Vec::new();
    compress_stream(Trickle { data: &data, pos: 0 }, &mut trickled, &config).unwrap();
    assert_eq!(expected, trickled);

    let mut out = Vec::new();
    decompress_stream(Cursor::new(&trickled), &mut out).unwrap();
    assert_eq!(out, data);
}

#[test]
fn test_empty_and_tiny_inputs() {
    let config = RepConfig {
        block_size: 4096,
        min_len: 32,
        smallest_len: 32,
        ..RepConfig::default()
    };
    for data in [&b""[..], &b"x"[..], &b"hello world"[..]] {
        assert_round_trip(data, &config);
    }
}

#[test]
fn test_input_exactly_one_window() {
    let config = RepConfig {
        block_size: 4096,
        min_len: 32,
        smallest_len: 32,
        ..RepConfig::default()
    };
    let data = pseudo_random(4096, 17);
    assert_round_trip(&data, &config);
}

/// Parse the first block of a stream into its (lens, offsets) arrays
fn first_block_records(stream: &[u8]) -> (Vec<u32>, Vec<u32>) {
    let word = |at: usize| u32::from_le_bytes(stream[at..at + 4].try_into().unwrap());
    let num = word(8) as usize;
    let lens = (0..num).map(|j| word(12 + 4 * j)).collect();
    let offsets = (0..num).map(|j| word(12 + 4 * num + 4 * j)).collect();
    (lens, offsets)
}
