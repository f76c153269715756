//! E2E Test Suite 01: Block One-Shot API
//!
//! Drives the public decode functions with complete compressed blocks:
//! - decompress
//! - decompress_sized
//! - decompress_block_to_vec
//!
//! Compressed inputs are either hand-assembled byte vectors or the output of
//! the test encoder in tests/support.

#[path = "../tests/support/encoder.rs"]
mod encoder;

use lzvn::{decompress, decompress_block_to_vec, decompress_sized};

use encoder::{encode, mixed_corpus, noise};

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: minimal streams
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_single_literal_then_end_of_stream() {
    let mut dst = [0u8; 16];
    let written = decompress(&[0xe1, 0x41, 0x06], &mut dst).expect("valid stream");
    assert_eq!(written, 1);
    assert_eq!(&dst[..1], b"A");
}

#[test]
fn test_empty_input_writes_nothing() {
    let mut dst = [0xaau8; 16];
    assert_eq!(decompress(&[], &mut dst), Ok(0));
    assert!(dst.iter().all(|&b| b == 0xaa), "output must be untouched");
}

#[test]
fn test_run_length_expansion() {
    // DistanceSmall: one folded literal 'A', match length 4, distance 1.
    let out = decompress_block_to_vec(&[0x48, 0x01, b'A', 0x06], 64).unwrap();
    assert_eq!(out, b"AAAAA");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: round trips
// ─────────────────────────────────────────────────────────────────────────────

fn assert_round_trip(data: &[u8]) {
    let compressed = encode(data);
    let mut dst = vec![0u8; data.len()];
    let written = decompress(&compressed, &mut dst).expect("round trip should decode");
    assert_eq!(written, data.len());
    assert_eq!(dst, data);
}

#[test]
fn test_round_trip_text_blocks() {
    for len in [1usize, 100, 4096, 65_536, 300_000] {
        assert_round_trip(&mixed_corpus(len));
    }
}

#[test]
fn test_round_trip_repeated_sentence() {
    assert_round_trip(&b"The quick brown fox jumps over the lazy dog. ".repeat(200));
}

#[test]
fn test_round_trip_incompressible() {
    assert_round_trip(&noise(100_000, 0xdead_beef));
}

#[test]
fn test_round_trip_long_distance() {
    // The repeat sits 20000 bytes back, which needs the large distance form.
    let mut data = noise(20_000, 3);
    let head = data[..2_000].to_vec();
    data.extend_from_slice(&head);

    let compressed = encode(&data);
    assert!(
        compressed.len() < 20_400,
        "long-distance repeat was not matched: {} bytes",
        compressed.len()
    );
    assert_eq!(decompress_block_to_vec(&compressed, data.len()).unwrap(), data);
}

#[test]
fn test_round_trip_medium_distance() {
    let mut data = noise(5_000, 11);
    let head = data[..500].to_vec();
    data.extend_from_slice(&head);
    assert_round_trip(&data);
}

#[test]
fn test_round_trip_binary_runs() {
    let mut data = Vec::new();
    for byte in 0..=255u8 {
        data.extend(std::iter::repeat(byte).take(byte as usize + 1));
    }
    assert_round_trip(&data);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: output capacity
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_larger_buffer_reports_exact_length() {
    let data = mixed_corpus(10_000);
    let out = decompress_block_to_vec(&encode(&data), 1 << 20).unwrap();
    assert_eq!(out, data);
}

#[test]
fn test_capacity_stop_ignores_remaining_input() {
    // Two literal runs; capacity only holds the first.
    let src = [0xe3, b'a', b'b', b'c', 0xe3, b'd', b'e', b'f', 0x06];
    let mut dst = [0u8; 3];
    assert_eq!(decompress(&src, &mut dst), Ok(3));
    assert_eq!(&dst, b"abc");
}

#[test]
fn test_capacity_stop_ignores_trailing_garbage() {
    // Whatever follows is never read once the output is full.
    let src = [0xe2, b'o', b'k', 0x72, 0xd0];
    let mut dst = [0u8; 2];
    assert_eq!(decompress(&src, &mut dst), Ok(2));
}

#[test]
fn test_sized_reports_produced_bytes() {
    let data = mixed_corpus(3_000);
    let compressed = encode(&data);
    let mut dst = vec![0u8; 8_192];
    let mut size = dst.len();
    decompress_sized(&compressed, compressed.len(), &mut dst, &mut size).unwrap();
    assert_eq!(size, data.len());
    assert_eq!(&dst[..size], &data[..]);
}
