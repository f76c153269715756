//! E2E Test Suite 02: Error Handling & Malformed Input
//!
//! Every malformed block must come back as a `DecompressError` naming the
//! failing opcode, never as a panic, an out-of-range access or a hang.
//!
//! Coverage:
//! - reserved opcodes
//! - operands cut off by the end of the block
//! - literal runs past either buffer
//! - matches without a usable distance or reaching before the output start
//! - arbitrary garbage and corrupted valid streams

#[path = "../tests/support/encoder.rs"]
mod encoder;

use lzvn::{
    classify, decompress, decompress_block_to_vec, DecompressError, OpcodeType, OutOfBounds,
};

use encoder::{encode, mixed_corpus, noise};

fn oob(offset: usize, kind: OutOfBounds) -> Result<usize, DecompressError> {
    Err(DecompressError::OutOfBounds { offset, kind })
}

// ═════════════════════════════════════════════════════════════════════════════
// Test 1: reserved opcodes
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_every_invalid_opcode_is_rejected_untouched() {
    for opcode in (0..=255u8).filter(|&b| classify(b) == OpcodeType::Invalid) {
        let mut dst = [0x55u8; 8];
        // Trailing bytes would be valid operands for a real instruction.
        let src = [opcode, 0x01, 0x02, 0x06];
        assert_eq!(
            decompress(&src, &mut dst),
            Err(DecompressError::InvalidOpcode { offset: 0, opcode }),
            "opcode {opcode:#04x}"
        );
        assert!(dst.iter().all(|&b| b == 0x55), "opcode {opcode:#04x} wrote output");
    }
}

#[test]
fn test_invalid_opcode_offset_after_valid_prefix() {
    let mut dst = [0u8; 16];
    assert_eq!(
        decompress(&[0xe2, b'h', b'i', 0xd7], &mut dst),
        Err(DecompressError::InvalidOpcode { offset: 3, opcode: 0xd7 })
    );
}

// ═════════════════════════════════════════════════════════════════════════════
// Test 2: truncation
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_truncated_operands() {
    let cases: &[(&[u8], usize, u8)] = &[
        (&[0x07], 0, 0x07),                   // DistanceLarge, no operands
        (&[0x07, 0x01], 0, 0x07),             // DistanceLarge, one of two
        (&[0xa0, 0x00], 0, 0xa0),             // DistanceMedium, one of two
        (&[0x00], 0, 0x00),                   // DistanceSmall
        (&[0xe0], 0, 0xe0),                   // LiteralLarge
        (&[0xe1, b'x', 0xf0], 2, 0xf0),       // MatchLarge after a literal
    ];
    for &(src, offset, opcode) in cases {
        let mut dst = [0u8; 64];
        assert_eq!(
            decompress(src, &mut dst),
            Err(DecompressError::TruncatedInput { offset, opcode }),
            "{src:02x?}"
        );
    }
}

#[test]
fn test_literal_run_past_input() {
    let mut dst = [0u8; 64];
    assert_eq!(decompress(&[0xe5, b'a', b'b'], &mut dst), oob(0, OutOfBounds::LiteralPastInput));
    assert_eq!(decompress(&[0xe0, 0x00, b'a'], &mut dst), oob(0, OutOfBounds::LiteralPastInput));
}

#[test]
fn test_truncated_encoder_output_never_panics() {
    let data = mixed_corpus(4_000);
    let compressed = encode(&data);
    for cut in 0..compressed.len() {
        let mut dst = vec![0u8; data.len()];
        match decompress(&compressed[..cut], &mut dst) {
            // Cutting on an instruction boundary is a clean early stop.
            Ok(n) => assert_eq!(&dst[..n], &data[..n], "cut {cut}"),
            Err(DecompressError::TruncatedInput { .. })
            | Err(DecompressError::OutOfBounds { kind: OutOfBounds::LiteralPastInput, .. }) => {}
            Err(e) => panic!("cut {cut}: unexpected {e}"),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Test 3: bad matches
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_match_as_first_token() {
    let mut dst = [0u8; 64];
    // DistanceSmall with distance 1 and no literals: nothing to copy from.
    assert_eq!(decompress(&[0x00, 0x01], &mut dst), oob(0, OutOfBounds::DistancePastOutput));
}

#[test]
fn test_match_reaching_before_output_start() {
    let mut dst = [0u8; 64];
    // Two literals, then distance 3.
    assert_eq!(
        decompress(&[0xe2, b'a', b'b', 0x00, 0x03], &mut dst),
        oob(3, OutOfBounds::DistancePastOutput)
    );
}

#[test]
fn test_previous_distance_before_any_distance() {
    let mut dst = [0u8; 64];
    // DistancePrevious folding one literal, then a bare small match.
    assert_eq!(decompress(&[0x46, b'a'], &mut dst), oob(0, OutOfBounds::InvalidDistance));
    assert_eq!(decompress(&[0xe1, b'a', 0xf3], &mut dst), oob(2, OutOfBounds::InvalidDistance));
}

#[test]
fn test_zero_distance() {
    let mut dst = [0u8; 64];
    assert_eq!(
        decompress(&[0xe1, b'a', 0x00, 0x00], &mut dst),
        oob(2, OutOfBounds::InvalidDistance)
    );
}

#[test]
fn test_match_past_output() {
    // 'a' then distance 1 length 3 in a 3-byte buffer.
    let mut dst = [0u8; 3];
    assert_eq!(
        decompress(&[0xe1, b'a', 0x00, 0x01], &mut dst),
        oob(2, OutOfBounds::MatchPastOutput)
    );
    // With the output already full the match is never read.
    assert_eq!(decompress(&[0xe1, b'a', 0xfa], &mut [0u8; 1]), Ok(1));
}

#[test]
fn test_literal_past_output() {
    let mut dst = [0u8; 2];
    assert_eq!(
        decompress(&[0xe3, b'a', b'b', b'c', 0x06], &mut dst),
        oob(0, OutOfBounds::LiteralPastOutput)
    );
}

// ═════════════════════════════════════════════════════════════════════════════
// Test 4: garbage
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_random_garbage_never_panics() {
    for seed in 1..200u64 {
        let src = noise(512, seed);
        let _ = decompress_block_to_vec(&src, 4_096);
    }
}

#[test]
fn test_bit_flipped_streams_never_panic() {
    let data = mixed_corpus(2_048);
    let compressed = encode(&data);
    for i in 0..compressed.len() {
        for bit in [0x01u8, 0x10, 0x80] {
            let mut corrupt = compressed.clone();
            corrupt[i] ^= bit;
            if let Ok(out) = decompress_block_to_vec(&corrupt, data.len()) {
                assert!(out.len() <= data.len());
            }
        }
    }
}

#[test]
fn test_error_messages_name_the_offset() {
    let err = decompress_block_to_vec(&[0xe1, b'x', 0x7e], 8).unwrap_err();
    assert_eq!(err.to_string(), "invalid opcode 0x7e at offset 2");

    let err = decompress_block_to_vec(&[0x00, 0x05], 8).unwrap_err();
    assert_eq!(
        err.to_string(),
        "out of bounds at offset 0: distance exceeds uncompressed data offset"
    );
}
