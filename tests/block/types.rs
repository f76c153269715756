// Unit tests for the LZVN opcode classifier (src/block/types.rs)
//
// Verifies:
//   - every byte value maps to the category listed in the format tables
//   - the invalid ranges, the no-op and end-of-stream opcodes
//   - operand byte counts per category

use lzvn::block::types::{
    classify, OpcodeType, END_OF_STREAM_OPCODE, GB, KB, LARGE_LENGTH_BIAS, MAX_DISTANCE,
    MAX_LITERAL_LENGTH, MAX_MATCH_LENGTH, MB, MIN_MATCH_LENGTH, OPCODE_TYPES,
};

// ─────────────────────────────────────────────────────────────────────────────
// Fixed opcodes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn end_of_stream_is_only_0x06() {
    assert_eq!(END_OF_STREAM_OPCODE, 0x06);
    for op in 0..=255u8 {
        assert_eq!(classify(op) == OpcodeType::EndOfStream, op == 0x06, "opcode {op:#04x}");
    }
}

#[test]
fn nop_opcodes() {
    let nops: Vec<u8> = (0..=255u8).filter(|&op| classify(op) == OpcodeType::None).collect();
    assert_eq!(nops, vec![0x0e, 0x16]);
}

#[test]
fn invalid_ranges() {
    for op in (0x70..=0x7fu8).chain(0xd0..=0xdf) {
        assert_eq!(classify(op), OpcodeType::Invalid, "opcode {op:#04x}");
    }
    for op in [0x1eu8, 0x26, 0x2e, 0x36, 0x3e] {
        assert_eq!(classify(op), OpcodeType::Invalid, "opcode {op:#04x}");
    }
    let total = OPCODE_TYPES.iter().filter(|&&t| t == OpcodeType::Invalid).count();
    assert_eq!(total, 37);
}

#[test]
fn previous_distance_opcodes() {
    let expected = [0x46u8, 0x4e, 0x56, 0x5e, 0x66, 0x6e, 0x86, 0x8e, 0x96, 0x9e, 0xc6, 0xce];
    let found: Vec<u8> =
        (0..=255u8).filter(|&op| classify(op) == OpcodeType::DistancePrevious).collect();
    assert_eq!(found, expected);
}

// ─────────────────────────────────────────────────────────────────────────────
// Ranges
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn medium_distance_range() {
    for op in 0..=255u8 {
        assert_eq!(
            classify(op) == OpcodeType::DistanceMedium,
            (0xa0..=0xbf).contains(&op),
            "opcode {op:#04x}"
        );
    }
}

#[test]
fn literal_and_match_ranges() {
    assert_eq!(classify(0xe0), OpcodeType::LiteralLarge);
    assert_eq!(classify(0xf0), OpcodeType::MatchLarge);
    for op in 0xe1..=0xefu8 {
        assert_eq!(classify(op), OpcodeType::LiteralSmall);
    }
    for op in 0xf1..=0xffu8 {
        assert_eq!(classify(op), OpcodeType::MatchSmall);
    }
}

#[test]
fn large_distance_opcodes_end_in_111() {
    for op in 0..=255u8 {
        if classify(op) == OpcodeType::DistanceLarge {
            assert_eq!(op & 0x07, 0x07, "opcode {op:#04x}");
        }
    }
    // Eight values per literal-length row, minus the rows shadowed by other ranges.
    assert_eq!(classify(0x07), OpcodeType::DistanceLarge);
    assert_eq!(classify(0x6f), OpcodeType::DistanceLarge);
    assert_eq!(classify(0xcf), OpcodeType::DistanceLarge);
    assert_eq!(classify(0x77), OpcodeType::Invalid);
    assert_eq!(classify(0xa7), OpcodeType::DistanceMedium);
    assert_eq!(classify(0xe7), OpcodeType::LiteralSmall);
}

#[test]
fn small_distance_samples() {
    for op in [0x00u8, 0x05, 0x08, 0x3d, 0x40, 0x6d, 0x80, 0x9d, 0xc0, 0xcd] {
        assert_eq!(classify(op), OpcodeType::DistanceSmall, "opcode {op:#04x}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Operand sizes and constants
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn operand_sizes() {
    for op in 0..=255u8 {
        let t = classify(op);
        let expected = match t {
            OpcodeType::DistanceLarge | OpcodeType::DistanceMedium => 2,
            OpcodeType::DistanceSmall | OpcodeType::LiteralLarge | OpcodeType::MatchLarge => 1,
            _ => 0,
        };
        assert_eq!(t.extra_bytes(), expected, "opcode {op:#04x}");
    }
}

#[test]
fn sets_distance_only_for_distance_forms() {
    assert!(OpcodeType::DistanceLarge.sets_distance());
    assert!(OpcodeType::DistanceMedium.sets_distance());
    assert!(OpcodeType::DistanceSmall.sets_distance());
    assert!(!OpcodeType::DistancePrevious.sets_distance());
    assert!(!OpcodeType::MatchSmall.sets_distance());
    assert!(!OpcodeType::MatchLarge.sets_distance());
}

#[test]
fn length_constants() {
    assert_eq!(MIN_MATCH_LENGTH, 3);
    assert_eq!(LARGE_LENGTH_BIAS, 16);
    assert_eq!(MAX_LITERAL_LENGTH, 271);
    assert_eq!(MAX_MATCH_LENGTH, 271);
    assert_eq!(MAX_DISTANCE, 0xffff);
    assert_eq!((KB, MB, GB), (1 << 10, 1 << 20, 1 << 30));
}

#[test]
fn large_distance_operand_reaches_max_distance() {
    // DistanceLarge with distance 0xffff after 0xffff literal bytes.
    let mut src = Vec::new();
    let mut remaining = MAX_DISTANCE;
    while remaining > 0 {
        let n = remaining.min(MAX_LITERAL_LENGTH);
        src.push(0xe0);
        src.push((n - LARGE_LENGTH_BIAS) as u8);
        src.extend(std::iter::repeat(b'q').take(n));
        remaining -= n;
    }
    src.extend_from_slice(&[0x07, 0xff, 0xff, 0x06]);
    let out = lzvn::decompress_block_to_vec(&src, MAX_DISTANCE + 3).unwrap();
    assert_eq!(out.len(), MAX_DISTANCE + 3);
}
