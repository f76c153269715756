// Unit tests for parallel block decoding (src/block/batch.rs)

use lzvn::block::batch::{decompress_batch, decompress_batch_uniform};
use lzvn::block::decompress_core::{DecompressError, OutOfBounds};

use crate::encoder::{encode, encode_literal_pieces, mixed_corpus, noise};

#[test]
fn batch_round_trip_preserves_order() {
    let inputs: Vec<Vec<u8>> = vec![
        mixed_corpus(10_000),
        noise(3_000, 7),
        b"Short".to_vec(),
        vec![0u8; 20_000],
        Vec::new(),
    ];
    let compressed: Vec<Vec<u8>> = inputs.iter().map(|d| encode(d)).collect();
    let refs: Vec<&[u8]> = compressed.iter().map(Vec::as_slice).collect();
    let capacities: Vec<usize> = inputs.iter().map(Vec::len).collect();

    let decoded = decompress_batch(&refs, &capacities);
    assert_eq!(decoded.len(), inputs.len());
    for (i, result) in decoded.into_iter().enumerate() {
        assert_eq!(result.as_deref(), Ok(inputs[i].as_slice()), "block {i}");
    }
}

#[test]
fn batch_failure_is_isolated() {
    let good = encode(b"good good good good");
    let inputs: Vec<&[u8]> = vec![good.as_slice(), &[0x7f][..], good.as_slice()];
    let decoded = decompress_batch_uniform(&inputs, 64);
    assert_eq!(decoded[0].as_deref(), Ok(&b"good good good good"[..]));
    assert_eq!(
        decoded[1],
        Err(DecompressError::InvalidOpcode { offset: 0, opcode: 0x7f })
    );
    assert_eq!(decoded[2].as_deref(), Ok(&b"good good good good"[..]));
}

#[test]
fn batch_empty() {
    assert!(decompress_batch(&[], &[]).is_empty());
    assert!(decompress_batch_uniform(&[], 16).is_empty());
}

#[test]
fn batch_uniform_caps_every_block() {
    // Four-byte literal runs: a capacity of 8 ends on an instruction boundary.
    let data = mixed_corpus(4_000);
    let compressed = encode_literal_pieces(&data, 4);
    let inputs: Vec<&[u8]> = vec![compressed.as_slice(); 8];
    for result in decompress_batch_uniform(&inputs, 8) {
        assert_eq!(result.unwrap(), &data[..8]);
    }
}

#[test]
fn batch_uniform_capacity_inside_literal_run() {
    let data = mixed_corpus(4_000);
    let compressed = encode_literal_pieces(&data, 4);
    let inputs: Vec<&[u8]> = vec![compressed.as_slice(); 4];
    for result in decompress_batch_uniform(&inputs, 6) {
        assert_eq!(
            result,
            Err(DecompressError::OutOfBounds { offset: 5, kind: OutOfBounds::LiteralPastOutput })
        );
    }
}
