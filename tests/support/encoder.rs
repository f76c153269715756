// Test-only LZVN encoder.
//
// Greedy single-candidate matcher that produces valid (not optimal) LZVN
// streams.  It deliberately uses every opcode form the decoder understands:
// small/medium/large distances, previous-distance replays, literals folded
// into match opcodes, and the small/large literal and match extensions.

#![allow(dead_code)]

use lzvn::block::types::{
    LARGE_LENGTH_BIAS, MAX_DISTANCE, MAX_LITERAL_LENGTH, MAX_MATCH_LENGTH,
    MIN_MATCH_LENGTH as MIN_MATCH,
};

const HASH_BITS: u32 = 14;

/// Largest match-field value (`length - 3`) usable in the 3-bit forms for a
/// given folded literal count; larger values collide with other opcodes.
const MAX_MATCH_FIELD: [usize; 4] = [7, 5, 3, 1];

fn hash3(bytes: &[u8]) -> usize {
    let v = (bytes[0] as u32) | (bytes[1] as u32) << 8 | (bytes[2] as u32) << 16;
    (v.wrapping_mul(2_654_435_761) >> (32 - HASH_BITS)) as usize
}

/// Emit literal-only opcodes for `lits`.
pub fn emit_literals(out: &mut Vec<u8>, mut lits: &[u8]) {
    while !lits.is_empty() {
        let n = lits.len().min(MAX_LITERAL_LENGTH);
        if n >= LARGE_LENGTH_BIAS {
            out.push(0xe0);
            out.push((n - LARGE_LENGTH_BIAS) as u8);
        } else {
            out.push(0xe0 | n as u8);
        }
        out.extend_from_slice(&lits[..n]);
        lits = &lits[n..];
    }
}

/// Emit match-only continuation opcodes (previous distance) for `length` bytes.
pub fn emit_match_tail(out: &mut Vec<u8>, mut length: usize) {
    while length > 0 {
        if length < LARGE_LENGTH_BIAS {
            out.push(0xf0 | length as u8);
            length = 0;
        } else {
            let n = length.min(MAX_MATCH_LENGTH);
            out.push(0xf0);
            out.push((n - LARGE_LENGTH_BIAS) as u8);
            length -= n;
        }
    }
}

/// Emit one match of `length >= 3` bytes at `distance`, folding up to three
/// pending literals into the opcode.
pub fn emit_match(
    out: &mut Vec<u8>,
    pending: &[u8],
    distance: usize,
    length: usize,
    last_distance: &mut Option<usize>,
) {
    assert!(length >= MIN_MATCH && (1..=MAX_DISTANCE).contains(&distance));

    let folded: &[u8] = if pending.len() <= 3 {
        pending
    } else {
        emit_literals(out, pending);
        &[]
    };
    let l = folded.len();

    let first = if *last_distance == Some(distance) && l >= 1 {
        let m = length.min(MIN_MATCH + MAX_MATCH_FIELD[l]);
        out.push(((l as u8) << 6) | (((m - MIN_MATCH) as u8) << 3) | 0x06);
        m
    } else if distance < 0x600 {
        let m = length.min(MIN_MATCH + MAX_MATCH_FIELD[l]);
        out.push(((l as u8) << 6) | (((m - MIN_MATCH) as u8) << 3) | (distance >> 8) as u8);
        out.push((distance & 0xff) as u8);
        m
    } else if distance < 0x4000 {
        let m = length.min(MIN_MATCH + 31);
        let field = (m - MIN_MATCH) as u8;
        out.push(0xa0 | ((l as u8) << 3) | (field >> 2));
        out.push((((distance & 0x3f) as u8) << 2) | (field & 0x03));
        out.push((distance >> 6) as u8);
        m
    } else {
        let m = length.min(MIN_MATCH + MAX_MATCH_FIELD[l]);
        out.push(((l as u8) << 6) | (((m - MIN_MATCH) as u8) << 3) | 0x07);
        out.extend_from_slice(&(distance as u16).to_le_bytes());
        m
    };
    out.extend_from_slice(folded);
    *last_distance = Some(distance);

    emit_match_tail(out, length - first);
}

/// Compress `src` into an LZVN stream terminated by an end-of-stream opcode.
pub fn encode(src: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len() + src.len() / 15 + 8);
    let mut table = vec![usize::MAX; 1 << HASH_BITS];
    let mut last_distance = None;
    let mut anchor = 0;
    let mut pos = 0;

    while pos + MIN_MATCH <= src.len() {
        let h = hash3(&src[pos..]);
        let candidate = table[h];
        table[h] = pos;

        if candidate != usize::MAX && pos - candidate <= MAX_DISTANCE {
            let len = src[candidate..]
                .iter()
                .zip(&src[pos..])
                .take_while(|(a, b)| a == b)
                .count();
            if len >= MIN_MATCH {
                emit_match(&mut out, &src[anchor..pos], pos - candidate, len, &mut last_distance);
                pos += len;
                anchor = pos;
                continue;
            }
        }
        pos += 1;
    }

    emit_literals(&mut out, &src[anchor..]);
    out.push(0x06);
    out
}

/// Store `src` as literal runs of at most `piece` bytes each, so every
/// multiple of `piece` is an instruction boundary.
pub fn encode_literal_pieces(src: &[u8], piece: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len() + src.len() / piece.max(1) + 2);
    for chunk in src.chunks(piece.max(1)) {
        emit_literals(&mut out, chunk);
    }
    out.push(0x06);
    out
}

/// Deterministic pseudo-random bytes (xorshift) for incompressible inputs.
pub fn noise(len: usize, mut seed: u64) -> Vec<u8> {
    (0..len)
        .map(|_| {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            (seed >> 24) as u8
        })
        .collect()
}

/// Text-like input with repeats at short, medium and long distances.
pub fn mixed_corpus(len: usize) -> Vec<u8> {
    let words: [&[u8]; 8] = [
        b"extent ", b"volume ", b"snapshot ", b"inode ", b"btree ", b"checkpoint ", b"lzvn ", b"\n",
    ];
    let mut out = Vec::with_capacity(len);
    let mut i = 0u64;
    let mut rnd = noise(len / 4 + 64, 0x9e37_79b9_7f4a_7c15);
    while out.len() < len {
        match i % 7 {
            0..=3 => out.extend_from_slice(words[(rnd[i as usize % rnd.len()] & 7) as usize]),
            4 => out.extend_from_slice(&rnd[..(rnd.len().min(48))]),
            5 => out.extend(std::iter::repeat(b'=').take(40)),
            _ => {
                rnd.rotate_left(3);
                out.extend_from_slice(&i.to_le_bytes());
            }
        }
        i += 1;
    }
    out.truncate(len);
    out
}
