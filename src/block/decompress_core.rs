//! LZVN block decompression core engine.
//!
//!   - [`read_token`]        : decode one opcode and its operand bytes
//!   - [`decompress_generic`]: the bounds-checked decode loop
//!
//! # Security boundary
//!
//! The compressed block is untrusted.  Every read from `src` and every read
//! or write in `dst` is preceded by an explicit range check, and every check
//! that fails returns a [`DecompressError`] naming the opcode offset.  No
//! input may cause a panic, an out-of-range access, or a non-terminating
//! loop: each iteration consumes at least the opcode byte.

use core::fmt;

use super::types::{classify, OpcodeType, Token, LARGE_LENGTH_BIAS, MIN_MATCH_LENGTH};

// ─────────────────────────────────────────────────────────────────────────────
// Error types
// ─────────────────────────────────────────────────────────────────────────────

/// Rejected caller-supplied arguments (checked before any byte is decoded).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidArgument {
    /// A buffer pointer was null (C ABI only).
    NullPointer,
    /// The declared compressed size exceeds the buffer or `isize::MAX`.
    InputSizeTooLarge,
    /// The declared output capacity exceeds the buffer or `isize::MAX`.
    OutputSizeTooLarge,
}

/// The region check that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutOfBounds {
    /// A literal run extends past the end of the compressed block.
    LiteralPastInput,
    /// A literal run does not fit in the remaining output capacity.
    LiteralPastOutput,
    /// A match has no usable distance: none was established yet, or it is zero.
    InvalidDistance,
    /// A match distance reaches back before the start of the output.
    DistancePastOutput,
    /// A match does not fit in the remaining output capacity.
    MatchPastOutput,
}

/// Errors returned by LZVN block decompression.
///
/// Every decode error is final: nothing after the offending opcode is
/// interpreted, and the contents of the output buffer are unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompressError {
    InvalidArgument(InvalidArgument),
    /// The opcode at `offset` needs operand bytes past the end of the block.
    TruncatedInput { offset: usize, opcode: u8 },
    /// The opcode at `offset` is reserved.
    InvalidOpcode { offset: usize, opcode: u8 },
    /// The instruction at `offset` reads or writes outside its buffers.
    OutOfBounds { offset: usize, kind: OutOfBounds },
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InvalidArgument::NullPointer => "null buffer",
            InvalidArgument::InputSizeTooLarge => "compressed data size value exceeds maximum",
            InvalidArgument::OutputSizeTooLarge => "uncompressed data size value exceeds maximum",
        })
    }
}

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutOfBounds::LiteralPastInput => "literal size exceeds compressed data size",
            OutOfBounds::LiteralPastOutput => "literal size exceeds uncompressed data size",
            OutOfBounds::InvalidDistance => "match distance is zero or was never set",
            OutOfBounds::DistancePastOutput => "distance exceeds uncompressed data offset",
            OutOfBounds::MatchPastOutput => "match size exceeds uncompressed data size",
        })
    }
}

impl fmt::Display for DecompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecompressError::InvalidArgument(arg) => write!(f, "invalid argument: {arg}"),
            DecompressError::TruncatedInput { offset, opcode } => write!(
                f,
                "truncated input: opcode {opcode:#04x} at offset {offset} runs past the end of the block"
            ),
            DecompressError::InvalidOpcode { offset, opcode } => {
                write!(f, "invalid opcode {opcode:#04x} at offset {offset}")
            }
            DecompressError::OutOfBounds { offset, kind } => {
                write!(f, "out of bounds at offset {offset}: {kind}")
            }
        }
    }
}

impl std::error::Error for DecompressError {}

impl From<InvalidArgument> for DecompressError {
    fn from(arg: InvalidArgument) -> Self {
        DecompressError::InvalidArgument(arg)
    }
}

#[inline(always)]
fn out_of_bounds<T>(offset: usize, kind: OutOfBounds) -> Result<T, DecompressError> {
    Err(DecompressError::OutOfBounds { offset, kind })
}

// ─────────────────────────────────────────────────────────────────────────────
// read_token
// ─────────────────────────────────────────────────────────────────────────────

/// One opcode decoded from the compressed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: u8,
    pub kind: OpcodeType,
    pub token: Token,
    /// Offset just past the opcode's operand bytes (literal bytes, if any,
    /// start here).
    pub next: usize,
}

/// Decode the opcode at `pos` together with its operand bytes.
///
/// Returns `Ok(None)` when `pos` is at or past the end of `src`.  Literal
/// payload bytes are *not* consumed; they begin at [`Instruction::next`].
pub fn read_token(src: &[u8], pos: usize) -> Result<Option<Instruction>, DecompressError> {
    let Some(&opcode) = src.get(pos) else {
        return Ok(None);
    };
    let kind = classify(opcode);
    let operand_start = pos + 1;
    let next = operand_start + kind.extra_bytes();
    let Some(operands) = src.get(operand_start..next) else {
        return Err(DecompressError::TruncatedInput { offset: pos, opcode });
    };

    // Fields shared by the small / large / previous distance forms.
    let packed_literal = ((opcode & 0xc0) >> 6) as usize;
    let packed_match = ((opcode & 0x38) >> 3) as usize + MIN_MATCH_LENGTH;

    let token = match kind {
        OpcodeType::DistanceLarge => Token {
            literal_length: packed_literal,
            match_length: packed_match,
            distance: Some(u16::from_le_bytes([operands[0], operands[1]])),
        },
        OpcodeType::DistanceMedium => {
            let (b1, b2) = (operands[0], operands[1]);
            Token {
                literal_length: ((opcode & 0x18) >> 3) as usize,
                match_length: ((((opcode & 0x07) << 2) | (b1 & 0x03)) as usize) + MIN_MATCH_LENGTH,
                distance: Some(((b2 as u16) << 6) | ((b1 & 0xfc) >> 2) as u16),
            }
        }
        OpcodeType::DistanceSmall => Token {
            literal_length: packed_literal,
            match_length: packed_match,
            distance: Some((((opcode & 0x07) as u16) << 8) | operands[0] as u16),
        },
        OpcodeType::DistancePrevious => Token {
            literal_length: packed_literal,
            match_length: packed_match,
            distance: None,
        },
        OpcodeType::LiteralLarge => Token::literal(operands[0] as usize + LARGE_LENGTH_BIAS),
        OpcodeType::LiteralSmall => Token::literal((opcode & 0x0f) as usize),
        OpcodeType::MatchLarge => Token::matched(operands[0] as usize + LARGE_LENGTH_BIAS),
        OpcodeType::MatchSmall => Token::matched((opcode & 0x0f) as usize),
        OpcodeType::EndOfStream | OpcodeType::None => Token::default(),
        OpcodeType::Invalid => return Err(DecompressError::InvalidOpcode { offset: pos, opcode }),
    };

    Ok(Some(Instruction { opcode, kind, token, next }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Match copy
// ─────────────────────────────────────────────────────────────────────────────

/// Copy `length` bytes from `op - distance` to `op`.
///
/// When the regions overlap (`distance < length`) the copy runs forward one
/// byte at a time so bytes written early in the copy are re-read later,
/// turning a short pattern into a repeated run.
///
/// Caller guarantees `0 < distance <= op` and `op + length <= dst.len()`.
#[inline]
fn copy_match(dst: &mut [u8], op: usize, distance: usize, length: usize) {
    let start = op - distance;
    if distance >= length {
        dst.copy_within(start..start + length, op);
    } else {
        for i in 0..length {
            dst[op + i] = dst[start + i];
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// decompress_generic
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome of one successful block decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeSummary {
    /// Bytes written to the output buffer.
    pub written: usize,
    /// Compressed bytes consumed, including the end-of-stream opcode.
    pub consumed: usize,
    /// `true` when decoding stopped at an end-of-stream opcode (as opposed to
    /// running out of input or filling the output).
    pub end_of_stream: bool,
}

/// Core LZVN block decompression loop.
///
/// Decodes `src` into `dst`, treating `dst.len()` as the output capacity.
/// Decoding stops successfully at an end-of-stream opcode, at the end of
/// `src`, or as soon as `dst` is full, whichever comes first.
pub fn decompress_generic(src: &[u8], dst: &mut [u8]) -> Result<DecodeSummary, DecompressError> {
    let iend = src.len();
    let oend = dst.len();

    let mut ip: usize = 0;
    let mut op: usize = 0;
    let mut end_of_stream = false;

    // Distance of the last opcode that carried one; replayed by
    // DistancePrevious, MatchSmall and MatchLarge.
    let mut last_distance: Option<u16> = None;

    while op < oend {
        let offset = ip;
        let Some(instruction) = read_token(src, ip)? else {
            break;
        };
        ip = instruction.next;

        if instruction.kind == OpcodeType::EndOfStream {
            end_of_stream = true;
            break;
        }

        let token = instruction.token;
        if instruction.kind.sets_distance() {
            last_distance = token.distance;
        }

        // ── Literal run ──────────────────────────────────────────────────────
        let literal_length = token.literal_length;
        if literal_length > 0 {
            let lit_end = match ip.checked_add(literal_length) {
                Some(end) if end <= iend => end,
                _ => return out_of_bounds(offset, OutOfBounds::LiteralPastInput),
            };
            let out_end = match op.checked_add(literal_length) {
                Some(end) if end <= oend => end,
                _ => return out_of_bounds(offset, OutOfBounds::LiteralPastOutput),
            };
            dst[op..out_end].copy_from_slice(&src[ip..lit_end]);
            ip = lit_end;
            op = out_end;
        }

        // ── Match ────────────────────────────────────────────────────────────
        let match_length = token.match_length;
        if match_length > 0 {
            let distance = match last_distance {
                Some(d) if d > 0 => d as usize,
                _ => return out_of_bounds(offset, OutOfBounds::InvalidDistance),
            };
            if distance > op {
                return out_of_bounds(offset, OutOfBounds::DistancePastOutput);
            }
            let out_end = match op.checked_add(match_length) {
                Some(end) if end <= oend => end,
                _ => return out_of_bounds(offset, OutOfBounds::MatchPastOutput),
            };
            copy_match(dst, op, distance, match_length);
            op = out_end;
        }
    }

    Ok(DecodeSummary { written: op, consumed: ip, end_of_stream })
}
