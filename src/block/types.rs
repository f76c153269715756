//! LZVN opcode classification, token shape, and format constants.
//!
//! Every LZVN instruction starts with a single opcode byte.  The byte alone
//! decides how many operand bytes follow and how the literal length, match
//! length and match distance are packed into them, so decoding starts with a
//! direct lookup in [`OPCODE_TYPES`].
//!
//! Bit layouts (`L` literal length, `M` match length, `D` distance):
//!
//! | Type              | Bytes | Layout                                              |
//! |-------------------|-------|-----------------------------------------------------|
//! | `DistanceSmall`   | 2     | `LLMMMDDD DDDDDDDD`                                 |
//! | `DistanceMedium`  | 3     | `101LLMMM DDDDDDMM DDDDDDDD`                        |
//! | `DistanceLarge`   | 3     | `LLMMM111 DDDDDDDD DDDDDDDD` (little-endian `D`)    |
//! | `DistancePrevious`| 1     | `LLMMM110`                                          |
//! | `LiteralSmall`    | 1     | `1110LLLL`                                          |
//! | `LiteralLarge`    | 2     | `11100000 LLLLLLLL` (`L + 16`)                      |
//! | `MatchSmall`      | 1     | `1111MMMM`                                          |
//! | `MatchLarge`      | 2     | `11110000 MMMMMMMM` (`M + 16`)                      |
//!
//! The `M` fields of the three-bit and five-bit distance forms are biased by
//! [`MIN_MATCH_LENGTH`].

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Bias added to the match-length field of the distance opcodes.
pub const MIN_MATCH_LENGTH: usize = 3;

/// Bias added to the operand byte of `LiteralLarge` and `MatchLarge`.
pub const LARGE_LENGTH_BIAS: usize = 16;

/// The opcode that terminates a well-formed stream.
pub const END_OF_STREAM_OPCODE: u8 = 0x06;

/// Largest distance any opcode can encode (`DistanceLarge`, 16 bits).
pub const MAX_DISTANCE: usize = u16::MAX as usize;

/// Longest literal run a single opcode can carry (`LiteralLarge`).
pub const MAX_LITERAL_LENGTH: usize = 255 + LARGE_LENGTH_BIAS;

/// Longest match a single opcode can carry (`MatchLarge`).
pub const MAX_MATCH_LENGTH: usize = 255 + LARGE_LENGTH_BIAS;

pub const KB: usize = 1 << 10;
pub const MB: usize = 1 << 20;
pub const GB: usize = 1 << 30;

// ─────────────────────────────────────────────────────────────────────────────
// Opcode types
// ─────────────────────────────────────────────────────────────────────────────

/// Category of an LZVN opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpcodeType {
    /// Literal + match with a 16-bit distance in two operand bytes.
    DistanceLarge,
    /// Literal + match with a 14-bit distance spread over two operand bytes.
    DistanceMedium,
    /// Literal + match replaying the previous distance.
    DistancePrevious,
    /// Literal + match with an 11-bit distance (3 opcode bits + one operand byte).
    DistanceSmall,
    /// Successful end of the compressed block.
    EndOfStream,
    /// Reserved opcode; the block is malformed.
    Invalid,
    /// Literal run of 16..=271 bytes.
    LiteralLarge,
    /// Literal run of 1..=15 bytes.
    LiteralSmall,
    /// Match of 16..=271 bytes at the previous distance.
    MatchLarge,
    /// Match of 1..=15 bytes at the previous distance.
    MatchSmall,
    /// No-op.
    None,
}

impl OpcodeType {
    /// Number of operand bytes that follow the opcode byte.
    #[inline]
    pub const fn extra_bytes(self) -> usize {
        match self {
            OpcodeType::DistanceLarge | OpcodeType::DistanceMedium => 2,
            OpcodeType::DistanceSmall | OpcodeType::LiteralLarge | OpcodeType::MatchLarge => 1,
            _ => 0,
        }
    }

    /// `true` for the three opcode types that establish a new distance.
    #[inline]
    pub const fn sets_distance(self) -> bool {
        matches!(
            self,
            OpcodeType::DistanceLarge | OpcodeType::DistanceMedium | OpcodeType::DistanceSmall
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Classification table
// ─────────────────────────────────────────────────────────────────────────────

const DL: OpcodeType = OpcodeType::DistanceLarge;
const DM: OpcodeType = OpcodeType::DistanceMedium;
const DP: OpcodeType = OpcodeType::DistancePrevious;
const DS: OpcodeType = OpcodeType::DistanceSmall;
const EOS: OpcodeType = OpcodeType::EndOfStream;
const INV: OpcodeType = OpcodeType::Invalid;
const LL: OpcodeType = OpcodeType::LiteralLarge;
const LS: OpcodeType = OpcodeType::LiteralSmall;
const ML: OpcodeType = OpcodeType::MatchLarge;
const MS: OpcodeType = OpcodeType::MatchSmall;
const NOP: OpcodeType = OpcodeType::None;

/// Opcode byte → opcode type.
#[rustfmt::skip]
pub static OPCODE_TYPES: [OpcodeType; 256] = [
    DS,  DS,  DS,  DS,  DS,  DS,  EOS, DL,  // 0x00
    DS,  DS,  DS,  DS,  DS,  DS,  NOP, DL,  // 0x08
    DS,  DS,  DS,  DS,  DS,  DS,  NOP, DL,  // 0x10
    DS,  DS,  DS,  DS,  DS,  DS,  INV, DL,  // 0x18
    DS,  DS,  DS,  DS,  DS,  DS,  INV, DL,  // 0x20
    DS,  DS,  DS,  DS,  DS,  DS,  INV, DL,  // 0x28
    DS,  DS,  DS,  DS,  DS,  DS,  INV, DL,  // 0x30
    DS,  DS,  DS,  DS,  DS,  DS,  INV, DL,  // 0x38
    DS,  DS,  DS,  DS,  DS,  DS,  DP,  DL,  // 0x40
    DS,  DS,  DS,  DS,  DS,  DS,  DP,  DL,  // 0x48
    DS,  DS,  DS,  DS,  DS,  DS,  DP,  DL,  // 0x50
    DS,  DS,  DS,  DS,  DS,  DS,  DP,  DL,  // 0x58
    DS,  DS,  DS,  DS,  DS,  DS,  DP,  DL,  // 0x60
    DS,  DS,  DS,  DS,  DS,  DS,  DP,  DL,  // 0x68
    INV, INV, INV, INV, INV, INV, INV, INV, // 0x70
    INV, INV, INV, INV, INV, INV, INV, INV, // 0x78
    DS,  DS,  DS,  DS,  DS,  DS,  DP,  DL,  // 0x80
    DS,  DS,  DS,  DS,  DS,  DS,  DP,  DL,  // 0x88
    DS,  DS,  DS,  DS,  DS,  DS,  DP,  DL,  // 0x90
    DS,  DS,  DS,  DS,  DS,  DS,  DP,  DL,  // 0x98
    DM,  DM,  DM,  DM,  DM,  DM,  DM,  DM,  // 0xa0
    DM,  DM,  DM,  DM,  DM,  DM,  DM,  DM,  // 0xa8
    DM,  DM,  DM,  DM,  DM,  DM,  DM,  DM,  // 0xb0
    DM,  DM,  DM,  DM,  DM,  DM,  DM,  DM,  // 0xb8
    DS,  DS,  DS,  DS,  DS,  DS,  DP,  DL,  // 0xc0
    DS,  DS,  DS,  DS,  DS,  DS,  DP,  DL,  // 0xc8
    INV, INV, INV, INV, INV, INV, INV, INV, // 0xd0
    INV, INV, INV, INV, INV, INV, INV, INV, // 0xd8
    LL,  LS,  LS,  LS,  LS,  LS,  LS,  LS,  // 0xe0
    LS,  LS,  LS,  LS,  LS,  LS,  LS,  LS,  // 0xe8
    ML,  MS,  MS,  MS,  MS,  MS,  MS,  MS,  // 0xf0
    MS,  MS,  MS,  MS,  MS,  MS,  MS,  MS,  // 0xf8
];

/// Classify an opcode byte.
#[inline(always)]
pub fn classify(opcode: u8) -> OpcodeType {
    OPCODE_TYPES[opcode as usize]
}

// ─────────────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────────────

/// One decoded instruction: a literal run followed by a match.
///
/// Either length may be zero.  `distance` is `Some` only when the opcode
/// carried a new distance; otherwise the match replays the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Token {
    pub literal_length: usize,
    pub match_length: usize,
    pub distance: Option<u16>,
}

impl Token {
    #[inline]
    pub(crate) const fn literal(literal_length: usize) -> Self {
        Self { literal_length, match_length: 0, distance: None }
    }

    #[inline]
    pub(crate) const fn matched(match_length: usize) -> Self {
        Self { literal_length: 0, match_length, distance: None }
    }
}
