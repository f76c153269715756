//! LZVN block decompression.
//!
//! This module contains the opcode classifier and the bounds-checked decode
//! engine, plus a rayon-backed helper for decoding many blocks at once.

pub mod batch;
pub mod decompress_api;
pub mod decompress_core;
pub mod types;

// Re-export the most important public API items at the module level.
pub use batch::{decompress_batch, decompress_batch_uniform};
pub use decompress_api::{
    decompress, decompress_block_to_vec, decompress_sized, decompress_summary,
    LZVN_MAX_BUFFER_SIZE,
};
pub use decompress_core::{
    read_token, DecodeSummary, DecompressError, Instruction, InvalidArgument, OutOfBounds,
};
pub use types::{classify, OpcodeType, Token, OPCODE_TYPES};
