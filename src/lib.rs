// lzvn: bounds-checked LZVN block decompressor

pub mod config;
pub mod block;
pub mod io;
pub mod cli;
#[cfg(feature = "c-abi")]
pub mod abi;

// ── Version constants ─────────────────────────────────────────────────────────
pub const LZVN_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the runtime version string.
pub fn version_string() -> &'static str {
    LZVN_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use block::decompress_api::{decompress, decompress_block_to_vec, decompress_sized};
pub use block::decompress_core::{DecompressError, InvalidArgument, OutOfBounds};
pub use block::types::{classify, OpcodeType};
