//! Parallel decoding of independent LZVN blocks.
//!
//! Blocks share nothing but the read-only opcode table, so each one is
//! decoded on whichever rayon worker picks it up, into its own buffer.

use rayon::prelude::*;

use super::decompress_api::decompress_block_to_vec;
use super::decompress_core::DecompressError;

/// Decode each `inputs[i]` into a buffer of at most `capacities[i]` bytes.
///
/// Results are returned in input order.  A failing block does not affect
/// the others.  Extra entries in the longer of the two slices are ignored.
pub fn decompress_batch(
    inputs: &[&[u8]],
    capacities: &[usize],
) -> Vec<Result<Vec<u8>, DecompressError>> {
    inputs
        .par_iter()
        .zip(capacities.par_iter())
        .map(|(&input, &capacity)| decompress_block_to_vec(input, capacity))
        .collect()
}

/// Decode blocks that all expand to at most `capacity` bytes, such as the
/// fixed-size chunks of a compressed file.
pub fn decompress_batch_uniform(
    inputs: &[&[u8]],
    capacity: usize,
) -> Vec<Result<Vec<u8>, DecompressError>> {
    inputs
        .par_iter()
        .map(|&input| decompress_block_to_vec(input, capacity))
        .collect()
}
