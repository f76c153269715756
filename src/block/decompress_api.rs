//! Public LZVN block decompression API.
//!
//!   - [`decompress`]             : slice in, slice out, returns bytes written
//!   - [`decompress_summary`]     : same, also reporting input consumed
//!   - [`decompress_sized`]       : explicit sizes with in/out output size
//!   - [`decompress_block_to_vec`]: allocating convenience wrapper
//!
//! All functions are safe and never panic on malformed input.  The output
//! buffer belongs to the caller; nothing is allocated except by
//! [`decompress_block_to_vec`].

use super::decompress_core::{decompress_generic, DecodeSummary, DecompressError, InvalidArgument};

/// Largest size accepted for either buffer (mirrors `SSIZE_MAX`).
pub const LZVN_MAX_BUFFER_SIZE: usize = isize::MAX as usize;

/// Decompress an LZVN block into `dst`, using `dst.len()` as the capacity.
///
/// Returns the number of bytes written.  Filling `dst` before reaching the
/// end-of-stream opcode is not an error.
pub fn decompress(src: &[u8], dst: &mut [u8]) -> Result<usize, DecompressError> {
    decompress_generic(src, dst).map(|summary| summary.written)
}

/// Like [`decompress`], but also reports how much of `src` was consumed and
/// whether the block ended with an end-of-stream opcode.
pub fn decompress_summary(src: &[u8], dst: &mut [u8]) -> Result<DecodeSummary, DecompressError> {
    decompress_generic(src, dst)
}

/// Decompress the first `src_size` bytes of `src` into at most `*dst_size`
/// bytes of `dst`.
///
/// On success `*dst_size` is overwritten with the number of bytes produced.
/// On failure it is left unchanged.
///
/// Fails with [`DecompressError::InvalidArgument`] when a declared size
/// exceeds its buffer or [`LZVN_MAX_BUFFER_SIZE`].
pub fn decompress_sized(
    src: &[u8],
    src_size: usize,
    dst: &mut [u8],
    dst_size: &mut usize,
) -> Result<(), DecompressError> {
    if src_size > LZVN_MAX_BUFFER_SIZE || src_size > src.len() {
        return Err(InvalidArgument::InputSizeTooLarge.into());
    }
    let capacity = *dst_size;
    if capacity > LZVN_MAX_BUFFER_SIZE || capacity > dst.len() {
        return Err(InvalidArgument::OutputSizeTooLarge.into());
    }
    let written = decompress(&src[..src_size], &mut dst[..capacity])?;
    *dst_size = written;
    Ok(())
}

/// Decompress `src` into a freshly allocated buffer of at most `capacity`
/// bytes, truncated to the decoded length.
pub fn decompress_block_to_vec(src: &[u8], capacity: usize) -> Result<Vec<u8>, DecompressError> {
    if capacity > LZVN_MAX_BUFFER_SIZE {
        return Err(InvalidArgument::OutputSizeTooLarge.into());
    }
    let mut dst = vec![0u8; capacity];
    let written = decompress(src, &mut dst)?;
    dst.truncate(written);
    Ok(dst)
}
