//! C-ABI shim: exports `lzvn_decompress` for C callers.
//!
//! Enabled with:
//!   cargo build --release --features c-abi
//!
//! The produced `target/release/liblzvn.a` provides the decoder behind the
//! usual `int decompress(const uint8_t *, size_t, uint8_t *, size_t *)` shape.

use std::os::raw::c_int;
use std::slice;

use crate::block::decompress_api::{decompress_sized, LZVN_MAX_BUFFER_SIZE};
use crate::block::decompress_core::{DecompressError, InvalidArgument};

/// Validate the raw arguments and run the decoder.
///
/// # Safety
/// Same contract as [`lzvn_decompress`].
unsafe fn decompress_raw(
    src: *const u8,
    src_size: usize,
    dst: *mut u8,
    dst_size: *mut usize,
) -> Result<(), DecompressError> {
    if src.is_null() || dst.is_null() || dst_size.is_null() {
        return Err(InvalidArgument::NullPointer.into());
    }
    if src_size > LZVN_MAX_BUFFER_SIZE {
        return Err(InvalidArgument::InputSizeTooLarge.into());
    }
    let capacity = *dst_size;
    if capacity > LZVN_MAX_BUFFER_SIZE {
        return Err(InvalidArgument::OutputSizeTooLarge.into());
    }
    // SAFETY: both pointers are non-null and the caller guarantees they cover
    // `src_size` readable and `capacity` writable bytes that do not overlap.
    let src_slice = slice::from_raw_parts(src, src_size);
    let dst_slice = slice::from_raw_parts_mut(dst, capacity);
    let mut produced = capacity;
    decompress_sized(src_slice, src_size, dst_slice, &mut produced)?;
    *dst_size = produced;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// int lzvn_decompress(const uint8_t *compressed_data, size_t compressed_data_size,
//                     uint8_t *uncompressed_data, size_t *uncompressed_data_size);
//
// Returns 1 on success (with *uncompressed_data_size set to the bytes
// produced) or -1 on error (with *uncompressed_data_size untouched).
// ─────────────────────────────────────────────────────────────────────────────

/// Decompress an LZVN block through the C ABI.
///
/// # Safety
/// - `compressed_data` must be valid for `compressed_data_size` bytes of reads.
/// - `uncompressed_data` must be valid for `*uncompressed_data_size` bytes of
///   writes and must not overlap `compressed_data`.
/// - `uncompressed_data_size` must be valid for reads and writes.
#[no_mangle]
pub unsafe extern "C" fn lzvn_decompress(
    compressed_data: *const u8,
    compressed_data_size: usize,
    uncompressed_data: *mut u8,
    uncompressed_data_size: *mut usize,
) -> c_int {
    match decompress_raw(
        compressed_data,
        compressed_data_size,
        uncompressed_data,
        uncompressed_data_size,
    ) {
        Ok(()) => 1,
        Err(_) => -1,
    }
}
