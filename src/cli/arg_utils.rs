// cli/arg_utils.rs: Argument helpers shared by the parser and the config layer.

use crate::block::types::{GB, KB, MB};
use crate::config::LZVN_EXTENSION;

/// Parses a byte count with an optional size suffix.
///
/// Recognised suffixes (case-sensitive):
///   `K` / `KB` / `KiB`  → multiply by 1 024
///   `M` / `MB` / `MiB`  → multiply by 1 048 576
///   `G` / `GB` / `GiB`  → multiply by 1 073 741 824
///
/// Unlike a bare integer parse, overflow and trailing characters are errors.
pub fn parse_size(s: &str) -> Result<usize, String> {
    let digits_end = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits_end == 0 {
        return Err(format!("invalid size '{s}': expected a number"));
    }
    let (digits, suffix) = s.split_at(digits_end);
    let value: usize = digits
        .parse()
        .map_err(|_| format!("invalid size '{s}': number too large"))?;

    let unit = match suffix {
        "" => 1,
        "K" | "KB" | "KiB" => KB,
        "M" | "MB" | "MiB" => MB,
        "G" | "GB" | "GiB" => GB,
        _ => return Err(format!("invalid size '{s}': unknown suffix '{suffix}'")),
    };
    value
        .checked_mul(unit)
        .ok_or_else(|| format!("invalid size '{s}': number too large"))
}

/// Derive the output file name for a compressed input by stripping the
/// `.lzvn` extension.
///
/// Returns `None` when `input` does not end in `.lzvn`, or is nothing but the
/// extension.
pub fn strip_lzvn_extension(input: &str) -> Option<&str> {
    let stem = input.strip_suffix(LZVN_EXTENSION)?;
    if stem.is_empty() || stem.ends_with('/') || stem.ends_with('\\') {
        None
    } else {
        Some(stem)
    }
}
