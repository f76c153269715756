//! File-level driver: read compressed blocks, decode them, write the results.
//!
//! Each input file holds one raw LZVN block.  Inputs are decoded in parallel
//! on a rayon pool and written back in input order, so concatenated stdout
//! output is deterministic.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{bail, Context};
use filetime::FileTime;
use rayon::prelude::*;

use crate::block::decompress_api::decompress_summary;
use crate::cli::arg_utils::strip_lzvn_extension;
use crate::cli::args::OutputTarget;
use crate::cli::constants::{STDIN_MARK, STDOUT_MARK};
use crate::config::LZVN_EXTENSION;

/// Decode preferences shared by every input of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodePrefs {
    /// Output capacity per block.
    pub block_size: usize,
    /// Replace existing output files.
    pub overwrite: bool,
    /// Require each block to fill exactly `block_size` bytes.
    pub exact: bool,
}

/// Read a whole input, `-` meaning standard input.
pub fn read_input(input: &str) -> io::Result<Vec<u8>> {
    if input == STDIN_MARK {
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        fs::read(input)
    }
}

/// Decode one compressed block held in memory.
pub fn decode_buffer(name: &str, compressed: &[u8], prefs: &DecodePrefs) -> anyhow::Result<Vec<u8>> {
    let mut dst = vec![0u8; prefs.block_size];
    let summary = decompress_summary(compressed, &mut dst)
        .with_context(|| format!("{name}: corrupt LZVN block"))?;

    crate::displaylevel!(
        4,
        "{}: consumed {} of {} compressed bytes, {}\n",
        name,
        summary.consumed,
        compressed.len(),
        if summary.end_of_stream { "end-of-stream reached" } else { "no end-of-stream opcode" }
    );

    if prefs.exact && summary.written != prefs.block_size {
        bail!(
            "{}: decoded {} bytes, expected exactly {}",
            name,
            summary.written,
            prefs.block_size
        );
    }
    dst.truncate(summary.written);
    Ok(dst)
}

/// Resolve the output file name for `input`, or `None` for stdout / discard.
pub fn output_name(input: &str, target: &OutputTarget) -> anyhow::Result<Option<String>> {
    match target {
        OutputTarget::Derived => match strip_lzvn_extension(input) {
            Some(stem) => Ok(Some(stem.to_owned())),
            None => bail!("{input}: unknown suffix -- expected {LZVN_EXTENSION}; use -o to name the output"),
        },
        OutputTarget::File(path) if path != STDOUT_MARK => Ok(Some(path.clone())),
        _ => Ok(None),
    }
}

/// Write `data` for `input` to wherever `target` points.
fn write_output(
    input: &str,
    data: &[u8],
    target: &OutputTarget,
    prefs: &DecodePrefs,
) -> anyhow::Result<()> {
    if *target == OutputTarget::Discard {
        return Ok(());
    }
    let Some(out) = output_name(input, target)? else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(data).context("cannot write to standard output")?;
        stdout.flush().context("cannot write to standard output")?;
        return Ok(());
    };

    let out_path = Path::new(&out);
    if out_path.exists() && !prefs.overwrite {
        bail!("{out} already exists; use -f to overwrite");
    }
    fs::write(out_path, data).with_context(|| format!("cannot write {out}"))?;

    if input != STDIN_MARK {
        copy_mtime(Path::new(input), out_path)
            .with_context(|| format!("cannot copy timestamps to {out}"))?;
    }
    crate::displaylevel!(3, "{} -> {}\n", input, out);
    Ok(())
}

/// Give `dst` the access and modification times of `src`.
fn copy_mtime(src: &Path, dst: &Path) -> io::Result<()> {
    let meta = fs::metadata(src)?;
    filetime::set_file_times(
        dst,
        FileTime::from_last_access_time(&meta),
        FileTime::from_last_modification_time(&meta),
    )
}

/// Decode a single input file and write its output.
///
/// Returns the number of decoded bytes.
pub fn decompress_file(input: &str, target: &OutputTarget, prefs: &DecodePrefs) -> anyhow::Result<usize> {
    // Fail on a bad output name before reading anything.
    output_name(input, target)?;
    let compressed = read_input(input).with_context(|| format!("cannot read {input}"))?;
    let decoded = decode_buffer(input, &compressed, prefs)?;
    write_output(input, &decoded, target, prefs)?;
    crate::displaylevel!(2, "{:<30}: decoded {} bytes\n", input, decoded.len());
    Ok(decoded.len())
}

/// Decode every input in parallel and write the outputs in input order.
///
/// Inputs are taken one pass at a time, one input per worker, so no more
/// than one decoded buffer per worker is held before it is written.  Errors are
/// reported at display level 1 as they are written out and do not stop the
/// remaining inputs.  Returns the number of failed inputs.
pub fn decompress_files(
    inputs: &[String],
    target: &OutputTarget,
    prefs: &DecodePrefs,
    nb_workers: usize,
) -> anyhow::Result<usize> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(nb_workers)
        .build()
        .context("cannot start worker threads")?;
    let pass_len = pool.current_num_threads().max(1);
    crate::displaylevel!(4, "Decoding with {} worker(s)\n", pass_len);

    let mut failures = 0;
    for pass in inputs.chunks(pass_len) {
        let decoded: Vec<anyhow::Result<Vec<u8>>> = pool.install(|| {
            pass.par_iter()
                .map(|input| {
                    output_name(input, target)?;
                    let compressed =
                        read_input(input).with_context(|| format!("cannot read {input}"))?;
                    decode_buffer(input, &compressed, prefs)
                })
                .collect()
        });

        for (input, result) in pass.iter().zip(decoded) {
            let outcome = result.and_then(|data| {
                write_output(input, &data, target, prefs)?;
                Ok(data.len())
            });
            match outcome {
                Ok(n) => crate::displaylevel!(2, "{:<30}: decoded {} bytes\n", input, n),
                Err(e) => {
                    crate::displaylevel!(1, "lzvn: {:#}\n", e);
                    failures += 1;
                }
            }
        }
    }
    Ok(failures)
}
