// cli/args.rs: Command-line definition and post-parse validation.
//
// `Args` is the raw clap surface; `parse_args` turns it into a validated
// `ParsedArgs`, filling unset values from the environment (see config.rs).

use anyhow::{anyhow, bail};
use clap::{ArgAction, Parser};

use crate::cli::arg_utils::parse_size;
use crate::cli::constants::{STDIN_MARK, STDOUT_MARK};
use crate::config::{init_block_size, init_nb_workers, BLOCK_SIZE_MAX, NB_WORKERS_MAX};

/// Decompress raw LZVN blocks.
#[derive(Debug, Clone, Parser)]
#[command(name = "lzvn", version, about)]
pub struct Args {
    /// Compressed block files (`-` reads standard input).
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<String>,

    /// Write the decoded data to FILE (`-` for standard output).
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Write decoded data to standard output.
    #[arg(short = 'c', long)]
    pub stdout: bool,

    /// Output capacity per block; accepts K, M and G suffixes
    /// [default: $LZVN_BLOCK_SIZE or 64K].
    #[arg(short, long, value_name = "SIZE", value_parser = parse_size)]
    pub size: Option<usize>,

    /// Overwrite existing output files.
    #[arg(short, long)]
    pub force: bool,

    /// Decode and discard the output (integrity test).
    #[arg(short, long)]
    pub test: bool,

    /// Fail unless each block decodes to exactly SIZE bytes.
    #[arg(long)]
    pub exact: bool,

    /// Worker threads for multiple inputs; 0 lets the runtime decide
    /// [default: $LZVN_NBWORKERS or 0].
    #[arg(short = 'T', long, value_name = "N")]
    pub threads: Option<usize>,

    /// Increase verbosity (repeatable).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Decrease verbosity (repeatable).
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "verbose")]
    pub quiet: u8,
}

/// Where decoded data goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Next to each input, with the `.lzvn` extension removed.
    Derived,
    /// A single explicit file.
    File(String),
    /// Standard output, concatenated in input order.
    Stdout,
    /// Nowhere (`--test`).
    Discard,
}

/// Validated options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArgs {
    pub inputs: Vec<String>,
    pub target: OutputTarget,
    pub block_size: usize,
    pub overwrite: bool,
    pub exact: bool,
    pub nb_workers: usize,
    pub display_level: u32,
}

/// Validate `args` and resolve defaults from the environment.
pub fn parse_args(args: Args) -> anyhow::Result<ParsedArgs> {
    parse_args_with(args, init_block_size, init_nb_workers)
}

/// Testable core of [`parse_args`]: the environment lookups are injected.
pub fn parse_args_with(
    args: Args,
    default_block_size: impl FnOnce() -> usize,
    default_nb_workers: impl FnOnce() -> usize,
) -> anyhow::Result<ParsedArgs> {
    let target = match (args.test, args.stdout, args.output) {
        (true, _, Some(_)) | (true, true, None) => {
            bail!("bad usage: --test cannot be combined with an output")
        }
        (true, false, None) => OutputTarget::Discard,
        (false, true, Some(o)) if o != STDOUT_MARK => {
            bail!("bad usage: --stdout conflicts with --output {}", o)
        }
        (false, true, _) => OutputTarget::Stdout,
        (false, false, Some(o)) if o == STDOUT_MARK => OutputTarget::Stdout,
        (false, false, Some(o)) => OutputTarget::File(o),
        (false, false, None) => OutputTarget::Derived,
    };

    if matches!(target, OutputTarget::File(_)) && args.inputs.len() > 1 {
        bail!("bad usage: --output requires a single input file");
    }
    if target == OutputTarget::Derived && args.inputs.iter().any(|i| i == STDIN_MARK) {
        bail!("bad usage: cannot name an output for standard input; use -o or -c");
    }

    let block_size = args.size.unwrap_or_else(default_block_size);
    if block_size == 0 {
        bail!("bad usage: --size must be greater than 0");
    }
    if block_size > BLOCK_SIZE_MAX {
        return Err(anyhow!(
            "bad usage: --size {} exceeds the maximum of {} bytes",
            block_size,
            BLOCK_SIZE_MAX
        ));
    }

    let nb_workers = args.threads.unwrap_or_else(default_nb_workers).min(NB_WORKERS_MAX);

    // Decoded bytes on stdout would interleave with normal-level messages;
    // keep stderr to errors unless verbosity was raised explicitly.
    let base_level: u32 = if target == OutputTarget::Stdout && args.verbose == 0 { 1 } else { 2 };
    let display_level = (base_level + args.verbose as u32)
        .saturating_sub(args.quiet as u32)
        .min(4);

    Ok(ParsedArgs {
        inputs: args.inputs,
        target,
        block_size,
        overwrite: args.force,
        exact: args.exact,
        nb_workers,
        display_level,
    })
}
