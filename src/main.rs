//! Binary entry point for the `lzvn` command-line tool.
//!
//! 1. clap parses the command line into [`Args`].
//! 2. [`parse_args`] validates it and resolves environment defaults.
//! 3. [`run`] decodes every input and returns the process exit code.

use clap::Parser;

use lzvn::cli::args::{parse_args, Args, ParsedArgs};
use lzvn::cli::constants::{set_display_level, AUTHOR, PROGRAM_NAME};
use lzvn::io::{decompress_files, DecodePrefs};

/// Execute a validated invocation.
///
/// Returns the process exit code (0 = every input decoded, 1 = otherwise).
fn run(args: ParsedArgs) -> i32 {
    set_display_level(args.display_level);

    lzvn::displaylevel!(
        4,
        "*** {} v{} {}-bit, by {} ***\n",
        PROGRAM_NAME,
        lzvn::LZVN_VERSION_STRING,
        std::mem::size_of::<*const ()>() * 8,
        AUTHOR
    );
    lzvn::displaylevel!(4, "Block size : {} bytes\n", args.block_size);

    let prefs = DecodePrefs {
        block_size: args.block_size,
        overwrite: args.overwrite,
        exact: args.exact,
    };

    match decompress_files(&args.inputs, &args.target, &prefs, args.nb_workers) {
        Ok(0) => 0,
        Ok(failures) => {
            lzvn::displaylevel!(2, "{} of {} inputs failed\n", failures, args.inputs.len());
            1
        }
        Err(e) => {
            lzvn::displaylevel!(1, "{}: {:#}\n", PROGRAM_NAME, e);
            1
        }
    }
}

fn main() {
    let code = match parse_args(Args::parse()) {
        Ok(parsed) => run(parsed),
        Err(e) => {
            lzvn::display!("{}: {:#}\n", PROGRAM_NAME, e);
            1
        }
    };
    std::process::exit(code);
}
