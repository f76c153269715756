// config.rs: Compile-time defaults and environment overrides.
//
// Each environment override has a testable `*_from(Option<&str>)` core so the
// parsing can be exercised without touching the process environment.

use crate::block::types::{GB, KB};
use crate::cli::arg_utils::parse_size;

// Default output capacity for one block.
// Compressed files store their data as independently compressed 64 KiB chunks,
// so a chunk never expands past this.
// Can be overridden by the LZVN_BLOCK_SIZE environment variable,
// or by the -s/--size command-line flag.
pub const BLOCK_SIZE_DEFAULT: usize = 64 * KB;

// Largest output capacity the command-line tool will allocate.
pub const BLOCK_SIZE_MAX: usize = GB;

// Default number of worker threads for multiple inputs (0 = let rayon decide).
// Can be overridden by the LZVN_NBWORKERS environment variable,
// or by the -T# command-line flag.
pub const NB_WORKERS_DEFAULT: usize = 0;

// Maximum number of worker threads selectable at runtime.
pub const NB_WORKERS_MAX: usize = 200;

// Extension stripped from inputs to name their outputs.
pub const LZVN_EXTENSION: &str = ".lzvn";

const ENV_BLOCK_SIZE: &str = "LZVN_BLOCK_SIZE";
const ENV_NBWORKERS: &str = "LZVN_NBWORKERS";

/// Read the default output capacity from `LZVN_BLOCK_SIZE`.
pub fn init_block_size() -> usize {
    init_block_size_from(std::env::var(ENV_BLOCK_SIZE).ok().as_deref())
}

/// Testable core of [`init_block_size`].
///
/// Accepts the same `K`/`M`/`G` suffixes as `--size`.  Invalid values, zero,
/// and values above [`BLOCK_SIZE_MAX`] are reported at display level 2 and
/// replaced by [`BLOCK_SIZE_DEFAULT`].
pub fn init_block_size_from(env_val: Option<&str>) -> usize {
    if let Some(env) = env_val {
        match parse_size(env) {
            Ok(size) if size > 0 && size <= BLOCK_SIZE_MAX => return size,
            _ => {
                crate::displaylevel!(
                    2,
                    "Ignore environment variable setting {}={}: not a valid block size\n",
                    ENV_BLOCK_SIZE,
                    env
                );
            }
        }
    }
    BLOCK_SIZE_DEFAULT
}

/// Read the worker count from `LZVN_NBWORKERS`.
pub fn init_nb_workers() -> usize {
    init_nb_workers_from(std::env::var(ENV_NBWORKERS).ok().as_deref())
}

/// Testable core of [`init_nb_workers`].  Values above [`NB_WORKERS_MAX`]
/// are clamped.
pub fn init_nb_workers_from(env_val: Option<&str>) -> usize {
    if let Some(env) = env_val {
        if let Ok(n) = env.trim().parse::<usize>() {
            return n.min(NB_WORKERS_MAX);
        }
        crate::displaylevel!(
            2,
            "Ignore environment variable setting {}={}: not a valid unsigned value\n",
            ENV_NBWORKERS,
            env
        );
    }
    NB_WORKERS_DEFAULT
}
