//! Command-line front end for the `lzvn` binary.
//!
//! [`args::Args`] is parsed by clap; [`args::parse_args`] validates it and
//! fills unset values from the environment.  Diagnostics go through the
//! [`displaylevel!`](crate::displaylevel) macro in [`constants`].

pub mod arg_utils;
pub mod args;
pub mod constants;
