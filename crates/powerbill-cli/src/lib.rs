//! # Powerbill CLI
//!
//! Command-line front end for the powerbill customer billing records.
//!
//! - An interactive numbered menu (the default) for day-to-day use
//! - One-shot subcommands (`add`, `bill`, `pay`, `ls`, ...) for scripting,
//!   with `--json` output
//!
//! Argument parsing uses clap derive, each subcommand is dispatched to a
//! handler, and prompts go through the [`interactive::MenuInput`] seam so the
//! menu loop can be driven without a terminal.

pub mod cli;
pub mod error;
pub mod interactive;
pub mod output;

pub use cli::*;
pub use error::*;
