//! # CLI Module
//!
//! Command-line interface of the tldrgen binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Fetch a target CLI's TLDR data, validate it, and write documentation
//! artifacts:
//!
//! ```bash
//! tldrgen generate forest
//! tldrgen generate forest --markdown --html --out-dir docs/
//! ```
//!
//! Two mode flags change what `generate` does with the parsed document:
//!
//! - `--validate` - run parser+validator only and print a compliance
//!   summary; the exit code is 0 iff the target is compliant (zero errors
//!   and every declared command reachable).
//! - `--analyze` - print the graph/distribution analytics to the console
//!   without writing any files.
//!
//! ```bash
//! tldrgen generate forest --validate
//! tldrgen generate forest --analyze
//! ```
//!
//! ## Exit codes
//!
//! - `0` - success / compliant
//! - `1` - setup failure, fatal parse error, or a non-compliant target

mod commands;


pub use commands::{execute, run_cli, Cli, Commands};
