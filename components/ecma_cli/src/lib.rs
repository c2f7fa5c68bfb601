//! ECMAScript Parser CLI Library
//!
//! Argument handling, error types and the parallel file runner behind the
//! `ecma-parse` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod error;
pub mod runner;

pub use cli::Cli;
pub use error::{CliError, CliResult};
pub use runner::{ErrorReport, Input, Runner};
