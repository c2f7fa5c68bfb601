//! Command line arguments

use std::path::PathBuf;

use clap::Parser as ClapParser;
use ecma_parser::{Options, SourceType};

use crate::error::{CliError, CliResult};

/// Parse ECMAScript sources and print their ESTree JSON.
#[derive(ClapParser, Debug)]
#[command(name = "ecma-parse")]
#[command(author = "Corten Team")]
#[command(version = "0.1.0")]
#[command(about = "ECMAScript parser producing ESTree JSON", long_about = None)]
pub struct Cli {
    /// Source files to parse
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Parse inline source text instead of files
    #[arg(short, long, value_name = "CODE", conflicts_with = "files")]
    pub eval: Option<String>,

    /// JSON options file; flags given on the command line override it
    #[arg(short, long, value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// Parse with the module goal
    #[arg(short, long)]
    pub module: bool,

    /// Parse as CommonJS (script goal with top-level return)
    #[arg(long, conflicts_with = "module")]
    pub commonjs: bool,

    /// Enable JSX
    #[arg(long)]
    pub jsx: bool,

    /// Enable proposals such as decorators
    #[arg(long)]
    pub next: bool,

    /// Annex B web-compatibility relaxations
    #[arg(long)]
    pub web_compat: bool,

    /// Parse as if the source began with "use strict"
    #[arg(long)]
    pub implied_strict: bool,

    /// Keep ParenthesizedExpression nodes
    #[arg(long)]
    pub preserve_parens: bool,

    /// Reject regular expressions with invalid bodies
    #[arg(long)]
    pub validate_regex: bool,

    /// Attach start, end and range to every node
    #[arg(long)]
    pub ranges: bool,

    /// Attach line/column locations to every node
    #[arg(long)]
    pub loc: bool,

    /// Attach raw source text to literals
    #[arg(long)]
    pub raw: bool,

    /// Print single-line JSON
    #[arg(long)]
    pub compact: bool,

    /// Check syntax only; print nothing on success
    #[arg(long)]
    pub check: bool,

    /// Report parse errors as JSON objects on stdout
    #[arg(long)]
    pub json_errors: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parser options: the config file if given, then command line flags.
    pub fn options(&self) -> CliResult<Options> {
        let mut options = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
                    path: path.clone(),
                    source,
                })?;
                serde_json::from_str(&text).map_err(|source| CliError::Config {
                    path: path.clone(),
                    source,
                })?
            }
            None => Options::default(),
        };
        if self.module {
            options.source_type = SourceType::Module;
        }
        if self.commonjs {
            options.source_type = SourceType::Commonjs;
        }
        options.jsx |= self.jsx;
        options.next |= self.next;
        options.web_compat |= self.web_compat;
        options.implied_strict |= self.implied_strict;
        options.preserve_parens |= self.preserve_parens;
        options.validate_regex |= self.validate_regex;
        options.ranges |= self.ranges;
        options.loc |= self.loc;
        options.raw |= self.raw;
        Ok(options)
    }

    /// Default log filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_map_to_options() {
        let cli = Cli::try_parse_from(["ecma-parse", "--module", "--jsx", "--ranges", "a.js"]).unwrap();
        let options = cli.options().unwrap();
        assert_eq!(options.source_type, SourceType::Module);
        assert!(options.jsx);
        assert!(options.ranges);
        assert!(!options.loc);
        assert_eq!(cli.files, vec![PathBuf::from("a.js")]);
    }

    #[test]
    fn test_module_and_commonjs_conflict() {
        assert!(Cli::try_parse_from(["ecma-parse", "--module", "--commonjs"]).is_err());
    }

    #[test]
    fn test_eval_conflicts_with_files() {
        assert!(Cli::try_parse_from(["ecma-parse", "-e", "x", "a.js"]).is_err());
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(Cli::try_parse_from(["ecma-parse"]).unwrap().log_level(), "warn");
        assert_eq!(Cli::try_parse_from(["ecma-parse", "-vv"]).unwrap().log_level(), "trace");
    }
}
