//! Error types for the CLI

use std::path::PathBuf;

use ecma_parser::ParseError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// A file could not be read
    #[error("could not read '{}': {source}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The options file is not valid JSON for [`ecma_parser::Options`]
    #[error("invalid options file '{}': {source}", path.display())]
    Config {
        /// Options file
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },

    /// The syntax tree could not be serialized
    #[error("could not serialize syntax tree: {0}")]
    Json(#[from] serde_json::Error),

    /// The source text is not a valid program
    #[error("{name}:{error}")]
    Parse {
        /// File name, or `<eval>`
        name: String,
        /// Diagnostic
        error: ParseError,
    },

    /// Neither files nor `--eval` were given
    #[error("no input: pass one or more files or --eval <CODE>")]
    NoInput,
}

impl CliError {
    /// The parse diagnostic, when this is a syntax error.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            CliError::Parse { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use ecma_parser::{parse_script, Options};

    #[test]
    fn test_parse_error_display() {
        let error = parse_script("let a; let a;", &Options::default()).unwrap_err();
        let err = CliError::Parse {
            name: "input.js".to_string(),
            error,
        };
        assert_eq!(err.to_string(), "input.js:[1:11]: Identifier 'a' has already been declared");
        assert!(err.parse_error().is_some());
    }

    #[test]
    fn test_io_error_display() {
        let err = CliError::Io {
            path: PathBuf::from("missing.js"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "could not read 'missing.js': not found");
        assert!(err.parse_error().is_none());
    }
}
