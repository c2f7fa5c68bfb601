//! Parse orchestration
//!
//! The [`Runner`] turns inputs into printable output. Files are independent,
//! so several of them are parsed on scoped threads, one parser per thread,
//! and the results are returned in input order.

use std::path::{Path, PathBuf};
use std::thread;

use ecma_parser::{parse, Options, ParseError};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

/// Name used for `--eval` input.
pub const EVAL_NAME: &str = "<eval>";

/// One source text to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    /// File name, or [`EVAL_NAME`]
    pub name: String,
    /// Source text
    pub source: String,
}

impl Input {
    /// Inline source text.
    pub fn eval(source: impl Into<String>) -> Self {
        Self {
            name: EVAL_NAME.to_string(),
            source: source.into(),
        }
    }

    /// Reads `path` into an input named after it.
    pub fn read(path: &Path) -> CliResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            name: path.display().to_string(),
            source,
        })
    }
}

/// How a parse error is reported with `--json-errors`.
#[derive(Debug, Serialize)]
pub struct ErrorReport<'a> {
    /// Input name
    pub file: &'a str,
    /// Character offset
    pub index: usize,
    /// Line number (1-indexed)
    pub line: u32,
    /// Column (0-indexed)
    pub column: u32,
    /// Diagnostic category
    pub category: &'static str,
    /// Message text
    pub message: String,
}

impl<'a> ErrorReport<'a> {
    /// Builds the report for `error` raised while parsing `file`.
    pub fn new(file: &'a str, error: &ParseError) -> Self {
        Self {
            file,
            index: error.index,
            line: error.line,
            column: error.column,
            category: error.category().as_str(),
            message: error.message.to_string(),
        }
    }
}

/// Parses inputs with a fixed set of options.
#[derive(Debug, Clone)]
pub struct Runner {
    options: Options,
    pretty: bool,
    check_only: bool,
}

impl Runner {
    /// Creates a runner printing pretty JSON.
    pub fn new(options: Options) -> Self {
        Self {
            options,
            pretty: true,
            check_only: false,
        }
    }

    /// Print single-line JSON instead of pretty JSON.
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.pretty = !compact;
        self
    }

    /// Only check syntax; successful inputs produce no output.
    pub fn with_check_only(mut self, check_only: bool) -> Self {
        self.check_only = check_only;
        self
    }

    /// Parses one input, returning its JSON (empty in check-only mode).
    pub fn run_one(&self, input: &Input) -> CliResult<String> {
        let options = Options {
            source: self.options.source.clone().or_else(|| {
                (self.options.loc && input.name != EVAL_NAME).then(|| input.name.clone())
            }),
            ..self.options.clone()
        };
        debug!(file = %input.name, bytes = input.source.len(), "parsing");
        let program = parse(&input.source, &options).map_err(|error| CliError::Parse {
            name: input.name.clone(),
            error,
        })?;
        if self.check_only {
            return Ok(String::new());
        }
        let json = if self.pretty {
            serde_json::to_string_pretty(&program)?
        } else {
            serde_json::to_string(&program)?
        };
        Ok(json)
    }

    /// Parses every input, in parallel when there is more than one.
    ///
    /// Results are in input order.
    pub fn run_all(&self, inputs: &[Input]) -> Vec<CliResult<String>> {
        if inputs.len() < 2 {
            return inputs.iter().map(|input| self.run_one(input)).collect();
        }
        info!(files = inputs.len(), "parsing in parallel");
        thread::scope(|s| {
            let handles: Vec<_> = inputs
                .iter()
                .map(|input| s.spawn(move || self.run_one(input)))
                .collect();
            handles
                .into_iter()
                .zip(inputs)
                .map(|(handle, input)| {
                    handle.join().unwrap_or_else(|_| {
                        Err(CliError::Io {
                            path: PathBuf::from(&input.name),
                            source: std::io::Error::new(std::io::ErrorKind::Other, "parser thread panicked"),
                        })
                    })
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecma_parser::SourceType;

    #[test]
    fn test_run_one_prints_estree() {
        let runner = Runner::new(Options::default()).with_compact(true);
        let json = runner.run_one(&Input::eval("a;")).unwrap();
        assert_eq!(
            json,
            r#"{"type":"Program","sourceType":"script","body":[{"type":"ExpressionStatement","expression":{"type":"Identifier","name":"a"}}]}"#
        );
    }

    #[test]
    fn test_check_only_prints_nothing() {
        let runner = Runner::new(Options::default()).with_check_only(true);
        assert_eq!(runner.run_one(&Input::eval("a;")).unwrap(), "");
    }

    #[test]
    fn test_parse_error_names_input() {
        let runner = Runner::new(Options::default());
        let err = runner.run_one(&Input::eval("let a; let a;")).unwrap_err();
        assert!(err.to_string().starts_with("<eval>:[1:11]"));
    }

    #[test]
    fn test_loc_source_is_file_name() {
        let options = Options {
            loc: true,
            ..Options::default()
        };
        let runner = Runner::new(options).with_compact(true);
        let input = Input {
            name: "a.js".to_string(),
            source: "x".to_string(),
        };
        let json = runner.run_one(&input).unwrap();
        assert!(json.contains(r#""source":"a.js""#));
        let eval = runner.run_one(&Input::eval("x")).unwrap();
        assert!(!eval.contains(r#""source""#));
    }

    #[test]
    fn test_run_all_keeps_order() {
        let runner = Runner::new(Options {
            source_type: SourceType::Module,
            ..Options::default()
        })
        .with_check_only(true);
        let inputs: Vec<Input> = ["export {};", "with (a) {}", "let x;"]
            .iter()
            .map(|source| Input::eval(*source))
            .collect();
        let results = runner.run_all(&inputs);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_error_report() {
        let error = parse("\n  @", &Options::default()).unwrap_err();
        let report = ErrorReport::new("a.js", &error);
        assert_eq!(report.line, 2);
        assert_eq!(report.column, 2);
        assert_eq!(report.index, 3);
        assert_eq!(report.category, "syntax");
    }
}
