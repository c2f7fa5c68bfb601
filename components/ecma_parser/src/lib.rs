//! ECMAScript Parser Component
//!
//! Single-pass front end that turns ECMAScript source text (optionally with
//! JSX) into an ESTree-shaped syntax tree, rejecting invalid programs with a
//! positioned diagnostic at the first early error.
//!
//! # Overview
//!
//! - [`Lexer`] - Context-sensitive tokenizer
//! - [`Token`] - Packed token kinds with precedence and classification bits
//! - [`Parser`] - Recursive descent parser with cover grammars
//! - [`ast`] - ESTree node types, serializable with `serde`
//! - [`ScopeTree`] - Binding validation while parsing
//! - [`Options`] - Parse mode and output options
//!
//! # Example
//!
//! ```
//! use ecma_parser::{parse_module, Options};
//!
//! let program = parse_module("export const answer = 42;", &Options::default()).unwrap();
//! assert_eq!(program.body.len(), 1);
//!
//! let err = parse_module("let x; let x;", &Options::default()).unwrap_err();
//! assert_eq!(err.line, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod chars;
pub mod context;
pub mod error;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod regexp;
pub mod scope;
pub mod token;

pub use ast::{Expression, Program, Statement};
pub use error::{ErrorMessage, ParseError, ParseResult};
pub use lexer::{Comment, CommentKind, Lexer};
pub use options::{Options, SourceType};
pub use parser::{Hooks, Parser, TokenEvent};
pub use regexp::RegexValidator;
pub use scope::{ScopeTree, ScopeKind};
pub use token::Token;

/// Parses `source` with the mode selected by `options.source_type`.
pub fn parse(source: &str, options: &Options) -> ParseResult<Program> {
    Parser::new(source, options).parse_program()
}

/// Parses `source` as a classic script.
pub fn parse_script(source: &str, options: &Options) -> ParseResult<Program> {
    let options = Options {
        source_type: SourceType::Script,
        ..options.clone()
    };
    parse(source, &options)
}

/// Parses `source` as an ECMAScript module.
pub fn parse_module(source: &str, options: &Options) -> ParseResult<Program> {
    let options = Options {
        source_type: SourceType::Module,
        ..options.clone()
    };
    parse(source, &options)
}

/// Parses `source`, reporting comments and tokens to `hooks` as they are scanned.
pub fn parse_with_hooks<'a>(source: &'a str, options: &Options, hooks: Hooks<'a>) -> ParseResult<Program> {
    Parser::new(source, options).with_hooks(hooks).parse_program()
}
