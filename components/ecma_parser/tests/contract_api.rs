//! Contract tests for the public parser API
//!
//! These tests verify the entry points, options and diagnostics behave as
//! documented.

use core_types::ErrorCategory;
use ecma_parser::context::Context;
use ecma_parser::{
    parse, parse_module, parse_script, parse_with_hooks, Hooks, Lexer, Options, ParseError, Parser, Program,
    SourceType, Statement, Token,
};

// =============================================================================
// Entry points
// =============================================================================

#[test]
fn test_parse_script_returns_program() {
    let result: Result<Program, ParseError> = parse_script("var x = 1;", &Options::default());
    let program = result.unwrap();
    assert_eq!(program.source_type, SourceType::Script);
    assert_eq!(program.body.len(), 1);
}

#[test]
fn test_parse_module_is_strict() {
    let err = parse_module("var eval = 1;", &Options::default()).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::StrictMode);
    assert!(parse_script("var eval = 1;", &Options::default()).is_ok());
}

#[test]
fn test_parse_follows_source_type() {
    let options = Options {
        source_type: SourceType::Module,
        ..Options::default()
    };
    let program = parse("export {};", &options).unwrap();
    assert_eq!(program.source_type, SourceType::Module);
    assert!(parse("export {};", &Options::default()).is_err());
}

#[test]
fn test_commonjs_allows_top_level_return() {
    let options = Options {
        source_type: SourceType::Commonjs,
        ..Options::default()
    };
    assert!(parse("return 1;", &options).is_ok());
    assert!(parse("return 1;", &Options::default()).is_err());
}

#[test]
fn test_top_level_await_in_modules_only() {
    assert!(parse_module("await x;", &Options::default()).is_ok());
    assert!(parse_script("await x;", &Options::default()).is_err());
    assert!(parse_script("await;", &Options::default()).is_ok());
}

#[test]
fn test_parser_struct_matches_free_functions() {
    let source = "let [a, b] = c; function f() { return a + b }";
    let direct = Parser::new(source, &Options::default()).parse_program().unwrap();
    let free = parse_script(source, &Options::default()).unwrap();
    assert_eq!(direct, free);
}

// =============================================================================
// Options
// =============================================================================

#[test]
fn test_options_deserialize_from_camel_case_json() {
    let options: Options = serde_json::from_str(
        r#"{ "sourceType": "module", "ranges": true, "allowNextSyntax": true, "preserveParens": true, "webCompat": true }"#,
    )
    .unwrap();
    assert_eq!(options.source_type, SourceType::Module);
    assert!(options.ranges);
    assert!(options.next);
    assert!(options.preserve_parens);
    assert!(options.web_compat);
    assert!(!options.loc);
}

#[test]
fn test_implied_strict() {
    let options = Options {
        implied_strict: true,
        ..Options::default()
    };
    assert!(parse_script("with (a) {}", &options).is_err());
}

#[test]
fn test_ranges_and_loc_attach_positions() {
    let options = Options {
        ranges: true,
        loc: true,
        source: Some("input.js".into()),
        ..Options::default()
    };
    let program = parse_script("a;\nbb;", &options).unwrap();
    assert_eq!(program.span.range, Some([0, 6]));
    match &program.body[1] {
        Statement::Expression(statement) => {
            assert_eq!(statement.span.range, Some([3, 6]));
            let loc = statement.span.loc.as_ref().unwrap();
            assert_eq!((loc.start.line, loc.start.column), (2, 0));
            assert_eq!((loc.end.line, loc.end.column), (2, 3));
            assert_eq!(loc.source.as_deref(), Some("input.js"));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_positions_absent_by_default() {
    let program = parse_script("a;", &Options::default()).unwrap();
    assert!(program.span.is_empty());
}

// =============================================================================
// Diagnostics
// =============================================================================

#[test]
fn test_error_position_and_display() {
    let err = parse_script("var a;\nlet b;\n  let b;", &Options::default()).unwrap_err();
    assert_eq!(err.line, 3);
    assert_eq!(err.column, 6);
    assert_eq!(err.to_string(), "[3:6]: Identifier 'b' has already been declared");
    assert_eq!(err.category(), ErrorCategory::Binding);
}

#[test]
fn test_error_index_counts_characters() {
    let err = parse_script("'é'; @", &Options::default()).unwrap_err();
    assert_eq!(err.index, 5);
    assert_eq!(err.column, 5);

    let err = parse_script("é; let x; let x;", &Options::default()).unwrap_err();
    assert_eq!((err.index, err.line, err.column), (14, 1, 14));

    let err = parse_script("'é';\nlet y; let y;", &Options::default()).unwrap_err();
    assert_eq!((err.index, err.line, err.column), (16, 2, 11));
}

#[test]
fn test_parse_error_is_std_error() {
    fn assert_error<E: std::error::Error>(_: &E) {}
    let err = parse_script("(", &Options::default()).unwrap_err();
    assert_error(&err);
}

// =============================================================================
// Lexer and hooks
// =============================================================================

#[test]
fn test_lexer_scans_tokens() {
    let options = Options::default();
    let mut lexer = Lexer::new("let x = 42;", &options);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next(Context::ALLOW_REGEXP).unwrap();
        if token == Token::EOF {
            break;
        }
        tokens.push(token);
    }
    assert_eq!(
        tokens,
        vec![Token::LET, Token::IDENTIFIER, Token::ASSIGN, Token::NUMBER, Token::SEMICOLON]
    );
}

#[test]
fn test_token_hook_sees_every_token_once() {
    let mut seen = Vec::new();
    let hooks = Hooks {
        on_comment: None,
        on_token: Some(Box::new(|token: &ecma_parser::TokenEvent| {
            seen.push((token.start, token.end))
        })),
    };
    parse_with_hooks("a = b ? c : d;", &Options::default(), hooks).unwrap();
    assert_eq!(seen, vec![(0, 1), (2, 3), (4, 5), (6, 7), (8, 9), (10, 11), (12, 13), (13, 14)]);
}
