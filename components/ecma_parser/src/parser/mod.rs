//! Recursive descent parser.
//!
//! [`Parser`] pulls tokens from the [`Lexer`] on demand and builds the ESTree
//! tree in a single pass. Every production takes the [`Context`] it is parsed
//! in and the [`ScopeId`] bindings are declared into; expression productions
//! also leave [`Parser::assignable`] and [`Parser::destructible`] describing
//! the node they returned so the caller can resolve cover grammars (a
//! parenthesized expression that turns out to be arrow parameters, an object
//! literal that turns out to be a destructuring pattern) without
//! backtracking.
//!
//! The productions are split by area:
//!
//! - `statement` - statements, declarations and labels
//! - `expression` - operators, primaries, literals and the cover grammars
//! - `pattern` - binding patterns and literal-to-pattern reinterpretation
//! - `function` - functions, arrows, parameters and bodies
//! - `class` - class bodies, elements and decorators
//! - `module` - import and export declarations
//! - `jsx` - JSX elements and fragments

mod class;
mod expression;
mod function;
mod jsx;
mod module;
mod pattern;
mod statement;

use core_types::SourceLocation;
use tracing::{debug, trace};

use crate::ast::{Expression, ExpressionStatement, Identifier, Literal, LiteralValue, Program, Span, Statement};
use crate::context::{AssignKind, Context, Destructible, Flags};
use crate::error::{syntax_error, unexpected_token, ErrorMessage, ParseError, ParseResult};
use crate::lexer::{Comment, Lexer, LexerFlags, Marker, TokenValue};
use crate::options::Options;
use crate::regexp::RegexValidator;
use crate::scope::{BindingKind, PendingError, PrivateScopes, ScopeId, ScopeKind, ScopeTree};
use crate::token::Token;

/// A token reported to the `on_token` hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenEvent {
    /// Token kind
    pub kind: Token,
    /// Source text of the token
    pub value: String,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
}

/// Callbacks invoked while parsing.
#[derive(Default)]
pub struct Hooks<'a> {
    /// Called for every comment, in source order
    pub on_comment: Option<Box<dyn FnMut(&Comment) + 'a>>,
    /// Called for every token, in source order
    pub on_token: Option<Box<dyn FnMut(&TokenEvent) + 'a>>,
}

impl std::fmt::Debug for Hooks<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("on_comment", &self.on_comment.is_some())
            .field("on_token", &self.on_token.is_some())
            .finish()
    }
}

/// A label in scope for `break` and `continue`.
#[derive(Debug, Clone)]
struct Label {
    name: String,
    iteration: bool,
}

/// The parser. One instance parses one source text.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    options: Options,
    hooks: Hooks<'a>,
    /// Last scanned token, held back until the next one so a `}` rescanned as
    /// a template continuation is never reported
    held_token: Option<TokenEvent>,
    scopes: ScopeTree,
    private_scopes: PrivateScopes,
    flags: Flags,
    /// Whether the last expression is a simple assignment target
    assignable: AssignKind,
    /// Whether the last expression can still become a pattern
    destructible: Destructible,
    labels: Vec<Label>,
    label_chain_start: Option<usize>,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `source`.
    pub fn new(source: &'a str, options: &Options) -> Self {
        Self {
            lexer: Lexer::new(source, options),
            options: options.clone(),
            hooks: Hooks::default(),
            held_token: None,
            scopes: ScopeTree::new(),
            private_scopes: PrivateScopes::new(),
            flags: Flags::empty(),
            assignable: AssignKind::CannotAssign,
            destructible: Destructible::empty(),
            labels: Vec::new(),
            label_chain_start: None,
        }
    }

    /// Installs comment and token callbacks.
    pub fn with_hooks(mut self, hooks: Hooks<'a>) -> Self {
        self.lexer.collect_comments(hooks.on_comment.is_some());
        self.hooks = hooks;
        self
    }

    /// Replaces the regular expression validator.
    pub fn with_regex_validator(mut self, validator: Box<dyn RegexValidator + 'a>) -> Self {
        self.lexer.set_regex_validator(validator);
        self
    }

    /// Parses the whole source text. Error indices count characters.
    pub fn parse_program(self) -> ParseResult<Program> {
        let source = self.lexer.source();
        self.parse_top_level().map_err(|err| err.with_character_index(source))
    }

    fn parse_top_level(mut self) -> ParseResult<Program> {
        let context = self.options.initial_context();
        debug!(
            source_type = ?self.options.source_type,
            bytes = self.lexer.source().len(),
            "parse start"
        );
        let start = Marker {
            index: 0,
            line: 1,
            column: 0,
        };
        self.next(context | Context::ALLOW_REGEXP)?;
        let scope = self.scopes.enter(None, ScopeKind::TopLevel);
        let mut body = Vec::new();
        let (context, _) = self.parse_directives(context, scope, &mut body)?;
        while self.lexer.token != Token::EOF {
            let statement = if context.contains(Context::MODULE) {
                self.parse_module_item(context, scope)?
            } else {
                self.parse_statement_list_item(context, scope)?
            };
            body.push(statement);
        }
        if context.contains(Context::MODULE) {
            self.scopes.check_exported_bindings(scope).map_err(pending_error)?;
        }
        self.scopes.leave(scope);
        let span = self.span_between(start, self.lexer.marker());
        debug!(statements = body.len(), "parse finished");
        Ok(Program {
            source_type: self.options.source_type,
            body,
            span,
        })
    }

    // ------------------------------------------------------------------
    // Token stream
    // ------------------------------------------------------------------

    /// Advances to the next token.
    fn next(&mut self, context: Context) -> ParseResult<()> {
        self.lexer.next(context)?;
        self.report_scanned();
        Ok(())
    }

    /// Advances in JSX tag mode.
    fn next_jsx_tag(&mut self, context: Context) -> ParseResult<()> {
        self.lexer.next_jsx_tag(context)?;
        self.report_scanned();
        Ok(())
    }

    /// Advances in JSX child mode.
    fn next_jsx_child(&mut self) -> ParseResult<()> {
        self.lexer.next_jsx_child()?;
        self.report_scanned();
        Ok(())
    }

    /// Rescans the current `}` as the continuation of a template.
    fn next_template_part(&mut self, context: Context) -> ParseResult<()> {
        self.lexer.scan_template_continuation(context)?;
        self.held_token = None;
        self.report_scanned();
        Ok(())
    }

    fn report_scanned(&mut self) {
        if let Some(on_token) = self.hooks.on_token.as_mut() {
            if let Some(held) = self.held_token.take() {
                on_token(&held);
            }
        }
        if let Some(on_comment) = self.hooks.on_comment.as_mut() {
            for comment in self.lexer.drain_comments() {
                on_comment(&comment);
            }
        }
        if self.hooks.on_token.is_some() && self.lexer.token != Token::EOF {
            self.held_token = Some(TokenEvent {
                kind: self.lexer.token,
                value: self.lexer.raw().to_string(),
                start: self.lexer.token_start.index,
                end: self.lexer.marker().index,
            });
        }
    }

    /// The token after the current one and whether a newline precedes it.
    fn peek(&mut self, context: Context) -> ParseResult<(Token, bool)> {
        self.lexer.peek_token(context)
    }

    /// Consumes `token` if it is current.
    fn consume(&mut self, context: Context, token: Token) -> ParseResult<bool> {
        if self.lexer.token == token {
            self.next(context)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consumes `token` or fails.
    fn expect(&mut self, context: Context, token: Token) -> ParseResult<()> {
        if self.lexer.token != token {
            return Err(syntax_error(
                ErrorMessage::Expected {
                    expected: token.text(),
                    found: self.found_text(),
                },
                self.lexer.token_start.position(),
            ));
        }
        self.next(context)
    }

    /// Consumes a `;` or applies automatic semicolon insertion.
    fn consume_semicolon(&mut self, context: Context) -> ParseResult<()> {
        let token = self.lexer.token;
        if token == Token::SEMICOLON {
            return self.next(context | Context::ALLOW_REGEXP);
        }
        if token.is_auto_semicolon() || self.lexer.has_newline_before() {
            return Ok(());
        }
        Err(self.unexpected())
    }

    /// Takes the decoded name of the current identifier-like token.
    fn take_name(&mut self) -> String {
        match std::mem::take(&mut self.lexer.value) {
            TokenValue::Name(name) => name,
            _ => self.lexer.raw().to_string(),
        }
    }

    /// Builds an identifier from the current token without validating it.
    fn parse_identifier_name(&mut self, context: Context) -> ParseResult<Identifier> {
        let start = self.lexer.token_start;
        let name = self.take_name();
        self.next(context)?;
        Ok(Identifier {
            name,
            span: self.finish(start),
        })
    }

    // ------------------------------------------------------------------
    // Positions
    // ------------------------------------------------------------------

    fn start(&self) -> Marker {
        self.lexer.token_start
    }

    /// Span from `start` to the end of the last consumed token.
    fn finish(&self, start: Marker) -> Span {
        self.span_between(start, self.lexer.prev_end)
    }

    fn span_between(&self, start: Marker, end: Marker) -> Span {
        let mut span = Span::default();
        if self.options.ranges {
            span.start = Some(start.index);
            span.end = Some(end.index);
            span.range = Some([start.index, end.index]);
        }
        if self.options.loc {
            span.loc = Some(
                SourceLocation::new(start.position(), end.position()).with_source(self.options.source.clone()),
            );
        }
        span
    }

    /// A literal node for the current token's text ending at `prev_end`.
    fn literal(&self, start: Marker, value: LiteralValue) -> Literal {
        let raw = self
            .options
            .raw
            .then(|| self.lexer.slice(start.index, self.lexer.prev_end.index).to_string());
        Literal {
            value,
            raw,
            regex: None,
            bigint: None,
            span: self.finish(start),
        }
    }

    // ------------------------------------------------------------------
    // Errors
    // ------------------------------------------------------------------

    fn error_at(&self, at: Marker, message: ErrorMessage) -> ParseError {
        syntax_error(message, at.position())
    }

    fn error_here(&self, message: ErrorMessage) -> ParseError {
        self.error_at(self.lexer.token_start, message)
    }

    fn found_text(&self) -> String {
        if self.lexer.token == Token::EOF {
            Token::EOF.text().to_string()
        } else {
            self.lexer.raw().to_string()
        }
    }

    /// Error for the current token in a position where it cannot appear.
    fn unexpected(&self) -> ParseError {
        let token = self.lexer.token;
        if token.is_escaped() && token.is_keyword() {
            return self.error_here(ErrorMessage::EscapedKeyword);
        }
        unexpected_token(self.found_text(), self.lexer.token_start.position())
    }

    // ------------------------------------------------------------------
    // Identifiers and bindings
    // ------------------------------------------------------------------

    /// Validates a name being bound by a declaration, parameter or pattern.
    fn check_binding_identifier(
        &mut self,
        context: Context,
        token: Token,
        name: &str,
        kind: BindingKind,
        at: Marker,
    ) -> ParseResult<()> {
        if context.is_strict() && (name == "eval" || name == "arguments") {
            return Err(self.error_at(at, ErrorMessage::StrictEvalArguments));
        }
        if kind.intersects(BindingKind::LET | BindingKind::CONST | BindingKind::CLASS) && name == "let" {
            return Err(self.error_at(at, ErrorMessage::LetAsLexicalName));
        }
        self.check_identifier_reference(context, token, name, at)
    }

    /// Validates a name used as an identifier reference or label.
    fn check_identifier_reference(&mut self, context: Context, token: Token, name: &str, at: Marker) -> ParseResult<()> {
        let plain = token.unescaped();
        if plain.is_keyword() {
            let message = if token.is_escaped() {
                ErrorMessage::EscapedKeyword
            } else {
                ErrorMessage::ReservedWord(name.to_string())
            };
            return Err(self.error_at(at, message));
        }
        if context.is_strict() && plain.is_strict_reserved() {
            return Err(self.error_at(at, ErrorMessage::StrictReservedWord(name.to_string())));
        }
        match name {
            "yield" if context.intersects(Context::IN_YIELD_CONTEXT) => {
                return Err(self.error_at(at, ErrorMessage::ReservedWord(name.to_string())));
            }
            "await" => {
                if context.intersects(Context::IN_AWAIT_CONTEXT | Context::MODULE | Context::IN_STATIC_BLOCK) {
                    return Err(self.error_at(at, ErrorMessage::ReservedWord(name.to_string())));
                }
                self.flags |= Flags::SEEN_AWAIT_IDENT;
            }
            "arguments" if context.intersects(Context::IN_CLASS_FIELD_INIT | Context::IN_STATIC_BLOCK) => {
                return Err(self.error_at(at, ErrorMessage::ArgumentsInClassInit));
            }
            _ => {}
        }
        Ok(())
    }

    /// Declares `name` in `scope` with the rule its kind calls for.
    fn declare(&mut self, context: Context, scope: ScopeId, name: &str, kind: BindingKind, at: Marker) -> ParseResult<()> {
        let result = if kind.contains(BindingKind::ARGUMENT_LIST) {
            self.scopes.declare_parameter(scope, name, at.position());
            Ok(())
        } else if kind.intersects(BindingKind::VAR_LIKE) {
            self.scopes.declare_var(scope, name, kind, context, at.position())
        } else {
            self.scopes.declare_lexical(scope, name, kind, context)
        };
        result.map_err(|message| self.error_at(at, message))
    }

    // ------------------------------------------------------------------
    // Directive prologues
    // ------------------------------------------------------------------

    /// Parses the directive prologue of a program or function body into
    /// `body`. Returns the context for the rest of the body and whether a
    /// `"use strict"` directive was seen.
    fn parse_directives(
        &mut self,
        mut context: Context,
        scope: ScopeId,
        body: &mut Vec<Statement>,
    ) -> ParseResult<(Context, bool)> {
        let mut use_strict = false;
        self.flags.remove(Flags::OCTAL_IN_PROLOGUE);
        while self.lexer.token == Token::STRING {
            let start = self.start();
            let raw = self.lexer.raw();
            let octal = self
                .lexer
                .flags
                .intersects(LexerFlags::OCTAL | LexerFlags::EIGHT_OR_NINE_ESCAPE);
            let expression = self.parse_expression(context, scope)?;
            let is_directive = matches!(expression, Expression::Literal(_));
            self.consume_semicolon(context)?;
            if !is_directive {
                body.push(Statement::Expression(ExpressionStatement {
                    expression,
                    directive: None,
                    span: self.finish(start),
                }));
                break;
            }
            let directive = &raw[1..raw.len() - 1];
            if directive == "use strict" {
                use_strict = true;
                if !context.is_strict() {
                    trace!(index = start.index, "strict mode directive");
                }
                context |= Context::STRICT;
                if self.flags.contains(Flags::OCTAL_IN_PROLOGUE) {
                    return Err(self.error_at(start, ErrorMessage::StrictOctalEscape));
                }
                self.check_strict_lookahead()?;
            } else if octal {
                self.flags |= Flags::OCTAL_IN_PROLOGUE;
            }
            body.push(Statement::Expression(ExpressionStatement {
                expression,
                directive: Some(directive.to_string()),
                span: self.finish(start),
            }));
        }
        self.flags.remove(Flags::OCTAL_IN_PROLOGUE);
        Ok((context, use_strict))
    }

    /// The token after a `"use strict"` directive was scanned in sloppy mode.
    fn check_strict_lookahead(&self) -> ParseResult<()> {
        let octal = self.lexer.flags.contains(LexerFlags::OCTAL);
        let eight_or_nine = self.lexer.flags.contains(LexerFlags::EIGHT_OR_NINE_ESCAPE);
        let message = match self.lexer.token {
            Token::NUMBER if octal => {
                let digits = self.lexer.raw();
                if digits.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
                    ErrorMessage::StrictOctalLiteral
                } else {
                    ErrorMessage::StrictLeadingZero
                }
            }
            Token::STRING if octal => ErrorMessage::StrictOctalEscape,
            Token::STRING if eight_or_nine => ErrorMessage::StrictEightOrNine,
            _ => return Ok(()),
        };
        Err(self.error_here(message))
    }

    /// Raises the duplicate-parameter error deferred on `scope`, if any.
    fn raise_pending(&mut self, scope: ScopeId) -> ParseResult<()> {
        match self.scopes.take_pending(scope) {
            Some(pending) => Err(pending_error(pending)),
            None => Ok(()),
        }
    }
}

fn pending_error(pending: PendingError) -> ParseError {
    syntax_error(pending.message, pending.position)
}
