//! On-demand tokenizer.
//!
//! The parser pulls one token at a time with [`Lexer::next`], passing the
//! current [`Context`] so the lexer can tell a regular expression from a
//! division and apply strict-mode rules to literals. The scanned token's kind
//! is stored in [`Lexer::token`], its decoded payload in [`Lexer::value`] and
//! its extent in [`Lexer::token_start`] / [`Lexer::prev_end`].

mod jsx;
mod numeric;
mod regexp;
mod string;
mod template;

use bitflags::bitflags;
use core_types::{SourceLocation, SourcePosition};
use num_bigint::BigInt;
use serde::Serialize;

use crate::chars::{is_id_part, is_id_start, is_line_terminator, is_whitespace, EOF_CHAR};
use crate::context::Context;
use crate::error::{syntax_error, ErrorMessage, ParseError, ParseResult};
use crate::options::Options;
use crate::regexp::{BestEffortValidator, RegexValidator};
use crate::token::{keyword, Token};

/// A point in the source: byte index plus line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Marker {
    /// Byte offset
    pub index: usize,
    /// Line (1-indexed)
    pub line: u32,
    /// Column in characters (0-indexed)
    pub column: u32,
}

impl Marker {
    /// The marker as a [`SourcePosition`].
    pub fn position(self) -> SourcePosition {
        SourcePosition::new(self.line, self.column, self.index)
    }
}

/// Decoded payload of the current token.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TokenValue {
    /// Punctuators and end of source
    #[default]
    None,
    /// Identifier, keyword or private name (without `#`), escapes decoded
    Name(String),
    /// Cooked string literal
    String(String),
    /// Numeric literal
    Number(f64),
    /// BigInt literal
    BigInt(BigInt),
    /// Template part
    Template {
        /// Escapes decoded; `None` after a malformed escape in a tagged template
        cooked: Option<String>,
        /// Raw text with line terminators normalized
        raw: String,
    },
    /// Regular expression literal
    RegExp {
        /// Body
        pattern: String,
        /// Flags
        flags: String,
        /// Whether the validator accepted the body
        valid: bool,
    },
    /// JSX text run
    JsxText(String),
}

/// Kind of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CommentKind {
    /// `// ...`
    SingleLine,
    /// `/* ... */`
    MultiLine,
    /// `<!-- ...`
    HtmlOpen,
    /// `--> ...` at the start of a line
    HtmlClose,
    /// `#! ...` on the first line
    HashBang,
}

/// A comment reported to the `on_comment` hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    /// Comment syntax
    pub kind: CommentKind,
    /// Text without the delimiters
    pub value: String,
    /// Byte offset of the opening delimiter
    pub start: usize,
    /// Byte offset one past the end
    pub end: usize,
    /// Line/column location
    pub loc: SourceLocation,
}

bitflags! {
    /// Facts about the most recently scanned token.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LexerFlags: u8 {
        /// A line terminator precedes the token
        const NEW_LINE = 1 << 0;
        /// The token contains a legacy octal literal or escape
        const OCTAL = 1 << 1;
        /// The token contains `\8` or `\9`
        const EIGHT_OR_NINE_ESCAPE = 1 << 2;
        /// The token contains an escape sequence
        const ESCAPED = 1 << 3;
    }
}

/// Saved lexer state for one-token lookahead.
#[derive(Debug, Clone)]
pub(crate) struct Checkpoint {
    index: usize,
    line: u32,
    column: u32,
    token: Token,
    value: TokenValue,
    token_start: Marker,
    prev_end: Marker,
    flags: LexerFlags,
    comments: usize,
}

/// The tokenizer.
pub struct Lexer<'a> {
    source: &'a str,
    index: usize,
    line: u32,
    column: u32,
    /// Kind of the current token
    pub token: Token,
    /// Payload of the current token
    pub value: TokenValue,
    /// Where the current token starts
    pub token_start: Marker,
    /// Where the previous token ended
    pub prev_end: Marker,
    /// Facts about the current token
    pub flags: LexerFlags,
    /// First malformed escape of the current template part
    pub template_error: Option<ParseError>,
    comments: Vec<Comment>,
    collect_comments: bool,
    module: bool,
    web_compat: bool,
    validate_regex: bool,
    source_name: Option<String>,
    validator: Box<dyn RegexValidator + 'a>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned before the first token.
    pub fn new(source: &'a str, options: &Options) -> Self {
        let origin = Marker {
            index: 0,
            line: 1,
            column: 0,
        };
        Self {
            source,
            index: 0,
            line: 1,
            column: 0,
            token: Token::EOF,
            value: TokenValue::None,
            token_start: origin,
            prev_end: origin,
            flags: LexerFlags::empty(),
            template_error: None,
            comments: Vec::new(),
            collect_comments: false,
            module: options.is_module(),
            web_compat: options.web_compat,
            validate_regex: options.validate_regex,
            source_name: options.source.clone(),
            validator: Box::new(BestEffortValidator),
        }
    }

    /// Replaces the regular expression validator.
    pub fn set_regex_validator(&mut self, validator: Box<dyn RegexValidator + 'a>) {
        self.validator = validator;
    }

    /// Buffer comments for [`Lexer::drain_comments`].
    pub fn collect_comments(&mut self, enabled: bool) {
        self.collect_comments = enabled;
    }

    /// Takes the comments skipped since the last call.
    pub fn drain_comments(&mut self) -> std::vec::Drain<'_, Comment> {
        self.comments.drain(..)
    }

    /// The whole source text.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Source text of the current token.
    pub fn raw(&self) -> &'a str {
        &self.source[self.token_start.index..self.index]
    }

    /// Source text between two byte offsets.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }

    /// Where the cursor is.
    pub fn marker(&self) -> Marker {
        Marker {
            index: self.index,
            line: self.line,
            column: self.column,
        }
    }

    /// A line terminator separates the current token from the previous one.
    pub fn has_newline_before(&self) -> bool {
        self.flags.contains(LexerFlags::NEW_LINE)
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            index: self.index,
            line: self.line,
            column: self.column,
            token: self.token,
            value: self.value.clone(),
            token_start: self.token_start,
            prev_end: self.prev_end,
            flags: self.flags,
            comments: self.comments.len(),
        }
    }

    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        self.index = checkpoint.index;
        self.line = checkpoint.line;
        self.column = checkpoint.column;
        self.token = checkpoint.token;
        self.value = checkpoint.value;
        self.token_start = checkpoint.token_start;
        self.prev_end = checkpoint.prev_end;
        self.flags = checkpoint.flags;
        self.comments.truncate(checkpoint.comments);
    }

    /// Scans the token after the current one without consuming it.
    /// Returns its kind and whether a line terminator precedes it.
    pub fn peek_token(&mut self, context: Context) -> ParseResult<(Token, bool)> {
        let saved = self.checkpoint();
        let result = self.next(context).map(|token| (token, self.has_newline_before()));
        self.restore(saved);
        result
    }

    /// Advances to the next token.
    pub fn next(&mut self, context: Context) -> ParseResult<Token> {
        self.prev_end = self.marker();
        self.flags = LexerFlags::empty();
        self.skip_trivia(context)?;
        self.token_start = self.marker();
        self.value = TokenValue::None;
        let token = self.scan(context)?;
        self.token = token;
        Ok(token)
    }

    // ------------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------------

    fn rest(&self) -> &'a str {
        &self.source[self.index..]
    }

    fn peek(&self) -> u32 {
        self.rest().chars().next().map_or(EOF_CHAR, |c| c as u32)
    }

    fn byte_at(&self, offset: usize) -> u8 {
        self.source.as_bytes().get(self.index + offset).copied().unwrap_or(0)
    }

    /// Advances over one character of any width.
    fn advance(&mut self) -> Option<char> {
        let c = self.rest().chars().next()?;
        self.index += c.len_utf8();
        self.column += 1;
        Some(c)
    }

    /// Advances over `n` ASCII bytes.
    fn bump(&mut self, n: usize) {
        self.index += n;
        self.column += n as u32;
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.byte_at(0) == byte {
            self.bump(1);
            true
        } else {
            false
        }
    }

    /// Consumes a line terminator, treating CRLF as one.
    fn consume_newline(&mut self) {
        if self.byte_at(0) == b'\r' && self.byte_at(1) == b'\n' {
            self.index += 2;
        } else {
            self.advance();
        }
        self.line += 1;
        self.column = 0;
    }

    fn position(&self) -> SourcePosition {
        self.marker().position()
    }

    fn error(&self, message: ErrorMessage) -> ParseError {
        syntax_error(message, self.position())
    }

    // ------------------------------------------------------------------
    // Trivia
    // ------------------------------------------------------------------

    fn skip_trivia(&mut self, context: Context) -> ParseResult<()> {
        if self.index == 0 && self.rest().starts_with("#!") {
            self.skip_line_comment(2, CommentKind::HashBang);
        }
        loop {
            let c = self.peek();
            if c == EOF_CHAR {
                return Ok(());
            }
            if is_line_terminator(c) {
                self.consume_newline();
                self.flags |= LexerFlags::NEW_LINE;
                continue;
            }
            if is_whitespace(c) {
                self.advance();
                continue;
            }
            match c {
                0x2F if self.byte_at(1) == b'/' => self.skip_line_comment(2, CommentKind::SingleLine),
                0x2F if self.byte_at(1) == b'*' => self.skip_block_comment()?,
                0x3C if self.rest().starts_with("<!--") => {
                    if self.module || context.contains(Context::MODULE) {
                        return Err(self.error(ErrorMessage::HtmlCommentInModule));
                    }
                    if !self.web_compat {
                        return Ok(());
                    }
                    self.skip_line_comment(4, CommentKind::HtmlOpen);
                }
                0x2D if self.rest().starts_with("-->")
                    && self.web_compat
                    && !self.module
                    && (self.flags.contains(LexerFlags::NEW_LINE) || self.prev_end.index == 0) =>
                {
                    self.skip_line_comment(3, CommentKind::HtmlClose);
                }
                _ => return Ok(()),
            }
        }
    }

    fn skip_line_comment(&mut self, opener: usize, kind: CommentKind) {
        let start = self.marker();
        self.bump(opener);
        let body = self.index;
        while self.peek() != EOF_CHAR && !is_line_terminator(self.peek()) {
            self.advance();
        }
        self.push_comment(kind, start, body, self.index);
    }

    fn skip_block_comment(&mut self) -> ParseResult<()> {
        let start = self.marker();
        self.bump(2);
        let body = self.index;
        loop {
            let c = self.peek();
            if c == EOF_CHAR {
                return Err(syntax_error(ErrorMessage::UnterminatedComment, start.position()));
            }
            if c == '*' as u32 && self.byte_at(1) == b'/' {
                let body_end = self.index;
                self.bump(2);
                self.push_comment(CommentKind::MultiLine, start, body, body_end);
                return Ok(());
            }
            if is_line_terminator(c) {
                self.consume_newline();
                self.flags |= LexerFlags::NEW_LINE;
            } else {
                self.advance();
            }
        }
    }

    fn push_comment(&mut self, kind: CommentKind, start: Marker, body: usize, body_end: usize) {
        if !self.collect_comments {
            return;
        }
        let end = self.marker();
        self.comments.push(Comment {
            kind,
            value: self.source[body..body_end].to_string(),
            start: start.index,
            end: end.index,
            loc: SourceLocation::new(start.position(), end.position()).with_source(self.source_name.clone()),
        });
    }

    // ------------------------------------------------------------------
    // Tokens
    // ------------------------------------------------------------------

    fn scan(&mut self, context: Context) -> ParseResult<Token> {
        let c = self.peek();
        if c == EOF_CHAR {
            return Ok(Token::EOF);
        }
        if c >= 0x80 {
            if is_id_start(c) {
                return self.scan_identifier();
            }
            let ch = char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER);
            return Err(self.error(ErrorMessage::IllegalCharacter(ch)));
        }
        let token = match c as u8 {
            b'(' => self.single(Token::LEFT_PAREN),
            b')' => self.single(Token::RIGHT_PAREN),
            b'{' => self.single(Token::LEFT_BRACE),
            b'}' => self.single(Token::RIGHT_BRACE),
            b'[' => self.single(Token::LEFT_BRACKET),
            b']' => self.single(Token::RIGHT_BRACKET),
            b';' => self.single(Token::SEMICOLON),
            b',' => self.single(Token::COMMA),
            b':' => self.single(Token::COLON),
            b'~' => self.single(Token::COMPLEMENT),
            b'@' => self.single(Token::AT),
            b'.' => {
                if self.byte_at(1).is_ascii_digit() {
                    return self.scan_number(context);
                }
                self.operator(&[("...", Token::ELLIPSIS), (".", Token::PERIOD)])
            }
            b'?' => {
                if self.byte_at(1) == b'.' && !self.byte_at(2).is_ascii_digit() {
                    self.bump(2);
                    Token::QUESTION_DOT
                } else {
                    self.operator(&[("??=", Token::COALESCE_ASSIGN), ("??", Token::COALESCE), ("?", Token::QUESTION)])
                }
            }
            b'=' => self.operator(&[
                ("=>", Token::ARROW),
                ("===", Token::STRICT_EQUAL),
                ("==", Token::LOOSE_EQUAL),
                ("=", Token::ASSIGN),
            ]),
            b'!' => self.operator(&[
                ("!==", Token::STRICT_NOT_EQUAL),
                ("!=", Token::LOOSE_NOT_EQUAL),
                ("!", Token::NOT),
            ]),
            b'+' => self.operator(&[("++", Token::INCREMENT), ("+=", Token::ADD_ASSIGN), ("+", Token::ADD)]),
            b'-' => self.operator(&[
                ("--", Token::DECREMENT),
                ("-=", Token::SUBTRACT_ASSIGN),
                ("-", Token::SUBTRACT),
            ]),
            b'*' => self.operator(&[
                ("**=", Token::EXPONENT_ASSIGN),
                ("**", Token::EXPONENT),
                ("*=", Token::MULTIPLY_ASSIGN),
                ("*", Token::MULTIPLY),
            ]),
            b'/' => {
                if context.contains(Context::ALLOW_REGEXP) {
                    return self.scan_regexp();
                }
                self.operator(&[("/=", Token::DIVIDE_ASSIGN), ("/", Token::DIVIDE)])
            }
            b'%' => self.operator(&[("%=", Token::MODULO_ASSIGN), ("%", Token::MODULO)]),
            b'<' => self.operator(&[
                ("<<=", Token::SHIFT_LEFT_ASSIGN),
                ("<<", Token::SHIFT_LEFT),
                ("<=", Token::LESS_THAN_OR_EQUAL),
                ("<", Token::LESS_THAN),
            ]),
            b'>' => self.operator(&[
                (">>>=", Token::UNSIGNED_SHIFT_RIGHT_ASSIGN),
                (">>>", Token::UNSIGNED_SHIFT_RIGHT),
                (">>=", Token::SHIFT_RIGHT_ASSIGN),
                (">>", Token::SHIFT_RIGHT),
                (">=", Token::GREATER_THAN_OR_EQUAL),
                (">", Token::GREATER_THAN),
            ]),
            b'&' => self.operator(&[
                ("&&=", Token::LOGICAL_AND_ASSIGN),
                ("&&", Token::LOGICAL_AND),
                ("&=", Token::BIT_AND_ASSIGN),
                ("&", Token::BIT_AND),
            ]),
            b'|' => self.operator(&[
                ("||=", Token::LOGICAL_OR_ASSIGN),
                ("||", Token::LOGICAL_OR),
                ("|=", Token::BIT_OR_ASSIGN),
                ("|", Token::BIT_OR),
            ]),
            b'^' => self.operator(&[("^=", Token::BIT_XOR_ASSIGN), ("^", Token::BIT_XOR)]),
            b'"' | b'\'' => return self.scan_string(context, c as u8),
            b'`' => {
                self.bump(1);
                return self.scan_template(context);
            }
            b'0'..=b'9' => return self.scan_number(context),
            b'#' => return self.scan_private_name(),
            b'\\' => return self.scan_identifier(),
            _ if is_id_start(c) => return self.scan_identifier(),
            _ => return Err(self.error(ErrorMessage::IllegalCharacter(c as u8 as char))),
        };
        Ok(token)
    }

    fn single(&mut self, token: Token) -> Token {
        self.bump(1);
        token
    }

    /// Picks the longest matching punctuator; the last candidate is the
    /// single-character fallback.
    fn operator(&mut self, candidates: &[(&'static str, Token)]) -> Token {
        let rest = self.rest();
        let (text, token) = candidates
            .iter()
            .copied()
            .find(|(text, _)| rest.starts_with(text))
            .unwrap_or(candidates[candidates.len() - 1]);
        self.bump(text.len());
        token
    }

    fn scan_identifier(&mut self) -> ParseResult<Token> {
        let (name, escaped) = self.scan_identifier_name()?;
        let token = match keyword(&name) {
            Some(token) if escaped => token.escaped(),
            Some(token) => token,
            None => Token::IDENTIFIER,
        };
        if escaped {
            self.flags |= LexerFlags::ESCAPED;
        }
        self.value = TokenValue::Name(name);
        Ok(token)
    }

    fn scan_private_name(&mut self) -> ParseResult<Token> {
        self.bump(1);
        let c = self.peek();
        if !(is_id_start(c) || c == '\\' as u32) {
            return Err(self.error(ErrorMessage::InvalidPrivateName));
        }
        let (name, _) = self.scan_identifier_name()?;
        self.value = TokenValue::Name(name);
        Ok(Token::PRIVATE_NAME)
    }

    /// Scans an `IdentifierName`, decoding `\u` escapes. Returns the name and
    /// whether it contained an escape.
    pub(crate) fn scan_identifier_name(&mut self) -> ParseResult<(String, bool)> {
        let start = self.index;
        let mut name = String::new();
        let mut escaped = false;
        loop {
            let c = self.peek();
            let first = self.index == start;
            if c == '\\' as u32 {
                let position = self.position();
                self.bump(1);
                if !self.eat(b'u') {
                    return Err(syntax_error(ErrorMessage::InvalidIdentifierEscape, position));
                }
                let cp = self
                    .scan_unicode_escape_value()
                    .map_err(|message| syntax_error(message, position))?;
                let valid = if first { is_id_start(cp) } else { is_id_part(cp) };
                match char::from_u32(cp) {
                    Some(ch) if valid => name.push(ch),
                    _ => return Err(syntax_error(ErrorMessage::InvalidIdentifierEscape, position)),
                }
                escaped = true;
            } else if (first && is_id_start(c)) || (!first && is_id_part(c)) {
                if let Some(ch) = self.advance() {
                    name.push(ch);
                }
            } else {
                break;
            }
        }
        Ok((name, escaped))
    }

    /// Reads the code point of a `\u` escape; the cursor is after the `u`.
    pub(crate) fn scan_unicode_escape_value(&mut self) -> Result<u32, ErrorMessage> {
        if self.eat(b'{') {
            let mut value: u32 = 0;
            let mut digits = 0;
            while let Some(d) = (self.byte_at(0) as char).to_digit(16) {
                value = value.saturating_mul(16).saturating_add(d);
                if value > 0x10FFFF {
                    return Err(ErrorMessage::UnicodeOverflow);
                }
                digits += 1;
                self.bump(1);
            }
            if digits == 0 || !self.eat(b'}') {
                return Err(ErrorMessage::InvalidUnicodeEscape);
            }
            return Ok(value);
        }
        self.scan_hex_digits(4).ok_or(ErrorMessage::InvalidUnicodeEscape)
    }

    /// Reads exactly `count` hex digits.
    fn scan_hex_digits(&mut self, count: usize) -> Option<u32> {
        let mut value = 0;
        for offset in 0..count {
            let d = (self.byte_at(offset) as char).to_digit(16)?;
            value = value * 16 + d;
        }
        self.bump(count);
        Some(value)
    }
}
