//! String literals and the escape sequences shared with templates.

use super::{Lexer, LexerFlags, TokenValue};
use crate::chars::{is_line_terminator, EOF_CHAR};
use crate::context::Context;
use crate::error::{syntax_error, ErrorMessage, ParseResult};
use crate::token::Token;

impl<'a> Lexer<'a> {
    pub(super) fn scan_string(&mut self, context: Context, quote: u8) -> ParseResult<Token> {
        let start = self.position();
        self.bump(1);
        let mut value = String::new();
        loop {
            let c = self.peek();
            if c == EOF_CHAR || c == '\n' as u32 || c == '\r' as u32 {
                return Err(syntax_error(ErrorMessage::UnterminatedString, start));
            }
            if c == quote as u32 {
                self.bump(1);
                break;
            }
            if c == '\\' as u32 {
                let position = self.position();
                self.bump(1);
                self.flags |= LexerFlags::ESCAPED;
                match self.scan_escape(context, false) {
                    Ok(Some(ch)) => value.push(ch),
                    Ok(None) => {}
                    Err(message) => return Err(syntax_error(message, position)),
                }
                continue;
            }
            if is_line_terminator(c) {
                // U+2028 and U+2029 are allowed unescaped
                let ch = char::from_u32(c).unwrap_or('\u{2028}');
                self.consume_newline();
                value.push(ch);
                continue;
            }
            if let Some(ch) = self.advance() {
                value.push(ch);
            }
        }
        self.value = TokenValue::String(value);
        Ok(Token::STRING)
    }

    /// Decodes one escape sequence; the cursor is after the backslash.
    ///
    /// Returns `None` for a line continuation. In templates legacy octal and
    /// `\8` / `\9` escapes are errors regardless of strictness.
    pub(super) fn scan_escape(&mut self, context: Context, template: bool) -> Result<Option<char>, ErrorMessage> {
        let c = self.peek();
        if c == EOF_CHAR {
            return Ok(None);
        }
        if is_line_terminator(c) {
            self.consume_newline();
            return Ok(None);
        }
        let ch = char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER);
        let decoded = match ch {
            'b' => '\u{8}',
            't' => '\t',
            'n' => '\n',
            'v' => '\u{b}',
            'f' => '\u{c}',
            'r' => '\r',
            'x' => {
                self.bump(1);
                let value = self.scan_hex_digits(2).ok_or(ErrorMessage::InvalidHexEscape)?;
                return Ok(char::from_u32(value));
            }
            'u' => {
                self.bump(1);
                let value = self.scan_unicode_escape_value()?;
                return Ok(Some(self.combine_surrogates(value)));
            }
            '0' if !self.byte_at(1).is_ascii_digit() => '\0',
            '0'..='7' => return self.scan_legacy_octal_escape(context, template).map(Some),
            '8' | '9' => {
                if template {
                    return Err(ErrorMessage::TemplateOctalEscape);
                }
                if context.is_strict() {
                    return Err(ErrorMessage::StrictEightOrNine);
                }
                self.flags |= LexerFlags::EIGHT_OR_NINE_ESCAPE;
                ch
            }
            other => other,
        };
        self.advance();
        Ok(Some(decoded))
    }

    fn scan_legacy_octal_escape(&mut self, context: Context, template: bool) -> Result<char, ErrorMessage> {
        if template {
            return Err(ErrorMessage::TemplateOctalEscape);
        }
        if context.is_strict() {
            return Err(ErrorMessage::StrictOctalEscape);
        }
        self.flags |= LexerFlags::OCTAL;
        let first = self.byte_at(0);
        let mut value = u32::from(first - b'0');
        self.bump(1);
        let max_digits = if first <= b'3' { 2 } else { 1 };
        for _ in 0..max_digits {
            let b = self.byte_at(0);
            if !(b'0'..=b'7').contains(&b) {
                break;
            }
            value = value * 8 + u32::from(b - b'0');
            self.bump(1);
        }
        Ok(char::from_u32(value).unwrap_or('\0'))
    }

    /// Joins a `\uD83D\uDE00` pair into one scalar value. Lone surrogates become
    /// U+FFFD since they have no UTF-8 encoding.
    fn combine_surrogates(&mut self, high: u32) -> char {
        if (0xD800..0xDC00).contains(&high) && self.byte_at(0) == b'\\' && self.byte_at(1) == b'u' {
            let saved = (self.index, self.column);
            self.bump(2);
            match self.scan_hex_digits(4) {
                Some(low) if (0xDC00..0xE000).contains(&low) => {
                    let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                    return char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER);
                }
                _ => {
                    self.index = saved.0;
                    self.column = saved.1;
                }
            }
        }
        char::from_u32(high).unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}
