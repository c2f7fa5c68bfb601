//! Regular expression literals.

use super::{Lexer, TokenValue};
use crate::chars::{is_id_part, is_line_terminator, EOF_CHAR};
use crate::error::{syntax_error, ErrorMessage, ParseResult};
use crate::token::Token;

const FLAGS: &str = "dgimsuvy";

impl<'a> Lexer<'a> {
    /// Scans `/body/flags`; the cursor is at the opening slash.
    pub(super) fn scan_regexp(&mut self) -> ParseResult<Token> {
        let start = self.position();
        self.bump(1);
        let body_start = self.index;
        let mut in_class = false;
        loop {
            let c = self.peek();
            if c == EOF_CHAR || is_line_terminator(c) {
                return Err(syntax_error(ErrorMessage::UnterminatedRegExp, start));
            }
            self.advance();
            match char::from_u32(c) {
                Some('\\') => {
                    let escaped = self.peek();
                    if escaped == EOF_CHAR || is_line_terminator(escaped) {
                        return Err(syntax_error(ErrorMessage::UnterminatedRegExp, start));
                    }
                    self.advance();
                }
                Some('[') => in_class = true,
                Some(']') => in_class = false,
                Some('/') if !in_class => break,
                _ => {}
            }
        }
        let pattern = self.source[body_start..self.index - 1].to_string();

        let mut flags = String::new();
        loop {
            let c = self.peek();
            if c == '\\' as u32 {
                return Err(self.error(ErrorMessage::UnknownRegExpFlag('\\')));
            }
            if c == EOF_CHAR || !is_id_part(c) {
                break;
            }
            let flag = char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER);
            if !FLAGS.contains(flag) {
                return Err(self.error(ErrorMessage::UnknownRegExpFlag(flag)));
            }
            if flags.contains(flag) {
                return Err(self.error(ErrorMessage::DuplicateRegExpFlag(flag)));
            }
            flags.push(flag);
            self.advance();
        }
        if flags.contains('u') && flags.contains('v') {
            return Err(self.error(ErrorMessage::ConflictingRegExpFlags));
        }

        let valid = match self.validator.validate(&pattern, &flags) {
            Ok(()) => true,
            Err(reason) if self.validate_regex => {
                return Err(syntax_error(ErrorMessage::InvalidRegExp(reason), start));
            }
            Err(_) => false,
        };
        self.value = TokenValue::RegExp { pattern, flags, valid };
        Ok(Token::REGEXP)
    }
}
