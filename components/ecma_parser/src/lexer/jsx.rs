//! JSX scanning modes.
//!
//! Inside a tag, names may contain `-` and strings have no escapes. Between
//! tags the source is raw text up to the next `{` or `<`. The parser picks the
//! mode explicitly by calling [`Lexer::next_jsx_tag`] or
//! [`Lexer::next_jsx_child`] instead of [`Lexer::next`].

use super::{Lexer, LexerFlags, TokenValue};
use crate::chars::{is_id_part, is_id_start, is_line_terminator, EOF_CHAR};
use crate::context::Context;
use crate::error::{syntax_error, ErrorMessage, ParseResult};
use crate::token::Token;

impl<'a> Lexer<'a> {
    /// Scans a token inside a JSX tag.
    pub fn next_jsx_tag(&mut self, context: Context) -> ParseResult<Token> {
        self.prev_end = self.marker();
        self.flags = LexerFlags::empty();
        self.skip_trivia(context)?;
        self.token_start = self.marker();
        self.value = TokenValue::None;
        let c = self.peek();
        let token = if c == EOF_CHAR {
            Token::EOF
        } else if is_id_start(c) {
            let start = self.index;
            loop {
                let c = self.peek();
                if c == EOF_CHAR || !(is_id_part(c) || c == '-' as u32) {
                    break;
                }
                self.advance();
            }
            self.value = TokenValue::Name(self.source[start..self.index].to_string());
            Token::IDENTIFIER
        } else {
            match char::from_u32(c) {
                Some(quote @ ('"' | '\'')) => self.scan_jsx_string(quote)?,
                Some('<') => self.single(Token::LESS_THAN),
                Some('>') => self.single(Token::GREATER_THAN),
                Some('/') => self.single(Token::DIVIDE),
                Some('{') => self.single(Token::LEFT_BRACE),
                Some('}') => self.single(Token::RIGHT_BRACE),
                Some('=') => self.single(Token::ASSIGN),
                Some(':') => self.single(Token::COLON),
                Some('.') => self.single(Token::PERIOD),
                Some(other) => return Err(self.error(ErrorMessage::IllegalCharacter(other))),
                None => return Err(self.error(ErrorMessage::IllegalCharacter(char::REPLACEMENT_CHARACTER))),
            }
        };
        self.token = token;
        Ok(token)
    }

    /// Scans element content: a text run, or `{` / `<` when no text precedes it.
    pub fn next_jsx_child(&mut self) -> ParseResult<Token> {
        self.prev_end = self.marker();
        self.flags = LexerFlags::empty();
        self.token_start = self.marker();
        self.value = TokenValue::None;
        let start = self.index;
        loop {
            let c = self.peek();
            if c == EOF_CHAR || c == '{' as u32 || c == '<' as u32 {
                break;
            }
            if is_line_terminator(c) {
                self.consume_newline();
            } else {
                self.advance();
            }
        }
        let token = if self.index > start {
            self.value = TokenValue::JsxText(self.source[start..self.index].to_string());
            Token::JSX_TEXT
        } else {
            match self.byte_at(0) {
                b'{' => self.single(Token::LEFT_BRACE),
                b'<' => self.single(Token::LESS_THAN),
                _ => Token::EOF,
            }
        };
        self.token = token;
        Ok(token)
    }

    fn scan_jsx_string(&mut self, quote: char) -> ParseResult<Token> {
        let start = self.position();
        self.bump(1);
        let body = self.index;
        loop {
            let c = self.peek();
            if c == EOF_CHAR {
                return Err(syntax_error(ErrorMessage::UnterminatedJsxString, start));
            }
            if c == quote as u32 {
                break;
            }
            if is_line_terminator(c) {
                self.consume_newline();
            } else {
                self.advance();
            }
        }
        let value = self.source[body..self.index].to_string();
        self.bump(1);
        self.value = TokenValue::String(value);
        Ok(Token::STRING)
    }
}

#[cfg(test)]
mod tests {
    use crate::context::Context;
    use crate::error::ErrorMessage;
    use crate::lexer::{Lexer, TokenValue};
    use crate::options::Options;
    use crate::token::Token;

    #[test]
    fn test_tag_tokens() {
        let options = Options::default();
        let mut lexer = Lexer::new("data-id=\"a\\b\" />", &options);
        assert_eq!(lexer.next_jsx_tag(Context::JSX).unwrap(), Token::IDENTIFIER);
        assert_eq!(lexer.value, TokenValue::Name("data-id".into()));
        assert_eq!(lexer.next_jsx_tag(Context::JSX).unwrap(), Token::ASSIGN);
        assert_eq!(lexer.next_jsx_tag(Context::JSX).unwrap(), Token::STRING);
        assert_eq!(lexer.value, TokenValue::String("a\\b".into()));
        assert_eq!(lexer.next_jsx_tag(Context::JSX).unwrap(), Token::DIVIDE);
        assert_eq!(lexer.next_jsx_tag(Context::JSX).unwrap(), Token::GREATER_THAN);
    }

    #[test]
    fn test_child_text_then_brace() {
        let options = Options::default();
        let mut lexer = Lexer::new("hello\n world{x}", &options);
        assert_eq!(lexer.next_jsx_child().unwrap(), Token::JSX_TEXT);
        assert_eq!(lexer.value, TokenValue::JsxText("hello\n world".into()));
        assert_eq!(lexer.next_jsx_child().unwrap(), Token::LEFT_BRACE);
        assert_eq!(lexer.token_start.line, 2);
    }

    #[test]
    fn test_unterminated_jsx_string() {
        let options = Options::default();
        let mut lexer = Lexer::new("'abc", &options);
        assert_eq!(
            lexer.next_jsx_tag(Context::JSX).unwrap_err().message,
            ErrorMessage::UnterminatedJsxString
        );
    }
}
