//! Template literal parts.

use super::{Lexer, TokenValue};
use crate::chars::{is_line_terminator, EOF_CHAR};
use crate::context::Context;
use crate::error::{syntax_error, ErrorMessage, ParseResult};
use crate::token::Token;

impl<'a> Lexer<'a> {
    /// Scans a template part. The cursor is after the opening backtick or
    /// after the `}` closing a substitution.
    ///
    /// Produces [`Token::TEMPLATE`] for a part ending with a backtick and
    /// [`Token::TEMPLATE_HEAD`] for one ending with `${`. A malformed escape
    /// leaves the cooked text `None` and is kept in
    /// [`Lexer::template_error`]; only untagged templates report it.
    pub(super) fn scan_template(&mut self, context: Context) -> ParseResult<Token> {
        self.template_error = None;
        let mut cooked = Some(String::new());
        let mut raw = String::new();
        let token = loop {
            let c = self.peek();
            if c == EOF_CHAR {
                return Err(self.error(ErrorMessage::UnterminatedTemplate));
            }
            if c == '`' as u32 {
                self.bump(1);
                break Token::TEMPLATE;
            }
            if c == '$' as u32 && self.byte_at(1) == b'{' {
                self.bump(2);
                break Token::TEMPLATE_HEAD;
            }
            if c == '\\' as u32 {
                let position = self.position();
                let escape_start = self.index;
                self.bump(1);
                match self.scan_escape(context, true) {
                    Ok(ch) => {
                        if let (Some(text), Some(ch)) = (cooked.as_mut(), ch) {
                            text.push(ch);
                        }
                    }
                    Err(message) => {
                        if self.template_error.is_none() {
                            self.template_error = Some(syntax_error(message, position));
                        }
                        cooked = None;
                    }
                }
                push_normalized(&mut raw, &self.source[escape_start..self.index]);
                continue;
            }
            if is_line_terminator(c) {
                let ch = if c == '\r' as u32 {
                    '\n'
                } else {
                    char::from_u32(c).unwrap_or('\n')
                };
                self.consume_newline();
                raw.push(ch);
                if let Some(text) = cooked.as_mut() {
                    text.push(ch);
                }
                continue;
            }
            if let Some(ch) = self.advance() {
                raw.push(ch);
                if let Some(text) = cooked.as_mut() {
                    text.push(ch);
                }
            }
        };
        self.value = TokenValue::Template { cooked, raw };
        Ok(token)
    }

    /// Rescans from the `}` that is the current token as the continuation of
    /// a template.
    pub fn scan_template_continuation(&mut self, context: Context) -> ParseResult<Token> {
        if self.token != Token::RIGHT_BRACE {
            return Err(syntax_error(
                ErrorMessage::Expected {
                    expected: "}",
                    found: self.raw().to_string(),
                },
                self.token_start.position(),
            ));
        }
        let token = self.scan_template(context)?;
        self.token = token;
        Ok(token)
    }
}

/// Appends `text` with CRLF and CR turned into LF.
fn push_normalized(out: &mut String, text: &str) {
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(c);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::context::Context;
    use crate::error::ErrorMessage;
    use crate::lexer::{Lexer, TokenValue};
    use crate::options::Options;
    use crate::token::Token;

    fn template(source: &str, context: Context) -> Result<(Token, TokenValue), ErrorMessage> {
        let options = Options::default();
        let mut lexer = Lexer::new(source, &options);
        lexer
            .next(context)
            .map(|token| (token, lexer.value.clone()))
            .map_err(|err| err.message)
    }

    fn parts(cooked: Option<&str>, raw: &str) -> TokenValue {
        TokenValue::Template {
            cooked: cooked.map(String::from),
            raw: raw.to_string(),
        }
    }

    #[test]
    fn test_no_substitution() {
        let (token, value) = template("`a\\tb`", Context::empty()).unwrap();
        assert_eq!(token, Token::TEMPLATE);
        assert_eq!(value, parts(Some("a\tb"), "a\\tb"));
    }

    #[test]
    fn test_head_and_continuation() {
        let options = Options::default();
        let mut lexer = Lexer::new("`a${x}b`", &options);
        assert_eq!(lexer.next(Context::empty()).unwrap(), Token::TEMPLATE_HEAD);
        assert_eq!(lexer.value, parts(Some("a"), "a"));
        assert_eq!(lexer.next(Context::empty()).unwrap(), Token::IDENTIFIER);
        assert_eq!(lexer.next(Context::empty()).unwrap(), Token::RIGHT_BRACE);
        assert_eq!(lexer.scan_template_continuation(Context::empty()).unwrap(), Token::TEMPLATE);
        assert_eq!(lexer.value, parts(Some("b"), "b"));
    }

    #[test]
    fn test_crlf_normalized() {
        let (_, value) = template("`a\r\nb`", Context::empty()).unwrap();
        assert_eq!(value, parts(Some("a\nb"), "a\nb"));
    }

    #[test]
    fn test_bad_escape_is_recorded() {
        let options = Options::default();
        let mut lexer = Lexer::new("`\\unicode`", &options);
        assert_eq!(lexer.next(Context::empty()).unwrap(), Token::TEMPLATE);
        assert_eq!(lexer.value, parts(None, "\\unicode"));
        let err = lexer.template_error.clone().unwrap();
        assert_eq!(err.message, ErrorMessage::InvalidUnicodeEscape);
        assert_eq!(err.column, 1);
    }

    #[test]
    fn test_octal_escape_is_recorded() {
        let options = Options::default();
        let mut lexer = Lexer::new("`\\01`", &options);
        lexer.next(Context::empty()).unwrap();
        assert_eq!(
            lexer.template_error.clone().map(|err| err.message),
            Some(ErrorMessage::TemplateOctalEscape)
        );
    }

    #[test]
    fn test_unterminated() {
        assert_eq!(template("`abc", Context::empty()).unwrap_err(), ErrorMessage::UnterminatedTemplate);
    }
}
