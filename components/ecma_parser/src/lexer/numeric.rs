//! Numeric literals.

use num_bigint::BigInt;

use super::{Lexer, LexerFlags, TokenValue};
use crate::chars::{is_id_start, EOF_CHAR};
use crate::context::Context;
use crate::error::{ErrorMessage, ParseResult};
use crate::token::Token;

impl<'a> Lexer<'a> {
    /// Scans a numeric literal starting at a digit or at `.` followed by a digit.
    pub(super) fn scan_number(&mut self, context: Context) -> ParseResult<Token> {
        if self.byte_at(0) == b'0' {
            match self.byte_at(1) | 0x20 {
                b'x' => return self.scan_radix_literal(16, "hexadecimal"),
                b'o' => return self.scan_radix_literal(8, "octal"),
                b'b' => return self.scan_radix_literal(2, "binary"),
                _ => {}
            }
            if self.byte_at(1).is_ascii_digit() {
                return self.scan_legacy_octal(context);
            }
            if self.byte_at(1) == b'_' {
                self.bump(1);
                return Err(self.error(ErrorMessage::InvalidNumericSeparator));
            }
        }
        let mut text = String::new();
        if self.byte_at(0) != b'.' {
            text.push_str(&self.scan_digits(10, true)?);
        }
        self.scan_decimal_tail(text, true)
    }

    /// Fraction, exponent and BigInt suffix of a decimal literal whose integer
    /// part is `text`.
    fn scan_decimal_tail(&mut self, mut text: String, allow_bigint: bool) -> ParseResult<Token> {
        let mut integer = true;
        if self.byte_at(0) == b'.' {
            self.bump(1);
            integer = false;
            text.push('.');
            if self.byte_at(0) == b'_' {
                return Err(self.error(ErrorMessage::InvalidNumericSeparator));
            }
            text.push_str(&self.scan_digits(10, true)?);
        }
        if self.byte_at(0) | 0x20 == b'e' {
            self.bump(1);
            integer = false;
            text.push('e');
            if matches!(self.byte_at(0), b'+' | b'-') {
                text.push(self.byte_at(0) as char);
                self.bump(1);
            }
            let exponent = self.scan_digits(10, true)?;
            if exponent.is_empty() {
                return Err(self.error(ErrorMessage::MissingExponent));
            }
            text.push_str(&exponent);
        }
        if self.byte_at(0) == b'n' {
            if !integer || !allow_bigint {
                return Err(self.error(ErrorMessage::InvalidBigInt));
            }
            self.bump(1);
            return self.finish_bigint(&text, 10);
        }
        let value = text
            .parse::<f64>()
            .map_err(|_| self.error(ErrorMessage::MissingDigits("decimal")))?;
        self.value = TokenValue::Number(value);
        self.check_after_number()?;
        Ok(Token::NUMBER)
    }

    fn scan_radix_literal(&mut self, radix: u32, name: &'static str) -> ParseResult<Token> {
        self.bump(2);
        if self.byte_at(0) == b'_' {
            return Err(self.error(ErrorMessage::InvalidNumericSeparator));
        }
        let digits = self.scan_digits(radix, true)?;
        if digits.is_empty() {
            return Err(self.error(ErrorMessage::MissingDigits(name)));
        }
        if self.eat(b'n') {
            return self.finish_bigint(&digits, radix);
        }
        let value = match u128::from_str_radix(&digits, radix) {
            Ok(v) => v as f64,
            Err(_) => digits.chars().fold(0.0, |acc, d| {
                acc * radix as f64 + d.to_digit(radix).unwrap_or(0) as f64
            }),
        };
        self.value = TokenValue::Number(value);
        self.check_after_number()?;
        Ok(Token::NUMBER)
    }

    /// `0123` (octal) or `089` (decimal with a leading zero).
    fn scan_legacy_octal(&mut self, context: Context) -> ParseResult<Token> {
        let start = self.position();
        self.bump(1);
        let digits = self.scan_digits(10, false)?;
        if self.byte_at(0) == b'_' {
            return Err(self.error(ErrorMessage::InvalidNumericSeparator));
        }
        let octal = digits.bytes().all(|b| b < b'8');
        if context.is_strict() {
            let message = if octal {
                ErrorMessage::StrictOctalLiteral
            } else {
                ErrorMessage::StrictLeadingZero
            };
            return Err(crate::error::syntax_error(message, start));
        }
        self.flags |= LexerFlags::OCTAL;
        if !octal {
            let mut text = String::from("0");
            text.push_str(&digits);
            return self.scan_decimal_tail(text, false);
        }
        if self.byte_at(0) == b'n' {
            return Err(self.error(ErrorMessage::InvalidBigInt));
        }
        let value = digits.bytes().fold(0.0, |acc, b| acc * 8.0 + f64::from(b - b'0'));
        self.value = TokenValue::Number(value);
        self.check_after_number()?;
        Ok(Token::NUMBER)
    }

    fn finish_bigint(&mut self, digits: &str, radix: u32) -> ParseResult<Token> {
        let value = BigInt::parse_bytes(digits.as_bytes(), radix)
            .ok_or_else(|| self.error(ErrorMessage::InvalidBigInt))?;
        self.value = TokenValue::BigInt(value);
        self.check_after_number()?;
        Ok(Token::BIGINT)
    }

    /// Digits of `radix` with optional `_` separators, separators removed.
    fn scan_digits(&mut self, radix: u32, separators: bool) -> ParseResult<String> {
        let mut digits = String::new();
        let mut after_separator = false;
        loop {
            let b = self.byte_at(0);
            if b == b'_' && separators {
                if digits.is_empty() {
                    return Err(self.error(ErrorMessage::InvalidNumericSeparator));
                }
                if after_separator {
                    return Err(self.error(ErrorMessage::ContinuousNumericSeparator));
                }
                after_separator = true;
                self.bump(1);
            } else if (b as char).is_digit(radix) {
                digits.push(b as char);
                after_separator = false;
                self.bump(1);
            } else {
                break;
            }
        }
        if after_separator {
            return Err(self.error(ErrorMessage::TrailingNumericSeparator));
        }
        Ok(digits)
    }

    fn check_after_number(&self) -> ParseResult<()> {
        let c = self.peek();
        if c != EOF_CHAR && (is_id_start(c) || c == '\\' as u32 || (c < 0x80 && (c as u8).is_ascii_digit())) {
            return Err(self.error(ErrorMessage::IdentifierAfterNumber));
        }
        Ok(())
    }
}
