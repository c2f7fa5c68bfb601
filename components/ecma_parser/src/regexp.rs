//! Regular expression body validation.
//!
//! The lexer only finds where a regular expression literal ends and checks
//! its flags. Whether the body is a valid pattern is delegated to a
//! [`RegexValidator`] so hosts can plug in a full ECMAScript pattern engine.

use regex::RegexBuilder;

/// Judges regular expression literal bodies.
pub trait RegexValidator {
    /// `Ok(())` when `pattern` compiles with `flags`, otherwise a reason.
    fn validate(&self, pattern: &str, flags: &str) -> Result<(), String>;
}

/// Best-effort validator backed by the `regex` crate.
///
/// The body is first rewritten into the `regex` dialect: Annex B literal
/// braces and identity escapes, `\0`, `[\b]`, empty classes and `[` inside
/// a class. Features the `regex` crate cannot express (lookaround,
/// backreferences, legacy octal escapes, `v`-mode class sets) are accepted
/// rather than reported, so this never rejects a pattern merely for being
/// outside its dialect. This is the lexer's default validator.
#[derive(Debug, Default, Clone, Copy)]
pub struct BestEffortValidator;

impl BestEffortValidator {
    /// Rewrites `pattern` for the `regex` crate, or `None` when it uses
    /// syntax the crate has no counterpart for.
    fn translate(pattern: &str, unicode: bool) -> Option<String> {
        let chars: Vec<char> = pattern.chars().collect();
        let mut out = String::with_capacity(pattern.len() + 8);
        let mut in_class = false;
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            i += 1;
            match c {
                '\\' => {
                    let next = *chars.get(i)?;
                    i += 1;
                    match next {
                        '1'..='9' | 'k' | 'c' => return None,
                        '0' if chars.get(i).is_some_and(char::is_ascii_digit) => return None,
                        '0' => out.push_str("\\x00"),
                        'b' if in_class => out.push_str("\\x08"),
                        'p' | 'P' if unicode => return None,
                        'd' | 'D' | 'w' | 'W' | 's' | 'S' | 'b' | 'B' | 'f' | 'n' | 'r' | 't' | 'v' => {
                            out.push('\\');
                            out.push(next);
                        }
                        'x' if hex_run(&chars, i, 2) => out.push_str("\\x"),
                        'u' if hex_run(&chars, i, 4) => {
                            let code: String = chars[i..i + 4].iter().collect();
                            if u32::from_str_radix(&code, 16).is_ok_and(|c| (0xD800..=0xDFFF).contains(&c)) {
                                return None;
                            }
                            out.push_str("\\x{");
                            out.extend(&chars[i..i + 4]);
                            out.push('}');
                            i += 4;
                        }
                        'u' if unicode && chars.get(i) == Some(&'{') => out.push_str("\\x"),
                        _ if unicode && next.is_ascii_alphanumeric() => {
                            out.push('\\');
                            out.push(next);
                        }
                        _ => out.push_str(&regex::escape(next.encode_utf8(&mut [0; 4]))),
                    }
                }
                '[' if in_class => out.push_str("\\["),
                '[' => {
                    if chars.get(i) == Some(&']') {
                        out.push_str("[^\\s\\S]");
                        i += 1;
                    } else if chars.get(i) == Some(&'^') && chars.get(i + 1) == Some(&']') {
                        out.push_str("[\\s\\S]");
                        i += 2;
                    } else {
                        in_class = true;
                        out.push('[');
                        if chars.get(i) == Some(&'^') {
                            out.push('^');
                            i += 1;
                        }
                    }
                }
                ']' if in_class => {
                    in_class = false;
                    out.push(']');
                }
                '-' if in_class && chars.get(i) == Some(&'-') => return None,
                '&' | '~' if in_class => {
                    out.push('\\');
                    out.push(c);
                }
                '(' if chars.get(i) == Some(&'?') => {
                    match (chars.get(i + 1), chars.get(i + 2)) {
                        (Some('=' | '!'), _) | (Some('<'), Some('=' | '!')) => return None,
                        _ => out.push('('),
                    }
                }
                '{' if !in_class => match quantifier_len(&chars, i - 1) {
                    Some(len) => {
                        out.extend(&chars[i - 1..i - 1 + len]);
                        i += len - 1;
                    }
                    None if unicode => out.push('{'),
                    None => out.push_str("\\{"),
                },
                '}' | ']' if !in_class && !unicode => {
                    out.push('\\');
                    out.push(c);
                }
                _ => out.push(c),
            }
        }
        Some(out)
    }
}

/// Whether `len` hex digits start at `at`.
fn hex_run(chars: &[char], at: usize, len: usize) -> bool {
    chars.len() >= at + len && chars[at..at + len].iter().all(char::is_ascii_hexdigit)
}

/// Length of a `{n}`, `{n,}` or `{n,m}` quantifier starting at `at`.
fn quantifier_len(chars: &[char], at: usize) -> Option<usize> {
    let mut i = at + 1;
    let digits = |i: &mut usize| {
        let begin = *i;
        while chars.get(*i).is_some_and(char::is_ascii_digit) {
            *i += 1;
        }
        *i > begin
    };
    if !digits(&mut i) {
        return None;
    }
    if chars.get(i) == Some(&',') {
        i += 1;
        digits(&mut i);
    }
    (chars.get(i) == Some(&'}')).then(|| i + 1 - at)
}

impl RegexValidator for BestEffortValidator {
    fn validate(&self, pattern: &str, flags: &str) -> Result<(), String> {
        if flags.contains('v') {
            return Ok(());
        }
        let Some(translated) = Self::translate(pattern, flags.contains('u')) else {
            return Ok(());
        };
        RegexBuilder::new(&translated)
            .case_insensitive(flags.contains('i'))
            .multi_line(flags.contains('m'))
            .dot_matches_new_line(flags.contains('s'))
            .build()
            .map(|_| ())
            .map_err(|err| match err {
                regex::Error::Syntax(message) => message
                    .lines()
                    .last()
                    .unwrap_or("invalid pattern")
                    .trim_start_matches("error: ")
                    .to_string(),
                other => other.to_string(),
            })
    }
}

/// Accepts every body; install it with `Parser::with_regex_validator` to
/// leave pattern checking to the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl RegexValidator for AcceptAll {
    fn validate(&self, _pattern: &str, _flags: &str) -> Result<(), String> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_pattern() {
        assert!(BestEffortValidator.validate("a+b*", "g").is_ok());
        assert!(BestEffortValidator.validate("[a-z]{2,3}", "i").is_ok());
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(BestEffortValidator.validate("a{2,1}", "").is_err());
        assert!(BestEffortValidator.validate("(", "").is_err());
    }

    #[test]
    fn test_unsupported_syntax_is_accepted() {
        assert!(BestEffortValidator.validate("(?<=a)b", "").is_ok());
        assert!(BestEffortValidator.validate("(a)\\1", "").is_ok());
        assert!(BestEffortValidator.validate("a(?!b)", "").is_ok());
    }

    #[test]
    fn test_annex_b_and_ecmascript_escapes() {
        for body in ["[\\b]", "\\0", "{", "a{", "a{1", "}", "]", "\\/", "[[]", "[]", "[^]", "\\a", "\\<"] {
            assert!(BestEffortValidator.validate(body, "").is_ok(), "{:?}", body);
        }
        assert!(BestEffortValidator.validate("a{2}b{1,}c{1,3}", "").is_ok());
        assert!(BestEffortValidator.validate("\\x41\\u0041", "").is_ok());
        assert!(BestEffortValidator.validate("\\u{1F600}", "u").is_ok());
    }

    #[test]
    fn test_unicode_mode_keeps_braces_strict() {
        assert!(BestEffortValidator.validate("a{", "u").is_err());
        assert!(BestEffortValidator.validate("{1}", "").is_err());
    }

    #[test]
    fn test_translate() {
        assert_eq!(BestEffortValidator::translate("a{", false).as_deref(), Some("a\\{"));
        assert_eq!(BestEffortValidator::translate("[\\b]\\0", false).as_deref(), Some("[\\x08]\\x00"));
        assert_eq!(BestEffortValidator::translate("x{1,2}", false).as_deref(), Some("x{1,2}"));
        assert_eq!(BestEffortValidator::translate("\\01", false), None);
    }

    #[test]
    fn test_accept_all() {
        assert!(AcceptAll.validate("(", "").is_ok());
    }
}
