//! Character classification.
//!
//! ASCII code points are answered from a flag table built at compile time;
//! everything above U+007F goes through `unicode-ident` plus the handful of
//! `Other_ID_Start` / `Other_ID_Continue` code points it does not cover.

use bitflags::bitflags;

bitflags! {
    /// Classification bits of an ASCII code point.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CharFlags: u16 {
        /// `$`, `_`, `A-Z`, `a-z`
        const ID_START = 1 << 0;
        /// Identifier start plus `0-9`
        const ID_PART = 1 << 1;
        /// Tab, vertical tab, form feed, space
        const WHITESPACE = 1 << 2;
        /// `\n`, `\r`
        const LINE_TERMINATOR = 1 << 3;
        /// `0-9`
        const DECIMAL = 1 << 4;
        /// `0-7`
        const OCTAL = 1 << 5;
        /// `0-1`
        const BINARY = 1 << 6;
        /// `0-9`, `a-f`, `A-F`
        const HEX = 1 << 7;
        /// `\`, start of a unicode escape inside an identifier
        const BACKSLASH = 1 << 8;
    }
}

const fn build_ascii_table() -> [u16; 128] {
    let mut table = [0u16; 128];
    let mut i = 0;
    while i < 128 {
        let c = i as u8;
        let mut bits = 0u16;
        let alpha = c.is_ascii_alphabetic();
        if alpha || c == b'$' || c == b'_' {
            bits |= CharFlags::ID_START.bits() | CharFlags::ID_PART.bits();
        }
        if c.is_ascii_digit() {
            bits |= CharFlags::ID_PART.bits() | CharFlags::DECIMAL.bits() | CharFlags::HEX.bits();
            if c <= b'7' {
                bits |= CharFlags::OCTAL.bits();
            }
            if c <= b'1' {
                bits |= CharFlags::BINARY.bits();
            }
        }
        if (c >= b'a' && c <= b'f') || (c >= b'A' && c <= b'F') {
            bits |= CharFlags::HEX.bits();
        }
        if c == b' ' || c == b'\t' || c == 0x0B || c == 0x0C {
            bits |= CharFlags::WHITESPACE.bits();
        }
        if c == b'\n' || c == b'\r' {
            bits |= CharFlags::LINE_TERMINATOR.bits();
        }
        if c == b'\\' {
            bits |= CharFlags::BACKSLASH.bits();
        }
        table[i] = bits;
        i += 1;
    }
    table
}

static ASCII_TABLE: [u16; 128] = build_ascii_table();

/// End-of-input sentinel returned by the lexer's current code point.
pub const EOF_CHAR: u32 = u32::MAX;

/// Flags of an ASCII code point; empty for anything else.
#[inline]
pub fn ascii_flags(cp: u32) -> CharFlags {
    if cp < 128 {
        CharFlags::from_bits_truncate(ASCII_TABLE[cp as usize])
    } else {
        CharFlags::empty()
    }
}

#[inline]
fn as_char(cp: u32) -> Option<char> {
    char::from_u32(cp)
}

/// `ID_Start`, `$` and `_`.
pub fn is_id_start(cp: u32) -> bool {
    if cp < 128 {
        return ascii_flags(cp).contains(CharFlags::ID_START);
    }
    matches!(cp, 0x2118 | 0x212E | 0x309B | 0x309C)
        || as_char(cp).is_some_and(unicode_ident::is_xid_start)
}

/// `ID_Continue`, `$`, ZWNJ and ZWJ.
pub fn is_id_part(cp: u32) -> bool {
    if cp < 128 {
        return ascii_flags(cp).contains(CharFlags::ID_PART);
    }
    matches!(cp, 0x200C | 0x200D | 0xB7 | 0x387 | 0x1369..=0x1371 | 0x19DA)
        || is_id_start(cp)
        || as_char(cp).is_some_and(unicode_ident::is_xid_continue)
}

/// `WhiteSpace` production, excluding line terminators.
pub fn is_whitespace(cp: u32) -> bool {
    if cp < 128 {
        return ascii_flags(cp).contains(CharFlags::WHITESPACE);
    }
    matches!(
        cp,
        0xA0 | 0xFEFF | 0x1680 | 0x2000..=0x200A | 0x202F | 0x205F | 0x3000
    )
}

/// `LineTerminator` production.
#[inline]
pub fn is_line_terminator(cp: u32) -> bool {
    matches!(cp, 0x0A | 0x0D | 0x2028 | 0x2029)
}

/// True when `cp` is a digit of the given radix (2, 8, 10 or 16).
#[inline]
pub fn is_digit(cp: u32, radix: u32) -> bool {
    let flag = match radix {
        2 => CharFlags::BINARY,
        8 => CharFlags::OCTAL,
        16 => CharFlags::HEX,
        _ => CharFlags::DECIMAL,
    };
    ascii_flags(cp).contains(flag)
}

/// Numeric value of a hexadecimal digit.
#[inline]
pub fn hex_value(cp: u32) -> Option<u32> {
    as_char(cp).and_then(|c| c.to_digit(16))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_identifier_classes() {
        assert!(is_id_start('a' as u32));
        assert!(is_id_start('$' as u32));
        assert!(is_id_start('_' as u32));
        assert!(!is_id_start('1' as u32));
        assert!(is_id_part('1' as u32));
        assert!(!is_id_part('-' as u32));
    }

    #[test]
    fn test_unicode_identifier_classes() {
        assert!(is_id_start('é' as u32));
        assert!(is_id_start('℘' as u32));
        assert!(is_id_part(0x200C));
        assert!(!is_id_start(0x200C));
        assert!(!is_id_start('€' as u32));
    }

    #[test]
    fn test_whitespace_and_line_terminators() {
        assert!(is_whitespace(' ' as u32));
        assert!(is_whitespace(0xFEFF));
        assert!(is_whitespace(0x3000));
        assert!(!is_whitespace('\n' as u32));
        assert!(is_line_terminator(0x2028));
        assert!(is_line_terminator('\r' as u32));
    }

    #[test]
    fn test_digits_by_radix() {
        assert!(is_digit('1' as u32, 2));
        assert!(!is_digit('2' as u32, 2));
        assert!(is_digit('7' as u32, 8));
        assert!(!is_digit('8' as u32, 8));
        assert!(is_digit('F' as u32, 16));
        assert!(!is_digit('g' as u32, 16));
        assert_eq!(hex_value('c' as u32), Some(12));
        assert_eq!(hex_value(EOF_CHAR), None);
    }
}
