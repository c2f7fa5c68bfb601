//! Packed token kinds.
//!
//! A [`Token`] is a `u32`: the low byte is an ordinal unique to the kind, bits
//! 8-11 hold the binary operator precedence and the remaining bits are
//! category flags, so every "is this an X" question the parser asks is a
//! single mask test.

use std::fmt;

const PRECEDENCE_SHIFT: u32 = 8;
const PRECEDENCE_MASK: u32 = 0xF << PRECEDENCE_SHIFT;

const KEYWORD: u32 = 1 << 12;
const IDENTIFIER: u32 = 1 << 13;
const EXPR_START: u32 = 1 << 14;
const ASSIGN_OP: u32 = 1 << 15;
const BINARY_OP: u32 = 1 << 16;
const UNARY_OP: u32 = 1 << 17;
const UPDATE_OP: u32 = 1 << 18;
const PATTERN_START: u32 = 1 << 19;
const AUTO_SEMI: u32 = 1 << 20;
const ESCAPED: u32 = 1 << 21;
const STRICT_RESERVED: u32 = 1 << 22;
const CONTEXTUAL: u32 = 1 << 23;
const MEMBER_OR_CALL: u32 = 1 << 24;
const STRING_OR_NUMBER: u32 = 1 << 25;
const LOGICAL: u32 = 1 << 26;
const COALESCE: u32 = 1 << 27;
const FUTURE_RESERVED: u32 = 1 << 28;

/// A token kind with its category bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token(u32);

macro_rules! tokens {
    ($( $name:ident = $ord:literal, $text:literal, $prec:literal, $flags:expr; )*) => {
        impl Token {
            $(
                #[doc = concat!("`", $text, "`")]
                pub const $name: Token = Token($ord | ($prec << PRECEDENCE_SHIFT) | $flags);
            )*
        }

        static TOKEN_TEXT: [&str; 128] = {
            let mut table = [""; 128];
            $( table[$ord] = $text; )*
            table
        };
    };
}

tokens! {
    EOF = 0, "end of source", 0, AUTO_SEMI;

    LEFT_PAREN = 1, "(", 0, EXPR_START | MEMBER_OR_CALL;
    RIGHT_PAREN = 2, ")", 0, 0;
    LEFT_BRACE = 3, "{", 0, EXPR_START | PATTERN_START;
    RIGHT_BRACE = 4, "}", 0, AUTO_SEMI;
    LEFT_BRACKET = 5, "[", 0, EXPR_START | PATTERN_START | MEMBER_OR_CALL;
    RIGHT_BRACKET = 6, "]", 0, 0;
    SEMICOLON = 7, ";", 0, 0;
    COMMA = 8, ",", 0, 0;
    PERIOD = 9, ".", 0, MEMBER_OR_CALL;
    ELLIPSIS = 10, "...", 0, 0;
    QUESTION_DOT = 11, "?.", 0, MEMBER_OR_CALL;
    COLON = 12, ":", 0, 0;
    QUESTION = 13, "?", 0, 0;
    ARROW = 14, "=>", 0, 0;

    ASSIGN = 16, "=", 0, ASSIGN_OP;
    ADD_ASSIGN = 17, "+=", 0, ASSIGN_OP;
    SUBTRACT_ASSIGN = 18, "-=", 0, ASSIGN_OP;
    MULTIPLY_ASSIGN = 19, "*=", 0, ASSIGN_OP;
    DIVIDE_ASSIGN = 20, "/=", 0, ASSIGN_OP | EXPR_START;
    MODULO_ASSIGN = 21, "%=", 0, ASSIGN_OP;
    EXPONENT_ASSIGN = 22, "**=", 0, ASSIGN_OP;
    SHIFT_LEFT_ASSIGN = 23, "<<=", 0, ASSIGN_OP;
    SHIFT_RIGHT_ASSIGN = 24, ">>=", 0, ASSIGN_OP;
    UNSIGNED_SHIFT_RIGHT_ASSIGN = 25, ">>>=", 0, ASSIGN_OP;
    BIT_AND_ASSIGN = 26, "&=", 0, ASSIGN_OP;
    BIT_OR_ASSIGN = 27, "|=", 0, ASSIGN_OP;
    BIT_XOR_ASSIGN = 28, "^=", 0, ASSIGN_OP;
    LOGICAL_AND_ASSIGN = 29, "&&=", 0, ASSIGN_OP;
    LOGICAL_OR_ASSIGN = 30, "||=", 0, ASSIGN_OP;
    COALESCE_ASSIGN = 31, "??=", 0, ASSIGN_OP;

    INCREMENT = 32, "++", 0, UPDATE_OP | EXPR_START;
    DECREMENT = 33, "--", 0, UPDATE_OP | EXPR_START;
    NOT = 34, "!", 0, UNARY_OP | EXPR_START;
    COMPLEMENT = 35, "~", 0, UNARY_OP | EXPR_START;

    ADD = 36, "+", 10, BINARY_OP | UNARY_OP | EXPR_START;
    SUBTRACT = 37, "-", 10, BINARY_OP | UNARY_OP | EXPR_START;
    MULTIPLY = 38, "*", 11, BINARY_OP;
    DIVIDE = 39, "/", 11, BINARY_OP | EXPR_START;
    MODULO = 40, "%", 11, BINARY_OP;
    EXPONENT = 41, "**", 12, BINARY_OP;
    LOOSE_EQUAL = 42, "==", 7, BINARY_OP;
    LOOSE_NOT_EQUAL = 43, "!=", 7, BINARY_OP;
    STRICT_EQUAL = 44, "===", 7, BINARY_OP;
    STRICT_NOT_EQUAL = 45, "!==", 7, BINARY_OP;
    LESS_THAN = 46, "<", 8, BINARY_OP;
    GREATER_THAN = 47, ">", 8, BINARY_OP;
    LESS_THAN_OR_EQUAL = 48, "<=", 8, BINARY_OP;
    GREATER_THAN_OR_EQUAL = 49, ">=", 8, BINARY_OP;
    SHIFT_LEFT = 50, "<<", 9, BINARY_OP;
    SHIFT_RIGHT = 51, ">>", 9, BINARY_OP;
    UNSIGNED_SHIFT_RIGHT = 52, ">>>", 9, BINARY_OP;
    BIT_AND = 53, "&", 6, BINARY_OP;
    BIT_OR = 54, "|", 4, BINARY_OP;
    BIT_XOR = 55, "^", 5, BINARY_OP;
    LOGICAL_AND = 56, "&&", 3, BINARY_OP | LOGICAL;
    LOGICAL_OR = 57, "||", 2, BINARY_OP | LOGICAL;
    COALESCE = 58, "??", 1, BINARY_OP | COALESCE;
    AT = 59, "@", 0, 0;

    IDENTIFIER = 60, "identifier", 0, IDENTIFIER | EXPR_START;
    PRIVATE_NAME = 61, "private name", 0, EXPR_START;
    STRING = 62, "string", 0, STRING_OR_NUMBER | EXPR_START;
    NUMBER = 63, "number", 0, STRING_OR_NUMBER | EXPR_START;
    BIGINT = 64, "bigint", 0, STRING_OR_NUMBER | EXPR_START;
    REGEXP = 65, "regular expression", 0, EXPR_START;
    TEMPLATE = 66, "template", 0, EXPR_START | MEMBER_OR_CALL;
    TEMPLATE_HEAD = 67, "template", 0, EXPR_START | MEMBER_OR_CALL;
    JSX_TEXT = 68, "JSX text", 0, 0;

    BREAK = 70, "break", 0, KEYWORD;
    CASE = 71, "case", 0, KEYWORD;
    CATCH = 72, "catch", 0, KEYWORD;
    CLASS = 73, "class", 0, KEYWORD | EXPR_START;
    CONST = 74, "const", 0, KEYWORD;
    CONTINUE = 75, "continue", 0, KEYWORD;
    DEBUGGER = 76, "debugger", 0, KEYWORD;
    DEFAULT = 77, "default", 0, KEYWORD;
    DELETE = 78, "delete", 0, KEYWORD | UNARY_OP | EXPR_START;
    DO = 79, "do", 0, KEYWORD;
    ELSE = 80, "else", 0, KEYWORD;
    EXPORT = 81, "export", 0, KEYWORD;
    EXTENDS = 82, "extends", 0, KEYWORD;
    FINALLY = 83, "finally", 0, KEYWORD;
    FOR = 84, "for", 0, KEYWORD;
    FUNCTION = 85, "function", 0, KEYWORD | EXPR_START;
    IF = 86, "if", 0, KEYWORD;
    IMPORT = 87, "import", 0, KEYWORD | EXPR_START;
    IN = 88, "in", 8, KEYWORD | BINARY_OP;
    INSTANCEOF = 89, "instanceof", 8, KEYWORD | BINARY_OP;
    NEW = 90, "new", 0, KEYWORD | EXPR_START;
    RETURN = 91, "return", 0, KEYWORD;
    SUPER = 92, "super", 0, KEYWORD | EXPR_START;
    SWITCH = 93, "switch", 0, KEYWORD;
    THIS = 94, "this", 0, KEYWORD | EXPR_START;
    THROW = 95, "throw", 0, KEYWORD;
    TRY = 96, "try", 0, KEYWORD;
    TYPEOF = 97, "typeof", 0, KEYWORD | UNARY_OP | EXPR_START;
    VAR = 98, "var", 0, KEYWORD;
    VOID = 99, "void", 0, KEYWORD | UNARY_OP | EXPR_START;
    WHILE = 100, "while", 0, KEYWORD;
    WITH = 101, "with", 0, KEYWORD;
    NULL = 102, "null", 0, KEYWORD | EXPR_START;
    TRUE = 103, "true", 0, KEYWORD | EXPR_START;
    FALSE = 104, "false", 0, KEYWORD | EXPR_START;
    ENUM = 105, "enum", 0, KEYWORD | FUTURE_RESERVED;

    IMPLEMENTS = 106, "implements", 0, IDENTIFIER | STRICT_RESERVED | EXPR_START;
    INTERFACE = 107, "interface", 0, IDENTIFIER | STRICT_RESERVED | EXPR_START;
    PACKAGE = 108, "package", 0, IDENTIFIER | STRICT_RESERVED | EXPR_START;
    PRIVATE = 109, "private", 0, IDENTIFIER | STRICT_RESERVED | EXPR_START;
    PROTECTED = 110, "protected", 0, IDENTIFIER | STRICT_RESERVED | EXPR_START;
    PUBLIC = 111, "public", 0, IDENTIFIER | STRICT_RESERVED | EXPR_START;
    STATIC = 112, "static", 0, IDENTIFIER | STRICT_RESERVED | EXPR_START;
    LET = 113, "let", 0, IDENTIFIER | STRICT_RESERVED | EXPR_START;
    YIELD = 114, "yield", 0, IDENTIFIER | STRICT_RESERVED | EXPR_START;

    ASYNC = 115, "async", 0, IDENTIFIER | CONTEXTUAL | EXPR_START;
    AWAIT = 116, "await", 0, IDENTIFIER | CONTEXTUAL | EXPR_START;
    OF = 117, "of", 0, IDENTIFIER | CONTEXTUAL | EXPR_START;
    GET = 118, "get", 0, IDENTIFIER | CONTEXTUAL | EXPR_START;
    SET = 119, "set", 0, IDENTIFIER | CONTEXTUAL | EXPR_START;
    AS = 120, "as", 0, IDENTIFIER | CONTEXTUAL | EXPR_START;
    FROM = 121, "from", 0, IDENTIFIER | CONTEXTUAL | EXPR_START;
    TARGET = 122, "target", 0, IDENTIFIER | CONTEXTUAL | EXPR_START;
    META = 123, "meta", 0, IDENTIFIER | CONTEXTUAL | EXPR_START;
    CONSTRUCTOR = 124, "constructor", 0, IDENTIFIER | CONTEXTUAL | EXPR_START;
    ACCESSOR = 125, "accessor", 0, IDENTIFIER | CONTEXTUAL | EXPR_START;
    EVAL = 126, "eval", 0, IDENTIFIER | CONTEXTUAL | EXPR_START;
    ARGUMENTS = 127, "arguments", 0, IDENTIFIER | CONTEXTUAL | EXPR_START;
}

impl Token {
    /// Ordinal of the kind, ignoring every flag.
    #[inline]
    pub const fn ordinal(self) -> usize {
        (self.0 & 0xFF) as usize
    }

    /// Binary operator precedence, 0 for non-operators.
    #[inline]
    pub const fn precedence(self) -> u32 {
        (self.0 & PRECEDENCE_MASK) >> PRECEDENCE_SHIFT
    }

    #[inline]
    const fn has(self, flag: u32) -> bool {
        self.0 & flag != 0
    }

    /// Reserved word in every context.
    pub const fn is_keyword(self) -> bool {
        self.has(KEYWORD)
    }

    /// Plain identifiers plus every contextual and strict-reserved word.
    pub const fn is_identifier_like(self) -> bool {
        self.has(IDENTIFIER)
    }

    /// Identifier-like or keyword: any `IdentifierName`.
    pub const fn is_identifier_name(self) -> bool {
        self.has(IDENTIFIER | KEYWORD)
    }

    /// May begin an expression.
    pub const fn is_expression_start(self) -> bool {
        self.has(EXPR_START)
    }

    /// `=` or a compound assignment operator.
    pub const fn is_assign_op(self) -> bool {
        self.has(ASSIGN_OP)
    }

    /// Participates in precedence climbing.
    pub const fn is_binary_op(self) -> bool {
        self.has(BINARY_OP)
    }

    /// Prefix unary operator, including `delete`, `typeof` and `void`.
    pub const fn is_unary_op(self) -> bool {
        self.has(UNARY_OP)
    }

    /// `++` or `--`.
    pub const fn is_update_op(self) -> bool {
        self.has(UPDATE_OP)
    }

    /// `[` or `{`.
    pub const fn is_pattern_start(self) -> bool {
        self.has(PATTERN_START)
    }

    /// A token before which a semicolon may be inserted.
    pub const fn is_auto_semicolon(self) -> bool {
        self.has(AUTO_SEMI)
    }

    /// Identifier spelled with at least one unicode escape.
    pub const fn is_escaped(self) -> bool {
        self.has(ESCAPED)
    }

    /// Reserved only in strict mode code.
    pub const fn is_strict_reserved(self) -> bool {
        self.has(STRICT_RESERVED)
    }

    /// `enum`.
    pub const fn is_future_reserved(self) -> bool {
        self.has(FUTURE_RESERVED)
    }

    /// Word with meaning only in particular positions.
    pub const fn is_contextual(self) -> bool {
        self.has(CONTEXTUAL)
    }

    /// Continues a member or call chain.
    pub const fn is_member_or_call(self) -> bool {
        self.has(MEMBER_OR_CALL)
    }

    /// String, number or bigint literal.
    pub const fn is_string_or_number(self) -> bool {
        self.has(STRING_OR_NUMBER)
    }

    /// `&&` or `||`.
    pub const fn is_logical(self) -> bool {
        self.has(LOGICAL)
    }

    /// `??`.
    pub const fn is_coalesce(self) -> bool {
        self.has(COALESCE)
    }

    /// The same kind marked as spelled with escapes.
    pub const fn escaped(self) -> Token {
        Token(self.0 | ESCAPED)
    }

    /// The kind without the escape marker.
    pub const fn unescaped(self) -> Token {
        Token(self.0 & !ESCAPED)
    }

    /// Source text of punctuators and keywords, a description otherwise.
    pub fn text(self) -> &'static str {
        TOKEN_TEXT[self.ordinal() & 0x7F]
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_escaped() {
            write!(f, "Token({}, escaped)", self.text())
        } else {
            write!(f, "Token({})", self.text())
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Maps a word to its keyword token, or `None` for a plain identifier.
pub fn keyword(word: &str) -> Option<Token> {
    let token = match word {
        "break" => Token::BREAK,
        "case" => Token::CASE,
        "catch" => Token::CATCH,
        "class" => Token::CLASS,
        "const" => Token::CONST,
        "continue" => Token::CONTINUE,
        "debugger" => Token::DEBUGGER,
        "default" => Token::DEFAULT,
        "delete" => Token::DELETE,
        "do" => Token::DO,
        "else" => Token::ELSE,
        "export" => Token::EXPORT,
        "extends" => Token::EXTENDS,
        "finally" => Token::FINALLY,
        "for" => Token::FOR,
        "function" => Token::FUNCTION,
        "if" => Token::IF,
        "import" => Token::IMPORT,
        "in" => Token::IN,
        "instanceof" => Token::INSTANCEOF,
        "new" => Token::NEW,
        "return" => Token::RETURN,
        "super" => Token::SUPER,
        "switch" => Token::SWITCH,
        "this" => Token::THIS,
        "throw" => Token::THROW,
        "try" => Token::TRY,
        "typeof" => Token::TYPEOF,
        "var" => Token::VAR,
        "void" => Token::VOID,
        "while" => Token::WHILE,
        "with" => Token::WITH,
        "null" => Token::NULL,
        "true" => Token::TRUE,
        "false" => Token::FALSE,
        "enum" => Token::ENUM,
        "implements" => Token::IMPLEMENTS,
        "interface" => Token::INTERFACE,
        "package" => Token::PACKAGE,
        "private" => Token::PRIVATE,
        "protected" => Token::PROTECTED,
        "public" => Token::PUBLIC,
        "static" => Token::STATIC,
        "let" => Token::LET,
        "yield" => Token::YIELD,
        "async" => Token::ASYNC,
        "await" => Token::AWAIT,
        "of" => Token::OF,
        "get" => Token::GET,
        "set" => Token::SET,
        "as" => Token::AS,
        "from" => Token::FROM,
        "target" => Token::TARGET,
        "meta" => Token::META,
        "constructor" => Token::CONSTRUCTOR,
        "accessor" => Token::ACCESSOR,
        "eval" => Token::EVAL,
        "arguments" => Token::ARGUMENTS,
        _ => return None,
    };
    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ordering() {
        assert!(Token::EXPONENT.precedence() > Token::MULTIPLY.precedence());
        assert!(Token::MULTIPLY.precedence() > Token::ADD.precedence());
        assert!(Token::LOGICAL_AND.precedence() > Token::LOGICAL_OR.precedence());
        assert!(Token::LOGICAL_OR.precedence() > Token::COALESCE.precedence());
        assert_eq!(Token::IN.precedence(), Token::LESS_THAN.precedence());
        assert_eq!(Token::COMMA.precedence(), 0);
    }

    #[test]
    fn test_category_bits() {
        assert!(Token::ADD.is_binary_op() && Token::ADD.is_unary_op());
        assert!(Token::TYPEOF.is_unary_op() && Token::TYPEOF.is_keyword());
        assert!(Token::LET.is_identifier_like() && Token::LET.is_strict_reserved());
        assert!(Token::ASYNC.is_contextual());
        assert!(!Token::IF.is_identifier_like());
        assert!(Token::IF.is_identifier_name());
        assert!(Token::LEFT_BRACKET.is_pattern_start());
        assert!(Token::COALESCE_ASSIGN.is_assign_op());
        assert!(Token::ENUM.is_future_reserved());
    }

    #[test]
    fn test_escape_marker_changes_identity() {
        let escaped = Token::IF.escaped();
        assert_ne!(escaped, Token::IF);
        assert_eq!(escaped.unescaped(), Token::IF);
        assert!(escaped.is_keyword());
        assert_eq!(escaped.text(), "if");
    }

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(keyword("instanceof"), Some(Token::INSTANCEOF));
        assert_eq!(keyword("yield"), Some(Token::YIELD));
        assert_eq!(keyword("undefined"), None);
    }

    #[test]
    fn test_text_table() {
        assert_eq!(Token::UNSIGNED_SHIFT_RIGHT_ASSIGN.text(), ">>>=");
        assert_eq!(Token::ARROW.to_string(), "=>");
        assert_eq!(Token::EOF.text(), "end of source");
    }
}
