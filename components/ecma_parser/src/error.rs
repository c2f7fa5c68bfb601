//! Parser error types and helpers

use core_types::{ErrorCategory, SourcePosition};
use thiserror::Error;

/// Every diagnostic the front end can produce.
///
/// Variants are documented by their message template.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorMessage {
    // Lexical
    #[error("Invalid or unexpected token '{0}'")]
    IllegalCharacter(char),
    #[error("Unterminated string literal")]
    UnterminatedString,
    #[error("Unterminated template literal")]
    UnterminatedTemplate,
    #[error("Multiline comment was not closed properly")]
    UnterminatedComment,
    #[error("Unterminated regular expression")]
    UnterminatedRegExp,
    #[error("Invalid hexadecimal escape sequence")]
    InvalidHexEscape,
    #[error("Invalid Unicode escape sequence")]
    InvalidUnicodeEscape,
    #[error("Undefined Unicode code-point")]
    UnicodeOverflow,
    #[error("Invalid escape sequence in identifier")]
    InvalidIdentifierEscape,
    #[error("Invalid or missing private name after '#'")]
    InvalidPrivateName,
    #[error("Duplicate regular expression flag '{0}'")]
    DuplicateRegExpFlag(char),
    #[error("Unexpected regular expression flag '{0}'")]
    UnknownRegExpFlag(char),
    #[error("Regular expression flags 'u' and 'v' cannot be combined")]
    ConflictingRegExpFlags,
    #[error("Invalid regular expression: {0}")]
    InvalidRegExp(String),
    #[error("Octal escape sequences are not allowed in template strings")]
    TemplateOctalEscape,
    #[error("HTML comments are not allowed in modules")]
    HtmlCommentInModule,
    #[error("Unterminated JSX string")]
    UnterminatedJsxString,

    // Numeric
    #[error("Missing exponent digits")]
    MissingExponent,
    #[error("Expected {0} digits")]
    MissingDigits(&'static str),
    #[error("Identifier starts immediately after numeric literal")]
    IdentifierAfterNumber,
    #[error("Invalid BigInt syntax")]
    InvalidBigInt,
    #[error("Numeric separators are not allowed here")]
    InvalidNumericSeparator,
    #[error("Numeric separators are not allowed at the end of numeric literals")]
    TrailingNumericSeparator,
    #[error("Only one underscore is allowed as numeric separator")]
    ContinuousNumericSeparator,

    // Syntax
    #[error("Unexpected token '{0}'")]
    UnexpectedToken(String),
    #[error("Expected '{expected}' but found '{found}'")]
    Expected {
        /// What the grammar required
        expected: &'static str,
        /// What the source contained
        found: String,
    },
    #[error("Invalid left-hand side in assignment")]
    InvalidLhs,
    #[error("Invalid left-hand side expression in {0} operation")]
    InvalidUpdateTarget(&'static str),
    #[error("Invalid left-hand side in {0} loop")]
    InvalidForLhs(&'static str),
    #[error("Invalid destructuring assignment target")]
    InvalidDestructuringTarget,
    #[error("Invalid shorthand property initializer")]
    InvalidShorthandInit,
    #[error("Rest element must be last element")]
    RestNotLast,
    #[error("Rest elements cannot have a default value")]
    RestWithDefault,
    #[error("Rest parameter must be a binding identifier or pattern")]
    InvalidRestTarget,
    #[error("Duplicate __proto__ fields are not allowed in object literals")]
    DuplicateProto,
    #[error("Invalid arrow function parameters")]
    InvalidArrowParams,
    #[error("Line terminator not permitted before arrow")]
    LineBreakBeforeArrow,
    #[error("No line break is allowed after 'async'")]
    LineBreakAfterAsync,
    #[error("Illegal newline after throw")]
    LineBreakAfterThrow,
    #[error("Cannot mix '??' with '&&' or '||' without parentheses")]
    MixedCoalesce,
    #[error("Unary operator used immediately before exponentiation expression")]
    UnaryBeforeExponent,
    #[error("Invalid tagged template on optional chain")]
    OptionalChainTemplate,
    #[error("Invalid optional chain from new expression")]
    OptionalChainNew,
    #[error("Illegal return statement")]
    IllegalReturn,
    #[error("Illegal break statement")]
    IllegalBreak,
    #[error("Illegal continue statement: no surrounding iteration statement")]
    IllegalContinue,
    #[error("Undefined label '{0}'")]
    UnknownLabel(String),
    #[error("Label '{0}' has already been declared")]
    DuplicateLabel(String),
    #[error("Illegal continue statement: '{0}' does not denote an iteration statement")]
    InvalidContinueLabel(String),
    #[error("{0} loop variable declaration may not have an initializer")]
    ForInitializer(&'static str),
    #[error("Invalid left-hand side in {0} loop: Must have a single binding")]
    ForMultipleBindings(&'static str),
    #[error("for await is only valid in async functions and the top level of modules")]
    ForAwaitOutsideAsync,
    #[error("The left-hand side of a for-of loop may not be 'async'")]
    ForOfAsync,
    #[error("The left-hand side of a for-of loop may not start with 'let'")]
    ForOfLet,
    #[error("Missing initializer in {0} declaration")]
    MissingInitializer(&'static str),
    #[error("new.target expression is not allowed here")]
    InvalidNewTarget,
    #[error("Cannot use 'import.meta' outside a module")]
    ImportMetaOutsideModule,
    #[error("'super' keyword unexpected here")]
    InvalidSuperProperty,
    #[error("'super' call is only valid in constructors of derived classes")]
    InvalidSuperCall,
    #[error("Lexical declaration cannot appear in a single-statement context")]
    LexicalInSingleStatement,
    #[error("Function declarations are not allowed in a single-statement context")]
    FunctionInSingleStatement,
    #[error("Async functions, generators and classes can only be declared at the top level or inside a block")]
    InvalidDeclarationContext,
    #[error("Labelled function declarations are not allowed here")]
    LabelledFunction,
    #[error("Lexical declaration cannot start with 'let ['")]
    LetBracketStart,
    #[error("More than one default clause in switch statement")]
    MultipleDefaults,
    #[error("Missing catch or finally after try")]
    MissingCatchOrFinally,
    #[error("Yield expression not allowed in formal parameter")]
    YieldInParameter,
    #[error("Illegal await-expression in formal parameters of async function")]
    AwaitInParameter,
    #[error("'await' is only valid in async functions and the top level bodies of modules")]
    AwaitOutsideAsync,
    #[error("'arguments' is not allowed in class field initializer or static initialization block")]
    ArgumentsInClassInit,
    #[error("Getter must not have any formal parameters")]
    GetterWithParameters,
    #[error("Setter must have exactly one formal parameter")]
    SetterParameterCount,
    #[error("Setter function argument must not be a rest parameter")]
    SetterRestParameter,
    #[error("Private fields can not be deleted")]
    DeletePrivateField,
    #[error("Illegal 'use strict' directive in function with non-simple parameter list")]
    NonSimpleUseStrict,
    #[error("Keywords cannot contain escape characters")]
    EscapedKeyword,
    #[error("Unexpected reserved word '{0}'")]
    ReservedWord(String),
    #[error("Dynamic import requires one or two arguments")]
    InvalidImportCall,
    #[error("Decorators are not enabled")]
    DecoratorsDisabled,
    #[error("Decorators cannot appear here")]
    MisplacedDecorator,
    #[error("Expected corresponding JSX closing tag for '{0}'")]
    JsxClosingTagMismatch(String),
    #[error("JSX attributes must only be assigned a non-empty expression")]
    JsxEmptyAttribute,
    #[error("Adjacent JSX elements must be wrapped in an enclosing tag")]
    JsxAdjacentElements,
    #[error("Calls to 'super' and member accesses on arrow bodies must be parenthesized")]
    InvalidArrowBodyContinuation,

    // Binding
    #[error("Identifier '{0}' has already been declared")]
    DuplicateBinding(String),
    #[error("Duplicate parameter name not allowed in this context")]
    DuplicateParameter(String),
    #[error("let is disallowed as a lexically bound name")]
    LetAsLexicalName,

    // Strict mode
    #[error("Unexpected eval or arguments in strict mode")]
    StrictEvalArguments,
    #[error("Unexpected strict mode reserved word '{0}'")]
    StrictReservedWord(String),
    #[error("Octal literals are not allowed in strict mode")]
    StrictOctalLiteral,
    #[error("Decimals with leading zeros are not allowed in strict mode")]
    StrictLeadingZero,
    #[error("Octal escape sequences are not allowed in strict mode")]
    StrictOctalEscape,
    #[error("\\8 and \\9 are not allowed in strict mode")]
    StrictEightOrNine,
    #[error("Strict mode code may not include a with statement")]
    StrictWith,
    #[error("Delete of an unqualified identifier in strict mode")]
    StrictDelete,
    #[error("In strict mode code, functions can only be declared at top level or inside a block")]
    StrictFunctionInStatement,

    // Module
    #[error("Duplicate export of '{0}'")]
    DuplicateExport(String),
    #[error("Export '{0}' is not defined in module")]
    UndeclaredExport(String),
    #[error("Cannot use import or export statements outside a module")]
    ModuleSyntaxOutsideModule,
    #[error("Import and export declarations may only appear at the top level of a module")]
    ModuleSyntaxNotTopLevel,
    #[error("A string literal cannot be used as an exported binding without 'from'")]
    StringExportLocal,
    #[error("Module export names must be well-formed Unicode strings")]
    MalformedExportName,

    // Class
    #[error("A class may only have one constructor")]
    DuplicateConstructor,
    #[error("Class constructor may not be {0}")]
    InvalidConstructor(&'static str),
    #[error("Classes may not have a static property named 'prototype'")]
    StaticPrototype,
    #[error("Classes may not have a field named 'constructor'")]
    ConstructorField,
    #[error("Classes may not have a private field named '#constructor'")]
    PrivateConstructor,
    #[error("Identifier '#{0}' has already been declared")]
    DuplicatePrivateName(String),
    #[error("Private field '#{0}' must be declared in an enclosing class")]
    UndeclaredPrivateName(String),
}

impl ErrorMessage {
    /// The taxonomy bucket this message belongs to.
    pub fn category(&self) -> ErrorCategory {
        use ErrorMessage::*;
        match self {
            IllegalCharacter(_)
            | UnterminatedString
            | UnterminatedTemplate
            | UnterminatedComment
            | UnterminatedRegExp
            | InvalidHexEscape
            | InvalidUnicodeEscape
            | UnicodeOverflow
            | InvalidIdentifierEscape
            | InvalidPrivateName
            | DuplicateRegExpFlag(_)
            | UnknownRegExpFlag(_)
            | ConflictingRegExpFlags
            | InvalidRegExp(_)
            | TemplateOctalEscape
            | HtmlCommentInModule
            | UnterminatedJsxString => ErrorCategory::Lexical,

            MissingExponent
            | MissingDigits(_)
            | IdentifierAfterNumber
            | InvalidBigInt
            | InvalidNumericSeparator
            | TrailingNumericSeparator
            | ContinuousNumericSeparator => ErrorCategory::Numeric,

            DuplicateBinding(_) | DuplicateParameter(_) | LetAsLexicalName => ErrorCategory::Binding,

            StrictEvalArguments
            | StrictReservedWord(_)
            | StrictOctalLiteral
            | StrictLeadingZero
            | StrictOctalEscape
            | StrictEightOrNine
            | StrictWith
            | StrictDelete
            | StrictFunctionInStatement
            | NonSimpleUseStrict => ErrorCategory::StrictMode,

            DuplicateExport(_)
            | UndeclaredExport(_)
            | ModuleSyntaxOutsideModule
            | ModuleSyntaxNotTopLevel
            | StringExportLocal
            | MalformedExportName
            | ImportMetaOutsideModule => ErrorCategory::Module,

            DuplicateConstructor
            | InvalidConstructor(_)
            | StaticPrototype
            | ConstructorField
            | PrivateConstructor
            | DuplicatePrivateName(_)
            | UndeclaredPrivateName(_)
            | DeletePrivateField
            | InvalidSuperCall
            | InvalidSuperProperty
            | ArgumentsInClassInit => ErrorCategory::Class,

            _ => ErrorCategory::Syntax,
        }
    }
}

/// A positioned diagnostic. Parsing stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{line}:{column}]: {message}")]
pub struct ParseError {
    /// Offset of the offending text in characters (0-indexed). Errors from
    /// a bare [`Lexer`](crate::Lexer) carry byte offsets until the parser
    /// converts them.
    pub index: usize,
    /// Line number (1-indexed)
    pub line: u32,
    /// Column in characters (0-indexed)
    pub column: u32,
    /// What went wrong
    pub message: ErrorMessage,
}

impl ParseError {
    /// The diagnostic category.
    pub fn category(&self) -> ErrorCategory {
        self.message.category()
    }

    /// Where the diagnostic points.
    pub fn position(&self) -> SourcePosition {
        SourcePosition::new(self.line, self.column, self.index)
    }

    /// Converts `index` from a byte offset into `source` to a character offset.
    pub(crate) fn with_character_index(mut self, source: &str) -> Self {
        self.index = source.char_indices().take_while(|(offset, _)| *offset < self.index).count();
        self
    }
}

/// Result alias used throughout the parser.
pub type ParseResult<T> = Result<T, ParseError>;

/// Create a syntax error at a given position
pub fn syntax_error(message: ErrorMessage, position: SourcePosition) -> ParseError {
    ParseError {
        index: position.offset,
        line: position.line,
        column: position.column,
        message,
    }
}

/// Create an unexpected token error
pub fn unexpected_token(found: impl Into<String>, position: SourcePosition) -> ParseError {
    syntax_error(ErrorMessage::UnexpectedToken(found.into()), position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes_position() {
        let err = syntax_error(ErrorMessage::StrictWith, SourcePosition::new(3, 7, 40));
        assert_eq!(
            err.to_string(),
            "[3:7]: Strict mode code may not include a with statement"
        );
    }

    #[test]
    fn test_unexpected_token() {
        let err = unexpected_token("}", SourcePosition::origin());
        assert_eq!(err.message, ErrorMessage::UnexpectedToken("}".into()));
        assert_eq!(err.category(), ErrorCategory::Syntax);
    }

    #[test]
    fn test_message_templates_carry_parameters() {
        assert_eq!(
            ErrorMessage::DuplicateBinding("x".into()).to_string(),
            "Identifier 'x' has already been declared"
        );
        assert_eq!(
            ErrorMessage::UndeclaredPrivateName("y".into()).to_string(),
            "Private field '#y' must be declared in an enclosing class"
        );
    }

    #[test]
    fn test_categories() {
        assert_eq!(ErrorMessage::StrictOctalLiteral.category(), ErrorCategory::StrictMode);
        assert_eq!(ErrorMessage::MissingExponent.category(), ErrorCategory::Numeric);
        assert_eq!(ErrorMessage::UnterminatedString.category(), ErrorCategory::Lexical);
        assert_eq!(ErrorMessage::DuplicateExport("a".into()).category(), ErrorCategory::Module);
        assert_eq!(ErrorMessage::DuplicateConstructor.category(), ErrorCategory::Class);
        assert_eq!(ErrorMessage::DuplicateBinding("a".into()).category(), ErrorCategory::Binding);
    }

    #[test]
    fn test_character_index() {
        let err = syntax_error(ErrorMessage::IllegalReturn, SourcePosition::new(1, 3, 4));
        assert_eq!(err.with_character_index("é; return").index, 3);
        let err = syntax_error(ErrorMessage::IllegalReturn, SourcePosition::new(1, 3, 3));
        assert_eq!(err.with_character_index("ab;return").index, 3);
    }

    #[test]
    fn test_position_round_trip() {
        let err = syntax_error(ErrorMessage::IllegalReturn, SourcePosition::new(2, 0, 9));
        assert_eq!(err.position(), SourcePosition::new(2, 0, 9));
    }
}
