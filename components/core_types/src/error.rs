//! Diagnostic taxonomy.
//!
//! Every message the front end can emit belongs to exactly one
//! [`ErrorCategory`], which tooling uses to group and filter diagnostics.

use std::fmt;

/// The category of a front-end diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed token: unterminated string, bad escape, illegal character
    Lexical,
    /// Malformed numeric literal
    Numeric,
    /// Grammar violation: unexpected token, invalid assignment target
    Syntax,
    /// Conflicting or invalid declarations
    Binding,
    /// Construct forbidden in strict mode code
    StrictMode,
    /// Import/export rule violation
    Module,
    /// Class body rule violation, including private names
    Class,
}

impl ErrorCategory {
    /// Every category, in declaration order.
    pub const ALL: [ErrorCategory; 7] = [
        ErrorCategory::Lexical,
        ErrorCategory::Numeric,
        ErrorCategory::Syntax,
        ErrorCategory::Binding,
        ErrorCategory::StrictMode,
        ErrorCategory::Module,
        ErrorCategory::Class,
    ];

    /// Lowercase name used in machine-readable output.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::Lexical => "lexical",
            ErrorCategory::Numeric => "numeric",
            ErrorCategory::Syntax => "syntax",
            ErrorCategory::Binding => "binding",
            ErrorCategory::StrictMode => "strict",
            ErrorCategory::Module => "module",
            ErrorCategory::Class => "class",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
