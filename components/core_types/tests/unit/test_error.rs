//! Unit tests for ErrorCategory

use core_types::ErrorCategory;

#[cfg(test)]
mod error_category_tests {
    use super::*;

    #[test]
    fn test_all_lists_every_category() {
        assert_eq!(ErrorCategory::ALL.len(), 7);
        assert!(ErrorCategory::ALL.contains(&ErrorCategory::Binding));
        assert!(ErrorCategory::ALL.contains(&ErrorCategory::Class));
    }

    #[test]
    fn test_category_as_str() {
        assert_eq!(ErrorCategory::Numeric.as_str(), "numeric");
        assert_eq!(ErrorCategory::Syntax.as_str(), "syntax");
        assert_eq!(ErrorCategory::Module.to_string(), "module");
    }
}
