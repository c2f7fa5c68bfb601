//! Parser configuration.
//!
//! [`Options`] deserializes from the camelCase JSON objects used by ESTree
//! tooling, so an options file can be handed straight to the parser.

use serde::{Deserialize, Serialize};

use crate::context::Context;

/// Goal symbol of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Classic script
    #[default]
    Script,
    /// ECMAScript module; implies strict mode
    Module,
    /// CommonJS module: script goal with top-level `return`
    Commonjs,
}

/// Parser options.
///
/// # Examples
///
/// ```
/// use ecma_parser::{Options, SourceType};
///
/// let opts: Options = serde_json::from_str(r#"{ "sourceType": "module", "loc": true }"#).unwrap();
/// assert_eq!(opts.source_type, SourceType::Module);
/// assert!(opts.loc);
/// assert!(!opts.ranges);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Goal symbol
    pub source_type: SourceType,
    /// Enable proposals: decorators
    #[serde(alias = "allowNextSyntax")]
    pub next: bool,
    /// Attach `start`, `end` and `range` to every node
    pub ranges: bool,
    /// Attach `loc` to every node
    pub loc: bool,
    /// Attach `raw` to literals
    pub raw: bool,
    /// Parse as if the source began with `"use strict"`
    pub implied_strict: bool,
    /// Keep `ParenthesizedExpression` nodes
    #[serde(alias = "preserveParenthesizedExpressionNodes")]
    pub preserve_parens: bool,
    /// Enable JSX
    pub jsx: bool,
    /// Annex B web-compatibility relaxations
    pub web_compat: bool,
    /// Allow `return` at the top level
    pub global_return: bool,
    /// Reject regular expressions the validator considers invalid
    #[serde(alias = "validateRegexAtParseTime")]
    pub validate_regex: bool,
    /// File name recorded in `loc.source`
    pub source: Option<String>,
}

impl Options {
    /// Options for the module goal.
    pub fn module() -> Self {
        Self {
            source_type: SourceType::Module,
            ..Self::default()
        }
    }

    /// True when the module goal is selected.
    pub fn is_module(&self) -> bool {
        self.source_type == SourceType::Module
    }

    /// The context a program body starts in.
    pub fn initial_context(&self) -> Context {
        let mut context = Context::IN_GLOBAL;
        match self.source_type {
            SourceType::Module => {
                context |= Context::MODULE | Context::STRICT | Context::IN_AWAIT_CONTEXT;
            }
            SourceType::Commonjs => context |= Context::IN_RETURN_CONTEXT,
            SourceType::Script => {}
        }
        if self.implied_strict {
            context |= Context::STRICT;
        }
        if self.global_return {
            context |= Context::IN_RETURN_CONTEXT;
        }
        if self.jsx {
            context |= Context::JSX;
        }
        if self.web_compat {
            context |= Context::WEB_COMPAT;
        }
        if self.next {
            context |= Context::NEXT;
        }
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = Options::default();
        assert_eq!(opts.source_type, SourceType::Script);
        assert!(!opts.jsx);
        assert!(opts.source.is_none());
    }

    #[test]
    fn test_module_implies_strict() {
        let ctx = Options::module().initial_context();
        assert!(ctx.contains(Context::STRICT | Context::MODULE));
    }

    #[test]
    fn test_commonjs_implies_global_return() {
        let opts = Options {
            source_type: SourceType::Commonjs,
            ..Options::default()
        };
        let ctx = opts.initial_context();
        assert!(ctx.contains(Context::IN_RETURN_CONTEXT));
        assert!(!ctx.contains(Context::STRICT));
    }

    #[test]
    fn test_flag_mapping() {
        let opts = Options {
            implied_strict: true,
            web_compat: true,
            jsx: true,
            ..Options::default()
        };
        let ctx = opts.initial_context();
        assert!(ctx.contains(Context::STRICT | Context::WEB_COMPAT | Context::JSX));
    }
}
