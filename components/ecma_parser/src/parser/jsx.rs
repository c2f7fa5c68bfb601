//! JSX elements and fragments.
//!
//! Tags are scanned with [`Parser::next_jsx_tag`] and element content with
//! [`Parser::next_jsx_child`]; embedded `{ expressions }` switch back to the
//! ordinary scanner. Which scanner reads the token after an element depends on
//! where the element sits, see [`Follow`].

use super::Parser;
use crate::ast::*;
use crate::context::Context;
use crate::error::{ErrorMessage, ParseResult};
use crate::lexer::{Marker, TokenValue};
use crate::scope::ScopeId;
use crate::token::Token;

/// How to scan the token after an element's final `>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Follow {
    /// The element is an expression
    Expression,
    /// The element is a child of another element
    Child,
    /// The element is an attribute value
    Tag,
}

enum JsxNode {
    Element(JsxElement),
    Fragment(JsxFragment),
}

impl<'a> Parser<'a> {
    /// A JSX element or fragment in expression position; the current token is `<`.
    pub(super) fn parse_jsx_root(&mut self, context: Context, scope: ScopeId) -> ParseResult<Expression> {
        let start = self.start();
        self.next_jsx_tag(context)?;
        let node = self.parse_jsx_after_open(context, scope, start, Follow::Expression)?;
        if self.lexer.token == Token::LESS_THAN {
            return Err(self.error_here(ErrorMessage::JsxAdjacentElements));
        }
        self.set_opaque();
        Ok(match node {
            JsxNode::Element(element) => Expression::JsxElement(Box::new(element)),
            JsxNode::Fragment(fragment) => Expression::JsxFragment(Box::new(fragment)),
        })
    }

    fn jsx_advance(&mut self, context: Context, follow: Follow) -> ParseResult<()> {
        match follow {
            Follow::Expression => self.next(context),
            Follow::Child => self.next_jsx_child(),
            Follow::Tag => self.next_jsx_tag(context),
        }
    }

    /// Everything after the opening `<`.
    fn parse_jsx_after_open(
        &mut self,
        context: Context,
        scope: ScopeId,
        start: Marker,
        follow: Follow,
    ) -> ParseResult<JsxNode> {
        if self.lexer.token == Token::GREATER_THAN {
            self.next_jsx_child()?;
            let opening_fragment = JsxOpeningFragment {
                span: self.finish(start),
            };
            let (children, close_start) = self.parse_jsx_children(context, scope)?;
            self.next_jsx_tag(context)?;
            if self.lexer.token != Token::GREATER_THAN {
                return Err(self.error_at(close_start, ErrorMessage::JsxClosingTagMismatch("<>".to_string())));
            }
            self.jsx_advance(context, follow)?;
            return Ok(JsxNode::Fragment(JsxFragment {
                opening_fragment,
                children,
                closing_fragment: JsxClosingFragment {
                    span: self.finish(close_start),
                },
                span: self.finish(start),
            }));
        }

        let name = self.parse_jsx_element_name(context)?;
        let attributes = self.parse_jsx_attributes(context, scope)?;
        if self.lexer.token == Token::DIVIDE {
            self.next_jsx_tag(context)?;
            if self.lexer.token != Token::GREATER_THAN {
                return Err(self.unexpected());
            }
            self.jsx_advance(context, follow)?;
            let opening_element = JsxOpeningElement {
                name,
                attributes,
                self_closing: true,
                span: self.finish(start),
            };
            return Ok(JsxNode::Element(JsxElement {
                opening_element,
                children: Vec::new(),
                closing_element: None,
                span: self.finish(start),
            }));
        }

        self.next_jsx_child()?;
        let opening_element = JsxOpeningElement {
            name,
            attributes,
            self_closing: false,
            span: self.finish(start),
        };
        let (children, close_start) = self.parse_jsx_children(context, scope)?;
        self.next_jsx_tag(context)?;
        let expected = opening_element.name.qualified();
        if self.lexer.token == Token::GREATER_THAN {
            return Err(self.error_at(close_start, ErrorMessage::JsxClosingTagMismatch(expected)));
        }
        let closing_name = self.parse_jsx_element_name(context)?;
        if closing_name.qualified() != expected {
            return Err(self.error_at(close_start, ErrorMessage::JsxClosingTagMismatch(expected)));
        }
        if self.lexer.token != Token::GREATER_THAN {
            return Err(self.unexpected());
        }
        self.jsx_advance(context, follow)?;
        Ok(JsxNode::Element(JsxElement {
            opening_element,
            children,
            closing_element: Some(JsxClosingElement {
                name: closing_name,
                span: self.finish(close_start),
            }),
            span: self.finish(start),
        }))
    }

    /// Children up to the closing tag. Returns them with the position of the
    /// closing `<`; the current token is then the `/` after it.
    fn parse_jsx_children(&mut self, context: Context, scope: ScopeId) -> ParseResult<(Vec<JsxChild>, Marker)> {
        let mut children = Vec::new();
        loop {
            let start = self.start();
            match self.lexer.token {
                Token::JSX_TEXT => {
                    let value = match std::mem::take(&mut self.lexer.value) {
                        TokenValue::JsxText(text) => text,
                        _ => self.lexer.raw().to_string(),
                    };
                    self.next_jsx_child()?;
                    children.push(JsxChild::Text(JsxText {
                        raw: value.clone(),
                        value,
                        span: self.finish(start),
                    }));
                }
                Token::LEFT_BRACE => children.push(self.parse_jsx_child_container(context, scope)?),
                Token::LESS_THAN => {
                    self.next_jsx_tag(context)?;
                    if self.lexer.token == Token::DIVIDE {
                        return Ok((children, start));
                    }
                    match self.parse_jsx_after_open(context, scope, start, Follow::Child)? {
                        JsxNode::Element(element) => children.push(JsxChild::Element(Box::new(element))),
                        JsxNode::Fragment(fragment) => children.push(JsxChild::Fragment(Box::new(fragment))),
                    }
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    /// `{expression}`, `{}` or `{...spread}` between tags.
    fn parse_jsx_child_container(&mut self, context: Context, scope: ScopeId) -> ParseResult<JsxChild> {
        let start = self.start();
        let inner = context - Context::DISALLOW_IN;
        self.next(inner | Context::ALLOW_REGEXP)?;
        if self.lexer.token == Token::ELLIPSIS {
            self.next(inner | Context::ALLOW_REGEXP)?;
            let expression = self.parse_expression(inner, scope)?;
            self.expect_jsx_close_brace()?;
            self.next_jsx_child()?;
            return Ok(JsxChild::Spread(JsxSpreadChild {
                expression,
                span: self.finish(start),
            }));
        }
        let expression = if self.lexer.token == Token::RIGHT_BRACE {
            JsxExpression::Empty(JsxEmptyExpression {
                span: self.span_between(self.lexer.prev_end, self.lexer.token_start),
            })
        } else {
            JsxExpression::Expression(self.parse_expression(inner, scope)?)
        };
        self.expect_jsx_close_brace()?;
        self.next_jsx_child()?;
        Ok(JsxChild::Expression(JsxExpressionContainer {
            expression,
            span: self.finish(start),
        }))
    }

    fn expect_jsx_close_brace(&self) -> ParseResult<()> {
        if self.lexer.token == Token::RIGHT_BRACE {
            Ok(())
        } else {
            Err(self.error_here(ErrorMessage::Expected {
                expected: "}",
                found: self.found_text(),
            }))
        }
    }

    // ------------------------------------------------------------------
    // Names and attributes
    // ------------------------------------------------------------------

    fn parse_jsx_identifier(&mut self, context: Context) -> ParseResult<JsxIdentifier> {
        if self.lexer.token != Token::IDENTIFIER {
            return Err(self.unexpected());
        }
        let start = self.start();
        let name = self.take_name();
        self.next_jsx_tag(context)?;
        Ok(JsxIdentifier {
            name,
            span: self.finish(start),
        })
    }

    /// `a`, `a:b` or `a.b.c`
    fn parse_jsx_element_name(&mut self, context: Context) -> ParseResult<JsxElementName> {
        let start = self.start();
        let id = self.parse_jsx_identifier(context)?;
        match self.lexer.token {
            Token::COLON => {
                self.next_jsx_tag(context)?;
                let name = self.parse_jsx_identifier(context)?;
                Ok(JsxElementName::Namespaced(JsxNamespacedName {
                    namespace: id,
                    name,
                    span: self.finish(start),
                }))
            }
            Token::PERIOD => {
                let mut object = JsxMemberObject::Identifier(id);
                loop {
                    self.next_jsx_tag(context)?;
                    let property = self.parse_jsx_identifier(context)?;
                    let member = Box::new(JsxMemberExpression {
                        object,
                        property,
                        span: self.finish(start),
                    });
                    if self.lexer.token != Token::PERIOD {
                        return Ok(JsxElementName::Member(member));
                    }
                    object = JsxMemberObject::Member(member);
                }
            }
            _ => Ok(JsxElementName::Identifier(id)),
        }
    }

    fn parse_jsx_attributes(&mut self, context: Context, scope: ScopeId) -> ParseResult<Vec<JsxAttributeItem>> {
        let mut attributes = Vec::new();
        while !matches!(self.lexer.token, Token::GREATER_THAN | Token::DIVIDE) {
            let start = self.start();
            if self.lexer.token == Token::LEFT_BRACE {
                self.next(context | Context::ALLOW_REGEXP)?;
                if self.lexer.token != Token::ELLIPSIS {
                    return Err(self.unexpected());
                }
                self.next(context | Context::ALLOW_REGEXP)?;
                let argument = self.parse_assignment_expression(context - Context::DISALLOW_IN, scope)?;
                self.expect_jsx_close_brace()?;
                self.next_jsx_tag(context)?;
                attributes.push(JsxAttributeItem::Spread(JsxSpreadAttribute {
                    argument,
                    span: self.finish(start),
                }));
                continue;
            }
            let id = self.parse_jsx_identifier(context)?;
            let name = if self.lexer.token == Token::COLON {
                self.next_jsx_tag(context)?;
                let local = self.parse_jsx_identifier(context)?;
                JsxAttributeName::Namespaced(JsxNamespacedName {
                    namespace: id,
                    name: local,
                    span: self.finish(start),
                })
            } else {
                JsxAttributeName::Identifier(id)
            };
            let value = if self.lexer.token == Token::ASSIGN {
                self.next_jsx_tag(context)?;
                Some(self.parse_jsx_attribute_value(context, scope)?)
            } else {
                None
            };
            attributes.push(JsxAttributeItem::Attribute(JsxAttribute {
                name,
                value,
                span: self.finish(start),
            }));
        }
        Ok(attributes)
    }

    fn parse_jsx_attribute_value(&mut self, context: Context, scope: ScopeId) -> ParseResult<JsxAttributeValue> {
        let start = self.start();
        match self.lexer.token {
            Token::STRING => {
                let value = match std::mem::take(&mut self.lexer.value) {
                    TokenValue::String(value) => value,
                    _ => String::new(),
                };
                self.next_jsx_tag(context)?;
                Ok(JsxAttributeValue::String(Box::new(
                    self.literal(start, LiteralValue::String(value)),
                )))
            }
            Token::LEFT_BRACE => {
                self.next(context | Context::ALLOW_REGEXP)?;
                if self.lexer.token == Token::RIGHT_BRACE {
                    return Err(self.error_at(start, ErrorMessage::JsxEmptyAttribute));
                }
                let expression = self.parse_assignment_expression(context - Context::DISALLOW_IN, scope)?;
                self.expect_jsx_close_brace()?;
                self.next_jsx_tag(context)?;
                Ok(JsxAttributeValue::Expression(JsxExpressionContainer {
                    expression: JsxExpression::Expression(expression),
                    span: self.finish(start),
                }))
            }
            Token::LESS_THAN => {
                self.next_jsx_tag(context)?;
                Ok(match self.parse_jsx_after_open(context, scope, start, Follow::Tag)? {
                    JsxNode::Element(element) => JsxAttributeValue::Element(Box::new(element)),
                    JsxNode::Fragment(fragment) => JsxAttributeValue::Fragment(Box::new(fragment)),
                })
            }
            _ => Err(self.unexpected()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::error::ErrorMessage;
    use crate::options::Options;
    use crate::parser::Parser;

    fn jsx(source: &str) -> Result<Expression, ErrorMessage> {
        let options = Options {
            jsx: true,
            ..Options::default()
        };
        let mut body = Parser::new(source, &options)
            .parse_program()
            .map(|p| p.body)
            .map_err(|e| e.message)?;
        match body.remove(0) {
            Statement::Expression(statement) => Ok(statement.expression),
            other => panic!("not an expression statement: {:?}", other),
        }
    }

    fn element(source: &str) -> JsxElement {
        match jsx(source).unwrap() {
            Expression::JsxElement(element) => *element,
            other => panic!("not an element: {:?}", other),
        }
    }

    #[test]
    fn test_element_with_attributes_and_children() {
        let el = element(r#"<div className="a" {...props} data-x={1} disabled>hi {name} <b/></div>"#);
        assert_eq!(el.opening_element.name.qualified(), "div");
        assert_eq!(el.opening_element.attributes.len(), 4);
        assert!(matches!(el.opening_element.attributes[1], JsxAttributeItem::Spread(_)));
        match &el.opening_element.attributes[2] {
            JsxAttributeItem::Attribute(attribute) => match &attribute.name {
                JsxAttributeName::Identifier(id) => assert_eq!(id.name, "data-x"),
                other => panic!("unexpected {:?}", other),
            },
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(el.children.len(), 4);
        match &el.children[0] {
            JsxChild::Text(text) => assert_eq!(text.value, "hi "),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(el.children[1], JsxChild::Expression(_)));
        assert!(matches!(el.children[3], JsxChild::Element(_)));
        assert!(el.closing_element.is_some());
    }

    #[test]
    fn test_fragments_and_nesting() {
        match jsx("<><a/><b>{x}</b></>").unwrap() {
            Expression::JsxFragment(fragment) => assert_eq!(fragment.children.len(), 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_element_names() {
        let el = element("<a.b.c></a.b.c>");
        assert!(matches!(el.opening_element.name, JsxElementName::Member(_)));
        assert_eq!(el.opening_element.name.qualified(), "a.b.c");
        let el = element("<svg:rect xlink:href='#' />");
        assert_eq!(el.opening_element.name.qualified(), "svg:rect");
        assert!(el.opening_element.self_closing);
    }

    #[test]
    fn test_closing_tag_must_match() {
        assert_eq!(
            jsx("<a></b>").unwrap_err(),
            ErrorMessage::JsxClosingTagMismatch("a".into())
        );
        assert_eq!(
            jsx("<a.b></a.c>").unwrap_err(),
            ErrorMessage::JsxClosingTagMismatch("a.b".into())
        );
        assert_eq!(
            jsx("<a></>").unwrap_err(),
            ErrorMessage::JsxClosingTagMismatch("a".into())
        );
    }

    #[test]
    fn test_expression_containers() {
        assert_eq!(jsx("<a x={}></a>").unwrap_err(), ErrorMessage::JsxEmptyAttribute);
        let el = element("<a>{/* nothing */}{...xs}</a>");
        match &el.children[0] {
            JsxChild::Expression(container) => assert!(matches!(container.expression, JsxExpression::Empty(_))),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(el.children[1], JsxChild::Spread(_)));
    }

    #[test]
    fn test_element_as_attribute_value() {
        let el = element("<a b=<c/> d='e' />");
        assert_eq!(el.opening_element.attributes.len(), 2);
    }

    #[test]
    fn test_adjacent_elements() {
        assert_eq!(jsx("<a/><b/>").unwrap_err(), ErrorMessage::JsxAdjacentElements);
    }

    #[test]
    fn test_jsx_in_expressions() {
        assert!(jsx("f(() => <div>{x > 1 ? <b/> : null}</div>)").is_ok());
        assert!(jsx("<a/> == null").is_ok());
        let plain = Parser::new("<a/>", &Options::default()).parse_program();
        assert!(plain.is_err());
    }
}
