//! Binding patterns, and turning literals that ended up on the left of `=`
//! or `=>` into patterns.

use super::Parser;
use crate::ast::*;
use crate::context::{Context, Destructible};
use crate::error::{ErrorMessage, ParseResult};
use crate::lexer::Marker;
use crate::scope::{BindingKind, ScopeId};
use crate::token::Token;

impl<'a> Parser<'a> {
    // ------------------------------------------------------------------
    // Binding patterns
    // ------------------------------------------------------------------

    /// BindingIdentifier or BindingPattern. Every bound name is validated and
    /// declared in `scope` as `kind`.
    pub(super) fn parse_binding_target(&mut self, context: Context, scope: ScopeId, kind: BindingKind) -> ParseResult<Pattern> {
        match self.lexer.token {
            Token::LEFT_BRACKET => self.parse_array_binding(context, scope, kind),
            Token::LEFT_BRACE => self.parse_object_binding(context, scope, kind),
            _ => Ok(Pattern::Identifier(self.parse_binding_identifier(context, scope, kind)?)),
        }
    }

    pub(super) fn parse_binding_identifier(
        &mut self,
        context: Context,
        scope: ScopeId,
        kind: BindingKind,
    ) -> ParseResult<Identifier> {
        let start = self.start();
        let token = self.lexer.token;
        if !token.is_identifier_name() {
            return Err(self.unexpected());
        }
        let name = self.take_name();
        self.check_binding_identifier(context, token, &name, kind, start)?;
        self.declare(context, scope, &name, kind, start)?;
        self.next(context)?;
        Ok(Identifier {
            name,
            span: self.finish(start),
        })
    }

    /// A binding target with an optional `= default`.
    pub(super) fn parse_binding_element(&mut self, context: Context, scope: ScopeId, kind: BindingKind) -> ParseResult<Pattern> {
        let start = self.start();
        let target = self.parse_binding_target(context, scope, kind)?;
        if !self.consume(context | Context::ALLOW_REGEXP, Token::ASSIGN)? {
            return Ok(target);
        }
        let right = self.parse_assignment_expression(context - Context::DISALLOW_IN, scope)?;
        Ok(Pattern::Assignment(Box::new(AssignmentPattern {
            left: target,
            right,
            span: self.finish(start),
        })))
    }

    /// `...target`; the current token is `...`. Object rest only binds a
    /// plain name.
    pub(super) fn parse_binding_rest(
        &mut self,
        context: Context,
        scope: ScopeId,
        kind: BindingKind,
        allow_pattern: bool,
    ) -> ParseResult<RestElement> {
        let start = self.start();
        self.next(context)?;
        if !allow_pattern && self.lexer.token.is_pattern_start() {
            return Err(self.error_here(ErrorMessage::InvalidRestTarget));
        }
        let argument = self.parse_binding_target(context, scope, kind)?;
        if self.lexer.token == Token::ASSIGN {
            return Err(self.error_here(ErrorMessage::RestWithDefault));
        }
        Ok(RestElement {
            argument,
            span: self.finish(start),
        })
    }

    fn parse_array_binding(&mut self, context: Context, scope: ScopeId, kind: BindingKind) -> ParseResult<Pattern> {
        let start = self.start();
        let inner = context - Context::DISALLOW_IN;
        self.next(inner)?;
        let mut elements = Vec::new();
        while self.lexer.token != Token::RIGHT_BRACKET {
            if self.lexer.token == Token::COMMA {
                elements.push(None);
                self.next(inner)?;
                continue;
            }
            if self.lexer.token == Token::ELLIPSIS {
                let rest = self.parse_binding_rest(inner, scope, kind, true)?;
                elements.push(Some(Pattern::Rest(Box::new(rest))));
                if self.lexer.token != Token::RIGHT_BRACKET {
                    return Err(self.error_here(ErrorMessage::RestNotLast));
                }
                break;
            }
            elements.push(Some(self.parse_binding_element(inner, scope, kind)?));
            if self.lexer.token != Token::RIGHT_BRACKET {
                self.expect(inner, Token::COMMA)?;
            }
        }
        self.next(context)?;
        Ok(Pattern::Array(ArrayPattern {
            elements,
            span: self.finish(start),
        }))
    }

    fn parse_object_binding(&mut self, context: Context, scope: ScopeId, kind: BindingKind) -> ParseResult<Pattern> {
        let start = self.start();
        let inner = context - Context::DISALLOW_IN;
        self.next(inner)?;
        let mut properties = Vec::new();
        while self.lexer.token != Token::RIGHT_BRACE {
            if self.lexer.token == Token::ELLIPSIS {
                let rest = self.parse_binding_rest(inner, scope, kind, false)?;
                properties.push(ObjectPatternMember::Rest(rest));
                if self.lexer.token != Token::RIGHT_BRACE {
                    return Err(self.error_here(ErrorMessage::RestNotLast));
                }
                break;
            }
            properties.push(ObjectPatternMember::Property(self.parse_binding_property(inner, scope, kind)?));
            if self.lexer.token != Token::RIGHT_BRACE {
                self.expect(inner, Token::COMMA)?;
            }
        }
        self.next(context)?;
        Ok(Pattern::Object(ObjectPattern {
            properties,
            span: self.finish(start),
        }))
    }

    fn parse_binding_property(&mut self, context: Context, scope: ScopeId, kind: BindingKind) -> ParseResult<AssignmentProperty> {
        let start = self.start();
        let key_token = self.lexer.token;
        let (key, computed) = self.parse_property_key(context, scope)?;

        if self.consume(context, Token::COLON)? {
            let value = self.parse_binding_element(context, scope, kind)?;
            return Ok(AssignmentProperty {
                key,
                value,
                kind: PropertyKind::Init,
                method: false,
                shorthand: false,
                computed,
                span: self.finish(start),
            });
        }

        let id = match &key {
            PropertyKey::Identifier(id) if !computed => id.clone(),
            _ => return Err(self.unexpected()),
        };
        self.check_binding_identifier(context, key_token, &id.name, kind, start)?;
        self.declare(context, scope, &id.name, kind, start)?;
        let mut value = Pattern::Identifier(id);
        if self.consume(context | Context::ALLOW_REGEXP, Token::ASSIGN)? {
            let right = self.parse_assignment_expression(context, scope)?;
            value = Pattern::Assignment(Box::new(AssignmentPattern {
                left: value,
                right,
                span: self.finish(start),
            }));
        }
        Ok(AssignmentProperty {
            key,
            value,
            kind: PropertyKind::Init,
            method: false,
            shorthand: true,
            computed: false,
            span: self.finish(start),
        })
    }

    // ------------------------------------------------------------------
    // Reinterpretation
    // ------------------------------------------------------------------

    /// Fails unless the literal just parsed can be a destructuring
    /// assignment target.
    pub(super) fn check_destructuring_target(&self, at: Marker) -> ParseResult<()> {
        if self.destructible.contains(Destructible::CANNOT_DESTRUCT) {
            return Err(self.error_at(at, ErrorMessage::InvalidDestructuringTarget));
        }
        if self.destructible.contains(Destructible::DISALLOW_TRAILING) {
            return Err(self.error_at(at, ErrorMessage::RestNotLast));
        }
        Ok(())
    }

    /// Converts an expression parsed under a cover grammar into the pattern
    /// it denotes. Consumes the expression.
    pub(super) fn reinterpret_as_pattern(&mut self, context: Context, expression: Expression) -> ParseResult<Pattern> {
        match expression {
            Expression::Identifier(id) => {
                self.check_assignment_name(context, &id.name)?;
                Ok(Pattern::Identifier(id))
            }
            Expression::Member(member) if !member.optional => Ok(Pattern::Member(member)),
            Expression::Parenthesized(inner) => match inner.expression {
                expression @ (Expression::Identifier(_) | Expression::Member(_) | Expression::Parenthesized(_)) => {
                    self.reinterpret_as_pattern(context, expression)
                }
                _ => Err(self.error_here(ErrorMessage::InvalidDestructuringTarget)),
            },
            Expression::Array(array) => {
                let mut elements = Vec::with_capacity(array.elements.len());
                for element in array.elements {
                    elements.push(match element {
                        None => None,
                        Some(ExpressionOrSpread::Expression(expression)) => {
                            Some(self.reinterpret_as_pattern(context, expression)?)
                        }
                        Some(ExpressionOrSpread::Spread(spread)) => Some(self.spread_to_rest(context, spread)?),
                    });
                }
                Ok(Pattern::Array(ArrayPattern {
                    elements,
                    span: array.span,
                }))
            }
            Expression::Object(object) => {
                let mut properties = Vec::with_capacity(object.properties.len());
                for member in object.properties {
                    properties.push(match member {
                        ObjectMember::Property(property) => {
                            if property.method || property.kind != PropertyKind::Init {
                                return Err(self.error_here(ErrorMessage::InvalidDestructuringTarget));
                            }
                            ObjectPatternMember::Property(AssignmentProperty {
                                key: property.key,
                                value: self.reinterpret_as_pattern(context, property.value)?,
                                kind: PropertyKind::Init,
                                method: false,
                                shorthand: property.shorthand,
                                computed: property.computed,
                                span: property.span,
                            })
                        }
                        ObjectMember::Spread(spread) => {
                            let argument = match spread.argument {
                                argument @ (Expression::Identifier(_)
                                | Expression::Member(_)
                                | Expression::Parenthesized(_)) => self.reinterpret_as_pattern(context, argument)?,
                                _ => return Err(self.error_here(ErrorMessage::InvalidRestTarget)),
                            };
                            ObjectPatternMember::Rest(RestElement {
                                argument,
                                span: spread.span,
                            })
                        }
                    });
                }
                Ok(Pattern::Object(ObjectPattern {
                    properties,
                    span: object.span,
                }))
            }
            Expression::Assignment(assignment) if assignment.operator == AssignmentOperator::Assign => {
                let assignment = *assignment;
                if let Pattern::Identifier(id) = &assignment.left {
                    self.check_assignment_name(context, &id.name)?;
                }
                Ok(Pattern::Assignment(Box::new(AssignmentPattern {
                    left: assignment.left,
                    right: assignment.right,
                    span: assignment.span,
                })))
            }
            _ => Err(self.error_here(ErrorMessage::InvalidDestructuringTarget)),
        }
    }

    /// `...x` of a literal becoming a rest element.
    pub(super) fn spread_to_rest(&mut self, context: Context, spread: SpreadElement) -> ParseResult<Pattern> {
        if matches!(spread.argument, Expression::Assignment(_)) {
            return Err(self.error_here(ErrorMessage::RestWithDefault));
        }
        let argument = self.reinterpret_as_pattern(context, spread.argument)?;
        Ok(Pattern::Rest(Box::new(RestElement {
            argument,
            span: spread.span,
        })))
    }

    /// An identifier or member expression as the target of a plain or
    /// compound assignment, update, or `for-in/of` head.
    pub(super) fn simple_assignment_target(
        &mut self,
        context: Context,
        expression: Expression,
        invalid: ErrorMessage,
        at: Marker,
    ) -> ParseResult<Pattern> {
        match expression {
            Expression::Identifier(id) => {
                if context.is_strict() && (id.name == "eval" || id.name == "arguments") {
                    return Err(self.error_at(at, ErrorMessage::StrictEvalArguments));
                }
                Ok(Pattern::Identifier(id))
            }
            Expression::Member(member) => Ok(Pattern::Member(member)),
            Expression::Parenthesized(inner) => self.simple_assignment_target(context, inner.expression, invalid, at),
            _ => Err(self.error_at(at, invalid)),
        }
    }

    fn check_assignment_name(&self, context: Context, name: &str) -> ParseResult<()> {
        if context.is_strict() && (name == "eval" || name == "arguments") {
            return Err(self.error_here(ErrorMessage::StrictEvalArguments));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::error::ErrorMessage;
    use crate::options::Options;
    use crate::parser::Parser;

    fn parse(source: &str) -> Result<Vec<Statement>, ErrorMessage> {
        Parser::new(source, &Options::default())
            .parse_program()
            .map(|p| p.body)
            .map_err(|e| e.message)
    }

    fn first_declarator(source: &str) -> VariableDeclarator {
        match parse(source).unwrap().remove(0) {
            Statement::Variable(mut declaration) => declaration.declarations.remove(0),
            other => panic!("not a declaration: {:?}", other),
        }
    }

    #[test]
    fn test_nested_binding_pattern() {
        let declarator = first_declarator("var {a, b: [c, ...d], e = 1, ...f} = g;");
        match declarator.id {
            Pattern::Object(object) => {
                assert_eq!(object.properties.len(), 4);
                assert!(matches!(object.properties[3], ObjectPatternMember::Rest(_)));
                let mut names = Vec::new();
                Pattern::Object(object).bound_names(&mut |id| names.push(id.name.clone()));
                assert_eq!(names, ["a", "c", "d", "e", "f"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_array_holes_and_defaults() {
        match first_declarator("let [, a = 1, , [b]] = c;").id {
            Pattern::Array(array) => {
                assert_eq!(array.elements.len(), 4);
                assert!(array.elements[0].is_none());
                assert!(matches!(array.elements[1], Some(Pattern::Assignment(_))));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_rest_rules() {
        assert_eq!(parse("let [...a, b] = c").unwrap_err(), ErrorMessage::RestNotLast);
        assert_eq!(parse("let {...a, b} = c").unwrap_err(), ErrorMessage::RestNotLast);
        assert_eq!(parse("let [...a = 1] = c").unwrap_err(), ErrorMessage::RestWithDefault);
        assert_eq!(parse("let {...{a}} = c").unwrap_err(), ErrorMessage::InvalidRestTarget);
        assert!(parse("let [...[a, b]] = c").is_ok());
    }

    #[test]
    fn test_binding_names_are_validated() {
        assert_eq!(parse("let {if} = a").unwrap_err(), ErrorMessage::ReservedWord("if".into()));
        assert_eq!(parse("let [let] = a").unwrap_err(), ErrorMessage::LetAsLexicalName);
        assert_eq!(
            parse("'use strict'; var {eval} = a").unwrap_err(),
            ErrorMessage::StrictEvalArguments
        );
        assert!(parse("var {if: x} = a").is_ok());
    }

    #[test]
    fn test_binding_duplicates() {
        assert_eq!(
            parse("let {a, b: a} = c").unwrap_err(),
            ErrorMessage::DuplicateBinding("a".into())
        );
        assert!(parse("var [a, a] = c").is_ok());
    }

    #[test]
    fn test_reinterpreted_assignment_pattern() {
        let body = parse("({a = 1, b: {c}, ...d} = e)").unwrap();
        match &body[0] {
            Statement::Expression(statement) => match &statement.expression {
                Expression::Assignment(assignment) => match &assignment.left {
                    Pattern::Object(object) => {
                        match &object.properties[0] {
                            ObjectPatternMember::Property(p) => {
                                assert!(p.shorthand);
                                assert!(matches!(p.value, Pattern::Assignment(_)));
                            }
                            other => panic!("unexpected {:?}", other),
                        }
                        assert!(matches!(object.properties[2], ObjectPatternMember::Rest(_)));
                    }
                    other => panic!("unexpected {:?}", other),
                },
                other => panic!("unexpected {:?}", other),
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_methods_are_not_targets() {
        assert_eq!(
            parse("({a() {}} = b)").unwrap_err(),
            ErrorMessage::InvalidDestructuringTarget
        );
        assert_eq!(
            parse("({get a() {}} = b)").unwrap_err(),
            ErrorMessage::InvalidDestructuringTarget
        );
    }

    #[test]
    fn test_strict_assignment_names() {
        assert_eq!(
            parse("'use strict'; [eval] = a").unwrap_err(),
            ErrorMessage::StrictEvalArguments
        );
        assert_eq!(
            parse("'use strict'; ({arguments = 1} = a)").unwrap_err(),
            ErrorMessage::StrictEvalArguments
        );
        assert!(parse("[eval] = a").is_ok());
    }
}
