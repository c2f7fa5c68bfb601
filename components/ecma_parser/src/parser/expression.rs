//! Expressions, literals and the cover grammars.
//!
//! Array and object literals, parenthesized groups and `async(...)` calls
//! are parsed once as expressions. While parsing them the parser records in
//! [`Destructible`] whether the result could still be read as a pattern; the
//! token that follows (`=`, `=>`, or anything else) decides which reading
//! wins and which recorded errors apply.

use super::Parser;
use crate::ast::*;
use crate::context::{AssignKind, Context, Destructible, Flags, MemberFlags};
use crate::error::{ErrorMessage, ParseResult};
use crate::lexer::{Marker, TokenValue};
use crate::scope::ScopeId;
use crate::token::Token;

/// Facts a cover group collects about its own contents.
pub(super) const COVER_FLAGS: Flags = Flags::SEEN_YIELD.union(Flags::SEEN_AWAIT).union(Flags::SEEN_AWAIT_IDENT);

enum Operator {
    Binary(BinaryOperator),
    Logical(LogicalOperator),
}

fn binary_operator(token: Token) -> Option<Operator> {
    use BinaryOperator as B;
    let operator = match token {
        Token::ADD => B::Add,
        Token::SUBTRACT => B::Subtract,
        Token::MULTIPLY => B::Multiply,
        Token::DIVIDE => B::Divide,
        Token::MODULO => B::Modulo,
        Token::EXPONENT => B::Exponent,
        Token::LOOSE_EQUAL => B::Equal,
        Token::LOOSE_NOT_EQUAL => B::NotEqual,
        Token::STRICT_EQUAL => B::StrictEqual,
        Token::STRICT_NOT_EQUAL => B::StrictNotEqual,
        Token::LESS_THAN => B::LessThan,
        Token::GREATER_THAN => B::GreaterThan,
        Token::LESS_THAN_OR_EQUAL => B::LessThanOrEqual,
        Token::GREATER_THAN_OR_EQUAL => B::GreaterThanOrEqual,
        Token::SHIFT_LEFT => B::ShiftLeft,
        Token::SHIFT_RIGHT => B::ShiftRight,
        Token::UNSIGNED_SHIFT_RIGHT => B::UnsignedShiftRight,
        Token::BIT_AND => B::BitwiseAnd,
        Token::BIT_OR => B::BitwiseOr,
        Token::BIT_XOR => B::BitwiseXor,
        Token::IN => B::In,
        Token::INSTANCEOF => B::Instanceof,
        Token::LOGICAL_AND => return Some(Operator::Logical(LogicalOperator::And)),
        Token::LOGICAL_OR => return Some(Operator::Logical(LogicalOperator::Or)),
        Token::COALESCE => return Some(Operator::Logical(LogicalOperator::Coalesce)),
        _ => return None,
    };
    Some(Operator::Binary(operator))
}

fn unary_operator(token: Token) -> Option<UnaryOperator> {
    Some(match token {
        Token::ADD => UnaryOperator::Plus,
        Token::SUBTRACT => UnaryOperator::Minus,
        Token::NOT => UnaryOperator::Not,
        Token::COMPLEMENT => UnaryOperator::BitwiseNot,
        Token::TYPEOF => UnaryOperator::Typeof,
        Token::VOID => UnaryOperator::Void,
        Token::DELETE => UnaryOperator::Delete,
        _ => return None,
    })
}

fn assignment_operator(token: Token) -> AssignmentOperator {
    use AssignmentOperator as A;
    match token {
        Token::ADD_ASSIGN => A::Add,
        Token::SUBTRACT_ASSIGN => A::Subtract,
        Token::MULTIPLY_ASSIGN => A::Multiply,
        Token::DIVIDE_ASSIGN => A::Divide,
        Token::MODULO_ASSIGN => A::Modulo,
        Token::EXPONENT_ASSIGN => A::Exponent,
        Token::SHIFT_LEFT_ASSIGN => A::ShiftLeft,
        Token::SHIFT_RIGHT_ASSIGN => A::ShiftRight,
        Token::UNSIGNED_SHIFT_RIGHT_ASSIGN => A::UnsignedShiftRight,
        Token::BIT_AND_ASSIGN => A::BitwiseAnd,
        Token::BIT_OR_ASSIGN => A::BitwiseOr,
        Token::BIT_XOR_ASSIGN => A::BitwiseXor,
        Token::LOGICAL_AND_ASSIGN => A::LogicalAnd,
        Token::LOGICAL_OR_ASSIGN => A::LogicalOr,
        Token::COALESCE_ASSIGN => A::Coalesce,
        _ => A::Assign,
    }
}

/// Looks through `ParenthesizedExpression` wrappers.
pub(super) fn unparenthesized(mut expression: &Expression) -> &Expression {
    while let Expression::Parenthesized(inner) = expression {
        expression = &inner.expression;
    }
    expression
}

/// Tokens that make `await <token>` outside an async function a misplaced
/// await expression rather than an identifier followed by garbage.
fn starts_await_operand(token: Token) -> bool {
    (token.is_identifier_like() && token != Token::OF)
        || token.is_string_or_number()
        || matches!(
            token,
            Token::THIS | Token::NEW | Token::FUNCTION | Token::CLASS | Token::NULL | Token::TRUE | Token::FALSE
        )
}

impl<'a> Parser<'a> {
    // ------------------------------------------------------------------
    // Comma, assignment and conditional
    // ------------------------------------------------------------------

    /// Expression: one or more assignment expressions separated by commas.
    pub(super) fn parse_expression(&mut self, context: Context, scope: ScopeId) -> ParseResult<Expression> {
        let start = self.start();
        let expression = self.parse_assignment_expression(context, scope)?;
        self.parse_sequence_tail(context, scope, start, expression)
    }

    fn parse_sequence_tail(
        &mut self,
        context: Context,
        scope: ScopeId,
        start: Marker,
        first: Expression,
    ) -> ParseResult<Expression> {
        if self.lexer.token != Token::COMMA {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.consume(context | Context::ALLOW_REGEXP, Token::COMMA)? {
            expressions.push(self.parse_assignment_expression(context, scope)?);
        }
        self.set_opaque();
        Ok(Expression::Sequence(SequenceExpression {
            expressions,
            span: self.finish(start),
        }))
    }

    /// AssignmentExpression, including arrows and `yield`.
    pub(super) fn parse_assignment_expression(&mut self, context: Context, scope: ScopeId) -> ParseResult<Expression> {
        let start = self.start();
        let token = self.lexer.token;
        if token == Token::YIELD && context.contains(Context::IN_YIELD_CONTEXT) {
            return self.parse_yield_expression(context, scope, start);
        }
        let left_is_unary = token.is_unary_op() || (token == Token::AWAIT && context.contains(Context::IN_AWAIT_CONTEXT));
        let left = self.parse_unary_expression(context, scope)?;
        if self.flags.contains(Flags::ARROW_PRODUCED) {
            self.flags.remove(Flags::ARROW_PRODUCED);
            if self.lexer.token.is_member_or_call() && !self.lexer.has_newline_before() {
                return Err(self.error_here(ErrorMessage::InvalidArrowBodyContinuation));
            }
            self.set_opaque();
            return Ok(left);
        }
        self.parse_assignment_tail(context, scope, start, left, left_is_unary)
    }

    /// Everything after a left-hand side: an assignment operator and its
    /// right side, or binary operators and a conditional.
    fn parse_assignment_tail(
        &mut self,
        context: Context,
        scope: ScopeId,
        start: Marker,
        left: Expression,
        left_is_unary: bool,
    ) -> ParseResult<Expression> {
        let token = self.lexer.token;
        if token.is_assign_op() {
            let operator = assignment_operator(token);
            let (target, bits) = if token == Token::ASSIGN && matches!(left, Expression::Array(_) | Expression::Object(_)) {
                self.check_destructuring_target(start)?;
                let bits = self.destructible & Destructible::ASSIGNABLE_ONLY;
                (self.reinterpret_as_pattern(context, left)?, bits)
            } else {
                if self.assignable != AssignKind::Assignable {
                    return Err(self.error_at(start, ErrorMessage::InvalidLhs));
                }
                let bits = if token == Token::ASSIGN {
                    self.destructible & Destructible::ASSIGNABLE_ONLY
                } else {
                    Destructible::CANNOT_DESTRUCT
                };
                (self.simple_assignment_target(context, left, ErrorMessage::InvalidLhs, start)?, bits)
            };
            self.next(context | Context::ALLOW_REGEXP)?;
            let right = self.parse_assignment_expression(context, scope)?;
            self.assignable = AssignKind::CannotAssign;
            self.destructible = bits;
            return Ok(Expression::Assignment(Box::new(AssignmentExpression {
                operator,
                left: target,
                right,
                span: self.finish(start),
            })));
        }

        let mut expression = left;
        if token.is_binary_op() {
            expression = self.parse_binary_expression(context, scope, 0, start, expression, left_is_unary)?.0;
        }
        if self.lexer.token == Token::QUESTION {
            expression = self.parse_conditional_expression(context, scope, start, expression)?;
        }
        if self.lexer.token.is_assign_op() {
            return Err(self.error_at(start, ErrorMessage::InvalidLhs));
        }
        Ok(expression)
    }

    /// Resumes an expression whose left-hand side was parsed by the caller:
    /// postfix operators, assignment, binary operators and commas.
    pub(super) fn continue_expression(
        &mut self,
        context: Context,
        scope: ScopeId,
        start: Marker,
        left: Expression,
    ) -> ParseResult<Expression> {
        let expression = self.parse_postfix_and_tail(context, scope, start, left)?;
        self.parse_sequence_tail(context, scope, start, expression)
    }

    fn parse_postfix_and_tail(
        &mut self,
        context: Context,
        scope: ScopeId,
        start: Marker,
        left: Expression,
    ) -> ParseResult<Expression> {
        if self.flags.contains(Flags::ARROW_PRODUCED) {
            self.flags.remove(Flags::ARROW_PRODUCED);
            self.set_opaque();
            return Ok(left);
        }
        let left = self.parse_postfix_update(context, start, left)?;
        self.parse_assignment_tail(context, scope, start, left, false)
    }

    fn parse_conditional_expression(
        &mut self,
        context: Context,
        scope: ScopeId,
        start: Marker,
        test: Expression,
    ) -> ParseResult<Expression> {
        self.next(context | Context::ALLOW_REGEXP)?;
        let consequent = self.parse_assignment_expression(context - Context::DISALLOW_IN, scope)?;
        self.expect(context | Context::ALLOW_REGEXP, Token::COLON)?;
        let alternate = self.parse_assignment_expression(context, scope)?;
        self.set_opaque();
        Ok(Expression::Conditional(Box::new(ConditionalExpression {
            test,
            consequent,
            alternate,
            span: self.finish(start),
        })))
    }

    fn parse_yield_expression(&mut self, context: Context, scope: ScopeId, start: Marker) -> ParseResult<Expression> {
        if context.contains(Context::IN_PARAMETERS) {
            return Err(self.error_here(ErrorMessage::YieldInParameter));
        }
        self.flags |= Flags::SEEN_YIELD;
        self.next(context | Context::ALLOW_REGEXP)?;
        let mut delegate = false;
        let mut argument = None;
        if !self.lexer.has_newline_before() {
            delegate = self.consume(context | Context::ALLOW_REGEXP, Token::MULTIPLY)?;
            if delegate || self.lexer.token.is_expression_start() {
                argument = Some(self.parse_assignment_expression(context, scope)?);
            }
        }
        self.set_opaque();
        Ok(Expression::Yield(Box::new(YieldExpression {
            argument,
            delegate,
            span: self.finish(start),
        })))
    }

    // ------------------------------------------------------------------
    // Binary and unary operators
    // ------------------------------------------------------------------

    /// Precedence climbing over binary and logical operators. Returns the
    /// expression and, when its root is an unparenthesized logical
    /// expression, that operator.
    fn parse_binary_expression(
        &mut self,
        context: Context,
        scope: ScopeId,
        min_precedence: u32,
        start: Marker,
        mut left: Expression,
        mut left_is_unary: bool,
    ) -> ParseResult<(Expression, Option<LogicalOperator>)> {
        let mut left_logical = None;
        loop {
            let token = self.lexer.token;
            if !token.is_binary_op() || (token == Token::IN && context.contains(Context::DISALLOW_IN)) {
                break;
            }
            let precedence = token.precedence();
            if precedence <= min_precedence {
                break;
            }
            if token == Token::EXPONENT && left_is_unary {
                return Err(self.error_at(start, ErrorMessage::UnaryBeforeExponent));
            }
            let Some(operator) = binary_operator(token) else {
                return Err(self.unexpected());
            };
            self.next(context | Context::ALLOW_REGEXP)?;

            let right_start = self.start();
            let right_token = self.lexer.token;
            let right_is_unary = right_token.is_unary_op()
                || (right_token == Token::AWAIT && context.contains(Context::IN_AWAIT_CONTEXT));
            let right = self.parse_unary_expression(context, scope)?;
            self.reject_arrow_operand(right_start)?;
            // `**` is right-associative
            let next_min = if token == Token::EXPONENT { precedence - 1 } else { precedence };
            let (right, right_logical) =
                self.parse_binary_expression(context, scope, next_min, right_start, right, right_is_unary)?;

            let span = self.finish(start);
            left = match operator {
                Operator::Binary(operator) => {
                    left_logical = None;
                    Expression::Binary(Box::new(BinaryExpression {
                        operator,
                        left,
                        right,
                        span,
                    }))
                }
                Operator::Logical(operator) => {
                    let mixes = |other: Option<LogicalOperator>| match other {
                        Some(LogicalOperator::Coalesce) => operator != LogicalOperator::Coalesce,
                        Some(_) => operator == LogicalOperator::Coalesce,
                        None => false,
                    };
                    if mixes(left_logical) || mixes(right_logical) {
                        return Err(self.error_at(start, ErrorMessage::MixedCoalesce));
                    }
                    left_logical = Some(operator);
                    Expression::Logical(Box::new(LogicalExpression {
                        operator,
                        left,
                        right,
                        span,
                    }))
                }
            };
            left_is_unary = false;
            self.set_opaque();
        }
        Ok((left, left_logical))
    }

    /// UnaryExpression: prefix operators, `await`, and postfix updates.
    fn parse_unary_expression(&mut self, context: Context, scope: ScopeId) -> ParseResult<Expression> {
        let start = self.start();
        let token = self.lexer.token;

        if token.is_unary_op() {
            let Some(operator) = unary_operator(token) else {
                return Err(self.unexpected());
            };
            self.next(context | Context::ALLOW_REGEXP)?;
            let argument_start = self.start();
            let argument = self.parse_unary_expression(context, scope)?;
            self.reject_arrow_operand(argument_start)?;
            if operator == UnaryOperator::Delete {
                self.check_delete_operand(context, &argument, start)?;
            }
            self.set_opaque();
            return Ok(Expression::Unary(Box::new(UnaryExpression {
                operator,
                argument,
                prefix: true,
                span: self.finish(start),
            })));
        }

        if token.is_update_op() {
            let operator = if token == Token::INCREMENT {
                UpdateOperator::Increment
            } else {
                UpdateOperator::Decrement
            };
            self.next(context | Context::ALLOW_REGEXP)?;
            let argument_start = self.start();
            let argument = self.parse_unary_expression(context, scope)?;
            self.reject_arrow_operand(argument_start)?;
            self.check_update_target(context, &argument, "prefix", argument_start)?;
            self.set_opaque();
            return Ok(Expression::Update(Box::new(UpdateExpression {
                operator,
                argument,
                prefix: true,
                span: self.finish(start),
            })));
        }

        if token == Token::AWAIT && context.contains(Context::IN_AWAIT_CONTEXT) {
            return self.parse_await_expression(context, scope, start);
        }

        let expression = self.parse_left_hand_side_expression(context, scope)?;
        if self.flags.contains(Flags::ARROW_PRODUCED) {
            return Ok(expression);
        }
        self.parse_postfix_update(context, start, expression)
    }

    fn parse_await_expression(&mut self, context: Context, scope: ScopeId, start: Marker) -> ParseResult<Expression> {
        if context.contains(Context::IN_PARAMETERS) {
            return Err(self.error_here(ErrorMessage::AwaitInParameter));
        }
        self.flags |= Flags::SEEN_AWAIT;
        self.next(context | Context::ALLOW_REGEXP)?;
        let argument_start = self.start();
        let argument = self.parse_unary_expression(context, scope)?;
        self.reject_arrow_operand(argument_start)?;
        self.set_opaque();
        Ok(Expression::Await(Box::new(AwaitExpression {
            argument,
            span: self.finish(start),
        })))
    }

    fn parse_postfix_update(&mut self, context: Context, start: Marker, expression: Expression) -> ParseResult<Expression> {
        let token = self.lexer.token;
        if !token.is_update_op() || self.lexer.has_newline_before() {
            return Ok(expression);
        }
        self.check_update_target(context, &expression, "postfix", start)?;
        self.next(context)?;
        self.set_opaque();
        Ok(Expression::Update(Box::new(UpdateExpression {
            operator: if token == Token::INCREMENT {
                UpdateOperator::Increment
            } else {
                UpdateOperator::Decrement
            },
            argument: expression,
            prefix: false,
            span: self.finish(start),
        })))
    }

    fn check_update_target(
        &self,
        context: Context,
        argument: &Expression,
        fixity: &'static str,
        at: Marker,
    ) -> ParseResult<()> {
        if self.assignable != AssignKind::Assignable {
            return Err(self.error_at(at, ErrorMessage::InvalidUpdateTarget(fixity)));
        }
        if context.is_strict() {
            if let Some("eval" | "arguments") = unparenthesized(argument).as_identifier() {
                return Err(self.error_at(at, ErrorMessage::StrictEvalArguments));
            }
        }
        Ok(())
    }

    fn check_delete_operand(&self, context: Context, argument: &Expression, at: Marker) -> ParseResult<()> {
        let mut target = unparenthesized(argument);
        if let Expression::Chain(chain) = target {
            target = &chain.expression;
        }
        match target {
            Expression::Identifier(_) if context.is_strict() => Err(self.error_at(at, ErrorMessage::StrictDelete)),
            Expression::Member(member) if matches!(member.property, Expression::PrivateIdentifier(_)) => {
                Err(self.error_at(at, ErrorMessage::DeletePrivateField))
            }
            _ => Ok(()),
        }
    }

    /// An arrow function cannot be the operand of an operator.
    pub(super) fn reject_arrow_operand(&mut self, at: Marker) -> ParseResult<()> {
        if self.flags.contains(Flags::ARROW_PRODUCED) {
            self.flags.remove(Flags::ARROW_PRODUCED);
            return Err(self.error_at(at, ErrorMessage::UnexpectedToken("=>".to_string())));
        }
        Ok(())
    }

    /// Marks the last expression as neither assignable nor destructible.
    pub(super) fn set_opaque(&mut self) {
        self.assignable = AssignKind::CannotAssign;
        self.destructible = Destructible::CANNOT_DESTRUCT;
    }

    // ------------------------------------------------------------------
    // Member access and calls
    // ------------------------------------------------------------------

    /// LeftHandSideExpression: a primary expression followed by member
    /// accesses, calls and tagged templates.
    pub(super) fn parse_left_hand_side_expression(&mut self, context: Context, scope: ScopeId) -> ParseResult<Expression> {
        let start = self.start();
        let expression = self.parse_primary_expression(context, scope)?;
        if self.flags.contains(Flags::ARROW_PRODUCED) {
            return Ok(expression);
        }
        self.parse_member_or_call(context, scope, start, expression, true)
    }

    /// Applies `.x`, `[x]`, `(...)`, tagged templates and optional chains to
    /// `expression`. Calls are skipped when `allow_call` is false, which is
    /// how the callee of `new` is parsed.
    pub(super) fn parse_member_or_call(
        &mut self,
        context: Context,
        scope: ScopeId,
        start: Marker,
        mut expression: Expression,
        allow_call: bool,
    ) -> ParseResult<Expression> {
        let mut in_chain = false;
        loop {
            match self.lexer.token {
                Token::PERIOD => {
                    self.next(context)?;
                    let property = self.parse_member_property(context)?;
                    expression = self.member(start, expression, property, false, false);
                }
                Token::LEFT_BRACKET => {
                    self.next(context | Context::ALLOW_REGEXP)?;
                    let property = self.parse_expression(context - Context::DISALLOW_IN, scope)?;
                    self.expect(context, Token::RIGHT_BRACKET)?;
                    expression = self.member(start, expression, property, true, false);
                }
                Token::LEFT_PAREN if allow_call => {
                    let arguments = self.parse_arguments(context, scope)?;
                    expression = Expression::Call(Box::new(CallExpression {
                        callee: expression,
                        arguments,
                        optional: false,
                        span: self.finish(start),
                    }));
                    self.set_opaque();
                }
                Token::TEMPLATE | Token::TEMPLATE_HEAD => {
                    if in_chain {
                        return Err(self.error_here(ErrorMessage::OptionalChainTemplate));
                    }
                    let quasi = self.parse_template_literal(context | Context::TAGGED_TEMPLATE, scope, true)?;
                    expression = Expression::TaggedTemplate(Box::new(TaggedTemplateExpression {
                        tag: expression,
                        quasi,
                        span: self.finish(start),
                    }));
                    self.set_opaque();
                }
                Token::QUESTION_DOT => {
                    if !allow_call {
                        return Err(self.error_here(ErrorMessage::OptionalChainNew));
                    }
                    in_chain = true;
                    self.next(context)?;
                    match self.lexer.token {
                        Token::LEFT_PAREN => {
                            let arguments = self.parse_arguments(context, scope)?;
                            expression = Expression::Call(Box::new(CallExpression {
                                callee: expression,
                                arguments,
                                optional: true,
                                span: self.finish(start),
                            }));
                        }
                        Token::LEFT_BRACKET => {
                            self.next(context | Context::ALLOW_REGEXP)?;
                            let property = self.parse_expression(context - Context::DISALLOW_IN, scope)?;
                            self.expect(context, Token::RIGHT_BRACKET)?;
                            expression = self.member(start, expression, property, true, true);
                        }
                        Token::TEMPLATE | Token::TEMPLATE_HEAD => {
                            return Err(self.error_here(ErrorMessage::OptionalChainTemplate));
                        }
                        _ => {
                            let property = self.parse_member_property(context)?;
                            expression = self.member(start, expression, property, false, true);
                        }
                    }
                }
                _ => break,
            }
        }
        if in_chain {
            expression = Expression::Chain(Box::new(ChainExpression {
                expression,
                span: self.finish(start),
            }));
            self.set_opaque();
        }
        Ok(expression)
    }

    pub(super) fn member(&mut self, start: Marker, object: Expression, property: Expression, computed: bool, optional: bool) -> Expression {
        self.assignable = AssignKind::Assignable;
        self.destructible = Destructible::ASSIGNABLE_ONLY;
        Expression::Member(Box::new(MemberExpression {
            object,
            property,
            computed,
            optional,
            span: self.finish(start),
        }))
    }

    /// The name after `.` or `?.`: any identifier name or a private name.
    pub(super) fn parse_member_property(&mut self, context: Context) -> ParseResult<Expression> {
        let start = self.start();
        let token = self.lexer.token;
        if token == Token::PRIVATE_NAME {
            let name = self.take_name();
            self.private_scopes
                .reference(&name, start.position())
                .map_err(|message| self.error_at(start, message))?;
            self.next(context)?;
            return Ok(Expression::PrivateIdentifier(PrivateIdentifier {
                name,
                span: self.finish(start),
            }));
        }
        if !token.is_identifier_name() {
            return Err(self.unexpected());
        }
        Ok(Expression::Identifier(self.parse_identifier_name(context)?))
    }

    /// Arguments of a call or `new`; the current token is `(`.
    pub(super) fn parse_arguments(&mut self, context: Context, scope: ScopeId) -> ParseResult<Vec<ExpressionOrSpread>> {
        let inner = context - Context::DISALLOW_IN;
        self.next(inner | Context::ALLOW_REGEXP)?;
        let mut arguments = Vec::new();
        while self.lexer.token != Token::RIGHT_PAREN {
            if self.lexer.token == Token::ELLIPSIS {
                let start = self.start();
                self.next(inner | Context::ALLOW_REGEXP)?;
                let argument = self.parse_assignment_expression(inner, scope)?;
                arguments.push(ExpressionOrSpread::Spread(SpreadElement {
                    argument,
                    span: self.finish(start),
                }));
            } else {
                arguments.push(ExpressionOrSpread::Expression(self.parse_assignment_expression(inner, scope)?));
            }
            if self.lexer.token != Token::RIGHT_PAREN {
                self.expect(inner | Context::ALLOW_REGEXP, Token::COMMA)?;
            }
        }
        self.next(context)?;
        Ok(arguments)
    }

    // ------------------------------------------------------------------
    // Primary expressions
    // ------------------------------------------------------------------

    fn parse_primary_expression(&mut self, context: Context, scope: ScopeId) -> ParseResult<Expression> {
        let start = self.start();
        let token = self.lexer.token;
        self.flags.remove(Flags::ARROW_PRODUCED);
        let expression = match token {
            Token::NUMBER | Token::STRING | Token::BIGINT | Token::REGEXP | Token::TRUE | Token::FALSE | Token::NULL => {
                Expression::Literal(Box::new(self.parse_literal(context)?))
            }
            Token::THIS => {
                self.next(context)?;
                Expression::This(ThisExpression {
                    span: self.finish(start),
                })
            }
            Token::TEMPLATE | Token::TEMPLATE_HEAD => Expression::Template(self.parse_template_literal(context, scope, false)?),
            Token::LEFT_PAREN => return self.parse_group(context, scope),
            Token::LEFT_BRACKET | Token::LEFT_BRACE => {
                let literal = self.parse_pattern_literal(context, scope)?;
                if self.lexer.token != Token::ASSIGN {
                    self.check_literal_followup()?;
                }
                return Ok(literal);
            }
            Token::FUNCTION => self.parse_function_expression(context, scope, start, false)?,
            Token::CLASS => self.parse_class_expression(context, scope, start, Vec::new())?,
            Token::AT => {
                let decorators = self.parse_decorators(context, scope)?;
                if self.lexer.token != Token::CLASS {
                    return Err(self.error_here(ErrorMessage::MisplacedDecorator));
                }
                self.parse_class_expression(context, scope, start, decorators)?
            }
            Token::NEW => return self.parse_new_expression(context, scope),
            Token::SUPER => self.parse_super(context)?,
            Token::IMPORT => self.parse_import_meta_or_call(context, scope)?,
            Token::PRIVATE_NAME => self.parse_private_in(context)?,
            Token::LESS_THAN if context.contains(Context::JSX) => self.parse_jsx_root(context, scope)?,
            Token::ASYNC => return self.parse_async_expression(context, scope),
            _ if token.is_identifier_like() => return self.parse_identifier_expression(context, scope),
            _ => return Err(self.unexpected()),
        };
        self.set_opaque();
        Ok(expression)
    }

    fn parse_identifier_expression(&mut self, context: Context, scope: ScopeId) -> ParseResult<Expression> {
        let start = self.start();
        let token = self.lexer.token;
        let name = self.take_name();
        self.next(context)?;
        if self.lexer.token == Token::ARROW {
            if self.lexer.has_newline_before() {
                return Err(self.error_here(ErrorMessage::LineBreakBeforeArrow));
            }
            self.check_identifier_reference(context, token, &name, start)?;
            let param = Identifier {
                name,
                span: self.finish(start),
            };
            return self.parse_arrow_function(context, scope, start, vec![Pattern::Identifier(param)], false);
        }
        self.check_identifier_reference(context, token, &name, start)?;
        if token == Token::AWAIT && !self.lexer.has_newline_before() && starts_await_operand(self.lexer.token) {
            return Err(self.error_at(start, ErrorMessage::AwaitOutsideAsync));
        }
        self.assignable = AssignKind::Assignable;
        self.destructible = Destructible::empty();
        Ok(Expression::Identifier(Identifier {
            name,
            span: self.finish(start),
        }))
    }

    /// A literal token as a `Literal` node.
    pub(super) fn parse_literal(&mut self, context: Context) -> ParseResult<Literal> {
        let start = self.start();
        let token = self.lexer.token;
        let mut regex = None;
        let mut bigint = None;
        let value = match (token, std::mem::take(&mut self.lexer.value)) {
            (Token::TRUE, _) => LiteralValue::Boolean(true),
            (Token::FALSE, _) => LiteralValue::Boolean(false),
            (Token::NULL, _) => LiteralValue::Null,
            (_, TokenValue::String(value)) => LiteralValue::String(value),
            (_, TokenValue::Number(value)) => LiteralValue::Number(value),
            (_, TokenValue::BigInt(value)) => {
                bigint = Some(value.to_string());
                LiteralValue::BigInt(value)
            }
            (_, TokenValue::RegExp { pattern, flags, valid }) => {
                regex = Some(RegExpLiteral { pattern, flags });
                LiteralValue::RegExp { valid }
            }
            _ => return Err(self.unexpected()),
        };
        self.next(context)?;
        let mut literal = self.literal(start, value);
        literal.regex = regex;
        literal.bigint = bigint;
        Ok(literal)
    }

    /// Template literal; the current token is `TEMPLATE` or `TEMPLATE_HEAD`.
    /// Untagged templates reject malformed escapes; tagged ones cook them to
    /// `None`.
    pub(super) fn parse_template_literal(
        &mut self,
        context: Context,
        scope: ScopeId,
        tagged: bool,
    ) -> ParseResult<TemplateLiteral> {
        let start = self.start();
        let mut quasis = Vec::new();
        let mut expressions = Vec::new();
        loop {
            if !tagged {
                if let Some(error) = self.lexer.template_error.take() {
                    return Err(error);
                }
            }
            let tail = self.lexer.token == Token::TEMPLATE;
            let (cooked, raw) = match std::mem::take(&mut self.lexer.value) {
                TokenValue::Template { cooked, raw } => (cooked, raw),
                _ => return Err(self.unexpected()),
            };
            // Element spans exclude the delimiters: "`" or "}" before, "`" or "${" after
            let open = self.lexer.token_start;
            let close = self.lexer.marker();
            let trim = if tail { 1 } else { 2 };
            let element_start = Marker {
                index: open.index + 1,
                column: open.column + 1,
                ..open
            };
            let element_end = Marker {
                index: close.index.saturating_sub(trim),
                column: close.column.saturating_sub(trim as u32),
                ..close
            };
            quasis.push(TemplateElement {
                value: TemplateValue { cooked, raw },
                tail,
                span: self.span_between(element_start, element_end),
            });
            if tail {
                self.next(context - Context::TAGGED_TEMPLATE)?;
                break;
            }
            self.next(context | Context::ALLOW_REGEXP)?;
            expressions.push(self.parse_expression(context - (Context::DISALLOW_IN | Context::TAGGED_TEMPLATE), scope)?);
            self.next_template_part(context)?;
        }
        Ok(TemplateLiteral {
            quasis,
            expressions,
            span: self.finish(start),
        })
    }

    fn parse_new_expression(&mut self, context: Context, scope: ScopeId) -> ParseResult<Expression> {
        let start = self.start();
        let keyword = self.parse_identifier_name(context)?;
        if self.lexer.token == Token::PERIOD {
            self.next(context)?;
            if self.lexer.token != Token::TARGET {
                return Err(self.unexpected());
            }
            if !context.contains(Context::ALLOW_NEW_TARGET) {
                return Err(self.error_at(start, ErrorMessage::InvalidNewTarget));
            }
            let property = self.parse_identifier_name(context)?;
            self.set_opaque();
            return Ok(Expression::MetaProperty(Box::new(MetaProperty {
                meta: keyword,
                property,
                span: self.finish(start),
            })));
        }

        let callee_start = self.start();
        let token = self.lexer.token;
        let callee = match token {
            Token::NEW => self.parse_new_expression(context, scope)?,
            Token::IMPORT if self.peek(context)?.0 == Token::LEFT_PAREN => return Err(self.unexpected()),
            Token::ASYNC if self.peek(context)?.0 != Token::FUNCTION => {
                let id = self.parse_identifier_name(context)?;
                self.check_identifier_reference(context, Token::ASYNC, &id.name, callee_start)?;
                Expression::Identifier(id)
            }
            _ => self.parse_primary_expression(context, scope)?,
        };
        self.reject_arrow_operand(callee_start)?;
        let callee = self.parse_member_or_call(context, scope, callee_start, callee, false)?;
        let arguments = if self.lexer.token == Token::LEFT_PAREN {
            self.parse_arguments(context, scope)?
        } else {
            Vec::new()
        };
        self.set_opaque();
        Ok(Expression::New(Box::new(NewExpression {
            callee,
            arguments,
            span: self.finish(start),
        })))
    }

    fn parse_super(&mut self, context: Context) -> ParseResult<Expression> {
        let start = self.start();
        self.next(context)?;
        match self.lexer.token {
            Token::LEFT_PAREN => {
                if !context.contains(Context::SUPER_CALL) {
                    return Err(self.error_at(start, ErrorMessage::InvalidSuperCall));
                }
            }
            Token::PERIOD | Token::LEFT_BRACKET => {
                if !context.contains(Context::SUPER_PROPERTY) {
                    return Err(self.error_at(start, ErrorMessage::InvalidSuperProperty));
                }
            }
            _ => return Err(self.error_at(start, ErrorMessage::InvalidSuperProperty)),
        }
        Ok(Expression::Super(Super {
            span: self.finish(start),
        }))
    }

    /// `import.meta` or `import(source[, options])`.
    fn parse_import_meta_or_call(&mut self, context: Context, scope: ScopeId) -> ParseResult<Expression> {
        let start = self.start();
        let meta = self.parse_identifier_name(context)?;
        match self.lexer.token {
            Token::PERIOD => {
                self.next(context)?;
                if self.lexer.token != Token::META {
                    return Err(self.unexpected());
                }
                if !context.contains(Context::MODULE) {
                    return Err(self.error_at(start, ErrorMessage::ImportMetaOutsideModule));
                }
                let property = self.parse_identifier_name(context)?;
                Ok(Expression::MetaProperty(Box::new(MetaProperty {
                    meta,
                    property,
                    span: self.finish(start),
                })))
            }
            Token::LEFT_PAREN => {
                let inner = context - Context::DISALLOW_IN;
                self.next(inner | Context::ALLOW_REGEXP)?;
                if matches!(self.lexer.token, Token::RIGHT_PAREN | Token::ELLIPSIS) {
                    return Err(self.error_here(ErrorMessage::InvalidImportCall));
                }
                let source = self.parse_assignment_expression(inner, scope)?;
                let mut options = None;
                if self.consume(inner | Context::ALLOW_REGEXP, Token::COMMA)? && self.lexer.token != Token::RIGHT_PAREN {
                    options = Some(self.parse_assignment_expression(inner, scope)?);
                    self.consume(inner | Context::ALLOW_REGEXP, Token::COMMA)?;
                }
                if self.lexer.token != Token::RIGHT_PAREN {
                    return Err(self.error_here(ErrorMessage::InvalidImportCall));
                }
                self.next(context)?;
                Ok(Expression::Import(Box::new(ImportExpression {
                    source,
                    options,
                    span: self.finish(start),
                })))
            }
            _ => Err(self.unexpected()),
        }
    }

    /// `#x in obj`: the only place a private name stands alone.
    fn parse_private_in(&mut self, context: Context) -> ParseResult<Expression> {
        let start = self.start();
        let name = self.take_name();
        self.next(context)?;
        if self.lexer.token != Token::IN || context.contains(Context::DISALLOW_IN) {
            return Err(self.error_at(start, ErrorMessage::UnexpectedToken(format!("#{}", name))));
        }
        self.private_scopes
            .reference(&name, start.position())
            .map_err(|message| self.error_at(start, message))?;
        Ok(Expression::PrivateIdentifier(PrivateIdentifier {
            name,
            span: self.finish(start),
        }))
    }

    // ------------------------------------------------------------------
    // async
    // ------------------------------------------------------------------

    /// `async` as an identifier, an async function or arrow, or a call.
    fn parse_async_expression(&mut self, context: Context, scope: ScopeId) -> ParseResult<Expression> {
        let start = self.start();
        let (next, newline) = self.peek(context)?;
        if next == Token::FUNCTION && !newline {
            self.next(context)?;
            let function = self.parse_function_expression(context, scope, start, true)?;
            self.set_opaque();
            return Ok(function);
        }
        let id = self.parse_identifier_name(context)?;
        let token = self.lexer.token;
        if token == Token::ARROW {
            if self.lexer.has_newline_before() {
                return Err(self.error_here(ErrorMessage::LineBreakBeforeArrow));
            }
            self.check_identifier_reference(context, Token::ASYNC, "async", start)?;
            return self.parse_arrow_function(context, scope, start, vec![Pattern::Identifier(id)], false);
        }
        if token == Token::LEFT_PAREN {
            return self.parse_async_call_or_arrow(context, scope, start, id);
        }
        if token.is_identifier_like() && !self.lexer.has_newline_before() {
            return self.parse_async_arrow_with_identifier(context, scope, start);
        }
        self.check_identifier_reference(context, Token::ASYNC, "async", start)?;
        self.assignable = AssignKind::Assignable;
        self.destructible = Destructible::empty();
        Ok(Expression::Identifier(id))
    }

    /// `async x => ...`; `async` is consumed and the current token is the
    /// parameter.
    pub(super) fn parse_async_arrow_with_identifier(
        &mut self,
        context: Context,
        scope: ScopeId,
        start: Marker,
    ) -> ParseResult<Expression> {
        let param_start = self.start();
        let token = self.lexer.token;
        let name = self.take_name();
        self.next(context)?;
        if self.lexer.token != Token::ARROW {
            return Err(self.unexpected());
        }
        if self.lexer.has_newline_before() {
            return Err(self.error_here(ErrorMessage::LineBreakBeforeArrow));
        }
        self.check_identifier_reference(context | Context::IN_AWAIT_CONTEXT, token, &name, param_start)?;
        let param = Identifier {
            name,
            span: self.finish(param_start),
        };
        self.parse_arrow_function(context, scope, start, vec![Pattern::Identifier(param)], true)
    }

    /// `async(...)`: a call unless `=>` follows the closing parenthesis.
    fn parse_async_call_or_arrow(
        &mut self,
        context: Context,
        scope: ScopeId,
        start: Marker,
        callee: Identifier,
    ) -> ParseResult<Expression> {
        let newline_before_paren = self.lexer.has_newline_before();
        let inner = context - Context::DISALLOW_IN;
        let saved = self.flags & COVER_FLAGS;
        self.flags.remove(COVER_FLAGS);
        self.next(inner | Context::ALLOW_REGEXP)?;

        let mut elements = Vec::new();
        let mut bits = Destructible::empty();
        while self.lexer.token != Token::RIGHT_PAREN {
            if self.lexer.token == Token::ELLIPSIS {
                let (spread, spread_bits) = self.parse_cover_spread(inner, scope, Token::RIGHT_PAREN)?;
                bits |= spread_bits;
                elements.push(ExpressionOrSpread::Spread(spread));
            } else {
                let element = self.parse_cover_element(inner, scope, Token::RIGHT_PAREN)?;
                bits |= self.destructible;
                elements.push(ExpressionOrSpread::Expression(element));
            }
            if self.lexer.token != Token::RIGHT_PAREN {
                self.expect(inner | Context::ALLOW_REGEXP, Token::COMMA)?;
            }
        }
        self.next(context)?;
        let seen = self.flags & COVER_FLAGS;

        if self.lexer.token == Token::ARROW {
            if newline_before_paren {
                return Err(self.error_at(start, ErrorMessage::LineBreakAfterAsync));
            }
            if self.lexer.has_newline_before() {
                return Err(self.error_here(ErrorMessage::LineBreakBeforeArrow));
            }
            self.check_arrow_cover(bits, seen, start, true)?;
            self.flags = (self.flags - COVER_FLAGS) | saved;
            let params = self.cover_to_parameters(context, elements)?;
            return self.parse_arrow_function(context, scope, start, params, true);
        }

        self.flags |= saved;
        self.check_cover_stays_expression(bits, start)?;
        self.set_opaque();
        Ok(Expression::Call(Box::new(CallExpression {
            callee: Expression::Identifier(callee),
            arguments: elements,
            optional: false,
            span: self.finish(start),
        })))
    }

    // ------------------------------------------------------------------
    // Cover grammars
    // ------------------------------------------------------------------

    /// `( ... )`: a parenthesized expression or arrow parameters.
    fn parse_group(&mut self, context: Context, scope: ScopeId) -> ParseResult<Expression> {
        let start = self.start();
        let inner = context - Context::DISALLOW_IN;
        let saved = self.flags & COVER_FLAGS;
        self.flags.remove(COVER_FLAGS);
        self.next(inner | Context::ALLOW_REGEXP)?;

        let first_start = self.start();
        let mut last_end = first_start;
        let mut elements = Vec::new();
        let mut bits = Destructible::empty();
        let mut trailing_comma = false;
        let mut has_rest = false;
        while self.lexer.token != Token::RIGHT_PAREN {
            if self.lexer.token == Token::ELLIPSIS {
                let (spread, spread_bits) = self.parse_cover_spread(inner, scope, Token::RIGHT_PAREN)?;
                bits |= spread_bits;
                elements.push(ExpressionOrSpread::Spread(spread));
                has_rest = true;
                if self.lexer.token != Token::RIGHT_PAREN {
                    return Err(self.error_here(ErrorMessage::RestNotLast));
                }
                break;
            }
            let element = self.parse_cover_element(inner, scope, Token::RIGHT_PAREN)?;
            bits |= self.destructible;
            elements.push(ExpressionOrSpread::Expression(element));
            last_end = self.lexer.prev_end;
            trailing_comma = false;
            if self.lexer.token != Token::RIGHT_PAREN {
                self.expect(inner | Context::ALLOW_REGEXP, Token::COMMA)?;
                trailing_comma = true;
            }
        }
        let close = self.start();
        self.next(context)?;
        let seen = self.flags & COVER_FLAGS;

        if self.lexer.token == Token::ARROW {
            if self.lexer.has_newline_before() {
                return Err(self.error_here(ErrorMessage::LineBreakBeforeArrow));
            }
            self.check_arrow_cover(bits, seen, start, false)?;
            self.flags = (self.flags - COVER_FLAGS) | saved;
            let params = self.cover_to_parameters(context, elements)?;
            return self.parse_arrow_function(context, scope, start, params, false);
        }

        self.flags |= saved;
        if elements.is_empty() || has_rest || trailing_comma {
            return Err(self.error_at(close, ErrorMessage::UnexpectedToken(")".to_string())));
        }
        self.check_cover_stays_expression(bits, start)?;

        let mut expressions: Vec<Expression> = elements
            .into_iter()
            .filter_map(|element| match element {
                ExpressionOrSpread::Expression(expression) => Some(expression),
                ExpressionOrSpread::Spread(_) => None,
            })
            .collect();
        let expression = if expressions.len() == 1 {
            expressions.remove(0)
        } else {
            Expression::Sequence(SequenceExpression {
                expressions,
                span: self.span_between(first_start, last_end),
            })
        };

        let simple_target = matches!(
            unparenthesized(&expression),
            Expression::Identifier(_) | Expression::Member(_)
        );
        let expression = if self.options.preserve_parens {
            Expression::Parenthesized(Box::new(ParenthesizedExpression {
                expression,
                span: self.finish(start),
            }))
        } else {
            expression
        };
        if simple_target {
            self.assignable = AssignKind::Assignable;
            self.destructible = Destructible::ASSIGNABLE_ONLY;
        } else {
            self.set_opaque();
        }
        Ok(expression)
    }

    /// Errors that apply once a cover group is known to be arrow parameters.
    fn check_arrow_cover(&self, bits: Destructible, seen: Flags, at: Marker, is_async: bool) -> ParseResult<()> {
        if bits.intersects(Destructible::CANNOT_DESTRUCT | Destructible::ASSIGNABLE_ONLY) {
            return Err(self.error_at(at, ErrorMessage::InvalidArrowParams));
        }
        if bits.contains(Destructible::DISALLOW_TRAILING) {
            return Err(self.error_at(at, ErrorMessage::RestNotLast));
        }
        if seen.contains(Flags::SEEN_YIELD) {
            return Err(self.error_at(at, ErrorMessage::YieldInParameter));
        }
        if seen.contains(Flags::SEEN_AWAIT) || (is_async && seen.contains(Flags::SEEN_AWAIT_IDENT)) {
            return Err(self.error_at(at, ErrorMessage::AwaitInParameter));
        }
        Ok(())
    }

    /// Errors that apply once a cover group is known to be an expression.
    fn check_cover_stays_expression(&self, bits: Destructible, at: Marker) -> ParseResult<()> {
        if bits.contains(Destructible::MUST_DESTRUCT) {
            return Err(self.error_at(at, ErrorMessage::InvalidShorthandInit));
        }
        if bits.contains(Destructible::SEEN_PROTO) {
            return Err(self.error_at(at, ErrorMessage::DuplicateProto));
        }
        Ok(())
    }

    fn cover_to_parameters(&mut self, context: Context, elements: Vec<ExpressionOrSpread>) -> ParseResult<Vec<Pattern>> {
        elements
            .into_iter()
            .map(|element| match element {
                ExpressionOrSpread::Expression(expression) => self.reinterpret_as_pattern(context, expression),
                ExpressionOrSpread::Spread(spread) => self.spread_to_rest(context, spread),
            })
            .collect()
    }

    /// Errors a literal that ended up as a plain expression has to report.
    pub(super) fn check_literal_followup(&self) -> ParseResult<()> {
        if self.destructible.contains(Destructible::MUST_DESTRUCT) {
            return Err(self.error_here(ErrorMessage::InvalidShorthandInit));
        }
        if self.destructible.contains(Destructible::SEEN_PROTO) {
            return Err(self.error_here(ErrorMessage::DuplicateProto));
        }
        Ok(())
    }

    /// One element of an array literal, group or `async(...)` argument
    /// list, or an object property value. Nested literals directly followed
    /// by `,`, `closing` or `=` keep their cover state.
    pub(super) fn parse_cover_element(&mut self, context: Context, scope: ScopeId, closing: Token) -> ParseResult<Expression> {
        if !self.lexer.token.is_pattern_start() {
            return self.parse_assignment_expression(context, scope);
        }
        let start = self.start();
        let literal = self.parse_pattern_literal(context, scope)?;
        let token = self.lexer.token;
        if token == Token::COMMA || token == closing {
            return Ok(literal);
        }
        if token == Token::ASSIGN {
            return self.parse_assignment_tail(context, scope, start, literal, false);
        }
        self.check_literal_followup()?;
        let expression = self.parse_member_or_call(context, scope, start, literal, true)?;
        self.parse_postfix_and_tail(context, scope, start, expression)
    }

    /// `...x` inside an array literal, group or `async(...)` arguments.
    fn parse_cover_spread(
        &mut self,
        context: Context,
        scope: ScopeId,
        closing: Token,
    ) -> ParseResult<(SpreadElement, Destructible)> {
        let start = self.start();
        self.next(context | Context::ALLOW_REGEXP)?;
        let argument = self.parse_cover_element(context, scope, closing)?;
        let mut bits = self.destructible;
        if self.lexer.token == Token::COMMA {
            bits |= Destructible::DISALLOW_TRAILING;
        }
        Ok((
            SpreadElement {
                argument,
                span: self.finish(start),
            },
            bits,
        ))
    }

    /// An array or object literal that may turn out to be a pattern. Its
    /// cover state is left in [`Parser::destructible`].
    pub(super) fn parse_pattern_literal(&mut self, context: Context, scope: ScopeId) -> ParseResult<Expression> {
        if self.lexer.token == Token::LEFT_BRACKET {
            self.parse_array_literal(context, scope)
        } else {
            self.parse_object_literal(context, scope)
        }
    }

    fn parse_array_literal(&mut self, context: Context, scope: ScopeId) -> ParseResult<Expression> {
        let start = self.start();
        let inner = context - Context::DISALLOW_IN;
        self.next(inner | Context::ALLOW_REGEXP)?;
        let mut elements = Vec::new();
        let mut bits = Destructible::empty();
        while self.lexer.token != Token::RIGHT_BRACKET {
            if self.lexer.token == Token::COMMA {
                elements.push(None);
                self.next(inner | Context::ALLOW_REGEXP)?;
                continue;
            }
            if self.lexer.token == Token::ELLIPSIS {
                let (spread, spread_bits) = self.parse_cover_spread(inner, scope, Token::RIGHT_BRACKET)?;
                bits |= spread_bits;
                elements.push(Some(ExpressionOrSpread::Spread(spread)));
            } else {
                let element = self.parse_cover_element(inner, scope, Token::RIGHT_BRACKET)?;
                bits |= self.destructible;
                elements.push(Some(ExpressionOrSpread::Expression(element)));
            }
            if self.lexer.token != Token::RIGHT_BRACKET {
                self.expect(inner | Context::ALLOW_REGEXP, Token::COMMA)?;
            }
        }
        self.next(context)?;
        self.assignable = AssignKind::CannotAssign;
        self.destructible = bits;
        Ok(Expression::Array(ArrayExpression {
            elements,
            span: self.finish(start),
        }))
    }

    fn parse_object_literal(&mut self, context: Context, scope: ScopeId) -> ParseResult<Expression> {
        let start = self.start();
        let inner = context - Context::DISALLOW_IN;
        self.next(inner)?;
        let mut properties = Vec::new();
        let mut bits = Destructible::empty();
        let mut proto_seen = false;
        while self.lexer.token != Token::RIGHT_BRACE {
            if self.lexer.token == Token::ELLIPSIS {
                let (spread, spread_bits) = self.parse_object_spread(inner, scope)?;
                bits |= spread_bits;
                properties.push(ObjectMember::Spread(spread));
            } else {
                let (property, property_bits) = self.parse_object_property(inner, scope, &mut proto_seen)?;
                bits |= property_bits;
                properties.push(ObjectMember::Property(property));
            }
            if self.lexer.token != Token::RIGHT_BRACE {
                self.expect(inner, Token::COMMA)?;
            }
        }
        self.next(context)?;
        self.assignable = AssignKind::CannotAssign;
        self.destructible = bits;
        Ok(Expression::Object(ObjectExpression {
            properties,
            span: self.finish(start),
        }))
    }

    fn parse_object_spread(&mut self, context: Context, scope: ScopeId) -> ParseResult<(SpreadElement, Destructible)> {
        let start = self.start();
        self.next(context | Context::ALLOW_REGEXP)?;
        let argument = self.parse_assignment_expression(context, scope)?;
        // Object rest only binds a plain name or assigns a simple target
        let mut bits = match unparenthesized(&argument) {
            Expression::Identifier(_) | Expression::Member(_) => self.destructible & Destructible::ASSIGNABLE_ONLY,
            _ => Destructible::CANNOT_DESTRUCT,
        };
        if self.lexer.token == Token::COMMA {
            bits |= Destructible::DISALLOW_TRAILING;
        }
        Ok((
            SpreadElement {
                argument,
                span: self.finish(start),
            },
            bits,
        ))
    }

    fn parse_object_property(
        &mut self,
        context: Context,
        scope: ScopeId,
        proto_seen: &mut bool,
    ) -> ParseResult<(Property, Destructible)> {
        let start = self.start();
        let mut flags = MemberFlags::empty();
        let token = self.lexer.token;
        if matches!(token, Token::ASYNC | Token::GET | Token::SET) {
            let (next, newline) = self.peek(context)?;
            let is_key = matches!(
                next,
                Token::LEFT_PAREN | Token::COLON | Token::COMMA | Token::RIGHT_BRACE | Token::ASSIGN
            );
            if !is_key && !(token == Token::ASYNC && newline) {
                flags |= match token {
                    Token::ASYNC => MemberFlags::ASYNC,
                    Token::GET => MemberFlags::GETTER,
                    _ => MemberFlags::SETTER,
                };
                self.next(context)?;
                if token == Token::ASYNC && self.consume(context, Token::MULTIPLY)? {
                    flags |= MemberFlags::GENERATOR;
                }
            }
        } else if token == Token::MULTIPLY {
            flags |= MemberFlags::GENERATOR;
            self.next(context)?;
        }

        let key_token = self.lexer.token;
        let key_start = self.start();
        let (key, computed) = self.parse_property_key(context, scope)?;

        if !flags.is_empty() || self.lexer.token == Token::LEFT_PAREN {
            let kind = if flags.contains(MemberFlags::GETTER) {
                PropertyKind::Get
            } else if flags.contains(MemberFlags::SETTER) {
                PropertyKind::Set
            } else {
                PropertyKind::Init
            };
            let value = self.parse_method(context, scope, flags, false)?;
            let property = Property {
                key,
                value: Expression::Function(Box::new(value)),
                kind,
                method: kind == PropertyKind::Init,
                shorthand: false,
                computed,
                span: self.finish(start),
            };
            return Ok((property, Destructible::CANNOT_DESTRUCT));
        }

        if self.lexer.token == Token::COLON {
            let mut bits = Destructible::empty();
            if !computed && key.static_name() == Some("__proto__") {
                if *proto_seen {
                    bits |= Destructible::SEEN_PROTO;
                }
                *proto_seen = true;
            }
            self.next(context | Context::ALLOW_REGEXP)?;
            let value = self.parse_cover_element(context, scope, Token::RIGHT_BRACE)?;
            bits |= self.destructible;
            let property = Property {
                key,
                value,
                kind: PropertyKind::Init,
                method: false,
                shorthand: false,
                computed,
                span: self.finish(start),
            };
            return Ok((property, bits));
        }

        // Shorthand `{ a }` or cover initializer `{ a = 1 }`
        let id = match &key {
            PropertyKey::Identifier(id)
                if !computed
                    && matches!(self.lexer.token, Token::COMMA | Token::RIGHT_BRACE | Token::ASSIGN) =>
            {
                id.clone()
            }
            _ => return Err(self.unexpected()),
        };
        self.check_identifier_reference(context, key_token, &id.name, key_start)?;
        let (value, bits) = if self.lexer.token == Token::ASSIGN {
            self.next(context | Context::ALLOW_REGEXP)?;
            let right = self.parse_assignment_expression(context, scope)?;
            let value = Expression::Assignment(Box::new(AssignmentExpression {
                operator: AssignmentOperator::Assign,
                left: Pattern::Identifier(id),
                right,
                span: self.finish(key_start),
            }));
            (value, Destructible::MUST_DESTRUCT)
        } else {
            (Expression::Identifier(id), Destructible::empty())
        };
        let property = Property {
            key,
            value,
            kind: PropertyKind::Init,
            method: false,
            shorthand: true,
            computed: false,
            span: self.finish(start),
        };
        Ok((property, bits))
    }

    /// A property name: identifier name, string, number or `[expression]`.
    /// Returns the key and whether it is computed.
    pub(super) fn parse_property_key(&mut self, context: Context, scope: ScopeId) -> ParseResult<(PropertyKey, bool)> {
        let token = self.lexer.token;
        match token {
            Token::STRING | Token::NUMBER | Token::BIGINT => {
                let literal = self.parse_literal(context)?;
                Ok((PropertyKey::Literal(Box::new(literal)), false))
            }
            Token::LEFT_BRACKET => {
                self.next(context | Context::ALLOW_REGEXP)?;
                let expression = self.parse_assignment_expression(context - Context::DISALLOW_IN, scope)?;
                self.expect(context, Token::RIGHT_BRACKET)?;
                Ok((PropertyKey::Computed(expression), true))
            }
            _ if token.is_identifier_name() => Ok((PropertyKey::Identifier(self.parse_identifier_name(context)?), false)),
            _ => Err(self.unexpected()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::error::ErrorMessage;
    use crate::options::{Options, SourceType};
    use crate::parser::Parser;

    fn parse_with(source: &str, options: &Options) -> Result<Vec<Statement>, ErrorMessage> {
        Parser::new(source, options)
            .parse_program()
            .map(|p| p.body)
            .map_err(|e| e.message)
    }

    fn parse(source: &str) -> Result<Vec<Statement>, ErrorMessage> {
        parse_with(source, &Options::default())
    }

    fn module(source: &str) -> Result<Vec<Statement>, ErrorMessage> {
        parse_with(source, &Options::module())
    }

    fn expr(source: &str) -> Expression {
        match parse(source).unwrap().remove(0) {
            Statement::Expression(statement) => statement.expression,
            other => panic!("not an expression statement: {:?}", other),
        }
    }

    #[test]
    fn test_precedence() {
        match expr("a + b * c") {
            Expression::Binary(add) => {
                assert_eq!(add.operator, BinaryOperator::Add);
                assert!(matches!(add.right, Expression::Binary(ref mul) if mul.operator == BinaryOperator::Multiply));
            }
            other => panic!("unexpected {:?}", other),
        }
        match expr("a ** b ** c") {
            Expression::Binary(outer) => {
                assert_eq!(outer.left.as_identifier(), Some("a"));
                assert!(matches!(outer.right, Expression::Binary(_)));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_logical_and_coalesce() {
        assert!(matches!(expr("a ?? b"), Expression::Logical(ref l) if l.operator == LogicalOperator::Coalesce));
        assert!(parse("(a || b) ?? c").is_ok());
        assert!(parse("a ?? (b && c)").is_ok());
        assert_eq!(parse("a || b ?? c").unwrap_err(), ErrorMessage::MixedCoalesce);
        assert_eq!(parse("a ?? b && c").unwrap_err(), ErrorMessage::MixedCoalesce);
    }

    #[test]
    fn test_unary_before_exponent() {
        assert_eq!(parse("-a ** 2").unwrap_err(), ErrorMessage::UnaryBeforeExponent);
        assert_eq!(parse("typeof a ** 2").unwrap_err(), ErrorMessage::UnaryBeforeExponent);
        assert!(parse("(-a) ** 2").is_ok());
        assert!(parse("a ** -b").is_ok());
    }

    #[test]
    fn test_assignment_targets() {
        assert!(parse("a = 1; a.b = 1; a[0] += 1; (a) = 1; (a.b) = 2").is_ok());
        assert_eq!(parse("a + b = c").unwrap_err(), ErrorMessage::InvalidLhs);
        assert_eq!(parse("f() = 1").unwrap_err(), ErrorMessage::InvalidLhs);
        assert_eq!(parse("a?.b = 1").unwrap_err(), ErrorMessage::InvalidLhs);
        assert_eq!(parse("(a, b) = 1").unwrap_err(), ErrorMessage::InvalidLhs);
        assert_eq!(parse("'use strict'; eval = 1").unwrap_err(), ErrorMessage::StrictEvalArguments);
    }

    #[test]
    fn test_destructuring_assignment() {
        match expr("[a, {b, c: [d]}, ...e] = f") {
            Expression::Assignment(assign) => assert!(matches!(assign.left, Pattern::Array(_))),
            other => panic!("unexpected {:?}", other),
        }
        assert!(parse("({a = 1, b: c.d} = e)").is_ok());
        assert!(parse("[(a), a.b] = c").is_ok());
        assert_eq!(parse("[a + b] = c").unwrap_err(), ErrorMessage::InvalidDestructuringTarget);
        assert_eq!(parse("[...a, b] = c").unwrap_err(), ErrorMessage::RestNotLast);
        assert_eq!(parse("({...{a}} = b)").unwrap_err(), ErrorMessage::InvalidDestructuringTarget);
        assert_eq!(parse("({a}) = b").unwrap_err(), ErrorMessage::InvalidDestructuringTarget);
    }

    #[test]
    fn test_cover_initializer_must_destructure() {
        assert_eq!(parse("({a = 1})").unwrap_err(), ErrorMessage::InvalidShorthandInit);
        assert_eq!(parse("[{a = 1}]").unwrap_err(), ErrorMessage::InvalidShorthandInit);
        assert_eq!(parse("f({a = 1})").unwrap_err(), ErrorMessage::InvalidShorthandInit);
        assert!(parse("[{a = 1}] = b").is_ok());
        assert!(parse("({a = 1}) => a").is_ok());
    }

    #[test]
    fn test_duplicate_proto() {
        assert_eq!(parse("({__proto__: a, __proto__: b})").unwrap_err(), ErrorMessage::DuplicateProto);
        assert_eq!(parse("x = {__proto__: a, '__proto__': b}").unwrap_err(), ErrorMessage::DuplicateProto);
        assert!(parse("({__proto__: a, __proto__: b} = c)").is_ok());
        assert!(parse("({__proto__: a, ['__proto__']: b, __proto__() {}})").is_ok());
    }

    #[test]
    fn test_object_literal_members() {
        match expr("({a, b: 1, c() {}, get d() { return 1 }, set d(v) {}, async *e() {}, [f]: 2, ...g})") {
            Expression::Object(object) => {
                assert_eq!(object.properties.len(), 8);
                match &object.properties[0] {
                    ObjectMember::Property(p) => assert!(p.shorthand),
                    other => panic!("unexpected {:?}", other),
                }
                match &object.properties[3] {
                    ObjectMember::Property(p) => assert_eq!(p.kind, PropertyKind::Get),
                    other => panic!("unexpected {:?}", other),
                }
                assert!(matches!(object.properties[7], ObjectMember::Spread(_)));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(parse("({get: 1, set: 2, async: 3, get() {}, async() {}})").is_ok());
        assert!(parse("({if: 1, class: 2})").is_ok());
        assert_eq!(parse("({if})").unwrap_err(), ErrorMessage::ReservedWord("if".into()));
    }

    #[test]
    fn test_accessor_parameter_counts() {
        assert_eq!(parse("({get a(x) {}})").unwrap_err(), ErrorMessage::GetterWithParameters);
        assert_eq!(parse("({set a() {}})").unwrap_err(), ErrorMessage::SetterParameterCount);
        assert_eq!(parse("({set a(...b) {}})").unwrap_err(), ErrorMessage::SetterRestParameter);
    }

    #[test]
    fn test_arrow_functions() {
        match expr("(a, [b], {c}, d = 1, ...e) => a") {
            Expression::Arrow(arrow) => {
                assert_eq!(arrow.params.len(), 5);
                assert!(arrow.expression);
                assert!(matches!(arrow.params[4], Pattern::Rest(_)));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(parse("x => { return x }").is_ok());
        assert!(parse("() => {}").is_ok());
        assert_eq!(parse("(a.b) => 1").unwrap_err(), ErrorMessage::InvalidArrowParams);
        assert_eq!(parse("(a + b) => 1").unwrap_err(), ErrorMessage::InvalidArrowParams);
        assert_eq!(parse("((a)) => 1").unwrap_err(), ErrorMessage::InvalidArrowParams);
        assert_eq!(parse("(...a, b) => 1").unwrap_err(), ErrorMessage::RestNotLast);
        assert_eq!(parse("(a, a) => 1").unwrap_err(), ErrorMessage::DuplicateParameter("a".into()));
        assert_eq!(parse("a\n=> 1").unwrap_err(), ErrorMessage::LineBreakBeforeArrow);
        assert_eq!(parse("()").unwrap_err(), ErrorMessage::UnexpectedToken(")".into()));
        assert_eq!(parse("(a,)").unwrap_err(), ErrorMessage::UnexpectedToken(")".into()));
    }

    #[test]
    fn test_arrow_body_continuation() {
        assert_eq!(parse("x => {}()").unwrap_err(), ErrorMessage::InvalidArrowBodyContinuation);
        assert_eq!(parse("x => {}.a").unwrap_err(), ErrorMessage::InvalidArrowBodyContinuation);
        assert!(parse("x => {}\n(a)").is_ok());
        assert!(parse("f(x => x, y => y)").is_ok());
    }

    #[test]
    fn test_async_forms() {
        assert!(matches!(expr("async"), Expression::Identifier(_)));
        assert!(matches!(expr("async(a, b)"), Expression::Call(_)));
        assert!(matches!(expr("async (a, b) => a"), Expression::Arrow(ref a) if a.is_async));
        assert!(matches!(expr("async a => a"), Expression::Arrow(ref a) if a.is_async));
        assert!(matches!(expr("async => async"), Expression::Arrow(ref a) if !a.is_async));
        assert!(matches!(expr("(async function f() {})"), Expression::Function(ref f) if f.is_async));
        assert_eq!(parse("async\n(a) => a").unwrap_err(), ErrorMessage::LineBreakAfterAsync);
        assert_eq!(parse("async (await) => 1").unwrap_err(), ErrorMessage::AwaitInParameter);
        assert_eq!(parse("async (a = await 1) => 1").unwrap_err(), ErrorMessage::AwaitOutsideAsync);
        assert!(parse("async(await)").is_ok());
    }

    #[test]
    fn test_yield_and_await_in_parameters() {
        assert_eq!(
            parse("function* g() { (a = yield) => 1 }").unwrap_err(),
            ErrorMessage::YieldInParameter
        );
        assert_eq!(
            parse("async function f() { (a = await b) => 1 }").unwrap_err(),
            ErrorMessage::AwaitInParameter
        );
        assert!(parse("function* g() { (yield) }").is_ok());
        assert!(parse("async function f() { (await b) }").is_ok());
    }

    #[test]
    fn test_await_outside_async() {
        assert_eq!(parse("function f() { await x }").unwrap_err(), ErrorMessage::AwaitOutsideAsync);
        assert!(parse("await(x); var await;").is_ok());
        assert!(module("await x").is_ok());
    }

    #[test]
    fn test_update_expressions() {
        assert!(parse("a++; --b.c; a\n++b").is_ok());
        assert_eq!(parse("1++").unwrap_err(), ErrorMessage::InvalidUpdateTarget("postfix"));
        assert_eq!(parse("++f()").unwrap_err(), ErrorMessage::InvalidUpdateTarget("prefix"));
        assert_eq!(
            parse("'use strict'; arguments++").unwrap_err(),
            ErrorMessage::StrictEvalArguments
        );
    }

    #[test]
    fn test_delete() {
        assert!(parse("delete a; delete a.b").is_ok());
        assert_eq!(parse("'use strict'; delete a").unwrap_err(), ErrorMessage::StrictDelete);
        assert_eq!(
            parse("class A { #x; m() { delete this.#x } }").unwrap_err(),
            ErrorMessage::DeletePrivateField
        );
    }

    #[test]
    fn test_optional_chains() {
        match expr("a?.b.c()") {
            Expression::Chain(chain) => assert!(matches!(chain.expression, Expression::Call(_))),
            other => panic!("unexpected {:?}", other),
        }
        assert!(parse("a?.[0]?.(1)").is_ok());
        assert_eq!(parse("a?.`x`").unwrap_err(), ErrorMessage::OptionalChainTemplate);
        assert_eq!(parse("a?.b`x`").unwrap_err(), ErrorMessage::OptionalChainTemplate);
        assert_eq!(parse("new a?.b()").unwrap_err(), ErrorMessage::OptionalChainNew);
    }

    #[test]
    fn test_templates() {
        match expr("`a${b}c${d}e`") {
            Expression::Template(template) => {
                assert_eq!(template.quasis.len(), 3);
                assert_eq!(template.expressions.len(), 2);
                assert!(template.quasis[2].tail);
                assert_eq!(template.quasis[1].value.cooked.as_deref(), Some("c"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(parse("`\\unicode`").unwrap_err(), ErrorMessage::InvalidUnicodeEscape);
        match expr("tag`\\unicode`") {
            Expression::TaggedTemplate(tagged) => {
                assert_eq!(tagged.quasi.quasis[0].value.cooked, None);
                assert_eq!(tagged.quasi.quasis[0].value.raw, "\\unicode");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_template_element_spans() {
        let options = Options {
            ranges: true,
            ..Options::default()
        };
        let body = parse_with("`ab${x}cd`", &options).unwrap();
        match &body[0] {
            Statement::Expression(statement) => match &statement.expression {
                Expression::Template(template) => {
                    assert_eq!(template.quasis[0].span.range, Some([1, 3]));
                    assert_eq!(template.quasis[1].span.range, Some([7, 9]));
                    assert_eq!(template.span.range, Some([0, 10]));
                }
                other => panic!("unexpected {:?}", other),
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_regexp_after_operators() {
        assert!(matches!(expr("a = /b/g"), Expression::Assignment(ref a) if matches!(a.right, Expression::Literal(_))));
        assert!(matches!(expr("a / b / c"), Expression::Binary(_)));
        assert!(parse("x = [/a/, /b/]").is_ok());
    }

    #[test]
    fn test_new_and_meta_properties() {
        assert!(matches!(expr("new a.b.C(1)"), Expression::New(_)));
        assert!(matches!(expr("new new A()()"), Expression::New(_)));
        assert!(matches!(expr("new async()"), Expression::New(_)));
        assert!(parse("new import('a')").is_err());
        assert!(parse("function f() { new.target }").is_ok());
        assert_eq!(parse("new.target").unwrap_err(), ErrorMessage::InvalidNewTarget);
        assert!(module("import.meta.url").is_ok());
        assert_eq!(parse("import.meta").unwrap_err(), ErrorMessage::ImportMetaOutsideModule);
    }

    #[test]
    fn test_dynamic_import() {
        assert!(matches!(expr("import('a')"), Expression::Import(ref i) if i.options.is_none()));
        assert!(matches!(expr("import('a', { with: {} })"), Expression::Import(ref i) if i.options.is_some()));
        assert_eq!(parse("import()").unwrap_err(), ErrorMessage::InvalidImportCall);
        assert_eq!(parse("import(a, b, c)").unwrap_err(), ErrorMessage::InvalidImportCall);
    }

    #[test]
    fn test_super_placement() {
        assert_eq!(parse("super.x").unwrap_err(), ErrorMessage::InvalidSuperProperty);
        assert_eq!(parse("function f() { super() }").unwrap_err(), ErrorMessage::InvalidSuperCall);
        assert!(parse("({ m() { return super.m() } })").is_ok());
    }

    #[test]
    fn test_private_in() {
        assert!(parse("class A { #x; static has(o) { return #x in o } }").is_ok());
        assert_eq!(
            parse("class A { #x; m() { #x } }").unwrap_err(),
            ErrorMessage::UnexpectedToken("#x".into())
        );
    }

    #[test]
    fn test_preserve_parens() {
        let options = Options {
            preserve_parens: true,
            ..Options::default()
        };
        let body = parse_with("(a, b); (c) = 1", &options).unwrap();
        match &body[0] {
            Statement::Expression(statement) => {
                assert!(matches!(statement.expression, Expression::Parenthesized(_)));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(expr("(a)"), Expression::Identifier(_)));
    }

    #[test]
    fn test_literals() {
        match expr("10n") {
            Expression::Literal(literal) => assert_eq!(literal.bigint.as_deref(), Some("10")),
            other => panic!("unexpected {:?}", other),
        }
        match expr("/a/u") {
            Expression::Literal(literal) => {
                assert_eq!(literal.regex.as_ref().map(|r| r.flags.as_str()), Some("u"));
            }
            other => panic!("unexpected {:?}", other),
        }
        let options = Options {
            source_type: SourceType::Script,
            ..Options::default()
        };
        assert!(parse_with("null; true; 'x'; 1.5e3", &options).is_ok());
    }
}
