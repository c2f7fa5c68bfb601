//! Function declarations and expressions, methods, arrows, formal
//! parameters and function bodies.

use super::expression::COVER_FLAGS;
use super::Parser;
use crate::ast::*;
use crate::context::{Context, Flags, MemberFlags};
use crate::error::{ErrorMessage, ParseResult};
use crate::lexer::Marker;
use crate::scope::{BindingKind, ScopeId, ScopeKind};
use crate::token::{keyword, Token};

/// What kind of function a parameter list and body belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FunctionKind {
    Plain,
    Arrow,
    Method,
    Getter,
    Setter,
    Constructor,
}

impl<'a> Parser<'a> {
    // ------------------------------------------------------------------
    // Declarations and expressions
    // ------------------------------------------------------------------

    /// FunctionDeclaration; the current token is `function`. The name is
    /// optional only for `export default function () {}`.
    pub(super) fn parse_function_declaration(
        &mut self,
        context: Context,
        scope: ScopeId,
        start: Marker,
        is_async: bool,
        require_name: bool,
    ) -> ParseResult<FunctionDeclaration> {
        self.next(context)?;
        let generator = self.consume(context, Token::MULTIPLY)?;
        let id = if self.lexer.token == Token::LEFT_PAREN && !require_name {
            None
        } else {
            let name_start = self.start();
            let token = self.lexer.token;
            if !token.is_identifier_name() {
                return Err(self.unexpected());
            }
            let name = self.take_name();
            // Bound in the enclosing scope, so the enclosing context decides `yield`/`await`
            self.check_binding_identifier(context, token, &name, BindingKind::FUNCTION_STATEMENT, name_start)?;
            let kind = match self.scopes.kind(scope) {
                ScopeKind::FunctionBody => BindingKind::FUNCTION_STATEMENT,
                ScopeKind::TopLevel if !context.contains(Context::MODULE) => BindingKind::FUNCTION_STATEMENT,
                _ if is_async || generator => BindingKind::FUNCTION_LEXICAL | BindingKind::ASYNC_OR_GENERATOR,
                _ => BindingKind::FUNCTION_LEXICAL,
            };
            self.declare(context, scope, &name, kind, name_start)?;
            self.next(context)?;
            Some(Identifier {
                name,
                span: self.finish(name_start),
            })
        };
        let (params, body) = self.parse_function_rest(
            context,
            scope,
            is_async,
            generator,
            FunctionKind::Plain,
            id.as_ref(),
            context | Context::ALLOW_REGEXP,
        )?;
        Ok(FunctionDeclaration {
            id,
            params,
            body,
            is_async,
            generator,
            span: self.finish(start),
        })
    }

    /// FunctionExpression; the current token is `function`.
    pub(super) fn parse_function_expression(
        &mut self,
        context: Context,
        scope: ScopeId,
        start: Marker,
        is_async: bool,
    ) -> ParseResult<Expression> {
        self.next(context)?;
        let generator = self.consume(context, Token::MULTIPLY)?;
        let id = if self.lexer.token == Token::LEFT_PAREN {
            None
        } else {
            let name_start = self.start();
            let token = self.lexer.token;
            if !token.is_identifier_name() {
                return Err(self.unexpected());
            }
            // The name of a function expression is scoped to the function itself
            let mut name_context = context - Context::FUNCTION_RESET;
            if generator {
                name_context |= Context::IN_YIELD_CONTEXT;
            }
            if is_async {
                name_context |= Context::IN_AWAIT_CONTEXT;
            }
            let name = self.take_name();
            self.check_binding_identifier(name_context, token, &name, BindingKind::VAR, name_start)?;
            self.next(context)?;
            Some(Identifier {
                name,
                span: self.finish(name_start),
            })
        };
        let (params, body) =
            self.parse_function_rest(context, scope, is_async, generator, FunctionKind::Plain, id.as_ref(), context)?;
        Ok(Expression::Function(Box::new(FunctionExpression {
            id,
            params,
            body,
            is_async,
            generator,
            span: self.finish(start),
        })))
    }

    /// Method of an object literal or class; the current token is `(`.
    /// `super_call` permits `super()` (derived class constructors).
    pub(super) fn parse_method(
        &mut self,
        context: Context,
        scope: ScopeId,
        flags: MemberFlags,
        super_call: bool,
    ) -> ParseResult<FunctionExpression> {
        let start = self.start();
        let kind = if flags.contains(MemberFlags::GETTER) {
            FunctionKind::Getter
        } else if flags.contains(MemberFlags::SETTER) {
            FunctionKind::Setter
        } else if flags.contains(MemberFlags::CONSTRUCTOR) {
            FunctionKind::Constructor
        } else {
            FunctionKind::Method
        };
        let mut method_context = context | Context::SUPER_PROPERTY | Context::IN_METHOD;
        if super_call {
            method_context |= Context::SUPER_CALL | Context::IN_CONSTRUCTOR;
        } else {
            method_context -= Context::SUPER_CALL | Context::IN_CONSTRUCTOR;
        }
        let is_async = flags.contains(MemberFlags::ASYNC);
        let generator = flags.contains(MemberFlags::GENERATOR);
        let (params, body) = self.parse_function_rest(method_context, scope, is_async, generator, kind, None, context)?;
        Ok(FunctionExpression {
            id: None,
            params,
            body,
            is_async,
            generator,
            span: self.finish(start),
        })
    }

    /// Parameters and body of any non-arrow function. `after` is the context
    /// the token following the closing `}` is scanned in.
    #[allow(clippy::too_many_arguments)]
    fn parse_function_rest(
        &mut self,
        context: Context,
        scope: ScopeId,
        is_async: bool,
        generator: bool,
        kind: FunctionKind,
        name: Option<&Identifier>,
        after: Context,
    ) -> ParseResult<(Vec<Pattern>, BlockStatement)> {
        let start = self.start();
        let mut function_context =
            (context - Context::FUNCTION_RESET) | Context::IN_RETURN_CONTEXT | Context::ALLOW_NEW_TARGET;
        if kind == FunctionKind::Plain {
            function_context -= Context::SUPER_PROPERTY | Context::SUPER_CALL | Context::IN_METHOD | Context::IN_CONSTRUCTOR;
        }
        if generator {
            function_context |= Context::IN_YIELD_CONTEXT;
        }
        if is_async {
            function_context |= Context::IN_AWAIT_CONTEXT;
        }

        let saved = self.flags & COVER_FLAGS;
        let root = self.scopes.enter(Some(scope), ScopeKind::FunctionRoot);
        let params_scope = self.scopes.enter(Some(root), ScopeKind::FunctionParams);
        let (params, simple) = self.parse_formal_parameters(function_context, params_scope)?;
        match kind {
            FunctionKind::Getter if !params.is_empty() => {
                return Err(self.error_at(start, ErrorMessage::GetterWithParameters));
            }
            FunctionKind::Setter if matches!(params.as_slice(), [Pattern::Rest(_)]) => {
                return Err(self.error_at(start, ErrorMessage::SetterRestParameter));
            }
            FunctionKind::Setter if params.len() != 1 => {
                return Err(self.error_at(start, ErrorMessage::SetterParameterCount));
            }
            _ => {}
        }
        let body = self.parse_function_body(function_context, params_scope, &params, simple, name, kind, after)?;
        self.scopes.leave(root);
        self.flags = (self.flags - COVER_FLAGS) | saved;
        Ok((params, body))
    }

    /// `( FormalParameters )`. Returns the parameters and whether the list
    /// is simple.
    fn parse_formal_parameters(&mut self, context: Context, scope: ScopeId) -> ParseResult<(Vec<Pattern>, bool)> {
        self.expect(context, Token::LEFT_PAREN)?;
        let param_context = context | Context::IN_PARAMETERS;
        let mut params = Vec::new();
        let mut simple = true;
        while self.lexer.token != Token::RIGHT_PAREN {
            if self.lexer.token == Token::ELLIPSIS {
                simple = false;
                let rest = self.parse_binding_rest(param_context, scope, BindingKind::ARGUMENT_LIST, true)?;
                params.push(Pattern::Rest(Box::new(rest)));
                if self.lexer.token != Token::RIGHT_PAREN {
                    return Err(self.error_here(ErrorMessage::RestNotLast));
                }
                break;
            }
            let param = self.parse_binding_element(param_context, scope, BindingKind::ARGUMENT_LIST)?;
            simple &= param.is_identifier();
            params.push(param);
            if self.lexer.token != Token::RIGHT_PAREN {
                self.expect(param_context, Token::COMMA)?;
            }
        }
        self.next(context)?;
        Ok((params, simple))
    }

    /// `{ FunctionBody }` including its directive prologue. A `"use strict"`
    /// directive re-validates the already parsed name and parameters.
    #[allow(clippy::too_many_arguments)]
    fn parse_function_body(
        &mut self,
        context: Context,
        params_scope: ScopeId,
        params: &[Pattern],
        simple: bool,
        name: Option<&Identifier>,
        kind: FunctionKind,
        after: Context,
    ) -> ParseResult<BlockStatement> {
        let start = self.start();
        self.expect(context | Context::ALLOW_REGEXP, Token::LEFT_BRACE)?;
        let body_scope = self.scopes.enter(Some(params_scope), ScopeKind::FunctionBody);
        let saved_labels = std::mem::take(&mut self.labels);
        let saved_chain = self.label_chain_start.take();

        let mut body = Vec::new();
        let body_context = (context - Context::IN_PARAMETERS) | Context::IN_FUNCTION_BODY;
        let (body_context, use_strict) = self.parse_directives(body_context, body_scope, &mut body)?;
        if use_strict && !simple {
            return Err(self.error_at(start, ErrorMessage::NonSimpleUseStrict));
        }
        if body_context.is_strict() && !context.is_strict() {
            self.validate_strict_names(params, name, start)?;
        }
        if !simple || body_context.is_strict() || kind != FunctionKind::Plain {
            self.raise_pending(params_scope)?;
        }

        while self.lexer.token != Token::RIGHT_BRACE {
            if self.lexer.token == Token::EOF {
                return Err(self.unexpected());
            }
            body.push(self.parse_statement_list_item(body_context, body_scope)?);
        }
        self.scopes.leave(body_scope);
        self.labels = saved_labels;
        self.label_chain_start = saved_chain;
        self.next(after)?;
        Ok(BlockStatement {
            body,
            span: self.finish(start),
        })
    }

    /// Names that only become invalid once the function turns out strict.
    fn validate_strict_names(&self, params: &[Pattern], name: Option<&Identifier>, at: Marker) -> ParseResult<()> {
        let mut names: Vec<&Identifier> = name.into_iter().collect();
        for param in params {
            param.bound_names(&mut |id| names.push(id));
        }
        for id in names {
            if id.name == "eval" || id.name == "arguments" {
                return Err(self.error_at(at, ErrorMessage::StrictEvalArguments));
            }
            if keyword(&id.name).is_some_and(|token| token.is_strict_reserved()) {
                return Err(self.error_at(at, ErrorMessage::StrictReservedWord(id.name.clone())));
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Arrow functions
    // ------------------------------------------------------------------

    /// Arrow function whose parameters were already parsed (and
    /// reinterpreted); the current token is `=>`.
    pub(super) fn parse_arrow_function(
        &mut self,
        context: Context,
        scope: ScopeId,
        start: Marker,
        params: Vec<Pattern>,
        is_async: bool,
    ) -> ParseResult<Expression> {
        let root = self.scopes.enter(Some(scope), ScopeKind::FunctionRoot);
        let params_scope = self.scopes.enter(Some(root), ScopeKind::ArrowParams);
        let param_context = if is_async {
            context | Context::IN_AWAIT_CONTEXT
        } else {
            context
        };
        let mut names = Vec::new();
        for param in &params {
            param.bound_names(&mut |id: &Identifier| names.push(id.name.clone()));
        }
        for name in &names {
            let token = keyword(name).unwrap_or(Token::IDENTIFIER);
            self.check_binding_identifier(param_context, token, name, BindingKind::ARGUMENT_LIST, start)?;
            self.declare(param_context, params_scope, name, BindingKind::ARGUMENT_LIST, start)?;
        }
        self.raise_pending(params_scope)?;
        let simple = params.iter().all(Pattern::is_identifier);

        let mut body_context = context - (Context::IN_YIELD_CONTEXT | Context::IN_AWAIT_CONTEXT | Context::IN_PARAMETERS);
        if is_async {
            body_context |= Context::IN_AWAIT_CONTEXT;
        }
        self.next(body_context | Context::ALLOW_REGEXP)?;

        let saved = self.flags & COVER_FLAGS;
        let (body, expression) = if self.lexer.token == Token::LEFT_BRACE {
            let block_context = (body_context
                - (Context::IN_ITERATION | Context::IN_SWITCH | Context::DISALLOW_IN | Context::IN_GLOBAL))
                | Context::IN_RETURN_CONTEXT;
            let block =
                self.parse_function_body(block_context, params_scope, &params, simple, None, FunctionKind::Arrow, context)?;
            (ArrowBody::Block(block), false)
        } else {
            let expression = self.parse_assignment_expression(body_context, params_scope)?;
            (ArrowBody::Expression(expression), true)
        };
        self.flags = (self.flags - COVER_FLAGS) | saved;
        self.scopes.leave(root);

        let arrow = Expression::Arrow(Box::new(ArrowFunctionExpression {
            params,
            body,
            is_async,
            expression,
            span: self.finish(start),
        }));
        self.set_opaque();
        self.flags |= Flags::ARROW_PRODUCED;
        Ok(arrow)
    }
}
