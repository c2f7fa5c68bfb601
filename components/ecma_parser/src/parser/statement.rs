//! Statements and declarations.

use super::{Label, Parser};
use crate::ast::*;
use crate::context::{AssignKind, Context, Origin};
use crate::error::{ErrorMessage, ParseResult};
use crate::lexer::Marker;
use crate::scope::{BindingKind, ScopeId, ScopeKind};
use crate::token::Token;

impl<'a> Parser<'a> {
    /// StatementListItem: a statement or a hoistable, class or lexical
    /// declaration.
    pub(super) fn parse_statement_list_item(&mut self, context: Context, scope: ScopeId) -> ParseResult<Statement> {
        let start = self.start();
        let token = self.lexer.token;
        match token {
            Token::FUNCTION => {
                let function = self.parse_function_declaration(context, scope, start, false, true)?;
                Ok(Statement::Function(Box::new(function)))
            }
            Token::CLASS => {
                let class = self.parse_class_declaration(context, scope, start, Vec::new(), true)?;
                Ok(Statement::Class(Box::new(class)))
            }
            Token::AT => {
                let decorators = self.parse_decorators(context, scope)?;
                if self.lexer.token != Token::CLASS {
                    return Err(self.error_here(ErrorMessage::MisplacedDecorator));
                }
                let class = self.parse_class_declaration(context, scope, start, decorators, true)?;
                Ok(Statement::Class(Box::new(class)))
            }
            Token::CONST => {
                let declaration = self.parse_variable_declaration(context, scope, VariableKind::Const, false)?;
                self.consume_semicolon(context)?;
                Ok(Statement::Variable(declaration))
            }
            Token::LET if self.is_let_declaration(context)? => {
                let declaration = self.parse_variable_declaration(context, scope, VariableKind::Let, false)?;
                self.consume_semicolon(context)?;
                Ok(Statement::Variable(declaration))
            }
            Token::ASYNC => {
                let (next, newline) = self.peek(context)?;
                if next == Token::FUNCTION && !newline {
                    self.next(context)?;
                    let function = self.parse_function_declaration(context, scope, start, true, true)?;
                    return Ok(Statement::Function(Box::new(function)));
                }
                self.parse_statement(context, scope, Origin::BlockStatement)
            }
            Token::IMPORT | Token::EXPORT => self.parse_module_syntax_out_of_place(context, scope),
            _ => self.parse_statement(context, scope, Origin::BlockStatement),
        }
    }

    /// `import` / `export` anywhere but the top level of a module. Dynamic
    /// `import(...)` and `import.meta` are still expressions.
    fn parse_module_syntax_out_of_place(&mut self, context: Context, scope: ScopeId) -> ParseResult<Statement> {
        if self.lexer.token == Token::IMPORT {
            let (next, _) = self.peek(context)?;
            if next == Token::LEFT_PAREN || next == Token::PERIOD {
                return self.parse_expression_statement(context, scope, self.start());
            }
        }
        let message = if context.contains(Context::MODULE) {
            ErrorMessage::ModuleSyntaxNotTopLevel
        } else {
            ErrorMessage::ModuleSyntaxOutsideModule
        };
        Err(self.error_here(message))
    }

    /// `let` starts a declaration when followed by a binding name or pattern.
    pub(super) fn is_let_declaration(&mut self, context: Context) -> ParseResult<bool> {
        let (next, _) = self.peek(context)?;
        Ok(next.is_identifier_like() || next == Token::LEFT_BRACKET || next == Token::LEFT_BRACE)
    }

    /// Statement in a position where declarations are not allowed.
    pub(super) fn parse_statement(&mut self, context: Context, scope: ScopeId, origin: Origin) -> ParseResult<Statement> {
        let start = self.start();
        match self.lexer.token {
            Token::SEMICOLON => {
                self.next(context | Context::ALLOW_REGEXP)?;
                Ok(Statement::Empty(EmptyStatement {
                    span: self.finish(start),
                }))
            }
            Token::LEFT_BRACE => Ok(Statement::Block(self.parse_block(context, scope, ScopeKind::Block)?)),
            Token::VAR => {
                let declaration = self.parse_variable_declaration(context, scope, VariableKind::Var, false)?;
                self.consume_semicolon(context)?;
                Ok(Statement::Variable(declaration))
            }
            Token::IF => self.parse_if_statement(context, scope, start),
            Token::WHILE => self.parse_while_statement(context, scope, start),
            Token::DO => self.parse_do_while_statement(context, scope, start),
            Token::FOR => self.parse_for_statement(context, scope, start),
            Token::CONTINUE => self.parse_continue_statement(context, start),
            Token::BREAK => self.parse_break_statement(context, start),
            Token::RETURN => self.parse_return_statement(context, scope, start),
            Token::WITH => self.parse_with_statement(context, scope, start),
            Token::SWITCH => self.parse_switch_statement(context, scope, start),
            Token::THROW => self.parse_throw_statement(context, scope, start),
            Token::TRY => self.parse_try_statement(context, scope, start),
            Token::DEBUGGER => {
                self.next(context | Context::ALLOW_REGEXP)?;
                self.consume_semicolon(context)?;
                Ok(Statement::Debugger(DebuggerStatement {
                    span: self.finish(start),
                }))
            }
            Token::FUNCTION => self.parse_function_in_statement_position(context, scope, origin, start),
            Token::CLASS => Err(self.unexpected()),
            Token::CONST => Err(self.error_here(ErrorMessage::LexicalInSingleStatement)),
            Token::LET => {
                let (next, newline) = self.peek(context)?;
                if next == Token::LEFT_BRACKET {
                    return Err(self.error_here(ErrorMessage::LetBracketStart));
                }
                if !newline && (next.is_identifier_like() || next == Token::LEFT_BRACE) {
                    return Err(self.error_here(ErrorMessage::LexicalInSingleStatement));
                }
                self.parse_expression_or_labelled_statement(context, scope, origin)
            }
            Token::ASYNC => {
                let (next, newline) = self.peek(context)?;
                if next == Token::FUNCTION && !newline {
                    return Err(self.error_here(ErrorMessage::InvalidDeclarationContext));
                }
                self.parse_expression_or_labelled_statement(context, scope, origin)
            }
            Token::IMPORT | Token::EXPORT => self.parse_module_syntax_out_of_place(context, scope),
            Token::AT => Err(self.error_here(ErrorMessage::MisplacedDecorator)),
            _ => self.parse_expression_or_labelled_statement(context, scope, origin),
        }
    }

    /// `function` as the body of `if`, a loop or `with`. Only the sloppy
    /// web-compatible `if (x) function f() {}` form is accepted; it behaves as
    /// if wrapped in a block.
    fn parse_function_in_statement_position(
        &mut self,
        context: Context,
        scope: ScopeId,
        origin: Origin,
        start: Marker,
    ) -> ParseResult<Statement> {
        if context.is_strict() {
            return Err(self.error_here(ErrorMessage::StrictFunctionInStatement));
        }
        if origin != Origin::IfClause || !context.contains(Context::WEB_COMPAT) {
            return Err(self.error_here(ErrorMessage::FunctionInSingleStatement));
        }
        let block = self.scopes.enter(Some(scope), ScopeKind::Block);
        let function = self.parse_function_declaration(context, block, start, false, true)?;
        self.scopes.leave(block);
        if function.generator {
            return Err(self.error_at(start, ErrorMessage::InvalidDeclarationContext));
        }
        Ok(Statement::Function(Box::new(function)))
    }

    fn parse_expression_statement(&mut self, context: Context, scope: ScopeId, start: Marker) -> ParseResult<Statement> {
        let expression = self.parse_expression(context, scope)?;
        self.consume_semicolon(context)?;
        Ok(Statement::Expression(ExpressionStatement {
            expression,
            directive: None,
            span: self.finish(start),
        }))
    }

    fn parse_expression_or_labelled_statement(
        &mut self,
        context: Context,
        scope: ScopeId,
        origin: Origin,
    ) -> ParseResult<Statement> {
        let start = self.start();
        let token = self.lexer.token;
        let operator_keyword = (token == Token::YIELD && context.contains(Context::IN_YIELD_CONTEXT))
            || (token == Token::AWAIT && context.contains(Context::IN_AWAIT_CONTEXT));
        if token.is_identifier_like() && !operator_keyword {
            let (next, _) = self.peek(context)?;
            if next == Token::COLON {
                return self.parse_labelled_statement(context, scope, origin, start);
            }
        }
        self.parse_expression_statement(context, scope, start)
    }

    // ------------------------------------------------------------------
    // Labels
    // ------------------------------------------------------------------

    fn parse_labelled_statement(
        &mut self,
        context: Context,
        scope: ScopeId,
        origin: Origin,
        start: Marker,
    ) -> ParseResult<Statement> {
        let token = self.lexer.token;
        let label = self.parse_identifier_name(context)?;
        self.check_identifier_reference(context, token, &label.name, start)?;
        if self.labels.iter().any(|l| l.name == label.name) {
            return Err(self.error_at(start, ErrorMessage::DuplicateLabel(label.name)));
        }
        self.expect(context | Context::ALLOW_REGEXP, Token::COLON)?;

        let chain_start = self.label_chain_start.take().unwrap_or(self.labels.len());
        self.labels.push(Label {
            name: label.name.clone(),
            iteration: false,
        });
        let body_token = self.lexer.token;
        if matches!(body_token, Token::FOR | Token::WHILE | Token::DO) {
            for entry in &mut self.labels[chain_start..] {
                entry.iteration = true;
            }
        } else if body_token.is_identifier_like() && self.peek(context)?.0 == Token::COLON {
            self.label_chain_start = Some(chain_start);
        }

        let body = if body_token == Token::FUNCTION {
            self.parse_labelled_function(context, scope, origin)?
        } else {
            let origin = if origin == Origin::IfClause {
                Origin::Statement
            } else {
                origin
            };
            self.parse_statement(context, scope, origin)?
        };
        self.labels.pop();
        Ok(Statement::Labeled(Box::new(LabeledStatement {
            label,
            body,
            span: self.finish(start),
        })))
    }

    /// `l: function f() {}`, allowed only in sloppy web-compatible code and
    /// never as the body of an `if`, loop or `with`.
    fn parse_labelled_function(&mut self, context: Context, scope: ScopeId, origin: Origin) -> ParseResult<Statement> {
        let start = self.start();
        if context.is_strict() || !context.contains(Context::WEB_COMPAT) || origin != Origin::BlockStatement {
            return Err(self.error_here(ErrorMessage::LabelledFunction));
        }
        let function = self.parse_function_declaration(context, scope, start, false, true)?;
        if function.generator {
            return Err(self.error_at(start, ErrorMessage::LabelledFunction));
        }
        Ok(Statement::Function(Box::new(function)))
    }

    fn parse_break_statement(&mut self, context: Context, start: Marker) -> ParseResult<Statement> {
        self.next(context | Context::ALLOW_REGEXP)?;
        let mut label = None;
        if self.lexer.token.is_identifier_like() && !self.lexer.has_newline_before() {
            let at = self.start();
            let name = self.parse_identifier_name(context)?;
            if !self.labels.iter().any(|l| l.name == name.name) {
                return Err(self.error_at(at, ErrorMessage::UnknownLabel(name.name)));
            }
            label = Some(name);
        } else if !context.intersects(Context::IN_ITERATION | Context::IN_SWITCH) {
            return Err(self.error_at(start, ErrorMessage::IllegalBreak));
        }
        self.consume_semicolon(context)?;
        Ok(Statement::Break(BreakStatement {
            label,
            span: self.finish(start),
        }))
    }

    fn parse_continue_statement(&mut self, context: Context, start: Marker) -> ParseResult<Statement> {
        if !context.contains(Context::IN_ITERATION) {
            return Err(self.error_here(ErrorMessage::IllegalContinue));
        }
        self.next(context | Context::ALLOW_REGEXP)?;
        let mut label = None;
        if self.lexer.token.is_identifier_like() && !self.lexer.has_newline_before() {
            let at = self.start();
            let name = self.parse_identifier_name(context)?;
            match self.labels.iter().find(|l| l.name == name.name) {
                None => return Err(self.error_at(at, ErrorMessage::UnknownLabel(name.name))),
                Some(entry) if !entry.iteration => {
                    return Err(self.error_at(at, ErrorMessage::InvalidContinueLabel(name.name)));
                }
                Some(_) => {}
            }
            label = Some(name);
        }
        self.consume_semicolon(context)?;
        Ok(Statement::Continue(ContinueStatement {
            label,
            span: self.finish(start),
        }))
    }

    // ------------------------------------------------------------------
    // Simple statements
    // ------------------------------------------------------------------

    /// `{ ... }` with its own scope of the given kind.
    pub(super) fn parse_block(&mut self, context: Context, scope: ScopeId, kind: ScopeKind) -> ParseResult<BlockStatement> {
        let start = self.start();
        self.expect(context | Context::ALLOW_REGEXP, Token::LEFT_BRACE)?;
        let block = self.scopes.enter(Some(scope), kind);
        let mut body = Vec::new();
        while self.lexer.token != Token::RIGHT_BRACE {
            if self.lexer.token == Token::EOF {
                return Err(self.unexpected());
            }
            body.push(self.parse_statement_list_item(context, block)?);
        }
        self.scopes.leave(block);
        self.next(context | Context::ALLOW_REGEXP)?;
        Ok(BlockStatement {
            body,
            span: self.finish(start),
        })
    }

    /// `( Expression )` of `if`, `while`, `with` and `switch`.
    fn parse_parenthesized_head(&mut self, context: Context, scope: ScopeId) -> ParseResult<Expression> {
        self.expect(context | Context::ALLOW_REGEXP, Token::LEFT_PAREN)?;
        let expression = self.parse_expression(context, scope)?;
        self.expect(context | Context::ALLOW_REGEXP, Token::RIGHT_PAREN)?;
        Ok(expression)
    }

    fn parse_if_statement(&mut self, context: Context, scope: ScopeId, start: Marker) -> ParseResult<Statement> {
        self.next(context)?;
        let test = self.parse_parenthesized_head(context, scope)?;
        let consequent = self.parse_statement(context, scope, Origin::IfClause)?;
        let alternate = if self.consume(context | Context::ALLOW_REGEXP, Token::ELSE)? {
            Some(self.parse_statement(context, scope, Origin::IfClause)?)
        } else {
            None
        };
        Ok(Statement::If(Box::new(IfStatement {
            test,
            consequent,
            alternate,
            span: self.finish(start),
        })))
    }

    fn parse_while_statement(&mut self, context: Context, scope: ScopeId, start: Marker) -> ParseResult<Statement> {
        self.next(context)?;
        let test = self.parse_parenthesized_head(context, scope)?;
        let body = self.parse_statement(context | Context::IN_ITERATION, scope, Origin::Statement)?;
        Ok(Statement::While(Box::new(WhileStatement {
            test,
            body,
            span: self.finish(start),
        })))
    }

    fn parse_do_while_statement(&mut self, context: Context, scope: ScopeId, start: Marker) -> ParseResult<Statement> {
        self.next(context | Context::ALLOW_REGEXP)?;
        let body = self.parse_statement(context | Context::IN_ITERATION, scope, Origin::Statement)?;
        self.expect(context, Token::WHILE)?;
        let test = self.parse_parenthesized_head(context, scope)?;
        // a semicolon is always inserted after `do ... while (x)`
        self.consume(context | Context::ALLOW_REGEXP, Token::SEMICOLON)?;
        Ok(Statement::DoWhile(Box::new(DoWhileStatement {
            body,
            test,
            span: self.finish(start),
        })))
    }

    fn parse_with_statement(&mut self, context: Context, scope: ScopeId, start: Marker) -> ParseResult<Statement> {
        if context.is_strict() {
            return Err(self.error_here(ErrorMessage::StrictWith));
        }
        self.next(context)?;
        let object = self.parse_parenthesized_head(context, scope)?;
        let body = self.parse_statement(context, scope, Origin::Statement)?;
        Ok(Statement::With(Box::new(WithStatement {
            object,
            body,
            span: self.finish(start),
        })))
    }

    fn parse_return_statement(&mut self, context: Context, scope: ScopeId, start: Marker) -> ParseResult<Statement> {
        if !context.contains(Context::IN_RETURN_CONTEXT) {
            return Err(self.error_here(ErrorMessage::IllegalReturn));
        }
        self.next(context | Context::ALLOW_REGEXP)?;
        let token = self.lexer.token;
        let argument = if token == Token::SEMICOLON || token.is_auto_semicolon() || self.lexer.has_newline_before() {
            None
        } else {
            Some(self.parse_expression(context, scope)?)
        };
        self.consume_semicolon(context)?;
        Ok(Statement::Return(ReturnStatement {
            argument,
            span: self.finish(start),
        }))
    }

    fn parse_throw_statement(&mut self, context: Context, scope: ScopeId, start: Marker) -> ParseResult<Statement> {
        self.next(context | Context::ALLOW_REGEXP)?;
        if self.lexer.has_newline_before() {
            return Err(self.error_here(ErrorMessage::LineBreakAfterThrow));
        }
        let argument = self.parse_expression(context, scope)?;
        self.consume_semicolon(context)?;
        Ok(Statement::Throw(ThrowStatement {
            argument,
            span: self.finish(start),
        }))
    }

    fn parse_switch_statement(&mut self, context: Context, scope: ScopeId, start: Marker) -> ParseResult<Statement> {
        self.next(context)?;
        let discriminant = self.parse_parenthesized_head(context, scope)?;
        self.expect(context, Token::LEFT_BRACE)?;
        let cases_scope = self.scopes.enter(Some(scope), ScopeKind::Switch);
        let inner = context | Context::IN_SWITCH;
        let mut cases = Vec::new();
        let mut seen_default = false;
        while self.lexer.token != Token::RIGHT_BRACE {
            let case_start = self.start();
            let test = match self.lexer.token {
                Token::CASE => {
                    self.next(context | Context::ALLOW_REGEXP)?;
                    Some(self.parse_expression(context, scope)?)
                }
                Token::DEFAULT => {
                    if seen_default {
                        return Err(self.error_here(ErrorMessage::MultipleDefaults));
                    }
                    seen_default = true;
                    self.next(context)?;
                    None
                }
                _ => return Err(self.unexpected()),
            };
            self.expect(context | Context::ALLOW_REGEXP, Token::COLON)?;
            let mut consequent = Vec::new();
            while !matches!(self.lexer.token, Token::CASE | Token::DEFAULT | Token::RIGHT_BRACE) {
                if self.lexer.token == Token::EOF {
                    return Err(self.unexpected());
                }
                consequent.push(self.parse_statement_list_item(inner, cases_scope)?);
            }
            cases.push(SwitchCase {
                test,
                consequent,
                span: self.finish(case_start),
            });
        }
        self.scopes.leave(cases_scope);
        self.next(context | Context::ALLOW_REGEXP)?;
        Ok(Statement::Switch(SwitchStatement {
            discriminant,
            cases,
            span: self.finish(start),
        }))
    }

    fn parse_try_statement(&mut self, context: Context, scope: ScopeId, start: Marker) -> ParseResult<Statement> {
        self.next(context)?;
        let block = self.parse_block(context, scope, ScopeKind::Block)?;
        let handler = if self.lexer.token == Token::CATCH {
            Some(self.parse_catch_clause(context, scope)?)
        } else {
            None
        };
        let finalizer = if self.consume(context, Token::FINALLY)? {
            Some(self.parse_block(context, scope, ScopeKind::Block)?)
        } else {
            None
        };
        if handler.is_none() && finalizer.is_none() {
            return Err(self.error_here(ErrorMessage::MissingCatchOrFinally));
        }
        Ok(Statement::Try(Box::new(TryStatement {
            block,
            handler,
            finalizer,
            span: self.finish(start),
        })))
    }

    fn parse_catch_clause(&mut self, context: Context, scope: ScopeId) -> ParseResult<CatchClause> {
        let start = self.start();
        self.next(context)?;
        if self.lexer.token != Token::LEFT_PAREN {
            let body = self.parse_block(context, scope, ScopeKind::Block)?;
            return Ok(CatchClause {
                param: None,
                body,
                span: self.finish(start),
            });
        }
        self.next(context)?;
        let catch_scope = self.scopes.enter(Some(scope), ScopeKind::Catch);
        let kind = if self.lexer.token.is_pattern_start() {
            BindingKind::CATCH_PATTERN
        } else {
            BindingKind::CATCH_IDENTIFIER
        };
        let param = self.parse_binding_target(context, catch_scope, kind)?;
        self.expect(context, Token::RIGHT_PAREN)?;
        let body = self.parse_block(context, catch_scope, ScopeKind::CatchBlock)?;
        self.scopes.leave(catch_scope);
        Ok(CatchClause {
            param: Some(param),
            body,
            span: self.finish(start),
        })
    }

    // ------------------------------------------------------------------
    // Variable declarations
    // ------------------------------------------------------------------

    /// `var` / `let` / `const` and its declarator list. The keyword is the
    /// current token. In a `for` head, missing initializers are left for the
    /// caller to judge.
    pub(super) fn parse_variable_declaration(
        &mut self,
        context: Context,
        scope: ScopeId,
        kind: VariableKind,
        in_for: bool,
    ) -> ParseResult<VariableDeclaration> {
        let start = self.start();
        let binding = match kind {
            VariableKind::Var => BindingKind::VAR,
            VariableKind::Let => BindingKind::LET,
            VariableKind::Const => BindingKind::CONST,
        };
        self.next(context)?;
        let mut declarations = Vec::new();
        loop {
            let declarator_start = self.start();
            let id = self.parse_binding_target(context, scope, binding)?;
            let init = if self.consume(context | Context::ALLOW_REGEXP, Token::ASSIGN)? {
                Some(self.parse_assignment_expression(context, scope)?)
            } else {
                if !in_for {
                    if kind == VariableKind::Const {
                        return Err(self.error_here(ErrorMessage::MissingInitializer("const")));
                    }
                    if !id.is_identifier() {
                        return Err(self.error_here(ErrorMessage::MissingInitializer("destructuring")));
                    }
                }
                None
            };
            declarations.push(VariableDeclarator {
                id,
                init,
                span: self.finish(declarator_start),
            });
            if !self.consume(context | Context::ALLOW_REGEXP, Token::COMMA)? {
                break;
            }
        }
        Ok(VariableDeclaration {
            declarations,
            kind,
            span: self.finish(start),
        })
    }

    // ------------------------------------------------------------------
    // for, for-in, for-of
    // ------------------------------------------------------------------

    fn parse_for_statement(&mut self, context: Context, scope: ScopeId, start: Marker) -> ParseResult<Statement> {
        self.next(context)?;
        let mut is_await = false;
        if self.lexer.token == Token::AWAIT {
            if !context.contains(Context::IN_AWAIT_CONTEXT) {
                return Err(self.error_here(ErrorMessage::ForAwaitOutsideAsync));
            }
            is_await = true;
            self.next(context)?;
        }
        self.expect(context | Context::ALLOW_REGEXP, Token::LEFT_PAREN)?;
        let for_scope = self.scopes.enter(Some(scope), ScopeKind::For);
        let head_context = context | Context::DISALLOW_IN;
        let token = self.lexer.token;

        let statement = if token == Token::SEMICOLON {
            if is_await {
                return Err(self.unexpected());
            }
            self.parse_for_rest(context, for_scope, start, None)?
        } else if token == Token::VAR
            || token == Token::CONST
            || (token == Token::LET && self.is_let_declaration(context)?)
        {
            let kind = match token {
                Token::VAR => VariableKind::Var,
                Token::LET => VariableKind::Let,
                _ => VariableKind::Const,
            };
            let declaration = self.parse_variable_declaration(head_context, for_scope, kind, true)?;
            self.parse_for_declaration_rest(context, for_scope, start, declaration, is_await)?
        } else {
            self.parse_for_expression_head(context, for_scope, start, is_await)?
        };
        self.scopes.leave(for_scope);
        Ok(statement)
    }

    fn parse_for_declaration_rest(
        &mut self,
        context: Context,
        scope: ScopeId,
        start: Marker,
        declaration: VariableDeclaration,
        is_await: bool,
    ) -> ParseResult<Statement> {
        let token = self.lexer.token;
        if token == Token::OF || token == Token::IN {
            let name = if token == Token::OF { "for-of" } else { "for-in" };
            if declaration.declarations.len() != 1 {
                return Err(self.error_at(start, ErrorMessage::ForMultipleBindings(name)));
            }
            if let Some(declarator) = declaration.declarations.first() {
                if declarator.init.is_some() {
                    let annex_b = token == Token::IN
                        && declaration.kind == VariableKind::Var
                        && declarator.id.is_identifier()
                        && !context.is_strict()
                        && context.contains(Context::WEB_COMPAT);
                    if !annex_b {
                        return Err(self.error_at(start, ErrorMessage::ForInitializer(name)));
                    }
                }
            }
            return self.parse_for_in_of_rest(context, scope, start, ForHead::Variable(declaration), is_await);
        }
        if is_await {
            return Err(self.unexpected());
        }
        for declarator in &declaration.declarations {
            if declarator.init.is_none() {
                if declaration.kind == VariableKind::Const {
                    return Err(self.error_here(ErrorMessage::MissingInitializer("const")));
                }
                if !declarator.id.is_identifier() {
                    return Err(self.error_here(ErrorMessage::MissingInitializer("destructuring")));
                }
            }
        }
        self.parse_for_rest(context, scope, start, Some(ForInit::Variable(declaration)))
    }

    fn parse_for_expression_head(
        &mut self,
        context: Context,
        scope: ScopeId,
        start: Marker,
        is_await: bool,
    ) -> ParseResult<Statement> {
        let head_context = context | Context::DISALLOW_IN;
        let head_start = self.start();
        let first = self.lexer.token;
        let expression = if first.is_pattern_start() {
            let literal = self.parse_pattern_literal(head_context, scope)?;
            if matches!(self.lexer.token, Token::OF | Token::IN) {
                literal
            } else {
                self.check_literal_followup()?;
                let left = self.parse_member_or_call(head_context, scope, head_start, literal, true)?;
                if matches!(self.lexer.token, Token::OF | Token::IN) {
                    left
                } else {
                    self.continue_expression(head_context, scope, head_start, left)?
                }
            }
        } else if first == Token::ASYNC && self.peek(context)?.0 == Token::OF {
            // `for (async of` is only an arrow when `=>` follows `of`
            let id = self.parse_identifier_name(head_context)?;
            if self.peek(context)?.0 == Token::ARROW {
                let arrow = self.parse_async_arrow_with_identifier(head_context, scope, head_start)?;
                self.continue_expression(head_context, scope, head_start, arrow)?
            } else {
                self.assignable = AssignKind::Assignable;
                Expression::Identifier(id)
            }
        } else if first.is_unary_op()
            || first.is_update_op()
            || (first == Token::AWAIT && context.contains(Context::IN_AWAIT_CONTEXT))
            || (first == Token::YIELD && context.contains(Context::IN_YIELD_CONTEXT))
        {
            self.parse_expression(head_context, scope)?
        } else {
            let left = self.parse_left_hand_side_expression(head_context, scope)?;
            if matches!(self.lexer.token, Token::OF | Token::IN) {
                left
            } else {
                self.continue_expression(head_context, scope, head_start, left)?
            }
        };

        let token = self.lexer.token;
        if token != Token::OF && token != Token::IN {
            if is_await {
                return Err(self.unexpected());
            }
            return self.parse_for_rest(context, scope, start, Some(ForInit::Expression(expression)));
        }
        let name = if token == Token::OF { "for-of" } else { "for-in" };
        if token == Token::OF {
            if first == Token::LET {
                return Err(self.error_at(head_start, ErrorMessage::ForOfLet));
            }
            if first == Token::ASYNC && !is_await && expression.as_identifier() == Some("async") {
                return Err(self.error_at(head_start, ErrorMessage::ForOfAsync));
            }
        }
        let pattern = match expression {
            Expression::Array(_) | Expression::Object(_) => {
                self.check_destructuring_target(head_start)?;
                self.reinterpret_as_pattern(context, expression)?
            }
            other => self.simple_assignment_target(context, other, ErrorMessage::InvalidForLhs(name), head_start)?,
        };
        self.parse_for_in_of_rest(context, scope, start, ForHead::Pattern(pattern), is_await)
    }

    /// After the left side of `for (x in y)` / `for (x of y)`; the current
    /// token is `in` or `of`.
    fn parse_for_in_of_rest(
        &mut self,
        context: Context,
        scope: ScopeId,
        start: Marker,
        left: ForHead,
        is_await: bool,
    ) -> ParseResult<Statement> {
        let of = self.lexer.token == Token::OF;
        if is_await && !of {
            return Err(self.unexpected());
        }
        self.next(context | Context::ALLOW_REGEXP)?;
        let right = if of {
            self.parse_assignment_expression(context, scope)?
        } else {
            self.parse_expression(context, scope)?
        };
        self.expect(context | Context::ALLOW_REGEXP, Token::RIGHT_PAREN)?;
        let body = self.parse_statement(context | Context::IN_ITERATION, scope, Origin::Statement)?;
        let span = self.finish(start);
        Ok(if of {
            Statement::ForOf(Box::new(ForOfStatement {
                left,
                right,
                body,
                is_await,
                span,
            }))
        } else {
            Statement::ForIn(Box::new(ForInStatement { left, right, body, span }))
        })
    }

    /// After the initializer of a plain `for`; the current token is `;`.
    fn parse_for_rest(
        &mut self,
        context: Context,
        scope: ScopeId,
        start: Marker,
        init: Option<ForInit>,
    ) -> ParseResult<Statement> {
        self.expect(context | Context::ALLOW_REGEXP, Token::SEMICOLON)?;
        let test = if self.lexer.token == Token::SEMICOLON {
            None
        } else {
            Some(self.parse_expression(context, scope)?)
        };
        self.expect(context | Context::ALLOW_REGEXP, Token::SEMICOLON)?;
        let update = if self.lexer.token == Token::RIGHT_PAREN {
            None
        } else {
            Some(self.parse_expression(context, scope)?)
        };
        self.expect(context | Context::ALLOW_REGEXP, Token::RIGHT_PAREN)?;
        let body = self.parse_statement(context | Context::IN_ITERATION, scope, Origin::Statement)?;
        Ok(Statement::For(Box::new(ForStatement {
            init,
            test,
            update,
            body,
            span: self.finish(start),
        })))
    }
}
