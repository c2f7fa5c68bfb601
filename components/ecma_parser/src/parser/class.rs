//! Classes, class elements and decorators.

use super::Parser;
use crate::ast::*;
use crate::context::{Context, MemberFlags};
use crate::error::{ErrorMessage, ParseResult};
use crate::lexer::Marker;
use crate::scope::{BindingKind, PrivateKind, ScopeId, ScopeKind};
use crate::token::Token;

/// Tokens after a modifier word that make the word itself the member name.
fn ends_member_name(token: Token) -> bool {
    matches!(
        token,
        Token::LEFT_PAREN | Token::ASSIGN | Token::SEMICOLON | Token::RIGHT_BRACE | Token::EOF
    )
}

impl<'a> Parser<'a> {
    // ------------------------------------------------------------------
    // Declarations and expressions
    // ------------------------------------------------------------------

    /// ClassDeclaration; the current token is `class`. The name is optional
    /// only for `export default class {}`.
    pub(super) fn parse_class_declaration(
        &mut self,
        context: Context,
        scope: ScopeId,
        start: Marker,
        decorators: Vec<Decorator>,
        require_name: bool,
    ) -> ParseResult<ClassDeclaration> {
        let class_context = context | Context::STRICT;
        self.next(class_context)?;
        let id = if self.at_class_heritage_or_body() {
            if require_name {
                return Err(self.unexpected());
            }
            None
        } else {
            let name_start = self.start();
            let id = self.parse_class_name(class_context)?;
            self.declare(context, scope, &id.name, BindingKind::CLASS, name_start)?;
            Some(id)
        };
        let (super_class, body) = self.parse_class_tail(class_context, scope, context | Context::ALLOW_REGEXP)?;
        Ok(ClassDeclaration {
            id,
            super_class,
            body,
            decorators,
            span: self.finish(start),
        })
    }

    /// ClassExpression; the current token is `class`.
    pub(super) fn parse_class_expression(
        &mut self,
        context: Context,
        scope: ScopeId,
        start: Marker,
        decorators: Vec<Decorator>,
    ) -> ParseResult<Expression> {
        let class_context = context | Context::STRICT;
        self.next(class_context)?;
        let id = if self.at_class_heritage_or_body() {
            None
        } else {
            Some(self.parse_class_name(class_context)?)
        };
        let (super_class, body) = self.parse_class_tail(class_context, scope, context)?;
        Ok(Expression::Class(Box::new(ClassExpression {
            id,
            super_class,
            body,
            decorators,
            span: self.finish(start),
        })))
    }

    fn at_class_heritage_or_body(&self) -> bool {
        matches!(self.lexer.token, Token::EXTENDS | Token::LEFT_BRACE)
    }

    /// The binding identifier of a class; class names are always strict.
    fn parse_class_name(&mut self, context: Context) -> ParseResult<Identifier> {
        let start = self.start();
        let token = self.lexer.token;
        if !token.is_identifier_name() {
            return Err(self.unexpected());
        }
        let name = self.take_name();
        self.check_binding_identifier(context, token, &name, BindingKind::CLASS, start)?;
        self.next(context)?;
        Ok(Identifier {
            name,
            span: self.finish(start),
        })
    }

    /// `extends Heritage { ClassBody }`. `after` is the context the token
    /// following the closing `}` is scanned in.
    fn parse_class_tail(
        &mut self,
        context: Context,
        scope: ScopeId,
        after: Context,
    ) -> ParseResult<(Option<Expression>, ClassBody)> {
        let super_class = if self.lexer.token == Token::EXTENDS {
            self.next(context | Context::ALLOW_REGEXP)?;
            let heritage_start = self.start();
            let heritage = self.parse_left_hand_side_expression(context, scope)?;
            self.reject_arrow_operand(heritage_start)?;
            Some(heritage)
        } else {
            None
        };
        let derived = super_class.is_some();

        let body_start = self.start();
        self.expect(context, Token::LEFT_BRACE)?;
        self.private_scopes.enter();
        let class_context = context | Context::IN_CLASS;
        let mut body = Vec::new();
        let mut has_constructor = false;
        loop {
            match self.lexer.token {
                Token::RIGHT_BRACE => break,
                Token::SEMICOLON => self.next(class_context)?,
                Token::EOF => return Err(self.unexpected()),
                _ => body.push(self.parse_class_element(class_context, scope, derived, &mut has_constructor)?),
            }
        }
        self.private_scopes.leave().map_err(super::pending_error)?;
        self.next(after)?;
        self.set_opaque();
        Ok((
            super_class,
            ClassBody {
                body,
                span: self.finish(body_start),
            },
        ))
    }

    // ------------------------------------------------------------------
    // Class elements
    // ------------------------------------------------------------------

    fn parse_class_element(
        &mut self,
        context: Context,
        scope: ScopeId,
        derived: bool,
        has_constructor: &mut bool,
    ) -> ParseResult<ClassElement> {
        let start = self.start();
        let decorators = if self.lexer.token == Token::AT {
            self.parse_decorators(context, scope)?
        } else {
            Vec::new()
        };

        let mut flags = MemberFlags::empty();
        if self.lexer.token == Token::STATIC {
            let (next, _) = self.peek(context)?;
            if next == Token::LEFT_BRACE {
                if !decorators.is_empty() {
                    return Err(self.error_at(start, ErrorMessage::MisplacedDecorator));
                }
                return self.parse_static_block(context, scope, start);
            }
            if !ends_member_name(next) {
                flags |= MemberFlags::STATIC;
                self.next(context)?;
            }
        }
        if self.lexer.token == Token::ACCESSOR && context.contains(Context::NEXT) {
            let (next, newline) = self.peek(context)?;
            if !newline && !ends_member_name(next) {
                flags |= MemberFlags::ACCESSOR;
                self.next(context)?;
            }
        }
        if self.lexer.token == Token::ASYNC && !flags.contains(MemberFlags::ACCESSOR) {
            let (next, newline) = self.peek(context)?;
            if !newline && !ends_member_name(next) {
                flags |= MemberFlags::ASYNC;
                self.next(context)?;
            }
        }
        if self.lexer.token == Token::MULTIPLY && !flags.contains(MemberFlags::ACCESSOR) {
            flags |= MemberFlags::GENERATOR;
            self.next(context)?;
        }
        if matches!(self.lexer.token, Token::GET | Token::SET)
            && !flags.intersects(MemberFlags::ASYNC | MemberFlags::GENERATOR | MemberFlags::ACCESSOR)
        {
            let (next, _) = self.peek(context)?;
            if !ends_member_name(next) {
                flags |= if self.lexer.token == Token::GET {
                    MemberFlags::GETTER
                } else {
                    MemberFlags::SETTER
                };
                self.next(context)?;
            }
        }

        let key_start = self.start();
        let (key, computed) = if self.lexer.token == Token::PRIVATE_NAME {
            let name = self.take_name();
            self.next(context)?;
            flags |= MemberFlags::PRIVATE;
            let mut kind = if flags.contains(MemberFlags::GETTER) {
                PrivateKind::GETTER
            } else if flags.contains(MemberFlags::SETTER) {
                PrivateKind::SETTER
            } else if self.lexer.token == Token::LEFT_PAREN {
                PrivateKind::METHOD
            } else {
                PrivateKind::FIELD
            };
            if flags.contains(MemberFlags::STATIC) {
                kind |= PrivateKind::STATIC;
            }
            self.private_scopes
                .declare(&name, kind)
                .map_err(|message| self.error_at(key_start, message))?;
            let key = PropertyKey::PrivateIdentifier(PrivateIdentifier {
                name,
                span: self.finish(key_start),
            });
            (key, false)
        } else {
            self.parse_property_key(context, scope)?
        };
        let is_static = flags.contains(MemberFlags::STATIC);
        let static_name = if computed || flags.contains(MemberFlags::PRIVATE) {
            None
        } else {
            key.static_name().map(str::to_string)
        };
        if is_static && static_name.as_deref() == Some("prototype") {
            return Err(self.error_at(key_start, ErrorMessage::StaticPrototype));
        }

        let is_method = self.lexer.token == Token::LEFT_PAREN
            || flags.intersects(MemberFlags::GETTER | MemberFlags::SETTER | MemberFlags::ASYNC | MemberFlags::GENERATOR);
        if is_method {
            if flags.contains(MemberFlags::ACCESSOR) {
                return Err(self.unexpected());
            }
            let is_constructor = !is_static && static_name.as_deref() == Some("constructor");
            if is_constructor {
                let invalid = if flags.contains(MemberFlags::GENERATOR) {
                    Some("a generator")
                } else if flags.contains(MemberFlags::ASYNC) {
                    Some("an async method")
                } else if flags.contains(MemberFlags::GETTER) {
                    Some("a getter")
                } else if flags.contains(MemberFlags::SETTER) {
                    Some("a setter")
                } else {
                    None
                };
                if let Some(what) = invalid {
                    return Err(self.error_at(key_start, ErrorMessage::InvalidConstructor(what)));
                }
                if *has_constructor {
                    return Err(self.error_at(key_start, ErrorMessage::DuplicateConstructor));
                }
                *has_constructor = true;
                flags |= MemberFlags::CONSTRUCTOR;
            }
            let value = self.parse_method(context, scope, flags, is_constructor && derived)?;
            let kind = if is_constructor {
                MethodKind::Constructor
            } else if flags.contains(MemberFlags::GETTER) {
                MethodKind::Get
            } else if flags.contains(MemberFlags::SETTER) {
                MethodKind::Set
            } else {
                MethodKind::Method
            };
            return Ok(ClassElement::Method(MethodDefinition {
                key,
                value,
                kind,
                computed,
                is_static,
                decorators,
                span: self.finish(start),
            }));
        }

        if static_name.as_deref() == Some("constructor") {
            return Err(self.error_at(key_start, ErrorMessage::ConstructorField));
        }
        let value = self.parse_field_initializer(context, scope)?;
        self.consume_semicolon(context)?;
        let span = self.finish(start);
        if flags.contains(MemberFlags::ACCESSOR) {
            Ok(ClassElement::Accessor(AccessorProperty {
                key,
                value,
                computed,
                is_static,
                decorators,
                span,
            }))
        } else {
            Ok(ClassElement::Property(PropertyDefinition {
                key,
                value,
                computed,
                is_static,
                decorators,
                span,
            }))
        }
    }

    /// `= AssignmentExpression` of a field. The initializer behaves like a
    /// method body: `super.x` and `new.target` work, `arguments` does not.
    fn parse_field_initializer(&mut self, context: Context, scope: ScopeId) -> ParseResult<Option<Expression>> {
        if self.lexer.token != Token::ASSIGN {
            return Ok(None);
        }
        let init_context = (context - Context::FUNCTION_RESET - Context::SUPER_CALL)
            | Context::IN_CLASS_FIELD_INIT
            | Context::SUPER_PROPERTY
            | Context::ALLOW_NEW_TARGET;
        self.next(init_context | Context::ALLOW_REGEXP)?;
        let root = self.scopes.enter(Some(scope), ScopeKind::FunctionRoot);
        let value = self.parse_assignment_expression(init_context, root)?;
        self.scopes.leave(root);
        Ok(Some(value))
    }

    /// `static { ... }`; the current token is `static`.
    fn parse_static_block(&mut self, context: Context, scope: ScopeId, start: Marker) -> ParseResult<ClassElement> {
        self.next(context)?;
        let block_context = (context - Context::FUNCTION_RESET - Context::SUPER_CALL - Context::IN_RETURN_CONTEXT)
            | Context::IN_STATIC_BLOCK
            | Context::SUPER_PROPERTY
            | Context::ALLOW_NEW_TARGET;
        self.expect(block_context | Context::ALLOW_REGEXP, Token::LEFT_BRACE)?;
        let root = self.scopes.enter(Some(scope), ScopeKind::FunctionRoot);
        let block = self.scopes.enter(Some(root), ScopeKind::Block);
        let saved_labels = std::mem::take(&mut self.labels);
        let saved_chain = self.label_chain_start.take();

        let mut body = Vec::new();
        while self.lexer.token != Token::RIGHT_BRACE {
            if self.lexer.token == Token::EOF {
                return Err(self.unexpected());
            }
            body.push(self.parse_statement_list_item(block_context, block)?);
        }
        self.scopes.leave(root);
        self.labels = saved_labels;
        self.label_chain_start = saved_chain;
        self.next(context)?;
        Ok(ClassElement::StaticBlock(StaticBlock {
            body,
            span: self.finish(start),
        }))
    }

    // ------------------------------------------------------------------
    // Decorators
    // ------------------------------------------------------------------

    /// One or more `@decorator`s; the current token is `@`.
    pub(super) fn parse_decorators(&mut self, context: Context, scope: ScopeId) -> ParseResult<Vec<Decorator>> {
        if !context.contains(Context::NEXT) {
            return Err(self.error_here(ErrorMessage::DecoratorsDisabled));
        }
        let decorator_context = context | Context::IN_DECORATOR;
        let mut decorators = Vec::new();
        while self.lexer.token == Token::AT {
            let start = self.start();
            self.next(decorator_context)?;
            let expression = if self.lexer.token == Token::LEFT_PAREN {
                let inner = decorator_context - Context::DISALLOW_IN;
                self.next(inner | Context::ALLOW_REGEXP)?;
                let expression = self.parse_expression(inner, scope)?;
                self.expect(decorator_context, Token::RIGHT_PAREN)?;
                expression
            } else {
                self.parse_decorator_member(decorator_context, scope)?
            };
            decorators.push(Decorator {
                expression,
                span: self.finish(start),
            });
        }
        Ok(decorators)
    }

    /// `@a.b.c` with an optional trailing call.
    fn parse_decorator_member(&mut self, context: Context, scope: ScopeId) -> ParseResult<Expression> {
        let start = self.start();
        let token = self.lexer.token;
        if !token.is_identifier_like() {
            return Err(self.unexpected());
        }
        let name = self.take_name();
        self.check_identifier_reference(context, token, &name, start)?;
        self.next(context)?;
        let mut expression = Expression::Identifier(Identifier {
            name,
            span: self.finish(start),
        });
        while self.lexer.token == Token::PERIOD {
            self.next(context)?;
            let property = self.parse_member_property(context)?;
            expression = self.member(start, expression, property, false, false);
        }
        if self.lexer.token == Token::LEFT_PAREN {
            let arguments = self.parse_arguments(context, scope)?;
            expression = Expression::Call(Box::new(CallExpression {
                callee: expression,
                arguments,
                optional: false,
                span: self.finish(start),
            }));
        }
        Ok(expression)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::error::ErrorMessage;
    use crate::options::Options;
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

    fn next(source: &str) -> Result<Vec<Statement>, ErrorMessage> {
        let options = Options {
            next: true,
            ..Options::default()
        };
        parse_with(source, &options)
    }

    fn class_body(source: &str) -> Vec<ClassElement> {
        match parse(source).unwrap().remove(0) {
            Statement::Class(class) => class.body.body,
            other => panic!("not a class: {:?}", other),
        }
    }

    #[test]
    fn test_member_kinds() {
        let body = class_body(
            "class A { constructor() {} static m() {} get x() { return 1 } set x(v) {} async *g() {} #p = 1; static { } }",
        );
        assert_eq!(body.len(), 7);
        match &body[0] {
            ClassElement::Method(method) => assert_eq!(method.kind, MethodKind::Constructor),
            other => panic!("unexpected {:?}", other),
        }
        match &body[1] {
            ClassElement::Method(method) => {
                assert!(method.is_static);
                assert_eq!(method.kind, MethodKind::Method);
            }
            other => panic!("unexpected {:?}", other),
        }
        match &body[2] {
            ClassElement::Method(method) => assert_eq!(method.kind, MethodKind::Get),
            other => panic!("unexpected {:?}", other),
        }
        match &body[4] {
            ClassElement::Method(method) => {
                assert!(method.value.is_async);
                assert!(method.value.generator);
            }
            other => panic!("unexpected {:?}", other),
        }
        match &body[5] {
            ClassElement::Property(field) => {
                assert!(matches!(field.key, PropertyKey::PrivateIdentifier(_)));
                assert!(field.value.is_some());
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(body[6], ClassElement::StaticBlock(_)));
    }

    #[test]
    fn test_modifier_words_as_names() {
        let body = class_body("class A { static; get; set = 1; async\n x() {} static async() {} get() {} }");
        assert_eq!(body.len(), 7);
        match &body[0] {
            ClassElement::Property(field) => {
                assert!(!field.is_static);
                assert_eq!(field.key.static_name(), Some("static"));
            }
            other => panic!("unexpected {:?}", other),
        }
        match &body[3] {
            ClassElement::Property(field) => assert_eq!(field.key.static_name(), Some("async")),
            other => panic!("unexpected {:?}", other),
        }
        match &body[5] {
            ClassElement::Method(method) => {
                assert!(method.is_static);
                assert!(!method.value.is_async);
                assert_eq!(method.key.static_name(), Some("async"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_constructor_rules() {
        assert_eq!(
            parse("class A { constructor() {} constructor() {} }").unwrap_err(),
            ErrorMessage::DuplicateConstructor
        );
        assert_eq!(
            parse("class A { *constructor() {} }").unwrap_err(),
            ErrorMessage::InvalidConstructor("a generator")
        );
        assert_eq!(
            parse("class A { async constructor() {} }").unwrap_err(),
            ErrorMessage::InvalidConstructor("an async method")
        );
        assert_eq!(
            parse("class A { get constructor() {} }").unwrap_err(),
            ErrorMessage::InvalidConstructor("a getter")
        );
        assert_eq!(
            parse("class A { constructor = 1 }").unwrap_err(),
            ErrorMessage::ConstructorField
        );
        assert_eq!(
            parse("class A { static prototype() {} }").unwrap_err(),
            ErrorMessage::StaticPrototype
        );
        assert!(parse("class A { static constructor() {} constructor() {} }").is_ok());
        assert!(parse("class A { 'constructor'() {} }").is_ok());
        assert_eq!(
            parse("class A { 'constructor'() {} constructor() {} }").unwrap_err(),
            ErrorMessage::DuplicateConstructor
        );
        assert!(parse("class A { prototype() {} ['constructor'] = 1 }").is_ok());
    }

    #[test]
    fn test_super_rules() {
        assert!(parse("class A extends B { constructor() { super(); } }").is_ok());
        assert!(parse("class A extends B { constructor() { (() => super())(); } }").is_ok());
        assert_eq!(
            parse("class A { constructor() { super(); } }").unwrap_err(),
            ErrorMessage::InvalidSuperCall
        );
        assert_eq!(
            parse("class A extends B { m() { super(); } }").unwrap_err(),
            ErrorMessage::InvalidSuperCall
        );
        assert_eq!(
            parse("class A extends B { constructor() { function f() { super.x } } }").unwrap_err(),
            ErrorMessage::InvalidSuperProperty
        );
        assert!(parse("class A { m() { return super.m(); } x = super.y; static { super.z } }").is_ok());
        assert_eq!(
            parse("class A extends B { x = super(); }").unwrap_err(),
            ErrorMessage::InvalidSuperCall
        );
    }

    #[test]
    fn test_private_names() {
        assert!(parse("class A { #x; m() { return this.#x + (#x in this); } }").is_ok());
        assert!(parse("class A { m() { return this.#x; } #x = 1; }").is_ok());
        assert!(parse("class A { get #x() {} set #x(v) {} }").is_ok());
        assert!(parse("class A { #x; m() { class B { n() { this.#x } } } }").is_ok());
        assert_eq!(
            parse("class A { #x; #x; }").unwrap_err(),
            ErrorMessage::DuplicatePrivateName("x".into())
        );
        assert_eq!(
            parse("class A { get #x() {} static set #x(v) {} }").unwrap_err(),
            ErrorMessage::DuplicatePrivateName("x".into())
        );
        assert_eq!(
            parse("class A { m() { this.#y } }").unwrap_err(),
            ErrorMessage::UndeclaredPrivateName("y".into())
        );
        assert_eq!(parse("this.#x").unwrap_err(), ErrorMessage::UndeclaredPrivateName("x".into()));
        assert_eq!(
            parse("class A { #constructor() {} }").unwrap_err(),
            ErrorMessage::PrivateConstructor
        );
        assert_eq!(
            parse("class A { #x; m() { delete this.#x } }").unwrap_err(),
            ErrorMessage::DeletePrivateField
        );
    }

    #[test]
    fn test_class_body_is_strict() {
        assert_eq!(
            parse("class A { m() { with (a) {} } }").unwrap_err(),
            ErrorMessage::StrictWith
        );
        assert_eq!(
            parse("class yield {}").unwrap_err(),
            ErrorMessage::StrictReservedWord("yield".into())
        );
        assert_eq!(parse("class let {}").unwrap_err(), ErrorMessage::LetAsLexicalName);
        assert!(parse("class A extends (B, C) {} with (a) {}").is_ok());
    }

    #[test]
    fn test_class_declaration_binding() {
        assert_eq!(
            parse("let A; class A {}").unwrap_err(),
            ErrorMessage::DuplicateBinding("A".into())
        );
        assert!(parse("var A = class A {}; (class B {}); (class B {});").is_ok());
        assert_eq!(parse("class {}").unwrap_err(), ErrorMessage::UnexpectedToken("{".into()));
    }

    #[test]
    fn test_field_initializers() {
        assert_eq!(
            parse("class A { x = arguments; }").unwrap_err(),
            ErrorMessage::ArgumentsInClassInit
        );
        assert!(parse("class A { x = () => new.target; y = function() { return arguments } }").is_ok());
        assert!(parse("class A { x = 1\n y = 2 }").is_ok());
        assert!(parse("class A { x = 1 y }").is_err());
    }

    #[test]
    fn test_static_blocks() {
        assert!(parse("class A { static { var x; let y; this.z = 1; } }").is_ok());
        assert_eq!(
            parse("class A { static { await; } }").unwrap_err(),
            ErrorMessage::ReservedWord("await".into())
        );
        assert_eq!(
            parse("class A { static { arguments; } }").unwrap_err(),
            ErrorMessage::ArgumentsInClassInit
        );
        assert_eq!(
            parse("class A { static { return; } }").unwrap_err(),
            ErrorMessage::IllegalReturn
        );
        assert_eq!(
            parse("class A { static { var x; let x; } }").unwrap_err(),
            ErrorMessage::DuplicateBinding("x".into())
        );
        assert!(parse("let x; class A { static { var x; } }").is_ok());
    }

    #[test]
    fn test_decorators() {
        assert_eq!(parse("@dec class A {}").unwrap_err(), ErrorMessage::DecoratorsDisabled);
        match next("@a.b(1) @(c) class A { @d m() {} @e static x = 1; @f accessor y; }").unwrap().remove(0) {
            Statement::Class(class) => {
                assert_eq!(class.decorators.len(), 2);
                assert!(matches!(class.decorators[0].expression, Expression::Call(_)));
                match &class.body.body[2] {
                    ClassElement::Accessor(accessor) => assert_eq!(accessor.decorators.len(), 1),
                    other => panic!("unexpected {:?}", other),
                }
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            next("class A { @d static {} }").unwrap_err(),
            ErrorMessage::MisplacedDecorator
        );
        assert_eq!(next("@d function f() {}").unwrap_err(), ErrorMessage::MisplacedDecorator);
        assert!(next("(@d class {})").is_ok());
    }

    #[test]
    fn test_accessor_keyword() {
        let options = Options {
            next: true,
            ..Options::default()
        };
        match parse_with("class A { accessor\n x; accessor y = 1; accessor() {} }", &options)
            .unwrap()
            .remove(0)
        {
            Statement::Class(class) => {
                assert!(matches!(class.body.body[0], ClassElement::Property(_)));
                assert!(matches!(class.body.body[1], ClassElement::Property(_)));
                assert!(matches!(class.body.body[2], ClassElement::Accessor(_)));
                assert!(matches!(class.body.body[3], ClassElement::Method(_)));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(parse("class A { accessor; }").is_ok());
        assert!(parse("class A { accessor x; }").is_err());
    }
}
