//! Import and export declarations.

use super::Parser;
use crate::ast::*;
use crate::context::Context;
use crate::error::{ErrorMessage, ParseResult};
use crate::lexer::Marker;
use crate::scope::{BindingKind, ScopeId};
use crate::token::{keyword, Token};

impl<'a> Parser<'a> {
    /// ModuleItem: an import or export declaration, or a statement list item.
    pub(super) fn parse_module_item(&mut self, context: Context, scope: ScopeId) -> ParseResult<Statement> {
        match self.lexer.token {
            Token::IMPORT => {
                let (next, _) = self.peek(context)?;
                if next == Token::LEFT_PAREN || next == Token::PERIOD {
                    return self.parse_statement_list_item(context, scope);
                }
                self.parse_import_declaration(context, scope)
            }
            Token::EXPORT => self.parse_export_declaration(context, scope),
            _ => self.parse_statement_list_item(context, scope),
        }
    }

    // ------------------------------------------------------------------
    // import
    // ------------------------------------------------------------------

    fn parse_import_declaration(&mut self, context: Context, scope: ScopeId) -> ParseResult<Statement> {
        let start = self.start();
        self.next(context)?;
        let mut specifiers = Vec::new();
        if self.lexer.token != Token::STRING {
            let mut needs_clause = true;
            if !matches!(self.lexer.token, Token::LEFT_BRACE | Token::MULTIPLY) {
                let default_start = self.start();
                let local = self.parse_binding_identifier(context, scope, BindingKind::IMPORT)?;
                specifiers.push(ImportSpecifierKind::Default(ImportDefaultSpecifier {
                    local,
                    span: self.finish(default_start),
                }));
                needs_clause = self.consume(context, Token::COMMA)?;
            }
            if needs_clause {
                match self.lexer.token {
                    Token::MULTIPLY => {
                        let namespace_start = self.start();
                        self.next(context)?;
                        self.expect_contextual(context, Token::AS)?;
                        let local = self.parse_binding_identifier(context, scope, BindingKind::IMPORT)?;
                        specifiers.push(ImportSpecifierKind::Namespace(ImportNamespaceSpecifier {
                            local,
                            span: self.finish(namespace_start),
                        }));
                    }
                    Token::LEFT_BRACE => self.parse_named_imports(context, scope, &mut specifiers)?,
                    _ => return Err(self.unexpected()),
                }
            }
            self.expect_contextual(context, Token::FROM)?;
        }
        let source = self.parse_module_source(context)?;
        let attributes = self.parse_import_attributes(context)?;
        self.consume_semicolon(context)?;
        Ok(Statement::Import(ImportDeclaration {
            specifiers,
            source,
            attributes,
            span: self.finish(start),
        }))
    }

    /// `{ a, b as c, "d" as e }`
    fn parse_named_imports(
        &mut self,
        context: Context,
        scope: ScopeId,
        specifiers: &mut Vec<ImportSpecifierKind>,
    ) -> ParseResult<()> {
        self.next(context)?;
        while self.lexer.token != Token::RIGHT_BRACE {
            let start = self.start();
            let token = self.lexer.token;
            let imported = self.parse_module_export_name(context)?;
            let local = if self.lexer.token == Token::AS {
                self.next(context)?;
                self.parse_binding_identifier(context, scope, BindingKind::IMPORT)?
            } else {
                // `{ name }` binds the imported name itself
                let ModuleExportName::Identifier(id) = &imported else {
                    return Err(self.error_here(ErrorMessage::Expected {
                        expected: "as",
                        found: self.found_text(),
                    }));
                };
                self.check_binding_identifier(context, token, &id.name, BindingKind::IMPORT, start)?;
                self.declare(context, scope, &id.name, BindingKind::IMPORT, start)?;
                id.clone()
            };
            specifiers.push(ImportSpecifierKind::Named(ImportSpecifier {
                imported,
                local,
                span: self.finish(start),
            }));
            if self.lexer.token != Token::RIGHT_BRACE {
                self.expect(context, Token::COMMA)?;
            }
        }
        self.next(context)?;
        Ok(())
    }

    /// The module specifier string. The token after it may start a statement.
    fn parse_module_source(&mut self, context: Context) -> ParseResult<Literal> {
        if self.lexer.token != Token::STRING {
            return Err(self.unexpected());
        }
        self.parse_literal(context | Context::ALLOW_REGEXP)
    }

    /// `with { type: "json" }`
    fn parse_import_attributes(&mut self, context: Context) -> ParseResult<Vec<ImportAttribute>> {
        let mut attributes = Vec::new();
        if self.lexer.token != Token::WITH {
            return Ok(attributes);
        }
        self.next(context)?;
        self.expect(context, Token::LEFT_BRACE)?;
        while self.lexer.token != Token::RIGHT_BRACE {
            let start = self.start();
            let key = self.parse_module_export_name(context)?;
            self.expect(context, Token::COLON)?;
            if self.lexer.token != Token::STRING {
                return Err(self.unexpected());
            }
            let value = self.parse_literal(context)?;
            attributes.push(ImportAttribute {
                key,
                value,
                span: self.finish(start),
            });
            if self.lexer.token != Token::RIGHT_BRACE {
                self.expect(context, Token::COMMA)?;
            }
        }
        self.next(context | Context::ALLOW_REGEXP)?;
        Ok(attributes)
    }

    /// An identifier name or a string literal naming an export.
    fn parse_module_export_name(&mut self, context: Context) -> ParseResult<ModuleExportName> {
        let start = self.start();
        let token = self.lexer.token;
        if token == Token::STRING {
            let literal = self.parse_literal(context)?;
            if let LiteralValue::String(value) = &literal.value {
                let raw = self.lexer.slice(start.index, self.lexer.prev_end.index);
                if value.contains('\u{FFFD}') && !raw.contains('\u{FFFD}') {
                    return Err(self.error_at(start, ErrorMessage::MalformedExportName));
                }
            }
            return Ok(ModuleExportName::Literal(Box::new(literal)));
        }
        if !token.is_identifier_name() {
            return Err(self.unexpected());
        }
        Ok(ModuleExportName::Identifier(self.parse_identifier_name(context)?))
    }

    /// Consumes a contextual keyword such as `from` or `as`.
    fn expect_contextual(&mut self, context: Context, word: Token) -> ParseResult<()> {
        if self.lexer.token != word {
            return Err(self.error_here(ErrorMessage::Expected {
                expected: word.text(),
                found: self.found_text(),
            }));
        }
        self.next(context)
    }

    // ------------------------------------------------------------------
    // export
    // ------------------------------------------------------------------

    fn parse_export_declaration(&mut self, context: Context, scope: ScopeId) -> ParseResult<Statement> {
        let start = self.start();
        self.next(context)?;
        match self.lexer.token {
            Token::DEFAULT => self.parse_export_default(context, scope, start),
            Token::MULTIPLY => self.parse_export_all(context, start),
            Token::LEFT_BRACE => self.parse_export_named(context, start),
            _ => {
                let declaration = self.parse_exported_declaration(context, scope)?;
                Ok(Statement::ExportNamed(Box::new(ExportNamedDeclaration {
                    declaration: Some(declaration),
                    specifiers: Vec::new(),
                    source: None,
                    attributes: Vec::new(),
                    span: self.finish(start),
                })))
            }
        }
    }

    /// `export default ...`; the current token is `default`.
    fn parse_export_default(&mut self, context: Context, scope: ScopeId, start: Marker) -> ParseResult<Statement> {
        self.scopes
            .declare_export("default")
            .map_err(|message| self.error_at(start, message))?;
        self.next(context | Context::ALLOW_REGEXP)?;
        let declaration_start = self.start();
        let token = self.lexer.token;
        let declaration = match token {
            Token::FUNCTION => ExportDefaultKind::Function(self.parse_function_declaration(
                context,
                scope,
                declaration_start,
                false,
                false,
            )?),
            Token::ASYNC if self.is_async_function(context)? => {
                self.next(context)?;
                ExportDefaultKind::Function(self.parse_function_declaration(
                    context,
                    scope,
                    declaration_start,
                    true,
                    false,
                )?)
            }
            Token::CLASS => ExportDefaultKind::Class(self.parse_class_declaration(
                context,
                scope,
                declaration_start,
                Vec::new(),
                false,
            )?),
            Token::AT => {
                let decorators = self.parse_decorators(context, scope)?;
                if self.lexer.token != Token::CLASS {
                    return Err(self.error_here(ErrorMessage::MisplacedDecorator));
                }
                ExportDefaultKind::Class(self.parse_class_declaration(
                    context,
                    scope,
                    declaration_start,
                    decorators,
                    false,
                )?)
            }
            _ => {
                let expression = self.parse_assignment_expression(context, scope)?;
                self.consume_semicolon(context)?;
                ExportDefaultKind::Expression(expression)
            }
        };
        Ok(Statement::ExportDefault(Box::new(ExportDefaultDeclaration {
            declaration,
            span: self.finish(start),
        })))
    }

    fn is_async_function(&mut self, context: Context) -> ParseResult<bool> {
        let (next, newline) = self.peek(context)?;
        Ok(next == Token::FUNCTION && !newline)
    }

    /// `export * from "m"` and `export * as name from "m"`.
    fn parse_export_all(&mut self, context: Context, start: Marker) -> ParseResult<Statement> {
        self.next(context)?;
        let exported = if self.lexer.token == Token::AS {
            self.next(context)?;
            let name_start = self.start();
            let exported = self.parse_module_export_name(context)?;
            self.scopes
                .declare_export(exported.name())
                .map_err(|message| self.error_at(name_start, message))?;
            Some(exported)
        } else {
            None
        };
        self.expect_contextual(context, Token::FROM)?;
        let source = self.parse_module_source(context)?;
        let attributes = self.parse_import_attributes(context)?;
        self.consume_semicolon(context)?;
        Ok(Statement::ExportAll(ExportAllDeclaration {
            exported,
            source,
            attributes,
            span: self.finish(start),
        }))
    }

    /// `export { a, b as c }` with an optional `from "m"`.
    fn parse_export_named(&mut self, context: Context, start: Marker) -> ParseResult<Statement> {
        self.next(context)?;
        let mut specifiers = Vec::new();
        let mut starts = Vec::new();
        while self.lexer.token != Token::RIGHT_BRACE {
            let specifier_start = self.start();
            let local = self.parse_module_export_name(context)?;
            let exported = if self.lexer.token == Token::AS {
                self.next(context)?;
                self.parse_module_export_name(context)?
            } else {
                local.clone()
            };
            specifiers.push(ExportSpecifier {
                local,
                exported,
                span: self.finish(specifier_start),
            });
            starts.push(specifier_start);
            if self.lexer.token != Token::RIGHT_BRACE {
                self.expect(context, Token::COMMA)?;
            }
        }
        self.next(context | Context::ALLOW_REGEXP)?;

        let mut source = None;
        let mut attributes = Vec::new();
        if self.lexer.token == Token::FROM {
            self.next(context)?;
            source = Some(self.parse_module_source(context)?);
            attributes = self.parse_import_attributes(context)?;
        } else {
            for (specifier, at) in specifiers.iter().zip(&starts) {
                match &specifier.local {
                    ModuleExportName::Literal(_) => {
                        return Err(self.error_at(*at, ErrorMessage::StringExportLocal));
                    }
                    ModuleExportName::Identifier(id) => {
                        let token = keyword(&id.name).unwrap_or(Token::IDENTIFIER);
                        self.check_identifier_reference(context, token, &id.name, *at)?;
                        self.scopes.record_exported_binding(&id.name, at.position());
                    }
                }
            }
        }
        for (specifier, at) in specifiers.iter().zip(&starts) {
            self.scopes
                .declare_export(specifier.exported.name())
                .map_err(|message| self.error_at(*at, message))?;
        }
        self.consume_semicolon(context)?;
        Ok(Statement::ExportNamed(Box::new(ExportNamedDeclaration {
            declaration: None,
            specifiers,
            source,
            attributes,
            span: self.finish(start),
        })))
    }

    /// The declaration after `export`; every name it binds is exported.
    fn parse_exported_declaration(&mut self, context: Context, scope: ScopeId) -> ParseResult<Statement> {
        let start = self.start();
        let token = self.lexer.token;
        let declaration = match token {
            Token::VAR | Token::LET | Token::CONST => {
                let kind = match self.lexer.token {
                    Token::VAR => VariableKind::Var,
                    Token::LET => VariableKind::Let,
                    _ => VariableKind::Const,
                };
                let declaration = self.parse_variable_declaration(context, scope, kind, false)?;
                self.consume_semicolon(context)?;
                Statement::Variable(declaration)
            }
            Token::FUNCTION => {
                Statement::Function(Box::new(self.parse_function_declaration(context, scope, start, false, true)?))
            }
            Token::ASYNC if self.is_async_function(context)? => {
                self.next(context)?;
                Statement::Function(Box::new(self.parse_function_declaration(context, scope, start, true, true)?))
            }
            Token::CLASS => {
                Statement::Class(Box::new(self.parse_class_declaration(context, scope, start, Vec::new(), true)?))
            }
            Token::AT => {
                let decorators = self.parse_decorators(context, scope)?;
                if self.lexer.token != Token::CLASS {
                    return Err(self.error_here(ErrorMessage::MisplacedDecorator));
                }
                Statement::Class(Box::new(self.parse_class_declaration(context, scope, start, decorators, true)?))
            }
            _ => return Err(self.unexpected()),
        };

        let mut names = Vec::new();
        match &declaration {
            Statement::Variable(variable) => {
                for declarator in &variable.declarations {
                    declarator.id.bound_names(&mut |id: &Identifier| names.push(id.name.clone()));
                }
            }
            Statement::Function(function) => names.extend(function.id.as_ref().map(|id| id.name.clone())),
            Statement::Class(class) => names.extend(class.id.as_ref().map(|id| id.name.clone())),
            _ => {}
        }
        for name in names {
            self.scopes
                .declare_export(&name)
                .map_err(|message| self.error_at(start, message))?;
        }
        Ok(declaration)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::error::ErrorMessage;
    use crate::options::Options;
    use crate::parser::Parser;

    fn module(source: &str) -> Result<Vec<Statement>, ErrorMessage> {
        Parser::new(source, &Options::module())
            .parse_program()
            .map(|p| p.body)
            .map_err(|e| e.message)
    }

    fn script(source: &str) -> Result<Vec<Statement>, ErrorMessage> {
        Parser::new(source, &Options::default())
            .parse_program()
            .map(|p| p.body)
            .map_err(|e| e.message)
    }

    #[test]
    fn test_import_forms() {
        let body = module(
            "import a from 'a'; import * as b from 'b'; import c, { d, e as f, 'g h' as i } from 'c'; import 'side'; import j, * as k from 'j';",
        )
        .unwrap();
        assert_eq!(body.len(), 5);
        match &body[2] {
            Statement::Import(import) => {
                assert_eq!(import.specifiers.len(), 4);
                match &import.specifiers[3] {
                    ImportSpecifierKind::Named(named) => {
                        assert_eq!(named.imported.name(), "g h");
                        assert_eq!(named.local.name, "i");
                    }
                    other => panic!("unexpected {:?}", other),
                }
            }
            other => panic!("unexpected {:?}", other),
        }
        match &body[3] {
            Statement::Import(import) => assert!(import.specifiers.is_empty()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_import_bindings_are_lexical() {
        assert_eq!(
            module("import a from 'a'; let a;").unwrap_err(),
            ErrorMessage::DuplicateBinding("a".into())
        );
        assert_eq!(
            module("import { a, a } from 'a';").unwrap_err(),
            ErrorMessage::DuplicateBinding("a".into())
        );
        assert_eq!(
            module("import { default } from 'a';").unwrap_err(),
            ErrorMessage::ReservedWord("default".into())
        );
        assert!(module("import { default as x } from 'a';").is_ok());
        assert!(module("import { 'x' } from 'a';").is_err());
    }

    #[test]
    fn test_import_attributes() {
        match module("import j from './a.json' with { type: 'json' };").unwrap().remove(0) {
            Statement::Import(import) => {
                assert_eq!(import.attributes.len(), 1);
                assert_eq!(import.attributes[0].key.name(), "type");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(module("import j from 'a' with { type: json };").is_err());
    }

    #[test]
    fn test_export_forms() {
        let body = module(
            "export var a = 1, { b } = {}; export function f() {} export class C {} export { a as x, f as 'y' }; export * from 'm'; export * as ns from 'n'; export { z } from 'z';",
        )
        .unwrap();
        assert_eq!(body.len(), 7);
        match &body[0] {
            Statement::ExportNamed(export) => assert!(matches!(export.declaration, Some(Statement::Variable(_)))),
            other => panic!("unexpected {:?}", other),
        }
        match &body[5] {
            Statement::ExportAll(export) => assert_eq!(export.exported.as_ref().map(|e| e.name()), Some("ns")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_export_default_forms() {
        assert!(module("export default function () {}").is_ok());
        assert!(module("export default async function () {}").is_ok());
        assert!(module("export default class {}").is_ok());
        assert!(module("export default async () => 1;").is_ok());
        assert!(module("export async function g() {}").is_ok());
        match module("export default function f() {} f();").unwrap().remove(0) {
            Statement::ExportDefault(export) => match &export.declaration {
                ExportDefaultKind::Function(function) => assert!(function.id.is_some()),
                other => panic!("unexpected {:?}", other),
            },
            other => panic!("unexpected {:?}", other),
        }
        match module("export default (1 + 2);").unwrap().remove(0) {
            Statement::ExportDefault(export) => {
                assert!(matches!(export.declaration, ExportDefaultKind::Expression(_)))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_exports() {
        assert_eq!(
            module("export default 1; export default 2;").unwrap_err(),
            ErrorMessage::DuplicateExport("default".into())
        );
        assert_eq!(
            module("var a, b; export { a as x, b as x };").unwrap_err(),
            ErrorMessage::DuplicateExport("x".into())
        );
        assert_eq!(
            module("export var a; export function a() {}").unwrap_err(),
            ErrorMessage::DuplicateBinding("a".into())
        );
        assert_eq!(
            module("export let a; let b; export { b as a };").unwrap_err(),
            ErrorMessage::DuplicateExport("a".into())
        );
    }

    #[test]
    fn test_exported_bindings_must_exist() {
        assert_eq!(
            module("export { missing };").unwrap_err(),
            ErrorMessage::UndeclaredExport("missing".into())
        );
        assert!(module("export { later }; var later;").is_ok());
        assert!(module("export { outer } from 'm';").is_ok());
        assert_eq!(
            module("export { 'a' };").unwrap_err(),
            ErrorMessage::StringExportLocal
        );
        assert!(module("export { 'a' } from 'm';").is_ok());
        assert!(module("export { if };").is_err());
    }

    #[test]
    fn test_malformed_export_name() {
        assert_eq!(
            module(r"export * as '\uD800' from 'm';").unwrap_err(),
            ErrorMessage::MalformedExportName
        );
        assert!(module("export * as '\u{FFFD}' from 'm';").is_ok());
    }

    #[test]
    fn test_module_syntax_placement() {
        assert_eq!(
            script("import a from 'a';").unwrap_err(),
            ErrorMessage::ModuleSyntaxOutsideModule
        );
        assert_eq!(
            module("{ export var a; }").unwrap_err(),
            ErrorMessage::ModuleSyntaxNotTopLevel
        );
        assert!(module("import('a'); import.meta.url;").is_ok());
        assert!(script("import('a');").is_ok());
    }

    #[test]
    fn test_regexp_after_module_source() {
        let body = module("import 'a'\n/x/g.test(s)").unwrap();
        assert_eq!(body.len(), 2);
    }
}
