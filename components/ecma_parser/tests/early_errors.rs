//! Early error coverage
//!
//! Rejected programs are checked by message or by category; each group is
//! paired with near-miss programs that must still parse.

use core_types::ErrorCategory;
use ecma_parser::{parse_module, parse_script, ErrorMessage, Options};

fn script_err(source: &str) -> ErrorMessage {
    match parse_script(source, &Options::default()) {
        Ok(_) => panic!("expected an error for {:?}", source),
        Err(err) => err.message,
    }
}

fn module_err(source: &str) -> ErrorMessage {
    match parse_module(source, &Options::default()) {
        Ok(_) => panic!("expected an error for {:?}", source),
        Err(err) => err.message,
    }
}

fn assert_script_ok(sources: &[&str]) {
    for source in sources {
        if let Err(err) = parse_script(source, &Options::default()) {
            panic!("{:?} should parse, got {}", source, err);
        }
    }
}

fn assert_category(sources: &[&str], category: ErrorCategory, module: bool) {
    for source in sources {
        let message = if module { module_err(source) } else { script_err(source) };
        assert_eq!(message.category(), category, "{:?}: {}", source, message);
    }
}

// =============================================================================
// Lexical
// =============================================================================

#[test]
fn test_lexical_errors() {
    assert_category(
        &[
            "'abc",
            "`abc",
            "/* abc",
            "/abc",
            "'\\x4'",
            "'\\u{110000}'",
            "/a/gg",
            "/a/uv",
            "a\\u0020b",
            "#",
        ],
        ErrorCategory::Lexical,
        false,
    );
}

#[test]
fn test_html_comments_rejected_in_modules() {
    let web = Options {
        web_compat: true,
        ..Options::default()
    };
    for source in ["<!-- comment\nx", "x\n--> comment"] {
        assert!(parse_script(source, &web).is_ok(), "{:?}", source);
    }
    assert!(parse_script("<!-- comment\nx", &Options::default()).is_err());
    assert_eq!(module_err("<!-- comment\nx"), ErrorMessage::HtmlCommentInModule);
}

// =============================================================================
// Numeric
// =============================================================================

#[test]
fn test_numeric_errors() {
    assert_category(
        &["1e", "0x", "0b2", "3in []", "1.5n", "1__0", "1_", "0_1"],
        ErrorCategory::Numeric,
        false,
    );
}

#[test]
fn test_numeric_accepted() {
    assert_script_ok(&["1_000", "0xF_F", "0b1010n", ".5e-3", "1.e2", "09"]);
}

// =============================================================================
// Bindings
// =============================================================================

#[test]
fn test_duplicate_lexical_bindings() {
    for source in [
        "let a; let a;",
        "let a; var a;",
        "var a; let a;",
        "const a = 1; function a() {}",
        "class A {} class A {}",
        "{ let a; { var a; } }",
        "try {} catch (e) { let e; }",
        "for (let i of []) { var i; }",
        "function f(a) { let a; }",
        "switch (0) { case 1: let a; case 2: let a; }",
    ] {
        assert!(
            matches!(script_err(source), ErrorMessage::DuplicateBinding(_)),
            "{:?}",
            source
        );
    }
}

#[test]
fn test_allowed_redeclarations() {
    assert_script_ok(&[
        "var a; var a;",
        "function f() {} var f;",
        "function f() {} function f() {}",
        "{ let a; } { let a; }",
        "let a; { let a; }",
        "function f(a) { var a; }",
        "let x; () => { var x; }",
    ]);
}

#[test]
fn test_block_function_redeclaration() {
    let web = Options {
        web_compat: true,
        ..Options::default()
    };
    assert!(parse_script("{ function f() {} function f() {} }", &web).is_ok());
    for source in [
        "{ async function f() {} function f() {} }",
        "{ function* f() {} function f() {} }",
        "{ function f() {} async function* f() {} }",
    ] {
        assert!(
            matches!(
                parse_script(source, &web).map_err(|err| err.message),
                Err(ErrorMessage::DuplicateBinding(_))
            ),
            "{:?}",
            source
        );
    }
    assert!(parse_script("try {} catch (e) { var e; }", &web).is_ok());
    assert!(matches!(
        script_err("{ function f() {} function f() {} }"),
        ErrorMessage::DuplicateBinding(_)
    ));
    assert!(matches!(
        parse_module("{ function f() {} function f() {} }", &web).map_err(|err| err.message),
        Err(ErrorMessage::DuplicateBinding(_))
    ));
}

#[test]
fn test_duplicate_parameters() {
    assert_script_ok(&["function f(a, a) {}"]);
    for source in [
        "'use strict'; function f(a, a) {}",
        "function f(a, a) { 'use strict' }",
        "(a, a) => 1",
        "function f(a, [a]) {}",
        "function f(a, a = 1) {}",
    ] {
        assert!(
            matches!(script_err(source), ErrorMessage::DuplicateParameter(_)),
            "{:?}",
            source
        );
    }
}

#[test]
fn test_let_as_lexical_name() {
    assert_eq!(script_err("let let = 1;"), ErrorMessage::LetAsLexicalName);
    assert_eq!(script_err("const [let] = [];"), ErrorMessage::LetAsLexicalName);
    assert_script_ok(&["var let = 1;", "let = 1;"]);
}

// =============================================================================
// Strict mode
// =============================================================================

#[test]
fn test_strict_mode_errors() {
    assert_category(
        &[
            "'use strict'; with (a) {}",
            "'use strict'; delete x;",
            "'use strict'; var eval;",
            "'use strict'; arguments = 1;",
            "'use strict'; 010",
            "'use strict'; 08",
            "'use strict'; '\\01'",
            "'use strict'; '\\8'",
            "'use strict'; var implements;",
            "function f(a = 1) { 'use strict' }",
            "function f() { 'use strict'; var static; }",
        ],
        ErrorCategory::StrictMode,
        false,
    );
}

#[test]
fn test_directive_applies_retroactively() {
    assert_eq!(script_err("function eval() { 'use strict' }"), ErrorMessage::StrictEvalArguments);
    assert_eq!(script_err("'\\07'; 'use strict';"), ErrorMessage::StrictOctalEscape);
}

#[test]
fn test_sloppy_equivalents_accepted() {
    assert_script_ok(&[
        "with (a) {}",
        "delete x;",
        "var eval;",
        "arguments = 1;",
        "010",
        "'\\01'",
        "var implements;",
        "function f(a = 1) { 'use\\u0020strict' }",
    ]);
}

// =============================================================================
// Statements
// =============================================================================

#[test]
fn test_control_flow_errors() {
    assert_eq!(script_err("return;"), ErrorMessage::IllegalReturn);
    assert_eq!(script_err("break;"), ErrorMessage::IllegalBreak);
    assert_eq!(script_err("continue;"), ErrorMessage::IllegalContinue);
    assert_eq!(script_err("while (1) break x;"), ErrorMessage::UnknownLabel("x".into()));
    assert_eq!(script_err("x: x: ;"), ErrorMessage::DuplicateLabel("x".into()));
    assert_eq!(
        script_err("x: { while (1) continue x; }"),
        ErrorMessage::InvalidContinueLabel("x".into())
    );
    assert_eq!(script_err("throw\nx;"), ErrorMessage::LineBreakAfterThrow);
    assert_eq!(script_err("try {}"), ErrorMessage::MissingCatchOrFinally);
    assert_eq!(
        script_err("switch (a) { default: default: }"),
        ErrorMessage::MultipleDefaults
    );
}

#[test]
fn test_labels_accepted() {
    assert_script_ok(&[
        "x: { break x; }",
        "x: while (1) { continue x; }",
        "x: y: while (1) continue x;",
        "x: ; x: ;",
        "a: { b: { break a; } }",
    ]);
}

#[test]
fn test_single_statement_contexts() {
    assert_eq!(script_err("if (a) let x;"), ErrorMessage::LexicalInSingleStatement);
    assert_eq!(script_err("while (a) const x = 1;"), ErrorMessage::LexicalInSingleStatement);
    assert_eq!(script_err("while (a) function f() {}"), ErrorMessage::FunctionInSingleStatement);
    assert_eq!(script_err("if (a) let [b] = c;"), ErrorMessage::LetBracketStart);
    assert_script_ok(&["if (a) { let x; }", "while (a) { function f() {} }"]);
}

#[test]
fn test_for_statement_heads() {
    assert!(matches!(
        script_err("for (let a = 1 of []) ;"),
        ErrorMessage::ForInitializer(_)
    ));
    assert!(matches!(
        script_err("for (let a, b of []) ;"),
        ErrorMessage::ForMultipleBindings(_)
    ));
    assert_eq!(script_err("for (async of []) ;"), ErrorMessage::ForOfAsync);
    assert_eq!(script_err("for (let.x of []) ;"), ErrorMessage::ForOfLet);
    assert!(matches!(script_err("for (1 of []) ;"), ErrorMessage::InvalidForLhs(_)));
    assert!(matches!(script_err("const a;"), ErrorMessage::MissingInitializer(_)));
    assert_script_ok(&[
        "for (var a in {}) ;",
        "for (let in {}) ;",
        "for (const a of []) ;",
        "for (x.y of []) ;",
        "for ([a, b] of []) ;",
    ]);
}

#[test]
fn test_for_await() {
    assert_eq!(script_err("for await (x of y) ;"), ErrorMessage::ForAwaitOutsideAsync);
    assert!(parse_module("for await (x of y) ;", &Options::default()).is_ok());
    assert_script_ok(&["async function f() { for await (x of y) ; }"]);
}

// =============================================================================
// Expressions
// =============================================================================

#[test]
fn test_assignment_targets() {
    assert_eq!(script_err("1 = 2"), ErrorMessage::InvalidLhs);
    assert_eq!(script_err("a + b = c"), ErrorMessage::InvalidLhs);
    assert!(matches!(script_err("++a()"), ErrorMessage::InvalidUpdateTarget(_)));
    assert!(matches!(script_err("1++"), ErrorMessage::InvalidUpdateTarget(_)));
    assert_eq!(script_err("[a + b] = c"), ErrorMessage::InvalidDestructuringTarget);
    assert_eq!(script_err("({a = 1})"), ErrorMessage::InvalidShorthandInit);
    assert_eq!(script_err("[...a, b] = c"), ErrorMessage::RestNotLast);
    assert_script_ok(&[
        "a = b = c",
        "a.b = 1",
        "a[0] += 1",
        "[a, ...b] = c",
        "({a, b: [c], ...d} = e)",
        "({a = 1} = b)",
        "(a) = 1",
        "[(a)] = 1",
    ]);
}

#[test]
fn test_duplicate_proto() {
    assert_eq!(
        script_err("({ __proto__: a, __proto__: b })"),
        ErrorMessage::DuplicateProto
    );
    assert_script_ok(&[
        "({ __proto__: a, '__proto__': b } = c)",
        "({ __proto__: a, ['__proto__']: b })",
        "({ __proto__: a, __proto__() {} })",
    ]);
}

#[test]
fn test_operator_mixing() {
    assert_eq!(script_err("a ?? b || c"), ErrorMessage::MixedCoalesce);
    assert_eq!(script_err("a && b ?? c"), ErrorMessage::MixedCoalesce);
    assert_eq!(script_err("-a ** 2"), ErrorMessage::UnaryBeforeExponent);
    assert_script_ok(&["(a ?? b) || c", "a ?? (b && c)", "(-a) ** 2", "a ** -b"]);
}

#[test]
fn test_optional_chains() {
    assert_eq!(script_err("a?.b`c`"), ErrorMessage::OptionalChainTemplate);
    assert_eq!(script_err("new a?.b()"), ErrorMessage::OptionalChainNew);
    assert_eq!(script_err("a?.b = 1"), ErrorMessage::InvalidLhs);
    assert_script_ok(&["a?.b.c(d)?.[e]", "a?.(b)", "a ?.5 : 1"]);
}

#[test]
fn test_arrow_functions() {
    assert_eq!(script_err("a\n=> 1"), ErrorMessage::LineBreakBeforeArrow);
    assert_eq!(script_err("(a, 1) => 1"), ErrorMessage::InvalidArrowParams);
    assert_eq!(script_err("() => {}()"), ErrorMessage::InvalidArrowBodyContinuation);
    assert_script_ok(&[
        "(a, [b], {c}, ...d) => 1",
        "async (a) => await a",
        "async a => a",
        "() => ({})",
        "a => b => c",
        "(a = b => c) => d",
        "() => {}\n(1)",
    ]);
}

#[test]
fn test_yield_and_await_contexts() {
    assert_eq!(
        script_err("function* g(a = yield) {}"),
        ErrorMessage::YieldInParameter
    );
    assert_eq!(
        script_err("async function f(a = await 1) {}"),
        ErrorMessage::AwaitInParameter
    );
    assert_eq!(
        script_err("async function f() { function g() { await x; } }"),
        ErrorMessage::AwaitOutsideAsync
    );
    assert_script_ok(&[
        "function* g() { yield; yield 1; yield* a; }",
        "async function f() { await a; }",
        "var yield, await;",
        "function f() { var yield; }",
    ]);
}

#[test]
fn test_new_target_and_import_meta() {
    assert_eq!(script_err("new.target"), ErrorMessage::InvalidNewTarget);
    assert_eq!(script_err("import.meta"), ErrorMessage::ImportMetaOutsideModule);
    assert!(parse_module("import.meta.url", &Options::default()).is_ok());
    assert_script_ok(&["function f() { new.target }", "function f() { () => new.target }"]);
}

// =============================================================================
// Classes
// =============================================================================

#[test]
fn test_class_errors() {
    assert_category(
        &[
            "class A { constructor() {} constructor() {} }",
            "class A { *constructor() {} }",
            "class A { get constructor() {} }",
            "class A { static prototype() {} }",
            "class A { constructor = 1 }",
            "class A { #constructor() {} }",
            "class A { #a; #a }",
            "class A { m() { this.#b } }",
            "class A { #a; m() { delete this.#a } }",
            "class A { constructor() { super() } }",
            "class A { a = arguments }",
        ],
        ErrorCategory::Class,
        false,
    );
}

#[test]
fn test_class_accepted() {
    assert_script_ok(&[
        "class A extends B { constructor() { super() } }",
        "class A { static constructor() {} }",
        "class A { 'constructor'() {} }",
        "class A { get #a() {} set #a(v) {} }",
        "class A { #a; m() { class B { n() { this.#a } } } }",
        "class A { m() { super.x } }",
        "class A { static { var await1; } }",
    ]);
}

// =============================================================================
// Modules
// =============================================================================

#[test]
fn test_module_errors() {
    assert_category(
        &[
            "export { a }",
            "let a; export { a, a }",
            "export default 1; export default 2;",
            "export { 'a' }",
        ],
        ErrorCategory::Module,
        true,
    );
    assert_eq!(script_err("import a from 'a';"), ErrorMessage::ModuleSyntaxOutsideModule);
    assert_eq!(module_err("{ export {}; }"), ErrorMessage::ModuleSyntaxNotTopLevel);
}

#[test]
fn test_module_accepted() {
    for source in [
        "import a, { b as c } from 'x'; export { a, c as d };",
        "import * as ns from 'x'; export { ns };",
        "export * from 'x'; export * as y from 'x';",
        "export { default } from 'x';",
        "export { a as 'string name' }; var a;",
        "export default function () {}",
        "export default class {}",
        "export const a = 1, { b } = {};",
        "import 'side-effect';",
        "import json from './a.json' with { type: 'json' };",
        "export { f }; function f() {}",
    ] {
        if let Err(err) = parse_module(source, &Options::default()) {
            panic!("{:?} should parse, got {}", source, err);
        }
    }
}
