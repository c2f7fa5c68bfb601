//! ESTree syntax tree.
//!
//! Every node type is a struct whose serde representation is the ESTree JSON
//! object of the same name: serializing a [`Program`] with `serde_json`
//! yields what ESTree consumers expect. Position information lives in a
//! flattened [`Span`] whose fields are only present when the parser was
//! asked for ranges or locations.

use core_types::SourceLocation;
use num_bigint::BigInt;
use serde::ser::{Serialize as SerializeTrait, SerializeMap, Serializer};
use serde::Serialize;

use crate::options::SourceType;

/// Optional position fields shared by all nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Byte offset of the first character
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    /// Byte offset one past the last character
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
    /// `[start, end]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[usize; 2]>,
    /// Line/column location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc: Option<SourceLocation>,
}

impl Span {
    /// True when no position field is populated.
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.range.is_none() && self.loc.is_none()
    }
}

// ============================================================================
// Program
// ============================================================================

/// Root node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct Program {
    /// Goal the source was parsed with
    pub source_type: SourceType,
    /// Statements and module items
    pub body: Vec<Statement>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

// ============================================================================
// Statements
// ============================================================================

/// Any statement, declaration or module item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum Statement {
    Expression(ExpressionStatement),
    Block(BlockStatement),
    Empty(EmptyStatement),
    Debugger(DebuggerStatement),
    With(Box<WithStatement>),
    Return(ReturnStatement),
    Labeled(Box<LabeledStatement>),
    Break(BreakStatement),
    Continue(ContinueStatement),
    If(Box<IfStatement>),
    Switch(SwitchStatement),
    Throw(ThrowStatement),
    Try(Box<TryStatement>),
    While(Box<WhileStatement>),
    DoWhile(Box<DoWhileStatement>),
    For(Box<ForStatement>),
    ForIn(Box<ForInStatement>),
    ForOf(Box<ForOfStatement>),
    Function(Box<FunctionDeclaration>),
    Variable(VariableDeclaration),
    Class(Box<ClassDeclaration>),
    Import(ImportDeclaration),
    ExportNamed(Box<ExportNamedDeclaration>),
    ExportDefault(Box<ExportDefaultDeclaration>),
    ExportAll(ExportAllDeclaration),
}

/// `expr;`, or a directive when `directive` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ExpressionStatement {
    /// The expression
    pub expression: Expression,
    /// Raw directive text without quotes, for prologue strings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directive: Option<String>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `{ ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct BlockStatement {
    /// Statements in the block
    pub body: Vec<Statement>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `;`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct EmptyStatement {
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `debugger;`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct DebuggerStatement {
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `with (object) body`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct WithStatement {
    /// Scope object
    pub object: Expression,
    /// Body
    pub body: Statement,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `return argument;`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ReturnStatement {
    /// Returned value
    pub argument: Option<Expression>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `label: body`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct LabeledStatement {
    /// Label
    pub label: Identifier,
    /// Labelled statement
    pub body: Statement,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `break label;`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct BreakStatement {
    /// Target label
    pub label: Option<Identifier>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `continue label;`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ContinueStatement {
    /// Target label
    pub label: Option<Identifier>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `if (test) consequent else alternate`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct IfStatement {
    /// Condition
    pub test: Expression,
    /// Then branch
    pub consequent: Statement,
    /// Else branch
    pub alternate: Option<Statement>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `switch (discriminant) { cases }`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct SwitchStatement {
    /// Value switched on
    pub discriminant: Expression,
    /// Case clauses
    pub cases: Vec<SwitchCase>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `case test: consequent` or `default: consequent`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct SwitchCase {
    /// `None` for `default`
    pub test: Option<Expression>,
    /// Statements of the clause
    pub consequent: Vec<Statement>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `throw argument;`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ThrowStatement {
    /// Thrown value
    pub argument: Expression,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `try block catch finally`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct TryStatement {
    /// Protected block
    pub block: BlockStatement,
    /// Catch clause
    pub handler: Option<CatchClause>,
    /// Finally block
    pub finalizer: Option<BlockStatement>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `catch (param) body`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct CatchClause {
    /// Caught value binding, absent for `catch {}`
    pub param: Option<Pattern>,
    /// Handler body
    pub body: BlockStatement,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `while (test) body`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct WhileStatement {
    /// Condition
    pub test: Expression,
    /// Loop body
    pub body: Statement,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `do body while (test)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct DoWhileStatement {
    /// Loop body
    pub body: Statement,
    /// Condition
    pub test: Expression,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `for (init; test; update) body`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ForStatement {
    /// Initializer
    pub init: Option<ForInit>,
    /// Condition
    pub test: Option<Expression>,
    /// Update
    pub update: Option<Expression>,
    /// Loop body
    pub body: Statement,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// Initializer of a `for` statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum ForInit {
    Variable(VariableDeclaration),
    Expression(Expression),
}

/// Left side of `for-in` / `for-of`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum ForHead {
    Variable(VariableDeclaration),
    Pattern(Pattern),
}

/// `for (left in right) body`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ForInStatement {
    /// Binding or target
    pub left: ForHead,
    /// Object enumerated
    pub right: Expression,
    /// Loop body
    pub body: Statement,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `for (left of right) body` and `for await`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ForOfStatement {
    /// Binding or target
    pub left: ForHead,
    /// Iterable
    pub right: Expression,
    /// Loop body
    pub body: Statement,
    /// `for await`
    #[serde(rename = "await")]
    pub is_await: bool,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `var`, `let` or `const`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    /// Keyword spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

/// `kind a = 1, b`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct VariableDeclaration {
    /// Declarators
    pub declarations: Vec<VariableDeclarator>,
    /// Declaration keyword
    pub kind: VariableKind,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `id = init`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct VariableDeclarator {
    /// Bound pattern
    pub id: Pattern,
    /// Initial value
    pub init: Option<Expression>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

// ============================================================================
// Functions and classes
// ============================================================================

/// `function id(params) { body }` in statement position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct FunctionDeclaration {
    /// Name, absent only for `export default function () {}`
    pub id: Option<Identifier>,
    /// Formal parameters
    pub params: Vec<Pattern>,
    /// Body
    pub body: BlockStatement,
    /// `async`
    #[serde(rename = "async")]
    pub is_async: bool,
    /// `function*`
    pub generator: bool,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `function id(params) { body }` in expression position, and method values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct FunctionExpression {
    /// Optional name
    pub id: Option<Identifier>,
    /// Formal parameters
    pub params: Vec<Pattern>,
    /// Body
    pub body: BlockStatement,
    /// `async`
    #[serde(rename = "async")]
    pub is_async: bool,
    /// `function*`
    pub generator: bool,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `(params) => body`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ArrowFunctionExpression {
    /// Formal parameters
    pub params: Vec<Pattern>,
    /// Block or concise body
    pub body: ArrowBody,
    /// `async`
    #[serde(rename = "async")]
    pub is_async: bool,
    /// Concise body
    pub expression: bool,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// Body of an arrow function.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum ArrowBody {
    Block(BlockStatement),
    Expression(Expression),
}

/// `class id extends superClass { body }` in statement position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ClassDeclaration {
    /// Name, absent only for `export default class {}`
    pub id: Option<Identifier>,
    /// Heritage
    pub super_class: Option<Expression>,
    /// Members
    pub body: ClassBody,
    /// Decorators
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub decorators: Vec<Decorator>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `class id extends superClass { body }` in expression position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ClassExpression {
    /// Optional name
    pub id: Option<Identifier>,
    /// Heritage
    pub super_class: Option<Expression>,
    /// Members
    pub body: ClassBody,
    /// Decorators
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub decorators: Vec<Decorator>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `{ members }` of a class.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ClassBody {
    /// Members in source order
    pub body: Vec<ClassElement>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// A class member.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum ClassElement {
    Method(MethodDefinition),
    Property(PropertyDefinition),
    Accessor(AccessorProperty),
    StaticBlock(StaticBlock),
}

/// Kind of a class method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

/// A class method, getter, setter or constructor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct MethodDefinition {
    /// Name
    pub key: PropertyKey,
    /// Function
    pub value: FunctionExpression,
    /// Method kind
    pub kind: MethodKind,
    /// `[key]`
    pub computed: bool,
    /// `static`
    #[serde(rename = "static")]
    pub is_static: bool,
    /// Decorators
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub decorators: Vec<Decorator>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// A class field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct PropertyDefinition {
    /// Name
    pub key: PropertyKey,
    /// Initializer
    pub value: Option<Expression>,
    /// `[key]`
    pub computed: bool,
    /// `static`
    #[serde(rename = "static")]
    pub is_static: bool,
    /// Decorators
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub decorators: Vec<Decorator>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `accessor x = 1` auto-accessor field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct AccessorProperty {
    /// Name
    pub key: PropertyKey,
    /// Initializer
    pub value: Option<Expression>,
    /// `[key]`
    pub computed: bool,
    /// `static`
    #[serde(rename = "static")]
    pub is_static: bool,
    /// Decorators
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub decorators: Vec<Decorator>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `static { body }`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct StaticBlock {
    /// Statements
    pub body: Vec<Statement>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `@expression`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Decorator {
    /// Decorator expression
    pub expression: Expression,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

// ============================================================================
// Expressions
// ============================================================================

/// Any expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum Expression {
    Identifier(Identifier),
    Literal(Box<Literal>),
    This(ThisExpression),
    Super(Super),
    Array(ArrayExpression),
    Object(ObjectExpression),
    Function(Box<FunctionExpression>),
    Arrow(Box<ArrowFunctionExpression>),
    Class(Box<ClassExpression>),
    Template(TemplateLiteral),
    TaggedTemplate(Box<TaggedTemplateExpression>),
    Member(Box<MemberExpression>),
    MetaProperty(Box<MetaProperty>),
    New(Box<NewExpression>),
    Call(Box<CallExpression>),
    Chain(Box<ChainExpression>),
    Update(Box<UpdateExpression>),
    Unary(Box<UnaryExpression>),
    Await(Box<AwaitExpression>),
    Binary(Box<BinaryExpression>),
    Logical(Box<LogicalExpression>),
    Conditional(Box<ConditionalExpression>),
    Yield(Box<YieldExpression>),
    Assignment(Box<AssignmentExpression>),
    Sequence(SequenceExpression),
    Import(Box<ImportExpression>),
    PrivateIdentifier(PrivateIdentifier),
    Parenthesized(Box<ParenthesizedExpression>),
    JsxElement(Box<JsxElement>),
    JsxFragment(Box<JsxFragment>),
}

impl Expression {
    /// The node's position fields.
    pub fn span(&self) -> &Span {
        match self {
            Expression::Identifier(n) => &n.span,
            Expression::Literal(n) => &n.span,
            Expression::This(n) => &n.span,
            Expression::Super(n) => &n.span,
            Expression::Array(n) => &n.span,
            Expression::Object(n) => &n.span,
            Expression::Function(n) => &n.span,
            Expression::Arrow(n) => &n.span,
            Expression::Class(n) => &n.span,
            Expression::Template(n) => &n.span,
            Expression::TaggedTemplate(n) => &n.span,
            Expression::Member(n) => &n.span,
            Expression::MetaProperty(n) => &n.span,
            Expression::New(n) => &n.span,
            Expression::Call(n) => &n.span,
            Expression::Chain(n) => &n.span,
            Expression::Update(n) => &n.span,
            Expression::Unary(n) => &n.span,
            Expression::Await(n) => &n.span,
            Expression::Binary(n) => &n.span,
            Expression::Logical(n) => &n.span,
            Expression::Conditional(n) => &n.span,
            Expression::Yield(n) => &n.span,
            Expression::Assignment(n) => &n.span,
            Expression::Sequence(n) => &n.span,
            Expression::Import(n) => &n.span,
            Expression::PrivateIdentifier(n) => &n.span,
            Expression::Parenthesized(n) => &n.span,
            Expression::JsxElement(n) => &n.span,
            Expression::JsxFragment(n) => &n.span,
        }
    }

    /// The identifier name, when this is a plain identifier reference.
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Expression::Identifier(id) => Some(&id.name),
            _ => None,
        }
    }
}

/// A name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub struct Identifier {
    /// Name with escapes decoded
    pub name: String,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `#name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub struct PrivateIdentifier {
    /// Name without the `#`
    pub name: String,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// Value of a [`Literal`].
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// String literal
    String(String),
    /// Numeric literal
    Number(f64),
    /// `true` / `false`
    Boolean(bool),
    /// `null`
    Null,
    /// Regular expression; serialized as `{}`, or `null` when invalid
    RegExp {
        /// Whether the validator accepted the body
        valid: bool,
    },
    /// BigInt literal; serialized as `null`, digits live in `Literal::bigint`
    BigInt(BigInt),
}

impl SerializeTrait for LiteralValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LiteralValue::String(s) => serializer.serialize_str(s),
            LiteralValue::Number(n) => {
                if !n.is_finite() {
                    serializer.serialize_none()
                } else if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 && !(*n == 0.0 && n.is_sign_negative()) {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            LiteralValue::Boolean(b) => serializer.serialize_bool(*b),
            LiteralValue::Null | LiteralValue::BigInt(_) => serializer.serialize_none(),
            LiteralValue::RegExp { valid: true } => serializer.serialize_map(Some(0))?.end(),
            LiteralValue::RegExp { valid: false } => serializer.serialize_none(),
        }
    }
}

/// `regex` member of a regular expression literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegExpLiteral {
    /// Body between the slashes
    pub pattern: String,
    /// Flags after the closing slash
    pub flags: String,
}

/// String, number, boolean, null, regular expression or bigint literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Literal {
    /// Value
    pub value: LiteralValue,
    /// Source text, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    /// Pattern and flags of regular expressions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<RegExpLiteral>,
    /// Decimal digits of bigint literals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bigint: Option<String>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `this`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub struct ThisExpression {
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `super` in `super.x` or `super()`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub struct Super {
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// Element of an array literal or argument list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum ExpressionOrSpread {
    Expression(Expression),
    Spread(SpreadElement),
}

/// `...argument`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct SpreadElement {
    /// Spread value
    pub argument: Expression,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `[a, , ...b]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ArrayExpression {
    /// Elements, `None` for holes
    pub elements: Vec<Option<ExpressionOrSpread>>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `{ a, b: c, ...d }`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ObjectExpression {
    /// Members
    pub properties: Vec<ObjectMember>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// Member of an object literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum ObjectMember {
    Property(Property),
    Spread(SpreadElement),
}

/// Key of a property or class member.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum PropertyKey {
    Identifier(Identifier),
    Literal(Box<Literal>),
    PrivateIdentifier(PrivateIdentifier),
    Computed(Expression),
}

impl PropertyKey {
    /// The static name of a non-computed key.
    pub fn static_name(&self) -> Option<&str> {
        match self {
            PropertyKey::Identifier(id) => Some(&id.name),
            PropertyKey::Literal(lit) => match &lit.value {
                LiteralValue::String(s) => Some(s),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Kind of an object literal property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum PropertyKind {
    Init,
    Get,
    Set,
}

/// `key: value`, `key() {}`, `get key() {}`, shorthand `key`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Property {
    /// Name
    pub key: PropertyKey,
    /// Value
    pub value: Expression,
    /// Property kind
    pub kind: PropertyKind,
    /// Method shorthand
    pub method: bool,
    /// `{ a }`
    pub shorthand: bool,
    /// `[key]`
    pub computed: bool,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `` `a${b}c` ``
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct TemplateLiteral {
    /// Text parts
    pub quasis: Vec<TemplateElement>,
    /// Substitutions
    pub expressions: Vec<Expression>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// Cooked and raw text of a template part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateValue {
    /// Escapes decoded; `None` for a malformed escape in a tagged template
    pub cooked: Option<String>,
    /// Source text with line terminators normalized
    pub raw: String,
}

/// One text part of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub struct TemplateElement {
    /// Text
    pub value: TemplateValue,
    /// Last part
    pub tail: bool,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `` tag`quasi` ``
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct TaggedTemplateExpression {
    /// Tag function
    pub tag: Expression,
    /// Template
    pub quasi: TemplateLiteral,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `object.property`, `object[property]`, `object?.property`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct MemberExpression {
    /// Object
    pub object: Expression,
    /// Identifier, private name or computed expression
    pub property: Expression,
    /// `[property]`
    pub computed: bool,
    /// `?.`
    pub optional: bool,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `new.target`, `import.meta`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct MetaProperty {
    /// `new` or `import`
    pub meta: Identifier,
    /// `target` or `meta`
    pub property: Identifier,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `new callee(arguments)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct NewExpression {
    /// Constructor
    pub callee: Expression,
    /// Arguments
    pub arguments: Vec<ExpressionOrSpread>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `callee(arguments)`, `callee?.(arguments)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct CallExpression {
    /// Function
    pub callee: Expression,
    /// Arguments
    pub arguments: Vec<ExpressionOrSpread>,
    /// `?.(`
    pub optional: bool,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// Wrapper around an optional chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ChainExpression {
    /// Member or call at the end of the chain
    pub expression: Expression,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `++` / `--`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum UpdateOperator {
    #[serde(rename = "++")]
    Increment,
    #[serde(rename = "--")]
    Decrement,
}

/// `++argument`, `argument--`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct UpdateExpression {
    /// Operator
    pub operator: UpdateOperator,
    /// Target
    pub argument: Expression,
    /// Operator before the argument
    pub prefix: bool,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// Prefix unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum UnaryOperator {
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "!")]
    Not,
    #[serde(rename = "~")]
    BitwiseNot,
    #[serde(rename = "typeof")]
    Typeof,
    #[serde(rename = "void")]
    Void,
    #[serde(rename = "delete")]
    Delete,
}

/// `operator argument`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct UnaryExpression {
    /// Operator
    pub operator: UnaryOperator,
    /// Operand
    pub argument: Expression,
    /// Always true
    pub prefix: bool,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `await argument`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct AwaitExpression {
    /// Awaited value
    pub argument: Expression,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// Binary operators other than the logical ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum BinaryOperator {
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "===")]
    StrictEqual,
    #[serde(rename = "!==")]
    StrictNotEqual,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessThanOrEqual,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
    #[serde(rename = "<<")]
    ShiftLeft,
    #[serde(rename = ">>")]
    ShiftRight,
    #[serde(rename = ">>>")]
    UnsignedShiftRight,
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "%")]
    Modulo,
    #[serde(rename = "**")]
    Exponent,
    #[serde(rename = "|")]
    BitwiseOr,
    #[serde(rename = "^")]
    BitwiseXor,
    #[serde(rename = "&")]
    BitwiseAnd,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "instanceof")]
    Instanceof,
}

/// `left operator right`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct BinaryExpression {
    /// Operator
    pub operator: BinaryOperator,
    /// Left operand; may be a private name for `#x in obj`
    pub left: Expression,
    /// Right operand
    pub right: Expression,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `&&`, `||`, `??`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum LogicalOperator {
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "||")]
    Or,
    #[serde(rename = "??")]
    Coalesce,
}

/// `left && right`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct LogicalExpression {
    /// Operator
    pub operator: LogicalOperator,
    /// Left operand
    pub left: Expression,
    /// Right operand
    pub right: Expression,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `test ? consequent : alternate`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ConditionalExpression {
    /// Condition
    pub test: Expression,
    /// Value when truthy
    pub consequent: Expression,
    /// Value when falsy
    pub alternate: Expression,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `yield argument`, `yield* argument`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct YieldExpression {
    /// Yielded value
    pub argument: Option<Expression>,
    /// `yield*`
    pub delegate: bool,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// Assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum AssignmentOperator {
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "+=")]
    Add,
    #[serde(rename = "-=")]
    Subtract,
    #[serde(rename = "*=")]
    Multiply,
    #[serde(rename = "/=")]
    Divide,
    #[serde(rename = "%=")]
    Modulo,
    #[serde(rename = "**=")]
    Exponent,
    #[serde(rename = "<<=")]
    ShiftLeft,
    #[serde(rename = ">>=")]
    ShiftRight,
    #[serde(rename = ">>>=")]
    UnsignedShiftRight,
    #[serde(rename = "|=")]
    BitwiseOr,
    #[serde(rename = "^=")]
    BitwiseXor,
    #[serde(rename = "&=")]
    BitwiseAnd,
    #[serde(rename = "&&=")]
    LogicalAnd,
    #[serde(rename = "||=")]
    LogicalOr,
    #[serde(rename = "??=")]
    Coalesce,
}

/// `left operator right`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct AssignmentExpression {
    /// Operator
    pub operator: AssignmentOperator,
    /// Target
    pub left: Pattern,
    /// Value
    pub right: Expression,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `a, b, c`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct SequenceExpression {
    /// Expressions, at least two
    pub expressions: Vec<Expression>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `import(source, options)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ImportExpression {
    /// Module specifier
    pub source: Expression,
    /// Import options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Expression>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `(expression)`, kept when parentheses are preserved
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ParenthesizedExpression {
    /// Inner expression
    pub expression: Expression,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

// ============================================================================
// Patterns
// ============================================================================

/// Binding or assignment target.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum Pattern {
    Identifier(Identifier),
    Member(Box<MemberExpression>),
    Object(ObjectPattern),
    Array(ArrayPattern),
    Rest(Box<RestElement>),
    Assignment(Box<AssignmentPattern>),
}

impl Pattern {
    /// True for a plain identifier.
    pub fn is_identifier(&self) -> bool {
        matches!(self, Pattern::Identifier(_))
    }

    /// Calls `f` with every identifier the pattern binds, in source order.
    pub fn bound_names<'a>(&'a self, f: &mut impl FnMut(&'a Identifier)) {
        match self {
            Pattern::Identifier(id) => f(id),
            Pattern::Member(_) => {}
            Pattern::Object(obj) => {
                for prop in &obj.properties {
                    match prop {
                        ObjectPatternMember::Property(p) => p.value.bound_names(f),
                        ObjectPatternMember::Rest(r) => r.argument.bound_names(f),
                    }
                }
            }
            Pattern::Array(arr) => {
                for element in arr.elements.iter().flatten() {
                    element.bound_names(f);
                }
            }
            Pattern::Rest(rest) => rest.argument.bound_names(f),
            Pattern::Assignment(assign) => assign.left.bound_names(f),
        }
    }
}

/// `{ a, b: c, ...d }` as a target.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ObjectPattern {
    /// Members
    pub properties: Vec<ObjectPatternMember>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// Member of an object pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum ObjectPatternMember {
    Property(AssignmentProperty),
    Rest(RestElement),
}

/// `key: value` inside an object pattern; serialized as `Property`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Property")]
pub struct AssignmentProperty {
    /// Name
    pub key: PropertyKey,
    /// Target
    pub value: Pattern,
    /// Always `init`
    pub kind: PropertyKind,
    /// Always false
    pub method: bool,
    /// `{ a }`
    pub shorthand: bool,
    /// `[key]`
    pub computed: bool,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `[a, , ...b]` as a target.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ArrayPattern {
    /// Elements, `None` for holes
    pub elements: Vec<Option<Pattern>>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `...argument` as a target.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct RestElement {
    /// Target
    pub argument: Pattern,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `left = right` as a target with a default.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct AssignmentPattern {
    /// Target
    pub left: Pattern,
    /// Default value
    pub right: Expression,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

// ============================================================================
// Modules
// ============================================================================

/// Identifier or string naming an import or export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum ModuleExportName {
    Identifier(Identifier),
    Literal(Box<Literal>),
}

impl ModuleExportName {
    /// The name as a string.
    pub fn name(&self) -> &str {
        match self {
            ModuleExportName::Identifier(id) => &id.name,
            ModuleExportName::Literal(lit) => match &lit.value {
                LiteralValue::String(s) => s,
                _ => "",
            },
        }
    }
}

/// `import ... from source with { attributes }`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ImportDeclaration {
    /// Bindings
    pub specifiers: Vec<ImportSpecifierKind>,
    /// Module specifier
    pub source: Literal,
    /// Import attributes
    pub attributes: Vec<ImportAttribute>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// One import binding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum ImportSpecifierKind {
    Named(ImportSpecifier),
    Default(ImportDefaultSpecifier),
    Namespace(ImportNamespaceSpecifier),
}

/// `{ imported as local }`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ImportSpecifier {
    /// Exported name
    pub imported: ModuleExportName,
    /// Local binding
    pub local: Identifier,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `import local from`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ImportDefaultSpecifier {
    /// Local binding
    pub local: Identifier,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `import * as local from`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ImportNamespaceSpecifier {
    /// Local binding
    pub local: Identifier,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `key: "value"` in `with { ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ImportAttribute {
    /// Attribute name
    pub key: ModuleExportName,
    /// Attribute value
    pub value: Literal,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `export declaration` or `export { specifiers } from source`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ExportNamedDeclaration {
    /// Exported declaration
    pub declaration: Option<Statement>,
    /// Exported names
    pub specifiers: Vec<ExportSpecifier>,
    /// Re-export source
    pub source: Option<Literal>,
    /// Import attributes of a re-export
    pub attributes: Vec<ImportAttribute>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `local as exported`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ExportSpecifier {
    /// Local (or re-exported) name
    pub local: ModuleExportName,
    /// Exported name
    pub exported: ModuleExportName,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// What `export default` exports.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum ExportDefaultKind {
    Function(FunctionDeclaration),
    Class(ClassDeclaration),
    Expression(Expression),
}

/// `export default declaration`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ExportDefaultDeclaration {
    /// Exported value
    pub declaration: ExportDefaultKind,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `export * as exported from source`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ExportAllDeclaration {
    /// Namespace export name
    pub exported: Option<ModuleExportName>,
    /// Module specifier
    pub source: Literal,
    /// Import attributes
    pub attributes: Vec<ImportAttribute>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

// ============================================================================
// JSX
// ============================================================================

/// `<a>children</a>` or `<a />`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "JSXElement", rename_all = "camelCase")]
pub struct JsxElement {
    /// Opening tag
    pub opening_element: JsxOpeningElement,
    /// Children
    pub children: Vec<JsxChild>,
    /// Closing tag, absent when self-closing
    pub closing_element: Option<JsxClosingElement>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `<name attributes>`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "JSXOpeningElement", rename_all = "camelCase")]
pub struct JsxOpeningElement {
    /// Tag name
    pub name: JsxElementName,
    /// Attributes
    pub attributes: Vec<JsxAttributeItem>,
    /// `/>`
    pub self_closing: bool,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `</name>`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "JSXClosingElement")]
pub struct JsxClosingElement {
    /// Tag name
    pub name: JsxElementName,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `<>children</>`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "JSXFragment", rename_all = "camelCase")]
pub struct JsxFragment {
    /// `<>`
    pub opening_fragment: JsxOpeningFragment,
    /// Children
    pub children: Vec<JsxChild>,
    /// `</>`
    pub closing_fragment: JsxClosingFragment,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `<>`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "JSXOpeningFragment")]
pub struct JsxOpeningFragment {
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `</>`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "JSXClosingFragment")]
pub struct JsxClosingFragment {
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// Name of a JSX element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum JsxElementName {
    Identifier(JsxIdentifier),
    Namespaced(JsxNamespacedName),
    Member(Box<JsxMemberExpression>),
}

impl JsxElementName {
    /// Source-like spelling, used to match closing tags.
    pub fn qualified(&self) -> String {
        match self {
            JsxElementName::Identifier(id) => id.name.clone(),
            JsxElementName::Namespaced(ns) => format!("{}:{}", ns.namespace.name, ns.name.name),
            JsxElementName::Member(member) => {
                format!("{}.{}", member.object.qualified(), member.property.name)
            }
        }
    }
}

/// Object part of a JSX member name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum JsxMemberObject {
    Identifier(JsxIdentifier),
    Member(Box<JsxMemberExpression>),
}

impl JsxMemberObject {
    fn qualified(&self) -> String {
        match self {
            JsxMemberObject::Identifier(id) => id.name.clone(),
            JsxMemberObject::Member(member) => {
                format!("{}.{}", member.object.qualified(), member.property.name)
            }
        }
    }
}

/// JSX name, may contain `-`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "JSXIdentifier")]
pub struct JsxIdentifier {
    /// Name
    pub name: String,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `namespace:name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "JSXNamespacedName")]
pub struct JsxNamespacedName {
    /// Namespace
    pub namespace: JsxIdentifier,
    /// Local name
    pub name: JsxIdentifier,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `object.property`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "JSXMemberExpression")]
pub struct JsxMemberExpression {
    /// Object
    pub object: JsxMemberObject,
    /// Property
    pub property: JsxIdentifier,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// Attribute or spread attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum JsxAttributeItem {
    Attribute(JsxAttribute),
    Spread(JsxSpreadAttribute),
}

/// Name of a JSX attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum JsxAttributeName {
    Identifier(JsxIdentifier),
    Namespaced(JsxNamespacedName),
}

/// Value of a JSX attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum JsxAttributeValue {
    String(Box<Literal>),
    Expression(JsxExpressionContainer),
    Element(Box<JsxElement>),
    Fragment(Box<JsxFragment>),
}

/// `name="value"`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "JSXAttribute")]
pub struct JsxAttribute {
    /// Name
    pub name: JsxAttributeName,
    /// Value, absent for boolean attributes
    pub value: Option<JsxAttributeValue>,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `{...argument}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "JSXSpreadAttribute")]
pub struct JsxSpreadAttribute {
    /// Spread value
    pub argument: Expression,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// Contents of `{ ... }` in JSX.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum JsxExpression {
    Expression(Expression),
    Empty(JsxEmptyExpression),
}

/// `{}` or `{/* comment */}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "JSXEmptyExpression")]
pub struct JsxEmptyExpression {
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `{expression}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "JSXExpressionContainer")]
pub struct JsxExpressionContainer {
    /// Contained expression
    pub expression: JsxExpression,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// `{...expression}` as a child
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "JSXSpreadChild")]
pub struct JsxSpreadChild {
    /// Spread value
    pub expression: Expression,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// Text between tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "JSXText")]
pub struct JsxText {
    /// Text
    pub value: String,
    /// Source text
    pub raw: String,
    /// Source location
    #[serde(flatten)]
    pub span: Span,
}

/// Child of an element or fragment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum JsxChild {
    Text(JsxText),
    Expression(JsxExpressionContainer),
    Spread(JsxSpreadChild),
    Element(Box<JsxElement>),
    Fragment(Box<JsxFragment>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ident(name: &str) -> Identifier {
        Identifier {
            name: name.to_string(),
            span: Span::default(),
        }
    }

    #[test]
    fn test_identifier_serializes_with_type_tag() {
        let value = serde_json::to_value(ident("x")).unwrap();
        assert_eq!(value, json!({ "type": "Identifier", "name": "x" }));
    }

    #[test]
    fn test_span_fields_appear_when_set() {
        let id = Identifier {
            name: "x".into(),
            span: Span {
                start: Some(0),
                end: Some(1),
                range: Some([0, 1]),
                loc: None,
            },
        };
        let value = serde_json::to_value(id).unwrap();
        assert_eq!(value["start"], 0);
        assert_eq!(value["end"], 1);
        assert_eq!(value["range"], json!([0, 1]));
        assert!(value.get("loc").is_none());
    }

    #[test]
    fn test_literal_values() {
        let number = |n: f64| {
            serde_json::to_value(Literal {
                value: LiteralValue::Number(n),
                raw: None,
                regex: None,
                bigint: None,
                span: Span::default(),
            })
            .unwrap()
        };
        assert_eq!(number(83.0)["value"], json!(83));
        assert_eq!(number(0.5)["value"], json!(0.5));
        assert_eq!(number(f64::INFINITY)["value"], json!(null));
        let regex = Literal {
            value: LiteralValue::RegExp { valid: true },
            raw: None,
            regex: Some(RegExpLiteral {
                pattern: "a".into(),
                flags: "g".into(),
            }),
            bigint: None,
            span: Span::default(),
        };
        let value = serde_json::to_value(regex).unwrap();
        assert_eq!(value["value"], json!({}));
        assert_eq!(value["regex"], json!({ "pattern": "a", "flags": "g" }));
    }

    #[test]
    fn test_operators_serialize_as_source_text() {
        assert_eq!(serde_json::to_value(BinaryOperator::Instanceof).unwrap(), json!("instanceof"));
        assert_eq!(serde_json::to_value(AssignmentOperator::Coalesce).unwrap(), json!("??="));
        assert_eq!(serde_json::to_value(UnaryOperator::Typeof).unwrap(), json!("typeof"));
    }

    #[test]
    fn test_assignment_property_serializes_as_property() {
        let prop = AssignmentProperty {
            key: PropertyKey::Identifier(ident("a")),
            value: Pattern::Identifier(ident("a")),
            kind: PropertyKind::Init,
            method: false,
            shorthand: true,
            computed: false,
            span: Span::default(),
        };
        let value = serde_json::to_value(prop).unwrap();
        assert_eq!(value["type"], "Property");
        assert_eq!(value["kind"], "init");
    }

    #[test]
    fn test_bound_names_in_source_order() {
        let pattern = Pattern::Array(ArrayPattern {
            elements: vec![
                Some(Pattern::Identifier(ident("a"))),
                None,
                Some(Pattern::Rest(Box::new(RestElement {
                    argument: Pattern::Identifier(ident("b")),
                    span: Span::default(),
                }))),
            ],
            span: Span::default(),
        });
        let mut names = Vec::new();
        pattern.bound_names(&mut |id| names.push(id.name.clone()));
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_jsx_names() {
        let name = JsxElementName::Member(Box::new(JsxMemberExpression {
            object: JsxMemberObject::Identifier(JsxIdentifier {
                name: "a".into(),
                span: Span::default(),
            }),
            property: JsxIdentifier {
                name: "b".into(),
                span: Span::default(),
            },
            span: Span::default(),
        }));
        assert_eq!(name.qualified(), "a.b");
        let value = serde_json::to_value(&name).unwrap();
        assert_eq!(value["type"], "JSXMemberExpression");
    }
}
