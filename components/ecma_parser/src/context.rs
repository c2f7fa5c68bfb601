//! Bit sets threaded through the parser.
//!
//! [`Context`] travels by value down the call stack and describes the
//! syntactic situation of the production being parsed. The other sets are
//! scratch state the parser writes after each production so the caller can
//! decide how a cover grammar resolves.

use bitflags::bitflags;

bitflags! {
    /// Grammar parameters of the production being parsed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Context: u32 {
        /// Strict mode code
        const STRICT = 1 << 0;
        /// Module goal
        const MODULE = 1 << 1;
        /// Inside a loop body; `continue` is legal
        const IN_ITERATION = 1 << 2;
        /// Inside a switch; unlabelled `break` is legal
        const IN_SWITCH = 1 << 3;
        /// A `/` at the next token starts a regular expression
        const ALLOW_REGEXP = 1 << 4;
        /// `await` is an operator
        const IN_AWAIT_CONTEXT = 1 << 5;
        /// `yield` is an operator
        const IN_YIELD_CONTEXT = 1 << 6;
        /// Inside a class field initializer
        const IN_CLASS_FIELD_INIT = 1 << 7;
        /// Inside a derived class constructor
        const IN_CONSTRUCTOR = 1 << 8;
        /// Inside a method body
        const IN_METHOD = 1 << 9;
        /// `new.target` is legal
        const ALLOW_NEW_TARGET = 1 << 10;
        /// `in` is not a binary operator (for-statement heads)
        const DISALLOW_IN = 1 << 11;
        /// Parsing a decorator expression
        const IN_DECORATOR = 1 << 12;
        /// Top level of the program
        const IN_GLOBAL = 1 << 13;
        /// `return` is legal
        const IN_RETURN_CONTEXT = 1 << 14;
        /// `super.x` is legal
        const SUPER_PROPERTY = 1 << 15;
        /// `super()` is legal
        const SUPER_CALL = 1 << 16;
        /// Inside a class body
        const IN_CLASS = 1 << 17;
        /// Parsing call arguments
        const IN_ARGUMENT_LIST = 1 << 18;
        /// Parsing a tagged template; malformed escapes cook to `null`
        const TAGGED_TEMPLATE = 1 << 19;
        /// Inside a class static block
        const IN_STATIC_BLOCK = 1 << 20;
        /// JSX syntax is enabled
        const JSX = 1 << 21;
        /// Annex B web-compatibility relaxations apply
        const WEB_COMPAT = 1 << 22;
        /// Decorators and other proposals are enabled
        const NEXT = 1 << 23;
        /// Inside a function body
        const IN_FUNCTION_BODY = 1 << 24;
        /// Inside formal parameters
        const IN_PARAMETERS = 1 << 25;
    }
}

impl Context {
    /// Bits that do not survive entering a new function.
    pub const FUNCTION_RESET: Context = Context::IN_ITERATION
        .union(Context::IN_SWITCH)
        .union(Context::IN_AWAIT_CONTEXT)
        .union(Context::IN_YIELD_CONTEXT)
        .union(Context::IN_CLASS_FIELD_INIT)
        .union(Context::IN_STATIC_BLOCK)
        .union(Context::DISALLOW_IN)
        .union(Context::IN_GLOBAL)
        .union(Context::IN_DECORATOR)
        .union(Context::IN_ARGUMENT_LIST)
        .union(Context::TAGGED_TEMPLATE)
        .union(Context::IN_PARAMETERS);

    /// Strict or module code.
    #[inline]
    pub fn is_strict(self) -> bool {
        self.contains(Context::STRICT)
    }
}

bitflags! {
    /// Parser-wide transient facts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Flags: u32 {
        /// A `yield` expression was parsed in the current cover group
        const SEEN_YIELD = 1 << 0;
        /// An `await` expression was parsed in the current cover group
        const SEEN_AWAIT = 1 << 1;
        /// An identifier reference named `await` was parsed in the current cover group
        const SEEN_AWAIT_IDENT = 1 << 2;
        /// The last primary expression was an arrow function
        const ARROW_PRODUCED = 1 << 3;
        /// A legacy octal literal or escape was seen in the directive prologue
        const OCTAL_IN_PROLOGUE = 1 << 4;
    }
}

bitflags! {
    /// Whether an expression can still become a destructuring pattern.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Destructible: u8 {
        /// Contains `{a = 1}`; only valid as a pattern
        const MUST_DESTRUCT = 1 << 0;
        /// Not a valid destructuring target
        const CANNOT_DESTRUCT = 1 << 1;
        /// A member expression or parenthesized target: assignable, not bindable
        const ASSIGNABLE_ONLY = 1 << 2;
        /// Duplicate `__proto__`; only an error if it stays a literal
        const SEEN_PROTO = 1 << 3;
        /// A rest element is followed by a comma
        const DISALLOW_TRAILING = 1 << 4;
    }
}

/// Whether the last expression is a valid simple assignment target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssignKind {
    /// Identifier or member expression
    Assignable,
    /// Anything else
    #[default]
    CannotAssign,
}

/// Where a declaration or statement appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Body of loops, labels and `with`: a single-statement position
    Statement,
    /// Consequent or alternate of an `if`
    IfClause,
    /// Statement list of a block, case clause, function body or program
    BlockStatement,
}

bitflags! {
    /// Modifiers of an object or class member.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MemberFlags: u16 {
        /// `static`
        const STATIC = 1 << 0;
        /// `async`
        const ASYNC = 1 << 1;
        /// `*`
        const GENERATOR = 1 << 2;
        /// `get`
        const GETTER = 1 << 3;
        /// `set`
        const SETTER = 1 << 4;
        /// `#name`
        const PRIVATE = 1 << 5;
        /// Named `constructor`
        const CONSTRUCTOR = 1 << 6;
        /// `accessor` auto-accessor field
        const ACCESSOR = 1 << 7;
    }
}
