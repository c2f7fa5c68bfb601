//! Binding validation while parsing.
//!
//! # Overview
//!
//! The parser opens a [`ScopeKind`] for every construct that introduces
//! bindings and declares names into it as they are parsed. Scopes live in a
//! [`ScopeTree`] arena and are released in LIFO order when their construct is
//! finished, so nothing survives the parse. The rules enforced here are the
//! declaration early errors:
//!
//! - `var`-style names are visible up to the enclosing function and collide
//!   with any lexical binding on the way;
//! - lexical names collide with anything already in the same scope, with
//!   parameters when declared at the top of a function body, and with the
//!   catch parameter when declared in the catch block;
//! - duplicate parameter names are recorded as a [`PendingError`] because
//!   whether they are legal depends on things seen later.
//!
//! Private names (`#x`) have their own stack of [`PrivateScope`]s, one per
//! class body being parsed.

use bitflags::bitflags;
use core_types::SourcePosition;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::context::Context;
use crate::error::ErrorMessage;

/// Index of a scope in the [`ScopeTree`] arena.
pub type ScopeId = usize;

/// The construct a scope belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Program top level
    TopLevel,
    /// Holds the name of a function expression
    FunctionRoot,
    /// Formal parameters of a function or method
    FunctionParams,
    /// Formal parameters of an arrow function
    ArrowParams,
    /// Top-level statement list of a function body
    FunctionBody,
    /// Block statement, class static block
    Block,
    /// Catch parameter
    Catch,
    /// Body of a catch clause
    CatchBlock,
    /// Case clauses of a switch
    Switch,
    /// Lexical declarations in a `for` head
    For,
}

bitflags! {
    /// How a name was declared.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BindingKind: u16 {
        /// `var`
        const VAR = 1 << 0;
        /// `let`
        const LET = 1 << 1;
        /// `const`
        const CONST = 1 << 2;
        /// `class`
        const CLASS = 1 << 3;
        /// Name bound by a destructuring catch parameter
        const CATCH_PATTERN = 1 << 4;
        /// A simple catch parameter
        const CATCH_IDENTIFIER = 1 << 5;
        /// Formal parameter
        const ARGUMENT_LIST = 1 << 6;
        /// Function declaration in a var-scoped position
        const FUNCTION_STATEMENT = 1 << 7;
        /// Function declaration in a block
        const FUNCTION_LEXICAL = 1 << 8;
        /// Import binding
        const IMPORT = 1 << 9;
        /// Set with `FUNCTION_LEXICAL` for async functions and generators
        const ASYNC_OR_GENERATOR = 1 << 10;

        /// Bindings that may not be redeclared in the same scope
        const LEXICAL = Self::LET.bits()
            | Self::CONST.bits()
            | Self::CLASS.bits()
            | Self::FUNCTION_LEXICAL.bits()
            | Self::IMPORT.bits();
        /// Names hoisted to the enclosing function
        const VAR_LIKE = Self::VAR.bits() | Self::FUNCTION_STATEMENT.bits();
        /// Catch parameter bindings
        const CATCH = Self::CATCH_PATTERN.bits() | Self::CATCH_IDENTIFIER.bits();
    }
}

/// An error whose validity depends on something not yet parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingError {
    /// The diagnostic to raise
    pub message: ErrorMessage,
    /// Where it points
    pub position: SourcePosition,
}

/// One binding table.
#[derive(Debug)]
pub struct ScopeNode {
    /// The construct that opened this scope
    pub kind: ScopeKind,
    /// Enclosing scope
    pub parent: Option<ScopeId>,
    bindings: FxHashMap<String, BindingKind>,
    pending: Option<PendingError>,
}

/// Arena of live scopes plus module-wide export bookkeeping.
#[derive(Debug, Default)]
pub struct ScopeTree {
    nodes: Vec<ScopeNode>,
    exported_names: FxHashSet<String>,
    exported_bindings: Vec<(String, SourcePosition)>,
}

impl ScopeTree {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a scope. Scopes must be left in the reverse order they were entered.
    pub fn enter(&mut self, parent: Option<ScopeId>, kind: ScopeKind) -> ScopeId {
        let id = self.nodes.len();
        trace!(id, ?kind, ?parent, "enter scope");
        self.nodes.push(ScopeNode {
            kind,
            parent,
            bindings: FxHashMap::default(),
            pending: None,
        });
        id
    }

    /// Releases `id` and every scope opened after it.
    pub fn leave(&mut self, id: ScopeId) {
        trace!(id, "leave scope");
        self.nodes.truncate(id);
    }

    /// Number of live scopes.
    pub fn depth(&self) -> usize {
        self.nodes.len()
    }

    /// The kind of a live scope.
    pub fn kind(&self, id: ScopeId) -> ScopeKind {
        self.nodes[id].kind
    }

    /// How `name` is bound directly in `id`, if at all.
    pub fn lookup(&self, id: ScopeId, name: &str) -> Option<BindingKind> {
        self.nodes.get(id)?.bindings.get(name).copied()
    }

    /// Takes the deferred error recorded on `id`.
    pub fn take_pending(&mut self, id: ScopeId) -> Option<PendingError> {
        self.nodes.get_mut(id)?.pending.take()
    }

    fn record_pending(&mut self, id: ScopeId, message: ErrorMessage, position: SourcePosition) {
        let node = &mut self.nodes[id];
        if node.pending.is_none() {
            node.pending = Some(PendingError { message, position });
        }
    }

    /// Declares a name whose binding is hoisted to the enclosing function.
    pub fn declare_var(
        &mut self,
        scope: ScopeId,
        name: &str,
        kind: BindingKind,
        context: Context,
        position: SourcePosition,
    ) -> Result<(), ErrorMessage> {
        let sloppy_web = context.contains(Context::WEB_COMPAT) && !context.is_strict();
        let mut current = Some(scope);
        while let Some(id) = current {
            if self.nodes[id].kind == ScopeKind::FunctionRoot {
                break;
            }
            let existing = self.lookup(id, name);
            if let Some(value) = existing {
                if value.intersects(BindingKind::LEXICAL) {
                    return Err(ErrorMessage::DuplicateBinding(name.to_string()));
                }
                if id == scope
                    && value.contains(BindingKind::ARGUMENT_LIST)
                    && kind.contains(BindingKind::ARGUMENT_LIST)
                {
                    self.record_pending(id, ErrorMessage::DuplicateParameter(name.to_string()), position);
                }
                if value.contains(BindingKind::CATCH_PATTERN)
                    || (value.contains(BindingKind::CATCH_IDENTIFIER) && !sloppy_web)
                {
                    return Err(ErrorMessage::DuplicateBinding(name.to_string()));
                }
            }
            let merged = existing.map_or(kind, |value| value | kind);
            self.nodes[id].bindings.insert(name.to_string(), merged);
            current = self.nodes[id].parent;
        }
        Ok(())
    }

    /// Declares a block-scoped name.
    pub fn declare_lexical(
        &mut self,
        scope: ScopeId,
        name: &str,
        kind: BindingKind,
        context: Context,
    ) -> Result<(), ErrorMessage> {
        let node = &self.nodes[scope];
        if let Some(value) = node.bindings.get(name).copied() {
            let duplicate_block_function = context.contains(Context::WEB_COMPAT)
                && !context.is_strict()
                && value == BindingKind::FUNCTION_LEXICAL
                && kind == BindingKind::FUNCTION_LEXICAL;
            if !duplicate_block_function {
                return Err(ErrorMessage::DuplicateBinding(name.to_string()));
            }
        }
        if let Some(parent) = node.parent {
            let parent_value = self.lookup(parent, name);
            match node.kind {
                ScopeKind::FunctionBody if parent_value.is_some() => {
                    return Err(ErrorMessage::DuplicateBinding(name.to_string()));
                }
                ScopeKind::CatchBlock
                    if parent_value.is_some_and(|v| v.intersects(BindingKind::CATCH)) =>
                {
                    return Err(ErrorMessage::DuplicateBinding(name.to_string()));
                }
                _ => {}
            }
        }
        self.nodes[scope].bindings.insert(name.to_string(), kind);
        Ok(())
    }

    /// Declares a formal parameter. Duplicates become a pending error on `scope`.
    pub fn declare_parameter(&mut self, scope: ScopeId, name: &str, position: SourcePosition) {
        if self.nodes[scope].bindings.contains_key(name) {
            self.record_pending(scope, ErrorMessage::DuplicateParameter(name.to_string()), position);
        } else {
            self.nodes[scope]
                .bindings
                .insert(name.to_string(), BindingKind::ARGUMENT_LIST);
        }
    }

    /// Registers an exported name, rejecting a second export of it.
    pub fn declare_export(&mut self, name: &str) -> Result<(), ErrorMessage> {
        if self.exported_names.insert(name.to_string()) {
            Ok(())
        } else {
            Err(ErrorMessage::DuplicateExport(name.to_string()))
        }
    }

    /// Remembers a local name exported by `export { name }`.
    pub fn record_exported_binding(&mut self, name: &str, position: SourcePosition) {
        self.exported_bindings.push((name.to_string(), position));
    }

    /// Checks every `export { name }` against the module's top-level bindings.
    pub fn check_exported_bindings(&mut self, top_level: ScopeId) -> Result<(), PendingError> {
        for (name, position) in std::mem::take(&mut self.exported_bindings) {
            if self.lookup(top_level, &name).is_none() {
                return Err(PendingError {
                    message: ErrorMessage::UndeclaredExport(name),
                    position,
                });
            }
        }
        Ok(())
    }
}

bitflags! {
    /// How a private name was declared.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PrivateKind: u8 {
        /// `static`
        const STATIC = 1 << 0;
        /// `get #x`
        const GETTER = 1 << 1;
        /// `set #x`
        const SETTER = 1 << 2;
        /// `#x = ...`
        const FIELD = 1 << 3;
        /// `#x() {}`
        const METHOD = 1 << 4;
        /// Getter and setter pair
        const ACCESSOR = Self::GETTER.bits() | Self::SETTER.bits();
    }
}

/// Private names of one class body.
#[derive(Debug, Default)]
pub struct PrivateScope {
    names: FxHashMap<String, PrivateKind>,
    unresolved: Vec<(String, SourcePosition)>,
}

/// Stack of the class bodies currently being parsed.
#[derive(Debug, Default)]
pub struct PrivateScopes {
    stack: Vec<PrivateScope>,
}

impl PrivateScopes {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the private scope of a class body.
    pub fn enter(&mut self) {
        self.stack.push(PrivateScope::default());
    }

    /// True inside any class body.
    pub fn in_class(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Declares `#name` in the innermost class body.
    pub fn declare(&mut self, name: &str, kind: PrivateKind) -> Result<(), ErrorMessage> {
        if name == "constructor" {
            return Err(ErrorMessage::PrivateConstructor);
        }
        let Some(scope) = self.stack.last_mut() else {
            return Err(ErrorMessage::UndeclaredPrivateName(name.to_string()));
        };
        match scope.names.get(name).copied() {
            None => {
                scope.names.insert(name.to_string(), kind);
                Ok(())
            }
            Some(existing) => {
                let same_static =
                    existing.contains(PrivateKind::STATIC) == kind.contains(PrivateKind::STATIC);
                let existing_accessor = existing & PrivateKind::ACCESSOR;
                let new_accessor = kind & PrivateKind::ACCESSOR;
                let pairs = same_static
                    && (existing_accessor == PrivateKind::GETTER || existing_accessor == PrivateKind::SETTER)
                    && (new_accessor == PrivateKind::GETTER || new_accessor == PrivateKind::SETTER)
                    && existing_accessor != new_accessor;
                if pairs {
                    scope.names.insert(name.to_string(), existing | kind);
                    Ok(())
                } else {
                    Err(ErrorMessage::DuplicatePrivateName(name.to_string()))
                }
            }
        }
    }

    /// Records a use of `#name`, resolved when the class body closes.
    pub fn reference(&mut self, name: &str, position: SourcePosition) -> Result<(), ErrorMessage> {
        match self.stack.last_mut() {
            Some(scope) => {
                scope.unresolved.push((name.to_string(), position));
                Ok(())
            }
            None => Err(ErrorMessage::UndeclaredPrivateName(name.to_string())),
        }
    }

    /// Closes the innermost class body, passing unresolved uses outward.
    pub fn leave(&mut self) -> Result<(), PendingError> {
        let Some(scope) = self.stack.pop() else {
            return Ok(());
        };
        for (name, position) in scope.unresolved {
            if scope.names.contains_key(&name) {
                continue;
            }
            match self.stack.last_mut() {
                Some(outer) => outer.unresolved.push((name, position)),
                None => {
                    return Err(PendingError {
                        message: ErrorMessage::UndeclaredPrivateName(name),
                        position,
                    })
                }
            }
        }
        Ok(())
    }
}
