//! Scope-stack symbol table

use crate::error::SemanticError;
use crate::symbol::Symbol;
use indexmap::IndexMap;
use la_arena::{Arena, Idx};
use rustc_hash::FxHashMap;

/// Name of the outermost scope
pub const GLOBAL_SCOPE: &str = "global";

/// Unique identifier for a scope
pub type ScopeId = Idx<Scope>;

/// A named scope: declared names in insertion order
#[derive(Debug, Clone)]
pub struct Scope {
    /// Scope name (the function name, or `global`)
    pub name: String,
    symbols: IndexMap<String, Symbol>,
}

impl Scope {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            symbols: IndexMap::new(),
        }
    }
}

/// Symbol table with a stack of active scopes
///
/// Every scope ever entered lives in the arena for the lifetime of the table.
/// The active stack only holds ids into it, with the global scope always at
/// the bottom. Leaving a scope pops the stack but keeps its symbols, so
/// [`SymbolTable::all_symbols`] can report locals of functions that have
/// already been analyzed.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    scopes: Arena<Scope>,
    by_name: FxHashMap<String, ScopeId>,
    stack: Vec<ScopeId>,
    global: ScopeId,
    next_order: usize,
}

impl SymbolTable {
    /// Create a table holding only the (active) global scope
    #[must_use]
    pub fn new() -> Self {
        let mut scopes = Arena::new();
        let global = scopes.alloc(Scope::new(GLOBAL_SCOPE));
        let mut by_name = FxHashMap::default();
        by_name.insert(GLOBAL_SCOPE.to_string(), global);

        Self {
            scopes,
            by_name,
            stack: vec![global],
            global,
            next_order: 0,
        }
    }

    /// Push `name` onto the active stack, creating the scope on first use
    ///
    /// Entering a name that was entered before reopens the same scope.
    pub fn enter_scope(&mut self, name: &str) -> ScopeId {
        let id = self.by_name.get(name).copied().unwrap_or_else(|| {
            let created = self.scopes.alloc(Scope::new(name));
            self.by_name.insert(name.to_string(), created);
            created
        });
        self.stack.push(id);
        tracing::trace!(scope = name, depth = self.stack.len(), "enter scope");
        id
    }

    /// Pop the innermost scope. Its symbols stay in the table.
    ///
    /// # Panics
    ///
    /// Panics when only the global scope is active.
    pub fn exit_scope(&mut self) {
        assert!(
            self.stack.len() > 1,
            "exit_scope called with only the global scope active"
        );
        if let Some(id) = self.stack.pop() {
            tracing::trace!(scope = %self.scopes[id].name, "exit scope");
        }
    }

    /// Name of the innermost active scope
    pub fn current_scope(&self) -> &str {
        &self.scopes[self.current_id()].name
    }

    fn current_id(&self) -> ScopeId {
        // The global scope is never popped.
        self.stack.last().copied().unwrap_or(self.global)
    }

    /// Declare a symbol in the innermost active scope
    ///
    /// The symbol's `scope` and `insertion_order` are filled in here.
    ///
    /// # Errors
    ///
    /// Returns [`SemanticError::Redeclaration`] if the scope already holds the
    /// name; the existing symbol is left untouched.
    pub fn insert(&mut self, mut symbol: Symbol) -> Result<&Symbol, SemanticError> {
        let id = self.current_id();
        let scope = &mut self.scopes[id];

        if let Some(existing) = scope.symbols.get(&symbol.name) {
            return Err(SemanticError::Redeclaration {
                first: existing.declared_at,
                second: symbol.declared_at,
                scope: scope.name.clone(),
                name: symbol.name,
            });
        }

        symbol.scope.clone_from(&scope.name);
        symbol.insertion_order = self.next_order;
        self.next_order += 1;

        let inserted = scope.symbols.entry(symbol.name.clone()).or_insert(symbol);
        Ok(inserted)
    }

    /// Resolve a name from the innermost scope outwards
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.stack
            .iter()
            .rev()
            .find_map(|&id| self.scopes[id].symbols.get(name))
    }

    /// Same search as [`SymbolTable::lookup`], returning a mutable symbol
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        let id = self
            .stack
            .iter()
            .rev()
            .copied()
            .find(|&id| self.scopes[id].symbols.contains_key(name))?;
        self.scopes[id].symbols.get_mut(name)
    }

    /// Look only in the named scope
    pub fn lookup_exact(&self, scope: &str, name: &str) -> Option<&Symbol> {
        let id = self.by_name.get(scope)?;
        self.scopes[*id].symbols.get(name)
    }

    /// Resolve a name starting at `from_scope` instead of the stack top
    ///
    /// Scopes entered on top of the innermost active occurrence of
    /// `from_scope` are skipped. The global scope is always consulted last,
    /// even when `from_scope` is not active.
    pub fn lookup_from_scope_upward(&self, name: &str, from_scope: &str) -> Option<&Symbol> {
        let start = self
            .stack
            .iter()
            .rposition(|&id| self.scopes[id].name == from_scope);

        if let Some(start) = start {
            let found = self.stack[..=start]
                .iter()
                .rev()
                .find_map(|&id| self.scopes[id].symbols.get(name));
            if found.is_some() {
                return found;
            }
        }

        self.scopes[self.global].symbols.get(name)
    }

    /// Every symbol of every scope, in insertion order
    pub fn all_symbols(&self) -> Vec<&Symbol> {
        let mut symbols: Vec<&Symbol> = self
            .scopes
            .iter()
            .flat_map(|(_, scope)| scope.symbols.values())
            .collect();
        symbols.sort_by_key(|symbol| symbol.insertion_order);
        symbols
    }

    /// Names of all scopes, in creation order
    pub fn scope_names(&self) -> Vec<&str> {
        self.scopes
            .iter()
            .map(|(_, scope)| scope.name.as_str())
            .collect()
    }

    /// Names of the active scopes, innermost first
    pub fn active_scopes(&self) -> Vec<&str> {
        self.stack
            .iter()
            .rev()
            .map(|&id| self.scopes[id].name.as_str())
            .collect()
    }

    /// Total number of symbols across all scopes
    pub fn len(&self) -> usize {
        self.next_order
    }

    /// True when no symbol has been declared
    pub fn is_empty(&self) -> bool {
        self.next_order == 0
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
