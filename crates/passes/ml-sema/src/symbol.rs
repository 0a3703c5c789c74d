//! Symbols stored in the symbol table

use ml_span::Pos;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a symbol names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolCategory {
    /// Local variable
    Variable,
    /// Function parameter
    Parameter,
    /// Function
    Function,
}

impl fmt::Display for SymbolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Variable => "variable",
            Self::Parameter => "parameter",
            Self::Function => "function",
        })
    }
}

/// A declared identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// Declared name
    pub name: String,
    /// Declared type (return type for functions)
    pub declared_type: String,
    /// What the name refers to
    pub category: SymbolCategory,
    /// Where the declaration appears
    pub declared_at: Pos,
    /// Name of the scope holding the symbol, set on insertion
    pub scope: String,
    /// Declared `const`
    pub is_constant: bool,
    /// Assigned at least once (or declared with a value)
    pub is_initialized: bool,
    /// Read at least once
    pub is_used: bool,
    /// Parameter types, for functions
    pub parameters: Vec<String>,
    /// Global insertion sequence number, set on insertion
    pub insertion_order: usize,
}

impl Symbol {
    /// Create a symbol that has not been inserted into a table yet
    pub fn new(
        name: impl Into<String>,
        declared_type: impl Into<String>,
        category: SymbolCategory,
        declared_at: Pos,
    ) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            category,
            declared_at,
            scope: String::new(),
            is_constant: false,
            is_initialized: false,
            is_used: false,
            parameters: Vec::new(),
            insertion_order: 0,
        }
    }

    /// Set the `const` flag
    #[must_use]
    pub fn constant(mut self, is_constant: bool) -> Self {
        self.is_constant = is_constant;
        self
    }

    /// Set the initialized flag
    #[must_use]
    pub fn initialized(mut self, is_initialized: bool) -> Self {
        self.is_initialized = is_initialized;
        self
    }

    /// Set the parameter types of a function
    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<String>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Declaration line
    pub fn line(&self) -> u32 {
        self.declared_at.line
    }

    /// Declaration column
    pub fn column(&self) -> u32 {
        self.declared_at.column
    }
}
