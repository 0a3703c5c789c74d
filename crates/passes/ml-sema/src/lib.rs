//! Semantic analysis for `MiniLang`
//!
//! This crate owns the symbol table and the pass that fills it. The analyzer
//! walks the syntax tree once, declares every function, parameter and
//! variable, resolves every name use, and collects diagnostics instead of
//! stopping at the first one.
//!
//! # Architecture
//!
//! - **Symbol table**: named scopes stored in an arena, plus a stack of the
//!   scopes that are currently open. Scopes are never freed, so every symbol
//!   stays available for reporting after its function has been analyzed.
//! - **Analyzer**: declares and resolves names, tracks `initialized`/`used`
//!   flags on symbols.
//! - **Diagnostics**: errors (redeclaration, undefined reference) abort the
//!   compilation; warnings (unused, uninitialized) do not.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ml_sema::SemanticAnalyzer;
//!
//! let analysis = SemanticAnalyzer::analyze(&program);
//! if analysis.has_errors() {
//!     // Report analysis.errors and stop
//! }
//! // Hand analysis.table to IR lowering
//! ```

pub mod analyzer;
pub mod error;
pub mod scope;
pub mod symbol;

pub use analyzer::{Analysis, SemanticAnalyzer};
pub use error::{SemanticError, SemanticWarning};
pub use scope::{GLOBAL_SCOPE, Scope, ScopeId, SymbolTable};
pub use symbol::{Symbol, SymbolCategory};
