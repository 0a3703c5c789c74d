//! Driver errors

use ml_sema::{SemanticError, SemanticWarning};
use thiserror::Error;

/// Why a compilation produced no code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Semantic analysis reported at least one error
    ///
    /// The warnings collected before the abort are kept so they can still be
    /// reported.
    #[error("semantic analysis failed with {} error(s)", errors.len())]
    Semantic {
        /// Errors in traversal order
        errors: Vec<SemanticError>,
        /// Warnings in report order
        warnings: Vec<SemanticWarning>,
    },
}

impl CompileError {
    /// Errors that caused the abort
    pub fn errors(&self) -> &[SemanticError] {
        match self {
            Self::Semantic { errors, .. } => errors,
        }
    }

    /// Warnings collected before the abort
    pub fn warnings(&self) -> &[SemanticWarning] {
        match self {
            Self::Semantic { warnings, .. } => warnings,
        }
    }
}
