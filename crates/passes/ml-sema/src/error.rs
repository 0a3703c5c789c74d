//! Diagnostics produced by semantic analysis

use ml_span::Pos;
use thiserror::Error;

/// Errors that abort compilation once analysis finishes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// Name declared twice in the same scope
    #[error("{second}: '{name}' is already declared in scope '{scope}' (first declared at {first})")]
    Redeclaration {
        /// The redeclared name
        name: String,
        /// Scope holding both declarations
        scope: String,
        /// First declaration
        first: Pos,
        /// Rejected declaration
        second: Pos,
    },

    /// Name not declared in any visible scope
    #[error("{use_site}: '{name}' is not declared (in scope '{scope}')")]
    UndefinedReference {
        /// The unresolved name
        name: String,
        /// Scope active at the use site
        scope: String,
        /// Where the name was used
        use_site: Pos,
    },
}

impl SemanticError {
    /// Position the error points at
    #[must_use]
    pub fn pos(&self) -> Pos {
        match self {
            Self::Redeclaration { second, .. } => *second,
            Self::UndefinedReference { use_site, .. } => *use_site,
        }
    }

    /// The name the error is about
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Redeclaration { name, .. } | Self::UndefinedReference { name, .. } => name,
        }
    }
}

/// Diagnostics that are reported but never abort compilation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticWarning {
    /// Variable or parameter never read
    #[error("{declared_at}: '{name}' is declared but never used (in scope '{scope}')")]
    UnusedSymbol {
        /// The unused name
        name: String,
        /// Scope holding the declaration
        scope: String,
        /// Where it was declared
        declared_at: Pos,
    },

    /// Variable read before any assignment
    #[error("{use_site}: '{name}' is read before it is initialized (in scope '{scope}')")]
    UninitializedSymbol {
        /// The variable
        name: String,
        /// Scope holding the declaration
        scope: String,
        /// First read
        use_site: Pos,
    },
}

impl SemanticWarning {
    /// Position the warning points at
    #[must_use]
    pub fn pos(&self) -> Pos {
        match self {
            Self::UnusedSymbol { declared_at, .. } => *declared_at,
            Self::UninitializedSymbol { use_site, .. } => *use_site,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_lead_with_the_position() {
        let error = SemanticError::Redeclaration {
            name: "x".to_string(),
            scope: "main".to_string(),
            first: Pos::new(2, 4),
            second: Pos::new(3, 4),
        };
        assert_eq!(
            error.to_string(),
            "3:4: 'x' is already declared in scope 'main' (first declared at 2:4)"
        );
        assert_eq!(error.pos(), Pos::new(3, 4));

        let warning = SemanticWarning::UnusedSymbol {
            name: "tmp".to_string(),
            scope: "main".to_string(),
            declared_at: Pos::new(5, 8),
        };
        assert_eq!(
            warning.to_string(),
            "5:8: 'tmp' is declared but never used (in scope 'main')"
        );
        assert_eq!(warning.pos(), Pos::new(5, 8));
    }
}
