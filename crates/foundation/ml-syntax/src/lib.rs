//! Syntax tree for `MiniLang` programs
//!
//! The tree is produced by an external front-end. It mirrors the grammar
//! one-to-one: a program is a list of function declarations, each with a
//! block of statements, and expressions are binary operations over
//! identifiers, integer literals, parenthesized expressions and calls.
//!
//! Nodes that declare or reference a name carry an [`Ident`] so later passes
//! can report positions.

pub mod build;

use ml_span::Pos;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An identifier occurrence with its source position
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ident {
    /// Identifier text
    pub name: String,
    /// Where it appears
    pub pos: Pos,
}

impl Ident {
    /// Identifier `name` at `pos`
    pub fn new(name: impl Into<String>, pos: Pos) -> Self {
        Self {
            name: name.into(),
            pos,
        }
    }
}

/// Root of a syntax tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Function declarations in source order
    pub functions: Vec<FunctionDecl>,
}

/// `type name(params) { body }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDecl {
    /// Function name
    pub name: Ident,
    /// Declared return type (`int`, `void`, ...)
    pub return_type: String,
    /// Parameters in declaration order
    pub params: Vec<Param>,
    /// Function body
    pub body: Block,
}

/// A function parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name
    pub name: Ident,
    /// Declared type
    pub ty: String,
}

/// `{ stmt* }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Statements in source order
    pub stmts: Vec<Stmt>,
}

/// `[const] type name [= init];`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarDecl {
    /// Declared name
    pub name: Ident,
    /// Declared type
    pub ty: String,
    /// Declared with `const`
    pub constant: bool,
    /// Optional initializer
    pub init: Option<Expr>,
}

/// `target = value;`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assign {
    /// Assigned variable
    pub target: Ident,
    /// Right-hand side
    pub value: Expr,
}

/// `callee(args)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    /// Called function
    pub callee: Ident,
    /// Arguments, left to right
    pub args: Vec<Expr>,
}

/// Statements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stmt {
    /// Variable declaration
    VarDecl(VarDecl),
    /// Assignment
    Assign(Assign),
    /// `if (cond) then_block [else else_block]`
    If {
        /// Condition
        cond: Expr,
        /// Taken when the condition holds
        then_block: Block,
        /// Taken otherwise
        else_block: Option<Block>,
    },
    /// `while (cond) body`
    While {
        /// Loop condition
        cond: Expr,
        /// Loop body
        body: Block,
    },
    /// `for (init; cond; update) body`
    For {
        /// Runs once before the loop
        init: ForInit,
        /// Loop condition
        cond: Expr,
        /// Runs after every iteration
        update: Assign,
        /// Loop body
        body: Block,
    },
    /// `return [expr];`
    Return(Option<Expr>),
    /// Call used as a statement
    Call(Call),
    /// Nested block
    Block(Block),
}

/// The init clause of a `for` header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForInit {
    /// `for (int i = 0; ...)`
    Decl(VarDecl),
    /// `for (i = 0; ...)`
    Assign(Assign),
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// `left op right`
    Binary {
        /// Operator
        op: BinOp,
        /// Left operand
        left: Box<Expr>,
        /// Right operand
        right: Box<Expr>,
    },
    /// Variable read
    Ident(Ident),
    /// Integer literal
    Int(i64),
    /// `(expr)`
    Paren(Box<Expr>),
    /// Call used as a value
    Call(Call),
}

/// Binary operators of the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `&&`
    And,
    /// `||`
    Or,
}

impl BinOp {
    /// Operator text as written in source
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }

    /// Returns true for `+ - * / %`
    #[must_use]
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Rem
        )
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
