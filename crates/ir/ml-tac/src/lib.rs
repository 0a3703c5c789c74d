//! Three-address code (TAC)
//!
//! TAC is a flat, ordered list of instructions. Each instruction performs at
//! most one operation and writes at most one destination. Control flow is
//! expressed with labels and (conditional) jumps to them, so a function is
//! just the run of instructions that follows its entry label.
//!
//! Instructions are a closed enum with structural operands. Passes match on
//! the variant instead of parsing the rendered text; the text form only
//! exists for the artifacts handed to the outside world (see [`Listing`]).

mod listing;
mod names;

pub use listing::{Listing, HEADER};
pub use ml_syntax::BinOp;
pub use names::NameGen;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A compiler-generated temporary, rendered `tN`
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Temp(pub u32);

impl fmt::Display for Temp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Jump target
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Label {
    /// Generated block label, rendered `LN`
    Block(u32),
    /// Entry point of a function, rendered `func_<name>`
    Function(String),
}

impl Label {
    /// Entry label of the named function
    pub fn function(name: impl Into<String>) -> Self {
        Self::Function(name.into())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block(index) => write!(f, "L{index}"),
            Self::Function(name) => write!(f, "func_{name}"),
        }
    }
}

/// Where an assignment writes
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Dest {
    /// Source-level variable
    Var(String),
    /// Temporary
    Temp(Temp),
    /// The function result slot, rendered `return`
    Return,
    /// The outgoing argument slot, rendered `param`
    Param,
}

impl Dest {
    /// The operand that reads back what this destination holds
    ///
    /// `return` and `param` are write-only slots and have none.
    #[must_use]
    pub fn as_operand(&self) -> Option<Operand> {
        match self {
            Self::Var(name) => Some(Operand::Var(name.clone())),
            Self::Temp(temp) => Some(Operand::Temp(*temp)),
            Self::Return | Self::Param => None,
        }
    }
}

impl fmt::Display for Dest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(name) => f.write_str(name),
            Self::Temp(temp) => write!(f, "{temp}"),
            Self::Return => f.write_str("return"),
            Self::Param => f.write_str("param"),
        }
    }
}

/// A value read by an instruction
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    /// Integer literal
    Const(i64),
    /// Source-level variable
    Var(String),
    /// Temporary
    Temp(Temp),
    /// No value (`return;`)
    Empty,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const(value) => write!(f, "{value}"),
            Self::Var(name) => f.write_str(name),
            Self::Temp(temp) => write!(f, "{temp}"),
            Self::Empty => Ok(()),
        }
    }
}

/// A single TAC instruction
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    /// `dest = value`
    Assign {
        /// Destination
        dest: Dest,
        /// Assigned value
        value: Operand,
    },
    /// `dest = left op right`
    BinaryOp {
        /// Fresh temporary holding the result
        dest: Temp,
        /// Operator
        op: BinOp,
        /// Left operand
        left: Operand,
        /// Right operand
        right: Operand,
    },
    /// `label:`
    Label(Label),
    /// `goto label`
    Goto(Label),
    /// `if !cond goto label`
    IfFalseGoto {
        /// Tested value
        cond: Operand,
        /// Target when the value is false
        label: Label,
    },
}

impl Instruction {
    /// `dest = value`
    pub fn assign(dest: Dest, value: Operand) -> Self {
        Self::Assign { dest, value }
    }

    /// True for `return = ...`, which ends the straight-line run it appears in
    #[must_use]
    pub fn is_return(&self) -> bool {
        matches!(
            self,
            Self::Assign {
                dest: Dest::Return,
                ..
            }
        )
    }

    /// The label this instruction may transfer control to
    #[must_use]
    pub fn jump_target(&self) -> Option<&Label> {
        match self {
            Self::Goto(label) | Self::IfFalseGoto { label, .. } => Some(label),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assign {
                dest,
                value: Operand::Empty,
            } => write!(f, "{dest} ="),
            Self::Assign { dest, value } => write!(f, "{dest} = {value}"),
            Self::BinaryOp {
                dest,
                op,
                left,
                right,
            } => write!(f, "{dest} = {left} {op} {right}"),
            Self::Label(label) => write!(f, "{label}:"),
            Self::Goto(label) => write!(f, "goto {label}"),
            Self::IfFalseGoto { cond, label } => write!(f, "if !{cond} goto {label}"),
        }
    }
}
