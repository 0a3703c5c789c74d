//! Text artifact for a list of instructions

use crate::Instruction;
use std::fmt;

/// First line of every rendered listing
pub const HEADER: &str = "// Three-address code";

/// Renders instructions as the numbered text artifact
///
/// ```text
/// // Three-address code
///
/// 000: func_main:
/// 001: x = 5
/// ```
pub struct Listing<'code>(pub &'code [Instruction]);

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HEADER}")?;
        writeln!(f)?;
        for (index, instruction) in self.0.iter().enumerate() {
            writeln!(f, "{index:03}: {instruction}")?;
        }
        Ok(())
    }
}
