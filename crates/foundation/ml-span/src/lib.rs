//! Source positions

use serde::{Deserialize, Serialize};
use std::fmt;

/// A line/column position in a source file
///
/// Lines are 1-based and columns are 0-based, which is what the front-end
/// reports for every token.
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Pos {
    /// 1-based line
    pub line: u32,
    /// 0-based column
    pub column: u32,
}

impl Pos {
    /// Position at `line`, `column`
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_order_by_line_then_column() {
        assert!(Pos::new(1, 9) < Pos::new(2, 0));
        assert!(Pos::new(3, 1) < Pos::new(3, 4));
        assert_eq!(Pos::new(4, 2).to_string(), "4:2");
    }
}
