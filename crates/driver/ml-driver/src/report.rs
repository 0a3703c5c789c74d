//! Post-compilation reports

use ml_sema::{Symbol, SymbolCategory, SymbolTable};
use serde::Serialize;
use std::fmt;

/// Fixed-width listing of every symbol, in declaration order
///
/// ```text
/// NAME         TYPE       CATEGORY  LINE  COL   SCOPE       PARAMS          FLAGS
/// ------------------------------------------------------------------------------
/// add          int        function  1     4     global      [int, int]
/// ```
pub struct SymbolReport<'table> {
    symbols: Vec<&'table Symbol>,
}

impl<'table> SymbolReport<'table> {
    /// Report over every symbol of `table`
    pub fn new(table: &'table SymbolTable) -> Self {
        Self {
            symbols: table.all_symbols(),
        }
    }

    /// Reported symbols, in declaration order
    pub fn symbols(&self) -> &[&'table Symbol] {
        &self.symbols
    }
}

fn params(symbol: &Symbol) -> String {
    if symbol.category == SymbolCategory::Function {
        format!("[{}]", symbol.parameters.join(", "))
    } else {
        "-".to_string()
    }
}

fn flags(symbol: &Symbol) -> String {
    let mut flags = Vec::new();
    if symbol.is_constant {
        flags.push("const");
    }
    if !symbol.is_initialized {
        flags.push("uninitialized");
    }
    if !symbol.is_used {
        flags.push("unused");
    }
    flags.join(" ")
}

fn write_row(formatter: &mut fmt::Formatter<'_>, columns: [&str; 8]) -> fmt::Result {
    let [name, ty, category, line, column, scope, params, flags] = columns;
    let row = format!(
        "{name:<12} {ty:<10} {category:<9} {line:<5} {column:<5} {scope:<11} {params:<15} {flags}"
    );
    writeln!(formatter, "{}", row.trim_end())
}

impl fmt::Display for SymbolReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_row(
            f,
            [
                "NAME", "TYPE", "CATEGORY", "LINE", "COL", "SCOPE", "PARAMS", "FLAGS",
            ],
        )?;
        writeln!(f, "{}", "-".repeat(78))?;

        for symbol in &self.symbols {
            let category = symbol.category.to_string();
            let line = symbol.line().to_string();
            let column = symbol.column().to_string();
            let params = params(symbol);
            let flags = flags(symbol);
            write_row(
                f,
                [
                    symbol.name.as_str(),
                    symbol.declared_type.as_str(),
                    category.as_str(),
                    line.as_str(),
                    column.as_str(),
                    symbol.scope.as_str(),
                    params.as_str(),
                    flags.as_str(),
                ],
            )?;
        }
        Ok(())
    }
}

/// Summary counts of one compilation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompileStats {
    /// Instructions produced by lowering
    pub raw_instructions: usize,
    /// Instructions left after optimization
    pub optimized_instructions: usize,
    /// Symbols in the table
    pub symbols: usize,
    /// Warnings reported by semantic analysis
    pub warnings: usize,
}

fn counted(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

impl fmt::Display for CompileStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} after optimization), {}, {}",
            counted(self.raw_instructions, "instruction"),
            self.optimized_instructions,
            counted(self.symbols, "symbol"),
            counted(self.warnings, "warning")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_pluralize_counts() {
        let stats = CompileStats {
            raw_instructions: 1,
            optimized_instructions: 1,
            symbols: 2,
            warnings: 1,
        };
        assert_eq!(
            stats.to_string(),
            "1 instruction (1 after optimization), 2 symbols, 1 warning"
        );

        let none = CompileStats {
            raw_instructions: 0,
            optimized_instructions: 0,
            symbols: 0,
            warnings: 0,
        };
        assert_eq!(
            none.to_string(),
            "0 instructions (0 after optimization), 0 symbols, 0 warnings"
        );
    }
}
