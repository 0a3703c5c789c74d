//! Compilation driver
//!
//! Runs the `MiniLang` middle-end on a syntax tree handed over by the
//! front-end:
//!
//! 1. semantic analysis fills the symbol table and collects diagnostics
//! 2. any semantic error stops the compilation here
//! 3. the tree is lowered to three-address code
//! 4. the optimizer rewrites that code
//!
//! Everything is produced in memory. Printing the listings and reports or
//! writing them to disk is left to the caller.

pub mod config;
pub mod error;
pub mod report;

pub use config::CompileOptions;
pub use error::CompileError;
pub use report::{CompileStats, SymbolReport};

use ml_opt::{Optimizer, PassStats};
use ml_sema::{SemanticAnalyzer, SemanticWarning, SymbolTable};
use ml_syntax::Program;
use ml_tac::{Instruction, Listing};

/// Everything a successful compilation produces
#[derive(Debug, Clone)]
pub struct CompileOutput {
    /// Symbol table after analysis
    pub table: SymbolTable,
    /// Warnings from analysis, in report order
    pub warnings: Vec<SemanticWarning>,
    /// Code as lowered
    pub raw: Vec<Instruction>,
    /// Code after the optimizer, or a copy of `raw` when optimization is off
    pub optimized: Vec<Instruction>,
    /// Per-pass instruction counts, empty when optimization is off
    pub passes: Vec<PassStats>,
}

impl CompileOutput {
    /// Text artifact of the unoptimized code
    pub fn raw_listing(&self) -> String {
        Listing(&self.raw).to_string()
    }

    /// Text artifact of the optimized code
    pub fn optimized_listing(&self) -> String {
        Listing(&self.optimized).to_string()
    }

    /// Table of every declared symbol
    pub fn symbol_report(&self) -> SymbolReport<'_> {
        SymbolReport::new(&self.table)
    }

    /// Summary counts
    pub fn stats(&self) -> CompileStats {
        CompileStats {
            raw_instructions: self.raw.len(),
            optimized_instructions: self.optimized.len(),
            symbols: self.table.len(),
            warnings: self.warnings.len(),
        }
    }
}

/// Compile a program
///
/// # Errors
///
/// Returns [`CompileError::Semantic`] when analysis reports any error. No
/// code is generated in that case.
pub fn compile(program: &Program, options: &CompileOptions) -> Result<CompileOutput, CompileError> {
    tracing::debug!(
        functions = program.functions.len(),
        entry = %options.entry_function,
        optimize = options.optimize,
        "compiling program"
    );

    let analysis = SemanticAnalyzer::analyze(program);
    if analysis.has_errors() {
        tracing::debug!(errors = analysis.errors.len(), "aborting before code generation");
        return Err(CompileError::Semantic {
            errors: analysis.errors,
            warnings: analysis.warnings,
        });
    }

    let raw = ml_tac_lower::lower_program(program, &analysis.table);

    let (optimized, passes) = if options.optimize {
        let optimized = Optimizer::new(options.optimizer_config()).optimize(&raw);
        (optimized.code, optimized.stats)
    } else {
        (raw.clone(), Vec::new())
    };

    let output = CompileOutput {
        table: analysis.table,
        warnings: analysis.warnings,
        raw,
        optimized,
        passes,
    };
    tracing::debug!(stats = %output.stats(), "compilation finished");
    Ok(output)
}
