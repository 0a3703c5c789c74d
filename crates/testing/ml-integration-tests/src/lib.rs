//! End-to-end test helpers for the `MiniLang` middle-end

use anyhow::Result;
use ml_driver::{CompileOptions, CompileOutput, compile};
use ml_syntax::Program;

/// Compile with default options, turning a semantic failure into an error
///
/// # Errors
///
/// Returns the [`ml_driver::CompileError`] when analysis rejects the program
pub fn compile_default(program: &Program) -> Result<CompileOutput> {
    compile_with(program, &CompileOptions::default())
}

/// Compile with the given options
///
/// # Errors
///
/// Returns the [`ml_driver::CompileError`] when analysis rejects the program
pub fn compile_with(program: &Program, options: &CompileOptions) -> Result<CompileOutput> {
    Ok(compile(program, options)?)
}

/// Instruction text of a listing, without the header and line numbers
pub fn instruction_lines(listing: &str) -> Vec<&str> {
    listing
        .lines()
        .skip(2)
        .filter_map(|line| line.split_once(": ").map(|(_, instruction)| instruction))
        .collect()
}
