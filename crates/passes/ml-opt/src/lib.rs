//! TAC optimizer
//!
//! Four passes run in a fixed order, each taking an instruction list and
//! building a new one:
//!
//! 1. [`dead_code`]: drop instructions unreachable from the program start or
//!    the entry function
//! 2. [`const_prop`]: replace reads of variables and temporaries known to hold
//!    a literal
//! 3. [`const_fold`]: evaluate arithmetic on two literals
//! 4. [`redundant`]: drop `x = x`
//!
//! The passes are plain rewrites over the flat list. They do not build a
//! control-flow graph, and constant propagation deliberately ignores
//! reassignment and control flow.

pub mod const_fold;
pub mod const_prop;
pub mod dead_code;
pub mod redundant;

use ml_tac::Instruction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the function whose entry is always kept reachable
pub const DEFAULT_ENTRY: &str = "main";

/// One optimization pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    /// Unreachable instruction removal
    DeadCode,
    /// Literal substitution
    ConstantPropagation,
    /// Literal arithmetic evaluation
    ConstantFolding,
    /// `x = x` removal
    RedundantAssignment,
}

impl Pass {
    /// All passes in pipeline order
    pub const PIPELINE: [Self; 4] = [
        Self::DeadCode,
        Self::ConstantPropagation,
        Self::ConstantFolding,
        Self::RedundantAssignment,
    ];

    /// Snake-case name used in logs and configuration
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::DeadCode => "dead_code",
            Self::ConstantPropagation => "constant_propagation",
            Self::ConstantFolding => "constant_folding",
            Self::RedundantAssignment => "redundant_assignment",
        }
    }

    /// Look a pass up by [`Pass::name`]
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::PIPELINE.into_iter().find(|pass| pass.name() == name)
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Optimizer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizerConfig {
    /// Function whose `func_<name>` label seeds reachability
    pub entry_function: String,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            entry_function: DEFAULT_ENTRY.to_string(),
        }
    }
}

/// Instruction counts around one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassStats {
    /// The pass that ran
    pub pass: Pass,
    /// Instruction count on input
    pub before: usize,
    /// Instruction count on output
    pub after: usize,
}

impl PassStats {
    /// Instructions removed by the pass
    #[must_use]
    pub fn removed(&self) -> usize {
        self.before.saturating_sub(self.after)
    }
}

/// Output of a full optimizer run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Optimized {
    /// Optimized instructions
    pub code: Vec<Instruction>,
    /// Per-pass counts, in pipeline order
    pub stats: Vec<PassStats>,
}

/// Runs the pass pipeline
#[derive(Debug, Clone, Default)]
pub struct Optimizer {
    config: OptimizerConfig,
}

impl Optimizer {
    /// Optimizer with the given configuration
    #[must_use]
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Run every pass in pipeline order
    pub fn optimize(&self, code: &[Instruction]) -> Optimized {
        let mut current = code.to_vec();
        let mut stats = Vec::with_capacity(Pass::PIPELINE.len());

        for pass in Pass::PIPELINE {
            let next = self.run_pass(pass, &current);
            let pass_stats = PassStats {
                pass,
                before: current.len(),
                after: next.len(),
            };
            tracing::debug!(
                %pass,
                before = pass_stats.before,
                after = pass_stats.after,
                "optimization pass finished"
            );
            stats.push(pass_stats);
            current = next;
        }

        Optimized {
            code: current,
            stats,
        }
    }

    /// Run a single pass
    pub fn run_pass(&self, pass: Pass, code: &[Instruction]) -> Vec<Instruction> {
        match pass {
            Pass::DeadCode => dead_code::eliminate(code, &self.config.entry_function),
            Pass::ConstantPropagation => const_prop::propagate(code),
            Pass::ConstantFolding => const_fold::fold(code),
            Pass::RedundantAssignment => redundant::eliminate(code),
        }
    }
}

/// Run the whole pipeline with the default configuration
pub fn optimize(code: &[Instruction]) -> Vec<Instruction> {
    Optimizer::default().optimize(code).code
}
