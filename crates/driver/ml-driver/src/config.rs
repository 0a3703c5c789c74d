//! Compilation options

use anyhow::{Context as _, Result};
use ml_opt::{DEFAULT_ENTRY, OptimizerConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File looked up by [`CompileOptions::find_in_dir`]
pub const CONFIG_FILE: &str = "minilang.toml";

/// Options for one compilation
///
/// Every key is optional in the TOML form:
///
/// ```toml
/// entry_function = "main"
/// optimize = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileOptions {
    /// Function whose entry label is always reachable during dead-code
    /// elimination
    pub entry_function: String,

    /// Run the optimizer; when off the optimized listing equals the raw one
    pub optimize: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            entry_function: DEFAULT_ENTRY.to_string(),
            optimize: true,
        }
    }
}

impl CompileOptions {
    /// Parse options from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or names an unknown key.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse compile options")
    }

    /// Load options from a file
    ///
    /// # Errors
    ///
    /// Returns an error naming `path` if it cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse options file: {}", path.display()))
    }

    /// Load `minilang.toml` from `dir`, or the defaults if it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn find_in_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            Self::from_file(&path)
        } else {
            tracing::debug!(dir = %dir.display(), "no options file, using defaults");
            Ok(Self::default())
        }
    }

    /// Optimizer settings derived from these options
    pub fn optimizer_config(&self) -> OptimizerConfig {
        OptimizerConfig {
            entry_function: self.entry_function.clone(),
        }
    }
}
