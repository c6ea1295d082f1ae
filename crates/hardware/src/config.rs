//! Configuration system for the APEX simulator.
//!
//! This module defines the configuration structures used to parameterize a run.
//! It provides:
//! 1. **Defaults:** Baseline machine constants (code base, data memory size, dump width).
//! 2. **Structures:** Hierarchical config for general, memory and report settings.
//! 3. **Loading:** JSON parsing from a string or a file.
//!
//! Every field is optional in JSON; a missing field falls back to its default,
//! and `Config::default()` reproduces the classic APEX machine.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::constants::INSTRUCTION_WIDTH;
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    use crate::common::constants;

    /// Byte address of the first instruction.
    pub const CODE_BASE: u32 = constants::CODE_BASE;

    /// Number of 32-bit words in data memory.
    pub const DATA_WORDS: usize = constants::DATA_MEMORY_WORDS;

    /// Number of registers shown in the final state dump.
    pub const DUMP_REGISTERS: usize = constants::DUMP_REGS;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use apex_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace_instructions": true, "code_base": 8000 },
///     "memory": { "data_words": 256 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.general.code_base, 8000);
/// assert_eq!(config.memory.data_words, 256);
/// assert_eq!(config.report.dump_registers, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Data memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Final state dump configuration
    #[serde(default)]
    pub report: ReportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            memory: MemoryConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid JSON or a field has the wrong type.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Unreadable`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks that a program of `instructions` entries fits above `code_base`.
    ///
    /// The address one past the last instruction must also be representable,
    /// since Fetch advances to it and control transfers may target it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CodeRangeOverflow`] if that address exceeds `u32::MAX`.
    pub fn check_code_range(&self, instructions: usize) -> Result<(), ConfigError> {
        let code_base = self.general.code_base;
        u32::try_from(instructions)
            .ok()
            .and_then(|count| count.checked_mul(INSTRUCTION_WIDTH))
            .and_then(|span| code_base.checked_add(span))
            .map(|_| ())
            .ok_or(ConfigError::CodeRangeOverflow {
                code_base,
                instructions,
            })
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Force the per-cycle stage trace on, even for silent runs
    #[serde(default)]
    pub trace_instructions: bool,

    /// Byte address of instruction 0 (defaults to 4000)
    #[serde(default = "GeneralConfig::default_code_base")]
    pub code_base: u32,
}

impl GeneralConfig {
    /// Returns the default code base address.
    fn default_code_base() -> u32 {
        defaults::CODE_BASE
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            code_base: defaults::CODE_BASE,
        }
    }
}

/// Data memory configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryConfig {
    /// Data memory size in 32-bit words
    #[serde(default = "MemoryConfig::default_data_words")]
    pub data_words: usize,
}

impl MemoryConfig {
    fn default_data_words() -> usize {
        defaults::DATA_WORDS
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            data_words: defaults::DATA_WORDS,
        }
    }
}

/// Final state dump configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportConfig {
    /// How many registers (from R0 upwards) the final dump lists
    #[serde(default = "ReportConfig::default_dump_registers")]
    pub dump_registers: usize,
}

impl ReportConfig {
    fn default_dump_registers() -> usize {
        defaults::DUMP_REGISTERS
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dump_registers: defaults::DUMP_REGISTERS,
        }
    }
}
