use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use datasynth_core::DEFAULT_MAX_DEPTH;

/// Options for the synthesis engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Seed for the engine's random source. `None` draws one from the OS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Deepest entity tree accepted by `generate`.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Outcome of exporting a record sequence to a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSummary {
    pub format: String,
    pub path: PathBuf,
    pub records: u64,
    pub bytes_written: u64,
}
