//! Export and output configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Export and output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExportConfig {
    /// Where to write the records; nothing is written when unset
    pub output_path: Option<PathBuf>,

    /// Pretty-print the JSON output
    pub pretty: bool,

    /// Exit with failure when a run could not return every record
    pub strict: bool,
}
