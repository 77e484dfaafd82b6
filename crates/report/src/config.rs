//! Conversion settings.

use crate::error::Result;
use crate::index::DuplicateIdPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tilia_sheet::GridLayout;

/// Output produced for each input document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One CSV of the dense grid per document.
    Crunch,
    /// One folder per document with the grid and its metadata.
    #[default]
    Report,
}

/// Settings shared by every document of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    pub mode: Mode,
    pub grid: GridLayout,
    /// Geochronology analysis unit the report layout assumes.
    pub expected_analysis_unit: String,
    pub duplicate_ids: DuplicateIdPolicy,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            grid: GridLayout::default(),
            expected_analysis_unit: "Depth".to_string(),
            duplicate_ids: DuplicateIdPolicy::default(),
        }
    }
}

impl ConvertConfig {
    /// Parse a JSON config; missing keys fall back to defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }
}
