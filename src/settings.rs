use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classifier;
use crate::error::{Result, SpendsheetError};
use crate::layout::{self, Layout, DEFAULT_LAYOUT};

pub const DEFAULT_MAX_ROWS: usize = 100_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_layout")]
    pub layout: String,
    /// Per-field overrides on top of the named layout.
    #[serde(default)]
    pub header_rows: Option<usize>,
    #[serde(default)]
    pub narration_column: Option<usize>,
    #[serde(default)]
    pub amount_column: Option<usize>,
    #[serde(default)]
    pub classifier: Option<String>,
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
    /// Where reports go when no output path is given; defaults to the input's folder.
    #[serde(default)]
    pub output_dir: Option<String>,
}

fn default_layout() -> String {
    DEFAULT_LAYOUT.to_string()
}

fn default_max_rows() -> usize {
    DEFAULT_MAX_ROWS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layout: default_layout(),
            header_rows: None,
            narration_column: None,
            amount_column: None,
            classifier: None,
            max_rows: default_max_rows(),
            output_dir: None,
        }
    }
}

impl Settings {
    /// The named layout (`layout_key` wins over the configured one) with any
    /// per-field overrides applied.
    pub fn resolve_layout(&self, layout_key: Option<&str>) -> Result<Layout> {
        let key = layout_key.unwrap_or(&self.layout);
        let mut resolved = layout::get_by_key(key)?.layout();
        if let Some(n) = self.header_rows {
            resolved.header_rows = n;
        }
        if let Some(n) = self.narration_column {
            resolved.narration_column = n;
        }
        if let Some(n) = self.amount_column {
            resolved.amount_column = n;
        }
        if let Some(key) = &self.classifier {
            resolved.classifier = classifier::get_by_key(key)?;
        }
        Ok(resolved)
    }

    pub fn output_dir(&self) -> Option<PathBuf> {
        self.output_dir.as_deref().map(|d| PathBuf::from(shellexpand_path(d)))
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("spendsheet")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// Read settings from `path` (or the default location). A missing file means
/// defaults; a malformed one is an error.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(settings_path);
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(&path)?;
    serde_json::from_str(&content)
        .map_err(|e| SpendsheetError::Settings(format!("{}: {e}", path.display())))
}

fn shellexpand_path(path: &str) -> String {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return format!("{}{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}
