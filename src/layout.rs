use serde::Serialize;

use crate::classifier::ClassifierKind;
use crate::error::{Result, SpendsheetError};

/// Where the data lives in one bank's statement export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Layout {
    /// Rows of preamble (account holder, branch, period...) above the first transaction.
    pub header_rows: usize,
    pub narration_column: usize,
    pub amount_column: usize,
    pub classifier: ClassifierKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    TmbSavings,
}

const ALL_LAYOUTS: &[LayoutKind] = &[LayoutKind::TmbSavings];

pub const DEFAULT_LAYOUT: &str = "tmb";

impl LayoutKind {
    pub fn key(&self) -> &'static str {
        match self {
            Self::TmbSavings => "tmb",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TmbSavings => "TMB account statement with UPI narrations",
        }
    }

    pub fn layout(&self) -> Layout {
        match self {
            Self::TmbSavings => Layout {
                header_rows: 16,
                narration_column: 1,
                amount_column: 3,
                classifier: ClassifierKind::UpiNote,
            },
        }
    }
}

pub fn all() -> &'static [LayoutKind] {
    ALL_LAYOUTS
}

pub fn get_by_key(key: &str) -> Result<LayoutKind> {
    ALL_LAYOUTS
        .iter()
        .find(|l| l.key() == key)
        .copied()
        .ok_or_else(|| SpendsheetError::UnknownLayout(key.to_string()))
}
