use regex::Regex;
use serde::Serialize;

use crate::error::{Result, SpendsheetError};

/// Label for narrations that don't follow the expected structure.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// UPI narrations look like `UPI/<ref>/<payee>/<bank>/<note>/...`; the note the
/// payer typed is the category.
const UPI_NOTE_PATTERN: &str = r"^UPI/[^/]+/[^/]+/[^/]+/([^/]+)";

// ---------------------------------------------------------------------------
// Classifier kinds: enum dispatch, one per statement family
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    UpiNote,
}

const ALL_CLASSIFIERS: &[ClassifierKind] = &[ClassifierKind::UpiNote];

impl ClassifierKind {
    pub fn key(&self) -> &'static str {
        match self {
            Self::UpiNote => "upi_note",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::UpiNote => "UPI payment note (5th '/' field)",
        }
    }

    fn pattern(&self) -> &'static str {
        match self {
            Self::UpiNote => UPI_NOTE_PATTERN,
        }
    }
}

pub fn get_by_key(key: &str) -> Result<ClassifierKind> {
    ALL_CLASSIFIERS
        .iter()
        .find(|c| c.key() == key)
        .copied()
        .ok_or_else(|| SpendsheetError::UnknownClassifier(key.to_string()))
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// A compiled narration classifier. Build once, call `classify` per row.
#[derive(Debug, Clone)]
pub struct Classifier {
    kind: ClassifierKind,
    pattern: Regex,
}

impl Classifier {
    pub fn new(kind: ClassifierKind) -> Self {
        let pattern = Regex::new(kind.pattern()).expect("built-in narration pattern is valid");
        Self { kind, pattern }
    }

    pub fn kind(&self) -> ClassifierKind {
        self.kind
    }

    /// Category label for a narration, or `"Unknown"` when the pattern doesn't
    /// match from the start of the string.
    pub fn classify(&self, narration: &str) -> String {
        self.pattern
            .captures(narration)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string())
    }
}
