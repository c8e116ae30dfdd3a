use serde::Serialize;

/// Label used for the bucket that absorbs categories too small (or too many) to chart.
pub const OTHER_LABEL: &str = "Other";

/// Amount as it ends up in the detail table: a number, or the raw text when it
/// could not be read as one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AmountCell {
    Parsed(f64),
    Raw(String),
}

impl AmountCell {
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Parsed(v) => Some(*v),
            Self::Raw(_) => None,
        }
    }
}

/// A classified, parsed statement row. The detail table is a list of these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub category: String,
    pub amount: AmountCell,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsolidatedRow {
    pub category: String,
    pub amount: f64,
    /// Share of the grand total as a fraction; `None` when the grand total is zero.
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub label: String,
    pub amount: f64,
    /// Share of the grand total as a fraction; `None` when the grand total is zero.
    pub percentage: Option<f64>,
}

impl ChartSlice {
    pub fn is_other(&self) -> bool {
        self.label == OTHER_LABEL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStage {
    /// The locale number parse at extraction time.
    Extraction,
    /// The lenient parse at aggregation time; the row is left out of the totals.
    Aggregation,
}

/// A per-row amount problem. Never fatal; kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowIssue {
    pub row: usize,
    pub raw: String,
    pub stage: IssueStage,
    pub reason: String,
}

/// `value / total`, or `None` when the total is zero.
pub fn share(value: f64, total: f64) -> Option<f64> {
    if total == 0.0 {
        None
    } else {
        Some(value / total)
    }
}
