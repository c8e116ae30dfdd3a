use serde::Serialize;

use crate::aggregator::Aggregation;
use crate::collapse::Collapsed;
use crate::models::{AmountCell, ChartSlice, ConsolidatedRow, RowIssue, Transaction};

/// The three output tables, in workbook order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Detail,
    Consolidated,
    Chart,
}

impl Table {
    pub const ALL: [Table; 3] = [Table::Detail, Table::Consolidated, Table::Chart];

    pub fn sheet_name(&self) -> &'static str {
        match self {
            Self::Detail => "Output",
            Self::Consolidated => "Consolidated",
            Self::Chart => "Chart",
        }
    }

    pub fn file_stem(&self) -> &'static str {
        match self {
            Self::Detail => "detail",
            Self::Consolidated => "consolidated",
            Self::Chart => "chart",
        }
    }

    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            Self::Detail => &["Category", "Amount"],
            Self::Consolidated | Self::Chart => &["Category", "Amount", "Percentage"],
        }
    }

    pub fn has_percentage(&self) -> bool {
        !matches!(self, Self::Detail)
    }
}

/// One output row: label, amount (number or raw text), optional share.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub label: String,
    pub amount: AmountCell,
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub detail: Vec<Transaction>,
    pub consolidated: Vec<ConsolidatedRow>,
    pub chart: Vec<ChartSlice>,
    pub grand_total: f64,
    /// Amount problems from both parse stages, ordered by row.
    pub issues: Vec<RowIssue>,
}

impl Report {
    pub fn rows(&self, table: Table) -> Vec<ReportRow> {
        match table {
            Table::Detail => self
                .detail
                .iter()
                .map(|t| ReportRow {
                    label: t.category.clone(),
                    amount: t.amount.clone(),
                    percentage: None,
                })
                .collect(),
            Table::Consolidated => self
                .consolidated
                .iter()
                .map(|r| ReportRow {
                    label: r.category.clone(),
                    amount: AmountCell::Parsed(r.amount),
                    percentage: r.percentage,
                })
                .collect(),
            Table::Chart => self
                .chart
                .iter()
                .map(|s| ReportRow {
                    label: s.label.clone(),
                    amount: AmountCell::Parsed(s.amount),
                    percentage: s.percentage,
                })
                .collect(),
        }
    }

    /// Rows whose amount was left out of the totals.
    pub fn excluded_rows(&self) -> usize {
        self.detail.iter().filter(|t| t.amount.value().is_none()).count()
    }
}

pub fn assemble(aggregation: Aggregation, collapsed: Collapsed) -> Report {
    Report {
        detail: aggregation.detail,
        consolidated: collapsed.consolidated,
        chart: collapsed.chart,
        grand_total: aggregation.grand_total,
        issues: aggregation.issues,
    }
}
