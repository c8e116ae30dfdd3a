use crate::aggregator::CategoryTotals;
use crate::models::{share, ChartSlice, ConsolidatedRow, OTHER_LABEL};

/// How many categories get their own pie slice, and how big they must be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollapsePolicy {
    /// Fraction of the grand total a category needs to be charted on its own.
    pub threshold_ratio: f64,
    /// Most categories charted on their own; "Other" comes on top of these.
    pub max_slices: usize,
}

impl Default for CollapsePolicy {
    fn default() -> Self {
        Self {
            threshold_ratio: 0.02,
            max_slices: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Collapsed {
    /// Every category, largest first.
    pub consolidated: Vec<ConsolidatedRow>,
    /// Charted categories, largest first, then "Other" if anything was folded.
    pub chart: Vec<ChartSlice>,
}

/// Sort categories by total (descending, ties in first-seen order) and pick the
/// ones big enough to chart. Everything else is summed into one "Other" slice.
pub fn collapse(totals: &CategoryTotals, grand_total: f64, policy: CollapsePolicy) -> Collapsed {
    let mut sorted: Vec<_> = totals.iter().collect();
    // sort_by is stable, so equal totals keep insertion order.
    sorted.sort_by(|a, b| b.amount.total_cmp(&a.amount));

    let threshold = grand_total * policy.threshold_ratio;
    let mut consolidated = Vec::with_capacity(sorted.len());
    let mut chart = Vec::new();
    let mut other_total = 0.0;

    for entry in sorted {
        let reportable = entry.amount >= threshold
            && chart.len() < policy.max_slices
            && entry.category != OTHER_LABEL;
        if reportable {
            chart.push(ChartSlice {
                label: entry.category.clone(),
                amount: entry.amount,
                percentage: share(entry.amount, grand_total),
            });
        } else {
            other_total += entry.amount;
        }
        consolidated.push(ConsolidatedRow {
            category: entry.category.clone(),
            amount: entry.amount,
            percentage: share(entry.amount, grand_total),
        });
    }

    if other_total > 0.0 {
        chart.push(ChartSlice {
            label: OTHER_LABEL.to_string(),
            amount: other_total,
            percentage: share(other_total, grand_total),
        });
    }

    Collapsed {
        consolidated,
        chart,
    }
}
