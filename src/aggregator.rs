use std::collections::HashMap;

use crate::amount::{parse_lenient, AmountParseFailure};
use crate::models::{AmountCell, CategoryTotal, IssueStage, RowIssue, Transaction};

/// Per-category totals, kept in first-seen order so ties sort the same way
/// every run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    entries: Vec<CategoryTotal>,
    index: HashMap<String, usize>,
}

impl CategoryTotals {
    pub fn add(&mut self, category: &str, amount: f64) {
        match self.index.get(category) {
            Some(&i) => self.entries[i].amount += amount,
            None => {
                self.index.insert(category.to_string(), self.entries.len());
                self.entries.push(CategoryTotal {
                    category: category.to_string(),
                    amount,
                });
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, category: &str) -> Option<f64> {
        self.index.get(category).map(|&i| self.entries[i].amount)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CategoryTotal> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, f64)> for CategoryTotals {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut totals = Self::default();
        for (category, amount) in iter {
            totals.add(&category, amount);
        }
        totals
    }
}

pub struct Aggregation {
    /// One entry per zipped row, failed amounts included as raw text.
    pub detail: Vec<Transaction>,
    pub totals: CategoryTotals,
    /// Sum of every amount that parsed.
    pub grand_total: f64,
    /// Amount problems from both parse stages, in row order.
    pub issues: Vec<RowIssue>,
}

/// Zip categories with extracted amounts (truncating to the shorter side) and
/// sum per category.
///
/// An amount that failed extraction goes straight into `detail` as its raw
/// text. Extracted text is parsed leniently; text that still isn't a number is
/// kept raw too. Raw rows are left out of `totals` and `grand_total`.
pub fn aggregate<C, A>(categories: C, amounts: A) -> Aggregation
where
    C: IntoIterator<Item = String>,
    A: IntoIterator<Item = Result<String, AmountParseFailure>>,
{
    let mut detail = Vec::new();
    let mut totals = CategoryTotals::default();
    let mut grand_total = 0.0;
    let mut issues = Vec::new();

    for (row, (category, extracted)) in categories.into_iter().zip(amounts).enumerate() {
        let amount = match extracted {
            Ok(text) => {
                let amount = parse_lenient(&text);
                if let AmountCell::Raw(ref raw) = amount {
                    issues.push(RowIssue {
                        row,
                        raw: raw.clone(),
                        stage: IssueStage::Aggregation,
                        reason: "not a number; excluded from totals".to_string(),
                    });
                }
                amount
            }
            Err(failure) => {
                issues.push(RowIssue {
                    row,
                    raw: failure.raw.clone(),
                    stage: IssueStage::Extraction,
                    reason: failure.reason.to_string(),
                });
                AmountCell::Raw(failure.raw)
            }
        };
        if let AmountCell::Parsed(value) = amount {
            totals.add(&category, value);
            grand_total += value;
        }
        detail.push(Transaction { category, amount });
    }

    Aggregation {
        detail,
        totals,
        grand_total,
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::normalize_amount;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// Amounts as they come out of extraction.
    fn extracted(items: &[&str]) -> Vec<Result<String, AmountParseFailure>> {
        items.iter().map(|s| normalize_amount(s)).collect()
    }

    /// Text that passed extraction as-is, so only the lenient parse applies.
    fn passed(items: &[&str]) -> Vec<Result<String, AmountParseFailure>> {
        items.iter().map(|s| Ok(s.to_string())).collect()
    }

    #[test]
    fn test_sums_per_category() {
        let agg = aggregate(
            strings(&["Food", "Rent", "Food"]),
            extracted(&["100", "5,000", "50.5"]),
        );
        assert_eq!(agg.totals.len(), 2);
        assert_eq!(agg.totals.get("Food"), Some(150.5));
        assert_eq!(agg.totals.get("Rent"), Some(5000.0));
        assert_eq!(agg.grand_total, 5150.5);
        assert!(agg.issues.is_empty());
    }

    #[test]
    fn test_truncates_to_shorter_sequence() {
        let agg = aggregate(strings(&["A", "B", "C"]), extracted(&["1", "2"]));
        assert_eq!(agg.detail.len(), 2);
        assert_eq!(agg.totals.get("C"), None);

        let agg = aggregate(strings(&["A"]), extracted(&["1", "2", "3"]));
        assert_eq!(agg.detail.len(), 1);
        assert_eq!(agg.grand_total, 1.0);
    }

    #[test]
    fn test_extraction_failures_are_never_reparsed() {
        let agg = aggregate(
            strings(&["Fuel", "Tea", "Rent"]),
            extracted(&["Rs 250", "abc5", "1,000"]),
        );
        assert_eq!(agg.detail.len(), 3);
        assert_eq!(agg.detail[0].amount, AmountCell::Raw("Rs 250".to_string()));
        assert_eq!(agg.detail[1].amount, AmountCell::Raw("abc5".to_string()));
        assert_eq!(agg.detail[2].amount, AmountCell::Parsed(1000.0));
        assert_eq!(agg.grand_total, 1000.0);
        assert_eq!(agg.totals.get("Fuel"), None);
        assert_eq!(agg.totals.get("Tea"), None);
        assert_eq!(agg.totals.len(), 1);
        assert_eq!(agg.issues.len(), 2);
        assert!(agg.issues.iter().all(|i| i.stage == IssueStage::Extraction));
        assert_eq!(agg.issues[0].row, 0);
        assert_eq!(agg.issues[1].row, 1);
    }

    #[test]
    fn test_unparsed_amount_excluded_but_kept_in_detail() {
        let agg = aggregate(
            strings(&["Coffee", "Unknown", "Coffee"]),
            passed(&["1234.5", "0", "abc"]),
        );
        assert_eq!(agg.detail.len(), 3);
        assert_eq!(agg.detail[2].amount, AmountCell::Raw("abc".to_string()));
        assert_eq!(agg.totals.get("Coffee"), Some(1234.5));
        assert_eq!(agg.totals.get("Unknown"), Some(0.0));
        assert_eq!(agg.grand_total, 1234.5);
        assert_eq!(agg.issues.len(), 1);
        assert_eq!(agg.issues[0].row, 2);
        assert_eq!(agg.issues[0].stage, IssueStage::Aggregation);
    }

    #[test]
    fn test_lenient_parse_applies_to_extracted_text() {
        let agg = aggregate(strings(&["Fuel"]), passed(&["INR 250"]));
        assert_eq!(agg.detail[0].amount, AmountCell::Parsed(250.0));
        assert_eq!(agg.grand_total, 250.0);
    }

    #[test]
    fn test_category_with_only_failed_rows_is_absent() {
        let agg = aggregate(strings(&["Ghost"]), extracted(&["n/a"]));
        assert!(agg.totals.is_empty());
        assert_eq!(agg.grand_total, 0.0);
    }

    #[test]
    fn test_totals_keep_first_seen_order() {
        let agg = aggregate(
            strings(&["B", "A", "B", "C"]),
            extracted(&["1", "2", "3", "4"]),
        );
        let order: Vec<&str> = agg.totals.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_totals_sum_to_grand_total() {
        let agg = aggregate(
            strings(&["A", "B", "A", "C", "B"]),
            extracted(&["0.1", "0.2", "0.3", "-0.05", "12"]),
        );
        let sum: f64 = agg.totals.iter().map(|t| t.amount).sum();
        assert!((sum - agg.grand_total).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input() {
        let agg = aggregate(Vec::<String>::new(), extracted(&[]));
        assert!(agg.detail.is_empty());
        assert!(agg.totals.is_empty());
        assert_eq!(agg.grand_total, 0.0);
    }
}
