use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::AmountCell;
use crate::report::{Report, Table};

/// Write `detail.csv`, `consolidated.csv` and `chart.csv` into `dir`.
/// Percentages are fractions; an empty field means the grand total was zero.
pub fn export(report: &Report, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(Table::ALL.len());

    for table in Table::ALL {
        let path = dir.join(format!("{}.csv", table.file_stem()));
        let mut wtr = csv::Writer::from_path(&path)?;
        wtr.write_record(table.headers())?;
        for row in report.rows(table) {
            let amount = match &row.amount {
                AmountCell::Parsed(v) => v.to_string(),
                AmountCell::Raw(text) => text.clone(),
            };
            if table.has_percentage() {
                let pct = row.percentage.map(|p| p.to_string()).unwrap_or_default();
                wtr.write_record([row.label.as_str(), amount.as_str(), pct.as_str()])?;
            } else {
                wtr.write_record([row.label.as_str(), amount.as_str()])?;
            }
        }
        wtr.flush()?;
        written.push(path);
    }

    Ok(written)
}
