use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::fmt::{percent, rupees};
use crate::pipeline;
use crate::report::Report;
use crate::settings::Settings;

pub fn run(settings: &Settings, file: &str, layout: Option<&str>, json: bool) -> Result<()> {
    let input = PathBuf::from(file);
    let options = super::convert_options(settings, layout)?;
    let report = pipeline::load_report(&input, &options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Spending by Category\n{}", consolidated_table(&report));
    println!("\nChart Slices\n{}", chart_table(&report));

    let excluded = report.excluded_rows();
    if excluded > 0 {
        println!(
            "\n{}",
            format!("{excluded} row(s) left out of the totals (amount not a number)").yellow()
        );
    }
    Ok(())
}

fn consolidated_table(report: &Report) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Category", "Amount", "%"]);
    for row in &report.consolidated {
        table.add_row(vec![
            Cell::new(&row.category),
            Cell::new(rupees(row.amount)),
            Cell::new(percent(row.percentage)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(rupees(report.grand_total)),
        Cell::new(""),
    ]);
    table
}

fn chart_table(report: &Report) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Slice", "Amount", "%"]);
    for slice in &report.chart {
        let label = if slice.is_other() {
            Cell::new(slice.label.as_str().dimmed())
        } else {
            Cell::new(&slice.label)
        };
        table.add_row(vec![
            label,
            Cell::new(rupees(slice.amount)),
            Cell::new(percent(slice.percentage)),
        ]);
    }
    table
}
