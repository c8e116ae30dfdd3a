use std::io::Write;
use std::path::Path;

use rust_xlsxwriter::{
    Chart, ChartDataLabel, ChartDataLabelPosition, ChartLegendPosition, ChartType, Color, Format,
    Workbook, Worksheet,
};
use tempfile::NamedTempFile;

use crate::error::{Result, SpendsheetError};
use crate::models::AmountCell;
use crate::report::{Report, ReportRow, Table};

const CHART_TITLE: &str = "Expense Categories";
const NOT_APPLICABLE: &str = "N/A";

/// Render the report as an `.xlsx` workbook: Output, Consolidated and Chart
/// sheets, the last one holding the pie chart and opening as the active sheet.
pub fn render_workbook(report: &Report) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold().set_background_color(Color::Yellow);
    let percent_format = Format::new().set_num_format("0.00%");

    for table in Table::ALL {
        let rows = report.rows(table);
        let sheet = workbook.add_worksheet();
        sheet.set_name(table.sheet_name())?;
        write_table(sheet, table, &rows, &header_format, &percent_format)?;

        if table == Table::Chart {
            if !rows.is_empty() {
                insert_pie_chart(sheet, rows.len() as u32)?;
            }
            sheet.set_active(true);
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_table(
    sheet: &mut Worksheet,
    table: Table,
    rows: &[ReportRow],
    header_format: &Format,
    percent_format: &Format,
) -> Result<()> {
    for (col, header) in table.headers().iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, header_format)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_string(r, 0, &row.label)?;
        match &row.amount {
            AmountCell::Parsed(v) => sheet.write_number(r, 1, *v)?,
            AmountCell::Raw(text) => sheet.write_string(r, 1, text)?,
        };
        if table.has_percentage() {
            match row.percentage {
                Some(p) => sheet.write_number_with_format(r, 2, p, percent_format)?,
                None => sheet.write_string(r, 2, NOT_APPLICABLE)?,
            };
        }
    }

    sheet.autofit();
    Ok(())
}

fn insert_pie_chart(sheet: &mut Worksheet, slices: u32) -> Result<()> {
    let sheet_name = Table::Chart.sheet_name();
    let mut chart = Chart::new(ChartType::Pie);
    chart.title().set_name(CHART_TITLE);
    chart.legend().set_position(ChartLegendPosition::Right);
    chart
        .add_series()
        .set_categories((sheet_name, 1, 0, slices, 0))
        .set_values((sheet_name, 1, 1, slices, 1))
        .set_data_label(
            ChartDataLabel::new()
                .show_category_name()
                .show_percentage()
                .set_position(ChartDataLabelPosition::OutsideEnd),
        );
    sheet.insert_chart(1, 4, &chart)?;
    Ok(())
}

/// Write the workbook through a temp file next to `output`, then move it into
/// place. A failed run never leaves a half-written report behind.
pub fn write_report(report: &Report, output: &Path) -> Result<()> {
    let bytes = render_workbook(report)?;
    if bytes.is_empty() {
        return Err(SpendsheetError::EmptyOutput(output.display().to_string()));
    }

    let dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(output)?;
    Ok(())
}
