use std::path::{Path, PathBuf};

use calamine::{Data, Range};
use tracing::{debug, info, warn};

use crate::aggregator::aggregate;
use crate::amount::normalize_amount;
use crate::classifier::Classifier;
use crate::collapse::{collapse, CollapsePolicy};
use crate::error::{Result, SpendsheetError};
use crate::layout::Layout;
use crate::models::IssueStage;
use crate::reader::{open_first_sheet, read_column, CellSource, ContainerFormat, SheetBounds};
use crate::report::{assemble, Report};
use crate::writer;

#[derive(Debug, Clone, Copy)]
pub struct ConvertOptions {
    pub layout: Layout,
    pub policy: CollapsePolicy,
    pub max_rows: usize,
}

pub struct ConversionOutcome {
    pub report: Report,
    pub output: PathBuf,
    pub bytes: u64,
}

// ---------------------------------------------------------------------------
// Core: sheet → report, no I/O
// ---------------------------------------------------------------------------

/// Run the extraction, classification, aggregation and collapsing steps over
/// an in-memory sheet. Narrations and amounts are read in two separate passes.
pub fn build_report<S: CellSource + ?Sized>(
    source: &S,
    layout: &Layout,
    policy: CollapsePolicy,
) -> Report {
    let classifier = Classifier::new(layout.classifier);
    let categories = read_column(source, layout.narration_column, layout.header_rows)
        .map(|narration| classifier.classify(&narration));

    let amounts = read_column(source, layout.amount_column, layout.header_rows)
        .map(|raw| normalize_amount(&raw));

    let aggregation = aggregate(categories, amounts);
    if aggregation.totals.is_empty() {
        debug!("no rows with a numeric amount");
    }
    debug!(
        classifier = classifier.kind().key(),
        categories = aggregation.totals.len(),
        "rows aggregated"
    );
    let collapsed = collapse(&aggregation.totals, aggregation.grand_total, policy);
    assemble(aggregation, collapsed)
}

// ---------------------------------------------------------------------------
// File-level steps
// ---------------------------------------------------------------------------

/// Check the container format and load the first sheet, keeping only the
/// columns `layout` reads and enforcing the row limit while loading.
pub fn load_statement(input: &Path, layout: &Layout, max_rows: usize) -> Result<Range<Data>> {
    let format = ContainerFormat::from_path(input)?;
    debug!(?format, path = %input.display(), "opening statement");
    let bounds = SheetBounds {
        max_rows,
        columns: layout.narration_column.max(layout.amount_column) + 1,
    };
    let sheet = open_first_sheet(input, format, bounds)?;
    debug!(rows = sheet.row_count(), "sheet loaded");
    Ok(sheet)
}

pub fn load_report(input: &Path, options: &ConvertOptions) -> Result<Report> {
    let sheet = load_statement(input, &options.layout, options.max_rows)?;
    let report = build_report(&sheet, &options.layout, options.policy);
    log_issues(&report);
    info!(
        rows = report.detail.len(),
        categories = report.consolidated.len(),
        slices = report.chart.len(),
        grand_total = report.grand_total,
        "statement processed"
    );
    Ok(report)
}

/// Full conversion: read `input`, write the workbook to `output`, and check
/// that a non-empty file actually landed there.
pub fn convert(input: &Path, output: &Path, options: &ConvertOptions) -> Result<ConversionOutcome> {
    let report = load_report(input, options)?;
    writer::xlsx::write_report(&report, output)?;

    let bytes = std::fs::metadata(output).map(|m| m.len()).unwrap_or(0);
    if bytes == 0 {
        return Err(SpendsheetError::EmptyOutput(output.display().to_string()));
    }
    info!(path = %output.display(), bytes, "report written");

    Ok(ConversionOutcome {
        report,
        output: output.to_path_buf(),
        bytes,
    })
}

/// `<stem>-budget.xlsx`, in `output_dir` if given, else next to the input.
pub fn default_output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "statement".to_string());
    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    dir.join(format!("{stem}-budget.xlsx"))
}

fn log_issues(report: &Report) {
    for issue in &report.issues {
        match issue.stage {
            IssueStage::Extraction => warn!(
                row = issue.row,
                raw = %issue.raw,
                "failed to parse amount ({}); row left out of totals",
                issue.reason
            ),
            IssueStage::Aggregation => warn!(
                row = issue.row,
                raw = %issue.raw,
                "amount is not a number; row left out of totals"
            ),
        }
    }
}
