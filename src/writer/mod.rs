//! Output sinks for a finished [`Report`](crate::report::Report): an `.xlsx`
//! workbook with a pie chart, and plain CSV files.

pub mod csv_export;
pub mod xlsx;
