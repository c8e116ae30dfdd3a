use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpendsheetError {
    #[error("Unsupported file type: {0} (expected .xlsx or .xls)")]
    UnsupportedFormat(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Workbook has no worksheets: {0}")]
    NoWorksheet(String),

    #[error("Sheet reaches row {rows}, limit is {limit} rows")]
    TooManyRows { rows: usize, limit: usize },

    #[error("Unknown layout: {0}")]
    UnknownLayout(String),

    #[error("Unknown classifier: {0}")]
    UnknownClassifier(String),

    #[error("XLSX write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not persist report: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Output file not generated or empty: {0}")]
    EmptyOutput(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, SpendsheetError>;
