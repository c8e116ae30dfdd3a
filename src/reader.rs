use std::io::{Read, Seek};
use std::path::Path;

use calamine::{open_workbook, Data, DataRef, Range, Reader, Xls, Xlsx};

use crate::error::{Result, SpendsheetError};

// ---------------------------------------------------------------------------
// Container formats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    /// Office Open XML workbook (.xlsx)
    Xlsx,
    /// Legacy BIFF workbook (.xls)
    Xls,
}

impl ContainerFormat {
    /// Pick the container from the file extension. Anything other than
    /// `.xlsx` / `.xls` is rejected before the file is touched.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("xlsx") => Ok(Self::Xlsx),
            Some("xls") => Ok(Self::Xls),
            _ => Err(SpendsheetError::UnsupportedFormat(
                path.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string()),
            )),
        }
    }
}

/// Limits applied while a sheet is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetBounds {
    /// Maximum number of sheet rows, header band included.
    pub max_rows: usize,
    /// Cells in this column or beyond are dropped while loading.
    pub columns: usize,
}

/// Load the first worksheet of a statement into memory. The workbook handle is
/// dropped before this returns.
///
/// `.xlsx` sheets are streamed cell by cell: the declared sheet extent and every
/// cell row are checked against `bounds.max_rows` before anything is kept, and
/// only columns below `bounds.columns` are stored. A `.xls` sheet is capped by
/// the format itself (65 536 rows by 256 columns) and checked once loaded.
pub fn open_first_sheet(
    path: &Path,
    format: ContainerFormat,
    bounds: SheetBounds,
) -> Result<Range<Data>> {
    match format {
        ContainerFormat::Xlsx => {
            let mut workbook: Xlsx<_> = open_workbook(path).map_err(calamine::Error::from)?;
            stream_first_sheet(&mut workbook, path, bounds)
        }
        ContainerFormat::Xls => {
            let mut workbook: Xls<_> = open_workbook(path).map_err(calamine::Error::from)?;
            let range = match workbook.worksheet_range_at(0) {
                Some(range) => range.map_err(calamine::Error::from)?,
                None => return Err(SpendsheetError::NoWorksheet(path.display().to_string())),
            };
            check_rows(range.row_count(), bounds.max_rows)?;
            Ok(range)
        }
    }
}

fn stream_first_sheet<RS: Read + Seek>(
    workbook: &mut Xlsx<RS>,
    path: &Path,
    bounds: SheetBounds,
) -> Result<Range<Data>> {
    let name = workbook
        .sheet_names()
        .into_iter()
        .next()
        .ok_or_else(|| SpendsheetError::NoWorksheet(path.display().to_string()))?;
    let mut cells = workbook
        .worksheet_cells_reader(&name)
        .map_err(calamine::Error::from)?;

    let declared = cells.dimensions();
    check_rows(declared.end.0 as usize + 1, bounds.max_rows)?;

    let mut kept = Vec::new();
    let mut end: Option<(u32, u32)> = None;
    while let Some(cell) = cells.next_cell().map_err(calamine::Error::from)? {
        if matches!(cell.get_value(), DataRef::Empty) {
            continue;
        }
        let (row, column) = cell.get_position();
        check_rows(row as usize + 1, bounds.max_rows)?;
        if column as usize >= bounds.columns {
            continue;
        }
        end = Some(match end {
            Some((r, c)) => (r.max(row), c.max(column)),
            None => (row, column),
        });
        kept.push(((row, column), Data::from(cell.get_value().clone())));
    }

    let Some(end) = end else {
        return Ok(Range::empty());
    };
    let mut range = Range::new((0, 0), end);
    for (position, value) in kept {
        range.set_value(position, value);
    }
    Ok(range)
}

fn check_rows(rows: usize, limit: usize) -> Result<()> {
    if rows > limit {
        return Err(SpendsheetError::TooManyRows { rows, limit });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Cell access
// ---------------------------------------------------------------------------

/// Row-oriented cell access over a sheet. Coordinates are 0-based and absolute:
/// row 0 is the first row of the sheet, whatever the first used row is.
pub trait CellSource {
    fn row_count(&self) -> usize;

    /// `None` when the cell doesn't exist.
    fn cell(&self, row: usize, column: usize) -> Option<String>;
}

impl CellSource for Range<Data> {
    fn row_count(&self) -> usize {
        self.end().map_or(0, |(row, _)| row as usize + 1)
    }

    fn cell(&self, row: usize, column: usize) -> Option<String> {
        let row = u32::try_from(row).ok()?;
        let column = u32::try_from(column).ok()?;
        self.get_value((row, column)).map(cell_text)
    }
}

/// Text form of a cell. Whole numbers lose the trailing ".0" so "500" stays "500".
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                format!("{}", *f as i64)
            } else {
                format!("{f}")
            }
        }
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Column reads
// ---------------------------------------------------------------------------

/// Lazy, single-pass read of one column below the header band.
#[derive(Debug)]
pub struct Column<'a, S: ?Sized> {
    source: &'a S,
    column: usize,
    next_row: usize,
    end: usize,
}

impl<S: CellSource + ?Sized> Iterator for Column<'_, S> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.next_row >= self.end {
            return None;
        }
        let value = self
            .source
            .cell(self.next_row, self.column)
            .map(|v| v.trim().to_string())
            .unwrap_or_default();
        self.next_row += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.end.saturating_sub(self.next_row);
        (left, Some(left))
    }
}

impl<S: CellSource + ?Sized> ExactSizeIterator for Column<'_, S> {}

/// Skip `header_rows` rows, then yield the trimmed text of `column` for every
/// remaining row (empty string for missing cells).
pub fn read_column<S: CellSource + ?Sized>(
    source: &S,
    column: usize,
    header_rows: usize,
) -> Column<'_, S> {
    Column {
        source,
        column,
        next_row: header_rows,
        end: source.row_count(),
    }
}
