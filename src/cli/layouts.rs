use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::layout::{self, DEFAULT_LAYOUT};

pub fn run() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Key", "Name", "Header Rows", "Narration Col", "Amount Col", "Classifier"]);
    for kind in layout::all() {
        let l = kind.layout();
        let key = if kind.key() == DEFAULT_LAYOUT {
            format!("{} (default)", kind.key())
        } else {
            kind.key().to_string()
        };
        table.add_row(vec![
            Cell::new(key),
            Cell::new(kind.name()),
            Cell::new(l.header_rows),
            Cell::new(l.narration_column),
            Cell::new(l.amount_column),
            Cell::new(l.classifier.key()),
        ]);
    }
    println!("Statement Layouts\n{table}");
    Ok(())
}
