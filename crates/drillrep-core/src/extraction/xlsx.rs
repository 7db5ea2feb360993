use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx};

use crate::error::DrillrepError;
use crate::extraction::TableSource;
use crate::grid::Grid;

/// Reads an xlsx workbook; each worksheet is one table, in sheet order.
///
/// Cells keep their absolute positions: a sheet whose used range starts at
/// `C5` still yields a grid with `C5` at row 4, column 2.
pub struct XlsxTableSource;

impl TableSource for XlsxTableSource {
    fn read_tables(&self, bytes: &[u8]) -> Result<Vec<Grid>, DrillrepError> {
        let cursor = Cursor::new(bytes);
        let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
            .map_err(|e| DrillrepError::TableLoad(format!("failed to open xlsx: {e}")))?;

        let sheets = workbook.worksheets();
        tracing::debug!(sheets = sheets.len(), "opened workbook");
        Ok(sheets
            .into_iter()
            .map(|(_, range)| range_to_grid(&range))
            .collect())
    }

    fn backend_name(&self) -> &str {
        "xlsx"
    }
}

fn range_to_grid(range: &Range<Data>) -> Grid {
    let Some((first_row, first_col)) = range.start() else {
        return Grid::default();
    };

    let mut rows: Vec<Vec<String>> = vec![Vec::new(); first_row as usize];
    for row in range.rows() {
        let mut cells = vec![String::new(); first_col as usize];
        cells.extend(row.iter().map(cell_text));
        rows.push(cells);
    }
    Grid::new(rows)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        // Debug keeps the fraction, so a footer total reads "24.0" as it
        // does in the text exports.
        Data::Float(f) => format!("{f:?}"),
        Data::Int(i) => i.to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
