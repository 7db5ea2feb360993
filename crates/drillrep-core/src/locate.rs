use crate::error::DrillrepError;
use crate::grid::Grid;
use crate::rules::schema::{BoundsDef, ColumnDef};
use std::ops::Range;

/// True if every marker appears (case-sensitive substring) in some cell of the row.
/// Different markers may be satisfied by different cells.
pub fn row_contains_all(row: &[String], markers: &[&str]) -> bool {
    markers
        .iter()
        .all(|marker| row.iter().any(|cell| cell.contains(marker)))
}

/// Index of the first row containing all markers.
pub fn find_row(grid: &Grid, markers: &[&str]) -> Result<usize, DrillrepError> {
    grid.rows()
        .iter()
        .position(|row| row_contains_all(row, markers))
        .ok_or_else(|| DrillrepError::section_not_found(markers))
}

/// Column index of the first cell (row-major) containing the marker.
pub fn find_column(grid: &Grid, marker: &str) -> Result<usize, DrillrepError> {
    grid.rows()
        .iter()
        .find_map(|row| row.iter().position(|cell| cell.contains(marker)))
        .ok_or_else(|| DrillrepError::section_not_found(&[marker]))
}

pub fn resolve_column(grid: &Grid, column: &ColumnDef) -> Result<usize, DrillrepError> {
    let index = match column {
        ColumnDef::Fixed(index) => *index as isize,
        ColumnDef::Relative { marker, offset } => find_column(grid, marker)? as isize + offset,
    };
    if index < 0 || index as usize >= grid.width() {
        return Err(DrillrepError::ColumnOutOfRange {
            column: index,
            width: grid.width(),
        });
    }
    Ok(index as usize)
}

/// Resolve a section's row window. Offsets are clamped to the grid; a window
/// whose end falls before its start is empty.
pub fn bounded_rows(grid: &Grid, bounds: &BoundsDef) -> Result<Range<usize>, DrillrepError> {
    let start_row = find_row(grid, &bounds.start.markers())?;
    let end_row = find_row(grid, &bounds.end.markers())?;

    let height = grid.height() as isize;
    let start = (start_row as isize + bounds.start_offset).clamp(0, height) as usize;
    let end = (end_row as isize + bounds.end_offset).clamp(0, height) as usize;

    tracing::debug!(start_row, end_row, start, end, "bounded section rows");
    Ok(start..end.max(start))
}
