use crate::error::DrillrepError;
use crate::grid::Grid;
use crate::locate;
use crate::model::FieldValues;
use crate::parsing::values::join_lines;
use crate::rules::schema::PositionalSectionDef;
use serde_json::Value;

/// Assign the cells of one column, row by row, to an ordered list of field names.
///
/// The bounded window must hold exactly as many rows as there are fields;
/// a shorter or longer window means the layout drifted and nothing is assigned.
pub fn extract_positional(
    grid: &Grid,
    section: &str,
    def: &PositionalSectionDef,
) -> Result<FieldValues, DrillrepError> {
    let rows = locate::bounded_rows(grid, &def.bounds)?;
    let column = locate::resolve_column(grid, &def.column)?;

    if rows.len() != def.fields.len() {
        return Err(DrillrepError::FieldCountMismatch {
            section: section.to_string(),
            expected: def.fields.len(),
            found: rows.len(),
        });
    }
    tracing::debug!(section, column, rows = ?rows, "positional section");

    let mut values = FieldValues::new();
    for (field, row) in def.fields.iter().zip(rows) {
        let raw = grid.cell(row, column).unwrap_or_default();
        let text = if def.join_lines {
            join_lines(raw)
        } else {
            raw.trim().to_string()
        };
        values.insert(field.clone(), Value::String(text));
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::schema::{BoundsDef, ColumnDef, MarkerDef};

    fn def(start_offset: isize, end_offset: isize, fields: &[&str], join_lines: bool) -> PositionalSectionDef {
        PositionalSectionDef {
            bounds: BoundsDef {
                start: MarkerDef::Single("24 HOURS SUMMARY".into()),
                end: MarkerDef::Single("STATUS".into()),
                start_offset,
                end_offset,
            },
            column: ColumnDef::Fixed(1),
            fields: fields.iter().map(|f| f.to_string()).collect(),
            join_lines,
        }
    }

    fn grid() -> Grid {
        Grid::from_rows(vec![
            vec!["24 HOURS SUMMARY", "Drilled ahead\nto 1,500 m"],
            vec!["24 HOURS FORECAST", " Continue drilling "],
            vec!["STATUS", "Drilling"],
        ])
    }

    #[test]
    fn test_inclusive_window_assigns_in_order() {
        let values = extract_positional(
            &grid(),
            "summary",
            &def(0, 1, &["hours_24_summary", "hours_24_forecast", "status"], true),
        )
        .unwrap();
        assert_eq!(values["hours_24_summary"], "Drilled ahead to 1,500 m");
        assert_eq!(values["hours_24_forecast"], "Continue drilling");
        assert_eq!(values["status"], "Drilling");
    }

    #[test]
    fn test_without_join_lines_keeps_breaks() {
        let values = extract_positional(&grid(), "summary", &def(0, 0, &["a", "b"], false)).unwrap();
        assert_eq!(values["a"], "Drilled ahead\nto 1,500 m");
    }

    #[test]
    fn test_short_window_is_a_count_mismatch() {
        let err = extract_positional(
            &grid(),
            "summary",
            &def(1, 1, &["hours_24_summary", "hours_24_forecast", "status"], true),
        )
        .unwrap_err();
        match err {
            DrillrepError::FieldCountMismatch {
                section,
                expected,
                found,
            } => {
                assert_eq!(section, "summary");
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_long_window_is_a_count_mismatch() {
        assert!(matches!(
            extract_positional(&grid(), "summary", &def(0, 1, &["a", "b"], true)),
            Err(DrillrepError::FieldCountMismatch { expected: 2, found: 3, .. })
        ));
    }
}
