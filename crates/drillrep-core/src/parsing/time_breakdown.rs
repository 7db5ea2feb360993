use crate::error::DrillrepError;
use crate::grid::Grid;
use crate::locate;
use crate::model::{ExtractionWarning, TimeBreakdownEntry};
use crate::parsing::values::{clock_hours, coerce_number};
use crate::rules::schema::{NumericPolicy, TimeBreakdownDef};

pub const SECTION: &str = "time_breakdown";

/// Convert every row strictly between the header and footer rows into an
/// entry, preserving grid order.
pub fn extract_time_breakdown(
    grid: &Grid,
    def: &TimeBreakdownDef,
    policy: NumericPolicy,
    warnings: &mut Vec<ExtractionWarning>,
) -> Result<Vec<TimeBreakdownEntry>, DrillrepError> {
    let header = locate::find_row(grid, &def.header.markers())?;
    let footer = locate::find_row(grid, &def.footer.markers())?;

    if grid.width() < def.width {
        return Err(DrillrepError::ColumnOutOfRange {
            column: def.width as isize - 1,
            width: grid.width(),
        });
    }
    if footer <= header {
        tracing::warn!(header, footer, "time breakdown footer precedes its header");
        return Ok(Vec::new());
    }
    tracing::debug!(header, footer, rows = footer - header - 1, "time breakdown table");

    let cols = &def.columns;
    let mut entries = Vec::with_capacity(footer - header - 1);
    for row in header + 1..footer {
        let text = |column: usize| grid.cell(row, column).unwrap_or_default();
        entries.push(TimeBreakdownEntry {
            start: clock_hours("start", text(cols.start))?,
            end: clock_hours("end", text(cols.end))?,
            elapsed: numeric_cell("elapsed", text(cols.elapsed), policy, warnings)?,
            depth: numeric_cell("depth", text(cols.depth), policy, warnings)?,
            pt_npt: text(cols.pt_npt).trim().to_string(),
            code: text(cols.code).trim().to_string(),
            description: text(cols.description).trim().to_string(),
            operation: text(cols.operation).trim().to_string(),
        });
    }
    Ok(entries)
}

fn numeric_cell(
    field: &str,
    raw: &str,
    policy: NumericPolicy,
    warnings: &mut Vec<ExtractionWarning>,
) -> Result<Option<f64>, DrillrepError> {
    match coerce_number(raw) {
        Ok(value) => Ok(value),
        Err(reason) => match policy {
            NumericPolicy::Strict => Err(DrillrepError::malformed(field, raw, reason)),
            NumericPolicy::Lenient => {
                tracing::warn!(field, value = raw, %reason, "time breakdown number left empty");
                warnings.push(ExtractionWarning {
                    section: SECTION.to_string(),
                    field: field.to_string(),
                    value: raw.to_string(),
                    reason,
                });
                Ok(None)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::schema::{MarkerDef, TimeColumnsDef};

    const HEADER: [&str; 9] = [
        "START", "END", "ELAPSED", "DEPTH", "", "PT/NPT", "CODE", "DESCRIPTION", "OPERATION",
    ];
    const FOOTER: [&str; 9] = ["TOTAL HRS", "", "24.0", "", "", "", "", "", ""];

    fn def() -> TimeBreakdownDef {
        TimeBreakdownDef {
            header: MarkerDef::All(vec!["START".into(), "END".into(), "ELAPSED".into()]),
            footer: MarkerDef::All(vec!["TOTAL HRS".into(), "24.0".into()]),
            width: 9,
            columns: TimeColumnsDef::default(),
        }
    }

    fn table(data: &[[&str; 9]]) -> Grid {
        let mut rows = vec![vec!["DAILY REPORT"; 1], HEADER.to_vec()];
        rows.extend(data.iter().map(|r| r.to_vec()));
        rows.push(FOOTER.to_vec());
        Grid::from_rows(rows)
    }

    fn run(grid: &Grid, policy: NumericPolicy) -> Result<(Vec<TimeBreakdownEntry>, Vec<ExtractionWarning>), DrillrepError> {
        let mut warnings = Vec::new();
        let entries = extract_time_breakdown(grid, &def(), policy, &mut warnings)?;
        Ok((entries, warnings))
    }

    #[test]
    fn test_single_row() {
        let grid = table(&[["06:00", "12:00", "6", "1500", "", "NPT", "C12", "Stuck pipe", "Fishing"]]);
        let (entries, _) = run(&grid, NumericPolicy::Strict).unwrap();
        assert_eq!(
            entries,
            vec![TimeBreakdownEntry {
                start: 6.0,
                end: 12.0,
                elapsed: Some(6.0),
                depth: Some(1500.0),
                pt_npt: "NPT".into(),
                code: "C12".into(),
                description: "Stuck pipe".into(),
                operation: "Fishing".into(),
            }]
        );
    }

    #[test]
    fn test_end_of_day() {
        let grid = table(&[["18:00", "24:00", "6.0", "1,650", "", "PT", "D01", "Drill", "Drilling"]]);
        let (entries, _) = run(&grid, NumericPolicy::Strict).unwrap();
        assert_eq!(entries[0].end, 24.0);
        assert_eq!(entries[0].depth, Some(1650.0));
    }

    #[test]
    fn test_empty_numbers_are_null() {
        let grid = table(&[["00:00", "01:00", "", "", "", "PT", "", "", ""]]);
        let (entries, warnings) = run(&grid, NumericPolicy::Strict).unwrap();
        assert_eq!(entries[0].elapsed, None);
        assert_eq!(entries[0].depth, None);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_malformed_number_strict_vs_lenient() {
        let grid = table(&[["00:00", "01:00", "1", "TD", "", "PT", "", "", ""]]);
        assert!(matches!(
            run(&grid, NumericPolicy::Strict),
            Err(DrillrepError::MalformedValue { ref field, .. }) if field == "depth"
        ));

        let (entries, warnings) = run(&grid, NumericPolicy::Lenient).unwrap();
        assert_eq!(entries[0].depth, None);
        assert_eq!(entries[0].elapsed, Some(1.0));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].value, "TD");
    }

    #[test]
    fn test_placeholder_numbers_are_null_under_any_policy() {
        let grid = table(&[["06:00", "12:00", "6", "-", "", "PT", "D1", "Trip", "Tripping"]]);
        for policy in [NumericPolicy::Strict, NumericPolicy::Lenient] {
            let (entries, warnings) = run(&grid, policy).unwrap();
            assert_eq!(entries[0].elapsed, Some(6.0));
            assert_eq!(entries[0].depth, None);
            assert!(warnings.is_empty());
        }
    }

    #[test]
    fn test_malformed_time_is_fatal_under_any_policy() {
        let grid = table(&[["06:00", "24:30", "", "", "", "", "", "", ""]]);
        assert!(matches!(
            run(&grid, NumericPolicy::Lenient),
            Err(DrillrepError::MalformedValue { ref field, .. }) if field == "end"
        ));
    }

    #[test]
    fn test_no_data_rows() {
        let (entries, _) = run(&table(&[]), NumericPolicy::Strict).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_missing_footer() {
        let grid = Grid::from_rows(vec![HEADER.to_vec()]);
        assert!(matches!(
            run(&grid, NumericPolicy::Strict),
            Err(DrillrepError::SectionNotFound { .. })
        ));
    }

    #[test]
    fn test_narrow_grid() {
        let grid = Grid::from_rows(vec![
            vec!["START", "END", "ELAPSED"],
            vec!["TOTAL HRS", "24.0", ""],
        ]);
        assert!(matches!(
            run(&grid, NumericPolicy::Strict),
            Err(DrillrepError::ColumnOutOfRange { column: 8, width: 3 })
        ));
    }
}
