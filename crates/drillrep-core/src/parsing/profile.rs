use crate::error::DrillrepError;
use crate::grid::Grid;
use crate::model::{ExtractionWarning, FieldValues, Profile, SectionRecord};
use crate::parsing::labeled::FieldPatterns;
use crate::parsing::values::{parse_report_date, strip_to_number};
use crate::rules::schema::ProfileDef;
use regex::Regex;
use serde_json::Value;

/// Extract the report identity block from the fixed leading rows.
///
/// Each labeled pattern brackets its value between two neighbouring labels,
/// so wording changes in unrelated labels do not shift the capture.
pub fn extract_profile(
    grid: &Grid,
    def: &ProfileDef,
    fields: &[FieldPatterns],
    date_pattern: Option<&Regex>,
    warnings: &mut Vec<ExtractionWarning>,
) -> Result<Profile, DrillrepError> {
    if def.column >= grid.width() {
        return Err(DrillrepError::ColumnOutOfRange {
            column: def.column as isize,
            width: grid.width(),
        });
    }
    let end = def.rows.end.min(grid.height());
    let cells: Vec<&str> = (def.rows.start..end)
        .filter_map(|r| grid.cell(r, def.column))
        .collect();

    let mut values = FieldValues::new();
    for field in fields {
        let value = match field.first_match(&cells) {
            Some(text) if Profile::NUMERIC_FIELDS.contains(&field.field()) => {
                numeric_value(field.field(), &text, warnings)
            }
            Some(text) => Value::String(text),
            None => Value::Null,
        };
        values.insert(field.field().to_string(), value);
    }

    let mut profile = Profile::from_values(values)?;
    if let Some(re) = date_pattern {
        // The date may sit in any column of the prefix rows.
        let prefix: Vec<&str> = (def.rows.start..end)
            .filter_map(|r| grid.row(r))
            .flat_map(|row| row.iter().map(String::as_str))
            .collect();
        profile.date = derive_date(re, &prefix, warnings);
    }
    Ok(profile)
}

fn numeric_value(field: &str, text: &str, warnings: &mut Vec<ExtractionWarning>) -> Value {
    match strip_to_number(text) {
        Ok(Some(v)) => Value::from(v),
        Ok(None) => Value::Null,
        Err(reason) => {
            tracing::warn!(field, value = text, %reason, "profile number left empty");
            warnings.push(ExtractionWarning {
                section: Profile::SECTION.to_string(),
                field: field.to_string(),
                value: text.to_string(),
                reason,
            });
            Value::Null
        }
    }
}

/// First date-looking text in the profile rows, normalized to `YYYY-MM-DD`.
/// Best effort: anything unparseable yields `None`.
fn derive_date(re: &Regex, cells: &[&str], warnings: &mut Vec<ExtractionWarning>) -> Option<String> {
    let caps = cells.iter().find_map(|cell| re.captures(cell))?;
    let (Some(day), Some(month), Some(year)) = (caps.get(1), caps.get(2), caps.get(3)) else {
        return None;
    };
    match parse_report_date(day.as_str(), month.as_str(), year.as_str()) {
        Some(date) => Some(date.format("%Y-%m-%d").to_string()),
        None => {
            let matched = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
            tracing::warn!(value = matched, "report date not recognised");
            warnings.push(ExtractionWarning {
                section: Profile::SECTION.to_string(),
                field: "date".to_string(),
                value: matched.to_string(),
                reason: "not a calendar date".to_string(),
            });
            None
        }
    }
}
