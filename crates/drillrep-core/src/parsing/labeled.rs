use crate::error::DrillrepError;
use crate::grid::Grid;
use crate::locate;
use crate::model::FieldValues;
use crate::rules::compile_pattern;
use crate::rules::schema::{FieldRuleDef, LabeledSectionDef};
use regex::Regex;
use serde_json::Value;

/// Compiled candidate patterns for one field.
#[derive(Debug, Clone)]
pub struct FieldPatterns {
    field: String,
    patterns: Vec<Regex>,
}

impl FieldPatterns {
    pub fn compile(def: &FieldRuleDef) -> Result<Self, DrillrepError> {
        let patterns = def
            .patterns
            .iter()
            .map(|p| compile_pattern(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FieldPatterns {
            field: def.field.clone(),
            patterns,
        })
    }

    pub fn compile_all(defs: &[FieldRuleDef]) -> Result<Vec<Self>, DrillrepError> {
        defs.iter().map(FieldPatterns::compile).collect()
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// First capture of the highest-priority pattern that matches any cell.
    ///
    /// Patterns are tried in order; for each pattern the cells are scanned
    /// top to bottom. The captured text is trimmed.
    pub fn first_match(&self, cells: &[&str]) -> Option<String> {
        self.patterns.iter().find_map(|re| {
            cells.iter().find_map(|cell| {
                re.captures(cell)
                    .and_then(|caps| caps.get(1))
                    .map(|m| m.as_str().trim().to_string())
            })
        })
    }
}

/// Apply each field's patterns to the cells of one column inside a bounded
/// row window. Unmatched fields are null.
pub fn extract_labeled(
    grid: &Grid,
    def: &LabeledSectionDef,
    fields: &[FieldPatterns],
) -> Result<FieldValues, DrillrepError> {
    let rows = locate::bounded_rows(grid, &def.bounds)?;
    let column = locate::resolve_column(grid, &def.column)?;
    let cells: Vec<&str> = rows.filter_map(|r| grid.cell(r, column)).collect();

    let mut values = FieldValues::new();
    for field in fields {
        let value = match field.first_match(&cells) {
            Some(text) => Value::String(text),
            None => {
                tracing::debug!(field = field.field(), "no pattern matched");
                Value::Null
            }
        };
        values.insert(field.field().to_string(), value);
    }
    Ok(values)
}
