use crate::error::DrillrepError;
use crate::extraction::TableSource;
use crate::grid::Grid;
use serde_json::Value;

/// Reads tables exported as JSON.
///
/// Accepted shapes:
/// - one table as an array of rows: `[["START", "END"], ["06:00", "12:00"]]`
/// - several tables: `[[["a"]], [["b"]]]`
/// - one table as row objects keyed by column index, as written by
///   pandas `to_json(orient="records")`: `[{"0": "START", "1": "END"}]`
pub struct JsonTableSource;

impl TableSource for JsonTableSource {
    fn read_tables(&self, bytes: &[u8]) -> Result<Vec<Grid>, DrillrepError> {
        let value: Value = serde_json::from_slice(bytes)?;
        let Value::Array(items) = value else {
            return Err(DrillrepError::TableLoad(
                "expected a JSON array of rows or tables".into(),
            ));
        };

        let is_table_list = items
            .iter()
            .any(|item| matches!(item, Value::Array(rows) if rows.iter().any(Value::is_array)));
        if is_table_list {
            items.iter().map(parse_table).collect()
        } else if items.is_empty() {
            Ok(Vec::new())
        } else {
            Ok(vec![parse_rows(&items)?])
        }
    }

    fn backend_name(&self) -> &str {
        "json"
    }
}

fn parse_table(value: &Value) -> Result<Grid, DrillrepError> {
    match value {
        Value::Array(rows) => parse_rows(rows),
        other => Err(DrillrepError::TableLoad(format!(
            "expected a table (array of rows), found {other}"
        ))),
    }
}

fn parse_rows(rows: &[Value]) -> Result<Grid, DrillrepError> {
    let rows = rows
        .iter()
        .map(|row| -> Result<Vec<String>, DrillrepError> {
            match row {
                Value::Array(cells) => Ok(cells.iter().map(cell_text).collect()),
                Value::Object(map) => {
                    let mut cells = Vec::new();
                    for (key, value) in map {
                        let index: usize = key.parse().map_err(|_| {
                            DrillrepError::TableLoad(format!("row key '{key}' is not a column index"))
                        })?;
                        if cells.len() <= index {
                            cells.resize(index + 1, String::new());
                        }
                        cells[index] = cell_text(value);
                    }
                    Ok(cells)
                }
                other => Err(DrillrepError::TableLoad(format!(
                    "expected a row (array or object), found {other}"
                ))),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Grid::new(rows))
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
