pub mod delimited;
pub mod json;
pub mod xlsx;

use crate::error::DrillrepError;
use crate::grid::Grid;
use std::path::Path;

/// Trait for readers of tables exported by the upstream PDF table extractor.
pub trait TableSource: Send + Sync {
    /// Read every table in the document, in document order.
    fn read_tables(&self, bytes: &[u8]) -> Result<Vec<Grid>, DrillrepError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Pick a backend from a file extension: `json`, `csv`, `tsv` or `xlsx`.
pub fn source_for_path(path: &Path) -> Result<Box<dyn TableSource>, DrillrepError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "json" => Ok(Box::new(json::JsonTableSource)),
        "csv" => Ok(Box::new(delimited::DelimitedTableSource::csv())),
        "tsv" => Ok(Box::new(delimited::DelimitedTableSource::tsv())),
        "xlsx" => Ok(Box::new(xlsx::XlsxTableSource)),
        _ => Err(DrillrepError::TableLoad(format!(
            "unsupported table file '{}' (expected .json, .csv, .tsv or .xlsx)",
            path.display()
        ))),
    }
}

/// The report table: the first table in the document.
pub fn first_table(source: &dyn TableSource, bytes: &[u8]) -> Result<Grid, DrillrepError> {
    let tables = source.read_tables(bytes)?;
    tracing::debug!(
        backend = source.backend_name(),
        tables = tables.len(),
        "read tables"
    );
    tables
        .into_iter()
        .find(|t| !t.is_empty())
        .ok_or(DrillrepError::NoTables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_for_path() {
        assert_eq!(source_for_path(Path::new("r.JSON")).unwrap().backend_name(), "json");
        assert_eq!(source_for_path(Path::new("r.csv")).unwrap().backend_name(), "csv");
        assert_eq!(source_for_path(Path::new("r.xlsx")).unwrap().backend_name(), "xlsx");
        assert!(source_for_path(Path::new("r.pdf")).is_err());
        assert!(source_for_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_first_table_skips_empty() {
        let bytes = br#"[[], [["a", "b"]]]"#;
        let grid = first_table(&json::JsonTableSource, bytes).unwrap();
        assert_eq!(grid.cell(0, 1), Some("b"));
    }

    #[test]
    fn test_no_tables() {
        assert!(matches!(
            first_table(&json::JsonTableSource, b"[]"),
            Err(DrillrepError::NoTables)
        ));
    }
}
