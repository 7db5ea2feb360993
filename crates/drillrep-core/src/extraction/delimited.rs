use crate::error::DrillrepError;
use crate::extraction::TableSource;
use crate::grid::Grid;

/// Reads a single table from CSV or TSV. Every record is a row; there is
/// no header line and rows may have different lengths.
pub struct DelimitedTableSource {
    delimiter: u8,
}

impl DelimitedTableSource {
    pub fn csv() -> Self {
        DelimitedTableSource { delimiter: b',' }
    }

    pub fn tsv() -> Self {
        DelimitedTableSource { delimiter: b'\t' }
    }
}

impl TableSource for DelimitedTableSource {
    fn read_tables(&self, bytes: &[u8]) -> Result<Vec<Grid>, DrillrepError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(bytes);

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                DrillrepError::TableLoad(format!("{} record {}: {e}", self.backend_name(), index + 1))
            })?;
            rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }

        if rows.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![Grid::new(rows)])
    }

    fn backend_name(&self) -> &str {
        if self.delimiter == b'\t' {
            "tsv"
        } else {
            "csv"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_rows_are_padded() {
        let tables = DelimitedTableSource::csv()
            .read_tables(b"START,END,ELAPSED\n06:00,12:00\n")
            .unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].width(), 3);
        assert_eq!(tables[0].cell(1, 2), Some(""));
    }

    #[test]
    fn test_quoted_multiline_cell() {
        let tables = DelimitedTableSource::csv()
            .read_tables(b"\"DAILY COST\nUSD 45,210.50\",x\n")
            .unwrap();
        assert_eq!(tables[0].height(), 1);
        assert_eq!(tables[0].cell(0, 0), Some("DAILY COST\nUSD 45,210.50"));
    }

    #[test]
    fn test_tab_separated() {
        let source = DelimitedTableSource::tsv();
        assert_eq!(source.backend_name(), "tsv");
        let tables = source.read_tables(b"a,b\tc\n").unwrap();
        assert_eq!(tables[0].cell(0, 0), Some("a,b"));
        assert_eq!(tables[0].cell(0, 1), Some("c"));
    }

    #[test]
    fn test_empty_input_has_no_tables() {
        assert!(DelimitedTableSource::csv().read_tables(b"").unwrap().is_empty());
    }
}
