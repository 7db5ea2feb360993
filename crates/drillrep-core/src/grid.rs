use serde::{Deserialize, Serialize};

/// One table of text cells as produced by the upstream PDF table extractor.
///
/// Rows are ordered top-to-bottom as on the page. Ragged input is padded
/// with empty cells so every row has the same width.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<String>>,
    width: usize,
}

impl Grid {
    pub fn new(mut rows: Vec<Vec<String>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Grid { rows, width }
    }

    /// Convenience constructor for string literals.
    pub fn from_rows<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Grid::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::<String>::into).collect())
                .collect(),
        )
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_rows_are_padded() {
        let grid = Grid::from_rows(vec![vec!["a", "b", "c"], vec!["d"]]);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.cell(1, 2), Some(""));
        assert_eq!(grid.cell(1, 3), None);
    }

    #[test]
    fn test_empty_grid() {
        let grid = Grid::new(vec![]);
        assert!(grid.is_empty());
        assert_eq!(grid.width(), 0);
        assert!(grid.row(0).is_none());
    }
}
