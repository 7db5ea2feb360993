use serde::{Deserialize, Serialize};
use std::fmt;

/// A complete set of layout rules for one report template revision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSetDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// What to do with numeric time-breakdown cells that fail to parse.
    #[serde(default)]
    pub numeric_policy: NumericPolicy,
    pub profile: ProfileDef,
    pub general: PositionalSectionDef,
    pub drilling_parameters: PositionalSectionDef,
    pub afe: LabeledSectionDef,
    pub personnel_in_charge: LabeledSectionDef,
    pub summary: PositionalSectionDef,
    pub time_breakdown: TimeBreakdownDef,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericPolicy {
    /// Unparseable values abort the extraction. Opt-in only.
    Strict,
    /// Unparseable values become null and are reported as warnings.
    #[default]
    Lenient,
}

/// One marker string, or several that must all appear in the same row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkerDef {
    Single(String),
    All(Vec<String>),
}

impl MarkerDef {
    pub fn markers(&self) -> Vec<&str> {
        match self {
            MarkerDef::Single(m) => vec![m.as_str()],
            MarkerDef::All(ms) => ms.iter().map(String::as_str).collect(),
        }
    }
}

impl fmt::Display for MarkerDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quoted: Vec<String> = self.markers().iter().map(|m| format!("\"{m}\"")).collect();
        write!(f, "{}", quoted.join(" + "))
    }
}

/// Which column of the grid holds a section's values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnDef {
    Fixed(usize),
    /// The column containing `marker`, shifted by `offset`.
    Relative { marker: String, offset: isize },
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnDef::Fixed(column) => write!(f, "column {column}"),
            ColumnDef::Relative { marker, offset } => {
                write!(f, "column of \"{marker}\" {offset:+}")
            }
        }
    }
}

/// Row window `[row(start) + start_offset, row(end) + end_offset)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundsDef {
    pub start: MarkerDef,
    pub end: MarkerDef,
    #[serde(default)]
    pub start_offset: isize,
    #[serde(default)]
    pub end_offset: isize,
}

/// Half-open range of absolute row indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRangeDef {
    pub start: usize,
    pub end: usize,
}

/// Ordered candidate patterns for one field. Each pattern must have a
/// capture group; group 1 is the value. Matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRuleDef {
    pub field: String,
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDef {
    pub rows: RowRangeDef,
    #[serde(default)]
    pub column: usize,
    pub fields: Vec<FieldRuleDef>,
    /// Pattern with day, month-abbreviation and year groups. When absent
    /// the profile date stays null.
    #[serde(default)]
    pub date_pattern: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionalSectionDef {
    pub bounds: BoundsDef,
    pub column: ColumnDef,
    /// Field names assigned, in order, to the rows of the window.
    pub fields: Vec<String>,
    /// Collapse embedded line breaks into single spaces.
    #[serde(default)]
    pub join_lines: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledSectionDef {
    pub bounds: BoundsDef,
    pub column: ColumnDef,
    pub fields: Vec<FieldRuleDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeBreakdownDef {
    pub header: MarkerDef,
    pub footer: MarkerDef,
    /// Only the leftmost `width` columns belong to the table.
    #[serde(default = "default_time_width")]
    pub width: usize,
    #[serde(default)]
    pub columns: TimeColumnsDef,
}

fn default_time_width() -> usize {
    9
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeColumnsDef {
    pub start: usize,
    pub end: usize,
    pub elapsed: usize,
    pub depth: usize,
    pub pt_npt: usize,
    pub code: usize,
    pub description: usize,
    pub operation: usize,
}

impl Default for TimeColumnsDef {
    fn default() -> Self {
        TimeColumnsDef {
            start: 0,
            end: 1,
            elapsed: 2,
            depth: 3,
            pt_npt: 5,
            code: 6,
            description: 7,
            operation: 8,
        }
    }
}

impl TimeColumnsDef {
    pub fn all(&self) -> [(&'static str, usize); 8] {
        [
            ("start", self.start),
            ("end", self.end),
            ("elapsed", self.elapsed),
            ("depth", self.depth),
            ("pt_npt", self.pt_npt),
            ("code", self.code),
            ("description", self.description),
            ("operation", self.operation),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_and_column_forms() {
        let one: MarkerDef = serde_json::from_str(r#""AFE""#).unwrap();
        let all: MarkerDef = serde_json::from_str(r#"["TOTAL HRS", "24.0"]"#).unwrap();
        assert_eq!(one.markers(), vec!["AFE"]);
        assert_eq!(all.to_string(), r#""TOTAL HRS" + "24.0""#);

        let fixed: ColumnDef = serde_json::from_str("11").unwrap();
        let relative: ColumnDef =
            serde_json::from_str(r#"{"marker": "AFE NUMBER", "offset": -1}"#).unwrap();
        assert_eq!(fixed.to_string(), "column 11");
        assert_eq!(relative.to_string(), r#"column of "AFE NUMBER" -1"#);
    }

    #[test]
    fn test_time_breakdown_defaults() {
        let def: TimeBreakdownDef =
            serde_json::from_str(r#"{"header": ["START"], "footer": "TOTAL HRS"}"#).unwrap();
        assert_eq!(def.width, 9);
        assert_eq!(def.columns, TimeColumnsDef::default());
        assert_eq!(def.columns.all()[4], ("pt_npt", 5));
    }
}
