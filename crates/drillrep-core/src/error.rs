use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DrillrepError {
    #[error("section marker not found: {marker}")]
    SectionNotFound { marker: String },

    #[error("section '{section}' expects {expected} row(s) but the bounded range holds {found}")]
    FieldCountMismatch {
        section: String,
        expected: usize,
        found: usize,
    },

    #[error("malformed value for '{field}': '{value}' ({reason})")]
    MalformedValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("column {column} is outside the table (width {width})")]
    ColumnOutOfRange { column: isize, width: usize },

    #[error("no tables found in input")]
    NoTables,

    #[error("failed to load table: {0}")]
    TableLoad(String),

    #[error("failed to load ruleset from {path}: {reason}")]
    RulesetLoad { path: PathBuf, reason: String },

    #[error("invalid ruleset: {0}")]
    RulesetInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DrillrepError {
    pub(crate) fn section_not_found(markers: &[&str]) -> Self {
        DrillrepError::SectionNotFound {
            marker: markers.join(" + "),
        }
    }

    pub(crate) fn malformed(field: &str, value: &str, reason: impl Into<String>) -> Self {
        DrillrepError::MalformedValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
