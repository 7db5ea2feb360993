pub mod locate;
pub mod parse;
pub mod rules;

use drillrep_core::error::DrillrepError;
use drillrep_core::extraction::{first_table, source_for_path};
use drillrep_core::grid::Grid;
use drillrep_core::rules::builtin;
use drillrep_core::rules::schema::RuleSetDef;
use std::path::Path;

/// A rule file wins over a preset; with neither, the default preset applies.
pub fn resolve_ruleset(
    preset: Option<&str>,
    rules: Option<&Path>,
) -> Result<RuleSetDef, DrillrepError> {
    match (rules, preset) {
        (Some(path), _) => drillrep_core::rules::load_ruleset(path),
        (None, Some(name)) => builtin::load_preset(name),
        (None, None) => builtin::load_preset(builtin::DEFAULT_PRESET),
    }
}

/// Load the report table (first non-empty table) from an exported file.
pub fn read_grid(path: &Path) -> Result<Grid, DrillrepError> {
    let source = source_for_path(path)?;
    let bytes = std::fs::read(path)?;
    first_table(source.as_ref(), &bytes)
}
