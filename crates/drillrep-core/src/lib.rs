pub mod error;
pub mod extraction;
pub mod grid;
pub mod locate;
pub mod model;
pub mod parsing;
pub mod rules;

use error::DrillrepError;
use extraction::TableSource;
use grid::Grid;
use model::Extraction;
use parsing::Extractor;
use rules::schema::RuleSetDef;

/// Main API entry point: extract a daily drilling report from one grid.
///
/// Compiles the ruleset on every call. Callers processing many reports
/// should build an [`Extractor`] once and reuse it.
pub fn extract_report(grid: &Grid, rules: &RuleSetDef) -> Result<Extraction, DrillrepError> {
    Extractor::new(rules.clone())?.extract(grid)
}

/// Read an exported table document and extract the report from its first
/// non-empty table.
pub fn extract_report_bytes(
    bytes: &[u8],
    source: &dyn TableSource,
    extractor: &Extractor,
) -> Result<Extraction, DrillrepError> {
    let grid = extraction::first_table(source, bytes)?;
    extractor.extract(&grid)
}
