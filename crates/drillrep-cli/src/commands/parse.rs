use drillrep_core::error::DrillrepError;
use drillrep_core::parsing::Extractor;
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    preset: Option<String>,
    rules: Option<PathBuf>,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), DrillrepError> {
    let ruleset = super::resolve_ruleset(preset.as_deref(), rules.as_deref())?;
    let extractor = Extractor::new(ruleset)?;
    let grid = super::read_grid(&input_file)?;
    tracing::info!(
        file = %input_file.display(),
        ruleset = %extractor.rules().name,
        "extracting"
    );
    let extraction = extractor.extract(&grid)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&extraction)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Extracted report with {} time breakdown entr{}, written to {}",
                extraction.report.time_breakdown.len(),
                if extraction.report.time_breakdown.len() == 1 { "y" } else { "ies" },
                path.display()
            );
            for w in &extraction.warnings {
                eprintln!("  warning: {}.{} '{}': {}", w.section, w.field, w.value, w.reason);
            }
        }
        None => match output_format {
            "json" => output::json::print(&extraction)?,
            _ => print!("{}", output::table::format_report(&extraction)?),
        },
    }

    Ok(())
}
