use drillrep_core::error::DrillrepError;
use drillrep_core::model::Extraction;

pub fn print(extraction: &Extraction) -> Result<(), DrillrepError> {
    let json = serde_json::to_string_pretty(extraction)?;
    println!("{json}");
    Ok(())
}
