use crate::error::DrillrepError;
use crate::rules::parse_ruleset_str;
use crate::rules::schema::RuleSetDef;

const REFERENCE_JSON: &str = include_str!("../../../../rules/reference.json");
const DEFENSIVE_JSON: &str = include_str!("../../../../rules/defensive.json");

/// Available predefined rulesets.
pub const PRESETS: &[&str] = &["reference", "defensive"];

pub const DEFAULT_PRESET: &str = "reference";

/// Load a predefined ruleset by name.
pub fn load_preset(name: &str) -> Result<RuleSetDef, DrillrepError> {
    match name {
        "reference" => parse_ruleset_str(REFERENCE_JSON),
        "defensive" => parse_ruleset_str(DEFENSIVE_JSON),
        _ => Err(DrillrepError::RulesetInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}
