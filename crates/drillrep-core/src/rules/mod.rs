pub mod builtin;
pub mod schema;

use crate::error::DrillrepError;
use crate::model::{
    Afe, DrillingParameters, GeneralInfo, PersonnelInCharge, Profile, SectionRecord, Summary,
};
use regex::{Regex, RegexBuilder};
use schema::{BoundsDef, ColumnDef, FieldRuleDef, MarkerDef, RuleSetDef};
use std::collections::HashSet;
use std::path::Path;

/// Load a ruleset from a JSON file.
pub fn load_ruleset(path: &Path) -> Result<RuleSetDef, DrillrepError> {
    let content = std::fs::read_to_string(path).map_err(|e| DrillrepError::RulesetLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_ruleset(&content, path)
}

/// Parse a ruleset from a JSON string.
pub fn parse_ruleset(json: &str, source: &Path) -> Result<RuleSetDef, DrillrepError> {
    let ruleset: RuleSetDef = serde_json::from_str(json).map_err(|e| DrillrepError::RulesetLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_ruleset(&ruleset)?;
    Ok(ruleset)
}

/// Parse a ruleset from a JSON string (no file path context).
pub fn parse_ruleset_str(json: &str) -> Result<RuleSetDef, DrillrepError> {
    let ruleset: RuleSetDef = serde_json::from_str(json).map_err(DrillrepError::Json)?;
    validate_ruleset(&ruleset)?;
    Ok(ruleset)
}

/// Compile a field pattern. Patterns match case-insensitively and must
/// capture the value in group 1.
pub fn compile_pattern(pattern: &str) -> Result<Regex, DrillrepError> {
    let re = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| DrillrepError::RulesetInvalid(format!("bad pattern '{pattern}': {e}")))?;
    if re.captures_len() < 2 {
        return Err(DrillrepError::RulesetInvalid(format!(
            "pattern '{pattern}' has no capture group"
        )));
    }
    Ok(re)
}

/// Validate that a ruleset is well-formed.
pub fn validate_ruleset(ruleset: &RuleSetDef) -> Result<(), DrillrepError> {
    if ruleset.name.trim().is_empty() {
        return Err(DrillrepError::RulesetInvalid("name must not be empty".into()));
    }
    if ruleset.version.trim().is_empty() {
        return Err(DrillrepError::RulesetInvalid(
            "version must not be empty".into(),
        ));
    }

    let profile = &ruleset.profile;
    if profile.rows.start >= profile.rows.end {
        return Err(DrillrepError::RulesetInvalid(format!(
            "profile rows {}..{} are empty",
            profile.rows.start, profile.rows.end
        )));
    }
    validate_field_rules(Profile::SECTION, Profile::FIELDS, &profile.fields)?;
    if let Some(ref pattern) = profile.date_pattern {
        let re = compile_pattern(pattern)?;
        if re.captures_len() < 4 {
            return Err(DrillrepError::RulesetInvalid(format!(
                "date pattern '{pattern}' needs day, month and year groups"
            )));
        }
    }

    validate_positional(GeneralInfo::SECTION, GeneralInfo::FIELDS, &ruleset.general)?;
    validate_positional(
        DrillingParameters::SECTION,
        DrillingParameters::FIELDS,
        &ruleset.drilling_parameters,
    )?;
    validate_positional(Summary::SECTION, Summary::FIELDS, &ruleset.summary)?;

    for (section, fields, def) in [
        (Afe::SECTION, Afe::FIELDS, &ruleset.afe),
        (
            PersonnelInCharge::SECTION,
            PersonnelInCharge::FIELDS,
            &ruleset.personnel_in_charge,
        ),
    ] {
        validate_bounds(section, &def.bounds)?;
        validate_column(section, &def.column)?;
        validate_field_rules(section, fields, &def.fields)?;
    }

    let tb = &ruleset.time_breakdown;
    validate_markers("time_breakdown header", &tb.header)?;
    validate_markers("time_breakdown footer", &tb.footer)?;
    for (name, column) in tb.columns.all() {
        if column >= tb.width {
            return Err(DrillrepError::RulesetInvalid(format!(
                "time_breakdown column '{name}' ({column}) is outside the table width {}",
                tb.width
            )));
        }
    }

    Ok(())
}

fn validate_positional(
    section: &str,
    known: &[&str],
    def: &schema::PositionalSectionDef,
) -> Result<(), DrillrepError> {
    validate_bounds(section, &def.bounds)?;
    validate_column(section, &def.column)?;
    if def.fields.is_empty() {
        return Err(DrillrepError::RulesetInvalid(format!(
            "section '{section}' has no fields"
        )));
    }
    validate_field_names(section, known, def.fields.iter().map(String::as_str))
}

fn validate_field_rules(
    section: &str,
    known: &[&str],
    rules: &[FieldRuleDef],
) -> Result<(), DrillrepError> {
    if rules.is_empty() {
        return Err(DrillrepError::RulesetInvalid(format!(
            "section '{section}' has no fields"
        )));
    }
    validate_field_names(section, known, rules.iter().map(|r| r.field.as_str()))?;
    for rule in rules {
        if rule.patterns.is_empty() {
            return Err(DrillrepError::RulesetInvalid(format!(
                "field '{section}.{}' has no patterns",
                rule.field
            )));
        }
        for pattern in &rule.patterns {
            compile_pattern(pattern)?;
        }
    }
    Ok(())
}

fn validate_field_names<'a>(
    section: &str,
    known: &[&str],
    names: impl Iterator<Item = &'a str>,
) -> Result<(), DrillrepError> {
    let mut seen = HashSet::new();
    for name in names {
        if !known.contains(&name) {
            return Err(DrillrepError::RulesetInvalid(format!(
                "section '{section}' has unknown field '{name}' (expected one of: {})",
                known.join(", ")
            )));
        }
        if !seen.insert(name) {
            return Err(DrillrepError::RulesetInvalid(format!(
                "section '{section}' lists field '{name}' twice"
            )));
        }
    }
    Ok(())
}

fn validate_bounds(section: &str, bounds: &BoundsDef) -> Result<(), DrillrepError> {
    validate_markers(&format!("{section} start"), &bounds.start)?;
    validate_markers(&format!("{section} end"), &bounds.end)
}

fn validate_markers(what: &str, marker: &MarkerDef) -> Result<(), DrillrepError> {
    let markers = marker.markers();
    if markers.is_empty() || markers.iter().any(|m| m.is_empty()) {
        return Err(DrillrepError::RulesetInvalid(format!(
            "{what} marker must not be empty"
        )));
    }
    Ok(())
}

fn validate_column(section: &str, column: &ColumnDef) -> Result<(), DrillrepError> {
    if let ColumnDef::Relative { marker, .. } = column {
        if marker.is_empty() {
            return Err(DrillrepError::RulesetInvalid(format!(
                "section '{section}' column marker must not be empty"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_json() -> serde_json::Value {
        serde_json::from_str(include_str!("../../../../rules/reference.json")).unwrap()
    }

    fn parse(value: serde_json::Value) -> Result<RuleSetDef, DrillrepError> {
        parse_ruleset_str(&value.to_string())
    }

    #[test]
    fn test_parse_valid_ruleset() {
        let rs = parse(reference_json()).unwrap();
        assert_eq!(rs.name, "Reference daily drilling report");
        assert_eq!(rs.general.fields.len(), 10);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut json = reference_json();
        json["general"]["fields"][0] = "rig_name".into();
        let err = parse(json).unwrap_err();
        assert!(err.to_string().contains("unknown field 'rig_name'"));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let mut json = reference_json();
        json["summary"]["fields"] = serde_json::json!(["status", "status"]);
        assert!(parse(json).is_err());
    }

    #[test]
    fn test_pattern_without_group_rejected() {
        let mut json = reference_json();
        json["afe"]["fields"][0]["patterns"] = serde_json::json!(["DAILY COST"]);
        let err = parse(json).unwrap_err();
        assert!(err.to_string().contains("no capture group"));
    }

    #[test]
    fn test_bad_regex_rejected() {
        let mut json = reference_json();
        json["personnel_in_charge"]["fields"][0]["patterns"] = serde_json::json!(["(unclosed"]);
        assert!(matches!(parse(json), Err(DrillrepError::RulesetInvalid(_))));
    }

    #[test]
    fn test_empty_marker_rejected() {
        let mut json = reference_json();
        json["time_breakdown"]["footer"] = serde_json::json!([]);
        assert!(parse(json).is_err());
    }

    #[test]
    fn test_time_column_outside_width_rejected() {
        let mut json = reference_json();
        json["time_breakdown"]["width"] = 8.into();
        let err = parse(json).unwrap_err();
        assert!(err.to_string().contains("operation"));
    }

    #[test]
    fn test_relative_column_parses() {
        let mut json = reference_json();
        json["drilling_parameters"]["column"] = serde_json::json!({ "marker": "AFE NUMBER", "offset": -1 });
        let rs = parse(json).unwrap();
        assert_eq!(
            rs.drilling_parameters.column,
            ColumnDef::Relative {
                marker: "AFE NUMBER".into(),
                offset: -1
            }
        );
    }

    #[test]
    fn test_load_ruleset_reports_path() {
        let err = load_ruleset(Path::new("/nonexistent/rules.json")).unwrap_err();
        assert!(matches!(err, DrillrepError::RulesetLoad { .. }));
    }
}
