pub mod labeled;
pub mod positional;
pub mod profile;
pub mod time_breakdown;
pub mod values;

use crate::error::DrillrepError;
use crate::grid::Grid;
use crate::model::{
    Afe, DrillingParameters, DrillingReport, Extraction, GeneralInfo, PersonnelInCharge,
    SectionRecord, Summary,
};
use crate::rules::schema::RuleSetDef;
use crate::rules::{compile_pattern, validate_ruleset};
use labeled::FieldPatterns;
use regex::Regex;

/// A validated ruleset with its patterns compiled, ready to run against
/// any number of grids. Holds no per-call state.
#[derive(Debug, Clone)]
pub struct Extractor {
    rules: RuleSetDef,
    profile_fields: Vec<FieldPatterns>,
    date_pattern: Option<Regex>,
    afe_fields: Vec<FieldPatterns>,
    personnel_fields: Vec<FieldPatterns>,
}

impl Extractor {
    pub fn new(rules: RuleSetDef) -> Result<Self, DrillrepError> {
        validate_ruleset(&rules)?;
        let profile_fields = FieldPatterns::compile_all(&rules.profile.fields)?;
        let date_pattern = rules
            .profile
            .date_pattern
            .as_deref()
            .map(compile_pattern)
            .transpose()?;
        let afe_fields = FieldPatterns::compile_all(&rules.afe.fields)?;
        let personnel_fields = FieldPatterns::compile_all(&rules.personnel_in_charge.fields)?;

        Ok(Extractor {
            rules,
            profile_fields,
            date_pattern,
            afe_fields,
            personnel_fields,
        })
    }

    pub fn rules(&self) -> &RuleSetDef {
        &self.rules
    }

    /// Run all seven section passes over one grid.
    ///
    /// Any fatal error aborts the whole call; recoverable value problems are
    /// returned as warnings alongside the report.
    pub fn extract(&self, grid: &Grid) -> Result<Extraction, DrillrepError> {
        let rules = &self.rules;
        let mut warnings = Vec::new();
        tracing::debug!(
            ruleset = %rules.name,
            rows = grid.height(),
            columns = grid.width(),
            "extracting report"
        );

        let profile = profile::extract_profile(
            grid,
            &rules.profile,
            &self.profile_fields,
            self.date_pattern.as_ref(),
            &mut warnings,
        )?;
        let general = GeneralInfo::from_values(positional::extract_positional(
            grid,
            GeneralInfo::SECTION,
            &rules.general,
        )?)?;
        let drilling_parameters = DrillingParameters::from_values(positional::extract_positional(
            grid,
            DrillingParameters::SECTION,
            &rules.drilling_parameters,
        )?)?;
        let afe = Afe::from_values(labeled::extract_labeled(grid, &rules.afe, &self.afe_fields)?)?;
        let personnel_in_charge = PersonnelInCharge::from_values(labeled::extract_labeled(
            grid,
            &rules.personnel_in_charge,
            &self.personnel_fields,
        )?)?;
        let summary = Summary::from_values(positional::extract_positional(
            grid,
            Summary::SECTION,
            &rules.summary,
        )?)?;
        let time_breakdown = time_breakdown::extract_time_breakdown(
            grid,
            &rules.time_breakdown,
            rules.numeric_policy,
            &mut warnings,
        )?;

        tracing::debug!(
            entries = time_breakdown.len(),
            warnings = warnings.len(),
            "report extracted"
        );

        Ok(Extraction {
            report: DrillingReport {
                profile,
                general,
                drilling_parameters,
                afe,
                personnel_in_charge,
                summary,
                time_breakdown,
            },
            warnings,
        })
    }
}
