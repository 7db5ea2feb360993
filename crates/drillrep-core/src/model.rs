use crate::error::DrillrepError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Field name -> extracted value, as produced by one extraction pass.
pub type FieldValues = serde_json::Map<String, serde_json::Value>;

/// A flat record assembled from named field values.
///
/// `FIELDS` lists the names a ruleset may target, in storage column order.
pub trait SectionRecord: DeserializeOwned {
    const SECTION: &'static str;
    const FIELDS: &'static [&'static str];

    fn from_values(values: FieldValues) -> Result<Self, DrillrepError> {
        Ok(serde_json::from_value(serde_json::Value::Object(values))?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub operator: Option<String>,
    pub contractor: Option<String>,
    pub report_no: Option<String>,
    pub well_pad_name: Option<String>,
    pub field: Option<String>,
    pub well_type_profile: Option<String>,
    pub latitude_longitude: Option<String>,
    pub environment: Option<String>,
    pub gl_msl_m: Option<f64>,
    /// Report date as `YYYY-MM-DD`, when the ruleset derives one.
    pub date: Option<String>,
}

impl Profile {
    /// Fields parsed as numbers after stripping everything but digits and dots.
    pub const NUMERIC_FIELDS: &'static [&'static str] = &["gl_msl_m"];

    /// Hex md5 digest over the identifying fields, used to reject re-uploads
    /// of the same report. Null fields are skipped, including a GL label
    /// with no number after it; `date` is excluded.
    pub fn content_hash(&self) -> String {
        let mut data = String::new();
        let text_fields = [
            &self.operator,
            &self.contractor,
            &self.report_no,
            &self.well_pad_name,
            &self.field,
            &self.well_type_profile,
            &self.latitude_longitude,
            &self.environment,
        ];
        for value in text_fields.into_iter().flatten() {
            data.push_str(value);
        }
        if let Some(gl) = self.gl_msl_m {
            data.push_str(&format!("{gl:?}"));
        }
        format!("{:x}", md5::compute(data.as_bytes()))
    }
}

impl SectionRecord for Profile {
    const SECTION: &'static str = "profile";
    const FIELDS: &'static [&'static str] = &[
        "operator",
        "contractor",
        "report_no",
        "well_pad_name",
        "field",
        "well_type_profile",
        "latitude_longitude",
        "environment",
        "gl_msl_m",
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralInfo {
    pub rig_type_name: Option<String>,
    pub rig_power: Option<String>,
    pub kb_elevation: Option<String>,
    pub midnight_depth: Option<String>,
    pub progress: Option<String>,
    pub proposed_td: Option<String>,
    pub spud_date: Option<String>,
    pub release_date: Option<String>,
    pub planned_days: Option<String>,
    pub days_from_rig_release: Option<String>,
}

impl SectionRecord for GeneralInfo {
    const SECTION: &'static str = "general";
    const FIELDS: &'static [&'static str] = &[
        "rig_type_name",
        "rig_power",
        "kb_elevation",
        "midnight_depth",
        "progress",
        "proposed_td",
        "spud_date",
        "release_date",
        "planned_days",
        "days_from_rig_release",
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillingParameters {
    pub average_wob_24_hrs: Option<String>,
    pub average_rop_24_hrs: Option<String>,
    pub average_surface_rpm_dhm: Option<String>,
    pub on_off_bottom_torque: Option<String>,
    pub flowrate_spp: Option<String>,
    pub air_rate: Option<String>,
    pub corr_inhib_foam_rate: Option<String>,
    pub puw_sow_rotw: Option<String>,
    pub total_drilling_time: Option<String>,
    pub ton_miles: Option<String>,
}

impl SectionRecord for DrillingParameters {
    const SECTION: &'static str = "drilling_parameters";
    const FIELDS: &'static [&'static str] = &[
        "average_wob_24_hrs",
        "average_rop_24_hrs",
        "average_surface_rpm_dhm",
        "on_off_bottom_torque",
        "flowrate_spp",
        "air_rate",
        "corr_inhib_foam_rate",
        "puw_sow_rotw",
        "total_drilling_time",
        "ton_miles",
    ];
}

/// Authorization-for-expenditure cost summary. Amounts keep their display
/// formatting, thousands separators included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Afe {
    pub afe_number_afe_cost: Option<String>,
    pub daily_cost: Option<String>,
    pub percent_afe_cumulative_cost: Option<String>,
    pub daily_mud_cost: Option<String>,
    pub cumulative_mud_cost: Option<String>,
}

impl SectionRecord for Afe {
    const SECTION: &'static str = "afe";
    const FIELDS: &'static [&'static str] = &[
        "afe_number_afe_cost",
        "daily_cost",
        "percent_afe_cumulative_cost",
        "daily_mud_cost",
        "cumulative_mud_cost",
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonnelInCharge {
    pub day_night_drilling_supv: Option<String>,
    pub drilling_superintendent: Option<String>,
    pub rig_superintendent: Option<String>,
    pub drilling_engineer: Option<String>,
    pub hse_supervisor: Option<String>,
}

impl SectionRecord for PersonnelInCharge {
    const SECTION: &'static str = "personnel_in_charge";
    const FIELDS: &'static [&'static str] = &[
        "day_night_drilling_supv",
        "drilling_superintendent",
        "rig_superintendent",
        "drilling_engineer",
        "hse_supervisor",
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Summary {
    pub hours_24_summary: Option<String>,
    pub hours_24_forecast: Option<String>,
    pub status: Option<String>,
}

impl SectionRecord for Summary {
    const SECTION: &'static str = "summary";
    const FIELDS: &'static [&'static str] = &["hours_24_summary", "hours_24_forecast", "status"];
}

/// One line of the operations log. Times are fractional hours of the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBreakdownEntry {
    pub start: f64,
    pub end: f64,
    pub elapsed: Option<f64>,
    pub depth: Option<f64>,
    pub pt_npt: String,
    pub code: String,
    pub description: String,
    pub operation: String,
}

/// The fixed 7-tuple handed to storage.
pub type ReportParts = (
    Profile,
    GeneralInfo,
    DrillingParameters,
    Afe,
    PersonnelInCharge,
    Summary,
    Vec<TimeBreakdownEntry>,
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrillingReport {
    pub profile: Profile,
    pub general: GeneralInfo,
    pub drilling_parameters: DrillingParameters,
    pub afe: Afe,
    pub personnel_in_charge: PersonnelInCharge,
    pub summary: Summary,
    pub time_breakdown: Vec<TimeBreakdownEntry>,
}

impl DrillingReport {
    pub fn into_parts(self) -> ReportParts {
        (
            self.profile,
            self.general,
            self.drilling_parameters,
            self.afe,
            self.personnel_in_charge,
            self.summary,
            self.time_breakdown,
        )
    }
}

/// A value that was present but could not be converted; the field was left empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionWarning {
    pub section: String,
    pub field: String,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub report: DrillingReport,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ExtractionWarning>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_values_fills_missing_with_none() {
        let values = match json!({ "hours_24_summary": "Drilled ahead", "status": "Drilling" }) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        let summary = Summary::from_values(values).unwrap();
        assert_eq!(summary.hours_24_summary.as_deref(), Some("Drilled ahead"));
        assert_eq!(summary.hours_24_forecast, None);
        assert_eq!(summary.status.as_deref(), Some("Drilling"));
    }

    #[test]
    fn test_content_hash_is_stable_and_field_sensitive() {
        let profile = Profile {
            contractor: Some("PDSI".into()),
            report_no: Some("123".into()),
            gl_msl_m: Some(12.5),
            ..Default::default()
        };
        assert_eq!(profile.content_hash(), profile.clone().content_hash());
        assert_eq!(
            profile.content_hash(),
            format!("{:x}", md5::compute("PDSI12312.5"))
        );

        let other = Profile {
            report_no: Some("124".into()),
            ..profile.clone()
        };
        assert_ne!(profile.content_hash(), other.content_hash());
    }

    #[test]
    fn test_content_hash_skips_null_gl() {
        let profile = Profile {
            operator: Some("Pertamina".into()),
            report_no: Some("7".into()),
            ..Default::default()
        };
        assert_eq!(
            profile.content_hash(),
            format!("{:x}", md5::compute("Pertamina7"))
        );
    }

    #[test]
    fn test_content_hash_ignores_date() {
        let profile = Profile {
            operator: Some("Pertamina".into()),
            ..Default::default()
        };
        let dated = Profile {
            date: Some("2024-03-12".into()),
            ..profile.clone()
        };
        assert_eq!(profile.content_hash(), dated.content_hash());
    }

    #[test]
    fn test_report_serializes_unmatched_fields_as_null() {
        let json = serde_json::to_value(Afe::default()).unwrap();
        assert_eq!(json["daily_cost"], serde_json::Value::Null);
    }
}
