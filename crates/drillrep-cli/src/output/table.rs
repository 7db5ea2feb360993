use drillrep_core::error::DrillrepError;
use drillrep_core::model::{
    Afe, DrillingParameters, Extraction, GeneralInfo, PersonnelInCharge, Profile, SectionRecord,
    Summary, TimeBreakdownEntry,
};
use serde::Serialize;
use serde_json::Value;

pub fn format_report(extraction: &Extraction) -> Result<String, DrillrepError> {
    let report = &extraction.report;
    let mut lines = Vec::new();

    let mut profile_fields = Profile::FIELDS.to_vec();
    profile_fields.push("date");
    section(&mut lines, "Profile", &report.profile, &profile_fields)?;
    section(&mut lines, "General", &report.general, GeneralInfo::FIELDS)?;
    section(
        &mut lines,
        "Drilling parameters",
        &report.drilling_parameters,
        DrillingParameters::FIELDS,
    )?;
    section(&mut lines, "AFE (USD)", &report.afe, Afe::FIELDS)?;
    section(
        &mut lines,
        "Personnel in charge",
        &report.personnel_in_charge,
        PersonnelInCharge::FIELDS,
    )?;
    section(&mut lines, "Summary", &report.summary, Summary::FIELDS)?;
    time_breakdown(&mut lines, &report.time_breakdown);

    if !extraction.warnings.is_empty() {
        lines.push("Warnings:".to_string());
        for w in &extraction.warnings {
            lines.push(format!(
                "  {}.{} '{}': {}",
                w.section, w.field, w.value, w.reason
            ));
        }
        lines.push(String::new());
    }

    lines.push(format!("Content hash: {}", report.profile.content_hash()));
    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}

fn section<T: Serialize>(
    lines: &mut Vec<String>,
    title: &str,
    record: &T,
    fields: &[&str],
) -> Result<(), DrillrepError> {
    lines.push(format!("=== {title} ==="));
    let value = serde_json::to_value(record)?;
    let width = fields.iter().map(|f| f.len()).max().unwrap_or(0);
    for field in fields {
        let text = match value.get(field) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => "-".to_string(),
            Some(other) => other.to_string(),
        };
        lines.push(format!("  {field:<width$}  {text}"));
    }
    lines.push(String::new());
    Ok(())
}

fn time_breakdown(lines: &mut Vec<String>, entries: &[TimeBreakdownEntry]) {
    lines.push(format!("=== Time breakdown ({} entries) ===", entries.len()));
    if entries.is_empty() {
        lines.push(String::new());
        return;
    }
    lines.push(format!(
        "  {:<5}  {:<5}  {:>7}  {:>8}  {:<6}  {:<6}  {}",
        "Start", "End", "Elapsed", "Depth", "PT/NPT", "Code", "Description / Operation"
    ));
    for e in entries {
        lines.push(format!(
            "  {:<5}  {:<5}  {:>7}  {:>8}  {:<6}  {:<6}  {} / {}",
            clock(e.start),
            clock(e.end),
            optional_number(e.elapsed),
            optional_number(e.depth),
            e.pt_npt,
            e.code,
            e.description.replace('\n', " "),
            e.operation.replace('\n', " ")
        ));
    }
    lines.push(String::new());
}

/// Fractional hours back to `HH:MM`; 24.0 prints as "24:00".
fn clock(hours: f64) -> String {
    let minutes = (hours * 60.0).round() as u32;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

fn optional_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock() {
        assert_eq!(clock(0.0), "00:00");
        assert_eq!(clock(6.5), "06:30");
        assert_eq!(clock(24.0), "24:00");
    }

    #[test]
    fn test_missing_fields_print_as_dash() {
        let mut lines = Vec::new();
        let summary = Summary {
            status: Some("Fishing".into()),
            ..Default::default()
        };
        section(&mut lines, "Summary", &summary, Summary::FIELDS).unwrap();
        assert_eq!(lines[1], "  hours_24_summary   -");
        assert_eq!(lines[3], "  status             Fishing");
    }

    #[test]
    fn test_unserializable_record_is_an_error() {
        struct Broken;
        impl Serialize for Broken {
            fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("broken"))
            }
        }
        let mut lines = Vec::new();
        assert!(section(&mut lines, "Broken", &Broken, &["x"]).is_err());
    }

    #[test]
    fn test_format_report_lists_sections() {
        let out = format_report(&Extraction::default()).unwrap();
        assert!(out.contains("=== Profile ==="));
        assert!(out.contains("=== Time breakdown (0 entries) ==="));
        assert!(out.contains("Content hash: "));
    }
}
