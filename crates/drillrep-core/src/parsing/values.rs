use crate::error::DrillrepError;
use chrono::{NaiveDate, NaiveTime, Timelike};

/// Convert an `HH:MM` clock reading into fractional hours.
///
/// `"24:00"` marks the end of the reporting day and maps to exactly `24.0`;
/// a plain clock parser would reject it or wrap it to midnight.
pub fn convert_time(raw: &str) -> Result<f64, DrillrepError> {
    clock_hours("time", raw)
}

pub(crate) fn clock_hours(field: &str, raw: &str) -> Result<f64, DrillrepError> {
    let s = raw.trim();
    if s == "24:00" {
        return Ok(24.0);
    }
    let time = NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|e| DrillrepError::malformed(field, raw, e.to_string()))?;
    Ok(f64::from(time.hour()) + f64::from(time.minute()) / 60.0)
}

/// Cell contents that stand for "no value" in a numeric column.
const PLACEHOLDERS: &[&str] = &["-", "--", "*", "\u{2014}", "n.a.", "n/a"];

/// Coerce a numeric cell, dropping thousands separators.
///
/// - "1,500" -> Some(1500.0)
/// - "", "-", "N/A" -> None
/// - "TD" -> Err(reason)
pub fn coerce_number(raw: &str) -> Result<Option<f64>, String> {
    let trimmed = raw.trim();
    if PLACEHOLDERS.iter().any(|p| trimmed.eq_ignore_ascii_case(p)) {
        return Ok(None);
    }
    let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Ok(None);
    }
    parse_finite(&cleaned).map(Some)
}

/// Keep only digits and dots, then parse. Used for values that carry units
/// or labels inline, e.g. "12.5 m".
pub fn strip_to_number(raw: &str) -> Result<Option<f64>, String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return Ok(None);
    }
    parse_finite(&cleaned).map(Some)
}

fn parse_finite(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(format!("'{s}' is not a finite number")),
        Err(e) => Err(format!("invalid number '{s}': {e}")),
    }
}

/// Build a date from `D`, `Mon` and `YY`/`YYYY` parts, e.g. ("7", "mar", "24").
pub fn parse_report_date(day: &str, month: &str, year: &str) -> Option<NaiveDate> {
    let format = match year.len() {
        2 => "%d-%b-%y",
        4 => "%d-%b-%Y",
        _ => return None,
    };
    let mut month_chars = month.chars();
    let month = match month_chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + &month_chars.as_str().to_ascii_lowercase(),
        None => return None,
    };
    NaiveDate::parse_from_str(&format!("{day}-{month}-{year}"), format).ok()
}

/// Collapse embedded line breaks (and the whitespace around them) into single spaces.
pub fn join_lines(s: &str) -> String {
    s.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
