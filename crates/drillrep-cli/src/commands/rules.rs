use drillrep_core::error::DrillrepError;
use drillrep_core::model::{Afe, PersonnelInCharge, Profile, SectionRecord};
use drillrep_core::parsing::Extractor;
use drillrep_core::rules::builtin;
use drillrep_core::rules::schema::{
    FieldRuleDef, LabeledSectionDef, NumericPolicy, PositionalSectionDef, RuleSetDef,
};
use std::path::Path;

pub fn list() -> Result<(), DrillrepError> {
    println!("Available predefined rulesets:\n");
    for name in builtin::PRESETS {
        let rs = builtin::load_preset(name)?;
        let default_info = if *name == builtin::DEFAULT_PRESET {
            " [default]"
        } else {
            ""
        };
        println!("  {:<10} {} (v{}){}", name, rs.name, rs.version, default_info);
        if let Some(ref desc) = rs.description {
            println!("             {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), DrillrepError> {
    let rs = builtin::load_preset(preset)?;
    print_ruleset(&rs);
    Ok(())
}

fn print_ruleset(rs: &RuleSetDef) {
    println!("{} (version {})\n", rs.name, rs.version);
    if let Some(ref desc) = rs.description {
        println!("{}\n", desc);
    }

    match rs.numeric_policy {
        NumericPolicy::Strict => {
            println!("Unparseable elapsed/depth values abort the extraction.\n")
        }
        NumericPolicy::Lenient => {
            println!("Unparseable elapsed/depth values are left empty and reported as warnings.\n")
        }
    }

    let profile = &rs.profile;
    println!(
        "Profile: rows {}..{} of column {}",
        profile.rows.start, profile.rows.end, profile.column
    );
    print_field_rules(&profile.fields);
    match profile.date_pattern {
        Some(ref pattern) => println!("    {:<28} {}", "date", pattern),
        None => println!("    {:<28} (not derived)", "date"),
    }
    println!();

    print_positional("General", &rs.general);
    print_positional("Drilling parameters", &rs.drilling_parameters);
    print_labeled("AFE", &rs.afe);
    print_labeled("Personnel in charge", &rs.personnel_in_charge);
    print_positional("Summary", &rs.summary);

    let tb = &rs.time_breakdown;
    println!("Time breakdown: rows strictly between {} and {}", tb.header, tb.footer);
    println!("  first {} columns", tb.width);
    for (name, column) in tb.columns.all() {
        println!("    {:<28} column {}", name, column);
    }
    println!();
}

fn print_positional(title: &str, def: &PositionalSectionDef) {
    println!(
        "{}: rows from {} {:+} to {} {:+}, {}",
        title,
        def.bounds.start,
        def.bounds.start_offset,
        def.bounds.end,
        def.bounds.end_offset,
        def.column
    );
    for (i, field) in def.fields.iter().enumerate() {
        println!("    {:>2}. {}", i + 1, field);
    }
    if def.join_lines {
        println!("  line breaks are collapsed into spaces");
    }
    println!();
}

fn print_labeled(title: &str, def: &LabeledSectionDef) {
    println!(
        "{}: rows from {} {:+} to {} {:+}, {}",
        title,
        def.bounds.start,
        def.bounds.start_offset,
        def.bounds.end,
        def.bounds.end_offset,
        def.column
    );
    print_field_rules(&def.fields);
    println!();
}

fn print_field_rules(fields: &[FieldRuleDef]) {
    for rule in fields {
        let mut patterns = rule.patterns.iter();
        if let Some(first) = patterns.next() {
            println!("    {:<28} {}", rule.field, first);
        }
        for fallback in patterns {
            println!("    {:<28} {}", "", fallback);
        }
    }
}

pub fn schema() -> Result<(), DrillrepError> {
    print!(
        r#"JSON Rule Schema
================

A rule file describes where each section of a daily drilling report sits
in the exported table and how to read its values. Rows and columns are
zero-based; row 0 is the top of the page. Markers are case-sensitive
substrings; patterns are case-insensitive regular expressions whose
capture group 1 is the value.

Top-level fields:
  name            (string, required)  Human-readable name of the ruleset
  description     (string, optional)  What this ruleset is for
  version         (string, required)  Version identifier (e.g., "1.1")
  numeric_policy  (string, optional)  "lenient" (default): an unparseable
                                      elapsed/depth becomes null and a
                                      warning is reported. "strict": it
                                      aborts extraction. Placeholders such
                                      as "-" or "N/A" are always null.
  profile, general, drilling_parameters, afe, personnel_in_charge,
  summary, time_breakdown   (objects, required, see below)

Markers ("start", "end", "header", "footer"):
  a string, or an array of strings that must all appear in one row.

Bounds:
  {{ "start": MARKER, "end": MARKER, "start_offset": N, "end_offset": N }}
  selects rows [row(start) + start_offset, row(end) + end_offset).

Columns:
  a number, or {{ "marker": "AFE NUMBER", "offset": -1 }} for the column
  holding the marker, shifted by the offset.

profile:
  rows          {{ "start": 1, "end": 4 }}
  column        number (default 0)
  fields        [{{ "field": NAME, "patterns": [REGEX, ...] }}]
  date_pattern  REGEX with day, month and year groups (optional)

general, drilling_parameters, summary (positional):
  bounds, column
  fields        [NAME, ...]  assigned in order to the rows of the window.
                The window must hold exactly this many rows.
  join_lines    bool (default false)

afe, personnel_in_charge (labeled):
  bounds, column
  fields        [{{ "field": NAME, "patterns": [REGEX, ...] }}]
                Patterns are tried in order against every cell; the
                first match wins. Unmatched fields are null.

time_breakdown:
  header, footer  MARKER
  width           number (default 9)
  columns         {{ "start": 0, "end": 1, "elapsed": 2, "depth": 3,
                    "pt_npt": 5, "code": 6, "description": 7,
                    "operation": 8 }}

Example (the AFE section):
{{
  "afe": {{
    "bounds": {{ "start": "AFE", "end": "PERSONNEL IN CHARGE", "start_offset": 1 }},
    "column": 12,
    "fields": [
      {{ "field": "daily_cost", "patterns": ["DAILY COST\\nUSD ([\\d,]+\\.\\d+)"] }}
    ]
  }}
}}

Run `drillrep rules explain reference` for a complete ruleset, and
`drillrep locate <FILE> <MARKER>...` to find marker rows in a table.
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), DrillrepError> {
    let rs = drillrep_core::rules::load_ruleset(file)?;
    // Compiling also checks every pattern.
    let extractor = Extractor::new(rs)?;
    let rs = extractor.rules();

    println!("Ruleset '{}' (v{}) is valid.", rs.name, rs.version);
    let pattern_count: usize = [&rs.profile.fields, &rs.afe.fields, &rs.personnel_in_charge.fields]
        .iter()
        .flat_map(|fields| fields.iter())
        .map(|rule| rule.patterns.len())
        .sum();
    println!("  Patterns: {}", pattern_count);
    println!(
        "  Positional fields: {}",
        rs.general.fields.len() + rs.drilling_parameters.fields.len() + rs.summary.fields.len()
    );

    let mut warnings = Vec::new();
    for (section, known, defined) in [
        (Profile::SECTION, Profile::FIELDS, rs.profile.fields.len()),
        (Afe::SECTION, Afe::FIELDS, rs.afe.fields.len()),
        (
            PersonnelInCharge::SECTION,
            PersonnelInCharge::FIELDS,
            rs.personnel_in_charge.fields.len(),
        ),
    ] {
        if defined < known.len() {
            warnings.push(format!(
                "{} defines {} of {} fields; the rest will always be null",
                section,
                defined,
                known.len()
            ));
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
