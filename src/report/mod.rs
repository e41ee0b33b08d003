//! Readable text summary of a chart fetch

pub mod artifacts;

pub use artifacts::{ArtifactError, Artifacts, file_stem, safe_name};

use crate::birth::{BirthInput, describe_timezone};
use crate::client::{ChartResult, ChartResults};
use crate::normalize::{PlanetEntry, flatten};
use serde_json::Value;

const RULE: &str = "========================================";

/// Bodies listed first in every chart section, in this order
pub const PREFERRED_ORDER: [&str; 10] = [
    "Ascendant", "Sun", "Moon", "Mars", "Mercury", "Jupiter", "Venus", "Saturn", "Rahu", "Ketu",
];

/// Error details beyond this many characters are cut in the report
pub const MAX_DETAIL_CHARS: usize = 500;

/// Build the downloadable text report
///
/// Sections follow the iteration order of `results`. The footer carries the
/// birth details as pretty JSON that [`BirthInput::from_json`] accepts.
pub fn generate(birth: &BirthInput, results: &ChartResults) -> String {
    let mut lines = vec![
        RULE.to_string(),
        "BIRTH DETAILS".to_string(),
        format!("Name: {}", birth.name),
        format!("Date: {}-{:02}-{:02}", birth.year, birth.month, birth.date),
        format!(
            "Time: {:02}:{:02}:{:02}",
            birth.hours, birth.minutes, birth.seconds
        ),
        format!(
            "Location: Lat {:.4}, Lon {:.4}",
            birth.latitude, birth.longitude
        ),
        format!("Timezone: {}", describe_timezone(birth.timezone)),
        format!("Ayanamsha: {}", birth.ayanamsha),
        format!("Observation Point: {}", birth.observation_point),
        RULE.to_string(),
        String::new(),
    ];

    for (chart, result) in results.iter() {
        lines.push(format!("-- {} --", chart));
        chart_section(result, &mut lines);
        lines.push(String::new());
    }

    lines.extend([
        RULE.to_string(),
        "BIRTH JSON:".to_string(),
        birth.to_pretty_json(),
        RULE.to_string(),
    ]);

    lines.join("\n")
}

fn chart_section(result: &ChartResult, lines: &mut Vec<String>) {
    if !result.is_ok() {
        let mut line = format!("ERROR: {}", result.error());
        if let Some(details) = result.details().filter(|d| !d.trim().is_empty()) {
            line.push_str(" - ");
            line.push_str(&truncate(details.trim(), MAX_DETAIL_CHARS));
        }
        lines.push(line);
        return;
    }

    let planets = flatten(result.output().unwrap_or(&Value::Null));
    if planets.is_empty() {
        lines.push("No planet data returned.".to_string());
        return;
    }

    for name in PREFERRED_ORDER {
        if let Some(attributes) = planets.get(name) {
            lines.extend(planet_line(&PlanetEntry::from_attributes(name, attributes)));
        }
    }
    for (name, attributes) in &planets {
        if !PREFERRED_ORDER.contains(&name.as_str()) {
            lines.extend(planet_line(&PlanetEntry::from_attributes(name, attributes)));
        }
    }
}

/// `Sun: Aries 15.50°, Direct`; bodies without a degree produce no line
pub fn planet_line(entry: &PlanetEntry) -> Option<String> {
    let degree = entry.norm_degree?;
    let motion = if entry.is_retro { "Retro" } else { "Direct" };
    let mut line = format!("{}: {} {:.2}°, {}", entry.name, entry.sign_label(), degree, motion);

    if let Some(house) = entry.house_number {
        line.push_str(&format!(", House {}", house));
    }
    if let Some(nakshatra) = &entry.nakshatra_name {
        line.push_str(&format!(", Nakshatra {}", nakshatra));
    }
    Some(line)
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

const FOOTER_MARKER: &str = "BIRTH JSON:\n";

/// Extract the footer JSON block from a generated report
///
/// The last marker wins: a name printed in the header may repeat it.
pub fn footer_json(report: &str) -> Option<&str> {
    let start = report.rfind(FOOTER_MARKER)? + FOOTER_MARKER.len();
    let end = report[start..].rfind(&format!("\n{}", RULE))? + start;
    Some(&report[start..end])
}
