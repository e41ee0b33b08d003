//! Planet output normalization
//!
//! Chart endpoints disagree on the shape of `output`: some return a mapping
//! keyed by numeric body codes, some a list of such mappings, some key by
//! body name. [`flatten`] folds all of them into one mapping from display
//! name to attributes, and [`PlanetEntry`] reads the attributes the report
//! needs with a fixed policy for every missing or malformed field.

use serde_json::{Map, Value};

/// Numeric body codes used by the API
const BODY_CODES: [(&str, &str); 9] = [
    ("1", "Sun"),
    ("2", "Moon"),
    ("3", "Mars"),
    ("4", "Mercury"),
    ("5", "Jupiter"),
    ("6", "Venus"),
    ("7", "Saturn"),
    ("8", "Rahu"),
    ("9", "Ketu"),
];

pub const SIGN_NAMES: [&str; 12] = [
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
    "Aquarius",
    "Pisces",
];

/// The shapes an `output` payload can take
#[derive(Debug, Clone, Copy)]
pub enum RawOutput<'a> {
    Mapping(&'a Map<String, Value>),
    Sequence(&'a [Value]),
    Unrecognized,
}

impl<'a> From<&'a Value> for RawOutput<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => RawOutput::Mapping(map),
            Value::Array(items) => RawOutput::Sequence(items),
            _ => RawOutput::Unrecognized,
        }
    }
}

impl RawOutput<'_> {
    /// Display name → attributes, in discovery order
    pub fn flatten(&self) -> Map<String, Value> {
        let mut out = Map::new();
        match self {
            RawOutput::Mapping(map) => ingest(map, &mut out),
            RawOutput::Sequence(items) => {
                for item in items.iter() {
                    if let Value::Object(map) = item {
                        ingest(map, &mut out);
                    }
                }
            }
            RawOutput::Unrecognized => {}
        }
        out
    }
}

/// Normalize any `output` value; non-mapping, non-list input yields nothing
pub fn flatten(raw: &Value) -> Map<String, Value> {
    RawOutput::from(raw).flatten()
}

// Later entries with the same display name replace earlier ones in place.
fn ingest(map: &Map<String, Value>, out: &mut Map<String, Value>) {
    for (key, value) in map {
        if value.is_object() {
            out.insert(display_name(key, value), value.clone());
        }
    }
}

fn display_name(key: &str, value: &Value) -> String {
    if let Some(name) = value.get("name").and_then(Value::as_str).filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    if let Some((_, name)) = BODY_CODES.iter().find(|(code, _)| *code == key) {
        return name.to_string();
    }
    if key.eq_ignore_ascii_case("ascendant") {
        return "Ascendant".to_string();
    }
    key.to_string()
}

/// Sign name for a 1-based sign number
pub fn sign_name(sign: i64) -> Option<&'static str> {
    usize::try_from(sign)
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|idx| SIGN_NAMES.get(idx).copied())
}

/// Report view of one normalized body
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetEntry {
    pub name: String,
    pub current_sign: Option<i64>,
    pub norm_degree: Option<f64>,
    pub is_retro: bool,
    pub house_number: Option<i64>,
    pub nakshatra_name: Option<String>,
}

impl PlanetEntry {
    pub fn from_attributes(name: &str, attributes: &Value) -> Self {
        Self {
            name: name.to_string(),
            current_sign: attributes.get("current_sign").and_then(as_integer),
            norm_degree: attributes.get("normDegree").and_then(as_float),
            is_retro: attributes.get("isRetro").is_some_and(is_truthy),
            house_number: attributes.get("house_number").and_then(as_integer),
            nakshatra_name: attributes
                .get("nakshatra_name")
                .and_then(Value::as_str)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
        }
    }

    /// `Aries`, `UnknownSign(13)` or `Unknown`
    pub fn sign_label(&self) -> String {
        match self.current_sign {
            Some(sign) => sign_name(sign)
                .map(str::to_string)
                .unwrap_or_else(|| format!("UnknownSign({})", sign)),
            None => "Unknown".to_string(),
        }
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

// "true"/"1" in any case, whether sent as bool, number or string
fn is_truthy(value: &Value) -> bool {
    let text = match value {
        Value::String(s) => s.trim().to_lowercase(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        _ => return false,
    };
    text == "true" || text == "1"
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mapping_resolves_codes_and_embedded_names() {
        let raw = json!({
            "1": {"current_sign": 1, "normDegree": 15.5},
            "venus_custom": {"name": "Venus", "current_sign": 2},
            "ASCENDANT": {"current_sign": 5},
            "Gulika": {"current_sign": 9},
            "meta": "ignored"
        });

        let flat = flatten(&raw);
        let names: Vec<_> = flat.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Sun", "Venus", "Ascendant", "Gulika"]);
    }

    #[test]
    fn test_key_order_does_not_change_the_result() {
        let a = json!({"1": {"current_sign": 1}, "venus_custom": {"name": "Venus"}});
        let b = json!({"venus_custom": {"name": "Venus"}, "1": {"current_sign": 1}});

        let mut left: Vec<_> = flatten(&a).into_iter().collect();
        let mut right: Vec<_> = flatten(&b).into_iter().collect();
        left.sort_by(|x, y| x.0.cmp(&y.0));
        right.sort_by(|x, y| x.0.cmp(&y.0));
        assert_eq!(left, right);
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let raw = json!([{"0": {"name": "Ascendant", "current_sign": 3}}, {"2": {"current_sign": 4}}]);
        assert_eq!(flatten(&raw), flatten(&raw));
    }

    #[test]
    fn test_sequence_skips_non_mappings_and_overwrites_duplicates() {
        let raw = json!([
            {"1": {"current_sign": 1}},
            42,
            "text",
            {"sun": {"name": "Sun", "current_sign": 7}}
        ]);

        let flat = flatten(&raw);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat["Sun"]["current_sign"], json!(7));
    }

    #[test]
    fn test_unrecognized_input_is_empty() {
        assert!(flatten(&Value::Null).is_empty());
        assert!(flatten(&json!(42)).is_empty());
        assert!(flatten(&json!("planets")).is_empty());
    }

    #[test]
    fn test_empty_name_falls_back_to_code() {
        let flat = flatten(&json!({"7": {"name": "", "current_sign": 10}}));
        assert!(flat.contains_key("Saturn"));
    }

    #[test]
    fn test_entry_reads_attributes_with_policies() {
        let entry = PlanetEntry::from_attributes(
            "Moon",
            &json!({
                "current_sign": "4",
                "normDegree": 3.25,
                "isRetro": "True",
                "house_number": 10,
                "nakshatra_name": "Pushya"
            }),
        );
        assert_eq!(entry.sign_label(), "Cancer");
        assert_eq!(entry.norm_degree, Some(3.25));
        assert!(entry.is_retro);
        assert_eq!(entry.house_number, Some(10));
        assert_eq!(entry.nakshatra_name.as_deref(), Some("Pushya"));

        let bare = PlanetEntry::from_attributes("X", &json!({"current_sign": 13, "isRetro": "yes"}));
        assert_eq!(bare.sign_label(), "UnknownSign(13)");
        assert_eq!(bare.norm_degree, None);
        assert!(!bare.is_retro);

        let unsigned = PlanetEntry::from_attributes("Y", &json!({"isRetro": 1}));
        assert_eq!(unsigned.sign_label(), "Unknown");
        assert!(unsigned.is_retro);
    }

    #[test]
    fn test_sign_table_bounds() {
        assert_eq!(sign_name(1), Some("Aries"));
        assert_eq!(sign_name(12), Some("Pisces"));
        assert_eq!(sign_name(0), None);
        assert_eq!(sign_name(-1), None);
    }
}
