//! Birth details: the immutable per-request input of every chart fetch.
//!
//! A [`BirthInput`] is built either directly or through the JSON load
//! validator ([`BirthInput::from_json`]), which accepts exactly the document
//! written into the footer of the readable report. [`BirthPayload`] is the
//! wire shape posted to the astrology API.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Keys every birth-details document must carry, in canonical order
pub const REQUIRED_KEYS: [&str; 12] = [
    "name",
    "year",
    "month",
    "date",
    "hours",
    "minutes",
    "seconds",
    "latitude",
    "longitude",
    "timezone",
    "observation_point",
    "ayanamsha",
];

/// Supported UTC offsets with their display labels
pub const TIMEZONES: &[(&str, f64)] = &[
    ("UTC−12:00 Intl Date Line West", -12.0),
    ("UTC−11:00 Midway Island, Samoa", -11.0),
    ("UTC−10:00 Hawaii", -10.0),
    ("UTC−09:30 Marquesas", -9.5),
    ("UTC−09:00 Alaska", -9.0),
    ("UTC−08:00 Pacific", -8.0),
    ("UTC−07:00 Mountain", -7.0),
    ("UTC−06:00 Central", -6.0),
    ("UTC−05:00 Eastern", -5.0),
    ("UTC±00:00 GMT", 0.0),
    ("UTC+01:00 CET", 1.0),
    ("UTC+02:00 EET", 2.0),
    ("UTC+03:00 Moscow/Nairobi", 3.0),
    ("UTC+03:30 Tehran", 3.5),
    ("UTC+04:00 Abu Dhabi", 4.0),
    ("UTC+04:30 Kabul", 4.5),
    ("UTC+05:00 Yekaterinburg", 5.0),
    ("UTC+05:30 IST", 5.5),
    ("UTC+05:45 Nepal", 5.75),
    ("UTC+06:00 Dhaka", 6.0),
    ("UTC+06:30 Yangon", 6.5),
    ("UTC+07:00 Bangkok", 7.0),
    ("UTC+08:00 Beijing", 8.0),
    ("UTC+08:45 Eucla", 8.75),
    ("UTC+09:00 Tokyo", 9.0),
    ("UTC+09:30 Adelaide", 9.5),
    ("UTC+10:00 Sydney", 10.0),
    ("UTC+10:30 Lord Howe", 10.5),
    ("UTC+11:00 Magadan", 11.0),
    ("UTC+12:00 Auckland", 12.0),
    ("UTC+12:45 Chatham", 12.75),
    ("UTC+13:00 Tonga", 13.0),
    ("UTC+14:00 Line Islands", 14.0),
];

/// Reverse lookup of an offset in [`TIMEZONES`] (exact match only)
pub fn timezone_label(offset: f64) -> Option<&'static str> {
    TIMEZONES
        .iter()
        .find(|(_, value)| *value == offset)
        .map(|(label, _)| *label)
}

/// Display label for an offset, falling back to a numeric `UTC±H` rendering
pub fn describe_timezone(offset: f64) -> String {
    match timezone_label(offset) {
        Some(label) => label.to_string(),
        None => format!("UTC{:+}", offset),
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum BirthError {
    #[error("JSON input empty")]
    EmptyInput,
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    #[error("missing keys: {}", .missing.join(", "))]
    Validation { missing: Vec<String> },
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl BirthError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        BirthError::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObservationPoint {
    Topocentric,
    Geocentric,
}

impl ObservationPoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObservationPoint::Topocentric => "topocentric",
            ObservationPoint::Geocentric => "geocentric",
        }
    }
}

impl FromStr for ObservationPoint {
    type Err = BirthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "topocentric" => Ok(ObservationPoint::Topocentric),
            "geocentric" => Ok(ObservationPoint::Geocentric),
            other => Err(BirthError::invalid(
                "observation_point",
                format!("expected 'topocentric' or 'geocentric', got '{}'", other),
            )),
        }
    }
}

impl fmt::Display for ObservationPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ayanamsha {
    Lahiri,
    Sayana,
}

impl Ayanamsha {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ayanamsha::Lahiri => "lahiri",
            Ayanamsha::Sayana => "sayana",
        }
    }
}

impl FromStr for Ayanamsha {
    type Err = BirthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lahiri" => Ok(Ayanamsha::Lahiri),
            "sayana" => Ok(Ayanamsha::Sayana),
            other => Err(BirthError::invalid(
                "ayanamsha",
                format!("expected 'lahiri' or 'sayana', got '{}'", other),
            )),
        }
    }
}

impl fmt::Display for Ayanamsha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Birth date, time and place for one chart request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthInput {
    pub name: String,
    pub year: i32,
    pub month: u32,
    /// Day of month
    pub date: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub latitude: f64,
    pub longitude: f64,
    /// UTC offset in hours; must be one of [`TIMEZONES`]
    pub timezone: f64,
    pub observation_point: ObservationPoint,
    pub ayanamsha: Ayanamsha,
}

impl BirthInput {
    /// Parse and validate a birth-details JSON document
    pub fn from_json(raw: &str) -> Result<Self, BirthError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(BirthError::EmptyInput);
        }

        let value: Value =
            serde_json::from_str(raw).map_err(|e| BirthError::InvalidJson(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Validate an already-parsed birth-details document
    ///
    /// All twelve keys must be present; numeric fields are coerced from
    /// numbers or numeric strings. No partial load: the first failure wins.
    pub fn from_value(value: &Value) -> Result<Self, BirthError> {
        let object = value
            .as_object()
            .ok_or_else(|| BirthError::InvalidJson("expected a JSON object".to_string()))?;

        let missing: Vec<String> = REQUIRED_KEYS
            .iter()
            .filter(|key| !object.contains_key(**key))
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(BirthError::Validation { missing });
        }

        let input = BirthInput {
            name: coerce_text(object, "name")?,
            year: coerce_int(object, "year")?,
            month: coerce_int(object, "month")?,
            date: coerce_int(object, "date")?,
            hours: coerce_int(object, "hours")?,
            minutes: coerce_int(object, "minutes")?,
            seconds: coerce_int(object, "seconds")?,
            latitude: coerce_float(object, "latitude")?,
            longitude: coerce_float(object, "longitude")?,
            timezone: coerce_float(object, "timezone")?,
            observation_point: coerce_text(object, "observation_point")?.parse()?,
            ayanamsha: coerce_text(object, "ayanamsha")?.parse()?,
        };

        input.validate()?;
        Ok(input)
    }

    /// Check every field against its allowed range
    pub fn validate(&self) -> Result<(), BirthError> {
        if self.name.trim().is_empty() {
            return Err(BirthError::Validation {
                missing: vec!["name".to_string()],
            });
        }

        let birth_date = NaiveDate::from_ymd_opt(self.year, self.month, self.date).ok_or_else(|| {
            BirthError::invalid(
                "date",
                format!("{}-{:02}-{:02} is not a calendar date", self.year, self.month, self.date),
            )
        })?;
        let earliest = NaiveDate::from_ymd_opt(1800, 1, 1).unwrap_or(NaiveDate::MIN);
        let today = Local::now().date_naive();
        if birth_date < earliest || birth_date > today {
            return Err(BirthError::invalid(
                "date",
                format!("{} is outside 1800-01-01..={}", birth_date, today),
            ));
        }

        if self.hours > 23 {
            return Err(BirthError::invalid("hours", format!("{} not in 0..=23", self.hours)));
        }
        if self.minutes > 59 {
            return Err(BirthError::invalid("minutes", format!("{} not in 0..=59", self.minutes)));
        }
        if self.seconds > 59 {
            return Err(BirthError::invalid("seconds", format!("{} not in 0..=59", self.seconds)));
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(BirthError::invalid(
                "latitude",
                format!("{} not in -90..=90", self.latitude),
            ));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(BirthError::invalid(
                "longitude",
                format!("{} not in -180..=180", self.longitude),
            ));
        }
        if timezone_label(self.timezone).is_none() {
            return Err(BirthError::invalid(
                "timezone",
                format!("{} is not a supported UTC offset", self.timezone),
            ));
        }

        Ok(())
    }

    /// Copy of this input with resolved coordinates
    pub fn with_coordinates(&self, latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            ..self.clone()
        }
    }

    /// Pretty JSON form, re-loadable through [`BirthInput::from_json`]
    pub fn to_pretty_json(&self) -> String {
        // Plain struct of scalars; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

fn coerce_int<T: TryFrom<i64>>(object: &Map<String, Value>, field: &str) -> Result<T, BirthError> {
    let value = &object[field];
    let number = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
    .ok_or_else(|| BirthError::invalid(field, format!("expected an integer, got {}", value)))?;

    T::try_from(number)
        .map_err(|_| BirthError::invalid(field, format!("{} is out of range", number)))
}

fn coerce_float(object: &Map<String, Value>, field: &str) -> Result<f64, BirthError> {
    let value = &object[field];
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
    .ok_or_else(|| BirthError::invalid(field, format!("expected a number, got {}", value)))
}

fn coerce_text(object: &Map<String, Value>, field: &str) -> Result<String, BirthError> {
    match &object[field] {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(BirthError::invalid(field, format!("expected text, got {}", other))),
    }
}

/// `settings` block of the astrology API request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadSettings {
    pub observation_point: ObservationPoint,
    pub ayanamsha: Ayanamsha,
    pub language: &'static str,
}

/// Request body shared by every chart endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirthPayload {
    pub year: i32,
    pub month: u32,
    pub date: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: f64,
    pub settings: PayloadSettings,
}

impl From<&BirthInput> for BirthPayload {
    fn from(input: &BirthInput) -> Self {
        Self {
            year: input.year,
            month: input.month,
            date: input.date,
            hours: input.hours,
            minutes: input.minutes,
            seconds: input.seconds,
            latitude: input.latitude,
            longitude: input.longitude,
            timezone: input.timezone,
            settings: PayloadSettings {
                observation_point: input.observation_point,
                ayanamsha: input.ayanamsha,
                language: "en",
            },
        }
    }
}
