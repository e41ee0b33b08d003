use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;

/// Structured error record stored in place of an API response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFailure {
    /// HTTP-ish status; `null` for transport and parse failures
    #[serde(rename = "statusCode")]
    pub status_code: Option<u16>,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Outcome of one chart call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartResult {
    /// Response body of a 2xx call, kept verbatim
    Success(Value),
    Failure(ChartFailure),
}

impl ChartResult {
    /// `statusCode` as reported by the record or the response body
    pub fn status_code(&self) -> Option<u64> {
        match self {
            ChartResult::Success(body) => body.get("statusCode").and_then(integral_status),
            ChartResult::Failure(failure) => failure.status_code.map(u64::from),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status_code() == Some(200)
    }

    /// The per-body `output` payload, if any
    pub fn output(&self) -> Option<&Value> {
        match self {
            ChartResult::Success(body) => body.get("output"),
            ChartResult::Failure(_) => None,
        }
    }

    pub fn error(&self) -> String {
        match self {
            ChartResult::Failure(failure) => failure.error.clone(),
            ChartResult::Success(body) => match body.get("error") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => "Unknown".to_string(),
                Some(other) => other.to_string(),
            },
        }
    }

    pub fn details(&self) -> Option<String> {
        let details = match self {
            ChartResult::Failure(failure) => return failure.details.clone(),
            ChartResult::Success(body) => body.get("details").or_else(|| body.get("message"))?,
        };
        match details {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

// `200` and `200.0` are the same status
fn integral_status(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u16::MAX as f64)
            .map(|f| f as u64)
    })
}

/// Chart identifier → result, in fetch order
///
/// Serializes as a JSON object whose key order is the insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartResults {
    entries: Vec<(String, ChartResult)>,
}

impl ChartResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; a replaced entry keeps its original position
    pub fn insert(&mut self, id: impl Into<String>, result: ChartResult) {
        let id = id.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = result,
            None => self.entries.push((id, result)),
        }
    }

    pub fn get(&self, id: &str) -> Option<&ChartResult> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, result)| result)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChartResult)> {
        self.entries.iter().map(|(id, result)| (id.as_str(), result))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn failed(&self) -> usize {
        self.entries.iter().filter(|(_, r)| !r.is_ok()).count()
    }

    /// Pretty-printed JSON for the raw download artifact
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for ChartResults {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, result) in &self.entries {
            map.serialize_entry(id, result)?;
        }
        map.end()
    }
}
