//! Record shapes for printwatch-core.
//!
//! Each record comes in two forms. The `Raw*` types mirror what the API sends:
//! every field optional, timestamps as strings, unknown keys kept in `extra`.
//! The normalized types ([`Print`], [`Printer`], [`Preferences`]) are what the
//! [`Normalizer`](crate::Normalizer) produces for display.
//!
//! API payloads are loosely typed, so string fields are read with JavaScript
//! truthiness: `null`, a missing key, `""`, `false` and `0` all become `None`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::timestamp::Timestamp;

/// Keys that [`Print`] derives itself. Stale copies in `extra` are dropped.
pub(crate) const DERIVED_PRINT_KEYS: &[&str] = &["ended_at", "has_alerts"];

// ---------------------------------------------------------------------------
// Truthiness
// ---------------------------------------------------------------------------

/// `Boolean(value)` for a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Read an optional string field, mapping falsy values to `None`.
///
/// Non-zero numbers and `true` are kept in their string form. Arrays and
/// objects are rejected.
fn truthy_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(value) if !is_truthy(&value) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// PrinterId
// ---------------------------------------------------------------------------

/// Printer identifier as sent by the API: a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrinterId {
    Number(serde_json::Number),
    Text(String),
}

impl std::fmt::Display for PrinterId {
    /// Renders the way JavaScript's `toString` would: whole floats lose their
    /// fractional part, strings are written verbatim.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrinterId::Number(n) => match n.as_f64() {
                Some(x) if n.is_f64() => write_js_number(f, x),
                _ => write!(f, "{n}"),
            },
            PrinterId::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Plain decimal in `[1e-6, 1e21)`, exponent form with an explicit sign
/// outside it.
fn write_js_number(f: &mut std::fmt::Formatter<'_>, x: f64) -> std::fmt::Result {
    if x == 0.0 {
        return write!(f, "0");
    }
    let magnitude = x.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return write!(f, "{x}");
    }
    let exp = format!("{x:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => write!(f, "{mantissa}e+{power}"),
        _ => write!(f, "{exp}"),
    }
}

impl From<u64> for PrinterId {
    fn from(id: u64) -> Self {
        PrinterId::Number(id.into())
    }
}

impl From<i64> for PrinterId {
    fn from(id: i64) -> Self {
        PrinterId::Number(id.into())
    }
}

impl From<&str> for PrinterId {
    fn from(id: &str) -> Self {
        PrinterId::Text(id.to_string())
    }
}

impl From<String> for PrinterId {
    fn from(id: String) -> Self {
        PrinterId::Text(id)
    }
}

// ---------------------------------------------------------------------------
// Print
// ---------------------------------------------------------------------------

/// A print job as received from the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPrint {
    #[serde(default, deserialize_with = "truthy_string")]
    pub cancelled_at: Option<String>,
    #[serde(default, deserialize_with = "truthy_string")]
    pub finished_at: Option<String>,
    #[serde(default, deserialize_with = "truthy_string")]
    pub started_at: Option<String>,
    #[serde(default, deserialize_with = "truthy_string")]
    pub uploaded_at: Option<String>,
    /// Only its truthiness matters.
    #[serde(default)]
    pub alerted_at: Option<Value>,
    /// Every other key, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A print job ready for display.
///
/// Serializes with the same keys as [`RawPrint`] plus the derived ones, so the
/// JSON of a normalized print can be read back as a `RawPrint`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Print {
    pub cancelled_at: Option<String>,
    pub finished_at: Option<String>,
    pub alerted_at: Option<Value>,
    pub started_at: Option<Timestamp>,
    pub uploaded_at: Option<Timestamp>,
    /// `cancelled_at` if the print was cancelled, `finished_at` otherwise.
    pub ended_at: Option<Timestamp>,
    pub has_alerts: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Print {
    pub fn was_cancelled(&self) -> bool {
        self.cancelled_at.is_some()
    }
}

// ---------------------------------------------------------------------------
// Printer
// ---------------------------------------------------------------------------

/// A printer as received from the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPrinter {
    #[serde(default)]
    pub id: Option<PrinterId>,
    #[serde(default, deserialize_with = "truthy_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "truthy_string")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A printer ready for display. `name` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Printer {
    pub id: Option<PrinterId>,
    pub name: String,
    pub created_at: Option<Timestamp>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

/// Notification preferences of a user account, as submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPreferences {
    #[serde(default, deserialize_with = "truthy_string")]
    pub phone_country_code: Option<String>,
    #[serde(default, deserialize_with = "truthy_string")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "truthy_string")]
    pub telegram_chat_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Cleaned notification preferences. A present country code always starts
/// with `+`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preferences {
    pub phone_country_code: Option<String>,
    pub phone_number: Option<String>,
    pub telegram_chat_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Preferences {
    /// Country code and number joined, when both are present. This is the
    /// string to hand to a phone-number validator.
    pub fn phone_number_e164_candidate(&self) -> Option<String> {
        match (&self.phone_country_code, &self.phone_number) {
            (Some(code), Some(number)) => Some(format!("{code}{number}")),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
