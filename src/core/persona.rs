//! # Persona
//!
//! The backend returns a persona as an arbitrary string-keyed JSON object.
//! We keep it as an ordered map so fields render in the order the server
//! sent them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::markup;

/// Key carrying the backend's source material. Never displayed.
pub const RAW_DATA_KEY: &str = "raw_data";

/// A generated persona. Replaced wholesale, never edited field by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Persona(Map<String, Value>);

impl Persona {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The persona's `name` field, if present and truthy.
    pub fn header_name(&self) -> Option<String> {
        self.get("name")
            .filter(|value| is_truthy(value))
            .map(display_value)
    }
}

impl From<Map<String, Value>> for Persona {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// One label/value row of the persona panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaField {
    pub label: String,
    pub value: String,
}

/// Truthiness as the backend's web client understood it: `null`, `false`,
/// zero and the empty string are all "no value".
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Strings render bare; everything else renders as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Uppercases the first character, leaving the rest untouched.
pub fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Builds the display rows for a persona.
///
/// Skips `raw_data` and falsy values. Values go through the markup
/// boundary, so backend HTML never reaches the terminal as-is.
pub fn render_persona(persona: &Persona) -> Vec<PersonaField> {
    persona
        .fields()
        .iter()
        .filter(|(key, value)| key.as_str() != RAW_DATA_KEY && is_truthy(value))
        .map(|(key, value)| PersonaField {
            label: capitalize(key),
            value: markup::to_plain_text(&display_value(value)),
        })
        .collect()
}
