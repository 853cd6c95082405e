//! Wire types for the persona backend.
//!
//! Request bodies borrow from the caller; response bodies are owned.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::persona::Persona;

/// Body of `POST /api/persona`.
#[derive(Serialize, Debug)]
pub struct GeneratePersonaRequest<'a> {
    pub username: &'a str,
}

/// Body of `POST /api/chat`.
#[derive(Serialize, Debug)]
pub struct ChatRequest<'a> {
    pub persona: &'a Persona,
    pub message: &'a str,
}

/// Success body of `POST /api/chat`. A missing `response` reads as blank.
#[derive(Deserialize, Debug, Default)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: String,
}

/// Body of `POST /api/save-persona`.
#[derive(Serialize, Debug)]
pub struct SavePersonaRequest<'a> {
    pub username: &'a str,
    pub persona: &'a Persona,
}

/// Success body of `POST /api/save-persona`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SavedPersona {
    pub file_url: String,
    pub filename: String,
}

/// Failure body of any endpoint.
#[derive(Deserialize, Debug, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// The `detail` message, if it is a non-empty string.
    ///
    /// Validation errors carry a structured `detail`; those fall back to the
    /// operation's generic message.
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    /// Extract `detail` from a raw failure body, tolerating non-JSON bodies.
    pub fn detail_from(bytes: &[u8]) -> Option<String> {
        serde_json::from_slice::<ErrorBody>(bytes)
            .ok()
            .and_then(|body| body.message())
    }
}
