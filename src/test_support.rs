//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;
use serde_json::Value;

use crate::api::{ApiError, PersonaApi, SavedPersona};
use crate::core::persona::Persona;
use crate::core::state::App;

/// A `PersonaApi` that returns canned results without touching the network.
pub struct ScriptedApi {
    pub persona: Result<Persona, ApiError>,
    pub reply: Result<String, ApiError>,
    pub saved: Result<SavedPersona, ApiError>,
    pub file: Result<Vec<u8>, ApiError>,
}

impl Default for ScriptedApi {
    fn default() -> Self {
        Self {
            persona: Ok(Persona::default()),
            reply: Ok("Hello from the persona".to_string()),
            saved: Ok(SavedPersona {
                file_url: "/personas/persona_alice.txt".to_string(),
                filename: "persona_alice.txt".to_string(),
            }),
            file: Ok(b"Name: AliceBot\n".to_vec()),
        }
    }
}

#[async_trait]
impl PersonaApi for ScriptedApi {
    async fn generate_persona(&self, _username: &str) -> Result<Persona, ApiError> {
        self.persona.clone()
    }

    async fn chat(&self, _persona: &Persona, _message: &str) -> Result<String, ApiError> {
        self.reply.clone()
    }

    async fn save_persona(
        &self,
        _username: &str,
        _persona: &Persona,
    ) -> Result<SavedPersona, ApiError> {
        self.saved.clone()
    }

    async fn download(&self, _file_url: &str) -> Result<Vec<u8>, ApiError> {
        self.file.clone()
    }
}

/// Build a persona from a JSON object literal.
pub fn persona(value: Value) -> Persona {
    serde_json::from_value(value).expect("persona literal must be a JSON object")
}

/// Creates a test App pointed at a dummy backend.
pub fn test_app() -> App {
    App::new("http://test.invalid")
}
