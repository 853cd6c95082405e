//! HTTP client for the persona backend.
//!
//! All three endpoints are JSON POSTs. Any non-2xx status is a failure and
//! its body is searched for a `detail` message.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Url;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{
    ChatRequest, ChatResponse, ErrorBody, GeneratePersonaRequest, SavePersonaRequest,
    SavedPersona,
};
use crate::core::persona::Persona;

pub const PERSONA_PATH: &str = "/api/persona";
pub const CHAT_PATH: &str = "/api/chat";
pub const SAVE_PERSONA_PATH: &str = "/api/save-persona";

#[async_trait]
pub trait PersonaApi: Send + Sync {
    /// `POST /api/persona`
    async fn generate_persona(&self, username: &str) -> Result<Persona, ApiError>;

    /// `POST /api/chat`, returning the persona's reply.
    async fn chat(&self, persona: &Persona, message: &str) -> Result<String, ApiError>;

    /// `POST /api/save-persona`
    async fn save_persona(
        &self,
        username: &str,
        persona: &Persona,
    ) -> Result<SavedPersona, ApiError>;

    /// `GET` a file URL returned by `save_persona`. Relative URLs resolve
    /// against the backend base URL.
    async fn download(&self, file_url: &str) -> Result<Vec<u8>, ApiError>;
}

pub struct HttpPersonaApi {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpPersonaApi {
    /// `timeout` of `None` means requests wait indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::Config(format!("{base_url}: {e}")))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Config(format!("{path}: {e}")))
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.resolve(path)?;
        debug!("POST {url}");

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            let detail = ErrorBody::detail_from(&bytes);
            warn!("{path} failed: {} - {:?}", status.as_u16(), detail);
            return Err(ApiError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        debug!("{path} -> {} ({} bytes)", status.as_u16(), bytes.len());
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl PersonaApi for HttpPersonaApi {
    async fn generate_persona(&self, username: &str) -> Result<Persona, ApiError> {
        info!("Requesting persona for {username}");
        self.post_json(PERSONA_PATH, &GeneratePersonaRequest { username })
            .await
    }

    async fn chat(&self, persona: &Persona, message: &str) -> Result<String, ApiError> {
        info!("Sending chat message ({} chars)", message.len());
        let reply: ChatResponse = self
            .post_json(CHAT_PATH, &ChatRequest { persona, message })
            .await?;
        Ok(reply.response)
    }

    async fn save_persona(
        &self,
        username: &str,
        persona: &Persona,
    ) -> Result<SavedPersona, ApiError> {
        info!("Saving persona for {username}");
        self.post_json(SAVE_PERSONA_PATH, &SavePersonaRequest { username, persona })
            .await
    }

    async fn download(&self, file_url: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.resolve(file_url)?;
        info!("Downloading {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!("Download of {file_url} failed: {}", status.as_u16());
            return Err(ApiError::Api {
                status: status.as_u16(),
                detail: ErrorBody::detail_from(&bytes),
            });
        }

        Ok(bytes.to_vec())
    }
}
