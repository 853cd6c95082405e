//! Runs one backend interaction and turns its outcome into an `Action`.
//!
//! This is the operation boundary: every error is caught here and becomes
//! a failure action carrying the banner text. Nothing propagates further.

use std::path::{Path, PathBuf};

use log::{info, warn};

use super::client::PersonaApi;
use super::error::ApiError;
use crate::core::action::{Action, Request};
use crate::core::persona::Persona;

pub const GENERATE_FALLBACK: &str = "Failed to generate persona";
pub const CHAT_FALLBACK: &str = "Failed to get response";
pub const SAVE_FALLBACK: &str = "Failed to save persona";

pub async fn perform(api: &dyn PersonaApi, request: Request, downloads_dir: &Path) -> Action {
    match request {
        Request::GeneratePersona { username } => match api.generate_persona(&username).await {
            Ok(persona) => {
                info!(
                    "Persona generated for {username} ({} fields)",
                    persona.fields().len()
                );
                Action::PersonaGenerated { username, persona }
            }
            Err(e) => {
                warn!("Persona generation failed for {username}: {e}");
                Action::PersonaFailed(e.user_message(GENERATE_FALLBACK))
            }
        },

        Request::Chat {
            persona,
            message,
            typing_id,
        } => match api.chat(&persona, &message).await {
            Ok(response) => Action::ChatReplied {
                typing_id,
                response,
            },
            Err(e) => {
                warn!("Chat request failed: {e}");
                Action::ChatFailed(e.user_message(CHAT_FALLBACK))
            }
        },

        Request::SavePersona { username, persona } => {
            match save_and_download(api, &username, &persona, downloads_dir).await {
                Ok(path) => {
                    info!("Persona saved to {}", path.display());
                    Action::PersonaSaved { path }
                }
                Err(e) => {
                    warn!("Saving persona failed: {e}");
                    Action::SaveFailed(e.user_message(SAVE_FALLBACK))
                }
            }
        }
    }
}

/// Save on the server, then fetch the file it wrote into `downloads_dir`.
async fn save_and_download(
    api: &dyn PersonaApi,
    username: &str,
    persona: &Persona,
    downloads_dir: &Path,
) -> Result<PathBuf, ApiError> {
    let saved = api.save_persona(username, persona).await?;
    let filename = local_file_name(&saved.filename)
        .ok_or_else(|| ApiError::Parse(format!("invalid filename {:?}", saved.filename)))?;

    let bytes = api.download(&saved.file_url).await?;

    tokio::fs::create_dir_all(downloads_dir)
        .await
        .map_err(|e| ApiError::Io(e.to_string()))?;
    let path = downloads_dir.join(filename);
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| ApiError::Io(e.to_string()))?;

    Ok(path)
}

/// The last path component of a server-supplied filename.
pub fn local_file_name(name: &str) -> Option<&str> {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
}
