pub mod client;
pub mod dispatch;
pub mod error;
pub mod types;

pub use client::{HttpPersonaApi, PersonaApi};
pub use dispatch::perform;
pub use error::ApiError;
pub use types::SavedPersona;
