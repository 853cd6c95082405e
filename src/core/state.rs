//! # Application State
//!
//! Everything the controller knows, owned by a single `App` value.
//! Presentation-only state (input buffers, scroll offsets) lives in `tui`.
//!
//! ```text
//! App
//! ├── ui_state: UiState             // Welcome | PersonaReady
//! ├── persona: Option<Persona>      // current persona, replaced wholesale
//! ├── username: Option<String>      // username that produced the persona
//! ├── chat_header: String           // persona name or username
//! ├── chat: ChatLog                 // append-only message log
//! ├── notifications: Notifications  // transient banners
//! ├── generate_control: ControlState
//! ├── save_control: ControlState
//! ├── base_url: String              // backend, for the title bar
//! └── status_message: String        // title bar status
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::chat::ChatLog;
use crate::core::config::ResolvedConfig;
use crate::core::notify::Notifications;
use crate::core::persona::Persona;

/// Which screen regions are shown. Only one forward transition exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UiState {
    #[default]
    Welcome,
    PersonaReady,
}

impl UiState {
    /// A generated persona always lands in `PersonaReady`, including when
    /// one is already loaded.
    pub fn on_persona_generated(self) -> Self {
        UiState::PersonaReady
    }

    pub fn shows_welcome(self) -> bool {
        self == UiState::Welcome
    }

    pub fn shows_persona(self) -> bool {
        self == UiState::PersonaReady
    }

    pub fn shows_chat(self) -> bool {
        self == UiState::PersonaReady
    }
}

/// A button-like control that is disabled while its request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub busy: bool,
    idle_label: &'static str,
    busy_label: &'static str,
}

impl ControlState {
    pub const fn new(idle_label: &'static str, busy_label: &'static str) -> Self {
        Self {
            busy: false,
            idle_label,
            busy_label,
        }
    }

    pub fn label(&self) -> &'static str {
        if self.busy {
            self.busy_label
        } else {
            self.idle_label
        }
    }

    pub fn begin(&mut self) {
        self.busy = true;
    }

    pub fn finish(&mut self) {
        self.busy = false;
    }
}

pub const GENERATE_CONTROL: ControlState = ControlState::new("Generate Persona", "Generating...");
pub const SAVE_CONTROL: ControlState = ControlState::new("Save to file", "Saving...");

pub struct App {
    pub ui_state: UiState,
    pub persona: Option<Persona>,
    pub username: Option<String>,
    pub chat_header: String,
    pub chat: ChatLog,
    pub notifications: Notifications,
    pub generate_control: ControlState,
    pub save_control: ControlState,
    pub base_url: String,
    pub status_message: String,
}

impl App {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            ui_state: UiState::Welcome,
            persona: None,
            username: None,
            chat_header: String::new(),
            chat: ChatLog::new(),
            notifications: Notifications::new(),
            generate_control: GENERATE_CONTROL,
            save_control: SAVE_CONTROL,
            base_url: base_url.into(),
            status_message: String::from("Enter a username to begin"),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    /// True while something on screen is animating or counting down.
    pub fn is_animating(&self) -> bool {
        self.generate_control.busy
            || self.save_control.busy
            || self.chat.has_typing()
            || !self.notifications.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.ui_state, UiState::Welcome);
        assert!(app.persona.is_none());
        assert!(app.chat.is_empty());
        assert!(!app.generate_control.busy);
        assert_eq!(app.generate_control.label(), "Generate Persona");
        assert!(!app.is_animating());
    }

    #[test]
    fn welcome_transitions_forward_only() {
        let state = UiState::Welcome.on_persona_generated();
        assert_eq!(state, UiState::PersonaReady);
        assert_eq!(state.on_persona_generated(), UiState::PersonaReady);
        assert!(!state.shows_welcome());
        assert!(state.shows_persona() && state.shows_chat());
    }

    #[test]
    fn control_label_tracks_busy_flag() {
        let mut control = SAVE_CONTROL;
        control.begin();
        assert_eq!(control.label(), "Saving...");
        control.finish();
        assert_eq!(control.label(), "Save to file");
    }
}
