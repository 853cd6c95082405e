//! # Actions
//!
//! Everything that can happen in the app becomes an `Action`.
//! User presses Enter in the username field? That's `Action::SubmitUsername`.
//! The backend answers? That's `Action::PersonaGenerated { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing the I/O to perform next.
//! No side effects here. Requests run elsewhere and report back as actions.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Every request has a terminal action (success, failure or `Cancelled`),
//! and each of them releases the control that started it.

use std::path::PathBuf;
use std::time::Instant;

use log::{debug, info};

use crate::core::chat::{MessageContent, MessageId, Sender};
use crate::core::markup;
use crate::core::notify::NotificationKind;
use crate::core::persona::Persona;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Username form submitted (raw field text).
    SubmitUsername(String),
    PersonaGenerated { username: String, persona: Persona },
    PersonaFailed(String),
    /// Chat form submitted (raw field text).
    SubmitChat(String),
    ChatReplied { typing_id: MessageId, response: String },
    ChatFailed(String),
    /// Save pressed. `username` is the username field's text at that moment.
    SaveRequested { username: String },
    PersonaSaved { path: PathBuf },
    SaveFailed(String),
    /// An in-flight request was aborted before it finished.
    Cancelled(Operation),
    /// Clock tick; expires notifications.
    Tick(Instant),
    Quit,
}

/// The three backend interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Generate,
    Chat,
    Save,
}

/// A backend call to perform, with everything it needs captured by value.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    GeneratePersona {
        username: String,
    },
    Chat {
        persona: Persona,
        message: String,
        typing_id: MessageId,
    },
    SavePersona {
        username: String,
        persona: Persona,
    },
}

impl Request {
    pub fn operation(&self) -> Operation {
        match self {
            Request::GeneratePersona { .. } => Operation::Generate,
            Request::Chat { .. } => Operation::Chat,
            Request::SavePersona { .. } => Operation::Save,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    Request(Request),
}

pub fn greeting(username: &str) -> String {
    format!(
        "Hello! I'm an AI persona based on Reddit user {username}'s activity. How can I help you today?"
    )
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SubmitUsername(raw) => {
            let username = raw.trim();
            if username.is_empty() {
                return Effect::None;
            }
            if app.generate_control.busy {
                debug!("Generate control busy, ignoring submit");
                return Effect::None;
            }
            info!("Generating persona for {username}");
            app.generate_control.begin();
            app.status_message = format!("Generating persona for {username}");
            Effect::Request(Request::GeneratePersona {
                username: username.to_string(),
            })
        }

        Action::PersonaGenerated { username, persona } => {
            app.generate_control.finish();
            app.chat_header = persona.header_name().unwrap_or_else(|| username.clone());
            app.persona = Some(persona);
            app.ui_state = app.ui_state.on_persona_generated();
            app.chat
                .append(MessageContent::Text(greeting(&username)), Sender::Persona);
            app.status_message = format!("Chatting with {}", app.chat_header);
            app.username = Some(username);
            Effect::None
        }

        Action::PersonaFailed(message) => {
            app.generate_control.finish();
            app.status_message.clear();
            app.notifications.notify(message, NotificationKind::Error);
            Effect::None
        }

        Action::SubmitChat(raw) => {
            let message = raw.trim();
            let Some(persona) = app.persona.clone() else {
                return Effect::None;
            };
            if message.is_empty() {
                return Effect::None;
            }
            app.chat
                .append(MessageContent::Text(message.to_string()), Sender::User);
            let typing_id = app.chat.append(MessageContent::Typing, Sender::Persona);
            Effect::Request(Request::Chat {
                persona,
                message: message.to_string(),
                typing_id,
            })
        }

        Action::ChatReplied { typing_id, response } => {
            app.chat.remove(typing_id);
            app.chat.append(
                MessageContent::Text(markup::to_plain_text(&response)),
                Sender::Persona,
            );
            Effect::None
        }

        // The typing indicator stays in the log on failure.
        Action::ChatFailed(message) => {
            app.notifications.notify(message, NotificationKind::Error);
            Effect::None
        }

        Action::SaveRequested { username } => {
            let Some(persona) = app.persona.clone() else {
                return Effect::None;
            };
            if app.save_control.busy {
                debug!("Save control busy, ignoring request");
                return Effect::None;
            }
            app.save_control.begin();
            Effect::Request(Request::SavePersona {
                username: username.trim().to_string(),
                persona,
            })
        }

        Action::PersonaSaved { path } => {
            app.save_control.finish();
            app.notifications.notify(
                format!("Persona saved successfully! ({})", path.display()),
                NotificationKind::Success,
            );
            Effect::None
        }

        Action::SaveFailed(message) => {
            app.save_control.finish();
            app.notifications.notify(message, NotificationKind::Error);
            Effect::None
        }

        Action::Cancelled(operation) => {
            match operation {
                Operation::Generate => {
                    app.generate_control.finish();
                    app.status_message.clear();
                }
                Operation::Save => app.save_control.finish(),
                Operation::Chat => {}
            }
            app.notifications
                .notify("Request cancelled", NotificationKind::Info);
            Effect::None
        }

        Action::Tick(now) => {
            app.notifications.prune(now);
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chat::ChatMessage;
    use crate::core::state::UiState;
    use crate::test_support::{persona, test_app};
    use serde_json::json;

    fn generated_app() -> App {
        let mut app = test_app();
        update(&mut app, Action::SubmitUsername("alice".into()));
        update(
            &mut app,
            Action::PersonaGenerated {
                username: "alice".into(),
                persona: persona(json!({"name": "AliceBot", "bio": "loves hiking"})),
            },
        );
        app
    }

    fn texts(messages: &[ChatMessage]) -> Vec<Option<&str>> {
        messages.iter().map(ChatMessage::text).collect()
    }

    #[test]
    fn empty_username_is_a_silent_no_op() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::SubmitUsername("   ".into())), Effect::None);
        assert!(!app.generate_control.busy);
        assert_eq!(app.ui_state, UiState::Welcome);
        assert!(app.notifications.is_empty());
    }

    #[test]
    fn submit_username_trims_and_disables_control() {
        let mut app = test_app();
        let effect = update(&mut app, Action::SubmitUsername("  alice \n".into()));
        assert_eq!(
            effect,
            Effect::Request(Request::GeneratePersona {
                username: "alice".into()
            })
        );
        assert!(app.generate_control.busy);
        assert_eq!(app.generate_control.label(), "Generating...");
    }

    #[test]
    fn busy_generate_control_ignores_resubmission() {
        let mut app = test_app();
        update(&mut app, Action::SubmitUsername("alice".into()));
        assert_eq!(update(&mut app, Action::SubmitUsername("bob".into())), Effect::None);
    }

    #[test]
    fn successful_generation_reveals_persona_and_chat() {
        let app = generated_app();
        assert_eq!(app.ui_state, UiState::PersonaReady);
        assert!(!app.ui_state.shows_welcome());
        assert_eq!(app.chat_header, "AliceBot");
        assert!(!app.generate_control.busy);
        assert_eq!(app.username.as_deref(), Some("alice"));

        let messages = app.chat.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::Persona);
        assert!(messages[0].text().unwrap().contains("alice"));
    }

    #[test]
    fn header_falls_back_to_username() {
        let mut app = test_app();
        update(&mut app, Action::SubmitUsername("bob".into()));
        update(
            &mut app,
            Action::PersonaGenerated {
                username: "bob".into(),
                persona: persona(json!({"bio": "quiet"})),
            },
        );
        assert_eq!(app.chat_header, "bob");
    }

    #[test]
    fn failed_generation_leaves_panels_hidden() {
        let mut app = test_app();
        update(&mut app, Action::SubmitUsername("alice".into()));
        update(&mut app, Action::PersonaFailed("No data found".into()));

        assert_eq!(app.ui_state, UiState::Welcome);
        assert!(app.persona.is_none());
        assert!(!app.generate_control.busy);
        assert_eq!(app.notifications.len(), 1);
        assert_eq!(app.notifications.count_of(NotificationKind::Error), 1);
        assert_eq!(app.notifications.items()[0].message, "No data found");
    }

    #[test]
    fn regeneration_replaces_persona_wholesale() {
        let mut app = generated_app();
        update(&mut app, Action::SubmitUsername("bob".into()));
        update(
            &mut app,
            Action::PersonaGenerated {
                username: "bob".into(),
                persona: persona(json!({"name": "BobBot"})),
            },
        );
        let current = app.persona.as_ref().unwrap();
        assert!(current.get("bio").is_none());
        assert_eq!(app.chat_header, "BobBot");
        assert_eq!(app.chat.len(), 2);
    }

    #[test]
    fn chat_without_persona_is_a_no_op() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::SubmitChat("hello".into())), Effect::None);
        assert!(app.chat.is_empty());
    }

    #[test]
    fn empty_chat_message_is_a_no_op() {
        let mut app = generated_app();
        assert_eq!(update(&mut app, Action::SubmitChat("  ".into())), Effect::None);
        assert_eq!(app.chat.len(), 1);
    }

    #[test]
    fn chat_appends_user_message_then_typing_indicator() {
        let mut app = generated_app();
        let effect = update(&mut app, Action::SubmitChat(" hi there ".into()));

        let Effect::Request(Request::Chat {
            message, typing_id, ..
        }) = effect
        else {
            panic!("expected chat request, got {effect:?}");
        };
        assert_eq!(message, "hi there");

        let messages = app.chat.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].sender, Sender::User);
        assert_eq!(messages[1].text(), Some("hi there"));
        assert_eq!(messages[2].id, typing_id);
        assert!(messages[2].is_typing());
    }

    #[test]
    fn chat_reply_replaces_typing_indicator() {
        let mut app = generated_app();
        let Effect::Request(Request::Chat { typing_id, .. }) =
            update(&mut app, Action::SubmitChat("hi".into()))
        else {
            panic!("expected chat request");
        };

        update(
            &mut app,
            Action::ChatReplied {
                typing_id,
                response: "Hey!".into(),
            },
        );

        assert!(!app.chat.contains(typing_id));
        assert!(!app.chat.has_typing());
        let messages = app.chat.messages();
        assert_eq!(texts(messages).last().copied().flatten(), Some("Hey!"));
        assert_eq!(messages.last().unwrap().sender, Sender::Persona);
        assert!(messages.last().unwrap().timestamp.is_some());
    }

    #[test]
    fn chat_reply_text_is_kept_literally() {
        let mut app = generated_app();
        let Effect::Request(Request::Chat { typing_id, .. }) =
            update(&mut app, Action::SubmitChat("plans?".into()))
        else {
            panic!("expected chat request");
        };

        update(
            &mut app,
            Action::ChatReplied {
                typing_id,
                response: "Steps:\n1. Wake up\n2. Hike *early*, 2*3*4 km\nsee [map](https://x.io)"
                    .into(),
            },
        );

        assert_eq!(
            texts(app.chat.messages()).last().copied().flatten(),
            Some("Steps:\n1. Wake up\n2. Hike *early*, 2*3*4 km\nsee [map](https://x.io)")
        );
    }

    #[test]
    fn chat_failure_keeps_typing_indicator() {
        let mut app = generated_app();
        let Effect::Request(Request::Chat { typing_id, .. }) =
            update(&mut app, Action::SubmitChat("hi".into()))
        else {
            panic!("expected chat request");
        };

        update(&mut app, Action::ChatFailed("Failed to get response".into()));

        assert!(app.chat.contains(typing_id));
        assert_eq!(texts(app.chat.messages())[1], Some("hi"));
        assert_eq!(app.notifications.count_of(NotificationKind::Error), 1);
    }

    #[test]
    fn save_without_persona_is_a_no_op() {
        let mut app = test_app();
        let effect = update(
            &mut app,
            Action::SaveRequested {
                username: "alice".into(),
            },
        );
        assert_eq!(effect, Effect::None);
        assert!(!app.save_control.busy);
    }

    #[test]
    fn save_uses_current_field_text() {
        let mut app = generated_app();
        let effect = update(
            &mut app,
            Action::SaveRequested {
                username: " carol ".into(),
            },
        );
        let Effect::Request(Request::SavePersona { username, persona }) = effect else {
            panic!("expected save request");
        };
        assert_eq!(username, "carol");
        assert_eq!(Some(&persona), app.persona.as_ref());
        assert_eq!(app.save_control.label(), "Saving...");
    }

    #[test]
    fn save_outcomes_release_the_control() {
        let mut app = generated_app();
        update(&mut app, Action::SaveRequested { username: "alice".into() });
        update(
            &mut app,
            Action::PersonaSaved {
                path: PathBuf::from("/tmp/persona_alice.txt"),
            },
        );
        assert!(!app.save_control.busy);
        assert_eq!(app.notifications.count_of(NotificationKind::Success), 1);

        update(&mut app, Action::SaveRequested { username: "alice".into() });
        update(&mut app, Action::SaveFailed("disk full".into()));
        assert!(!app.save_control.busy);
        assert_eq!(app.notifications.count_of(NotificationKind::Error), 1);
    }

    #[test]
    fn cancellation_releases_generate_control() {
        let mut app = test_app();
        update(&mut app, Action::SubmitUsername("alice".into()));
        update(&mut app, Action::Cancelled(Operation::Generate));
        assert!(!app.generate_control.busy);
        assert_eq!(app.ui_state, UiState::Welcome);
        assert_eq!(app.notifications.count_of(NotificationKind::Info), 1);
    }

    #[test]
    fn tick_prunes_expired_notifications() {
        let mut app = test_app();
        app.notifications.notify("old", NotificationKind::Info);
        let later = Instant::now() + std::time::Duration::from_secs(10);
        update(&mut app, Action::Tick(later));
        assert!(app.notifications.is_empty());
    }

    #[test]
    fn quit_returns_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }

    #[test]
    fn request_reports_its_operation() {
        let request = Request::GeneratePersona {
            username: "a".into(),
        };
        assert_eq!(request.operation(), Operation::Generate);
    }
}
