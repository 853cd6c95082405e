//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `TitleBar`: Top status bar showing backend and status
//! - `WelcomePanel`: Shown before the first persona exists
//! - `PersonaPanel`: Persona fields and the save control
//! - `Message`: A single chat message (or the typing indicator)
//! - `NotificationStack`: Floating banners
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputField`: Single-line text field (username and chat forms)
//! - `MessageList`: Scrollable chat log
//!
//! Components receive external data as "props", never by reaching into
//! global state, so each can be rendered in isolation against a
//! `TestBackend`.

pub mod input_field;
pub mod message;
pub mod message_list;
pub mod notification_stack;
pub mod persona_panel;
mod title_bar;
pub mod welcome;

pub use input_field::{InputEvent, InputField};
pub use message_list::{MessageList, MessageListState};
pub use notification_stack::NotificationStack;
pub use persona_panel::PersonaPanel;
pub use title_bar::TitleBar;
pub use welcome::WelcomePanel;
