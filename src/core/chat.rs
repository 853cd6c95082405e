//! # Chat Log
//!
//! Display-only conversation history. Messages are appended and never
//! edited. The only removal is the typing indicator, dropped by id once the
//! real reply arrives.

use chrono::{DateTime, Local};

/// Handle to a message in the log, used to remove it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Persona,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    Text(String),
    /// Placeholder shown while a chat reply is pending.
    Typing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender: Sender,
    pub content: MessageContent,
    /// `HH:MM`, persona messages only.
    pub timestamp: Option<String>,
}

impl ChatMessage {
    pub fn is_typing(&self) -> bool {
        matches!(self.content, MessageContent::Typing)
    }

    pub fn text(&self) -> Option<&str> {
        match &self.content {
            MessageContent::Text(text) => Some(text),
            MessageContent::Typing => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message stamped with the current local time.
    pub fn append(&mut self, content: MessageContent, sender: Sender) -> MessageId {
        self.append_at(content, sender, Local::now())
    }

    pub fn append_at(
        &mut self,
        content: MessageContent,
        sender: Sender,
        now: DateTime<Local>,
    ) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;

        let timestamp = match sender {
            Sender::Persona => Some(format_timestamp(&now)),
            Sender::User => None,
        };

        self.messages.push(ChatMessage {
            id,
            sender,
            content,
            timestamp,
        });
        id
    }

    /// Remove a message by id. Returns false if it was already gone.
    pub fn remove(&mut self, id: MessageId) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| m.id != id);
        self.messages.len() != before
    }

    pub fn contains(&self, id: MessageId) -> bool {
        self.messages.iter().any(|m| m.id == id)
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn has_typing(&self) -> bool {
        self.messages.iter().any(ChatMessage::is_typing)
    }
}

pub fn format_timestamp(time: &DateTime<Local>) -> String {
    time.format("%H:%M").to_string()
}
