//! # TitleBar Component
//!
//! Top status bar showing the backend and the current status message.
//! Purely presentational: all data arrives as props.
//!
//! 1. **Status message**: `"Persona Chat (server: http://…) | Chatting with AliceBot"`
//! 2. **Default**: `"Persona Chat (server: http://…)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

pub struct TitleBar<'a> {
    pub base_url: &'a str,
    pub status_message: &'a str,
}

impl<'a> TitleBar<'a> {
    pub fn new(base_url: &'a str, status_message: &'a str) -> Self {
        Self {
            base_url,
            status_message,
        }
    }

    fn text(&self) -> String {
        if self.status_message.is_empty() {
            format!("Persona Chat (server: {})", self.base_url)
        } else {
            format!(
                "Persona Chat (server: {}) | {}",
                self.base_url, self.status_message
            )
        }
    }
}

impl<'a> Component for TitleBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.text()), area);
    }
}
