//! # InputField Component
//!
//! Single-line text field used for both the username form and the chat form.
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. `title`, `focused` and `busy`
//! are props set by the parent each frame. A busy field still accepts typing;
//! only its submit control is disabled, and that is enforced by the core.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Border (2) + padding (2) consumed horizontally by the bordered block
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Offset from area edge to content (border + padding)
const CONTENT_OFFSET: u16 = 2;

/// High-level events emitted by the InputField
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User pressed Enter. Carries the untrimmed buffer.
    Submit(String),
    ContentChanged,
}

pub struct InputField {
    /// Text buffer (Internal State)
    buffer: String,
    /// Cursor as a byte offset into `buffer`
    cursor: usize,
    /// Block title (Prop)
    pub title: String,
    /// Whether keystrokes go here (Prop)
    pub focused: bool,
    /// Whether the field's submit control is busy (Prop)
    pub busy: bool,
}

impl InputField {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            title: title.into(),
            focused: false,
            busy: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Number of chars before the cursor.
    fn cursor_column(&self) -> usize {
        self.buffer[..self.cursor].chars().count()
    }

    /// The slice of the buffer that fits `width`, keeping the cursor visible.
    /// Returns the visible text and the cursor's column within it.
    fn visible_window(&self, width: usize) -> (String, usize) {
        let column = self.cursor_column();
        if width == 0 {
            return (String::new(), 0);
        }
        let skip = (column + 1).saturating_sub(width);
        let visible = self.buffer.chars().skip(skip).take(width).collect();
        (visible, column - skip)
    }
}

impl Component for InputField {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width.saturating_sub(HORIZONTAL_OVERHEAD) as usize;
        let (visible, cursor_col) = self.visible_window(width);

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let title_style = if self.busy {
            border_style.fg(Color::Yellow).add_modifier(Modifier::ITALIC)
        } else {
            border_style
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.title.as_str())
            .title_style(title_style)
            .padding(ratatui::widgets::Padding::horizontal(1));

        let input = Paragraph::new(visible)
            .block(block)
            .style(Style::default().fg(Color::Green));
        frame.render_widget(input, area);

        if self.focused {
            frame.set_cursor_position((
                area.x + CONTENT_OFFSET + cursor_col as u16,
                area.y + 1,
            ));
        }
    }
}

impl EventHandler for InputField {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single-line field: newlines become spaces
                let flat: String = text
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect();
                self.buffer.insert_str(self.cursor, &flat);
                self.cursor += flat.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                let prev = prev_char_boundary(&self.buffer, self.cursor)?;
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete => {
                let next = next_char_boundary(&self.buffer, self.cursor)?;
                self.buffer.drain(self.cursor..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor)?;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorRight => {
                self.cursor = next_char_boundary(&self.buffer, self.cursor)?;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorHome => (self.cursor != 0).then(|| {
                self.cursor = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor != self.buffer.len()).then(|| {
                self.cursor = self.buffer.len();
                InputEvent::ContentChanged
            }),
            TuiEvent::Submit => Some(InputEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}

fn prev_char_boundary(text: &str, pos: usize) -> Option<usize> {
    text[..pos].char_indices().next_back().map(|(i, _)| i)
}

fn next_char_boundary(text: &str, pos: usize) -> Option<usize> {
    text[pos..].chars().next().map(|c| pos + c.len_utf8())
}
