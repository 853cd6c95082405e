use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::chat::{ChatMessage, MessageContent, Sender};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// Frames of the typing indicator, advanced by the spinner clock.
const TYPING_FRAMES: [&str; 4] = ["·  ", "·· ", "···", " ··"];

/// A stateless component that renders a single chat message.
///
/// `Message` is a **transient component**: it's created fresh each frame
/// with the data it needs to render.
///
/// User messages are green and titled "you". Persona messages are blue,
/// titled with the persona's name, and carry their `HH:MM` timestamp on the
/// bottom border. The typing indicator is an animated row of dots.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub message: &'a ChatMessage,
    /// Title for persona messages (the chat header)
    pub persona_name: &'a str,
    pub spinner_frame: usize,
}

impl<'a> Message<'a> {
    pub fn new(message: &'a ChatMessage, persona_name: &'a str, spinner_frame: usize) -> Self {
        Self {
            message,
            persona_name,
            spinner_frame,
        }
    }

    /// Predict rendered height without rendering.
    ///
    /// The wrapping options must match the `Ratatui` default for `Paragraph`
    /// so calculated and actual height agree.
    pub fn calculate_height(message: &ChatMessage, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }

        let content = match &message.content {
            MessageContent::Text(text) => text.trim(),
            MessageContent::Typing => return 1 + VERTICAL_OVERHEAD,
        };
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }
}

pub fn sender_style(sender: Sender) -> Style {
    match sender {
        Sender::User => Style::default().fg(Color::Green),
        Sender::Persona => Style::default().fg(Color::Blue),
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = sender_style(self.message.sender);
        let border_style = style.add_modifier(Modifier::DIM);
        let title = match self.message.sender {
            Sender::User => "you",
            Sender::Persona => self.persona_name,
        };

        let mut block = Block::bordered()
            .title(title)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));
        if let Some(ts) = &self.message.timestamp {
            block = block.title_bottom(Line::from(ts.as_str()).right_aligned());
        }

        let inner_area = block.inner(area);
        block.render(area, buf);

        let paragraph = match &self.message.content {
            MessageContent::Text(text) => Paragraph::new(text.trim())
                .style(style)
                .wrap(Wrap { trim: true }),
            MessageContent::Typing => {
                let frame = TYPING_FRAMES[self.spinner_frame % TYPING_FRAMES.len()];
                Paragraph::new(frame).style(style.add_modifier(Modifier::BOLD))
            }
        };

        paragraph.render(inner_area, buf);
    }
}

impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
