//! # PersonaPanel Component
//!
//! Shows the current persona's fields, one label/value block each, with the
//! save control on the bottom border.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};

use crate::core::persona::PersonaField;
use crate::tui::component::Component;

pub struct PersonaPanel<'a> {
    pub fields: &'a [PersonaField],
    /// Save control label ("Save to file" / "Saving...")
    pub save_label: &'a str,
    pub save_busy: bool,
}

impl<'a> PersonaPanel<'a> {
    pub fn new(fields: &'a [PersonaField], save_label: &'a str, save_busy: bool) -> Self {
        Self {
            fields,
            save_label,
            save_busy,
        }
    }

    fn body(&self) -> Text<'a> {
        let mut lines = Vec::with_capacity(self.fields.len() * 3);
        for field in self.fields {
            lines.push(Line::from(Span::styled(
                field.label.as_str(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
            for value_line in field.value.lines() {
                lines.push(Line::from(Span::styled(
                    value_line,
                    Style::default().fg(Color::Gray),
                )));
            }
            lines.push(Line::default());
        }
        lines.pop();
        Text::from(lines)
    }
}

impl<'a> Component for PersonaPanel<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let footer = if self.save_busy {
            Line::from(Span::styled(
                self.save_label,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from(vec![
                Span::styled("[Ctrl+S] ", Style::default().fg(Color::DarkGray)),
                Span::raw(self.save_label),
            ])
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Persona")
            .title_bottom(footer.right_aligned())
            .padding(Padding::horizontal(1));

        let paragraph = Paragraph::new(self.body())
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}
