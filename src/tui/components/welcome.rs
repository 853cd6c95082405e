//! # Welcome Component
//!
//! Shown until the first persona is generated.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub struct WelcomePanel;

impl WelcomePanel {
    fn lines() -> Vec<Line<'static>> {
        let hint = Style::default().fg(Color::DarkGray);
        vec![
            Line::from(Span::styled(
                "Persona Chat",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(format!("v{}", env!("CARGO_PKG_VERSION")), hint)),
            Line::default(),
            Line::from("Enter a Reddit username above and press Enter"),
            Line::from("to generate a persona you can chat with."),
            Line::default(),
            Line::from(Span::styled(
                "Tab switch field · Ctrl+S save persona · Esc cancel/quit",
                hint,
            )),
        ]
    }
}

impl Component for WelcomePanel {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = Self::lines();
        let [centered] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);

        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            centered,
        );
    }
}
