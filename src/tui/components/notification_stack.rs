//! # NotificationStack Component
//!
//! Floating banners in the top-right corner, newest at the bottom. Fading
//! banners render dimmed for their last half second.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};

use crate::core::notify::{Notification, NotificationKind, Phase};
use crate::tui::component::Component;

const MAX_WIDTH: u16 = 48;
/// Left and right border columns.
const HORIZONTAL_OVERHEAD: u16 = 2;
/// Top and bottom border rows.
const VERTICAL_OVERHEAD: u16 = 2;

pub fn kind_color(kind: NotificationKind) -> Color {
    match kind {
        NotificationKind::Error => Color::Red,
        NotificationKind::Success => Color::Green,
        NotificationKind::Info => Color::Blue,
    }
}

fn banner_text(notification: &Notification) -> String {
    format!("{} {}", notification.kind.icon(), notification.message)
}

/// Rows a banner of `width` columns needs to show all of `text`.
pub fn banner_height(text: &str, width: u16) -> u16 {
    let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
    if content_width == 0 {
        return VERTICAL_OVERHEAD;
    }

    let options = textwrap::Options::new(content_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);

    let lines = textwrap::wrap(text.trim(), options);
    (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
}

pub struct NotificationStack<'a> {
    pub notifications: &'a [Notification],
    pub now: Instant,
}

impl<'a> NotificationStack<'a> {
    pub fn new(notifications: &'a [Notification], now: Instant) -> Self {
        Self { notifications, now }
    }
}

impl<'a> Component for NotificationStack<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = MAX_WIDTH.min(area.width);
        let x = area.x + area.width - width;
        let bottom = area.y + area.height;
        let mut y = area.y + 1;

        for notification in self.notifications {
            let phase = notification.phase(self.now);
            if phase == Phase::Expired {
                continue;
            }
            // A banner needs at least one text row between its borders
            let room = bottom.saturating_sub(y);
            if room <= VERTICAL_OVERHEAD {
                break;
            }

            let text = banner_text(notification);
            let height = banner_height(&text, width).min(room);

            let mut style = Style::default().fg(Color::White).bg(kind_color(notification.kind));
            if phase == Phase::Fading {
                style = style.add_modifier(Modifier::DIM);
            }

            let banner = Rect::new(x, y, width, height);
            frame.render_widget(Clear, banner);
            frame.render_widget(
                Paragraph::new(text)
                    .style(style)
                    .wrap(Wrap { trim: true })
                    .block(Block::bordered().border_type(BorderType::Rounded).style(style)),
                banner,
            );
            y += height;
        }
    }
}
