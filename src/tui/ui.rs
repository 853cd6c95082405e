use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::persona::render_persona;
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{
    MessageList, NotificationStack, PersonaPanel, TitleBar, WelcomePanel,
};
use crate::tui::{Focus, TuiState};

/// Width share of the persona panel when a persona is shown.
const PERSONA_PANEL_PERCENT: u16 = 40;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(3), Min(0)]);
    let [title_area, username_area, main_area] = layout.areas(frame.area());

    TitleBar::new(&app.base_url, &app.status_message).render(frame, title_area);

    tui.username_input.focused = tui.focus == Focus::Username;
    tui.username_input.busy = app.generate_control.busy;
    tui.username_input.title = format!("Reddit username · Enter: {}", app.generate_control.label());
    tui.username_input.render(frame, username_area);

    if app.ui_state.shows_persona() {
        draw_persona_view(frame, main_area, app, tui, spinner_frame);
    } else {
        WelcomePanel.render(frame, main_area);
    }

    // Overlay last so banners sit on top of everything
    NotificationStack::new(app.notifications.items(), Instant::now()).render(frame, frame.area());
}

fn draw_persona_view(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    tui: &mut TuiState,
    spinner_frame: usize,
) {
    let [persona_area, chat_area] = Layout::horizontal([
        Constraint::Percentage(PERSONA_PANEL_PERCENT),
        Constraint::Percentage(100 - PERSONA_PANEL_PERCENT),
    ])
    .areas(area);

    let fields = app.persona.as_ref().map(render_persona).unwrap_or_default();
    PersonaPanel::new(&fields, app.save_control.label(), app.save_control.busy)
        .render(frame, persona_area);

    if !app.ui_state.shows_chat() {
        return;
    }

    use Constraint::{Length, Min};
    let [header_area, list_area, input_area] =
        Layout::vertical([Length(1), Min(0), Length(3)]).areas(chat_area);

    let header = Line::from(vec![
        Span::raw("Chatting with "),
        Span::styled(
            app.chat_header.as_str(),
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(header, header_area);

    MessageList::new(
        &mut tui.message_list,
        app.chat.messages(),
        &app.chat_header,
        spinner_frame,
    )
    .render(frame, list_area);

    tui.chat_input.focused = tui.focus == Focus::Chat;
    tui.chat_input.render(frame, input_area);
}
