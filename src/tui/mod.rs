//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (busy controls, typing indicator, visible notifications):
//!   draws every ~80ms and feeds `Action::Tick` so banners expire on time.
//! - **Idle**: sleeps up to 500ms, only redraws on events, finished requests
//!   or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
mod tasks;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::api::{HttpPersonaApi, PersonaApi};
use crate::core::action::{Action, Effect, Request, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputEvent, InputField, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::tasks::{Completed, InFlight};

/// Which input field receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Username,
    Chat,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub username_input: InputField,
    pub chat_input: InputField,
    pub focus: Focus,
    pub message_list: MessageListState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            username_input: InputField::new("Reddit username"),
            chat_input: InputField::new("Message · Enter to send"),
            focus: Focus::Username,
            message_list: MessageListState::new(),
        }
    }

    fn focused_input(&mut self) -> &mut InputField {
        match self.focus {
            Focus::Username => &mut self.username_input,
            Focus::Chat => &mut self.chat_input,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Escape disambiguation keeps Esc responsive; unsupported terminals ignore it
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags, DisableBracketedPaste);
    }
}

/// Translate a terminal event into an action, updating TUI-local state on the way.
///
/// Escape is not handled here: what it does depends on the in-flight requests,
/// which only the event loop knows about.
fn route_event(tui: &mut TuiState, app: &App, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Resize | TuiEvent::Escape => None,
        TuiEvent::Quit => Some(Action::Quit),
        TuiEvent::Save => app.persona.as_ref().map(|_| Action::SaveRequested {
            username: tui.username_input.text().to_string(),
        }),
        TuiEvent::FocusNext => {
            if app.ui_state.shows_chat() {
                tui.focus = match tui.focus {
                    Focus::Username => Focus::Chat,
                    Focus::Chat => Focus::Username,
                };
            }
            None
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom => {
            tui.message_list.handle_event(event);
            None
        }
        _ => {
            let focus = tui.focus;
            match tui.focused_input().handle_event(event)? {
                InputEvent::Submit(text) => Some(match focus {
                    Focus::Username => Action::SubmitUsername(text),
                    Focus::Chat => Action::SubmitChat(text),
                }),
                InputEvent::ContentChanged => None,
            }
        }
    }
}

/// Run `update` and apply the TUI-side consequences of the action.
fn apply(app: &mut App, tui: &mut TuiState, action: Action) -> Effect {
    let generated = matches!(action, Action::PersonaGenerated { .. });
    let effect = update(app, action);

    if generated {
        tui.focus = Focus::Chat;
        tui.message_list.stick_to_bottom = true;
    }
    // The chat field empties only once the message is actually sent
    if let Effect::Request(Request::Chat { .. }) = effect {
        tui.chat_input.clear();
        tui.message_list.stick_to_bottom = true;
    }
    effect
}

/// Owns everything the loop needs to turn effects into running requests.
struct Runtime {
    api: Arc<dyn PersonaApi>,
    config: ResolvedConfig,
    tx: mpsc::Sender<Completed>,
    in_flight: InFlight,
}

impl Runtime {
    /// Returns true when the app should quit.
    fn handle_effect(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::None => false,
            Effect::Quit => true,
            Effect::Request(request) => {
                self.in_flight.spawn(
                    self.api.clone(),
                    request,
                    self.config.download_dir.clone(),
                    self.tx.clone(),
                );
                false
            }
        }
    }
}

pub fn run(config: ResolvedConfig, initial_username: Option<String>) -> std::io::Result<()> {
    let api = HttpPersonaApi::new(&config.base_url, config.request_timeout)
        .map_err(std::io::Error::other)?;
    info!("Using backend {}", api.base_url());

    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();
    if let Some(username) = initial_username {
        tui.username_input.set_text(username);
    }

    let (tx, rx) = mpsc::channel();
    let mut runtime = Runtime {
        api: Arc::new(api),
        config,
        tx,
        in_flight: InFlight::new(),
    };

    let mut terminal = ratatui::init();
    let result = TerminalModeGuard::new()
        .and_then(|_guard| event_loop(&mut terminal, &mut app, &mut tui, &mut runtime, &rx));

    for operation in runtime.in_flight.cancel_all() {
        debug!("Aborted {operation:?} request on exit");
    }
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
    runtime: &mut Runtime,
    rx: &mpsc::Receiver<Completed>,
) -> std::io::Result<()> {
    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.is_animating();
        if animating {
            update(app, Action::Tick(Instant::now()));
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, app, tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if event == TuiEvent::Escape {
                if runtime.in_flight.has_pending() {
                    for operation in runtime.in_flight.cancel_all() {
                        info!("Cancelled {operation:?} request");
                        apply(app, tui, Action::Cancelled(operation));
                    }
                    continue;
                }
                return Ok(());
            }

            if let Some(action) = route_event(tui, app, &event) {
                let effect = apply(app, tui, action);
                if runtime.handle_effect(effect) {
                    return Ok(());
                }
            }
        }

        // Results from background requests; cancelled ones are dropped
        while let Ok(completed) = rx.try_recv() {
            let Some(action) = runtime.in_flight.accept(completed) else {
                continue;
            };
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = apply(app, tui, action);
            if runtime.handle_effect(effect) {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::UiState;
    use crate::test_support::{persona, test_app};
    use serde_json::json;

    fn type_text(tui: &mut TuiState, app: &App, text: &str) {
        for c in text.chars() {
            assert_eq!(route_event(tui, app, &TuiEvent::InputChar(c)), None);
        }
    }

    fn generated(app: &mut App, tui: &mut TuiState) {
        apply(
            app,
            tui,
            Action::PersonaGenerated {
                username: "alice".into(),
                persona: persona(json!({"name": "AliceBot"})),
            },
        );
    }

    #[test]
    fn test_enter_in_username_field_submits_username() {
        let app = test_app();
        let mut tui = TuiState::new();
        type_text(&mut tui, &app, "alice");

        let action = route_event(&mut tui, &app, &TuiEvent::Submit);
        assert_eq!(action, Some(Action::SubmitUsername("alice".into())));
    }

    #[test]
    fn test_generation_moves_focus_to_chat() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        generated(&mut app, &mut tui);

        assert_eq!(app.ui_state, UiState::PersonaReady);
        assert_eq!(tui.focus, Focus::Chat);
    }

    #[test]
    fn test_sent_chat_clears_input() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        generated(&mut app, &mut tui);
        type_text(&mut tui, &app, "hi there");

        let action = route_event(&mut tui, &app, &TuiEvent::Submit).unwrap();
        let effect = apply(&mut app, &mut tui, action);

        assert!(matches!(effect, Effect::Request(Request::Chat { .. })));
        assert_eq!(tui.chat_input.text(), "");
    }

    #[test]
    fn test_blank_chat_keeps_input() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        generated(&mut app, &mut tui);
        type_text(&mut tui, &app, "   ");

        let action = route_event(&mut tui, &app, &TuiEvent::Submit).unwrap();
        assert_eq!(apply(&mut app, &mut tui, action), Effect::None);
        assert_eq!(tui.chat_input.text(), "   ");
    }

    #[test]
    fn test_tab_only_toggles_once_chat_exists() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        route_event(&mut tui, &app, &TuiEvent::FocusNext);
        assert_eq!(tui.focus, Focus::Username);

        generated(&mut app, &mut tui);
        route_event(&mut tui, &app, &TuiEvent::FocusNext);
        assert_eq!(tui.focus, Focus::Username);
        route_event(&mut tui, &app, &TuiEvent::FocusNext);
        assert_eq!(tui.focus, Focus::Chat);
    }

    #[test]
    fn test_save_uses_username_field_text() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        assert_eq!(route_event(&mut tui, &app, &TuiEvent::Save), None);

        tui.username_input.set_text("alice");
        generated(&mut app, &mut tui);
        assert_eq!(
            route_event(&mut tui, &app, &TuiEvent::Save),
            Some(Action::SaveRequested {
                username: "alice".into()
            })
        );
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        let action = route_event(&mut tui, &app, &TuiEvent::Quit).unwrap();
        assert_eq!(apply(&mut app, &mut tui, action), Effect::Quit);
    }
}
