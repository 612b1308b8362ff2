use crate::tui::app::{AppState, InputAction, Scene};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key.code) {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.agents_on_turn();
            last_tick = Instant::now();
        }
    }
    Ok(())
}

/// Map a key to an input action. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, code: KeyCode) -> bool {
    if matches!(code, KeyCode::Char('?')) {
        let _ = app.handle_input(InputAction::ToggleHelp);
        return false;
    }
    if matches!(code, KeyCode::Char('h') | KeyCode::Char('H')) {
        let _ = app.handle_input(InputAction::ToggleHistory);
        return false;
    }
    if app.help_open() {
        if matches!(code, KeyCode::Esc) {
            let _ = app.handle_input(InputAction::ToggleHelp);
        }
        return false;
    }
    if app.history_open() {
        let action = match code {
            KeyCode::Up => Some(InputAction::HistoryUp),
            KeyCode::Down => Some(InputAction::HistoryDown),
            KeyCode::Esc => Some(InputAction::ToggleHistory),
            _ => None,
        };
        if let Some(action) = action {
            let _ = app.handle_input(action);
        }
        return false;
    }

    let action = match app.scene {
        Scene::Menu => match code {
            KeyCode::Up => InputAction::MenuPrev,
            KeyCode::Down => InputAction::MenuNext,
            KeyCode::Char('+') | KeyCode::Char('=') => InputAction::MenuInc,
            KeyCode::Char('-') | KeyCode::Char('_') => InputAction::MenuDec,
            KeyCode::Enter => InputAction::MenuApply,
            KeyCode::Esc => InputAction::MenuCancel,
            KeyCode::Char('m') | KeyCode::Char('M') => InputAction::ToggleMenu,
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            _ => return false,
        },
        Scene::Table => match code {
            KeyCode::Char('m') | KeyCode::Char('M') => InputAction::ToggleMenu,
            KeyCode::Char(' ') => InputAction::NewHand,
            KeyCode::Left => InputAction::CursorLeft,
            KeyCode::Right => InputAction::CursorRight,
            KeyCode::Up => InputAction::ToggleSelect,
            KeyCode::Char('x') | KeyCode::Char('X') => InputAction::ClearSelection,
            KeyCode::Char('c') | KeyCode::Char('C') => InputAction::Claim,
            KeyCode::Char('d') | KeyCode::Char('D') => InputAction::Decline,
            KeyCode::Enter => InputAction::Play,
            KeyCode::Char('p') | KeyCode::Char('P') => InputAction::Pass,
            _ => return false,
        },
    };
    // Submitted intents are flushed right away rather than on the next tick.
    if app.handle_input(action) {
        app.agents_on_turn();
    }
    false
}
