use crate::app::AppState;
use crate::domain::UiMode;
use chrono::NaiveDateTime;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent, now: NaiveDateTime) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key, now),
        UiMode::Alert => handle_alert_mode(app, key),
        UiMode::EnteringMinutes => handle_minutes_mode(app, key, now),
        UiMode::DayChanged => matches!(key.code, KeyCode::Char('q') | KeyCode::Esc),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent, now: NaiveDateTime) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('c') => app.start_custom_input(),
        KeyCode::Char('p') | KeyCode::Char(' ') => app.toggle_pause_custom(now),
        KeyCode::Char('r') => app.reset_custom(),
        KeyCode::Char('m') => app.toggle_mode(),
        _ => {}
    }
    false
}

/// Handle keys while a prompt is showing
fn handle_alert_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('o') => {
            app.acknowledge_prompt();
        }
        _ => {}
    }
    false
}

/// Handle keys in the custom countdown form
fn handle_minutes_mode(app: &mut AppState, key: KeyEvent, now: NaiveDateTime) -> bool {
    match key.code {
        KeyCode::Enter => app.submit_custom_input(now),
        KeyCode::Esc => app.cancel_custom_input(),
        KeyCode::Backspace => app.input_backspace(),
        KeyCode::Char('+') | KeyCode::Up => app.input_adjust(1),
        KeyCode::Char('-') | KeyCode::Down => app.input_adjust(-1),
        KeyCode::Char(c) => app.input_add_char(c),
        _ => {}
    }
    false
}
