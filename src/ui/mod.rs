pub mod countdown_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod styles;

use crate::app::AppState;
use crate::domain::UiMode;
use chrono::NaiveDateTime;
use countdown_pane::{render_countdown_pane, render_progress};
use input_form::render_minutes_form;
use keybindings::render_keybindings;
use layout::create_layout;
use modal::{render_day_changed_modal, render_prompt_modal};
use ratatui::{text::Span, widgets::Paragraph, Frame};
use styles::label_style;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState, now: NaiveDateTime) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, layout.keybindings_area);
    render_countdown_pane(f, app, now, layout.countdown_area);
    render_progress(f, app, now, layout.progress_area);

    if let Some(message) = &app.status_message {
        let status = Paragraph::new(Span::styled(format!(" {}", message), label_style()));
        f.render_widget(status, layout.status_area);
    }

    // Day changed modal takes precedence
    match app.ui_mode {
        UiMode::DayChanged => render_day_changed_modal(f, app, size),
        UiMode::Alert => render_prompt_modal(f, app, size),
        UiMode::EnteringMinutes => render_minutes_form(f, app, size),
        UiMode::Normal => {}
    }
}
