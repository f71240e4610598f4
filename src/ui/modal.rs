use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the day changed modal (forces restart)
pub fn render_day_changed_modal(f: &mut Frame, app: &AppState, area: Rect) {
    if app.ui_mode == UiMode::DayChanged {
        let modal_area = create_modal_area(area);

        // Clear the area behind the modal
        f.render_widget(Clear, modal_area);

        let lines = vec![
            Line::raw(""),
            Line::raw("  A new day has begun!"),
            Line::raw(""),
            Line::raw("  Today's deadlines were set for yesterday's start."),
            Line::raw("  Please restart to begin the new workday."),
            Line::raw(""),
            Line::from(vec![
                Span::styled("  [q]", modal_title_style()),
                Span::raw(" Quit  "),
            ]),
        ];

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(
                        " \u{1F305} Day Changed ",
                        modal_title_style(),
                    ))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}

/// Render the oldest undismissed prompt
pub fn render_prompt_modal(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(prompt) = app.current_prompt() {
        let modal_area = create_modal_area(area);

        f.render_widget(Clear, modal_area);

        let mut lines = vec![Line::raw("")];
        for text in prompt.message(app.session.mode()).lines() {
            lines.push(Line::raw(format!("  {}", text)));
        }
        lines.push(Line::raw(""));

        let mut options = vec![
            Span::styled("  [Enter]", modal_title_style()),
            Span::raw(" Dismiss  "),
        ];
        if app.prompts.len() > 1 {
            options.push(Span::raw(format!("({} more)", app.prompts.len() - 1)));
        }
        lines.push(Line::from(options));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(
                        format!(" ⏰ {} ", prompt.title()),
                        modal_title_style(),
                    ))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
