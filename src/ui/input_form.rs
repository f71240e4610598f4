use crate::app::AppState;
use crate::domain::MAX_CUSTOM_MINUTES;
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the minutes prompt for a custom countdown
pub fn render_minutes_form(f: &mut Frame, app: &AppState, area: Rect) {
    let modal_area = create_modal_area(area);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let mut lines = vec![
        Line::raw(""),
        Line::raw(format!("  Countdown minutes (1-{}):", MAX_CUSTOM_MINUTES)),
        Line::from(vec![
            Span::raw("  > "),
            Span::styled(app.minutes_input.as_str(), modal_title_style()),
            Span::styled("█", modal_title_style()), // Cursor
        ]),
        Line::raw(""),
    ];

    if let Some(error) = &app.input_error {
        lines.push(Line::from(Span::styled(format!("  {}", error), error_style())));
    } else {
        lines.push(Line::raw(""));
    }

    lines.push(Line::raw("  +/- adjust  ·  Enter to start  ·  Esc to cancel"));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Custom Countdown ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
