use crate::app::AppState;
use crate::domain::{format_remaining, DeadlineKind, DeadlineState, TrackedDeadline};
use crate::ui::styles::{
    border_style, default_style, done_style, gauge_style, label_style, overdue_style, paused_style,
    pending_style, title_style,
};
use chrono::{Duration, NaiveDateTime};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Fraction of the workday elapsed, clamped to 0.0..=1.0
pub fn workday_progress(start: NaiveDateTime, end: NaiveDateTime, now: NaiveDateTime) -> f64 {
    let total = (end - start).num_seconds();
    if total <= 0 {
        return 1.0;
    }
    let elapsed = (now - start).num_seconds();
    (elapsed as f64 / total as f64).clamp(0.0, 1.0)
}

/// "in 1:02:03" before the deadline, "over 0:05:00" after
fn remaining_text(remaining: Duration) -> String {
    if remaining > Duration::zero() {
        format!("in {}", format_remaining(remaining))
    } else {
        format!("over {}", format_remaining(-remaining))
    }
}

fn deadline_style(state: DeadlineState) -> Style {
    match state {
        DeadlineState::Pending => pending_style(),
        DeadlineState::Fired => overdue_style(),
        DeadlineState::Acknowledged => done_style(),
    }
}

fn deadline_line(deadline: &TrackedDeadline, now: NaiveDateTime) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<11}", deadline.kind.label()), label_style()),
        Span::styled(deadline.at.format("%H:%M").to_string(), default_style()),
        Span::raw("   "),
        Span::styled(remaining_text(deadline.remaining(now)), deadline_style(deadline.state)),
    ])
}

/// Render the start time, both deadlines and the custom countdown
pub fn render_countdown_pane(f: &mut Frame, app: &AppState, now: NaiveDateTime, area: Rect) {
    let session = &app.session;
    let resolution = session.resolution();
    let engine = session.engine();

    let mut lines = Vec::new();
    lines.push(Line::raw(""));

    let mut start_spans = vec![
        Span::styled(format!("  {:<11}", "Started"), label_style()),
        Span::styled(
            resolution.resolved_start.format("%H:%M").to_string(),
            default_style(),
        ),
        Span::styled(format!("   {} mode", session.mode().name()), label_style()),
    ];
    if let Some(next) = session.mode_after_restart() {
        start_spans.push(Span::styled(
            format!(" ({} after restart)", next.name()),
            paused_style(),
        ));
    }
    lines.push(Line::from(start_spans));
    lines.push(Line::raw(""));

    lines.push(deadline_line(engine.deadline(DeadlineKind::Interim), now));
    lines.push(deadline_line(engine.deadline(DeadlineKind::Main), now));
    lines.push(Line::raw(""));

    let custom_line = match engine.custom().zip(engine.remaining_custom(now)) {
        Some((custom, remaining)) => {
            let (text, style) = if custom.is_paused() {
                (format!("{} paused", format_remaining(remaining)), paused_style())
            } else {
                (remaining_text(remaining), deadline_style(custom.state()))
            };
            Line::from(vec![
                Span::styled(format!("  {:<11}", "Countdown"), label_style()),
                Span::styled(format!("{} min", custom.duration().num_minutes()), default_style()),
                Span::raw("   "),
                Span::styled(text, style),
            ])
        }
        None => Line::from(vec![
            Span::styled(format!("  {:<11}", "Countdown"), label_style()),
            Span::styled("none (c to start)", label_style()),
        ]),
    };
    lines.push(custom_line);

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(
                format!(" Workday {} ", app.file_date.format("%Y-%m-%d")),
                title_style(),
            )),
    );

    f.render_widget(paragraph, area);
}

/// Render the elapsed share of the workday as a gauge
pub fn render_progress(f: &mut Frame, app: &AppState, now: NaiveDateTime, area: Rect) {
    let start = app.session.resolution().resolved_start;
    let end = app.session.deadlines().main;
    let ratio = workday_progress(start, end, now);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" Progress ", title_style())),
        )
        .gauge_style(gauge_style())
        .ratio(ratio)
        .label(format!("{:.0}%", ratio * 100.0));

    f.render_widget(gauge, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_workday_progress() {
        let start = at(9, 0);
        let end = at(17, 0);
        assert_eq!(workday_progress(start, end, at(8, 0)), 0.0);
        assert_eq!(workday_progress(start, end, at(13, 0)), 0.5);
        assert_eq!(workday_progress(start, end, at(18, 0)), 1.0);
        assert_eq!(workday_progress(start, start, at(9, 0)), 1.0);
    }

    #[test]
    fn test_remaining_text() {
        assert_eq!(remaining_text(Duration::minutes(90)), "in 1:30:00");
        assert_eq!(remaining_text(Duration::zero()), "over 0:00:00");
        assert_eq!(remaining_text(Duration::seconds(-300)), "over 0:05:00");
    }
}
