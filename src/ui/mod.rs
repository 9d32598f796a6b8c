mod article;
mod help;
mod list;
pub mod overlay;

use crate::app::{App, View};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
};

/// Top-level render dispatch.
pub fn render(app: &App, frame: &mut Frame) {
    match app.view {
        View::List => list::render(app, frame),
        View::Article => article::render_page(app, frame),
    }

    if let Some(view) = app.overlay.article() {
        overlay::render(view, app.detail_scroll, frame);
    }

    // Render help overlay on top if active
    if app.show_help {
        help::render(frame);
    }
}

fn key_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

/// Status-bar key hint.
fn key(label: &str) -> Span<'_> {
    Span::styled(label, key_style())
}

/// The transient notification if one is up, else the persistent status.
fn status_text(app: &App) -> &str {
    match &app.notification {
        Some(note) => &note.message,
        None => &app.status_msg,
    }
}

/// Create a centered rectangle using percentage of parent area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
