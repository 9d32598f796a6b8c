use super::{key, status_text};
use crate::app::{App, LoadState};
use crate::detail::{ArticleView, BACK_HOME, DetailView, NOT_FOUND};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Badge, date, title, hero image, share hints and body of an article.
pub(super) fn article_lines(view: &ArticleView) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", view.category),
                Style::default().fg(Color::Black).bg(Color::Magenta),
            ),
            Span::styled(format!("  📅 {}", view.date), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            view.title.as_str(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Image: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                view.hero.initial(),
                Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
            ),
        ]),
        Line::from(vec![
            Span::styled("Share this: ", Style::default().fg(Color::DarkGray)),
            key("f"),
            Span::raw(" Facebook  "),
            key("t"),
            Span::raw(" Twitter  "),
            key("y"),
            Span::raw(" Copy Link"),
        ]),
        Line::from(""),
    ];
    for paragraph in view.body.paragraphs() {
        lines.push(Line::from(paragraph));
        lines.push(Line::from(""));
    }
    lines
}

/// Standalone article page.
pub fn render_page(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Layout: content(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    match (&app.load_state, &app.page) {
        (LoadState::Failed(msg), _) => render_message(frame, chunks[0], msg, Color::Red),
        (_, Some(DetailView::Found(view))) => {
            let content = Paragraph::new(article_lines(view))
                .wrap(Wrap { trim: false })
                .scroll((app.detail_scroll, 0))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::DarkGray))
                        .title(format!(" {} ", view.page_title))
                        .title_bottom(Line::from(view.page_url.as_str()).alignment(Alignment::Right)),
                );
            frame.render_widget(content, chunks[0]);
        }
        (_, Some(DetailView::NotFound)) => render_not_found(frame, chunks[0]),
        (_, None) => render_message(frame, chunks[0], "Loading article...", Color::DarkGray),
    }

    let status_line = Line::from(vec![
        key(" ↑↓/PgUp/PgDn"),
        Span::raw(" Scroll  "),
        key("f/t"),
        Span::raw(" Share  "),
        key("y"),
        Span::raw(" Copy Link  "),
        key("Esc"),
        Span::raw(" Home  "),
        Span::styled(status_text(app), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[1]);
}

fn render_not_found(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            NOT_FOUND,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![Span::styled(BACK_HOME, Style::default().fg(Color::Cyan)), Span::raw(" (Esc)")]),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));
    frame.render_widget(paragraph, area);
}

fn render_message(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));
    frame.render_widget(paragraph, area);
}
