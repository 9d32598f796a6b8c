use super::{key, status_text};
use crate::app::{App, InputMode, LoadState};
use crate::filter::ALL_CATEGORIES;
use crate::listing::{Listing, NO_RESULTS};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Layout: header(3) + categories(3) + search(3) + cards(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Header ──
    let header_text = if app.query.is_unrestricted() {
        format!(" {}   [{} articles]", app.site_name(), app.posts().len())
    } else {
        format!(
            " {}   [{} of {} articles]",
            app.site_name(),
            app.filtered_indices.len(),
            app.posts().len()
        )
    };
    let header = Paragraph::new(header_text)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(header, chunks[0]);

    // ── Category bar ──
    let mut titles = vec![Line::from(ALL_CATEGORIES)];
    titles.extend(app.categories.iter().map(|c| Line::from(c.as_str())));
    let tabs = Tabs::new(titles)
        .select(app.category_position())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Categories [←/→] "),
        )
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );
    frame.render_widget(tabs, chunks[1]);

    // ── Search bar ──
    let search_style = match app.input_mode {
        InputMode::Editing => Style::default().fg(Color::Yellow),
        InputMode::Normal => Style::default().fg(Color::DarkGray),
    };
    let search_label = if app.input_mode == InputMode::Editing {
        " 🔍 Search (Enter to keep, Esc to close): "
    } else {
        " 🔍 Search (/): "
    };
    let search_bar = Paragraph::new(format!("{}{}", search_label, app.query.search))
        .style(search_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(search_style)
                .title(" Search "),
        );
    frame.render_widget(search_bar, chunks[2]);

    if app.input_mode == InputMode::Editing {
        frame.set_cursor_position(search_cursor(chunks[2], search_label, &app.query.search));
    }

    // ── Cards ──
    render_cards(app, frame, chunks[3]);

    // ── Status bar ──
    let status_line = Line::from(vec![
        key(" ↑↓"),
        Span::raw(" Navigate  "),
        key("/"),
        Span::raw(" Search  "),
        key("←→"),
        Span::raw(" Category  "),
        key("Enter"),
        Span::raw(" Read  "),
        key("?"),
        Span::raw(" Help  "),
        key("q"),
        Span::raw(" Quit  "),
        Span::styled(status_text(app), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[4]);
}

fn render_cards(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Latest Articles ");

    let message = match (&app.load_state, &app.listing) {
        (LoadState::Loading, _) => Some(("Loading articles...", Color::DarkGray)),
        (LoadState::Failed(msg), _) => Some((msg.as_str(), Color::Red)),
        (LoadState::Loaded, Listing::Empty) => Some((NO_RESULTS, Color::DarkGray)),
        (LoadState::Loaded, Listing::Cards(_)) => None,
    };
    if let Some((text, color)) = message {
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let width = (area.width as usize).saturating_sub(6);
    let items: Vec<ListItem> = app
        .listing
        .cards()
        .iter()
        .map(|card| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        format!("[{}]", card.category),
                        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("  📅 {}", card.date), Style::default().fg(Color::DarkGray)),
                ]),
                Line::from(Span::styled(
                    truncate_str(&card.title, width),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )),
                Line::from(truncate_str(&card.summary, width)),
                Line::from(Span::styled(
                    truncate_str(card.thumbnail.initial(), width),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(""),
            ])
        })
        .collect();

    let list_widget = List::new(items)
        .block(block.title_bottom(
            Line::from(format!(" {} of {} ", app.list_selected + 1, app.listing.len()))
                .alignment(Alignment::Right),
        ))
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default();
    list_state.select(Some(app.list_selected));
    frame.render_stateful_widget(list_widget, area, &mut list_state);
}

/// Cursor after the typed term, kept inside the search box border.
fn search_cursor(area: Rect, label: &str, term: &str) -> Position {
    let offset = u16::try_from(label.width().saturating_add(term.width())).unwrap_or(u16::MAX);
    let last_column = area.right().saturating_sub(2).max(area.x);
    Position::new(
        area.x.saturating_add(1).saturating_add(offset).min(last_column),
        area.y.saturating_add(1),
    )
}

/// Truncate a string to `max_width` display columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(1);
    let mut used = 0;
    let mut result = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        result.push(c);
    }
    result.push('…');
    result
}
