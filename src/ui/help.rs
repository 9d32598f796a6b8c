use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        format!("  {}", title),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn binding<'a>(keys: &'a str, action: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("    {:<10}", keys), Style::default().fg(Color::Yellow)),
        Span::raw(action),
    ])
}

pub fn render(frame: &mut Frame) {
    let area = super::centered_rect(70, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(""),
        section("Global"),
        binding("?", "Toggle this help"),
        binding("q", "Quit (or go back home from an article page)"),
        binding("Ctrl+C", "Quit application"),
        Line::from(""),
        section("Listing"),
        binding("↑/k ↓/j", "Navigate articles"),
        binding("g/G", "Jump to first/last article"),
        binding("/", "Search titles, summaries and categories"),
        binding("Esc", "Clear search"),
        binding("←/→ [ ]", "Previous/next category"),
        binding("a", "Show all categories"),
        binding("Enter", "Read article in overlay"),
        Line::from(""),
        section("Article"),
        binding("↑/↓", "Scroll content"),
        binding("PgUp/PgDn", "Scroll page up/down"),
        binding("f", "Share on Facebook"),
        binding("t", "Share on Twitter"),
        binding("y", "Copy link to clipboard"),
        binding("Esc", "Close overlay / back home"),
        Line::from(""),
    ];

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help — Keybindings ")
                .title_bottom(Line::from(" Press any key to close ").style(Style::default().fg(Color::DarkGray))),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}
