use super::article::article_lines;
use super::centered_rect;
use crate::detail::ArticleView;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Where the overlay sits inside the terminal area. Clicks outside this
/// rectangle dismiss it.
pub fn overlay_area(area: Rect) -> Rect {
    centered_rect(80, 80, area)
}

pub fn render(view: &ArticleView, scroll: u16, frame: &mut Frame) {
    let area = overlay_area(frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let content = Paragraph::new(article_lines(view))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" {} ", view.page_title))
                .title_bottom(
                    Line::from(" Esc or click outside to close ")
                        .style(Style::default().fg(Color::DarkGray))
                        .alignment(Alignment::Right),
                ),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(content, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Position;

    #[test]
    fn test_overlay_area_is_inset() {
        let full = Rect::new(0, 0, 100, 40);
        let area = overlay_area(full);
        assert!(area.width < full.width && area.height < full.height);
        assert!(area.contains(Position::new(50, 20)));
        assert!(!area.contains(Position::new(0, 0)));
    }
}
