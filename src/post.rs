use chrono::NaiveDate;
use scraper::{ElementRef, Html, Node};
use serde::{Deserialize, Serialize};

/// Notice appended when an article has no full body yet.
pub const CONTENT_PLACEHOLDER: &str = "(Full content coming soon...)";

/// A single entry of the blog feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub category: String,
    pub date: String,
    #[serde(rename = "imageURL", default)]
    pub image_url: String,
    #[serde(rename = "fullContent", default, skip_serializing_if = "Option::is_none")]
    pub full_content: Option<String>,
}

/// Article body to show in a detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Rich-text (HTML) body from the feed.
    Full(String),
    /// No body in the feed; the summary stands in, followed by the notice.
    Fallback(String),
}

impl Post {
    /// Resolve the body, falling back to the summary when `fullContent`
    /// is missing or blank.
    pub fn body(&self) -> Body {
        match self.full_content.as_deref() {
            Some(html) if !html.trim().is_empty() => Body::Full(html.to_string()),
            _ => Body::Fallback(self.summary.clone()),
        }
    }

    /// Human-readable date. ISO dates become `Jan 01, 2024`; anything else
    /// is shown verbatim.
    pub fn display_date(&self) -> String {
        match NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d") {
            Ok(date) => date.format("%b %d, %Y").to_string(),
            Err(_) => self.date.clone(),
        }
    }
}

impl Body {
    /// Plain-text paragraphs for terminal display.
    pub fn paragraphs(&self) -> Vec<String> {
        match self {
            Body::Full(html) => html_to_paragraphs(html),
            Body::Fallback(summary) => {
                vec![summary.clone(), CONTENT_PLACEHOLDER.to_string()]
            }
        }
    }
}

/// Elements whose contents are never shown.
const SKIPPED: [&str; 4] = ["script", "style", "noscript", "template"];

/// Elements that start and end a paragraph.
const BLOCKS: [&str; 15] = [
    "p", "div", "section", "article", "blockquote", "pre", "li", "ul", "ol", "h1", "h2", "h3",
    "h4", "h5", "h6",
];

/// Flatten an HTML fragment into paragraphs of plain text.
pub fn html_to_paragraphs(html: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    collect_text(fragment.root_element(), &mut current, &mut paragraphs);
    flush(&mut current, &mut paragraphs);
    paragraphs
}

fn collect_text(element: ElementRef<'_>, current: &mut String, out: &mut Vec<String>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => current.push_str(text),
            Node::Element(el) => {
                let name = el.name();
                if SKIPPED.contains(&name) {
                    continue;
                }
                if name == "br" {
                    flush(current, out);
                    continue;
                }
                let Some(child) = ElementRef::wrap(child) else {
                    continue;
                };
                let block = BLOCKS.contains(&name);
                if block {
                    flush(current, out);
                }
                collect_text(child, current, out);
                if block {
                    flush(current, out);
                }
            }
            _ => {}
        }
    }
}

/// Close the paragraph being built, collapsing whitespace.
fn flush(current: &mut String, out: &mut Vec<String>) {
    let paragraph = current.split_whitespace().collect::<Vec<_>>().join(" ");
    if !paragraph.is_empty() {
        out.push(paragraph);
    }
    current.clear();
}

#[cfg(test)]
pub(crate) fn sample(id: i64, title: &str, summary: &str, category: &str, date: &str) -> Post {
    Post {
        id,
        title: title.to_string(),
        summary: summary.to_string(),
        category: category.to_string(),
        date: date.to_string(),
        image_url: format!("https://images.example.com/{}.jpg", id),
        full_content: None,
    }
}
