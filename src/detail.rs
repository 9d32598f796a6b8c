use crate::listing::{HERO_FALLBACK_IMAGE, Thumbnail};
use crate::post::{Body, Post};
use crate::share::permalink;
use url::Url;

pub const NOT_FOUND: &str = "Article not found!";
pub const BACK_HOME: &str = "← Go Back Home";

/// First post whose id equals `id`.
pub fn lookup(posts: &[Post], id: i64) -> Option<&Post> {
    posts.iter().find(|p| p.id == id)
}

/// Read the article id out of a CLI argument.
///
/// Accepts a bare id (`3`), a query string (`?id=3`) or a full link
/// (`https://blog.example.com/article.html?id=3`). Like the browser's
/// `parseInt`, only the leading digits count (`3abc` is 3), and anything
/// without digits yields `None`.
pub fn parse_article_id(arg: &str) -> Option<i64> {
    let arg = arg.trim();
    let raw = if let Ok(url) = Url::parse(arg) {
        url.query_pairs()
            .find(|(k, _)| k == "id")
            .map(|(_, v)| v.into_owned())?
    } else if let Some(query) = arg.split_once('?').map(|(_, q)| q) {
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == "id")
            .map(|(_, v)| v.into_owned())?
    } else {
        arg.to_string()
    };
    leading_int(&raw)
}

fn leading_int(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Everything needed to present one article in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleView {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub category: String,
    pub hero: Thumbnail,
    pub body: Body,
    pub page_url: String,
    pub page_title: String,
}

impl ArticleView {
    pub fn from_post(post: &Post, base_url: &str, site_name: &str) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            date: post.display_date(),
            category: post.category.clone(),
            hero: Thumbnail::new(&post.image_url, HERO_FALLBACK_IMAGE),
            body: post.body(),
            page_url: permalink(base_url, post.id),
            page_title: page_title(&post.title, site_name),
        }
    }

    /// The same article served from `page_url`.
    pub fn at(mut self, page_url: String) -> Self {
        self.page_url = page_url;
        self
    }
}

pub fn page_title(title: &str, site_name: &str) -> String {
    format!("{} | {}", title, site_name)
}

/// Outcome of presenting an article page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    Found(ArticleView),
    NotFound,
}

impl DetailView {
    /// Resolve a requested id against the collection. `None` (an id that
    /// did not parse) is treated like an id that matches nothing.
    pub fn resolve(posts: &[Post], id: Option<i64>, base_url: &str, site_name: &str) -> Self {
        match id.and_then(|id| lookup(posts, id)) {
            Some(post) => DetailView::Found(ArticleView::from_post(post, base_url, site_name)),
            None => DetailView::NotFound,
        }
    }

    pub fn article(&self) -> Option<&ArticleView> {
        match self {
            DetailView::Found(view) => Some(view),
            DetailView::NotFound => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::sample;

    const BASE: &str = "http://localhost:5500";
    const SITE: &str = "Daily Science";

    fn scenario() -> Vec<Post> {
        vec![
            sample(1, "Mars Rover", "New findings", "Space", "2024-01-01"),
            sample(2, "Ocean Ph", "pH levels", "Ocean", "2024-01-02"),
        ]
    }

    #[test]
    fn test_lookup_missing_id_is_not_found() {
        let posts = scenario();
        assert!(lookup(&posts, 3).is_none());
        assert_eq!(DetailView::resolve(&posts, Some(3), BASE, SITE), DetailView::NotFound);
        assert_eq!(DetailView::resolve(&posts, None, BASE, SITE), DetailView::NotFound);
        assert_eq!(DetailView::resolve(&[], Some(1), BASE, SITE), DetailView::NotFound);
    }

    #[test]
    fn test_lookup_first_match_wins() {
        let mut posts = scenario();
        posts.push(sample(1, "Duplicate", "dup", "Space", "2024-02-01"));
        assert_eq!(lookup(&posts, 1).map(|p| p.title.as_str()), Some("Mars Rover"));
    }

    #[test]
    fn test_found_view_fields() {
        let posts = scenario();
        let view = DetailView::resolve(&posts, Some(2), BASE, SITE);
        let article = view.article().unwrap();
        assert_eq!(article.title, "Ocean Ph");
        assert_eq!(article.category, "Ocean");
        assert_eq!(article.date, "Jan 02, 2024");
        assert_eq!(article.page_title, "Ocean Ph | Daily Science");
        assert_eq!(article.page_url, "http://localhost:5500/article.html?id=2");
        assert_eq!(article.body, Body::Fallback("pH levels".to_string()));
        assert_eq!(article.hero.resolve(false), HERO_FALLBACK_IMAGE);
    }

    #[test]
    fn test_parse_article_id_forms() {
        assert_eq!(parse_article_id("3"), Some(3));
        assert_eq!(parse_article_id("?id=12"), Some(12));
        assert_eq!(parse_article_id("article.html?id=5&ref=home"), Some(5));
        assert_eq!(parse_article_id("https://blog.example.com/article.html?id=7"), Some(7));
        assert_eq!(parse_article_id("4abc"), Some(4));
        assert_eq!(parse_article_id("-2"), Some(-2));
    }

    #[test]
    fn test_parse_article_id_rejects_garbage() {
        assert_eq!(parse_article_id(""), None);
        assert_eq!(parse_article_id("abc"), None);
        assert_eq!(parse_article_id("article.html?page=2"), None);
        assert_eq!(parse_article_id("https://blog.example.com/article.html"), None);
    }
}
