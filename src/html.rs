//! Static HTML rendering of the listing and of every article page.

use crate::detail::{ArticleView, BACK_HOME, DetailView, NOT_FOUND};
use crate::listing::{Card, Listing, NO_RESULTS, Thumbnail};
use crate::post::{Body, CONTENT_PLACEHOLDER, Post};
use crate::share::{Platform, share_url};
use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::Path;

/// Escape text for element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn img(thumbnail: &Thumbnail, alt: &str, class: &str) -> String {
    format!(
        r#"<img src="{}" alt="{}" class="{}" loading="lazy" onerror="this.onerror=null;this.src='{}'">"#,
        escape(thumbnail.initial()),
        escape(alt),
        class,
        escape(thumbnail.fallback),
    )
}

fn card(card: &Card) -> String {
    format!(
        r#"<article class="card">
  <div class="card-image">
    <span class="category-tag">{category}</span>
    {img}
  </div>
  <div class="card-content">
    <div class="card-date"><span>📅</span> {date}</div>
    <h3 class="card-title">{title}</h3>
    <p class="card-summary">{summary}</p>
    <a href="{link}" class="read-more">Read Full Article <span>→</span></a>
  </div>
</article>
"#,
        category = escape(&card.category),
        img = img(&card.thumbnail, &card.title, "card-img"),
        date = escape(&card.date),
        title = escape(&card.title),
        summary = escape(&card.summary),
        link = escape(&card.link),
    )
}

/// The card grid, or the single "no results" message.
pub fn render_listing(listing: &Listing) -> String {
    match listing {
        Listing::Empty => format!(r#"<p class="no-results">{}</p>"#, NO_RESULTS),
        Listing::Cards(cards) => cards.iter().map(card).collect(),
    }
}

fn page(title: &str, main: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        main
    )
}

pub fn render_index(listing: &Listing, site_name: &str) -> String {
    let main = format!(
        "<main id=\"latest\">\n<div id=\"blog-grid-container\" class=\"blog-grid\">\n{}</div>\n</main>\n",
        render_listing(listing)
    );
    page(site_name, &main)
}

fn share_section(article: &ArticleView) -> String {
    let mut out = String::from("<div class=\"share-section\">\n<span>Share this:</span>\n");
    for platform in [Platform::Facebook, Platform::Twitter] {
        if let Ok(url) = share_url(platform, &article.page_url, &article.title) {
            let _ = writeln!(
                out,
                r#"<a class="share-btn" href="{}" target="_blank" rel="noopener">{}</a>"#,
                escape(url.as_str()),
                platform.label()
            );
        }
    }
    out.push_str("</div>\n");
    out
}

fn article_body(body: &Body) -> String {
    match body {
        Body::Full(html) => html.clone(),
        Body::Fallback(summary) => format!(
            "<p>{}</p><p><i>{}</i></p>",
            escape(summary),
            CONTENT_PLACEHOLDER
        ),
    }
}

/// A full article page, or the not-found message with its way back.
pub fn render_article(view: &DetailView, site_name: &str) -> String {
    match view {
        DetailView::NotFound => {
            let main = format!(
                "<div class=\"not-found\">\n<h2>{}</h2>\n<a href=\"../index.html\" class=\"read-more\">{}</a>\n</div>\n",
                NOT_FOUND, BACK_HOME
            );
            page(site_name, &main)
        }
        DetailView::Found(article) => {
            let main = format!(
                r#"<article class="full-article">
<div class="article-header">
<span class="article-badge">{category}</span>
<span class="article-date">📅 {date}</span>
<h1 class="article-main-title">{title}</h1>
</div>
{hero}
{share}<div class="article-body">
{body}
</div>
</article>
"#,
                category = escape(&article.category),
                date = escape(&article.date),
                title = escape(&article.title),
                hero = img(&article.hero, &article.title, "article-hero-img"),
                share = share_section(article),
                body = article_body(&article.body),
            );
            page(&article.page_title, &main)
        }
    }
}

/// Path of an exported article page, relative to the site root.
pub fn page_path(id: i64) -> String {
    format!("article/{}.html", id)
}

/// Public address of an exported article page.
pub fn page_url(base_url: &str, id: i64) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), page_path(id))
}

/// Write `index.html` and `article/{id}.html` for every post. Returns the
/// number of article pages written. With duplicate ids the first post wins.
pub fn export(posts: &[Post], out_dir: &Path, base_url: &str, site_name: &str) -> std::io::Result<usize> {
    let article_dir = out_dir.join("article");
    std::fs::create_dir_all(&article_dir)?;

    let listing = Listing::build(posts, page_path);
    std::fs::write(out_dir.join("index.html"), render_index(&listing, site_name))?;

    let mut written = HashSet::new();
    for post in posts {
        if !written.insert(post.id) {
            tracing::warn!(id = post.id, "duplicate id skipped");
            continue;
        }
        let article = ArticleView::from_post(post, base_url, site_name).at(page_url(base_url, post.id));
        std::fs::write(
            out_dir.join(page_path(post.id)),
            render_article(&DetailView::Found(article), site_name),
        )?;
    }
    tracing::info!(dir = %out_dir.display(), pages = written.len(), "site exported");
    Ok(written.len())
}
