use crate::post::Post;
use url::Url;

/// Placeholder used by every card whose image cannot be shown.
pub const CARD_FALLBACK_IMAGE: &str = "https://placehold.co/600x400/1a1a2e/00f3ff?text=Science";

/// Placeholder for the hero image of an article page.
pub const HERO_FALLBACK_IMAGE: &str = "https://placehold.co/800x400/1a1a2e/00f3ff?text=Science";

/// Message shown in place of an empty card list.
pub const NO_RESULTS: &str = "No articles found matching your criteria.";

/// An image reference with the placeholder to use when it fails to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub src: String,
    pub fallback: &'static str,
}

impl Thumbnail {
    pub fn new(src: &str, fallback: &'static str) -> Self {
        Self {
            src: src.trim().to_string(),
            fallback,
        }
    }

    /// An empty or non-http(s) source can never load.
    pub fn is_loadable(&self) -> bool {
        match Url::parse(&self.src) {
            Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
            Err(_) => false,
        }
    }

    /// The URL to display after an attempt to load `src`.
    pub fn resolve(&self, loaded_ok: bool) -> &str {
        if loaded_ok && self.is_loadable() {
            &self.src
        } else {
            self.fallback
        }
    }

    /// The URL to display before any load attempt has been made.
    pub fn initial(&self) -> &str {
        self.resolve(true)
    }
}

/// Compact summary of one post in the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: i64,
    pub category: String,
    pub date: String,
    pub title: String,
    pub summary: String,
    pub thumbnail: Thumbnail,
    pub link: String,
}

impl Card {
    /// `link` is the address of the post's article page.
    pub fn from_post(post: &Post, link: String) -> Self {
        Self {
            id: post.id,
            category: post.category.clone(),
            date: post.display_date(),
            title: post.title.clone(),
            summary: post.summary.clone(),
            thumbnail: Thumbnail::new(&post.image_url, CARD_FALLBACK_IMAGE),
            link,
        }
    }
}

/// The rendered card list, or the single "no results" placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Cards(Vec<Card>),
    Empty,
}

impl Listing {
    /// One card per post, in input order. `link` maps a post id to the
    /// address of its article page.
    pub fn build<'a>(posts: impl IntoIterator<Item = &'a Post>, link: impl Fn(i64) -> String) -> Self {
        let cards: Vec<Card> = posts
            .into_iter()
            .map(|post| Card::from_post(post, link(post.id)))
            .collect();
        if cards.is_empty() {
            Listing::Empty
        } else {
            Listing::Cards(cards)
        }
    }

    pub fn cards(&self) -> &[Card] {
        match self {
            Listing::Cards(cards) => cards,
            Listing::Empty => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.cards().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Listing::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::sample;
    use crate::share::permalink;

    fn link(id: i64) -> String {
        permalink("http://localhost:5500", id)
    }

    #[test]
    fn test_listing_keeps_order() {
        let posts = vec![
            sample(2, "Ocean Ph", "pH levels", "Ocean", "2024-01-02"),
            sample(1, "Mars Rover", "New findings", "Space", "2024-01-01"),
        ];
        let listing = Listing::build(&posts, link);
        let ids: Vec<i64> = listing.cards().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(listing.len(), 2);
    }

    #[test]
    fn test_empty_listing_is_placeholder() {
        let listing = Listing::build(std::iter::empty(), link);
        assert_eq!(listing, Listing::Empty);
        assert!(listing.is_empty());
        assert!(listing.cards().is_empty());
    }

    #[test]
    fn test_card_fields() {
        let post = sample(1, "Mars Rover", "New findings", "Space", "2024-01-01");
        let card = Card::from_post(&post, link(post.id));
        assert_eq!(card.category, "Space");
        assert_eq!(card.date, "Jan 01, 2024");
        assert_eq!(card.title, "Mars Rover");
        assert_eq!(card.summary, "New findings");
        assert_eq!(card.link, "http://localhost:5500/article.html?id=1");
        assert_eq!(card.thumbnail.initial(), "https://images.example.com/1.jpg");
    }

    #[test]
    fn test_thumbnail_falls_back_on_failure() {
        let post = sample(1, "Mars Rover", "New findings", "Space", "2024-01-01");
        let card = Card::from_post(&post, link(post.id));
        assert_eq!(card.thumbnail.resolve(false), CARD_FALLBACK_IMAGE);
    }

    #[test]
    fn test_invalid_sources_share_one_fallback() {
        let mut a = sample(1, "a", "s", "c", "d");
        a.image_url = String::new();
        let mut b = sample(2, "b", "s", "c", "d");
        b.image_url = "not a url".to_string();
        let mut c = sample(3, "c", "s", "c", "d");
        c.image_url = "ftp://images.example.com/x.jpg".to_string();

        let listing = Listing::build([&a, &b, &c], link);
        for card in listing.cards() {
            assert!(!card.thumbnail.is_loadable());
            assert_eq!(card.thumbnail.initial(), CARD_FALLBACK_IMAGE);
        }
    }
}
