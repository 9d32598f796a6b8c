use crate::post::Post;

/// Spelling of the "no restriction" category.
pub const ALL_CATEGORIES: &str = "all";

/// Category restriction for the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Parse a category value as it appears in links and CLI flags.
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(c) => c,
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        match self {
            Self::All => true,
            Self::Only(c) => post.category == *c,
        }
    }
}

/// Live predicate over the collection: search term AND category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub search: String,
    pub category: CategoryFilter,
}

impl Query {
    pub fn is_unrestricted(&self) -> bool {
        self.search.is_empty() && self.category == CategoryFilter::All
    }

    pub fn matches(&self, post: &Post) -> bool {
        matches_search(post, &self.search) && self.category.matches(post)
    }

    /// Indices into `posts` that satisfy the query, in collection order.
    pub fn apply(&self, posts: &[Post]) -> Vec<usize> {
        posts
            .iter()
            .enumerate()
            .filter(|(_, post)| self.matches(post))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Case-insensitive substring match against title, summary or category.
pub fn matches_search(post: &Post, term: &str) -> bool {
    let term = term.to_lowercase();
    term.is_empty()
        || post.title.to_lowercase().contains(&term)
        || post.summary.to_lowercase().contains(&term)
        || post.category.to_lowercase().contains(&term)
}

/// Distinct categories in first-appearance order.
pub fn categories(posts: &[Post]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for post in posts {
        if !seen.iter().any(|c| *c == post.category) {
            seen.push(post.category.clone());
        }
    }
    seen
}
