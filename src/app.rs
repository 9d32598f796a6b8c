use crate::config::Config;
use crate::detail::{ArticleView, DetailView, lookup};
use crate::error::BlogError;
use crate::filter::{CategoryFilter, Query, categories};
use crate::listing::{Card, Listing};
use crate::loader::{PostSource, fetch_posts};
use crate::overlay::{DismissTrigger, OverlayState, ScrollEffect};
use crate::post::Post;
use crate::share::{COPY_SUCCESS, Launcher, Notification, Platform, permalink, share_url};
use std::time::Instant;

/// Which view is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Card listing, with the article overlay on top when open.
    List,
    /// Standalone article page.
    Article,
}

/// Input mode for the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Outcome of the one-time feed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    Failed(String),
}

pub const LIST_OVERHEAD: u16 = 10;
/// Rows taken by one card in the listing.
pub const CARD_HEIGHT: u16 = 5;

/// Main application state.
pub struct App {
    pub should_quit: bool,
    pub view: View,
    pub show_help: bool,

    // Written once by `finish_load`, read-only afterwards.
    posts: Vec<Post>,
    pub load_state: LoadState,
    pub categories: Vec<String>,

    // Listing
    pub query: Query,
    pub input_mode: InputMode,
    pub filtered_indices: Vec<usize>,
    pub listing: Listing,
    pub list_selected: usize,
    pub page_size: usize,

    // Article page
    requested_id: Option<i64>,
    pub page: Option<DetailView>,

    // Article overlay
    pub overlay: OverlayState,
    pub scroll_locked: bool,

    pub detail_scroll: u16,

    pub notification: Option<Notification>,
    pub status_msg: String,

    base_url: String,
    site_name: String,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            should_quit: false,
            view: View::List,
            show_help: false,

            posts: Vec::new(),
            load_state: LoadState::Loading,
            categories: Vec::new(),

            query: Query::default(),
            input_mode: InputMode::Normal,
            filtered_indices: Vec::new(),
            listing: Listing::Empty,
            list_selected: 0,
            page_size: 20, // updated on first render/resize

            requested_id: None,
            page: None,

            overlay: OverlayState::Hidden,
            scroll_locked: false,

            detail_scroll: 0,

            notification: None,
            status_msg: "Loading articles...".to_string(),

            base_url: config.base_url.clone(),
            site_name: config.site_name.clone(),
        }
    }

    /// Start on the article page for `id` instead of the listing. `None`
    /// means the id was missing or did not parse.
    pub fn with_page(mut self, id: Option<i64>) -> Self {
        self.view = View::Article;
        self.requested_id = id;
        self
    }

    /// Initial data load.
    pub async fn init(&mut self, source: &PostSource) {
        let result = fetch_posts(source).await;
        self.finish_load(result);
    }

    /// The only place the collection is written.
    pub fn finish_load(&mut self, result: Result<Vec<Post>, BlogError>) {
        match result {
            Ok(posts) => {
                self.posts = posts;
                self.categories = categories(&self.posts);
                self.load_state = LoadState::Loaded;
                self.apply_filter();
                self.status_msg = format!("{} articles loaded", self.posts.len());
            }
            Err(e) => {
                tracing::error!(error = %e, "error fetching posts");
                self.posts.clear();
                self.categories.clear();
                self.load_state = LoadState::Failed(e.user_message());
                self.status_msg = "Feed unavailable".to_string();
            }
        }
        if self.view == View::Article {
            self.resolve_page();
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    fn resolve_page(&mut self) {
        self.page = match self.load_state {
            LoadState::Loaded => Some(DetailView::resolve(
                &self.posts,
                self.requested_id,
                &self.base_url,
                &self.site_name,
            )),
            _ => None,
        };
        self.detail_scroll = 0;
    }

    /// Title for the terminal window.
    pub fn window_title(&self) -> String {
        match (&self.view, self.page.as_ref().and_then(DetailView::article)) {
            (View::Article, Some(article)) => article.page_title.clone(),
            _ => self.site_name.clone(),
        }
    }

    /// Follow the page's "back home" link.
    pub fn back_home(&mut self) {
        self.view = View::List;
        self.page = None;
        self.requested_id = None;
        self.detail_scroll = 0;
    }

    // ── Filtering ──

    /// Re-derive the visible cards from the collection and the query.
    pub fn apply_filter(&mut self) {
        self.filtered_indices = self.query.apply(&self.posts);
        let base_url = &self.base_url;
        self.listing = Listing::build(
            self.filtered_indices.iter().map(|&i| &self.posts[i]),
            |id| permalink(base_url, id),
        );
        self.list_selected = 0;
        tracing::debug!(
            search = %self.query.search,
            category = %self.query.category.label(),
            matches = self.filtered_indices.len(),
            "filter applied"
        );
        self.status_msg = format!(
            "{} articles for \"{}\" in {}",
            self.filtered_indices.len(),
            if self.query.search.is_empty() { "*" } else { self.query.search.as_str() },
            self.query.category.label()
        );
    }

    pub fn set_search(&mut self, term: &str) {
        self.query.search = term.to_string();
        self.apply_filter();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.query.search.push(c);
        self.apply_filter();
    }

    pub fn pop_search_char(&mut self) {
        if self.query.search.pop().is_some() {
            self.apply_filter();
        }
    }

    pub fn clear_search(&mut self) {
        if !self.query.search.is_empty() {
            self.query.search.clear();
            self.apply_filter();
        }
    }

    pub fn select_category(&mut self, category: CategoryFilter) {
        self.query.category = category;
        self.apply_filter();
    }

    /// Position of the active category in the bar; 0 is "all".
    pub fn category_position(&self) -> usize {
        match &self.query.category {
            CategoryFilter::All => 0,
            CategoryFilter::Only(c) => self
                .categories
                .iter()
                .position(|known| known == c)
                .map(|i| i + 1)
                .unwrap_or(0),
        }
    }

    fn category_at(&self, position: usize) -> CategoryFilter {
        match position {
            0 => CategoryFilter::All,
            n => CategoryFilter::Only(self.categories[n - 1].clone()),
        }
    }

    pub fn next_category(&mut self) {
        let count = self.categories.len() + 1;
        let next = (self.category_position() + 1) % count;
        self.select_category(self.category_at(next));
    }

    pub fn prev_category(&mut self) {
        let count = self.categories.len() + 1;
        let prev = (self.category_position() + count - 1) % count;
        self.select_category(self.category_at(prev));
    }

    // ── List navigation ──

    pub fn selected_card(&self) -> Option<&Card> {
        self.listing.cards().get(self.list_selected)
    }

    /// Update the PgUp/PgDn jump distance based on terminal height.
    pub fn update_page_size(&mut self, terminal_height: u16) {
        let new_size = (terminal_height.saturating_sub(LIST_OVERHEAD) / CARD_HEIGHT) as usize;
        self.page_size = new_size.max(1);
    }

    pub fn list_next(&mut self) {
        if self.scroll_locked || self.listing.is_empty() {
            return;
        }
        if self.list_selected + 1 < self.listing.len() {
            self.list_selected += 1;
        }
    }

    pub fn list_prev(&mut self) {
        if self.scroll_locked {
            return;
        }
        self.list_selected = self.list_selected.saturating_sub(1);
    }

    pub fn list_page_down(&mut self) {
        if self.scroll_locked || self.listing.is_empty() {
            return;
        }
        self.list_selected = (self.list_selected + self.page_size).min(self.listing.len() - 1);
    }

    pub fn list_page_up(&mut self) {
        if self.scroll_locked {
            return;
        }
        self.list_selected = self.list_selected.saturating_sub(self.page_size);
    }

    pub fn list_first(&mut self) {
        if !self.scroll_locked {
            self.list_selected = 0;
        }
    }

    pub fn list_last(&mut self) {
        if !self.scroll_locked {
            self.list_selected = self.listing.len().saturating_sub(1);
        }
    }

    // ── Overlay ──

    /// Open the overlay for the selected card.
    pub fn open_selected(&mut self) {
        if let Some(id) = self.selected_card().map(|c| c.id) {
            self.open_article(id);
        }
    }

    /// Show article `id` in the overlay. Unknown ids leave it untouched.
    pub fn open_article(&mut self, id: i64) {
        let Some(post) = lookup(&self.posts, id) else {
            tracing::debug!(id, "no article to open");
            return;
        };
        let view = ArticleView::from_post(post, &self.base_url, &self.site_name);
        let effect = self.overlay.open(view);
        self.detail_scroll = 0;
        self.apply_scroll_effect(effect);
    }

    pub fn close_overlay(&mut self, trigger: DismissTrigger) {
        let effect = self.overlay.dismiss(trigger);
        self.apply_scroll_effect(effect);
    }

    fn apply_scroll_effect(&mut self, effect: Option<ScrollEffect>) {
        match effect {
            Some(ScrollEffect::Lock) => self.scroll_locked = true,
            Some(ScrollEffect::Unlock) => self.scroll_locked = false,
            None => {}
        }
    }

    // ── Article content ──

    /// The article on screen: the overlay's if open, else the page's.
    pub fn current_article(&self) -> Option<&ArticleView> {
        if let Some(article) = self.overlay.article() {
            return Some(article);
        }
        match self.view {
            View::Article => self.page.as_ref().and_then(DetailView::article),
            View::List => None,
        }
    }

    pub fn scroll_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    pub fn scroll_page_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(20);
    }

    pub fn scroll_page_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(20);
    }

    // ── Share actions ──

    pub fn share(&mut self, platform: Platform, launcher: &dyn Launcher) {
        let Some(article) = self.current_article() else {
            return;
        };
        let url = match share_url(platform, &article.page_url, &article.title) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(error = %e, "could not build share url");
                return;
            }
        };
        match launcher.open(url.as_str()) {
            Ok(()) => {
                tracing::info!(platform = platform.label(), url = %url, "share window opened");
                self.notify(format!("Sharing on {}...", platform.label()));
            }
            Err(e) => {
                tracing::warn!(error = %e, "share window failed");
                self.notify(e.user_message());
            }
        }
    }

    /// Copy the article link. Failure is logged only.
    pub fn copy_link(&mut self, launcher: &dyn Launcher) {
        let Some(link) = self.current_article().map(|a| a.page_url.clone()) else {
            return;
        };
        match launcher.copy(&link) {
            Ok(()) => self.notify(COPY_SUCCESS),
            Err(e) => tracing::warn!(error = %e, "failed to copy"),
        }
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification::new(message));
    }

    /// Drop the notification once it has been up long enough.
    pub fn tick(&mut self, now: Instant) {
        if self.notification.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notification = None;
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::detail::DetailView;
    use crate::post::sample;
    use std::cell::RefCell;

    #[derive(Default)]
    pub(crate) struct FakeLauncher {
        pub opened: RefCell<Vec<String>>,
        pub copied: RefCell<Vec<String>>,
        pub fail: bool,
    }

    impl Launcher for FakeLauncher {
        fn open(&self, url: &str) -> Result<(), BlogError> {
            if self.fail {
                return Err(BlogError::Opener("no browser".to_string()));
            }
            self.opened.borrow_mut().push(url.to_string());
            Ok(())
        }

        fn copy(&self, text: &str) -> Result<(), BlogError> {
            if self.fail {
                return Err(BlogError::Clipboard("no tool".to_string()));
            }
            self.copied.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    pub(crate) fn scenario() -> Vec<Post> {
        vec![
            sample(1, "Mars Rover", "New findings", "Space", "2024-01-01"),
            sample(2, "Ocean Ph", "pH levels", "Ocean", "2024-01-02"),
        ]
    }

    pub(crate) fn loaded_app() -> App {
        let mut app = App::new(&Config::default());
        app.finish_load(Ok(scenario()));
        app
    }

    fn visible_ids(app: &App) -> Vec<i64> {
        app.listing.cards().iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_initial_render_shows_everything() {
        let app = loaded_app();
        assert_eq!(app.load_state, LoadState::Loaded);
        assert_eq!(visible_ids(&app), vec![1, 2]);
        assert_eq!(app.categories, vec!["Space", "Ocean"]);
    }

    #[test]
    fn test_load_failure_leaves_state_empty() {
        let mut app = App::new(&Config::default());
        app.finish_load(Err(BlogError::Status { status: 404 }));
        assert!(app.posts().is_empty());
        assert!(matches!(app.load_state, LoadState::Failed(ref msg) if msg.contains("404")));
        assert!(app.listing.is_empty());
    }

    #[test]
    fn test_search_then_category_compose() {
        let mut app = loaded_app();
        app.set_search("mars");
        assert_eq!(visible_ids(&app), vec![1]);

        app.select_category(CategoryFilter::parse("Ocean"));
        assert_eq!(app.query.search, "mars");
        assert!(app.listing.is_empty());

        app.clear_search();
        assert_eq!(visible_ids(&app), vec![2]);

        app.select_category(CategoryFilter::All);
        assert_eq!(visible_ids(&app), vec![1, 2]);
    }

    #[test]
    fn test_typing_updates_on_every_key() {
        let mut app = loaded_app();
        app.push_search_char('o');
        assert_eq!(visible_ids(&app), vec![2]);
        app.push_search_char('x');
        assert!(app.listing.is_empty());
        app.pop_search_char();
        assert_eq!(visible_ids(&app), vec![2]);
    }

    #[test]
    fn test_category_cycling_wraps() {
        let mut app = loaded_app();
        app.next_category();
        assert_eq!(app.query.category, CategoryFilter::parse("Space"));
        app.next_category();
        assert_eq!(app.query.category, CategoryFilter::parse("Ocean"));
        app.next_category();
        assert_eq!(app.query.category, CategoryFilter::All);
        app.prev_category();
        assert_eq!(app.query.category, CategoryFilter::parse("Ocean"));
    }

    #[test]
    fn test_filter_change_resets_selection() {
        let mut app = loaded_app();
        app.list_next();
        assert_eq!(app.list_selected, 1);
        app.set_search("");
        assert_eq!(app.list_selected, 0);
    }

    #[test]
    fn test_overlay_locks_list_navigation() {
        let mut app = loaded_app();
        app.open_selected();
        assert!(app.overlay.is_visible());
        assert!(app.scroll_locked);

        app.list_next();
        assert_eq!(app.list_selected, 0);

        app.close_overlay(DismissTrigger::Escape);
        assert!(!app.scroll_locked);
        app.list_next();
        assert_eq!(app.list_selected, 1);
    }

    #[test]
    fn test_overlay_a_then_b() {
        let mut app = loaded_app();
        app.open_article(1);
        app.open_article(2);
        assert!(app.scroll_locked);
        let shown = app.current_article().unwrap();
        assert_eq!(shown.id, 2);
        assert_eq!(shown.title, "Ocean Ph");
    }

    #[test]
    fn test_overlay_unknown_id_is_noop() {
        let mut app = loaded_app();
        app.open_article(3);
        assert!(!app.overlay.is_visible());
        assert!(!app.scroll_locked);

        app.open_article(1);
        app.open_article(3);
        assert_eq!(app.current_article().map(|a| a.id), Some(1));
    }

    #[test]
    fn test_page_mode_found_and_title() {
        let mut app = App::new(&Config::default()).with_page(Some(1));
        app.finish_load(Ok(scenario()));
        assert_eq!(app.view, View::Article);
        assert_eq!(app.current_article().map(|a| a.id), Some(1));
        assert_eq!(app.window_title(), "Mars Rover | Daily Science");
    }

    #[test]
    fn test_page_mode_not_found() {
        let mut app = App::new(&Config::default()).with_page(Some(3));
        app.finish_load(Ok(scenario()));
        assert_eq!(app.page, Some(DetailView::NotFound));
        assert!(app.current_article().is_none());
        assert_eq!(app.window_title(), "Daily Science");

        app.back_home();
        assert_eq!(app.view, View::List);
        assert_eq!(visible_ids(&app), vec![1, 2]);
    }

    #[test]
    fn test_page_mode_load_failure_has_no_page() {
        let mut app = App::new(&Config::default()).with_page(Some(1));
        app.finish_load(Err(BlogError::Status { status: 500 }));
        assert!(app.page.is_none());
    }

    #[test]
    fn test_share_opens_platform_url() {
        let mut app = loaded_app();
        let launcher = FakeLauncher::default();

        app.share(Platform::Twitter, &launcher);
        assert!(launcher.opened.borrow().is_empty());

        app.open_article(2);
        app.share(Platform::Twitter, &launcher);
        app.share(Platform::Facebook, &launcher);
        let opened = launcher.opened.borrow();
        assert_eq!(opened.len(), 2);
        assert!(opened[0].starts_with("https://twitter.com/intent/tweet?url="));
        assert!(opened[0].contains("text=Ocean+Ph"));
        assert!(opened[1].starts_with("https://www.facebook.com/sharer/sharer.php?u="));
    }

    #[test]
    fn test_copy_link_success_notifies() {
        let mut app = loaded_app();
        let launcher = FakeLauncher::default();
        app.open_article(1);
        app.copy_link(&launcher);
        assert_eq!(
            launcher.copied.borrow().as_slice(),
            ["http://localhost:5500/article.html?id=1".to_string()]
        );
        assert_eq!(app.notification.as_ref().map(|n| n.message.as_str()), Some(COPY_SUCCESS));
    }

    #[test]
    fn test_copy_link_failure_is_silent() {
        let mut app = loaded_app();
        let launcher = FakeLauncher { fail: true, ..Default::default() };
        app.open_article(1);
        app.copy_link(&launcher);
        assert!(app.notification.is_none());
    }

    #[test]
    fn test_notification_expires_on_tick() {
        let mut app = loaded_app();
        app.notify("hello");
        app.tick(Instant::now());
        assert!(app.notification.is_some());
        app.tick(Instant::now() + crate::share::NOTIFICATION_TTL);
        assert!(app.notification.is_none());
    }
}
