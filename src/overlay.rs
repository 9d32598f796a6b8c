//! Modal article overlay.
//!
//! There is one overlay per listing. It is either hidden or showing exactly
//! one article; opening another article while it is visible replaces the
//! contents in place. Every transition reports the scroll side effect the
//! view layer has to apply, so the background list is locked while the
//! overlay is up and released when it goes away.

use crate::detail::ArticleView;

/// What dismissed the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissTrigger {
    Escape,
    OutsideClick,
}

/// Side effect on the background listing's scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollEffect {
    Lock,
    Unlock,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OverlayState {
    #[default]
    Hidden,
    Visible(Box<ArticleView>),
}

impl OverlayState {
    pub fn is_visible(&self) -> bool {
        matches!(self, OverlayState::Visible(_))
    }

    pub fn article(&self) -> Option<&ArticleView> {
        match self {
            OverlayState::Visible(view) => Some(view.as_ref()),
            OverlayState::Hidden => None,
        }
    }

    /// Show `view`. Locks scrolling only on the hidden -> visible edge.
    pub fn open(&mut self, view: ArticleView) -> Option<ScrollEffect> {
        let was_visible = self.is_visible();
        *self = OverlayState::Visible(Box::new(view));
        if was_visible { None } else { Some(ScrollEffect::Lock) }
    }

    /// Hide the overlay. Dismissing an already hidden overlay does nothing.
    pub fn dismiss(&mut self, trigger: DismissTrigger) -> Option<ScrollEffect> {
        if !self.is_visible() {
            return None;
        }
        tracing::debug!(?trigger, "overlay dismissed");
        *self = OverlayState::Hidden;
        Some(ScrollEffect::Unlock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::sample;

    fn view(id: i64, title: &str) -> ArticleView {
        let post = sample(id, title, "summary", "Space", "2024-01-01");
        ArticleView::from_post(&post, "http://localhost:5500", "Daily Science")
    }

    #[test]
    fn test_starts_hidden() {
        let overlay = OverlayState::default();
        assert!(!overlay.is_visible());
        assert!(overlay.article().is_none());
    }

    #[test]
    fn test_open_then_dismiss() {
        let mut overlay = OverlayState::default();
        assert_eq!(overlay.open(view(1, "Mars Rover")), Some(ScrollEffect::Lock));
        assert!(overlay.is_visible());

        assert_eq!(overlay.dismiss(DismissTrigger::Escape), Some(ScrollEffect::Unlock));
        assert!(!overlay.is_visible());
    }

    #[test]
    fn test_open_a_then_b_shows_only_b() {
        let mut overlay = OverlayState::default();
        overlay.open(view(1, "Mars Rover"));
        assert_eq!(overlay.open(view(2, "Ocean Ph")), None);

        let shown = overlay.article().unwrap();
        assert_eq!(shown.id, 2);
        assert_eq!(shown.title, "Ocean Ph");
        assert!(!shown.page_title.contains("Mars"));
    }

    #[test]
    fn test_dismiss_when_hidden_is_noop() {
        let mut overlay = OverlayState::default();
        assert_eq!(overlay.dismiss(DismissTrigger::OutsideClick), None);
        assert_eq!(overlay, OverlayState::Hidden);
    }

    #[test]
    fn test_outside_click_dismisses() {
        let mut overlay = OverlayState::default();
        overlay.open(view(1, "Mars Rover"));
        assert_eq!(overlay.dismiss(DismissTrigger::OutsideClick), Some(ScrollEffect::Unlock));
        assert_eq!(overlay.dismiss(DismissTrigger::Escape), None);
    }
}
