use thiserror::Error;

/// Errors raised while loading the feed or acting on an article.
///
/// None of these are fatal to the event loop: each one degrades a single
/// container (the card list, the article page) or a single action.
#[derive(Error, Debug)]
pub enum BlogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed request failed: HTTP {status}")]
    Status { status: u16 },

    #[error("Feed parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("Could not launch browser: {0}")]
    Opener(String),
}

impl BlogError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            BlogError::Io(e) => format!("Error loading data: {}", e),
            BlogError::Http(e) => format!("Error loading data: network error ({})", e),
            BlogError::Status { status } => {
                format!("Error loading data: the server answered with HTTP {}", status)
            }
            BlogError::Parse(e) => format!("Error loading data: the feed is not valid ({})", e),
            BlogError::Config(msg) => format!("Configuration error: {}", msg),
            BlogError::Clipboard(msg) => format!("Failed to copy: {}", msg),
            BlogError::Opener(msg) => format!("Could not open share window: {}", msg),
        }
    }
}
