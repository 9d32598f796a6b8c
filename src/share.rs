use crate::error::BlogError;
use std::io::Write;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use url::Url;

const FACEBOOK_SHARER: &str = "https://www.facebook.com/sharer/sharer.php";
const TWITTER_INTENT: &str = "https://twitter.com/intent/tweet";

/// How long a status notification stays on screen.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

pub const COPY_SUCCESS: &str = "Link copied to clipboard! ✅";

/// Address of an article page, the stand-in for the browser's current URL.
pub fn permalink(base_url: &str, id: i64) -> String {
    format!("{}/article.html?id={}", base_url.trim_end_matches('/'), id)
}

/// Social platforms with a share endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Facebook,
    Twitter,
}

impl Platform {
    pub fn label(self) -> &'static str {
        match self {
            Self::Facebook => "Facebook",
            Self::Twitter => "Twitter",
        }
    }
}

/// Build the share URL for `page`. Only Twitter carries the title.
pub fn share_url(platform: Platform, page: &str, title: &str) -> Result<Url, url::ParseError> {
    match platform {
        Platform::Facebook => Url::parse_with_params(FACEBOOK_SHARER, &[("u", page)]),
        Platform::Twitter => Url::parse_with_params(TWITTER_INTENT, &[("url", page), ("text", title)]),
    }
}

/// Side effects of the share actions, kept behind a trait so the
/// application state can be driven without a desktop session.
pub trait Launcher {
    /// Open `url` in a new browser window.
    fn open(&self, url: &str) -> Result<(), BlogError>;
    /// Write `text` to the system clipboard.
    fn copy(&self, text: &str) -> Result<(), BlogError>;
}

/// Launcher backed by the platform's opener and clipboard tools.
pub struct SystemLauncher;

#[cfg(target_os = "macos")]
const OPENER: &str = "open";
#[cfg(not(target_os = "macos"))]
const OPENER: &str = "xdg-open";

const CLIPBOARD_TOOLS: [(&str, &[&str]); 3] = [
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("pbcopy", &[]),
];

impl Launcher for SystemLauncher {
    fn open(&self, url: &str) -> Result<(), BlogError> {
        Command::new(OPENER)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|e| BlogError::Opener(format!("{}: {}", OPENER, e)))
    }

    fn copy(&self, text: &str) -> Result<(), BlogError> {
        let mut last_error = String::from("no clipboard tool found");
        for (tool, args) in CLIPBOARD_TOOLS {
            let child = Command::new(tool)
                .args(args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn();
            let mut child = match child {
                Ok(child) => child,
                Err(e) => {
                    last_error = format!("{}: {}", tool, e);
                    continue;
                }
            };
            if let Some(mut stdin) = child.stdin.take() {
                stdin
                    .write_all(text.as_bytes())
                    .map_err(|e| BlogError::Clipboard(format!("{}: {}", tool, e)))?;
            }
            let status = child
                .wait()
                .map_err(|e| BlogError::Clipboard(format!("{}: {}", tool, e)))?;
            if status.success() {
                return Ok(());
            }
            last_error = format!("{} exited with {}", tool, status);
        }
        Err(BlogError::Clipboard(last_error))
    }
}

/// Transient message for the status line.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    shown_at: Instant,
}

impl Notification {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= NOTIFICATION_TTL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permalink_trims_trailing_slash() {
        assert_eq!(permalink("https://blog.example.com/", 4), "https://blog.example.com/article.html?id=4");
        assert_eq!(permalink("http://localhost:5500", 1), "http://localhost:5500/article.html?id=1");
    }

    #[test]
    fn test_facebook_share_url_encodes_page() {
        let url = share_url(Platform::Facebook, "http://localhost:5500/article.html?id=1", "ignored").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.facebook.com/sharer/sharer.php?u=http%3A%2F%2Flocalhost%3A5500%2Farticle.html%3Fid%3D1"
        );
    }

    #[test]
    fn test_twitter_share_url_carries_title() {
        let url = share_url(Platform::Twitter, "http://x.test/article.html?id=2", "Ocean & Ph").unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(url.host_str(), Some("twitter.com"));
        assert_eq!(url.path(), "/intent/tweet");
        assert_eq!(
            pairs,
            vec![
                ("url".to_string(), "http://x.test/article.html?id=2".to_string()),
                ("text".to_string(), "Ocean & Ph".to_string()),
            ]
        );
        assert!(url.as_str().contains("text=Ocean+%26+Ph"));
    }

    #[test]
    fn test_notification_expiry() {
        let note = Notification::new(COPY_SUCCESS);
        assert!(!note.is_expired(Instant::now()));
        assert!(note.is_expired(Instant::now() + NOTIFICATION_TTL));
    }
}
