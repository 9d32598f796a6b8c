use crate::error::BlogError;
use crate::post::Post;
use std::fmt;
use std::path::PathBuf;

/// Where the feed comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostSource {
    Url(String),
    File(PathBuf),
}

impl PostSource {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.starts_with("http://") || value.starts_with("https://") {
            PostSource::Url(value.to_string())
        } else {
            PostSource::File(PathBuf::from(value))
        }
    }
}

impl fmt::Display for PostSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostSource::Url(url) => write!(f, "{}", url),
            PostSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetch the whole feed once. No retry, no partial results.
pub async fn fetch_posts(source: &PostSource) -> Result<Vec<Post>, BlogError> {
    let bytes = match source {
        PostSource::Url(url) => {
            let response = reqwest::get(url).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(BlogError::Status { status: status.as_u16() });
            }
            response.bytes().await?.to_vec()
        }
        PostSource::File(path) => tokio::fs::read(path).await?,
    };
    let posts: Vec<Post> = serde_json::from_slice(&bytes)?;
    tracing::info!(source = %source, count = posts.len(), "feed loaded");
    Ok(posts)
}
