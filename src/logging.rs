use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "BLOG_EXPLORER_LOG";
const LOG_FILE: &str = "blog-explorer.log";

/// Where log records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to a file in the data dir. The TUI owns the terminal.
    File,
    Stderr,
}

fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn log_path() -> Option<PathBuf> {
    crate::config::project_dirs().map(|dirs| dirs.data_local_dir().join(LOG_FILE))
}

/// Install the global subscriber. Logging is optional: if the log file
/// cannot be opened nothing is installed and the program carries on.
pub fn init(target: LogTarget, default_level: &str) {
    let builder = tracing_subscriber::fmt().with_env_filter(filter(default_level));
    match target {
        LogTarget::Stderr => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
        LogTarget::File => {
            let Some(path) = log_path() else {
                return;
            };
            if let Some(parent) = path.parent() {
                if std::fs::create_dir_all(parent).is_err() {
                    return;
                }
            }
            let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
                return;
            };
            let _ = builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_falls_back() {
        // An unparsable directive must not panic.
        let _ = filter("not a level [");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(LogTarget::Stderr, "warn");
        init(LogTarget::Stderr, "debug");
        tracing::warn!("still logging");
    }
}
