//! Utility functions for logging, file system checks and browser hand-off.
//!
//! This module provides helper functions used throughout the application:
//! - String truncation for log previews of response bodies
//! - File system validation for output directories
//! - Opening an article link in the user's browser

use std::error::Error;
use std::fs as stdfs;
use std::process::{Command, Stdio};
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (backing off to a character
/// boundary) with an ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then writes and removes a
/// probe file.
///
/// # Errors
///
/// Returns an error if the directory can't be created or written to.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    // Sync std fs has the simpler error surface here.
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}

/// Hand `link` to the platform's default URL opener.
///
/// The link is only parsed here, when it's about to be used.
///
/// # Errors
///
/// Returns an error if `link` isn't an http(s) URL or the opener can't be
/// started.
#[instrument(level = "info", skip_all, fields(%link))]
pub fn open_in_browser(link: &str) -> Result<(), Box<dyn Error>> {
    let url = Url::parse(link)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("refusing to open non-web URL: {url}").into());
    }

    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        Command::new("xdg-open")
    };

    command
        .arg(url.as_str())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    info!("Opened article in browser");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundary() {
        // 'é' is two bytes; cutting at 3 would split the second one.
        let result = truncate_for_log("éééé", 3);
        assert!(result.starts_with("é…"));
        assert!(result.contains("(+6 bytes)"));
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_missing() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("a").join("b");
        let target = target.to_str().unwrap();

        ensure_writable_dir(target).await.unwrap();
        assert!(std::path::Path::new(target).is_dir());
        assert!(!std::path::Path::new(&format!("{target}/..__probe_write__")).exists());
    }

    #[test]
    fn test_open_in_browser_rejects_bad_links() {
        assert!(open_in_browser("not a url").is_err());
        assert!(open_in_browser("file:///etc/passwd").is_err());
    }
}
