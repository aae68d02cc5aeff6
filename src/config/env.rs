//! # Environment Variable Utilities
//!
//! Helpers for reading environment variables with common type conversions:
//! boolean flags, numeric values and path-segment lists.
//!
//! These functions are used by configuration loading (`AppConfig`,
//! `DbConfig`).
//!
//! # Examples
//! ```rust,no_run
//! use spa_file_server::config::env::{read_flag, read_segments, read_u32_from};
//!
//! let spa = read_flag("SPA", true);
//! let max_conn = read_u32_from(|k| std::env::var(k).ok(), "DATABASE_MAX_CONN");
//! let root = read_segments("WWW_ROOT", &["www"]);
//! ```

/// Reads a boolean flag from an environment variable.
///
/// Returns `true` for any of the following case-insensitive values:
/// `"1"`, `"true"`, `"yes"`, `"on"`.
pub fn read_flag(name: &str, default: bool) -> bool {
    read_flag_from(|k| std::env::var(k).ok(), name, default)
}

/// Reads a boolean flag using a custom provider function.
///
/// # Example
/// ```rust
/// use spa_file_server::config::env::read_flag_from;
///
/// assert!(read_flag_from(|_| Some("true".into()), "SPA", false));
/// assert!(!read_flag_from(|_| Some("off".into()), "SPA", true));
/// ```
pub fn read_flag_from<F>(provider: F, name: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match provider(name) {
        Some(v) => {
            let s = v.trim().trim_matches(|c| c == '"' || c == '\'');
            matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
        }
        None => default,
    }
}

/// Reads an unsigned integer (`u32`) using a custom provider function.
///
/// Returns `None` if the value is missing or not a number.
pub fn read_u32_from<F>(provider: F, name: &str) -> Option<u32>
where
    F: Fn(&str) -> Option<String>,
{
    provider(name).and_then(|s| s.trim().parse::<u32>().ok())
}

/// Reads a list of path segments from an environment variable.
///
/// See [`read_segments_from`] for the accepted format.
pub fn read_segments(name: &str, default: &[&str]) -> Vec<String> {
    read_segments_from(|k| std::env::var(k).ok(), name, default)
}

/// Reads a list of path segments using a custom provider function.
///
/// Segments may be separated by `,` or `/`. Empty segments are dropped.
/// When the variable is missing, `default` is returned. A variable that is
/// present but empty yields no segments (the working directory itself).
///
/// # Example
/// ```rust
/// use spa_file_server::config::env::read_segments_from;
///
/// let segs = read_segments_from(|_| Some("../frontend,dist".into()), "WWW_ROOT", &[]);
/// assert_eq!(segs, vec!["..", "frontend", "dist"]);
/// ```
pub fn read_segments_from<F>(provider: F, name: &str, default: &[&str]) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    match provider(name) {
        Some(v) => v
            .split([',', '/'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        None => default.iter().map(|s| s.to_string()).collect(),
    }
}
