//! # Password Strength
//!
//! A password is good enough when it has at least [`MIN_PASSWORD_LENGTH`]
//! characters and contains a digit, an uppercase letter, a lowercase
//! letter and a character that is neither a letter nor a digit.
//!
//! Two equivalent checks are provided: one walking the characters, one
//! expressed as regular expressions.
//!
//! # Example
//! ```rust
//! use spa_file_server::utils::password::is_password_good_enough;
//!
//! assert!(is_password_good_enough("abC9#fgh"));
//! assert!(!is_password_good_enough("abC9efgh"));
//! ```
use std::sync::LazyLock;

use regex::Regex;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Checks password strength character by character.
pub fn is_password_good_enough(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(char::is_uppercase)
        && password.chars().any(char::is_lowercase)
        && password.chars().any(|c| !c.is_alphanumeric())
}

// The regex crate has no lookahead, so each rule is its own pattern.
static PASSWORD_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?s)^.{8,}$",
        r"[0-9]",
        r"\p{Uppercase}",
        r"\p{Lowercase}",
        r"[^\p{Alphabetic}\p{N}]",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("password rule must compile"))
    .collect()
});

/// Checks password strength with regular expressions.
///
/// Accepts exactly the same passwords as [`is_password_good_enough`].
pub fn is_password_good_enough_regex_version(password: &str) -> bool {
    PASSWORD_RULES.iter().all(|rule| rule.is_match(password))
}
