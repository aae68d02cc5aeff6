//! # Profanity Filter
//!
//! Replaces whole words from a bad-word list, ignoring case. Words that
//! only appear inside longer words (`tortoiseshell`, `doorknobs`) are
//! left alone.
//!
//! # Example
//! ```rust
//! use spa_file_server::utils::bad_words::remove_bad_words;
//!
//! assert_eq!(remove_bad_words("What the hell, Shell?", "***"), "What the ***, Shell?");
//! ```
use std::sync::LazyLock;

use regex::{NoExpand, Regex};

/// Words replaced by [`remove_bad_words`].
pub const BAD_WORDS: &[&str] = &[
    "arse", "bastard", "bitch", "bloody", "bollocks", "crap", "damn", "fuck", "fucking", "goddamn",
    "hell", "horny", "knob", "piss", "shit", "wanker",
];

/// A compiled whole-word, case-insensitive matcher for a word list.
#[derive(Clone, Debug)]
pub struct BadWordFilter {
    pattern: Option<Regex>,
}

impl BadWordFilter {
    /// Compiles a filter for `words`.
    ///
    /// # Errors
    /// Returns an error if the resulting pattern exceeds the regex size
    /// limit. Words are escaped, so their content never fails to parse.
    pub fn new<I, S>(words: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        // Longest first so a prefix never wins the alternation.
        words.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        words.dedup();

        if words.is_empty() {
            return Ok(Self { pattern: None });
        }

        let alternation = words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Replaces every bad word in `text` with `replace_with` (taken literally).
    pub fn apply(&self, text: &str, replace_with: &str) -> String {
        match &self.pattern {
            Some(p) => p.replace_all(text, NoExpand(replace_with)).into_owned(),
            None => text.to_string(),
        }
    }

    /// Returns `true` if `text` contains any bad word.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.is_match(text))
    }
}

static DEFAULT_FILTER: LazyLock<BadWordFilter> =
    LazyLock::new(|| BadWordFilter::new(BAD_WORDS).expect("bad-word list must compile"));

/// Replaces every word from [`BAD_WORDS`] in `text` with `replace_with`.
pub fn remove_bad_words(text: &str, replace_with: &str) -> String {
    DEFAULT_FILTER.apply(text, replace_with)
}
