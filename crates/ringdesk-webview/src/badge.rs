//! Unread count derived from the page title.
//!
//! The hosted app prefixes its document title with `(N)` when there are
//! unread messages; no prefix means zero.

use std::sync::LazyLock;

use regex::Regex;

static COUNT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\((\d+)\)").unwrap());

/// Extract the unread count from a document title.
pub fn unread_from_title(title: &str) -> u32 {
    COUNT_RE
        .captures(title)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}
