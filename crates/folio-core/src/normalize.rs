//! OCR text cleanup applied before any pattern work.
//!
//! Scanned documents arrive with hyphen-broken line wraps and runs of
//! whitespace left over from column layout. Normalization is deliberately
//! conservative: it only rejoins obvious wraps and collapses repeated
//! whitespace, never rewrites words.

use regex::Regex;
use std::sync::LazyLock;

static RE_HYPHEN_WRAP: LazyLock<Regex> = LazyLock::new(|| {
    // "inves-\n  tigation" -> "investigation". Requires a word character on
    // both sides so legitimate dash-at-end-of-line constructs survive.
    Regex::new(r"(\w)-[ \t]*\n[ \t]*(\w)").expect("valid hyphen wrap regex")
});
static RE_SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("valid space run regex"));
static RE_BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid blank run regex"));

/// Normalize raw OCR text: rejoin hyphen-broken line wraps, collapse runs of
/// spaces and tabs to a single space, and collapse 3+ consecutive newlines
/// to a blank line.
///
/// Pure function; idempotent on its own output.
#[must_use]
pub fn normalize(text: &str) -> String {
    let text = RE_HYPHEN_WRAP.replace_all(text, "$1$2");
    let text = RE_SPACE_RUN.replace_all(&text, " ");
    RE_BLANK_RUN.replace_all(&text, "\n\n").into_owned()
}
