//! Document type classification.
//!
//! Three stages, cheapest first:
//!
//! 1. A structural pre-check catches near-empty pages before any pattern
//!    work runs.
//! 2. Weighted regex fingerprints are scored against a combined sample
//!    (header lines, footer lines, leading body characters) and normalized
//!    per type.
//! 3. When the regex verdict is weak and an approximate scorer is available,
//!    canonical reference phrases are fuzzy-matched and may confirm, boost,
//!    or override the regex verdict.
//!
//! Classification is a pure function of its input text: same text, same
//! result, on every call and from any thread.

use crate::doc_type::{ConfidenceLabel, DocType};
use crate::fuzzy::{FuzzyScorer, StrsimScorer};
use crate::registry::{canonical_phrases, compiled_fingerprints};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

/// Header lines included in the scoring sample by default.
pub const DEFAULT_HEADER_LINES: usize = 25;
/// Footer lines included in the scoring sample.
const FOOTER_SAMPLE_LINES: usize = 15;
/// Leading body characters included in the scoring sample.
const BODY_SAMPLE_CHARS: usize = 3000;
/// Below this normalized score the verdict is forced to `Unknown`.
const MIN_CONFIDENCE: f64 = 0.10;
/// Below this the fuzzy fallback runs (when a scorer is available).
const FUZZY_TRIGGER: f64 = 0.5;
/// Minimum per-phrase partial-ratio for a canonical phrase to count.
const PHRASE_CUTOFF: f64 = 70.0;
/// Stored header sample is truncated to this many characters.
const HEADER_SAMPLE_STORED: usize = 500;
/// Pages shorter than this are candidates for the blank short-circuit.
const BLANK_MAX_CHARS: usize = 100;

static RE_ONLY_DIGITS_WS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s\d]*$").expect("valid digits/ws regex"));
static RE_BLANK_WORDING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:blank|empty|no text|intentionally left blank)\b")
        .expect("valid blank wording regex")
});
static RE_BARE_PAGE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*-?\s*(?:page\s+)?\d{1,4}\s*-?\s*$").expect("valid page number regex")
});

/// Result of document type classification.
///
/// Immutable once constructed; `confidence` always reflects the normalized
/// weighted-sum score that produced `doc_type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub doc_type: DocType,
    /// Normalized score in `[0, 1]`.
    pub confidence: f64,
    /// The fingerprint patterns (or `[fuzzy]`-tagged phrases) that matched
    /// for the winning type only.
    pub matched_patterns: Vec<String>,
    /// First header lines of the input, truncated for storage.
    pub header_sample: String,
}

impl ClassificationResult {
    /// Coarse HIGH/MEDIUM/LOW/UNCERTAIN bucket for `confidence`.
    #[must_use]
    pub fn confidence_label(&self) -> ConfidenceLabel {
        ConfidenceLabel::from_confidence(self.confidence)
    }

    fn unknown(header_sample: String) -> Self {
        ClassificationResult {
            doc_type: DocType::Unknown,
            confidence: 0.0,
            matched_patterns: Vec::new(),
            header_sample,
        }
    }
}

/// Classify with the default header window and the default fuzzy scorer.
#[must_use]
pub fn classify(text: &str) -> ClassificationResult {
    classify_with(text, DEFAULT_HEADER_LINES, Some(&StrsimScorer))
}

/// Classify with an explicit header window and an optional fuzzy capability.
///
/// Passing `None` for `fuzzy` disables the fallback stage entirely; the
/// result is then determined by regex fingerprints alone.
#[must_use]
pub fn classify_with(
    text: &str,
    header_lines: usize,
    fuzzy: Option<&dyn FuzzyScorer>,
) -> ClassificationResult {
    // Structural short-circuit: near-empty pages skip fingerprint scoring.
    if let Some(blank) = detect_blank(text) {
        return blank;
    }

    let header_sample = first_lines(text, header_lines);
    let footer_sample = last_lines(text, FOOTER_SAMPLE_LINES);
    let body_sample: String = text.chars().take(BODY_SAMPLE_CHARS).collect();
    let combined = format!("{header_sample}\n{footer_sample}\n{body_sample}");

    let stored_sample: String = header_sample.chars().take(HEADER_SAMPLE_STORED).collect();

    // One generic loop over the fingerprint tables. Strict `>` keeps the
    // first declared type on ties.
    let mut best_type = DocType::Unknown;
    let mut best_score = 0.0_f64;
    let mut best_matches: Vec<String> = Vec::new();
    for entry in compiled_fingerprints() {
        if entry.max_weight == 0 {
            continue;
        }
        let mut score = 0u32;
        let mut matched = Vec::new();
        for pattern in &entry.patterns {
            if pattern.regex.is_match(&combined) {
                score += pattern.weight;
                matched.push(pattern.source.to_string());
            }
        }
        let normalized = f64::from(score) / f64::from(entry.max_weight);
        if normalized > best_score {
            best_score = normalized;
            best_type = entry.doc_type;
            best_matches = matched;
        }
    }

    let mut result = ClassificationResult {
        doc_type: best_type,
        confidence: best_score,
        matched_patterns: best_matches,
        header_sample: stored_sample.clone(),
    };

    if result.confidence < FUZZY_TRIGGER {
        if let Some(scorer) = fuzzy {
            result = apply_fuzzy_fallback(result, &combined, scorer);
        }
    }

    // Thresholding runs after the fallback has had its chance.
    if result.confidence < MIN_CONFIDENCE {
        debug!(
            score = result.confidence,
            "score below threshold, classifying as UNKNOWN"
        );
        return ClassificationResult::unknown(stored_sample);
    }

    result
}

/// Normalized fingerprint score for every document type, highest first.
///
/// Intended for review tooling and debugging; the blank short-circuit and
/// fuzzy fallback do not participate here.
#[must_use]
pub fn all_scores(text: &str, header_lines: usize) -> Vec<(DocType, f64)> {
    let header_sample = first_lines(text, header_lines);
    let footer_sample = last_lines(text, FOOTER_SAMPLE_LINES);
    let body_sample: String = text.chars().take(BODY_SAMPLE_CHARS).collect();
    let combined = format!("{header_sample}\n{footer_sample}\n{body_sample}");

    let mut scores: Vec<(DocType, f64)> = compiled_fingerprints()
        .iter()
        .map(|entry| {
            if entry.max_weight == 0 {
                return (entry.doc_type, 0.0);
            }
            let score: u32 = entry
                .patterns
                .iter()
                .filter(|p| p.regex.is_match(&combined))
                .map(|p| p.weight)
                .sum();
            (entry.doc_type, f64::from(score) / f64::from(entry.max_weight))
        })
        .collect();
    scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scores
}

/// Near-empty page detection.
///
/// Pages with fewer than 100 stripped characters that look empty (only
/// whitespace and digits, explicit blank/empty wording, or a bare page
/// number) classify as `Blank` at 0.95 without any fingerprint work.
fn detect_blank(text: &str) -> Option<ClassificationResult> {
    let stripped = text.trim();
    if stripped.chars().count() >= BLANK_MAX_CHARS {
        return None;
    }
    let empty_like = RE_ONLY_DIGITS_WS.is_match(stripped)
        || RE_BLANK_WORDING.is_match(stripped)
        || RE_BARE_PAGE_NUMBER.is_match(stripped);
    if !empty_like {
        return None;
    }
    Some(ClassificationResult {
        doc_type: DocType::Blank,
        confidence: 0.95,
        matched_patterns: vec![format!(
            "structural:near-empty ({} chars)",
            stripped.chars().count()
        )],
        header_sample: stripped.to_string(),
    })
}

/// Fuzzy fallback over the canonical phrase registry.
///
/// Scores each type's phrases with `partial_ratio`; phrases at or above the
/// cutoff contribute `(score/100) * weight`, normalized by the type's
/// maximum phrase weight. The fuzzy winner then either confirms the regex
/// verdict, overrides it, or leaves it untouched.
fn apply_fuzzy_fallback(
    fingerprint: ClassificationResult,
    combined: &str,
    scorer: &dyn FuzzyScorer,
) -> ClassificationResult {
    let mut best_type = DocType::Unknown;
    let mut best_score = 0.0_f64;
    let mut best_matches: Vec<String> = Vec::new();

    for doc_type in DocType::ALL {
        let phrases = canonical_phrases(doc_type);
        let max_weight: u32 = phrases.iter().map(|p| p.weight).sum();
        if max_weight == 0 {
            continue;
        }
        let mut weighted = 0.0_f64;
        let mut matched = Vec::new();
        for phrase in phrases {
            let score = scorer.partial_ratio(combined, phrase.text);
            if score >= PHRASE_CUTOFF {
                weighted += (score / 100.0) * f64::from(phrase.weight);
                matched.push(format!("[fuzzy] {}", phrase.text));
            }
        }
        let normalized = weighted / f64::from(max_weight);
        if normalized > best_score {
            best_score = normalized;
            best_type = doc_type;
            best_matches = matched;
        }
    }

    if best_score <= 0.0 {
        return fingerprint;
    }

    if best_type == fingerprint.doc_type {
        // Fuzzy agrees: keep the type, take the stronger confidence.
        let confidence = fingerprint.confidence.max(best_score * 0.9);
        let mut matched_patterns = fingerprint.matched_patterns;
        matched_patterns.extend(best_matches);
        debug!(%best_type, confidence, "fuzzy fallback confirmed fingerprint verdict");
        return ClassificationResult {
            doc_type: best_type,
            confidence,
            matched_patterns,
            header_sample: fingerprint.header_sample,
        };
    }

    if best_score - fingerprint.confidence > 0.15 && best_score >= 0.3 {
        // Fuzzy disagrees decisively: override.
        debug!(
            from = %fingerprint.doc_type,
            to = %best_type,
            "fuzzy fallback overrode fingerprint verdict"
        );
        return ClassificationResult {
            doc_type: best_type,
            confidence: best_score * 0.85,
            matched_patterns: best_matches,
            header_sample: fingerprint.header_sample,
        };
    }

    fingerprint
}

fn first_lines(text: &str, n: usize) -> String {
    text.split('\n').take(n).collect::<Vec<_>>().join("\n")
}

fn last_lines(text: &str, n: usize) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join("\n")
}
