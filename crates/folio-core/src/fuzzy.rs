//! Optional approximate-matching capability.
//!
//! OCR output garbles enough characters that exact regex matching alone
//! misses real headers ("FEDERAL BIJREAU OF INVESTIGATION"). The classifier
//! fallback and the entity linker both accept an injected [`FuzzyScorer`];
//! when none is supplied they degrade to exact/regex-only behavior instead
//! of erroring, so the capability can be absent without breaking anything.
//!
//! [`StrsimScorer`] is the default implementation, built on the edit-distance
//! primitives in the `strsim` crate.

use strsim::normalized_levenshtein;

/// Approximate string scoring on a 0-100 scale.
///
/// Implementations must be deterministic: the same inputs always produce the
/// same score, so classification stays a pure function.
pub trait FuzzyScorer: Send + Sync {
    /// Best similarity of `needle` against any aligned window of `haystack`,
    /// 0-100. A needle that appears verbatim scores 100.
    fn partial_ratio(&self, haystack: &str, needle: &str) -> f64;

    /// Order-insensitive token similarity of two strings, 0-100. Strings
    /// whose token sets are in a subset relation score 100.
    fn token_set_ratio(&self, a: &str, b: &str) -> f64;
}

/// Default scorer backed by `strsim::normalized_levenshtein`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrsimScorer;

impl StrsimScorer {
    #[must_use]
    pub fn new() -> Self {
        StrsimScorer
    }
}

impl FuzzyScorer for StrsimScorer {
    fn partial_ratio(&self, haystack: &str, needle: &str) -> f64 {
        let needle_chars: Vec<char> = needle.chars().collect();
        if needle_chars.is_empty() {
            return 0.0;
        }
        let hay_chars: Vec<char> = haystack.chars().collect();
        let needle_lower: String = needle_chars.iter().collect::<String>().to_lowercase();
        if hay_chars.len() <= needle_chars.len() {
            return normalized_levenshtein(&haystack.to_lowercase(), &needle_lower) * 100.0;
        }

        // Windows are anchored at word starts. OCR noise shifts characters
        // within words, not the positions where words begin, so this keeps
        // the scan linear in the number of words rather than characters.
        let mut best: f64 = 0.0;
        for start in word_starts(&hay_chars) {
            let end = (start + needle_chars.len()).min(hay_chars.len());
            let window: String = hay_chars[start..end].iter().collect::<String>().to_lowercase();
            let score = normalized_levenshtein(&window, &needle_lower) * 100.0;
            if score > best {
                best = score;
                if best >= 100.0 {
                    break;
                }
            }
        }
        best
    }

    fn token_set_ratio(&self, a: &str, b: &str) -> f64 {
        let tokens_a = token_set(a);
        let tokens_b = token_set(b);
        if tokens_a.is_empty() || tokens_b.is_empty() {
            return 0.0;
        }

        let intersection: Vec<&String> = tokens_a.intersection(&tokens_b).collect();
        let only_a: Vec<&String> = tokens_a.difference(&tokens_b).collect();
        let only_b: Vec<&String> = tokens_b.difference(&tokens_a).collect();

        // One side's tokens fully contained in the other's is a perfect
        // token-set match ("Marina Oswald" vs "Marina Nicolaevna Oswald").
        if !intersection.is_empty() && (only_a.is_empty() || only_b.is_empty()) {
            return 100.0;
        }

        let joined = |tokens: &[&String]| -> String {
            let mut sorted: Vec<&str> = tokens.iter().map(|t| t.as_str()).collect();
            sorted.sort_unstable();
            sorted.join(" ")
        };
        let base = joined(&intersection);
        let with_a = if base.is_empty() {
            joined(&only_a)
        } else {
            format!("{base} {}", joined(&only_a))
        };
        let with_b = if base.is_empty() {
            joined(&only_b)
        } else {
            format!("{base} {}", joined(&only_b))
        };

        let mut best = normalized_levenshtein(&with_a, &with_b);
        if !base.is_empty() {
            best = best
                .max(normalized_levenshtein(&base, &with_a))
                .max(normalized_levenshtein(&base, &with_b));
        }
        best * 100.0
    }
}

/// Indices where a word begins (first char, or alphanumeric after
/// non-alphanumeric).
fn word_starts(chars: &[char]) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut in_word = false;
    for (i, c) in chars.iter().enumerate() {
        let is_word = c.is_alphanumeric();
        if is_word && !in_word {
            starts.push(i);
        }
        in_word = is_word;
    }
    starts
}

fn token_set(s: &str) -> std::collections::BTreeSet<String> {
    s.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
