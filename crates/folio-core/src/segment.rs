//! Body zone segmentation.
//!
//! Transcript pages split into question/answer turns on speaker markers,
//! cable traffic splits into numbered claims, and everything else falls back
//! to blank-line paragraphs. Whatever the strategy, segments partition the
//! body: concatenating segment texts in id order reproduces the body zone
//! exactly.

use crate::doc_type::DocType;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Semantic label of a body segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentLabel {
    /// Text preceding the first speaker marker in a transcript.
    Intro,
    Question,
    Answer,
    /// A numbered cable paragraph.
    Claim,
    Paragraph,
}

/// One labeled slice of the body zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodySegment {
    /// Sequential, 0-based.
    pub id: usize,
    pub label: SegmentLabel,
    /// Speaker surname for transcript turns, `Item <n>` for cable claims,
    /// empty otherwise.
    pub speaker: String,
    pub text: String,
}

/// Surnames that mark a question when they take the floor: Commission
/// counsel plus the commissioners who examined witnesses directly.
const QUESTIONER_ROSTER: &[&str] = &[
    "RANKIN", "JENNER", "LIEBELER", "BALL", "BELIN", "SPECTER", "REDLICH", "STERN", "COLEMAN",
    "SLAWSON", "WILLENS", "GOLDBERG", "DULLES", "MCCLOY", "CHAIRMAN",
];

// One combined marker pattern: a titled surname ("Mr. RANKIN."), the
// chairman, or a bare Q. / A. at the start of a line.
static RE_SPEAKER_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:(?:Mr|Mrs|Ms|Dr)\.\s+([A-Za-z]+)\.|The\s+(Chairman)\.|([QA])\.\s)",
    )
    .expect("valid speaker marker regex")
});

static RE_NUMBERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*(\d{1,3})\.\s").expect("valid numbered marker regex"));

static RE_PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n)+").expect("valid paragraph break regex"));

/// Segment the body zone for the given document type.
///
/// An empty body yields no segments. Otherwise the strategy is picked by
/// type: Q&A for transcripts, numbered claims for cables, paragraphs for
/// everything else, with each strategy degrading to a single paragraph
/// segment when its markers are absent.
#[must_use]
pub fn segment_body(body: &str, doc_type: DocType) -> Vec<BodySegment> {
    if body.is_empty() {
        return Vec::new();
    }
    if doc_type.is_transcript() {
        segment_qa(body)
    } else if doc_type.is_cable() {
        segment_numbered(body)
    } else {
        segment_paragraphs(body)
    }
}

/// Question/answer segmentation on speaker markers.
fn segment_qa(body: &str) -> Vec<BodySegment> {
    struct Marker {
        start: usize,
        speaker: String,
        is_question: bool,
    }

    let markers: Vec<Marker> = RE_SPEAKER_MARKER
        .captures_iter(body)
        .map(|caps| {
            let whole = caps.get(0).expect("match always has group 0");
            if let Some(name) = caps.get(1).or_else(|| caps.get(2)) {
                let surname = name.as_str().to_uppercase();
                let is_question = QUESTIONER_ROSTER.contains(&surname.as_str());
                Marker { start: whole.start(), speaker: surname, is_question }
            } else {
                let qa = caps.get(3).expect("bare marker group").as_str().to_uppercase();
                Marker { start: whole.start(), is_question: qa == "Q", speaker: qa }
            }
        })
        .collect();

    if markers.is_empty() {
        return vec![BodySegment {
            id: 0,
            label: SegmentLabel::Paragraph,
            speaker: String::new(),
            text: body.to_string(),
        }];
    }

    let mut segments = Vec::new();
    if markers[0].start > 0 {
        segments.push(BodySegment {
            id: 0,
            label: SegmentLabel::Intro,
            speaker: String::new(),
            text: body[..markers[0].start].to_string(),
        });
    }
    for (i, marker) in markers.iter().enumerate() {
        let end = markers.get(i + 1).map_or(body.len(), |next| next.start);
        segments.push(BodySegment {
            id: segments.len(),
            label: if marker.is_question {
                SegmentLabel::Question
            } else {
                SegmentLabel::Answer
            },
            speaker: marker.speaker.clone(),
            text: body[marker.start..end].to_string(),
        });
    }
    segments
}

/// Numbered-block segmentation for cable traffic.
fn segment_numbered(body: &str) -> Vec<BodySegment> {
    let markers: Vec<(usize, String)> = RE_NUMBERED_MARKER
        .captures_iter(body)
        .map(|caps| {
            let whole = caps.get(0).expect("match always has group 0");
            let number = caps.get(1).expect("number group").as_str().to_string();
            (whole.start(), number)
        })
        .collect();

    if markers.is_empty() {
        return segment_paragraphs(body);
    }

    let mut segments = Vec::new();
    if markers[0].0 > 0 {
        segments.push(BodySegment {
            id: 0,
            label: SegmentLabel::Intro,
            speaker: String::new(),
            text: body[..markers[0].0].to_string(),
        });
    }
    for (i, (start, number)) in markers.iter().enumerate() {
        let end = markers.get(i + 1).map_or(body.len(), |next| next.0);
        segments.push(BodySegment {
            id: segments.len(),
            label: SegmentLabel::Claim,
            speaker: format!("Item {number}"),
            text: body[*start..end].to_string(),
        });
    }
    segments
}

/// Blank-line paragraph segmentation.
///
/// Separator runs stay attached to the preceding paragraph's text so that
/// concatenation reconstructs the body exactly; whitespace-only blocks merge
/// into their neighbor instead of becoming segments.
fn segment_paragraphs(body: &str) -> Vec<BodySegment> {
    let mut pieces: Vec<String> = Vec::new();
    let mut last = 0;
    for sep in RE_PARAGRAPH_BREAK.find_iter(body) {
        pieces.push(body[last..sep.end()].to_string());
        last = sep.end();
    }
    if last < body.len() {
        pieces.push(body[last..].to_string());
    }

    // Merge whitespace-only pieces into the previous paragraph.
    let mut merged: Vec<String> = Vec::new();
    for piece in pieces {
        if piece.trim().is_empty() {
            if let Some(prev) = merged.last_mut() {
                prev.push_str(&piece);
            } else {
                merged.push(piece);
            }
        } else if merged.last().is_some_and(|p| p.trim().is_empty()) {
            // Leading whitespace block attaches to the first real paragraph.
            let lead = merged.pop().expect("checked non-empty");
            merged.push(format!("{lead}{piece}"));
        } else {
            merged.push(piece);
        }
    }

    merged
        .into_iter()
        .enumerate()
        .map(|(id, text)| BodySegment {
            id,
            label: SegmentLabel::Paragraph,
            speaker: String::new(),
            text,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejoin(segments: &[BodySegment]) -> String {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_qa_segmentation() {
        let body = "Mr. RANKIN. Will you state your name for the record?\n\
                    Mrs. OSWALD. Marina Nicolaevna Oswald.\n";
        let segments = segment_body(body, DocType::WcTestimony);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].label, SegmentLabel::Question);
        assert_eq!(segments[0].speaker, "RANKIN");
        assert_eq!(segments[1].label, SegmentLabel::Answer);
        assert_eq!(segments[1].speaker, "OSWALD");
        assert_eq!(rejoin(&segments), body);
    }

    #[test]
    fn test_qa_intro_before_first_marker() {
        let body = "TESTIMONY RESUMED AT 2 P.M.\n\
                    Mr. JENNER. Where were you employed?\n\
                    Mr. FRAZIER. At the Texas School Book Depository.\n";
        let segments = segment_body(body, DocType::WcDeposition);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].label, SegmentLabel::Intro);
        assert_eq!(segments[1].label, SegmentLabel::Question);
        assert_eq!(segments[2].label, SegmentLabel::Answer);
        assert_eq!(segments[2].speaker, "FRAZIER");
        assert_eq!(rejoin(&segments), body);
    }

    #[test]
    fn test_qa_bare_markers() {
        let body = "Q. Did you see the rifle?\nA. I did not.\n";
        let segments = segment_body(body, DocType::WcAffidavit);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].label, SegmentLabel::Question);
        assert_eq!(segments[0].speaker, "Q");
        assert_eq!(segments[1].label, SegmentLabel::Answer);
        assert_eq!(segments[1].speaker, "A");
    }

    #[test]
    fn test_qa_chairman_is_question() {
        let body = "The Chairman. The Commission will come to order.\n\
                    Mr. McCLOY. I have one question.\n\
                    Mrs. PAINE. Certainly.\n";
        let segments = segment_body(body, DocType::WcTestimony);
        assert_eq!(segments[0].label, SegmentLabel::Question);
        assert_eq!(segments[0].speaker, "CHAIRMAN");
        assert_eq!(segments[1].label, SegmentLabel::Question);
        assert_eq!(segments[1].speaker, "MCCLOY");
        assert_eq!(segments[2].label, SegmentLabel::Answer);
    }

    #[test]
    fn test_qa_without_markers_is_single_paragraph() {
        let body = "The witness provided a narrative account without any\nformal examination.";
        let segments = segment_body(body, DocType::WcTestimony);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].label, SegmentLabel::Paragraph);
        assert_eq!(segments[0].text, body);
    }

    #[test]
    fn test_numbered_claims() {
        let body = "1. ON 1 OCTOBER 1963 A RELIABLE SOURCE REPORTED CONTACT.\n\
                    2. SOURCE STATED THE AMERICAN IDENTIFIED HIMSELF.\n\
                    3. NO FURTHER CONTACT OBSERVED.\n";
        let segments = segment_body(body, DocType::CiaCable);
        assert_eq!(segments.len(), 3);
        for (i, segment) in segments.iter().enumerate() {
            assert_eq!(segment.label, SegmentLabel::Claim);
            assert_eq!(segment.speaker, format!("Item {}", i + 1));
        }
        assert_eq!(rejoin(&segments), body);
    }

    #[test]
    fn test_cable_without_numbers_falls_back_to_paragraphs() {
        let body = "REF MEXI 7024.\n\nNO TRAFFIC TO REPORT.";
        let segments = segment_body(body, DocType::CiaCable);
        assert_eq!(segments.len(), 2);
        assert!(segments.iter().all(|s| s.label == SegmentLabel::Paragraph));
        assert_eq!(rejoin(&segments), body);
    }

    #[test]
    fn test_paragraph_segmentation() {
        let body = "First paragraph of the memo.\n\nSecond paragraph with more\ndetail.\n\nThird.";
        let segments = segment_body(body, DocType::Memo);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].id, 0);
        assert_eq!(segments[2].id, 2);
        assert!(segments.iter().all(|s| s.label == SegmentLabel::Paragraph));
        assert_eq!(rejoin(&segments), body);
    }

    #[test]
    fn test_paragraph_roundtrip_with_ragged_blank_lines() {
        let body = "\n\nLeading blanks.\n\n\nMiddle.\n \nTrailing.\n\n";
        let segments = segment_body(body, DocType::Letter);
        assert_eq!(rejoin(&segments), body);
        assert!(segments.iter().all(|s| !s.text.trim().is_empty()));
    }

    #[test]
    fn test_empty_body_yields_no_segments() {
        assert!(segment_body("", DocType::Memo).is_empty());
        assert!(segment_body("", DocType::WcTestimony).is_empty());
    }

    #[test]
    fn test_ids_are_sequential() {
        let body = "Q. One?\nA. Yes.\nQ. Two?\nA. No.\n";
        let segments = segment_body(body, DocType::WcTestimony);
        for (i, segment) in segments.iter().enumerate() {
            assert_eq!(segment.id, i);
        }
    }
}
