//! Full analysis pipeline.
//!
//! Wires the stages together in their canonical order: normalize, classify
//! (with the structural short-circuit and fuzzy fallback inside), split
//! zones, extract fields, segment the body, then link entities per segment.
//! The result is one serializable structure a review UI or feedback trainer
//! can consume.

use crate::classify::{classify_with, ClassificationResult, DEFAULT_HEADER_LINES};
use crate::doc_type::ConfidenceLabel;
use crate::entity::{EntityIndex, EntityLinker, EntityMatch};
use crate::fields::{extract_fields, ExtractionResult};
use crate::fuzzy::{FuzzyScorer, StrsimScorer};
use crate::normalize::normalize;
use crate::segment::{segment_body, BodySegment};
use crate::zones::split_zones;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A body segment with the entities linked inside it.
///
/// Entity spans are byte ranges into the segment's own text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentAnalysis {
    #[serde(flatten)]
    pub segment: BodySegment,
    pub entities: Vec<EntityMatch>,
}

/// Complete analysis of one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub classification: ClassificationResult,
    pub confidence_label: ConfidenceLabel,
    pub extraction: ExtractionResult,
    pub segments: Vec<SegmentAnalysis>,
    /// Entities seen anywhere in the body, deduplicated by registry id.
    pub linked_entities: Vec<EntityMatch>,
}

/// Analyzer configuration: header window and optional capabilities.
pub struct Analyzer<'a> {
    index: Option<&'a EntityIndex>,
    fuzzy: Option<&'a dyn FuzzyScorer>,
    header_lines: usize,
}

impl<'a> Analyzer<'a> {
    /// Analyzer with no entity registry and the default fuzzy scorer.
    #[must_use]
    pub fn new() -> Self {
        Analyzer {
            index: None,
            fuzzy: Some(&StrsimScorer),
            header_lines: DEFAULT_HEADER_LINES,
        }
    }

    /// Attach an entity registry; segments will carry linked entities.
    #[must_use]
    pub fn with_index(mut self, index: &'a EntityIndex) -> Self {
        self.index = Some(index);
        self
    }

    /// Replace or remove the approximate-matching capability.
    #[must_use]
    pub fn with_fuzzy(mut self, fuzzy: Option<&'a dyn FuzzyScorer>) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    /// Override the classifier's header sample window.
    #[must_use]
    pub fn header_lines(mut self, lines: usize) -> Self {
        self.header_lines = lines;
        self
    }

    /// Run the full pipeline on raw OCR text.
    #[must_use]
    pub fn analyze(&self, text: &str) -> DocumentAnalysis {
        let text = normalize(text);
        let classification = classify_with(&text, self.header_lines, self.fuzzy);
        debug!(doc_type = %classification.doc_type, confidence = classification.confidence, "classified");

        let extraction = extract_fields(&text, &classification);
        let zones = split_zones(&text, classification.doc_type);
        let segments = segment_body(&zones.body, classification.doc_type);

        let mut analyzed = Vec::with_capacity(segments.len());
        let mut linked_entities: Vec<EntityMatch> = Vec::new();
        let mut seen_ids = std::collections::HashSet::new();

        for segment in segments {
            let entities = match self.index {
                Some(index) => {
                    let linker = match self.fuzzy {
                        Some(scorer) => EntityLinker::with_fuzzy(index, scorer),
                        None => EntityLinker::new(index),
                    };
                    filter_speaker_matches(linker.link(&segment.text), &segment.speaker)
                }
                None => Vec::new(),
            };
            for entity in &entities {
                if let Some(id) = &entity.entity_id {
                    if seen_ids.insert(id.clone()) {
                        linked_entities.push(entity.clone());
                    }
                }
            }
            analyzed.push(SegmentAnalysis { segment, entities });
        }

        DocumentAnalysis {
            confidence_label: classification.confidence_label(),
            classification,
            extraction,
            segments: analyzed,
            linked_entities,
        }
    }
}

impl Default for Analyzer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop matches that live entirely inside the segment's speaker prefix.
///
/// A testimony turn like "Mrs. OSWALD. Marina Nicolaevna Oswald." would
/// otherwise link the surname in the speaker label as a second mention of
/// the same person.
fn filter_speaker_matches(entities: Vec<EntityMatch>, speaker: &str) -> Vec<EntityMatch> {
    if speaker.is_empty() {
        return entities;
    }
    let speaker_upper = speaker.to_uppercase();
    entities
        .into_iter()
        .filter(|e| !speaker_upper.contains(&e.matched_text.to_uppercase()))
        .collect()
}
