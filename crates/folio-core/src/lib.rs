//! # Folio Core
//!
//! Analysis engine for OCR text extracted from scanned archival documents.
//! Given a page of text, folio classifies it into a closed set of document
//! types, splits it into header/body/footer zones, pulls out type-specific
//! fields, segments the narrative body into labeled blocks, and links
//! mentions of known people, places, and organizations back to a reference
//! registry.
//!
//! ## Quick start
//!
//! ```rust
//! use folio_core::{classify, DocType};
//!
//! let text = "FEDERAL BUREAU OF INVESTIGATION\n\nDate of transcription 11/26/63\n\
//!             \nThe subject was interviewed at his place of employment.";
//! let result = classify(text);
//! assert_eq!(result.doc_type, DocType::Fbi302);
//! ```
//!
//! ## Full pipeline
//!
//! ```rust
//! use folio_core::{Analyzer, EntityIndex};
//!
//! let index = EntityIndex::sample();
//! let analysis = Analyzer::new().with_index(&index).analyze(
//!     "MEMORANDUM\n\nTO: File\nFROM: SAC Dallas\n\nJack Ruby was interviewed.",
//! );
//! println!("{}", serde_json::to_string_pretty(&analysis).unwrap());
//! ```
//!
//! Every operation is a pure, synchronous function of its input; the only
//! shared state is the read-only [`EntityIndex`], which is safe to use from
//! many threads at once. Malformed input never errors: unclassifiable pages
//! come back as `UNKNOWN`, unmatched fields are absent, and a body with no
//! structure becomes one paragraph segment.

pub mod analyze;
pub mod classify;
pub mod doc_type;
pub mod entity;
pub mod error;
pub mod fields;
pub mod fuzzy;
pub mod normalize;
pub mod registry;
pub mod segment;
pub mod zones;

pub use analyze::{Analyzer, DocumentAnalysis, SegmentAnalysis};
pub use classify::{all_scores, classify, classify_with, ClassificationResult, DEFAULT_HEADER_LINES};
pub use doc_type::{ConfidenceLabel, DocType};
pub use entity::{
    EntityIndex, EntityKind, EntityLinker, EntityMatch, EntityReport, MatchMethod, MatchStatus,
    RegistryRecords,
};
pub use error::{FolioError, Result};
pub use fields::{extract_fields, ExtractedField, ExtractionResult};
pub use fuzzy::{FuzzyScorer, StrsimScorer};
pub use normalize::normalize;
pub use segment::{segment_body, BodySegment, SegmentLabel};
pub use zones::{split_zones, zone_config, Zone, ZoneConfig, ZoneSplit};
