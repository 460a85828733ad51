//! Document type identifiers for archival page classification.
//!
//! The set is closed on purpose: fingerprint tables, zone configurations, and
//! field rules are keyed by variant, so an unmapped type is a compile-time
//! hole rather than a runtime surprise.

use serde::{Deserialize, Serialize};

/// Supported document type identifiers.
///
/// Content variants cover the primary-source categories found in mid-century
/// investigative archives; structural variants mark non-substantive pages
/// (blank sheets, tables of contents, index pages, cover sheets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocType {
    /// FBI FD-302 interview report
    #[serde(rename = "FBI_302")]
    Fbi302,
    /// NARA record identification form (RIF sheet)
    NaraRif,
    /// CIA field cable
    CiaCable,
    /// CIA 201 personality file material
    #[serde(rename = "CIA_201")]
    Cia201,
    /// Interoffice memorandum
    Memo,
    /// Correspondence
    Letter,
    /// Warren Commission exhibit page
    WcExhibit,
    /// Warren Commission hearing testimony
    WcTestimony,
    /// Warren Commission deposition transcript
    WcDeposition,
    /// Warren Commission affidavit
    WcAffidavit,
    /// Municipal police report
    PoliceReport,
    /// Congressional committee report (HSCA and successors)
    HscaReport,
    /// Hospital or autopsy record
    MedicalRecord,
    /// Handwritten notes
    HandwrittenNotes,
    /// Signed witness statement
    WitnessStatement,
    /// Blank or near-empty page
    Blank,
    /// Table of contents
    Toc,
    /// Index page
    Index,
    /// Cover sheet
    Cover,
    /// No confident classification
    Unknown,
}

impl DocType {
    /// Every variant, in declaration order.
    ///
    /// Declaration order is load-bearing: when two types score identically,
    /// the first one in this list wins (see `classify`).
    pub const ALL: [DocType; 20] = [
        DocType::Fbi302,
        DocType::NaraRif,
        DocType::CiaCable,
        DocType::Cia201,
        DocType::Memo,
        DocType::Letter,
        DocType::WcExhibit,
        DocType::WcTestimony,
        DocType::WcDeposition,
        DocType::WcAffidavit,
        DocType::PoliceReport,
        DocType::HscaReport,
        DocType::MedicalRecord,
        DocType::HandwrittenNotes,
        DocType::WitnessStatement,
        DocType::Blank,
        DocType::Toc,
        DocType::Index,
        DocType::Cover,
        DocType::Unknown,
    ];

    /// Wire name, matching the serde representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DocType::Fbi302 => "FBI_302",
            DocType::NaraRif => "NARA_RIF",
            DocType::CiaCable => "CIA_CABLE",
            DocType::Cia201 => "CIA_201",
            DocType::Memo => "MEMO",
            DocType::Letter => "LETTER",
            DocType::WcExhibit => "WC_EXHIBIT",
            DocType::WcTestimony => "WC_TESTIMONY",
            DocType::WcDeposition => "WC_DEPOSITION",
            DocType::WcAffidavit => "WC_AFFIDAVIT",
            DocType::PoliceReport => "POLICE_REPORT",
            DocType::HscaReport => "HSCA_REPORT",
            DocType::MedicalRecord => "MEDICAL_RECORD",
            DocType::HandwrittenNotes => "HANDWRITTEN_NOTES",
            DocType::WitnessStatement => "WITNESS_STATEMENT",
            DocType::Blank => "BLANK",
            DocType::Toc => "TOC",
            DocType::Index => "INDEX",
            DocType::Cover => "COVER",
            DocType::Unknown => "UNKNOWN",
        }
    }

    /// True for page types that carry no substantive content.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            DocType::Blank | DocType::Toc | DocType::Index | DocType::Cover
        )
    }

    /// True for transcript types segmented as question/answer turns.
    #[must_use]
    pub const fn is_transcript(&self) -> bool {
        matches!(
            self,
            DocType::WcTestimony | DocType::WcDeposition | DocType::WcAffidavit
        )
    }

    /// True for cable-style types segmented as numbered claims.
    #[must_use]
    pub const fn is_cable(&self) -> bool {
        matches!(self, DocType::CiaCable)
    }
}

impl std::fmt::Display for DocType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse confidence bucket derived from a numeric confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceLabel {
    High,
    Medium,
    Low,
    Uncertain,
}

impl ConfidenceLabel {
    /// Bucket a numeric confidence: HIGH >= 0.9, MEDIUM >= 0.7, LOW >= 0.5,
    /// everything else UNCERTAIN.
    #[must_use]
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.9 {
            ConfidenceLabel::High
        } else if confidence >= 0.7 {
            ConfidenceLabel::Medium
        } else if confidence >= 0.5 {
            ConfidenceLabel::Low
        } else {
            ConfidenceLabel::Uncertain
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLabel::High => "HIGH",
            ConfidenceLabel::Medium => "MEDIUM",
            ConfidenceLabel::Low => "LOW",
            ConfidenceLabel::Uncertain => "UNCERTAIN",
        }
    }
}

impl std::fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
