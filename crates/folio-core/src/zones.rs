//! Header / body / footer zone splitting.
//!
//! Archival forms put different data in different page regions (FD-302s sign
//! in the footer, RIF sheets front-load the header), so field rules target a
//! zone rather than the whole page. The split is a pure line-range partition:
//! the three zones never overlap, and joining them with newlines reconstructs
//! the original line sequence.

use crate::doc_type::DocType;
use serde::{Deserialize, Serialize};

/// Which zone a pattern searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Header,
    Body,
    Footer,
    /// Whole document, used by fallback rules.
    Any,
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::Header => "header",
            Zone::Body => "body",
            Zone::Footer => "footer",
            Zone::Any => "any",
        };
        f.write_str(name)
    }
}

/// Per-type line budget for the header and footer zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneConfig {
    pub header_lines: usize,
    pub footer_lines: usize,
}

const DEFAULT_ZONE_CONFIG: ZoneConfig = ZoneConfig {
    header_lines: 20,
    footer_lines: 10,
};

/// Zone line budgets, tuned per document type.
///
/// FD-302s carry their critical metadata (agent, file number, transcription
/// date) in a deep footer; RIF sheets are nearly all header.
#[must_use]
pub fn zone_config(doc_type: DocType) -> ZoneConfig {
    match doc_type {
        DocType::Fbi302 => ZoneConfig { header_lines: 15, footer_lines: 12 },
        DocType::NaraRif => ZoneConfig { header_lines: 30, footer_lines: 8 },
        DocType::CiaCable => ZoneConfig { header_lines: 25, footer_lines: 5 },
        DocType::Cia201 => ZoneConfig { header_lines: 20, footer_lines: 5 },
        DocType::Memo => ZoneConfig { header_lines: 15, footer_lines: 10 },
        DocType::Letter => ZoneConfig { header_lines: 10, footer_lines: 8 },
        DocType::WcExhibit => ZoneConfig { header_lines: 12, footer_lines: 5 },
        DocType::WcTestimony => ZoneConfig { header_lines: 15, footer_lines: 3 },
        DocType::WcDeposition => ZoneConfig { header_lines: 15, footer_lines: 3 },
        DocType::WcAffidavit => ZoneConfig { header_lines: 12, footer_lines: 6 },
        DocType::PoliceReport => ZoneConfig { header_lines: 15, footer_lines: 8 },
        DocType::HscaReport => ZoneConfig { header_lines: 20, footer_lines: 8 },
        DocType::MedicalRecord => ZoneConfig { header_lines: 15, footer_lines: 6 },
        DocType::WitnessStatement => ZoneConfig { header_lines: 12, footer_lines: 8 },
        _ => DEFAULT_ZONE_CONFIG,
    }
}

/// A document split into its three zones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneSplit {
    pub header: String,
    pub body: String,
    pub footer: String,
}

/// Split `text` into header/body/footer line ranges for `doc_type`.
///
/// Documents too short to hold distinct zones become all header: when the
/// total line count is at most `header_lines + footer_lines`, the whole text
/// is returned as the header and body and footer are empty. There is never a
/// partial overlap.
#[must_use]
pub fn split_zones(text: &str, doc_type: DocType) -> ZoneSplit {
    let config = zone_config(doc_type);
    let lines: Vec<&str> = text.split('\n').collect();

    if lines.len() <= config.header_lines + config.footer_lines {
        return ZoneSplit {
            header: text.to_string(),
            body: String::new(),
            footer: String::new(),
        };
    }

    let header = lines[..config.header_lines].join("\n");
    let body = lines[config.header_lines..lines.len() - config.footer_lines].join("\n");
    let footer = lines[lines.len() - config.footer_lines..].join("\n");
    ZoneSplit { header, body, footer }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_lines(n: usize) -> String {
        (0..n).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn test_split_partitions_lines() {
        let text = numbered_lines(60);
        let config = zone_config(DocType::Fbi302);
        let zones = split_zones(&text, DocType::Fbi302);

        assert_eq!(zones.header.split('\n').count(), config.header_lines);
        assert_eq!(zones.footer.split('\n').count(), config.footer_lines);
        assert_eq!(
            zones.header.split('\n').count()
                + zones.body.split('\n').count()
                + zones.footer.split('\n').count(),
            60
        );
    }

    #[test]
    fn test_split_reconstructs_original() {
        let text = numbered_lines(60);
        let zones = split_zones(&text, DocType::Memo);
        let rejoined = format!("{}\n{}\n{}", zones.header, zones.body, zones.footer);
        assert_eq!(rejoined, text);
    }

    #[test]
    fn test_short_document_is_all_header() {
        let text = numbered_lines(10);
        let zones = split_zones(&text, DocType::Fbi302);
        assert_eq!(zones.header, text);
        assert!(zones.body.is_empty());
        assert!(zones.footer.is_empty());
    }

    #[test]
    fn test_boundary_document_is_all_header() {
        // Exactly header_lines + footer_lines is still degenerate.
        let config = zone_config(DocType::Fbi302);
        let text = numbered_lines(config.header_lines + config.footer_lines);
        let zones = split_zones(&text, DocType::Fbi302);
        assert_eq!(zones.header, text);
        assert!(zones.body.is_empty());
    }

    #[test]
    fn test_unmapped_type_uses_default() {
        assert_eq!(zone_config(DocType::Unknown), super::DEFAULT_ZONE_CONFIG);
        assert_eq!(zone_config(DocType::Blank), super::DEFAULT_ZONE_CONFIG);
    }

    #[test]
    fn test_empty_text() {
        let zones = split_zones("", DocType::Unknown);
        assert_eq!(zones.header, "");
        assert!(zones.body.is_empty());
        assert!(zones.footer.is_empty());
    }
}
