//! Type-specific, zone-aware field extraction.
//!
//! The extractor walks the classified type's ordered rule list, searching
//! each rule's designated zone. The first rule to match a field name wins;
//! later rules for the same field are skipped. Stored confidence is the
//! rule's base confidence damped by how sure the classifier was.

use crate::classify::ClassificationResult;
use crate::doc_type::DocType;
use crate::registry::compiled_field_rules;
use crate::zones::{split_zones, Zone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// A field extracted from a specific document zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedField {
    pub field_name: String,
    pub value: String,
    pub zone: Zone,
    pub confidence: f64,
    pub pattern_name: String,
    pub raw_match: String,
}

/// Complete extraction result for one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub doc_type: DocType,
    pub doc_type_confidence: f64,
    /// Extracted fields keyed by field name; a name appears at most once.
    pub fields: BTreeMap<String, ExtractedField>,
    pub notes: Vec<String>,
}

impl ExtractionResult {
    /// Field value by name, if extracted.
    #[must_use]
    pub fn get(&self, field_name: &str) -> Option<&str> {
        self.fields.get(field_name).map(|f| f.value.as_str())
    }
}

/// Extract fields from `text` using the rules for the classified type.
#[must_use]
pub fn extract_fields(text: &str, classification: &ClassificationResult) -> ExtractionResult {
    let mut result = ExtractionResult {
        doc_type: classification.doc_type,
        doc_type_confidence: classification.confidence,
        fields: BTreeMap::new(),
        notes: Vec::new(),
    };

    let rules = compiled_field_rules(classification.doc_type);
    if rules.is_empty() {
        result
            .notes
            .push(format!("No extraction rules defined for {}", classification.doc_type));
        return result;
    }

    let zones = split_zones(text, classification.doc_type);
    // Classifier certainty damps every rule's base confidence; a +0.3 floor
    // keeps strong patterns useful even on weakly classified pages.
    let damping = (classification.confidence + 0.3).min(1.0);

    for rule in rules {
        if result.fields.contains_key(rule.field) {
            continue; // first successful rule wins
        }
        let search_text = match rule.zone {
            Zone::Header => zones.header.as_str(),
            Zone::Body => zones.body.as_str(),
            Zone::Footer => zones.footer.as_str(),
            Zone::Any => text,
        };
        if let Some(captures) = rule.regex.captures(search_text) {
            let raw = captures.get(0).map(|m| m.as_str()).unwrap_or_default();
            let value = captures
                .get(1)
                .map_or(raw, |m| m.as_str())
                .trim()
                .to_string();
            if value.is_empty() {
                continue;
            }
            debug!(field = rule.field, zone = %rule.zone, "field extracted");
            result.fields.insert(
                rule.field.to_string(),
                ExtractedField {
                    field_name: rule.field.to_string(),
                    value,
                    zone: rule.zone,
                    confidence: rule.confidence * damping,
                    pattern_name: format!("{}_{}", classification.doc_type, rule.field),
                    raw_match: raw.to_string(),
                },
            );
        }
    }

    result.notes.push(format!(
        "Extracted {} field(s) using {} rules",
        result.fields.len(),
        classification.doc_type
    ));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;

    const FBI_302_SAMPLE: &str = "\
    FEDERAL BUREAU OF INVESTIGATION

    Date of transcription: 11/26/63

    RALPH LEON YATES, 2527 Glenfield, Dallas, Texas, was interviewed at his
    place of employment, Morgan Express Company, 2531 Glenfield, Dallas, Texas.

    YATES stated that on Wednesday, November 20, 1963, he was driving a pickup
    truck south on the Stemmons Expressway when he observed a man standing on
    the side of the road attempting to hitchhike.

    YATES described the man as a white male, approximately 25 years of age,
    weighing approximately 150 pounds.

    The man carried a package wrapped in brown paper which he placed on the
    floorboard of the truck. YATES asked the man what the package contained
    and the man replied that it contained curtain rods.

    During the ride the man asked YATES whether the parade route had been
    changed and whether anyone could see the President from the building
    where he worked. YATES let the man out near the corner of Elm and
    Houston Streets.

    YATES stated he did not observe the man closely enough to furnish a
    detailed description, but believed he would recognize him if he saw
    him again.

    YATES advised he reported the above information to his supervisor,
    DEMPSEY JONES, who suggested he contact this office.

    transcribed by SA C. Ray Hall
    DL 89-43
    on 11/26/63
";

    const RIF_SAMPLE: &str = "\
    JFK ASSASSINATION SYSTEM

    IDENTIFICATION FORM

    AGENCY: CIA
    RECORD NUMBER: 104-10001-10001

    RECORD SERIES: JFK ASSASSINATION RECORDS
    AGENCY FILE NUMBER: 80T01357A

    ORIGINATOR: CIA/DO/C
    FROM: MEXICO CITY
    TO: DIRECTOR

    TITLE: OSWALD LEE HENRY
    DATE: 10/10/63

    CLASSIFICATION: SECRET

    REVIEW DATE: 09/18/95
    STATUS: RELEASED
";

    #[test]
    fn test_interview_report_fields() {
        let classification = classify(FBI_302_SAMPLE);
        assert_eq!(classification.doc_type, DocType::Fbi302);

        let result = extract_fields(FBI_302_SAMPLE, &classification);
        assert_eq!(result.get("transcribing_agent"), Some("C. Ray Hall"));
        assert_eq!(result.fields["transcribing_agent"].zone, Zone::Footer);
        assert_eq!(result.get("document_date"), Some("11/26/63"));
    }

    #[test]
    fn test_rif_sheet_fields() {
        let classification = classify(RIF_SAMPLE);
        assert_eq!(classification.doc_type, DocType::NaraRif);

        let result = extract_fields(RIF_SAMPLE, &classification);
        assert_eq!(result.get("rif_number"), Some("104-10001-10001"));
        assert_eq!(result.get("agency"), Some("CIA"));
    }

    #[test]
    fn test_first_rule_wins_per_field() {
        let classification = classify(RIF_SAMPLE);
        let result = extract_fields(RIF_SAMPLE, &classification);
        // Both the header rule and the any-zone fallback target rif_number;
        // only the header rule's capture may be stored.
        let field = &result.fields["rif_number"];
        assert_eq!(field.zone, Zone::Header);
    }

    #[test]
    fn test_confidence_damped_by_classification() {
        let classification = classify(FBI_302_SAMPLE);
        let result = extract_fields(FBI_302_SAMPLE, &classification);
        let damping = (classification.confidence + 0.3).min(1.0);
        for field in result.fields.values() {
            assert!(field.confidence <= damping + f64::EPSILON);
            assert!(field.confidence > 0.0);
        }
    }

    #[test]
    fn test_type_without_rules_yields_note() {
        let classification = classify("   \n 7 \n ");
        assert_eq!(classification.doc_type, DocType::Blank);

        let result = extract_fields("   \n 7 \n ", &classification);
        assert!(result.fields.is_empty());
        assert_eq!(result.notes.len(), 1);
        assert!(result.notes[0].contains("No extraction rules"));
    }

    #[test]
    fn test_unmatched_fields_are_absent() {
        let classification = classify(FBI_302_SAMPLE);
        let result = extract_fields(FBI_302_SAMPLE, &classification);
        assert!(result.get("rif_number").is_none());
        assert!(!result.fields.contains_key("exhibit_number"));
    }

    #[test]
    fn test_result_serializes() {
        let classification = classify(FBI_302_SAMPLE);
        let result = extract_fields(FBI_302_SAMPLE, &classification);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["doc_type"], "FBI_302");
        assert!(json["fields"]["transcribing_agent"]["value"].is_string());
    }
}
