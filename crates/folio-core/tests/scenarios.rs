//! End-to-end scenarios over realistic page texts.

use folio_core::{
    classify, Analyzer, DocType, EntityIndex, EntityLinker, MatchMethod, SegmentLabel,
    StrsimScorer, Zone,
};

/// A full FD-302 style page, long enough to carry distinct header, body,
/// and footer zones.
fn interview_report_page() -> String {
    let mut lines = vec![
        "                    FEDERAL BUREAU OF INVESTIGATION".to_string(),
        String::new(),
        "FD-302 (Rev. 1-25-60)".to_string(),
        String::new(),
        "Date of transcription: 11/26/63".to_string(),
        String::new(),
    ];
    for i in 0..18 {
        lines.push(format!(
            "The subject provided additional detail number {i} concerning his \
             movements on the day in question."
        ));
        lines.push(String::new());
    }
    lines.push("transcribed by SA C. Ray Hall".to_string());
    lines.push("DL 89-43".to_string());
    lines.push("on 11/26/63".to_string());
    lines.join("\n")
}

#[test]
fn interview_report_classifies_and_extracts_agent_from_footer() {
    let page = interview_report_page();
    let analysis = Analyzer::new().analyze(&page);

    assert_eq!(analysis.classification.doc_type, DocType::Fbi302);
    assert!(
        analysis.classification.confidence > 0.5,
        "confidence {}",
        analysis.classification.confidence
    );

    let agent = analysis
        .extraction
        .fields
        .get("transcribing_agent")
        .expect("transcribing_agent extracted");
    assert_eq!(agent.value, "C. Ray Hall");
    assert_eq!(agent.zone, Zone::Footer);
}

#[test]
fn near_empty_page_with_page_number_is_blank() {
    let result = classify("   \n\n      42      \n\n");
    assert_eq!(result.doc_type, DocType::Blank);
    assert!((result.confidence - 0.95).abs() < f64::EPSILON);
}

#[test]
fn testimony_page_segments_and_links_without_rematching_speaker() {
    // Header padding keeps the Q&A exchange inside the body zone.
    let mut lines = vec![
        "TESTIMONY OF MRS. LEE HARVEY OSWALD".to_string(),
        String::new(),
        "The President's Commission reconvened at 10 a.m.".to_string(),
    ];
    for i in 0..14 {
        lines.push(format!(
            "the official reporter recorded preliminary matter item {i} verbatim"
        ));
    }
    lines.push("Mr. RANKIN. Will you state your full name for the record?".to_string());
    lines.push("Mrs. OSWALD. Marina Nicolaevna Oswald.".to_string());
    for i in 0..6 {
        lines.push(format!("the examination continued with procedural matter {i}"));
    }
    lines.push("        2".to_string());
    let page = lines.join("\n");

    let index = EntityIndex::sample();
    let analysis = Analyzer::new().with_index(&index).analyze(&page);
    assert_eq!(analysis.classification.doc_type, DocType::WcTestimony);

    let question = analysis
        .segments
        .iter()
        .find(|s| s.segment.label == SegmentLabel::Question)
        .expect("question segment");
    assert_eq!(question.segment.speaker, "RANKIN");

    let answer = analysis
        .segments
        .iter()
        .find(|s| s.segment.label == SegmentLabel::Answer)
        .expect("answer segment");
    assert_eq!(answer.segment.speaker, "OSWALD");

    // The answer's entities resolve to the Marina Oswald record, and the
    // speaker label's surname is not linked as a separate mention.
    assert!(
        answer
            .entities
            .iter()
            .any(|e| e.entity_id.as_deref() == Some("person-004")),
        "expected Marina Oswald link, got {:?}",
        answer.entities
    );
    assert!(answer
        .entities
        .iter()
        .all(|e| !e.matched_text.eq_ignore_ascii_case("OSWALD")));
}

#[test]
fn overlapping_alias_and_canonical_resolve_to_longest_span() {
    let index = EntityIndex::sample();
    let scorer = StrsimScorer;
    let linker = EntityLinker::with_fuzzy(&index, &scorer);

    // The canonical mention subsumes the alias tokens; both candidate sets
    // fire over the same span and must collapse to one match.
    let matches = linker.link("The rifle was shipped to Lee Harvey Oswald in March.");
    let oswald: Vec<_> = matches
        .iter()
        .filter(|m| m.entity_id.as_deref() == Some("person-002"))
        .collect();
    assert_eq!(oswald.len(), 1);
    assert_eq!(oswald[0].matched_text, "Lee Harvey Oswald");
    assert_eq!(oswald[0].method, MatchMethod::Exact);
}

#[test]
fn cable_page_segments_into_numbered_claims() {
    let mut lines = vec![
        "SECRET".to_string(),
        String::new(),
        "DIR 84888".to_string(),
        String::new(),
        "CITE MEXI 7025".to_string(),
        String::new(),
        "ROUTING: 3".to_string(),
        String::new(),
        "SUBJ: REPORTED CONTACT WITH EMBASSY".to_string(),
        String::new(),
        "REF: MEXI 7024".to_string(),
        String::new(),
    ];
    for i in 0..14 {
        lines.push(format!("PASSED FOR STATION ACTION UNDER STANDING INSTRUCTION {i}"));
    }
    lines.push("1. ON 1 OCTOBER 1963 A RELIABLE SOURCE REPORTED CONTACT.".to_string());
    lines.push("2. SOURCE STATED THE AMERICAN IDENTIFIED HIMSELF BY NAME.".to_string());
    for _ in 0..6 {
        lines.push("END OF MESSAGE TEXT FOLLOWS ON SUCCEEDING PAGE".to_string());
    }
    let page = lines.join("\n");

    let analysis = Analyzer::new().analyze(&page);
    assert_eq!(analysis.classification.doc_type, DocType::CiaCable);

    let claims: Vec<_> = analysis
        .segments
        .iter()
        .filter(|s| s.segment.label == SegmentLabel::Claim)
        .collect();
    assert_eq!(claims.len(), 2);
    assert_eq!(claims[0].segment.speaker, "Item 1");
    assert_eq!(claims[1].segment.speaker, "Item 2");
}

#[test]
fn empty_text_yields_safe_defaults_everywhere() {
    let index = EntityIndex::sample();
    let analysis = Analyzer::new().with_index(&index).analyze("");
    // Empty text is structurally blank; nothing downstream errors.
    assert!(analysis.classification.doc_type == DocType::Blank
        || analysis.classification.doc_type == DocType::Unknown);
    assert!(analysis.extraction.fields.is_empty());
    assert!(analysis.segments.is_empty());
    assert!(analysis.linked_entities.is_empty());
}

#[test]
fn analysis_output_is_json_serializable() {
    let index = EntityIndex::sample();
    let analysis = Analyzer::new()
        .with_index(&index)
        .analyze(&interview_report_page());
    let json = serde_json::to_string(&analysis).expect("serializes");
    assert!(json.contains("\"doc_type\":\"FBI_302\""));
    assert!(json.contains("\"confidence_label\""));
}
