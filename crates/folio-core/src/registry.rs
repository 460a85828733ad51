//! Static pattern tables keyed by document type.
//!
//! Everything the scoring engines consume lives here as plain data: weighted
//! regex fingerprints for classification, canonical reference phrases for the
//! fuzzy fallback, and ordered field-extraction rules. The engines themselves
//! (`classify`, `fields`) are generic loops over these tables, so tuning a
//! document type never touches engine code.
//!
//! Patterns are compiled once, on first use, case-insensitive and multiline
//! so `^` anchors apply per physical line.

use crate::doc_type::DocType;
use crate::zones::Zone;
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// A weighted positive-evidence pattern for one document type.
///
/// Weights are non-negative by construction; the maximum attainable score for
/// a type is the sum of its fingerprint weights, precomputed at table build.
#[derive(Debug, Clone, Copy)]
pub struct Fingerprint {
    pub pattern: &'static str,
    pub weight: u32,
}

/// An "ideal OCR" reference string used only by the fuzzy fallback stage.
#[derive(Debug, Clone, Copy)]
pub struct CanonicalPhrase {
    pub text: &'static str,
    pub weight: u32,
}

/// One field-extraction rule: search `zone` with `pattern`, store the first
/// capture group (or whole match) under `field`.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub pattern: &'static str,
    pub field: &'static str,
    pub zone: Zone,
    pub confidence: f64,
}

const fn fp(pattern: &'static str, weight: u32) -> Fingerprint {
    Fingerprint { pattern, weight }
}

const fn phrase(text: &'static str, weight: u32) -> CanonicalPhrase {
    CanonicalPhrase { text, weight }
}

const fn rule(pattern: &'static str, field: &'static str, zone: Zone, confidence: f64) -> FieldRule {
    FieldRule { pattern, field, zone, confidence }
}

// =============================================================================
// FINGERPRINT TABLES
// =============================================================================

const FBI_302_FINGERPRINTS: &[Fingerprint] = &[
    fp(r"FEDERAL BUREAU OF INVESTIGATION", 30),
    fp(r"FD-302\b", 25),
    fp(r"FD-302a", 20),
    fp(r"Date of transcription", 20),
    fp(r"was interviewed", 15),
    fp(r"transcribed by SA", 20),
    fp(r"dictated\s+\d{1,2}/\d{1,2}/\d{2,4}", 15),
    fp(r"File #|File Number", 10),
    fp(r"[A-Z]{2}\s*\d{2,3}-\d+", 15), // field office file (DL 89-43)
    fp(r"at which time .* was interviewed", 10),
    fp(r"advised as follows", 10),
    fp(r"on \d{1,2}/\d{1,2}/\d{2,4} at", 10),
];

const NARA_RIF_FINGERPRINTS: &[Fingerprint] = &[
    fp(r"\d{3}-\d{5}-\d{5}", 40), // RIF number (104-10001-10001)
    fp(r"RECORD\s+(NUMBER|INFORMATION)", 25),
    fp(r"JFK ASSASSINATION", 20),
    fp(r"ARRB", 20),
    fp(r"JFK Act", 15),
    fp(r"AGENCY\s*:", 15),
    fp(r"RECORD NUMBER\s*:", 15),
    fp(r"RECORD SERIES", 10),
    fp(r"AGENCY FILE NUMBER", 10),
    fp(r"ORIGINATOR", 10),
    fp(r"FROM\s*:\s*(CIA|FBI|SECRET SERVICE|NSA|DIA)", 15),
];

const CIA_CABLE_FINGERPRINTS: &[Fingerprint] = &[
    fp(r"\bDIR\s+\d+", 30),
    fp(r"\bCITE\b", 25),
    fp(r"ROUTING", 20),
    fp(r"TOP SECRET|SECRET|CONFIDENTIAL", 20),
    fp(r"PRIORITY|IMMEDIATE|ROUTINE", 15),
    fp(r"MEXI|WAVE|JMWAVE", 15), // station codes
    fp(r"INFO\s*:", 10),
    fp(r"REF\s*:", 10),
    fp(r"SUBJ\s*:", 10),
    fp(r"DTG\s*:", 10),
    fp(r"CLASSIFIED MESSAGE", 20),
];

const CIA_201_FINGERPRINTS: &[Fingerprint] = &[
    fp(r"201-\d{6,8}", 35), // 201 file number
    fp(r"PERSONALITY FILE", 25),
    fp(r"\b201 FILE\b", 25),
    fp(r"OPERATIONAL INTEREST", 15),
    fp(r"COUNTERINTELLIGENCE", 10),
    fp(r"SUBJECT\s*:\s*[A-Z]", 10),
];

const MEMO_FINGERPRINTS: &[Fingerprint] = &[
    fp(r"^\s*TO\s*:", 25),
    fp(r"^\s*FROM\s*:", 25),
    fp(r"^\s*DATE\s*:", 20),
    fp(r"^\s*SUBJECT\s*:|^\s*RE\s*:", 20),
    fp(r"MEMORANDUM", 30),
    fp(r"MEMO\s+FOR\s+THE\s+RECORD", 25),
    fp(r"INTEROFFICE", 15),
    fp(r"ATTENTION\s*:", 10),
    fp(r"CC\s*:|COPIES\s+TO\s*:", 10),
];

const LETTER_FINGERPRINTS: &[Fingerprint] = &[
    fp(r"^\s*Dear\s+(?:Mr|Mrs|Miss|Ms|Dr|Sir|Madam)", 30),
    fp(r"(?:Sincerely|Respectfully|Cordially)(?:\s+yours)?\s*,", 25),
    fp(r"Yours\s+(?:truly|sincerely|faithfully)", 25),
    fp(r"Thank you for your letter", 15),
    fp(r"^\s*P\.?\s?S\.?[:.]", 10),
];

const WC_EXHIBIT_FINGERPRINTS: &[Fingerprint] = &[
    fp(r"CE-\d{1,4}", 35), // Commission Exhibit
    fp(r"CD-\d{1,4}", 30), // Commission Document
    fp(r"COMMISSION EXHIBIT", 30),
    fp(r"WARREN COMMISSION", 25),
    fp(r"EXHIBIT NO\.", 20),
    fp(r"PRESIDENT'S COMMISSION", 20),
    fp(r"HEARINGS.*TESTIMONY", 15),
];

const WC_TESTIMONY_FINGERPRINTS: &[Fingerprint] = &[
    fp(r"TESTIMONY\s+OF", 35),
    fp(
        r"^\s*Mr\.\s+(?:RANKIN|JENNER|LIEBELER|BALL|BELIN|SPECTER|REDLICH|STERN|COLEMAN|SLAWSON|WILLENS|GOLDBERG)\.",
        30,
    ),
    fp(r"The\s+Chairman\.", 20),
    fp(r"^\s*Q\.\s", 15),
    fp(r"^\s*A\.\s", 10),
    fp(r"PRESIDENT'S\s+COMMISSION", 20),
    fp(r"resumed the stand", 10),
];

const WC_DEPOSITION_FINGERPRINTS: &[Fingerprint] = &[
    fp(r"DEPOSITION\s+OF", 35),
    fp(r"being first duly sworn", 25),
    fp(r"EXAMINATION\s+BY", 20),
    fp(r"pursuant to notice", 15),
    fp(r"court reporter", 10),
    fp(r"counsel for the", 10),
];

const WC_AFFIDAVIT_FINGERPRINTS: &[Fingerprint] = &[
    fp(r"\bAFFIDAVIT\b", 35),
    fp(r"(?:subscribed and )?sworn to before me", 30),
    fp(r"Notary Public", 25),
    fp(r"being duly sworn", 20),
    fp(r"depose[sd]? and say", 15),
    fp(r"My commission expires", 15),
];

const POLICE_REPORT_FINGERPRINTS: &[Fingerprint] = &[
    fp(r"POLICE\s+DEPARTMENT", 30),
    fp(r"OFFENSE\s+REPORT|^\s*OFFENSE\s*:", 20),
    fp(r"(?:Serial|Case|Report)\s+(?:No\.?|Number|#)", 20),
    fp(r"ARREST(?:ING\s+OFFICER)?", 15),
    fp(r"COMPLAINANT", 15),
    fp(r"BUREAU OF IDENTIFICATION", 10),
    fp(r"\bSUSPECT\b", 10),
];

const HSCA_REPORT_FINGERPRINTS: &[Fingerprint] = &[
    fp(r"HSCA", 35),
    fp(r"HOUSE SELECT COMMITTEE", 30),
    fp(r"RG\s*233", 25), // Record Group 233
    fp(r"JFK TASK FORCE", 20),
    fp(r"SEGREGATED CIA", 15),
    fp(r"BOX\s+\d+", 10),
    fp(r"FOLDER", 10),
];

const MEDICAL_RECORD_FINGERPRINTS: &[Fingerprint] = &[
    fp(r"MEDICAL\s+RECORD", 30),
    fp(r"AUTOPSY", 25),
    fp(r"PATIENT(?:'S)?\s+(?:NAME|HISTORY)", 25),
    fp(r"DIAGNOSIS", 20),
    fp(r"HOSPITAL", 15),
    fp(r"ADMITTED", 10),
    fp(r"BLOOD PRESSURE|PULSE|RESPIRATION", 10),
];

const HANDWRITTEN_NOTES_FINGERPRINTS: &[Fingerprint] = &[
    fp(r"\[(?:illegible|unreadable)\]", 25),
    fp(r"\bhand\s*written\b", 20),
    fp(r"^\s*notes?\s+(?:of|on|re)\b", 10),
];

const WITNESS_STATEMENT_FINGERPRINTS: &[Fingerprint] = &[
    fp(r"VOLUNTARY\s+STATEMENT", 35),
    fp(r"STATEMENT\s+OF", 25),
    fp(r"have read (?:the above|this) statement", 20),
    fp(r"I,\s+[A-Z][a-z]+.*,\s+(?:do\s+)?hereby", 20),
    fp(r"signed in my presence", 15),
    fp(r"\bWITNESS(?:ED)?\b", 10),
];

const TOC_FINGERPRINTS: &[Fingerprint] = &[
    fp(r"TABLE\s+OF\s+CONTENTS", 40),
    fp(r"^\s*CONTENTS\s*$", 30),
    fp(r"\.{5,}\s*\d+\s*$", 20), // dot leaders
    fp(r"^\s*Chapter\s+[IVX\d]+", 10),
    fp(r"^\s*Appendix\s+[A-Z\d]", 10),
];

const INDEX_FINGERPRINTS: &[Fingerprint] = &[
    fp(r"^\s*INDEX\s*$", 40),
    fp(r"^[A-Z][a-z]+,\s+[A-Z][a-z]+,?\s+\d+(?:,\s*\d+)+\s*$", 20), // "Ruby, Jack, 14, 88"
    fp(r"See also", 15),
];

const COVER_FINGERPRINTS: &[Fingerprint] = &[
    fp(r"COVER\s+(?:SHEET|PAGE)", 35),
    fp(r"CLASSIFIED COVER SHEET", 25),
    fp(r"^\s*VOLUME\s+[IVX\d]+\s*$", 20),
    fp(r"TRANSMITTAL", 15),
];

/// Fingerprints for one document type. `Blank` and `Unknown` carry none:
/// blank pages are detected structurally before scoring, and `Unknown` is the
/// thresholding fallback, never a scored candidate.
#[must_use]
pub fn fingerprints(doc_type: DocType) -> &'static [Fingerprint] {
    match doc_type {
        DocType::Fbi302 => FBI_302_FINGERPRINTS,
        DocType::NaraRif => NARA_RIF_FINGERPRINTS,
        DocType::CiaCable => CIA_CABLE_FINGERPRINTS,
        DocType::Cia201 => CIA_201_FINGERPRINTS,
        DocType::Memo => MEMO_FINGERPRINTS,
        DocType::Letter => LETTER_FINGERPRINTS,
        DocType::WcExhibit => WC_EXHIBIT_FINGERPRINTS,
        DocType::WcTestimony => WC_TESTIMONY_FINGERPRINTS,
        DocType::WcDeposition => WC_DEPOSITION_FINGERPRINTS,
        DocType::WcAffidavit => WC_AFFIDAVIT_FINGERPRINTS,
        DocType::PoliceReport => POLICE_REPORT_FINGERPRINTS,
        DocType::HscaReport => HSCA_REPORT_FINGERPRINTS,
        DocType::MedicalRecord => MEDICAL_RECORD_FINGERPRINTS,
        DocType::HandwrittenNotes => HANDWRITTEN_NOTES_FINGERPRINTS,
        DocType::WitnessStatement => WITNESS_STATEMENT_FINGERPRINTS,
        DocType::Toc => TOC_FINGERPRINTS,
        DocType::Index => INDEX_FINGERPRINTS,
        DocType::Cover => COVER_FINGERPRINTS,
        DocType::Blank | DocType::Unknown => &[],
    }
}

// =============================================================================
// CANONICAL PHRASE TABLES (fuzzy fallback only)
// =============================================================================

const FBI_302_PHRASES: &[CanonicalPhrase] = &[
    phrase("FEDERAL BUREAU OF INVESTIGATION", 30),
    phrase("Date of transcription", 20),
    phrase("transcribed by Special Agent", 15),
    phrase("was interviewed", 10),
];

const NARA_RIF_PHRASES: &[CanonicalPhrase] = &[
    phrase("JFK ASSASSINATION SYSTEM", 25),
    phrase("IDENTIFICATION FORM", 20),
    phrase("RECORD NUMBER", 20),
    phrase("AGENCY FILE NUMBER", 15),
];

const CIA_CABLE_PHRASES: &[CanonicalPhrase] = &[
    phrase("CLASSIFIED MESSAGE", 25),
    phrase("ROUTING AND RECORD SHEET", 20),
    phrase("TOP SECRET", 10),
];

const CIA_201_PHRASES: &[CanonicalPhrase] = &[
    phrase("PERSONALITY FILE", 20),
    phrase("COUNTERINTELLIGENCE", 15),
];

const MEMO_PHRASES: &[CanonicalPhrase] = &[
    phrase("MEMORANDUM FOR THE RECORD", 25),
    phrase("INTEROFFICE MEMORANDUM", 20),
    phrase("MEMORANDUM", 20),
];

const LETTER_PHRASES: &[CanonicalPhrase] =
    &[phrase("Sincerely yours", 15), phrase("Yours truly", 15)];

const WC_EXHIBIT_PHRASES: &[CanonicalPhrase] = &[
    phrase("COMMISSION EXHIBIT", 30),
    phrase("WARREN COMMISSION", 20),
];

const WC_TESTIMONY_PHRASES: &[CanonicalPhrase] = &[
    phrase("TESTIMONY OF", 30),
    phrase("PRESIDENT'S COMMISSION ON THE ASSASSINATION", 25),
];

const WC_DEPOSITION_PHRASES: &[CanonicalPhrase] = &[
    phrase("DEPOSITION OF", 30),
    phrase("being first duly sworn", 20),
];

const WC_AFFIDAVIT_PHRASES: &[CanonicalPhrase] = &[
    phrase("AFFIDAVIT IN ANY FACT", 25),
    phrase("sworn to before me", 20),
    phrase("Notary Public", 15),
];

const POLICE_REPORT_PHRASES: &[CanonicalPhrase] = &[
    phrase("POLICE DEPARTMENT", 25),
    phrase("OFFENSE REPORT", 20),
];

const HSCA_REPORT_PHRASES: &[CanonicalPhrase] = &[
    phrase("HOUSE SELECT COMMITTEE ON ASSASSINATIONS", 30),
    phrase("JFK TASK FORCE", 15),
];

const MEDICAL_RECORD_PHRASES: &[CanonicalPhrase] = &[
    phrase("MEDICAL RECORD", 25),
    phrase("AUTOPSY REPORT", 20),
];

const WITNESS_STATEMENT_PHRASES: &[CanonicalPhrase] = &[
    phrase("VOLUNTARY STATEMENT", 25),
    phrase("have read this statement", 15),
];

const TOC_PHRASES: &[CanonicalPhrase] = &[phrase("TABLE OF CONTENTS", 30)];

const COVER_PHRASES: &[CanonicalPhrase] = &[phrase("COVER SHEET", 20)];

#[must_use]
pub fn canonical_phrases(doc_type: DocType) -> &'static [CanonicalPhrase] {
    match doc_type {
        DocType::Fbi302 => FBI_302_PHRASES,
        DocType::NaraRif => NARA_RIF_PHRASES,
        DocType::CiaCable => CIA_CABLE_PHRASES,
        DocType::Cia201 => CIA_201_PHRASES,
        DocType::Memo => MEMO_PHRASES,
        DocType::Letter => LETTER_PHRASES,
        DocType::WcExhibit => WC_EXHIBIT_PHRASES,
        DocType::WcTestimony => WC_TESTIMONY_PHRASES,
        DocType::WcDeposition => WC_DEPOSITION_PHRASES,
        DocType::WcAffidavit => WC_AFFIDAVIT_PHRASES,
        DocType::PoliceReport => POLICE_REPORT_PHRASES,
        DocType::HscaReport => HSCA_REPORT_PHRASES,
        DocType::MedicalRecord => MEDICAL_RECORD_PHRASES,
        DocType::WitnessStatement => WITNESS_STATEMENT_PHRASES,
        DocType::Toc => TOC_PHRASES,
        DocType::Cover => COVER_PHRASES,
        DocType::HandwrittenNotes
        | DocType::Index
        | DocType::Blank
        | DocType::Unknown => &[],
    }
}

// =============================================================================
// FIELD RULE TABLES
// =============================================================================
// Ordered: the first rule to match wins its field name.

const FBI_302_RULES: &[FieldRule] = &[
    rule(r"FEDERAL BUREAU OF INVESTIGATION", "form_type", Zone::Header, 0.95),
    rule(r"FD-302\s*(?:\(Rev\.?\s*[\d\-\.]+\))?", "form_version", Zone::Header, 0.95),
    rule(r"Date\s*(?:of\s+transcription)?[:\s]+(\d{1,2}/\d{1,2}/\d{2,4})", "document_date", Zone::Header, 0.9),
    rule(r"File\s*(?:Number|#|No\.?)?[:\s]*([A-Z]{2}\s*\d{2,3}-\d+)", "file_number", Zone::Header, 0.9),
    rule(r"^\s*([A-Z][A-Z\s,.]+),\s*(?:\d+\s+)?[A-Za-z]+.*?(?:was interviewed|advised|stated)", "subject_name", Zone::Body, 0.85),
    rule(r"([A-Z][A-Z]+(?:\s+[A-Z][A-Z]+)*),\s*\d+\s+[A-Za-z]", "subject_name", Zone::Body, 0.8),
    rule(r"(?:interviewed|contacted)\s+(?:at\s+)?([^,\n]+(?:,\s*[A-Z][a-z]+)?)", "interview_location", Zone::Body, 0.7),
    rule(r"on\s+(?:Wednesday|Thursday|Friday|Monday|Tuesday|Saturday|Sunday)?,?\s*(\w+\s+\d{1,2},?\s+\d{4})", "interview_date", Zone::Body, 0.85),
    rule(r"on\s+(\d{1,2}/\d{1,2}/\d{2,4})\s*(?:,|\s+at)", "interview_date", Zone::Body, 0.8),
    // FD-302s sign in the footer.
    rule(r"(?:transcribed|dictated|typed)\s+by\s+(?:SA\s+)?([A-Z](?:[a-z]+|\.)\s+(?:[A-Z](?:[a-z]+|\.)\s+)?[A-Z][a-z]+)", "transcribing_agent", Zone::Footer, 0.95),
    rule(r"^\s*([A-Z]{2}\s*\d{2,3}-\d+)\s*$", "footer_file_number", Zone::Footer, 0.9),
    rule(r"on\s+(\d{1,2}/\d{1,2}/\d{2,4})\s*$", "transcription_date", Zone::Footer, 0.85),
    rule(r"([A-Z]{2}\s+\d{2,3}-\d+)", "file_number", Zone::Any, 0.75),
    rule(r"SA\s+([A-Z](?:[a-z]+|\.)\s+(?:[A-Z](?:[a-z]+|\.)\s+)?[A-Z][a-z]+)", "agent_name", Zone::Any, 0.8),
];

const NARA_RIF_RULES: &[FieldRule] = &[
    rule(r"RECORD\s*NUMBER[:\s]*(\d{3}-\d{5}-\d{5})", "rif_number", Zone::Header, 0.98),
    rule(r"(\d{3}-\d{5}-\d{5})", "rif_number", Zone::Any, 0.95),
    rule(r"AGENCY[:\s]*([A-Z]{2,20})", "agency", Zone::Header, 0.95),
    rule(r"AGENCY\s+FILE\s+NUMBER[:\s]*([A-Z0-9-]+)", "agency_file_number", Zone::Header, 0.9),
    rule(r"RECORD\s+SERIES[:\s]*(.+?)(?:\n|$)", "record_series", Zone::Header, 0.85),
    rule(r"ORIGINATOR[:\s]*([A-Z/]+)", "originator", Zone::Header, 0.85),
    rule(r"FROM[:\s]*([A-Z\s]+?)(?:\n|TO:|$)", "from_station", Zone::Header, 0.8),
    rule(r"TO[:\s]*([A-Z\s]+?)(?:\n|FROM:|$)", "to_station", Zone::Header, 0.8),
    rule(r"TITLE[:\s]*(.+?)(?:\n|$)", "title", Zone::Header, 0.85),
    rule(r"(?:DOCUMENT\s+)?DATE[:\s]*(\d{1,2}/\d{1,2}/\d{2,4}|\w+\s+\d{1,2},?\s+\d{4})", "document_date", Zone::Header, 0.9),
    rule(r"(TOP\s+SECRET|SECRET|CONFIDENTIAL|UNCLASSIFIED)", "classification", Zone::Any, 0.9),
    rule(r"REVIEW\s+DATE[:\s]*(\d{1,2}/\d{1,2}/\d{2,4})", "review_date", Zone::Footer, 0.85),
    rule(r"(RELEASED|POSTPONED|WITHHELD)", "release_status", Zone::Footer, 0.8),
];

const CIA_CABLE_RULES: &[FieldRule] = &[
    rule(r"DIR\s+(\d+)", "dir_number", Zone::Header, 0.95),
    rule(r"CITE\s+([A-Z]+\s*\d+)", "cite_number", Zone::Header, 0.95),
    rule(r"(TOP\s+SECRET|SECRET|CONFIDENTIAL)", "classification", Zone::Header, 0.95),
    rule(r"ROUTING[:\s]*(\d+)", "routing", Zone::Header, 0.85),
    rule(r"SUBJ[:\s]*(.+?)(?:\n|$)", "subject", Zone::Header, 0.9),
    rule(r"REF[:\s]*(.+?)(?:\n|$)", "reference", Zone::Header, 0.85),
    rule(r"DTG[:\s]*(\d+Z?\s+\w+\s+\d+)", "date_time_group", Zone::Header, 0.9),
    rule(r"INFO[:\s]*(.+?)(?:\n|$)", "info_addressees", Zone::Header, 0.8),
    rule(r"(MEXI|WAVE|JMWAVE|DIRECTOR)", "station", Zone::Any, 0.8),
];

const CIA_201_RULES: &[FieldRule] = &[
    rule(r"(201-\d{6,8})", "file_201_number", Zone::Any, 0.95),
    rule(r"SUBJECT[:\s]*([A-Z][A-Z\s,.]+?)(?:\n|$)", "subject_name", Zone::Header, 0.9),
    rule(r"(TOP\s+SECRET|SECRET|CONFIDENTIAL)", "classification", Zone::Any, 0.9),
];

const MEMO_RULES: &[FieldRule] = &[
    rule(r"TO[:\s]+(.+?)(?:\n|FROM|DATE|SUBJECT)", "to", Zone::Header, 0.95),
    rule(r"FROM[:\s]+(.+?)(?:\n|TO|DATE|SUBJECT)", "from", Zone::Header, 0.95),
    rule(r"DATE[:\s]+(.+?)(?:\n|TO|FROM|SUBJECT)", "date", Zone::Header, 0.95),
    rule(r"(?:SUBJECT|SUBJ|RE)[:\s]+(.+?)(?:\n\n|\n[A-Z]+:)", "subject", Zone::Header, 0.95),
    rule(r"ATTENTION[:\s]+(.+?)(?:\n|$)", "attention", Zone::Header, 0.8),
    rule(r"(?:Signed|Signature)[:\s]*(.+?)(?:\n|$)", "signature", Zone::Footer, 0.8),
    rule(r"(?:CC|Copies?\s+to)[:\s]*(.+?)(?:\n\n|$)", "cc_list", Zone::Footer, 0.75),
];

const LETTER_RULES: &[FieldRule] = &[
    rule(r"^\s*Dear\s+((?:Mr|Mrs|Miss|Ms|Dr|Sir|Madam)\.?\s*[A-Z]?[a-z]*)", "salutation", Zone::Header, 0.9),
    rule(r"(\w+\s+\d{1,2},?\s+\d{4})", "letter_date", Zone::Header, 0.8),
    rule(r"(?:Sincerely|Respectfully|Cordially)(?:\s+yours)?\s*,\s*\n+\s*([A-Z][A-Za-z.\s]+?)(?:\n|$)", "signatory", Zone::Footer, 0.85),
];

const WC_EXHIBIT_RULES: &[FieldRule] = &[
    rule(r"(?:COMMISSION\s+)?EXHIBIT\s+(?:NO\.?\s*)?(CE-?\d+|CD-?\d+)", "exhibit_number", Zone::Header, 0.98),
    rule(r"(CE-\d{1,4})", "exhibit_number", Zone::Any, 0.95),
    rule(r"(CD-\d{1,4})", "document_number", Zone::Any, 0.95),
    rule(r"HEARINGS.*?VOL(?:UME)?\.?\s*(\d+)", "volume", Zone::Any, 0.85),
    rule(r"PAGE\s*(\d+)", "page", Zone::Any, 0.8),
];

const WC_TESTIMONY_RULES: &[FieldRule] = &[
    rule(r"TESTIMONY\s+OF\s+(?:MRS?\.\s+)?([A-Z][A-Z\s.]+)", "witness_name", Zone::Header, 0.95),
    rule(r"(?:Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday),?\s+(\w+\s+\d{1,2},?\s+\d{4})", "testimony_date", Zone::Header, 0.9),
    rule(r"(President'?s\s+Commission)", "commission", Zone::Header, 0.85),
    rule(r"Mr\.\s+(Rankin|Jenner|Liebeler|Ball|Belin|Specter|Redlich|Stern|Coleman|Slawson|Willens|Goldberg)\.", "questioner", Zone::Body, 0.85),
    rule(r"Mr\.\s+(Dulles|McCloy)\.", "commissioner_questioner", Zone::Body, 0.85),
    rule(r"VOL(?:UME)?\.?\s*(\d+)", "volume", Zone::Any, 0.85),
];

const WC_DEPOSITION_RULES: &[FieldRule] = &[
    rule(r"DEPOSITION\s+OF\s+(?:MRS?\.\s+)?([A-Z][A-Z\s.]+)", "deponent_name", Zone::Header, 0.95),
    rule(r"EXAMINATION\s+BY\s+(?:MR\.\s+)?([A-Z][A-Z\s.]+?)(?:\n|:|$)", "examiner", Zone::Body, 0.85),
    rule(r"(\w+\s+\d{1,2},?\s+\d{4})", "deposition_date", Zone::Header, 0.8),
];

const WC_AFFIDAVIT_RULES: &[FieldRule] = &[
    rule(r"AFFIDAVIT\s+OF\s+(?:MRS?\.\s+)?([A-Z][A-Z\s.]+)", "affiant_name", Zone::Header, 0.95),
    rule(r"I,\s+([A-Z][A-Za-z.\s]+?),\s+(?:being|do|having)", "affiant_name", Zone::Body, 0.85),
    rule(r"sworn to before me(?:\s+this)?\s+(.+?)(?:\n|$)", "notarization_date", Zone::Footer, 0.85),
    rule(r"Notary Public(?:[,\s]+)(.+?)(?:\n|$)", "notary_jurisdiction", Zone::Footer, 0.75),
];

const POLICE_REPORT_RULES: &[FieldRule] = &[
    rule(r"([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)\s+POLICE\s+DEPARTMENT", "department", Zone::Header, 0.9),
    rule(r"(?:Serial|Case|Report)\s+(?:No\.?|Number|#)?\s*(\d{3,7})", "case_number", Zone::Header, 0.9),
    rule(r"COMPLAINANT[:\s]+(.+?)(?:\n|$)", "complainant", Zone::Any, 0.85),
    rule(r"OFFENSE[:\s]+(.+?)(?:\n|$)", "offense", Zone::Any, 0.85),
    rule(r"(?:OFFICER|REPORTED\s+BY)[:\s]+(.+?)(?:\n|$)", "reporting_officer", Zone::Any, 0.8),
];

const HSCA_REPORT_RULES: &[FieldRule] = &[
    rule(r"RG\s*(\d+)", "record_group", Zone::Header, 0.9),
    rule(r"BOX\s*(\d+)", "box_number", Zone::Header, 0.85),
    rule(r"FOLDER[:\s]*(.+?)(?:\n|$)", "folder", Zone::Header, 0.85),
    rule(r"HSCA\s+(?:RECORD\s+)?(?:NO\.?\s*)?(\d+)", "hsca_number", Zone::Any, 0.9),
];

const MEDICAL_RECORD_RULES: &[FieldRule] = &[
    rule(r"PATIENT(?:'S)?\s+NAME[:\s]+(.+?)(?:\n|$)", "patient_name", Zone::Header, 0.9),
    rule(r"(?:ATTENDING\s+)?(?:PHYSICIAN|DOCTOR|DR\.)[:\s]+(.+?)(?:\n|$)", "physician", Zone::Any, 0.85),
    rule(r"DIAGNOSIS[:\s]+(.+?)(?:\n|$)", "diagnosis", Zone::Any, 0.85),
    rule(r"ADMITTED[:\s]+(.+?)(?:\n|$)", "admission_date", Zone::Any, 0.8),
    rule(r"([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\s+HOSPITAL)", "facility", Zone::Any, 0.8),
];

const WITNESS_STATEMENT_RULES: &[FieldRule] = &[
    rule(r"STATEMENT\s+OF\s+(?:MRS?\.\s+)?([A-Z][A-Za-z.\s]+?)(?:\n|,|$)", "witness_name", Zone::Header, 0.95),
    rule(r"I,\s+([A-Z][A-Za-z.\s]+?),", "witness_name", Zone::Body, 0.85),
    rule(r"(?:ADDRESS|residing at)[:\s]+(.+?)(?:\n|$)", "address", Zone::Any, 0.8),
    rule(r"(\w+\s+\d{1,2},?\s+\d{4})", "statement_date", Zone::Any, 0.75),
];

/// Ordered field rules for one document type. Types with no rules (the
/// structural pages, handwritten notes, `Unknown`) extract nothing; the
/// extractor records a note saying so.
#[must_use]
pub fn field_rules(doc_type: DocType) -> &'static [FieldRule] {
    match doc_type {
        DocType::Fbi302 => FBI_302_RULES,
        DocType::NaraRif => NARA_RIF_RULES,
        DocType::CiaCable => CIA_CABLE_RULES,
        DocType::Cia201 => CIA_201_RULES,
        DocType::Memo => MEMO_RULES,
        DocType::Letter => LETTER_RULES,
        DocType::WcExhibit => WC_EXHIBIT_RULES,
        DocType::WcTestimony => WC_TESTIMONY_RULES,
        DocType::WcDeposition => WC_DEPOSITION_RULES,
        DocType::WcAffidavit => WC_AFFIDAVIT_RULES,
        DocType::PoliceReport => POLICE_REPORT_RULES,
        DocType::HscaReport => HSCA_REPORT_RULES,
        DocType::MedicalRecord => MEDICAL_RECORD_RULES,
        DocType::WitnessStatement => WITNESS_STATEMENT_RULES,
        DocType::HandwrittenNotes
        | DocType::Blank
        | DocType::Toc
        | DocType::Index
        | DocType::Cover
        | DocType::Unknown => &[],
    }
}

// =============================================================================
// COMPILED TABLES
// =============================================================================

pub(crate) struct CompiledPattern {
    pub regex: Regex,
    pub source: &'static str,
    pub weight: u32,
}

pub(crate) struct TypeFingerprints {
    pub doc_type: DocType,
    pub patterns: Vec<CompiledPattern>,
    /// Sum of all fingerprint weights, precomputed for normalization.
    pub max_weight: u32,
}

pub(crate) struct CompiledFieldRule {
    pub regex: Regex,
    pub field: &'static str,
    pub zone: Zone,
    pub confidence: f64,
}

fn compile(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .multi_line(true)
        .build()
        .unwrap_or_else(|e| panic!("invalid table pattern {pattern:?}: {e}"))
}

static COMPILED_FINGERPRINTS: LazyLock<Vec<TypeFingerprints>> = LazyLock::new(|| {
    DocType::ALL
        .iter()
        .map(|&doc_type| {
            let table = fingerprints(doc_type);
            TypeFingerprints {
                doc_type,
                patterns: table
                    .iter()
                    .map(|f| CompiledPattern {
                        regex: compile(f.pattern),
                        source: f.pattern,
                        weight: f.weight,
                    })
                    .collect(),
                max_weight: table.iter().map(|f| f.weight).sum(),
            }
        })
        .collect()
});

static COMPILED_FIELD_RULES: LazyLock<Vec<(DocType, Vec<CompiledFieldRule>)>> =
    LazyLock::new(|| {
        DocType::ALL
            .iter()
            .map(|&doc_type| {
                let rules = field_rules(doc_type)
                    .iter()
                    .map(|r| CompiledFieldRule {
                        regex: compile(r.pattern),
                        field: r.field,
                        zone: r.zone,
                        confidence: r.confidence,
                    })
                    .collect();
                (doc_type, rules)
            })
            .collect()
    });

/// Compiled fingerprint tables in declaration order.
pub(crate) fn compiled_fingerprints() -> &'static [TypeFingerprints] {
    &COMPILED_FINGERPRINTS
}

/// Compiled field rules for one type.
pub(crate) fn compiled_field_rules(doc_type: DocType) -> &'static [CompiledFieldRule] {
    COMPILED_FIELD_RULES
        .iter()
        .find(|(t, _)| *t == doc_type)
        .map(|(_, rules)| rules.as_slice())
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_fingerprint_compiles() {
        // Touching the lazy table forces compilation of every pattern.
        let compiled = compiled_fingerprints();
        assert_eq!(compiled.len(), DocType::ALL.len());
    }

    #[test]
    fn test_every_field_rule_compiles() {
        for doc_type in DocType::ALL {
            let _ = compiled_field_rules(doc_type);
        }
    }

    #[test]
    fn test_max_weight_is_sum_of_weights() {
        for entry in compiled_fingerprints() {
            let expected: u32 = fingerprints(entry.doc_type).iter().map(|f| f.weight).sum();
            assert_eq!(entry.max_weight, expected, "{}", entry.doc_type);
        }
    }

    #[test]
    fn test_tables_follow_declaration_order() {
        let order: Vec<DocType> = compiled_fingerprints().iter().map(|e| e.doc_type).collect();
        assert_eq!(order, DocType::ALL.to_vec());
    }

    #[test]
    fn test_structural_types_have_no_fingerprints() {
        assert!(fingerprints(DocType::Blank).is_empty());
        assert!(fingerprints(DocType::Unknown).is_empty());
    }

    #[test]
    fn test_field_rule_confidences_in_range() {
        for doc_type in DocType::ALL {
            for rule in field_rules(doc_type) {
                assert!(
                    rule.confidence > 0.0 && rule.confidence <= 1.0,
                    "{doc_type} {}",
                    rule.field
                );
            }
        }
    }

    #[test]
    fn test_fbi_302_fingerprints_match_sample() {
        let sample = "FEDERAL BUREAU OF INVESTIGATION\nDate of transcription 11/26/63";
        let entry = compiled_fingerprints()
            .iter()
            .find(|e| e.doc_type == DocType::Fbi302)
            .unwrap();
        let hits = entry.patterns.iter().filter(|p| p.regex.is_match(sample)).count();
        assert!(hits >= 2);
    }
}
