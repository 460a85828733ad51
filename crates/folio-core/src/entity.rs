//! Entity linking against a reference registry.
//!
//! The registry (people, places, organizations) is compiled once into an
//! [`EntityIndex`]: one word-boundary pattern per name variant worth
//! matching, plus flat name lists for fuzzy lookup. The index is read-only
//! after build and safe to share across threads; refreshing the registry
//! means building a new index and swapping it in, never mutating in place.
//!
//! Matching runs in two stages (exact patterns, then fuzzy proper-noun
//! scanning when a scorer is available), followed by overlap resolution:
//! longest span wins, then highest score, and no entity id is accepted
//! twice. Name-shaped spans that survive resolution unclaimed are reported
//! separately as new candidates for human triage.

use crate::error::{FolioError, Result};
use crate::fuzzy::FuzzyScorer;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

/// Kind of registry entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Person,
    Place,
    Org,
}

/// How a match was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    /// Canonical name or generated variant matched verbatim.
    Exact,
    /// A registered alias matched verbatim.
    Alias,
    /// Approximate token-set match.
    Fuzzy,
    /// Name-shaped span with no registry backing.
    Pattern,
}

/// Review status of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Matched,
    NewCandidate,
}

/// A single entity mention found in text.
///
/// `span` is a byte range into the scanned text. Within one resolved match
/// set no two spans overlap and no entity id repeats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityMatch {
    pub matched_text: String,
    pub entity_type: EntityKind,
    /// Registry id; `None` marks a new candidate not yet in the registry.
    pub entity_id: Option<String>,
    pub display_name: String,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    pub method: MatchMethod,
    pub span: (usize, usize),
    pub status: MatchStatus,
}

impl EntityMatch {
    fn span_len(&self) -> usize {
        self.span.1 - self.span.0
    }

    fn overlaps(&self, other: &EntityMatch) -> bool {
        self.span.0 < other.span.1 && self.span.1 > other.span.0
    }
}

/// Sidecar-shaped linking output: resolved matches, unclaimed candidates,
/// and summary counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityReport {
    pub entities: Vec<EntityMatch>,
    pub new_candidates: Vec<EntityMatch>,
    pub summary: EntitySummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySummary {
    pub matched: usize,
    pub candidates: usize,
    pub persons: usize,
    pub places: usize,
    pub orgs: usize,
}

// =============================================================================
// REGISTRY RECORDS (load format)
// =============================================================================

/// Registry file layout:
///
/// ```json
/// {
///   "persons": [{"id": "p-1", "display_name": "Lee Harvey Oswald",
///                "given_name": "Lee", "family_name": "Oswald"}],
///   "aliases": [{"person_id": "p-1", "alias_value": "A. Hidell"}],
///   "places":  [{"id": "pl-1", "name": "Dealey Plaza"}],
///   "orgs":    [{"id": "o-1", "name": "Warren Commission"}]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryRecords {
    #[serde(default)]
    pub persons: Vec<PersonRecord>,
    #[serde(default)]
    pub aliases: Vec<AliasRecord>,
    #[serde(default)]
    pub places: Vec<NamedRecord>,
    #[serde(default)]
    pub orgs: Vec<NamedRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonRecord {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasRecord {
    pub person_id: String,
    pub alias_value: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedRecord {
    pub id: String,
    pub name: String,
}

// =============================================================================
// ENTITY INDEX
// =============================================================================

struct CompiledVariant {
    regex: Regex,
    entity_id: String,
    display_name: String,
    kind: EntityKind,
    method: MatchMethod,
    /// Length of the source variant, used to order patterns longest-first.
    variant_len: usize,
}

struct MasterName {
    name: String,
    entity_id: String,
    display_name: String,
}

/// Read-only entity lookup structure, built once per registry load.
pub struct EntityIndex {
    variants: Vec<CompiledVariant>,
    person_names: Vec<MasterName>,
    place_names: Vec<MasterName>,
    person_count: usize,
    alias_count: usize,
    place_count: usize,
    org_count: usize,
    loaded_at: chrono::DateTime<chrono::Utc>,
}

impl EntityIndex {
    /// Build an index from registry records.
    pub fn from_records(records: &RegistryRecords) -> Result<Self> {
        let mut variants = Vec::new();
        let mut person_names = Vec::new();
        let mut place_names = Vec::new();

        for person in &records.persons {
            if person.display_name.trim().is_empty() {
                return Err(FolioError::Registry(format!(
                    "person {} has an empty display name",
                    person.id
                )));
            }
            let names = person_variants(person);
            for name in &names {
                variants.push(compile_variant(
                    name,
                    &person.id,
                    &person.display_name,
                    EntityKind::Person,
                    MatchMethod::Exact,
                )?);
            }
            for name in names {
                person_names.push(MasterName {
                    name,
                    entity_id: person.id.clone(),
                    display_name: person.display_name.clone(),
                });
            }
        }

        for alias in &records.aliases {
            let display = alias
                .display_name
                .clone()
                .or_else(|| {
                    records
                        .persons
                        .iter()
                        .find(|p| p.id == alias.person_id)
                        .map(|p| p.display_name.clone())
                })
                .unwrap_or_else(|| alias.alias_value.clone());
            if alias.alias_value.trim().len() < 3 {
                continue;
            }
            variants.push(compile_variant(
                &alias.alias_value,
                &alias.person_id,
                &display,
                EntityKind::Person,
                MatchMethod::Alias,
            )?);
            person_names.push(MasterName {
                name: alias.alias_value.clone(),
                entity_id: alias.person_id.clone(),
                display_name: display,
            });
        }

        for place in &records.places {
            if place.name.trim().len() < 3 {
                continue;
            }
            variants.push(compile_variant(
                &place.name,
                &place.id,
                &place.name,
                EntityKind::Place,
                MatchMethod::Exact,
            )?);
            place_names.push(MasterName {
                name: place.name.clone(),
                entity_id: place.id.clone(),
                display_name: place.name.clone(),
            });
        }

        for org in &records.orgs {
            if org.name.trim().len() < 3 {
                continue;
            }
            variants.push(compile_variant(
                &org.name,
                &org.id,
                &org.name,
                EntityKind::Org,
                MatchMethod::Exact,
            )?);
        }

        // Longest variants first so specific patterns get first claim on
        // overlapping text during collection.
        variants.sort_by(|a, b| b.variant_len.cmp(&a.variant_len));

        debug!(
            variants = variants.len(),
            persons = records.persons.len(),
            "entity index built"
        );

        Ok(EntityIndex {
            variants,
            person_names,
            place_names,
            person_count: records.persons.len(),
            alias_count: records.aliases.len(),
            place_count: records.places.len(),
            org_count: records.orgs.len(),
            loaded_at: chrono::Utc::now(),
        })
    }

    /// Load an index from a registry JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let records: RegistryRecords = serde_json::from_str(&raw)?;
        Self::from_records(&records)
    }

    /// An empty index: linking against it yields no matches, only pattern
    /// candidates.
    pub fn empty() -> Self {
        Self::from_records(&RegistryRecords::default()).expect("empty registry always builds")
    }

    /// A small built-in registry for offline use and tests.
    pub fn sample() -> Self {
        let records: RegistryRecords =
            serde_json::from_str(SAMPLE_REGISTRY).expect("sample registry is valid");
        Self::from_records(&records).expect("sample registry always builds")
    }

    /// Total indexed records (persons + aliases + places + orgs).
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.person_count + self.alias_count + self.place_count + self.org_count
    }

    #[must_use]
    pub fn loaded_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.loaded_at
    }
}

/// Name variants worth matching for one person record.
fn person_variants(person: &PersonRecord) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let display = person.display_name.trim();
    names.push(display.to_string());

    if let (Some(given), Some(family)) = (&person.given_name, &person.family_name) {
        let given = given.trim();
        let family = family.trim();
        if !given.is_empty() && !family.is_empty() {
            names.push(format!("{given} {family}"));
            if let Some(initial) = given.chars().next() {
                names.push(format!("{initial}. {family}"));
            }
        }
    }

    // "Oswald, Lee Harvey" also matches as "Lee Harvey Oswald" and
    // "L. Oswald".
    if let Some((last, first)) = display.split_once(',') {
        let last = last.trim();
        let first = first.trim();
        if !last.is_empty() && !first.is_empty() {
            names.push(format!("{first} {last}"));
            if let Some(initial) = first.chars().next() {
                names.push(format!("{initial}. {last}"));
            }
        }
    }

    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|n| n.len() > 2)
        .filter(|n| seen.insert(n.to_lowercase()))
        .collect()
}

fn compile_variant(
    name: &str,
    entity_id: &str,
    display_name: &str,
    kind: EntityKind,
    method: MatchMethod,
) -> Result<CompiledVariant> {
    let pattern = format!(r"\b{}\b", regex::escape(name.trim()));
    let regex = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| FolioError::Registry(format!("variant {name:?} failed to compile: {e}")))?;
    Ok(CompiledVariant {
        regex,
        entity_id: entity_id.to_string(),
        display_name: display_name.to_string(),
        kind,
        method,
        variant_len: name.trim().chars().count(),
    })
}

// =============================================================================
// LINKER
// =============================================================================

/// Capitalized-word runs considered as fuzzy / new-candidate material.
static RE_PROPER_NOUN_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").expect("valid proper noun regex")
});

/// Name-shaped spans ("First Last", "First M. Last") for candidate
/// discovery.
static RE_NAME_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][a-z]+(?:\s+[A-Z]\.?\s*)?(?:\s+[A-Z][a-z]+)+)\b")
        .expect("valid name shape regex")
});

/// Minimum token-set score for a fuzzy entity candidate.
const FUZZY_ENTITY_CUTOFF: f64 = 88.0;
/// Minimum length of a proper-noun run considered for fuzzy matching.
const FUZZY_MIN_CANDIDATE_LEN: usize = 4;
/// Minimum length of a name-shaped span reported as a new candidate.
const CANDIDATE_MIN_LEN: usize = 5;
/// Confidence assigned to new candidates awaiting triage.
const CANDIDATE_CONFIDENCE: f64 = 0.7;

/// Links text mentions to registry records.
///
/// Holds a shared reference to the index plus an optional fuzzy scorer;
/// cheap to construct per call site.
pub struct EntityLinker<'a> {
    index: &'a EntityIndex,
    fuzzy: Option<&'a dyn FuzzyScorer>,
}

impl<'a> EntityLinker<'a> {
    /// Exact-only linker.
    #[must_use]
    pub fn new(index: &'a EntityIndex) -> Self {
        EntityLinker { index, fuzzy: None }
    }

    /// Linker with an approximate-matching capability.
    #[must_use]
    pub fn with_fuzzy(index: &'a EntityIndex, scorer: &'a dyn FuzzyScorer) -> Self {
        EntityLinker { index, fuzzy: Some(scorer) }
    }

    /// Find and resolve entity mentions in `text`.
    ///
    /// The returned set is overlap-free and id-unique, ordered by position.
    #[must_use]
    pub fn link(&self, text: &str) -> Vec<EntityMatch> {
        let mut candidates = self.collect_exact(text);
        if let Some(scorer) = self.fuzzy {
            candidates.extend(self.collect_fuzzy(text, scorer));
        }
        resolve(candidates)
    }

    /// Name-shaped spans not covered by any accepted match.
    ///
    /// Additive output for human triage; never part of the resolved set.
    #[must_use]
    pub fn new_candidates(&self, text: &str, resolved: &[EntityMatch]) -> Vec<EntityMatch> {
        let mut covered: Vec<(usize, usize)> =
            resolved.iter().map(|m| m.span).collect();
        covered.sort_unstable();

        RE_NAME_SHAPE
            .captures_iter(text)
            .filter_map(|caps| {
                let m = caps.get(1)?;
                let span = (m.start(), m.end());
                if m.as_str().chars().count() < CANDIDATE_MIN_LEN {
                    return None;
                }
                let overlaps = covered
                    .iter()
                    .any(|&(start, end)| span.0 < end && span.1 > start);
                if overlaps {
                    return None;
                }
                Some(EntityMatch {
                    matched_text: m.as_str().to_string(),
                    entity_type: EntityKind::Person,
                    entity_id: None,
                    display_name: m.as_str().to_string(),
                    confidence: CANDIDATE_CONFIDENCE,
                    method: MatchMethod::Pattern,
                    span,
                    status: MatchStatus::NewCandidate,
                })
            })
            .collect()
    }

    /// Full linking report: resolved matches, new candidates, summary.
    #[must_use]
    pub fn report(&self, text: &str) -> EntityReport {
        let entities = self.link(text);
        let new_candidates = self.new_candidates(text, &entities);
        let count = |kind: EntityKind| entities.iter().filter(|m| m.entity_type == kind).count();
        let summary = EntitySummary {
            matched: entities.len(),
            candidates: new_candidates.len(),
            persons: count(EntityKind::Person),
            places: count(EntityKind::Place),
            orgs: count(EntityKind::Org),
        };
        EntityReport { entities, new_candidates, summary }
    }

    fn collect_exact(&self, text: &str) -> Vec<EntityMatch> {
        let mut matches = Vec::new();
        for variant in &self.index.variants {
            for m in variant.regex.find_iter(text) {
                matches.push(EntityMatch {
                    matched_text: m.as_str().to_string(),
                    entity_type: variant.kind,
                    entity_id: Some(variant.entity_id.clone()),
                    display_name: variant.display_name.clone(),
                    confidence: match variant.method {
                        MatchMethod::Alias => 0.95,
                        _ => 1.0,
                    },
                    method: variant.method,
                    span: (m.start(), m.end()),
                    status: MatchStatus::Matched,
                });
            }
        }
        matches
    }

    fn collect_fuzzy(&self, text: &str, scorer: &dyn FuzzyScorer) -> Vec<EntityMatch> {
        let mut matches = Vec::new();
        for m in RE_PROPER_NOUN_RUN.find_iter(text) {
            let candidate = m.as_str();
            if candidate.chars().count() < FUZZY_MIN_CANDIDATE_LEN {
                continue;
            }
            if let Some((best, score)) =
                best_fuzzy(candidate, &self.index.person_names, scorer)
            {
                if score >= FUZZY_ENTITY_CUTOFF {
                    matches.push(fuzzy_match(m, best, score, EntityKind::Person));
                }
            }
            if let Some((best, score)) = best_fuzzy(candidate, &self.index.place_names, scorer) {
                if score >= FUZZY_ENTITY_CUTOFF {
                    matches.push(fuzzy_match(m, best, score, EntityKind::Place));
                }
            }
        }
        matches
    }
}

fn best_fuzzy<'n>(
    candidate: &str,
    names: &'n [MasterName],
    scorer: &dyn FuzzyScorer,
) -> Option<(&'n MasterName, f64)> {
    names
        .iter()
        .map(|name| (name, scorer.token_set_ratio(candidate, &name.name)))
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
}

fn fuzzy_match(
    m: regex::Match<'_>,
    name: &MasterName,
    score: f64,
    kind: EntityKind,
) -> EntityMatch {
    EntityMatch {
        matched_text: m.as_str().to_string(),
        entity_type: kind,
        entity_id: Some(name.entity_id.clone()),
        display_name: name.display_name.clone(),
        confidence: score / 100.0,
        method: MatchMethod::Fuzzy,
        span: (m.start(), m.end()),
        status: MatchStatus::Matched,
    }
}

/// Overlap resolution: longest span first, then highest confidence; accept a
/// candidate only if its span is disjoint from every accepted span and its
/// entity id is unclaimed. Output is re-sorted by position.
fn resolve(mut candidates: Vec<EntityMatch>) -> Vec<EntityMatch> {
    candidates.sort_by(|a, b| {
        b.span_len()
            .cmp(&a.span_len())
            .then(b.confidence.partial_cmp(&a.confidence).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut accepted: Vec<EntityMatch> = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();
    for candidate in candidates {
        let overlap = accepted.iter().any(|a| a.overlaps(&candidate));
        if overlap {
            continue;
        }
        if let Some(id) = &candidate.entity_id {
            if !seen_ids.insert(id.clone()) {
                continue;
            }
        }
        accepted.push(candidate);
    }

    accepted.sort_by_key(|m| m.span.0);
    accepted
}

const SAMPLE_REGISTRY: &str = r#"{
  "persons": [
    {"id": "person-001", "display_name": "Ralph Leon Yates", "given_name": "Ralph", "family_name": "Yates"},
    {"id": "person-002", "display_name": "Lee Harvey Oswald", "given_name": "Lee", "family_name": "Oswald"},
    {"id": "person-003", "display_name": "Jack Ruby", "given_name": "Jack", "family_name": "Ruby"},
    {"id": "person-004", "display_name": "Marina Oswald", "given_name": "Marina", "family_name": "Oswald"},
    {"id": "person-005", "display_name": "J. D. Tippit"}
  ],
  "aliases": [
    {"person_id": "person-002", "alias_value": "Lee Oswald"},
    {"person_id": "person-002", "alias_value": "L.H. Oswald"},
    {"person_id": "person-002", "alias_value": "A. Hidell"},
    {"person_id": "person-003", "alias_value": "Jacob Rubenstein"}
  ],
  "places": [
    {"id": "place-001", "name": "Dallas"},
    {"id": "place-002", "name": "Dealey Plaza"},
    {"id": "place-003", "name": "Texas School Book Depository"},
    {"id": "place-004", "name": "Parkland Hospital"},
    {"id": "place-005", "name": "Oak Cliff"}
  ],
  "orgs": [
    {"id": "org-001", "name": "FBI"},
    {"id": "org-002", "name": "CIA"},
    {"id": "org-003", "name": "Dallas Police Department"},
    {"id": "org-004", "name": "Secret Service"},
    {"id": "org-005", "name": "Warren Commission"}
  ]
}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzy::StrsimScorer;

    #[test]
    fn test_exact_person_match() {
        let index = EntityIndex::sample();
        let linker = EntityLinker::new(&index);
        let matches = linker.link("Ralph Leon Yates reported the incident.");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].entity_id.as_deref(), Some("person-001"));
        assert_eq!(matches[0].method, MatchMethod::Exact);
        assert!((matches[0].confidence - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_alias_match_links_to_canonical_record() {
        let index = EntityIndex::sample();
        let linker = EntityLinker::new(&index);
        let matches = linker.link("The package was addressed to A. Hidell at the post office box.");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].entity_id.as_deref(), Some("person-002"));
        assert_eq!(matches[0].display_name, "Lee Harvey Oswald");
        assert_eq!(matches[0].method, MatchMethod::Alias);
    }

    #[test]
    fn test_overlap_favors_longest_span() {
        // "Dallas" (place) fires inside "Dallas Police Department" (org);
        // the longer span must win and consume the shorter one.
        let index = EntityIndex::sample();
        let linker = EntityLinker::new(&index);
        let matches = linker.link("Officers of the Dallas Police Department responded.");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].matched_text, "Dallas Police Department");
        assert_eq!(matches[0].entity_type, EntityKind::Org);
    }

    #[test]
    fn test_no_entity_id_accepted_twice() {
        let index = EntityIndex::sample();
        let linker = EntityLinker::new(&index);
        let matches = linker.link("Lee Harvey Oswald, also recorded as Lee Oswald, was detained.");
        let oswald_matches = matches
            .iter()
            .filter(|m| m.entity_id.as_deref() == Some("person-002"))
            .count();
        assert_eq!(oswald_matches, 1);
    }

    #[test]
    fn test_resolved_set_has_no_overlaps() {
        let index = EntityIndex::sample();
        let scorer = StrsimScorer;
        let linker = EntityLinker::with_fuzzy(&index, &scorer);
        let matches = linker.link(
            "Jack Ruby was seen near the Texas School Book Depository in Dallas \
             while the Dallas Police Department secured Dealey Plaza.",
        );
        for (i, a) in matches.iter().enumerate() {
            for b in matches.iter().skip(i + 1) {
                assert!(!a.overlaps(b), "{:?} overlaps {:?}", a.span, b.span);
            }
        }
    }

    #[test]
    fn test_fuzzy_matches_garbled_name() {
        let index = EntityIndex::sample();
        let scorer = StrsimScorer;
        let linker = EntityLinker::with_fuzzy(&index, &scorer);
        // Middle name present in text but not in registry display name.
        let matches = linker.link("Marina Nicolaevna Oswald answered the question.");
        let marina = matches
            .iter()
            .find(|m| m.entity_id.as_deref() == Some("person-004"));
        assert!(marina.is_some(), "expected fuzzy match, got {matches:?}");
        assert_eq!(marina.unwrap().method, MatchMethod::Fuzzy);
    }

    #[test]
    fn test_exact_only_when_fuzzy_absent() {
        let index = EntityIndex::sample();
        let linker = EntityLinker::new(&index);
        let matches = linker.link("Marina Nicolaevna Oswald answered the question.");
        assert!(
            matches.iter().all(|m| m.method != MatchMethod::Fuzzy),
            "no fuzzy matches expected without a scorer"
        );
    }

    #[test]
    fn test_empty_registry_yields_no_matches() {
        let index = EntityIndex::empty();
        let linker = EntityLinker::new(&index);
        assert!(linker.link("Lee Harvey Oswald in Dallas.").is_empty());
    }

    #[test]
    fn test_new_candidates_exclude_linked_spans() {
        let index = EntityIndex::sample();
        let linker = EntityLinker::new(&index);
        let text = "Jack Ruby spoke with Wanda Helmick about the incident.";
        let resolved = linker.link(text);
        let candidates = linker.new_candidates(text, &resolved);
        assert!(candidates.iter().any(|c| c.matched_text == "Wanda Helmick"));
        assert!(candidates.iter().all(|c| c.matched_text != "Jack Ruby"));
        for candidate in &candidates {
            assert_eq!(candidate.status, MatchStatus::NewCandidate);
            assert!(candidate.entity_id.is_none());
            assert!((candidate.confidence - 0.7).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_report_summary_counts() {
        let index = EntityIndex::sample();
        let linker = EntityLinker::new(&index);
        let report = linker.report("Jack Ruby met Ralph Leon Yates in Dallas near the FBI office.");
        assert_eq!(report.summary.matched, report.entities.len());
        assert_eq!(report.summary.persons, 2);
        assert_eq!(report.summary.places, 1);
        assert_eq!(report.summary.orgs, 1);
    }

    #[test]
    fn test_registry_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");
        std::fs::write(&path, SAMPLE_REGISTRY).unwrap();

        let index = EntityIndex::from_json_file(&path).unwrap();
        assert_eq!(index.total_count(), EntityIndex::sample().total_count());
    }

    #[test]
    fn test_rejects_person_without_display_name() {
        let records: RegistryRecords = serde_json::from_str(
            r#"{"persons": [{"id": "p-1", "display_name": "  "}]}"#,
        )
        .unwrap();
        assert!(EntityIndex::from_records(&records).is_err());
    }

    #[test]
    fn test_last_first_display_generates_reversed_variant() {
        let records: RegistryRecords = serde_json::from_str(
            r#"{"persons": [{"id": "p-1", "display_name": "Oswald, Lee Harvey"}]}"#,
        )
        .unwrap();
        let index = EntityIndex::from_records(&records).unwrap();
        let linker = EntityLinker::new(&index);
        let matches = linker.link("Lee Harvey Oswald entered the building.");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].entity_id.as_deref(), Some("p-1"));
    }

    #[test]
    fn test_initial_variant_matches() {
        let index = EntityIndex::sample();
        let linker = EntityLinker::new(&index);
        let matches = linker.link("Statement taken from L. Oswald on the premises.");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].entity_id.as_deref(), Some("person-002"));
    }
}
