//! Named-entity recognizers.
//!
//! - [`PatternRecognizer`] tags spans from a configurable gazetteer plus a
//!   "<Capitalized> Institute/University" organization pattern. It is the
//!   default recognizer.
//! - [`ScriptedRecognizer`] returns canned entities per text, for tests.

use std::collections::{HashMap, HashSet};

use chronicle_core::config::RecognizerConfig;
use chronicle_core::error::{ChronicleError, Result};
use chronicle_core::types::{Entity, EntityKind};
use regex::Regex;
use tracing::debug;

/// Tags entity spans in a text.
///
/// Implementations return entities in order of appearance. The extraction
/// rules only ever see this trait, never a concrete recognizer.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Result<Vec<Entity>>;
}

// ---------------------------------------------------------------------------
// PatternRecognizer
// ---------------------------------------------------------------------------

/// Gazetteer and pattern based recognizer.
///
/// Gazetteer terms match case-sensitively and only as whole words, so
/// "Java" does not fire inside "JavaScript" and "C++" still matches before
/// punctuation. When spans overlap the leftmost wins, then the longest, then
/// the kind listed first (persons, organizations, products, places, groups,
/// then suffix-pattern organizations). Repeated mentions are all reported.
#[derive(Debug, Clone)]
pub struct PatternRecognizer {
    gazetteers: Vec<(EntityKind, Regex)>,
    organization_pattern: Option<Regex>,
    non_name_words: HashSet<String>,
}

/// A tagged span before overlap resolution.
struct Candidate {
    start: usize,
    end: usize,
    kind: EntityKind,
    priority: usize,
}

impl PatternRecognizer {
    /// Compile the gazetteer and organization-suffix pattern.
    pub fn new(config: &RecognizerConfig) -> Result<Self> {
        let lists = [
            (EntityKind::Person, &config.persons),
            (EntityKind::Org, &config.organizations),
            (EntityKind::Product, &config.products),
            (EntityKind::Gpe, &config.places),
            (EntityKind::Norp, &config.groups),
        ];

        let mut gazetteers = Vec::new();
        for (kind, terms) in lists {
            if let Some(regex) = alternation(terms)? {
                gazetteers.push((kind, regex));
            }
        }

        let suffixes = escaped_terms(&config.organization_suffixes);
        let organization_pattern = if suffixes.is_empty() {
            None
        } else {
            let pattern = format!(
                r"\b(?:[A-Z][\w&.'-]*\s+){{1,3}}(?:{})\b",
                suffixes.join("|")
            );
            Some(Regex::new(&pattern).map_err(|e| {
                ChronicleError::Recognizer(format!("organization pattern: {}", e))
            })?)
        };

        Ok(Self {
            gazetteers,
            organization_pattern,
            non_name_words: config.non_name_words.iter().cloned().collect(),
        })
    }

    fn candidates(&self, text: &str) -> Vec<Candidate> {
        let mut found = Vec::new();

        for (priority, (kind, regex)) in self.gazetteers.iter().enumerate() {
            for m in regex.find_iter(text) {
                if is_whole_word(text, m.start(), m.end()) {
                    found.push(Candidate {
                        start: m.start(),
                        end: m.end(),
                        kind: kind.clone(),
                        priority,
                    });
                }
            }
        }

        if let Some(regex) = &self.organization_pattern {
            for m in regex.find_iter(text) {
                let Some(start) = self.name_start(text, m.start(), m.end()) else {
                    continue;
                };
                found.push(Candidate {
                    start,
                    end: m.end(),
                    kind: EntityKind::Org,
                    priority: self.gazetteers.len(),
                });
            }
        }

        found
    }

    /// Start of an organization-suffix match once leading non-name words are
    /// skipped. `None` when only the suffix would remain.
    fn name_start(&self, text: &str, start: usize, end: usize) -> Option<usize> {
        let span = &text[start..end];
        let mut offset = 0;
        loop {
            let rest = &span[offset..];
            let word_end = rest.find(char::is_whitespace)?;
            if !self.non_name_words.contains(&rest[..word_end]) {
                return Some(start + offset);
            }
            let after = &rest[word_end..];
            offset += word_end + (after.len() - after.trim_start().len());
        }
    }
}

impl Default for PatternRecognizer {
    fn default() -> Self {
        Self::new(&RecognizerConfig::default()).expect("Invalid default recognizer patterns")
    }
}

impl EntityRecognizer for PatternRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<Entity>> {
        let mut candidates = self.candidates(text);
        candidates.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then((b.end - b.start).cmp(&(a.end - a.start)))
                .then(a.priority.cmp(&b.priority))
        });

        let mut entities = Vec::new();
        let mut covered_until = 0;
        for candidate in candidates {
            if candidate.start < covered_until {
                continue;
            }
            covered_until = candidate.end;
            entities.push(Entity::new(
                &text[candidate.start..candidate.end],
                candidate.kind,
            ));
        }

        debug!(entities = entities.len(), "Recognized entities");
        Ok(entities)
    }
}

/// Escape and order terms longest first so alternation prefers the longer
/// of two terms sharing a prefix.
fn escaped_terms(terms: &[String]) -> Vec<String> {
    let mut terms: Vec<&str> = terms
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    terms.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    terms.dedup();
    terms.into_iter().map(regex::escape).collect()
}

fn alternation(terms: &[String]) -> Result<Option<Regex>> {
    let escaped = escaped_terms(terms);
    if escaped.is_empty() {
        return Ok(None);
    }
    Regex::new(&format!("(?:{})", escaped.join("|")))
        .map(Some)
        .map_err(|e| ChronicleError::Recognizer(format!("gazetteer pattern: {}", e)))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A span is a whole word when no word character touches either edge.
fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

// ---------------------------------------------------------------------------
// ScriptedRecognizer
// ---------------------------------------------------------------------------

/// Returns a fixed entity list per input text.
///
/// Texts without a scripted response yield no entities, or a
/// [`ChronicleError::Recognizer`] error once [`ScriptedRecognizer::strict`]
/// is set.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRecognizer {
    responses: HashMap<String, Vec<Entity>>,
    strict: bool,
}

impl ScriptedRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the entities returned for `text`.
    pub fn with_response(mut self, text: impl Into<String>, entities: Vec<Entity>) -> Self {
        self.responses.insert(text.into(), entities);
        self
    }

    /// Fail on texts that have no scripted response.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

impl EntityRecognizer for ScriptedRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<Entity>> {
        match self.responses.get(text) {
            Some(entities) => Ok(entities.clone()),
            None if self.strict => Err(ChronicleError::Recognizer(format!(
                "no scripted response for '{}'",
                text
            ))),
            None => Ok(Vec::new()),
        }
    }
}
