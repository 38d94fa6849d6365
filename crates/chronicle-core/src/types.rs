use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChronicleError, Result};

// =============================================================================
// Enums
// =============================================================================

/// Closed set of activity categories a post can be classified into.
///
/// Variant order is the lexicographic order of the labels; the categorizer
/// relies on it to break score ties deterministically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryLabel {
    /// A completed certification ("Completed C++ certification ...").
    Certification,
    /// A course taken or started.
    Course,
    /// Something the author built.
    Project,
}

impl CategoryLabel {
    /// Every label, in tie-breaking order.
    pub const ALL: [CategoryLabel; 3] = [
        CategoryLabel::Certification,
        CategoryLabel::Course,
        CategoryLabel::Project,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Certification => "certification",
            Self::Course => "course",
            Self::Project => "project",
        }
    }

    /// Parse a label, ignoring surrounding whitespace and ASCII case.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "certification" => Ok(Self::Certification),
            "course" => Ok(Self::Course),
            "project" => Ok(Self::Project),
            _ => Err(ChronicleError::UnknownCategory(s.to_string())),
        }
    }

    /// Position of this label in [`CategoryLabel::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Self::Certification => 0,
            Self::Course => 1,
            Self::Project => 2,
        }
    }

    /// Inverse of [`CategoryLabel::index`].
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| ChronicleError::UnknownCategory(format!("label index {}", index)))
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryLabel {
    type Err = ChronicleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Kind of a recognized entity span.
///
/// The set is open: recognizers may emit labels this crate does not name,
/// which are carried through as [`EntityKind::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum EntityKind {
    /// Companies, agencies, institutions.
    Org,
    /// Objects, products, technologies.
    Product,
    /// Countries, cities, states.
    Gpe,
    /// Nationalities or religious or political groups.
    Norp,
    /// People, including fictional.
    Person,
    /// Any other recognizer label, stored verbatim.
    Other(String),
}

impl EntityKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Org => "ORG",
            Self::Product => "PRODUCT",
            Self::Gpe => "GPE",
            Self::Norp => "NORP",
            Self::Person => "PERSON",
            Self::Other(label) => label,
        }
    }

    /// Map a recognizer label onto a kind. Matching is case-sensitive, as
    /// recognizer tag sets are.
    pub fn parse(label: &str) -> Self {
        match label {
            "ORG" => Self::Org,
            "PRODUCT" => Self::Product,
            "GPE" => Self::Gpe,
            "NORP" => Self::Norp,
            "PERSON" => Self::Person,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for EntityKind {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

impl From<EntityKind> for String {
    fn from(kind: EntityKind) -> Self {
        kind.as_str().to_string()
    }
}

// =============================================================================
// Inputs
// =============================================================================

/// A labeled example from the training corpus.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub text: String,
    pub label: CategoryLabel,
}

impl TrainingExample {
    pub fn new(text: impl Into<String>, label: CategoryLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// A raw activity post awaiting classification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub text: String,
    /// Calendar date as supplied (e.g. `2022-07-22`); parsed by the timeline.
    pub timestamp: String,
}

impl Post {
    pub fn new(text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// One span tagged by an entity recognizer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub span_text: String,
    pub entity_label: EntityKind,
}

impl Entity {
    pub fn new(span_text: impl Into<String>, entity_label: EntityKind) -> Self {
        Self {
            span_text: span_text.into(),
            entity_label,
        }
    }
}

// =============================================================================
// Outputs
// =============================================================================

/// Structured fields extracted from one post.
///
/// One variant per category, each carrying only its own fields. Serializes
/// flat, e.g. `{"category": "course", "timestamp": "...", "course_name": ...}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum ExtractedRecord {
    Certification {
        timestamp: String,
        /// PRODUCT entities joined by spaces; empty when none were tagged.
        #[serde(rename = "certification_topic")]
        topic: String,
        /// ORG, PRODUCT, GPE and NORP entities in mention order.
        #[serde(rename = "certification_company")]
        company: Vec<String>,
    },
    Course {
        timestamp: String,
        #[serde(rename = "course_name")]
        name: String,
        /// ORG and PRODUCT entities in mention order.
        #[serde(rename = "course_provider")]
        provider: Vec<String>,
    },
    Project {
        timestamp: String,
        #[serde(rename = "project_name")]
        name: String,
        /// PRODUCT entities in mention order.
        #[serde(rename = "project_topic")]
        topic: Vec<String>,
    },
}

impl ExtractedRecord {
    pub fn category(&self) -> CategoryLabel {
        match self {
            Self::Certification { .. } => CategoryLabel::Certification,
            Self::Course { .. } => CategoryLabel::Course,
            Self::Project { .. } => CategoryLabel::Project,
        }
    }

    pub fn timestamp(&self) -> &str {
        match self {
            Self::Certification { timestamp, .. }
            | Self::Course { timestamp, .. }
            | Self::Project { timestamp, .. } => timestamp,
        }
    }
}
