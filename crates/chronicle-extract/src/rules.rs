//! Category-specific field extraction.
//!
//! | category | fields |
//! |---|---|
//! | certification | topic = PRODUCT spans joined; company = ORG, PRODUCT, GPE, NORP spans |
//! | course | name = words before the course keyword; provider = ORG, PRODUCT spans |
//! | project | name = words `[start, end)` of the post; topic = PRODUCT spans |
//!
//! Heuristics that find nothing yield empty strings or lists, never errors.

use chronicle_core::config::ExtractionConfig;
use chronicle_core::error::Result;
use chronicle_core::types::{CategoryLabel, Entity, EntityKind, ExtractedRecord};
use tracing::debug;

use crate::recognizer::EntityRecognizer;

/// Builds an [`ExtractedRecord`] from a post text and its category.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractionConfig,
}

impl Extractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Run `recognizer` over `text` and apply the rules for `category`.
    pub fn extract<R>(
        &self,
        text: &str,
        category: CategoryLabel,
        timestamp: &str,
        recognizer: &R,
    ) -> Result<ExtractedRecord>
    where
        R: EntityRecognizer + ?Sized,
    {
        let entities = recognizer.recognize(text)?;
        let record = self.extract_from_entities(text, category, timestamp, &entities);
        debug!(
            category = %category,
            entities = entities.len(),
            "Extracted record"
        );
        Ok(record)
    }

    /// Apply the rules for `category` to already recognized entities.
    pub fn extract_from_entities(
        &self,
        text: &str,
        category: CategoryLabel,
        timestamp: &str,
        entities: &[Entity],
    ) -> ExtractedRecord {
        let timestamp = timestamp.to_string();
        match category {
            CategoryLabel::Certification => ExtractedRecord::Certification {
                timestamp,
                topic: spans_of(entities, &[EntityKind::Product]).join(" "),
                company: spans_of(
                    entities,
                    &[
                        EntityKind::Org,
                        EntityKind::Product,
                        EntityKind::Gpe,
                        EntityKind::Norp,
                    ],
                ),
            },
            CategoryLabel::Course => {
                let candidate =
                    spans_of(entities, &[EntityKind::Person, EntityKind::Product]).join(" ");
                ExtractedRecord::Course {
                    timestamp,
                    name: self.course_name(text).unwrap_or(candidate),
                    provider: spans_of(entities, &[EntityKind::Org, EntityKind::Product]),
                }
            }
            CategoryLabel::Project => ExtractedRecord::Project {
                timestamp,
                name: self.project_name(text),
                topic: spans_of(entities, &[EntityKind::Product]),
            },
        }
    }

    /// Words preceding the first whole-word occurrence of the course keyword.
    ///
    /// `None` when the keyword does not occur. When fewer words than the
    /// window precede it the name is empty.
    fn course_name(&self, text: &str) -> Option<String> {
        let keyword = self.config.course_keyword.to_lowercase();
        let words: Vec<&str> = text.split_whitespace().collect();
        let position = words.iter().position(|w| w.to_lowercase() == keyword)?;
        let window = self.config.course_name_window;
        if position < window {
            return Some(String::new());
        }
        Some(words[position - window..position].join(" "))
    }

    /// Words `[project_name_start, project_name_end)`, clamped to the text.
    fn project_name(&self, text: &str) -> String {
        let words: Vec<&str> = text.split_whitespace().collect();
        let end = self.config.project_name_end.min(words.len());
        let start = self.config.project_name_start.min(end);
        words[start..end].join(" ")
    }
}

fn spans_of(entities: &[Entity], kinds: &[EntityKind]) -> Vec<String> {
    entities
        .iter()
        .filter(|e| kinds.contains(&e.entity_label))
        .map(|e| e.span_text.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::{PatternRecognizer, ScriptedRecognizer};
    use chronicle_core::error::ChronicleError;

    fn extractor() -> Extractor {
        Extractor::default()
    }

    fn extract(text: &str, category: CategoryLabel) -> ExtractedRecord {
        extractor()
            .extract(text, category, "2022-01-01", &PatternRecognizer::default())
            .unwrap()
    }

    fn course_name(record: &ExtractedRecord) -> &str {
        match record {
            ExtractedRecord::Course { name, .. } => name,
            other => panic!("expected course record, got {:?}", other),
        }
    }

    // =========================================================================
    // Certification
    // =========================================================================

    #[test]
    fn test_certification_company_from_organization() {
        let record = extract(
            "Completed Machine Learning certification at Coursera",
            CategoryLabel::Certification,
        );
        match record {
            ExtractedRecord::Certification {
                timestamp,
                topic,
                company,
            } => {
                assert_eq!(timestamp, "2022-01-01");
                assert!(company.contains(&"Coursera".to_string()));
                assert_eq!(topic, "");
            }
            other => panic!("expected certification record, got {:?}", other),
        }
    }

    #[test]
    fn test_certification_topic_joins_products() {
        let entities = vec![
            Entity::new("AWS", EntityKind::Product),
            Entity::new("Amazon", EntityKind::Org),
            Entity::new("Solutions Architect", EntityKind::Product),
            Entity::new("Berlin", EntityKind::Gpe),
            Entity::new("European", EntityKind::Norp),
            Entity::new("Jeff", EntityKind::Person),
            Entity::new("2021", EntityKind::Other("DATE".to_string())),
        ];
        let record = extractor().extract_from_entities(
            "irrelevant",
            CategoryLabel::Certification,
            "2021-05-05",
            &entities,
        );
        assert_eq!(
            record,
            ExtractedRecord::Certification {
                timestamp: "2021-05-05".to_string(),
                topic: "AWS Solutions Architect".to_string(),
                company: vec![
                    "AWS".to_string(),
                    "Amazon".to_string(),
                    "Solutions Architect".to_string(),
                    "Berlin".to_string(),
                    "European".to_string(),
                ],
            }
        );
    }

    #[test]
    fn test_certification_with_symbolic_product() {
        let record = extract(
            "Completed C++ certification offered by XYZ Institute",
            CategoryLabel::Certification,
        );
        assert_eq!(
            record,
            ExtractedRecord::Certification {
                timestamp: "2022-01-01".to_string(),
                topic: "C++".to_string(),
                company: vec!["C++".to_string(), "XYZ Institute".to_string()],
            }
        );
    }

    #[test]
    fn test_certification_company_excludes_opening_verb() {
        let record = extract(
            "Graduated Stanford University with a Python certification",
            CategoryLabel::Certification,
        );
        assert_eq!(
            record,
            ExtractedRecord::Certification {
                timestamp: "2022-01-01".to_string(),
                topic: "Python".to_string(),
                company: vec!["Stanford University".to_string(), "Python".to_string()],
            }
        );
    }

    // =========================================================================
    // Course
    // =========================================================================

    #[test]
    fn test_course_name_precedes_keyword() {
        let record = extract(
            "Started Python programming course provided by Udemy",
            CategoryLabel::Course,
        );
        assert_eq!(
            record,
            ExtractedRecord::Course {
                timestamp: "2022-01-01".to_string(),
                name: "Python programming".to_string(),
                provider: vec!["Python".to_string(), "Udemy".to_string()],
            }
        );
    }

    #[test]
    fn test_course_keyword_at_start_gives_empty_name() {
        let record = extract("course enrollment today", CategoryLabel::Course);
        assert_eq!(course_name(&record), "");
    }

    #[test]
    fn test_course_keyword_at_index_one_gives_empty_name() {
        let record = extract("New course on Rust", CategoryLabel::Course);
        assert_eq!(course_name(&record), "");
    }

    #[test]
    fn test_course_keyword_overrides_entities() {
        let entities = vec![
            Entity::new("Andrew Ng", EntityKind::Person),
            Entity::new("TensorFlow", EntityKind::Product),
        ];
        let texts = [
            ("Took the Deep Learning course by Andrew Ng", "Deep Learning"),
            ("Finished my first COURSE today", "my first"),
            ("a b Course", "a b"),
            ("Data Science course offered by DataCamp", "Data Science"),
        ];
        for (text, expected) in texts {
            let record = extractor().extract_from_entities(
                text,
                CategoryLabel::Course,
                "2022-01-01",
                &entities,
            );
            assert_eq!(course_name(&record), expected, "{}", text);
        }
    }

    #[test]
    fn test_course_first_keyword_occurrence_wins() {
        let record = extract(
            "Loved the Rust course and the Go course",
            CategoryLabel::Course,
        );
        assert_eq!(course_name(&record), "the Rust");
    }

    #[test]
    fn test_course_keyword_must_be_whole_word() {
        // "Coursera" and "course," are not the keyword token.
        let entities = vec![
            Entity::new("Kotlin", EntityKind::Product),
            Entity::new("Coursera", EntityKind::Org),
        ];
        let record = extractor().extract_from_entities(
            "Took Kotlin on Coursera, a great course, honestly",
            CategoryLabel::Course,
            "2022-01-01",
            &entities,
        );
        assert_eq!(
            record,
            ExtractedRecord::Course {
                timestamp: "2022-01-01".to_string(),
                name: "Kotlin".to_string(),
                provider: vec!["Kotlin".to_string(), "Coursera".to_string()],
            }
        );
    }

    #[test]
    fn test_course_without_keyword_uses_person_and_product() {
        let entities = vec![
            Entity::new("Andrew Ng", EntityKind::Person),
            Entity::new("Stanford", EntityKind::Org),
            Entity::new("TensorFlow", EntityKind::Product),
        ];
        let record = extractor().extract_from_entities(
            "Studied TensorFlow with Andrew Ng at Stanford",
            CategoryLabel::Course,
            "2022-01-01",
            &entities,
        );
        assert_eq!(
            record,
            ExtractedRecord::Course {
                timestamp: "2022-01-01".to_string(),
                name: "Andrew Ng TensorFlow".to_string(),
                provider: vec!["Stanford".to_string(), "TensorFlow".to_string()],
            }
        );
    }

    #[test]
    fn test_course_without_keyword_or_entities_is_empty() {
        let record = extract(
            "Learned Data Structures and Algorithms from ABC University",
            CategoryLabel::Course,
        );
        assert_eq!(
            record,
            ExtractedRecord::Course {
                timestamp: "2022-01-01".to_string(),
                name: String::new(),
                provider: vec!["ABC University".to_string()],
            }
        );
    }

    #[test]
    fn test_course_keyword_and_window_are_configurable() {
        let extractor = Extractor::new(ExtractionConfig {
            course_keyword: "Class".to_string(),
            course_name_window: 3,
            ..ExtractionConfig::default()
        });
        let record = extractor.extract_from_entities(
            "Joined an evening pottery class downtown",
            CategoryLabel::Course,
            "2022-01-01",
            &[],
        );
        assert_eq!(course_name(&record), "an evening pottery");
    }

    // =========================================================================
    // Project
    // =========================================================================

    #[test]
    fn test_project_name_is_second_and_third_word() {
        let record = extract(
            "Built an Android app for restaurant management",
            CategoryLabel::Project,
        );
        assert_eq!(
            record,
            ExtractedRecord::Project {
                timestamp: "2022-01-01".to_string(),
                name: "an Android".to_string(),
                topic: vec!["Android".to_string()],
            }
        );
    }

    #[test]
    fn test_project_topic_keeps_duplicates() {
        let record = extract(
            "Built web apps using JavaScript, React and more React",
            CategoryLabel::Project,
        );
        match record {
            ExtractedRecord::Project { name, topic, .. } => {
                assert_eq!(name, "web apps");
                assert_eq!(topic, vec!["JavaScript", "React", "React"]);
            }
            other => panic!("expected project record, got {:?}", other),
        }
    }

    #[test]
    fn test_project_name_clamped_for_short_text() {
        let cases = [("Shipped", ""), ("Shipped it", "it"), ("", "")];
        for (text, expected) in cases {
            let record = extract(text, CategoryLabel::Project);
            match record {
                ExtractedRecord::Project { name, .. } => assert_eq!(name, expected),
                other => panic!("expected project record, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_project_name_collapses_whitespace() {
        let record = extract("Built   a\tcompiler  in Rust", CategoryLabel::Project);
        match record {
            ExtractedRecord::Project { name, topic, .. } => {
                assert_eq!(name, "a compiler");
                assert_eq!(topic, vec!["Rust"]);
            }
            other => panic!("expected project record, got {:?}", other),
        }
    }

    // =========================================================================
    // General
    // =========================================================================

    #[test]
    fn test_extraction_is_deterministic() {
        let text = "Started Python programming course provided by Udemy";
        for category in CategoryLabel::ALL {
            assert_eq!(extract(text, category), extract(text, category));
        }
    }

    #[test]
    fn test_record_category_matches_request() {
        for category in CategoryLabel::ALL {
            assert_eq!(extract("Some post text", category).category(), category);
        }
    }

    #[test]
    fn test_recognizer_failure_propagates() {
        let recognizer = ScriptedRecognizer::new().strict();
        let result = extractor().extract(
            "unscripted",
            CategoryLabel::Course,
            "2022-01-01",
            &recognizer,
        );
        assert!(matches!(result, Err(ChronicleError::Recognizer(_))));
    }

    #[test]
    fn test_extract_through_trait_object() {
        let recognizer: Box<dyn EntityRecognizer> = Box::new(
            ScriptedRecognizer::new().with_response(
                "Completed Cybersecurity certification at Cybrary",
                vec![Entity::new("Cybrary", EntityKind::Org)],
            ),
        );
        let record = extractor()
            .extract(
                "Completed Cybersecurity certification at Cybrary",
                CategoryLabel::Certification,
                "2023-09-12",
                recognizer.as_ref(),
            )
            .unwrap();
        assert_eq!(
            record,
            ExtractedRecord::Certification {
                timestamp: "2023-09-12".to_string(),
                topic: String::new(),
                company: vec!["Cybrary".to_string()],
            }
        );
    }
}
