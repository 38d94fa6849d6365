use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ChronicleError, Result};

/// Top-level configuration for Chronicle.
///
/// Loaded from `~/.chronicle/config.toml` by default. Every section is
/// optional; missing keys fall back to the defaults below.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChronicleConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub vectorizer: VectorizerConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub recognizer: RecognizerConfig,
    #[serde(default)]
    pub timeline: TimelineConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl ChronicleConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ChronicleConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ChronicleError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// TF-IDF tokenization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    /// Fold tokens to lower case before counting.
    pub lowercase: bool,
    /// Minimum number of word characters in a token.
    pub min_token_len: usize,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            min_token_len: 2,
        }
    }
}

/// Linear SVM hyperparameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Soft-margin penalty `C`.
    pub regularization: f64,
    /// Maximum passes of coordinate descent over the training set.
    pub max_iterations: usize,
    /// Stop once the projected-gradient spread drops below this value.
    pub tolerance: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            regularization: 1.0,
            max_iterations: 1000,
            tolerance: 1e-4,
        }
    }
}

/// Positional heuristics used by the extraction rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Keyword whose preceding tokens name a course (matched case-insensitively).
    pub course_keyword: String,
    /// Number of tokens before the keyword taken as the course name.
    pub course_name_window: usize,
    /// First whitespace token of a project name (inclusive).
    pub project_name_start: usize,
    /// Last whitespace token of a project name (exclusive).
    pub project_name_end: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            course_keyword: "course".to_string(),
            course_name_window: 2,
            project_name_start: 1,
            project_name_end: 3,
        }
    }
}

/// Gazetteer for the built-in pattern recognizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    /// Known organizations (tagged ORG).
    pub organizations: Vec<String>,
    /// Known products and technologies (tagged PRODUCT).
    pub products: Vec<String>,
    /// Known people (tagged PERSON).
    pub persons: Vec<String>,
    /// Known countries and cities (tagged GPE).
    pub places: Vec<String>,
    /// Known nationalities and groups (tagged NORP).
    pub groups: Vec<String>,
    /// Trailing words that make a capitalized phrase an organization,
    /// e.g. "XYZ Institute".
    pub organization_suffixes: Vec<String>,
    /// Capitalized words that never start an organization name, such as the
    /// verb opening "Graduated Stanford University".
    pub non_name_words: Vec<String>,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            organizations: owned(&[
                "Coursera",
                "Udemy",
                "DataCamp",
                "CodeAcademy",
                "Cybrary",
                "edX",
                "Udacity",
                "Google",
                "Microsoft",
                "Amazon",
                "Cisco",
                "Oracle",
            ]),
            products: owned(&[
                "C++", "Python", "JavaScript", "React", "Android", "Java", "Kotlin", "Rust",
                "AWS", "Azure", "TensorFlow", "Docker", "Kubernetes",
            ]),
            persons: Vec::new(),
            places: owned(&["India", "USA", "London", "Berlin", "Singapore"]),
            groups: owned(&["American", "Indian", "British", "European"]),
            organization_suffixes: owned(&[
                "Institute",
                "University",
                "Academy",
                "College",
                "School",
            ]),
            non_name_words: owned(&[
                "Attended", "Began", "Built", "Completed", "Earned", "Enrolled", "Finished",
                "Graduated", "Joined", "Learned", "Left", "Passed", "Started", "Studied",
                "Taught", "Took", "Visited",
            ]),
        }
    }
}

/// Timeline assembly and rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// chrono format string used to parse post timestamps.
    pub date_format: String,
    /// Sort entries by date before rendering instead of keeping input order.
    pub chronological: bool,
    /// Heading printed by the text renderer.
    pub title: String,
    /// Width of the text renderer's time axis, in characters (1 to 200).
    pub axis_width: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
            chronological: false,
            title: "Alumni Activity Timeline".to_string(),
            axis_width: 40,
        }
    }
}

/// Batch processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Worker count for batch processing; 1 processes posts sequentially.
    pub workers: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { workers: 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = ChronicleConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert!(config.vectorizer.lowercase);
        assert_eq!(config.vectorizer.min_token_len, 2);
        assert!((config.classifier.regularization - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.classifier.max_iterations, 1000);
        assert_eq!(config.extraction.course_keyword, "course");
        assert_eq!(config.extraction.course_name_window, 2);
        assert_eq!(config.extraction.project_name_start, 1);
        assert_eq!(config.extraction.project_name_end, 3);
        assert_eq!(config.timeline.date_format, "%Y-%m-%d");
        assert!(!config.timeline.chronological);
        assert_eq!(config.pipeline.workers, 1);
    }

    #[test]
    fn test_default_gazetteer_covers_sample_providers() {
        let recognizer = RecognizerConfig::default();
        for org in ["Coursera", "Udemy", "DataCamp", "CodeAcademy", "Cybrary"] {
            assert!(recognizer.organizations.iter().any(|o| o == org), "{org}");
        }
        assert!(recognizer.products.iter().any(|p| p == "C++"));
        assert!(recognizer
            .organization_suffixes
            .iter()
            .any(|s| s == "University"));
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[general]
log_level = "debug"

[classifier]
regularization = 10.0
max_iterations = 50
tolerance = 0.001

[extraction]
course_keyword = "class"
course_name_window = 3

[timeline]
chronological = true
date_format = "%d/%m/%Y"

[pipeline]
workers = 4
"#;
        let file = create_temp_config(content);
        let config = ChronicleConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert!((config.classifier.regularization - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.classifier.max_iterations, 50);
        assert_eq!(config.extraction.course_keyword, "class");
        assert_eq!(config.extraction.course_name_window, 3);
        // Unset keys within a present section keep their defaults.
        assert_eq!(config.extraction.project_name_end, 3);
        assert!(config.timeline.chronological);
        assert_eq!(config.timeline.date_format, "%d/%m/%Y");
        assert_eq!(config.pipeline.workers, 4);
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let content = r#"
[recognizer]
organizations = ["Pluralsight"]
"#;
        let file = create_temp_config(content);
        let config = ChronicleConfig::load(file.path()).unwrap();
        assert_eq!(config.recognizer.organizations, vec!["Pluralsight"]);
        assert!(!config.recognizer.products.is_empty());
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.timeline.title, "Alumni Activity Timeline");
    }

    #[test]
    fn test_config_empty_toml_uses_all_defaults() {
        let file = create_temp_config("");
        let config = ChronicleConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.timeline.axis_width, 40);
    }

    #[test]
    fn test_config_load_invalid_toml() {
        let file = create_temp_config("this is {{ not valid TOML");
        let result = ChronicleConfig::load(file.path());
        assert!(matches!(result, Err(ChronicleError::Config(_))));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = ChronicleConfig::load(Path::new("/nonexistent/chronicle.toml"));
        assert!(matches!(result, Err(ChronicleError::Io(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = ChronicleConfig::load_or_default(Path::new("/nonexistent/chronicle.toml"));
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.extraction.course_keyword, "course");
    }

    #[test]
    fn test_save_creates_parent_dirs_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = ChronicleConfig::default();
        config.timeline.chronological = true;
        config.recognizer.persons = vec!["Andrew Ng".to_string()];
        config.save(&path).unwrap();

        assert!(path.exists());
        let reloaded = ChronicleConfig::load(&path).unwrap();
        assert!(reloaded.timeline.chronological);
        assert_eq!(reloaded.recognizer.persons, vec!["Andrew Ng"]);
        assert_eq!(
            reloaded.recognizer.organizations,
            config.recognizer.organizations
        );
    }
}
