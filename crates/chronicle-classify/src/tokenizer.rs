//! Word tokenization shared by fit and transform.

use std::sync::LazyLock;

use chronicle_core::config::VectorizerConfig;
use chronicle_core::error::{ChronicleError, Result};
use regex::Regex;

static DEFAULT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w{2,}\b").expect("Invalid default token regex"));

/// Splits text into word tokens: runs of at least `min_len` word characters,
/// delimited by whitespace or punctuation.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    pattern: Regex,
    lowercase: bool,
}

impl Tokenizer {
    /// Build a tokenizer from the vectorizer settings.
    pub fn new(config: &VectorizerConfig) -> Result<Self> {
        let min_len = config.min_token_len.max(1);
        let pattern = Regex::new(&format!(r"\b\w{{{},}}\b", min_len))
            .map_err(|e| ChronicleError::Config(format!("token pattern: {}", e)))?;
        Ok(Self {
            pattern,
            lowercase: config.lowercase,
        })
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.pattern
            .find_iter(text)
            .map(|m| {
                if self.lowercase {
                    m.as_str().to_lowercase()
                } else {
                    m.as_str().to_string()
                }
            })
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.clone(),
            lowercase: true,
        }
    }
}
