use chronicle_core::config::{ClassifierConfig, VectorizerConfig};
use chronicle_core::error::Result;
use chronicle_core::types::{CategoryLabel, TrainingExample};
use tracing::{debug, info};

use crate::categorizer::Categorizer;
use crate::vectorizer::TfidfVectorizer;

/// TF-IDF vectorizer and linear SVM fit together on one labeled corpus.
///
/// Immutable after [`Classifier::fit`]; safe to share across threads.
#[derive(Debug, Clone)]
pub struct Classifier {
    vectorizer: TfidfVectorizer,
    categorizer: Categorizer,
}

impl Classifier {
    /// Fit the vectorizer on the example texts, then the categorizer on the
    /// resulting vectors.
    ///
    /// An empty corpus fails in the vectorizer with
    /// [`EmptyVocabulary`](chronicle_core::error::ChronicleError::EmptyVocabulary).
    pub fn fit(
        examples: &[TrainingExample],
        vectorizer_config: &VectorizerConfig,
        classifier_config: &ClassifierConfig,
    ) -> Result<Self> {
        let texts: Vec<&str> = examples.iter().map(|e| e.text.as_str()).collect();
        let labels: Vec<CategoryLabel> = examples.iter().map(|e| e.label).collect();

        let mut vectorizer = TfidfVectorizer::new(vectorizer_config)?;
        let vectors = vectorizer.fit_transform(&texts)?;
        let categorizer = Categorizer::fit(&vectors, &labels, classifier_config)?;
        info!(
            examples = examples.len(),
            labels = categorizer.labels().len(),
            "Post classifier ready"
        );

        Ok(Self {
            vectorizer,
            categorizer,
        })
    }

    /// Predict the category of one post text.
    pub fn classify(&self, text: &str) -> Result<CategoryLabel> {
        let vector = self.vectorizer.transform_one(text)?;
        let label = self.categorizer.predict(&vector)?;
        debug!(label = %label, "Classified post");
        Ok(label)
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn categorizer(&self) -> &Categorizer {
        &self.categorizer
    }
}
