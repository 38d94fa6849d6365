//! TF-IDF vectorizer.
//!
//! Term weight = raw count in the document × `ln((1 + N) / (1 + df)) + 1`,
//! then the vector is scaled to unit L2 norm. Vocabulary indices follow the
//! lexicographic order of terms, so the same corpus in any order produces the
//! same feature layout.

use std::collections::{BTreeMap, HashMap, HashSet};

use chronicle_core::config::VectorizerConfig;
use chronicle_core::error::{ChronicleError, Result};
use tracing::{debug, info};

use crate::tokenizer::Tokenizer;

/// Terms learned from the training corpus with their IDF weights.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
    idf: Vec<f64>,
    document_count: usize,
}

impl Vocabulary {
    /// Number of terms (the feature dimensionality).
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Feature index of `term`, if it was seen during fit.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// IDF weight of the term at `index`.
    pub fn idf(&self, index: usize) -> Option<f64> {
        self.idf.get(index).copied()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Number of documents the vocabulary was fit on.
    pub fn document_count(&self) -> usize {
        self.document_count
    }
}

/// Learns a [`Vocabulary`] from a corpus and maps texts onto it.
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    tokenizer: Tokenizer,
    vocabulary: Option<Vocabulary>,
}

impl TfidfVectorizer {
    /// Create an unfitted vectorizer with the given tokenization settings.
    pub fn new(config: &VectorizerConfig) -> Result<Self> {
        Ok(Self {
            tokenizer: Tokenizer::new(config)?,
            vocabulary: None,
        })
    }

    pub fn is_fitted(&self) -> bool {
        self.vocabulary.is_some()
    }

    /// The fitted vocabulary, or `None` before [`TfidfVectorizer::fit`].
    pub fn vocabulary(&self) -> Option<&Vocabulary> {
        self.vocabulary.as_ref()
    }

    /// Learn the vocabulary and IDF weights from `corpus`.
    ///
    /// Refitting replaces the previous vocabulary. Fails with
    /// [`ChronicleError::EmptyVocabulary`] when the corpus is empty or yields
    /// no tokens.
    pub fn fit<S: AsRef<str>>(&mut self, corpus: &[S]) -> Result<&Vocabulary> {
        if corpus.is_empty() {
            return Err(ChronicleError::EmptyVocabulary);
        }

        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for doc in corpus {
            let unique: HashSet<String> =
                self.tokenizer.tokenize(doc.as_ref()).into_iter().collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(ChronicleError::EmptyVocabulary);
        }

        // BTreeMap iteration is sorted, which fixes the feature layout.
        let n = corpus.len() as f64;
        let mut terms = Vec::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (term, df) in document_frequency {
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            terms.push(term);
        }
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();

        info!(
            documents = corpus.len(),
            vocabulary_size = terms.len(),
            "TF-IDF vocabulary fitted"
        );

        Ok(&*self.vocabulary.insert(Vocabulary {
            terms,
            index,
            idf,
            document_count: corpus.len(),
        }))
    }

    /// Map each text to a TF-IDF vector over the fitted vocabulary.
    pub fn transform<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<Vec<f64>>> {
        texts
            .iter()
            .map(|text| self.transform_one(text.as_ref()))
            .collect()
    }

    /// Map one text to a TF-IDF vector. Terms outside the vocabulary are
    /// ignored; a text with no known term yields the zero vector.
    pub fn transform_one(&self, text: &str) -> Result<Vec<f64>> {
        let vocabulary = self.vocabulary.as_ref().ok_or(ChronicleError::NotFitted)?;
        let mut vector = vec![0.0; vocabulary.len()];

        let mut unknown = 0usize;
        for token in self.tokenizer.tokenize(text) {
            match vocabulary.index_of(&token) {
                Some(i) => vector[i] += 1.0,
                None => unknown += 1,
            }
        }
        if unknown > 0 {
            debug!(unknown, "Ignored out-of-vocabulary tokens");
        }

        for (value, idf) in vector.iter_mut().zip(&vocabulary.idf) {
            *value *= idf;
        }

        let norm: f64 = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }

        Ok(vector)
    }

    /// Fit on `corpus`, then transform it.
    pub fn fit_transform<S: AsRef<str>>(&mut self, corpus: &[S]) -> Result<Vec<Vec<f64>>> {
        self.fit(corpus)?;
        self.transform(corpus)
    }
}
