//! Classify-then-extract pipeline.
//!
//! Flow: post text -> TF-IDF vector -> category -> entities -> record.
//!
//! The pipeline is fit once and then read-only, so one instance can be shared
//! by reference or behind an `Arc` for concurrent batches.

use std::sync::Arc;

use chronicle_classify::Classifier;
use chronicle_core::config::ChronicleConfig;
use chronicle_core::error::{ChronicleError, Result};
use chronicle_core::types::{ExtractedRecord, Post, TrainingExample};
use chronicle_extract::{
    EntityRecognizer, Extractor, TimelineAssembler, TimelineEntry, TimelineRenderer,
};
use tokio::sync::Semaphore;
use tracing::{debug, info};

/// A fitted classifier plus the extraction and timeline stages.
pub struct Pipeline {
    classifier: Classifier,
    extractor: Extractor,
    recognizer: Arc<dyn EntityRecognizer>,
    assembler: TimelineAssembler,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("labels", &self.classifier.categorizer().labels())
            .field("extractor", &self.extractor)
            .field("assembler", &self.assembler)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Fit the classifier on `examples` and bind the remaining stages.
    pub fn fit(
        examples: &[TrainingExample],
        recognizer: Arc<dyn EntityRecognizer>,
        config: &ChronicleConfig,
    ) -> Result<Self> {
        let classifier = Classifier::fit(examples, &config.vectorizer, &config.classifier)?;
        info!(examples = examples.len(), "Pipeline ready");
        Ok(Self {
            classifier,
            extractor: Extractor::new(config.extraction.clone()),
            recognizer,
            assembler: TimelineAssembler::new(&config.timeline),
        })
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Classify one post and extract its record.
    pub fn process(&self, post: &Post) -> Result<ExtractedRecord> {
        let category = self.classifier.classify(&post.text)?;
        let record = self
            .extractor
            .extract(&post.text, category, &post.timestamp, &*self.recognizer)?;
        debug!(category = %category, timestamp = %post.timestamp, "Post processed");
        Ok(record)
    }

    /// Process posts one after another. Records keep the input order; the
    /// first failing post aborts the batch.
    pub fn process_all(&self, posts: &[Post]) -> Result<Vec<ExtractedRecord>> {
        let records = posts
            .iter()
            .map(|post| self.process(post))
            .collect::<Result<Vec<_>>>()?;
        info!(posts = records.len(), "Batch processed");
        Ok(records)
    }

    /// Process posts on the blocking thread pool, at most `workers` at a time.
    ///
    /// Output equals [`Pipeline::process_all`] on the same posts: records are
    /// joined in input order and the first failure by position is returned.
    pub async fn process_concurrent(
        self: &Arc<Self>,
        posts: Vec<Post>,
        workers: usize,
    ) -> Result<Vec<ExtractedRecord>> {
        let workers = workers.max(1);
        let semaphore = Arc::new(Semaphore::new(workers));
        let total = posts.len();

        let mut handles = Vec::with_capacity(total);
        for post in posts {
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .map_err(|e| ChronicleError::Worker(e.to_string()))?;
            let pipeline = Arc::clone(self);
            handles.push(tokio::task::spawn_blocking(move || {
                let _permit = permit;
                pipeline.process(&post)
            }));
        }

        let mut records = Vec::with_capacity(total);
        for handle in handles {
            let record = handle
                .await
                .map_err(|e| ChronicleError::Worker(format!("post task panicked: {}", e)))??;
            records.push(record);
        }

        info!(posts = total, workers, "Concurrent batch processed");
        Ok(records)
    }

    /// Timeline entries for `records`, sorted by date when configured.
    pub fn timeline(&self, records: &[ExtractedRecord]) -> Result<Vec<TimelineEntry>> {
        self.assembler.arrange(records)
    }

    /// Build the timeline for `records` and draw it with `renderer`.
    pub fn render_timeline<R>(&self, records: &[ExtractedRecord], renderer: &mut R) -> Result<()>
    where
        R: TimelineRenderer + ?Sized,
    {
        let entries = self.timeline(records)?;
        self.assembler.render(&entries, renderer)
    }
}
