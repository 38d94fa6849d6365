//! JSON dataset files.
//!
//! - Training corpus: `[{"text": "...", "label": "course"}, ...]`
//! - Posts: `[{"text": "...", "timestamp": "2022-07-22"}, ...]`
//!
//! Labels are matched case-insensitively; anything outside the category set
//! fails with [`ChronicleError::UnknownCategory`].

use std::path::Path;

use chronicle_core::error::{ChronicleError, Result};
use chronicle_core::types::{CategoryLabel, Post, TrainingExample};
use serde::Deserialize;
use tracing::info;

/// Training example as written in the file; the label is validated after
/// parsing so an unknown label reports which one it was.
#[derive(Debug, Deserialize)]
struct RawExample {
    text: String,
    label: String,
}

pub fn parse_training_examples(json: &str) -> Result<Vec<TrainingExample>> {
    let raw: Vec<RawExample> = serde_json::from_str(json)?;
    raw.into_iter()
        .map(|r| CategoryLabel::parse(&r.label).map(|label| TrainingExample::new(r.text, label)))
        .collect()
}

pub fn parse_posts(json: &str) -> Result<Vec<Post>> {
    Ok(serde_json::from_str(json)?)
}

/// Read a training corpus file.
pub fn load_training_examples(path: &Path) -> Result<Vec<TrainingExample>> {
    let content = read(path)?;
    let examples = parse_training_examples(&content)?;
    info!(path = %path.display(), examples = examples.len(), "Training corpus loaded");
    Ok(examples)
}

/// Read a posts file.
pub fn load_posts(path: &Path) -> Result<Vec<Post>> {
    let content = read(path)?;
    let posts = parse_posts(&content)?;
    info!(path = %path.display(), posts = posts.len(), "Posts loaded");
    Ok(posts)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        ChronicleError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })
}
