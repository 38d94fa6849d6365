//! Chronicle Classify crate - TF-IDF vectorization and linear SVM categorization.
//!
//! Turns raw post text into L2-normalized TF-IDF vectors over a vocabulary
//! learned from the training corpus, and assigns exactly one category with a
//! one-vs-rest maximum-margin classifier fit by dual coordinate descent.

pub mod categorizer;
pub mod classifier;
pub mod tokenizer;
pub mod vectorizer;

pub use categorizer::{Categorizer, LinearMargin};
pub use classifier::Classifier;
pub use tokenizer::Tokenizer;
pub use vectorizer::{TfidfVectorizer, Vocabulary};
