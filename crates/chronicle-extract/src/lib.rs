//! Chronicle Extract crate - entity recognition, field extraction, timelines.
//!
//! Maps a classified post onto a structured record using the entities an
//! [`EntityRecognizer`] tags in its text, then lays records out as a dated
//! timeline for a [`TimelineRenderer`].

pub mod recognizer;
pub mod rules;
pub mod timeline;

pub use recognizer::{EntityRecognizer, PatternRecognizer, ScriptedRecognizer};
pub use rules::Extractor;
pub use timeline::{
    JsonTimelineRenderer, TextTimelineRenderer, TimelineAssembler, TimelineEntry,
    TimelineRenderer,
};
