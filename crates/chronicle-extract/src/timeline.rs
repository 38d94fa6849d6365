//! Timeline assembly and rendering.
//!
//! Records become dated [`TimelineEntry`] values labelled
//! `"{category}: {timestamp}"`. A [`TimelineRenderer`] draws them; two
//! writer-backed renderers are provided, plain text and JSON.

use std::io::Write;

use chrono::NaiveDate;
use chronicle_core::config::TimelineConfig;
use chronicle_core::error::{ChronicleError, Result};
use chronicle_core::types::{CategoryLabel, ExtractedRecord};
use serde::Serialize;
use tracing::debug;

/// One point on the timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub date: NaiveDate,
    /// Display label, e.g. `course: 2022-07-22`.
    pub label: String,
    pub category: CategoryLabel,
}

/// Sink for assembled timeline entries.
pub trait TimelineRenderer {
    /// Draw `entries` in the order given.
    fn render(&mut self, entries: &[TimelineEntry]) -> Result<()>;
}

/// Turns extracted records into timeline entries.
#[derive(Debug, Clone)]
pub struct TimelineAssembler {
    date_format: String,
    chronological: bool,
}

impl TimelineAssembler {
    pub fn new(config: &TimelineConfig) -> Self {
        Self {
            date_format: config.date_format.clone(),
            chronological: config.chronological,
        }
    }

    /// Whether [`TimelineAssembler::arrange`] sorts entries by date.
    pub fn chronological(&self) -> bool {
        self.chronological
    }

    /// One entry per record, in record order.
    ///
    /// Fails with [`ChronicleError::MalformedTimestamp`] on the first
    /// timestamp that does not parse with the configured format.
    pub fn assemble(&self, records: &[ExtractedRecord]) -> Result<Vec<TimelineEntry>> {
        records
            .iter()
            .map(|record| -> Result<TimelineEntry> {
                let timestamp = record.timestamp();
                let date = NaiveDate::parse_from_str(timestamp, &self.date_format).map_err(
                    |e| ChronicleError::MalformedTimestamp {
                        value: timestamp.to_string(),
                        reason: e.to_string(),
                    },
                )?;
                Ok(TimelineEntry {
                    date,
                    label: format!("{}: {}", record.category(), timestamp),
                    category: record.category(),
                })
            })
            .collect()
    }

    /// Stable sort by date; entries sharing a date keep their order.
    pub fn sort_chronological(entries: &mut [TimelineEntry]) {
        entries.sort_by_key(|entry| entry.date);
    }

    /// [`assemble`](Self::assemble), then sort when configured to.
    pub fn arrange(&self, records: &[ExtractedRecord]) -> Result<Vec<TimelineEntry>> {
        let mut entries = self.assemble(records)?;
        if self.chronological {
            Self::sort_chronological(&mut entries);
        }
        Ok(entries)
    }

    /// Hand `entries` to `renderer` unchanged.
    pub fn render<R>(&self, entries: &[TimelineEntry], renderer: &mut R) -> Result<()>
    where
        R: TimelineRenderer + ?Sized,
    {
        debug!(entries = entries.len(), "Rendering timeline");
        renderer.render(entries)
    }
}

fn render_error(e: std::io::Error) -> ChronicleError {
    ChronicleError::Render(e.to_string())
}

// ---------------------------------------------------------------------------
// TextTimelineRenderer
// ---------------------------------------------------------------------------

/// Widest time axis the text renderer draws; larger settings are clamped.
pub const MAX_AXIS_WIDTH: usize = 200;

/// Character-art timeline.
///
/// ```text
/// Alumni Activity Timeline
/// ========================
/// certification: 2021-01-15 |o-------| certification
/// course: 2021-06-20        |--o-----| course
///                            2021-01-15 .. 2023-09-12
/// ```
///
/// Each row places an `o` on the axis in proportion to the entry's date
/// between the earliest and latest date shown.
#[derive(Debug)]
pub struct TextTimelineRenderer<W: Write> {
    writer: W,
    title: String,
    axis_width: usize,
}

impl<W: Write> TextTimelineRenderer<W> {
    pub fn new(writer: W, config: &TimelineConfig) -> Self {
        Self {
            writer,
            title: config.title.clone(),
            axis_width: config.axis_width.clamp(1, MAX_AXIS_WIDTH),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn marker_position(&self, date: NaiveDate, first: NaiveDate, last: NaiveDate) -> usize {
        let span = (last - first).num_days();
        if span <= 0 {
            return 0;
        }
        let offset = (date - first).num_days();
        let slots = (self.axis_width - 1) as i64;
        ((offset * slots + span / 2) / span) as usize
    }
}

impl<W: Write> TimelineRenderer for TextTimelineRenderer<W> {
    fn render(&mut self, entries: &[TimelineEntry]) -> Result<()> {
        writeln!(self.writer, "{}", self.title).map_err(render_error)?;
        writeln!(self.writer, "{}", "=".repeat(self.title.chars().count()))
            .map_err(render_error)?;

        let (Some(first), Some(last)) = (
            entries.iter().map(|e| e.date).min(),
            entries.iter().map(|e| e.date).max(),
        ) else {
            writeln!(self.writer, "(no entries)").map_err(render_error)?;
            return Ok(());
        };

        let label_width = entries
            .iter()
            .map(|e| e.label.chars().count())
            .max()
            .unwrap_or(0);

        for entry in entries {
            let position = self.marker_position(entry.date, first, last);
            let axis: String = (0..self.axis_width)
                .map(|i| if i == position { 'o' } else { '-' })
                .collect();
            writeln!(
                self.writer,
                "{:<width$} |{}| {}",
                entry.label,
                axis,
                entry.category,
                width = label_width
            )
            .map_err(render_error)?;
        }

        writeln!(
            self.writer,
            "{:width$}  {} .. {}",
            "",
            first,
            last,
            width = label_width
        )
        .map_err(render_error)?;
        self.writer.flush().map_err(render_error)
    }
}

// ---------------------------------------------------------------------------
// JsonTimelineRenderer
// ---------------------------------------------------------------------------

/// Writes entries as a pretty-printed JSON array of
/// `{"date", "label", "category"}` objects.
#[derive(Debug)]
pub struct JsonTimelineRenderer<W: Write> {
    writer: W,
}

impl<W: Write> JsonTimelineRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TimelineRenderer for JsonTimelineRenderer<W> {
    fn render(&mut self, entries: &[TimelineEntry]) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, entries)
            .map_err(|e| ChronicleError::Render(e.to_string()))?;
        writeln!(self.writer).map_err(render_error)?;
        self.writer.flush().map_err(render_error)
    }
}
