//! Output formatting and persistence for marker frames and traffic summaries.
//!
//! Supports pretty-printing, JSON serialization, JSON-lines streaming, and
//! CSV append.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::stats::TrafficSummary;
use crate::traffic::{MarkerFrame, MarkerSink};
use csv::WriterBuilder;
use std::fs::{self, OpenOptions};
use std::io::Write;

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty<T: std::fmt::Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Logs a value as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes a value to `path` as pretty-printed JSON, replacing any existing file.
pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<()> {
    let body = serde_json::to_vec_pretty(value)?;
    fs::write(path, body)?;
    debug!(path, "JSON written");
    Ok(())
}

/// Appends a [`TrafficSummary`] record as a row to a CSV file.
///
/// Writes the header row first when the file is missing or empty.
pub fn append_record(path: &str, summary: &TrafficSummary) -> Result<()> {
    let has_rows = fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false);
    debug!(path, has_rows, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!has_rows) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(summary)?;
    writer.flush()?;

    Ok(())
}

/// A [`MarkerSink`] that writes each frame as one line of JSON.
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MarkerSink for JsonLinesSink<W> {
    fn render(&mut self, frame: &MarkerFrame) -> Result<()> {
        serde_json::to_writer(&mut self.writer, frame)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
