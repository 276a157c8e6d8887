//! Entity codec
//!
//! Maps a record to one serialized line and back, in either the
//! `label: value` text format or compact JSON.

mod text;

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Error, Result};

pub use text::TextFields;

/// Line serialization format of an entity file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Text,
    Json,
}

impl Default for Format {
    fn default() -> Self {
        Self::Json
    }
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(Error::InvalidInput(format!(
                "Unsupported serialization mode '{}'",
                value
            ))),
        }
    }
}

/// A flat record that can be stored one-per-line.
///
/// `LABELS` fixes both the order and the label text of the text format;
/// `text_values` must return values in the same order.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Lowercase entity name used in messages ("task", "user", ...)
    const KIND: &'static str;

    const LABELS: &'static [&'static str];

    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);

    fn text_values(&self) -> Vec<String>;

    fn from_text(fields: &TextFields<'_>) -> Result<Self>;
}

/// Serialize `record` as a single line, without the terminator.
pub fn encode<R: Record>(record: &R, format: Format) -> Result<String> {
    match format {
        Format::Text => Ok(text::encode(R::LABELS, &record.text_values())),
        Format::Json => Ok(serde_json::to_string(record)?),
    }
}

/// Parse one line; a trailing line terminator is ignored.
pub fn decode<R: Record>(line: &str, format: Format) -> Result<R> {
    let line = line.trim_end_matches(['\n', '\r']);
    match format {
        Format::Text => {
            let fields = TextFields::parse(R::KIND, R::LABELS, line)?;
            R::from_text(&fields)
        }
        Format::Json => serde_json::from_str(line).map_err(|_| Error::Json {
            payload: line.to_string(),
        }),
    }
}

/// A line dropped by [`decode_all`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based position in the input
    pub line_number: usize,
    pub raw: String,
    pub error: String,
}

/// Result of a tolerant batch decode
#[derive(Debug, Clone)]
pub struct Decoded<R> {
    pub records: Vec<R>,
    pub skipped: Vec<SkippedLine>,
}

impl<R> Default for Decoded<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<R> Decoded<R> {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn into_records(self) -> Vec<R> {
        self.records
    }
}

/// Decode every line independently, keeping the good ones in order.
///
/// Malformed lines are logged and reported in [`Decoded::skipped`]
/// instead of failing the batch. Blank lines are ignored.
pub fn decode_all<R: Record, S: AsRef<str>>(lines: &[S], format: Format) -> Decoded<R> {
    let mut decoded = Decoded::default();

    for (idx, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }

        match decode::<R>(line, format) {
            Ok(record) => decoded.records.push(record),
            Err(err) => {
                warn!("Skipping malformed {} at line {}: {}", R::KIND, idx + 1, err);
                decoded.skipped.push(SkippedLine {
                    line_number: idx + 1,
                    raw: line.to_string(),
                    error: err.to_string(),
                });
            }
        }
    }

    decoded
}
