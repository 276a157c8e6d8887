//! Generic file-backed repository
//!
//! Combines a [`LineStore`] with the entity codec. Every call re-reads the
//! whole file; there is no index and no cache.

use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::codec::{self, Decoded, Format, Record};
use crate::store::LineStore;
use crate::{Error, Result};

/// How the next identifier is derived from the stored records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdStrategy {
    /// ID of the last decodable line plus one.
    ///
    /// Assumes records were appended in ID order. Manual edits that break
    /// this ordering make the next ID collide with an existing one.
    LastLine,
    /// Largest ID in the file plus one
    MaxScan,
}

impl Default for IdStrategy {
    fn default() -> Self {
        Self::LastLine
    }
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LastLine => f.write_str("last-line"),
            Self::MaxScan => f.write_str("max-scan"),
        }
    }
}

impl FromStr for IdStrategy {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "last-line" | "last_line" => Ok(Self::LastLine),
            "max-scan" | "max_scan" => Ok(Self::MaxScan),
            _ => Err(Error::InvalidInput(format!(
                "Unsupported id strategy '{}'",
                value
            ))),
        }
    }
}

/// Append-only repository for one entity type, stored in one file
pub struct FileRepository<R> {
    store: LineStore,
    format: Format,
    id_strategy: IdStrategy,
    /// Serialises id generation + append within this instance
    create_lock: Mutex<()>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> FileRepository<R> {
    /// The file is not touched until the first write.
    pub fn new(path: impl Into<PathBuf>, format: Format) -> Self {
        Self {
            store: LineStore::new(path),
            format,
            id_strategy: IdStrategy::default(),
            create_lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    pub fn with_id_strategy(mut self, id_strategy: IdStrategy) -> Self {
        self.id_strategy = id_strategy;
        self
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Append `record` as-is. The ID is neither assigned nor checked.
    pub async fn save(&self, record: &R) -> Result<usize> {
        let line = codec::encode(record, self.format)?;
        self.store.append_line(line.as_bytes()).await
    }

    /// All lines of the file; a file that was never written reads as empty.
    async fn load_lines(&self) -> Result<Vec<String>> {
        match self.store.load().await {
            Ok(lines) => Ok(lines),
            Err(err) if err.is_not_found() => {
                debug!("{} does not exist yet", self.store.path().display());
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }

    pub async fn generate_next_id(&self) -> Result<i64> {
        let lines = self.load_lines().await?;
        let mut lines: Vec<&str> = lines
            .iter()
            .map(String::as_str)
            .filter(|line| !line.trim().is_empty())
            .collect();

        if lines.is_empty() {
            return Ok(1);
        }

        match self.id_strategy {
            IdStrategy::LastLine => {
                lines.reverse();
                for line in lines {
                    match codec::decode::<R>(line, self.format) {
                        Ok(record) => return self.successor(record.id()),
                        Err(err) => debug!("Ignoring undecodable {} line: {}", R::KIND, err),
                    }
                }
                Err(Error::Storage(format!(
                    "no decodable {} record in {}",
                    R::KIND,
                    self.store.path().display()
                )))
            }
            IdStrategy::MaxScan => {
                let decoded: Decoded<R> = codec::decode_all(lines.as_slice(), self.format);
                let max = decoded
                    .records
                    .iter()
                    .map(|record| record.id())
                    .max()
                    .ok_or_else(|| {
                        Error::Storage(format!(
                            "no decodable {} record in {}",
                            R::KIND,
                            self.store.path().display()
                        ))
                    })?;
                self.successor(max)
            }
        }
    }

    fn successor(&self, id: i64) -> Result<i64> {
        id.checked_add(1).ok_or_else(|| {
            Error::Storage(format!(
                "{} id space exhausted in {}",
                R::KIND,
                self.store.path().display()
            ))
        })
    }

    /// Assign the next ID and append the record.
    ///
    /// Nothing is written if ID generation fails. Concurrent calls on the
    /// same repository are serialised; other writers to the same file are not.
    pub async fn create_new(&self, mut record: R) -> Result<R> {
        let _guard = self.create_lock.lock().await;

        let id = self.generate_next_id().await.map_err(|e| {
            Error::Storage(format!("can't generate {} id: {}", R::KIND, e))
        })?;
        record.set_id(id);

        self.save(&record).await.map_err(|e| {
            Error::Storage(format!("can't write {} to file: {}", R::KIND, e))
        })?;

        Ok(record)
    }

    /// Decode the whole file, reporting skipped lines.
    pub async fn list_report(&self) -> Result<Decoded<R>> {
        let lines = self.load_lines().await?;
        let decoded: Decoded<R> = codec::decode_all(lines.as_slice(), self.format);
        if !decoded.is_clean() {
            warn!(
                "Skipped {} malformed {} lines in {}",
                decoded.skipped.len(),
                R::KIND,
                self.store.path().display()
            );
        }
        Ok(decoded)
    }

    pub async fn list(&self) -> Result<Vec<R>> {
        Ok(self.list_report().await?.into_records())
    }

    /// Records matching `predicate`, in file order. Every skipped line of
    /// the file is still reported, whether or not it would have matched.
    pub async fn list_by_report<F>(&self, predicate: F) -> Result<Decoded<R>>
    where
        F: Fn(&R) -> bool + Send,
    {
        let mut decoded = self.list_report().await?;
        decoded.records.retain(|record| predicate(record));
        Ok(decoded)
    }

    pub async fn list_by<F>(&self, predicate: F) -> Result<Vec<R>>
    where
        F: Fn(&R) -> bool + Send,
    {
        Ok(self.list_by_report(predicate).await?.into_records())
    }
}
