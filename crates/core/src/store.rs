//! Append-only line storage
//!
//! One record per line, one file per store. Every call opens the file,
//! does its work and closes it again; nothing is cached between calls.

use std::path::{Path, PathBuf};

use tokio::fs::{self, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use crate::Result;

/// Raw line-oriented persistence for a single file path.
#[derive(Debug, Clone)]
pub struct LineStore {
    path: PathBuf,
}

impl LineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every line of the file, in file order, without terminators.
    ///
    /// A missing file is an error here; the file is only ever created by
    /// [`LineStore::append_line`]. Bytes that are not valid UTF-8 are
    /// replaced with U+FFFD so one damaged line never hides the others.
    pub async fn load(&self) -> Result<Vec<String>> {
        let file = fs::File::open(&self.path).await?;
        let mut segments = BufReader::new(file).split(b'\n');
        let mut lines = Vec::new();

        while let Some(mut raw) = segments.next_segment().await? {
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
            let line = match String::from_utf8(raw) {
                Ok(line) => line,
                Err(err) => {
                    warn!(
                        "Line {} of {} is not valid UTF-8",
                        lines.len() + 1,
                        self.path.display()
                    );
                    String::from_utf8_lossy(err.as_bytes()).into_owned()
                }
            };
            lines.push(line);
        }

        Ok(lines)
    }

    /// Append `bytes` plus a line terminator, creating the file if needed.
    ///
    /// Returns the number of bytes written, terminator included.
    pub async fn append_line(&self, bytes: &[u8]) -> Result<usize> {
        let mut buf = Vec::with_capacity(bytes.len() + 1);
        buf.extend_from_slice(bytes);
        buf.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        file.write_all(&buf).await?;
        file.flush().await?;

        debug!("Appended {} bytes to {}", buf.len(), self.path.display());
        Ok(buf.len())
    }
}
