use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::info;

use crate::app::ports::{ContactSourcePort, MergeSinkPort};
use crate::error::{MergeError, Result};

/// Path argument meaning stdin or stdout.
pub const STDIO_PATH: &str = "-";

/// Reads the contact table from a file, or stdin when no path is given.
/// Inputs larger than `max_bytes` are rejected before parsing.
pub struct FileContactSource {
    path: Option<PathBuf>,
    max_bytes: u64,
}

impl FileContactSource {
    pub fn new(path: Option<PathBuf>, max_bytes: u64) -> Self {
        Self { path, max_bytes }
    }

    /// `-` selects stdin.
    pub fn from_arg(arg: &str, max_bytes: u64) -> Self {
        let path = (arg != STDIO_PATH).then(|| PathBuf::from(arg));
        Self::new(path, max_bytes)
    }

    fn check_size(&self, size: u64) -> Result<()> {
        if size > self.max_bytes {
            return Err(MergeError::InputTooLarge {
                size,
                limit: self.max_bytes,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContactSourcePort for FileContactSource {
    async fn read_contacts(&self) -> Result<Vec<u8>> {
        match &self.path {
            Some(path) => {
                let metadata = tokio::fs::metadata(path).await?;
                self.check_size(metadata.len())?;
                Ok(tokio::fs::read(path).await?)
            }
            None => {
                let mut buf = Vec::new();
                // One byte past the limit is enough to know it was exceeded.
                tokio::io::stdin()
                    .take(self.max_bytes + 1)
                    .read_to_end(&mut buf)
                    .await?;
                self.check_size(buf.len() as u64)?;
                Ok(buf)
            }
        }
    }

    fn describe(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => "stdin".to_string(),
        }
    }
}

/// Writes the encoded table to a file (created or truncated), or stdout.
pub struct FileMergeSink {
    path: Option<PathBuf>,
}

impl FileMergeSink {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// `-` selects stdout.
    pub fn from_arg(arg: &str) -> Self {
        Self::new((arg != STDIO_PATH).then(|| PathBuf::from(arg)))
    }
}

#[async_trait]
impl MergeSinkPort for FileMergeSink {
    async fn write_merge_table(&self, encoded: &str) -> Result<()> {
        match &self.path {
            Some(path) => {
                if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(dir).await?;
                }
                tokio::fs::write(path, encoded).await?;
                info!("Output written to {}", path.display());
            }
            None => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(encoded.as_bytes()).await?;
                stdout.flush().await?;
            }
        }
        Ok(())
    }

    fn describe(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => "stdout".to_string(),
        }
    }
}
