// # File Telemetry Sink
//
// Appends each batch as one JSON document per line.
//
// ## File Format
//
// ```json
// {"path":"/items/skipped","items":[{"id":"id1","name":"name1","score":1.0}],"sent_at":"2025-01-09T12:00:00Z"}
// {"path":"/items/loaded","items":[...],"sent_at":"2025-01-09T12:00:00Z"}
// ```

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::traits::telemetry_sink::{TelemetryBatch, TelemetrySink};
use crate::Error;

/// File-based telemetry sink
///
/// # Example
///
/// ```rust,no_run
/// use pagestore_core::telemetry::FileTelemetrySink;
/// use pagestore_core::traits::{TelemetryBatch, TelemetrySink};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let sink = FileTelemetrySink::new("/var/lib/pagestore/stats.jsonl").await?;
///     sink.send(&TelemetryBatch::new("/items/loaded", vec![])).await?;
///     sink.flush().await?;
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct FileTelemetrySink {
    path: PathBuf,
    file: Mutex<fs::File>,
}

impl FileTelemetrySink {
    /// Open (or create) the telemetry file in append mode
    ///
    /// Parent directories are created if needed.
    pub async fn new<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    Error::telemetry(format!(
                        "Failed to create telemetry directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| {
                Error::telemetry(format!(
                    "Failed to open telemetry file {}: {}",
                    path.display(),
                    e
                ))
            })?;

        tracing::debug!("Telemetry file opened: {}", path.display());

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Path of the telemetry file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TelemetrySink for FileTelemetrySink {
    async fn send(&self, batch: &TelemetryBatch) -> Result<(), Error> {
        let mut line = serde_json::to_string(batch)?;
        line.push('\n');

        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes()).await.map_err(|e| {
            Error::telemetry(format!(
                "Failed to write to telemetry file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        tracing::trace!("Telemetry batch written: {}", batch.path);
        Ok(())
    }

    async fn flush(&self) -> Result<(), Error> {
        let mut file = self.file.lock().await;
        file.flush().await?;
        file.sync_data().await?;
        Ok(())
    }
}
