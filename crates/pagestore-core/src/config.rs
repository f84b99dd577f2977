//! Configuration types for the pagestore system
//!
//! This module defines all configuration structures used throughout the crate.

use serde::{Deserialize, Serialize};

/// Main pagestore configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageStoreConfig {
    /// Container settings
    #[serde(default)]
    pub container: ContainerConfig,

    /// Telemetry shipping settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Logging sink settings
    #[serde(default)]
    pub log: LogConfig,
}

impl PageStoreConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.container.validate()?;
        self.telemetry.validate()?;

        Ok(())
    }
}

/// How `load` orders the raw-line commit relative to parsing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestPolicy {
    /// Commit raw lines before parsing them
    ///
    /// A parse failure leaves the new raw lines in place while the parsed
    /// entries still reflect the previous snapshot.
    #[default]
    CommitRawFirst,

    /// Commit raw lines and entries together, only after a successful parse
    Transactional,
}

/// Container configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Minimum number of lines an ingested source must have
    #[serde(default = "default_min_raw_lines")]
    pub min_raw_lines: usize,

    /// Minimum number of entries that must pass the threshold
    #[serde(default = "default_min_accepted")]
    pub min_accepted: usize,

    /// Raw-line commit ordering for `load`
    #[serde(default)]
    pub ingest: IngestPolicy,
}

impl ContainerConfig {
    /// Set the minimum number of raw lines
    pub fn with_min_raw_lines(mut self, min_raw_lines: usize) -> Self {
        self.min_raw_lines = min_raw_lines;
        self
    }

    /// Set the minimum number of accepted entries
    pub fn with_min_accepted(mut self, min_accepted: usize) -> Self {
        self.min_accepted = min_accepted;
        self
    }

    /// Set the ingest policy
    pub fn with_ingest(mut self, ingest: IngestPolicy) -> Self {
        self.ingest = ingest;
        self
    }

    /// Validate the container configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.min_raw_lines == 0 {
            return Err(crate::Error::config("min_raw_lines must be > 0"));
        }
        if self.min_accepted == 0 {
            return Err(crate::Error::config("min_accepted must be > 0"));
        }
        Ok(())
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            min_raw_lines: default_min_raw_lines(),
            min_accepted: default_min_accepted(),
            ingest: IngestPolicy::default(),
        }
    }
}

/// Telemetry sink configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetrySinkConfig {
    /// JSON lines appended to a local file
    File {
        /// Path to the telemetry file
        path: String,
    },

    /// In-memory sink (not persistent)
    Memory,

    /// Telemetry is not shipped
    #[default]
    Disabled,
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Where batches are delivered
    #[serde(default)]
    pub sink: TelemetrySinkConfig,

    /// Capacity of the channel between the sender and the writer
    ///
    /// When full, new batches are dropped (with a warning log) so that a slow
    /// sink never stalls a load.
    ///
    /// Default: 1000 batches
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl TelemetryConfig {
    /// Validate the telemetry configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if let TelemetrySinkConfig::File { path } = &self.sink {
            if path.is_empty() {
                return Err(crate::Error::config("Telemetry file path cannot be empty"));
            }
        }
        if self.channel_capacity == 0 {
            return Err(crate::Error::config("Telemetry channel capacity must be > 0"));
        }
        Ok(())
    }

    /// Whether telemetry is shipped at all
    pub fn is_enabled(&self) -> bool {
        self.sink != TelemetrySinkConfig::Disabled
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            sink: TelemetrySinkConfig::default(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

/// Logging sink configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// Emit `write_debug` lines
    #[serde(default)]
    pub verbose: bool,
}

fn default_min_raw_lines() -> usize {
    10
}

fn default_min_accepted() -> usize {
    10
}

fn default_channel_capacity() -> usize {
    1000
}
