// # pagestore - command-line front-end
//
// This binary is a thin wiring layer. All container, parsing and
// notification logic lives in pagestore-core.
//
// The pagestore binary is responsible for:
// 1. Reading configuration from environment variables
// 2. Initializing tracing and the process-wide log sink
// 3. Attaching the built-in observers
// 4. Loading the input file and applying any reload thresholds
//
// ## Configuration
//
// ### Input
// - `PAGESTORE_INPUT`: Path of the line-oriented input file (required)
// - `PAGESTORE_THRESHOLD`: Threshold for the initial load (default 0)
// - `PAGESTORE_RELOAD_THRESHOLDS`: Comma-separated thresholds applied in turn
//
// ### Container
// - `PAGESTORE_MIN_LINES`: Minimum number of input lines (default 10)
// - `PAGESTORE_MIN_ACCEPTED`: Minimum number of accepted entries (default 10)
// - `PAGESTORE_TRANSACTIONAL`: Commit raw lines only after a successful parse
//
// ### Telemetry
// - `PAGESTORE_TELEMETRY_PATH`: JSON lines file for shipped batches
//
// ### Logging
// - `PAGESTORE_LOG_LEVEL`: trace, debug, info, warn, error (default info)
// - `PAGESTORE_VERBOSE`: Emit debug lines from the log sink; raises the
//   level to at least debug
//
// ## Example
//
// ```bash
// export PAGESTORE_INPUT=/var/lib/pagestore/records.txt
// export PAGESTORE_THRESHOLD=5
// export PAGESTORE_RELOAD_THRESHOLDS=2.5,7
// export PAGESTORE_TELEMETRY_PATH=/var/lib/pagestore/stats.jsonl
//
// pagestore
// ```

use anyhow::{Context, Result};
use pagestore_core::config::TelemetrySinkConfig;
use pagestore_core::telemetry::{self, TelemetryWriter};
use pagestore_core::{
    ContainerConfig, Histogram, IngestPolicy, LogSink, PageContainer, PageStoreConfig,
    StatSender, UsedMemory,
};
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Clean run
/// - 1: Configuration or startup error
/// - 2: Runtime error (load failed)
#[derive(Debug, Clone, Copy)]
enum PageStoreExitCode {
    /// Every pass succeeded
    Clean = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// A load or reload failed
    RuntimeError = 2,
}

impl From<PageStoreExitCode> for ExitCode {
    fn from(code: PageStoreExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    input: PathBuf,
    threshold: f64,
    reload_thresholds: Vec<f64>,
    store: PageStoreConfig,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        let input = env::var("PAGESTORE_INPUT")
            .context("PAGESTORE_INPUT is required. Set it via: export PAGESTORE_INPUT=records.txt")?;

        let threshold = match env::var("PAGESTORE_THRESHOLD") {
            Ok(raw) => parse_threshold(&raw).context("PAGESTORE_THRESHOLD")?,
            Err(_) => 0.0,
        };

        let reload_thresholds = env::var("PAGESTORE_RELOAD_THRESHOLDS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_threshold)
            .collect::<Result<Vec<f64>>>()
            .context("PAGESTORE_RELOAD_THRESHOLDS")?;

        let mut container = ContainerConfig::default();
        if let Ok(raw) = env::var("PAGESTORE_MIN_LINES") {
            container.min_raw_lines = raw
                .parse()
                .with_context(|| format!("PAGESTORE_MIN_LINES '{}' is not a count", raw))?;
        }
        if let Ok(raw) = env::var("PAGESTORE_MIN_ACCEPTED") {
            container.min_accepted = raw
                .parse()
                .with_context(|| format!("PAGESTORE_MIN_ACCEPTED '{}' is not a count", raw))?;
        }
        if env_flag("PAGESTORE_TRANSACTIONAL") {
            container.ingest = IngestPolicy::Transactional;
        }

        let mut store = PageStoreConfig::new();
        store.container = container;
        store.log.verbose = env_flag("PAGESTORE_VERBOSE");
        if let Ok(path) = env::var("PAGESTORE_TELEMETRY_PATH") {
            store.telemetry.sink = TelemetrySinkConfig::File { path };
        }

        Ok(Self {
            input: PathBuf::from(input),
            threshold,
            reload_thresholds,
            store,
            log_level: env::var("PAGESTORE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        self.store.validate()?;

        if !self.input.is_file() {
            anyhow::bail!(
                "PAGESTORE_INPUT does not point to a readable file: {}",
                self.input.display()
            );
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "PAGESTORE_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }
}

fn parse_threshold(raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("'{}' is not a number", raw))?;
    if !value.is_finite() {
        anyhow::bail!("'{}' is not a finite number", raw);
    }
    Ok(value)
}

/// Subscriber level for a configured level name
///
/// A verbose log sink emits its debug lines through `debug!`, so verbosity
/// lifts the level to at least `DEBUG`.
fn max_level(log_level: &str, verbose: bool) -> Level {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    if verbose { level.max(Level::DEBUG) } else { level }
}

/// Whether a failed load left the entries behind the raw lines
fn entries_lag_raw_lines(ingest: IngestPolicy, err: &pagestore_core::Error) -> bool {
    ingest == IngestPolicy::CommitRawFirst && err.is_parse_failure()
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return PageStoreExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {:#}", e);
        return PageStoreExitCode::ConfigError.into();
    }

    let log_level = max_level(&config.log_level, config.store.log.verbose);

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return PageStoreExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return PageStoreExitCode::ConfigError.into();
        }
    };

    rt.block_on(async {
        match run(config).await {
            Ok(()) => PageStoreExitCode::Clean,
            Err(e) => {
                error!("pagestore failed: {:#}", e);
                PageStoreExitCode::RuntimeError
            }
        }
    })
    .into()
}

/// Wire observers, load the input, apply reloads
async fn run(config: Config) -> Result<()> {
    let tracing_log = pagestore_core::log::global(config.store.log.verbose);
    if tracing_log.is_verbose() {
        debug!("Verbose log sink enabled");
    }
    let log: Arc<dyn LogSink> = tracing_log;

    let mut container = PageContainer::new(log.clone(), config.store.container.clone())?;

    let memory = Arc::new(UsedMemory::new(log.clone()));
    let histogram = Arc::new(Histogram::new(log.clone()));
    container.attach_data(&memory);
    container.attach_data(&histogram);
    container.attach_batch(&histogram);

    // Telemetry is optional; the writer runs on its own task. Loads run on a
    // blocking thread, so the sender waits for room instead of dropping.
    let sink = if config.store.telemetry.is_enabled() {
        telemetry::create_sink(&config.store.telemetry.sink).await?
    } else {
        None
    };
    let telemetry = match sink {
        Some(sink) => {
            let (sender, rx) =
                StatSender::blocking(log.clone(), config.store.telemetry.channel_capacity);
            let sender = Arc::new(sender);
            container.attach_batch(&sender);
            let writer = TelemetryWriter::new(sink);
            let handle = tokio::spawn(async move { writer.run(rx).await });
            Some((sender, handle))
        }
        None => None,
    };

    let (mut container, result) = tokio::task::spawn_blocking(move || {
        let result = apply(&mut container, &config);
        (container, result)
    })
    .await?;

    info!(
        "Final state: {} raw line(s), {} entr(ies), ~{} byte(s), average score {:.3}",
        container.raw_lines().len(),
        container.len(),
        memory.used(),
        histogram.average()
    );

    if let Some((sender, handle)) = telemetry {
        container.detach_batch(&sender);
        if sender.dropped() > 0 {
            warn!("{} telemetry batch(es) dropped", sender.dropped());
        }
        drop(sender);
        let delivered = handle.await??;
        info!("{} telemetry batch(es) delivered", delivered);
    }

    result
}

/// Run the initial load and every configured reload
fn apply(container: &mut PageContainer, config: &Config) -> Result<()> {
    let file = File::open(&config.input)
        .with_context(|| format!("Failed to open {}", config.input.display()))?;

    if let Err(e) = container.load(BufReader::new(file), config.threshold) {
        if entries_lag_raw_lines(container.config().ingest, &e) {
            warn!(
                "Raw lines now hold {} line(s) from {}; entries keep the previous {}",
                container.raw_lines().len(),
                config.input.display(),
                container.len()
            );
        }
        return Err(e).with_context(|| format!("Load at threshold {} failed", config.threshold));
    }
    info!(
        "Loaded {} entr(ies) from {} at threshold {}",
        container.len(),
        config.input.display(),
        config.threshold
    );

    for threshold in &config.reload_thresholds {
        container
            .reload(*threshold)
            .with_context(|| format!("Reload at threshold {} failed", threshold))?;
        info!("Reloaded {} entr(ies) at threshold {}", container.len(), threshold);
    }

    Ok(())
}
