// Application configuration types
//
// This module contains:
// - Timing constants for the UI loop and the background timers
// - RefreshConfig for the adjustable UI refresh interval
// - Command-line arguments and the resolved AppConfig

use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use std::time::{Duration, Instant};

// ============================================================================
// Constants
// ============================================================================

/// Minimum refresh interval in milliseconds
pub const MIN_REFRESH_MS: u64 = 50;

/// Maximum refresh interval in milliseconds
pub const MAX_REFRESH_MS: u64 = 10000;

/// Default refresh interval in milliseconds
pub const DEFAULT_REFRESH_MS: u64 = 250;

/// Refresh interval adjustment step in milliseconds
pub const REFRESH_STEP: u64 = 50;

/// Duration to highlight recently changed refresh intervals
pub const CHANGE_HIGHLIGHT_DURATION: Duration = Duration::from_millis(500);

/// Tick interval for the edge pulse animation
pub const PULSE_TICK: Duration = Duration::from_millis(100);

/// Pulse phase advance per pulse tick (0.0 ~ 1.0 per cycle)
pub const PULSE_STEP: f32 = 0.05;

/// Elapsed-time recomputation interval for running jobs
pub const ELAPSED_TICK: Duration = Duration::from_secs(1);

/// Interval between simulated status snapshots
pub const STATUS_ANIMATION_TICK: Duration = Duration::from_secs(5);

/// Default log file name
pub const DEFAULT_LOG_FILE: &str = "dagscope.log";

// ============================================================================
// Refresh
// ============================================================================

/// Configuration for the UI refresh interval
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Refresh interval in milliseconds (50-10000ms)
    pub refresh_ms: u64,

    /// Timestamp of last interval change (for visual feedback)
    pub last_change: Option<Instant>,
}

impl RefreshConfig {
    pub fn new(refresh_ms: u64) -> Self {
        Self {
            refresh_ms: refresh_ms.clamp(MIN_REFRESH_MS, MAX_REFRESH_MS),
            last_change: None,
        }
    }

    /// Get UI refresh interval as Duration
    pub fn ui_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }

    /// Whether the interval changed within CHANGE_HIGHLIGHT_DURATION
    pub fn recently_changed(&self) -> bool {
        self.last_change
            .map(|t| t.elapsed() < CHANGE_HIGHLIGHT_DURATION)
            .unwrap_or(false)
    }

    /// Shorten the interval by one step, clamped to MIN_REFRESH_MS
    pub fn faster(&mut self) {
        self.refresh_ms = self.refresh_ms.saturating_sub(REFRESH_STEP).max(MIN_REFRESH_MS);
        self.last_change = Some(Instant::now());
    }

    /// Lengthen the interval by one step, clamped to MAX_REFRESH_MS
    pub fn slower(&mut self) {
        self.refresh_ms = self.refresh_ms.saturating_add(REFRESH_STEP).min(MAX_REFRESH_MS);
        self.last_change = Some(Instant::now());
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_MS)
    }
}

// ============================================================================
// Command line
// ============================================================================

/// Terminal job-detail dashboard with a live pipeline DAG view
#[derive(Debug, Parser)]
#[command(name = "dagscope", version, about)]
#[command(group(ArgGroup::new("source").required(true).args(["file", "url"])))]
pub struct Cli {
    /// Id of the job to display
    pub job_id: String,

    /// Read job snapshots from a JSON file (one job or an array of jobs)
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Base URL of the job service REST API (GET {url}/job-info/{id})
    #[arg(long, value_name = "BASE_URL")]
    pub url: Option<String>,

    /// Re-fetch the job every N seconds (0 disables polling)
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub poll_secs: u64,

    /// Animate vertex statuses from a JSON file of status snapshots (demo mode)
    #[arg(long, value_name = "PATH")]
    pub simulate_status: Option<PathBuf>,

    /// UI refresh interval in milliseconds
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_REFRESH_MS,
          value_parser = clap::value_parser!(u64).range(MIN_REFRESH_MS..=MAX_REFRESH_MS))]
    pub refresh_ms: u64,

    /// Log file path (the terminal is owned by the UI)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

/// Where job snapshots come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    File(PathBuf),
    Http(String),
}

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub job_id: String,
    pub source: SourceConfig,
    pub poll_interval: Option<Duration>,
    pub simulate_status: Option<PathBuf>,
    pub refresh_ms: u64,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        let source = match (&cli.file, &cli.url) {
            (Some(path), _) => SourceConfig::File(path.clone()),
            (None, Some(url)) => SourceConfig::Http(url.clone()),
            // clap enforces one of the two
            (None, None) => SourceConfig::File(PathBuf::new()),
        };

        Self {
            job_id: cli.job_id.clone(),
            source,
            poll_interval: (cli.poll_secs > 0).then(|| Duration::from_secs(cli.poll_secs)),
            simulate_status: cli.simulate_status.clone(),
            refresh_ms: cli.refresh_ms,
        }
    }

    /// Configuration for an in-memory run
    #[cfg(test)]
    pub fn for_job(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            source: SourceConfig::File(PathBuf::new()),
            poll_interval: None,
            simulate_status: None,
            refresh_ms: DEFAULT_REFRESH_MS,
        }
    }
}
