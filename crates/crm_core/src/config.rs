//! Runtime configuration for stores, export and logging.
//!
//! # Responsibility
//! - Hold the simulated latency range applied by stores and exporter.
//! - Hold spreadsheet column sizing limits.
//! - Parse and validate JSON configuration from the host.
//!
//! # Invariants
//! - `Latency::min_ms <= Latency::max_ms`.
//! - `0 < ExportConfig::min_column_width <= ExportConfig::max_column_width`.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_LATENCY_MIN_MS: u64 = 200;
const DEFAULT_LATENCY_MAX_MS: u64 = 500;
const DEFAULT_MIN_COLUMN_WIDTH: usize = 10;
const DEFAULT_MAX_COLUMN_WIDTH: usize = 50;
const DEFAULT_COLUMN_PADDING: usize = 2;

/// Configuration error for invalid ranges or malformed input.
#[derive(Debug)]
pub enum ConfigError {
    InvalidLatency { min_ms: u64, max_ms: u64 },
    InvalidColumnWidth { min: usize, max: usize },
    InvalidLogLevel(String),
    InvalidLogDir(String),
    Json(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLatency { min_ms, max_ms } => write!(
                f,
                "invalid latency range: min {min_ms}ms is greater than max {max_ms}ms"
            ),
            Self::InvalidColumnWidth { min, max } => {
                write!(f, "invalid column width bounds: min {min}, max {max}")
            }
            Self::InvalidLogLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::InvalidLogDir(message) => write!(f, "invalid log directory: {message}"),
            Self::Json(err) => write!(f, "malformed configuration: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Simulated network latency, uniformly sampled from `[min_ms, max_ms)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Latency {
    min_ms: u64,
    max_ms: u64,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            min_ms: DEFAULT_LATENCY_MIN_MS,
            max_ms: DEFAULT_LATENCY_MAX_MS,
        }
    }
}

impl Latency {
    pub fn new(min_ms: u64, max_ms: u64) -> Result<Self, ConfigError> {
        let latency = Self { min_ms, max_ms };
        latency.validate()?;
        Ok(latency)
    }

    /// No delay at all.
    pub fn none() -> Self {
        Self {
            min_ms: 0,
            max_ms: 0,
        }
    }

    pub fn min_ms(&self) -> u64 {
        self.min_ms
    }

    pub fn max_ms(&self) -> u64 {
        self.max_ms
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_ms > self.max_ms {
            return Err(ConfigError::InvalidLatency {
                min_ms: self.min_ms,
                max_ms: self.max_ms,
            });
        }
        Ok(())
    }

    /// Draws one delay. A degenerate range yields exactly `min_ms`.
    pub fn sample(&self) -> Duration {
        if self.max_ms <= self.min_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rand::thread_rng().gen_range(self.min_ms..self.max_ms))
    }

    /// Suspends the current task for one sampled delay.
    pub async fn wait(&self) {
        let delay = self.sample();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Spreadsheet column sizing, in character units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub min_column_width: usize,
    pub max_column_width: usize,
    pub column_padding: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            min_column_width: DEFAULT_MIN_COLUMN_WIDTH,
            max_column_width: DEFAULT_MAX_COLUMN_WIDTH,
            column_padding: DEFAULT_COLUMN_PADDING,
        }
    }
}

impl ExportConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_column_width == 0 || self.min_column_width > self.max_column_width {
            return Err(ConfigError::InvalidColumnWidth {
                min: self.min_column_width,
                max: self.max_column_width,
            });
        }
        Ok(())
    }

    /// Width for a column whose longest rendered cell has `content_chars`.
    pub fn column_width(&self, content_chars: usize) -> usize {
        (content_chars.max(self.min_column_width) + self.column_padding).min(self.max_column_width)
    }
}

/// Top-level core configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub latency: Latency,
    pub export: ExportConfig,
}

impl CoreConfig {
    /// Configuration without simulated latency.
    pub fn instant() -> Self {
        Self {
            latency: Latency::none(),
            ..Self::default()
        }
    }

    /// Parses and validates a JSON document. Missing fields take defaults.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.latency.validate()?;
        self.export.validate()
    }
}

/// File logging settings consumed by `init_logging`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    level: &'static str,
    log_dir: PathBuf,
}

impl LoggingConfig {
    /// Normalizes `level` and requires an absolute `log_dir`.
    pub fn new(level: &str, log_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self {
            level: normalize_level(level)?,
            log_dir: normalize_log_dir(log_dir.as_ref())?,
        })
    }

    pub fn level(&self) -> &'static str {
        self.level
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

fn normalize_level(level: &str) -> Result<&'static str, ConfigError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(ConfigError::InvalidLogLevel(other.to_string())),
    }
}

fn normalize_log_dir(log_dir: &Path) -> Result<PathBuf, ConfigError> {
    if log_dir.as_os_str().is_empty() {
        return Err(ConfigError::InvalidLogDir("path cannot be empty".to_string()));
    }
    if !log_dir.is_absolute() {
        return Err(ConfigError::InvalidLogDir(format!(
            "must be absolute, got `{}`",
            log_dir.display()
        )));
    }
    Ok(log_dir.to_path_buf())
}
