//! Configuration loaded from an optional `calc.toml` plus environment overrides.
//!
//! [`CalcConfig`] holds every tunable of the orchestrator and the worker pool.
//! Values missing from the file fall back to defaults. Environment variables
//! (`COMPUTING_POWER`, `TIME_ADDITION_MS`, ...) take precedence over the file;
//! values that do not parse are ignored and the default applies instead.

use std::path::Path;

use serde::Deserialize;

use crate::error::CalcError;

pub const DEFAULT_CONFIG_FILE: &str = "calc.toml";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalcConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Orchestrator base URL used by standalone workers.
    #[serde(default = "default_orchestrator_url")]
    pub orchestrator_url: String,

    /// Number of compute workers. Zero disables computation entirely.
    #[serde(default)]
    pub computing_power: usize,

    #[serde(default = "default_operation_ms")]
    pub time_addition_ms: u64,

    #[serde(default = "default_operation_ms")]
    pub time_subtraction_ms: u64,

    #[serde(default = "default_operation_ms")]
    pub time_multiplications_ms: u64,

    #[serde(default = "default_operation_ms")]
    pub time_divisions_ms: u64,

    /// Upper bound (exclusive) of the random extra delay per task.
    #[serde(default = "default_jitter_ms")]
    pub jitter_ms: u64,

    /// Idle time between two polls of the same worker.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Submissions that may wait for the expression processor.
    #[serde(default = "default_processor_backlog")]
    pub processor_backlog: usize,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_orchestrator_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_operation_ms() -> u64 {
    1000
}

fn default_jitter_ms() -> u64 {
    100
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_queue_capacity() -> usize {
    crate::dispatch::DEFAULT_CAPACITY
}

fn default_processor_backlog() -> usize {
    crate::dispatch::DEFAULT_BACKLOG
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            orchestrator_url: default_orchestrator_url(),
            computing_power: 0,
            time_addition_ms: default_operation_ms(),
            time_subtraction_ms: default_operation_ms(),
            time_multiplications_ms: default_operation_ms(),
            time_divisions_ms: default_operation_ms(),
            jitter_ms: default_jitter_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            queue_capacity: default_queue_capacity(),
            processor_backlog: default_processor_backlog(),
        }
    }
}

impl CalcConfig {
    /// Loads `path` (or `calc.toml` in the working directory) and applies
    /// the process environment on top. A missing default file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, CalcError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, CalcError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CalcError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Ok(toml::from_str::<CalcConfig>(&contents)?)
    }

    /// Overrides fields from environment-style lookups.
    ///
    /// `COMPUTING_POWER` that is present but invalid resets the worker count
    /// to zero; invalid timings reset to their defaults.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("COMPUTING_POWER") {
            self.computing_power = value.trim().parse().unwrap_or(0);
        }

        let timings = [
            ("TIME_ADDITION_MS", &mut self.time_addition_ms),
            ("TIME_SUBTRACTION_MS", &mut self.time_subtraction_ms),
            ("TIME_MULTIPLICATIONS_MS", &mut self.time_multiplications_ms),
            ("TIME_DIVISIONS_MS", &mut self.time_divisions_ms),
        ];
        for (key, field) in timings {
            if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
                *field = value.trim().parse().unwrap_or_else(|_| {
                    tracing::warn!("Ignoring invalid {}={:?}", key, value);
                    default_operation_ms()
                });
            }
        }

        if let Some(bind) = lookup("CALC_BIND").filter(|v| !v.is_empty()) {
            self.bind = bind;
        }
        if let Some(url) = lookup("CALC_ORCHESTRATOR_URL").filter(|v| !v.is_empty()) {
            self.orchestrator_url = url;
        }
    }
}
