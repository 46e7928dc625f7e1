use std::str::FromStr;
use std::time::Duration;

use trashmap_core::escalation::{EscalationPolicy, DEFAULT_ESCALATION_THRESHOLD};
use trashmap_core::grid::{self, DEFAULT_GRID_PRECISION, DEFAULT_LOOKBACK_DAYS};
use trashmap_pipeline::monitor::MonitorSettings;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long to wait for background jobs on shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Hotspot monitor defaults and schedule.
    pub monitor: MonitorConfig,
    /// Reject `COMPLETED` status updates that carry no material data.
    pub require_materials: bool,
}

/// Hotspot monitor configuration.
#[derive(Debug, Clone, Copy)]
pub struct MonitorConfig {
    pub lookback_days: u32,
    pub grid_precision: u32,
    pub policy: EscalationPolicy,
    /// Periodic pass interval. `None` disables the background job.
    pub interval: Option<Duration>,
}

impl MonitorConfig {
    /// Pass settings, with optional per-request overrides of the window.
    pub fn settings(&self, days: Option<u32>, grid_precision: Option<u32>) -> MonitorSettings {
        MonitorSettings {
            lookback_days: days.unwrap_or(self.lookback_days),
            grid_precision: grid_precision.unwrap_or(self.grid_precision),
            policy: self.policy,
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            grid_precision: DEFAULT_GRID_PRECISION,
            policy: EscalationPolicy::default(),
            interval: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                         | Default                 |
    /// |---------------------------------|-------------------------|
    /// | `HOST`                          | `0.0.0.0`               |
    /// | `PORT`                          | `3000`                  |
    /// | `CORS_ORIGINS`                  | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`          | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`         | `30`                    |
    /// | `HOTSPOT_LOOKBACK_DAYS`         | `30`                    |
    /// | `HOTSPOT_GRID_PRECISION`        | `4`                     |
    /// | `HOTSPOT_THRESHOLD`             | `5`                     |
    /// | `HOTSPOT_MONITOR_INTERVAL_SECS` | `0` (disabled)          |
    /// | `CLEANUP_REQUIRE_MATERIALS`     | `false`                 |
    ///
    /// `DATABASE_URL` is read separately by the binary.
    ///
    /// Panics on malformed values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env_or("PORT", 3000);

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", 30);
        let shutdown_timeout_secs: u64 = env_or("SHUTDOWN_TIMEOUT_SECS", 30);

        let lookback_days: u32 = env_or("HOTSPOT_LOOKBACK_DAYS", DEFAULT_LOOKBACK_DAYS);
        grid::validate_lookback_days(lookback_days)
            .unwrap_or_else(|e| panic!("HOTSPOT_LOOKBACK_DAYS: {e}"));

        let grid_precision: u32 = env_or("HOTSPOT_GRID_PRECISION", DEFAULT_GRID_PRECISION);
        grid::validate_precision(grid_precision)
            .unwrap_or_else(|e| panic!("HOTSPOT_GRID_PRECISION: {e}"));

        let policy = EscalationPolicy::new(env_or("HOTSPOT_THRESHOLD", DEFAULT_ESCALATION_THRESHOLD))
            .unwrap_or_else(|e| panic!("HOTSPOT_THRESHOLD: {e}"));

        let interval_secs: u64 = env_or("HOTSPOT_MONITOR_INTERVAL_SECS", 0);
        let interval = (interval_secs > 0).then(|| Duration::from_secs(interval_secs));

        let require_materials: bool = env_or("CLEANUP_REQUIRE_MATERIALS", false);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            monitor: MonitorConfig {
                lookback_days,
                grid_precision,
                policy,
                interval,
            },
            require_materials,
        }
    }
}

/// Parse an env var, falling back to `default` when unset.
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}
