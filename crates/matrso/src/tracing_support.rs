//! Structured logging setup for matrso
//!
//! The library crates only emit `tracing` events: kernel dispatch decisions,
//! Strassen scratch sizing, decomposition paths and iteration counts, series
//! term counts and allocation fallbacks. This module installs a subscriber
//! that prints them.
//!
//! # Example
//!
//! ```no_run
//! use matrso::tracing_support::{init_tracing, TracingConfig, TracingFormat};
//!
//! init_tracing(TracingConfig {
//!     format: TracingFormat::Compact,
//!     filter: "matrso_kernels=trace,matrso_core=debug".to_string(),
//!     ..TracingConfig::default()
//! })
//! .unwrap();
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: filter directive (default `matrso_core=info,matrso_kernels=info,warn`)
//! - `MATRSO_LOG_FORMAT`: `json`, `compact` or `pretty` (default `pretty`)
//!
//! Without the `tracing` feature [`init_tracing`] installs nothing and the
//! `record_*` helpers are no-ops.

use anyhow::Result;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Tracing output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracingFormat {
    /// Multi-line human-readable output
    Pretty,
    /// One JSON object per event
    Json,
    /// Single line per event
    Compact,
}

impl TracingFormat {
    /// Parse from string; anything unrecognized is `Pretty`
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => TracingFormat::Json,
            "compact" => TracingFormat::Compact,
            _ => TracingFormat::Pretty,
        }
    }
}

/// Subscriber configuration
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub format: TracingFormat,
    /// Filter directive (e.g. "matrso_core=debug,info")
    pub filter: String,
    /// Enable ANSI colors
    pub with_ansi: bool,
    /// Show target module paths
    pub with_target: bool,
    pub with_thread_ids: bool,
    /// Show file locations and line numbers
    pub with_file: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        let format = std::env::var("MATRSO_LOG_FORMAT")
            .map(|s| TracingFormat::parse(&s))
            .unwrap_or(TracingFormat::Pretty);

        let filter = std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "matrso_core=info,matrso_kernels=info,warn".to_string());

        Self {
            format,
            filter,
            with_ansi: true,
            with_target: true,
            with_thread_ids: false,
            with_file: false,
        }
    }
}

/// Install a global subscriber; call once at startup
///
/// # Errors
///
/// Fails on an invalid filter directive or when a global subscriber is
/// already installed.
#[cfg(feature = "tracing")]
pub fn init_tracing(config: TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.filter)?;

    match config.format {
        TracingFormat::Pretty => {
            let layer = fmt::layer()
                .pretty()
                .with_ansi(config.with_ansi)
                .with_target(config.with_target)
                .with_thread_ids(config.with_thread_ids)
                .with_file(config.with_file)
                .with_line_number(config.with_file)
                .with_filter(filter);
            tracing_subscriber::registry().with(layer).try_init()?;
        }
        TracingFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_target(config.with_target)
                .with_thread_ids(config.with_thread_ids)
                .with_file(config.with_file)
                .with_line_number(config.with_file)
                .with_filter(filter);
            tracing_subscriber::registry().with(layer).try_init()?;
        }
        TracingFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_ansi(config.with_ansi)
                .with_target(config.with_target)
                .with_thread_ids(config.with_thread_ids)
                .with_file(config.with_file)
                .with_line_number(config.with_file)
                .with_filter(filter);
            tracing_subscriber::registry().with(layer).try_init()?;
        }
    }

    Ok(())
}

/// Stub for when the tracing feature is disabled
#[cfg(not(feature = "tracing"))]
pub fn init_tracing(_config: TracingConfig) -> Result<()> {
    Ok(())
}

/// Record a named scalar (a norm, a residual, a condition number)
#[cfg(feature = "tracing")]
pub fn record_metric(name: &str, value: f64) {
    tracing::info!(metric = name, value, "metric_recorded");
}

/// Stub for when the tracing feature is disabled
#[cfg(not(feature = "tracing"))]
pub fn record_metric(_name: &str, _value: f64) {}

/// Record a timed `m×l · l×n` product with its achieved rate
#[cfg(feature = "tracing")]
pub fn record_product(l: usize, m: usize, n: usize, duration: std::time::Duration) {
    let flops = 2.0 * l as f64 * m as f64 * n as f64;
    let secs = duration.as_secs_f64();
    let gflops = if secs > 0.0 { flops / secs / 1e9 } else { 0.0 };
    tracing::info!(l, m, n, duration_ms = secs * 1e3, gflops, "matrix_product");
}

/// Stub for when the tracing feature is disabled
#[cfg(not(feature = "tracing"))]
pub fn record_product(_l: usize, _m: usize, _n: usize, _duration: std::time::Duration) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_format_parse() {
        assert_eq!(TracingFormat::parse("json"), TracingFormat::Json);
        assert_eq!(TracingFormat::parse("JSON"), TracingFormat::Json);
        assert_eq!(TracingFormat::parse("compact"), TracingFormat::Compact);
        assert_eq!(TracingFormat::parse("pretty"), TracingFormat::Pretty);
        assert_eq!(TracingFormat::parse("unknown"), TracingFormat::Pretty);
    }

    #[test]
    fn test_default_config() {
        let config = TracingConfig::default();
        assert!(config.with_ansi);
        assert!(config.with_target);
        assert!(!config.filter.is_empty());
    }

    #[test]
    fn test_record_helpers() {
        // no subscriber installed: these must simply not panic
        record_metric("residual", 1e-12);
        record_product(64, 64, 64, std::time::Duration::from_millis(3));
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn test_invalid_filter_rejected() {
        let config = TracingConfig {
            filter: "matrso_core=verbose".to_string(),
            ..TracingConfig::default()
        };
        assert!(init_tracing(config).is_err());
    }

    #[cfg(not(feature = "tracing"))]
    #[test]
    fn test_stub_init_succeeds() {
        assert!(init_tracing(TracingConfig::default()).is_ok());
    }
}
