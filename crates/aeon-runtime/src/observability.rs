//! Logging initialisation and decision sink selection

use std::sync::Arc;

use aeon_broker::{NullSink, TracingSink};
use aeon_core::{AeonError, AeonResult, DecisionSink};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Logging configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    pub level: String,
    /// One JSON object per line instead of human-readable text
    pub json: bool,
    /// Log every broker decision
    pub decisions: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            json: false,
            decisions: true,
        }
    }
}

impl LoggingConfig {
    /// Warnings only, no decision trail
    pub fn quiet() -> Self {
        LoggingConfig {
            level: "warn".to_string(),
            json: false,
            decisions: false,
        }
    }

    /// Everything, as JSON lines
    pub fn trace_json() -> Self {
        LoggingConfig {
            level: "trace".to_string(),
            json: true,
            decisions: true,
        }
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &LoggingConfig) -> AeonResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| AeonError::Logging(e.to_string()))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| AeonError::Logging(e.to_string()))
}

/// Sink for broker decisions under this configuration
pub fn decision_sink(config: &LoggingConfig) -> Arc<dyn DecisionSink> {
    if config.decisions {
        Arc::new(TracingSink)
    } else {
        Arc::new(NullSink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(LoggingConfig::default().level, "info");
        assert!(!LoggingConfig::quiet().decisions);
        assert!(LoggingConfig::trace_json().json);
    }

    #[test]
    fn test_second_init_fails() {
        let config = LoggingConfig::quiet();
        let _ = init_logging(&config);
        assert!(matches!(init_logging(&config), Err(AeonError::Logging(_))));
    }
}
