//! Universe configuration

use aeon_agent::TickDriverConfig;
use aeon_core::{AeonError, AeonResult};
use aeon_synthesis::{PipelineConfig, Seed, Stage};
use serde::{Deserialize, Serialize};

use crate::LoggingConfig;

/// Everything a universe run needs
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniverseConfig {
    pub seed: Seed,
    /// Molecular cloud regions seeded after genesis
    pub clouds: usize,
    /// Last synthesis stage genesis runs
    pub stop_after: Stage,
    pub pipeline: PipelineConfig,
    pub agents: TickDriverConfig,
    pub logging: LoggingConfig,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        UniverseConfig {
            seed: Seed::default(),
            clouds: 8,
            stop_after: Stage::Technology,
            pipeline: PipelineConfig::default(),
            agents: TickDriverConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl UniverseConfig {
    /// Step-by-step visualisation
    pub fn interactive() -> Self {
        UniverseConfig {
            pipeline: PipelineConfig::interactive(),
            agents: TickDriverConfig::realtime(),
            ..Default::default()
        }
    }

    /// Unattended runs: coarse clock, more clouds, quiet logs
    pub fn batch() -> Self {
        UniverseConfig {
            clouds: 64,
            pipeline: PipelineConfig::batch(),
            agents: TickDriverConfig::patient(),
            logging: LoggingConfig::quiet(),
            ..Default::default()
        }
    }

    /// Stellar nursery: stop once molecular clouds exist
    pub fn nursery() -> Self {
        UniverseConfig {
            stop_after: Stage::MoleculeSynthesis,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: impl Into<Seed>) -> Self {
        self.seed = seed.into();
        self
    }

    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json_str(json: &str) -> AeonResult<Self> {
        serde_json::from_str(json).map_err(|e| AeonError::Config(e.to_string()))
    }

    pub fn to_json_string(&self) -> AeonResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| AeonError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = UniverseConfig::from_json_str(r#"{ "seed": 7, "clouds": 3 }"#).unwrap();
        assert_eq!(config.seed, Seed(7));
        assert_eq!(config.clouds, 3);
        assert_eq!(config.stop_after, Stage::Technology);
        assert_eq!(config.pipeline, PipelineConfig::default());
    }

    #[test]
    fn test_stage_by_name() {
        let config =
            UniverseConfig::from_json_str(r#"{ "stop_after": "molecule-synthesis" }"#).unwrap();
        assert_eq!(config.stop_after, Stage::MoleculeSynthesis);
    }

    #[test]
    fn test_bad_json_is_config_error() {
        let err = UniverseConfig::from_json_str("{ clouds: }").unwrap_err();
        assert!(matches!(err, AeonError::Config(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let config = UniverseConfig::batch().with_seed(99);
        let json = config.to_json_string().unwrap();
        assert_eq!(UniverseConfig::from_json_str(&json).unwrap(), config);
    }
}
