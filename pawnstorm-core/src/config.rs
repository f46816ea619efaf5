//! Engine configuration

use crate::eval::Heuristics;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Search settings for the bot
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Search depth in plies
    pub depth: u32,
    /// Heuristics for evaluation
    pub heuristics: Heuristics,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            heuristics: Heuristics::default(),
        }
    }
}

impl EngineConfig {
    /// Create config for a given depth
    pub fn with_depth(depth: u32) -> Self {
        Self {
            depth,
            ..Default::default()
        }
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.depth, 3);
        assert_eq!(config.heuristics.mobility_weight, 2);
        assert_eq!(EngineConfig::with_depth(5).depth, 5);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{ "depth": 1 }"#).unwrap();
        assert_eq!(config.depth, 1);
        assert_eq!(config.heuristics, Heuristics::default());

        let config: EngineConfig = serde_json::from_str(
            r#"{ "heuristics": { "material": [500, 9, 5, 3, 3, 1], "mobility_weight": 1 } }"#,
        )
        .unwrap();
        assert_eq!(config.depth, 3);
        assert_eq!(config.heuristics.material[0], 500);
        assert_eq!(config.heuristics.mobility_weight, 1);
    }

    #[test]
    fn test_save_load() {
        let path = std::env::temp_dir().join(format!("pawnstorm-config-{}.json", std::process::id()));
        let mut config = EngineConfig::with_depth(4);
        config.heuristics.mobility_weight = 1;

        config.save(&path).unwrap();
        let loaded = EngineConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }
}
