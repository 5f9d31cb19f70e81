use crate::types::FloorLimits;
use serde::{Deserialize, Serialize};

fn default_cabins() -> usize {
    1
}

/// Static dispatcher configuration.
///
/// `floor_limits` absent means every integer floor is legal. `sole_mode`
/// makes every moving cabin absorb every pool pickup whose floor it
/// passes, ignoring direction; it is meant for single-cabin buildings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    #[serde(default = "default_cabins")]
    pub cabins:       usize,
    #[serde(default)]
    pub floor_limits: Option<FloorLimits>,
    #[serde(default)]
    pub sole_mode:    bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            cabins:       1,
            floor_limits: None,
            sole_mode:    false,
        }
    }
}

impl DispatchConfig {
    /// Load from a JSON file.
    /// In tests, use DispatchConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: DispatchConfig = serde_json::from_str(&content)?;
        anyhow::ensure!(config.cabins > 0, "config requires at least one cabin");
        if let Some(limits) = config.floor_limits {
            anyhow::ensure!(
                limits.bottom <= limits.top,
                "floor_limits requires bottom <= top, got bottom={} top={}",
                limits.bottom,
                limits.top
            );
        }
        Ok(config)
    }

    /// Config with hardcoded defaults for use in unit tests.
    pub fn default_test() -> Self {
        Self {
            cabins:       2,
            floor_limits: Some(FloorLimits { bottom: -2, top: 12 }),
            sole_mode:    false,
        }
    }
}
