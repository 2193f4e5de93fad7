use serde::Deserialize;
use std::path::PathBuf;

use crate::pipeline::domain::greyness::DEFAULT_GREY_THRESHOLD;
use crate::pipeline::domain::reducer::{ReducerConfig, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH};

/// Where frames come from when no override is wired in.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    Synthetic { width: u32, height: u32 },
    Still { path: PathBuf },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub data_dir: PathBuf,
    /// Seconds between capture cycles.
    pub interval_secs: u64,
    /// Seconds to wait before the next attempt after a failed cycle.
    pub retry_delay_secs: u64,
    pub grid_width: u32,
    pub grid_height: u32,
    pub grey_threshold: f64,
    pub source: SourceConfig,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            interval_secs: 3600,
            retry_delay_secs: 60,
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            grey_threshold: DEFAULT_GREY_THRESHOLD,
            source: SourceConfig::Synthetic {
                width: 640,
                height: 480,
            },
        }
    }
}

impl Configuration {
    /// Layers an optional `graubot` config file and `GRAUBOT_*` environment
    /// variables over the defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("graubot").required(false))
            .add_source(config::Environment::with_prefix("GRAUBOT").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn reducer_config(&self) -> ReducerConfig {
        ReducerConfig {
            grid_width: self.grid_width,
            grid_height: self.grid_height,
            grey_threshold: self.grey_threshold,
        }
    }
}
