//! Layered application settings

use std::path::Path;

use blast_engine::BlastConfig;
use config::{Config, ConfigError, Environment, File};
use scene_annotation::AnnotationConfig;
use serde::{Deserialize, Serialize};

/// Environment variable prefix, e.g. `BLAST__ENGINE__FALLBACK_SCALE_M_PER_PX`
pub const ENV_PREFIX: &str = "BLAST";

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Analysis engine settings
    pub engine: BlastConfig,

    /// Overlay drawing settings
    pub annotation: AnnotationConfig,

    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: BlastConfig::default(),
            annotation: AnnotationConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults, then the optional file, then `BLAST__*` variables
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
