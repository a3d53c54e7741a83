//! Configuration management for GraphLens services.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (`GRAPHLENS__LENS__*`)
//! 2. Config file (`graphlens.toml`, `[lens]` table)
//! 3. Defaults

use serde::Deserialize;

use crate::error::GraphLensError;
use crate::types::VisualizationType;

/// Top-level GraphLens configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LensConfig {
    /// Base URL that view links are built from (default: "http://localhost:3000").
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Visualization used when a graph is submitted without one.
    #[serde(default)]
    pub default_visualization: VisualizationType,

    /// Title used when a graph is submitted without one.
    #[serde(default = "default_title")]
    pub default_title: String,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_title() -> String {
    "Graph Visualization".to_string()
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_visualization: VisualizationType::default(),
            default_title: default_title(),
        }
    }
}

impl LensConfig {
    /// Load from `{file_prefix}.toml` (optional) layered under `GRAPHLENS__` env vars.
    ///
    /// A missing `[lens]` table yields the defaults; a malformed one is an error.
    pub fn load(file_prefix: &str) -> Result<Self, GraphLensError> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("GRAPHLENS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        match cfg.get::<LensConfig>("lens") {
            Ok(c) => {
                tracing::debug!(base_url = %c.base_url, "Loaded lens config");
                Ok(c)
            }
            Err(config::ConfigError::NotFound(_)) => Ok(LensConfig::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// The URL a renderer serves the given graph at.
    pub fn view_url(&self, graph_id: &str, visualization: VisualizationType) -> String {
        format!(
            "{}/view?id={}&type={}",
            self.base_url.trim_end_matches('/'),
            graph_id,
            visualization
        )
    }
}
