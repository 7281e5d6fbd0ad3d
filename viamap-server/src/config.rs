//! TOML-backed server configuration.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use viamap_core::prelude::*;

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    pub network: NetworkConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
}

#[derive(Debug, Deserialize)]
pub struct NetworkConfig {
    /// Path to the `nodes.csv` file.
    pub nodes: PathBuf,
    /// Path to the `edges.csv` file.
    pub edges: PathBuf,
    #[serde(default)]
    pub keep_largest_component: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub mode: TravelMode,
    pub extent_margin: f64,
    pub parallel: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            mode: TravelMode::Drive,
            extent_margin: DEFAULT_EXTENT_MARGIN,
            parallel: true,
        }
    }
}

impl RoutingConfig {
    pub fn to_options(&self) -> RoutingOptions {
        RoutingOptions {
            mode: self.mode,
            extent_margin: self.extent_margin,
            parallel: self.parallel,
        }
    }
}

impl ServerConfig {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read config '{}': {e}", path.display()))?;
        Ok(toml::from_str(&raw)?)
    }
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}
