//! Simulation configuration, loaded from a YAML file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use npc_core::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Simulated time per zone update, in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Number of zone updates to run
    #[serde(default = "default_ticks")]
    pub ticks: u64,

    /// Tree documents to load (relative to the config file)
    pub trees: Vec<PathBuf>,

    pub agents: Vec<AgentConfig>,

    /// Record and print per-agent status traces
    pub trace: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    pub entity: EntityId,

    /// Name of a loaded tree
    pub behavior: String,

    #[serde(default)]
    pub paused: bool,

    /// Initial working selection
    #[serde(default)]
    pub selection: Vec<EntityId>,
}

fn default_tick_ms() -> u64 {
    100
}
fn default_ticks() -> u64 {
    10
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            ticks: default_ticks(),
            trees: Vec::new(),
            agents: Vec::new(),
            trace: false,
        }
    }
}

impl SimConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    /// Resolve tree paths relative to `base`
    pub fn resolve_paths(&mut self, base: &Path) {
        for tree in &mut self.trees {
            if tree.is_relative() {
                *tree = base.join(&*tree);
            }
        }
    }
}
