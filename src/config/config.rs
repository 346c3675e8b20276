use std::fs;
use std::path::Path;

use anyhow::Error;
use serde::{Deserialize, Serialize};

/// Drawing parameters for the per-face landmark graphic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GraphicConfig {
    pub dot_radius: f32,
    /// Vertical label offset in view space; negative draws above the dot.
    pub label_offset_y: f32,
}

impl GraphicConfig {
    pub(crate) fn new() -> Self {
        GraphicConfig {
            dot_radius: 3.0,
            label_offset_y: -10.0,
        }
    }
}

impl Default for GraphicConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverlayConfig {
    pub graphic: GraphicConfig,
}

impl OverlayConfig {
    pub(crate) fn new() -> Self {
        OverlayConfig {
            graphic: GraphicConfig::new(),
        }
    }

    /// from_file loads overlay settings from a JSON file.
    ///
    /// # Arguments
    /// * `path` - path to the JSON config file
    ///
    /// # Returns
    /// * `Result<OverlayConfig, Error>`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let raw = fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self::new()
    }
}
