//! Editor configuration.
//!
//! Every field has a default, and missing JSON fields fall back to it, so a
//! host can ship a partial config such as `{"autosave": false}`.

use crate::error::GraphError;
use crate::grid::{default_grid_layers, GridLayer};
use crate::layout::LayoutMetrics;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub metrics: LayoutMetrics,
    /// Width of the highlight drawn around the selected node.
    pub selection_border: f32,
    pub link_thickness: f32,
    /// Background grid layers, drawn in order.
    pub grid_layers: Vec<GridLayer>,
    /// Save through the attached store after each completed interaction.
    pub autosave: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            metrics: LayoutMetrics::default(),
            selection_border: 5.0,
            link_thickness: 5.0,
            grid_layers: default_grid_layers(),
            autosave: true,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, GraphError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
