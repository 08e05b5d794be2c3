//! Output configuration types

use serde::{Deserialize, Serialize};

/// Global look of the generated graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphStyle {
    pub name: String,
    pub rankdir: String,
    pub font: String,
    pub node_shape: String,
    pub node_style: String,
}

impl Default for GraphStyle {
    fn default() -> Self {
        Self {
            name: "TacticalLegends".to_string(),
            rankdir: "TB".to_string(),
            font: "Helvetica".to_string(),
            node_shape: "box".to_string(),
            node_style: "rounded".to_string(),
        }
    }
}

/// A static relationship between two entries of the scanned tree.
///
/// Endpoints are `/`-separated paths relative to the scan root. A folder
/// endpoint attaches the edge to the folder's cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl EdgeSpec {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }
}
