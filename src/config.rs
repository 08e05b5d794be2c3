//! Configuration loaded from `dirgraph.toml`

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::category::{CategoryRule, DEFAULT_COLOR, RuleSet};
use crate::error::ConfigError;
use crate::output::{EdgeSpec, GraphStyle};

/// File name looked up in the scanned root when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "dirgraph.toml";

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DirgraphConfig {
    pub graph_name: Option<String>,
    pub rankdir: Option<String>,
    pub font: Option<String>,
    pub node_shape: Option<String>,
    pub node_style: Option<String>,
    /// Color for folders that match no rule
    pub default_color: Option<String>,
    /// Replaces the built-in rule table when present. Order is significant.
    pub rules: Option<Vec<CategoryRule>>,
    pub edges: Vec<EdgeSpec>,
    /// Extra glob patterns to leave out of the graph
    pub ignore: Vec<String>,
}

impl DirgraphConfig {
    /// Load an explicitly requested config file. Any failure is an error.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `dirgraph.toml` from the given root directory.
    ///
    /// Returns a default configuration if the file does not exist or cannot be
    /// parsed.
    pub fn load(root: &Path) -> Self {
        let config_path: PathBuf = root.join(CONFIG_FILE_NAME);
        if !config_path.is_file() {
            return Self::default();
        }

        match Self::from_file(&config_path) {
            Ok(config) => {
                debug!(path = %config_path.display(), "loaded config");
                config
            }
            Err(err) => {
                warn!("{err}. Using defaults.");
                Self::default()
            }
        }
    }

    /// Build the rule table, falling back to the built-in one.
    pub fn rule_set(&self) -> RuleSet {
        let default_color = self
            .default_color
            .clone()
            .unwrap_or_else(|| DEFAULT_COLOR.to_string());
        match &self.rules {
            Some(rules) => RuleSet::new(rules.clone(), default_color),
            None => {
                let builtin = RuleSet::default();
                RuleSet::new(builtin.rules().to_vec(), default_color)
            }
        }
    }

    /// Build the graph style, filling unset fields from the defaults.
    pub fn graph_style(&self) -> GraphStyle {
        let defaults = GraphStyle::default();
        GraphStyle {
            name: self.graph_name.clone().unwrap_or(defaults.name),
            rankdir: self.rankdir.clone().unwrap_or(defaults.rankdir),
            font: self.font.clone().unwrap_or(defaults.font),
            node_shape: self.node_shape.clone().unwrap_or(defaults.node_shape),
            node_style: self.node_style.clone().unwrap_or(defaults.node_style),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        assert_eq!(DirgraphConfig::load(dir.path()), DirgraphConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
graph_name = "Engine"
rankdir = "LR"
default_color = "ivory"
ignore = ["*.log"]

[[rules]]
keyword = "docs"
color = "khaki"
label = "Documentation"

[[rules]]
keyword = "src"
color = "palegreen"

[[edges]]
from = "src/main.rs"
to = "docs"
label = "documents"
"#;
        let config = DirgraphConfig::parse(toml, Path::new("dirgraph.toml")).unwrap();
        assert_eq!(config.graph_style().name, "Engine");
        assert_eq!(config.graph_style().rankdir, "LR");
        assert_eq!(config.graph_style().font, "Helvetica");
        assert_eq!(config.ignore, vec!["*.log"]);
        assert_eq!(config.edges.len(), 1);
        assert_eq!(config.edges[0].label.as_deref(), Some("documents"));

        let rules = config.rule_set();
        assert_eq!(rules.rules().len(), 2);
        assert_eq!(rules.classify("my_docs").label.as_deref(), Some("Documentation"));
        assert_eq!(rules.classify("src").label, None);
        assert_eq!(rules.classify("core").color, "ivory");
    }

    #[test]
    fn test_default_color_applies_to_builtin_rules() {
        let config = DirgraphConfig {
            default_color: Some("snow".to_string()),
            ..Default::default()
        };
        let rules = config.rule_set();
        assert_eq!(rules.classify("core").color, "lightblue");
        assert_eq!(rules.classify("misc").color, "snow");
    }

    #[test]
    fn test_unknown_key_is_a_parse_error() {
        let err = DirgraphConfig::parse("colour = 'red'", Path::new("x.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_broken_file_in_root_falls_back() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "rules = 5").unwrap();
        assert_eq!(DirgraphConfig::load(dir.path()), DirgraphConfig::default());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let err = DirgraphConfig::from_file(Path::new("/no/such/dirgraph.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
