//! Folder categorization by keyword
//!
//! A folder's name is matched against an ordered list of keyword rules. The
//! first rule whose keyword occurs in the lower-cased name decides the cluster
//! color and category label. Order matters: `campaign` contains `ai`, so with
//! the default table it lands in the AI bucket.

use serde::{Deserialize, Serialize};

/// Color used for folders that match no rule.
pub const DEFAULT_COLOR: &str = "white";

/// Color used for every folder in plain mode.
pub const PLAIN_COLOR: &str = "lightgray";

/// A `(keyword, color, label)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub keyword: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl CategoryRule {
    pub fn new(keyword: &str, color: &str, label: &str) -> Self {
        Self {
            keyword: keyword.to_lowercase(),
            color: color.to_string(),
            label: Some(label.to_string()),
        }
    }

    fn matches(&self, lowered: &str) -> bool {
        !self.keyword.is_empty() && lowered.contains(&self.keyword.to_lowercase())
    }
}

/// The color and optional label assigned to a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub color: String,
    pub label: Option<String>,
}

/// Ordered rule table. First match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<CategoryRule>,
    default_color: String,
}

const DEFAULT_RULES: &[(&str, &str, &str)] = &[
    ("core", "lightblue", "Core Engine"),
    ("engine", "lightblue", "Core Engine"),
    ("ai", "wheat", "AI Module"),
    ("campaign", "lightyellow", "Campaign Manager"),
    ("audio", "lightyellow", "Audio Manager"),
    ("ui", "plum", "UI Layer"),
    ("data", "lightcoral", "Data Layer"),
    ("prisma", "lightcoral", "Data Layer"),
    ("build", "lightgray", "Build/Deployment"),
    ("cmake", "lightgray", "Build/Deployment"),
    ("tests", "lightsteelblue", "Testing"),
    ("test", "lightsteelblue", "Testing"),
];

impl RuleSet {
    pub fn new(rules: Vec<CategoryRule>, default_color: impl Into<String>) -> Self {
        Self {
            rules,
            default_color: default_color.into(),
        }
    }

    /// No rules: every folder gets the plain color and no label.
    pub fn plain() -> Self {
        Self::new(Vec::new(), PLAIN_COLOR)
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn default_color(&self) -> &str {
        &self.default_color
    }

    /// Classify a folder by name.
    pub fn classify(&self, folder_name: &str) -> Category {
        let lowered = folder_name.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| Category {
                color: rule.color.clone(),
                label: rule.label.clone(),
            })
            .unwrap_or_else(|| Category {
                color: self.default_color.clone(),
                label: None,
            })
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        let rules = DEFAULT_RULES
            .iter()
            .map(|(keyword, color, label)| CategoryRule::new(keyword, color, label))
            .collect();
        Self::new(rules, DEFAULT_COLOR)
    }
}
