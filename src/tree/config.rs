//! Configuration types for the tree walker

/// Configuration for tree walking behavior.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Include entries whose name starts with `.`
    pub show_hidden: bool,
    pub max_depth: Option<usize>,
    /// Glob patterns matched against entry names
    pub ignore_patterns: Vec<String>,
    /// Drop entries matched by `.gitignore` files
    pub respect_gitignore: bool,
    /// Sort entries by name. When false, the platform listing order is kept.
    pub sort_entries: bool,
    /// Drop subfolders that cannot be listed instead of aborting the run.
    /// The root folder is never skipped.
    pub skip_unreadable: bool,
    pub follow_symlinks: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            show_hidden: false,
            max_depth: None,
            ignore_patterns: Vec::new(),
            respect_gitignore: false,
            sort_entries: true,
            skip_unreadable: false,
            follow_symlinks: false,
        }
    }
}
