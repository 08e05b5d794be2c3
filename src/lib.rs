//! dirgraph - turn a directory tree into a Graphviz cluster diagram

pub mod category;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use category::{Category, CategoryRule, RuleSet};
pub use config::DirgraphConfig;
pub use error::{ConfigError, Error, Result, ScanError};
pub use output::{
    DotDocument, DotRenderer, EdgeSpec, GraphStyle, GraphSummary, render_cluster,
};
pub use tree::{DirectoryNode, FileLeaf, MemSource, ScanConfig, TreeEntry, TreeWalker};
