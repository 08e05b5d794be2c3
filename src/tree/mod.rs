//! Directory tree walking logic
//!
//! `TreeWalker` mirrors a folder into a `DirectoryNode` tree. Every folder and
//! file gets a qualified identifier built from its ancestor chain, and every
//! folder gets a color from the `RuleSet`. Listing goes through a `DirSource`,
//! which is the real filesystem unless a test swaps in `MemSource`.

mod config;
mod filter;
mod ident;
mod node;
mod source;
mod walker;

pub use config::ScanConfig;
pub use filter::{EntryFilter, GitignoreStack, is_hidden};
pub use ident::{IdRegistry, escape_label, qualified_id, sanitize_id};
pub use node::{DirectoryNode, FileLeaf, TreeEntry};
pub use source::{DirSource, EntryKind, FsSource, MemSource, SourceEntry};
pub use walker::TreeWalker;
