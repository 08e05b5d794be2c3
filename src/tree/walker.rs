//! TreeWalker - mirrors a directory tree into clusters and leaves

use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::category::RuleSet;
use crate::error::ScanError;
use crate::output::render_cluster;

use super::config::ScanConfig;
use super::filter::{EntryFilter, GitignoreStack};
use super::ident::{IdRegistry, qualified_id};
use super::node::{DirectoryNode, FileLeaf, TreeEntry};
use super::source::{DirSource, EntryKind, FsSource, SourceEntry};

/// Per-walk mutable state. Owned by a single `walk` call.
#[derive(Default)]
struct WalkState {
    ids: IdRegistry,
    gitignores: GitignoreStack,
}

/// Entries of one folder, split before anything is emitted.
struct Partition {
    files: Vec<String>,
    dirs: Vec<String>,
}

/// Walks a folder and builds the tree model.
pub struct TreeWalker<S = FsSource> {
    config: ScanConfig,
    rules: RuleSet,
    filter: EntryFilter,
    source: S,
}

impl TreeWalker<FsSource> {
    pub fn new(config: ScanConfig, rules: RuleSet) -> Self {
        Self::with_source(config, rules, FsSource)
    }
}

impl<S: DirSource> TreeWalker<S> {
    /// Walk through a custom listing backend instead of the real filesystem.
    pub fn with_source(config: ScanConfig, rules: RuleSet, source: S) -> Self {
        let filter = EntryFilter::new(&config);
        Self {
            config,
            rules,
            filter,
            source,
        }
    }

    /// Walk `root` and return its tree.
    pub fn walk(&self, root: &Path) -> Result<DirectoryNode, ScanError> {
        self.walk_with_parent(root, None)
    }

    /// Walk `path` as if it were nested under the folder identified by
    /// `parent_id`. With no parent, `path` is the root of the document.
    pub fn walk_with_parent(
        &self,
        path: &Path,
        parent_id: Option<&str>,
    ) -> Result<DirectoryNode, ScanError> {
        self.check_root(path)?;
        let name = self.root_name(path);
        let mut state = WalkState::default();
        if self.config.respect_gitignore {
            state.gitignores.seed(&self.source, path);
        }
        self.walk_dir(path, PathBuf::new(), name, parent_id, 0, &mut state)
    }

    /// Walk `path` and return the cluster lines for it.
    ///
    /// Nested clusters are indented four spaces per level. The first error
    /// aborts the scan unless `skip_unreadable` is set.
    pub fn scan_folder(
        &self,
        path: &Path,
        parent_id: Option<&str>,
    ) -> Result<Vec<String>, ScanError> {
        let node = self.walk_with_parent(path, parent_id)?;
        Ok(render_cluster(&node))
    }

    fn check_root(&self, path: &Path) -> Result<(), ScanError> {
        let kind = match self.source.kind_of(path)? {
            EntryKind::Symlink => self.source.resolve_link(path),
            kind => kind,
        };
        match kind {
            EntryKind::Dir => Ok(()),
            _ => Err(ScanError::NotADirectory {
                path: path.to_path_buf(),
            }),
        }
    }

    fn walk_dir(
        &self,
        path: &Path,
        rel: PathBuf,
        name: String,
        parent_id: Option<&str>,
        depth: usize,
        state: &mut WalkState,
    ) -> Result<DirectoryNode, ScanError> {
        let category = self.rules.classify(&name);
        let id = state.ids.claim(qualified_id(parent_id, &name));
        debug!(path = %path.display(), id = %id, color = %category.color, "scanning folder");

        let mut node = DirectoryNode {
            name,
            id,
            path: rel,
            color: category.color,
            category: category.label,
            children: Vec::new(),
        };

        // At max depth the folder is still shown, just not descended into
        if self.config.max_depth.is_some_and(|max| depth >= max) {
            return Ok(node);
        }

        let entries = self.source.list(path)?;
        let pushed = self.config.respect_gitignore && state.gitignores.enter(&self.source, path);
        let children = self.walk_children(path, &node, entries, depth, state);
        if pushed {
            state.gitignores.leave();
        }
        node.children = children?;
        Ok(node)
    }

    fn walk_children(
        &self,
        path: &Path,
        node: &DirectoryNode,
        entries: Vec<SourceEntry>,
        depth: usize,
        state: &mut WalkState,
    ) -> Result<Vec<TreeEntry>, ScanError> {
        let Partition { files, dirs } = self.partition(path, entries, state);
        let mut children = Vec::with_capacity(files.len() + dirs.len());

        for file in files {
            let id = state.ids.claim(qualified_id(Some(node.id.as_str()), &file));
            children.push(TreeEntry::File(FileLeaf {
                path: node.path.join(&file),
                name: file,
                id,
            }));
        }

        for dir in dirs {
            let child_path = path.join(&dir);
            let child_rel = node.path.join(&dir);
            match self.walk_dir(
                &child_path,
                child_rel,
                dir,
                Some(node.id.as_str()),
                depth + 1,
                state,
            ) {
                Ok(child) => children.push(TreeEntry::Dir(child)),
                Err(e) if self.config.skip_unreadable && e.is_unreadable() => {
                    warn!("skipping folder: {e}");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(children)
    }

    /// Classify every entry as file, folder or skipped.
    fn partition(
        &self,
        path: &Path,
        mut entries: Vec<SourceEntry>,
        state: &WalkState,
    ) -> Partition {
        if self.config.sort_entries {
            entries.sort_by(|a, b| a.name.cmp(&b.name));
        }

        let mut partition = Partition {
            files: Vec::new(),
            dirs: Vec::new(),
        };

        for entry in entries {
            if self.filter.is_excluded(&entry.name) {
                trace!(name = %entry.name, "excluded by name");
                continue;
            }

            let entry_path = path.join(&entry.name);
            let kind = match entry.kind {
                // Skip symlinks to prevent infinite loops
                EntryKind::Symlink if !self.config.follow_symlinks => {
                    trace!(path = %entry_path.display(), "skipping symlink");
                    continue;
                }
                EntryKind::Symlink => self.source.resolve_link(&entry_path),
                kind => kind,
            };

            let is_dir = match kind {
                EntryKind::Dir => true,
                EntryKind::File => false,
                EntryKind::Symlink | EntryKind::Other => continue,
            };

            if self.config.respect_gitignore && state.gitignores.is_ignored(&entry_path, is_dir) {
                trace!(path = %entry_path.display(), "ignored by .gitignore");
                continue;
            }

            if is_dir {
                partition.dirs.push(entry.name);
            } else {
                partition.files.push(entry.name);
            }
        }

        partition
    }

    /// Display name of the root folder, resolving `.` and `..` to a real name.
    fn root_name(&self, path: &Path) -> String {
        if let Some(name) = path.file_name() {
            return name.to_string_lossy().to_string();
        }
        self.source
            .canonicalize(path)
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
            .unwrap_or_else(|| ".".to_string())
    }
}
