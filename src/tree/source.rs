//! Directory listing backends
//!
//! The walker never touches `std::fs` directly. It lists folders and reads
//! `.gitignore` files through a `DirSource`, so tests can feed it an
//! in-memory tree or inject failures.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use ignore::gitignore::Gitignore;
use tracing::warn;

use crate::error::ScanError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    /// Sockets, fifos, devices
    Other,
}

/// One entry returned by a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl SourceEntry {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Something that can list directories.
pub trait DirSource {
    /// List the entries of `path`, in whatever order the backend yields them.
    fn list(&self, path: &Path) -> Result<Vec<SourceEntry>, ScanError>;

    /// Kind of the entry a symlink at `path` points to.
    fn resolve_link(&self, path: &Path) -> EntryKind;

    /// Kind of whatever lives at `path`, used to validate the root.
    fn kind_of(&self, path: &Path) -> Result<EntryKind, ScanError>;

    /// Contents of the text file at `path`, or `None` if there is none.
    fn read_text(&self, path: &Path) -> Option<String>;

    /// Absolute form of `path` with links and `..` resolved.
    fn canonicalize(&self, _path: &Path) -> Option<PathBuf> {
        None
    }

    /// The user's global git excludes file (`core.excludesFile`).
    fn global_gitignore(&self) -> Option<Gitignore> {
        None
    }
}

/// Lists directories on the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSource;

impl DirSource for FsSource {
    fn list(&self, path: &Path) -> Result<Vec<SourceEntry>, ScanError> {
        let entries = fs::read_dir(path).map_err(|e| ScanError::from_io(path, e))?;

        let mut listed = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ScanError::from_io(path, e))?;
            let kind = match entry.file_type() {
                Ok(ft) if ft.is_symlink() => EntryKind::Symlink,
                Ok(ft) if ft.is_dir() => EntryKind::Dir,
                Ok(ft) if ft.is_file() => EntryKind::File,
                Ok(_) => EntryKind::Other,
                Err(e) => return Err(ScanError::from_io(entry.path(), e)),
            };
            listed.push(SourceEntry::new(
                entry.file_name().to_string_lossy().to_string(),
                kind,
            ));
        }
        Ok(listed)
    }

    fn resolve_link(&self, path: &Path) -> EntryKind {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => EntryKind::Dir,
            Ok(meta) if meta.is_file() => EntryKind::File,
            // Broken or self-referential links
            _ => EntryKind::Other,
        }
    }

    fn kind_of(&self, path: &Path) -> Result<EntryKind, ScanError> {
        if path.as_os_str().is_empty() {
            return Err(ScanError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let meta = fs::metadata(path).map_err(|e| ScanError::from_io(path, e))?;
        Ok(if meta.is_dir() {
            EntryKind::Dir
        } else if meta.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        })
    }

    fn read_text(&self, path: &Path) -> Option<String> {
        fs::read_to_string(path).ok()
    }

    fn canonicalize(&self, path: &Path) -> Option<PathBuf> {
        fs::canonicalize(path).ok()
    }

    fn global_gitignore(&self) -> Option<Gitignore> {
        let (matcher, err) = Gitignore::global();
        if let Some(e) = err {
            warn!("problem reading global gitignore: {e}");
        }
        (!matcher.is_empty()).then_some(matcher)
    }
}

const MAX_LINK_HOPS: usize = 40;

#[derive(Debug, Clone)]
enum MemNode {
    File(String),
    Dir(Vec<String>),
    Link(PathBuf),
    Denied,
}

/// An in-memory directory tree.
///
/// Children keep insertion order, which stands in for an unsorted platform
/// listing. Folders can be marked unreadable to exercise error paths.
#[derive(Debug, Clone, Default)]
pub struct MemSource {
    nodes: BTreeMap<PathBuf, MemNode>,
}

impl MemSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating parent folders as needed.
    pub fn file(self, path: &str) -> Self {
        self.file_with(path, "")
    }

    /// Add a file with contents, creating parent folders as needed.
    pub fn file_with(mut self, path: &str, contents: &str) -> Self {
        self.insert(Path::new(path), MemNode::File(contents.to_string()));
        self
    }

    /// Add an empty folder, creating parent folders as needed.
    pub fn dir(mut self, path: &str) -> Self {
        self.insert(Path::new(path), MemNode::Dir(Vec::new()));
        self
    }

    /// Add a folder that fails to list with a permission error.
    pub fn denied(mut self, path: &str) -> Self {
        self.insert(Path::new(path), MemNode::Denied);
        self
    }

    /// Add a symlink pointing at `target`.
    pub fn link(mut self, path: &str, target: &str) -> Self {
        self.insert(Path::new(path), MemNode::Link(PathBuf::from(target)));
        self
    }

    fn insert(&mut self, path: &Path, node: MemNode) {
        if matches!(node, MemNode::Dir(_)) && matches!(self.nodes.get(path), Some(MemNode::Dir(_))) {
            return;
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !self.nodes.contains_key(parent) {
                self.insert(parent, MemNode::Dir(Vec::new()));
            }
            if let Some(MemNode::Dir(children)) = self.nodes.get_mut(parent) {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                if !children.contains(&name) {
                    children.push(name);
                }
            }
        }
        self.nodes.insert(path.to_path_buf(), node);
    }

    /// Replace every symlink on `path` with its target.
    fn resolve(&self, path: &Path) -> PathBuf {
        let mut current = PathBuf::new();
        let mut hops = 0;
        for component in path.components() {
            current.push(component);
            while let Some(MemNode::Link(target)) = self.nodes.get(&current) {
                hops += 1;
                if hops > MAX_LINK_HOPS {
                    return current;
                }
                current = target.clone();
            }
        }
        current
    }

    fn entry_kind(node: &MemNode) -> EntryKind {
        match node {
            MemNode::File(_) => EntryKind::File,
            MemNode::Dir(_) | MemNode::Denied => EntryKind::Dir,
            MemNode::Link(_) => EntryKind::Symlink,
        }
    }
}

impl DirSource for MemSource {
    fn list(&self, path: &Path) -> Result<Vec<SourceEntry>, ScanError> {
        let resolved = self.resolve(path);
        match self.nodes.get(&resolved) {
            None => Err(ScanError::NotFound {
                path: path.to_path_buf(),
            }),
            Some(MemNode::Denied) => Err(ScanError::PermissionDenied {
                path: path.to_path_buf(),
            }),
            Some(MemNode::Dir(children)) => Ok(children
                .iter()
                .filter_map(|name| {
                    let node = self.nodes.get(&resolved.join(name))?;
                    Some(SourceEntry::new(name.clone(), Self::entry_kind(node)))
                })
                .collect()),
            Some(_) => Err(ScanError::NotADirectory {
                path: path.to_path_buf(),
            }),
        }
    }

    fn resolve_link(&self, path: &Path) -> EntryKind {
        match self.nodes.get(&self.resolve(path)) {
            Some(MemNode::Link(_)) | None => EntryKind::Other,
            Some(node) => Self::entry_kind(node),
        }
    }

    fn kind_of(&self, path: &Path) -> Result<EntryKind, ScanError> {
        self.nodes
            .get(&self.resolve(path))
            .map(Self::entry_kind)
            .ok_or_else(|| ScanError::NotFound {
                path: path.to_path_buf(),
            })
    }

    fn read_text(&self, path: &Path) -> Option<String> {
        match self.nodes.get(&self.resolve(path)) {
            Some(MemNode::File(contents)) => Some(contents.clone()),
            _ => None,
        }
    }
}
