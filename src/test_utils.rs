//! Test utilities for creating temporary directory trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory tree for testing.
///
/// Entries are created under a named root folder inside the temp dir, so the
/// root's name (and every identifier built from it) is predictable. Cleaned up
/// when dropped.
pub struct TestTree {
    dir: TempDir,
    root: PathBuf,
}

impl TestTree {
    /// Create an empty tree whose root folder is called `name`.
    pub fn new(name: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let root = dir.path().join(name);
        fs::create_dir(&root).expect("Failed to create root dir");
        Self { dir, root }
    }

    /// Path of the root folder.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Path of the temp dir holding the root folder.
    pub fn parent(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str) -> PathBuf {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, "").expect("Failed to write file");
        full_path
    }

    /// Add a file with content, creating parent directories as needed.
    pub fn add_file_with(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.add_file(path);
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add an empty directory.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.root.join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Build a wide tree: `dirs` folders with `files_per_dir` files each.
    pub fn wide(name: &str, dirs: usize, files_per_dir: usize) -> Self {
        let tree = Self::new(name);
        for d in 0..dirs {
            for f in 0..files_per_dir {
                tree.add_file(&format!("module_{}/file_{}.rs", d, f));
            }
        }
        tree
    }
}
