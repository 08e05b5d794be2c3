//! Tree model produced by the walker

use std::path::{Path, PathBuf};

use serde::Serialize;

/// One file in the scanned tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileLeaf {
    pub name: String,
    pub id: String,
    /// Path relative to the scan root
    pub path: PathBuf,
}

/// One folder in the scanned tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryNode {
    pub name: String,
    pub id: String,
    /// Path relative to the scan root, empty for the root itself
    pub path: PathBuf,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Files first, then subfolders
    pub children: Vec<TreeEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeEntry {
    Dir(DirectoryNode),
    File(FileLeaf),
}

impl TreeEntry {
    pub fn name(&self) -> &str {
        match self {
            TreeEntry::Dir(dir) => &dir.name,
            TreeEntry::File(file) => &file.name,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            TreeEntry::Dir(dir) => &dir.id,
            TreeEntry::File(file) => &file.id,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, TreeEntry::Dir(_))
    }
}

impl DirectoryNode {
    pub fn files(&self) -> impl Iterator<Item = &FileLeaf> {
        self.children.iter().filter_map(|child| match child {
            TreeEntry::File(file) => Some(file),
            TreeEntry::Dir(_) => None,
        })
    }

    pub fn subdirs(&self) -> impl Iterator<Item = &DirectoryNode> {
        self.children.iter().filter_map(|child| match child {
            TreeEntry::Dir(dir) => Some(dir),
            TreeEntry::File(_) => None,
        })
    }

    /// Number of folders in this subtree, including this one.
    pub fn dir_count(&self) -> usize {
        1 + self.subdirs().map(DirectoryNode::dir_count).sum::<usize>()
    }

    /// Number of files in this subtree.
    pub fn file_count(&self) -> usize {
        self.files().count() + self.subdirs().map(DirectoryNode::file_count).sum::<usize>()
    }

    /// Find a descendant by its path relative to this node.
    pub fn find(&self, rel: &Path) -> Option<&TreeEntry> {
        let mut components = rel.components().peekable();
        let mut current = self;
        while let Some(component) = components.next() {
            let name = component.as_os_str().to_string_lossy();
            let child = current.children.iter().find(|c| c.name() == name)?;
            if components.peek().is_none() {
                return Some(child);
            }
            match child {
                TreeEntry::Dir(dir) => current = dir,
                TreeEntry::File(_) => return None,
            }
        }
        None
    }

    /// First file found depth-first, files of a folder before its subfolders.
    pub fn first_leaf(&self) -> Option<&FileLeaf> {
        self.files()
            .next()
            .or_else(|| self.subdirs().find_map(DirectoryNode::first_leaf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, id: &str, path: &str) -> TreeEntry {
        TreeEntry::File(FileLeaf {
            name: name.to_string(),
            id: id.to_string(),
            path: PathBuf::from(path),
        })
    }

    fn sample() -> DirectoryNode {
        DirectoryNode {
            name: "project".to_string(),
            id: "project".to_string(),
            path: PathBuf::new(),
            color: "white".to_string(),
            category: None,
            children: vec![
                leaf("README.md", "project_README_md", "README.md"),
                TreeEntry::Dir(DirectoryNode {
                    name: "empty".to_string(),
                    id: "project_empty".to_string(),
                    path: PathBuf::from("empty"),
                    color: "white".to_string(),
                    category: None,
                    children: Vec::new(),
                }),
                TreeEntry::Dir(DirectoryNode {
                    name: "core".to_string(),
                    id: "project_core".to_string(),
                    path: PathBuf::from("core"),
                    color: "lightblue".to_string(),
                    category: Some("Core Engine".to_string()),
                    children: vec![leaf("main.cpp", "project_core_main_cpp", "core/main.cpp")],
                }),
            ],
        }
    }

    #[test]
    fn test_counts() {
        let root = sample();
        assert_eq!(root.dir_count(), 3);
        assert_eq!(root.file_count(), 2);
    }

    #[test]
    fn test_find_nested() {
        let root = sample();
        let found = root.find(Path::new("core/main.cpp")).expect("should find file");
        assert_eq!(found.id(), "project_core_main_cpp");
        assert!(root.find(Path::new("core")).is_some_and(TreeEntry::is_dir));
        assert!(root.find(Path::new("README.md/x")).is_none());
        assert!(root.find(Path::new("missing")).is_none());
    }

    #[test]
    fn test_first_leaf_skips_empty_dirs() {
        let root = sample();
        let core = root.subdirs().find(|d| d.name == "core").unwrap();
        assert_eq!(core.first_leaf().unwrap().id, "project_core_main_cpp");
        let empty = root.subdirs().find(|d| d.name == "empty").unwrap();
        assert!(empty.first_leaf().is_none());
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["children"][0]["type"], "file");
        assert_eq!(json["children"][2]["type"], "dir");
        assert_eq!(json["children"][2]["category"], "Core Engine");
        assert!(json.get("category").is_none());
    }
}
