//! The file-tree sidebar.
//!
//! Directories are listed one level at a time. Expanding a directory lists
//! it fresh every time and collapsing throws its children away, so the tree
//! never shows stale entries for long.

use std::path::{Path, PathBuf};

use crate::fs::{Dialogs, FileEntry, FileSystem};
use crate::{CoreError, CoreResult};

/// A node in the file tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub entry: FileEntry,

    /// Child nodes, only populated while expanded
    pub children: Vec<TreeNode>,

    pub expanded: bool,
}

impl TreeNode {
    fn new(entry: FileEntry) -> Self {
        Self {
            entry,
            children: Vec::new(),
            expanded: false,
        }
    }

    /// Returns the icon shown next to this node.
    pub fn icon(&self) -> &'static str {
        if self.entry.is_directory {
            return if self.expanded { "📂" } else { "📁" };
        }

        match self.entry.extension().as_deref() {
            Some("md") => "📝",
            Some("js" | "ts") => "📜",
            Some("json") => "⚙️",
            Some("css") => "🎨",
            Some("html") => "🌐",
            _ => "📄",
        }
    }

    fn find_mut<'a>(nodes: &'a mut [TreeNode], target: &Path) -> Option<&'a mut TreeNode> {
        for node in nodes {
            if node.entry.path == target {
                return Some(node);
            }
            if node.expanded && target.starts_with(&node.entry.path) {
                if let Some(found) = Self::find_mut(&mut node.children, target) {
                    return Some(found);
                }
            }
        }
        None
    }
}

/// One flattened row for the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarRow<'a> {
    pub depth: usize,
    pub entry: &'a FileEntry,
    pub expanded: bool,
    pub icon: &'static str,
}

/// The current folder and its partially expanded tree.
#[derive(Debug, Clone, Default)]
pub struct Sidebar {
    root: Option<PathBuf>,
    nodes: Vec<TreeNode>,
}

impl Sidebar {
    /// Creates a sidebar with no folder open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks for a directory and loads it. Returns false if cancelled.
    pub fn open_folder(
        &mut self,
        fs: &dyn FileSystem,
        dialogs: &mut dyn Dialogs,
    ) -> CoreResult<bool> {
        let Some(path) = dialogs.pick_directory() else {
            return Ok(false);
        };
        self.load(fs, &path)?;
        Ok(true)
    }

    /// Replaces the tree with a fresh listing of `path`.
    ///
    /// The previous tree is kept if listing fails.
    pub fn load(&mut self, fs: &dyn FileSystem, path: &Path) -> CoreResult<()> {
        let entries = fs.list_directory(path)?;
        tracing::debug!(path = %path.display(), count = entries.len(), "loaded folder");

        self.nodes = entries.into_iter().map(TreeNode::new).collect();
        self.root = Some(path.to_path_buf());
        Ok(())
    }

    /// Expands or collapses the directory at `path`.
    pub fn toggle(&mut self, fs: &dyn FileSystem, path: &Path) -> CoreResult<()> {
        let node = TreeNode::find_mut(&mut self.nodes, path)
            .ok_or_else(|| CoreError::FileNotFound(path.display().to_string()))?;

        if !node.entry.is_directory {
            return Ok(());
        }

        if node.expanded {
            node.expanded = false;
            node.children.clear();
        } else {
            let entries = fs.list_directory(path)?;
            node.children = entries.into_iter().map(TreeNode::new).collect();
            node.expanded = true;
        }
        Ok(())
    }

    /// Handles a click on the row for `path`.
    ///
    /// Directories toggle and return `None`; files return their path for
    /// the notepad to open.
    pub fn activate(&mut self, fs: &dyn FileSystem, path: &Path) -> CoreResult<Option<PathBuf>> {
        let node = TreeNode::find_mut(&mut self.nodes, path)
            .ok_or_else(|| CoreError::FileNotFound(path.display().to_string()))?;

        if node.entry.is_directory {
            self.toggle(fs, path)?;
            Ok(None)
        } else {
            Ok(Some(node.entry.path.clone()))
        }
    }

    /// Returns the open folder, if any.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Returns the folder name shown in the header.
    pub fn root_label(&self) -> Option<String> {
        let root = self.root.as_deref()?;
        let label = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());
        Some(label)
    }

    /// Returns the top-level nodes.
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Flattens the expanded parts of the tree in display order.
    pub fn visible_rows(&self) -> Vec<SidebarRow<'_>> {
        let mut rows = Vec::new();
        Self::collect_rows(&self.nodes, 0, &mut rows);
        rows
    }

    fn collect_rows<'a>(nodes: &'a [TreeNode], depth: usize, rows: &mut Vec<SidebarRow<'a>>) {
        for node in nodes {
            rows.push(SidebarRow {
                depth,
                entry: &node.entry,
                expanded: node.expanded,
                icon: node.icon(),
            });
            if node.expanded {
                Self::collect_rows(&node.children, depth + 1, rows);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::LocalFileSystem;
    use tempfile::{tempdir, TempDir};

    fn project() -> TempDir {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src/nested")).unwrap();
        std::fs::write(dir.path().join("src/main.js"), "").unwrap();
        std::fs::write(dir.path().join("README.md"), "").unwrap();
        dir
    }

    struct PickDir(Option<PathBuf>);

    impl Dialogs for PickDir {
        fn pick_file_to_open(&mut self) -> Option<PathBuf> {
            None
        }
        fn pick_save_location(&mut self) -> Option<PathBuf> {
            None
        }
        fn pick_directory(&mut self) -> Option<PathBuf> {
            self.0.take()
        }
    }

    fn row_names(sidebar: &Sidebar) -> Vec<(usize, String)> {
        sidebar
            .visible_rows()
            .iter()
            .map(|row| (row.depth, row.entry.name.clone()))
            .collect()
    }

    #[test]
    fn test_open_folder() {
        let dir = project();
        let mut sidebar = Sidebar::new();

        let opened = sidebar
            .open_folder(&LocalFileSystem, &mut PickDir(Some(dir.path().to_path_buf())))
            .unwrap();
        assert!(opened);
        assert_eq!(sidebar.root(), Some(dir.path()));
        assert_eq!(
            row_names(&sidebar),
            [(0, "src".to_string()), (0, "README.md".to_string())]
        );
    }

    #[test]
    fn test_cancelled_open_keeps_tree() {
        let dir = project();
        let mut sidebar = Sidebar::new();
        sidebar.load(&LocalFileSystem, dir.path()).unwrap();

        let opened = sidebar
            .open_folder(&LocalFileSystem, &mut PickDir(None))
            .unwrap();
        assert!(!opened);
        assert_eq!(sidebar.nodes().len(), 2);
    }

    #[test]
    fn test_expand_and_collapse() {
        let dir = project();
        let src = dir.path().join("src");
        let mut sidebar = Sidebar::new();
        sidebar.load(&LocalFileSystem, dir.path()).unwrap();

        sidebar.toggle(&LocalFileSystem, &src).unwrap();
        assert_eq!(
            row_names(&sidebar),
            [
                (0, "src".to_string()),
                (1, "nested".to_string()),
                (1, "main.js".to_string()),
                (0, "README.md".to_string()),
            ]
        );

        sidebar.toggle(&LocalFileSystem, &src.join("nested")).unwrap();
        assert!(sidebar.visible_rows()[1].expanded);

        sidebar.toggle(&LocalFileSystem, &src).unwrap();
        assert_eq!(sidebar.visible_rows().len(), 2);
        assert!(sidebar.nodes()[0].children.is_empty());
    }

    #[test]
    fn test_expand_lists_fresh() {
        let dir = project();
        let src = dir.path().join("src");
        let mut sidebar = Sidebar::new();
        sidebar.load(&LocalFileSystem, dir.path()).unwrap();

        sidebar.toggle(&LocalFileSystem, &src).unwrap();
        sidebar.toggle(&LocalFileSystem, &src).unwrap();
        std::fs::write(src.join("added.css"), "").unwrap();
        sidebar.toggle(&LocalFileSystem, &src).unwrap();

        assert_eq!(sidebar.nodes()[0].children.len(), 3);
    }

    #[test]
    fn test_activate() {
        let dir = project();
        let mut sidebar = Sidebar::new();
        sidebar.load(&LocalFileSystem, dir.path()).unwrap();

        let readme = dir.path().join("README.md");
        assert_eq!(
            sidebar.activate(&LocalFileSystem, &readme).unwrap(),
            Some(readme)
        );
        assert_eq!(
            sidebar
                .activate(&LocalFileSystem, &dir.path().join("src"))
                .unwrap(),
            None
        );
        assert!(sidebar.nodes()[0].expanded);
        assert!(sidebar
            .activate(&LocalFileSystem, &dir.path().join("ghost"))
            .is_err());
    }

    #[test]
    fn test_icons() {
        let dir = project();
        let mut sidebar = Sidebar::new();
        sidebar.load(&LocalFileSystem, dir.path()).unwrap();

        assert_eq!(sidebar.nodes()[0].icon(), "📁");
        assert_eq!(sidebar.nodes()[1].icon(), "📝");
        sidebar
            .toggle(&LocalFileSystem, &dir.path().join("src"))
            .unwrap();
        assert_eq!(sidebar.nodes()[0].icon(), "📂");
        assert_eq!(sidebar.nodes()[0].children[1].icon(), "📜");
    }

    #[test]
    fn test_root_label() {
        let dir = project();
        let mut sidebar = Sidebar::new();
        assert_eq!(sidebar.root_label(), None);

        sidebar.load(&LocalFileSystem, &dir.path().join("src")).unwrap();
        assert_eq!(sidebar.root_label().as_deref(), Some("src"));
    }
}
