//! File access and dialogs, behind traits.
//!
//! ## Learning: Traits as Seams
//!
//! The notepad and sidebar never touch `std::fs` or a native dialog
//! directly. They take `&dyn FileSystem` and `&mut dyn Dialogs`, so the
//! desktop shell plugs in real implementations and tests plug in fakes
//! that live entirely in memory.

use serde::Serialize;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::{CoreError, CoreResult};

/// One directory listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// Last path component
    pub name: String,
    /// Full path
    pub path: PathBuf,
    pub is_directory: bool,
}

impl FileEntry {
    /// Returns the lowercase extension, if any.
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
    }
}

/// Orders entries directories first, then by name.
pub fn sort_entries(entries: &mut [FileEntry]) {
    entries.sort_by(|a, b| match (a.is_directory, b.is_directory) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    });
}

/// Reads, writes and lists files.
pub trait FileSystem {
    /// Reads a whole file as UTF-8 text.
    fn read_file(&self, path: &Path) -> CoreResult<String>;

    /// Writes `content` to `path`, replacing what was there.
    fn write_file(&self, path: &Path, content: &str) -> CoreResult<()>;

    /// Lists one level of a directory, directories first.
    fn list_directory(&self, path: &Path) -> CoreResult<Vec<FileEntry>>;
}

/// Native pickers. `None` means the user cancelled.
pub trait Dialogs {
    fn pick_file_to_open(&mut self) -> Option<PathBuf>;

    fn pick_save_location(&mut self) -> Option<PathBuf>;

    fn pick_directory(&mut self) -> Option<PathBuf>;
}

/// [`FileSystem`] over the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn read_file(&self, path: &Path) -> CoreResult<String> {
        if !path.is_file() {
            return Err(CoreError::FileNotFound(path.display().to_string()));
        }
        Ok(std::fs::read_to_string(path)?)
    }

    /// Writes to a sibling temp file first, then renames it over the target.
    fn write_file(&self, path: &Path, content: &str) -> CoreResult<()> {
        let file_name = path
            .file_name()
            .ok_or_else(|| CoreError::InvalidPath(path.display().to_string()))?;

        let mut temp_name = std::ffi::OsString::from(".");
        temp_name.push(file_name);
        temp_name.push(".tmp");
        let temp_path = path.with_file_name(temp_name);

        std::fs::write(&temp_path, content)?;
        if let Err(err) = std::fs::rename(&temp_path, path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(err.into());
        }
        Ok(())
    }

    fn list_directory(&self, path: &Path) -> CoreResult<Vec<FileEntry>> {
        if !path.is_dir() {
            return Err(CoreError::FileNotFound(path.display().to_string()));
        }

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            entries.push(FileEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path(),
                is_directory: entry.file_type()?.is_dir(),
            });
        }

        sort_entries(&mut entries);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_and_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("note.txt");

        LocalFileSystem.write_file(&path, "first").unwrap();
        LocalFileSystem.write_file(&path, "second\n").unwrap();

        assert_eq!(LocalFileSystem.read_file(&path).unwrap(), "second\n");
        // The temp file is gone after the rename
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let result = LocalFileSystem.read_file(&dir.path().join("nope.txt"));
        assert!(matches!(result, Err(CoreError::FileNotFound(_))));
    }

    #[test]
    fn test_write_into_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("note.txt");
        assert!(matches!(
            LocalFileSystem.write_file(&path, "x"),
            Err(CoreError::Io(_))
        ));
    }

    #[test]
    fn test_list_directory_sorted() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "").unwrap();
        std::fs::write(dir.path().join("A.md"), "").unwrap();
        std::fs::create_dir(dir.path().join("zeta")).unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();

        let entries = LocalFileSystem.list_directory(dir.path()).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["src", "zeta", "A.md", "b.txt"]);
        assert!(entries[0].is_directory);
        assert!(!entries[2].is_directory);
        assert_eq!(entries[3].path, dir.path().join("b.txt"));
    }

    #[test]
    fn test_list_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("f.txt");
        std::fs::write(&path, "").unwrap();
        assert!(LocalFileSystem.list_directory(&path).is_err());
    }

    #[test]
    fn test_extension_lowercase() {
        let entry = FileEntry {
            name: "README.MD".into(),
            path: PathBuf::from("/docs/README.MD"),
            is_directory: false,
        };
        assert_eq!(entry.extension().as_deref(), Some("md"));
    }
}
