//! FileSystem trait definition

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
    /// Symbolic link that does not resolve to a regular file
    Symlink,
    /// Sockets, FIFOs and device nodes
    Other,
}

/// Order in which entries of a single directory are visited during a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalOrder {
    /// Whatever order the file system lists entries in. Not stable across
    /// platforms or file systems.
    #[default]
    Listing,
    /// Entries sorted by file name, for output that diffs cleanly across runs.
    Sorted,
}

/// A directory entry yielded by [`FileSystem::walk`]
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub file_type: FileType,
}

impl DirEntry {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.name
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }

    pub fn is_file(&self) -> bool {
        self.file_type == FileType::File
    }
}

/// Abstraction over file system operations for testability
pub trait FileSystem: Send + Sync {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path is a file
    fn is_file(&self, path: &Path) -> bool;

    /// Read file contents as UTF-8 text
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Walks everything below `root`, depth-first, without following
    /// symbolic links into directories.
    ///
    /// Within a directory, files come before subdirectories and each
    /// subdirectory is walked completely before its next sibling. A directory
    /// that cannot be listed yields one `Err` item and the walk carries on.
    fn walk<'a>(
        &'a self,
        root: &Path,
        order: TraversalOrder,
    ) -> Box<dyn Iterator<Item = Result<DirEntry>> + 'a>;

    /// Canonicalize a path
    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;

    /// Replace the file at `path` with `contents`.
    ///
    /// Readers never observe a half-written destination: either the previous
    /// file or the complete new one.
    fn write_atomic(&self, path: &Path, contents: &str) -> Result<()>;
}
