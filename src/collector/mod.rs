//! Disassembly file discovery
//!
//! Walks a decoded application tree and yields the text of every file with
//! the disassembly extension. The walk is lazy: a file is read only when the
//! iterator reaches it.

use crate::fs::{DirEntry, FileSystem};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub use crate::fs::TraversalOrder;

/// Extension of apktool's smali output.
pub const DEFAULT_EXTENSION: &str = "smali";

#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("Path does not exist: {0}")]
    RootNotFound(PathBuf),
    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Failed to walk directory tree: {0}")]
    Walk(String),
    #[error("Failed to read file {path}: {reason}")]
    Read { path: PathBuf, reason: String },
}

/// A single disassembly file's full content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisassembledUnit {
    pub path: PathBuf,
    pub content: String,
}

pub struct FileCollector<'a, F: FileSystem> {
    fs: &'a F,
    root: PathBuf,
    extension: String,
    order: TraversalOrder,
}

impl<'a, F: FileSystem> FileCollector<'a, F> {
    pub fn new(fs: &'a F, root: &Path) -> Result<Self, CollectorError> {
        if !fs.exists(root) {
            return Err(CollectorError::RootNotFound(root.to_path_buf()));
        }
        if !fs.is_dir(root) {
            return Err(CollectorError::NotADirectory(root.to_path_buf()));
        }

        let root = fs.canonicalize(root).unwrap_or_else(|_| root.to_path_buf());

        debug!(root = %root.display(), "FileCollector initialized");

        Ok(Self {
            fs,
            root,
            extension: DEFAULT_EXTENSION.to_string(),
            order: TraversalOrder::default(),
        })
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_order(mut self, order: TraversalOrder) -> Self {
        self.order = order;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Starts the walk.
    ///
    /// Within a directory, files are visited before subdirectories; each
    /// subdirectory is walked completely before its next sibling. Symbolic
    /// links to directories are not descended into. Unreadable files and
    /// unlistable directories surface as `Err` items and the walk carries on
    /// past them.
    pub fn collect(&self) -> Files<'a, F> {
        Files {
            fs: self.fs,
            suffix: format!(".{}", self.extension),
            entries: self.fs.walk(&self.root, self.order),
        }
    }
}

/// Lazy iterator over the disassembly files under a root.
pub struct Files<'a, F: FileSystem> {
    fs: &'a F,
    suffix: String,
    entries: Box<dyn Iterator<Item = anyhow::Result<DirEntry>> + 'a>,
}

impl<F: FileSystem> Files<'_, F> {
    fn is_disassembly(&self, entry: &DirEntry) -> bool {
        entry.is_file() && entry.file_name().ends_with(&self.suffix)
    }

    fn read(&self, path: PathBuf) -> Result<DisassembledUnit, CollectorError> {
        match self.fs.read_to_string(&path) {
            Ok(content) => {
                debug!(path = %path.display(), bytes = content.len(), "Read disassembly file");
                Ok(DisassembledUnit { path, content })
            }
            Err(err) => Err(CollectorError::Read {
                path,
                reason: format!("{:#}", err),
            }),
        }
    }
}

impl<F: FileSystem> Iterator for Files<'_, F> {
    type Item = Result<DisassembledUnit, CollectorError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(Err(CollectorError::Walk(format!("{:#}", err)))),
            };

            if self.is_disassembly(&entry) {
                return Some(self.read(entry.path));
            }
        }
    }
}
