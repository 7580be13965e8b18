use super::{DirEntry, FileSystem, FileType, TraversalOrder};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Symlinks are reported as files only when they resolve to a regular file;
/// links to directories are never descended into.
fn classify(entry: &walkdir::DirEntry) -> FileType {
    let file_type = entry.file_type();
    if file_type.is_dir() {
        FileType::Directory
    } else if file_type.is_file() {
        FileType::File
    } else if file_type.is_symlink() {
        if entry.path().is_file() {
            FileType::File
        } else {
            FileType::Symlink
        }
    } else {
        FileType::Other
    }
}

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).context(format!("Failed to read file {:?}", path))
    }

    fn walk<'a>(
        &'a self,
        root: &Path,
        order: TraversalOrder,
    ) -> Box<dyn Iterator<Item = Result<DirEntry>> + 'a> {
        let walker = WalkDir::new(root).min_depth(1).follow_links(false);

        // walkdir sorts each directory's listing with a stable sort, so
        // ordering only by kind keeps the OS order within files and dirs.
        let walker = match order {
            TraversalOrder::Listing => walker.sort_by(|a, b| {
                a.file_type().is_dir().cmp(&b.file_type().is_dir())
            }),
            TraversalOrder::Sorted => walker.sort_by(|a, b| {
                a.file_type()
                    .is_dir()
                    .cmp(&b.file_type().is_dir())
                    .then_with(|| a.file_name().cmp(b.file_name()))
            }),
        };

        Box::new(walker.into_iter().map(|entry| {
            let entry = entry.context("Failed to walk directory")?;
            let file_type = classify(&entry);
            let name = entry.file_name().to_string_lossy().to_string();

            Ok(DirEntry {
                path: entry.into_path(),
                name,
                file_type,
            })
        }))
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        path.canonicalize()
            .context(format!("Failed to canonicalize path {:?}", path))
    }

    fn write_atomic(&self, path: &Path, contents: &str) -> Result<()> {
        let file_name = path
            .file_name()
            .with_context(|| format!("Output path has no file name: {:?}", path))?;
        let tmp_path = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

        if let Err(err) = fs::write(&tmp_path, contents) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err).context(format!("Failed to write temporary file {:?}", tmp_path));
        }

        if let Err(err) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err).context(format!("Failed to move output into place at {:?}", path));
        }

        Ok(())
    }
}
