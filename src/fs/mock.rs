use super::{DirEntry, FileSystem, FileType, TraversalOrder};
use anyhow::{anyhow, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct MockEntry {
    pub content: Option<String>,
    pub file_type: FileType,
    pub readable: bool,
}

/// In-memory file tree. Directory listings come back in lexical path order,
/// so both traversal orders walk it identically.
pub struct MockFileSystem {
    files: RwLock<BTreeMap<PathBuf, MockEntry>>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        let fs = Self {
            files: RwLock::new(BTreeMap::new()),
            root: root.clone(),
        };
        fs.add_dir(&root);
        fs
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        self.insert_file(path.as_ref(), Some(content.to_string()), true);
    }

    /// Registers a file whose reads always fail, as an undecodable file would.
    pub fn add_unreadable(&self, path: impl AsRef<Path>) {
        self.insert_file(path.as_ref(), None, false);
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.files.write().unwrap();

        Self::ensure_parents(&mut files, &path);
    }

    /// Registers a directory whose listing always fails.
    pub fn add_unlistable_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.files.write().unwrap();

        Self::ensure_parents(&mut files, &path);
        if let Some(entry) = files.get_mut(&path) {
            entry.readable = false;
        }
    }

    /// Returns the current content of a file, including ones written via `write_atomic`.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        let path = self.normalize_path(path.as_ref());
        self.files
            .read()
            .unwrap()
            .get(&path)
            .and_then(|e| e.content.clone())
    }

    fn insert_file(&self, path: &Path, content: Option<String>, readable: bool) {
        let path = self.normalize_path(path);
        let mut files = self.files.write().unwrap();

        if let Some(parent) = path.parent() {
            Self::ensure_parents(&mut files, parent);
        }

        files.insert(
            path,
            MockEntry {
                content,
                file_type: FileType::File,
                readable,
            },
        );
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn list(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let path = self.normalize_path(path);
        let files = self.files.read().unwrap();

        match files.get(&path) {
            Some(entry) if entry.file_type == FileType::Directory && !entry.readable => {
                return Err(anyhow!("Permission denied: {:?}", path))
            }
            Some(entry) if entry.file_type == FileType::Directory => {}
            Some(_) => return Err(anyhow!("Not a directory: {:?}", path)),
            None => return Err(anyhow!("Directory not found: {:?}", path)),
        }

        let mut entries = Vec::new();
        for (file_path, entry) in files.iter() {
            if file_path.parent() == Some(path.as_path()) {
                let name = file_path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("")
                    .to_string();

                entries.push(DirEntry {
                    path: file_path.clone(),
                    name,
                    file_type: entry.file_type,
                });
            }
        }

        Ok(entries)
    }

    fn walk_into(&self, dir: &Path, out: &mut Vec<Result<DirEntry>>) {
        let entries = match self.list(dir) {
            Ok(entries) => entries,
            Err(err) => {
                out.push(Err(err));
                return;
            }
        };

        let (dirs, files): (Vec<DirEntry>, Vec<DirEntry>) =
            entries.into_iter().partition(DirEntry::is_dir);

        out.extend(files.into_iter().map(Ok));
        for dir in dirs {
            let path = dir.path.clone();
            out.push(Ok(dir));
            self.walk_into(&path, out);
        }
    }

    fn ensure_parents(files: &mut BTreeMap<PathBuf, MockEntry>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            files.entry(current.clone()).or_insert(MockEntry {
                content: None,
                file_type: FileType::Directory,
                readable: true,
            });
        }
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let path = self.normalize_path(path);
        self.files.read().unwrap().contains_key(&path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        let path = self.normalize_path(path);
        self.files
            .read()
            .unwrap()
            .get(&path)
            .map(|e| e.file_type == FileType::Directory)
            .unwrap_or(false)
    }

    fn is_file(&self, path: &Path) -> bool {
        let path = self.normalize_path(path);
        self.files
            .read()
            .unwrap()
            .get(&path)
            .map(|e| e.file_type == FileType::File)
            .unwrap_or(false)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let path = self.normalize_path(path);
        let files = self.files.read().unwrap();
        let entry = files
            .get(&path)
            .ok_or_else(|| anyhow!("File not found: {:?}", path))?;

        if !entry.readable {
            return Err(anyhow!("stream did not contain valid UTF-8: {:?}", path));
        }

        entry
            .content
            .clone()
            .ok_or_else(|| anyhow!("Not a file: {:?}", path))
    }

    fn walk<'a>(
        &'a self,
        root: &Path,
        _order: TraversalOrder,
    ) -> Box<dyn Iterator<Item = Result<DirEntry>> + 'a> {
        let mut entries = Vec::new();
        self.walk_into(&self.normalize_path(root), &mut entries);
        Box::new(entries.into_iter())
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        let normalized = self.normalize_path(path);
        if self.files.read().unwrap().contains_key(&normalized) {
            Ok(normalized)
        } else {
            Err(anyhow!("Path not found: {:?}", path))
        }
    }

    fn write_atomic(&self, path: &Path, contents: &str) -> Result<()> {
        let path = self.normalize_path(path);
        let parent_is_dir = path
            .parent()
            .map(|p| self.is_dir(p))
            .unwrap_or(false);
        if !parent_is_dir {
            return Err(anyhow!("Parent directory does not exist: {:?}", path));
        }

        self.insert_file(&path, Some(contents.to_string()), true);
        Ok(())
    }
}
