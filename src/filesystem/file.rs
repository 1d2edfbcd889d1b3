// src/filesystem/file.rs
use super::FileEntry;
use std::fs;
use std::io;
use std::path::Path;

pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}

impl FileEntry {
    /// Captures `path` as it is right now. Symlinks are followed for
    /// classification; a dangling link is described by the link itself.
    pub fn from_path(path: &Path, include_hidden: bool) -> io::Result<Self> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => fs::symlink_metadata(path)?,
            Err(e) => return Err(e),
        };
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        let is_dir = metadata.is_dir();
        let children = if is_dir { count_children(path, include_hidden) } else { 0 };
        let modified = metadata.modified().ok().map(chrono::DateTime::<chrono::Utc>::from);
        let is_hidden = is_hidden_name(&name);

        Ok(FileEntry {
            name,
            path: path.to_path_buf(),
            is_dir,
            size: metadata.len(),
            children,
            modified,
            is_hidden,
        })
    }
}

fn count_children(dir: &Path, include_hidden: bool) -> usize {
    match fs::read_dir(dir) {
        Ok(read_dir) => read_dir
            .filter_map(Result::ok)
            .filter(|child| include_hidden || !is_hidden_name(&child.file_name().to_string_lossy()))
            .count(),
        Err(e) => {
            tracing::debug!("cannot count children of {}: {}", dir.display(), e);
            0
        }
    }
}
