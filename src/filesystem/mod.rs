// src/filesystem/mod.rs
pub mod dir;
pub mod file;
pub mod navigation;

pub use dir::{list, DirNavigator, DirectoryLister};
pub use navigation::{on_entry_selected, NavigationIntent, NavigationSink};

use std::cmp::Ordering;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Case-sensitive name order, directories and files interleaved.
    #[default]
    Name,
    /// Directories first, then case-insensitive name.
    Type,
    /// Largest first.
    Size,
    /// Newest first.
    Modified,
}

impl SortBy {
    pub const ALL: [SortBy; 4] = [SortBy::Name, SortBy::Type, SortBy::Size, SortBy::Modified];

    pub fn next(self) -> Self {
        match self {
            SortBy::Name => SortBy::Type,
            SortBy::Type => SortBy::Size,
            SortBy::Size => SortBy::Modified,
            SortBy::Modified => SortBy::Name,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortBy::Name => "name",
            SortBy::Type => "type",
            SortBy::Size => "size",
            SortBy::Modified => "modified",
        }
    }

    /// Total order for `sort_by`. Every variant falls back to the natural
    /// ordering so equal keys never depend on enumeration order.
    pub fn compare(self, a: &FileEntry, b: &FileEntry) -> Ordering {
        let primary = match self {
            SortBy::Name => Ordering::Equal,
            SortBy::Type => b
                .is_dir
                .cmp(&a.is_dir)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
            SortBy::Size => b.size.cmp(&a.size),
            SortBy::Modified => b.modified.cmp(&a.modified),
        };
        primary.then_with(|| a.cmp(b))
    }
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortBy::ALL
            .into_iter()
            .find(|sort| sort.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown sort order '{}' (expected name, type, size or modified)", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    pub include_hidden: bool,
    pub sort_by: SortBy,
}

impl Default for ListOptions {
    fn default() -> Self {
        ListOptions { include_hidden: true, sort_by: SortBy::Name }
    }
}

/// One immediate child of a listed directory, captured at listing time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Final component of `path`. Non-UTF-8 bytes are replaced with U+FFFD,
    /// so use `path` when the exact on-disk name matters.
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub size: u64,
    /// Visible immediate children; 0 for files and unreadable directories.
    pub children: usize,
    pub modified: Option<chrono::DateTime<chrono::Utc>>,
    pub is_hidden: bool,
}

/// Alias matching the listing vocabulary.
pub type Entry = FileEntry;

impl Ord for FileEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .as_bytes()
            .cmp(other.name.as_bytes())
            .then_with(|| self.path.cmp(&other.path))
            // remaining fields keep `Ord` consistent with `Eq`
            .then_with(|| self.is_dir.cmp(&other.is_dir))
            .then_with(|| self.size.cmp(&other.size))
            .then_with(|| self.children.cmp(&other.children))
            .then_with(|| self.modified.cmp(&other.modified))
            .then_with(|| self.is_hidden.cmp(&other.is_hidden))
    }
}

impl PartialOrd for FileEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
