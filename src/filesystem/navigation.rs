// src/filesystem/navigation.rs
use super::FileEntry;
use std::path::{Path, PathBuf};

/// What the caller should do after an entry was selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationIntent {
    /// Re-list at this directory.
    Open(PathBuf),
    /// Nothing to navigate to; file actions belong to another layer.
    None,
}

impl NavigationIntent {
    pub fn target(&self) -> Option<&Path> {
        match self {
            NavigationIntent::Open(path) => Some(path),
            NavigationIntent::None => None,
        }
    }

    /// Forwards an `Open` intent to `sink`. Returns whether the sink was called.
    pub fn dispatch(self, sink: &mut dyn NavigationSink) -> bool {
        match self {
            NavigationIntent::Open(path) => {
                sink.on_directory_selected(&path);
                true
            }
            NavigationIntent::None => false,
        }
    }
}

/// Receiver for directory selections, implemented by whatever drives navigation.
pub trait NavigationSink {
    fn on_directory_selected(&mut self, path: &Path);
}

pub fn on_entry_selected(entry: &FileEntry) -> NavigationIntent {
    if entry.is_dir {
        NavigationIntent::Open(entry.path.clone())
    } else {
        NavigationIntent::None
    }
}
