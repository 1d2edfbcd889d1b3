pub mod app;
pub mod config;
pub mod error;
pub mod filesystem;
pub mod ui;
pub mod utils;

pub use error::{ErrorKind, ListError};
pub use filesystem::{
    list, on_entry_selected, DirNavigator, DirectoryLister, Entry, FileEntry, ListOptions,
    NavigationIntent, NavigationSink, SortBy,
};
