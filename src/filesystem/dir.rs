// src/filesystem/dir.rs
use super::file::is_hidden_name;
use super::navigation::{on_entry_selected, NavigationIntent, NavigationSink};
use super::{FileEntry, ListOptions, SortBy};
use crate::error::ListError;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Lists the immediate children of `path`, ordered by `options.sort_by`.
///
/// Either every child is returned or the call fails; an unreadable child
/// fails the whole listing rather than being skipped.
pub fn list(path: &Path, options: &ListOptions) -> Result<Vec<FileEntry>, ListError> {
    let root = resolve(path)?;
    let metadata = fs::metadata(&root).map_err(|e| ListError::from_io(&root, e))?;
    if !metadata.is_dir() {
        return Err(ListError::NotADirectory(root));
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(&root).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| walk_error(&root, e))?;
        if !options.include_hidden && is_hidden_name(&entry.file_name().to_string_lossy()) {
            continue;
        }
        let file_entry = FileEntry::from_path(entry.path(), options.include_hidden)
            .map_err(|e| ListError::from_io(entry.path(), e))?;
        entries.push(file_entry);
    }

    entries.sort_by(|a, b| options.sort_by.compare(a, b));
    tracing::debug!("listed {} entries in {}", entries.len(), root.display());
    Ok(entries)
}

/// Absolute form of `path` with `.` and `..` folded away lexically.
/// Symlinks are left alone.
fn resolve(path: &Path) -> Result<PathBuf, ListError> {
    let absolute = std::path::absolute(path).map_err(|e| ListError::from_io(path, e))?;
    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // popping the root is a no-op, so `/..` stays `/`
                resolved.pop();
            }
            other => resolved.push(other),
        }
    }
    Ok(resolved)
}

fn walk_error(root: &Path, err: walkdir::Error) -> ListError {
    let path = err.path().unwrap_or(root).to_path_buf();
    match err.into_io_error() {
        Some(io_err) => ListError::from_io(&path, io_err),
        None => ListError::Unknown { path, source: io::Error::other("filesystem loop") },
    }
}

/// Stateless handle over [`list`] for callers that want a value to hold.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryLister {
    pub options: ListOptions,
}

impl DirectoryLister {
    pub fn new(options: ListOptions) -> Self {
        DirectoryLister { options }
    }

    pub fn list(&self, path: &Path) -> Result<Vec<FileEntry>, ListError> {
        list(path, &self.options)
    }

    pub fn on_entry_selected(&self, entry: &FileEntry) -> NavigationIntent {
        on_entry_selected(entry)
    }
}

/// Navigation state over the lister: current directory, its entries and
/// the stack of directories opened before it.
pub struct DirNavigator {
    pub current_path: PathBuf,
    pub entries: Vec<FileEntry>,
    pub options: ListOptions,
    history: Vec<PathBuf>,
    last_error: Option<ListError>,
}

impl DirNavigator {
    pub fn new(path: &Path, options: ListOptions) -> Result<Self, ListError> {
        let current_path = resolve(path)?;
        let entries = list(&current_path, &options)?;
        Ok(DirNavigator { current_path, entries, options, history: Vec::new(), last_error: None })
    }

    /// Lists `path` and makes it current. Nothing changes if listing fails.
    pub fn open(&mut self, path: &Path) -> Result<(), ListError> {
        let target = resolve(path)?;
        let entries = list(&target, &self.options)?;
        if target != self.current_path {
            let previous = std::mem::replace(&mut self.current_path, target);
            self.history.push(previous);
        }
        self.entries = entries;
        Ok(())
    }

    /// Selects the entry at `index`. Directory intents are delivered to
    /// this navigator through [`NavigationSink`].
    pub fn select(&mut self, index: usize) -> Result<NavigationIntent, ListError> {
        let intent = match self.entries.get(index) {
            Some(entry) => on_entry_selected(entry),
            None => return Ok(NavigationIntent::None),
        };
        self.last_error = None;
        if intent.clone().dispatch(&mut *self) {
            if let Some(e) = self.take_error() {
                return Err(e);
            }
        }
        Ok(intent)
    }

    /// Returns to the previously opened directory. `Ok(false)` when there is
    /// no history. A directory that can no longer be listed is dropped from
    /// the history and its error returned.
    pub fn back(&mut self) -> Result<bool, ListError> {
        let Some(previous) = self.history.pop() else {
            return Ok(false);
        };
        self.entries = list(&previous, &self.options)?;
        self.current_path = previous;
        Ok(true)
    }

    pub fn navigate_up(&mut self) -> Result<bool, ListError> {
        match self.current_path.parent().map(Path::to_path_buf) {
            Some(parent) => {
                self.open(&parent)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Re-lists the current directory. Returns whether the entries changed.
    pub fn refresh(&mut self) -> Result<bool, ListError> {
        let entries = list(&self.current_path, &self.options)?;
        if entries == self.entries {
            return Ok(false);
        }
        self.entries = entries;
        Ok(true)
    }

    pub fn set_show_hidden(&mut self, show_hidden: bool) -> Result<bool, ListError> {
        if self.options.include_hidden == show_hidden {
            return Ok(false);
        }
        let options = ListOptions { include_hidden: show_hidden, ..self.options };
        self.entries = list(&self.current_path, &options)?;
        self.options = options;
        Ok(true)
    }

    pub fn set_sort_by(&mut self, sort_by: SortBy) {
        self.options.sort_by = sort_by;
        self.sort();
    }

    pub fn sort(&mut self) {
        let sort_by = self.options.sort_by;
        self.entries.sort_by(|a, b| sort_by.compare(a, b));
    }

    pub fn history(&self) -> &[PathBuf] {
        &self.history
    }

    /// Ancestors of the current directory, root first.
    pub fn breadcrumbs(&self) -> Vec<&Path> {
        let mut crumbs: Vec<&Path> = self.current_path.ancestors().collect();
        crumbs.reverse();
        crumbs
    }

    /// Opens the breadcrumb at `index` (0 is the filesystem root).
    /// `Ok(false)` when `index` is past the current directory.
    pub fn open_breadcrumb(&mut self, index: usize) -> Result<bool, ListError> {
        let target = match self.breadcrumbs().get(index) {
            Some(crumb) => crumb.to_path_buf(),
            None => return Ok(false),
        };
        self.open(&target)?;
        Ok(true)
    }

    /// Error from the last selection delivered through [`NavigationSink`].
    pub fn take_error(&mut self) -> Option<ListError> {
        self.last_error.take()
    }
}

impl NavigationSink for DirNavigator {
    fn on_directory_selected(&mut self, path: &Path) {
        if let Err(e) = self.open(path) {
            tracing::warn!("cannot open {}: {}", path.display(), e);
            self.last_error = Some(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    fn names(entries: &[FileEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    fn scratch() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("f.txt"), "abc").unwrap();
        temp
    }

    #[test]
    fn test_list_file_and_subdirectory() {
        let temp = scratch();
        let entries = list(temp.path(), &ListOptions::default()).unwrap();

        assert_eq!(names(&entries), vec!["f.txt", "sub"]);
        assert_eq!(entries[0].path, temp.path().join("f.txt"));
        assert!(!entries[0].is_dir);
        assert_eq!(entries[1].path, temp.path().join("sub"));
        assert!(entries[1].is_dir);
    }

    #[test]
    fn test_list_excludes_grandchildren() {
        let temp = scratch();
        fs::write(temp.path().join("sub").join("deep.txt"), "").unwrap();
        fs::create_dir(temp.path().join("sub").join("deeper")).unwrap();

        let entries = list(temp.path(), &ListOptions::default()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].children, 2);
    }

    #[test]
    fn test_list_empty_directory() {
        let temp = TempDir::new().unwrap();
        assert!(list(temp.path(), &ListOptions::default()).unwrap().is_empty());
    }

    #[test]
    fn test_list_is_idempotent() {
        let temp = scratch();
        fs::write(temp.path().join("b"), "").unwrap();
        let options = ListOptions::default();

        let first = list(temp.path(), &options).unwrap();
        let second = list(temp.path(), &options).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_case_sensitive_name_order() {
        let temp = TempDir::new().unwrap();
        for name in ["banana", "apple", "Apple"] {
            fs::write(temp.path().join(name), "").unwrap();
        }

        let entries = list(temp.path(), &ListOptions::default()).unwrap();
        assert_eq!(names(&entries), vec!["Apple", "apple", "banana"]);
    }

    #[test]
    fn test_directories_not_segregated_by_default() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "").unwrap();
        fs::create_dir(temp.path().join("b")).unwrap();
        fs::write(temp.path().join("c.txt"), "").unwrap();

        let entries = list(temp.path(), &ListOptions::default()).unwrap();
        assert_eq!(names(&entries), vec!["a.txt", "b", "c.txt"]);
    }

    #[test]
    fn test_sort_by_type_puts_directories_first() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "").unwrap();
        fs::create_dir(temp.path().join("Zed")).unwrap();
        fs::create_dir(temp.path().join("beta")).unwrap();

        let options = ListOptions { sort_by: SortBy::Type, ..ListOptions::default() };
        let entries = list(temp.path(), &options).unwrap();
        assert_eq!(names(&entries), vec!["beta", "Zed", "a.txt"]);
    }

    #[test]
    fn test_sort_by_size_largest_first() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("small"), "1").unwrap();
        fs::write(temp.path().join("large"), "12345").unwrap();
        fs::write(temp.path().join("medium"), "123").unwrap();

        let options = ListOptions { sort_by: SortBy::Size, ..ListOptions::default() };
        let entries = list(temp.path(), &options).unwrap();
        assert_eq!(names(&entries), vec!["large", "medium", "small"]);
    }

    #[test]
    fn test_hidden_entries_filtered_when_disabled() {
        let temp = scratch();
        fs::write(temp.path().join(".hidden"), "").unwrap();

        let all = list(temp.path(), &ListOptions::default()).unwrap();
        assert_eq!(names(&all), vec![".hidden", "f.txt", "sub"]);

        let options = ListOptions { include_hidden: false, ..ListOptions::default() };
        let visible = list(temp.path(), &options).unwrap();
        assert_eq!(names(&visible), vec!["f.txt", "sub"]);
    }

    #[test]
    fn test_missing_path_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = list(&temp.path().join("nonexistent"), &ListOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_regular_file_is_not_a_directory() {
        let temp = scratch();
        let err = list(&temp.path().join("f.txt"), &ListOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotADirectory);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_is_permission_denied() {
        use std::os::unix::fs::PermissionsExt;

        let temp = scratch();
        let locked = temp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // root ignores permission bits
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let err = list(&locked, &ListOptions::default()).unwrap_err();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_child_fails_whole_listing() {
        use std::os::unix::fs::PermissionsExt;

        let temp = scratch();
        let opaque = temp.path().join("opaque");
        fs::create_dir(&opaque).unwrap();
        fs::write(opaque.join("a"), "").unwrap();
        fs::write(opaque.join("b"), "").unwrap();
        // readable but not searchable: names can be read, children cannot be stat'ed
        fs::set_permissions(&opaque, fs::Permissions::from_mode(0o444)).unwrap();

        if fs::metadata(opaque.join("a")).is_ok() {
            fs::set_permissions(&opaque, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = list(&opaque, &ListOptions::default());
        fs::set_permissions(&opaque, fs::Permissions::from_mode(0o755)).unwrap();
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_classified_as_directory() {
        let temp = scratch();
        std::os::unix::fs::symlink(temp.path().join("sub"), temp.path().join("link")).unwrap();

        let entries = list(temp.path(), &ListOptions::default()).unwrap();
        let link = entries.iter().find(|e| e.name == "link").unwrap();
        assert!(link.is_dir);
        assert_eq!(link.path, temp.path().join("link"));
    }

    #[test]
    fn test_lister_handle_matches_free_function() {
        let temp = scratch();
        let lister = DirectoryLister::default();

        let entries = lister.list(temp.path()).unwrap();
        assert_eq!(entries, list(temp.path(), &ListOptions::default()).unwrap());
        assert_eq!(
            lister.on_entry_selected(&entries[1]),
            NavigationIntent::Open(temp.path().join("sub"))
        );
    }

    #[test]
    fn test_navigator_select_and_back() {
        let temp = scratch();
        let mut nav = DirNavigator::new(temp.path(), ListOptions::default()).unwrap();

        // f.txt is a file: no navigation
        assert_eq!(nav.select(0).unwrap(), NavigationIntent::None);
        assert_eq!(nav.current_path, temp.path());

        let intent = nav.select(1).unwrap();
        assert_eq!(intent, NavigationIntent::Open(temp.path().join("sub")));
        assert_eq!(nav.current_path, temp.path().join("sub"));
        assert!(nav.entries.is_empty());
        assert_eq!(nav.history(), &[temp.path().to_path_buf()]);

        assert!(nav.back().unwrap());
        assert_eq!(nav.current_path, temp.path());
        assert_eq!(nav.entries.len(), 2);
        assert!(!nav.back().unwrap());
    }

    #[test]
    fn test_navigator_select_out_of_range_is_noop() {
        let temp = scratch();
        let mut nav = DirNavigator::new(temp.path(), ListOptions::default()).unwrap();
        assert_eq!(nav.select(99).unwrap(), NavigationIntent::None);
    }

    #[test]
    fn test_navigator_failed_open_keeps_state() {
        let temp = scratch();
        let mut nav = DirNavigator::new(temp.path(), ListOptions::default()).unwrap();

        let err = nav.open(&temp.path().join("f.txt")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotADirectory);
        assert_eq!(nav.current_path, temp.path());
        assert_eq!(nav.entries.len(), 2);
        assert!(nav.history().is_empty());
    }

    #[test]
    fn test_navigator_as_sink_records_errors() {
        let temp = scratch();
        let mut nav = DirNavigator::new(temp.path(), ListOptions::default()).unwrap();

        nav.on_directory_selected(&temp.path().join("missing"));
        assert_eq!(nav.take_error().map(|e| e.kind()), Some(ErrorKind::NotFound));
        assert!(nav.take_error().is_none());

        nav.on_directory_selected(&temp.path().join("sub"));
        assert!(nav.take_error().is_none());
        assert_eq!(nav.current_path, temp.path().join("sub"));
    }

    #[test]
    fn test_navigator_up_and_breadcrumbs() {
        let temp = scratch();
        let sub = temp.path().join("sub");
        let mut nav = DirNavigator::new(&sub, ListOptions::default()).unwrap();

        let crumbs = nav.breadcrumbs();
        assert_eq!(crumbs.first().copied(), temp.path().ancestors().last());
        assert_eq!(crumbs.last().copied(), Some(sub.as_path()));

        assert!(nav.navigate_up().unwrap());
        assert_eq!(nav.current_path, temp.path());
        assert_eq!(nav.history(), &[sub]);
    }

    #[test]
    fn test_navigator_up_from_dotdot_path() {
        let temp = scratch();
        let sub = temp.path().join("sub");
        let mut nav = DirNavigator::new(&sub.join(".."), ListOptions::default()).unwrap();
        assert_eq!(nav.current_path, temp.path());
        assert_eq!(nav.breadcrumbs().last().copied(), Some(temp.path()));

        assert!(nav.navigate_up().unwrap());
        assert_eq!(Some(nav.current_path.as_path()), temp.path().parent());
    }

    #[test]
    fn test_dot_components_are_folded() {
        let temp = scratch();
        let entries = list(&temp.path().join("sub/./../sub/.."), &ListOptions::default()).unwrap();
        assert_eq!(entries[0].path, temp.path().join("f.txt"));
    }

    #[test]
    fn test_navigator_open_breadcrumb() {
        let temp = scratch();
        let sub = temp.path().join("sub");
        let mut nav = DirNavigator::new(&sub, ListOptions::default()).unwrap();
        let parent_index = nav.breadcrumbs().len() - 2;

        assert!(nav.open_breadcrumb(parent_index).unwrap());
        assert_eq!(nav.current_path, temp.path());
        assert_eq!(nav.history(), &[sub]);

        assert!(!nav.open_breadcrumb(99).unwrap());
        assert_eq!(nav.current_path, temp.path());

        assert!(nav.open_breadcrumb(0).unwrap());
        assert_eq!(Some(nav.current_path.as_path()), temp.path().ancestors().last());
    }

    #[test]
    fn test_navigator_select_missing_directory_is_error() {
        let temp = scratch();
        let mut nav = DirNavigator::new(temp.path(), ListOptions::default()).unwrap();
        fs::remove_dir(temp.path().join("sub")).unwrap();

        let err = nav.select(1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(nav.current_path, temp.path());
        assert!(nav.take_error().is_none());
    }

    #[test]
    fn test_navigator_refresh_reports_changes() {
        let temp = scratch();
        let mut nav = DirNavigator::new(temp.path(), ListOptions::default()).unwrap();

        assert!(!nav.refresh().unwrap());
        fs::write(temp.path().join("new.txt"), "").unwrap();
        assert!(nav.refresh().unwrap());
        assert_eq!(nav.entries.len(), 3);
    }

    #[test]
    fn test_navigator_toggles_hidden_and_sort() {
        let temp = scratch();
        fs::write(temp.path().join(".dot"), "").unwrap();
        let options = ListOptions { include_hidden: false, sort_by: SortBy::Name };
        let mut nav = DirNavigator::new(temp.path(), options).unwrap();
        assert_eq!(names(&nav.entries), vec!["f.txt", "sub"]);

        assert!(nav.set_show_hidden(true).unwrap());
        assert!(!nav.set_show_hidden(true).unwrap());
        assert_eq!(names(&nav.entries), vec![".dot", "f.txt", "sub"]);

        nav.set_sort_by(SortBy::Type);
        assert_eq!(names(&nav.entries), vec!["sub", ".dot", "f.txt"]);
    }
}
