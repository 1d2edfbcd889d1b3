// src/utils/formatter.rs
use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use std::path::Path;

use crate::filesystem::FileEntry;

const UNITS: [&str; 5] = ["B", "K", "M", "G", "T"];

/// Human-readable byte count, one decimal above bytes: `512B`, `1.5K`.
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{}{}", bytes, UNITS[0])
    } else {
        format!("{:.1}{}", value, UNITS[unit])
    }
}

pub fn format_modified(modified: Option<DateTime<Utc>>) -> String {
    match modified {
        Some(time) => time.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => "-".repeat(16),
    }
}

/// Size column: child count for directories, byte size for files.
pub fn format_details(entry: &FileEntry) -> String {
    if entry.is_dir {
        match entry.children {
            1 => "1 item".to_string(),
            n => format!("{} items", n),
        }
    } else {
        format_size(entry.size)
    }
}

pub fn display_name(entry: &FileEntry) -> String {
    if entry.is_dir {
        format!("{}/", entry.name)
    } else {
        entry.name.clone()
    }
}

/// One `--list` output row: modified time, size column, name.
/// Directories are printed bold blue when colors are enabled.
pub fn listing_line(entry: &FileEntry) -> String {
    let name = display_name(entry);
    let name = if entry.is_dir { name.as_str().blue().bold() } else { name.as_str().normal() };
    format!("{}  {:>9}  {}", format_modified(entry.modified), format_details(entry), name)
}

/// Label for one breadcrumb: the last component, or the whole path for a root.
pub fn breadcrumb_label(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().to_string(),
        None => path.display().to_string(),
    }
}
