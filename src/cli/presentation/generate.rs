//! Generator run summary.

use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

/// One `create <path>` line per file or directory the run produced, relative to `root`
/// where possible.
pub fn format_created_files(created: &[PathBuf], root: &Path) -> String {
    if created.is_empty() {
        return "Nothing to create.".to_string();
    }
    created
        .iter()
        .map(|path| {
            let shown = path.strip_prefix(root).unwrap_or(path);
            format!("   {} {}", "create".green(), shown.display())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
