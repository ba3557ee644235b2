//! Platform directories for the back-office host.
//!
//! XDG on Linux, standard locations on macOS/Windows.

use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;
use log::debug;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "storefront";
const APPLICATION: &str = "backoffice";

/// Archived logs kept besides `latest.log`.
const MAX_OLD_LOGS: usize = 10;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Persistent data (the settings database).
///
/// - Linux: `$XDG_DATA_HOME/backoffice` or `~/.local/share/backoffice`
/// - macOS: `~/Library/Application Support/com.storefront.backoffice`
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Regenerable data (logs).
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

pub fn settings_db() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("settings.db"))
}

pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("latest.log"))
}

/// Create (or truncate) the file at `path`, creating its parent directories.
pub fn create_log_file(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    File::create(path)
}

/// Move `latest.log` aside under a timestamped name and prune old logs.
///
/// Call before the logger opens `latest.log`.
pub fn rotate_logs() {
    let Some(cache) = cache_dir() else { return };
    rotate_logs_in(&cache);
}

/// [`rotate_logs`] for an explicit directory.
pub fn rotate_logs_in(dir: &Path) {
    let latest = dir.join("latest.log");
    if latest.exists() {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let archived = dir.join(format!("{}.log", timestamp));
        if let Err(e) = fs::rename(&latest, &archived) {
            debug!("Could not archive {}: {}", latest.display(), e);
        }
    }
    prune_logs(dir);
}

fn prune_logs(dir: &Path) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut logs: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != "latest.log"
        })
        .collect();

    // Oldest first
    logs.sort_by_key(|e| e.metadata().and_then(|m| m.modified()).ok());

    if logs.len() > MAX_OLD_LOGS {
        for entry in logs.iter().take(logs.len() - MAX_OLD_LOGS) {
            let _ = fs::remove_file(entry.path());
        }
    }
}
