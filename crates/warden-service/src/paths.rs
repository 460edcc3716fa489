//! Default on-disk locations for the settings, log and backup files

use std::path::PathBuf;

/// Settings file name
pub const SETTINGS_FILE: &str = "lock_settings.json";

/// Audit log file name
pub const LOG_FILE: &str = "access_log.txt";

/// Backup snapshot file name
pub const BACKUP_FILE: &str = "system_backup.json";

/// Resolve the data directory: `WARDEN_DATA_DIR` if set, otherwise the
/// platform data dir joined with `warden`.
pub fn default_data_dir() -> PathBuf {
    std::env::var_os("WARDEN_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("warden")
        })
}

/// Helper module for dirs crate functionality
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local/share"))
            })
    }
}
