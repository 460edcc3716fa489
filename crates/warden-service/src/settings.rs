//! Settings and backup snapshot persistence
//!
//! The settings file is the durable copy of `LockConfig`. A missing,
//! unreadable or invalid file always degrades to defaults; only writes
//! surface errors.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use warden_core::LockConfig;

use crate::error::{Result, ServiceError};

/// File-backed store for the lock configuration and its backup snapshot
pub struct SettingsStore {
    settings_path: PathBuf,
    backup_path: PathBuf,
}

impl SettingsStore {
    pub fn new(settings_path: impl Into<PathBuf>, backup_path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: settings_path.into(),
            backup_path: backup_path.into(),
        }
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Load the persisted configuration, falling back to defaults when the
    /// file is missing, unreadable or fails validation.
    pub fn load(&self) -> LockConfig {
        match self.read_config(&self.settings_path) {
            Ok(config) => config,
            Err(e) => {
                if self.settings_path.exists() {
                    warn!("Settings load error: {e}; using defaults");
                }
                LockConfig::default()
            }
        }
    }

    /// Persist the configuration
    pub fn save(&self, config: &LockConfig) -> Result<()> {
        self.write_config(&self.settings_path, config)
    }

    /// Write a point-in-time snapshot of the configuration
    pub fn backup(&self, config: &LockConfig) -> Result<()> {
        self.write_config(&self.backup_path, config)
    }

    /// Read the snapshot back; `NoBackup` when none has been written
    pub fn restore(&self) -> Result<LockConfig> {
        if !self.backup_path.exists() {
            return Err(ServiceError::NoBackup);
        }
        self.read_config(&self.backup_path)
    }

    fn read_config(&self, path: &Path) -> Result<LockConfig> {
        let content = fs::read_to_string(path)?;
        let config: LockConfig = serde_json::from_str(&content)?;
        if !config.validate() {
            return Err(ServiceError::InvalidConfig(format!(
                "{} holds an invalid configuration",
                path.display()
            )));
        }
        Ok(config)
    }

    fn write_config(&self, path: &Path, config: &LockConfig) -> Result<()> {
        let content = serde_json::to_string_pretty(config)?;

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }
}
