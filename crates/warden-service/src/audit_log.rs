//! Append-only audit log store
//!
//! One UTF-8 line per entry in append order. Reading tolerates damaged or
//! foreign lines by skipping them; an absent file reads as an empty log.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use warden_core::AuditEntry;

use crate::error::Result;

/// File-backed append-only audit log
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry, creating the file on first use
    pub fn append(&self, entry: &AuditEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", entry.format_line())?;
        Ok(())
    }

    /// All parseable entries in append order
    pub fn read_all(&self) -> Result<Vec<AuditEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(content.lines().filter_map(AuditEntry::parse_line).collect())
    }

    /// Raw file contents, for display and export
    pub fn read_raw(&self) -> Result<String> {
        if !self.path.exists() {
            return Ok(String::new());
        }
        Ok(fs::read_to_string(&self.path)?)
    }

    /// Truncate the log. Irreversible.
    pub fn clear(&self) -> Result<()> {
        fs::write(&self.path, "")?;
        Ok(())
    }

    /// Copy the current log contents verbatim to `dest`
    pub fn export_to(&self, dest: &Path) -> Result<()> {
        let content = fs::read_to_string(&self.path)?;
        fs::write(dest, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use warden_core::AuditCategory;

    #[test]
    fn test_append_and_read_preserve_order() {
        let dir = TempDir::new().unwrap();
        let log = AuditLog::new(dir.path().join("access_log.txt"));

        log.append(&AuditEntry::new(AuditCategory::Failed, "Wrong password: 5678"))
            .unwrap();
        log.append(&AuditEntry::new(AuditCategory::Success, "Correct password"))
            .unwrap();

        let entries = log.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].category, AuditCategory::Failed);
        assert_eq!(entries[1].category, AuditCategory::Success);
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let log = AuditLog::new(dir.path().join("access_log.txt"));
        assert!(log.read_all().unwrap().is_empty());
        assert_eq!(log.read_raw().unwrap(), "");
    }

    #[test]
    fn test_damaged_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        let log = AuditLog::new(dir.path().join("access_log.txt"));

        log.append(&AuditEntry::new(AuditCategory::System, "first"))
            .unwrap();
        fs::write(
            log.path(),
            format!("{}garbage line\n", log.read_raw().unwrap()),
        )
        .unwrap();
        log.append(&AuditEntry::new(AuditCategory::System, "second"))
            .unwrap();

        let entries = log.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].detail, "first");
        assert_eq!(entries[1].detail, "second");
    }

    #[test]
    fn test_clear_truncates() {
        let dir = TempDir::new().unwrap();
        let log = AuditLog::new(dir.path().join("access_log.txt"));
        log.append(&AuditEntry::new(AuditCategory::System, "entry"))
            .unwrap();
        log.clear().unwrap();
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_export_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let log = AuditLog::new(dir.path().join("access_log.txt"));
        log.append(&AuditEntry::new(AuditCategory::Emergency, "Emergency lock activated by user"))
            .unwrap();

        let dest = dir.path().join("export.txt");
        log.export_to(&dest).unwrap();
        assert_eq!(fs::read(log.path()).unwrap(), fs::read(&dest).unwrap());
    }

    #[test]
    fn test_export_without_source_fails() {
        let dir = TempDir::new().unwrap();
        let log = AuditLog::new(dir.path().join("access_log.txt"));
        assert!(log.export_to(&dir.path().join("export.txt")).is_err());
    }
}
