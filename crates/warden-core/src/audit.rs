//! Audit log entry types
//!
//! One immutable, timestamped record per security-relevant event, rendered
//! one line per entry as `[YYYY-MM-DD HH:MM:SS] CATEGORY: detail`.

use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// Timestamp format used in the log file
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Event category for an audit entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditCategory {
    Success,
    Failed,
    Locked,
    Emergency,
    PasswordChange,
    System,
    Navigation,
    Security,
}

impl AuditCategory {
    /// Label used in the log file
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
            Self::Locked => "LOCKED",
            Self::Emergency => "EMERGENCY",
            Self::PasswordChange => "PASSWORD_CHANGE",
            Self::System => "SYSTEM",
            Self::Navigation => "NAVIGATION",
            Self::Security => "SECURITY",
        }
    }

    /// Inverse of `as_str`
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "SUCCESS" => Some(Self::Success),
            "FAILED" => Some(Self::Failed),
            "LOCKED" => Some(Self::Locked),
            "EMERGENCY" => Some(Self::Emergency),
            "PASSWORD_CHANGE" => Some(Self::PasswordChange),
            "SYSTEM" => Some(Self::System),
            "NAVIGATION" => Some(Self::Navigation),
            "SECURITY" => Some(Self::Security),
            _ => None,
        }
    }
}

impl fmt::Display for AuditCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audit log record. Append-only: entries are never mutated after
/// creation, and only an explicit clear-all removes them.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub timestamp: DateTime<Local>,
    pub category: AuditCategory,
    pub detail: String,
}

impl AuditEntry {
    /// Create an entry stamped with the current local time
    pub fn new(category: AuditCategory, detail: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            category,
            detail: detail.into(),
        }
    }

    /// Render the log file line for this entry (no trailing newline)
    pub fn format_line(&self) -> String {
        format!(
            "[{}] {}: {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.category,
            self.detail
        )
    }

    /// Parse a line previously produced by `format_line`. Returns `None`
    /// for damaged or foreign lines; readers skip those rather than fail.
    pub fn parse_line(line: &str) -> Option<Self> {
        let rest = line.strip_prefix('[')?;
        let (stamp, rest) = rest.split_once("] ")?;
        let (label, detail) = rest.split_once(": ")?;

        let naive = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()?;
        let timestamp = Local.from_local_datetime(&naive).earliest()?;

        Some(Self {
            timestamp,
            category: AuditCategory::from_label(label)?,
            detail: detail.to_string(),
        })
    }
}
