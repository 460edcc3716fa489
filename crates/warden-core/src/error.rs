//! Error types for the warden core library

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Typed failures surfaced to the collaborator. None of these are fatal:
/// rejected operations leave state untouched except where documented.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// Submission with a buffer that is not exactly 4 digits
    #[error("Password must be exactly 4 digits")]
    InvalidLength,

    /// Input arrived while the lockout was active
    #[error("Input rejected: system is locked")]
    Locked,

    /// New credential is not 4 decimal digits
    #[error("New password must be 4 digits")]
    InvalidFormat,

    /// Current credential did not match on a change attempt
    #[error("Current password is incorrect")]
    WrongCurrent,

    /// New credential and its confirmation differ
    #[error("New passwords don't match")]
    Mismatch,
}
