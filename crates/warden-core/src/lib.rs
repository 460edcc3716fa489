//! Warden Core - Configuration, session state machine and audit types
//!
//! This crate provides the foundational types for the warden simulated
//! access-control lock: the persisted configuration, the credential
//! verification and lockout state machine, audit log records and
//! credential strength rules. It performs no I/O; persistence and timing
//! live in `warden-service`.

pub mod audit;
pub mod config;
pub mod error;
pub mod session;
pub mod strength;

pub use audit::{AuditCategory, AuditEntry};
pub use config::LockConfig;
pub use error::{CoreError, Result};
pub use session::{LockSession, LockStatus, SubmitOutcome};
pub use strength::{evaluate_strength, generate_credential, is_weak, Strength, WEAK_CREDENTIALS};

/// Required credential length in digits
pub const CREDENTIAL_LEN: usize = 4;

/// Factory-default credential
pub const DEFAULT_CREDENTIAL: &str = "1234";

/// Factory-default consecutive failures before lockout
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Factory-default lockout duration in seconds
pub const DEFAULT_LOCKOUT_SECS: u64 = 30;
