//! Persisted lock configuration

use serde::{Deserialize, Serialize};

use crate::{CREDENTIAL_LEN, DEFAULT_CREDENTIAL, DEFAULT_LOCKOUT_SECS, DEFAULT_MAX_ATTEMPTS};

/// Lock configuration, persisted as `lock_settings.json`
///
/// Field names match the settings file schema. The credential is stored in
/// plaintext for fidelity with the system this models; a production
/// deployment should hash it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockConfig {
    /// The 4-digit credential compared against keypad input
    pub password: String,

    /// Consecutive failures before lockout
    pub max_attempts: u32,

    /// Lockout duration in seconds
    pub lockout_time: u64,

    /// Audible feedback flag, consumed by the collaborator
    pub audio_feedback: bool,

    /// Haptic feedback flag, consumed by the collaborator
    pub haptic_feedback: bool,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            password: DEFAULT_CREDENTIAL.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            lockout_time: DEFAULT_LOCKOUT_SECS,
            audio_feedback: true,
            haptic_feedback: true,
        }
    }
}

impl LockConfig {
    /// Check that a candidate credential is exactly 4 decimal digits
    pub fn is_valid_credential(candidate: &str) -> bool {
        candidate.len() == CREDENTIAL_LEN && candidate.chars().all(|c| c.is_ascii_digit())
    }

    /// Check all configuration invariants
    pub fn validate(&self) -> bool {
        Self::is_valid_credential(&self.password) && self.max_attempts >= 1 && self.lockout_time >= 1
    }
}
