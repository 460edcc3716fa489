//! Lock session state machine
//!
//! `LockSession` owns the pending input buffer, the consecutive-failure
//! counter and the lock status. It is pure state: audit emission,
//! persistence and the lockout countdown are driven by the service layer
//! around these transitions.

use crate::config::LockConfig;
use crate::error::CoreError;
use crate::CREDENTIAL_LEN;

/// Current lock status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStatus {
    /// Accepting keypad input
    Ready,
    /// Rejecting all input until the lockout countdown releases it
    Locked,
}

/// Result of a credential submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Credential matched; access granted
    Granted,
    /// Credential rejected. `locked` is set when this failure tripped the
    /// lockout threshold; `remaining` counts attempts left before it trips.
    Denied { locked: bool, remaining: u32 },
}

/// Transient per-process lock state
///
/// The failure counter is monotonic within a lockout cycle: it is only
/// reset by a successful submission, natural lockout expiry, or an explicit
/// session reset. Collaborators display `attempts_display`, which wraps at
/// the attempt limit.
#[derive(Debug, Clone, Default)]
pub struct LockSession {
    input: String,
    failure_count: u32,
    locked: bool,
}

impl LockSession {
    /// Create a fresh session in the Ready state
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> LockStatus {
        if self.locked {
            LockStatus::Locked
        } else {
            LockStatus::Ready
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Consecutive failures since the last success or lockout expiry
    pub fn failure_count(&self) -> u32 {
        self.failure_count
    }

    /// The pending input buffer
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Failure count as shown to the operator, wrapped at the attempt limit
    pub fn attempts_display(&self, max_attempts: u32) -> u32 {
        self.failure_count % max_attempts.max(1)
    }

    /// Append a digit to the buffer. Rejected while locked, for
    /// non-digits, and once the buffer holds 4 digits.
    pub fn push_digit(&mut self, digit: char) -> bool {
        if self.locked || !digit.is_ascii_digit() || self.input.len() >= CREDENTIAL_LEN {
            return false;
        }
        self.input.push(digit);
        true
    }

    /// Remove the last buffered digit, if any. Rejected while locked.
    pub fn pop_digit(&mut self) -> bool {
        if self.locked {
            return false;
        }
        self.input.pop().is_some()
    }

    /// Empty the buffer. Rejected while locked; never touches the failure
    /// counter.
    pub fn clear_input(&mut self) -> bool {
        if self.locked {
            return false;
        }
        self.input.clear();
        true
    }

    /// Validate the buffered input against the configured credential.
    ///
    /// On `InvalidLength` the buffer is left intact; every other path
    /// clears it before returning. The comparison is verbatim string
    /// equality, no normalization.
    pub fn submit(&mut self, config: &LockConfig) -> Result<SubmitOutcome, CoreError> {
        if self.locked {
            return Err(CoreError::Locked);
        }
        if self.input.len() != CREDENTIAL_LEN {
            return Err(CoreError::InvalidLength);
        }

        if self.input == config.password {
            self.failure_count = 0;
            self.input.clear();
            return Ok(SubmitOutcome::Granted);
        }

        self.failure_count += 1;
        self.input.clear();

        let max = config.max_attempts.max(1);
        if self.failure_count % max == 0 {
            self.locked = true;
            Ok(SubmitOutcome::Denied {
                locked: true,
                remaining: 0,
            })
        } else {
            Ok(SubmitOutcome::Denied {
                locked: false,
                remaining: max - (self.failure_count % max),
            })
        }
    }

    /// Force the locked state immediately, callable in any state. The
    /// failure counter is pinned to the attempt limit so the next release
    /// resets cleanly, and the buffer is cleared to uphold the locked
    /// invariant.
    pub fn emergency_lock(&mut self, max_attempts: u32) {
        self.locked = true;
        self.failure_count = max_attempts;
        self.input.clear();
    }

    /// Lockout expiry: back to Ready with a clean counter. Returns whether
    /// a transition happened (a stale release against a Ready session is a
    /// no-op).
    pub fn release_lockout(&mut self) -> bool {
        if !self.locked {
            return false;
        }
        self.locked = false;
        self.failure_count = 0;
        true
    }

    /// Reset all transient state; configuration is untouched
    pub fn reset(&mut self) {
        self.input.clear();
        self.failure_count = 0;
        self.locked = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LockConfig {
        LockConfig::default()
    }

    fn type_in(session: &mut LockSession, digits: &str) {
        for c in digits.chars() {
            session.push_digit(c);
        }
    }

    #[test]
    fn test_correct_credential_grants() {
        let mut session = LockSession::new();
        type_in(&mut session, "1234");
        assert_eq!(session.submit(&config()), Ok(SubmitOutcome::Granted));
        assert_eq!(session.failure_count(), 0);
        assert!(session.input().is_empty());
        assert_eq!(session.status(), LockStatus::Ready);
    }

    #[test]
    fn test_grant_after_failures_resets_counter() {
        let mut session = LockSession::new();
        type_in(&mut session, "0001");
        session.submit(&config()).unwrap();
        assert_eq!(session.failure_count(), 1);
        type_in(&mut session, "1234");
        assert_eq!(session.submit(&config()), Ok(SubmitOutcome::Granted));
        assert_eq!(session.failure_count(), 0);
    }

    #[test]
    fn test_wrong_credential_increments_and_clears() {
        let mut session = LockSession::new();
        type_in(&mut session, "5678");
        assert_eq!(
            session.submit(&config()),
            Ok(SubmitOutcome::Denied {
                locked: false,
                remaining: 2
            })
        );
        assert_eq!(session.failure_count(), 1);
        assert!(session.input().is_empty());
    }

    #[test]
    fn test_lockout_on_threshold() {
        let mut session = LockSession::new();
        for expected_remaining in [2u32, 1] {
            type_in(&mut session, "0001");
            assert_eq!(
                session.submit(&config()),
                Ok(SubmitOutcome::Denied {
                    locked: false,
                    remaining: expected_remaining
                })
            );
        }
        type_in(&mut session, "0001");
        assert_eq!(
            session.submit(&config()),
            Ok(SubmitOutcome::Denied {
                locked: true,
                remaining: 0
            })
        );
        assert!(session.is_locked());
        assert_eq!(session.failure_count(), 3);
    }

    #[test]
    fn test_locked_session_rejects_everything() {
        let mut session = LockSession::new();
        session.emergency_lock(3);
        assert!(!session.push_digit('1'));
        assert!(!session.pop_digit());
        assert!(!session.clear_input());
        assert_eq!(session.submit(&config()), Err(CoreError::Locked));
        assert!(session.input().is_empty());
        assert_eq!(session.failure_count(), 3);
    }

    #[test]
    fn test_invalid_length_keeps_buffer() {
        let mut session = LockSession::new();
        type_in(&mut session, "12");
        assert_eq!(session.submit(&config()), Err(CoreError::InvalidLength));
        assert_eq!(session.input(), "12");
        assert_eq!(session.failure_count(), 0);
    }

    #[test]
    fn test_buffer_caps_at_four() {
        let mut session = LockSession::new();
        type_in(&mut session, "123456");
        assert_eq!(session.input(), "1234");
        assert!(!session.push_digit('7'));
    }

    #[test]
    fn test_push_rejects_non_digits() {
        let mut session = LockSession::new();
        assert!(!session.push_digit('a'));
        assert!(!session.push_digit(' '));
        assert!(session.input().is_empty());
    }

    #[test]
    fn test_release_lockout() {
        let mut session = LockSession::new();
        session.emergency_lock(3);
        assert!(session.release_lockout());
        assert_eq!(session.status(), LockStatus::Ready);
        assert_eq!(session.failure_count(), 0);
        assert!(!session.release_lockout());
    }

    #[test]
    fn test_attempts_display_wraps() {
        let mut session = LockSession::new();
        for _ in 0..2 {
            type_in(&mut session, "0001");
            session.submit(&config()).unwrap();
        }
        assert_eq!(session.attempts_display(3), 2);
        type_in(&mut session, "0001");
        session.submit(&config()).unwrap();
        // Tripped the lockout: underlying counter is 3, display wraps to 0.
        assert_eq!(session.failure_count(), 3);
        assert_eq!(session.attempts_display(3), 0);
    }

    #[test]
    fn test_counter_monotonic_until_release() {
        let mut session = LockSession::new();
        for _ in 0..3 {
            type_in(&mut session, "0001");
            session.submit(&config()).unwrap();
        }
        assert_eq!(session.failure_count(), 3);
        session.release_lockout();
        type_in(&mut session, "0001");
        session.submit(&config()).unwrap();
        assert_eq!(session.failure_count(), 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = LockSession::new();
        type_in(&mut session, "99");
        session.emergency_lock(3);
        session.reset();
        assert_eq!(session.status(), LockStatus::Ready);
        assert_eq!(session.failure_count(), 0);
        assert!(session.input().is_empty());
    }

    #[test]
    fn test_pop_digit() {
        let mut session = LockSession::new();
        type_in(&mut session, "12");
        assert!(session.pop_digit());
        assert_eq!(session.input(), "1");
        assert!(session.pop_digit());
        assert!(!session.pop_digit());
    }
}
