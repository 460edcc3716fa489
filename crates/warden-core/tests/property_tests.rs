//! Property-based tests for warden-core using proptest
//!
//! These tests verify invariants that should hold for all valid inputs.

use proptest::prelude::*;
use warden_core::{
    evaluate_strength, is_weak, CoreError, LockConfig, LockSession, LockStatus, Strength,
    SubmitOutcome, CREDENTIAL_LEN,
};

// ============================================
// Strategy helpers
// ============================================

fn arb_credential() -> impl Strategy<Value = String> {
    "[0-9]{4}"
}

fn arb_config() -> impl Strategy<Value = LockConfig> {
    (arb_credential(), 1u32..6, 1u64..120).prop_map(|(password, max_attempts, lockout_time)| {
        LockConfig {
            password,
            max_attempts,
            lockout_time,
            ..LockConfig::default()
        }
    })
}

fn type_in(session: &mut LockSession, digits: &str) {
    for c in digits.chars() {
        session.push_digit(c);
    }
}

// ============================================
// Properties
// ============================================

proptest! {
    #[test]
    fn matching_credential_always_grants(config in arb_config()) {
        let mut session = LockSession::new();
        let password = config.password.clone();
        type_in(&mut session, &password);
        let outcome = session.submit(&config).unwrap();
        prop_assert_eq!(outcome, SubmitOutcome::Granted);
        prop_assert_eq!(session.failure_count(), 0);
        prop_assert!(session.input().is_empty());
    }

    #[test]
    fn mismatch_increments_by_exactly_one(config in arb_config(), guess in arb_credential()) {
        prop_assume!(guess != config.password);
        let mut session = LockSession::new();
        type_in(&mut session, &guess);
        let outcome = session.submit(&config).unwrap();
        prop_assert!(matches!(outcome, SubmitOutcome::Denied { .. }), "expected Denied outcome");
        prop_assert_eq!(session.failure_count(), 1);
    }

    #[test]
    fn lockout_trips_after_exactly_max_attempts(config in arb_config(), guess in arb_credential()) {
        prop_assume!(guess != config.password);
        let mut session = LockSession::new();
        for attempt in 1..=config.max_attempts {
            type_in(&mut session, &guess);
            let outcome = session.submit(&config).unwrap();
            if attempt < config.max_attempts {
                prop_assert_eq!(outcome, SubmitOutcome::Denied {
                    locked: false,
                    remaining: config.max_attempts - attempt,
                });
                prop_assert_eq!(session.status(), LockStatus::Ready);
            } else {
                prop_assert_eq!(outcome, SubmitOutcome::Denied { locked: true, remaining: 0 });
                prop_assert_eq!(session.status(), LockStatus::Locked);
            }
        }
    }

    #[test]
    fn locked_session_is_inert(config in arb_config(), digits in "[0-9]{0,8}") {
        let mut session = LockSession::new();
        session.emergency_lock(config.max_attempts);
        let failures_before = session.failure_count();

        type_in(&mut session, &digits);
        prop_assert!(session.input().is_empty());
        prop_assert_eq!(session.submit(&config), Err(CoreError::Locked));
        prop_assert_eq!(session.failure_count(), failures_before);
        prop_assert_eq!(session.status(), LockStatus::Locked);
    }

    #[test]
    fn release_restores_ready_with_clean_counter(config in arb_config(), guess in arb_credential()) {
        prop_assume!(guess != config.password);
        let mut session = LockSession::new();
        for _ in 0..config.max_attempts {
            type_in(&mut session, &guess);
            session.submit(&config).unwrap();
        }
        prop_assert!(session.is_locked());
        prop_assert!(session.release_lockout());
        prop_assert_eq!(session.status(), LockStatus::Ready);
        prop_assert_eq!(session.failure_count(), 0);
    }

    #[test]
    fn buffer_never_exceeds_credential_len(digits in "[0-9]{0,16}") {
        let mut session = LockSession::new();
        type_in(&mut session, &digits);
        prop_assert!(session.input().len() <= CREDENTIAL_LEN);
    }

    #[test]
    fn strength_matches_rules(candidate in "[0-9]{0,8}") {
        let expected = if candidate.is_empty() {
            Strength::Empty
        } else if candidate.len() < CREDENTIAL_LEN {
            Strength::TooShort
        } else if is_weak(&candidate) {
            Strength::Weak
        } else {
            Strength::Strong
        };
        prop_assert_eq!(evaluate_strength(&candidate), expected);
    }

    #[test]
    fn display_counter_wraps_at_limit(config in arb_config(), guess in arb_credential(), rounds in 1u32..10) {
        prop_assume!(guess != config.password);
        let mut session = LockSession::new();
        for _ in 0..rounds {
            type_in(&mut session, &guess);
            let _ = session.submit(&config);
            if session.is_locked() {
                session.release_lockout();
            }
        }
        prop_assert!(session.attempts_display(config.max_attempts) < config.max_attempts);
    }
}
