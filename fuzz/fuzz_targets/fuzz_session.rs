#![no_main]

use libfuzzer_sys::fuzz_target;
use warden_core::{LockConfig, LockSession, CREDENTIAL_LEN};

fuzz_target!(|data: &[u8]| {
    let config = LockConfig::default();
    let mut session = LockSession::new();

    // Drive the state machine with an arbitrary operation sequence
    for &byte in data {
        match byte % 8 {
            0..=3 => {
                session.push_digit(char::from(b'0' + byte % 10));
            }
            4 => {
                session.pop_digit();
            }
            5 => {
                session.clear_input();
            }
            6 => {
                let _ = session.submit(&config);
            }
            _ => {
                if session.is_locked() {
                    session.release_lockout();
                } else {
                    session.emergency_lock(config.max_attempts);
                }
            }
        }

        // Invariants that must hold after every operation
        assert!(session.input().len() <= CREDENTIAL_LEN);
        if session.is_locked() {
            assert!(session.input().is_empty());
        }
        assert!(session.attempts_display(config.max_attempts) < config.max_attempts);
    }
});
