#![no_main]

use libfuzzer_sys::fuzz_target;
use warden_core::AuditEntry;

fuzz_target!(|data: &[u8]| {
    // Parsing arbitrary bytes as a log line must never panic
    if let Ok(line) = std::str::from_utf8(data) {
        if let Some(entry) = AuditEntry::parse_line(line) {
            // A parsed entry must survive a format/parse round-trip
            let reformatted = entry.format_line();
            let reparsed = AuditEntry::parse_line(&reformatted).expect("round-trip parse");

            assert_eq!(entry.category, reparsed.category);
            assert_eq!(entry.timestamp, reparsed.timestamp);
        }
    }
});
