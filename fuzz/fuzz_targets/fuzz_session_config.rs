//! Fuzz target for session config parsing and validation.
//!
//! Arbitrary TOML or JSON text must parse or fail cleanly, and a parsed
//! config must validate or fail with a validation error, never panic.

#![no_main]

use bp_core::config::SessionConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let parsed = [
        SessionConfig::from_toml_str(text).ok(),
        SessionConfig::from_json_str(text).ok(),
    ];
    for config in parsed.into_iter().flatten() {
        // Validation only; sampling an arbitrary draw count is not bounded.
        let _ = config.options();
    }
});
