#![no_main]

use libfuzzer_sys::fuzz_target;
use mamba::json;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Fuzz the tree loader
        if let Ok(module) = json::from_str(s) {
            // If loading succeeds, fuzz emission
            let _ = mamba::transpile(&module);
        }
    }
});
