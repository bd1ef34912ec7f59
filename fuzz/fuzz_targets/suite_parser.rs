#![no_main]

use libfuzzer_sys::fuzz_target;
use perfverdict::config::TestSuiteOptions;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing and validation must reject bad suites without panicking
        if let Ok(options) = TestSuiteOptions::from_toml_str(input) {
            if let Ok(suite) = options.build() {
                assert!(suite.validate().is_empty());
            }
        }
    }
});
