#![no_main]

use libfuzzer_sys::fuzz_target;
use maplecarousel::config::AppConfig;

fuzz_target!(|data: &[u8]| {
    // Parsing and validating arbitrary JSON must never panic
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(config) = serde_json::from_str::<AppConfig>(s) {
            for carousel in &config.carousels {
                let _ = carousel.validate();
                let _ = carousel.source.static_items();
            }
        }
    }
});
