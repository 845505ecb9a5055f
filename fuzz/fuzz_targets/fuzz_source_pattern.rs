#![no_main]

use libfuzzer_sys::fuzz_target;
use maplecarousel::discovery::{SourcePattern, is_local_development_host};
use maplecarousel::media::MediaKind;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        let _ = MediaKind::from_source(raw);
        if let Ok(pattern) = SourcePattern::parse(raw) {
            // A parsed pattern renders back to its template
            assert_eq!(pattern.to_string(), raw);
            let _ = pattern.render(usize::MAX);
            if let Some(host) = pattern.host() {
                let _ = is_local_development_host(host);
            }
        }
    }
});
