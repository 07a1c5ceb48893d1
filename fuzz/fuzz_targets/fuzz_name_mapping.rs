#![no_main]

use deployment_sync::infrastructure::repositories::parse_name_mapping;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let _ = parse_name_mapping(content);
    }
});
