#![no_main]

use deployment_sync::infrastructure::http::parse_catalog;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Catalog responses come straight off the network - this should never panic
    if let Ok(parsed) = parse_catalog(data) {
        for deployment in &parsed.deployments {
            assert!(!deployment.id.is_empty());
        }
    }
});
