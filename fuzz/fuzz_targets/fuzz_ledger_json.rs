#![no_main]

use deployment_sync::infrastructure::repositories::{parse_ledger, render_ledger};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Any ledger that parses must survive a render/parse cycle unchanged
        if let Ok(ledger) = parse_ledger(content) {
            let rendered = render_ledger(&ledger);
            assert_eq!(parse_ledger(&rendered).ok(), Some(ledger));
        }
    }
});
