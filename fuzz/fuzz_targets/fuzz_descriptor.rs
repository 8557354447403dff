#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let keys = ["depend".to_string(), "softdepend".to_string()];
        let _ = modgate::passes::dependency_items(content, &keys);
    }
});
