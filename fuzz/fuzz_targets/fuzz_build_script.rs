#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(script) = std::str::from_utf8(data) {
        let markers = ["shadowJar".to_string()];
        let _ = modgate::graph::parse_shading("fuzz", script, &markers);
    }
});
