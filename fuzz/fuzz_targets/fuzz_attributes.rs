#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = std::str::from_utf8(data) {
        let _ = mimetree::attributes::boundary(value);
        let _ = mimetree::attributes::media_type(value);
        let _ = mimetree::attributes::filename(value);
    }
});
