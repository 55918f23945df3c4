#![no_main]

use libfuzzer_sys::fuzz_target;
use mimetree::Part;

fuzz_target!(|data: &[u8]| {
    let message = mimetree::parse(data.to_vec());

    // Walk the whole tree so every derived view gets exercised.
    fn walk(part: &Part) {
        let _ = part.is_type("*", "*");
        let _ = part.is_type("text", "plain");
        let _ = part.is_disposition("attachment");
        let _ = part.filename();
        let _ = part.body();
        for child in part.children() {
            walk(child);
        }
    }

    let _ = message.get_first_header("Subject");
    let _ = message.get_all_headers("Received");
    if let Some(root) = message.root() {
        walk(root);
    }

    let _ = mimetree::Classifier::default().has_attachment(&message);
});
