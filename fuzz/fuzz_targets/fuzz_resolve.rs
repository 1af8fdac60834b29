#![no_main]

use libfuzzer_sys::fuzz_target;
use oasdoc::resolver::{resolve_in, resolve_recursive};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // The first byte picks the split between the pointer and the document.
    let split = data[0] as usize % data.len();
    let (pointer_bytes, value_bytes) = data[1..].split_at(split.min(data.len() - 1));

    let pointer = String::from_utf8_lossy(pointer_bytes);
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(value_bytes) else {
        return;
    };
    let Ok(doc) = oasdoc::read(&value) else {
        return;
    };
    let _ = resolve_in(&doc, &pointer);
    for node in doc.nodes() {
        if let Some(any) = doc.any(node.id()) {
            let _ = resolve_recursive(any);
        }
    }
});
