#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    if let Ok(mut doc) = oasdoc::read(&value) {
        let first = oasdoc::validate(&mut doc);
        // A second run must see the same graph.
        let second = oasdoc::validate(&mut doc);
        assert_eq!(first, second);
    }
});
