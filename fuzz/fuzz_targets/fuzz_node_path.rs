#![no_main]

use libfuzzer_sys::fuzz_target;
use oasdoc::NodePath;

fuzz_target!(|data: &str| {
    if let Ok(path) = NodePath::parse(data) {
        let rendered = path.to_string();
        let reparsed = NodePath::parse(&rendered).expect("rendered paths parse");
        assert_eq!(path, reparsed);
    }
});
