#![no_main]

use libfuzzer_sys::fuzz_target;
use studio_catalog::{is_valid_slug, SlugRegistry};

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let mut registry = SlugRegistry::new();
    for (index, line) in raw.lines().take(64).enumerate() {
        let (name, provider) = line.split_once('|').unwrap_or((line, "AINative"));
        let slug = registry.claim(name, &format!("id-{index}"), provider);
        assert!(is_valid_slug(&slug), "invalid slug {slug:?}");
        assert_eq!(registry.len(), index + 1);
    }
});
