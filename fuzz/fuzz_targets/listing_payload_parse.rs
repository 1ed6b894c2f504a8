#![no_main]

use libfuzzer_sys::fuzz_target;
use studio_ai::{parse_listing_payload, UpstreamModel};

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    if let Ok(models) = parse_listing_payload::<UpstreamModel>(&raw) {
        assert!(models.iter().all(|model| !model.id.trim().is_empty()));
    }
});
