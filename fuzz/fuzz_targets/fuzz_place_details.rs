#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz place details deserialization and the prefill derived from it.
fuzz_target!(|data: &[u8]| {
    if let Ok(details) = serde_json::from_slice::<gbp_score::places::PlaceDetails>(data) {
        let _ = gbp_score::onboarding::prefill_draft(&details.name, "", Some(&details));
    }
});
