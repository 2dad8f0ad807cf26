#![no_main]

use libfuzzer_sys::fuzz_target;
use digitseq::query::QueryService;
use digitseq::sequence::EnumeratorKind;

fuzz_target!(|data: &[u8]| {
    // Arbitrary query strings must produce a typed result, never a panic
    let raw = String::from_utf8_lossy(data);
    let service = QueryService::with_kind(EnumeratorKind::Unranking);

    if let Ok(response) = service.handle(Some(&raw)) {
        assert!(response.n >= 1);
        assert!(response.sequence.len() <= 20);
    }
});
