#![no_main]
use flatjson::{parse, to_string, AllocationStrategy};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let single = parse(AllocationStrategy::Single, data);
    let dynamic = parse(AllocationStrategy::Dynamic, data);

    // The self-sizing strategies must agree on validity and on the error.
    assert_eq!(single.is_valid(), dynamic.is_valid());
    if let (Some(a), Some(b)) = (single.error(), dynamic.error()) {
        assert_eq!(a, b);
    }

    let mut words = vec![0u32; data.len() * 3 + 16];
    let bounded = parse(AllocationStrategy::Bounded(&mut words), data);
    assert_eq!(single.is_valid(), bounded.is_valid());

    // Compact emission is a serialization fixpoint: emit, re-parse, emit
    // again, and the texts must match.
    if let Some(root) = single.root() {
        let first = to_string(&root);
        let reparsed = parse(AllocationStrategy::Dynamic, first.as_str());
        assert!(reparsed.is_valid(), "round trip broke: {first:?}");
        let second = to_string(&reparsed.root().unwrap());
        assert_eq!(first, second);
    }
});
