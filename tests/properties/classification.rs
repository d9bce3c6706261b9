//! Property tests for event classification.

use proptest::prelude::*;

use autorun::watcher::{EventKind, EventMask};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Classification never panics and always yields a label.
    #[test]
    fn property_classify_never_panics(bits in any::<u32>()) {
        let kind = EventKind::classify(EventMask::from_bits_retain(bits));
        prop_assert!(!kind.label().is_empty());
    }

    /// PROPERTY: The first table entry whose bits intersect the mask wins.
    #[test]
    fn property_first_match_wins(bits in any::<u32>()) {
        let mask = EventMask::from_bits_retain(bits);
        let expected = EventKind::priority()
            .find(|(flag, _)| mask.intersects(*flag))
            .map(|(_, kind)| kind)
            .unwrap_or(EventKind::Unknown);

        prop_assert_eq!(EventKind::classify(mask), expected);
    }

    /// PROPERTY: Adding a lower-priority bit never changes the outcome.
    #[test]
    fn property_lower_priority_bits_do_not_matter(first in 0usize..18, later in 0usize..18) {
        let table: Vec<_> = EventKind::priority().collect();
        prop_assume!(first < later);
        let (high, kind) = table[first];
        let (low, _) = table[later];

        prop_assert_eq!(EventKind::classify(high | low), kind);
    }
}

#[test]
fn modify_outranks_open() {
    assert_eq!(
        EventKind::classify(EventMask::OPEN | EventMask::MODIFY),
        EventKind::Modify
    );
}

#[test]
fn directory_create_is_create() {
    assert_eq!(
        EventKind::classify(EventMask::CREATE | EventMask::ISDIR),
        EventKind::Create
    );
}
