use assert_matchers::{Compare, assert_that, equal};
use std::collections::BTreeMap;

#[derive(Debug, Compare)]
struct Registry<K: Ord, V> {
    entries: BTreeMap<K, V>,
    #[compare(internal)]
    generation: u64,
}

fn main() {
    let mut entries = BTreeMap::new();
    entries.insert("a", vec![1_u8]);

    assert_that!(
        Registry { entries: entries.clone(), generation: 3 },
        equal(Registry { entries, generation: 0 }),
    );
}
