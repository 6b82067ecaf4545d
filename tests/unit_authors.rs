// Unit tests for the author registry.
//
// Tests the ordering invariant under arbitrary insertion sequences, merge
// semantics, and the insertion-anchor contract of `find`.

use proptest::prelude::*;

use reviewrank::authors::{Author, AuthorRegistry, Insertion, Lookup};

// ============================================================
// Ordering invariant
// ============================================================

proptest! {
    #[test]
    fn registry_sorted_and_unique(names in prop::collection::vec("[a-e]{1,3}", 0..60)) {
        let mut reg = AuthorRegistry::new();
        for (i, name) in names.iter().enumerate() {
            reg.add(Author::with_submission(name.as_str(), i));
        }

        let stored: Vec<&str> = reg.iter().map(|a| a.name()).collect();
        for pair in stored.windows(2) {
            prop_assert!(pair[0] < pair[1], "{:?} not strictly before {:?}", pair[0], pair[1]);
        }

        let mut distinct = names.clone();
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(reg.len(), distinct.len());
    }

    #[test]
    fn merge_keeps_every_submission(names in prop::collection::vec("[a-c]", 1..30)) {
        let mut reg = AuthorRegistry::new();
        for (i, name) in names.iter().enumerate() {
            reg.add(Author::with_submission(name.as_str(), i));
        }
        for (i, name) in names.iter().enumerate() {
            let idx = reg.index_of(name).unwrap();
            prop_assert!(reg.get(idx).unwrap().submissions().contains(&i));
        }
    }
}

// ============================================================
// find / add contracts
// ============================================================

#[test]
fn add_existing_name_does_not_grow() {
    let mut reg = AuthorRegistry::new();
    reg.add(Author::with_submission("bob", 1));
    let before = reg.len();
    let outcome = reg.add(Author::with_submission("bob", 4));
    assert_eq!(outcome, Insertion::Merged(0));
    assert_eq!(reg.len(), before);
    assert_eq!(reg.get(0).unwrap().submissions(), &[1, 4]);
}

#[test]
fn insertion_lands_after_anchor() {
    let mut reg = AuthorRegistry::new();
    reg.add(Author::new("alice"));
    reg.add(Author::new("carol"));
    assert_eq!(reg.find("bob"), Lookup::Missing { after: Some(0) });
    assert_eq!(reg.add(Author::new("bob")), Insertion::Inserted(1));
    assert_eq!(reg.name(1), "bob");
}

#[test]
fn insertion_at_front_and_back() {
    let mut reg = AuthorRegistry::new();
    reg.add(Author::new("mallory"));
    assert_eq!(reg.add(Author::new("alice")), Insertion::Inserted(0));
    assert_eq!(reg.add(Author::new("zed")), Insertion::Inserted(2));
}

#[test]
fn lookup_miss_is_not_an_error() {
    let reg = AuthorRegistry::new();
    assert_eq!(reg.index_of("nobody"), None);
}
