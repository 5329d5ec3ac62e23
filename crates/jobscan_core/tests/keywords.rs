use jobscan_core::KeywordList;

#[test]
fn add_trims_and_rejects_empty_and_duplicates() {
    let mut list = KeywordList::new();
    assert!(list.add("  remote "));
    assert!(!list.add("remote"));
    assert!(!list.add("   "));
    // Storage is case-sensitive.
    assert!(list.add("Remote"));
    assert_eq!(list.as_slice(), ["remote", "Remote"]);
}

#[test]
fn remove_filters_exact_match_only() {
    let mut list = KeywordList::from_entries(["visa", "Visa", "remote"]);
    assert!(list.remove("visa"));
    assert!(!list.remove("visa"));
    assert_eq!(list.as_slice(), ["Visa", "remote"]);
}

#[test]
fn from_entries_keeps_first_occurrence_order() {
    let list = KeywordList::from_entries(["b", "a", " b", "", "c"]);
    assert_eq!(list.to_vec(), vec!["b", "a", "c"]);
    assert_eq!(list.len(), 3);
}
