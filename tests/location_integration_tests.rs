// Location resolution tests
//
// Exact "District, State" lookups and fuzzy single-name lookups against the
// synthetic rainfall table.

mod common;

use crop_advisor::{LocationResolver, MatchMethod};

#[test]
fn test_exact_match_ignores_case() {
    let store = common::store();
    let resolver = LocationResolver::new(&store);

    let queries = [
        "Pune, Maharashtra",
        "PUNE, MAHARASHTRA",
        "pune,maharashtra",
        "  pUnE ,  mAhArAsHtRa ",
    ];
    for query in queries {
        let found = resolver.resolve_match(query).unwrap();
        assert_eq!(found.district.district, "PUNE", "query: {}", query);
        assert_eq!(found.method, MatchMethod::Exact);
    }
}

#[test]
fn test_exact_match_takes_first_duplicate_row() {
    let store = common::store();
    let resolver = LocationResolver::new(&store);

    let found = resolver.resolve("Pune, Maharashtra").unwrap();

    assert_eq!(found.annual, 722.6);
}

#[test]
fn test_exact_branch_has_no_fuzzy_fallback() {
    let store = common::store();
    let resolver = LocationResolver::new(&store);

    assert!(resolver.resolve("Punee, Maharashtra").is_none());
    assert!(resolver.resolve("Pune, Kerala").is_none());
}

#[test]
fn test_fuzzy_match_tolerates_typo() {
    let store = common::store();
    let resolver = LocationResolver::new(&store);

    let found = resolver.resolve_match("Punee").unwrap();

    assert_eq!(found.district.district, "PUNE");
    assert_eq!(found.district.state, "MAHARASHTRA");
    assert_eq!(found.method, MatchMethod::Fuzzy { score: 89.0 });
}

#[test]
fn test_fuzzy_match_rejects_unrelated_text() {
    let store = common::store();
    let resolver = LocationResolver::new(&store);

    assert!(resolver.resolve("Xyzabc123").is_none());
}

#[test]
fn test_blank_query_is_none() {
    let store = common::store();
    let resolver = LocationResolver::new(&store);

    assert!(resolver.resolve("").is_none());
    assert!(resolver.resolve("   ").is_none());
}

#[test]
fn test_fuzzy_is_case_insensitive() {
    let store = common::store();
    let resolver = LocationResolver::new(&store);

    let found = resolver.resolve_match("ludhiana").unwrap();

    assert_eq!(found.district.district, "LUDHIANA");
    assert_eq!(found.method, MatchMethod::Fuzzy { score: 100.0 });
}
