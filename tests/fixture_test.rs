//! Runs every `tests/fixtures/*.php.inc` pair through the fixer.

mod common;

use common::{fix_source, fixtures_dir, load_fixture};
use pretty_assertions::assert_eq;

fn fixture_paths() -> Vec<std::path::PathBuf> {
    let pattern = fixtures_dir().join("*.php.inc");
    let mut paths: Vec<_> = glob::glob(&pattern.to_string_lossy())
        .expect("Invalid fixture pattern")
        .filter_map(Result::ok)
        .collect();
    paths.sort();
    paths
}

#[test]
fn test_fixtures_produce_expected_output() {
    let paths = fixture_paths();
    assert!(!paths.is_empty(), "No fixtures found");

    for path in paths {
        let fixture = load_fixture(&path);
        let outcome = fix_source(&fixture.input);
        assert_eq!(
            outcome.content, fixture.expected,
            "fixture {} produced unexpected output",
            fixture.name
        );
    }
}

#[test]
fn test_fixture_output_is_stable() {
    for path in fixture_paths() {
        let fixture = load_fixture(&path);
        let outcome = fix_source(&fixture.expected);
        assert!(
            !outcome.is_changed(),
            "fixture {} changed again on a second run: {:?}",
            fixture.name,
            outcome.removals
        );
    }
}
