//! Property-based tests for path-prefix ignore matching

use proptest::prelude::*;
use treedoc::ignore::is_ignored;

fn segments() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z0-9_.]{1,6}", 1..5)
}

/// Any leading run of segments ignores the whole path
#[test]
fn test_ancestor_pattern_always_ignores() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(segments(), any::<prop::sample::Index>()), |(segs, idx)| {
            let path = segs.join("/");
            let cut = idx.index(segs.len()) + 1;
            let pattern = segs[..cut].join("/");

            prop_assert!(is_ignored(&path, &[pattern]));
            Ok(())
        })
        .unwrap();
}

proptest! {
    /// Extending the last segment of a pattern never matches
    #[test]
    fn test_sibling_with_shared_prefix_is_kept(segs in segments(), suffix in "[a-z0-9]{1,4}") {
        let pattern = segs.join("/");
        let sibling = format!("{}{}", pattern, suffix);
        prop_assert!(!is_ignored(&sibling, &[pattern.as_str()]));
        let child = format!("{}/child", sibling);
        prop_assert!(!is_ignored(&child, &[pattern.as_str()]));
    }

    /// Matching agrees with the equality-or-prefix-slash rule
    #[test]
    fn test_matches_reference_rule(
        path in "[ab/]{0,8}",
        patterns in prop::collection::vec("[ab/]{0,4}", 0..4),
    ) {
        let expected = patterns
            .iter()
            .any(|p| path == *p || path.starts_with(&format!("{}/", p)));
        prop_assert_eq!(is_ignored(&path, &patterns), expected);
    }
}
