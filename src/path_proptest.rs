//! Property-based tests for path manipulation and renaming.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::migration::rename::rename_with_priority;
    use crate::path::{canonicalize, extension, file_name, join};
    use proptest::prelude::*;

    fn segment() -> impl Strategy<Value = String> {
        prop_oneof![
            4 => "[a-z0-9_\\-]{1,8}",
            1 => Just(".".to_string()),
            1 => Just("..".to_string()),
            1 => Just(String::new()),
        ]
    }

    fn raw_path() -> impl Strategy<Value = String> {
        (any::<bool>(), prop::collection::vec(segment(), 0..8)).prop_map(|(absolute, segments)| {
            let body = segments.join("/");
            if absolute {
                format!("/{}", body)
            } else {
                body
            }
        })
    }

    // ============================================================================
    // canonicalize property tests
    // ============================================================================

    proptest! {
        /// Property: canonicalize is idempotent
        #[test]
        fn canonicalize_is_idempotent(path in raw_path()) {
            let once = canonicalize(&path);
            prop_assert_eq!(canonicalize(&once), once);
        }

        /// Property: canonical paths carry no `.` segment and no empty segment
        #[test]
        fn canonicalize_removes_dot_and_empty_segments(path in raw_path()) {
            let result = canonicalize(&path);
            let body = result.strip_prefix('/').unwrap_or(&result);
            if !body.is_empty() && body != "." {
                for segment in body.split('/') {
                    prop_assert!(!segment.is_empty(), "empty segment in {:?}", result);
                    prop_assert_ne!(segment, ".");
                }
            }
        }

        /// Property: absolute paths stay absolute and never climb above the root
        #[test]
        fn canonicalize_keeps_absolute_paths_rooted(path in raw_path()) {
            let result = canonicalize(&format!("/{}", path));
            prop_assert!(result.starts_with('/'));
            prop_assert!(!result.split('/').any(|s| s == ".."));
        }

        /// Property: backslashes are normalized to forward slashes
        #[test]
        fn canonicalize_normalizes_backslashes(segments in prop::collection::vec("[a-z]{1,6}", 1..5)) {
            let windows = segments.join("\\");
            prop_assert_eq!(canonicalize(&windows), segments.join("/"));
        }

        /// Property: join places exactly one separator between non-empty parts
        #[test]
        fn join_uses_single_separator(base in "/[a-z]{1,6}/?", tail in "/?[a-z]{1,6}") {
            let joined = join(&base, &tail);
            prop_assert!(!joined.contains("//"));
            prop_assert!(joined.ends_with(tail.trim_start_matches('/')));
        }
    }

    // ============================================================================
    // rename_with_priority property tests
    // ============================================================================

    proptest! {
        /// Property: the renamed file keeps everything after the first `.`
        #[test]
        fn rename_preserves_extensions(
            dir in "/[a-z]{1,6}(/[a-z]{1,6}){0,3}",
            stem in "[a-z_]{1,10}",
            ext in "(\\.[a-z]{2,4}){0,2}",
            alias in "[A-Z][A-Za-z]{1,8}",
            priority in "[0-9]{3}",
        ) {
            let target = format!("{}/{}{}", dir, stem, ext);
            let renamed = rename_with_priority(&target, &alias, &priority);

            prop_assert_eq!(renamed.original_name, format!("{}{}", stem, ext));
            prop_assert_eq!(
                &renamed.new_name,
                &format!("{}_{}_{}{}", priority, stem, alias, ext)
            );
            prop_assert_eq!(file_name(&renamed.target_path), renamed.new_name.as_str());
            prop_assert_eq!(extension(&renamed.target_path), extension(&target));
            let prefix = format!("{}/", dir);
            prop_assert!(renamed.target_path.starts_with(&prefix));
        }

        /// Property: two bundles never produce the same target for one file
        #[test]
        fn rename_distinguishes_bundles(
            stem in "[a-z]{1,10}",
            first in "[A-Z][a-z]{1,6}",
            second in "[A-Z][a-z]{1,6}",
        ) {
            prop_assume!(first != second);
            let target = format!("/new/{}.html.twig", stem);
            let a = rename_with_priority(&target, &first, "001");
            let b = rename_with_priority(&target, &second, "002");
            prop_assert_ne!(a.target_path, b.target_path);
        }
    }
}
