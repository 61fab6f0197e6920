//! Property tests for relative links between report folders.

use proptest::prelude::*;

use covpages::folder::ReportFolder;

fn segments() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(vec!["a", "b", "com.x", "default"]), 0..4)
        .prop_map(|v| v.into_iter().map(str::to_string).collect())
}

/// Apply a relative path to `from`, the way a browser resolves it.
fn follow(from: &ReportFolder, path: &str) -> Vec<String> {
    let mut out = from.segments().to_vec();
    for seg in path.split('/').filter(|s| !s.is_empty()) {
        if seg == ".." {
            out.pop();
        } else {
            out.push(seg.to_string());
        }
    }
    out
}

proptest! {
    #[test]
    fn relative_path_lands_on_target(a in segments(), b in segments()) {
        let from = ReportFolder::from_segments(a);
        let to = ReportFolder::from_segments(b);
        let path = from.relative_path_to(&to);
        prop_assert_eq!(follow(&from, &path), to.segments().to_vec());
    }

    #[test]
    fn relative_path_to_self_is_empty(a in segments()) {
        let folder = ReportFolder::from_segments(a);
        prop_assert_eq!(folder.relative_path_to(&folder), "");
    }

    #[test]
    fn link_to_ends_with_file(a in segments(), b in segments()) {
        let from = ReportFolder::from_segments(a);
        let to = ReportFolder::from_segments(b);
        let link = from.link_to(&to, "index.html");
        prop_assert!(link.ends_with("index.html"));
        let dir = link.trim_end_matches("index.html");
        prop_assert_eq!(follow(&from, dir), to.segments().to_vec());
    }
}
