use super::documents::{arb_document, arb_name, arb_path_key};
use oasdoc::{NodePath, PathSegment, path_of, read};
use proptest::prelude::*;
use std::collections::HashSet;

fn arb_segment() -> impl Strategy<Value = PathSegment> {
    prop_oneof![
        arb_name().prop_map(PathSegment::named),
        arb_name().prop_map(PathSegment::indexed),
        arb_path_key().prop_map(PathSegment::indexed),
        (0usize..20).prop_map(|i| PathSegment::indexed(i.to_string())),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    // Distinct reachable nodes never share a path
    #[test]
    fn reachable_paths_are_unique(value in arb_document()) {
        let doc = read(&value).unwrap();
        let reachable = doc.reachable();
        let rendered: HashSet<String> = reachable
            .iter()
            .map(|&id| path_of(&doc, id).to_string())
            .collect();
        prop_assert_eq!(rendered.len(), reachable.len());
        prop_assert!(path_of(&doc, doc.root()).is_root());
    }

    // Every rendered path walks back to the node it was computed for
    #[test]
    fn rendered_paths_resolve_to_their_node(value in arb_document()) {
        let doc = read(&value).unwrap();
        for id in doc.reachable() {
            let path = path_of(&doc, id);
            let parsed = NodePath::parse(&path.to_string()).unwrap();
            prop_assert_eq!(&parsed, &path);
            prop_assert_eq!(parsed.resolve(&doc), Some(id), "{}", path);
        }
    }

    // Rendering then parsing preserves the segments
    #[test]
    fn parse_inverts_render(segments in prop::collection::vec(arb_segment(), 0..6)) {
        let mut path = NodePath::root();
        for segment in segments {
            path.push(segment);
        }
        let reparsed = NodePath::parse(&path.to_string()).unwrap();
        prop_assert_eq!(reparsed, path);
    }

    // Arbitrary input either parses or errors, never panics
    #[test]
    fn parse_never_panics(input in "[/\\[\\]a-z{}0-9]{0,24}") {
        let _ = NodePath::parse(&input);
    }
}
