use super::documents::arb_document;
use oasdoc::resolver::resolve_in;
use oasdoc::{Chain, Resolution, read, resolve_recursive};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    // Arbitrary pointers resolve to a value, never a panic
    #[test]
    fn resolve_never_panics(value in arb_document(), pointer in "#?(/[a-zA-Z0-9{}_.]{0,8}){0,6}") {
        let doc = read(&value).unwrap();
        match resolve_in(&doc, &pointer) {
            Resolution::Found(id) => prop_assert!(doc.node(id).is_some()),
            Resolution::External => prop_assert!(!pointer.starts_with('#')),
            Resolution::NotFound => prop_assert!(pointer.starts_with('#')),
        }
    }

    // Chains end on a plain node or name the pointer that stopped them
    #[test]
    fn chains_terminate(value in arb_document()) {
        let doc = read(&value).unwrap();
        for id in doc.reachable() {
            let node = doc.any(id).unwrap();
            match resolve_recursive(node) {
                Chain::Resolved(end) => {
                    prop_assert!(doc.node(end).unwrap().reference().is_none());
                    if node.reference().is_none() {
                        prop_assert_eq!(end, id);
                    }
                }
                Chain::Unresolved(pointer) => {
                    prop_assert_eq!(resolve_in(&doc, &pointer), Resolution::NotFound);
                }
                Chain::External(pointer) => prop_assert!(!pointer.starts_with('#')),
                Chain::Circular(pointer) => {
                    prop_assert!(matches!(resolve_in(&doc, &pointer), Resolution::Found(_)));
                }
            }
        }
    }

    // Every component schema pointer lands on that schema
    #[test]
    fn component_pointers_find_their_schema(value in arb_document()) {
        let doc = read(&value).unwrap();
        let names: Vec<String> = value["components"]["schemas"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        // Pointer segments are split on `/` and matched literally.
        for name in names.into_iter().filter(|name| !name.contains('/')) {
            let found = resolve_in(&doc, &format!("#/components/schemas/{name}"));
            let mut path = oasdoc::NodePath::root();
            path.push(oasdoc::PathSegment::named("components"));
            path.push(oasdoc::PathSegment::named("schemas"));
            path.push(oasdoc::PathSegment::indexed(name));
            let expected = path.resolve(&doc);
            prop_assert_eq!(found.node(), expected);
            prop_assert!(expected.is_some());
        }
    }
}
