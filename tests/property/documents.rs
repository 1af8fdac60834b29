//! Strategies for generated OpenAPI documents.

use proptest::prelude::*;
use serde_json::{Map, Value, json};

/// Names that may contain the characters paths and pointers treat specially.
pub fn arb_name() -> impl Strategy<Value = String> {
    "[a-w][a-zA-Z0-9_./\\[\\]\\\\]{0,6}"
}

pub fn arb_path_key() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z\\[\\]]{1,5}|\\{[a-z]{1,4}\\}", 1..4).prop_map(|parts| {
        parts.iter().map(|p| format!("/{p}")).collect::<String>()
    })
}

/// A schema tree up to a few levels deep, with the occasional `$ref`.
pub fn arb_schema(names: Vec<String>) -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(json!({"type": "string"})),
        Just(json!({"type": "integer"})),
        prop::sample::select(names)
            .prop_map(|name| json!({"$ref": format!("#/components/schemas/{name}")})),
        Just(json!({"$ref": "#/components/schemas/Missing"})),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(|items| json!({"type": "array", "items": items})),
            prop::collection::btree_map(arb_name(), inner.clone(), 1..4).prop_map(|props| {
                json!({"type": "object", "properties": Map::from_iter(props)})
            }),
            prop::collection::vec(inner, 1..3).prop_map(|all| json!({"allOf": all})),
        ]
    })
}

/// A 3.0 document with generated paths and component schemas.
pub fn arb_document() -> impl Strategy<Value = Value> {
    prop::collection::btree_set(arb_name(), 1..5)
        .prop_flat_map(|names| {
            let names: Vec<String> = names.into_iter().collect();
            let schemas = prop::collection::vec(arb_schema(names.clone()), names.len());
            let paths = prop::collection::btree_set(arb_path_key(), 0..4);
            (Just(names), schemas, paths)
        })
        .prop_map(|(names, schemas, paths)| {
            let schemas: Map<String, Value> = names.into_iter().zip(schemas).collect();
            let paths: Map<String, Value> = paths
                .into_iter()
                .map(|key| {
                    let op = json!({"responses": {
                        "200": {"description": "ok", "content": {"application/json": {"schema": {"type": "string"}}}},
                        "default": {"description": "error"}
                    }});
                    (key, json!({"get": op}))
                })
                .collect();
            json!({
                "openapi": "3.0.3",
                "info": {"title": "t", "version": "1"},
                "paths": paths,
                "components": {"schemas": schemas}
            })
        })
}
