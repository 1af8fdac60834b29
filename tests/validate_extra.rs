use oasdoc::{Document, Generation, Problem, Severity, SeverityConfig, ValidationEngine, read, read_as};
use serde_json::{Value, json};

/// Validates with every rule enabled, best-practice rules included.
fn problems_in(mut doc: Document) -> Vec<Problem> {
    let config = SeverityConfig {
        optional: Severity::Low,
        ..Default::default()
    };
    ValidationEngine::default()
        .with_severity_policy(config)
        .validate(&mut doc)
}

/// Helper: read then validate, return the locations reported for one code.
///
/// A location is the rendered node path, followed by `:property` when the
/// problem names one.
fn found(value: Value, code: &str) -> Vec<String> {
    let doc = read(&value).expect("read should succeed");
    problems_in(doc)
        .iter()
        .filter(|p| p.code == code)
        .map(location)
        .collect()
}

fn location(problem: &Problem) -> String {
    match &problem.property {
        Some(property) => format!("{}:{}", problem.path, property),
        None => problem.path.to_string(),
    }
}

fn merge(mut base: Value, patch: Value) -> Value {
    if let (Some(base), Value::Object(patch)) = (base.as_object_mut(), patch) {
        for (key, value) in patch {
            base.insert(key, value);
        }
    }
    base
}

/// A minimal valid 2.0 document with `patch` applied to its root.
fn swagger(patch: Value) -> Value {
    merge(
        json!({"swagger": "2.0", "info": {"title": "Pets", "version": "1"}, "paths": {}}),
        patch,
    )
}

/// A minimal valid 3.0 document with `patch` applied to its root.
fn openapi(patch: Value) -> Value {
    merge(
        json!({"openapi": "3.0.3", "info": {"title": "Pets", "version": "1"}, "paths": {}}),
        patch,
    )
}

/// A 3.0 document with a single `GET /pets` operation built from `operation`.
fn openapi_get(operation: Value) -> Value {
    let operation = merge(
        json!({"responses": {"200": {"description": "ok"}}}),
        operation,
    );
    openapi(json!({"paths": {"/pets": {"get": operation}}}))
}

/// A 2.0 document with a single `POST /pets` operation built from `operation`.
fn swagger_post(operation: Value) -> Value {
    let operation = merge(
        json!({"responses": {"200": {"description": "ok"}}}),
        operation,
    );
    swagger(json!({"paths": {"/pets": {"post": operation}}}))
}

// ─── Root and info ──────────────────────────────────────────────────────────

#[test]
fn doc001_missing_version_property() {
    let doc = read_as(&json!({"info": {"title": "t", "version": "1"}, "paths": {}}), Generation::Oas30)
        .unwrap();
    let codes: Vec<_> = problems_in(doc)
        .iter()
        .filter(|p| p.code == "DOC-001")
        .map(location)
        .collect();
    assert_eq!(codes, [":openapi"]);
}

#[test]
fn doc002_unsupported_versions() {
    assert_eq!(found(openapi(json!({"openapi": "3.1.0"})), "DOC-002"), [":openapi"]);
    assert_eq!(found(swagger(json!({"swagger": "2.1"})), "DOC-002"), [":swagger"]);
    assert!(found(openapi(json!({"openapi": "3.0.10"})), "DOC-002").is_empty());
}

#[test]
fn doc003_host_with_scheme() {
    let value = swagger(json!({"host": "https://api.example.com"}));
    assert_eq!(found(value, "DOC-003"), [":host"]);
    assert!(found(swagger(json!({"host": "api.example.com:8080"})), "DOC-003").is_empty());
}

#[test]
fn doc004_base_path_without_slash() {
    assert_eq!(found(swagger(json!({"basePath": "v1"})), "DOC-004"), [":basePath"]);
}

#[test]
fn doc005_unknown_transfer_scheme() {
    let value = swagger(json!({"schemes": ["https", "ftp"]}));
    assert_eq!(found(value, "DOC-005"), [":schemes"]);
}

#[test]
fn doc006_invalid_mime_type_on_root_and_operation() {
    let value = swagger(json!({
        "consumes": ["application/json", "json"],
        "paths": {"/pets": {"get": {"produces": ["text"], "responses": {"200": {"description": "ok"}}}}}
    }));
    assert_eq!(found(value, "DOC-006"), [":consumes", "/paths[/pets]/get:produces"]);
}

#[test]
fn inf002_and_inf003_missing_title_and_version() {
    let value = openapi(json!({"info": {}}));
    assert_eq!(found(value.clone(), "INF-002"), ["/info:title"]);
    assert_eq!(found(value, "INF-003"), ["/info:version"]);
}

#[test]
fn inf004_invalid_terms_of_service() {
    let value = openapi(json!({"info": {"title": "t", "version": "1", "termsOfService": "not a url"}}));
    assert_eq!(found(value, "INF-004"), ["/info:termsOfService"]);
}

#[test]
fn inf005_only_reports_when_enabled() {
    let value = openapi(json!({}));
    assert_eq!(found(value.clone(), "INF-005"), ["/info:description"]);
    let result = oasdoc::load(&value).unwrap();
    assert!(result.problems.iter().all(|p| p.code != "INF-005"));
}

#[test]
fn mark001_control_characters_in_description() {
    let value = openapi(json!({"info": {"title": "t", "version": "1", "description": "bell \u{7}"}}));
    assert_eq!(found(value, "MARK-001"), ["/info:description"]);
}

#[test]
fn ctc_contact_url_and_email() {
    let value = openapi(json!({"info": {
        "title": "t",
        "version": "1",
        "contact": {"url": "not a url", "email": "nobody"}
    }}));
    assert_eq!(found(value.clone(), "CTC-001"), ["/info/contact:url"]);
    assert_eq!(found(value, "CTC-002"), ["/info/contact:email"]);
}

#[test]
fn lic001_license_without_name() {
    let value = swagger(json!({"info": {"title": "t", "version": "1", "license": {"url": "https://x.org"}}}));
    assert_eq!(found(value, "LIC-001"), ["/info/license:name"]);
}

#[test]
fn lic002_invalid_license_url() {
    let license = |url: &str| {
        openapi(json!({"info": {"title": "t", "version": "1", "license": {"name": "MIT", "url": url}}}))
    };
    assert_eq!(found(license("not a url"), "LIC-002"), ["/info/license:url"]);
    assert!(found(license("https://opensource.org/licenses/MIT"), "LIC-002").is_empty());
}

#[test]
fn tag001_tag_without_name() {
    let value = openapi(json!({"tags": [{"name": "pets"}, {"description": "unnamed"}]}));
    assert_eq!(found(value, "TAG-001"), ["/tags[1]:name"]);
    assert!(found(openapi(json!({"tags": [{"name": "pets"}]})), "TAG-001").is_empty());
}

#[test]
fn urls_without_scheme_or_leading_marker_are_rejected() {
    let contact = |url: &str| {
        openapi(json!({"info": {"title": "t", "version": "1", "contact": {"url": url}}}))
    };
    assert_eq!(found(contact("example.com"), "CTC-001"), ["/info/contact:url"]);
    assert!(found(contact("./contact.html"), "CTC-001").is_empty());
    assert!(found(contact("https://example.com/contact"), "CTC-001").is_empty());

    let docs = openapi(json!({"externalDocs": {"url": "docs"}}));
    assert_eq!(found(docs, "ED-002"), ["/externalDocs:url"]);
}

#[test]
fn tag002_reports_original_and_each_duplicate() {
    let value = openapi(json!({"tags": [{"name": "a"}, {"name": "b"}, {"name": "a"}, {"name": "a"}]}));
    assert_eq!(
        found(value, "TAG-002"),
        ["/tags[0]:name", "/tags[2]:name", "/tags[3]:name"]
    );
}

#[test]
fn ed_external_docs_url() {
    assert_eq!(found(openapi(json!({"externalDocs": {}})), "ED-001"), ["/externalDocs:url"]);
    let value = openapi(json!({"externalDocs": {"url": "two words"}}));
    assert_eq!(found(value, "ED-002"), ["/externalDocs:url"]);
}

// ─── Paths and operations ───────────────────────────────────────────────────

#[test]
fn path002_malformed_template() {
    let value = openapi(json!({"paths": {"pets": {}, "/pets/{id": {}, "/ok": {}}}));
    assert_eq!(found(value, "PATH-002"), ["/paths[pets]", "/paths[/pets/{id]"]);
}

#[test]
fn path003_empty_segment() {
    let value = openapi(json!({"paths": {"/pets//toys": {}, "/": {}}}));
    assert_eq!(found(value, "PATH-003"), ["/paths[/pets//toys]"]);
}

#[test]
fn path004_repeated_template_parameter() {
    let value = openapi(json!({"paths": {"/a/{id}/b/{id}": {}}}));
    assert_eq!(found(value, "PATH-004"), ["/paths[/a/{id}/b/{id}]"]);
}

#[test]
fn path005_identical_templates_report_both() {
    let value = openapi(json!({"paths": {"/pets/{id}": {}, "/pets/{petId}": {}, "/pets": {}}}));
    assert_eq!(found(value, "PATH-005"), ["/paths[/pets/{id}]", "/paths[/pets/{petId}]"]);
}

#[test]
fn path006_undeclared_template_parameter() {
    let value = openapi(json!({"paths": {"/pets/{id}": {
        "get": {"responses": {"200": {"description": "ok"}}}
    }}}));
    assert_eq!(found(value, "PATH-006"), ["/paths[/pets/{id}]/get"]);
}

#[test]
fn path006_accepts_path_level_parameters() {
    let value = openapi(json!({"paths": {"/pets/{id}": {
        "parameters": [{"name": "id", "in": "path", "required": true, "schema": {"type": "string"}}],
        "get": {"responses": {"200": {"description": "ok"}}}
    }}}));
    assert!(found(value, "PATH-006").is_empty());
}

#[test]
fn malformed_paths_skip_dependent_rules() {
    let value = openapi(json!({"paths": {"/pets/{id": {
        "get": {"responses": {"200": {"description": "ok"}}}
    }}}));
    let doc = read(&value).unwrap();
    let codes: Vec<_> = problems_in(doc).into_iter().map(|p| p.code).collect();
    assert!(codes.contains(&"PATH-002".to_string()));
    for code in ["PATH-003", "PATH-004", "PATH-005", "PATH-006"] {
        assert!(!codes.contains(&code.to_string()), "{} should be skipped", code);
    }
}

#[test]
fn op001_missing_responses() {
    let value = openapi(json!({"paths": {"/pets": {"get": {}}}}));
    assert_eq!(found(value, "OP-001"), ["/paths[/pets]/get:responses"]);
}

#[test]
fn op004_duplicate_operation_ids() {
    let value = openapi(json!({"paths": {
        "/pets": {
            "get": {"operationId": "list", "responses": {"200": {"description": "ok"}}},
            "post": {"operationId": "list", "responses": {"200": {"description": "ok"}}}
        }
    }}));
    assert_eq!(
        found(value, "OP-004"),
        ["/paths[/pets]/get:operationId", "/paths[/pets]/post:operationId"]
    );
}

#[test]
fn op005_undeclared_tag() {
    let value = merge(
        openapi_get(json!({"tags": ["pets", "toys"]})),
        json!({"tags": [{"name": "pets"}]}),
    );
    assert_eq!(found(value, "OP-005"), ["/paths[/pets]/get:tags"]);
}

#[test]
fn op006_request_body_on_get() {
    let value = openapi_get(json!({"requestBody": {"content": {"application/json": {}}}}));
    assert_eq!(found(value, "OP-006"), ["/paths[/pets]/get:requestBody"]);
}

#[test]
fn op007_form_data_needs_form_consumes() {
    let param = json!({"name": "photo", "in": "formData", "type": "file"});
    let value = swagger_post(json!({"parameters": [param.clone()]}));
    assert_eq!(found(value, "OP-007"), ["/paths[/pets]/post:consumes"]);

    let value = swagger_post(json!({"parameters": [param], "consumes": ["multipart/form-data"]}));
    assert!(found(value, "OP-007").is_empty());
}

// ─── Parameters ─────────────────────────────────────────────────────────────

#[test]
fn par001_par002_missing_name_and_location() {
    let value = openapi_get(json!({"parameters": [{"schema": {"type": "string"}}]}));
    assert_eq!(found(value.clone(), "PAR-001"), ["/paths[/pets]/get/parameters[0]:name"]);
    assert_eq!(found(value, "PAR-002"), ["/paths[/pets]/get/parameters[0]:in"]);
}

#[test]
fn par003_path_parameter_must_be_required() {
    let value = openapi(json!({"paths": {"/pets/{id}": {"get": {
        "parameters": [{"name": "id", "in": "path", "schema": {"type": "string"}}],
        "responses": {"200": {"description": "ok"}}
    }}}}));
    assert_eq!(found(value, "PAR-003"), ["/paths[/pets/{id}]/get/parameters[0]:required"]);
}

#[test]
fn par004_body_without_schema() {
    let value = swagger_post(json!({"parameters": [{"name": "pet", "in": "body"}]}));
    assert_eq!(found(value, "PAR-004"), ["/paths[/pets]/post/parameters[0]:schema"]);
}

#[test]
fn par005_par006_typed_parameters() {
    let value = swagger_post(json!({"parameters": [
        {"name": "q", "in": "query"},
        {"name": "ids", "in": "query", "type": "array"}
    ]}));
    assert_eq!(found(value.clone(), "PAR-005"), ["/paths[/pets]/post/parameters[0]:type"]);
    assert_eq!(found(value, "PAR-006"), ["/paths[/pets]/post/parameters[1]:items"]);
}

#[test]
fn par007_needs_schema_or_content() {
    let value = openapi_get(json!({"parameters": [{"name": "q", "in": "query"}]}));
    assert_eq!(found(value, "PAR-007"), ["/paths[/pets]/get/parameters[0]:schema"]);
}

#[test]
fn par008_location_depends_on_generation() {
    let value = openapi_get(json!({"parameters": [
        {"name": "q", "in": "formData", "schema": {"type": "string"}}
    ]}));
    assert_eq!(found(value, "PAR-008"), ["/paths[/pets]/get/parameters[0]:in"]);

    let value = swagger_post(json!({"parameters": [{"name": "c", "in": "cookie", "type": "string"}]}));
    assert_eq!(found(value, "PAR-008"), ["/paths[/pets]/post/parameters[0]:in"]);
}

#[test]
fn par009_par010_type_and_collection_format() {
    let value = swagger_post(json!({"parameters": [
        {"name": "q", "in": "query", "type": "object"},
        {"name": "h", "in": "header", "type": "array", "items": {"type": "string"}, "collectionFormat": "multi"}
    ]}));
    assert_eq!(found(value.clone(), "PAR-009"), ["/paths[/pets]/post/parameters[0]:type"]);
    assert_eq!(found(value, "PAR-010"), ["/paths[/pets]/post/parameters[1]:collectionFormat"]);
}

#[test]
fn par011_style_must_fit_location() {
    let value = openapi_get(json!({"parameters": [
        {"name": "q", "in": "query", "style": "matrix", "schema": {"type": "string"}},
        {"name": "r", "in": "query", "style": "form", "schema": {"type": "string"}}
    ]}));
    assert_eq!(found(value, "PAR-011"), ["/paths[/pets]/get/parameters[0]:style"]);
}

#[test]
fn par012_file_outside_form_data() {
    let value = swagger_post(json!({"parameters": [{"name": "f", "in": "query", "type": "file"}]}));
    assert_eq!(found(value, "PAR-012"), ["/paths[/pets]/post/parameters[0]:type"]);
}

#[test]
fn par013_to_par015_schema_content_and_examples() {
    let value = openapi_get(json!({"parameters": [{
        "name": "q",
        "in": "query",
        "schema": {"type": "string"},
        "content": {"application/json": {}, "text/plain": {}},
        "example": "a",
        "examples": {"one": {"value": "a"}}
    }]}));
    let at = "/paths[/pets]/get/parameters[0]";
    assert_eq!(found(value.clone(), "PAR-013"), [format!("{}:content", at)]);
    assert_eq!(found(value.clone(), "PAR-014"), [format!("{}:examples", at)]);
    assert_eq!(found(value, "PAR-015"), [format!("{}:content", at)]);
}

#[test]
fn par016_duplicate_parameters_report_both_nodes() {
    let value = swagger(json!({"paths": {"/pets/{id}": {"get": {
        "parameters": [
            {"name": "id", "in": "path", "required": true, "type": "string"},
            {"name": "id", "in": "path", "required": true, "type": "string"}
        ],
        "responses": {"200": {"description": "ok"}}
    }}}}));
    assert_eq!(
        found(value, "PAR-016"),
        [
            "/paths[/pets/{id}]/get/parameters[0]:name",
            "/paths[/pets/{id}]/get/parameters[1]:name"
        ]
    );
}

#[test]
fn par016_same_name_in_different_locations_is_fine() {
    let value = openapi_get(json!({"parameters": [
        {"name": "id", "in": "query", "schema": {"type": "string"}},
        {"name": "id", "in": "header", "schema": {"type": "string"}}
    ]}));
    assert!(found(value, "PAR-016").is_empty());
}

#[test]
fn par016_follows_references() {
    let value = merge(
        openapi_get(json!({"parameters": [
            {"$ref": "#/components/parameters/limit"},
            {"name": "limit", "in": "query", "schema": {"type": "integer"}}
        ]})),
        json!({"components": {"parameters": {
            "limit": {"name": "limit", "in": "query", "schema": {"type": "integer"}}
        }}}),
    );
    assert_eq!(found(value, "PAR-016").len(), 2);
}

#[test]
fn par017_par018_body_parameters() {
    let value = swagger_post(json!({
        "consumes": ["multipart/form-data"],
        "parameters": [
            {"name": "a", "in": "body", "schema": {"type": "object"}},
            {"name": "b", "in": "body", "schema": {"type": "object"}},
            {"name": "c", "in": "formData", "type": "string"}
        ]
    }));
    assert_eq!(found(value.clone(), "PAR-017"), ["/paths[/pets]/post/parameters[1]:in"]);
    assert_eq!(found(value, "PAR-018"), ["/paths[/pets]/post"]);
}

#[test]
fn par020_path_parameter_not_in_template() {
    let value = openapi(json!({"paths": {"/pets": {"get": {
        "parameters": [{"name": "id", "in": "path", "required": true, "schema": {"type": "string"}}],
        "responses": {"200": {"description": "ok"}}
    }}}}));
    assert_eq!(found(value, "PAR-020"), ["/paths[/pets]/get/parameters[0]:name"]);
}

#[test]
fn par021_allow_empty_value_outside_query() {
    let value = openapi_get(json!({"parameters": [
        {"name": "h", "in": "header", "allowEmptyValue": true, "schema": {"type": "string"}}
    ]}));
    assert_eq!(found(value, "PAR-021"), ["/paths[/pets]/get/parameters[0]:allowEmptyValue"]);
}

#[test]
fn items_rules() {
    let value = swagger_post(json!({"parameters": [{
        "name": "ids",
        "in": "query",
        "type": "array",
        "items": {"type": "array", "collectionFormat": "multi", "items": {"type": "object"}}
    }]}));
    let items = "/paths[/pets]/post/parameters[0]/items";
    assert_eq!(found(value.clone(), "IT-004"), [format!("{}:collectionFormat", items)]);
    assert_eq!(found(value.clone(), "IT-003"), [format!("{}/items:type", items)]);
    assert!(found(value, "IT-002").is_empty());

    let value = swagger_post(json!({"parameters": [{
        "name": "ids", "in": "query", "type": "array", "items": {"type": "array"}
    }]}));
    assert_eq!(found(value, "IT-002"), ["/paths[/pets]/post/parameters[0]/items:items"]);

    let value = swagger_post(json!({"parameters": [{
        "name": "ids", "in": "query", "type": "array", "items": {}
    }]}));
    assert_eq!(found(value, "IT-001"), ["/paths[/pets]/post/parameters[0]/items:type"]);
}

// ─── Responses and headers ──────────────────────────────────────────────────

#[test]
fn res001_response_without_description() {
    let value = openapi(json!({"paths": {"/pets": {"get": {"responses": {"200": {}}}}}}));
    assert_eq!(found(value, "RES-001"), ["/paths[/pets]/get/responses[200]:description"]);
}

#[test]
fn res002_empty_responses() {
    let value = openapi(json!({"paths": {"/pets": {"get": {"responses": {}}}}}));
    assert_eq!(found(value, "RES-002"), ["/paths[/pets]/get/responses"]);
}

#[test]
fn res003_status_code_ranges_depend_on_generation() {
    let responses = json!({"2XX": {"description": "ok"}, "600": {"description": "odd"}});
    let value = openapi(json!({"paths": {"/pets": {"get": {"responses": responses.clone()}}}}));
    assert_eq!(found(value, "RES-003"), ["/paths[/pets]/get/responses[600]"]);

    let value = swagger(json!({"paths": {"/pets": {"get": {"responses": responses}}}}));
    assert_eq!(
        found(value, "RES-003"),
        ["/paths[/pets]/get/responses[2XX]", "/paths[/pets]/get/responses[600]"]
    );
}

#[test]
fn res005_no_success_response() {
    let value = openapi(json!({"paths": {"/pets": {"get": {"responses": {"404": {"description": "no"}}}}}}));
    assert_eq!(found(value, "RES-005"), ["/paths[/pets]/get/responses"]);
    let value = openapi(json!({"paths": {"/pets": {"get": {"responses": {"default": {"description": "any"}}}}}}));
    assert!(found(value, "RES-005").is_empty());
}

#[test]
fn header_rules_per_generation() {
    let value = swagger(json!({"paths": {"/pets": {"get": {"responses": {"200": {
        "description": "ok",
        "headers": {"X-Rate": {}, "X-Ids": {"type": "array"}, "X-Obj": {"type": "object"}}
    }}}}}}));
    let at = "/paths[/pets]/get/responses[200]/headers";
    assert_eq!(found(value.clone(), "HEAD-001"), [format!("{}[X-Rate]:type", at)]);
    assert_eq!(found(value.clone(), "HEAD-002"), [format!("{}[X-Ids]:items", at)]);
    assert_eq!(found(value, "HEAD-003"), [format!("{}[X-Obj]:type", at)]);

    let value = openapi(json!({"paths": {"/pets": {"get": {"responses": {"200": {
        "description": "ok",
        "headers": {"X-Rate": {
            "schema": {"type": "integer"},
            "content": {"text/plain": {}},
            "example": 1,
            "examples": {"one": {"value": 1}}
        }}
    }}}}}}));
    assert_eq!(found(value.clone(), "HEAD-004"), [format!("{}[X-Rate]:examples", at)]);
    assert_eq!(found(value.clone(), "HEAD-006"), [format!("{}[X-Rate]:content", at)]);
    assert!(found(value, "HEAD-001").is_empty());
}

// ─── Schemas ────────────────────────────────────────────────────────────────

#[test]
fn schema_rules() {
    let value = openapi(json!({"components": {"schemas": {
        "List": {"type": "array"},
        "Odd": {"type": "file"},
        "Both": {"type": "string", "readOnly": true, "writeOnly": true},
        "Pet": {
            "type": "object",
            "required": ["name", "name", "age"],
            "properties": {"name": {"type": "string"}}
        }
    }}}));
    let at = "/components/schemas";
    assert_eq!(found(value.clone(), "SCH-001"), [format!("{}[List]:items", at)]);
    assert_eq!(found(value.clone(), "SCH-002"), [format!("{}[Odd]:type", at)]);
    assert_eq!(found(value.clone(), "SCH-003"), [format!("{}[Both]:writeOnly", at)]);
    assert_eq!(found(value.clone(), "SCH-004"), [format!("{}[Pet]:required", at)]);
    assert_eq!(found(value, "SCH-006"), [format!("{}[Pet]:required", at)]);
}

#[test]
fn sch002_file_type_is_allowed_in_oas20() {
    let value = swagger(json!({"definitions": {"Upload": {"type": "file"}}}));
    assert!(found(value, "SCH-002").is_empty());
}

#[test]
fn sch007_discriminator_must_be_required() {
    let value = swagger(json!({"definitions": {"Pet": {
        "type": "object",
        "discriminator": "kind",
        "properties": {"kind": {"type": "string"}}
    }}}));
    assert_eq!(found(value, "SCH-007"), ["/definitions[Pet]:discriminator"]);
}

#[test]
fn disc001_missing_property_name() {
    let value = openapi(json!({"components": {"schemas": {"Pet": {
        "type": "object",
        "discriminator": {"mapping": {"dog": "#/components/schemas/Dog"}}
    }}}}));
    assert_eq!(found(value, "DISC-001"), ["/components/schemas[Pet]/discriminator:propertyName"]);
}

// ─── Security ───────────────────────────────────────────────────────────────

#[test]
fn security_scheme_rules_oas20() {
    let value = swagger(json!({"securityDefinitions": {
        "key": {"type": "apiKey", "in": "cookie"},
        "oauth": {"type": "oauth2", "flow": "implicit"},
        "weird": {"type": "magic"}
    }}));
    assert_eq!(found(value.clone(), "SS-003"), ["/securityDefinitions[key]:name"]);
    assert_eq!(found(value.clone(), "SS-005"), ["/securityDefinitions[key]:in"]);
    assert_eq!(found(value.clone(), "SS-008"), ["/securityDefinitions[oauth]:authorizationUrl"]);
    assert_eq!(found(value.clone(), "SS-010"), ["/securityDefinitions[oauth]:scopes"]);
    assert_eq!(found(value, "SS-002"), ["/securityDefinitions[weird]:type"]);
}

#[test]
fn ss004_api_key_without_location() {
    let v2 = swagger(json!({"securityDefinitions": {
        "key": {"type": "apiKey", "name": "X-Key"},
        "ok": {"type": "apiKey", "name": "X-Key", "in": "header"}
    }}));
    assert_eq!(found(v2, "SS-004"), ["/securityDefinitions[key]:in"]);

    let v3 = openapi(json!({"components": {"securitySchemes": {
        "key": {"type": "apiKey", "name": "X-Key"}
    }}}));
    assert_eq!(found(v3, "SS-004"), ["/components/securitySchemes[key]:in"]);
}

#[test]
fn ss006_and_ss007_oauth_flow_declaration() {
    let value = swagger(json!({"securityDefinitions": {
        "none": {"type": "oauth2", "scopes": {}},
        "magic": {"type": "oauth2", "flow": "magic", "scopes": {}},
        "ok": {"type": "oauth2", "flow": "implicit", "authorizationUrl": "https://auth.example.com", "scopes": {}}
    }}));
    assert_eq!(found(value.clone(), "SS-006"), ["/securityDefinitions[none]:flow"]);
    assert_eq!(found(value, "SS-007"), ["/securityDefinitions[magic]:flow"]);
}

#[test]
fn ss009_token_url_required_by_flow() {
    let value = swagger(json!({"securityDefinitions": {
        "password": {"type": "oauth2", "flow": "password", "scopes": {}},
        "application": {"type": "oauth2", "flow": "application", "tokenUrl": "https://auth.example.com/token", "scopes": {}},
        "implicit": {"type": "oauth2", "flow": "implicit", "authorizationUrl": "https://auth.example.com", "scopes": {}}
    }}));
    assert_eq!(found(value, "SS-009"), ["/securityDefinitions[password]:tokenUrl"]);
}

#[test]
fn ss011_invalid_scheme_urls() {
    let value = swagger(json!({"securityDefinitions": {
        "bad": {"type": "oauth2", "flow": "accessCode", "scopes": {},
            "authorizationUrl": "auth.example.com", "tokenUrl": "https://auth.example.com/token"},
        "good": {"type": "oauth2", "flow": "accessCode", "scopes": {},
            "authorizationUrl": "https://auth.example.com", "tokenUrl": "https://auth.example.com/token"}
    }}));
    assert_eq!(found(value, "SS-011"), ["/securityDefinitions[bad]:authorizationUrl"]);

    let v3 = openapi(json!({"components": {"securitySchemes": {
        "oidc": {"type": "openIdConnect", "openIdConnectUrl": "not a url"}
    }}}));
    assert_eq!(found(v3, "SS-011"), ["/components/securitySchemes[oidc]:openIdConnectUrl"]);
}

#[test]
fn security_scheme_rules_oas30() {
    let value = openapi(json!({"components": {"securitySchemes": {
        "basic": {"type": "http"},
        "oauth": {"type": "oauth2"},
        "oidc": {"type": "openIdConnect"},
        "untyped": {}
    }}}));
    let at = "/components/securitySchemes";
    assert_eq!(found(value.clone(), "SS-012"), [format!("{}[basic]:scheme", at)]);
    assert_eq!(found(value.clone(), "SS-013"), [format!("{}[oauth]:flows", at)]);
    assert_eq!(found(value.clone(), "SS-014"), [format!("{}[oidc]:openIdConnectUrl", at)]);
    assert_eq!(found(value, "SS-001"), [format!("{}[untyped]:type", at)]);
}

#[test]
fn oauth_flow_rules() {
    let value = openapi(json!({"components": {"securitySchemes": {"oauth": {
        "type": "oauth2",
        "flows": {
            "implicit": {"scopes": {}},
            "password": {"tokenUrl": "not a url", "scopes": {}},
            "clientCredentials": {"tokenUrl": "https://auth.example.com/token"}
        }
    }}}}));
    let at = "/components/securitySchemes[oauth]/flows";
    assert_eq!(found(value.clone(), "FLOW-001"), [format!("{}/implicit:authorizationUrl", at)]);
    assert_eq!(found(value.clone(), "FLOW-003"), [format!("{}/clientCredentials:scopes", at)]);
    assert_eq!(found(value, "FLOW-004"), [format!("{}/password:tokenUrl", at)]);
}

#[test]
fn flow002_token_url_required_by_flow() {
    let value = openapi(json!({"components": {"securitySchemes": {"oauth": {
        "type": "oauth2",
        "flows": {
            "password": {"scopes": {}},
            "clientCredentials": {"tokenUrl": "https://auth.example.com/token", "scopes": {}},
            "implicit": {"authorizationUrl": "https://auth.example.com", "scopes": {}}
        }
    }}}}));
    let at = "/components/securitySchemes[oauth]/flows";
    assert_eq!(found(value, "FLOW-002"), [format!("{}/password:tokenUrl", at)]);
}

#[test]
fn security_requirement_rules() {
    let value = openapi(json!({
        "security": [{"key": ["read"]}, {"missing": []}],
        "components": {"securitySchemes": {"key": {"type": "apiKey", "name": "k", "in": "header"}}}
    }));
    assert_eq!(found(value.clone(), "SREQ-001"), ["/security[1]:missing"]);
    assert_eq!(found(value, "SREQ-002"), ["/security[0]:key"]);
}

// ─── Servers and content ────────────────────────────────────────────────────

#[test]
fn server_rules() {
    let value = openapi(json!({"servers": [
        {"url": "https://{region}.example.com/{version}", "variables": {
            "region": {"default": "eu", "enum": ["us", "ap"]}
        }},
        {"description": "no url"},
        {"url": "http://exa mple.com"}
    ]}));
    assert_eq!(found(value.clone(), "SRV-001"), ["/servers[1]:url"]);
    assert_eq!(found(value.clone(), "SRV-002"), ["/servers[2]:url"]);
    assert_eq!(found(value.clone(), "SRV-003"), ["/servers[0]:url"]);
    assert_eq!(found(value, "SVAR-002"), ["/servers[0]/variables[region]:default"]);
}

#[test]
fn svar001_variable_without_default() {
    let value = openapi(json!({"servers": [{"url": "/{v}", "variables": {"v": {}}}]}));
    assert_eq!(found(value, "SVAR-001"), ["/servers[0]/variables[v]:default"]);
}

#[test]
fn content_rules() {
    let value = openapi(json!({"paths": {"/pets": {"post": {
        "requestBody": {"content": {
            "json": {},
            "multipart/form-data": {
                "example": {},
                "examples": {"one": {"value": {}, "externalValue": "https://x.org/a.json"}},
                "encoding": {"photo": {"contentType": "image/png, image", "style": "matrix"}}
            }
        }},
        "responses": {"200": {"description": "ok"}}
    }}}}));
    let body = "/paths[/pets]/post/requestBody/content";
    assert_eq!(found(value.clone(), "MT-002"), [format!("{}[json]", body)]);
    assert_eq!(found(value.clone(), "MT-001"), [format!("{}[multipart/form-data]:examples", body)]);
    assert_eq!(
        found(value.clone(), "EX-001"),
        [format!("{}[multipart/form-data]/examples[one]:externalValue", body)]
    );
    assert_eq!(
        found(value.clone(), "ENC-001"),
        [format!("{}[multipart/form-data]/encoding[photo]:contentType", body)]
    );
    assert_eq!(
        found(value, "ENC-002"),
        [format!("{}[multipart/form-data]/encoding[photo]:style", body)]
    );
}

#[test]
fn rb001_request_body_without_content() {
    let value = openapi(json!({"paths": {"/pets": {"post": {
        "requestBody": {"required": true},
        "responses": {"200": {"description": "ok"}}
    }}}}));
    assert_eq!(found(value, "RB-001"), ["/paths[/pets]/post/requestBody:content"]);
}

#[test]
fn link_rules() {
    let value = openapi(json!({"paths": {"/pets": {"get": {
        "operationId": "listPets",
        "responses": {"200": {"description": "ok", "links": {
            "both": {"operationRef": "#/paths/~1pets/get", "operationId": "listPets"},
            "neither": {"description": "?"},
            "unknown": {"operationId": "getPet"},
            "known": {"operationId": "listPets"}
        }}}
    }}}}));
    let at = "/paths[/pets]/get/responses[200]/links";
    assert_eq!(found(value.clone(), "LINK-001"), [format!("{}[both]:operationId", at)]);
    assert_eq!(found(value.clone(), "LINK-002"), [format!("{}[neither]", at)]);
    assert_eq!(found(value, "LINK-004"), [format!("{}[unknown]:operationId", at)]);
}

// ─── References and unknown properties ──────────────────────────────────────

#[test]
fn unresolvable_references_use_kind_specific_codes() {
    let value = openapi(json!({
        "paths": {"/pets": {"get": {
            "parameters": [{"$ref": "#/components/parameters/nope"}],
            "requestBody": {"$ref": "#/components/requestBodies/nope"},
            "responses": {"200": {"$ref": "#/components/responses/nope"}}
        }}},
        "components": {"schemas": {"Pet": {"$ref": "#/components/schemas/Nope"}}}
    }));
    assert_eq!(found(value.clone(), "PAR-019"), ["/paths[/pets]/get/parameters[0]:$ref"]);
    assert_eq!(found(value.clone(), "RB-002"), ["/paths[/pets]/get/requestBody:$ref"]);
    assert_eq!(found(value.clone(), "RES-004"), ["/paths[/pets]/get/responses[200]:$ref"]);
    assert_eq!(found(value.clone(), "SCH-005"), ["/components/schemas[Pet]:$ref"]);
    // Reference nodes skip the structural checks.
    assert!(found(value, "RES-001").is_empty());
}

#[test]
fn pi001_path_item_references() {
    let value = openapi(json!({
        "paths": {
            "/broken": {"$ref": "#/components/callbacks/onEvent/missing"},
            "/shared": {"$ref": "#/components/callbacks/onEvent/notify"},
            "/remote": {"$ref": "paths.yaml#/pets"}
        },
        "components": {"callbacks": {"onEvent": {"notify": {"post": {
            "responses": {"200": {"description": "ok"}}
        }}}}}
    }));
    assert_eq!(found(value.clone(), "PI-001"), ["/paths[/broken]:$ref"]);
    assert!(found(value, "REF-001").is_empty());
}

#[test]
fn oas30_component_reference_rules() {
    let value = openapi(json!({
        "paths": {"/pets": {"get": {
            "responses": {"200": {
                "description": "ok",
                "headers": {
                    "X-Rate": {"$ref": "#/components/headers/Nope"},
                    "X-Ok": {"$ref": "#/components/headers/Rate"}
                },
                "content": {"application/json": {"examples": {
                    "cat": {"$ref": "#/components/examples/Nope"},
                    "dog": {"$ref": "#/components/examples/Dog"}
                }}},
                "links": {
                    "next": {"$ref": "#/components/links/Nope"},
                    "self": {"$ref": "#/components/links/Self"}
                }
            }},
            "callbacks": {
                "onEvent": {"$ref": "#/components/callbacks/Nope"},
                "onDone": {"$ref": "#/components/callbacks/Done"}
            }
        }}},
        "components": {
            "headers": {"Rate": {"schema": {"type": "integer"}}},
            "examples": {"Dog": {"value": "dog"}},
            "links": {"Self": {"operationId": "getPets"}},
            "callbacks": {"Done": {}},
            "securitySchemes": {
                "key": {"type": "apiKey", "name": "k", "in": "header"},
                "alias": {"$ref": "#/components/securitySchemes/key"},
                "broken": {"$ref": "#/components/securitySchemes/Nope"}
            }
        }
    }));
    let response = "/paths[/pets]/get/responses[200]";
    assert_eq!(found(value.clone(), "HEAD-005"), [format!("{}/headers[X-Rate]:$ref", response)]);
    assert_eq!(
        found(value.clone(), "EX-002"),
        [format!("{}/content[application/json]/examples[cat]:$ref", response)]
    );
    assert_eq!(found(value.clone(), "LINK-003"), [format!("{}/links[next]:$ref", response)]);
    assert_eq!(found(value.clone(), "CB-001"), ["/paths[/pets]/get/callbacks[onEvent]:$ref"]);
    assert_eq!(found(value.clone(), "SS-015"), ["/components/securitySchemes[broken]:$ref"]);
    assert!(found(value, "REF-001").is_empty());
}

#[test]
fn oas30_component_references_that_resolve_are_clean() {
    let value = openapi(json!({
        "paths": {"/pets": {"get": {
            "responses": {"200": {
                "description": "ok",
                "headers": {"X-Ok": {"$ref": "#/components/headers/Rate"}}
            }},
            "callbacks": {"onDone": {"$ref": "#/components/callbacks/Done"}}
        }}},
        "components": {
            "headers": {"Rate": {"schema": {"type": "integer"}}},
            "callbacks": {"Done": {}}
        }
    }));
    for code in ["HEAD-005", "EX-002", "LINK-003", "CB-001", "SS-015"] {
        assert!(found(value.clone(), code).is_empty(), "{code}");
    }
}

#[test]
fn external_references_are_assumed_valid() {
    let value = swagger(json!({"definitions": {"Pet": {"$ref": "common.json#/definitions/Pet"}}}));
    assert!(found(value, "SCH-005").is_empty());
}

#[test]
fn oas20_references_into_definitions_resolve() {
    let value = swagger(json!({
        "definitions": {"Pet": {"type": "object"}},
        "parameters": {"limit": {"name": "limit", "in": "query", "type": "integer"}},
        "paths": {"/pets": {"get": {
            "parameters": [{"$ref": "#/parameters/limit"}],
            "responses": {"200": {"description": "ok", "schema": {"$ref": "#/definitions/Pet"}}}
        }}}
    }));
    assert!(found(value.clone(), "PAR-019").is_empty());
    assert!(found(value.clone(), "SCH-005").is_empty());
    assert!(found(value, "REF-001").is_empty());
}

#[test]
fn ref001_reference_to_another_kind() {
    let value = merge(
        openapi_get(json!({"parameters": [{"$ref": "#/components/schemas/Pet"}]})),
        json!({"components": {"schemas": {"Pet": {"type": "object"}}}}),
    );
    assert_eq!(found(value, "REF-001"), ["/paths[/pets]/get/parameters[0]:$ref"]);
}

#[test]
fn ref002_circular_chain() {
    let value = openapi(json!({"components": {"schemas": {
        "A": {"$ref": "#/components/schemas/B"},
        "B": {"$ref": "#/components/schemas/A"},
        "C": {"type": "object", "properties": {"self": {"$ref": "#/components/schemas/C"}}}
    }}}));
    assert_eq!(
        found(value, "REF-002"),
        ["/components/schemas[A]:$ref", "/components/schemas[B]:$ref"]
    );
}

#[test]
fn unknown001_flags_extra_properties_but_not_extensions() {
    let value = openapi(json!({
        "host": "api.example.com",
        "info": {"title": "t", "version": "1", "x-logo": "logo.png", "color": "blue"}
    }));
    assert_eq!(found(value, "UNKNOWN-001"), [":host", "/info:color"]);
}
