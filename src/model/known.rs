//! Static per-kind property schemas.
//!
//! Unknown-property detection is a set difference between a node's extra
//! properties and the names registered here for its kind and generation.

use super::NodeKind;
use crate::enums::Generation;

/// The declared property names of one node kind in one generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KnownProperties {
    pub kind: NodeKind,
    pub generation: Generation,
    pub properties: &'static [&'static str],
}

macro_rules! known {
    ($kind:ident, $generation:ident, [$($name:literal),* $(,)?]) => {
        KnownProperties {
            kind: NodeKind::$kind,
            generation: Generation::$generation,
            properties: &[$($name),*],
        }
    };
}

/// The known-property registry.
pub static KNOWN_PROPERTIES: &[KnownProperties] = &[
    // Root
    known!(Document, Oas20, [
        "swagger", "info", "host", "basePath", "schemes", "consumes", "produces", "paths",
        "definitions", "parameters", "responses", "securityDefinitions", "security", "tags",
        "externalDocs",
    ]),
    known!(Document, Oas30, [
        "openapi", "info", "servers", "paths", "components", "security", "tags", "externalDocs",
    ]),
    // Info
    known!(Info, Oas20, ["title", "description", "termsOfService", "contact", "license", "version"]),
    known!(Info, Oas30, ["title", "description", "termsOfService", "contact", "license", "version"]),
    known!(Contact, Oas20, ["name", "url", "email"]),
    known!(Contact, Oas30, ["name", "url", "email"]),
    known!(License, Oas20, ["name", "url"]),
    known!(License, Oas30, ["name", "url"]),
    // Paths
    known!(Paths, Oas20, []),
    known!(Paths, Oas30, []),
    known!(PathItem, Oas20, [
        "$ref", "get", "put", "post", "delete", "options", "head", "patch", "parameters",
    ]),
    known!(PathItem, Oas30, [
        "$ref", "summary", "description", "get", "put", "post", "delete", "options", "head",
        "patch", "trace", "servers", "parameters",
    ]),
    known!(Operation, Oas20, [
        "tags", "summary", "description", "externalDocs", "operationId", "consumes", "produces",
        "parameters", "responses", "schemes", "deprecated", "security",
    ]),
    known!(Operation, Oas30, [
        "tags", "summary", "description", "externalDocs", "operationId", "parameters",
        "requestBody", "responses", "callbacks", "deprecated", "security", "servers",
    ]),
    // Parameters
    known!(Parameter, Oas20, [
        "$ref", "name", "in", "description", "required", "schema", "type", "format",
        "allowEmptyValue", "items", "collectionFormat", "default", "maximum", "exclusiveMaximum",
        "minimum", "exclusiveMinimum", "maxLength", "minLength", "pattern", "maxItems",
        "minItems", "uniqueItems", "enum", "multipleOf",
    ]),
    known!(Parameter, Oas30, [
        "$ref", "name", "in", "description", "required", "deprecated", "allowEmptyValue",
        "style", "explode", "allowReserved", "schema", "example", "examples", "content",
    ]),
    known!(Items, Oas20, [
        "type", "format", "items", "collectionFormat", "default", "maximum", "exclusiveMaximum",
        "minimum", "exclusiveMinimum", "maxLength", "minLength", "pattern", "maxItems",
        "minItems", "uniqueItems", "enum", "multipleOf",
    ]),
    known!(Header, Oas20, [
        "description", "type", "format", "items", "collectionFormat", "default", "maximum",
        "exclusiveMaximum", "minimum", "exclusiveMinimum", "maxLength", "minLength", "pattern",
        "maxItems", "minItems", "uniqueItems", "enum", "multipleOf",
    ]),
    known!(Header, Oas30, [
        "$ref", "description", "required", "deprecated", "allowEmptyValue", "style", "explode",
        "allowReserved", "schema", "example", "examples", "content",
    ]),
    // Responses
    known!(Responses, Oas20, ["default"]),
    known!(Responses, Oas30, ["default"]),
    known!(Response, Oas20, ["$ref", "description", "schema", "headers", "examples"]),
    known!(Response, Oas30, ["$ref", "description", "headers", "content", "links"]),
    // Schemas
    known!(Schema, Oas20, [
        "$ref", "format", "title", "description", "default", "multipleOf", "maximum",
        "exclusiveMaximum", "minimum", "exclusiveMinimum", "maxLength", "minLength", "pattern",
        "maxItems", "minItems", "uniqueItems", "maxProperties", "minProperties", "required",
        "enum", "type", "items", "allOf", "properties", "additionalProperties", "discriminator",
        "readOnly", "xml", "externalDocs", "example",
    ]),
    known!(Schema, Oas30, [
        "$ref", "title", "multipleOf", "maximum", "exclusiveMaximum", "minimum",
        "exclusiveMinimum", "maxLength", "minLength", "pattern", "maxItems", "minItems",
        "uniqueItems", "maxProperties", "minProperties", "required", "enum", "type", "allOf",
        "oneOf", "anyOf", "not", "items", "properties", "additionalProperties", "description",
        "format", "default", "nullable", "discriminator", "readOnly", "writeOnly", "xml",
        "externalDocs", "example", "deprecated",
    ]),
    known!(Xml, Oas20, ["name", "namespace", "prefix", "attribute", "wrapped"]),
    known!(Xml, Oas30, ["name", "namespace", "prefix", "attribute", "wrapped"]),
    known!(Discriminator, Oas30, ["propertyName", "mapping"]),
    // Tags
    known!(Tag, Oas20, ["name", "description", "externalDocs"]),
    known!(Tag, Oas30, ["name", "description", "externalDocs"]),
    known!(ExternalDocumentation, Oas20, ["description", "url"]),
    known!(ExternalDocumentation, Oas30, ["description", "url"]),
    // Security
    known!(SecurityRequirement, Oas20, []),
    known!(SecurityRequirement, Oas30, []),
    known!(SecurityScheme, Oas20, [
        "type", "description", "name", "in", "flow", "authorizationUrl", "tokenUrl", "scopes",
    ]),
    known!(SecurityScheme, Oas30, [
        "$ref", "type", "description", "name", "in", "scheme", "bearerFormat", "flows",
        "openIdConnectUrl",
    ]),
    known!(OAuthFlows, Oas30, ["implicit", "password", "clientCredentials", "authorizationCode"]),
    known!(OAuthFlow, Oas30, ["authorizationUrl", "tokenUrl", "refreshUrl", "scopes"]),
    // 2.0 definition collections
    known!(Definitions, Oas20, []),
    known!(ParametersDefinitions, Oas20, []),
    known!(ResponsesDefinitions, Oas20, []),
    known!(SecurityDefinitions, Oas20, []),
    // 3.0 components
    known!(Components, Oas30, [
        "schemas", "responses", "parameters", "examples", "requestBodies", "headers",
        "securitySchemes", "links", "callbacks",
    ]),
    known!(Server, Oas30, ["url", "description", "variables"]),
    known!(ServerVariable, Oas30, ["enum", "default", "description"]),
    known!(RequestBody, Oas30, ["$ref", "description", "content", "required"]),
    known!(MediaType, Oas30, ["schema", "example", "examples", "encoding"]),
    known!(Encoding, Oas30, ["contentType", "headers", "style", "explode", "allowReserved"]),
    known!(Example, Oas30, ["$ref", "summary", "description", "value", "externalValue"]),
    known!(Link, Oas30, [
        "$ref", "operationRef", "operationId", "parameters", "requestBody", "description",
        "server",
    ]),
    known!(Callback, Oas30, ["$ref"]),
];

/// Look up the known-property entry for a kind in a generation.
pub fn lookup(kind: NodeKind, generation: Generation) -> Option<&'static KnownProperties> {
    KNOWN_PROPERTIES
        .iter()
        .find(|e| e.kind == kind && e.generation == generation)
}

/// Whether `name` is a declared property of `kind` in `generation`.
pub fn is_known(kind: NodeKind, generation: Generation, name: &str) -> bool {
    lookup(kind, generation).is_some_and(|e| e.properties.contains(&name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_an_entry_for_each_of_its_generations() {
        for kind in NodeKind::ALL {
            for generation in kind.generations() {
                assert!(
                    lookup(*kind, *generation).is_some(),
                    "no known properties for {} in {}",
                    kind,
                    generation
                );
            }
        }
    }

    #[test]
    fn no_entry_for_a_kind_outside_its_generation() {
        for entry in KNOWN_PROPERTIES {
            assert!(entry.kind.exists_in(entry.generation));
        }
    }

    #[test]
    fn version_property_is_known_at_root() {
        assert!(is_known(NodeKind::Document, Generation::Oas20, "swagger"));
        assert!(is_known(NodeKind::Document, Generation::Oas30, "openapi"));
        assert!(!is_known(NodeKind::Document, Generation::Oas30, "swagger"));
    }
}
