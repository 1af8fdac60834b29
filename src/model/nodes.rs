//! Typed node payloads, one struct per node kind.
//!
//! Structural children are stored as [`NodeId`]s into the owning
//! [`Document`](super::Document) arena. Every struct lists its children in a
//! fixed order through `children()`; that list drives traversal, pointer
//! resolution and path computation alike.

use indexmap::IndexMap;
use serde_json::Value;

use super::NodeId;

/// Ordered name → child map.
pub type NodeMap = IndexMap<String, NodeId>;

/// A structural child slot of a node.
#[derive(Clone, Copy, Debug)]
pub enum Child<'a> {
    Node(NodeId),
    Map(&'a NodeMap),
    List(&'a [NodeId]),
}

impl<'a> Child<'a> {
    /// Every node id held by this slot, in order.
    pub fn ids(self) -> Vec<NodeId> {
        match self {
            Child::Node(id) => vec![id],
            Child::Map(map) => map.values().copied().collect(),
            Child::List(list) => list.to_vec(),
        }
    }
}

/// Builder used by the `children()` implementations.
#[derive(Default)]
pub(crate) struct Children<'a>(Vec<(&'static str, Child<'a>)>);

impl<'a> Children<'a> {
    fn node(mut self, name: &'static str, id: Option<NodeId>) -> Self {
        if let Some(id) = id {
            self.0.push((name, Child::Node(id)));
        }
        self
    }

    fn map(mut self, name: &'static str, map: &'a Option<NodeMap>) -> Self {
        if let Some(map) = map {
            self.0.push((name, Child::Map(map)));
        }
        self
    }

    fn list(mut self, name: &'static str, list: &'a Option<Vec<NodeId>>) -> Self {
        if let Some(list) = list {
            self.0.push((name, Child::List(list.as_slice())));
        }
        self
    }

    fn done(self) -> Vec<(&'static str, Child<'a>)> {
        self.0
    }
}

/// Collections whose children are addressed by name rather than by field.
pub trait IndexedNode {
    fn entries(&self) -> &NodeMap;
    fn entries_mut(&mut self) -> &mut NodeMap;

    fn get(&self, name: &str) -> Option<NodeId> {
        self.entries().get(name).copied()
    }

    fn all(&self) -> Vec<NodeId> {
        self.entries().values().copied().collect()
    }

    fn names(&self) -> Vec<&str> {
        self.entries().keys().map(String::as_str).collect()
    }

    /// Adds or replaces an entry, returning the replaced child.
    fn add(&mut self, name: String, item: NodeId) -> Option<NodeId> {
        self.entries_mut().insert(name, item)
    }

    fn remove(&mut self, name: &str) -> Option<NodeId> {
        self.entries_mut().shift_remove(name)
    }
}

macro_rules! indexed {
    ($($ty:ident),* $(,)?) => {
        $(
            impl IndexedNode for $ty {
                fn entries(&self) -> &NodeMap {
                    &self.items
                }

                fn entries_mut(&mut self) -> &mut NodeMap {
                    &mut self.items
                }
            }
        )*
    };
}

indexed!(
    Paths,
    Responses,
    Callback,
    Definitions,
    ParametersDefinitions,
    ResponsesDefinitions,
    SecurityDefinitions,
);

// ─── Root ───────────────────────────────────────────────────────────────────

/// The top-level object of an API description.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocumentRoot {
    /// `swagger` (2.0) or `openapi` (3.0).
    pub version: Option<String>,
    pub info: Option<NodeId>,
    pub host: Option<String>,
    pub base_path: Option<String>,
    pub schemes: Option<Vec<String>>,
    pub consumes: Option<Vec<String>>,
    pub produces: Option<Vec<String>>,
    pub servers: Option<Vec<NodeId>>,
    pub paths: Option<NodeId>,
    pub definitions: Option<NodeId>,
    pub parameters: Option<NodeId>,
    pub responses: Option<NodeId>,
    pub security_definitions: Option<NodeId>,
    pub components: Option<NodeId>,
    pub security: Option<Vec<NodeId>>,
    pub tags: Option<Vec<NodeId>>,
    pub external_docs: Option<NodeId>,
}

impl DocumentRoot {
    pub(crate) fn children(&self) -> Vec<(&'static str, Child<'_>)> {
        Children::default()
            .node("info", self.info)
            .list("servers", &self.servers)
            .node("paths", self.paths)
            .node("definitions", self.definitions)
            .node("parameters", self.parameters)
            .node("responses", self.responses)
            .node("securityDefinitions", self.security_definitions)
            .node("components", self.components)
            .list("security", &self.security)
            .list("tags", &self.tags)
            .node("externalDocs", self.external_docs)
            .done()
    }
}

// ─── Info ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Info {
    pub title: Option<String>,
    pub description: Option<String>,
    pub terms_of_service: Option<String>,
    pub contact: Option<NodeId>,
    pub license: Option<NodeId>,
    pub version: Option<String>,
}

impl Info {
    pub(crate) fn children(&self) -> Vec<(&'static str, Child<'_>)> {
        Children::default()
            .node("contact", self.contact)
            .node("license", self.license)
            .done()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Contact {
    pub name: Option<String>,
    pub url: Option<String>,
    pub email: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct License {
    pub name: Option<String>,
    pub url: Option<String>,
}

// ─── Paths ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Paths {
    pub items: NodeMap,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathItem {
    pub reference: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub get: Option<NodeId>,
    pub put: Option<NodeId>,
    pub post: Option<NodeId>,
    pub delete: Option<NodeId>,
    pub options: Option<NodeId>,
    pub head: Option<NodeId>,
    pub patch: Option<NodeId>,
    pub trace: Option<NodeId>,
    pub servers: Option<Vec<NodeId>>,
    pub parameters: Option<Vec<NodeId>>,
}

impl PathItem {
    /// Declared operations keyed by lower-case HTTP method, in method order.
    pub fn operations(&self) -> Vec<(&'static str, NodeId)> {
        [
            ("get", self.get),
            ("put", self.put),
            ("post", self.post),
            ("delete", self.delete),
            ("options", self.options),
            ("head", self.head),
            ("patch", self.patch),
            ("trace", self.trace),
        ]
        .into_iter()
        .filter_map(|(method, id)| id.map(|id| (method, id)))
        .collect()
    }

    /// Mutable slot for the operation of `method`, if it is an HTTP method.
    pub fn operation_mut(&mut self, method: &str) -> Option<&mut Option<NodeId>> {
        match method {
            "get" => Some(&mut self.get),
            "put" => Some(&mut self.put),
            "post" => Some(&mut self.post),
            "delete" => Some(&mut self.delete),
            "options" => Some(&mut self.options),
            "head" => Some(&mut self.head),
            "patch" => Some(&mut self.patch),
            "trace" => Some(&mut self.trace),
            _ => None,
        }
    }

    pub(crate) fn children(&self) -> Vec<(&'static str, Child<'_>)> {
        Children::default()
            .node("get", self.get)
            .node("put", self.put)
            .node("post", self.post)
            .node("delete", self.delete)
            .node("options", self.options)
            .node("head", self.head)
            .node("patch", self.patch)
            .node("trace", self.trace)
            .list("servers", &self.servers)
            .list("parameters", &self.parameters)
            .done()
    }
}

// ─── Operation ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Operation {
    pub tags: Option<Vec<String>>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub external_docs: Option<NodeId>,
    pub operation_id: Option<String>,
    pub consumes: Option<Vec<String>>,
    pub produces: Option<Vec<String>>,
    pub parameters: Option<Vec<NodeId>>,
    pub request_body: Option<NodeId>,
    pub responses: Option<NodeId>,
    pub callbacks: Option<NodeMap>,
    pub deprecated: Option<bool>,
    pub schemes: Option<Vec<String>>,
    pub security: Option<Vec<NodeId>>,
    pub servers: Option<Vec<NodeId>>,
}

impl Operation {
    pub(crate) fn children(&self) -> Vec<(&'static str, Child<'_>)> {
        Children::default()
            .node("externalDocs", self.external_docs)
            .list("parameters", &self.parameters)
            .node("requestBody", self.request_body)
            .node("responses", self.responses)
            .map("callbacks", &self.callbacks)
            .list("security", &self.security)
            .list("servers", &self.servers)
            .done()
    }
}

// ─── Parameter / Items / Header ─────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Parameter {
    pub reference: Option<String>,
    pub name: Option<String>,
    /// The `in` property.
    pub location: Option<String>,
    pub description: Option<String>,
    pub required: Option<bool>,
    pub deprecated: Option<bool>,
    pub allow_empty_value: Option<bool>,
    pub style: Option<String>,
    pub explode: Option<bool>,
    pub allow_reserved: Option<bool>,
    pub schema: Option<NodeId>,
    pub example: Option<Value>,
    pub examples: Option<NodeMap>,
    pub content: Option<NodeMap>,
    /// The 2.0 `type` property.
    pub type_name: Option<String>,
    pub format: Option<String>,
    pub items: Option<NodeId>,
    pub collection_format: Option<String>,
    pub default: Option<Value>,
    pub enum_values: Option<Vec<Value>>,
}

impl Parameter {
    pub(crate) fn children(&self) -> Vec<(&'static str, Child<'_>)> {
        Children::default()
            .node("schema", self.schema)
            .node("items", self.items)
            .map("examples", &self.examples)
            .map("content", &self.content)
            .done()
    }
}

/// 2.0 `items` object describing the elements of an array parameter or header.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Items {
    pub type_name: Option<String>,
    pub format: Option<String>,
    pub items: Option<NodeId>,
    pub collection_format: Option<String>,
    pub default: Option<Value>,
    pub enum_values: Option<Vec<Value>>,
}

impl Items {
    pub(crate) fn children(&self) -> Vec<(&'static str, Child<'_>)> {
        Children::default().node("items", self.items).done()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Header {
    pub reference: Option<String>,
    pub description: Option<String>,
    pub type_name: Option<String>,
    pub format: Option<String>,
    pub items: Option<NodeId>,
    pub collection_format: Option<String>,
    pub default: Option<Value>,
    pub enum_values: Option<Vec<Value>>,
    pub required: Option<bool>,
    pub deprecated: Option<bool>,
    pub style: Option<String>,
    pub explode: Option<bool>,
    pub schema: Option<NodeId>,
    pub example: Option<Value>,
    pub examples: Option<NodeMap>,
    pub content: Option<NodeMap>,
}

impl Header {
    pub(crate) fn children(&self) -> Vec<(&'static str, Child<'_>)> {
        Children::default()
            .node("items", self.items)
            .node("schema", self.schema)
            .map("examples", &self.examples)
            .map("content", &self.content)
            .done()
    }
}

// ─── Responses ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Responses {
    pub default: Option<NodeId>,
    /// Status-code keyed responses.
    pub items: NodeMap,
}

impl Responses {
    pub(crate) fn children(&self) -> Vec<(&'static str, Child<'_>)> {
        Children::default().node("default", self.default).done()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Response {
    pub reference: Option<String>,
    pub description: Option<String>,
    pub schema: Option<NodeId>,
    pub headers: Option<NodeMap>,
    /// 2.0 mime type → example map.
    pub examples: Option<Value>,
    pub content: Option<NodeMap>,
    pub links: Option<NodeMap>,
}

impl Response {
    pub(crate) fn children(&self) -> Vec<(&'static str, Child<'_>)> {
        Children::default()
            .node("schema", self.schema)
            .map("headers", &self.headers)
            .map("content", &self.content)
            .map("links", &self.links)
            .done()
    }
}

// ─── Schema ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(NodeId),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schema {
    pub reference: Option<String>,
    pub format: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub default: Option<Value>,
    pub type_name: Option<String>,
    pub required: Option<Vec<String>>,
    pub enum_values: Option<Vec<Value>>,
    pub properties: Option<NodeMap>,
    pub additional_properties: Option<AdditionalProperties>,
    pub items: Option<NodeId>,
    pub all_of: Option<Vec<NodeId>>,
    pub any_of: Option<Vec<NodeId>>,
    pub one_of: Option<Vec<NodeId>>,
    pub not: Option<NodeId>,
    /// 2.0 discriminator: the name of the discriminating property.
    pub discriminator_property: Option<String>,
    /// 3.0 discriminator object.
    pub discriminator: Option<NodeId>,
    pub read_only: Option<bool>,
    pub write_only: Option<bool>,
    pub nullable: Option<bool>,
    pub deprecated: Option<bool>,
    pub xml: Option<NodeId>,
    pub external_docs: Option<NodeId>,
    pub example: Option<Value>,
}

impl Schema {
    pub(crate) fn children(&self) -> Vec<(&'static str, Child<'_>)> {
        let additional = match self.additional_properties {
            Some(AdditionalProperties::Schema(id)) => Some(id),
            _ => None,
        };
        Children::default()
            .node("items", self.items)
            .list("allOf", &self.all_of)
            .list("anyOf", &self.any_of)
            .list("oneOf", &self.one_of)
            .node("not", self.not)
            .map("properties", &self.properties)
            .node("additionalProperties", additional)
            .node("discriminator", self.discriminator)
            .node("xml", self.xml)
            .node("externalDocs", self.external_docs)
            .done()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Xml {
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub prefix: Option<String>,
    pub attribute: Option<bool>,
    pub wrapped: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Discriminator {
    pub property_name: Option<String>,
    pub mapping: Option<IndexMap<String, String>>,
}

// ─── Tags / external docs ───────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tag {
    pub name: Option<String>,
    pub description: Option<String>,
    pub external_docs: Option<NodeId>,
}

impl Tag {
    pub(crate) fn children(&self) -> Vec<(&'static str, Child<'_>)> {
        Children::default()
            .node("externalDocs", self.external_docs)
            .done()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExternalDocumentation {
    pub description: Option<String>,
    pub url: Option<String>,
}

// ─── Security ───────────────────────────────────────────────────────────────

/// Scheme name → required scopes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SecurityRequirement {
    pub requirements: IndexMap<String, Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SecurityScheme {
    pub reference: Option<String>,
    pub type_name: Option<String>,
    pub description: Option<String>,
    pub name: Option<String>,
    /// The `in` property.
    pub location: Option<String>,
    pub flow: Option<String>,
    pub authorization_url: Option<String>,
    pub token_url: Option<String>,
    pub scopes: Option<IndexMap<String, String>>,
    pub scheme: Option<String>,
    pub bearer_format: Option<String>,
    pub flows: Option<NodeId>,
    pub open_id_connect_url: Option<String>,
}

impl SecurityScheme {
    pub(crate) fn children(&self) -> Vec<(&'static str, Child<'_>)> {
        Children::default().node("flows", self.flows).done()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OAuthFlows {
    pub implicit: Option<NodeId>,
    pub password: Option<NodeId>,
    pub client_credentials: Option<NodeId>,
    pub authorization_code: Option<NodeId>,
}

impl OAuthFlows {
    pub(crate) fn children(&self) -> Vec<(&'static str, Child<'_>)> {
        Children::default()
            .node("implicit", self.implicit)
            .node("password", self.password)
            .node("clientCredentials", self.client_credentials)
            .node("authorizationCode", self.authorization_code)
            .done()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OAuthFlow {
    pub authorization_url: Option<String>,
    pub token_url: Option<String>,
    pub refresh_url: Option<String>,
    pub scopes: Option<IndexMap<String, String>>,
}

// ─── 2.0 definition collections ─────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Definitions {
    pub items: NodeMap,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParametersDefinitions {
    pub items: NodeMap,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResponsesDefinitions {
    pub items: NodeMap,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SecurityDefinitions {
    pub items: NodeMap,
}

// ─── 3.0 components and friends ─────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Components {
    pub schemas: Option<NodeMap>,
    pub responses: Option<NodeMap>,
    pub parameters: Option<NodeMap>,
    pub examples: Option<NodeMap>,
    pub request_bodies: Option<NodeMap>,
    pub headers: Option<NodeMap>,
    pub security_schemes: Option<NodeMap>,
    pub links: Option<NodeMap>,
    pub callbacks: Option<NodeMap>,
}

impl Components {
    pub(crate) fn children(&self) -> Vec<(&'static str, Child<'_>)> {
        Children::default()
            .map("schemas", &self.schemas)
            .map("responses", &self.responses)
            .map("parameters", &self.parameters)
            .map("examples", &self.examples)
            .map("requestBodies", &self.request_bodies)
            .map("headers", &self.headers)
            .map("securitySchemes", &self.security_schemes)
            .map("links", &self.links)
            .map("callbacks", &self.callbacks)
            .done()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Server {
    pub url: Option<String>,
    pub description: Option<String>,
    pub variables: Option<NodeMap>,
}

impl Server {
    pub(crate) fn children(&self) -> Vec<(&'static str, Child<'_>)> {
        Children::default().map("variables", &self.variables).done()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServerVariable {
    pub enum_values: Option<Vec<String>>,
    pub default: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestBody {
    pub reference: Option<String>,
    pub description: Option<String>,
    pub content: Option<NodeMap>,
    pub required: Option<bool>,
}

impl RequestBody {
    pub(crate) fn children(&self) -> Vec<(&'static str, Child<'_>)> {
        Children::default().map("content", &self.content).done()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MediaType {
    pub schema: Option<NodeId>,
    pub example: Option<Value>,
    pub examples: Option<NodeMap>,
    pub encoding: Option<NodeMap>,
}

impl MediaType {
    pub(crate) fn children(&self) -> Vec<(&'static str, Child<'_>)> {
        Children::default()
            .node("schema", self.schema)
            .map("examples", &self.examples)
            .map("encoding", &self.encoding)
            .done()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Encoding {
    pub content_type: Option<String>,
    pub headers: Option<NodeMap>,
    pub style: Option<String>,
    pub explode: Option<bool>,
    pub allow_reserved: Option<bool>,
}

impl Encoding {
    pub(crate) fn children(&self) -> Vec<(&'static str, Child<'_>)> {
        Children::default().map("headers", &self.headers).done()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Example {
    pub reference: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub value: Option<Value>,
    pub external_value: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Link {
    pub reference: Option<String>,
    pub operation_ref: Option<String>,
    pub operation_id: Option<String>,
    pub parameters: Option<IndexMap<String, Value>>,
    pub request_body: Option<Value>,
    pub description: Option<String>,
    pub server: Option<NodeId>,
}

impl Link {
    pub(crate) fn children(&self) -> Vec<(&'static str, Child<'_>)> {
        Children::default().node("server", self.server).done()
    }
}

/// Runtime expression → path item.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Callback {
    pub reference: Option<String>,
    pub items: NodeMap,
}
