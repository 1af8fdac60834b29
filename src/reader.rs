//! Builds a [`Document`] from an already-parsed JSON value.
//!
//! Declared properties land in typed fields, `x-` keys on extensible kinds
//! become extensions, and everything else is kept in the node's extra bag
//! for the unknown-property rule to inspect. Properties of the other
//! generation are treated as unrecognized.
//!
//! Reading fails only on values that cannot be represented at all (an
//! array where an object is required, a number where a string is).

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::trace;

use crate::enums::Generation;
use crate::error::{ReadError, ReadErrorKind};
use crate::model::*;

type ReadFn = fn(&mut Reader, NodeId, &Value, &str) -> Result<NodeId, ReadError>;

/// Reads a document, detecting the generation from `swagger` or `openapi`.
pub fn read(value: &Value) -> Result<Document, ReadError> {
    let map = root_object(value)?;
    let generation = if map.contains_key("openapi") {
        Generation::Oas30
    } else if map.contains_key("swagger") {
        Generation::Oas20
    } else {
        return Err(ReadError {
            kind: ReadErrorKind::UnknownGeneration,
            path: "#".to_string(),
            message: "neither `swagger` nor `openapi` is present".to_string(),
        });
    };
    read_as(value, generation)
}

/// Reads a document as `generation`, whatever its version property says.
pub fn read_as(value: &Value, generation: Generation) -> Result<Document, ReadError> {
    let map = root_object(value)?;
    let mut reader = Reader {
        doc: Document::new(generation),
    };
    reader.root(map)?;
    Ok(reader.doc)
}

fn root_object(value: &Value) -> Result<&Map<String, Value>, ReadError> {
    value.as_object().ok_or_else(|| ReadError {
        kind: ReadErrorKind::NotAnObject,
        path: "#".to_string(),
        message: "document root must be an object".to_string(),
    })
}

// ─── Property access ────────────────────────────────────────────────────────

struct Fields<'v> {
    map: &'v Map<String, Value>,
    path: String,
    used: Vec<&'v str>,
}

impl<'v> Fields<'v> {
    fn take(&mut self, key: &'static str) -> Option<&'v Value> {
        let value = self.map.get(key)?;
        self.used.push(key);
        match value {
            Value::Null => None,
            v => Some(v),
        }
    }

    fn at(&self, key: &str) -> String {
        format!("{}/{}", self.path, key)
    }

    fn string(&mut self, key: &'static str) -> Result<Option<String>, ReadError> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(ReadError::type_mismatch(&self.at(key), "string")),
        }
    }

    /// Strings, plus numbers and booleans in their JSON rendering.
    fn scalar(&mut self, key: &'static str) -> Result<Option<String>, ReadError> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(Some(v.to_string())),
            Some(_) => Err(ReadError::type_mismatch(&self.at(key), "string")),
        }
    }

    fn boolean(&mut self, key: &'static str) -> Result<Option<bool>, ReadError> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(ReadError::type_mismatch(&self.at(key), "boolean")),
        }
    }

    fn value(&mut self, key: &'static str) -> Option<Value> {
        match self.map.get(key) {
            Some(v) => {
                self.used.push(key);
                Some(v.clone())
            }
            None => None,
        }
    }

    fn values(&mut self, key: &'static str) -> Result<Option<Vec<Value>>, ReadError> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items.clone())),
            Some(_) => Err(ReadError::type_mismatch(&self.at(key), "array")),
        }
    }

    fn strings(&mut self, key: &'static str) -> Result<Option<Vec<String>>, ReadError> {
        let Some(items) = self.values(key)? else {
            return Ok(None);
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s.clone()),
                _ => Err(ReadError::type_mismatch(
                    &format!("{}/{}", self.at(key), i),
                    "string",
                )),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    fn object(&mut self, key: &'static str) -> Result<Option<&'v Map<String, Value>>, ReadError> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(_) => Err(ReadError::type_mismatch(&self.at(key), "object")),
        }
    }

    fn string_map(
        &mut self,
        key: &'static str,
    ) -> Result<Option<IndexMap<String, String>>, ReadError> {
        let Some(map) = self.object(key)? else {
            return Ok(None);
        };
        let mut out = IndexMap::new();
        for (name, value) in map {
            match value {
                Value::String(s) => {
                    out.insert(name.clone(), s.clone());
                }
                _ => {
                    return Err(ReadError::type_mismatch(
                        &format!("{}/{}", self.at(key), name),
                        "string",
                    ));
                }
            }
        }
        Ok(Some(out))
    }

    fn value_map(&mut self, key: &'static str) -> Result<Option<IndexMap<String, Value>>, ReadError> {
        Ok(self
            .object(key)?
            .map(|map| map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()))
    }

    /// Keys not yet consumed, in input order.
    fn remaining(&self) -> Vec<(&'v String, &'v Value)> {
        self.map
            .iter()
            .filter(|(k, _)| !self.used.contains(&k.as_str()))
            .collect()
    }
}

// ─── Reader ─────────────────────────────────────────────────────────────────

struct Reader {
    doc: Document,
}

impl Reader {
    fn v3(&self) -> bool {
        self.doc.generation() == Generation::Oas30
    }

    fn begin<'v, T>(
        &mut self,
        parent: NodeId,
        value: &'v Value,
        path: &str,
    ) -> Result<(NodeId, Fields<'v>), ReadError>
    where
        T: NodeType + Default + Into<NodeData>,
    {
        let map = value
            .as_object()
            .ok_or_else(|| ReadError::type_mismatch(path, "object"))?;
        let id = self
            .doc
            .create(parent, T::default())
            .map_err(|e| ReadError {
                kind: ReadErrorKind::TypeMismatch,
                path: path.to_string(),
                message: e.to_string(),
            })?;
        Ok((
            id,
            Fields {
                map,
                path: path.to_string(),
                used: Vec::new(),
            },
        ))
    }

    fn finish<T: NodeType>(&mut self, id: NodeId, node: T, f: Fields<'_>) -> Result<NodeId, ReadError> {
        if let Some(slot) = self.doc.get_mut::<T>(id) {
            *slot = node;
        }
        let extensible = T::KIND.is_extensible();
        let rest = f.remaining();
        if let Some(record) = self.doc.node_mut(id) {
            for (key, value) in rest {
                if extensible && key.starts_with("x-") {
                    record.add_extension(key.clone(), value.clone());
                } else {
                    trace!(path = %f.path, property = %key, "unrecognized property kept as extra");
                    record.add_extra(key.clone(), value.clone());
                }
            }
        }
        Ok(id)
    }

    fn child(
        &mut self,
        f: &mut Fields<'_>,
        key: &'static str,
        parent: NodeId,
        read: ReadFn,
    ) -> Result<Option<NodeId>, ReadError> {
        match f.take(key) {
            None => Ok(None),
            Some(value) => read(self, parent, value, &f.at(key)).map(Some),
        }
    }

    fn list(
        &mut self,
        f: &mut Fields<'_>,
        key: &'static str,
        parent: NodeId,
        read: ReadFn,
    ) -> Result<Option<Vec<NodeId>>, ReadError> {
        let base = f.at(key);
        match f.take(key) {
            None => Ok(None),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| read(self, parent, item, &format!("{}/{}", base, i)))
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            Some(_) => Err(ReadError::type_mismatch(&base, "array")),
        }
    }

    fn map(
        &mut self,
        f: &mut Fields<'_>,
        key: &'static str,
        parent: NodeId,
        read: ReadFn,
    ) -> Result<Option<NodeMap>, ReadError> {
        let base = f.at(key);
        let Some(object) = f.object(key)? else {
            return Ok(None);
        };
        let mut out = NodeMap::new();
        for (name, value) in object {
            let id = read(self, parent, value, &format!("{}/{}", base, name))?;
            out.insert(name.clone(), id);
        }
        Ok(Some(out))
    }

    /// Reads every unconsumed key as an entry of an indexed collection.
    fn entries(
        &mut self,
        f: &mut Fields<'_>,
        parent: NodeId,
        skip_extensions: bool,
        read: ReadFn,
    ) -> Result<NodeMap, ReadError> {
        let mut out = NodeMap::new();
        for (name, value) in f.remaining() {
            if skip_extensions && name.starts_with("x-") {
                continue;
            }
            let id = read(self, parent, value, &f.at(name))?;
            out.insert(name.clone(), id);
            f.used.push(name.as_str());
        }
        Ok(out)
    }

    // ─── Root ───────────────────────────────────────────────────────────

    fn root(&mut self, map: &Map<String, Value>) -> Result<(), ReadError> {
        let id = self.doc.root();
        let v3 = self.v3();
        let mut f = Fields {
            map,
            path: "#".to_string(),
            used: Vec::new(),
        };
        let version_key = self.doc.generation().version_property();
        let root = DocumentRoot {
            version: f.scalar(version_key)?,
            info: self.child(&mut f, "info", id, Self::info)?,
            host: if v3 { None } else { f.string("host")? },
            base_path: if v3 { None } else { f.string("basePath")? },
            schemes: if v3 { None } else { f.strings("schemes")? },
            consumes: if v3 { None } else { f.strings("consumes")? },
            produces: if v3 { None } else { f.strings("produces")? },
            servers: if v3 { self.list(&mut f, "servers", id, Self::server)? } else { None },
            paths: self.child(&mut f, "paths", id, Self::paths)?,
            definitions: if v3 { None } else { self.child(&mut f, "definitions", id, Self::definitions)? },
            parameters: if v3 { None } else { self.child(&mut f, "parameters", id, Self::parameters_definitions)? },
            responses: if v3 { None } else { self.child(&mut f, "responses", id, Self::responses_definitions)? },
            security_definitions: if v3 {
                None
            } else {
                self.child(&mut f, "securityDefinitions", id, Self::security_definitions)?
            },
            components: if v3 { self.child(&mut f, "components", id, Self::components)? } else { None },
            security: self.list(&mut f, "security", id, Self::security_requirement)?,
            tags: self.list(&mut f, "tags", id, Self::tag)?,
            external_docs: self.child(&mut f, "externalDocs", id, Self::external_docs)?,
        };
        self.finish(id, root, f)?;
        Ok(())
    }

    // ─── Info ───────────────────────────────────────────────────────────

    fn info(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<Info>(parent, value, path)?;
        let node = Info {
            title: f.string("title")?,
            description: f.string("description")?,
            terms_of_service: f.string("termsOfService")?,
            contact: self.child(&mut f, "contact", id, Self::contact)?,
            license: self.child(&mut f, "license", id, Self::license)?,
            version: f.scalar("version")?,
        };
        self.finish(id, node, f)
    }

    fn contact(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<Contact>(parent, value, path)?;
        let node = Contact {
            name: f.string("name")?,
            url: f.string("url")?,
            email: f.string("email")?,
        };
        self.finish(id, node, f)
    }

    fn license(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<License>(parent, value, path)?;
        let node = License {
            name: f.string("name")?,
            url: f.string("url")?,
        };
        self.finish(id, node, f)
    }

    // ─── Paths ──────────────────────────────────────────────────────────

    fn paths(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<Paths>(parent, value, path)?;
        let items = self.entries(&mut f, id, true, Self::path_item)?;
        self.finish(id, Paths { items }, f)
    }

    fn path_item(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<PathItem>(parent, value, path)?;
        let v3 = self.v3();
        let node = PathItem {
            reference: f.string("$ref")?,
            summary: if v3 { f.string("summary")? } else { None },
            description: if v3 { f.string("description")? } else { None },
            get: self.child(&mut f, "get", id, Self::operation)?,
            put: self.child(&mut f, "put", id, Self::operation)?,
            post: self.child(&mut f, "post", id, Self::operation)?,
            delete: self.child(&mut f, "delete", id, Self::operation)?,
            options: self.child(&mut f, "options", id, Self::operation)?,
            head: self.child(&mut f, "head", id, Self::operation)?,
            patch: self.child(&mut f, "patch", id, Self::operation)?,
            trace: if v3 { self.child(&mut f, "trace", id, Self::operation)? } else { None },
            servers: if v3 { self.list(&mut f, "servers", id, Self::server)? } else { None },
            parameters: self.list(&mut f, "parameters", id, Self::parameter)?,
        };
        self.finish(id, node, f)
    }

    fn operation(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<Operation>(parent, value, path)?;
        let v3 = self.v3();
        let node = Operation {
            tags: f.strings("tags")?,
            summary: f.string("summary")?,
            description: f.string("description")?,
            external_docs: self.child(&mut f, "externalDocs", id, Self::external_docs)?,
            operation_id: f.string("operationId")?,
            consumes: if v3 { None } else { f.strings("consumes")? },
            produces: if v3 { None } else { f.strings("produces")? },
            parameters: self.list(&mut f, "parameters", id, Self::parameter)?,
            request_body: if v3 { self.child(&mut f, "requestBody", id, Self::request_body)? } else { None },
            responses: self.child(&mut f, "responses", id, Self::responses)?,
            callbacks: if v3 { self.map(&mut f, "callbacks", id, Self::callback)? } else { None },
            deprecated: f.boolean("deprecated")?,
            schemes: if v3 { None } else { f.strings("schemes")? },
            security: self.list(&mut f, "security", id, Self::security_requirement)?,
            servers: if v3 { self.list(&mut f, "servers", id, Self::server)? } else { None },
        };
        self.finish(id, node, f)
    }

    // ─── Parameters, items, headers ─────────────────────────────────────

    fn parameter(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<Parameter>(parent, value, path)?;
        let v3 = self.v3();
        let node = Parameter {
            reference: f.string("$ref")?,
            name: f.string("name")?,
            location: f.string("in")?,
            description: f.string("description")?,
            required: f.boolean("required")?,
            deprecated: if v3 { f.boolean("deprecated")? } else { None },
            allow_empty_value: f.boolean("allowEmptyValue")?,
            style: if v3 { f.string("style")? } else { None },
            explode: if v3 { f.boolean("explode")? } else { None },
            allow_reserved: if v3 { f.boolean("allowReserved")? } else { None },
            schema: self.child(&mut f, "schema", id, Self::schema)?,
            example: if v3 { f.value("example") } else { None },
            examples: if v3 { self.map(&mut f, "examples", id, Self::example)? } else { None },
            content: if v3 { self.map(&mut f, "content", id, Self::media_type)? } else { None },
            type_name: if v3 { None } else { f.string("type")? },
            format: if v3 { None } else { f.string("format")? },
            items: if v3 { None } else { self.child(&mut f, "items", id, Self::items)? },
            collection_format: if v3 { None } else { f.string("collectionFormat")? },
            default: if v3 { None } else { f.value("default") },
            enum_values: if v3 { None } else { f.values("enum")? },
        };
        self.finish(id, node, f)
    }

    fn items(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<Items>(parent, value, path)?;
        let node = Items {
            type_name: f.string("type")?,
            format: f.string("format")?,
            items: self.child(&mut f, "items", id, Self::items)?,
            collection_format: f.string("collectionFormat")?,
            default: f.value("default"),
            enum_values: f.values("enum")?,
        };
        self.finish(id, node, f)
    }

    fn header(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<Header>(parent, value, path)?;
        let v3 = self.v3();
        let node = Header {
            reference: if v3 { f.string("$ref")? } else { None },
            description: f.string("description")?,
            type_name: if v3 { None } else { f.string("type")? },
            format: if v3 { None } else { f.string("format")? },
            items: if v3 { None } else { self.child(&mut f, "items", id, Self::items)? },
            collection_format: if v3 { None } else { f.string("collectionFormat")? },
            default: if v3 { None } else { f.value("default") },
            enum_values: if v3 { None } else { f.values("enum")? },
            required: if v3 { f.boolean("required")? } else { None },
            deprecated: if v3 { f.boolean("deprecated")? } else { None },
            style: if v3 { f.string("style")? } else { None },
            explode: if v3 { f.boolean("explode")? } else { None },
            schema: if v3 { self.child(&mut f, "schema", id, Self::schema)? } else { None },
            example: if v3 { f.value("example") } else { None },
            examples: if v3 { self.map(&mut f, "examples", id, Self::example)? } else { None },
            content: if v3 { self.map(&mut f, "content", id, Self::media_type)? } else { None },
        };
        self.finish(id, node, f)
    }

    // ─── Responses ──────────────────────────────────────────────────────

    fn responses(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<Responses>(parent, value, path)?;
        let default = self.child(&mut f, "default", id, Self::response)?;
        let items = self.entries(&mut f, id, true, Self::response)?;
        self.finish(id, Responses { default, items }, f)
    }

    fn response(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<Response>(parent, value, path)?;
        let v3 = self.v3();
        let node = Response {
            reference: f.string("$ref")?,
            description: f.string("description")?,
            schema: if v3 { None } else { self.child(&mut f, "schema", id, Self::schema)? },
            headers: self.map(&mut f, "headers", id, Self::header)?,
            examples: if v3 { None } else { f.value("examples") },
            content: if v3 { self.map(&mut f, "content", id, Self::media_type)? } else { None },
            links: if v3 { self.map(&mut f, "links", id, Self::link)? } else { None },
        };
        self.finish(id, node, f)
    }

    // ─── Schemas ────────────────────────────────────────────────────────

    fn schema(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<Schema>(parent, value, path)?;
        let v3 = self.v3();
        let additional_properties = match f.take("additionalProperties") {
            None => None,
            Some(Value::Bool(b)) => Some(AdditionalProperties::Allowed(*b)),
            Some(v @ Value::Object(_)) => Some(AdditionalProperties::Schema(self.schema(
                id,
                v,
                &f.at("additionalProperties"),
            )?)),
            Some(_) => {
                return Err(ReadError::type_mismatch(
                    &f.at("additionalProperties"),
                    "boolean or object",
                ));
            }
        };
        let (discriminator_property, discriminator) = if v3 {
            (None, self.child(&mut f, "discriminator", id, Self::discriminator)?)
        } else {
            (f.string("discriminator")?, None)
        };
        let node = Schema {
            reference: f.string("$ref")?,
            format: f.string("format")?,
            title: f.string("title")?,
            description: f.string("description")?,
            default: f.value("default"),
            type_name: f.string("type")?,
            required: f.strings("required")?,
            enum_values: f.values("enum")?,
            properties: self.map(&mut f, "properties", id, Self::schema)?,
            additional_properties,
            items: self.child(&mut f, "items", id, Self::schema)?,
            all_of: self.list(&mut f, "allOf", id, Self::schema)?,
            any_of: if v3 { self.list(&mut f, "anyOf", id, Self::schema)? } else { None },
            one_of: if v3 { self.list(&mut f, "oneOf", id, Self::schema)? } else { None },
            not: if v3 { self.child(&mut f, "not", id, Self::schema)? } else { None },
            discriminator_property,
            discriminator,
            read_only: f.boolean("readOnly")?,
            write_only: if v3 { f.boolean("writeOnly")? } else { None },
            nullable: if v3 { f.boolean("nullable")? } else { None },
            deprecated: if v3 { f.boolean("deprecated")? } else { None },
            xml: self.child(&mut f, "xml", id, Self::xml)?,
            external_docs: self.child(&mut f, "externalDocs", id, Self::external_docs)?,
            example: f.value("example"),
        };
        self.finish(id, node, f)
    }

    fn xml(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<Xml>(parent, value, path)?;
        let node = Xml {
            name: f.string("name")?,
            namespace: f.string("namespace")?,
            prefix: f.string("prefix")?,
            attribute: f.boolean("attribute")?,
            wrapped: f.boolean("wrapped")?,
        };
        self.finish(id, node, f)
    }

    fn discriminator(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<Discriminator>(parent, value, path)?;
        let node = Discriminator {
            property_name: f.string("propertyName")?,
            mapping: f.string_map("mapping")?,
        };
        self.finish(id, node, f)
    }

    // ─── Tags, external docs ────────────────────────────────────────────

    fn tag(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<Tag>(parent, value, path)?;
        let node = Tag {
            name: f.string("name")?,
            description: f.string("description")?,
            external_docs: self.child(&mut f, "externalDocs", id, Self::external_docs)?,
        };
        self.finish(id, node, f)
    }

    fn external_docs(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<ExternalDocumentation>(parent, value, path)?;
        let node = ExternalDocumentation {
            description: f.string("description")?,
            url: f.string("url")?,
        };
        self.finish(id, node, f)
    }

    // ─── Security ───────────────────────────────────────────────────────

    fn security_requirement(
        &mut self,
        parent: NodeId,
        value: &Value,
        path: &str,
    ) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<SecurityRequirement>(parent, value, path)?;
        let mut requirements = IndexMap::new();
        for (name, scopes) in f.remaining() {
            let scopes = match scopes {
                Value::Array(items) => items
                    .iter()
                    .map(|s| s.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>(),
                _ => None,
            }
            .ok_or_else(|| ReadError::type_mismatch(&f.at(name), "array of strings"))?;
            requirements.insert(name.clone(), scopes);
            f.used.push(name.as_str());
        }
        self.finish(id, SecurityRequirement { requirements }, f)
    }

    fn security_scheme(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<SecurityScheme>(parent, value, path)?;
        let v3 = self.v3();
        let node = SecurityScheme {
            reference: if v3 { f.string("$ref")? } else { None },
            type_name: f.string("type")?,
            description: f.string("description")?,
            name: f.string("name")?,
            location: f.string("in")?,
            flow: if v3 { None } else { f.string("flow")? },
            authorization_url: if v3 { None } else { f.string("authorizationUrl")? },
            token_url: if v3 { None } else { f.string("tokenUrl")? },
            scopes: if v3 { None } else { f.string_map("scopes")? },
            scheme: if v3 { f.string("scheme")? } else { None },
            bearer_format: if v3 { f.string("bearerFormat")? } else { None },
            flows: if v3 { self.child(&mut f, "flows", id, Self::oauth_flows)? } else { None },
            open_id_connect_url: if v3 { f.string("openIdConnectUrl")? } else { None },
        };
        self.finish(id, node, f)
    }

    fn oauth_flows(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<OAuthFlows>(parent, value, path)?;
        let node = OAuthFlows {
            implicit: self.child(&mut f, "implicit", id, Self::oauth_flow)?,
            password: self.child(&mut f, "password", id, Self::oauth_flow)?,
            client_credentials: self.child(&mut f, "clientCredentials", id, Self::oauth_flow)?,
            authorization_code: self.child(&mut f, "authorizationCode", id, Self::oauth_flow)?,
        };
        self.finish(id, node, f)
    }

    fn oauth_flow(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<OAuthFlow>(parent, value, path)?;
        let node = OAuthFlow {
            authorization_url: f.string("authorizationUrl")?,
            token_url: f.string("tokenUrl")?,
            refresh_url: f.string("refreshUrl")?,
            scopes: f.string_map("scopes")?,
        };
        self.finish(id, node, f)
    }

    // ─── 2.0 definition collections ─────────────────────────────────────

    fn definitions(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<Definitions>(parent, value, path)?;
        let items = self.entries(&mut f, id, false, Self::schema)?;
        self.finish(id, Definitions { items }, f)
    }

    fn parameters_definitions(
        &mut self,
        parent: NodeId,
        value: &Value,
        path: &str,
    ) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<ParametersDefinitions>(parent, value, path)?;
        let items = self.entries(&mut f, id, false, Self::parameter)?;
        self.finish(id, ParametersDefinitions { items }, f)
    }

    fn responses_definitions(
        &mut self,
        parent: NodeId,
        value: &Value,
        path: &str,
    ) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<ResponsesDefinitions>(parent, value, path)?;
        let items = self.entries(&mut f, id, false, Self::response)?;
        self.finish(id, ResponsesDefinitions { items }, f)
    }

    fn security_definitions(
        &mut self,
        parent: NodeId,
        value: &Value,
        path: &str,
    ) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<SecurityDefinitions>(parent, value, path)?;
        let items = self.entries(&mut f, id, false, Self::security_scheme)?;
        self.finish(id, SecurityDefinitions { items }, f)
    }

    // ─── 3.0 kinds ──────────────────────────────────────────────────────

    fn components(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<Components>(parent, value, path)?;
        let node = Components {
            schemas: self.map(&mut f, "schemas", id, Self::schema)?,
            responses: self.map(&mut f, "responses", id, Self::response)?,
            parameters: self.map(&mut f, "parameters", id, Self::parameter)?,
            examples: self.map(&mut f, "examples", id, Self::example)?,
            request_bodies: self.map(&mut f, "requestBodies", id, Self::request_body)?,
            headers: self.map(&mut f, "headers", id, Self::header)?,
            security_schemes: self.map(&mut f, "securitySchemes", id, Self::security_scheme)?,
            links: self.map(&mut f, "links", id, Self::link)?,
            callbacks: self.map(&mut f, "callbacks", id, Self::callback)?,
        };
        self.finish(id, node, f)
    }

    fn server(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<Server>(parent, value, path)?;
        let node = Server {
            url: f.string("url")?,
            description: f.string("description")?,
            variables: self.map(&mut f, "variables", id, Self::server_variable)?,
        };
        self.finish(id, node, f)
    }

    fn server_variable(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<ServerVariable>(parent, value, path)?;
        let node = ServerVariable {
            enum_values: f.strings("enum")?,
            default: f.scalar("default")?,
            description: f.string("description")?,
        };
        self.finish(id, node, f)
    }

    fn request_body(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<RequestBody>(parent, value, path)?;
        let node = RequestBody {
            reference: f.string("$ref")?,
            description: f.string("description")?,
            content: self.map(&mut f, "content", id, Self::media_type)?,
            required: f.boolean("required")?,
        };
        self.finish(id, node, f)
    }

    fn media_type(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<MediaType>(parent, value, path)?;
        let node = MediaType {
            schema: self.child(&mut f, "schema", id, Self::schema)?,
            example: f.value("example"),
            examples: self.map(&mut f, "examples", id, Self::example)?,
            encoding: self.map(&mut f, "encoding", id, Self::encoding)?,
        };
        self.finish(id, node, f)
    }

    fn encoding(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<Encoding>(parent, value, path)?;
        let node = Encoding {
            content_type: f.string("contentType")?,
            headers: self.map(&mut f, "headers", id, Self::header)?,
            style: f.string("style")?,
            explode: f.boolean("explode")?,
            allow_reserved: f.boolean("allowReserved")?,
        };
        self.finish(id, node, f)
    }

    fn example(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<Example>(parent, value, path)?;
        let node = Example {
            reference: f.string("$ref")?,
            summary: f.string("summary")?,
            description: f.string("description")?,
            value: f.value("value"),
            external_value: f.string("externalValue")?,
        };
        self.finish(id, node, f)
    }

    fn link(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<Link>(parent, value, path)?;
        let node = Link {
            reference: f.string("$ref")?,
            operation_ref: f.string("operationRef")?,
            operation_id: f.string("operationId")?,
            parameters: f.value_map("parameters")?,
            request_body: f.value("requestBody"),
            description: f.string("description")?,
            server: self.child(&mut f, "server", id, Self::server)?,
        };
        self.finish(id, node, f)
    }

    fn callback(&mut self, parent: NodeId, value: &Value, path: &str) -> Result<NodeId, ReadError> {
        let (id, mut f) = self.begin::<Callback>(parent, value, path)?;
        let reference = f.string("$ref")?;
        let items = self.entries(&mut f, id, true, Self::path_item)?;
        self.finish(id, Callback { reference, items }, f)
    }
}
