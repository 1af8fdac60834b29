//! Closed enumerations used throughout the document model and rule catalog.
//!
//! Enum-valued document properties (parameter locations, schema types, ...)
//! are stored as plain strings on the nodes so that invalid values survive
//! reading and can be reported. The allowed-value tables live here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Specification generation of a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Generation {
    #[serde(rename = "2.0")]
    Oas20,
    #[serde(rename = "3.0")]
    Oas30,
}

impl Generation {
    /// Both generations, in release order.
    pub const ALL: &'static [Generation] = &[Generation::Oas20, Generation::Oas30];

    /// Root property carrying the specification version.
    pub fn version_property(self) -> &'static str {
        match self {
            Generation::Oas20 => "swagger",
            Generation::Oas30 => "openapi",
        }
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generation::Oas20 => write!(f, "2.0"),
            Generation::Oas30 => write!(f, "3.0"),
        }
    }
}

/// Reporting priority of a problem. `Ignore` suppresses reporting entirely.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Ignore,
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Ignore => "ignore",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        };
        f.write_str(s)
    }
}

/// The predicate idiom a rule implements. Used by tooling to group rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleFamily {
    RequiredProperty,
    InvalidPropertyValue,
    InvalidPropertyFormat,
    MutuallyExclusive,
    Uniqueness,
    InvalidReference,
    UnknownProperty,
    PathTemplate,
    BestPractice,
}

// ─── Allowed-value tables ───────────────────────────────────────────────────

pub const OAS20_PARAMETER_LOCATIONS: &[&str] = &["query", "header", "path", "formData", "body"];
pub const OAS30_PARAMETER_LOCATIONS: &[&str] = &["query", "header", "path", "cookie"];

pub fn parameter_locations(generation: Generation) -> &'static [&'static str] {
    match generation {
        Generation::Oas20 => OAS20_PARAMETER_LOCATIONS,
        Generation::Oas30 => OAS30_PARAMETER_LOCATIONS,
    }
}

/// `type` values for 2.0 non-body parameters.
pub const OAS20_PARAMETER_TYPES: &[&str] = &["string", "number", "integer", "boolean", "array", "file"];

/// `type` values for 2.0 items and headers.
pub const OAS20_ITEMS_TYPES: &[&str] = &["string", "number", "integer", "boolean", "array"];

pub const OAS20_SCHEMA_TYPES: &[&str] = &[
    "string", "number", "integer", "boolean", "array", "object", "file",
];
pub const OAS30_SCHEMA_TYPES: &[&str] =
    &["string", "number", "integer", "boolean", "array", "object"];

pub fn schema_types(generation: Generation) -> &'static [&'static str] {
    match generation {
        Generation::Oas20 => OAS20_SCHEMA_TYPES,
        Generation::Oas30 => OAS30_SCHEMA_TYPES,
    }
}

pub const COLLECTION_FORMATS: &[&str] = &["csv", "ssv", "tsv", "pipes", "multi"];

pub const TRANSFER_SCHEMES: &[&str] = &["http", "https", "ws", "wss"];

pub const OAS20_SECURITY_SCHEME_TYPES: &[&str] = &["basic", "apiKey", "oauth2"];
pub const OAS30_SECURITY_SCHEME_TYPES: &[&str] = &["apiKey", "http", "oauth2", "openIdConnect"];

pub fn security_scheme_types(generation: Generation) -> &'static [&'static str] {
    match generation {
        Generation::Oas20 => OAS20_SECURITY_SCHEME_TYPES,
        Generation::Oas30 => OAS30_SECURITY_SCHEME_TYPES,
    }
}

pub fn api_key_locations(generation: Generation) -> &'static [&'static str] {
    match generation {
        Generation::Oas20 => &["query", "header"],
        Generation::Oas30 => &["query", "header", "cookie"],
    }
}

pub const OAS20_OAUTH_FLOWS: &[&str] = &["implicit", "password", "application", "accessCode"];

/// Parameter styles (3.0) and the locations each one is defined for.
pub const PARAMETER_STYLES: &[(&str, &[&str])] = &[
    ("matrix", &["path"]),
    ("label", &["path"]),
    ("form", &["query", "cookie"]),
    ("simple", &["path", "header"]),
    ("spaceDelimited", &["query"]),
    ("pipeDelimited", &["query"]),
    ("deepObject", &["query"]),
];

pub const ENCODING_STYLES: &[&str] = &["form", "spaceDelimited", "pipeDelimited", "deepObject"];

pub const HTTP_METHODS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];
