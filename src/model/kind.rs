use serde::Serialize;
use std::fmt;

use super::nodes::*;
use crate::enums::Generation;

const BOTH: &[Generation] = &[Generation::Oas20, Generation::Oas30];
const OAS20: &[Generation] = &[Generation::Oas20];
const OAS30: &[Generation] = &[Generation::Oas30];

/// Implemented by every typed node payload.
pub trait NodeType: Sized {
    const KIND: NodeKind;

    fn from_data(data: &NodeData) -> Option<&Self>;
    fn from_data_mut(data: &mut NodeData) -> Option<&mut Self>;
}

macro_rules! node_kinds {
    ($($kind:ident($ty:ident) in $gens:expr),* $(,)?) => {
        /// Closed set of node kinds.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub enum NodeKind {
            $($kind),*
        }

        impl NodeKind {
            pub const ALL: &'static [NodeKind] = &[$(NodeKind::$kind),*];

            /// Generations in which this kind exists.
            pub fn generations(self) -> &'static [Generation] {
                match self {
                    $(NodeKind::$kind => $gens),*
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $(NodeKind::$kind => stringify!($kind)),*
                }
            }
        }

        /// Payload of a node: one variant per kind.
        #[derive(Clone, Debug, PartialEq)]
        pub enum NodeData {
            $($kind($ty)),*
        }

        impl NodeData {
            pub fn kind(&self) -> NodeKind {
                match self {
                    $(NodeData::$kind(_) => NodeKind::$kind),*
                }
            }
        }

        $(
            impl NodeType for $ty {
                const KIND: NodeKind = NodeKind::$kind;

                fn from_data(data: &NodeData) -> Option<&Self> {
                    match data {
                        NodeData::$kind(node) => Some(node),
                        _ => None,
                    }
                }

                fn from_data_mut(data: &mut NodeData) -> Option<&mut Self> {
                    match data {
                        NodeData::$kind(node) => Some(node),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for NodeData {
                fn from(node: $ty) -> Self {
                    NodeData::$kind(node)
                }
            }
        )*
    };
}

node_kinds! {
    Document(DocumentRoot) in BOTH,
    Info(Info) in BOTH,
    Contact(Contact) in BOTH,
    License(License) in BOTH,
    Paths(Paths) in BOTH,
    PathItem(PathItem) in BOTH,
    Operation(Operation) in BOTH,
    Parameter(Parameter) in BOTH,
    Responses(Responses) in BOTH,
    Response(Response) in BOTH,
    Header(Header) in BOTH,
    Schema(Schema) in BOTH,
    Tag(Tag) in BOTH,
    ExternalDocumentation(ExternalDocumentation) in BOTH,
    SecurityRequirement(SecurityRequirement) in BOTH,
    SecurityScheme(SecurityScheme) in BOTH,
    Xml(Xml) in BOTH,
    Items(Items) in OAS20,
    Definitions(Definitions) in OAS20,
    ParametersDefinitions(ParametersDefinitions) in OAS20,
    ResponsesDefinitions(ResponsesDefinitions) in OAS20,
    SecurityDefinitions(SecurityDefinitions) in OAS20,
    Components(Components) in OAS30,
    Server(Server) in OAS30,
    ServerVariable(ServerVariable) in OAS30,
    RequestBody(RequestBody) in OAS30,
    MediaType(MediaType) in OAS30,
    Encoding(Encoding) in OAS30,
    Example(Example) in OAS30,
    Link(Link) in OAS30,
    Callback(Callback) in OAS30,
    Discriminator(Discriminator) in OAS30,
    OAuthFlows(OAuthFlows) in OAS30,
    OAuthFlow(OAuthFlow) in OAS30,
}

impl NodeKind {
    pub fn exists_in(self, generation: Generation) -> bool {
        self.generations().contains(&generation)
    }

    /// Whether nodes of this kind may carry `x-` extension properties.
    pub fn is_extensible(self) -> bool {
        !matches!(
            self,
            NodeKind::SecurityRequirement
                | NodeKind::Discriminator
                | NodeKind::Definitions
                | NodeKind::ParametersDefinitions
                | NodeKind::ResponsesDefinitions
                | NodeKind::SecurityDefinitions
        )
    }

    /// Whether this kind may be replaced by a `$ref` in `generation`.
    pub fn is_reference_capable(self, generation: Generation) -> bool {
        match self {
            NodeKind::PathItem | NodeKind::Parameter | NodeKind::Response | NodeKind::Schema => {
                true
            }
            NodeKind::Header
            | NodeKind::SecurityScheme
            | NodeKind::RequestBody
            | NodeKind::Example
            | NodeKind::Link
            | NodeKind::Callback => generation == Generation::Oas30,
            _ => false,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl NodeData {
    /// Structural children in walk order, excluding indexed entries.
    pub fn children(&self) -> Vec<(&'static str, Child<'_>)> {
        match self {
            NodeData::Document(n) => n.children(),
            NodeData::Info(n) => n.children(),
            NodeData::PathItem(n) => n.children(),
            NodeData::Operation(n) => n.children(),
            NodeData::Parameter(n) => n.children(),
            NodeData::Items(n) => n.children(),
            NodeData::Header(n) => n.children(),
            NodeData::Responses(n) => n.children(),
            NodeData::Response(n) => n.children(),
            NodeData::Schema(n) => n.children(),
            NodeData::Tag(n) => n.children(),
            NodeData::SecurityScheme(n) => n.children(),
            NodeData::OAuthFlows(n) => n.children(),
            NodeData::Components(n) => n.children(),
            NodeData::Server(n) => n.children(),
            NodeData::RequestBody(n) => n.children(),
            NodeData::MediaType(n) => n.children(),
            NodeData::Encoding(n) => n.children(),
            NodeData::Link(n) => n.children(),
            NodeData::Contact(_)
            | NodeData::License(_)
            | NodeData::Paths(_)
            | NodeData::ExternalDocumentation(_)
            | NodeData::SecurityRequirement(_)
            | NodeData::Xml(_)
            | NodeData::Definitions(_)
            | NodeData::ParametersDefinitions(_)
            | NodeData::ResponsesDefinitions(_)
            | NodeData::SecurityDefinitions(_)
            | NodeData::ServerVariable(_)
            | NodeData::Example(_)
            | NodeData::Callback(_)
            | NodeData::Discriminator(_)
            | NodeData::OAuthFlow(_) => Vec::new(),
        }
    }

    pub fn as_indexed(&self) -> Option<&dyn IndexedNode> {
        match self {
            NodeData::Paths(n) => Some(n),
            NodeData::Responses(n) => Some(n),
            NodeData::Callback(n) => Some(n),
            NodeData::Definitions(n) => Some(n),
            NodeData::ParametersDefinitions(n) => Some(n),
            NodeData::ResponsesDefinitions(n) => Some(n),
            NodeData::SecurityDefinitions(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_indexed_mut(&mut self) -> Option<&mut dyn IndexedNode> {
        match self {
            NodeData::Paths(n) => Some(n),
            NodeData::Responses(n) => Some(n),
            NodeData::Callback(n) => Some(n),
            NodeData::Definitions(n) => Some(n),
            NodeData::ParametersDefinitions(n) => Some(n),
            NodeData::ResponsesDefinitions(n) => Some(n),
            NodeData::SecurityDefinitions(n) => Some(n),
            _ => None,
        }
    }

    /// The `$ref` pointer carried by this node, if any.
    pub fn reference(&self) -> Option<&str> {
        match self {
            NodeData::PathItem(n) => n.reference.as_deref(),
            NodeData::Parameter(n) => n.reference.as_deref(),
            NodeData::Header(n) => n.reference.as_deref(),
            NodeData::Response(n) => n.reference.as_deref(),
            NodeData::Schema(n) => n.reference.as_deref(),
            NodeData::SecurityScheme(n) => n.reference.as_deref(),
            NodeData::RequestBody(n) => n.reference.as_deref(),
            NodeData::Example(n) => n.reference.as_deref(),
            NodeData::Link(n) => n.reference.as_deref(),
            NodeData::Callback(n) => n.reference.as_deref(),
            _ => None,
        }
    }

    /// The `description` property, for kinds that have one.
    pub fn description(&self) -> Option<&str> {
        match self {
            NodeData::Info(n) => n.description.as_deref(),
            NodeData::PathItem(n) => n.description.as_deref(),
            NodeData::Operation(n) => n.description.as_deref(),
            NodeData::Parameter(n) => n.description.as_deref(),
            NodeData::Header(n) => n.description.as_deref(),
            NodeData::Response(n) => n.description.as_deref(),
            NodeData::Schema(n) => n.description.as_deref(),
            NodeData::Tag(n) => n.description.as_deref(),
            NodeData::ExternalDocumentation(n) => n.description.as_deref(),
            NodeData::SecurityScheme(n) => n.description.as_deref(),
            NodeData::Server(n) => n.description.as_deref(),
            NodeData::ServerVariable(n) => n.description.as_deref(),
            NodeData::RequestBody(n) => n.description.as_deref(),
            NodeData::Example(n) => n.description.as_deref(),
            NodeData::Link(n) => n.description.as_deref(),
            _ => None,
        }
    }
}
