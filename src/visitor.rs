//! Visitor dispatch over the node graph.
//!
//! [`Visitor`] is the surface shared by both generations; [`Oas20Visitor`]
//! and [`Oas30Visitor`] add the kinds that exist in only one of them. Every
//! per-kind method defaults to [`Visitor::visit_node`], which itself does
//! nothing, so an implementation overrides only the kinds it inspects.
//!
//! A rule written against `Visitor` alone applies to both generations.
//! [`CompositeVisitor`] fuses any number of visitors into one traversal.

use crate::enums::Generation;
use crate::model::*;

/// Lists the kinds of the shared surface for a callback macro.
macro_rules! common_surface {
    ($callback:ident $(, $arg:tt)*) => {
        $callback! {
            [$($arg),*]
            Document(DocumentRoot) => visit_document,
            Info(Info) => visit_info,
            Contact(Contact) => visit_contact,
            License(License) => visit_license,
            Paths(Paths) => visit_paths,
            PathItem(PathItem) => visit_path_item,
            Operation(Operation) => visit_operation,
            Parameter(Parameter) => visit_parameter,
            Responses(Responses) => visit_responses,
            Response(Response) => visit_response,
            Header(Header) => visit_header,
            Schema(Schema) => visit_schema,
            Tag(Tag) => visit_tag,
            ExternalDocumentation(ExternalDocumentation) => visit_external_docs,
            SecurityRequirement(SecurityRequirement) => visit_security_requirement,
            SecurityScheme(SecurityScheme) => visit_security_scheme,
            Xml(Xml) => visit_xml,
        }
    };
}

macro_rules! oas20_surface {
    ($callback:ident $(, $arg:tt)*) => {
        $callback! {
            [$($arg),*]
            Items(Items) => visit_items,
            Definitions(Definitions) => visit_definitions,
            ParametersDefinitions(ParametersDefinitions) => visit_parameters_definitions,
            ResponsesDefinitions(ResponsesDefinitions) => visit_responses_definitions,
            SecurityDefinitions(SecurityDefinitions) => visit_security_definitions,
        }
    };
}

macro_rules! oas30_surface {
    ($callback:ident $(, $arg:tt)*) => {
        $callback! {
            [$($arg),*]
            Components(Components) => visit_components,
            Server(Server) => visit_server,
            ServerVariable(ServerVariable) => visit_server_variable,
            RequestBody(RequestBody) => visit_request_body,
            MediaType(MediaType) => visit_media_type,
            Encoding(Encoding) => visit_encoding,
            Example(Example) => visit_example,
            Link(Link) => visit_link,
            Callback(Callback) => visit_callback,
            Discriminator(Discriminator) => visit_discriminator,
            OAuthFlows(OAuthFlows) => visit_oauth_flows,
            OAuthFlow(OAuthFlow) => visit_oauth_flow,
        }
    };
}

macro_rules! default_methods {
    ([] $($kind:ident($ty:ident) => $method:ident),* $(,)?) => {
        $(
            fn $method(&mut self, node: NodeRef<'_, $ty>) {
                self.visit_node(node.erase());
            }
        )*
    };
}

macro_rules! forward_methods {
    ([] $($kind:ident($ty:ident) => $method:ident),* $(,)?) => {
        $(
            fn $method(&mut self, node: NodeRef<'_, $ty>) {
                for delegate in self.delegates.iter_mut() {
                    delegate.$method(node);
                }
            }
        )*
    };
}

macro_rules! dispatch_fn {
    ([$name:ident, $bound:ident] $($kind:ident($ty:ident) => $method:ident),* $(,)?) => {
        /// Invokes the method for `node`'s kind; `false` if this surface has none.
        fn $name<V: $bound + ?Sized>(node: AnyNode<'_>, visitor: &mut V) -> bool {
            let doc = node.document();
            let id = node.id();
            match node.get().data() {
                $(NodeData::$kind(n) => visitor.$method(NodeRef::new(doc, id, n)),)*
                _ => return false,
            }
            true
        }
    };
}

/// Methods for the node kinds present in both generations.
pub trait Visitor {
    /// Fallback for every kind the implementation does not override.
    fn visit_node(&mut self, node: AnyNode<'_>) {
        let _ = node;
    }

    common_surface!(default_methods);
}

/// The 2.0 surface: the shared kinds plus the 2.0-only ones.
pub trait Oas20Visitor: Visitor {
    oas20_surface!(default_methods);
}

/// The 3.0 surface: the shared kinds plus the 3.0-only ones.
pub trait Oas30Visitor: Visitor {
    oas30_surface!(default_methods);
}

/// A visitor usable on documents of either generation.
pub trait ValidationRule: Oas20Visitor + Oas30Visitor {}

impl<T: Oas20Visitor + Oas30Visitor> ValidationRule for T {}

common_surface!(dispatch_fn, dispatch_common, Visitor);
oas20_surface!(dispatch_fn, dispatch_oas20, Oas20Visitor);
oas30_surface!(dispatch_fn, dispatch_oas30, Oas30Visitor);

impl<'a> AnyNode<'a> {
    /// Double dispatch against the shared surface. Generation-specific kinds
    /// reach [`Visitor::visit_node`].
    pub fn accept<V: Visitor + ?Sized>(self, visitor: &mut V) {
        if !dispatch_common(self, visitor) {
            visitor.visit_node(self);
        }
    }

    /// Double dispatch against the 2.0 surface.
    pub fn accept20<V: Oas20Visitor + ?Sized>(self, visitor: &mut V) {
        if !dispatch_common(self, visitor) && !dispatch_oas20(self, visitor) {
            visitor.visit_node(self);
        }
    }

    /// Double dispatch against the 3.0 surface.
    pub fn accept30<V: Oas30Visitor + ?Sized>(self, visitor: &mut V) {
        if !dispatch_common(self, visitor) && !dispatch_oas30(self, visitor) {
            visitor.visit_node(self);
        }
    }

    /// Dispatch through the surface of the owning document's generation.
    pub fn accept_rule<V: ValidationRule + ?Sized>(self, visitor: &mut V) {
        match self.generation() {
            Generation::Oas20 => self.accept20(visitor),
            Generation::Oas30 => self.accept30(visitor),
        }
    }
}

/// Fans every visit out to its delegates, in insertion order.
pub struct CompositeVisitor<V: ?Sized> {
    delegates: Vec<Box<V>>,
}

impl<V: ?Sized> CompositeVisitor<V> {
    pub fn new() -> Self {
        CompositeVisitor {
            delegates: Vec::new(),
        }
    }

    pub fn push(&mut self, delegate: Box<V>) {
        self.delegates.push(delegate);
    }

    pub fn len(&self) -> usize {
        self.delegates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }

    pub fn into_delegates(self) -> Vec<Box<V>> {
        self.delegates
    }
}

impl<V: ?Sized> Default for CompositeVisitor<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ?Sized> From<Vec<Box<V>>> for CompositeVisitor<V> {
    fn from(delegates: Vec<Box<V>>) -> Self {
        CompositeVisitor { delegates }
    }
}

impl<V: Visitor + ?Sized> Visitor for CompositeVisitor<V> {
    fn visit_node(&mut self, node: AnyNode<'_>) {
        for delegate in self.delegates.iter_mut() {
            delegate.visit_node(node);
        }
    }

    common_surface!(forward_methods);
}

impl<V: Oas20Visitor + ?Sized> Oas20Visitor for CompositeVisitor<V> {
    oas20_surface!(forward_methods);
}

impl<V: Oas30Visitor + ?Sized> Oas30Visitor for CompositeVisitor<V> {
    oas30_surface!(forward_methods);
}

fn walk_from(doc: &Document, id: NodeId, f: &mut dyn FnMut(AnyNode<'_>)) {
    let Some(node) = doc.any(id) else {
        return;
    };
    f(node);
    for child in doc.children(id) {
        walk_from(doc, child, f);
    }
}

/// Depth-first pre-order walk from `from` over the 2.0 surface.
pub fn walk20<V: Oas20Visitor + ?Sized>(doc: &Document, from: NodeId, visitor: &mut V) {
    walk_from(doc, from, &mut |node| node.accept20(visitor));
}

/// Depth-first pre-order walk from `from` over the 3.0 surface.
pub fn walk30<V: Oas30Visitor + ?Sized>(doc: &Document, from: NodeId, visitor: &mut V) {
    walk_from(doc, from, &mut |node| node.accept30(visitor));
}

/// Walks the whole document with the surface of its generation.
pub fn traverse<V: ValidationRule + ?Sized>(doc: &Document, visitor: &mut V) {
    match doc.generation() {
        Generation::Oas20 => walk20(doc, doc.root(), visitor),
        Generation::Oas30 => walk30(doc, doc.root(), visitor),
    }
}
