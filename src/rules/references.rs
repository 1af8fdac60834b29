//! `$ref` resolvability, reference kind, circularity and unknown-property rules.

use crate::catalog::RuleDescriptor;
use crate::engine::Reporter;
use crate::model::known::is_known;
use crate::model::*;
use crate::resolver::{Chain, Resolution, can_resolve, resolve, resolve_recursive};
use crate::visitor::Visitor;

pub(super) fn rules() -> Vec<RuleDescriptor> {
    vec![
        rule!("PI-001", "Unresolvable Path Item Reference", InvalidReference, BOTH, MANDATED, PathItemReference,
            "Path item reference '{ref}' cannot be resolved."),
        rule!("PAR-019", "Unresolvable Parameter Reference", InvalidReference, BOTH, MANDATED, ParameterReference,
            "Parameter reference '{ref}' cannot be resolved."),
        rule!("HEAD-005", "Unresolvable Header Reference", InvalidReference, OAS30, MANDATED, HeaderReference,
            "Header reference '{ref}' cannot be resolved."),
        rule!("RES-004", "Unresolvable Response Reference", InvalidReference, BOTH, MANDATED, ResponseReference,
            "Response reference '{ref}' cannot be resolved."),
        rule!("SCH-005", "Unresolvable Schema Reference", InvalidReference, BOTH, MANDATED, SchemaReference,
            "Schema reference '{ref}' cannot be resolved."),
        rule!("SS-015", "Unresolvable Security Scheme Reference", InvalidReference, OAS30, MANDATED, SecuritySchemeReference,
            "Security scheme reference '{ref}' cannot be resolved."),
        rule!("RB-002", "Unresolvable Request Body Reference", InvalidReference, OAS30, MANDATED, RequestBodyReference,
            "Request body reference '{ref}' cannot be resolved."),
        rule!("EX-002", "Unresolvable Example Reference", InvalidReference, OAS30, MANDATED, ExampleReference,
            "Example reference '{ref}' cannot be resolved."),
        rule!("LINK-003", "Unresolvable Link Reference", InvalidReference, OAS30, MANDATED, LinkReference,
            "Link reference '{ref}' cannot be resolved."),
        rule!("CB-001", "Unresolvable Callback Reference", InvalidReference, OAS30, MANDATED, CallbackReference,
            "Callback reference '{ref}' cannot be resolved."),
        rule!("REF-001", "Reference Kind Mismatch", InvalidReference, BOTH, MANDATED, ReferenceKindMismatch,
            "Reference '{ref}' points to a {actual}, not a {expected}."),
        rule!("REF-002", "Circular Reference", InvalidReference, BOTH, MANDATED, ReferenceCircular,
            "Reference '{ref}' is part of a circular chain."),
        rule!("UNKNOWN-001", "Unknown Property", UnknownProperty, BOTH, MANDATED, UnrecognizedProperty,
            "'{name}' is not a known property of {kind}."),
    ]
}

fn check_resolvable(reporter: &Reporter, node: AnyNode<'_>, kind: NodeKind) {
    if node.kind() != kind {
        return;
    }
    if let Some(pointer) = node.reference()
        && !can_resolve(pointer, node)
    {
        reporter.report(node, Some("$ref"), &[("ref", pointer)]);
    }
}

macro_rules! reference_rule {
    ($($name:ident => $kind:ident),* $(,)?) => {
        $(
            declare_rule!(both $name);

            impl Visitor for $name {
                fn visit_node(&mut self, node: AnyNode<'_>) {
                    check_resolvable(&self.reporter, node, NodeKind::$kind);
                }
            }
        )*
    };
}

reference_rule! {
    PathItemReference => PathItem,
    ParameterReference => Parameter,
    HeaderReference => Header,
    ResponseReference => Response,
    SchemaReference => Schema,
    SecuritySchemeReference => SecurityScheme,
    RequestBodyReference => RequestBody,
    ExampleReference => Example,
    LinkReference => Link,
    CallbackReference => Callback,
}

declare_rule!(both ReferenceKindMismatch);

impl Visitor for ReferenceKindMismatch {
    fn visit_node(&mut self, node: AnyNode<'_>) {
        let Some(pointer) = node.reference() else {
            return;
        };
        let Resolution::Found(target) = resolve(pointer, node) else {
            return;
        };
        let Some(target) = node.document().node(target) else {
            return;
        };
        if target.kind() != node.kind() {
            self.reporter.report(node, Some("$ref"), &[
                ("ref", pointer),
                ("expected", node.kind().name()),
                ("actual", target.kind().name()),
            ]);
        }
    }
}

declare_rule!(both ReferenceCircular);

impl Visitor for ReferenceCircular {
    fn visit_node(&mut self, node: AnyNode<'_>) {
        let Some(pointer) = node.reference() else {
            return;
        };
        if let Chain::Circular(_) = resolve_recursive(node) {
            self.reporter.report(node, Some("$ref"), &[("ref", pointer)]);
        }
    }
}

declare_rule!(both UnrecognizedProperty);

impl Visitor for UnrecognizedProperty {
    fn visit_node(&mut self, node: AnyNode<'_>) {
        if node.reference().is_some() {
            return;
        }
        let (kind, generation) = (node.kind(), node.generation());
        for name in node.get().extra_names() {
            if !is_known(kind, generation, name) {
                self.reporter
                    .report(node, Some(name), &[("name", name), ("kind", kind.name())]);
            }
        }
    }
}
