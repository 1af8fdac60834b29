//! The standard rule catalog.
//!
//! Each rule is a small visitor bound to a [`Reporter`]. Rules are grouped by
//! the node family they inspect; every family module contributes its
//! descriptors through a `rules()` function.

use std::collections::HashMap;

use crate::catalog::RuleDescriptor;
use crate::engine::Reporter;
use crate::enums::Generation;
use crate::model::*;
use crate::resolver::{Chain, resolve_recursive};

/// Declares a rule struct and its factory.
///
/// The leading surface keyword says which generation surfaces the rule
/// implements by hand: `both` (shared kinds only), `oas20` or `oas30`.
macro_rules! declare_rule {
    (@struct $name:ident { $($field:ident: $ty:ty),* }) => {
        pub(crate) struct $name {
            reporter: $crate::engine::Reporter,
            $($field: $ty,)*
        }

        impl $name {
            pub(crate) fn create(
                reporter: $crate::engine::Reporter,
            ) -> Box<dyn $crate::visitor::ValidationRule> {
                Box::new($name {
                    reporter,
                    $($field: Default::default(),)*
                })
            }
        }
    };
    (both $name:ident $({ $($field:ident: $ty:ty),* $(,)? })?) => {
        declare_rule!(@struct $name { $($($field: $ty),*)? });
        impl $crate::visitor::Oas20Visitor for $name {}
        impl $crate::visitor::Oas30Visitor for $name {}
    };
    (oas20 $name:ident $({ $($field:ident: $ty:ty),* $(,)? })?) => {
        declare_rule!(@struct $name { $($($field: $ty),*)? });
        impl $crate::visitor::Visitor for $name {}
        impl $crate::visitor::Oas30Visitor for $name {}
    };
    (oas30 $name:ident $({ $($field:ident: $ty:ty),* $(,)? })?) => {
        declare_rule!(@struct $name { $($($field: $ty),*)? });
        impl $crate::visitor::Visitor for $name {}
        impl $crate::visitor::Oas20Visitor for $name {}
    };
}

/// Builds a [`RuleDescriptor`].
macro_rules! rule {
    ($code:literal, $name:literal, $family:ident, $generations:ident, $mandated:ident, $ty:ident, $message:literal $(,)?) => {
        $crate::catalog::RuleDescriptor {
            code: $code,
            name: $name,
            family: $crate::enums::RuleFamily::$family,
            generations: $crate::rules::$generations,
            spec_mandated: $crate::rules::$mandated,
            message: $message,
            factory: $ty::create,
        }
    };
}

mod content;
mod document;
mod parameters;
mod paths;
mod references;
mod responses;
mod schemas;
mod security;
mod servers;

pub(crate) const BOTH: &[Generation] = Generation::ALL;
pub(crate) const OAS20: &[Generation] = &[Generation::Oas20];
pub(crate) const OAS30: &[Generation] = &[Generation::Oas30];

pub(crate) const MANDATED: bool = true;
pub(crate) const OPTIONAL: bool = false;

/// Every built-in rule, in catalog order.
pub(crate) fn standard_rules() -> Vec<RuleDescriptor> {
    let mut rules = Vec::new();
    rules.extend(document::rules());
    rules.extend(paths::rules());
    rules.extend(parameters::rules());
    rules.extend(responses::rules());
    rules.extend(schemas::rules());
    rules.extend(security::rules());
    rules.extend(servers::rules());
    rules.extend(content::rules());
    rules.extend(references::rules());
    rules
}

// ─── Predicate idioms ───────────────────────────────────────────────────────

/// Reports `property` as missing unless `present`.
fn require<T>(reporter: &Reporter, node: NodeRef<'_, T>, present: bool, property: &str) {
    if !present {
        reporter.report(node, Some(property), &[("property", property)]);
    }
}

/// Reports `value` unless it is one of `allowed`.
fn check_enum<T>(
    reporter: &Reporter,
    node: NodeRef<'_, T>,
    value: Option<&str>,
    allowed: &[&str],
    property: &str,
) {
    if let Some(value) = value
        && !allowed.contains(&value)
    {
        reporter.report(node, Some(property), &[
            ("property", property),
            ("value", value),
            ("allowed", allowed.join(", ").as_str()),
        ]);
    }
}

/// Reports `value` unless the engine's URL predicate accepts it.
fn check_url<T>(reporter: &Reporter, node: NodeRef<'_, T>, value: Option<&str>, property: &str) {
    if let Some(value) = value
        && !(reporter.formats().url)(value)
    {
        reporter.report(node, Some(property), &[("property", property), ("value", value)]);
    }
}

/// Reports `property` when both sides of an exclusive pair are set.
fn exclusive<T>(reporter: &Reporter, node: NodeRef<'_, T>, first: bool, second: bool, property: &str) {
    if first && second {
        reporter.report(node, Some(property), &[("property", property)]);
    }
}

/// First-occurrence bookkeeping for uniqueness rules.
///
/// On the first collision the original occurrence is reported, then every
/// later occurrence is reported once.
#[derive(Default)]
struct Occurrences {
    seen: HashMap<String, (NodeId, bool)>,
}

impl Occurrences {
    fn check(
        &mut self,
        reporter: &Reporter,
        doc: &Document,
        key: &str,
        node: NodeId,
        property: Option<&str>,
        args: &[(&str, &str)],
    ) {
        match self.seen.get_mut(key) {
            Some((original, reported)) => {
                if !*reported {
                    reporter.report_at(doc, *original, property, args);
                    *reported = true;
                }
                reporter.report_at(doc, node, property, args);
            }
            None => {
                self.seen.insert(key.to_string(), (node, false));
            }
        }
    }
}

// ─── Graph helpers ──────────────────────────────────────────────────────────

/// The node a possibly-referencing entry stands for.
fn dereference<T: NodeType>(doc: &Document, id: NodeId) -> Option<NodeRef<'_, T>> {
    match resolve_recursive(doc.any(id)?) {
        Chain::Resolved(target) => doc.view(target),
        _ => None,
    }
}

/// Parameter entries applying to an operation: path-level first, then its own.
fn operation_parameters(op: NodeRef<'_, Operation>) -> Vec<NodeId> {
    let mut ids = Vec::new();
    if let Some(item) = op.parent().and_then(|p| p.downcast::<PathItem>()) {
        ids.extend(item.get().parameters.iter().flatten().copied());
    }
    ids.extend(op.get().parameters.iter().flatten().copied());
    ids
}

/// The `paths` key of the path item enclosing `id`. `None` outside `paths`,
/// including path items under callbacks.
fn enclosing_path(doc: &Document, id: NodeId) -> Option<&str> {
    let mut current = id;
    for _ in 0..doc.len() {
        let node = doc.node(current)?;
        let parent = node.parent()?;
        if node.kind() == NodeKind::PathItem {
            let paths = doc.get::<Paths>(parent)?;
            return paths
                .items
                .iter()
                .find(|(_, item)| **item == current)
                .map(|(key, _)| key.as_str());
        }
        current = parent;
    }
    None
}

/// The singleton field of its parent that holds `node`.
fn field_name(node: AnyNode<'_>) -> Option<&'static str> {
    let parent = node.parent()?;
    parent
        .get()
        .data()
        .children()
        .into_iter()
        .find_map(|(name, slot)| match slot {
            Child::Node(id) if id == node.id() => Some(name),
            _ => None,
        })
}

/// The map field of its parent holding `node`, and the key it is held under.
fn entry_key<'a>(node: AnyNode<'a>) -> Option<(&'static str, &'a str)> {
    let parent = node.parent()?;
    parent
        .get()
        .data()
        .children()
        .into_iter()
        .find_map(|(name, slot)| match slot {
            Child::Map(map) => map
                .iter()
                .find(|(_, id)| **id == node.id())
                .map(|(key, _)| (name, key.as_str())),
            _ => None,
        })
}

/// Names of the security schemes the document declares.
fn declared_schemes(doc: &Document) -> Vec<(&str, NodeId)> {
    let root = doc.root_node();
    let entries = match doc.generation() {
        Generation::Oas20 => root
            .security_definitions
            .and_then(|id| doc.get::<SecurityDefinitions>(id))
            .map(|defs| &defs.items),
        Generation::Oas30 => root
            .components
            .and_then(|id| doc.get::<Components>(id))
            .and_then(|c| c.security_schemes.as_ref()),
    };
    entries
        .into_iter()
        .flatten()
        .map(|(name, id)| (name.as_str(), *id))
        .collect()
}
