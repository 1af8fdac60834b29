//! Path template and operation rules.

use std::collections::HashSet;

use super::{Occurrences, dereference, field_name, operation_parameters, require};
use crate::catalog::RuleDescriptor;
use crate::formats::PathTemplate;
use crate::model::*;
use crate::visitor::Visitor;

const FORM_MEDIA_TYPES: &[&str] = &["application/x-www-form-urlencoded", "multipart/form-data"];

pub(super) fn rules() -> Vec<RuleDescriptor> {
    vec![
        rule!("PATH-001", "Missing Paths", RequiredProperty, BOTH, MANDATED, PathsMissing,
            "The document declares no paths."),
        rule!("PATH-002", "Malformed Path Template", PathTemplate, BOTH, MANDATED, PathTemplateMalformed,
            "Path '{path}' is not a well-formed path template."),
        rule!("PATH-003", "Empty Path Segment", PathTemplate, BOTH, MANDATED, PathSegmentEmpty,
            "Path '{path}' contains an empty segment."),
        rule!("PATH-004", "Repeated Path Parameter", PathTemplate, BOTH, MANDATED, PathParameterRepeated,
            "Path '{path}' uses the template parameter '{name}' more than once."),
        rule!("PATH-005", "Identical Path Templates", Uniqueness, BOTH, MANDATED, PathTemplatesIdentical,
            "Path '{path}' is identical to another path apart from parameter names."),
        rule!("PATH-006", "Undeclared Path Parameter", PathTemplate, BOTH, MANDATED, PathParameterUndeclared,
            "Template parameter '{name}' of path '{path}' is not declared as a path parameter."),
        rule!("OP-001", "Missing Operation Responses", RequiredProperty, BOTH, MANDATED, OperationResponsesMissing,
            "The operation is missing the required `responses` property."),
        rule!("OP-002", "Missing Operation ID", BestPractice, BOTH, OPTIONAL, OperationIdMissing,
            "The operation has no operationId."),
        rule!("OP-003", "Missing Operation Summary", BestPractice, BOTH, OPTIONAL, OperationSummaryMissing,
            "The operation has no summary."),
        rule!("OP-004", "Duplicate Operation ID", Uniqueness, BOTH, MANDATED, OperationIdDuplicate,
            "Operation ID '{value}' is used by more than one operation."),
        rule!("OP-005", "Undeclared Operation Tag", BestPractice, BOTH, OPTIONAL, OperationTagUndeclared,
            "Tag '{value}' is not declared at the document root."),
        rule!("OP-006", "Request Body Not Expected", BestPractice, OAS30, OPTIONAL, RequestBodyUnexpected,
            "A {method} operation should not declare a request body."),
        rule!("OP-007", "Form Parameters Without Form Consumes", InvalidPropertyValue, OAS20, MANDATED, FormDataConsumes,
            "Operations with formData parameters must consume application/x-www-form-urlencoded or multipart/form-data."),
    ]
}

/// Entries of `paths` whose keys are well-formed templates.
fn templates(paths: &Paths) -> Vec<(&str, NodeId, PathTemplate)> {
    paths
        .items
        .iter()
        .filter_map(|(key, id)| PathTemplate::parse(key).map(|t| (key.as_str(), *id, t)))
        .collect()
}

// ─── Paths ──────────────────────────────────────────────────────────────────

declare_rule!(both PathsMissing);

impl Visitor for PathsMissing {
    fn visit_document(&mut self, node: NodeRef<'_, DocumentRoot>) {
        let declared = node
            .paths
            .and_then(|id| node.view::<Paths>(id))
            .is_some_and(|paths| !paths.items.is_empty());
        require(&self.reporter, node, declared, "paths");
    }
}

declare_rule!(both PathTemplateMalformed);

impl Visitor for PathTemplateMalformed {
    fn visit_paths(&mut self, node: NodeRef<'_, Paths>) {
        for (key, id) in &node.get().items {
            if PathTemplate::parse(key).is_none() {
                self.reporter.report_at(node.document(), *id, None, &[("path", key.as_str())]);
            }
        }
    }
}

declare_rule!(both PathSegmentEmpty);

impl Visitor for PathSegmentEmpty {
    fn visit_paths(&mut self, node: NodeRef<'_, Paths>) {
        for (key, id, template) in templates(node.get()) {
            if template.has_empty_segment() {
                self.reporter.report_at(node.document(), id, None, &[("path", key)]);
            }
        }
    }
}

declare_rule!(both PathParameterRepeated);

impl Visitor for PathParameterRepeated {
    fn visit_paths(&mut self, node: NodeRef<'_, Paths>) {
        for (key, id, template) in templates(node.get()) {
            let mut seen = HashSet::new();
            let mut reported = HashSet::new();
            for name in &template.parameters {
                if !seen.insert(name) && reported.insert(name) {
                    self.reporter
                        .report_at(node.document(), id, None, &[("path", key), ("name", name.as_str())]);
                }
            }
        }
    }
}

declare_rule!(both PathTemplatesIdentical);

impl Visitor for PathTemplatesIdentical {
    fn visit_paths(&mut self, node: NodeRef<'_, Paths>) {
        let mut shapes = Occurrences::default();
        for (key, id, template) in templates(node.get()) {
            shapes.check(
                &self.reporter,
                node.document(),
                &template.normalized(),
                id,
                None,
                &[("path", key)],
            );
        }
    }
}

declare_rule!(both PathParameterUndeclared);

impl Visitor for PathParameterUndeclared {
    fn visit_paths(&mut self, node: NodeRef<'_, Paths>) {
        let doc = node.document();
        for (key, id, template) in templates(node.get()) {
            if template.parameters.is_empty() {
                continue;
            }
            let Some(item) = doc.view::<PathItem>(id) else {
                continue;
            };
            for (_, op_id) in item.operations() {
                let Some(op) = doc.view::<Operation>(op_id) else {
                    continue;
                };
                let entries = operation_parameters(op);
                let resolved: Vec<_> = entries
                    .iter()
                    .filter_map(|id| dereference::<Parameter>(doc, *id))
                    .collect();
                // Undeclared unless every entry could be followed.
                if resolved.len() != entries.len() {
                    continue;
                }
                let declared: HashSet<&str> = resolved
                    .iter()
                    .filter(|p| p.get().location.as_deref() == Some("path"))
                    .filter_map(|p| p.get().name.as_deref())
                    .collect();
                let mut reported = HashSet::new();
                for name in &template.parameters {
                    if !declared.contains(name.as_str()) && reported.insert(name) {
                        self.reporter.report(op, None, &[("path", key), ("name", name.as_str())]);
                    }
                }
            }
        }
    }
}

// ─── Operations ─────────────────────────────────────────────────────────────

declare_rule!(both OperationResponsesMissing);

impl Visitor for OperationResponsesMissing {
    fn visit_operation(&mut self, node: NodeRef<'_, Operation>) {
        require(&self.reporter, node, node.responses.is_some(), "responses");
    }
}

declare_rule!(both OperationIdMissing);

impl Visitor for OperationIdMissing {
    fn visit_operation(&mut self, node: NodeRef<'_, Operation>) {
        require(&self.reporter, node, node.operation_id.is_some(), "operationId");
    }
}

declare_rule!(both OperationSummaryMissing);

impl Visitor for OperationSummaryMissing {
    fn visit_operation(&mut self, node: NodeRef<'_, Operation>) {
        require(&self.reporter, node, node.summary.is_some(), "summary");
    }
}

declare_rule!(both OperationIdDuplicate { ids: Occurrences });

impl Visitor for OperationIdDuplicate {
    fn visit_operation(&mut self, node: NodeRef<'_, Operation>) {
        if let Some(id) = node.get().operation_id.as_deref() {
            self.ids.check(
                &self.reporter,
                node.document(),
                id,
                node.id(),
                Some("operationId"),
                &[("value", id)],
            );
        }
    }
}

declare_rule!(both OperationTagUndeclared);

impl Visitor for OperationTagUndeclared {
    fn visit_operation(&mut self, node: NodeRef<'_, Operation>) {
        let Some(tags) = node.get().tags.as_ref() else {
            return;
        };
        let doc = node.document();
        let declared: HashSet<&str> = doc
            .root_node()
            .tags
            .iter()
            .flatten()
            .filter_map(|id| doc.get::<Tag>(*id))
            .filter_map(|tag| tag.name.as_deref())
            .collect();
        for tag in tags {
            if !declared.contains(tag.as_str()) {
                self.reporter.report(node, Some("tags"), &[("value", tag.as_str())]);
            }
        }
    }
}

declare_rule!(both RequestBodyUnexpected);

impl Visitor for RequestBodyUnexpected {
    fn visit_operation(&mut self, node: NodeRef<'_, Operation>) {
        if node.request_body.is_none() {
            return;
        }
        if let Some(method) = field_name(node.erase())
            && matches!(method, "get" | "head" | "delete")
        {
            self.reporter.report(node, Some("requestBody"), &[("method", method.to_uppercase().as_str())]);
        }
    }
}

declare_rule!(both FormDataConsumes);

impl Visitor for FormDataConsumes {
    fn visit_operation(&mut self, node: NodeRef<'_, Operation>) {
        let doc = node.document();
        let has_form_data = operation_parameters(node)
            .into_iter()
            .filter_map(|id| dereference::<Parameter>(doc, id))
            .any(|p| p.get().location.as_deref() == Some("formData"));
        if !has_form_data {
            return;
        }
        let consumes = node
            .get()
            .consumes
            .as_ref()
            .or(doc.root_node().consumes.as_ref());
        let accepts_form = consumes.is_some_and(|types| {
            types.iter().any(|t| {
                FORM_MEDIA_TYPES
                    .iter()
                    .any(|form| t.split(';').next().is_some_and(|base| base.trim() == *form))
            })
        });
        if !accepts_form {
            self.reporter.report(node, Some("consumes"), &[]);
        }
    }
}
