//! Responses, response and header rules.

use super::{check_enum, exclusive, require};
use crate::catalog::RuleDescriptor;
use crate::enums::{Generation, OAS20_ITEMS_TYPES};
use crate::formats::is_status_code;
use crate::model::*;
use crate::visitor::Visitor;

pub(super) fn rules() -> Vec<RuleDescriptor> {
    vec![
        rule!("RES-001", "Missing Response Description", RequiredProperty, BOTH, MANDATED, ResponseDescriptionMissing,
            "The response is missing a description."),
        rule!("RES-002", "Empty Responses", RequiredProperty, BOTH, MANDATED, ResponsesEmpty,
            "At least one response must be declared."),
        rule!("RES-003", "Invalid Status Code", InvalidPropertyValue, BOTH, MANDATED, StatusCodeInvalid,
            "'{code}' is not a valid response status code."),
        rule!("RES-005", "Missing Success Response", BestPractice, BOTH, OPTIONAL, SuccessResponseMissing,
            "No success (2xx) or default response is declared."),
        rule!("HEAD-001", "Missing Header Type", RequiredProperty, OAS20, MANDATED, HeaderTypeMissing,
            "The header is missing a type."),
        rule!("HEAD-002", "Missing Array Header Items", RequiredProperty, OAS20, MANDATED, HeaderItemsMissing,
            "Array header is missing `items`."),
        rule!("HEAD-003", "Invalid Header Type", InvalidPropertyValue, OAS20, MANDATED, HeaderTypeInvalid,
            "Header type '{value}' is not one of: {allowed}."),
        rule!("HEAD-004", "Header Example and Examples", MutuallyExclusive, OAS30, MANDATED, HeaderExampleExclusive,
            "The header declares both `example` and `examples`."),
        rule!("HEAD-006", "Header Schema and Content", MutuallyExclusive, OAS30, MANDATED, HeaderSchemaContentExclusive,
            "The header declares both a schema and content."),
    ]
}

// ─── Responses ──────────────────────────────────────────────────────────────

declare_rule!(both ResponseDescriptionMissing);

impl Visitor for ResponseDescriptionMissing {
    fn visit_response(&mut self, node: NodeRef<'_, Response>) {
        if node.reference.is_none() {
            require(&self.reporter, node, node.description.is_some(), "description");
        }
    }
}

declare_rule!(both ResponsesEmpty);

impl Visitor for ResponsesEmpty {
    fn visit_responses(&mut self, node: NodeRef<'_, Responses>) {
        if node.default.is_none() && node.items.is_empty() {
            self.reporter.report(node, None, &[]);
        }
    }
}

declare_rule!(both StatusCodeInvalid);

impl Visitor for StatusCodeInvalid {
    fn visit_responses(&mut self, node: NodeRef<'_, Responses>) {
        let ranges_allowed = node.generation() == Generation::Oas30;
        for (code, id) in &node.get().items {
            let valid = is_status_code(code) && (ranges_allowed || !code.ends_with("XX"));
            if !valid {
                self.reporter
                    .report_at(node.document(), *id, None, &[("code", code.as_str())]);
            }
        }
    }
}

declare_rule!(both SuccessResponseMissing);

impl Visitor for SuccessResponseMissing {
    fn visit_responses(&mut self, node: NodeRef<'_, Responses>) {
        let has_success = node.default.is_some() || node.items.keys().any(|code| code.starts_with('2'));
        if !has_success {
            self.reporter.report(node, None, &[]);
        }
    }
}

// ─── Headers ────────────────────────────────────────────────────────────────

declare_rule!(both HeaderTypeMissing);

impl Visitor for HeaderTypeMissing {
    fn visit_header(&mut self, node: NodeRef<'_, Header>) {
        require(&self.reporter, node, node.type_name.is_some(), "type");
    }
}

declare_rule!(both HeaderItemsMissing);

impl Visitor for HeaderItemsMissing {
    fn visit_header(&mut self, node: NodeRef<'_, Header>) {
        if node.type_name.as_deref() == Some("array") && node.items.is_none() {
            self.reporter.report(node, Some("items"), &[]);
        }
    }
}

declare_rule!(both HeaderTypeInvalid);

impl Visitor for HeaderTypeInvalid {
    fn visit_header(&mut self, node: NodeRef<'_, Header>) {
        check_enum(&self.reporter, node, node.get().type_name.as_deref(), OAS20_ITEMS_TYPES, "type");
    }
}

declare_rule!(both HeaderExampleExclusive);

impl Visitor for HeaderExampleExclusive {
    fn visit_header(&mut self, node: NodeRef<'_, Header>) {
        if node.reference.is_none() {
            exclusive(&self.reporter, node, node.example.is_some(), node.examples.is_some(), "examples");
        }
    }
}

declare_rule!(both HeaderSchemaContentExclusive);

impl Visitor for HeaderSchemaContentExclusive {
    fn visit_header(&mut self, node: NodeRef<'_, Header>) {
        if node.reference.is_none() {
            exclusive(&self.reporter, node, node.schema.is_some(), node.content.is_some(), "content");
        }
    }
}
