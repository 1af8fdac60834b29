//! Request body, media type, encoding, example and link rules (3.0).

use std::collections::HashSet;

use super::{check_enum, entry_key, exclusive, require};
use crate::catalog::RuleDescriptor;
use crate::enums::ENCODING_STYLES;
use crate::model::*;
use crate::visitor::Oas30Visitor;

pub(super) fn rules() -> Vec<RuleDescriptor> {
    vec![
        rule!("RB-001", "Missing Request Body Content", RequiredProperty, OAS30, MANDATED, RequestBodyContentMissing,
            "The request body is missing `content`."),
        rule!("MT-001", "Media Type Example and Examples", MutuallyExclusive, OAS30, MANDATED, MediaTypeExampleExclusive,
            "The media type declares both `example` and `examples`."),
        rule!("MT-002", "Invalid Media Type Key", InvalidPropertyFormat, OAS30, MANDATED, MediaTypeKeyInvalid,
            "'{value}' is not a valid media type range."),
        rule!("ENC-001", "Invalid Encoding Content Type", InvalidPropertyFormat, OAS30, MANDATED, EncodingContentTypeInvalid,
            "Content type '{value}' is not a valid media type."),
        rule!("ENC-002", "Invalid Encoding Style", InvalidPropertyValue, OAS30, MANDATED, EncodingStyleInvalid,
            "Encoding style '{value}' is not one of: {allowed}."),
        rule!("EX-001", "Example Value and External Value", MutuallyExclusive, OAS30, MANDATED, ExampleValueExclusive,
            "The example declares both `value` and `externalValue`."),
        rule!("LINK-001", "Link Operation Reference and ID", MutuallyExclusive, OAS30, MANDATED, LinkOperationExclusive,
            "The link declares both `operationRef` and `operationId`."),
        rule!("LINK-002", "Missing Link Operation", RequiredProperty, OAS30, MANDATED, LinkOperationMissing,
            "The link must declare either `operationRef` or `operationId`."),
        rule!("LINK-004", "Unknown Link Operation", InvalidReference, OAS30, MANDATED, LinkOperationUnknown,
            "No operation has the operationId '{value}'."),
    ]
}

declare_rule!(oas30 RequestBodyContentMissing);

impl Oas30Visitor for RequestBodyContentMissing {
    fn visit_request_body(&mut self, node: NodeRef<'_, RequestBody>) {
        if node.reference.is_none() {
            require(&self.reporter, node, node.content.is_some(), "content");
        }
    }
}

declare_rule!(oas30 MediaTypeExampleExclusive);

impl Oas30Visitor for MediaTypeExampleExclusive {
    fn visit_media_type(&mut self, node: NodeRef<'_, MediaType>) {
        exclusive(&self.reporter, node, node.example.is_some(), node.examples.is_some(), "examples");
    }
}

declare_rule!(oas30 MediaTypeKeyInvalid);

impl Oas30Visitor for MediaTypeKeyInvalid {
    fn visit_media_type(&mut self, node: NodeRef<'_, MediaType>) {
        if let Some(("content", key)) = entry_key(node.erase())
            && !(self.reporter.formats().mime_type)(key)
        {
            self.reporter.report(node, None, &[("value", key)]);
        }
    }
}

declare_rule!(oas30 EncodingContentTypeInvalid);

impl Oas30Visitor for EncodingContentTypeInvalid {
    fn visit_encoding(&mut self, node: NodeRef<'_, Encoding>) {
        let Some(content_type) = node.get().content_type.as_deref() else {
            return;
        };
        for value in content_type.split(',').map(str::trim) {
            if !(self.reporter.formats().mime_type)(value) {
                self.reporter
                    .report(node, Some("contentType"), &[("value", value)]);
            }
        }
    }
}

declare_rule!(oas30 EncodingStyleInvalid);

impl Oas30Visitor for EncodingStyleInvalid {
    fn visit_encoding(&mut self, node: NodeRef<'_, Encoding>) {
        check_enum(&self.reporter, node, node.get().style.as_deref(), ENCODING_STYLES, "style");
    }
}

declare_rule!(oas30 ExampleValueExclusive);

impl Oas30Visitor for ExampleValueExclusive {
    fn visit_example(&mut self, node: NodeRef<'_, Example>) {
        if node.reference.is_none() {
            exclusive(
                &self.reporter,
                node,
                node.value.is_some(),
                node.external_value.is_some(),
                "externalValue",
            );
        }
    }
}

declare_rule!(oas30 LinkOperationExclusive);

impl Oas30Visitor for LinkOperationExclusive {
    fn visit_link(&mut self, node: NodeRef<'_, Link>) {
        if node.reference.is_none() {
            exclusive(
                &self.reporter,
                node,
                node.operation_ref.is_some(),
                node.operation_id.is_some(),
                "operationId",
            );
        }
    }
}

declare_rule!(oas30 LinkOperationMissing);

impl Oas30Visitor for LinkOperationMissing {
    fn visit_link(&mut self, node: NodeRef<'_, Link>) {
        if node.reference.is_none() && node.operation_ref.is_none() && node.operation_id.is_none() {
            self.reporter.report(node, None, &[]);
        }
    }
}

declare_rule!(oas30 LinkOperationUnknown { operation_ids: Option<HashSet<String>> });

impl Oas30Visitor for LinkOperationUnknown {
    fn visit_link(&mut self, node: NodeRef<'_, Link>) {
        if node.reference.is_some() {
            return;
        }
        let Some(target) = node.get().operation_id.as_deref() else {
            return;
        };
        let doc = node.document();
        let known = self.operation_ids.get_or_insert_with(|| {
            doc.reachable()
                .into_iter()
                .filter_map(|id| doc.get::<Operation>(id))
                .filter_map(|op| op.operation_id.clone())
                .collect()
        });
        if !known.contains(target) {
            self.reporter
                .report(node, Some("operationId"), &[("value", target)]);
        }
    }
}
