//! Parameter and 2.0 items rules.

use std::collections::HashSet;

use super::{Occurrences, check_enum, dereference, enclosing_path, operation_parameters, require};
use crate::catalog::RuleDescriptor;
use crate::enums::{
    COLLECTION_FORMATS, Generation, OAS20_ITEMS_TYPES, OAS20_PARAMETER_TYPES, PARAMETER_STYLES,
    parameter_locations,
};
use crate::formats::PathTemplate;
use crate::model::*;
use crate::visitor::{Oas20Visitor, Visitor};

/// `multi` applies to whole parameters only.
const ITEMS_COLLECTION_FORMATS: &[&str] = &["csv", "ssv", "tsv", "pipes"];

pub(super) fn rules() -> Vec<RuleDescriptor> {
    vec![
        rule!("PAR-001", "Missing Parameter Name", RequiredProperty, BOTH, MANDATED, ParameterNameMissing,
            "The parameter is missing a name."),
        rule!("PAR-002", "Missing Parameter Location", RequiredProperty, BOTH, MANDATED, ParameterLocationMissing,
            "The parameter is missing the `in` property."),
        rule!("PAR-003", "Path Parameter Not Required", InvalidPropertyValue, BOTH, MANDATED, PathParameterNotRequired,
            "Path parameter '{name}' must be marked as required."),
        rule!("PAR-004", "Missing Body Parameter Schema", RequiredProperty, OAS20, MANDATED, BodySchemaMissing,
            "Body parameter '{name}' is missing a schema."),
        rule!("PAR-005", "Missing Parameter Type", RequiredProperty, OAS20, MANDATED, ParameterTypeMissing,
            "Parameter '{name}' is missing a type."),
        rule!("PAR-006", "Missing Array Parameter Items", RequiredProperty, OAS20, MANDATED, ParameterItemsMissing,
            "Array parameter '{name}' is missing `items`."),
        rule!("PAR-007", "Missing Parameter Schema or Content", RequiredProperty, OAS30, MANDATED, ParameterSchemaMissing,
            "Parameter '{name}' must declare either a schema or content."),
        rule!("PAR-008", "Invalid Parameter Location", InvalidPropertyValue, BOTH, MANDATED, ParameterLocationInvalid,
            "Parameter location '{value}' is not one of: {allowed}."),
        rule!("PAR-009", "Invalid Parameter Type", InvalidPropertyValue, OAS20, MANDATED, ParameterTypeInvalid,
            "Parameter type '{value}' is not one of: {allowed}."),
        rule!("PAR-010", "Invalid Collection Format", InvalidPropertyValue, OAS20, MANDATED, CollectionFormatInvalid,
            "Collection format '{value}' is not allowed here."),
        rule!("PAR-011", "Invalid Parameter Style", InvalidPropertyValue, OAS30, MANDATED, ParameterStyleInvalid,
            "Style '{value}' is not allowed for a parameter in '{location}'."),
        rule!("PAR-012", "File Parameter Outside Form Data", InvalidPropertyValue, OAS20, MANDATED, FileParameterLocation,
            "File parameter '{name}' must be in formData."),
        rule!("PAR-013", "Parameter Schema and Content", MutuallyExclusive, OAS30, MANDATED, ParameterSchemaContentExclusive,
            "Parameter '{name}' declares both a schema and content."),
        rule!("PAR-014", "Parameter Example and Examples", MutuallyExclusive, OAS30, MANDATED, ParameterExampleExclusive,
            "Parameter '{name}' declares both `example` and `examples`."),
        rule!("PAR-015", "Invalid Parameter Content", InvalidPropertyValue, OAS30, MANDATED, ParameterContentSize,
            "Parameter content must contain exactly one entry."),
        rule!("PAR-016", "Duplicate Parameter", Uniqueness, BOTH, MANDATED, ParameterDuplicate,
            "Parameter '{name}' in '{location}' is declared more than once."),
        rule!("PAR-017", "Multiple Body Parameters", Uniqueness, OAS20, MANDATED, BodyParameterMultiple,
            "Only one body parameter is allowed."),
        rule!("PAR-018", "Body and Form Data Parameters", MutuallyExclusive, OAS20, MANDATED, BodyFormDataExclusive,
            "An operation cannot have both body and formData parameters."),
        rule!("PAR-020", "Path Parameter Not in Path", InvalidPropertyValue, BOTH, MANDATED, PathParameterNotInPath,
            "Path parameter '{name}' does not appear in path '{path}'."),
        rule!("PAR-021", "Invalid Allow Empty Value", InvalidPropertyValue, BOTH, MANDATED, AllowEmptyValueLocation,
            "allowEmptyValue is not allowed for a parameter in '{location}'."),
        rule!("IT-001", "Missing Items Type", RequiredProperty, OAS20, MANDATED, ItemsTypeMissing,
            "Items are missing a type."),
        rule!("IT-002", "Missing Nested Items", RequiredProperty, OAS20, MANDATED, ItemsItemsMissing,
            "Array items are missing nested `items`."),
        rule!("IT-003", "Invalid Items Type", InvalidPropertyValue, OAS20, MANDATED, ItemsTypeInvalid,
            "Items type '{value}' is not one of: {allowed}."),
        rule!("IT-004", "Invalid Items Collection Format", InvalidPropertyValue, OAS20, MANDATED, ItemsCollectionFormatInvalid,
            "Collection format '{value}' is not one of: {allowed}."),
    ]
}

/// Parameter view with accessors for the properties most rules consult.
trait ParameterExt {
    fn name_or_blank(&self) -> &str;
    fn located(&self, location: &str) -> bool;
    fn is_body(&self) -> bool {
        self.located("body")
    }
}

impl ParameterExt for Parameter {
    fn name_or_blank(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    fn located(&self, location: &str) -> bool {
        self.location.as_deref() == Some(location)
    }
}

/// Whether `node` is a plain (non-reference) 2.0 non-body parameter.
fn is_typed(node: &Parameter) -> bool {
    node.reference.is_none() && node.location.is_some() && !node.is_body()
}

// ─── Presence ───────────────────────────────────────────────────────────────

declare_rule!(both ParameterNameMissing);

impl Visitor for ParameterNameMissing {
    fn visit_parameter(&mut self, node: NodeRef<'_, Parameter>) {
        if node.reference.is_none() {
            require(&self.reporter, node, node.name.is_some(), "name");
        }
    }
}

declare_rule!(both ParameterLocationMissing);

impl Visitor for ParameterLocationMissing {
    fn visit_parameter(&mut self, node: NodeRef<'_, Parameter>) {
        if node.reference.is_none() {
            require(&self.reporter, node, node.location.is_some(), "in");
        }
    }
}

declare_rule!(both PathParameterNotRequired);

impl Visitor for PathParameterNotRequired {
    fn visit_parameter(&mut self, node: NodeRef<'_, Parameter>) {
        if node.reference.is_none() && node.located("path") && node.required != Some(true) {
            self.reporter
                .report(node, Some("required"), &[("name", node.get().name_or_blank())]);
        }
    }
}

declare_rule!(both BodySchemaMissing);

impl Visitor for BodySchemaMissing {
    fn visit_parameter(&mut self, node: NodeRef<'_, Parameter>) {
        if node.reference.is_none() && node.is_body() && node.schema.is_none() {
            self.reporter
                .report(node, Some("schema"), &[("name", node.get().name_or_blank())]);
        }
    }
}

declare_rule!(both ParameterTypeMissing);

impl Visitor for ParameterTypeMissing {
    fn visit_parameter(&mut self, node: NodeRef<'_, Parameter>) {
        if is_typed(&node) && node.type_name.is_none() {
            self.reporter
                .report(node, Some("type"), &[("name", node.get().name_or_blank())]);
        }
    }
}

declare_rule!(both ParameterItemsMissing);

impl Visitor for ParameterItemsMissing {
    fn visit_parameter(&mut self, node: NodeRef<'_, Parameter>) {
        if is_typed(&node) && node.type_name.as_deref() == Some("array") && node.items.is_none() {
            self.reporter
                .report(node, Some("items"), &[("name", node.get().name_or_blank())]);
        }
    }
}

declare_rule!(both ParameterSchemaMissing);

impl Visitor for ParameterSchemaMissing {
    fn visit_parameter(&mut self, node: NodeRef<'_, Parameter>) {
        if node.reference.is_none() && node.schema.is_none() && node.content.is_none() {
            self.reporter
                .report(node, Some("schema"), &[("name", node.get().name_or_blank())]);
        }
    }
}

// ─── Values ─────────────────────────────────────────────────────────────────

declare_rule!(both ParameterLocationInvalid);

impl Visitor for ParameterLocationInvalid {
    fn visit_parameter(&mut self, node: NodeRef<'_, Parameter>) {
        if node.reference.is_none() {
            let allowed = parameter_locations(node.generation());
            check_enum(&self.reporter, node, node.get().location.as_deref(), allowed, "in");
        }
    }
}

declare_rule!(both ParameterTypeInvalid);

impl Visitor for ParameterTypeInvalid {
    fn visit_parameter(&mut self, node: NodeRef<'_, Parameter>) {
        if is_typed(&node) {
            check_enum(
                &self.reporter,
                node,
                node.get().type_name.as_deref(),
                OAS20_PARAMETER_TYPES,
                "type",
            );
        }
    }
}

declare_rule!(both CollectionFormatInvalid);

impl Visitor for CollectionFormatInvalid {
    fn visit_parameter(&mut self, node: NodeRef<'_, Parameter>) {
        if node.reference.is_some() {
            return;
        }
        let Some(format) = node.get().collection_format.as_deref() else {
            return;
        };
        let valid = COLLECTION_FORMATS.contains(&format)
            && (format != "multi" || node.located("query") || node.located("formData"));
        if !valid {
            self.reporter
                .report(node, Some("collectionFormat"), &[("value", format)]);
        }
    }
}

declare_rule!(both ParameterStyleInvalid);

impl Visitor for ParameterStyleInvalid {
    fn visit_parameter(&mut self, node: NodeRef<'_, Parameter>) {
        if node.reference.is_some() {
            return;
        }
        let Some(style) = node.get().style.as_deref() else {
            return;
        };
        let location = node.get().location.as_deref();
        let valid = match PARAMETER_STYLES.iter().find(|(name, _)| *name == style) {
            None => false,
            Some((_, locations)) => location.is_none_or(|l| locations.contains(&l)),
        };
        if !valid {
            self.reporter.report(node, Some("style"), &[
                ("value", style),
                ("location", location.unwrap_or_default()),
            ]);
        }
    }
}

declare_rule!(both FileParameterLocation);

impl Visitor for FileParameterLocation {
    fn visit_parameter(&mut self, node: NodeRef<'_, Parameter>) {
        if is_typed(&node) && node.type_name.as_deref() == Some("file") && !node.located("formData") {
            self.reporter
                .report(node, Some("type"), &[("name", node.get().name_or_blank())]);
        }
    }
}

declare_rule!(both ParameterSchemaContentExclusive);

impl Visitor for ParameterSchemaContentExclusive {
    fn visit_parameter(&mut self, node: NodeRef<'_, Parameter>) {
        if node.reference.is_none() && node.schema.is_some() && node.content.is_some() {
            self.reporter
                .report(node, Some("content"), &[("name", node.get().name_or_blank())]);
        }
    }
}

declare_rule!(both ParameterExampleExclusive);

impl Visitor for ParameterExampleExclusive {
    fn visit_parameter(&mut self, node: NodeRef<'_, Parameter>) {
        if node.reference.is_none() && node.example.is_some() && node.examples.is_some() {
            self.reporter
                .report(node, Some("examples"), &[("name", node.get().name_or_blank())]);
        }
    }
}

declare_rule!(both ParameterContentSize);

impl Visitor for ParameterContentSize {
    fn visit_parameter(&mut self, node: NodeRef<'_, Parameter>) {
        if node.reference.is_none()
            && let Some(content) = &node.content
            && content.len() != 1
        {
            self.reporter.report(node, Some("content"), &[]);
        }
    }
}

declare_rule!(both PathParameterNotInPath);

impl Visitor for PathParameterNotInPath {
    fn visit_parameter(&mut self, node: NodeRef<'_, Parameter>) {
        if node.reference.is_some() || !node.located("path") {
            return;
        }
        let Some(name) = node.get().name.as_deref() else {
            return;
        };
        let Some(path) = enclosing_path(node.document(), node.id()) else {
            return;
        };
        let Some(template) = PathTemplate::parse(path) else {
            return;
        };
        if !template.parameters.iter().any(|p| p == name) {
            self.reporter
                .report(node, Some("name"), &[("name", name), ("path", path)]);
        }
    }
}

declare_rule!(both AllowEmptyValueLocation);

impl Visitor for AllowEmptyValueLocation {
    fn visit_parameter(&mut self, node: NodeRef<'_, Parameter>) {
        if node.reference.is_some() || node.allow_empty_value.is_none() {
            return;
        }
        let Some(location) = node.get().location.as_deref() else {
            return;
        };
        let allowed = match node.generation() {
            Generation::Oas20 => matches!(location, "query" | "formData"),
            Generation::Oas30 => location == "query",
        };
        if !allowed {
            self.reporter
                .report(node, Some("allowEmptyValue"), &[("location", location)]);
        }
    }
}

// ─── Parameter lists ────────────────────────────────────────────────────────

declare_rule!(both ParameterDuplicate);

impl ParameterDuplicate {
    fn check(&self, doc: &Document, list: Option<&Vec<NodeId>>) {
        let mut entries = Occurrences::default();
        for id in list.into_iter().flatten() {
            let Some(param) = dereference::<Parameter>(doc, *id) else {
                continue;
            };
            let (Some(name), Some(location)) =
                (param.get().name.as_deref(), param.get().location.as_deref())
            else {
                continue;
            };
            let key = format!("{}\u{0}{}", location, name);
            entries.check(
                &self.reporter,
                doc,
                &key,
                *id,
                Some("name"),
                &[("name", name), ("location", location)],
            );
        }
    }
}

impl Visitor for ParameterDuplicate {
    fn visit_path_item(&mut self, node: NodeRef<'_, PathItem>) {
        self.check(node.document(), node.get().parameters.as_ref());
    }

    fn visit_operation(&mut self, node: NodeRef<'_, Operation>) {
        self.check(node.document(), node.get().parameters.as_ref());
    }
}

declare_rule!(both BodyParameterMultiple);

impl BodyParameterMultiple {
    fn check(&self, doc: &Document, list: Option<&Vec<NodeId>>) {
        let mut seen = false;
        for id in list.into_iter().flatten() {
            let is_body = dereference::<Parameter>(doc, *id).is_some_and(|p| p.is_body());
            if !is_body {
                continue;
            }
            if seen {
                self.reporter.report_at(doc, *id, Some("in"), &[]);
            }
            seen = true;
        }
    }
}

impl Visitor for BodyParameterMultiple {
    fn visit_path_item(&mut self, node: NodeRef<'_, PathItem>) {
        self.check(node.document(), node.get().parameters.as_ref());
    }

    fn visit_operation(&mut self, node: NodeRef<'_, Operation>) {
        self.check(node.document(), node.get().parameters.as_ref());
    }
}

declare_rule!(both BodyFormDataExclusive);

impl Visitor for BodyFormDataExclusive {
    fn visit_operation(&mut self, node: NodeRef<'_, Operation>) {
        let doc = node.document();
        let locations: HashSet<String> = operation_parameters(node)
            .into_iter()
            .filter_map(|id| dereference::<Parameter>(doc, id))
            .filter_map(|p| p.get().location.clone())
            .collect();
        if locations.contains("body") && locations.contains("formData") {
            self.reporter.report(node, None, &[]);
        }
    }
}

// ─── Items ──────────────────────────────────────────────────────────────────

declare_rule!(oas20 ItemsTypeMissing);

impl Oas20Visitor for ItemsTypeMissing {
    fn visit_items(&mut self, node: NodeRef<'_, Items>) {
        require(&self.reporter, node, node.type_name.is_some(), "type");
    }
}

declare_rule!(oas20 ItemsItemsMissing);

impl Oas20Visitor for ItemsItemsMissing {
    fn visit_items(&mut self, node: NodeRef<'_, Items>) {
        if node.type_name.as_deref() == Some("array") && node.items.is_none() {
            self.reporter.report(node, Some("items"), &[]);
        }
    }
}

declare_rule!(oas20 ItemsTypeInvalid);

impl Oas20Visitor for ItemsTypeInvalid {
    fn visit_items(&mut self, node: NodeRef<'_, Items>) {
        check_enum(&self.reporter, node, node.get().type_name.as_deref(), OAS20_ITEMS_TYPES, "type");
    }
}

declare_rule!(oas20 ItemsCollectionFormatInvalid);

impl Oas20Visitor for ItemsCollectionFormatInvalid {
    fn visit_items(&mut self, node: NodeRef<'_, Items>) {
        check_enum(
            &self.reporter,
            node,
            node.get().collection_format.as_deref(),
            ITEMS_COLLECTION_FORMATS,
            "collectionFormat",
        );
    }
}
