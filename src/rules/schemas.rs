//! Schema and discriminator rules.

use std::collections::HashSet;

use super::{check_enum, require};
use crate::catalog::RuleDescriptor;
use crate::enums::schema_types;
use crate::model::*;
use crate::visitor::{Oas30Visitor, Visitor};

pub(super) fn rules() -> Vec<RuleDescriptor> {
    vec![
        rule!("SCH-001", "Missing Array Schema Items", RequiredProperty, OAS30, MANDATED, SchemaItemsMissing,
            "Array schema is missing `items`."),
        rule!("SCH-002", "Invalid Schema Type", InvalidPropertyValue, BOTH, MANDATED, SchemaTypeInvalid,
            "Schema type '{value}' is not one of: {allowed}."),
        rule!("SCH-003", "Read Only and Write Only", MutuallyExclusive, OAS30, MANDATED, SchemaReadWriteExclusive,
            "A schema cannot be both readOnly and writeOnly."),
        rule!("SCH-004", "Duplicate Required Property", Uniqueness, BOTH, MANDATED, SchemaRequiredDuplicate,
            "Property '{name}' is listed as required more than once."),
        rule!("SCH-006", "Undefined Required Property", BestPractice, BOTH, OPTIONAL, SchemaRequiredUndefined,
            "Required property '{name}' is not defined in `properties`."),
        rule!("SCH-007", "Discriminator Not Required", InvalidPropertyValue, OAS20, MANDATED, DiscriminatorNotRequired,
            "Discriminator property '{name}' must be listed as required."),
        rule!("DISC-001", "Missing Discriminator Property Name", RequiredProperty, OAS30, MANDATED, DiscriminatorPropertyMissing,
            "The discriminator is missing `propertyName`."),
    ]
}

declare_rule!(both SchemaItemsMissing);

impl Visitor for SchemaItemsMissing {
    fn visit_schema(&mut self, node: NodeRef<'_, Schema>) {
        if node.reference.is_none() && node.type_name.as_deref() == Some("array") && node.items.is_none() {
            self.reporter.report(node, Some("items"), &[]);
        }
    }
}

declare_rule!(both SchemaTypeInvalid);

impl Visitor for SchemaTypeInvalid {
    fn visit_schema(&mut self, node: NodeRef<'_, Schema>) {
        if node.reference.is_none() {
            let allowed = schema_types(node.generation());
            check_enum(&self.reporter, node, node.get().type_name.as_deref(), allowed, "type");
        }
    }
}

declare_rule!(both SchemaReadWriteExclusive);

impl Visitor for SchemaReadWriteExclusive {
    fn visit_schema(&mut self, node: NodeRef<'_, Schema>) {
        if node.reference.is_none() && node.read_only == Some(true) && node.write_only == Some(true) {
            self.reporter.report(node, Some("writeOnly"), &[]);
        }
    }
}

declare_rule!(both SchemaRequiredDuplicate);

impl Visitor for SchemaRequiredDuplicate {
    fn visit_schema(&mut self, node: NodeRef<'_, Schema>) {
        if node.reference.is_some() {
            return;
        }
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for name in node.get().required.iter().flatten() {
            if !seen.insert(name) && reported.insert(name) {
                self.reporter
                    .report(node, Some("required"), &[("name", name.as_str())]);
            }
        }
    }
}

declare_rule!(both SchemaRequiredUndefined);

impl Visitor for SchemaRequiredUndefined {
    fn visit_schema(&mut self, node: NodeRef<'_, Schema>) {
        if node.reference.is_some() || node.all_of.is_some() {
            return;
        }
        let (Some(required), Some(properties)) = (&node.get().required, &node.get().properties) else {
            return;
        };
        for name in required {
            if !properties.contains_key(name) {
                self.reporter
                    .report(node, Some("required"), &[("name", name.as_str())]);
            }
        }
    }
}

declare_rule!(both DiscriminatorNotRequired);

impl Visitor for DiscriminatorNotRequired {
    fn visit_schema(&mut self, node: NodeRef<'_, Schema>) {
        if node.reference.is_some() {
            return;
        }
        let Some(property) = node.get().discriminator_property.as_deref() else {
            return;
        };
        let required = node.get().required.iter().flatten().any(|r| r == property);
        if !required {
            self.reporter
                .report(node, Some("discriminator"), &[("name", property)]);
        }
    }
}

declare_rule!(oas30 DiscriminatorPropertyMissing);

impl Oas30Visitor for DiscriminatorPropertyMissing {
    fn visit_discriminator(&mut self, node: NodeRef<'_, Discriminator>) {
        require(&self.reporter, node, node.property_name.is_some(), "propertyName");
    }
}
