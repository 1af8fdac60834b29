//! Server and server variable rules (3.0).

use regex::Regex;
use std::sync::LazyLock;

use super::require;
use crate::catalog::RuleDescriptor;
use crate::model::*;
use crate::visitor::Oas30Visitor;

static VARIABLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").unwrap());

pub(super) fn rules() -> Vec<RuleDescriptor> {
    vec![
        rule!("SRV-001", "Missing Server URL", RequiredProperty, OAS30, MANDATED, ServerUrlMissing,
            "The server is missing a URL."),
        rule!("SRV-002", "Invalid Server URL", InvalidPropertyFormat, OAS30, MANDATED, ServerUrlInvalid,
            "Server URL '{value}' is not a valid URL."),
        rule!("SRV-003", "Undefined Server Variable", InvalidPropertyValue, OAS30, MANDATED, ServerVariableUndefined,
            "Server URL uses variable '{name}', which is not defined."),
        rule!("SVAR-001", "Missing Server Variable Default", RequiredProperty, OAS30, MANDATED, ServerVariableDefaultMissing,
            "The server variable is missing a default value."),
        rule!("SVAR-002", "Server Variable Default Not Allowed", InvalidPropertyValue, OAS30, MANDATED, ServerVariableDefaultInvalid,
            "Default '{value}' is not one of the variable's enum values."),
    ]
}

declare_rule!(oas30 ServerUrlMissing);

impl Oas30Visitor for ServerUrlMissing {
    fn visit_server(&mut self, node: NodeRef<'_, Server>) {
        require(&self.reporter, node, node.url.is_some(), "url");
    }
}

declare_rule!(oas30 ServerUrlInvalid);

impl Oas30Visitor for ServerUrlInvalid {
    fn visit_server(&mut self, node: NodeRef<'_, Server>) {
        let Some(url) = node.get().url.as_deref() else {
            return;
        };
        // Variables stand in for arbitrary text.
        let expanded = VARIABLE_RE.replace_all(url, "x");
        if !(self.reporter.formats().url)(&expanded) {
            self.reporter.report(node, Some("url"), &[("value", url)]);
        }
    }
}

declare_rule!(oas30 ServerVariableUndefined);

impl Oas30Visitor for ServerVariableUndefined {
    fn visit_server(&mut self, node: NodeRef<'_, Server>) {
        let Some(url) = node.get().url.as_deref() else {
            return;
        };
        let variables = node.get().variables.as_ref();
        for caps in VARIABLE_RE.captures_iter(url) {
            let name = &caps[1];
            if !variables.is_some_and(|v| v.contains_key(name)) {
                self.reporter.report(node, Some("url"), &[("name", name)]);
            }
        }
    }
}

declare_rule!(oas30 ServerVariableDefaultMissing);

impl Oas30Visitor for ServerVariableDefaultMissing {
    fn visit_server_variable(&mut self, node: NodeRef<'_, ServerVariable>) {
        require(&self.reporter, node, node.default.is_some(), "default");
    }
}

declare_rule!(oas30 ServerVariableDefaultInvalid);

impl Oas30Visitor for ServerVariableDefaultInvalid {
    fn visit_server_variable(&mut self, node: NodeRef<'_, ServerVariable>) {
        if let (Some(default), Some(allowed)) = (node.get().default.as_deref(), &node.get().enum_values)
            && !allowed.iter().any(|v| v == default)
        {
            self.reporter.report(node, Some("default"), &[("value", default)]);
        }
    }
}
